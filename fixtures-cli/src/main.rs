//! Aleo Fixtures CLI
//!
//! Inspect, export, lint, and replay the pinned Aleo account fixtures.

use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use colored::*;
use tracing::debug;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use fixtures_core::data::{self, FixtureValue, FIXTURES, HELLO_PROGRAM};
use fixtures_core::traits::ProgramLoader;
use fixtures_encoding::{fingerprint_hex, lint_all, FIXTURES_FINGERPRINT};
use fixtures_harness::{CheckStatus, ConformanceSuite, HarnessConfig, RecordedSdk};
use fixtures_program::Interpreter;

/// Aleo Fixtures - pinned account, record and program test vectors
#[derive(Parser)]
#[command(name = "aleo-fixtures")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List every fixture
    List,

    /// Print one fixture's value
    Show {
        /// Fixture name, e.g. view_key
        name: String,
    },

    /// Export all fixtures as JSON
    Export {
        /// Output file (stdout when omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Check every fixture's encoding and the table fingerprint
    Lint {
        /// Report failures of this fixture as warnings
        #[arg(long = "allow", value_name = "NAME")]
        allow: Vec<String>,
    },

    /// Run a program function on literal inputs
    Run {
        /// Program source file (the bundled hello program when omitted)
        #[arg(short, long, env = "ALEO_FIXTURES_PROGRAM")]
        program: Option<PathBuf>,
        /// Function name
        function: String,
        /// Input literals, e.g. 3u32
        inputs: Vec<String>,
    },

    /// Replay the fixtures through the conformance suite
    Verify {
        /// Print the report as JSON
        #[arg(long)]
        json: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        "aleo_fixtures=debug,fixtures=debug,info"
    } else {
        "aleo_fixtures=info,fixtures=info,warn"
    };

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    match cli.command {
        Commands::List => cmd_list(),
        Commands::Show { name } => cmd_show(&name),
        Commands::Export { output } => cmd_export(output.as_deref()),
        Commands::Lint { allow } => cmd_lint(&allow),
        Commands::Run {
            program,
            function,
            inputs,
        } => cmd_run(program.as_deref(), &function, &inputs),
        Commands::Verify { json } => cmd_verify(json),
    }
}

/// List fixtures
fn cmd_list() -> Result<()> {
    println!("{}", "📦 Fixtures".cyan().bold());

    for fixture in FIXTURES {
        let size = match fixture.value {
            FixtureValue::Bytes(bytes) => format!("{} bytes", bytes.len()),
            FixtureValue::Text(text) => format!("{} chars", text.chars().count()),
        };
        println!(
            "   {:<28} {:<18} {}",
            fixture.name.green(),
            format!("{:?}", fixture.kind).dimmed(),
            size
        );
    }

    println!("\n   {} {}", "Fingerprint:".dimmed(), fingerprint_hex(FIXTURES));
    Ok(())
}

/// Show a fixture
fn cmd_show(name: &str) -> Result<()> {
    let fixture = data::require(name).with_context(|| format!("No fixture named '{name}'"))?;

    match fixture.value {
        FixtureValue::Bytes(bytes) => println!("{}", hex::encode(bytes)),
        FixtureValue::Text(text) => println!("{text}"),
    }
    Ok(())
}

/// Export fixtures as JSON
fn cmd_export(output: Option<&Path>) -> Result<()> {
    let json = data::export_json().context("Failed to serialize fixtures")?;

    if let Some(path) = output {
        std::fs::write(path, &json)
            .with_context(|| format!("Failed to write {}", path.display()))?;
        println!("{} {}", "✅ Fixtures exported to:".green(), path.display());
    } else {
        println!("{json}");
    }
    Ok(())
}

/// Lint fixtures
fn cmd_lint(allow: &[String]) -> Result<()> {
    println!("{}", "🔍 Linting fixtures...".cyan().bold());

    let mut failures = 0;
    for (fixture, result) in lint_all(FIXTURES) {
        match result {
            Ok(()) => println!("   {} {}", "✓".green(), fixture.name),
            Err(e) if allow.iter().any(|name| name == fixture.name) => {
                println!("   {} {}: {} (allowed)", "⚠".yellow(), fixture.name, e)
            }
            Err(e) => {
                failures += 1;
                println!("   {} {}: {}", "✗".red(), fixture.name, e);
            }
        }
    }

    let fingerprint = fingerprint_hex(FIXTURES);
    if fingerprint == FIXTURES_FINGERPRINT {
        println!("\n   {} fingerprint {}", "✓".green(), fingerprint);
    } else {
        failures += 1;
        println!(
            "\n   {} fingerprint {} does not match pinned {}",
            "✗".red(),
            fingerprint,
            FIXTURES_FINGERPRINT
        );
    }

    if failures > 0 {
        bail!("{failures} lint failure(s)");
    }
    println!("\n{}", "✅ All fixtures well-formed".green().bold());
    Ok(())
}

/// Run a program function
fn cmd_run(program: Option<&Path>, function: &str, inputs: &[String]) -> Result<()> {
    let source = match program {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read program {}", path.display()))?,
        None => HELLO_PROGRAM.to_owned(),
    };
    debug!(function, inputs = ?inputs, "Running program");

    let outputs = Interpreter
        .execute(&source, function, inputs)
        .with_context(|| format!("Failed to run '{function}'"))?;

    for output in outputs {
        println!("{output}");
    }
    Ok(())
}

/// Replay fixtures through the conformance suite
fn cmd_verify(json: bool) -> Result<()> {
    let sdk = RecordedSdk::from_fixtures();
    // The seed relation is not pinned, so a replaying SDK has nothing to say about it.
    let config = HarnessConfig::new().seed_repetitions(0);
    let report = ConformanceSuite::new(&sdk, &Interpreter)
        .with_config(config)
        .run();

    if json {
        println!("{}", report.to_json().context("Failed to serialize report")?);
    } else {
        println!("{}", "🧪 Conformance (recorded SDK)".cyan().bold());
        for outcome in &report.outcomes {
            let marker = match outcome.status {
                CheckStatus::Passed => "✓".green(),
                CheckStatus::Failed(_) => "✗".red(),
                CheckStatus::Skipped(_) => "-".dimmed(),
            };
            println!("   {marker} {outcome}");
        }
    }

    let failed = report.failures().count();
    if failed > 0 {
        bail!("{failed} check(s) failed");
    }
    if !json {
        println!("\n{}", "✅ All checks passed".green().bold());
    }
    Ok(())
}
