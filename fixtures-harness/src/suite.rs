//! The conformance suite.
//!
//! Checks run in a fixed order:
//!
//! 1. seed determinism (and the pinned seed key, if configured)
//! 2. view key and address derivation for every account vector
//! 3. signing and verification of the message
//! 4. record decryption
//! 5. foreign record rejection
//! 6. cross-key rejection
//! 7. program shape
//! 8. program execution cases
//!
//! An SDK error where a value is required is a failure. Where a rejection
//! is required, an SDK error passes unless it reports a malformed input:
//! the fixtures fed to a rejection check are decoded first, so a format
//! error means the SDK never reached the ownership check.
//! Nothing is retried.

use std::ops::ControlFlow;

use tracing::{debug, info, instrument, warn};

use fixtures_core::data::{
    ACCOUNT, ACCOUNTS, BEACON_ACCOUNT, FOREIGN_CIPHERTEXT_STRING, FOREIGN_VIEW_KEY_STRING,
    HELLO_PROGRAM, HELLO_PROGRAM_ID, HELLO_PROGRAM_MAIN_FUNCTION, MESSAGE,
    RECORD_CIPHERTEXT_STRING, RECORD_PLAINTEXT_STRING, SEED,
};
use fixtures_core::traits::{AccountSdk, ProgramLoader};
use fixtures_core::types::{
    AddressString, FunctionSignature, PrivateKeyString, RecordCiphertextString, ViewKeyString,
};
use fixtures_encoding::{decode_record_ciphertext, decode_view_key};

use crate::config::{ExecutionCase, HarnessConfig};
use crate::report::{Check, CheckStatus, ConformanceReport, Mismatch};

/// Declared signature of the example program's main function.
const HELLO_INPUTS: [&str; 2] = ["u32.public", "u32.private"];
const HELLO_OUTPUTS: [&str; 1] = ["u32.private"];

type CheckResult = std::result::Result<(), Mismatch>;

/// Runs the fixtures against an SDK and a program loader.
pub struct ConformanceSuite<'a> {
    sdk: &'a dyn AccountSdk,
    loader: &'a dyn ProgramLoader,
    config: HarnessConfig,
}

impl<'a> ConformanceSuite<'a> {
    /// Creates a suite with the default configuration.
    pub fn new(sdk: &'a dyn AccountSdk, loader: &'a dyn ProgramLoader) -> Self {
        Self {
            sdk,
            loader,
            config: HarnessConfig::default(),
        }
    }

    /// Replaces the configuration.
    pub fn with_config(mut self, config: HarnessConfig) -> Self {
        self.config = config;
        self
    }

    /// Returns the configuration.
    pub fn config(&self) -> &HarnessConfig {
        &self.config
    }

    /// Runs every check and returns the report.
    #[instrument(skip_all)]
    pub fn run(&self) -> ConformanceReport {
        let mut report = ConformanceReport::new();

        if self.run_checks(&mut report).is_break() {
            report.stopped_early = true;
            info!("Stopping on first failure");
        }

        info!(
            checks = report.outcomes.len(),
            passed = report.passed_count(),
            failed = report.failures().count(),
            "Conformance run complete"
        );
        report
    }

    fn run_checks(&self, report: &mut ConformanceReport) -> ControlFlow<()> {
        self.seed_checks(report)?;
        self.account_checks(report)?;
        self.signature_checks(report)?;
        self.record_checks(report)?;
        self.program_checks(report)
    }

    /// Records an outcome; breaks when the run should stop.
    fn record(&self, report: &mut ConformanceReport, check: Check, result: CheckResult) -> ControlFlow<()> {
        let status = match result {
            Ok(()) => {
                debug!(%check, "Check passed");
                CheckStatus::Passed
            }
            Err(mismatch) => {
                warn!(%check, %mismatch, "Check failed");
                CheckStatus::Failed(mismatch)
            }
        };

        let failed = matches!(status, CheckStatus::Failed(_));
        report.push(check, status);

        if failed && self.config.stop_on_first_failure {
            ControlFlow::Break(())
        } else {
            ControlFlow::Continue(())
        }
    }

    fn skip(report: &mut ConformanceReport, check: Check, reason: &str) {
        debug!(%check, reason, "Check skipped");
        report.push(check, CheckStatus::Skipped(reason.to_owned()));
    }

    // ═══════════════════════════════════════════════════════════════════════════
    // SEED
    // ═══════════════════════════════════════════════════════════════════════════

    #[instrument(skip_all)]
    fn seed_checks(&self, report: &mut ConformanceReport) -> ControlFlow<()> {
        if self.config.seed_repetitions == 0 {
            Self::skip(report, Check::SeedDeterminism, "seed_repetitions is 0");
            Self::skip(report, Check::SeedKey, "seed_repetitions is 0");
            return ControlFlow::Continue(());
        }

        let first = match self.sdk.private_key_from_seed(&SEED) {
            Ok(key) => key,
            Err(e) => {
                self.record(report, Check::SeedDeterminism, Err(Mismatch::sdk("key generation", e)))?;
                Self::skip(report, Check::SeedKey, "key generation failed");
                return ControlFlow::Continue(());
            }
        };

        let determinism = self.seed_determinism(&first);
        self.record(report, Check::SeedDeterminism, determinism)?;

        match &self.config.expected_seed_key {
            Some(expected) if expected != first.as_str() => self.record(
                report,
                Check::SeedKey,
                Err(Mismatch::SeedKey {
                    expected: expected.clone(),
                    actual: first.as_str().to_owned(),
                }),
            ),
            Some(_) => self.record(report, Check::SeedKey, Ok(())),
            None => {
                Self::skip(report, Check::SeedKey, "no expected seed key configured");
                ControlFlow::Continue(())
            }
        }
    }

    fn seed_determinism(&self, first: &PrivateKeyString) -> CheckResult {
        for _ in 1..self.config.seed_repetitions {
            let later = self
                .sdk
                .private_key_from_seed(&SEED)
                .map_err(|e| Mismatch::sdk("key generation", e))?;
            if later != *first {
                return Err(Mismatch::SeedNotDeterministic {
                    first: first.as_str().to_owned(),
                    later: later.as_str().to_owned(),
                });
            }
        }
        Ok(())
    }

    // ═══════════════════════════════════════════════════════════════════════════
    // ACCOUNTS
    // ═══════════════════════════════════════════════════════════════════════════

    #[instrument(skip_all)]
    fn account_checks(&self, report: &mut ConformanceReport) -> ControlFlow<()> {
        for account in ACCOUNTS {
            let private_key = match PrivateKeyString::new(account.private_key) {
                Ok(key) => key,
                Err(e) => {
                    self.record(
                        report,
                        Check::ViewKey { account: account.label },
                        Err(Mismatch::sdk("private key parsing", e)),
                    )?;
                    continue;
                }
            };

            match account.view_key {
                Some(expected_view_key) => {
                    let result = self.check_view_key(&private_key, expected_view_key);
                    self.record(report, Check::ViewKey { account: account.label }, result)?;

                    let result = self.check_address_from_view_key(expected_view_key, account.address);
                    self.record(report, Check::Address { account: account.label }, result)?;
                }
                None => {
                    Self::skip(report, Check::ViewKey { account: account.label }, "no view key pinned");
                    let result = self.check_address_from_private_key(&private_key, account.address);
                    self.record(report, Check::Address { account: account.label }, result)?;
                }
            }
        }
        ControlFlow::Continue(())
    }

    fn check_view_key(&self, private_key: &PrivateKeyString, expected: &str) -> CheckResult {
        let derived = self
            .sdk
            .view_key_from_private_key(private_key)
            .map_err(|e| Mismatch::sdk("view key derivation", e))?;
        if derived.as_str() != expected {
            return Err(Mismatch::ViewKey {
                expected: expected.to_owned(),
                actual: derived.as_str().to_owned(),
            });
        }
        Ok(())
    }

    fn check_address_from_view_key(&self, view_key: &str, expected: &str) -> CheckResult {
        let view_key = ViewKeyString::new(view_key).map_err(|e| Mismatch::sdk("view key parsing", e))?;
        let derived = self
            .sdk
            .address_from_view_key(&view_key)
            .map_err(|e| Mismatch::sdk("address derivation", e))?;
        if derived.as_str() != expected {
            return Err(Mismatch::Address {
                expected: expected.to_owned(),
                actual: derived.as_str().to_owned(),
            });
        }
        Ok(())
    }

    fn check_address_from_private_key(&self, private_key: &PrivateKeyString, expected: &str) -> CheckResult {
        let derived = self
            .sdk
            .address_from_private_key(private_key)
            .map_err(|e| Mismatch::sdk("address derivation", e))?;
        if derived.as_str() != expected {
            return Err(Mismatch::Address {
                expected: expected.to_owned(),
                actual: derived.as_str().to_owned(),
            });
        }
        Ok(())
    }

    // ═══════════════════════════════════════════════════════════════════════════
    // SIGNATURES
    // ═══════════════════════════════════════════════════════════════════════════

    #[instrument(skip_all)]
    fn signature_checks(&self, report: &mut ConformanceReport) -> ControlFlow<()> {
        let result = self.check_signature();
        self.record(report, Check::Signature, result)
    }

    fn check_signature(&self) -> CheckResult {
        let private_key =
            PrivateKeyString::new(ACCOUNT.private_key).map_err(|e| Mismatch::malformed("private_key", e))?;
        let signer = AddressString::new(ACCOUNT.address).map_err(|e| Mismatch::malformed("address", e))?;
        let other = AddressString::new(BEACON_ACCOUNT.address)
            .map_err(|e| Mismatch::malformed("beacon_address", e))?;

        let signature = self
            .sdk
            .sign(&private_key, &MESSAGE)
            .map_err(|e| Mismatch::sdk("signing", e))?;

        let verify = |address: &AddressString| {
            self.sdk
                .verify(address, &MESSAGE, &signature)
                .map_err(|e| Mismatch::sdk("signature verification", e))
        };
        if !verify(&signer)? {
            return Err(Mismatch::SignatureRejected {
                address: signer.to_string(),
            });
        }
        if verify(&other)? {
            return Err(Mismatch::SignatureAccepted {
                address: other.to_string(),
            });
        }
        Ok(())
    }

    // ═══════════════════════════════════════════════════════════════════════════
    // RECORDS
    // ═══════════════════════════════════════════════════════════════════════════

    #[instrument(skip_all)]
    fn record_checks(&self, report: &mut ConformanceReport) -> ControlFlow<()> {
        let private_key = match PrivateKeyString::new(ACCOUNT.private_key) {
            Ok(key) => key,
            Err(e) => {
                return self.record(report, Check::RecordDecryption, Err(Mismatch::sdk("private key parsing", e)));
            }
        };

        let result = self.check_decryption(&private_key);
        self.record(report, Check::RecordDecryption, result)?;

        let result = self.check_foreign_rejection(&private_key);
        self.record(report, Check::ForeignRejection, result)?;

        let result = self.check_cross_key_rejection();
        self.record(report, Check::CrossKeyRejection, result)
    }

    fn check_decryption(&self, private_key: &PrivateKeyString) -> CheckResult {
        let ciphertext = well_formed_ciphertext("record_ciphertext", RECORD_CIPHERTEXT_STRING)?;
        let plaintext = self
            .sdk
            .decrypt_record_with_private_key(&ciphertext, private_key)
            .map_err(|e| Mismatch::sdk("record decryption", e))?;
        if plaintext != RECORD_PLAINTEXT_STRING {
            return Err(Mismatch::Plaintext {
                expected: RECORD_PLAINTEXT_STRING.to_owned(),
                actual: plaintext,
            });
        }
        Ok(())
    }

    fn check_foreign_rejection(&self, private_key: &PrivateKeyString) -> CheckResult {
        let ciphertext = well_formed_ciphertext("foreign_ciphertext", FOREIGN_CIPHERTEXT_STRING)?;
        expect_rejection(self.sdk.decrypt_record_with_private_key(&ciphertext, private_key))
    }

    fn check_cross_key_rejection(&self) -> CheckResult {
        let ciphertext = well_formed_ciphertext("record_ciphertext", RECORD_CIPHERTEXT_STRING)?;
        decode_view_key(FOREIGN_VIEW_KEY_STRING).map_err(|e| Mismatch::malformed("foreign_view_key", e))?;
        let view_key =
            ViewKeyString::new(FOREIGN_VIEW_KEY_STRING).map_err(|e| Mismatch::malformed("foreign_view_key", e))?;
        expect_rejection(self.sdk.decrypt_record(&ciphertext, &view_key))
    }

    // ═══════════════════════════════════════════════════════════════════════════
    // PROGRAM
    // ═══════════════════════════════════════════════════════════════════════════

    #[instrument(skip_all)]
    fn program_checks(&self, report: &mut ConformanceReport) -> ControlFlow<()> {
        let result = self.check_program_shape();
        self.record(report, Check::ProgramShape, result)?;

        for (case, execution) in self.config.execution_cases.iter().enumerate() {
            let result = self.check_execution(execution);
            self.record(report, Check::Execution { case }, result)?;
        }
        ControlFlow::Continue(())
    }

    fn check_program_shape(&self) -> CheckResult {
        let shape = |reason: String| Mismatch::ProgramShape { reason };

        let summary = self
            .loader
            .load(HELLO_PROGRAM)
            .map_err(|e| shape(format!("load failed: {e}")))?;

        if summary.id != HELLO_PROGRAM_ID {
            return Err(shape(format!("id is '{}', expected '{HELLO_PROGRAM_ID}'", summary.id)));
        }
        if summary.function_names() != [HELLO_PROGRAM_MAIN_FUNCTION] {
            return Err(shape(format!(
                "functions are {:?}, expected [\"{HELLO_PROGRAM_MAIN_FUNCTION}\"]",
                summary.function_names()
            )));
        }

        let expected = FunctionSignature::new(HELLO_PROGRAM_MAIN_FUNCTION, &HELLO_INPUTS, &HELLO_OUTPUTS);
        match summary.function(HELLO_PROGRAM_MAIN_FUNCTION) {
            Some(signature) if *signature == expected => Ok(()),
            Some(signature) => Err(shape(format!(
                "signature {:?} -> {:?}, expected {:?} -> {:?}",
                signature.inputs, signature.outputs, expected.inputs, expected.outputs
            ))),
            None => Err(shape(format!("function '{HELLO_PROGRAM_MAIN_FUNCTION}' missing"))),
        }
    }

    fn check_execution(&self, case: &ExecutionCase) -> CheckResult {
        let outputs = self
            .loader
            .execute(HELLO_PROGRAM, HELLO_PROGRAM_MAIN_FUNCTION, &case.inputs)
            .map_err(|e| Mismatch::sdk("program execution", e))?;
        if outputs != case.outputs {
            return Err(Mismatch::Execution {
                inputs: case.inputs.clone(),
                expected: case.outputs.clone(),
                actual: outputs,
            });
        }
        Ok(())
    }
}

/// Decodes a ciphertext fixture before it is handed to the SDK.
fn well_formed_ciphertext(fixture: &str, s: &str) -> std::result::Result<RecordCiphertextString, Mismatch> {
    decode_record_ciphertext(s).map_err(|e| Mismatch::malformed(fixture, e))?;
    RecordCiphertextString::new(s).map_err(|e| Mismatch::malformed(fixture, e))
}

/// Passes when decryption was refused or produced nothing.
///
/// Inputs are well-formed by the time this runs, so a format error from the
/// SDK is a failure.
fn expect_rejection(result: fixtures_core::error::Result<String>) -> CheckResult {
    match result {
        Ok(plaintext) if !plaintext.trim().is_empty() => Err(Mismatch::UnexpectedDecryption { plaintext }),
        Ok(_) => Ok(()),
        Err(e) if e.is_format_error() => Err(Mismatch::sdk("record parsing", e)),
        Err(e) => {
            debug!(error = %e, "Decryption rejected as expected");
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::recorded::RecordedSdk;
    use fixtures_core::data::PRIVATE_KEY_STRING;
    use fixtures_core::error::{FixtureError, Result};
    use fixtures_core::types::ProgramSummary;

    /// Loader that reports the declared shape and adds.
    struct StubLoader;

    impl ProgramLoader for StubLoader {
        fn load(&self, _source: &str) -> Result<ProgramSummary> {
            Ok(ProgramSummary {
                id: HELLO_PROGRAM_ID.into(),
                functions: vec![FunctionSignature::new(
                    HELLO_PROGRAM_MAIN_FUNCTION,
                    &HELLO_INPUTS,
                    &HELLO_OUTPUTS,
                )],
            })
        }

        fn execute(&self, _source: &str, _function: &str, inputs: &[String]) -> Result<Vec<String>> {
            let parse = |s: &String| {
                s.strip_suffix("u32")
                    .and_then(|d| d.parse::<u32>().ok())
                    .ok_or_else(|| FixtureError::InvalidLiteral(s.clone()))
            };
            let sum = parse(&inputs[0])? + parse(&inputs[1])?;
            Ok(vec![format!("{sum}u32")])
        }
    }

    #[test]
    fn test_recorded_sdk_passes() {
        let sdk = RecordedSdk::from_fixtures().with_seed(SEED, PRIVATE_KEY_STRING);
        let report = ConformanceSuite::new(&sdk, &StubLoader).run();

        assert!(report.passed(), "{:#?}", report.failures().collect::<Vec<_>>());
        assert!(!report.stopped_early);
        assert_eq!(report.outcomes[0].check, Check::SeedDeterminism);
        assert_eq!(report.outcome(&Check::SeedKey).unwrap().status, CheckStatus::Skipped("no expected seed key configured".into()));
    }

    #[test]
    fn test_check_order() {
        let sdk = RecordedSdk::from_fixtures().with_seed(SEED, PRIVATE_KEY_STRING);
        let report = ConformanceSuite::new(&sdk, &StubLoader).run();

        let checks: Vec<String> = report.outcomes.iter().map(|o| o.check.to_string()).collect();
        assert_eq!(
            checks,
            vec![
                "seed determinism",
                "seed key",
                "view key (account)",
                "address (account)",
                "view key (beacon)",
                "address (beacon)",
                "view key (funded)",
                "address (funded)",
                "signature",
                "record decryption",
                "foreign record rejection",
                "cross-key rejection",
                "program shape",
                "execution (case 0)",
            ]
        );
    }

    #[test]
    fn test_seed_key_pinning() {
        let sdk = RecordedSdk::from_fixtures().with_seed(SEED, PRIVATE_KEY_STRING);

        let config = HarnessConfig::new().expected_seed_key(PRIVATE_KEY_STRING);
        let report = ConformanceSuite::new(&sdk, &StubLoader).with_config(config).run();
        assert_eq!(report.outcome(&Check::SeedKey).unwrap().status, CheckStatus::Passed);

        let config = HarnessConfig::new().expected_seed_key(ACCOUNTS[1].private_key);
        let report = ConformanceSuite::new(&sdk, &StubLoader).with_config(config).run();
        assert!(report.outcome(&Check::SeedKey).unwrap().is_failure());
    }

    #[test]
    fn test_stop_on_first_failure() {
        // No seed recorded, so key generation fails first.
        let sdk = RecordedSdk::from_fixtures();
        let config = HarnessConfig::new().stop_on_first_failure();
        let report = ConformanceSuite::new(&sdk, &StubLoader).with_config(config).run();

        assert!(report.stopped_early);
        assert_eq!(report.outcomes.len(), 1);
        assert!(matches!(
            &report.outcomes[0].status,
            CheckStatus::Failed(Mismatch::Sdk { operation, .. }) if operation == "key generation"
        ));
    }

    #[test]
    fn test_failed_key_generation_skips_seed_key() {
        let sdk = RecordedSdk::from_fixtures();
        let report = ConformanceSuite::new(&sdk, &StubLoader).run();

        assert!(report.outcome(&Check::SeedDeterminism).unwrap().is_failure());
        assert_eq!(
            report.outcome(&Check::SeedKey).unwrap().status,
            CheckStatus::Skipped("key generation failed".into())
        );
        assert_eq!(report.outcomes[1].check, Check::SeedKey);
    }

    #[test]
    fn test_rejection_accepts_empty_plaintext() {
        assert!(expect_rejection(Ok(String::new())).is_ok());
        assert!(expect_rejection(Err(FixtureError::DecryptionFailed("no".into()))).is_ok());
        assert!(matches!(
            expect_rejection(Ok("{ owner: x }".into())),
            Err(Mismatch::UnexpectedDecryption { .. })
        ));
    }

    #[test]
    fn test_rejection_by_parse_error_fails() {
        let result = expect_rejection(Err(FixtureError::InvalidCiphertext("invalid checksum".into())));
        assert!(matches!(
            result,
            Err(Mismatch::Sdk { operation, .. }) if operation == "record parsing"
        ));
    }

    #[test]
    fn test_ciphertext_fixtures_decode_before_use() {
        assert!(well_formed_ciphertext("record_ciphertext", RECORD_CIPHERTEXT_STRING).is_ok());
        assert!(well_formed_ciphertext("foreign_ciphertext", FOREIGN_CIPHERTEXT_STRING).is_ok());

        // Last character changed, so the bech32m checksum no longer verifies.
        let corrupted = format!("{}q", &FOREIGN_CIPHERTEXT_STRING[..FOREIGN_CIPHERTEXT_STRING.len() - 1]);
        assert!(matches!(
            well_formed_ciphertext("foreign_ciphertext", &corrupted),
            Err(Mismatch::MalformedFixture { fixture, .. }) if fixture == "foreign_ciphertext"
        ));
    }
}
