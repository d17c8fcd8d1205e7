//! # Aleo Fixtures Harness
//!
//! Runs the pinned fixtures against an SDK implementation and reports every
//! mismatch instead of stopping at the first assertion.
//!
//! - **Config**: which checks run and with which program cases
//! - **Suite**: the ordered checks over an [`AccountSdk`] and a [`ProgramLoader`]
//! - **Report**: serializable per-check outcomes
//! - **Recorded SDK**: an [`AccountSdk`] that replays the fixture relations
//!
//! ## Example
//!
//! ```rust,ignore
//! use fixtures_harness::{ConformanceSuite, HarnessConfig};
//!
//! let report = ConformanceSuite::new(&my_sdk, &my_loader)
//!     .with_config(HarnessConfig::new().stop_on_first_failure())
//!     .run();
//!
//! for failure in report.failures() {
//!     eprintln!("{failure}");
//! }
//! assert!(report.passed());
//! ```
//!
//! [`AccountSdk`]: fixtures_core::traits::AccountSdk
//! [`ProgramLoader`]: fixtures_core::traits::ProgramLoader

#![forbid(unsafe_code)]
#![warn(missing_docs, rust_2018_idioms)]

pub mod config;
pub mod recorded;
pub mod report;
pub mod suite;

pub use config::{ExecutionCase, HarnessConfig};
pub use recorded::RecordedSdk;
pub use report::{Check, CheckOutcome, CheckStatus, ConformanceReport, Mismatch};
pub use suite::ConformanceSuite;
