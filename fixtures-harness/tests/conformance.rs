//! Runs the suite against deliberately wrong SDKs and checks each fault is caught.

use std::sync::atomic::{AtomicUsize, Ordering};

use fixtures_core::constants::SEED_SIZE;
use fixtures_core::data::{
    ADDRESS_STRING, BEACON_ADDRESS_STRING, BEACON_PRIVATE_KEY_STRING, BEACON_VIEW_KEY_STRING,
    FOREIGN_CIPHERTEXT_STRING, PRIVATE_KEY_STRING, RECORD_PLAINTEXT_STRING, SEED, VIEW_KEY_STRING,
};
use fixtures_core::error::{FixtureError, Result};
use fixtures_core::traits::{AccountSdk, ProgramLoader};
use fixtures_core::types::{
    AddressString, PrivateKeyString, ProgramSummary, RecordCiphertextString, ViewKeyString,
};
use fixtures_encoding::decode_record_ciphertext;
use fixtures_harness::{Check, CheckStatus, ConformanceSuite, ExecutionCase, HarnessConfig, Mismatch, RecordedSdk};
use fixtures_program::Interpreter;
use test_case::test_case;

#[derive(Clone, Copy, Debug)]
enum Fault {
    NondeterministicSeed,
    WrongViewKey,
    WrongAddress,
    WrongPlaintext,
    DecryptsForeignRecord,
    DecryptsWithAnyKey,
    IgnoresOwnership,
    ForeignUnparseable,
    ViewKeyUnavailable,
    SignsWithWrongKey,
    VerifiesAnySigner,
}

/// A recorded SDK with one injected fault.
struct FaultySdk {
    inner: RecordedSdk,
    fault: Fault,
    seed_calls: AtomicUsize,
}

impl FaultySdk {
    fn new(fault: Fault) -> Self {
        Self {
            inner: RecordedSdk::from_fixtures().with_seed(SEED, PRIVATE_KEY_STRING),
            fault,
            seed_calls: AtomicUsize::new(0),
        }
    }
}

impl AccountSdk for FaultySdk {
    fn private_key_from_seed(&self, seed: &[u8; SEED_SIZE]) -> Result<PrivateKeyString> {
        let call = self.seed_calls.fetch_add(1, Ordering::SeqCst);
        match self.fault {
            Fault::NondeterministicSeed if call > 0 => PrivateKeyString::new(BEACON_PRIVATE_KEY_STRING),
            _ => self.inner.private_key_from_seed(seed),
        }
    }

    fn view_key_from_private_key(&self, private_key: &PrivateKeyString) -> Result<ViewKeyString> {
        match self.fault {
            Fault::WrongViewKey if private_key.as_str() == BEACON_PRIVATE_KEY_STRING => {
                ViewKeyString::new(VIEW_KEY_STRING)
            }
            Fault::ViewKeyUnavailable => Err(FixtureError::SdkError("view keys disabled".into())),
            _ => self.inner.view_key_from_private_key(private_key),
        }
    }

    fn address_from_view_key(&self, view_key: &ViewKeyString) -> Result<AddressString> {
        match self.fault {
            Fault::WrongAddress => AddressString::new(BEACON_ADDRESS_STRING),
            _ => self.inner.address_from_view_key(view_key),
        }
    }

    fn address_from_private_key(&self, private_key: &PrivateKeyString) -> Result<AddressString> {
        match self.fault {
            Fault::WrongAddress => AddressString::new(BEACON_ADDRESS_STRING),
            _ => self.inner.address_from_private_key(private_key),
        }
    }

    fn sign(&self, private_key: &PrivateKeyString, message: &[u8]) -> Result<String> {
        match self.fault {
            Fault::SignsWithWrongKey => {
                let beacon = PrivateKeyString::new(BEACON_PRIVATE_KEY_STRING)?;
                self.inner.sign(&beacon, message)
            }
            _ => self.inner.sign(private_key, message),
        }
    }

    fn verify(&self, address: &AddressString, message: &[u8], signature: &str) -> Result<bool> {
        match self.fault {
            Fault::VerifiesAnySigner => Ok(true),
            _ => self.inner.verify(address, message, signature),
        }
    }

    fn decrypt_record(&self, ciphertext: &RecordCiphertextString, view_key: &ViewKeyString) -> Result<String> {
        match self.fault {
            Fault::WrongPlaintext => Ok("{\n  owner: nobody\n}".into()),
            Fault::DecryptsForeignRecord if ciphertext.as_str() == FOREIGN_CIPHERTEXT_STRING => {
                Ok("{\n  microcredits: 1u64.private\n}".into())
            }
            Fault::IgnoresOwnership => {
                decode_record_ciphertext(ciphertext.as_str())?;
                Ok(RECORD_PLAINTEXT_STRING.into())
            }
            Fault::ForeignUnparseable if ciphertext.as_str() == FOREIGN_CIPHERTEXT_STRING => {
                Err(FixtureError::InvalidCiphertext("invalid checksum".into()))
            }
            Fault::DecryptsWithAnyKey => {
                let owner = ViewKeyString::new(VIEW_KEY_STRING)?;
                self.inner.decrypt_record(ciphertext, &owner)
            }
            _ => self.inner.decrypt_record(ciphertext, view_key),
        }
    }
}

/// Loader whose arithmetic is off by one.
struct OffByOne;

impl ProgramLoader for OffByOne {
    fn load(&self, source: &str) -> Result<ProgramSummary> {
        Interpreter.load(source)
    }

    fn execute(&self, source: &str, function: &str, inputs: &[String]) -> Result<Vec<String>> {
        let bumped: Vec<String> = inputs
            .iter()
            .enumerate()
            .map(|(i, s)| if i == 0 { s.replace("3u32", "4u32") } else { s.clone() })
            .collect();
        Interpreter.execute(source, function, &bumped)
    }
}

/// Loader that reports a different program id.
struct Renamed;

impl ProgramLoader for Renamed {
    fn load(&self, source: &str) -> Result<ProgramSummary> {
        let mut summary = Interpreter.load(source)?;
        summary.id = "goodbye.aleo".into();
        Ok(summary)
    }

    fn execute(&self, source: &str, function: &str, inputs: &[String]) -> Result<Vec<String>> {
        Interpreter.execute(source, function, inputs)
    }
}

fn failed(status: &CheckStatus) -> Option<&Mismatch> {
    match status {
        CheckStatus::Failed(mismatch) => Some(mismatch),
        _ => None,
    }
}

#[test]
fn single_repetition_run_passes() {
    let sdk = FaultySdk::new(Fault::NondeterministicSeed);
    // With a single repetition there is nothing to compare, so the fault is invisible.
    let config = HarnessConfig::new().seed_repetitions(1);
    let report = ConformanceSuite::new(&sdk, &Interpreter).with_config(config).run();

    assert!(report.passed(), "{}", report.to_json().unwrap());
    assert_eq!(report.outcome(&Check::Execution { case: 0 }).unwrap().status, CheckStatus::Passed);
}

#[test_case(Fault::NondeterministicSeed, Check::SeedDeterminism ; "nondeterministic seed")]
#[test_case(Fault::WrongViewKey, Check::ViewKey { account: "beacon" } ; "wrong view key")]
#[test_case(Fault::WrongAddress, Check::Address { account: "account" } ; "wrong address")]
#[test_case(Fault::WrongAddress, Check::Address { account: "funded" } ; "wrong funded address")]
#[test_case(Fault::WrongPlaintext, Check::RecordDecryption ; "wrong plaintext")]
#[test_case(Fault::DecryptsForeignRecord, Check::ForeignRejection ; "decrypts foreign record")]
#[test_case(Fault::DecryptsWithAnyKey, Check::CrossKeyRejection ; "decrypts with any key")]
#[test_case(Fault::IgnoresOwnership, Check::ForeignRejection ; "ignores ownership of foreign record")]
#[test_case(Fault::IgnoresOwnership, Check::CrossKeyRejection ; "ignores ownership under foreign key")]
#[test_case(Fault::ForeignUnparseable, Check::ForeignRejection ; "rejects foreign record as malformed")]
#[test_case(Fault::ViewKeyUnavailable, Check::RecordDecryption ; "view key unavailable")]
#[test_case(Fault::SignsWithWrongKey, Check::Signature ; "signs with wrong key")]
#[test_case(Fault::VerifiesAnySigner, Check::Signature ; "verifies any signer")]
fn fault_is_detected(fault: Fault, check: Check) {
    let sdk = FaultySdk::new(fault);
    let report = ConformanceSuite::new(&sdk, &Interpreter).run();

    assert!(!report.passed());
    let outcome = report.outcome(&check).expect("check ran");
    assert!(outcome.is_failure(), "{check} should fail under {fault:?}: {outcome}");
}

#[test]
fn mismatch_kinds_name_the_divergence() {
    let report = ConformanceSuite::new(&FaultySdk::new(Fault::WrongViewKey), &Interpreter).run();
    let mismatch = failed(&report.outcome(&Check::ViewKey { account: "beacon" }).unwrap().status).unwrap();
    assert_eq!(
        mismatch,
        &Mismatch::ViewKey {
            expected: BEACON_VIEW_KEY_STRING.into(),
            actual: VIEW_KEY_STRING.into(),
        }
    );

    let report = ConformanceSuite::new(&FaultySdk::new(Fault::WrongPlaintext), &Interpreter).run();
    assert!(matches!(
        failed(&report.outcome(&Check::RecordDecryption).unwrap().status),
        Some(Mismatch::Plaintext { .. })
    ));

    let report = ConformanceSuite::new(&FaultySdk::new(Fault::DecryptsForeignRecord), &Interpreter).run();
    assert!(matches!(
        failed(&report.outcome(&Check::ForeignRejection).unwrap().status),
        Some(Mismatch::UnexpectedDecryption { .. })
    ));

    let report = ConformanceSuite::new(&FaultySdk::new(Fault::IgnoresOwnership), &Interpreter).run();
    assert!(matches!(
        failed(&report.outcome(&Check::ForeignRejection).unwrap().status),
        Some(Mismatch::UnexpectedDecryption { plaintext }) if plaintext == RECORD_PLAINTEXT_STRING
    ));

    let report = ConformanceSuite::new(&FaultySdk::new(Fault::ForeignUnparseable), &Interpreter).run();
    assert!(matches!(
        failed(&report.outcome(&Check::ForeignRejection).unwrap().status),
        Some(Mismatch::Sdk { operation, .. }) if operation == "record parsing"
    ));

    let report = ConformanceSuite::new(&FaultySdk::new(Fault::SignsWithWrongKey), &Interpreter).run();
    assert_eq!(
        failed(&report.outcome(&Check::Signature).unwrap().status),
        Some(&Mismatch::SignatureRejected {
            address: ADDRESS_STRING.into()
        })
    );

    let report = ConformanceSuite::new(&FaultySdk::new(Fault::VerifiesAnySigner), &Interpreter).run();
    assert_eq!(
        failed(&report.outcome(&Check::Signature).unwrap().status),
        Some(&Mismatch::SignatureAccepted {
            address: BEACON_ADDRESS_STRING.into()
        })
    );

    let report = ConformanceSuite::new(&FaultySdk::new(Fault::ViewKeyUnavailable), &Interpreter).run();
    assert!(matches!(
        failed(&report.outcome(&Check::ViewKey { account: "account" }).unwrap().status),
        Some(Mismatch::Sdk { .. })
    ));
}

#[test]
fn wrong_program_behaviour_is_detected() {
    let sdk = RecordedSdk::from_fixtures().with_seed(SEED, PRIVATE_KEY_STRING);

    let report = ConformanceSuite::new(&sdk, &OffByOne).run();
    assert!(matches!(
        failed(&report.outcome(&Check::Execution { case: 0 }).unwrap().status),
        Some(Mismatch::Execution { actual, .. }) if actual == &vec!["8u32".to_string()]
    ));
    assert_eq!(report.outcome(&Check::ProgramShape).unwrap().status, CheckStatus::Passed);

    let report = ConformanceSuite::new(&sdk, &Renamed).run();
    assert!(matches!(
        failed(&report.outcome(&Check::ProgramShape).unwrap().status),
        Some(Mismatch::ProgramShape { reason }) if reason.contains("goodbye.aleo")
    ));
}

#[test]
fn extra_execution_cases_run_in_order() {
    let sdk = RecordedSdk::from_fixtures().with_seed(SEED, PRIVATE_KEY_STRING);
    let config = HarnessConfig::new()
        .execution_case(ExecutionCase::new(&["4294967295u32", "0u32"], &["4294967295u32"]))
        .execution_case(ExecutionCase::new(&["4294967295u32", "1u32"], &["0u32"]));
    let report = ConformanceSuite::new(&sdk, &Interpreter).with_config(config).run();

    assert_eq!(report.outcome(&Check::Execution { case: 1 }).unwrap().status, CheckStatus::Passed);
    // Checked addition halts instead of wrapping.
    assert!(matches!(
        failed(&report.outcome(&Check::Execution { case: 2 }).unwrap().status),
        Some(Mismatch::Sdk { .. })
    ));
}
