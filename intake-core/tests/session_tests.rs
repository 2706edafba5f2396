use intake_core::{FormDataSet, IntakeConfig, IntakeError, IntakeSession, NestedRecord, Section};
use intake_crypto::{verify_content_hash, KdfParams};
use intake_storage::SecureStore;
use intake_types::keys;
use pretty_assertions::assert_eq;
use std::path::Path;

fn session_in(dir: &Path) -> IntakeSession {
    let config = IntakeConfig {
        draft_path: dir.join("draft.json"),
        ..IntakeConfig::default()
    };
    let store = SecureStore::with_params("advisor passphrase", &KdfParams::new(1_000, "test-salt"))
        .unwrap();
    IntakeSession::with_store(config, store)
}

fn complete_client() -> FormDataSet {
    FormDataSet::new()
        .with(keys::FULL_NAME, "Ada Lovelace")
        .with(keys::DOB, "12/10/1985")
        .with(keys::CITIZENSHIP, "US Citizen")
        .with(keys::SSN, "123-45-6780")
        .with(keys::RESIDENTIAL_ADDRESS, "12 St James's Square, London")
        .with(keys::MOBILE_PHONE, "(555) 123-4567")
        .with(keys::EMPLOYMENT_STATUS, "Employed")
        .with(keys::EMPLOYER_NAME, "Analytical Engines Ltd")
        .with(keys::OCCUPATION, "Mathematician")
        .with(keys::ANNUAL_INCOME, 150_000)
        .with(
            keys::BENEFICIARIES,
            vec![NestedRecord::new()
                .with(keys::RECORD_NAME, "Byron")
                .with(keys::RECORD_RELATIONSHIP, "Child")
                .with(keys::RECORD_PERCENTAGE, 100)],
        )
}

// ── Open ─────────────────────────────────────────────────────────

#[test]
fn open_rejects_weak_config() {
    let config = IntakeConfig {
        kdf_iterations: 1,
        ..IntakeConfig::default()
    };
    assert!(matches!(
        IntakeSession::open(config, "pass"),
        Err(IntakeError::Config(_))
    ));
}

// ── Drafts ───────────────────────────────────────────────────────

#[test]
fn draft_round_trip_encrypts_ssn() {
    let dir = tempfile::tempdir().unwrap();
    let session = session_in(dir.path());
    let data = complete_client();

    session.persist_now(&data).unwrap();
    let raw = std::fs::read_to_string(&session.config().draft_path).unwrap();
    assert!(!raw.contains("123-45-6780"));
    assert!(raw.contains("ssn_encrypted"));

    assert_eq!(session.load_draft(), data);
}

#[test]
fn missing_draft_loads_empty() {
    let dir = tempfile::tempdir().unwrap();
    assert!(session_in(dir.path()).load_draft().is_empty());
}

#[test]
fn discard_removes_the_draft() {
    let dir = tempfile::tempdir().unwrap();
    let session = session_in(dir.path());
    session.persist_now(&complete_client()).unwrap();

    session.discard_draft().unwrap();
    assert!(!session.config().draft_path.exists());
    assert!(session.load_draft().is_empty());
    // A second discard has nothing to do.
    session.discard_draft().unwrap();
}

// ── Validation ───────────────────────────────────────────────────

#[test]
fn validate_uses_every_section() {
    let dir = tempfile::tempdir().unwrap();
    let session = session_in(dir.path());
    assert!(session.validate(&complete_client()).is_valid());

    let result = session.validate(&FormDataSet::new());
    assert!(!result.is_label_valid("Full Name"));
    assert!(!result.is_label_valid("Phone Numbers"));

    let contact = session.validate_section(Section::Contact, &FormDataSet::new());
    assert!(contact.is_label_valid("Full Name"));
    assert!(!contact.is_label_valid("Phone Numbers"));
}

#[test]
fn review_lists_the_client() {
    let dir = tempfile::tempdir().unwrap();
    let text = session_in(dir.path()).review(&complete_client()).unwrap();
    assert!(text.contains("  Full Name: Ada Lovelace\n"));
}

// ── Submission ───────────────────────────────────────────────────

#[test]
fn incomplete_form_is_not_submitted() {
    let dir = tempfile::tempdir().unwrap();
    let session = session_in(dir.path());
    let docx = dir.path().join("out.docx");
    let pdf = dir.path().join("out.pdf");

    let data = complete_client().with(keys::FULL_NAME, "");
    let err = session.submit(&data, &docx, &pdf).unwrap_err();
    match err {
        IntakeError::NotSubmittable(summary) => assert!(summary.contains("Full Name")),
        other => panic!("unexpected error: {other}"),
    }
    assert!(!docx.exists());
    assert!(!pdf.exists());
}

#[test]
fn submission_writes_both_documents() {
    let dir = tempfile::tempdir().unwrap();
    let session = session_in(dir.path());
    let docx = dir.path().join("out/client.docx");
    let pdf = dir.path().join("out/client.pdf");

    let digest = session.submit(&complete_client(), &docx, &pdf).unwrap();

    let docx_bytes = std::fs::read(&docx).unwrap();
    assert!(docx_bytes.starts_with(b"PK"));
    let pdf_bytes = std::fs::read(&pdf).unwrap();
    assert!(pdf_bytes.starts_with(b"%PDF-1.4"));
    assert!(verify_content_hash(&pdf_bytes, &digest));
    assert!(String::from_utf8_lossy(&pdf_bytes).contains("/CreationDate"));
}
