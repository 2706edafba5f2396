//! One client's intake: draft persistence, validation and submission.

use crate::config::IntakeConfig;
use crate::error::{IntakeError, IntakeResult};
use chrono::Utc;
use intake_crypto::content_hash;
use intake_render::{render_editable, render_report, render_review, RenderOptions};
use intake_storage::{secure_delete, write_atomic, SecureStore};
use intake_types::FormDataSet;
use intake_validation::{
    validate_all, validate_section, Section, ValidationContext, ValidationResult,
};
use std::path::Path;
use tracing::{info, warn};

/// Holds the derived key and configuration for the lifetime of an intake.
pub struct IntakeSession {
    config: IntakeConfig,
    store: SecureStore,
}

impl IntakeSession {
    /// Validates `config` and derives the draft key from `passphrase`.
    pub fn open(config: IntakeConfig, passphrase: &str) -> IntakeResult<Self> {
        config.validate()?;
        let store = SecureStore::with_params(passphrase, &config.kdf_params())?;
        info!(draft = %config.draft_path.display(), "intake session opened");
        Ok(Self { config, store })
    }

    /// Uses an already-built store. Skips config validation.
    pub fn with_store(config: IntakeConfig, store: SecureStore) -> Self {
        Self { config, store }
    }

    pub fn config(&self) -> &IntakeConfig {
        &self.config
    }

    /// Encrypts and writes the draft. Called on every auto-save tick.
    pub fn persist_now(&self, data: &FormDataSet) -> IntakeResult<()> {
        self.store.secure_save(data, &self.config.draft_path)?;
        Ok(())
    }

    /// Loads the draft, or an empty data set when none is readable.
    pub fn load_draft(&self) -> FormDataSet {
        self.store.secure_load(&self.config.draft_path)
    }

    /// Overwrites and removes the draft file.
    pub fn discard_draft(&self) -> IntakeResult<()> {
        secure_delete(&self.config.draft_path)?;
        info!("draft discarded");
        Ok(())
    }

    pub fn validate(&self, data: &FormDataSet) -> ValidationResult {
        validate_all(data, &ValidationContext::now())
    }

    pub fn validate_section(&self, section: Section, data: &FormDataSet) -> ValidationResult {
        validate_section(section, data, &ValidationContext::now())
    }

    /// Plain-text listing for the confirmation step.
    pub fn review(&self, data: &FormDataSet) -> IntakeResult<String> {
        Ok(render_review(data, &self.config.render_options()?)?)
    }

    /// Renders both documents and writes them atomically.
    ///
    /// Refuses with [`IntakeError::NotSubmittable`] while any validation
    /// error remains. Returns the SHA-256 hex digest of the written report.
    pub fn submit(
        &self,
        data: &FormDataSet,
        docx_path: &Path,
        pdf_path: &Path,
    ) -> IntakeResult<String> {
        let result = self.validate(data);
        if !result.is_valid() {
            warn!(errors = result.error_count(), "submission refused");
            return Err(IntakeError::NotSubmittable(result.error_summary()));
        }

        let opts = RenderOptions {
            generated_at: Some(Utc::now()),
            ..self.config.render_options()?
        };
        let docx = render_editable(data, &opts)?;
        let pdf = render_report(data, &opts)?;

        write_atomic(docx_path, &docx)?;
        write_atomic(pdf_path, &pdf)?;

        let digest = content_hash(&pdf);
        info!(
            docx = %docx_path.display(),
            pdf = %pdf_path.display(),
            sha256 = %digest,
            "intake submitted"
        );
        Ok(digest)
    }
}
