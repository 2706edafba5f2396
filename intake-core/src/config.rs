//! Deployment configuration.

use crate::error::{IntakeError, IntakeResult};
use intake_crypto::{KdfParams, DEFAULT_ITERATIONS, DEFAULT_SALT, MIN_ITERATIONS};
use intake_render::{ReportFont, RenderOptions, DEFAULT_PLACEHOLDER, DEFAULT_TITLE};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

const DRAFT_FILE_NAME: &str = "intake_form_autosave.json";

/// Configuration for an intake session. Keys missing from a TOML file take
/// their default values.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IntakeConfig {
    /// Where the encrypted draft is auto-saved.
    pub draft_path: PathBuf,

    /// PBKDF2 iteration count. Values below 100,000 are rejected.
    pub kdf_iterations: u32,

    /// PBKDF2 salt. Changing it makes existing drafts unreadable.
    pub kdf_salt: String,

    pub document_title: String,

    /// Text shown for absent values in generated documents.
    pub placeholder: String,

    /// Fallback tracing filter when `RUST_LOG` is unset.
    pub log_filter: String,

    /// Environment variable holding the passphrase.
    pub passphrase_env: String,

    /// TrueType font embedded in the report for non-Latin text. When unset
    /// a system font is looked up.
    pub report_font: Option<PathBuf>,
}

impl Default for IntakeConfig {
    fn default() -> Self {
        Self {
            draft_path: Self::default_draft_path(),
            kdf_iterations: DEFAULT_ITERATIONS,
            kdf_salt: DEFAULT_SALT.to_string(),
            document_title: DEFAULT_TITLE.to_string(),
            placeholder: DEFAULT_PLACEHOLDER.to_string(),
            log_filter: "info".to_string(),
            passphrase_env: "INTAKE_PASSPHRASE".to_string(),
            report_font: None,
        }
    }
}

impl IntakeConfig {
    /// Platform data directory, or the temp dir when there is none.
    #[must_use]
    pub fn default_draft_path() -> PathBuf {
        dirs::data_local_dir()
            .unwrap_or_else(std::env::temp_dir)
            .join("intake")
            .join(DRAFT_FILE_NAME)
    }

    pub fn from_toml_str(text: &str) -> IntakeResult<Self> {
        let config: Self = toml::from_str(text).map_err(|e| IntakeError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: impl AsRef<Path>) -> IntakeResult<Self> {
        let text = std::fs::read_to_string(path.as_ref())?;
        Self::from_toml_str(&text)
    }

    pub fn validate(&self) -> IntakeResult<()> {
        if self.kdf_iterations < MIN_ITERATIONS {
            return Err(IntakeError::Config(format!(
                "kdf_iterations must be at least {MIN_ITERATIONS}, got {}",
                self.kdf_iterations
            )));
        }
        if self.kdf_salt.is_empty() {
            return Err(IntakeError::Config("kdf_salt must not be empty".to_string()));
        }
        if let Some(font) = &self.report_font {
            if !font.is_file() {
                return Err(IntakeError::Config(format!(
                    "report_font `{}` is not a file",
                    font.display()
                )));
            }
        }
        Ok(())
    }

    pub fn kdf_params(&self) -> KdfParams {
        KdfParams::new(self.kdf_iterations, self.kdf_salt.as_bytes())
    }

    /// Rendering options without a timestamp. Loads the configured font,
    /// or the first system font found when none is configured.
    pub fn render_options(&self) -> IntakeResult<RenderOptions> {
        let font = match &self.report_font {
            Some(path) => Some(ReportFont::load(path)?),
            None => ReportFont::discover(),
        };
        Ok(RenderOptions {
            title: self.document_title.clone(),
            placeholder: self.placeholder.clone(),
            generated_at: None,
            font,
        })
    }

    /// Reads the passphrase from the configured environment variable.
    pub fn passphrase_from_env(&self) -> IntakeResult<String> {
        match std::env::var(&self.passphrase_env) {
            Ok(value) if !value.is_empty() => Ok(value),
            _ => Err(IntakeError::Config(format!(
                "passphrase variable `{}` is not set",
                self.passphrase_env
            ))),
        }
    }
}
