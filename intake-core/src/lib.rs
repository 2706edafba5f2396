//! Session facade for the client intake core.
//!
//! Ties the workspace crates together behind [`IntakeSession`]: load an
//! [`IntakeConfig`], open a session with the advisor's passphrase, auto-save
//! encrypted drafts while the form is filled in, validate, and finally
//! render and write the submission documents.
//!
//! ```no_run
//! use intake_core::{init_tracing, IntakeConfig, IntakeSession};
//!
//! let config = IntakeConfig::default();
//! init_tracing(&config.log_filter);
//! let passphrase = config.passphrase_from_env()?;
//! let session = IntakeSession::open(config, &passphrase)?;
//! let draft = session.load_draft();
//! session.persist_now(&draft)?;
//! # Ok::<(), intake_core::IntakeError>(())
//! ```

mod config;
mod error;
mod logging;
mod session;

pub use config::IntakeConfig;
pub use error::{IntakeError, IntakeResult};
pub use logging::init_tracing;
pub use session::IntakeSession;

pub use intake_render::RenderOptions;
pub use intake_types::{FieldValue, FormDataSet, NestedRecord};
pub use intake_validation::{Section, ValidationResult};
