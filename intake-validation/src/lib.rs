//! Validation for the client intake core.
//!
//! Two layers:
//!
//! - [`rules`]: pure per-value checks. Every rule treats an empty value as
//!   valid; whether a field is mandatory is decided by pairing it with
//!   [`Rule::Required`] at the section level.
//! - [`sections`]: per-page policies, including cross-field and conditional
//!   constraints, producing a [`ValidationResult`].
//!
//! Results are returned values. Nothing is accumulated between calls.

mod field;
mod result;
pub mod rules;
pub mod sections;

pub use field::validate_field;
pub use result::ValidationResult;
pub use rules::{check, percentage_total, Rule, ValidationContext};
pub use sections::{validate_all, validate_section, Section};
