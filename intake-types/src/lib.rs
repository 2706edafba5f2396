//! Core types for the client intake core.
//!
//! The external form produces a flat key-value data set. This crate defines
//! that data set ([`FormDataSet`]), the values it may hold ([`FieldValue`],
//! [`NestedRecord`]), and the fixed field vocabulary the rest of the
//! workspace agrees on ([`keys`], [`FieldSpec`], [`FieldKind`]).
//!
//! # Field kinds
//!
//! Every known key maps to exactly one [`FieldKind`]. A kind owns the rule
//! for turning raw form input into a [`FieldValue`]; the validator owns the
//! matching format check. Nothing here depends on a particular UI control.

mod catalog;
mod value;

pub mod keys;

pub use catalog::{
    breakdown_key, experience_level_key, experience_year_key, field_spec, objective_key,
    purpose_key, AssetClass, FieldKind, FieldSpec, ACCOUNT_TYPE_OPTIONS, BREAKDOWN_ASSETS,
    CATALOG, CITIZENSHIP_OPTIONS, EDUCATION_OPTIONS, EMPLOYMENT_STATUS_OPTIONS,
    EXPERIENCE_ASSETS, EXPERIENCE_LEVELS, INVESTMENT_OBJECTIVES, INVESTMENT_PURPOSES,
    MARITAL_STATUS_OPTIONS, RISK_TOLERANCE_OPTIONS, TAX_BRACKET_OPTIONS,
};
pub use value::{FieldValue, FormDataSet, NestedRecord, DATE_FORMAT};
