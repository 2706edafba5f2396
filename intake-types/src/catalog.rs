//! Field catalog: the fixed vocabulary of keys, their display labels, and
//! their kinds.

use crate::keys;
use crate::value::{FieldValue, DATE_FORMAT};
use chrono::NaiveDate;
use std::sync::OnceLock;

pub const CITIZENSHIP_OPTIONS: &[&str] =
    &["US Citizen", "Permanent Resident", "Non-Resident Alien", "Other"];

pub const MARITAL_STATUS_OPTIONS: &[&str] =
    &["Single", "Married", "Divorced", "Widowed", "Separated"];

pub const EMPLOYMENT_STATUS_OPTIONS: &[&str] = &[
    "Employed",
    "Self-Employed",
    "Unemployed",
    "Retired",
    "Student",
    "Homemaker",
    "Disabled",
];

// The form and older drafts disagree on a few spellings; both are accepted.
pub const EDUCATION_OPTIONS: &[&str] = &[
    "High School",
    "Some College",
    "Associate Degree",
    "Bachelor's Degree",
    "Master's Degree",
    "Doctorate",
    "Doctoral Degree",
    "Professional Degree",
    "Other",
    "Prefer not to answer",
];

pub const TAX_BRACKET_OPTIONS: &[&str] =
    &["0-15%", "15%-32%", "32%+", "Not sure", "Prefer not to answer"];

pub const RISK_TOLERANCE_OPTIONS: &[&str] = &[
    "Conservative",
    "Moderate",
    "Moderately Aggressive",
    "Moderate Aggressive",
    "Aggressive",
];

pub const ACCOUNT_TYPE_OPTIONS: &[&str] =
    &["Individual", "Joint", "IRA", "Roth IRA", "401(k)", "Trust", "Other"];

pub const EXPERIENCE_LEVELS: &[&str] = &["None", "Limited", "Good", "Extensive"];

/// A labelled option whose key suffix is derived from the label.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AssetClass {
    pub label: &'static str,
    pub slug: &'static str,
}

const fn asset(label: &'static str, slug: &'static str) -> AssetClass {
    AssetClass { label, slug }
}

/// Asset classes of the optional allocation breakdown (`asset_breakdown_<slug>`).
pub const BREAKDOWN_ASSETS: &[AssetClass] = &[
    asset("Stocks", "stocks"),
    asset("Bonds", "bonds"),
    asset("Mutual Funds", "mutual_funds"),
    asset("ETFs", "etfs"),
    asset("UITs", "uits"),
    asset("Annuities (Fixed)", "annuities_fixed"),
    asset("Annuities (Variable)", "annuities_variable"),
    asset("Options", "options"),
    asset("Commodities", "commodities"),
    asset("Alternative Investments", "alternative_investments"),
    asset("Limited Partnerships", "limited_partnerships"),
    asset("Variable Contracts", "variable_contracts"),
    asset("Short-Term", "short-term"),
    asset("Other", "other"),
];

/// Asset classes with a year-started / experience-level pair.
pub const EXPERIENCE_ASSETS: &[AssetClass] = &[
    asset("Stocks", "stocks"),
    asset("Bonds", "bonds"),
    asset("Mutual Funds", "mutual_funds"),
    asset("UITs", "uits"),
    asset("Annuities (Fixed)", "annuities_fixed"),
    asset("Annuities (Variable)", "annuities_variable"),
    asset("Options", "options"),
    asset("Commodities", "commodities"),
    asset("Alternative Investments", "alternative_investments"),
    asset("Limited Partnerships", "limited_partnerships"),
    asset("Variable Contracts", "variable_contracts"),
];

/// Investment purposes (one checkbox each, `investment_purpose_<slug>`).
pub const INVESTMENT_PURPOSES: &[AssetClass] = &[
    asset("Income", "income"),
    asset("Growth and Income", "growth_and_income"),
    asset("Capital Appreciation", "capital_appreciation"),
    asset("Speculation", "speculation"),
];

/// Investment objectives ranked 1-5 (`investment_objective_<slug>`).
pub const INVESTMENT_OBJECTIVES: &[AssetClass] = &[
    asset("Trading Profits", "trading_profits"),
    asset("Speculation", "speculation"),
    asset("Capital Appreciation", "capital_appreciation"),
    asset("Income", "income"),
    asset("Preservation of Capital", "preservation_of_capital"),
];

pub fn breakdown_key(slug: &str) -> String {
    format!("asset_breakdown_{slug}")
}

pub fn experience_year_key(slug: &str) -> String {
    format!("asset_experience_{slug}_year")
}

pub fn experience_level_key(slug: &str) -> String {
    format!("asset_experience_{slug}_level")
}

pub fn purpose_key(slug: &str) -> String {
    format!("investment_purpose_{slug}")
}

pub fn objective_key(slug: &str) -> String {
    format!("investment_objective_{slug}")
}

/// How a field is entered and what shape its value takes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FieldKind {
    Text,
    Enumeration(&'static [&'static str]),
    Date,
    Integer { min: i64, max: i64 },
    Boolean,
    Phone,
    Email,
    Ssn,
    Money,
    Year,
}

impl FieldKind {
    /// Converts raw form input into the value stored in the data set.
    ///
    /// Input that does not fit the kind is kept as text so the validator can
    /// report it instead of silently dropping it.
    pub fn parse_input(&self, raw: &str) -> FieldValue {
        let trimmed = raw.trim();
        match self {
            Self::Integer { .. } => trimmed
                .parse::<i64>()
                .map(FieldValue::Integer)
                .unwrap_or_else(|_| FieldValue::Text(trimmed.to_string())),
            Self::Boolean => FieldValue::Bool(matches!(
                trimmed.to_ascii_lowercase().as_str(),
                "true" | "yes" | "1" | "on" | "checked"
            )),
            Self::Date => match NaiveDate::parse_from_str(trimmed, DATE_FORMAT) {
                Ok(date) => FieldValue::Text(date.format(DATE_FORMAT).to_string()),
                Err(_) => FieldValue::Text(trimmed.to_string()),
            },
            Self::Text
            | Self::Enumeration(_)
            | Self::Phone
            | Self::Email
            | Self::Ssn
            | Self::Money
            | Self::Year => FieldValue::Text(trimmed.to_string()),
        }
    }
}

/// A key of the form vocabulary with its display label and kind.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FieldSpec {
    pub key: &'static str,
    pub label: &'static str,
    pub kind: FieldKind,
}

const fn spec(key: &'static str, label: &'static str, kind: FieldKind) -> FieldSpec {
    FieldSpec { key, label, kind }
}

/// Fixed-name fields. Per-asset and per-objective fields are resolved by
/// [`field_spec`] from their key pattern.
pub const CATALOG: &[FieldSpec] = &[
    spec(keys::FULL_NAME, "Full Name", FieldKind::Text),
    spec(keys::DOB, "Date of Birth", FieldKind::Date),
    spec(keys::SSN, "Social Security Number", FieldKind::Ssn),
    spec(keys::CITIZENSHIP, "Citizenship", FieldKind::Enumeration(CITIZENSHIP_OPTIONS)),
    spec(keys::MARITAL_STATUS, "Marital Status", FieldKind::Enumeration(MARITAL_STATUS_OPTIONS)),
    spec(keys::RESIDENTIAL_ADDRESS, "Residential Address", FieldKind::Text),
    spec(keys::MAILING_ADDRESS_DIFFERENT, "Mailing Address Different", FieldKind::Boolean),
    spec(keys::MAILING_ADDRESS, "Mailing Address", FieldKind::Text),
    spec(keys::EMAIL, "Email Address", FieldKind::Email),
    spec(keys::HOME_PHONE, "Home Phone", FieldKind::Phone),
    spec(keys::WORK_PHONE, "Work Phone", FieldKind::Phone),
    spec(keys::MOBILE_PHONE, "Mobile Phone", FieldKind::Phone),
    spec(
        keys::EMPLOYMENT_STATUS,
        "Employment Status",
        FieldKind::Enumeration(EMPLOYMENT_STATUS_OPTIONS),
    ),
    spec(keys::EMPLOYER_NAME, "Employer Name", FieldKind::Text),
    spec(keys::OCCUPATION, "Occupation/Title", FieldKind::Text),
    spec(keys::YEARS_EMPLOYED, "Years Employed", FieldKind::Integer { min: 0, max: 70 }),
    spec(keys::ANNUAL_INCOME, "Annual Income", FieldKind::Money),
    spec(keys::EMPLOYER_ADDRESS, "Employer Address", FieldKind::Text),
    spec(keys::FORMER_EMPLOYER, "Former Employer", FieldKind::Text),
    spec(keys::INCOME_SOURCE, "Source of Income", FieldKind::Text),
    spec(keys::EDUCATION_STATUS, "Education Status", FieldKind::Enumeration(EDUCATION_OPTIONS)),
    spec(keys::TAX_BRACKET, "Estimated Tax Bracket", FieldKind::Enumeration(TAX_BRACKET_OPTIONS)),
    spec(
        keys::RISK_TOLERANCE,
        "Investment Risk Tolerance",
        FieldKind::Enumeration(RISK_TOLERANCE_OPTIONS),
    ),
    spec(keys::NET_WORTH, "Net Worth (excluding primary home)", FieldKind::Money),
    spec(keys::LIQUID_NET_WORTH, "Liquid Net Worth", FieldKind::Money),
    spec(keys::ASSETS_HELD_AWAY, "Assets Held Away", FieldKind::Money),
    spec(keys::SPOUSE_APPLICABLE, "Spouse/Partner Applicable", FieldKind::Boolean),
    spec(keys::SPOUSE_FULL_NAME, "Spouse Full Name", FieldKind::Text),
    spec(keys::SPOUSE_DOB, "Spouse Date of Birth", FieldKind::Date),
    spec(keys::SPOUSE_SSN, "Spouse SSN", FieldKind::Ssn),
    spec(
        keys::SPOUSE_EMPLOYMENT_STATUS,
        "Spouse Employment Status",
        FieldKind::Enumeration(EMPLOYMENT_STATUS_OPTIONS),
    ),
    spec(keys::SPOUSE_EMPLOYER_NAME, "Spouse Employer Name", FieldKind::Text),
    spec(keys::SPOUSE_OCCUPATION, "Spouse Occupation/Title", FieldKind::Text),
    spec(keys::INCLUDE_BREAKDOWN, "Include Asset Breakdown", FieldKind::Boolean),
    spec(keys::HAS_OUTSIDE_BROKER, "Has Outside Broker", FieldKind::Boolean),
    spec(keys::OUTSIDE_FIRM_NAME, "Broker Firm Name", FieldKind::Text),
    spec(
        keys::OUTSIDE_ACCOUNT_TYPE,
        "Account Type",
        FieldKind::Enumeration(ACCOUNT_TYPE_OPTIONS),
    ),
    spec(keys::OUTSIDE_ACCOUNT_NUMBER, "Account Number", FieldKind::Text),
    spec(keys::OUTSIDE_LIQUID_AMOUNT, "Liquid Amount", FieldKind::Money),
    spec(keys::TRUSTED_CONTACT_OPT_IN, "Trusted Contact Opt-In", FieldKind::Boolean),
    spec(keys::TRUSTED_FULL_NAME, "Trusted Contact Name", FieldKind::Text),
    spec(keys::TRUSTED_RELATIONSHIP, "Trusted Contact Relationship", FieldKind::Text),
    spec(keys::TRUSTED_PHONE, "Trusted Contact Phone", FieldKind::Phone),
    spec(keys::TRUSTED_EMAIL, "Trusted Contact Email", FieldKind::Email),
    spec(
        keys::ELECTRONIC_REGULATORY_YES,
        "Electronic Delivery Consent",
        FieldKind::Boolean,
    ),
    spec(keys::ELECTRONIC_REGULATORY_NO, "Paper Delivery", FieldKind::Boolean),
];

/// Looks up the spec for a key, including the pattern-named asset fields.
pub fn field_spec(key: &str) -> Option<FieldSpec> {
    if let Some(found) = CATALOG.iter().find(|s| s.key == key) {
        return Some(*found);
    }
    let (label, kind) = pattern_field(key)?;
    Some(spec(interned_key(key)?, label, kind))
}

fn pattern_field(key: &str) -> Option<(&'static str, FieldKind)> {
    if let Some(slug) = key.strip_prefix("asset_breakdown_") {
        return find_asset(BREAKDOWN_ASSETS, slug)
            .map(|a| (a.label, FieldKind::Integer { min: 0, max: 100 }));
    }
    if let Some(rest) = key.strip_prefix("asset_experience_") {
        if let Some(slug) = rest.strip_suffix("_year") {
            return find_asset(EXPERIENCE_ASSETS, slug).map(|a| (a.label, FieldKind::Year));
        }
        if let Some(slug) = rest.strip_suffix("_level") {
            return find_asset(EXPERIENCE_ASSETS, slug)
                .map(|a| (a.label, FieldKind::Enumeration(EXPERIENCE_LEVELS)));
        }
        return None;
    }
    if let Some(slug) = key.strip_prefix("investment_purpose_") {
        return find_asset(INVESTMENT_PURPOSES, slug).map(|a| (a.label, FieldKind::Boolean));
    }
    if let Some(slug) = key.strip_prefix("investment_objective_") {
        return find_asset(INVESTMENT_OBJECTIVES, slug)
            .map(|a| (a.label, FieldKind::Integer { min: 1, max: 5 }));
    }
    None
}

fn find_asset(list: &'static [AssetClass], slug: &str) -> Option<&'static AssetClass> {
    list.iter().find(|a| a.slug == slug)
}

static PATTERN_KEYS: OnceLock<Vec<String>> = OnceLock::new();

/// Pattern keys form a closed set; each is built once so specs can hand out
/// `'static` keys like the fixed catalog does.
fn interned_key(key: &str) -> Option<&'static str> {
    PATTERN_KEYS
        .get_or_init(build_pattern_keys)
        .iter()
        .find(|k| k.as_str() == key)
        .map(String::as_str)
}

fn build_pattern_keys() -> Vec<String> {
    let mut out: Vec<String> = BREAKDOWN_ASSETS.iter().map(|a| breakdown_key(a.slug)).collect();
    for a in EXPERIENCE_ASSETS {
        out.push(experience_year_key(a.slug));
        out.push(experience_level_key(a.slug));
    }
    out.extend(INVESTMENT_PURPOSES.iter().map(|a| purpose_key(a.slug)));
    out.extend(INVESTMENT_OBJECTIVES.iter().map(|a| objective_key(a.slug)));
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_catalog_key_is_unique() {
        for (i, a) in CATALOG.iter().enumerate() {
            assert!(
                CATALOG[i + 1..].iter().all(|b| b.key != a.key),
                "duplicate key {}",
                a.key
            );
        }
    }

    #[test]
    fn pattern_keys_resolve() {
        let spec = field_spec("asset_breakdown_short-term").unwrap();
        assert_eq!(spec.label, "Short-Term");
        assert_eq!(spec.kind, FieldKind::Integer { min: 0, max: 100 });

        let spec = field_spec("asset_experience_annuities_fixed_level").unwrap();
        assert_eq!(spec.kind, FieldKind::Enumeration(EXPERIENCE_LEVELS));
        assert_eq!(spec.key, "asset_experience_annuities_fixed_level");

        assert!(field_spec("asset_experience_etfs_year").is_none());
        assert!(field_spec("asset_breakdown_gold").is_none());
    }
}
