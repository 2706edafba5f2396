//! Per-page validation policies.

use crate::result::ValidationResult;
use crate::rules::{check, parse_amount, percentage_total, Rule, ValidationContext};
use intake_types::{
    breakdown_key, experience_level_key, experience_year_key, keys, objective_key, FieldValue,
    FormDataSet, BREAKDOWN_ASSETS, CITIZENSHIP_OPTIONS, EDUCATION_OPTIONS,
    EMPLOYMENT_STATUS_OPTIONS, EXPERIENCE_ASSETS, EXPERIENCE_LEVELS, INVESTMENT_OBJECTIVES,
    MARITAL_STATUS_OPTIONS, RISK_TOLERANCE_OPTIONS, TAX_BRACKET_OPTIONS,
};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// One page of the intake form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Section {
    Personal,
    Contact,
    Employment,
    Retirement,
    Assets,
    Beneficiaries,
    TrustedContact,
    Financial,
    InvestmentExperience,
}

impl Section {
    /// Every section, in form order.
    pub const ALL: [Section; 9] = [
        Section::Personal,
        Section::Contact,
        Section::Employment,
        Section::Retirement,
        Section::Financial,
        Section::Assets,
        Section::Beneficiaries,
        Section::InvestmentExperience,
        Section::TrustedContact,
    ];
}

const EMPLOYED_STATUSES: [&str; 2] = ["Employed", "Self-Employed"];
const RETIRED: &str = "Retired";
const NUMERIC_MESSAGE: &str = "Please enter a valid numeric value";

/// Runs one section's policy against `data`.
pub fn validate_section(
    section: Section,
    data: &FormDataSet,
    ctx: &ValidationContext,
) -> ValidationResult {
    let mut out = Checker::new(data, ctx);
    match section {
        Section::Personal => personal(&mut out),
        Section::Contact => contact(&mut out),
        Section::Employment => employment(&mut out),
        Section::Retirement => retirement(&mut out),
        Section::Assets => assets(&mut out),
        Section::Beneficiaries => beneficiaries(&mut out),
        Section::TrustedContact => trusted_contact(&mut out),
        Section::Financial => financial(&mut out),
        Section::InvestmentExperience => investment_experience(&mut out),
    }
    debug!(
        ?section,
        errors = out.result.error_count(),
        "section validated"
    );
    out.result
}

/// Runs every section and merges the results.
pub fn validate_all(data: &FormDataSet, ctx: &ValidationContext) -> ValidationResult {
    let mut result = ValidationResult::new();
    for section in Section::ALL {
        result.merge(validate_section(section, data, ctx));
    }
    result
}

/// Accumulates messages for one section pass.
struct Checker<'a> {
    data: &'a FormDataSet,
    ctx: &'a ValidationContext,
    result: ValidationResult,
}

impl<'a> Checker<'a> {
    fn new(data: &'a FormDataSet, ctx: &'a ValidationContext) -> Self {
        Self {
            data,
            ctx,
            result: ValidationResult::new(),
        }
    }

    /// Applies `rule` to an arbitrary value; returns whether it passed.
    fn value(&mut self, label: &str, value: &FieldValue, rule: Rule<'_>) -> bool {
        match check(rule, value, self.ctx) {
            Ok(()) => true,
            Err(message) => {
                self.result.add_error(label, message);
                false
            }
        }
    }

    fn field(&mut self, label: &str, key: &str, rule: Rule<'_>) -> bool {
        let blank = FieldValue::Text(String::new());
        let value = self.data.get(key).unwrap_or(&blank);
        self.value(label, value, rule)
    }

    fn required(&mut self, label: &str, key: &str) -> bool {
        self.field(label, key, Rule::Required)
    }
}

fn personal(c: &mut Checker<'_>) {
    c.required("Full Name", keys::FULL_NAME);
    if c.required("Date of Birth", keys::DOB) {
        c.field(
            "Date of Birth",
            keys::DOB,
            Rule::Date {
                min_age: Some(18),
                max_age: Some(120),
            },
        );
    }
    c.required("Citizenship", keys::CITIZENSHIP);
    c.field("Social Security Number", keys::SSN, Rule::Ssn);
}

fn contact(c: &mut Checker<'_>) {
    c.required("Residential Address", keys::RESIDENTIAL_ADDRESS);
    c.field("Email Address", keys::EMAIL, Rule::Email);

    let phones = [
        ("Home Phone", keys::HOME_PHONE),
        ("Work Phone", keys::WORK_PHONE),
        ("Mobile Phone", keys::MOBILE_PHONE),
    ];
    if phones.iter().all(|(_, key)| c.data.is_blank(key)) {
        c.result
            .add_error("Phone Numbers", "At least one phone number is required");
        return;
    }
    for (label, key) in phones {
        c.field(label, key, Rule::Phone);
    }
}

fn employment(c: &mut Checker<'_>) {
    let status = c.data.text(keys::EMPLOYMENT_STATUS);
    if EMPLOYED_STATUSES.contains(&status.trim()) {
        c.required("Employer Name", keys::EMPLOYER_NAME);
        c.required("Occupation/Title", keys::OCCUPATION);
    }
    c.field(
        "Years Employed",
        keys::YEARS_EMPLOYED,
        Rule::NumericRange {
            min: Some(0.0),
            max: Some(70.0),
        },
    );
}

fn retirement(c: &mut Checker<'_>) {
    if c.data.text(keys::EMPLOYMENT_STATUS).trim() != RETIRED {
        return;
    }
    c.required("Former Employer", keys::FORMER_EMPLOYER);
    c.required("Source of Income", keys::INCOME_SOURCE);
}

fn assets(c: &mut Checker<'_>) {
    for (label, key) in [
        ("Net Worth", keys::NET_WORTH),
        ("Liquid Net Worth", keys::LIQUID_NET_WORTH),
    ] {
        if !money_is_numeric(c.data.get(key)) {
            c.result.add_error(label, NUMERIC_MESSAGE);
        }
    }

    if !c.data.flag(keys::INCLUDE_BREAKDOWN) {
        return;
    }
    let percentages: Vec<f64> = BREAKDOWN_ASSETS
        .iter()
        .filter_map(|asset| c.data.get(&breakdown_key(asset.slug)))
        .filter(|v| !v.is_blank())
        .filter_map(FieldValue::as_f64)
        .collect();
    if percentages.is_empty() {
        return;
    }
    if let Err(message) = percentage_total(&percentages, 100.0) {
        c.result.add_error("Asset Breakdown", message);
    }
}

/// Blank or absent passes; numbers pass; text must be a plain amount.
pub(crate) fn money_is_numeric(value: Option<&FieldValue>) -> bool {
    match value {
        None => true,
        Some(v) if v.is_blank() => true,
        Some(FieldValue::Integer(_) | FieldValue::Unsigned(_) | FieldValue::Float(_)) => true,
        Some(FieldValue::Text(s)) => parse_amount(s).is_some(),
        Some(_) => false,
    }
}

fn beneficiaries(c: &mut Checker<'_>) {
    let records = c.data.records(keys::BENEFICIARIES);
    if records.is_empty() {
        c.result
            .add_warning("Beneficiaries", "No beneficiaries specified");
        return;
    }

    let mut total = 0.0;
    for (i, record) in records.iter().enumerate() {
        let prefix = format!("Beneficiary {}", i + 1);
        let blank = FieldValue::Text(String::new());
        let name = record.get(keys::RECORD_NAME).unwrap_or(&blank);
        c.value(&format!("{prefix} Name"), name, Rule::Required);
        let relationship = record.get(keys::RECORD_RELATIONSHIP).unwrap_or(&blank);
        c.value(&format!("{prefix} Relationship"), relationship, Rule::Required);

        let label = format!("{prefix} Percentage");
        let percentage = record.get(keys::RECORD_PERCENTAGE).unwrap_or(&blank);
        if percentage.is_blank() {
            c.result
                .add_warning(&label, format!("{prefix} has no allocation percentage"));
            continue;
        }
        c.value(
            &label,
            percentage,
            Rule::NumericRange {
                min: Some(0.0),
                max: Some(100.0),
            },
        );
        total += percentage.as_f64().unwrap_or_default();
    }

    if let Err(message) = percentage_total(&[total], 100.0) {
        c.result.add_error("Beneficiaries Total", message);
    }
}

fn trusted_contact(c: &mut Checker<'_>) {
    if !c.data.flag(keys::TRUSTED_CONTACT_OPT_IN) {
        return;
    }
    c.required("Trusted Contact Name", keys::TRUSTED_FULL_NAME);
    c.required("Trusted Contact Relationship", keys::TRUSTED_RELATIONSHIP);
    if c.required("Trusted Contact Phone", keys::TRUSTED_PHONE) {
        c.field("Trusted Contact Phone", keys::TRUSTED_PHONE, Rule::Phone);
    }
    c.field("Trusted Contact Email", keys::TRUSTED_EMAIL, Rule::Email);
}

fn financial(c: &mut Checker<'_>) {
    c.field("Annual Income", keys::ANNUAL_INCOME, Rule::AnnualIncome);

    let enumerations = [
        ("Tax Bracket", keys::TAX_BRACKET, TAX_BRACKET_OPTIONS),
        ("Education Status", keys::EDUCATION_STATUS, EDUCATION_OPTIONS),
        ("Risk Tolerance", keys::RISK_TOLERANCE, RISK_TOLERANCE_OPTIONS),
        ("Citizenship", keys::CITIZENSHIP, CITIZENSHIP_OPTIONS),
        ("Marital Status", keys::MARITAL_STATUS, MARITAL_STATUS_OPTIONS),
        ("Employment Status", keys::EMPLOYMENT_STATUS, EMPLOYMENT_STATUS_OPTIONS),
    ];
    for (label, key, options) in enumerations {
        c.field(label, key, Rule::Enumeration(options));
    }

    for objective in INVESTMENT_OBJECTIVES {
        c.field(
            &format!("{} Objective Rank", objective.label),
            &objective_key(objective.slug),
            Rule::NumericRange {
                min: Some(1.0),
                max: Some(5.0),
            },
        );
    }
}

fn investment_experience(c: &mut Checker<'_>) {
    for asset in EXPERIENCE_ASSETS {
        c.field(
            &format!("{} Experience Year", asset.label),
            &experience_year_key(asset.slug),
            Rule::Year,
        );
        c.field(
            &format!("{} Experience Level", asset.label),
            &experience_level_key(asset.slug),
            Rule::Enumeration(EXPERIENCE_LEVELS),
        );
    }
}
