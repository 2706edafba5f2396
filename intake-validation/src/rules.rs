//! Pure per-value rules.
//!
//! [`check`] returns `Ok(())` on pass or `Err(message)` on fail. The message
//! is the user-facing text; the caller decides which label it belongs to.

use chrono::{Datelike, Local, NaiveDate};
use intake_types::{FieldValue, DATE_FORMAT};
use regex_lite::Regex;
use std::sync::LazyLock;

const DEGENERATE_SSNS: [&str; 11] = [
    "000000000", "111111111", "222222222", "333333333", "444444444", "555555555", "666666666",
    "777777777", "888888888", "999999999", "123456789",
];

/// Tolerance for percentage totals.
const PERCENT_TOLERANCE: f64 = 0.01;

/// Earliest accepted "year started" for investment experience.
pub const MIN_EXPERIENCE_YEAR: i32 = 1950;

/// Annual incomes above this are rejected as implausible.
pub const MAX_ANNUAL_INCOME: f64 = 100_000_000.0;

static EMAIL_PATTERN: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$").ok());

/// Clock used by date-sensitive rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ValidationContext {
    pub today: NaiveDate,
}

impl ValidationContext {
    /// Context for the current local date.
    pub fn now() -> Self {
        Self {
            today: Local::now().date_naive(),
        }
    }

    /// Context pinned to a fixed date.
    pub fn at(today: NaiveDate) -> Self {
        Self { today }
    }
}

impl Default for ValidationContext {
    fn default() -> Self {
        Self::now()
    }
}

/// A single-value rule.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Rule<'a> {
    Required,
    Email,
    Ssn,
    Phone,
    Date {
        min_age: Option<i32>,
        max_age: Option<i32>,
    },
    NumericRange {
        min: Option<f64>,
        max: Option<f64>,
    },
    Enumeration(&'a [&'a str]),
    Year,
    AnnualIncome,
}

/// Applies `rule` to `value`.
pub fn check(rule: Rule<'_>, value: &FieldValue, ctx: &ValidationContext) -> Result<(), String> {
    if rule == Rule::Required {
        return if value.is_blank() {
            Err("This field is required".to_string())
        } else {
            Ok(())
        };
    }

    if value.is_blank() {
        return Ok(());
    }
    let text = value.to_display_string();
    let text = text.trim();

    match rule {
        Rule::Required => Ok(()),
        Rule::Email => check_email(text),
        Rule::Ssn => check_ssn(text),
        Rule::Phone => check_phone(text),
        Rule::Date { min_age, max_age } => check_date(text, min_age, max_age, ctx),
        Rule::NumericRange { min, max } => match value.as_f64() {
            Some(n) => check_range(n, min, max),
            None => Err("Please enter a valid numeric value".to_string()),
        },
        Rule::Enumeration(allowed) => {
            if allowed.contains(&text) {
                Ok(())
            } else {
                Err("Please select a valid option".to_string())
            }
        }
        Rule::Year => check_year(text, ctx),
        Rule::AnnualIncome => check_annual_income(text),
    }
}

/// Checks that `values` sum to `expected` within 0.01.
pub fn percentage_total(values: &[f64], expected: f64) -> Result<(), String> {
    let total: f64 = values.iter().sum();
    if (total - expected).abs() > PERCENT_TOLERANCE {
        return Err(format!(
            "Percentages must total {}% (currently {}%)",
            format_number(expected),
            format_number(total)
        ));
    }
    Ok(())
}

/// Strips every non-digit character.
pub fn digits_only(s: &str) -> String {
    s.chars().filter(char::is_ascii_digit).collect()
}

/// Parses an amount after removing thousands separators, `$`, and spaces.
/// Only plain non-negative decimals are accepted.
pub fn parse_amount(s: &str) -> Option<f64> {
    let cleaned: String = s
        .chars()
        .filter(|c| !matches!(c, ',' | '$') && !c.is_whitespace())
        .collect();
    let well_formed = !cleaned.is_empty()
        && cleaned.chars().all(|c| c.is_ascii_digit() || c == '.')
        && cleaned.chars().filter(|c| *c == '.').count() <= 1
        && cleaned.chars().any(|c| c.is_ascii_digit());
    if !well_formed {
        return None;
    }
    cleaned.parse().ok()
}

/// Whole years between `dob` and `today`.
pub fn age_on(dob: NaiveDate, today: NaiveDate) -> i32 {
    let mut age = today.year() - dob.year();
    if (today.month(), today.day()) < (dob.month(), dob.day()) {
        age -= 1;
    }
    age
}

/// Formats a number without a trailing `.0` for whole values.
pub(crate) fn format_number(n: f64) -> String {
    if n.fract() == 0.0 && n.abs() < 1e15 {
        format!("{}", n as i64)
    } else {
        let s = format!("{n:.2}");
        s.trim_end_matches('0').trim_end_matches('.').to_string()
    }
}

fn check_email(text: &str) -> Result<(), String> {
    match EMAIL_PATTERN.as_ref() {
        Some(re) if re.is_match(text) => Ok(()),
        _ => Err("Please enter a valid email address".to_string()),
    }
}

fn check_ssn(text: &str) -> Result<(), String> {
    let digits = digits_only(text);
    if digits.len() != 9 {
        return Err("SSN must be 9 digits".to_string());
    }
    if DEGENERATE_SSNS.contains(&digits.as_str()) {
        return Err("Please enter a valid SSN".to_string());
    }
    Ok(())
}

fn check_phone(text: &str) -> Result<(), String> {
    if digits_only(text).len() != 10 {
        return Err("Phone number must be 10 digits".to_string());
    }
    Ok(())
}

fn check_date(
    text: &str,
    min_age: Option<i32>,
    max_age: Option<i32>,
    ctx: &ValidationContext,
) -> Result<(), String> {
    let date = NaiveDate::parse_from_str(text, DATE_FORMAT)
        .map_err(|_| "Please enter a valid date (MM/DD/YYYY)".to_string())?;

    if date > ctx.today {
        return Err("Date cannot be in the future".to_string());
    }

    let age = age_on(date, ctx.today);
    if let Some(min) = min_age {
        if age < min {
            return Err(format!("Age must be at least {min} years"));
        }
    }
    if let Some(max) = max_age {
        if age > max {
            return Err(format!("Age cannot exceed {max} years"));
        }
    }
    Ok(())
}

fn check_range(n: f64, min: Option<f64>, max: Option<f64>) -> Result<(), String> {
    if let Some(min) = min {
        if n < min {
            return Err(format!("Value must be at least {}", format_number(min)));
        }
    }
    if let Some(max) = max {
        if n > max {
            return Err(format!("Value cannot exceed {}", format_number(max)));
        }
    }
    Ok(())
}

fn check_year(text: &str, ctx: &ValidationContext) -> Result<(), String> {
    let current = ctx.today.year();
    let year: i32 = text
        .parse()
        .map_err(|_| "Please enter a valid year".to_string())?;
    if !(MIN_EXPERIENCE_YEAR..=current).contains(&year) {
        return Err(format!("Year must be between {MIN_EXPERIENCE_YEAR} and {current}"));
    }
    Ok(())
}

fn check_annual_income(text: &str) -> Result<(), String> {
    let cleaned: String = text
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '.')
        .collect();
    let income: f64 = cleaned
        .parse()
        .map_err(|_| "Please enter a valid annual income amount".to_string())?;
    if income > MAX_ANNUAL_INCOME {
        return Err("Annual income seems unreasonably high".to_string());
    }
    Ok(())
}
