use chrono::NaiveDate;
use intake_types::{FieldValue, MARITAL_STATUS_OPTIONS};
use intake_validation::{check, percentage_total, validate_field, Rule, ValidationContext};
use proptest::prelude::*;

fn ctx() -> ValidationContext {
    ValidationContext::at(NaiveDate::from_ymd_opt(2025, 1, 1).unwrap())
}

fn run(rule: Rule<'_>, value: &str) -> Result<(), String> {
    check(rule, &FieldValue::from(value), &ctx())
}

const ADULT: Rule<'static> = Rule::Date {
    min_age: Some(18),
    max_age: Some(120),
};

// ── Required ─────────────────────────────────────────────────────

#[test]
fn required_rejects_blank_and_whitespace() {
    assert_eq!(run(Rule::Required, ""), Err("This field is required".into()));
    assert_eq!(run(Rule::Required, "   \t"), Err("This field is required".into()));
    assert_eq!(run(Rule::Required, "x"), Ok(()));
    assert_eq!(check(Rule::Required, &FieldValue::Integer(0), &ctx()), Ok(()));
}

#[test]
fn format_rules_let_empty_values_through() {
    for rule in [
        Rule::Email,
        Rule::Ssn,
        Rule::Phone,
        ADULT,
        Rule::Year,
        Rule::AnnualIncome,
        Rule::Enumeration(MARITAL_STATUS_OPTIONS),
        Rule::NumericRange {
            min: Some(1.0),
            max: None,
        },
    ] {
        assert_eq!(run(rule, ""), Ok(()), "{rule:?}");
    }
}

// ── Email ────────────────────────────────────────────────────────

#[test]
fn email_pattern() {
    assert_eq!(run(Rule::Email, "ada@example.com"), Ok(()));
    assert_eq!(run(Rule::Email, "first.last+tag@sub.example.org"), Ok(()));
    for bad in ["ada@", "ada.example.com", "ada@example.c", "a b@example.com"] {
        assert_eq!(
            run(Rule::Email, bad),
            Err("Please enter a valid email address".into()),
            "{bad}"
        );
    }
}

// ── SSN ──────────────────────────────────────────────────────────

#[test]
fn ssn_requires_nine_digits() {
    assert_eq!(run(Rule::Ssn, "123-45-6780"), Ok(()));
    assert_eq!(run(Rule::Ssn, "12345678"), Err("SSN must be 9 digits".into()));
    assert_eq!(run(Rule::Ssn, "1234567890"), Err("SSN must be 9 digits".into()));
}

#[test]
fn degenerate_ssns_are_rejected() {
    for d in 0..=9 {
        let ssn = d.to_string().repeat(9);
        assert_eq!(run(Rule::Ssn, &ssn), Err("Please enter a valid SSN".into()));
    }
    assert_eq!(run(Rule::Ssn, "123-45-6789"), Err("Please enter a valid SSN".into()));
}

// ── Phone ────────────────────────────────────────────────────────

#[test]
fn phone_ignores_punctuation() {
    assert_eq!(run(Rule::Phone, "(555) 123-4567"), Ok(()));
    assert_eq!(run(Rule::Phone, "555.123.456"), Err("Phone number must be 10 digits".into()));
}

proptest! {
    #[test]
    fn phone_passes_iff_ten_digits(input in "[0-9 ()+.-]{1,20}") {
        let digits = input.chars().filter(char::is_ascii_digit).count();
        let result = run(Rule::Phone, &input);
        if input.trim().is_empty() {
            prop_assert!(result.is_ok());
        } else {
            prop_assert_eq!(result.is_ok(), digits == 10);
        }
    }

    #[test]
    fn nine_digit_ssns_pass_unless_degenerate(digits in "[0-9]{9}") {
        let degenerate = digits == "123456789"
            || digits.chars().all(|c| Some(c) == digits.chars().next());
        prop_assert_eq!(run(Rule::Ssn, &digits).is_ok(), !degenerate);
    }
}

// ── Dates ────────────────────────────────────────────────────────

#[test]
fn date_format_and_future() {
    assert_eq!(
        run(ADULT, "1990-01-01"),
        Err("Please enter a valid date (MM/DD/YYYY)".into())
    );
    assert_eq!(
        run(ADULT, "02/30/1990"),
        Err("Please enter a valid date (MM/DD/YYYY)".into())
    );
    assert_eq!(run(ADULT, "01/02/2025"), Err("Date cannot be in the future".into()));
}

#[test]
fn age_bounds_at_fixed_today() {
    assert_eq!(run(ADULT, "01/01/2007"), Ok(()));
    assert_eq!(run(ADULT, "01/02/2007"), Err("Age must be at least 18 years".into()));
    assert_eq!(run(ADULT, "01/01/1905"), Ok(()));
    assert_eq!(run(ADULT, "12/31/1903"), Err("Age cannot exceed 120 years".into()));
}

#[test]
fn today_itself_is_not_in_the_future() {
    let rule = Rule::Date {
        min_age: None,
        max_age: None,
    };
    assert_eq!(run(rule, "01/01/2025"), Ok(()));
}

// ── Numbers and totals ───────────────────────────────────────────

#[test]
fn numeric_range_messages() {
    let rule = Rule::NumericRange {
        min: Some(0.0),
        max: Some(70.0),
    };
    assert_eq!(check(rule, &FieldValue::Integer(70), &ctx()), Ok(()));
    assert_eq!(
        check(rule, &FieldValue::Integer(71), &ctx()),
        Err("Value cannot exceed 70".into())
    );
    assert_eq!(
        check(rule, &FieldValue::Integer(-1), &ctx()),
        Err("Value must be at least 0".into())
    );
    assert_eq!(run(rule, "ten"), Err("Please enter a valid numeric value".into()));
}

#[test]
fn percentage_total_tolerance() {
    assert_eq!(percentage_total(&[60.0, 40.0], 100.0), Ok(()));
    assert_eq!(percentage_total(&[33.333, 33.333, 33.334], 100.0), Ok(()));
    assert_eq!(
        percentage_total(&[50.0, 40.0], 100.0),
        Err("Percentages must total 100% (currently 90%)".into())
    );
}

#[test]
fn enumeration_membership() {
    let rule = Rule::Enumeration(MARITAL_STATUS_OPTIONS);
    assert_eq!(run(rule, "Married"), Ok(()));
    assert_eq!(run(rule, "married"), Err("Please select a valid option".into()));
}

#[test]
fn year_window() {
    assert_eq!(run(Rule::Year, "1950"), Ok(()));
    assert_eq!(run(Rule::Year, "2025"), Ok(()));
    assert_eq!(run(Rule::Year, "1949"), Err("Year must be between 1950 and 2025".into()));
    assert_eq!(run(Rule::Year, "2026"), Err("Year must be between 1950 and 2025".into()));
    assert_eq!(run(Rule::Year, "nineteen"), Err("Please enter a valid year".into()));
}

#[test]
fn annual_income_cap() {
    assert_eq!(run(Rule::AnnualIncome, "$150,000"), Ok(()));
    assert_eq!(
        run(Rule::AnnualIncome, "250,000,000"),
        Err("Annual income seems unreasonably high".into())
    );
    assert_eq!(
        run(Rule::AnnualIncome, "n/a"),
        Err("Please enter a valid annual income amount".into())
    );
}

// ── Live field check ─────────────────────────────────────────────

#[test]
fn live_check_uses_catalog_kind() {
    let c = ctx();
    assert!(validate_field("email", &"nope".into(), &c).is_err());
    assert!(validate_field("home_phone", &"555-123-4567".into(), &c).is_ok());
    assert!(validate_field("years_employed", &FieldValue::Integer(80), &c).is_err());
    assert!(validate_field("net_worth", &"$2,000,000".into(), &c).is_ok());
    assert!(validate_field("net_worth", &"two million".into(), &c).is_err());
    assert!(validate_field("asset_experience_stocks_level", &"Expert".into(), &c).is_err());
    assert!(validate_field("investment_objective_income", &FieldValue::Integer(3), &c).is_ok());
}

#[test]
fn live_check_ignores_free_text_and_unknown_keys() {
    let c = ctx();
    assert_eq!(validate_field("full_name", &"".into(), &c), Ok(()));
    assert_eq!(validate_field("not_a_field", &"anything".into(), &c), Ok(()));
}
