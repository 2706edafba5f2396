use crate::rules::{check, Rule, ValidationContext};
use crate::sections::money_is_numeric;
use intake_types::{field_spec, keys, FieldKind, FieldValue};

/// Format check for a single field as the user types.
///
/// Looks `key` up in the field catalog and applies its kind's rule. Unknown
/// keys and free-text kinds always pass. Mandatory-ness is not checked here.
pub fn validate_field(key: &str, value: &FieldValue, ctx: &ValidationContext) -> Result<(), String> {
    let Some(spec) = field_spec(key) else {
        return Ok(());
    };

    let rule = match spec.kind {
        FieldKind::Text | FieldKind::Boolean => return Ok(()),
        FieldKind::Enumeration(options) => Rule::Enumeration(options),
        FieldKind::Date if key == keys::DOB => Rule::Date {
            min_age: Some(18),
            max_age: Some(120),
        },
        FieldKind::Date => Rule::Date {
            min_age: None,
            max_age: None,
        },
        FieldKind::Integer { min, max } => Rule::NumericRange {
            min: Some(min as f64),
            max: Some(max as f64),
        },
        FieldKind::Phone => Rule::Phone,
        FieldKind::Email => Rule::Email,
        FieldKind::Ssn => Rule::Ssn,
        FieldKind::Year => Rule::Year,
        FieldKind::Money if key == keys::ANNUAL_INCOME => Rule::AnnualIncome,
        FieldKind::Money => return check_money(value),
    };
    check(rule, value, ctx)
}

fn check_money(value: &FieldValue) -> Result<(), String> {
    if money_is_numeric(Some(value)) {
        Ok(())
    } else {
        Err("Please enter a valid numeric value".to_string())
    }
}
