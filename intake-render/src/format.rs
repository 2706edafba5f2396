//! Value formatting shared by every emitter.

use intake_types::FieldValue;

/// Money with a dollar sign and thousands separators when the value is a
/// whole number (`1234567` → `$1,234,567`). Anything else is returned as
/// entered.
pub fn format_money(value: &FieldValue) -> String {
    let signed = |n: i64| (n < 0, n.unsigned_abs());
    let whole = match value {
        FieldValue::Integer(i) => Some(signed(*i)),
        FieldValue::Unsigned(u) => Some((false, *u)),
        FieldValue::Float(f) if f.fract() == 0.0 && f.abs() < i64::MAX as f64 => {
            Some(signed(*f as i64))
        }
        FieldValue::Text(s) => {
            let s = s.trim();
            s.parse::<i64>()
                .map(signed)
                .or_else(|_| s.parse::<u64>().map(|u| (false, u)))
                .ok()
        }
        _ => None,
    };
    match whole {
        Some((true, n)) => format!("-${}", group_thousands(n)),
        Some((false, n)) => format!("${}", group_thousands(n)),
        None => value.to_display_string(),
    }
}

/// Scalar display form: booleans as Yes/No, everything else verbatim.
pub fn display_scalar(value: &FieldValue) -> String {
    match value {
        FieldValue::Bool(true) => "Yes".to_string(),
        FieldValue::Bool(false) => "No".to_string(),
        other => other.to_display_string(),
    }
}

fn group_thousands(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn money_groups_whole_numbers() {
        assert_eq!(format_money(&FieldValue::Integer(1_234_567)), "$1,234,567");
        assert_eq!(format_money(&FieldValue::from("250000")), "$250,000");
        assert_eq!(format_money(&FieldValue::Integer(999)), "$999");
        assert_eq!(format_money(&FieldValue::Integer(0)), "$0");
        assert_eq!(format_money(&FieldValue::Integer(-1500)), "-$1,500");
        assert_eq!(
            format_money(&FieldValue::Unsigned(u64::MAX)),
            "$18,446,744,073,709,551,615"
        );
        assert_eq!(
            format_money(&FieldValue::Text("18446744073709551615".to_string())),
            "$18,446,744,073,709,551,615"
        );
        assert_eq!(format_money(&FieldValue::Float(1000.0)), "$1,000");
    }

    #[test]
    fn money_keeps_unparsable_text() {
        assert_eq!(format_money(&FieldValue::from("$1.2M")), "$1.2M");
        assert_eq!(format_money(&FieldValue::from("1,000")), "1,000");
        assert_eq!(format_money(&FieldValue::Float(10.5)), "10.5");
    }

    #[test]
    fn booleans_read_as_yes_no() {
        assert_eq!(display_scalar(&FieldValue::Bool(true)), "Yes");
        assert_eq!(display_scalar(&FieldValue::Bool(false)), "No");
        assert_eq!(display_scalar(&FieldValue::Integer(3)), "3");
    }
}
