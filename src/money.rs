// 💵 Money - Currency parsing and formatting
// The display boundary: formatted strings must round-trip back to numbers

// ============================================================================
// PARSING
// ============================================================================

/// Parse a user-entered currency string into a number.
///
/// Accepts the formatted form the UI renders ("$1,234,567", "500,000",
/// " 2,336.81 ") by stripping the currency symbol, thousands separators and
/// surrounding whitespace. Unparsable or non-finite input defaults to 0.0,
/// matching the input fields' behavior.
pub fn parse_currency(input: &str) -> f64 {
    let cleaned: String = input
        .trim()
        .chars()
        .filter(|c| *c != '$' && *c != ',' && !c.is_whitespace())
        .collect();

    match cleaned.parse::<f64>() {
        Ok(value) if value.is_finite() => value,
        _ => 0.0,
    }
}

// ============================================================================
// FORMATTING
// ============================================================================

/// Format a value as whole-dollar currency: 1234567.0 → "$1,234,567"
///
/// Fractional cents are rounded away; prices and affordability results are
/// always displayed at whole-dollar precision.
pub fn format_currency(value: f64) -> String {
    let rounded = value.round();
    let negative = rounded < 0.0;
    let whole = rounded.abs() as u64;

    let grouped = group_thousands(whole);

    if negative {
        format!("-${}", grouped)
    } else {
        format!("${}", grouped)
    }
}

/// Format a value with cents: 2336.814 → "$2,336.81"
pub fn format_currency_cents(value: f64) -> String {
    let cents_total = (value * 100.0).round() as i64;
    let negative = cents_total < 0;
    let abs = cents_total.unsigned_abs();

    let whole = abs / 100;
    let cents = abs % 100;
    let grouped = group_thousands(whole);

    if negative {
        format!("-${}.{:02}", grouped, cents)
    } else {
        format!("${}.{:02}", grouped, cents)
    }
}

/// Insert comma separators: 1234567 → "1,234,567"
fn group_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);

    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }

    out
}

/// Round to the nearest cent (2 decimal places)
pub fn round_cents(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Round to the nearest whole dollar
pub fn round_dollars(value: f64) -> f64 {
    value.round()
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_plain_number() {
        assert_eq!(parse_currency("500000"), 500000.0);
        assert_eq!(parse_currency("2336.81"), 2336.81);
    }

    #[test]
    fn test_parse_formatted_input() {
        assert_eq!(parse_currency("500,000"), 500000.0);
        assert_eq!(parse_currency("$1,234,567"), 1234567.0);
        assert_eq!(parse_currency(" 2,336.81 "), 2336.81);
    }

    #[test]
    fn test_parse_unparsable_defaults_to_zero() {
        assert_eq!(parse_currency(""), 0.0);
        assert_eq!(parse_currency("abc"), 0.0);
        assert_eq!(parse_currency("12a4"), 0.0);
    }

    #[test]
    fn test_parse_non_finite_defaults_to_zero() {
        // "inf" and "NaN" parse as f64 but are not valid currency
        assert_eq!(parse_currency("inf"), 0.0);
        assert_eq!(parse_currency("NaN"), 0.0);
    }

    #[test]
    fn test_format_whole_dollars() {
        assert_eq!(format_currency(0.0), "$0");
        assert_eq!(format_currency(500.0), "$500");
        assert_eq!(format_currency(500000.0), "$500,000");
        assert_eq!(format_currency(1234567.0), "$1,234,567");
    }

    #[test]
    fn test_format_rounds_to_whole() {
        assert_eq!(format_currency(666.67), "$667");
        assert_eq!(format_currency(666.4), "$666");
    }

    #[test]
    fn test_format_negative() {
        assert_eq!(format_currency(-500.0), "-$500");
        assert_eq!(format_currency_cents(-12.5), "-$12.50");
    }

    #[test]
    fn test_format_cents() {
        assert_eq!(format_currency_cents(2336.81), "$2,336.81");
        assert_eq!(format_currency_cents(666.666), "$666.67");
        assert_eq!(format_currency_cents(0.0), "$0.00");
    }

    #[test]
    fn test_round_trip() {
        // Parsing a formatted string must reproduce the value
        for value in [0.0, 500.0, 100000.0, 1234567.0, 5950000.0] {
            assert_eq!(parse_currency(&format_currency(value)), value);
        }
        for value in [666.67, 2336.81, 1000000.25] {
            assert_eq!(parse_currency(&format_currency_cents(value)), value);
        }
    }

    #[test]
    fn test_round_cents() {
        assert_eq!(round_cents(666.66666), 666.67);
        assert_eq!(round_cents(2336.8149), 2336.81);
    }
}
