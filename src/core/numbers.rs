//! Lenient number parsing shared by the form and the CSV loader.

/// Parses an integer cell. Spreadsheet exports such as `12.0` are accepted
/// as long as the fractional part is zero.
pub fn parse_int(raw: &str) -> Option<i64> {
    let value = raw.trim();
    if let Ok(parsed) = value.parse::<i64>() {
        return Some(parsed);
    }
    let float = parse_decimal(value)?;
    if float.fract() == 0.0 && float >= i64::MIN as f64 && float <= i64::MAX as f64 {
        Some(float as i64)
    } else {
        None
    }
}

/// Parses a decimal number using either `.` or `,` as separator.
pub fn parse_decimal(raw: &str) -> Option<f64> {
    let value = raw.trim().replace(',', ".");
    if value.is_empty() {
        return None;
    }
    value.parse::<f64>().ok().filter(|parsed| parsed.is_finite())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decimal_accepts_comma() {
        assert_eq!(parse_decimal("1500,75"), Some(1500.75));
        assert_eq!(parse_decimal(" 80.5 "), Some(80.5));
        assert_eq!(parse_decimal(""), None);
        assert_eq!(parse_decimal("abc"), None);
        assert_eq!(parse_decimal("inf"), None);
    }

    #[test]
    fn int_accepts_whole_floats_only() {
        assert_eq!(parse_int(" 42 "), Some(42));
        assert_eq!(parse_int("-3"), Some(-3));
        assert_eq!(parse_int("12.0"), Some(12));
        assert_eq!(parse_int("12,0"), Some(12));
        assert_eq!(parse_int("12.5"), None);
        assert_eq!(parse_int("doce"), None);
    }
}
