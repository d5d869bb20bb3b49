//! YQL literal helpers
//!
//! YQL has two string literal forms in where clauses. Equality and range
//! terms take double-quoted strings, `in (...)` lists take single-quoted
//! strings. Each form escapes its own quote character, so the two escape
//! functions are kept separate.

/// Escape a string for use inside a double-quoted YQL literal
///
/// # Example
///
/// ```
/// use vespa_filters::utils::yql::escape_double_quoted;
///
/// assert_eq!(escape_double_quoted(r#"say "hi""#), r#"say \"hi\""#);
/// ```
pub fn escape_double_quoted(s: &str) -> String {
    s.replace('\\', "\\\\").replace('"', "\\\"")
}

/// Escape a string for use inside a single-quoted YQL literal (`in` lists)
///
/// Double quotes are left untouched.
pub fn escape_single_quoted(s: &str) -> String {
    s.replace('\\', "\\\\").replace('\'', "\\'")
}

/// Render a float as a YQL numeric literal
///
/// Uses the shortest round-trip form and always keeps a fractional part or
/// exponent, so `1.0` stays `1.0`. Exponents carry a sign and at least two
/// digits (`1e+16`, `1.5e-07`). Returns `None` for infinite and NaN values,
/// which YQL cannot express.
pub fn format_float(value: f64) -> Option<String> {
    if !value.is_finite() {
        return None;
    }

    let text = format!("{:?}", value);
    let Some((mantissa, exponent)) = text.split_once('e') else {
        return Some(text);
    };
    let (sign, digits) = match exponent.strip_prefix('-') {
        Some(digits) => ('-', digits),
        None => ('+', exponent),
    };
    Some(format!("{}e{}{:0>2}", mantissa, sign, digits))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_double_quoted_plain() {
        assert_eq!(escape_double_quoted("article"), "article");
    }

    #[test]
    fn test_escape_double_quoted_quotes() {
        assert_eq!(escape_double_quoted(r#"say "hello""#), r#"say \"hello\""#);
    }

    #[test]
    fn test_escape_double_quoted_backslash() {
        assert_eq!(escape_double_quoted(r"C:\Users\test"), r"C:\\Users\\test");
    }

    #[test]
    fn test_escape_double_quoted_both_once() {
        // backslash first, so the quote's own escape is not doubled
        assert_eq!(escape_double_quoted(r#"a\"b"#), r#"a\\\"b"#);
    }

    #[test]
    fn test_escape_double_quoted_leaves_single_quotes() {
        assert_eq!(escape_double_quoted("it's"), "it's");
    }

    #[test]
    fn test_escape_single_quoted() {
        assert_eq!(escape_single_quoted("it's"), r"it\'s");
        assert_eq!(escape_single_quoted(r#"a "test""#), r#"a "test""#);
        assert_eq!(escape_single_quoted(r"a\b"), r"a\\b");
    }

    #[test]
    fn test_format_float() {
        assert_eq!(format_float(1.0).as_deref(), Some("1.0"));
        assert_eq!(format_float(0.95).as_deref(), Some("0.95"));
        assert_eq!(format_float(-2.5).as_deref(), Some("-2.5"));
        assert_eq!(format_float(1e20).as_deref(), Some("1e+20"));
    }

    #[test]
    fn test_format_float_exponent_form() {
        assert_eq!(format_float(1e15).as_deref(), Some("1000000000000000.0"));
        assert_eq!(format_float(1e16).as_deref(), Some("1e+16"));
        assert_eq!(format_float(-2.5e300).as_deref(), Some("-2.5e+300"));
        assert_eq!(format_float(0.0001).as_deref(), Some("0.0001"));
        assert_eq!(format_float(1e-5).as_deref(), Some("1e-05"));
        assert_eq!(format_float(1.5e-7).as_deref(), Some("1.5e-07"));
    }

    #[test]
    fn test_format_float_non_finite() {
        assert_eq!(format_float(f64::INFINITY), None);
        assert_eq!(format_float(f64::NEG_INFINITY), None);
        assert_eq!(format_float(f64::NAN), None);
    }
}
