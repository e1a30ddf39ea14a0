//! Value and p-value formatting, significance classification.

/// Format a correlation value to fixed decimal places.
///
/// With `strip_zero`, only a literal `0` immediately before the decimal
/// point is removed (`0.250` -> `.250`, `-0.17` -> `-.17`); zeros in the
/// fractional digits are never touched.
pub fn format_value(x: f64, digits: usize, strip_zero: bool) -> String {
    let s = format!("{:.prec$}", x, prec = digits);
    if strip_zero {
        strip_integer_zero(&s)
    } else {
        s
    }
}

/// Remove the integer-part zero right before the decimal point, if any.
fn strip_integer_zero(s: &str) -> String {
    if let Some(rest) = s.strip_prefix("0.") {
        format!(".{}", rest)
    } else if let Some(rest) = s.strip_prefix("-0.") {
        format!("-.{}", rest)
    } else {
        s.to_string()
    }
}

/// Format a p-value for display.
///
/// In star mode the p-value becomes star notation. In numeric mode values
/// under 0.001 render as the literal `<0.001` (zero-stripped to `<.001` on
/// request); anything else is fixed-decimal formatted.
pub fn format_p(p: f64, digits: usize, numeric: bool, strip_zero: bool) -> String {
    if !numeric {
        return stars(p).to_string();
    }
    if p < 0.001 {
        if strip_zero {
            "<.001".to_string()
        } else {
            "<0.001".to_string()
        }
    } else {
        format_value(p, digits, strip_zero)
    }
}

/// Star notation for a p-value, in decreasing significance order.
pub fn stars(p: f64) -> &'static str {
    if p < 0.001 {
        "***"
    } else if p < 0.01 {
        "**"
    } else if p < 0.05 {
        "*"
    } else {
        ""
    }
}

/// Whether a cell counts as faded: fading enabled and raw p not below 0.05.
pub fn is_faded(p: f64, fade_enabled: bool) -> bool {
    fade_enabled && p >= 0.05
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_value_fixed_digits() {
        assert_eq!(format_value(0.25, 3, false), "0.250");
        assert_eq!(format_value(-0.17, 3, false), "-0.170");
        assert_eq!(format_value(1.0, 2, false), "1.00");
    }

    #[test]
    fn test_strip_only_integer_part_zero() {
        assert_eq!(format_value(0.250, 3, true), ".250");
        assert_eq!(format_value(-0.17, 3, true), "-.170");
        // the 1 before the point stays; fractional zeros stay
        assert_eq!(format_value(1.0, 3, true), "1.000");
        // a fractional zero must not be the one removed
        assert_eq!(format_value(0.105, 3, true), ".105");
    }

    #[test]
    fn test_format_p_stars_mode() {
        assert_eq!(format_p(0.0004, 3, false, false), "***");
        assert_eq!(format_p(0.004, 3, false, false), "**");
        assert_eq!(format_p(0.04, 3, false, false), "*");
        assert_eq!(format_p(0.4, 3, false, false), "");
    }

    #[test]
    fn test_format_p_numeric_threshold() {
        assert_eq!(format_p(0.0004, 3, true, false), "<0.001");
        assert_eq!(format_p(0.0004, 3, true, true), "<.001");
        assert_eq!(format_p(0.032, 3, true, false), "0.032");
        assert_eq!(format_p(0.032, 3, true, true), ".032");
    }

    #[test]
    fn test_stars_boundaries() {
        assert_eq!(stars(0.0009), "***");
        assert_eq!(stars(0.001), "**");
        assert_eq!(stars(0.01), "*");
        assert_eq!(stars(0.05), "");
        assert_eq!(stars(0.9), "");
    }

    #[test]
    fn test_is_faded() {
        assert!(is_faded(0.2, true));
        assert!(is_faded(0.05, true));
        assert!(!is_faded(0.01, true));
        assert!(!is_faded(0.2, false));
    }
}
