/// Format a floating-point number with thousands separators and a fixed number
/// of decimal places.
///
/// # Examples
///
/// ```
/// use travelog_core::formatting::format_number;
///
/// assert_eq!(format_number(1234.5,  1), "1,234.5");
/// assert_eq!(format_number(1234567.0, 0), "1,234,567");
/// assert_eq!(format_number(0.0, 2), "0.00");
/// assert_eq!(format_number(-9876.5, 1), "-9,876.5");
/// ```
pub fn format_number(value: f64, decimals: u32) -> String {
    // Handle the sign separately so the thousands grouping works on the
    // absolute value.
    let negative = value < 0.0;
    let abs_value = value.abs();

    // Round to the requested decimal places.
    // Add a tiny epsilon (half ULP at the target precision) before rounding
    // to avoid IEEE 754 binary-representation issues at exact midpoints.
    let factor = 10_f64.powi(decimals as i32);
    let epsilon = f64::EPSILON * abs_value * factor;
    let rounded = ((abs_value * factor) + epsilon).round() / factor;

    let integer_part = rounded.trunc() as u64;
    let frac_part = rounded - rounded.trunc();

    // Build the thousands-separated integer portion.
    let int_str = integer_part.to_string();
    let grouped = group_thousands(&int_str);

    let result = if decimals == 0 {
        grouped
    } else {
        // Format the fractional part to the exact number of decimals.
        let frac_str = format!("{:.prec$}", frac_part, prec = decimals as usize);
        // `frac_str` starts with "0.", e.g. "0.50". Strip the leading "0".
        let decimal_digits = &frac_str[1..]; // ".50"
        format!("{}{}", grouped, decimal_digits)
    };

    if negative {
        format!("-{}", result)
    } else {
        result
    }
}

/// Format a distance KPI as a rounded kilometre string, or the placeholder
/// dash when nothing was travelled.
///
/// # Examples
///
/// ```
/// use travelog_core::formatting::format_km;
///
/// assert_eq!(format_km(1234.4), "1,234 km");
/// assert_eq!(format_km(200.5),  "201 km");
/// assert_eq!(format_km(0.0),    "—");
/// ```
pub fn format_km(total_km: f64) -> String {
    if total_km > 0.0 {
        format!("{} km", format_number(total_km.round(), 0))
    } else {
        crate::normalize::DATE_PLACEHOLDER.to_string()
    }
}

/// Format a night-count KPI, or the placeholder dash when zero.
///
/// # Examples
///
/// ```
/// use travelog_core::formatting::format_nights;
///
/// assert_eq!(format_nights(12),   "12 nights");
/// assert_eq!(format_nights(1),    "1 night");
/// assert_eq!(format_nights(0),    "—");
/// ```
pub fn format_nights(total_nights: i64) -> String {
    match total_nights {
        n if n <= 0 => crate::normalize::DATE_PLACEHOLDER.to_string(),
        1 => "1 night".to_string(),
        n => format!("{} nights", format_number(n as f64, 0)),
    }
}

// ── Internal helpers ──────────────────────────────────────────────────────────

/// Insert commas every three digits from the right of an integer string.
fn group_thousands(s: &str) -> String {
    if s.len() <= 3 {
        return s.to_string();
    }
    let chars: Vec<char> = s.chars().collect();
    let mut result = String::with_capacity(s.len() + s.len() / 3);
    let remainder = chars.len() % 3;
    for (i, &c) in chars.iter().enumerate() {
        if i != 0 && (i % 3 == remainder) {
            result.push(',');
        }
        result.push(c);
    }
    result
}

// ── Tests ──────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    // ── format_number ────────────────────────────────────────────────────────

    #[test]
    fn test_format_number_no_decimals() {
        assert_eq!(format_number(1234567.0, 0), "1,234,567");
        assert_eq!(format_number(999.0, 0), "999");
        assert_eq!(format_number(1000.0, 0), "1,000");
    }

    #[test]
    fn test_format_number_with_decimals() {
        assert_eq!(format_number(1234.5, 1), "1,234.5");
        assert_eq!(format_number(0.0, 2), "0.00");
    }

    #[test]
    fn test_format_number_negative() {
        assert_eq!(format_number(-9876.5, 1), "-9,876.5");
    }

    #[test]
    fn test_format_number_rounding() {
        assert_eq!(format_number(200.5, 0), "201");
        assert_eq!(format_number(0.456, 2), "0.46");
    }

    // ── format_km ────────────────────────────────────────────────────────────

    #[test]
    fn test_format_km_rounds_and_groups() {
        assert_eq!(format_km(1100.0), "1,100 km");
        assert_eq!(format_km(200.5), "201 km");
    }

    #[test]
    fn test_format_km_zero_is_placeholder() {
        assert_eq!(format_km(0.0), "—");
    }

    // ── format_nights ────────────────────────────────────────────────────────

    #[test]
    fn test_format_nights_plural() {
        assert_eq!(format_nights(4), "4 nights");
        assert_eq!(format_nights(1200), "1,200 nights");
    }

    #[test]
    fn test_format_nights_singular() {
        assert_eq!(format_nights(1), "1 night");
    }

    #[test]
    fn test_format_nights_zero_is_placeholder() {
        assert_eq!(format_nights(0), "—");
        assert_eq!(format_nights(-3), "—");
    }

    // ── group_thousands ──────────────────────────────────────────────────────

    #[test]
    fn test_group_thousands() {
        assert_eq!(group_thousands("1"), "1");
        assert_eq!(group_thousands("1234"), "1,234");
        assert_eq!(group_thousands("1234567"), "1,234,567");
    }
}
