//! Pure string and date helpers shared by the classifier and aggregator.
//!
//! Sorting and dedup work on raw strings; night counting is real calendar
//! arithmetic on date-only values. The two are deliberately kept separate.

use chrono::NaiveDate;
use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

/// Placeholder shown for an absent date.
pub const DATE_PLACEHOLDER: &str = "—";

/// Normalize a label into the city dedup key.
///
/// Lowercases, NFD-decomposes accented characters, strips the combining
/// marks, and trims surrounding whitespace. Idempotent, so two labels
/// differing only by case or accent collide into the same key.
///
/// # Examples
///
/// ```
/// use travelog_core::normalize::normalize_key;
///
/// assert_eq!(normalize_key("Genève"), "geneve");
/// assert_eq!(normalize_key("GENEVE"), "geneve");
/// assert_eq!(normalize_key("  Zürich "), "zurich");
/// ```
pub fn normalize_key(s: &str) -> String {
    s.to_lowercase()
        .nfd()
        .filter(|c| !is_combining_mark(*c))
        .collect::<String>()
        .trim()
        .to_string()
}

/// Extract the city name from a free-text place label.
///
/// Returns the substring before the first comma, trimmed; the empty string
/// when the label is absent.
///
/// # Examples
///
/// ```
/// use travelog_core::normalize::city_name;
///
/// assert_eq!(city_name(Some("Paris, FR")), "Paris");
/// assert_eq!(city_name(Some("Rome")), "Rome");
/// assert_eq!(city_name(None), "");
/// ```
pub fn city_name(label: Option<&str>) -> String {
    label
        .unwrap_or("")
        .split(',')
        .next()
        .unwrap_or("")
        .trim()
        .to_string()
}

/// Format an ISO-prefixed date string as `DD/MM/YYYY` for display.
///
/// Only the first 10 characters are considered; an absent or empty input
/// yields the placeholder dash. No locale state is consulted.
pub fn format_display_date(iso: Option<&str>) -> String {
    let Some(s) = iso.filter(|s| !s.is_empty()) else {
        return DATE_PLACEHOLDER.to_string();
    };
    let mut parts: Vec<&str> = date_prefix(s).split('-').collect();
    parts.reverse();
    parts.join("/")
}

/// Whole-night count between two ISO-prefixed date strings.
///
/// Returns `None` when either input is absent or its 10-character prefix is
/// not a valid `YYYY-MM-DD` date. The count is the absolute day difference
/// of the date-only values, so time-of-day components can never bias it.
pub fn nights_between(a: Option<&str>, b: Option<&str>) -> Option<i64> {
    let start = parse_date_only(a?)?;
    let end = parse_date_only(b?)?;
    Some((end - start).num_days().abs())
}

/// The date-only prefix of an ISO string (first 10 characters, or the whole
/// string when shorter).
pub fn date_prefix(s: &str) -> &str {
    s.get(..10).unwrap_or(s)
}

fn parse_date_only(s: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(s.get(..10)?, "%Y-%m-%d").ok()
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    // ── normalize_key ─────────────────────────────────────────────────────────

    #[test]
    fn test_normalize_key_case_and_diacritics() {
        assert_eq!(normalize_key("Genève"), normalize_key("GENEVE"));
        assert_eq!(normalize_key("São Paulo"), "sao paulo");
        assert_eq!(normalize_key("MÜNCHEN"), "munchen");
    }

    #[test]
    fn test_normalize_key_idempotent() {
        for input in ["Genève", "  Zürich ", "PARIS", "", "New York"] {
            let once = normalize_key(input);
            assert_eq!(normalize_key(&once), once, "not idempotent for {input:?}");
        }
    }

    #[test]
    fn test_normalize_key_trims() {
        assert_eq!(normalize_key("  Rome  "), "rome");
    }

    #[test]
    fn test_normalize_key_empty() {
        assert_eq!(normalize_key(""), "");
    }

    // ── city_name ─────────────────────────────────────────────────────────────

    #[test]
    fn test_city_name_before_first_comma() {
        assert_eq!(city_name(Some("Paris, FR")), "Paris");
        assert_eq!(city_name(Some("Rome, IT, Europe")), "Rome");
    }

    #[test]
    fn test_city_name_no_comma() {
        assert_eq!(city_name(Some("Tokyo")), "Tokyo");
    }

    #[test]
    fn test_city_name_trims() {
        assert_eq!(city_name(Some("  Berlin , DE")), "Berlin");
    }

    #[test]
    fn test_city_name_absent() {
        assert_eq!(city_name(None), "");
    }

    // ── format_display_date ───────────────────────────────────────────────────

    #[test]
    fn test_format_display_date_basic() {
        assert_eq!(format_display_date(Some("2024-03-01")), "01/03/2024");
    }

    #[test]
    fn test_format_display_date_ignores_time_suffix() {
        assert_eq!(
            format_display_date(Some("2024-03-01T14:30:00Z")),
            "01/03/2024"
        );
    }

    #[test]
    fn test_format_display_date_absent() {
        assert_eq!(format_display_date(None), DATE_PLACEHOLDER);
        assert_eq!(format_display_date(Some("")), DATE_PLACEHOLDER);
    }

    // ── nights_between ────────────────────────────────────────────────────────

    #[test]
    fn test_nights_between_basic() {
        assert_eq!(
            nights_between(Some("2024-03-01"), Some("2024-03-05")),
            Some(4)
        );
    }

    #[test]
    fn test_nights_between_absolute() {
        assert_eq!(
            nights_between(Some("2024-05-10"), Some("2024-05-03")),
            Some(7)
        );
    }

    #[test]
    fn test_nights_between_same_day_is_zero() {
        assert_eq!(
            nights_between(Some("2024-03-01"), Some("2024-03-01")),
            Some(0)
        );
    }

    #[test]
    fn test_nights_between_time_of_day_does_not_bias() {
        // 23:50 → 00:10 next day is still exactly one night at date precision.
        assert_eq!(
            nights_between(Some("2024-03-01T23:50:00"), Some("2024-03-02T00:10:00")),
            Some(1)
        );
    }

    #[test]
    fn test_nights_between_absent_inputs() {
        assert_eq!(nights_between(None, Some("2024-03-01")), None);
        assert_eq!(nights_between(Some("2024-03-01"), None), None);
        assert_eq!(nights_between(None, None), None);
    }

    #[test]
    fn test_nights_between_unparseable_date() {
        assert_eq!(nights_between(Some("not-a-date"), Some("2024-03-01")), None);
        assert_eq!(nights_between(Some("2024-3-1"), Some("2024-03-01")), None);
    }

    // ── date_prefix ───────────────────────────────────────────────────────────

    #[test]
    fn test_date_prefix() {
        assert_eq!(date_prefix("2024-03-01T10:00:00Z"), "2024-03-01");
        assert_eq!(date_prefix("2024-03"), "2024-03");
    }
}
