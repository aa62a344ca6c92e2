//! Normalization of the sheet's hand-typed dates to `YYYY-MM-DD`.

use chrono::{Datelike, Local};
use once_cell::sync::Lazy;
use regex::Regex;

static FULL_YEAR: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^([0-9]{1,2})[./]([0-9]{1,2})[./]([0-9]{4})$").unwrap());
static SHORT_YEAR: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^([0-9]{1,2})[./]([0-9]{1,2})[./]([0-9]{2})$").unwrap());
static NO_YEAR: Lazy<Regex> = Lazy::new(|| Regex::new(r"^([0-9]{1,2})[./]([0-9]{1,2})$").unwrap());

/// Normalizes `raw` using the local clock's current year for `D.M` dates.
pub fn normalize_date(raw: &str) -> String {
    normalize_date_in_year(raw, Local::now().year())
}

/// Normalizes `raw`, substituting `current_year` when the input has no year.
///
/// Unrecognized input is returned unchanged; blank input becomes `""`.
pub fn normalize_date_in_year(raw: &str, current_year: i32) -> String {
    let s = raw.trim();
    if s.is_empty() {
        return String::new();
    }

    if let Some(caps) = FULL_YEAR.captures(s) {
        return format!("{}-{:0>2}-{:0>2}", &caps[3], &caps[2], &caps[1]);
    }

    if let Some(caps) = SHORT_YEAR.captures(s) {
        return format!("20{}-{:0>2}-{:0>2}", &caps[3], &caps[2], &caps[1]);
    }

    if let Some(caps) = NO_YEAR.captures(s) {
        return format!("{current_year}-{:0>2}-{:0>2}", &caps[2], &caps[1]);
    }

    raw.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_year() {
        assert_eq!(normalize_date_in_year("5.9.2024", 1999), "2024-09-05");
        assert_eq!(normalize_date_in_year("15/10/2023", 1999), "2023-10-15");
    }

    #[test]
    fn test_short_year() {
        assert_eq!(normalize_date_in_year("5.9.24", 1999), "2024-09-05");
        assert_eq!(normalize_date_in_year("05/09/24", 1999), "2024-09-05");
    }

    #[test]
    fn test_missing_year_uses_given_year() {
        assert_eq!(normalize_date_in_year("5.9", 2024), "2024-09-05");
        assert_eq!(normalize_date_in_year("31/12", 2025), "2025-12-31");
    }

    #[test]
    fn test_missing_year_uses_clock() {
        let year = Local::now().year();
        assert_eq!(normalize_date("1.2"), format!("{year}-02-01"));
    }

    #[test]
    fn test_canonical_passes_through() {
        assert_eq!(normalize_date_in_year("2024-09-05", 1999), "2024-09-05");
    }

    #[test]
    fn test_unrecognized_passes_through() {
        assert_eq!(normalize_date_in_year("garbage", 1999), "garbage");
        assert_eq!(normalize_date_in_year("5.9.202", 1999), "5.9.202");
    }

    #[test]
    fn test_non_ascii_digits_pass_through() {
        assert_eq!(normalize_date_in_year("٥.٩.٢٠٢٤", 2024), "٥.٩.٢٠٢٤");
        assert_eq!(normalize_date_in_year("٥.٩", 2024), "٥.٩");
    }

    #[test]
    fn test_blank_is_empty() {
        assert_eq!(normalize_date_in_year("   ", 2024), "");
    }

    #[test]
    fn test_surrounding_whitespace_is_ignored() {
        assert_eq!(normalize_date_in_year(" 5.9.2024 ", 1999), "2024-09-05");
    }
}
