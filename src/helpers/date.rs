//! Date helper functions

use chrono::NaiveDate;

/// Short display date, e.g. "Jun 15, 2023"
pub fn short_date(date: &NaiveDate) -> String {
    date.format("%b %-d, %Y").to_string()
}

/// Format a publish date for display, keeping the raw text when it does not parse
pub fn display_date(parsed: Option<NaiveDate>, raw: &str) -> String {
    match parsed {
        Some(date) => short_date(&date),
        None if raw.trim().is_empty() => "-".to_string(),
        None => raw.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_date() {
        let date = NaiveDate::from_ymd_opt(2023, 6, 5).unwrap();
        assert_eq!(short_date(&date), "Jun 5, 2023");
    }

    #[test]
    fn test_display_date_fallbacks() {
        assert_eq!(display_date(None, "Q3 2023"), "Q3 2023");
        assert_eq!(display_date(None, "  "), "-");
        assert_eq!(
            display_date(NaiveDate::from_ymd_opt(2023, 7, 10), "2023-07-10"),
            "Jul 10, 2023"
        );
    }
}
