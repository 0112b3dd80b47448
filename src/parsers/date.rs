//! Bulletin date recovery.
//!
//! Titles carry the report date as `DD.MM.YYYY` (for example "станом на 08:00
//! 20.10.2025"). Only the first numeric date in the title is considered. Two
//! digit years are read as 20YY and day/month order is never swapped, so a
//! title with a US-style date yields a wrong or missing date.

use chrono::NaiveDate;
use regex::Regex;
use std::sync::LazyLock;

static DATE_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(\d{1,2})[.\-](\d{1,2})[.\-](\d{2,4})").expect("date pattern")
});

/// Extracts the first `D.M.YY[YY]` date from a title
///
/// Returns `None` when nothing matches or the match is not a calendar date.
pub fn extract_date(title: &str) -> Option<NaiveDate> {
    let captures = DATE_PATTERN.captures(title)?;

    let day: u32 = captures[1].parse().ok()?;
    let month: u32 = captures[2].parse().ok()?;
    let year_digits = &captures[3];
    let year: i32 = if year_digits.len() == 2 {
        format!("20{}", year_digits).parse().ok()?
    } else {
        year_digits.parse().ok()?
    };

    // Year 0 counts as an impossible date
    let date = NaiveDate::from_ymd_opt(year, month, day).filter(|_| year >= 1);
    if date.is_none() {
        ::log::debug!(
            "Title date {}.{}.{} is not a calendar date",
            day,
            month,
            year_digits
        );
    }
    date
}
