//! Age computation from demographic birth dates.

use chrono::{Datelike, NaiveDate};

/// Whole years between `birth` and `today`.
///
/// One year is subtracted when today's (month, day) falls before the birth
/// (month, day).
pub fn age_on(birth: NaiveDate, today: NaiveDate) -> i32 {
    let years = today.year() - birth.year();
    if (today.month(), today.day()) < (birth.month(), birth.day()) {
        years - 1
    } else {
        years
    }
}

/// Age for a `YYYY-MM-DD` birth date string.
///
/// A missing, empty, or unparseable birth date yields 0 rather than no age,
/// so the record is still retained.
pub fn age_from_birth_date(birth_date: Option<&str>, today: NaiveDate) -> i32 {
    birth_date
        .filter(|raw| !raw.is_empty())
        .and_then(|raw| NaiveDate::parse_from_str(raw, "%Y-%m-%d").ok())
        .map_or(0, |birth| age_on(birth, today))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn birthday_already_passed() {
        assert_eq!(age_on(date(1980, 3, 1), date(2024, 6, 15)), 44);
    }

    #[test]
    fn birthday_is_today() {
        assert_eq!(age_on(date(1980, 6, 15), date(2024, 6, 15)), 44);
    }

    #[test]
    fn birthday_is_tomorrow() {
        assert_eq!(age_on(date(1980, 6, 16), date(2024, 6, 15)), 43);
    }

    #[test]
    fn leap_day_birth() {
        assert_eq!(age_on(date(2000, 2, 29), date(2023, 2, 28)), 22);
        assert_eq!(age_on(date(2000, 2, 29), date(2023, 3, 1)), 23);
    }

    #[test]
    fn unusable_birth_dates_yield_zero() {
        let today = date(2024, 6, 15);
        assert_eq!(age_from_birth_date(None, today), 0);
        assert_eq!(age_from_birth_date(Some(""), today), 0);
        assert_eq!(age_from_birth_date(Some("1980"), today), 0);
        assert_eq!(age_from_birth_date(Some("15/06/1980"), today), 0);
        assert_eq!(age_from_birth_date(Some("1980-02-30"), today), 0);
    }

    #[test]
    fn parses_iso_dates() {
        assert_eq!(age_from_birth_date(Some("1967-11-02"), date(2024, 6, 15)), 56);
    }
}
