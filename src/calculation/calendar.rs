//! Calendar helpers for monthly reconciliation.
//!
//! All calendar math is proleptic Gregorian, as implemented by `chrono`.

use chrono::{Datelike, NaiveDate, Weekday};

use crate::error::{EngineError, EngineResult};

/// Returns true if `year` is a Gregorian leap year.
///
/// Divisible by 4, except centuries, unless divisible by 400.
///
/// # Example
///
/// ```
/// use salary_engine::calculation::is_leap_year;
///
/// assert!(is_leap_year(2024));
/// assert!(is_leap_year(2000));
/// assert!(!is_leap_year(1900));
/// assert!(!is_leap_year(2023));
/// ```
pub fn is_leap_year(year: i32) -> bool {
    (year % 4 == 0 && year % 100 != 0) || year % 400 == 0
}

/// Returns the first day of the given month.
///
/// # Errors
///
/// Returns [`EngineError::InvalidDateRange`] if `month` is outside 1..=12 or
/// the year is outside the range `chrono` can represent.
pub fn first_of_month(year: i32, month: u32) -> EngineResult<NaiveDate> {
    NaiveDate::from_ymd_opt(year, month, 1).ok_or(EngineError::InvalidDateRange { year, month })
}

/// Returns the number of calendar days in the given month (28 to 31).
///
/// # Errors
///
/// Returns [`EngineError::InvalidDateRange`] if the year/month does not name a
/// calendar month.
///
/// # Example
///
/// ```
/// use salary_engine::calculation::days_in_month;
///
/// assert_eq!(days_in_month(2024, 2).unwrap(), 29);
/// assert_eq!(days_in_month(2023, 2).unwrap(), 28);
/// assert_eq!(days_in_month(2024, 4).unwrap(), 30);
/// assert!(days_in_month(2024, 13).is_err());
/// ```
pub fn days_in_month(year: i32, month: u32) -> EngineResult<u32> {
    first_of_month(year, month)?;

    Ok(match month {
        2 if is_leap_year(year) => 29,
        2 => 28,
        4 | 6 | 9 | 11 => 30,
        _ => 31,
    })
}

/// Returns every date of the given month, in order.
///
/// # Errors
///
/// Returns [`EngineError::InvalidDateRange`] if the year/month does not name a
/// calendar month.
pub fn month_dates(year: i32, month: u32) -> EngineResult<Vec<NaiveDate>> {
    let first = first_of_month(year, month)?;
    let days = days_in_month(year, month)?;
    let dates: Vec<NaiveDate> = first.iter_days().take(days as usize).collect();

    // Only reachable at the very end of chrono's supported range.
    if dates.len() != days as usize {
        return Err(EngineError::InvalidDateRange { year, month });
    }

    Ok(dates)
}

/// Returns true if the date is a Sunday.
pub fn is_sunday(date: NaiveDate) -> bool {
    date.weekday() == Weekday::Sun
}

/// Formats a date the way attendance records store it, `YYYY-MM-DD`.
pub fn iso_date(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_leap_year_february() {
        assert_eq!(days_in_month(2024, 2).unwrap(), 29);
        assert_eq!(days_in_month(2023, 2).unwrap(), 28);
        assert_eq!(days_in_month(2000, 2).unwrap(), 29);
        assert_eq!(days_in_month(1900, 2).unwrap(), 28);
    }

    #[test]
    fn test_month_lengths_2024() {
        let lengths: Vec<u32> = (1..=12).map(|m| days_in_month(2024, m).unwrap()).collect();
        assert_eq!(lengths, vec![31, 29, 31, 30, 31, 30, 31, 31, 30, 31, 30, 31]);
    }

    #[test]
    fn test_invalid_months_rejected() {
        assert_eq!(
            days_in_month(2024, 0),
            Err(EngineError::InvalidDateRange {
                year: 2024,
                month: 0
            })
        );
        assert!(days_in_month(2024, 13).is_err());
        assert!(month_dates(2024, 99).is_err());
    }

    #[test]
    fn test_month_dates_are_consecutive() {
        let dates = month_dates(2024, 2).unwrap();
        assert_eq!(dates.len(), 29);
        assert_eq!(dates[0], NaiveDate::from_ymd_opt(2024, 2, 1).unwrap());
        assert_eq!(dates[28], NaiveDate::from_ymd_opt(2024, 2, 29).unwrap());
    }

    #[test]
    fn test_is_sunday() {
        // 2024-04-07 is a Sunday
        assert!(is_sunday(NaiveDate::from_ymd_opt(2024, 4, 7).unwrap()));
        assert!(!is_sunday(NaiveDate::from_ymd_opt(2024, 4, 6).unwrap()));
    }

    #[test]
    fn test_iso_date_is_zero_padded() {
        assert_eq!(
            iso_date(NaiveDate::from_ymd_opt(2024, 4, 2).unwrap()),
            "2024-04-02"
        );
    }

    proptest! {
        #[test]
        fn prop_days_in_month_matches_chrono(year in 1i32..=9999, month in 1u32..=12) {
            let first = NaiveDate::from_ymd_opt(year, month, 1).unwrap();
            let next = if month == 12 {
                NaiveDate::from_ymd_opt(year + 1, 1, 1).unwrap()
            } else {
                NaiveDate::from_ymd_opt(year, month + 1, 1).unwrap()
            };
            let expected = (next - first).num_days() as u32;

            prop_assert_eq!(days_in_month(year, month).unwrap(), expected);
            prop_assert_eq!(month_dates(year, month).unwrap().len() as u32, expected);
        }
    }
}
