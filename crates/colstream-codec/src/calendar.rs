//! Epoch day offset to calendar date conversion.
//!
//! Converts a signed day count relative to 1970-01-01 into a proleptic
//! Gregorian (year, month, day) using integer cycle arithmetic only:
//!
//! ```text
//! 400 years = 146097 days   (4 centuries, the last one a day longer)
//! 100 years =  36524 days   (24 leap years)
//!   4 years =   1461 days   (leap year last)
//!   1 year  =    365 days
//! ```
//!
//! Dates between 1970 and 2099 take a shorter path because every year
//! divisible by four in that span is a leap year.
//!
//! The accepted range is [`EPOCH_DAY_MIN`] (0001-01-01) through
//! [`EPOCH_DAY_MAX`] (9999-12-31). Offsets outside it are rejected with
//! [`DecodeError::DateOutOfRange`].

use chrono::NaiveDate;
use colstream_common::constants::{EPOCH_DAY_MAX, EPOCH_DAY_MIN};

use crate::error::{DecodeError, DecodeResult};

/// First day offset not handled by the fast path (2100-01-01).
pub const FAST_PATH_END: i64 = 47_482;

const DAYS_PER_YEAR: i64 = 365;
const DAYS_PER_4_YEARS: i64 = 1_461;
const DAYS_PER_100_YEARS: i64 = 36_524;
const DAYS_PER_400_YEARS: i64 = 146_097;

/// Days from 1601-01-01 to 1970-01-01.
const DAYS_1601_TO_EPOCH: i64 = 134_774;

/// Days from 1969-01-01 to 1970-01-01. Anchoring the fast path one year
/// early puts the leap year (1972) last in its 4-year cycle.
const DAYS_1969_TO_EPOCH: i64 = 365;

/// Cumulative days before each month, plus the year length.
const CUMULATIVE_DAYS: [u32; 13] = [0, 31, 59, 90, 120, 151, 181, 212, 243, 273, 304, 334, 365];
const CUMULATIVE_DAYS_LEAP: [u32; 13] = [0, 31, 60, 91, 121, 152, 182, 213, 244, 274, 305, 335, 366];

/// Converts a day offset since 1970-01-01 into (year, month, day).
///
/// # Example
///
/// ```rust
/// use colstream_codec::calendar::epoch_days_to_date;
///
/// assert_eq!(epoch_days_to_date(0).unwrap(), (1970, 1, 1));
/// assert_eq!(epoch_days_to_date(-1).unwrap(), (1969, 12, 31));
/// assert_eq!(epoch_days_to_date(18_262).unwrap(), (2020, 1, 1));
/// ```
pub fn epoch_days_to_date(days: i64) -> DecodeResult<(i32, u32, u32)> {
    if !(EPOCH_DAY_MIN..=EPOCH_DAY_MAX).contains(&days) {
        return Err(DecodeError::DateOutOfRange { days });
    }

    if (0..FAST_PATH_END).contains(&days) {
        Ok(fast_path(days))
    } else {
        Ok(general_path(days))
    }
}

/// Converts a day offset since 1970-01-01 into a `NaiveDate`.
pub fn epoch_days_to_naive_date(days: i64) -> DecodeResult<NaiveDate> {
    let (year, month, day) = epoch_days_to_date(days)?;
    NaiveDate::from_ymd_opt(year, month, day).ok_or(DecodeError::DateOutOfRange { days })
}

/// 1970-01-01 through 2099-12-31.
fn fast_path(days: i64) -> (i32, u32, u32) {
    let shifted = days + DAYS_1969_TO_EPOCH;
    let cycles = shifted / DAYS_PER_4_YEARS;
    let (year_in_cycle, day_of_year) = split_years(shifted % DAYS_PER_4_YEARS);

    let year = 1969 + 4 * cycles + year_in_cycle;
    let (month, day) = month_day(day_of_year, year_in_cycle == 3);
    (year as i32, month, day)
}

/// Any offset within the supported range.
fn general_path(days: i64) -> (i32, u32, u32) {
    let shifted = days + DAYS_1601_TO_EPOCH;
    let cycles_400 = shifted.div_euclid(DAYS_PER_400_YEARS);
    let mut rem = shifted.rem_euclid(DAYS_PER_400_YEARS);

    let mut centuries = rem / DAYS_PER_100_YEARS;
    if centuries == 4 {
        // Last day of the 400-year cycle: Dec 31 of the leap century year.
        centuries = 3;
        rem = DAYS_PER_100_YEARS;
    } else {
        rem -= centuries * DAYS_PER_100_YEARS;
    }

    let cycles_4 = rem / DAYS_PER_4_YEARS;
    let (year_in_cycle, day_of_year) = split_years(rem % DAYS_PER_4_YEARS);

    let year = 1601 + 400 * cycles_400 + 100 * centuries + 4 * cycles_4 + year_in_cycle;

    // The century-ending year (cycle 24, year 3) is leap only in the
    // fourth century of a 400-year cycle.
    let leap = year_in_cycle == 3 && (cycles_4 != 24 || centuries == 3);
    let (month, day) = month_day(day_of_year, leap);
    (year as i32, month, day)
}

/// Splits days within a 4-year cycle into (year in cycle, day of year).
fn split_years(days_in_cycle: i64) -> (i64, u32) {
    let year = days_in_cycle / DAYS_PER_YEAR;
    if year == 4 {
        // Day 1460 is Dec 31 of the leap year, not day 0 of a fifth year.
        return (3, 365);
    }
    (year, (days_in_cycle - year * DAYS_PER_YEAR) as u32)
}

/// Maps a zero-based day of year to (month, day).
fn month_day(day_of_year: u32, leap: bool) -> (u32, u32) {
    let table = if leap {
        &CUMULATIVE_DAYS_LEAP
    } else {
        &CUMULATIVE_DAYS
    };

    // Months are at most 32 days long, so this lands on the right month or
    // the one after it.
    let mut month = ((day_of_year >> 5) + 1) as usize;
    while table[month] > day_of_year {
        month -= 1;
    }
    (month as u32 + 1, day_of_year - table[month] + 1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Datelike;

    fn days_of(year: i32, month: u32, day: u32) -> i64 {
        let epoch = NaiveDate::from_ymd_opt(1970, 1, 1).unwrap();
        NaiveDate::from_ymd_opt(year, month, day)
            .unwrap()
            .signed_duration_since(epoch)
            .num_days()
    }

    #[test]
    fn test_epoch_and_neighbors() {
        assert_eq!(epoch_days_to_date(0).unwrap(), (1970, 1, 1));
        assert_eq!(epoch_days_to_date(-1).unwrap(), (1969, 12, 31));
        assert_eq!(epoch_days_to_date(1).unwrap(), (1970, 1, 2));
        assert_eq!(epoch_days_to_date(18_262).unwrap(), (2020, 1, 1));
    }

    #[test]
    fn test_known_dates() {
        let cases = [
            (364, (1970, 12, 31)),
            (365, (1971, 1, 1)),
            (500, (1971, 5, 16)),
            (729, (1971, 12, 31)),
            (730, (1972, 1, 1)),
            (1_096, (1973, 1, 1)),
            (2_250, (1976, 2, 29)),
            (10_957, (2000, 1, 1)),
            (12_477, (2004, 2, 29)),
            (12_478, (2004, 3, 1)),
            (12_783, (2004, 12, 31)),
            (13_148, (2005, 12, 31)),
            (15_941, (2013, 8, 24)),
            (19_378, (2023, 1, 21)),
            (47_579, (2100, 4, 8)),
            (47_847, (2101, 1, 1)),
            (54_727, (2119, 11, 3)),
        ];
        for (days, expected) in cases {
            assert_eq!(epoch_days_to_date(days).unwrap(), expected, "day offset {days}");
        }
    }

    #[test]
    fn test_leap_days() {
        assert_eq!(epoch_days_to_date(days_of(2000, 2, 29)).unwrap(), (2000, 2, 29));
        assert_eq!(epoch_days_to_date(days_of(1972, 2, 29)).unwrap(), (1972, 2, 29));
        assert_eq!(epoch_days_to_date(days_of(1972, 12, 31)).unwrap(), (1972, 12, 31));
        assert_eq!(epoch_days_to_date(days_of(1600, 2, 29)).unwrap(), (1600, 2, 29));
        assert_eq!(epoch_days_to_date(days_of(2000, 12, 31)).unwrap(), (2000, 12, 31));
    }

    #[test]
    fn test_century_non_leap() {
        let march_first = days_of(1900, 3, 1);
        assert_eq!(epoch_days_to_date(march_first).unwrap(), (1900, 3, 1));
        assert_eq!(epoch_days_to_date(march_first - 1).unwrap(), (1900, 2, 28));

        let march_first = days_of(2100, 3, 1);
        assert_eq!(epoch_days_to_date(march_first - 1).unwrap(), (2100, 2, 28));
        assert_eq!(epoch_days_to_date(days_of(1700, 12, 31)).unwrap(), (1700, 12, 31));
    }

    #[test]
    fn test_fast_path_boundary() {
        assert_eq!(fast_path(FAST_PATH_END - 1), (2099, 12, 31));
        assert_eq!(fast_path(FAST_PATH_END - 1), general_path(FAST_PATH_END - 1));
        assert_eq!(epoch_days_to_date(FAST_PATH_END).unwrap(), (2100, 1, 1));
        assert_eq!(epoch_days_to_date(FAST_PATH_END).unwrap(), general_path(FAST_PATH_END));
    }

    #[test]
    fn test_fast_path_agrees_with_general_path() {
        for days in 0..FAST_PATH_END {
            assert_eq!(fast_path(days), general_path(days), "day offset {days}");
        }
    }

    #[test]
    fn test_range_limits() {
        assert_eq!(epoch_days_to_date(EPOCH_DAY_MIN).unwrap(), (1, 1, 1));
        assert_eq!(epoch_days_to_date(EPOCH_DAY_MAX).unwrap(), (9999, 12, 31));
        assert!(matches!(
            epoch_days_to_date(EPOCH_DAY_MIN - 1),
            Err(DecodeError::DateOutOfRange { .. })
        ));
        assert!(matches!(
            epoch_days_to_date(EPOCH_DAY_MAX + 1),
            Err(DecodeError::DateOutOfRange { .. })
        ));
    }

    #[test]
    fn test_matches_chrono_over_full_range() {
        let mut expected = NaiveDate::from_ymd_opt(1, 1, 1).unwrap();
        for days in EPOCH_DAY_MIN..=EPOCH_DAY_MAX {
            let actual = epoch_days_to_date(days).unwrap();
            assert_eq!(
                actual,
                (expected.year(), expected.month(), expected.day()),
                "day offset {days}"
            );
            if let Some(next) = expected.succ_opt() {
                expected = next;
            }
        }
    }

    #[test]
    fn test_naive_date() {
        let date = epoch_days_to_naive_date(18_262).unwrap();
        assert_eq!(date, NaiveDate::from_ymd_opt(2020, 1, 1).unwrap());
    }
}
