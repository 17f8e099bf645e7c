//! age.rs
//!
//! Calendar-aware age arithmetic: the difference between a birth date and a
//! reference date, broken down into whole years, months and days, plus the
//! total day count.
//!
//! Chrono does not provide a built-in year/month/day diff (unlike Python’s
//! relativedelta), so we implement the borrowing rules manually.
//!
//! This logic correctly handles:
//!   • the birthday not yet having occurred in the reference year
//!   • day underflow (borrowing from the months preceding the reference,
//!     twice when the birth day outruns a short February)
//!   • leap years
//!   • varying month lengths

use crate::error::AgeError;
use crate::person::Person;
use chrono::{Datelike, NaiveDate};
use serde::Serialize;
use std::fmt;

/// Age broken down into calendar components. Invariants for any
/// `birth <= reference` pair: `months` is in `0..=11` and `days` is
/// strictly less than the length of the borrowed month.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Age {
    pub years: i32,
    pub months: u32,
    pub days: u32,
    pub total_days: i64,
}

impl Age {
    /// Computes the age of someone born on `birth` as of `reference`.
    ///
    /// Total for every `birth <= reference`; validation happens upstream
    /// in [`Person::new`], so this never fails.
    pub fn between(birth: NaiveDate, reference: NaiveDate) -> Age {
        debug_assert!(birth <= reference);

        let mut years = reference.year() - birth.year();

        // The birthday has not come around yet this year.
        if (reference.month(), reference.day()) < (birth.month(), birth.day()) {
            years -= 1;
        }

        let mut months = reference.month() as i32 - birth.month() as i32;
        let mut days = reference.day() as i32 - birth.day() as i32;

        // Fix day underflow by borrowing from the months preceding
        // `reference`. One borrow usually suffices, but a birth day longer
        // than the preceding month (a 31st against February) needs a second
        // to land in `0..days_in_month(borrowed month)`.
        let (mut year, mut month) = (reference.year(), reference.month());
        while days < 0 {
            if month == 1 {
                year -= 1;
                month = 12;
            } else {
                month -= 1;
            }
            months -= 1;
            days += days_in_month(year, month) as i32;
        }

        // Fix month underflow
        if months < 0 {
            months += 12;
        }

        // Independent of the breakdown above: a plain day-count on the
        // calendar line.
        let total_days = (reference - birth).num_days();

        Age {
            years,
            months: months as u32,
            days: days as u32,
            total_days,
        }
    }
}

impl fmt::Display for Age {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} year{}, {} month{} and {} day{}",
            self.years,
            plural(self.years as i64),
            self.months,
            plural(self.months as i64),
            self.days,
            plural(self.days as i64)
        )
    }
}

fn plural(n: i64) -> &'static str {
    if n == 1 { "" } else { "s" }
}

/// Validates the inputs and computes the age in one call: trims and checks
/// the name, rejects future birth dates, then runs the breakdown.
pub fn compute_age(
    name: &str,
    birth: NaiveDate,
    reference: NaiveDate,
) -> Result<Age, AgeError> {
    let person = Person::new(name, birth, reference)?;
    Ok(Age::between(person.birth_date, reference))
}

/// Returns number of days in a given year/month (handles leap years)
pub fn days_in_month(year: i32, month: u32) -> u32 {
    match month {
        1 | 3 | 5 | 7 | 8 | 10 | 12 => 31,
        4 | 6 | 9 | 11 => 30,
        2 => {
            if is_leap_year(year) {
                29
            } else {
                28
            }
        }
        _ => 30, // should never occur but keeps function total
    }
}

/// Leap-year rule (Gregorian):
///   - divisible by 4 → leap year
///   - except divisible by 100 → not leap year
///   - except divisible by 400 → leap year
fn is_leap_year(year: i32) -> bool {
    (year % 4 == 0 && year % 100 != 0) || year % 400 == 0
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn same_day_is_all_zeroes() {
        let d = date(1992, 6, 14);
        assert_eq!(
            Age::between(d, d),
            Age {
                years: 0,
                months: 0,
                days: 0,
                total_days: 0
            }
        );
    }

    #[test]
    fn exact_birthday() {
        let age = Age::between(date(1990, 5, 15), date(2024, 5, 15));
        assert_eq!(age.years, 34);
        assert_eq!(age.months, 0);
        assert_eq!(age.days, 0);
        // 34 * 365 plus nine leap days (1992..=2024).
        assert_eq!(age.total_days, 12_419);
    }

    #[test]
    fn leap_day_birth_to_following_february() {
        // Feb 2001 has 28 days, so the day underflow borrows January's 31.
        let age = Age::between(date(2000, 2, 29), date(2001, 2, 28));
        assert_eq!(age.years, 0);
        assert_eq!(age.months, 11);
        assert_eq!(age.days, 30);
        assert_eq!(age.total_days, 365);
    }

    #[test]
    fn new_year_wraps_borrow_to_december() {
        let age = Age::between(date(2000, 12, 31), date(2001, 1, 1));
        assert_eq!((age.years, age.months, age.days), (0, 0, 1));
        assert_eq!(age.total_days, 1);
    }

    #[test]
    fn borrow_continues_past_short_february() {
        // Jan 31 to Mar 1: borrowing February's 28 days alone leaves the day
        // count negative, so the borrow carries on into January.
        let age = Age::between(date(1999, 1, 31), date(1999, 3, 1));
        assert_eq!((age.years, age.months, age.days), (0, 0, 29));
        assert_eq!(age.total_days, 29);

        // Same span across a leap February.
        let age = Age::between(date(2000, 1, 31), date(2000, 3, 1));
        assert_eq!((age.years, age.months, age.days), (0, 0, 30));
        assert_eq!(age.total_days, 30);

        // December birth, so the month underflow fix runs as well.
        let age = Age::between(date(1998, 12, 31), date(1999, 3, 1));
        assert_eq!((age.years, age.months, age.days), (0, 1, 29));
        assert_eq!(age.total_days, 60);
    }

    #[test]
    fn day_before_birthday() {
        let age = Age::between(date(1990, 5, 15), date(2024, 5, 14));
        assert_eq!(age.years, 33);
        assert_eq!(age.months, 11);
        assert_eq!(age.days, 29);
    }

    #[test]
    fn breakdown_bounds_and_monotonicity() {
        // Sweep two years of reference dates, crossing a leap February, and
        // check the invariants plus that the figures never move backwards.
        let birth = date(1999, 1, 31);
        let mut reference = birth;
        let mut prev = Age::between(birth, reference);

        for _ in 0..730 {
            reference = reference.succ_opt().unwrap();
            let age = Age::between(birth, reference);

            assert!(age.months <= 11, "months out of range at {reference}");

            // Replay the borrow to find which month's length bounds `days`.
            let mut deficit = reference.day() as i32 - birth.day() as i32;
            let (mut y, mut m) = (reference.year(), reference.month());
            let mut bound = reference.day();
            while deficit < 0 {
                if m == 1 {
                    y -= 1;
                    m = 12;
                } else {
                    m -= 1;
                }
                bound = days_in_month(y, m);
                deficit += bound as i32;
            }
            assert!(age.days < bound, "days out of range at {reference}");

            assert_eq!(age.total_days, prev.total_days + 1);
            assert!(age.years >= prev.years);
            prev = age;
        }
    }

    #[test]
    fn month_lengths() {
        assert_eq!(days_in_month(2023, 1), 31);
        assert_eq!(days_in_month(2023, 4), 30);
        assert_eq!(days_in_month(2023, 2), 28);
        assert_eq!(days_in_month(2024, 2), 29);
        assert_eq!(days_in_month(1900, 2), 28); // century, not leap
        assert_eq!(days_in_month(2000, 2), 29); // divisible by 400
    }

    #[test]
    fn display_pluralizes() {
        let age = Age::between(date(2000, 2, 28), date(2001, 3, 29));
        assert_eq!(age.to_string(), "1 year, 1 month and 1 day");
        let age = Age::between(date(1990, 5, 15), date(2024, 5, 15));
        assert_eq!(age.to_string(), "34 years, 0 months and 0 days");
    }

    #[test]
    fn pipeline_validates_then_computes() {
        let reference = date(2024, 5, 15);
        let age = compute_age("  Ada  ", date(1990, 5, 15), reference).unwrap();
        assert_eq!(age.years, 34);

        let err = compute_age("Ada", date(2024, 5, 16), reference).unwrap_err();
        assert_eq!(err, AgeError::FutureBirthDate(date(2024, 5, 16)));
    }
}
