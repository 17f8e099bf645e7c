//! person.rs
//!
//! Input validation: turns raw form input (a name string and a birth date)
//! into a `Person` whose invariants hold, or reports exactly what was wrong.
//! All checks live here so the calculation in `age.rs` can stay total.

use crate::error::AgeError;
use chrono::NaiveDate;

/// A validated person: non-empty trimmed name, birth date not in the future.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Person {
    pub name: String,
    pub birth_date: NaiveDate,
}

impl Person {
    /// Validates `name` and `birth_date` against `today` and builds the
    /// entity. `today` is injected rather than read from the clock so the
    /// future-date check is deterministic under test.
    pub fn new(name: &str, birth_date: NaiveDate, today: NaiveDate) -> Result<Person, AgeError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(AgeError::InvalidName);
        }
        if birth_date > today {
            return Err(AgeError::FutureBirthDate(birth_date));
        }
        Ok(Person {
            name: name.to_owned(),
            birth_date,
        })
    }
}

/// Parses a `dd/mm/yyyy` date as the form's date fields produce it (both
/// the birth date and an overridden reference date). Rejects malformed
/// text and triples that name no real calendar day (31/04, 29/02 outside
/// leap years, and so on).
pub fn parse_date(text: &str) -> Result<NaiveDate, AgeError> {
    NaiveDate::parse_from_str(text.trim(), "%d/%m/%Y")
        .map_err(|_| AgeError::InvalidDate(text.trim().to_owned()))
}
