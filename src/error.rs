use chrono::NaiveDate;
use thiserror::Error;

/// Everything that can go wrong between raw form input and a valid `Person`.
/// The calculation itself never fails.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum AgeError {
    #[error("name must not be empty")]
    InvalidName,

    #[error("`{0}` is not a valid calendar date (expected dd/mm/yyyy)")]
    InvalidDate(String),

    #[error("birth date {0} is in the future")]
    FutureBirthDate(NaiveDate),
}
