//! Domain errors

use chrono::NaiveDate;
use thiserror::Error;

/// Errors from the tax calculator.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DomainError {
    /// The passage list spans more than one calendar day. The evaluator
    /// fails fast instead of picking a day.
    #[error("all passages must fall on one calendar day: got {first} and {second}")]
    CrossDayPassages { first: NaiveDate, second: NaiveDate },
}

/// Result type for domain operations
pub type DomainResult<T> = Result<T, DomainError>;
