//! Error types for board domain parsing.

use thiserror::Error;

/// Error returned while parsing recurrence enums from persistence.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown {field} value: {value}")]
pub struct ParseRecurrenceError {
    /// Name of the recurrence field being parsed.
    pub field: &'static str,
    /// The rejected raw value.
    pub value: String,
}

impl ParseRecurrenceError {
    /// Creates a parse error for the named recurrence field.
    #[must_use]
    pub fn new(field: &'static str, value: &str) -> Self {
        Self {
            field,
            value: value.to_owned(),
        }
    }
}

/// Error returned while parsing subtask states from persistence.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown subtask status: {0}")]
pub struct ParseSubtaskStatusError(pub String);
