//! Recurrence scheduling metadata carried on task records.

use super::ParseRecurrenceError;
use serde::{Deserialize, Serialize};

/// Recurrence lifecycle of a task.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecurrenceStatus {
    /// The task does not recur.
    #[default]
    None,
    /// The task is waiting for its next instance to be spawned.
    Pending,
    /// The next instance has already been created from this task.
    Processed,
}

impl RecurrenceStatus {
    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Pending => "pending",
            Self::Processed => "processed",
        }
    }
}

impl TryFrom<&str> for RecurrenceStatus {
    type Error = ParseRecurrenceError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.trim().to_ascii_lowercase().as_str() {
            "none" => Ok(Self::None),
            "pending" => Ok(Self::Pending),
            "processed" => Ok(Self::Processed),
            _ => Err(ParseRecurrenceError::new("recurrence_status", value)),
        }
    }
}

/// Board event that spawns the next instance of a recurring task.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecurrenceTrigger {
    /// Spawn when the task leaves the first column.
    #[default]
    FirstColumn,
    /// Spawn when the task reaches the last column.
    LastColumn,
    /// Spawn when the task is closed.
    Close,
}

impl RecurrenceTrigger {
    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::FirstColumn => "first_column",
            Self::LastColumn => "last_column",
            Self::Close => "close",
        }
    }
}

impl TryFrom<&str> for RecurrenceTrigger {
    type Error = ParseRecurrenceError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.trim().to_ascii_lowercase().as_str() {
            "first_column" => Ok(Self::FirstColumn),
            "last_column" => Ok(Self::LastColumn),
            "close" => Ok(Self::Close),
            _ => Err(ParseRecurrenceError::new("recurrence_trigger", value)),
        }
    }
}

/// Calendar unit of the recurrence interval.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecurrenceTimeframe {
    /// Interval counted in days.
    #[default]
    Days,
    /// Interval counted in calendar months.
    Months,
    /// Interval counted in calendar years.
    Years,
}

impl RecurrenceTimeframe {
    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Days => "days",
            Self::Months => "months",
            Self::Years => "years",
        }
    }
}

impl TryFrom<&str> for RecurrenceTimeframe {
    type Error = ParseRecurrenceError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.trim().to_ascii_lowercase().as_str() {
            "days" => Ok(Self::Days),
            "months" => Ok(Self::Months),
            "years" => Ok(Self::Years),
            _ => Err(ParseRecurrenceError::new("recurrence_timeframe", value)),
        }
    }
}

/// Reference date from which the next due date is computed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecurrenceBasedate {
    /// Compute the interval from the existing due date.
    #[default]
    DueDate,
    /// Compute the interval from the moment the recurrence fires.
    TriggerDate,
}

impl RecurrenceBasedate {
    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::DueDate => "due_date",
            Self::TriggerDate => "trigger_date",
        }
    }
}

impl TryFrom<&str> for RecurrenceBasedate {
    type Error = ParseRecurrenceError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.trim().to_ascii_lowercase().as_str() {
            "due_date" => Ok(Self::DueDate),
            "trigger_date" => Ok(Self::TriggerDate),
            _ => Err(ParseRecurrenceError::new("recurrence_basedate", value)),
        }
    }
}
