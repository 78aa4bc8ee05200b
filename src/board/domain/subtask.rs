//! Subtask records attached to board tasks.

use super::{ParseSubtaskStatusError, SubtaskId, TaskId, UserId};
use serde::{Deserialize, Serialize};

/// Completion state of a subtask.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SubtaskStatus {
    /// Work has not started.
    #[default]
    Todo,
    /// Work is underway.
    InProgress,
    /// Work is finished.
    Done,
}

impl SubtaskStatus {
    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Todo => "todo",
            Self::InProgress => "in_progress",
            Self::Done => "done",
        }
    }
}

impl TryFrom<&str> for SubtaskStatus {
    type Error = ParseSubtaskStatusError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.trim().to_ascii_lowercase().as_str() {
            "todo" => Ok(Self::Todo),
            "in_progress" => Ok(Self::InProgress),
            "done" => Ok(Self::Done),
            _ => Err(ParseSubtaskStatusError(value.to_owned())),
        }
    }
}

/// A subtask belonging to a single task.
///
/// Duplicating a task copies its subtasks with the title, assignee, and time
/// estimate preserved and the status reset to [`SubtaskStatus::Todo`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubtaskRecord {
    /// Subtask identifier.
    pub id: SubtaskId,
    /// Owning task.
    pub task_id: TaskId,
    /// Subtask title.
    pub title: String,
    /// Assigned user, if any.
    pub assignee_id: Option<UserId>,
    /// Estimated effort in hours.
    pub time_estimated: f64,
    /// Completion state.
    pub status: SubtaskStatus,
}

impl SubtaskRecord {
    /// Returns a copy of this subtask attached to another task.
    ///
    /// The copy keeps the title, assignee, and estimate while resetting the
    /// status, so the destination task starts with all work outstanding.
    #[must_use]
    pub fn copied_to(&self, id: SubtaskId, task_id: TaskId) -> Self {
        Self {
            id,
            task_id,
            title: self.title.clone(),
            assignee_id: self.assignee_id,
            time_estimated: self.time_estimated,
            status: SubtaskStatus::Todo,
        }
    }
}
