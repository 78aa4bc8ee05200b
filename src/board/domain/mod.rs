//! Domain model for board task duplication and migration.
//!
//! The board domain models task records, the duplicated field set, recurrence
//! scheduling metadata, and subtask records while keeping all infrastructure
//! concerns outside of the domain boundary.

mod error;
mod ids;
mod recurrence;
mod subtask;
mod task;

pub use error::{ParseRecurrenceError, ParseSubtaskStatusError};
pub use ids::{CategoryId, ColumnId, ProjectId, SubtaskId, SwimlaneId, TaskId, UserId};
pub use recurrence::{
    RecurrenceBasedate, RecurrenceStatus, RecurrenceTimeframe, RecurrenceTrigger,
};
pub use subtask::{SubtaskRecord, SubtaskStatus};
pub use task::{DUPLICATED_FIELDS, TaskChanges, TaskDraft, TaskField, TaskRecord};
