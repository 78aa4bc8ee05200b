//! Task records, the duplicated field set, and sparse update values.

use super::{
    CategoryId, ColumnId, ProjectId, RecurrenceBasedate, RecurrenceStatus, RecurrenceTimeframe,
    RecurrenceTrigger, SwimlaneId, TaskId, UserId,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A task field eligible for duplication.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskField {
    /// Task title.
    Title,
    /// Task description.
    Description,
    /// Due date.
    DateDue,
    /// Card colour.
    ColorId,
    /// Owning project.
    ProjectId,
    /// Board column.
    ColumnId,
    /// Assigned user.
    OwnerId,
    /// Priority score.
    Score,
    /// Task category.
    CategoryId,
    /// Estimated effort.
    TimeEstimated,
    /// Swimlane.
    SwimlaneId,
    /// Recurrence lifecycle status.
    RecurrenceStatus,
    /// Recurrence trigger event.
    RecurrenceTrigger,
    /// Signed recurrence interval count.
    RecurrenceFactor,
    /// Recurrence interval unit.
    RecurrenceTimeframe,
    /// Recurrence reference date.
    RecurrenceBasedate,
}

impl TaskField {
    /// Returns the storage column name of the field.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Title => "title",
            Self::Description => "description",
            Self::DateDue => "date_due",
            Self::ColorId => "color_id",
            Self::ProjectId => "project_id",
            Self::ColumnId => "column_id",
            Self::OwnerId => "owner_id",
            Self::Score => "score",
            Self::CategoryId => "category_id",
            Self::TimeEstimated => "time_estimated",
            Self::SwimlaneId => "swimlane_id",
            Self::RecurrenceStatus => "recurrence_status",
            Self::RecurrenceTrigger => "recurrence_trigger",
            Self::RecurrenceFactor => "recurrence_factor",
            Self::RecurrenceTimeframe => "recurrence_timeframe",
            Self::RecurrenceBasedate => "recurrence_basedate",
        }
    }
}

/// The fixed set of fields copied verbatim when a task is duplicated.
///
/// [`TaskDraft::from_task`] copies exactly these fields; duplication flows
/// may then override individual entries (destination project, remapped
/// references, recalculated due date) before the draft is persisted.
pub const DUPLICATED_FIELDS: [TaskField; 16] = [
    TaskField::Title,
    TaskField::Description,
    TaskField::DateDue,
    TaskField::ColorId,
    TaskField::ProjectId,
    TaskField::ColumnId,
    TaskField::OwnerId,
    TaskField::Score,
    TaskField::CategoryId,
    TaskField::TimeEstimated,
    TaskField::SwimlaneId,
    TaskField::RecurrenceStatus,
    TaskField::RecurrenceTrigger,
    TaskField::RecurrenceFactor,
    TaskField::RecurrenceTimeframe,
    TaskField::RecurrenceBasedate,
];

/// A persisted board task.
///
/// `swimlane_id` of `None` denotes the project's default swimlane, matching
/// the storage convention where the default lane has no record of its own.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaskRecord {
    /// Task identifier.
    pub id: TaskId,
    /// Task title.
    pub title: String,
    /// Optional long-form description.
    pub description: Option<String>,
    /// Due date, if one is set.
    pub date_due: Option<DateTime<Utc>>,
    /// Card colour name.
    pub color_id: String,
    /// Owning project.
    pub project_id: ProjectId,
    /// Board column the task sits in.
    pub column_id: ColumnId,
    /// Swimlane, or `None` for the project default lane.
    pub swimlane_id: Option<SwimlaneId>,
    /// Category, if assigned.
    pub category_id: Option<CategoryId>,
    /// Assigned user, if any.
    pub owner_id: Option<UserId>,
    /// Priority score.
    pub score: i32,
    /// Estimated effort in hours.
    pub time_estimated: f64,
    /// One-based position within the column.
    pub position: u32,
    /// Whether the task is open (`false` once archived).
    pub is_active: bool,
    /// Recurrence lifecycle status.
    pub recurrence_status: RecurrenceStatus,
    /// Board event that fires the recurrence.
    pub recurrence_trigger: RecurrenceTrigger,
    /// Signed interval count; the sign selects the shift direction.
    pub recurrence_factor: i32,
    /// Calendar unit of the interval.
    pub recurrence_timeframe: RecurrenceTimeframe,
    /// Reference date for the recalculated due date.
    pub recurrence_basedate: RecurrenceBasedate,
    /// Task this one was spawned from, for recurring tasks.
    pub recurrence_parent: Option<TaskId>,
    /// Next instance spawned from this task, once processed.
    pub recurrence_child: Option<TaskId>,
}

impl TaskRecord {
    /// Returns this record overlaid with the given changes.
    ///
    /// Used to build the payload of the move-to-project event, which carries
    /// the pre-move record merged with the applied values.
    #[must_use]
    pub fn merged(&self, changes: &TaskChanges) -> Self {
        let mut merged = self.clone();
        if let Some(is_active) = changes.is_active {
            merged.is_active = is_active;
        }
        if let Some(project_id) = changes.project_id {
            merged.project_id = project_id;
        }
        if let Some(column_id) = changes.column_id {
            merged.column_id = column_id;
        }
        if let Some(swimlane_id) = changes.swimlane_id {
            merged.swimlane_id = swimlane_id;
        }
        if let Some(category_id) = changes.category_id {
            merged.category_id = category_id;
        }
        if let Some(owner_id) = changes.owner_id {
            merged.owner_id = owner_id;
        }
        if let Some(position) = changes.position {
            merged.position = position;
        }
        if let Some(recurrence_status) = changes.recurrence_status {
            merged.recurrence_status = recurrence_status;
        }
        if let Some(recurrence_child) = changes.recurrence_child {
            merged.recurrence_child = recurrence_child;
        }
        merged
    }
}

/// Values handed to the task-creation collaborator.
///
/// A draft starts as a verbatim copy of [`DUPLICATED_FIELDS`] from a source
/// task. Position and activation are assigned by the creation collaborator,
/// not carried here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaskDraft {
    /// Task title.
    pub title: String,
    /// Optional long-form description.
    pub description: Option<String>,
    /// Due date, if one is set.
    pub date_due: Option<DateTime<Utc>>,
    /// Card colour name.
    pub color_id: String,
    /// Destination project.
    pub project_id: ProjectId,
    /// Destination column.
    pub column_id: ColumnId,
    /// Destination swimlane, or `None` for the default lane.
    pub swimlane_id: Option<SwimlaneId>,
    /// Category, if assigned.
    pub category_id: Option<CategoryId>,
    /// Assigned user, if any.
    pub owner_id: Option<UserId>,
    /// Priority score.
    pub score: i32,
    /// Estimated effort in hours.
    pub time_estimated: f64,
    /// Recurrence lifecycle status.
    pub recurrence_status: RecurrenceStatus,
    /// Board event that fires the recurrence.
    pub recurrence_trigger: RecurrenceTrigger,
    /// Signed interval count.
    pub recurrence_factor: i32,
    /// Calendar unit of the interval.
    pub recurrence_timeframe: RecurrenceTimeframe,
    /// Reference date for the recalculated due date.
    pub recurrence_basedate: RecurrenceBasedate,
    /// Parent link set when spawning a recurring instance.
    pub recurrence_parent: Option<TaskId>,
}

impl TaskDraft {
    /// Projects a source task down to the duplicated field set.
    #[must_use]
    pub fn from_task(task: &TaskRecord) -> Self {
        Self {
            title: task.title.clone(),
            description: task.description.clone(),
            date_due: task.date_due,
            color_id: task.color_id.clone(),
            project_id: task.project_id,
            column_id: task.column_id,
            swimlane_id: task.swimlane_id,
            category_id: task.category_id,
            owner_id: task.owner_id,
            score: task.score,
            time_estimated: task.time_estimated,
            recurrence_status: task.recurrence_status,
            recurrence_trigger: task.recurrence_trigger,
            recurrence_factor: task.recurrence_factor,
            recurrence_timeframe: task.recurrence_timeframe,
            recurrence_basedate: task.recurrence_basedate,
            recurrence_parent: None,
        }
    }
}

/// Sparse update set handed to the task-update collaborator.
///
/// Outer `None` leaves a column untouched; for nullable references the inner
/// `Option` distinguishes "set to a value" from "clear".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskChanges {
    /// Reactivation flag; moving a task always forces it back to `true`.
    pub is_active: Option<bool>,
    /// New owning project.
    pub project_id: Option<ProjectId>,
    /// New board column.
    pub column_id: Option<ColumnId>,
    /// New swimlane (`Some(None)` selects the default lane).
    pub swimlane_id: Option<Option<SwimlaneId>>,
    /// New category (`Some(None)` clears it).
    pub category_id: Option<Option<CategoryId>>,
    /// New assignee (`Some(None)` unassigns).
    pub owner_id: Option<Option<UserId>>,
    /// New one-based position within the column.
    pub position: Option<u32>,
    /// New recurrence lifecycle status.
    pub recurrence_status: Option<RecurrenceStatus>,
    /// New recurrence child link (`Some(None)` clears it).
    pub recurrence_child: Option<Option<TaskId>>,
}
