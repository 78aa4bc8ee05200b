//! Diesel row models for board persistence.

use super::schema::{subtasks, tasks};
use crate::board::{
    domain::{
        CategoryId, ColumnId, ProjectId, RecurrenceBasedate, RecurrenceStatus,
        RecurrenceTimeframe, RecurrenceTrigger, SwimlaneId, TaskChanges, TaskDraft, TaskId,
        TaskRecord, UserId,
    },
    ports::{StoreError, StoreResult},
};
use chrono::{DateTime, Utc};
use diesel::prelude::*;

/// Query result row for task records.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = tasks)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct TaskRow {
    /// Task identifier.
    pub id: i64,
    /// Task title.
    pub title: String,
    /// Optional long-form description.
    pub description: Option<String>,
    /// Due date, if set.
    pub date_due: Option<DateTime<Utc>>,
    /// Card colour name.
    pub color_id: String,
    /// Owning project.
    pub project_id: i64,
    /// Board column.
    pub column_id: i64,
    /// Swimlane; `None` selects the project default lane.
    pub swimlane_id: Option<i64>,
    /// Optional category.
    pub category_id: Option<i64>,
    /// Optional assignee.
    pub owner_id: Option<i64>,
    /// Priority score.
    pub score: i32,
    /// Estimated effort in hours.
    pub time_estimated: f64,
    /// One-based position within the column.
    pub position: i32,
    /// Whether the task is open.
    pub is_active: bool,
    /// Recurrence lifecycle status.
    pub recurrence_status: String,
    /// Recurrence trigger event.
    pub recurrence_trigger: String,
    /// Signed recurrence interval count.
    pub recurrence_factor: i32,
    /// Recurrence interval unit.
    pub recurrence_timeframe: String,
    /// Recurrence reference date.
    pub recurrence_basedate: String,
    /// Parent task for spawned recurring instances.
    pub recurrence_parent: Option<i64>,
    /// Child task once the recurrence has been processed.
    pub recurrence_child: Option<i64>,
}

/// Insert model for task records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = tasks)]
pub struct NewTaskRow {
    /// Task title.
    pub title: String,
    /// Optional long-form description.
    pub description: Option<String>,
    /// Due date, if set.
    pub date_due: Option<DateTime<Utc>>,
    /// Card colour name.
    pub color_id: String,
    /// Owning project.
    pub project_id: i64,
    /// Board column.
    pub column_id: i64,
    /// Swimlane; `None` selects the project default lane.
    pub swimlane_id: Option<i64>,
    /// Optional category.
    pub category_id: Option<i64>,
    /// Optional assignee.
    pub owner_id: Option<i64>,
    /// Priority score.
    pub score: i32,
    /// Estimated effort in hours.
    pub time_estimated: f64,
    /// One-based position within the column.
    pub position: i32,
    /// Whether the task is open.
    pub is_active: bool,
    /// Recurrence lifecycle status.
    pub recurrence_status: String,
    /// Recurrence trigger event.
    pub recurrence_trigger: String,
    /// Signed recurrence interval count.
    pub recurrence_factor: i32,
    /// Recurrence interval unit.
    pub recurrence_timeframe: String,
    /// Recurrence reference date.
    pub recurrence_basedate: String,
    /// Parent task for spawned recurring instances.
    pub recurrence_parent: Option<i64>,
    /// Child task once the recurrence has been processed.
    pub recurrence_child: Option<i64>,
}

/// Sparse update model for task records.
///
/// Outer `None` skips the column; inner `None` writes SQL `NULL`.
#[derive(Debug, Clone, Default, AsChangeset)]
#[diesel(table_name = tasks)]
pub struct TaskChangesRow {
    /// Reactivation flag.
    pub is_active: Option<bool>,
    /// New owning project.
    pub project_id: Option<i64>,
    /// New board column.
    pub column_id: Option<i64>,
    /// New swimlane.
    pub swimlane_id: Option<Option<i64>>,
    /// New category.
    pub category_id: Option<Option<i64>>,
    /// New assignee.
    pub owner_id: Option<Option<i64>>,
    /// New position within the column.
    pub position: Option<i32>,
    /// New recurrence lifecycle status.
    pub recurrence_status: Option<String>,
    /// New recurrence child link.
    pub recurrence_child: Option<Option<i64>>,
}

/// Query result row for subtask records.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = subtasks)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct SubtaskRow {
    /// Subtask identifier.
    pub id: i64,
    /// Owning task.
    pub task_id: i64,
    /// Subtask title.
    pub title: String,
    /// Optional assignee.
    pub assignee_id: Option<i64>,
    /// Estimated effort in hours.
    pub time_estimated: f64,
    /// Completion state.
    pub status: String,
}

/// Insert model for subtask records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = subtasks)]
pub struct NewSubtaskRow {
    /// Owning task.
    pub task_id: i64,
    /// Subtask title.
    pub title: String,
    /// Optional assignee.
    pub assignee_id: Option<i64>,
    /// Estimated effort in hours.
    pub time_estimated: f64,
    /// Completion state.
    pub status: String,
}

/// Converts a task row into a domain record, parsing the enum columns.
pub fn row_to_task(row: TaskRow) -> StoreResult<TaskRecord> {
    let position = u32::try_from(row.position).map_err(StoreError::backend)?;
    Ok(TaskRecord {
        id: TaskId::new(row.id),
        title: row.title,
        description: row.description,
        date_due: row.date_due,
        color_id: row.color_id,
        project_id: ProjectId::new(row.project_id),
        column_id: ColumnId::new(row.column_id),
        swimlane_id: row.swimlane_id.map(SwimlaneId::new),
        category_id: row.category_id.map(CategoryId::new),
        owner_id: row.owner_id.map(UserId::new),
        score: row.score,
        time_estimated: row.time_estimated,
        position,
        is_active: row.is_active,
        recurrence_status: RecurrenceStatus::try_from(row.recurrence_status.as_str())
            .map_err(StoreError::backend)?,
        recurrence_trigger: RecurrenceTrigger::try_from(row.recurrence_trigger.as_str())
            .map_err(StoreError::backend)?,
        recurrence_factor: row.recurrence_factor,
        recurrence_timeframe: RecurrenceTimeframe::try_from(row.recurrence_timeframe.as_str())
            .map_err(StoreError::backend)?,
        recurrence_basedate: RecurrenceBasedate::try_from(row.recurrence_basedate.as_str())
            .map_err(StoreError::backend)?,
        recurrence_parent: row.recurrence_parent.map(TaskId::new),
        recurrence_child: row.recurrence_child.map(TaskId::new),
    })
}

/// Builds an insert row from a draft and a store-assigned position.
pub fn draft_to_new_row(draft: &TaskDraft, position: i32) -> NewTaskRow {
    NewTaskRow {
        title: draft.title.clone(),
        description: draft.description.clone(),
        date_due: draft.date_due,
        color_id: draft.color_id.clone(),
        project_id: draft.project_id.value(),
        column_id: draft.column_id.value(),
        swimlane_id: draft.swimlane_id.map(SwimlaneId::value),
        category_id: draft.category_id.map(CategoryId::value),
        owner_id: draft.owner_id.map(UserId::value),
        score: draft.score,
        time_estimated: draft.time_estimated,
        position,
        is_active: true,
        recurrence_status: draft.recurrence_status.as_str().to_owned(),
        recurrence_trigger: draft.recurrence_trigger.as_str().to_owned(),
        recurrence_factor: draft.recurrence_factor,
        recurrence_timeframe: draft.recurrence_timeframe.as_str().to_owned(),
        recurrence_basedate: draft.recurrence_basedate.as_str().to_owned(),
        recurrence_parent: draft.recurrence_parent.map(TaskId::value),
        recurrence_child: None,
    }
}

/// Builds a sparse changeset row from domain changes.
pub fn changes_to_row(changes: &TaskChanges) -> StoreResult<TaskChangesRow> {
    let position = match changes.position {
        Some(value) => Some(i32::try_from(value).map_err(StoreError::backend)?),
        None => None,
    };
    Ok(TaskChangesRow {
        is_active: changes.is_active,
        project_id: changes.project_id.map(ProjectId::value),
        column_id: changes.column_id.map(ColumnId::value),
        swimlane_id: changes
            .swimlane_id
            .map(|swimlane| swimlane.map(SwimlaneId::value)),
        category_id: changes
            .category_id
            .map(|category| category.map(CategoryId::value)),
        owner_id: changes.owner_id.map(|owner| owner.map(UserId::value)),
        position,
        recurrence_status: changes
            .recurrence_status
            .map(|status| status.as_str().to_owned()),
        recurrence_child: changes
            .recurrence_child
            .map(|child| child.map(TaskId::value)),
    })
}
