//! Task duplication, recurring-task spawning, and cross-project migration.
//!
//! The service copies the duplicated field set from a source task, adjusts
//! recurrence due dates, remaps project-scoped references against a
//! destination project, and delegates all persistence to the port
//! collaborators. Multi-step writes (spawn child then link parent, update
//! then dispatch) are not wrapped in a transaction here; serialising
//! concurrent requests is the persistence layer's responsibility.

use crate::board::{
    domain::{
        CategoryId, ColumnId, ProjectId, RecurrenceBasedate, RecurrenceStatus,
        RecurrenceTimeframe, SwimlaneId, TaskChanges, TaskDraft, TaskId, UserId,
    },
    ports::{
        CategoryResolver, ColumnResolver, EVENT_TASK_MOVE_PROJECT, EventDispatcher,
        PermissionChecker, StoreError, SubtaskDuplicator, SwimlaneResolver, TaskCreator,
        TaskLookup, TaskMovedProject, TaskUpdater,
    },
};
use chrono::{DateTime, Days, Months, Utc};
use mockable::Clock;
use std::sync::Arc;
use thiserror::Error;

/// Service-level errors for duplication and migration operations.
#[derive(Debug, Error)]
pub enum DuplicationError {
    /// The source task does not exist.
    #[error("task not found: {0}")]
    TaskNotFound(TaskId),

    /// A store collaborator failed.
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Result type for duplication service operations.
pub type DuplicationResult<T> = Result<T, DuplicationError>;

/// Collaborator bundle consumed by [`TaskDuplicationService`].
///
/// Each field is an independent port so tests can substitute a single
/// collaborator; [`DuplicationPorts::from_store`] wires every store-side
/// port from one adapter.
#[derive(Clone)]
pub struct DuplicationPorts {
    /// Task read access.
    pub lookup: Arc<dyn TaskLookup>,
    /// Task creation.
    pub creator: Arc<dyn TaskCreator>,
    /// Task update.
    pub updater: Arc<dyn TaskUpdater>,
    /// Best-effort subtask duplication.
    pub subtasks: Arc<dyn SubtaskDuplicator>,
    /// Category name resolution.
    pub categories: Arc<dyn CategoryResolver>,
    /// Swimlane name resolution.
    pub swimlanes: Arc<dyn SwimlaneResolver>,
    /// Column title resolution.
    pub columns: Arc<dyn ColumnResolver>,
    /// Project membership checks.
    pub permissions: Arc<dyn PermissionChecker>,
    /// Fire-and-forget event dispatch.
    pub events: Arc<dyn EventDispatcher>,
}

impl DuplicationPorts {
    /// Wires every store-side port from a single adapter.
    #[must_use]
    pub fn from_store<S>(store: &Arc<S>, events: Arc<dyn EventDispatcher>) -> Self
    where
        S: TaskLookup
            + TaskCreator
            + TaskUpdater
            + SubtaskDuplicator
            + CategoryResolver
            + SwimlaneResolver
            + ColumnResolver
            + PermissionChecker
            + 'static,
    {
        Self {
            lookup: Arc::clone(store) as Arc<dyn TaskLookup>,
            creator: Arc::clone(store) as Arc<dyn TaskCreator>,
            updater: Arc::clone(store) as Arc<dyn TaskUpdater>,
            subtasks: Arc::clone(store) as Arc<dyn SubtaskDuplicator>,
            categories: Arc::clone(store) as Arc<dyn CategoryResolver>,
            swimlanes: Arc::clone(store) as Arc<dyn SwimlaneResolver>,
            columns: Arc::clone(store) as Arc<dyn ColumnResolver>,
            permissions: Arc::clone(store) as Arc<dyn PermissionChecker>,
            events,
        }
    }
}

/// Optional destination overrides for cross-project operations.
///
/// A field left unset means "keep the source task's value, then remap it
/// against the destination project".
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DestinationOverrides {
    swimlane_id: Option<SwimlaneId>,
    column_id: Option<ColumnId>,
    category_id: Option<CategoryId>,
    owner_id: Option<UserId>,
}

impl DestinationOverrides {
    /// Creates an empty override set (keep and remap every source value).
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Overrides the destination swimlane.
    #[must_use]
    pub const fn with_swimlane(mut self, swimlane_id: SwimlaneId) -> Self {
        self.swimlane_id = Some(swimlane_id);
        self
    }

    /// Overrides the destination column.
    #[must_use]
    pub const fn with_column(mut self, column_id: ColumnId) -> Self {
        self.column_id = Some(column_id);
        self
    }

    /// Overrides the destination category.
    #[must_use]
    pub const fn with_category(mut self, category_id: CategoryId) -> Self {
        self.category_id = Some(category_id);
        self
    }

    /// Overrides the destination assignee.
    #[must_use]
    pub const fn with_owner(mut self, owner_id: UserId) -> Self {
        self.owner_id = Some(owner_id);
        self
    }
}

/// Project-scoped reference bag validated against a destination project.
///
/// Built before a cross-project create or update; after
/// [`TaskDuplicationService::check_destination_project_values`] runs, every
/// remaining reference resolves inside `project_id` or has been reset to its
/// empty default.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DestinationValues {
    /// Destination project.
    pub project_id: ProjectId,
    /// Candidate column; never left unresolved.
    pub column_id: ColumnId,
    /// Candidate swimlane, or `None` for the default lane.
    pub swimlane_id: Option<SwimlaneId>,
    /// Candidate category.
    pub category_id: Option<CategoryId>,
    /// Candidate assignee.
    pub owner_id: Option<UserId>,
}

/// Task duplication and cross-project migration service.
#[derive(Clone)]
pub struct TaskDuplicationService<C>
where
    C: Clock + Send + Sync,
{
    ports: DuplicationPorts,
    clock: Arc<C>,
}

impl<C> TaskDuplicationService<C>
where
    C: Clock + Send + Sync,
{
    /// Creates a new duplication service.
    #[must_use]
    pub const fn new(ports: DuplicationPorts, clock: Arc<C>) -> Self {
        Self { ports, clock }
    }

    /// Duplicates a task inside its own project.
    ///
    /// Copies the duplicated field set verbatim, creates the new task, then
    /// copies subtasks best-effort (a subtask failure is logged, never
    /// surfaced).
    ///
    /// # Errors
    ///
    /// Returns [`DuplicationError::TaskNotFound`] when the source task does
    /// not exist, or [`DuplicationError::Store`] when creation fails.
    pub async fn duplicate(&self, task_id: TaskId) -> DuplicationResult<TaskId> {
        let draft = self.copy_fields(task_id).await?;
        self.save(task_id, &draft).await
    }

    /// Spawns the next instance of a recurring task.
    ///
    /// Returns `Ok(None)` without side effects unless the task's recurrence
    /// status is [`RecurrenceStatus::Pending`]. On success the child carries
    /// a parent link, sits in the project's first column with a recalculated
    /// due date, and the parent is marked processed with a child link.
    ///
    /// Returns the child id only when both the creation and the parent
    /// update succeed. When the parent update affects no row the child has
    /// already been created and remains orphaned from the recurrence chain;
    /// that partial state is observable and deliberate.
    ///
    /// # Errors
    ///
    /// Returns [`DuplicationError::TaskNotFound`] when the source task does
    /// not exist, or [`DuplicationError::Store`] when a collaborator fails.
    pub async fn duplicate_recurring_task(
        &self,
        task_id: TaskId,
    ) -> DuplicationResult<Option<TaskId>> {
        let task = self
            .ports
            .lookup
            .find_by_id(task_id)
            .await?
            .ok_or(DuplicationError::TaskNotFound(task_id))?;
        if task.recurrence_status != RecurrenceStatus::Pending {
            return Ok(None);
        }

        let mut draft = TaskDraft::from_task(&task);
        draft.recurrence_parent = Some(task_id);
        draft.column_id = self.ports.columns.first_column_id(draft.project_id).await?;
        self.calculate_recurring_task_due_date(&mut draft);

        let child = self.save(task_id, &draft).await?;
        let changes = TaskChanges {
            recurrence_status: Some(RecurrenceStatus::Processed),
            recurrence_child: Some(Some(child)),
            ..TaskChanges::default()
        };
        if self.ports.updater.update(task_id, &changes).await? {
            Ok(Some(child))
        } else {
            Ok(None)
        }
    }

    /// Duplicates a task into another project.
    ///
    /// The destination project replaces the source project unconditionally.
    /// Column, swimlane, category, and assignee keep the source values
    /// unless overridden, and are then remapped against the destination via
    /// [`Self::check_destination_project_values`]. Subtasks are copied
    /// best-effort after creation.
    ///
    /// # Errors
    ///
    /// Returns [`DuplicationError::TaskNotFound`] when the source task does
    /// not exist, or [`DuplicationError::Store`] when a collaborator fails.
    pub async fn duplicate_to_project(
        &self,
        task_id: TaskId,
        project_id: ProjectId,
        overrides: &DestinationOverrides,
    ) -> DuplicationResult<TaskId> {
        let mut draft = self.copy_fields(task_id).await?;
        draft.project_id = project_id;
        if let Some(column_id) = overrides.column_id {
            draft.column_id = column_id;
        }
        if let Some(swimlane_id) = overrides.swimlane_id {
            draft.swimlane_id = Some(swimlane_id);
        }
        if let Some(category_id) = overrides.category_id {
            draft.category_id = Some(category_id);
        }
        if let Some(owner_id) = overrides.owner_id {
            draft.owner_id = Some(owner_id);
        }

        let mut values = DestinationValues {
            project_id,
            column_id: draft.column_id,
            swimlane_id: draft.swimlane_id,
            category_id: draft.category_id,
            owner_id: draft.owner_id,
        };
        self.check_destination_project_values(&mut values).await?;
        draft.column_id = values.column_id;
        draft.swimlane_id = values.swimlane_id;
        draft.category_id = values.category_id;
        draft.owner_id = values.owner_id;

        self.save(task_id, &draft).await
    }

    /// Moves a task to another project in place.
    ///
    /// The task keeps its identifier and is reactivated if archived. Column,
    /// swimlane, category, and assignee default to the task's current values
    /// unless overridden, then get remapped against the destination. The
    /// task is appended to the end of the destination column. When the
    /// update affects a row, a [`EVENT_TASK_MOVE_PROJECT`] event carrying
    /// the merged pre/post record is dispatched.
    ///
    /// Returns `Ok(true)` even when the underlying update affected no row;
    /// the return value has never reflected update success and callers rely
    /// on that.
    ///
    /// # Errors
    ///
    /// Returns [`DuplicationError::TaskNotFound`] when the task does not
    /// exist, or [`DuplicationError::Store`] when a collaborator fails.
    pub async fn move_to_project(
        &self,
        task_id: TaskId,
        project_id: ProjectId,
        overrides: &DestinationOverrides,
    ) -> DuplicationResult<bool> {
        let task = self
            .ports
            .lookup
            .find_by_id(task_id)
            .await?
            .ok_or(DuplicationError::TaskNotFound(task_id))?;

        let mut values = DestinationValues {
            project_id,
            column_id: overrides.column_id.unwrap_or(task.column_id),
            swimlane_id: overrides.swimlane_id.or(task.swimlane_id),
            category_id: overrides.category_id.or(task.category_id),
            owner_id: overrides.owner_id.or(task.owner_id),
        };
        self.check_destination_project_values(&mut values).await?;

        let position = self
            .ports
            .lookup
            .count_by_column(project_id, values.column_id)
            .await?
            + 1;
        let changes = TaskChanges {
            is_active: Some(true),
            project_id: Some(project_id),
            column_id: Some(values.column_id),
            swimlane_id: Some(values.swimlane_id),
            category_id: Some(values.category_id),
            owner_id: Some(values.owner_id),
            position: Some(position),
            ..TaskChanges::default()
        };

        if self.ports.updater.update(task_id, &changes).await? {
            let payload = TaskMovedProject {
                task_id,
                task: task.merged(&changes),
            };
            self.ports
                .events
                .dispatch(EVENT_TASK_MOVE_PROJECT, payload)
                .await;
        }
        Ok(true)
    }

    /// Validates and remaps project-scoped references in place.
    ///
    /// - The assignee is cleared when not permitted on the destination.
    /// - Category and swimlane are resolved by name in the destination and
    ///   cleared when unmatched; nothing is created.
    /// - The column is resolved by title in the destination, falling back to
    ///   the destination's first column only after the title lookup fails.
    ///
    /// # Errors
    ///
    /// Returns [`DuplicationError::Store`] when a resolver fails or the
    /// destination project has no columns at all.
    pub async fn check_destination_project_values(
        &self,
        values: &mut DestinationValues,
    ) -> DuplicationResult<()> {
        if let Some(owner_id) = values.owner_id
            && !self
                .ports
                .permissions
                .is_user_allowed(values.project_id, owner_id)
                .await?
        {
            values.owner_id = None;
        }

        if let Some(category_id) = values.category_id {
            values.category_id = match self.ports.categories.name_by_id(category_id).await? {
                Some(name) => {
                    self.ports
                        .categories
                        .id_by_name(values.project_id, &name)
                        .await?
                }
                None => None,
            };
        }

        if let Some(swimlane_id) = values.swimlane_id {
            values.swimlane_id = match self.ports.swimlanes.name_by_id(swimlane_id).await? {
                Some(name) => {
                    self.ports
                        .swimlanes
                        .id_by_name(values.project_id, &name)
                        .await?
                }
                None => None,
            };
        }

        let resolved_column = match self.ports.columns.title_by_id(values.column_id).await? {
            Some(title) => {
                self.ports
                    .columns
                    .id_by_title(values.project_id, &title)
                    .await?
            }
            None => None,
        };
        values.column_id = match resolved_column {
            Some(column_id) => column_id,
            None => self.ports.columns.first_column_id(values.project_id).await?,
        };

        Ok(())
    }

    /// Recalculates the due date of a recurring task draft in place.
    ///
    /// No-op without a due date or with a zero recurrence factor. With
    /// [`RecurrenceBasedate::TriggerDate`] the interval is computed from the
    /// current clock time instead of the stored due date. The interval
    /// magnitude is the absolute recurrence factor in the draft's timeframe
    /// (years shift by twelve months per unit); the sign selects the
    /// direction. Month and year shifts follow chrono's end-of-month
    /// clamping. A shift past the representable date range leaves the base
    /// date in place.
    pub fn calculate_recurring_task_due_date(&self, values: &mut TaskDraft) {
        let Some(due_date) = values.date_due else {
            return;
        };
        if values.recurrence_factor == 0 {
            return;
        }

        let base = if values.recurrence_basedate == RecurrenceBasedate::TriggerDate {
            self.clock.utc()
        } else {
            due_date
        };
        let magnitude = values.recurrence_factor.unsigned_abs();
        let forward = values.recurrence_factor > 0;
        let shifted = match values.recurrence_timeframe {
            RecurrenceTimeframe::Days => {
                shift_days(base, Days::new(u64::from(magnitude)), forward)
            }
            RecurrenceTimeframe::Months => shift_months(base, Months::new(magnitude), forward),
            RecurrenceTimeframe::Years => {
                shift_months(base, Months::new(magnitude.saturating_mul(12)), forward)
            }
        };
        values.date_due = Some(shifted.unwrap_or(base));
    }

    /// Reads the source task and projects it down to the duplicated fields.
    async fn copy_fields(&self, task_id: TaskId) -> DuplicationResult<TaskDraft> {
        let task = self
            .ports
            .lookup
            .find_by_id(task_id)
            .await?
            .ok_or(DuplicationError::TaskNotFound(task_id))?;
        Ok(TaskDraft::from_task(&task))
    }

    /// Creates the new task, then copies subtasks best-effort.
    async fn save(&self, source: TaskId, draft: &TaskDraft) -> DuplicationResult<TaskId> {
        let destination = self.ports.creator.create(draft).await?;
        if let Err(err) = self.ports.subtasks.duplicate(source, destination).await {
            tracing::warn!(
                "subtask duplication from task {source} to task {destination} failed: {err}"
            );
        }
        Ok(destination)
    }
}

fn shift_days(base: DateTime<Utc>, days: Days, forward: bool) -> Option<DateTime<Utc>> {
    if forward {
        base.checked_add_days(days)
    } else {
        base.checked_sub_days(days)
    }
}

fn shift_months(base: DateTime<Utc>, months: Months, forward: bool) -> Option<DateTime<Utc>> {
    if forward {
        base.checked_add_months(months)
    } else {
        base.checked_sub_months(months)
    }
}
