//! Store ports for task lookup, creation, update, and subtask duplication.

use crate::board::domain::{ColumnId, ProjectId, TaskChanges, TaskDraft, TaskId, TaskRecord};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for store port operations.
pub type StoreResult<T> = Result<T, StoreError>;

/// Errors returned by store port implementations.
#[derive(Debug, Clone, Error)]
pub enum StoreError {
    /// The project has no board columns to place a task in.
    #[error("project {0} has no columns")]
    NoColumns(ProjectId),

    /// The store refused the operation (validation failure).
    #[error("store rejected the operation: {0}")]
    Rejected(String),

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Backend(Arc<dyn std::error::Error + Send + Sync>),
}

impl StoreError {
    /// Wraps a persistence error.
    #[must_use]
    pub fn backend(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Backend(Arc::new(err))
    }
}

/// Read access to task records.
#[async_trait]
pub trait TaskLookup: Send + Sync {
    /// Finds a task by identifier.
    ///
    /// Returns `None` when the task does not exist.
    async fn find_by_id(&self, id: TaskId) -> StoreResult<Option<TaskRecord>>;

    /// Counts the tasks currently sitting in a column of a project.
    async fn count_by_column(
        &self,
        project_id: ProjectId,
        column_id: ColumnId,
    ) -> StoreResult<u32>;
}

/// Task creation contract.
#[async_trait]
pub trait TaskCreator: Send + Sync {
    /// Inserts a new task from the draft values and returns its identifier.
    ///
    /// The implementation assigns the position (end of the destination
    /// column) and activates the task.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Rejected`] when the draft fails validation.
    async fn create(&self, draft: &TaskDraft) -> StoreResult<TaskId>;
}

/// Task update contract.
#[async_trait]
pub trait TaskUpdater: Send + Sync {
    /// Applies the sparse change set to an existing task.
    ///
    /// Returns `true` iff a row was affected; updating a missing task yields
    /// `Ok(false)` rather than an error.
    async fn update(&self, id: TaskId, changes: &TaskChanges) -> StoreResult<bool>;
}

/// Best-effort subtask duplication contract.
#[async_trait]
pub trait SubtaskDuplicator: Send + Sync {
    /// Copies the subtasks of `source` onto `destination`.
    ///
    /// Callers treat this as a best-effort side effect; the duplication
    /// service logs and swallows failures instead of propagating them.
    async fn duplicate(&self, source: TaskId, destination: TaskId) -> StoreResult<()>;
}
