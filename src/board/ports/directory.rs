//! Directory ports resolving project-scoped references by name.
//!
//! Categories and swimlanes carry project-scoped names; columns carry
//! project-scoped titles. Cross-project remapping resolves the source
//! entity's name and looks it up again in the destination project.

use super::StoreResult;
use crate::board::domain::{CategoryId, ColumnId, ProjectId, SwimlaneId, UserId};
use async_trait::async_trait;

/// Category name resolution.
#[async_trait]
pub trait CategoryResolver: Send + Sync {
    /// Returns the category's name, or `None` when the category is missing.
    async fn name_by_id(&self, id: CategoryId) -> StoreResult<Option<String>>;

    /// Finds a category by name within a project.
    async fn id_by_name(&self, project_id: ProjectId, name: &str)
    -> StoreResult<Option<CategoryId>>;
}

/// Swimlane name resolution.
#[async_trait]
pub trait SwimlaneResolver: Send + Sync {
    /// Returns the swimlane's name, or `None` when the swimlane is missing.
    async fn name_by_id(&self, id: SwimlaneId) -> StoreResult<Option<String>>;

    /// Finds a swimlane by name within a project.
    async fn id_by_name(&self, project_id: ProjectId, name: &str)
    -> StoreResult<Option<SwimlaneId>>;
}

/// Column title resolution.
#[async_trait]
pub trait ColumnResolver: Send + Sync {
    /// Returns the column's title, or `None` when the column is missing.
    async fn title_by_id(&self, id: ColumnId) -> StoreResult<Option<String>>;

    /// Finds a column by title within a project.
    async fn id_by_title(&self, project_id: ProjectId, title: &str)
    -> StoreResult<Option<ColumnId>>;

    /// Returns the leftmost column of a project.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::NoColumns`](super::StoreError::NoColumns) when
    /// the project has no columns.
    async fn first_column_id(&self, project_id: ProjectId) -> StoreResult<ColumnId>;
}

/// Project membership checks.
#[async_trait]
pub trait PermissionChecker: Send + Sync {
    /// Returns whether the user may be assigned tasks in the project.
    async fn is_user_allowed(&self, project_id: ProjectId, user_id: UserId) -> StoreResult<bool>;
}
