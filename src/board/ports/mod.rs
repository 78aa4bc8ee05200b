//! Port contracts for task duplication and migration.
//!
//! Ports define infrastructure-agnostic interfaces used by board services.

pub mod directory;
pub mod events;
pub mod store;

pub use directory::{CategoryResolver, ColumnResolver, PermissionChecker, SwimlaneResolver};
pub use events::{EVENT_TASK_MOVE_PROJECT, EventDispatcher, TaskMovedProject};
pub use store::{
    StoreError, StoreResult, SubtaskDuplicator, TaskCreator, TaskLookup, TaskUpdater,
};
