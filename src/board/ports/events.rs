//! Event dispatch port for board notifications.

use crate::board::domain::{TaskId, TaskRecord};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Event name fired after a task is moved to another project.
pub const EVENT_TASK_MOVE_PROJECT: &str = "task.move.project";

/// Payload of [`EVENT_TASK_MOVE_PROJECT`].
///
/// Carries the pre-move task record overlaid with the applied values, plus
/// the task identifier, so subscribers see the post-move state without a
/// second lookup.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaskMovedProject {
    /// The moved task.
    pub task_id: TaskId,
    /// Merged pre/post field set of the task.
    pub task: TaskRecord,
}

/// Fire-and-forget notification dispatch.
///
/// Dispatch has no failure channel; implementations are expected to absorb
/// delivery problems themselves.
#[async_trait]
pub trait EventDispatcher: Send + Sync {
    /// Publishes an event to subscribers.
    async fn dispatch(&self, event_name: &'static str, payload: TaskMovedProject);
}
