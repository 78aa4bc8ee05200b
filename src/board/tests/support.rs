//! Shared fixtures for board duplication tests.

use std::sync::Arc;

use crate::board::{
    adapters::memory::InMemoryBoard,
    domain::{
        ColumnId, ProjectId, RecurrenceBasedate, RecurrenceStatus, RecurrenceTimeframe,
        RecurrenceTrigger, TaskId, TaskRecord,
    },
    ports::EventDispatcher,
    services::{DuplicationPorts, TaskDuplicationService},
};
use chrono::{DateTime, Local, Utc};
use mockable::{Clock, DefaultClock};

/// Clock pinned to a single instant for deterministic due-date tests.
#[derive(Debug, Clone)]
pub struct FixedClock(pub DateTime<Utc>);

impl Clock for FixedClock {
    fn local(&self) -> DateTime<Local> {
        self.0.with_timezone(&Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        self.0
    }
}

/// Parses an RFC 3339 timestamp for test data.
pub fn ts(value: &str) -> DateTime<Utc> {
    value.parse().expect("valid RFC 3339 timestamp")
}

/// Builds a service wired entirely to the given in-memory board.
pub fn board_service(board: &Arc<InMemoryBoard>) -> TaskDuplicationService<DefaultClock> {
    TaskDuplicationService::new(
        DuplicationPorts::from_store(board, Arc::clone(board) as Arc<dyn EventDispatcher>),
        Arc::new(DefaultClock),
    )
}

/// Builds a service on the given board with a pinned clock.
pub fn board_service_at(
    board: &Arc<InMemoryBoard>,
    now: DateTime<Utc>,
) -> TaskDuplicationService<FixedClock> {
    TaskDuplicationService::new(
        DuplicationPorts::from_store(board, Arc::clone(board) as Arc<dyn EventDispatcher>),
        Arc::new(FixedClock(now)),
    )
}

/// Returns a fully-populated task record for seeding boards.
///
/// The identifier is a placeholder; `InMemoryBoard::insert_task` assigns a
/// fresh one.
pub fn task_fixture(project_id: ProjectId, column_id: ColumnId) -> TaskRecord {
    TaskRecord {
        id: TaskId::new(0),
        title: "Fix parser edge case".to_owned(),
        description: Some("Handle escaped delimiters in quoted fields".to_owned()),
        date_due: Some(ts("2026-03-10T00:00:00Z")),
        color_id: "yellow".to_owned(),
        project_id,
        column_id,
        swimlane_id: None,
        category_id: None,
        owner_id: None,
        score: 4,
        time_estimated: 2.5,
        position: 1,
        is_active: true,
        recurrence_status: RecurrenceStatus::None,
        recurrence_trigger: RecurrenceTrigger::FirstColumn,
        recurrence_factor: 0,
        recurrence_timeframe: RecurrenceTimeframe::Days,
        recurrence_basedate: RecurrenceBasedate::DueDate,
        recurrence_parent: None,
        recurrence_child: None,
    }
}
