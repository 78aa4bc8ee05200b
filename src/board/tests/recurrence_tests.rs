//! Service tests for recurring-task spawning and due-date recalculation.

use std::sync::Arc;

use super::support::{board_service, board_service_at, task_fixture, ts};
use crate::board::{
    adapters::memory::InMemoryBoard,
    domain::{
        ColumnId, ProjectId, RecurrenceBasedate, RecurrenceStatus, RecurrenceTimeframe,
        SubtaskStatus, TaskChanges, TaskDraft, TaskId,
    },
    ports::{EventDispatcher, StoreResult, TaskUpdater},
    services::{DuplicationPorts, TaskDuplicationService},
};
use async_trait::async_trait;
use eyre::Result;
use mockable::DefaultClock;
use rstest::rstest;

const PROJECT: ProjectId = ProjectId::new(101);

/// Updater whose writes never affect a row.
struct FrozenUpdater;

#[async_trait]
impl TaskUpdater for FrozenUpdater {
    async fn update(&self, _id: TaskId, _changes: &TaskChanges) -> StoreResult<bool> {
        Ok(false)
    }
}

fn recurring_draft(
    due: Option<&str>,
    factor: i32,
    timeframe: RecurrenceTimeframe,
    basedate: RecurrenceBasedate,
) -> TaskDraft {
    let mut draft = TaskDraft::from_task(&task_fixture(PROJECT, ColumnId::new(1)));
    draft.date_due = due.map(ts);
    draft.recurrence_factor = factor;
    draft.recurrence_timeframe = timeframe;
    draft.recurrence_basedate = basedate;
    draft
}

#[rstest]
#[case(RecurrenceStatus::None)]
#[case(RecurrenceStatus::Processed)]
#[tokio::test(flavor = "multi_thread")]
async fn non_pending_task_spawns_nothing(#[case] status: RecurrenceStatus) -> Result<()> {
    let board = Arc::new(InMemoryBoard::new());
    let doing = board.add_column(PROJECT, "Doing")?;
    let mut original = task_fixture(PROJECT, doing);
    original.recurrence_status = status;
    original.recurrence_factor = 2;
    let task_id = board.insert_task(original)?;
    let service = board_service(&board);

    let spawned = service.duplicate_recurring_task(task_id).await?;

    assert_eq!(spawned, None);
    assert_eq!(board.task_count()?, 1);
    let task = board.task(task_id)?.expect("task should remain");
    assert_eq!(task.recurrence_status, status);
    assert_eq!(task.recurrence_child, None);
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn pending_task_spawns_linked_child_in_first_column() -> Result<()> {
    let board = Arc::new(InMemoryBoard::new());
    let backlog = board.add_column(PROJECT, "Backlog")?;
    let doing = board.add_column(PROJECT, "Doing")?;
    let mut original = task_fixture(PROJECT, doing);
    original.recurrence_status = RecurrenceStatus::Pending;
    original.recurrence_factor = 2;
    original.recurrence_timeframe = RecurrenceTimeframe::Days;
    original.date_due = Some(ts("2026-03-10T00:00:00Z"));
    let parent_id = board.insert_task(original)?;
    board.add_subtask(parent_id, "Water the plants", None, 0.25, SubtaskStatus::Done)?;
    let service = board_service(&board);

    let child_id = service
        .duplicate_recurring_task(parent_id)
        .await?
        .expect("pending task should spawn a child");

    let child = board.task(child_id)?.expect("child should exist");
    assert_eq!(child.column_id, backlog);
    assert_eq!(child.recurrence_parent, Some(parent_id));
    assert_eq!(child.recurrence_child, None);
    // The child inherits the pending status and recurs in turn.
    assert_eq!(child.recurrence_status, RecurrenceStatus::Pending);
    assert_eq!(child.date_due, Some(ts("2026-03-12T00:00:00Z")));

    let parent = board.task(parent_id)?.expect("parent should remain");
    assert_eq!(parent.recurrence_status, RecurrenceStatus::Processed);
    assert_eq!(parent.recurrence_child, Some(child_id));

    let copies = board.subtasks_of(child_id)?;
    assert_eq!(copies.len(), 1);
    assert_eq!(copies[0].status, SubtaskStatus::Todo);
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn failed_parent_update_leaves_child_unlinked() -> Result<()> {
    let board = Arc::new(InMemoryBoard::new());
    let doing = board.add_column(PROJECT, "Doing")?;
    let mut original = task_fixture(PROJECT, doing);
    original.recurrence_status = RecurrenceStatus::Pending;
    let parent_id = board.insert_task(original)?;
    let mut ports =
        DuplicationPorts::from_store(&board, Arc::clone(&board) as Arc<dyn EventDispatcher>);
    ports.updater = Arc::new(FrozenUpdater);
    let service = TaskDuplicationService::new(ports, Arc::new(DefaultClock));

    let spawned = service.duplicate_recurring_task(parent_id).await?;

    // The child was already created; only the chain linkage is missing.
    assert_eq!(spawned, None);
    assert_eq!(board.task_count()?, 2);
    let parent = board.task(parent_id)?.expect("parent should remain");
    assert_eq!(parent.recurrence_status, RecurrenceStatus::Pending);
    assert_eq!(parent.recurrence_child, None);
    Ok(())
}

#[rstest]
#[case::days_forward("2026-03-10T00:00:00Z", 2, RecurrenceTimeframe::Days, "2026-03-12T00:00:00Z")]
#[case::days_backward("2026-03-10T00:00:00Z", -3, RecurrenceTimeframe::Days, "2026-03-07T00:00:00Z")]
#[case::month_back_clamps("2024-03-31T12:00:00Z", -1, RecurrenceTimeframe::Months, "2024-02-29T12:00:00Z")]
#[case::month_forward_clamps("2026-01-31T00:00:00Z", 1, RecurrenceTimeframe::Months, "2026-02-28T00:00:00Z")]
#[case::leap_year_clamps("2024-02-29T00:00:00Z", 1, RecurrenceTimeframe::Years, "2025-02-28T00:00:00Z")]
#[case::years_backward("2026-06-15T00:00:00Z", -2, RecurrenceTimeframe::Years, "2024-06-15T00:00:00Z")]
fn due_date_shifts_by_timeframe(
    #[case] due: &str,
    #[case] factor: i32,
    #[case] timeframe: RecurrenceTimeframe,
    #[case] expected: &str,
) {
    let board = Arc::new(InMemoryBoard::new());
    let service = board_service(&board);
    let mut draft = recurring_draft(Some(due), factor, timeframe, RecurrenceBasedate::DueDate);

    service.calculate_recurring_task_due_date(&mut draft);

    assert_eq!(draft.date_due, Some(ts(expected)));
}

#[rstest]
fn due_date_is_untouched_without_factor_or_date() {
    let board = Arc::new(InMemoryBoard::new());
    let service = board_service(&board);

    let mut unchanged = recurring_draft(
        Some("2026-03-10T00:00:00Z"),
        0,
        RecurrenceTimeframe::Days,
        RecurrenceBasedate::DueDate,
    );
    service.calculate_recurring_task_due_date(&mut unchanged);
    assert_eq!(unchanged.date_due, Some(ts("2026-03-10T00:00:00Z")));

    let mut dateless =
        recurring_draft(None, 5, RecurrenceTimeframe::Days, RecurrenceBasedate::DueDate);
    service.calculate_recurring_task_due_date(&mut dateless);
    assert_eq!(dateless.date_due, None);
}

#[rstest]
fn trigger_basedate_shifts_from_the_clock() {
    let board = Arc::new(InMemoryBoard::new());
    let service = board_service_at(&board, ts("2026-08-25T12:00:00Z"));
    let mut draft = recurring_draft(
        Some("2020-01-01T00:00:00Z"),
        3,
        RecurrenceTimeframe::Days,
        RecurrenceBasedate::TriggerDate,
    );

    service.calculate_recurring_task_due_date(&mut draft);

    // The stored due date only gates the recalculation; the clock is the base.
    assert_eq!(draft.date_due, Some(ts("2026-08-28T12:00:00Z")));
}
