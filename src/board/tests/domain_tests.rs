//! Domain model tests for the duplicated field set and recurrence values.

use std::collections::HashSet;

use super::support::task_fixture;
use crate::board::domain::{
    CategoryId, ColumnId, DUPLICATED_FIELDS, ParseRecurrenceError, ProjectId, RecurrenceBasedate,
    RecurrenceStatus, RecurrenceTimeframe, RecurrenceTrigger, SubtaskId, SubtaskRecord,
    SubtaskStatus, TaskChanges, TaskDraft, TaskId, UserId,
};
use rstest::rstest;
use serde_json::json;

#[rstest]
fn duplicated_field_set_names_sixteen_distinct_columns() {
    let columns: HashSet<&str> = DUPLICATED_FIELDS.iter().map(|field| field.as_str()).collect();
    assert_eq!(columns.len(), DUPLICATED_FIELDS.len());
    assert!(columns.contains("title"));
    assert!(columns.contains("recurrence_basedate"));
    assert!(!columns.contains("position"));
    assert!(!columns.contains("is_active"));
}

#[rstest]
#[case(RecurrenceStatus::None, "none")]
#[case(RecurrenceStatus::Pending, "pending")]
#[case(RecurrenceStatus::Processed, "processed")]
fn recurrence_status_round_trips(#[case] status: RecurrenceStatus, #[case] stored: &str) {
    assert_eq!(status.as_str(), stored);
    assert_eq!(RecurrenceStatus::try_from(stored), Ok(status));
}

#[rstest]
#[case(RecurrenceTimeframe::Days, "days")]
#[case(RecurrenceTimeframe::Months, "months")]
#[case(RecurrenceTimeframe::Years, "years")]
fn recurrence_timeframe_round_trips(#[case] timeframe: RecurrenceTimeframe, #[case] stored: &str) {
    assert_eq!(timeframe.as_str(), stored);
    assert_eq!(RecurrenceTimeframe::try_from(stored), Ok(timeframe));
}

#[rstest]
#[case(RecurrenceBasedate::DueDate, "due_date")]
#[case(RecurrenceBasedate::TriggerDate, "trigger_date")]
fn recurrence_basedate_round_trips(#[case] basedate: RecurrenceBasedate, #[case] stored: &str) {
    assert_eq!(basedate.as_str(), stored);
    assert_eq!(RecurrenceBasedate::try_from(stored), Ok(basedate));
}

#[rstest]
fn recurrence_parsing_tolerates_case_and_whitespace() {
    assert_eq!(
        RecurrenceTrigger::try_from(" Last_Column "),
        Ok(RecurrenceTrigger::LastColumn)
    );
    assert_eq!(
        RecurrenceBasedate::try_from("TRIGGER_DATE"),
        Ok(RecurrenceBasedate::TriggerDate)
    );
}

#[rstest]
fn recurrence_parse_errors_name_the_field() {
    let err = RecurrenceStatus::try_from("weekly").expect_err("unknown status should fail");
    assert_eq!(err, ParseRecurrenceError::new("recurrence_status", "weekly"));
}

#[rstest]
fn recurrence_values_serialise_as_snake_case() {
    assert_eq!(
        serde_json::to_value(RecurrenceTrigger::LastColumn).expect("serialisable"),
        json!("last_column")
    );
    assert_eq!(
        serde_json::to_value(SubtaskStatus::InProgress).expect("serialisable"),
        json!("in_progress")
    );
}

#[rstest]
fn draft_copies_duplicated_fields_and_drops_the_rest() {
    let mut task = task_fixture(ProjectId::new(11), ColumnId::new(12));
    task.id = TaskId::new(42);
    task.position = 9;
    task.is_active = false;
    task.owner_id = Some(UserId::new(7));
    task.category_id = Some(CategoryId::new(3));
    task.recurrence_status = RecurrenceStatus::Pending;
    task.recurrence_factor = -4;
    task.recurrence_parent = Some(TaskId::new(1));
    task.recurrence_child = Some(TaskId::new(2));

    let draft = TaskDraft::from_task(&task);

    assert_eq!(draft.title, task.title);
    assert_eq!(draft.description, task.description);
    assert_eq!(draft.date_due, task.date_due);
    assert_eq!(draft.color_id, task.color_id);
    assert_eq!(draft.project_id, task.project_id);
    assert_eq!(draft.column_id, task.column_id);
    assert_eq!(draft.swimlane_id, task.swimlane_id);
    assert_eq!(draft.category_id, task.category_id);
    assert_eq!(draft.owner_id, task.owner_id);
    assert_eq!(draft.score, task.score);
    assert_eq!(draft.time_estimated, task.time_estimated);
    assert_eq!(draft.recurrence_status, task.recurrence_status);
    assert_eq!(draft.recurrence_trigger, task.recurrence_trigger);
    assert_eq!(draft.recurrence_factor, task.recurrence_factor);
    assert_eq!(draft.recurrence_timeframe, task.recurrence_timeframe);
    assert_eq!(draft.recurrence_basedate, task.recurrence_basedate);
    // Links are never inherited from the source.
    assert_eq!(draft.recurrence_parent, None);
}

#[rstest]
fn merged_overlays_sparse_changes_only() {
    let mut task = task_fixture(ProjectId::new(11), ColumnId::new(12));
    task.category_id = Some(CategoryId::new(3));
    task.owner_id = Some(UserId::new(7));
    let changes = TaskChanges {
        is_active: Some(true),
        project_id: Some(ProjectId::new(20)),
        column_id: Some(ColumnId::new(21)),
        category_id: Some(None),
        position: Some(5),
        recurrence_status: Some(RecurrenceStatus::Processed),
        ..TaskChanges::default()
    };

    let merged = task.merged(&changes);

    assert_eq!(merged.project_id, ProjectId::new(20));
    assert_eq!(merged.column_id, ColumnId::new(21));
    assert_eq!(merged.category_id, None);
    assert_eq!(merged.position, 5);
    assert_eq!(merged.recurrence_status, RecurrenceStatus::Processed);
    // Fields without a change keep the source values.
    assert_eq!(merged.owner_id, Some(UserId::new(7)));
    assert_eq!(merged.title, task.title);
    assert_eq!(merged.date_due, task.date_due);
}

#[rstest]
fn subtask_copy_resets_status_and_rehomes() {
    let original = SubtaskRecord {
        id: SubtaskId::new(1),
        task_id: TaskId::new(10),
        title: "Write regression test".to_owned(),
        assignee_id: Some(UserId::new(7)),
        time_estimated: 1.5,
        status: SubtaskStatus::Done,
    };

    let copy = original.copied_to(SubtaskId::new(2), TaskId::new(20));

    assert_eq!(copy.id, SubtaskId::new(2));
    assert_eq!(copy.task_id, TaskId::new(20));
    assert_eq!(copy.title, original.title);
    assert_eq!(copy.assignee_id, original.assignee_id);
    assert_eq!(copy.status, SubtaskStatus::Todo);
}
