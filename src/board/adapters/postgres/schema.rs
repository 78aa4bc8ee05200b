//! Diesel schema for board persistence.

diesel::table! {
    /// Task records including recurrence metadata.
    tasks (id) {
        /// Task identifier.
        id -> BigInt,
        /// Task title.
        #[max_length = 255]
        title -> Varchar,
        /// Optional long-form description.
        description -> Nullable<Text>,
        /// Due date, if set.
        date_due -> Nullable<Timestamptz>,
        /// Card colour name.
        #[max_length = 50]
        color_id -> Varchar,
        /// Owning project.
        project_id -> BigInt,
        /// Board column.
        column_id -> BigInt,
        /// Swimlane; null selects the project default lane.
        swimlane_id -> Nullable<BigInt>,
        /// Optional category.
        category_id -> Nullable<BigInt>,
        /// Optional assignee.
        owner_id -> Nullable<BigInt>,
        /// Priority score.
        score -> Integer,
        /// Estimated effort in hours.
        time_estimated -> Double,
        /// One-based position within the column.
        position -> Integer,
        /// Whether the task is open.
        is_active -> Bool,
        /// Recurrence lifecycle status.
        #[max_length = 50]
        recurrence_status -> Varchar,
        /// Recurrence trigger event.
        #[max_length = 50]
        recurrence_trigger -> Varchar,
        /// Signed recurrence interval count.
        recurrence_factor -> Integer,
        /// Recurrence interval unit.
        #[max_length = 50]
        recurrence_timeframe -> Varchar,
        /// Recurrence reference date.
        #[max_length = 50]
        recurrence_basedate -> Varchar,
        /// Parent task for spawned recurring instances.
        recurrence_parent -> Nullable<BigInt>,
        /// Child task once the recurrence has been processed.
        recurrence_child -> Nullable<BigInt>,
    }
}

diesel::table! {
    /// Subtask records attached to tasks.
    subtasks (id) {
        /// Subtask identifier.
        id -> BigInt,
        /// Owning task.
        task_id -> BigInt,
        /// Subtask title.
        #[max_length = 255]
        title -> Varchar,
        /// Optional assignee.
        assignee_id -> Nullable<BigInt>,
        /// Estimated effort in hours.
        time_estimated -> Double,
        /// Completion state.
        #[max_length = 50]
        status -> Varchar,
    }
}

diesel::table! {
    /// Board columns, ordered by position within a project.
    board_columns (id) {
        /// Column identifier.
        id -> BigInt,
        /// Owning project.
        project_id -> BigInt,
        /// Column title, unique within the project.
        #[max_length = 255]
        title -> Varchar,
        /// One-based position on the board.
        position -> Integer,
    }
}

diesel::table! {
    /// Named swimlanes within a project.
    swimlanes (id) {
        /// Swimlane identifier.
        id -> BigInt,
        /// Owning project.
        project_id -> BigInt,
        /// Swimlane name, unique within the project.
        #[max_length = 255]
        name -> Varchar,
        /// One-based position on the board.
        position -> Integer,
    }
}

diesel::table! {
    /// Named task categories within a project.
    categories (id) {
        /// Category identifier.
        id -> BigInt,
        /// Owning project.
        project_id -> BigInt,
        /// Category name, unique within the project.
        #[max_length = 255]
        name -> Varchar,
    }
}

diesel::table! {
    /// Project membership rows used for assignment permission checks.
    project_users (project_id, user_id) {
        /// Project granting membership.
        project_id -> BigInt,
        /// Member user.
        user_id -> BigInt,
    }
}
