//! Thread-safe in-memory board implementing every duplication port.

use async_trait::async_trait;
use std::collections::{HashMap, HashSet};
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::board::{
    domain::{
        CategoryId, ColumnId, ProjectId, SubtaskId, SubtaskRecord, SubtaskStatus, SwimlaneId,
        TaskChanges, TaskDraft, TaskId, TaskRecord, UserId,
    },
    ports::{
        CategoryResolver, ColumnResolver, EventDispatcher, PermissionChecker, StoreError,
        StoreResult, SubtaskDuplicator, SwimlaneResolver, TaskCreator, TaskLookup, TaskMovedProject,
        TaskUpdater,
    },
};

/// A dispatched event captured by the in-memory dispatcher.
#[derive(Debug, Clone, PartialEq)]
pub struct DispatchedEvent {
    /// Event name.
    pub name: &'static str,
    /// Event payload.
    pub payload: TaskMovedProject,
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct ColumnRecord {
    id: ColumnId,
    project_id: ProjectId,
    title: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct SwimlaneRecord {
    id: SwimlaneId,
    project_id: ProjectId,
    name: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct CategoryRecord {
    id: CategoryId,
    project_id: ProjectId,
    name: String,
}

#[derive(Debug, Default)]
struct BoardState {
    tasks: HashMap<TaskId, TaskRecord>,
    subtasks: HashMap<TaskId, Vec<SubtaskRecord>>,
    // Insertion order doubles as board order within a project.
    columns: Vec<ColumnRecord>,
    swimlanes: Vec<SwimlaneRecord>,
    categories: Vec<CategoryRecord>,
    members: HashMap<ProjectId, HashSet<UserId>>,
    events: Vec<DispatchedEvent>,
    next_id: i64,
}

impl BoardState {
    fn next_id(&mut self) -> i64 {
        self.next_id += 1;
        self.next_id
    }

    fn tasks_in_column(&self, project_id: ProjectId, column_id: ColumnId) -> usize {
        self.tasks
            .values()
            .filter(|task| task.project_id == project_id && task.column_id == column_id)
            .count()
    }
}

/// Thread-safe in-memory board store, resolver set, and event recorder.
#[derive(Debug, Clone, Default)]
pub struct InMemoryBoard {
    state: Arc<RwLock<BoardState>>,
}

impl InMemoryBoard {
    /// Creates an empty board.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn read_state(&self) -> StoreResult<RwLockReadGuard<'_, BoardState>> {
        self.state
            .read()
            .map_err(|err| StoreError::backend(std::io::Error::other(err.to_string())))
    }

    fn write_state(&self) -> StoreResult<RwLockWriteGuard<'_, BoardState>> {
        self.state
            .write()
            .map_err(|err| StoreError::backend(std::io::Error::other(err.to_string())))
    }

    /// Appends a column to a project's board and returns its identifier.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Backend`] when the state lock is poisoned.
    pub fn add_column(&self, project_id: ProjectId, title: &str) -> StoreResult<ColumnId> {
        let mut state = self.write_state()?;
        let id = ColumnId::new(state.next_id());
        state.columns.push(ColumnRecord {
            id,
            project_id,
            title: title.to_owned(),
        });
        Ok(id)
    }

    /// Adds a named swimlane to a project and returns its identifier.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Backend`] when the state lock is poisoned.
    pub fn add_swimlane(&self, project_id: ProjectId, name: &str) -> StoreResult<SwimlaneId> {
        let mut state = self.write_state()?;
        let id = SwimlaneId::new(state.next_id());
        state.swimlanes.push(SwimlaneRecord {
            id,
            project_id,
            name: name.to_owned(),
        });
        Ok(id)
    }

    /// Adds a named category to a project and returns its identifier.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Backend`] when the state lock is poisoned.
    pub fn add_category(&self, project_id: ProjectId, name: &str) -> StoreResult<CategoryId> {
        let mut state = self.write_state()?;
        let id = CategoryId::new(state.next_id());
        state.categories.push(CategoryRecord {
            id,
            project_id,
            name: name.to_owned(),
        });
        Ok(id)
    }

    /// Grants a user membership of a project.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Backend`] when the state lock is poisoned.
    pub fn allow_user(&self, project_id: ProjectId, user_id: UserId) -> StoreResult<()> {
        let mut state = self.write_state()?;
        state.members.entry(project_id).or_default().insert(user_id);
        Ok(())
    }

    /// Stores a task record under a fresh identifier and returns it.
    ///
    /// The identifier carried by `record` is replaced.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Backend`] when the state lock is poisoned.
    pub fn insert_task(&self, record: TaskRecord) -> StoreResult<TaskId> {
        let mut state = self.write_state()?;
        let id = TaskId::new(state.next_id());
        let mut stored = record;
        stored.id = id;
        state.tasks.insert(id, stored);
        Ok(id)
    }

    /// Attaches a subtask to a task and returns its identifier.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Backend`] when the state lock is poisoned.
    pub fn add_subtask(
        &self,
        task_id: TaskId,
        title: &str,
        assignee_id: Option<UserId>,
        time_estimated: f64,
        status: SubtaskStatus,
    ) -> StoreResult<SubtaskId> {
        let mut state = self.write_state()?;
        let id = SubtaskId::new(state.next_id());
        state.subtasks.entry(task_id).or_default().push(SubtaskRecord {
            id,
            task_id,
            title: title.to_owned(),
            assignee_id,
            time_estimated,
            status,
        });
        Ok(id)
    }

    /// Returns a task by identifier, if stored.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Backend`] when the state lock is poisoned.
    pub fn task(&self, id: TaskId) -> StoreResult<Option<TaskRecord>> {
        Ok(self.read_state()?.tasks.get(&id).cloned())
    }

    /// Returns the number of stored tasks.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Backend`] when the state lock is poisoned.
    pub fn task_count(&self) -> StoreResult<usize> {
        Ok(self.read_state()?.tasks.len())
    }

    /// Returns the subtasks attached to a task.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Backend`] when the state lock is poisoned.
    pub fn subtasks_of(&self, task_id: TaskId) -> StoreResult<Vec<SubtaskRecord>> {
        Ok(self
            .read_state()?
            .subtasks
            .get(&task_id)
            .cloned()
            .unwrap_or_default())
    }

    /// Returns every event captured by the dispatcher, in dispatch order.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Backend`] when the state lock is poisoned.
    pub fn dispatched_events(&self) -> StoreResult<Vec<DispatchedEvent>> {
        Ok(self.read_state()?.events.clone())
    }
}

#[async_trait]
impl TaskLookup for InMemoryBoard {
    async fn find_by_id(&self, id: TaskId) -> StoreResult<Option<TaskRecord>> {
        self.task(id)
    }

    async fn count_by_column(
        &self,
        project_id: ProjectId,
        column_id: ColumnId,
    ) -> StoreResult<u32> {
        let count = self.read_state()?.tasks_in_column(project_id, column_id);
        u32::try_from(count).map_err(StoreError::backend)
    }
}

#[async_trait]
impl TaskCreator for InMemoryBoard {
    async fn create(&self, draft: &TaskDraft) -> StoreResult<TaskId> {
        if draft.title.trim().is_empty() {
            return Err(StoreError::Rejected("task title must not be empty".to_owned()));
        }
        let mut state = self.write_state()?;
        let occupied = state.tasks_in_column(draft.project_id, draft.column_id);
        let position = u32::try_from(occupied).map_err(StoreError::backend)? + 1;
        let id = TaskId::new(state.next_id());
        state.tasks.insert(
            id,
            TaskRecord {
                id,
                title: draft.title.clone(),
                description: draft.description.clone(),
                date_due: draft.date_due,
                color_id: draft.color_id.clone(),
                project_id: draft.project_id,
                column_id: draft.column_id,
                swimlane_id: draft.swimlane_id,
                category_id: draft.category_id,
                owner_id: draft.owner_id,
                score: draft.score,
                time_estimated: draft.time_estimated,
                position,
                is_active: true,
                recurrence_status: draft.recurrence_status,
                recurrence_trigger: draft.recurrence_trigger,
                recurrence_factor: draft.recurrence_factor,
                recurrence_timeframe: draft.recurrence_timeframe,
                recurrence_basedate: draft.recurrence_basedate,
                recurrence_parent: draft.recurrence_parent,
                recurrence_child: None,
            },
        );
        Ok(id)
    }
}

#[async_trait]
impl TaskUpdater for InMemoryBoard {
    async fn update(&self, id: TaskId, changes: &TaskChanges) -> StoreResult<bool> {
        let mut state = self.write_state()?;
        let Some(existing) = state.tasks.get(&id) else {
            return Ok(false);
        };
        let updated = existing.merged(changes);
        state.tasks.insert(id, updated);
        Ok(true)
    }
}

#[async_trait]
impl SubtaskDuplicator for InMemoryBoard {
    async fn duplicate(&self, source: TaskId, destination: TaskId) -> StoreResult<()> {
        let mut state = self.write_state()?;
        let originals = state.subtasks.get(&source).cloned().unwrap_or_default();
        for original in originals {
            let id = SubtaskId::new(state.next_id());
            let copy = original.copied_to(id, destination);
            state.subtasks.entry(destination).or_default().push(copy);
        }
        Ok(())
    }
}

#[async_trait]
impl CategoryResolver for InMemoryBoard {
    async fn name_by_id(&self, id: CategoryId) -> StoreResult<Option<String>> {
        Ok(self
            .read_state()?
            .categories
            .iter()
            .find(|category| category.id == id)
            .map(|category| category.name.clone()))
    }

    async fn id_by_name(
        &self,
        project_id: ProjectId,
        name: &str,
    ) -> StoreResult<Option<CategoryId>> {
        Ok(self
            .read_state()?
            .categories
            .iter()
            .find(|category| category.project_id == project_id && category.name == name)
            .map(|category| category.id))
    }
}

#[async_trait]
impl SwimlaneResolver for InMemoryBoard {
    async fn name_by_id(&self, id: SwimlaneId) -> StoreResult<Option<String>> {
        Ok(self
            .read_state()?
            .swimlanes
            .iter()
            .find(|swimlane| swimlane.id == id)
            .map(|swimlane| swimlane.name.clone()))
    }

    async fn id_by_name(
        &self,
        project_id: ProjectId,
        name: &str,
    ) -> StoreResult<Option<SwimlaneId>> {
        Ok(self
            .read_state()?
            .swimlanes
            .iter()
            .find(|swimlane| swimlane.project_id == project_id && swimlane.name == name)
            .map(|swimlane| swimlane.id))
    }
}

#[async_trait]
impl ColumnResolver for InMemoryBoard {
    async fn title_by_id(&self, id: ColumnId) -> StoreResult<Option<String>> {
        Ok(self
            .read_state()?
            .columns
            .iter()
            .find(|column| column.id == id)
            .map(|column| column.title.clone()))
    }

    async fn id_by_title(
        &self,
        project_id: ProjectId,
        title: &str,
    ) -> StoreResult<Option<ColumnId>> {
        Ok(self
            .read_state()?
            .columns
            .iter()
            .find(|column| column.project_id == project_id && column.title == title)
            .map(|column| column.id))
    }

    async fn first_column_id(&self, project_id: ProjectId) -> StoreResult<ColumnId> {
        self.read_state()?
            .columns
            .iter()
            .find(|column| column.project_id == project_id)
            .map(|column| column.id)
            .ok_or(StoreError::NoColumns(project_id))
    }
}

#[async_trait]
impl PermissionChecker for InMemoryBoard {
    async fn is_user_allowed(&self, project_id: ProjectId, user_id: UserId) -> StoreResult<bool> {
        Ok(self
            .read_state()?
            .members
            .get(&project_id)
            .is_some_and(|members| members.contains(&user_id)))
    }
}

#[async_trait]
impl EventDispatcher for InMemoryBoard {
    async fn dispatch(&self, event_name: &'static str, payload: TaskMovedProject) {
        if let Ok(mut state) = self.state.write() {
            state.events.push(DispatchedEvent {
                name: event_name,
                payload,
            });
        }
    }
}
