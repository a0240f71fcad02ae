//! In-memory repository for task lifecycle tests.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::task::{
    domain::{Task, TaskCompletion, TaskId},
    ports::{TaskRepository, TaskRepositoryError, TaskRepositoryResult},
};
use crate::user::domain::UserId;

/// Thread-safe in-memory task repository.
///
/// All mutations go through a single write lock, which serialises concurrent
/// updates of the same task. Updating a task, or recording a completion
/// attempt against it, fails with [`TaskRepositoryError::Conflict`] once the
/// stored task is terminal, so an attempt that read the task before it was
/// completed cannot land afterwards.
#[derive(Debug, Clone, Default)]
pub struct InMemoryTaskRepository {
    state: Arc<RwLock<InMemoryTaskState>>,
}

#[derive(Debug, Default)]
struct InMemoryTaskState {
    tasks: HashMap<TaskId, Task>,
    insertion_order: Vec<TaskId>,
    completions: HashMap<TaskId, Vec<TaskCompletion>>,
}

impl InMemoryTaskRepository {
    /// Creates an empty in-memory repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> TaskRepositoryResult<RwLockReadGuard<'_, InMemoryTaskState>> {
        self.state.read().map_err(|err| {
            TaskRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })
    }

    fn write(&self) -> TaskRepositoryResult<RwLockWriteGuard<'_, InMemoryTaskState>> {
        self.state.write().map_err(|err| {
            TaskRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })
    }
}

#[async_trait]
impl TaskRepository for InMemoryTaskRepository {
    async fn store(&self, task: &Task) -> TaskRepositoryResult<()> {
        let mut state = self.write()?;
        if state.tasks.contains_key(&task.id()) {
            return Err(TaskRepositoryError::DuplicateTask(task.id()));
        }

        state.insertion_order.push(task.id());
        state.tasks.insert(task.id(), task.clone());
        Ok(())
    }

    async fn update(&self, task: &Task) -> TaskRepositoryResult<()> {
        let mut state = self.write()?;
        let stored = state
            .tasks
            .get_mut(&task.id())
            .ok_or(TaskRepositoryError::NotFound(task.id()))?;

        if stored.status().is_terminal() {
            return Err(TaskRepositoryError::Conflict(task.id()));
        }

        *stored = task.clone();
        Ok(())
    }

    async fn find_by_id(&self, id: TaskId) -> TaskRepositoryResult<Option<Task>> {
        let state = self.read()?;
        Ok(state.tasks.get(&id).cloned())
    }

    async fn find_by_assignee(&self, assignee: UserId) -> TaskRepositoryResult<Vec<Task>> {
        let state = self.read()?;
        Ok(state
            .insertion_order
            .iter()
            .filter_map(|id| state.tasks.get(id))
            .filter(|task| task.assignee() == assignee)
            .cloned()
            .collect())
    }

    async fn record_completion(
        &self,
        task: &Task,
        completion: &TaskCompletion,
    ) -> TaskRepositoryResult<()> {
        let mut guard = self.write()?;
        let state = &mut *guard;
        let task_id = task.id();
        if completion.task_id() != task_id {
            return Err(TaskRepositoryError::NotFound(completion.task_id()));
        }
        let stored = state
            .tasks
            .get_mut(&task_id)
            .ok_or(TaskRepositoryError::NotFound(task_id))?;
        if stored.status().is_terminal() {
            return Err(TaskRepositoryError::Conflict(task_id));
        }

        let log = state.completions.entry(task_id).or_default();
        if log.iter().any(|existing| existing.id() == completion.id()) {
            return Err(TaskRepositoryError::DuplicateCompletion(completion.id()));
        }
        *stored = task.clone();
        log.push(completion.clone());
        Ok(())
    }

    async fn completions_for(&self, task_id: TaskId) -> TaskRepositoryResult<Vec<TaskCompletion>> {
        let state = self.read()?;
        Ok(state.completions.get(&task_id).cloned().unwrap_or_default())
    }

    async fn delete(&self, id: TaskId) -> TaskRepositoryResult<()> {
        let mut state = self.write()?;
        if state.tasks.remove(&id).is_none() {
            return Err(TaskRepositoryError::NotFound(id));
        }

        state.insertion_order.retain(|task_id| *task_id != id);
        state.completions.remove(&id);
        Ok(())
    }
}
