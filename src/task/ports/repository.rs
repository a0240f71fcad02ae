//! Repository port for task persistence and the completion log.

use crate::task::domain::{CompletionId, Task, TaskCompletion, TaskId};
use crate::user::domain::UserId;
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for task repository operations.
pub type TaskRepositoryResult<T> = Result<T, TaskRepositoryError>;

/// Task persistence contract.
///
/// Implementations must serialise concurrent mutations of the same task so
/// that no completion attempt is accepted once the task is `Completed`.
#[async_trait]
pub trait TaskRepository: Send + Sync {
    /// Stores a new task.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRepositoryError::DuplicateTask`] when the task ID already
    /// exists.
    async fn store(&self, task: &Task) -> TaskRepositoryResult<()>;

    /// Persists changes to an existing task (status, timestamps).
    ///
    /// # Errors
    ///
    /// Returns [`TaskRepositoryError::NotFound`] when the task does not exist
    /// or [`TaskRepositoryError::Conflict`] when the stored task is already in
    /// a terminal state.
    async fn update(&self, task: &Task) -> TaskRepositoryResult<()>;

    /// Finds a task by identifier.
    ///
    /// Returns `None` when the task does not exist.
    async fn find_by_id(&self, id: TaskId) -> TaskRepositoryResult<Option<Task>>;

    /// Returns all tasks assigned to the given user, oldest first.
    async fn find_by_assignee(&self, assignee: UserId) -> TaskRepositoryResult<Vec<Task>>;

    /// Records a completion attempt together with the task state it produced.
    ///
    /// The stored task is replaced by `task` and `completion` is appended to
    /// its log as one atomic step, so a verified attempt never leaves a
    /// completed task without its completion record. Prior attempts are never
    /// overwritten.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRepositoryError::NotFound`] when the task does not exist
    /// or `completion` belongs to another task,
    /// [`TaskRepositoryError::Conflict`] when the stored task is already in a
    /// terminal state, or [`TaskRepositoryError::DuplicateCompletion`] when
    /// the completion ID is already recorded. Nothing is written on error.
    async fn record_completion(
        &self,
        task: &Task,
        completion: &TaskCompletion,
    ) -> TaskRepositoryResult<()>;

    /// Returns the completion log for a task in submission order.
    ///
    /// Returns an empty list for unknown tasks.
    async fn completions_for(&self, task_id: TaskId) -> TaskRepositoryResult<Vec<TaskCompletion>>;

    /// Deletes a task together with its completion log.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRepositoryError::NotFound`] when the task does not exist.
    async fn delete(&self, id: TaskId) -> TaskRepositoryResult<()>;
}

/// Errors returned by task repository implementations.
#[derive(Debug, Clone, Error)]
pub enum TaskRepositoryError {
    /// A task with the same identifier already exists.
    #[error("duplicate task identifier: {0}")]
    DuplicateTask(TaskId),

    /// A completion with the same identifier already exists.
    #[error("duplicate completion identifier: {0}")]
    DuplicateCompletion(CompletionId),

    /// The task was not found.
    #[error("task not found: {0}")]
    NotFound(TaskId),

    /// The stored task changed underneath the update and can no longer be
    /// written, for example because a concurrent attempt already completed it.
    #[error("concurrent modification of task {0}")]
    Conflict(TaskId),

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl TaskRepositoryError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
