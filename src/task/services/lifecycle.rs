//! Service layer for geofenced task creation, start and completion.

use crate::geo::Coordinate;
use crate::task::{
    domain::{
        CompletionOutcome, CompletionRadius, NewTask, Task, TaskCompletion, TaskDescription,
        TaskDomainError, TaskErrorKind, TaskId, TaskTitle,
    },
    ports::{TaskRepository, TaskRepositoryError},
};
use crate::user::{
    domain::UserId,
    ports::{UserRepository, UserRepositoryError},
};
use mockable::Clock;
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info};

/// Request payload for creating a task.
#[derive(Debug, Clone, PartialEq)]
pub struct CreateTaskRequest {
    title: String,
    description: String,
    latitude: f64,
    longitude: f64,
    completion_radius: Option<f64>,
    assigner: UserId,
    assignee: UserId,
}

impl CreateTaskRequest {
    /// Creates a request with required task fields and the default radius.
    #[must_use]
    pub fn new(
        title: impl Into<String>,
        description: impl Into<String>,
        latitude: f64,
        longitude: f64,
        assigner: UserId,
        assignee: UserId,
    ) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            latitude,
            longitude,
            completion_radius: None,
            assigner,
            assignee,
        }
    }

    /// Sets the geofence radius in meters.
    #[must_use]
    pub const fn with_completion_radius(mut self, meters: f64) -> Self {
        self.completion_radius = Some(meters);
        self
    }
}

/// Request payload for a completion claim.
#[derive(Debug, Clone, PartialEq)]
pub struct SubmitCompletionRequest {
    task_id: TaskId,
    actor: UserId,
    latitude: f64,
    longitude: f64,
    notes: Option<String>,
}

impl SubmitCompletionRequest {
    /// Creates a claim that `actor` is at the given position.
    #[must_use]
    pub const fn new(task_id: TaskId, actor: UserId, latitude: f64, longitude: f64) -> Self {
        Self {
            task_id,
            actor,
            latitude,
            longitude,
            notes: None,
        }
    }

    /// Attaches free-text notes to the claim.
    #[must_use]
    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = Some(notes.into());
        self
    }
}

/// Service-level errors for task lifecycle operations.
#[derive(Debug, Error)]
pub enum TaskLifecycleError {
    /// Domain validation, transition or authorization failed.
    #[error(transparent)]
    Domain(#[from] TaskDomainError),
    /// Task repository operation failed.
    #[error(transparent)]
    Repository(#[from] TaskRepositoryError),
    /// User repository operation failed.
    #[error(transparent)]
    UserRepository(#[from] UserRepositoryError),
    /// The task does not exist.
    #[error("task not found: {0}")]
    TaskNotFound(TaskId),
    /// A referenced user does not exist.
    #[error("unknown user: {0}")]
    UnknownUser(UserId),
}

impl TaskLifecycleError {
    /// Returns the domain failure classification, if this is a domain error.
    #[must_use]
    pub const fn kind(&self) -> Option<TaskErrorKind> {
        match self {
            Self::Domain(err) => Some(err.kind()),
            _ => None,
        }
    }
}

/// Result type for task lifecycle service operations.
pub type TaskLifecycleResult<T> = Result<T, TaskLifecycleError>;

/// Task lifecycle orchestration service.
#[derive(Clone)]
pub struct TaskLifecycleService<R, U, C>
where
    R: TaskRepository,
    U: UserRepository,
    C: Clock + Send + Sync,
{
    repository: Arc<R>,
    users: Arc<U>,
    clock: Arc<C>,
}

impl<R, U, C> TaskLifecycleService<R, U, C>
where
    R: TaskRepository,
    U: UserRepository,
    C: Clock + Send + Sync,
{
    /// Creates a new task lifecycle service.
    #[must_use]
    pub const fn new(repository: Arc<R>, users: Arc<U>, clock: Arc<C>) -> Self {
        Self {
            repository,
            users,
            clock,
        }
    }

    /// Creates a pending task.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::Domain`] when a field fails validation,
    /// [`TaskLifecycleError::UnknownUser`] when the assigner or assignee does
    /// not exist, or a repository error when persistence fails.
    pub async fn create_task(&self, request: CreateTaskRequest) -> TaskLifecycleResult<Task> {
        let CreateTaskRequest {
            title,
            description,
            latitude,
            longitude,
            completion_radius,
            assigner,
            assignee,
        } = request;

        let params = NewTask {
            title: TaskTitle::new(title)?,
            description: TaskDescription::new(description)?,
            target: Coordinate::new(latitude, longitude).map_err(TaskDomainError::from)?,
            completion_radius: completion_radius
                .map_or_else(|| Ok(CompletionRadius::default()), CompletionRadius::new)?,
            assigner,
            assignee,
        };
        self.ensure_user_exists(assigner).await?;
        self.ensure_user_exists(assignee).await?;

        let task = Task::new(params, &*self.clock)?;
        self.repository.store(&task).await?;
        debug!(task_id = %task.id(), %assigner, %assignee, "created task");
        Ok(task)
    }

    /// Starts a pending task on behalf of its assignee.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::TaskNotFound`] for unknown tasks,
    /// [`TaskLifecycleError::Domain`] when the transition or actor is
    /// rejected, or a repository error when persistence fails.
    pub async fn start_task(&self, task_id: TaskId, actor: UserId) -> TaskLifecycleResult<Task> {
        let mut task = self.load(task_id).await?;
        task.start(actor, &*self.clock)?;
        self.repository.update(&task).await?;
        debug!(%task_id, %actor, "started task");
        Ok(task)
    }

    /// Submits a completion claim and applies the geofence.
    ///
    /// Every accepted claim is recorded in the task's completion log together
    /// with the resulting task state. Claims outside the radius are returned
    /// as unverified outcomes, not errors.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::TaskNotFound`] for unknown tasks,
    /// [`TaskLifecycleError::Domain`] when the task is not in progress, the
    /// actor is not the assignee or the coordinate is out of range, or a
    /// repository error when persistence fails. A claim that loses a race
    /// with a completing claim fails with [`TaskRepositoryError::Conflict`]
    /// and is not recorded.
    pub async fn submit_completion(
        &self,
        request: SubmitCompletionRequest,
    ) -> TaskLifecycleResult<CompletionOutcome> {
        let SubmitCompletionRequest {
            task_id,
            actor,
            latitude,
            longitude,
            notes,
        } = request;

        let mut task = self.load(task_id).await?;
        task.ensure_can_submit(actor)?;
        let claimed = Coordinate::new(latitude, longitude).map_err(TaskDomainError::from)?;

        let outcome = task.submit_completion(actor, claimed, notes, &*self.clock)?;
        self.repository
            .record_completion(&task, outcome.completion())
            .await?;

        let verification = outcome.verification();
        if outcome.is_verified() {
            info!(
                %task_id,
                %actor,
                distance_meters = verification.distance_meters(),
                "completion verified"
            );
        } else {
            debug!(
                %task_id,
                %actor,
                distance_meters = verification.distance_meters(),
                radius_meters = verification.radius_meters(),
                "completion outside geofence"
            );
        }
        Ok(outcome)
    }

    /// Retrieves a task by identifier.
    ///
    /// Returns `Ok(None)` when the task does not exist.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::Repository`] when persistence lookup
    /// fails.
    pub async fn find_by_id(&self, task_id: TaskId) -> TaskLifecycleResult<Option<Task>> {
        Ok(self.repository.find_by_id(task_id).await?)
    }

    /// Lists the tasks assigned to a user.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::Repository`] when persistence lookup
    /// fails.
    pub async fn find_by_assignee(&self, assignee: UserId) -> TaskLifecycleResult<Vec<Task>> {
        Ok(self.repository.find_by_assignee(assignee).await?)
    }

    /// Returns the completion attempts recorded for a task.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::Repository`] when persistence lookup
    /// fails.
    pub async fn completions_for(
        &self,
        task_id: TaskId,
    ) -> TaskLifecycleResult<Vec<TaskCompletion>> {
        Ok(self.repository.completions_for(task_id).await?)
    }

    async fn load(&self, task_id: TaskId) -> TaskLifecycleResult<Task> {
        self.repository
            .find_by_id(task_id)
            .await?
            .ok_or(TaskLifecycleError::TaskNotFound(task_id))
    }

    async fn ensure_user_exists(&self, user_id: UserId) -> TaskLifecycleResult<()> {
        match self.users.find_by_id(user_id).await? {
            Some(_) => Ok(()),
            None => Err(TaskLifecycleError::UnknownUser(user_id)),
        }
    }
}
