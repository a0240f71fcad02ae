//! Task aggregate root and the task status state machine.

use super::{
    CompletionOutcome, CompletionRadius, ParseTaskStatusError, TaskCompletion, TaskDescription,
    TaskDomainError, TaskId, TaskTitle,
};
use crate::geo::{self, Coordinate, format_distance};
use crate::user::domain::UserId;
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Task lifecycle status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TaskStatus {
    /// Task has been assigned but work has not started.
    Pending,
    /// The assignee has started the task.
    InProgress,
    /// A completion inside the geofence has been verified.
    Completed,
}

impl TaskStatus {
    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "PENDING",
            Self::InProgress => "IN_PROGRESS",
            Self::Completed => "COMPLETED",
        }
    }

    /// Returns whether the state machine permits moving to `target`.
    #[must_use]
    pub const fn can_transition_to(self, target: Self) -> bool {
        matches!(
            (self, target),
            (Self::Pending, Self::InProgress) | (Self::InProgress, Self::Completed)
        )
    }

    /// Returns whether no further transitions are possible.
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Completed)
    }
}

impl TryFrom<&str> for TaskStatus {
    type Error = ParseTaskStatusError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let normalized = value.trim().to_ascii_uppercase();
        match normalized.as_str() {
            "PENDING" => Ok(Self::Pending),
            "IN_PROGRESS" => Ok(Self::InProgress),
            "COMPLETED" => Ok(Self::Completed),
            _ => Err(ParseTaskStatusError(value.to_owned())),
        }
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Parameter object for creating a task.
#[derive(Debug, Clone, PartialEq)]
pub struct NewTask {
    /// Validated title.
    pub title: TaskTitle,
    /// Validated description.
    pub description: TaskDescription,
    /// Geofence centre.
    pub target: Coordinate,
    /// Geofence radius.
    pub completion_radius: CompletionRadius,
    /// User assigning the task.
    pub assigner: UserId,
    /// User expected to complete the task.
    pub assignee: UserId,
}

/// Task aggregate root.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    id: TaskId,
    title: TaskTitle,
    description: TaskDescription,
    target: Coordinate,
    completion_radius: CompletionRadius,
    status: TaskStatus,
    assigner: UserId,
    assignee: UserId,
    created_at: DateTime<Utc>,
    updated_at: Option<DateTime<Utc>>,
}

/// Parameter object for reconstructing a persisted task aggregate.
#[derive(Debug, Clone, PartialEq)]
pub struct PersistedTaskData {
    /// Persisted task identifier.
    pub id: TaskId,
    /// Persisted title.
    pub title: TaskTitle,
    /// Persisted description.
    pub description: TaskDescription,
    /// Persisted geofence centre.
    pub target: Coordinate,
    /// Persisted geofence radius.
    pub completion_radius: CompletionRadius,
    /// Persisted lifecycle status.
    pub status: TaskStatus,
    /// Persisted assigner.
    pub assigner: UserId,
    /// Persisted assignee.
    pub assignee: UserId,
    /// Persisted creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Persisted latest transition timestamp, if any.
    pub updated_at: Option<DateTime<Utc>>,
}

impl Task {
    /// Creates a new pending task.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::SelfAssignment`] when the assigner and
    /// assignee are the same user.
    pub fn new(params: NewTask, clock: &impl Clock) -> Result<Self, TaskDomainError> {
        if params.assigner == params.assignee {
            return Err(TaskDomainError::SelfAssignment(params.assigner));
        }

        Ok(Self {
            id: TaskId::new(),
            title: params.title,
            description: params.description,
            target: params.target,
            completion_radius: params.completion_radius,
            status: TaskStatus::Pending,
            assigner: params.assigner,
            assignee: params.assignee,
            created_at: clock.utc(),
            updated_at: None,
        })
    }

    /// Reconstructs a task from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedTaskData) -> Self {
        Self {
            id: data.id,
            title: data.title,
            description: data.description,
            target: data.target,
            completion_radius: data.completion_radius,
            status: data.status,
            assigner: data.assigner,
            assignee: data.assignee,
            created_at: data.created_at,
            updated_at: data.updated_at,
        }
    }

    /// Returns the task identifier.
    #[must_use]
    pub const fn id(&self) -> TaskId {
        self.id
    }

    /// Returns the title.
    #[must_use]
    pub const fn title(&self) -> &TaskTitle {
        &self.title
    }

    /// Returns the description.
    #[must_use]
    pub const fn description(&self) -> &TaskDescription {
        &self.description
    }

    /// Returns the geofence centre.
    #[must_use]
    pub const fn target(&self) -> Coordinate {
        self.target
    }

    /// Returns the geofence radius.
    #[must_use]
    pub const fn completion_radius(&self) -> CompletionRadius {
        self.completion_radius
    }

    /// Returns the lifecycle status.
    #[must_use]
    pub const fn status(&self) -> TaskStatus {
        self.status
    }

    /// Returns the assigning user.
    #[must_use]
    pub const fn assigner(&self) -> UserId {
        self.assigner
    }

    /// Returns the assigned user.
    #[must_use]
    pub const fn assignee(&self) -> UserId {
        self.assignee
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns the latest transition timestamp; `None` until the first
    /// transition.
    #[must_use]
    pub const fn updated_at(&self) -> Option<DateTime<Utc>> {
        self.updated_at
    }

    /// Starts work on a pending task.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::InvalidStateTransition`] unless the task is
    /// pending, or [`TaskDomainError::NotAssignee`] when `actor` is not the
    /// assignee. The task is left untouched on error.
    pub fn start(&mut self, actor: UserId, clock: &impl Clock) -> Result<(), TaskDomainError> {
        self.ensure_transition(TaskStatus::InProgress)?;
        self.ensure_assignee(actor)?;
        self.status = TaskStatus::InProgress;
        self.touch(clock);
        Ok(())
    }

    /// Checks that `actor` may submit a completion claim right now.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::InvalidStateTransition`] unless the task is
    /// in progress, or [`TaskDomainError::NotAssignee`] when `actor` is not
    /// the assignee.
    pub fn ensure_can_submit(&self, actor: UserId) -> Result<(), TaskDomainError> {
        self.ensure_transition(TaskStatus::Completed)?;
        self.ensure_assignee(actor)
    }

    /// Records a completion claim at `claimed` and applies the geofence.
    ///
    /// A claim inside the radius completes the task. A claim outside it is
    /// still recorded, unverified, and leaves the task in progress so the
    /// assignee can retry; being too far away is not an error.
    ///
    /// When `notes` is `None` for a rejected claim, a note describing the
    /// distance from the target is generated.
    ///
    /// # Errors
    ///
    /// Returns the same errors as [`Task::ensure_can_submit`]; no completion
    /// is recorded in that case.
    pub fn submit_completion(
        &mut self,
        actor: UserId,
        claimed: Coordinate,
        notes: Option<String>,
        clock: &impl Clock,
    ) -> Result<CompletionOutcome, TaskDomainError> {
        self.ensure_can_submit(actor)?;

        let radius = self.completion_radius.meters();
        let verification = geo::verify(claimed, self.target, radius);
        let verification_notes = notes.or_else(|| {
            (!verification.within_radius()).then(|| {
                format!(
                    "outside completion radius: {} from target, limit {}",
                    format_distance(verification.distance_meters()),
                    format_distance(radius)
                )
            })
        });

        let completion = TaskCompletion::record(
            self.id,
            actor,
            claimed,
            &verification,
            verification_notes,
            clock,
        );
        if verification.within_radius() {
            self.status = TaskStatus::Completed;
            self.touch(clock);
        }

        Ok(CompletionOutcome::new(self.status, completion, verification))
    }

    fn ensure_transition(&self, target: TaskStatus) -> Result<(), TaskDomainError> {
        if self.status.can_transition_to(target) {
            Ok(())
        } else {
            Err(TaskDomainError::InvalidStateTransition {
                task_id: self.id,
                from: self.status,
                to: target,
            })
        }
    }

    fn ensure_assignee(&self, actor: UserId) -> Result<(), TaskDomainError> {
        if actor == self.assignee {
            Ok(())
        } else {
            Err(TaskDomainError::NotAssignee {
                task_id: self.id,
                actor,
            })
        }
    }

    /// Updates the `updated_at` timestamp to the current clock time.
    fn touch(&mut self, clock: &impl Clock) {
        self.updated_at = Some(clock.utc());
    }
}
