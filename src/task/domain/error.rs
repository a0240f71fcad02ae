//! Error types for task domain validation and parsing.

use super::{TaskId, TaskStatus};
use crate::geo::GeoError;
use crate::user::domain::UserId;
use thiserror::Error;

/// Broad classification of task domain failures.
///
/// Callers map these to distinct responses: validation failures are input
/// problems, invalid transitions indicate client logic bugs, and
/// authorization failures mean the acting user may not perform the action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TaskErrorKind {
    /// Malformed input.
    Validation,
    /// State machine misuse.
    InvalidTransition,
    /// Actor is not permitted to perform the operation.
    Authorization,
}

/// Errors returned while constructing or transitioning tasks.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum TaskDomainError {
    /// The task title is empty after trimming.
    #[error("task title must not be empty")]
    EmptyTitle,

    /// The task title exceeds 200 characters.
    #[error("task title is {0} characters, expected at most 200")]
    TitleTooLong(usize),

    /// The task description is empty after trimming.
    #[error("task description must not be empty")]
    EmptyDescription,

    /// The task description exceeds 1000 characters.
    #[error("task description is {0} characters, expected at most 1000")]
    DescriptionTooLong(usize),

    /// A coordinate is out of range.
    #[error(transparent)]
    InvalidCoordinate(#[from] GeoError),

    /// The completion radius is not a positive, finite number of meters.
    #[error("invalid completion radius {0}, expected a positive number of meters")]
    InvalidCompletionRadius(f64),

    /// The assigner and assignee are the same user.
    #[error("user {0} cannot assign a task to themselves")]
    SelfAssignment(UserId),

    /// The requested state transition is not permitted.
    #[error("task {task_id} cannot transition from {from} to {to}")]
    InvalidStateTransition {
        /// Task being transitioned.
        task_id: TaskId,
        /// Current state.
        from: TaskStatus,
        /// Requested state.
        to: TaskStatus,
    },

    /// The acting user is not the task's assignee.
    #[error("user {actor} is not the assignee of task {task_id}")]
    NotAssignee {
        /// Task being acted upon.
        task_id: TaskId,
        /// User attempting the action.
        actor: UserId,
    },
}

impl TaskDomainError {
    /// Returns the failure classification.
    #[must_use]
    pub const fn kind(&self) -> TaskErrorKind {
        match self {
            Self::EmptyTitle
            | Self::TitleTooLong(_)
            | Self::EmptyDescription
            | Self::DescriptionTooLong(_)
            | Self::InvalidCoordinate(_)
            | Self::InvalidCompletionRadius(_)
            | Self::SelfAssignment(_) => TaskErrorKind::Validation,
            Self::InvalidStateTransition { .. } => TaskErrorKind::InvalidTransition,
            Self::NotAssignee { .. } => TaskErrorKind::Authorization,
        }
    }
}

/// Error returned while parsing task statuses from persistence.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown task status: {0}")]
pub struct ParseTaskStatusError(pub String);
