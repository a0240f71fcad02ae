//! Completion attempts recorded against a task.

use super::{CompletionId, TaskId, TaskStatus};
use crate::geo::{Coordinate, VerificationResult};
use crate::user::domain::UserId;
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};

/// One completion claim and the geofence verdict computed when it was made.
///
/// Distance and verdict are a historical record: they are never recomputed,
/// even if the task's target or radius changes later.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaskCompletion {
    id: CompletionId,
    task_id: TaskId,
    submitted_by: UserId,
    position: Coordinate,
    distance_from_target: f64,
    completion_verified: bool,
    completed_at: DateTime<Utc>,
    verification_notes: Option<String>,
}

/// Parameter object for reconstructing a persisted completion.
#[derive(Debug, Clone, PartialEq)]
pub struct PersistedCompletionData {
    /// Persisted completion identifier.
    pub id: CompletionId,
    /// Task the completion belongs to.
    pub task_id: TaskId,
    /// Submitting user.
    pub submitted_by: UserId,
    /// Submitted position.
    pub position: Coordinate,
    /// Distance from the target at submission time, in meters.
    pub distance_from_target: f64,
    /// Whether the claim was inside the geofence.
    pub completion_verified: bool,
    /// Submission timestamp.
    pub completed_at: DateTime<Utc>,
    /// Free-text notes.
    pub verification_notes: Option<String>,
}

impl TaskCompletion {
    pub(super) fn record(
        task_id: TaskId,
        submitted_by: UserId,
        position: Coordinate,
        verification: &VerificationResult,
        verification_notes: Option<String>,
        clock: &impl Clock,
    ) -> Self {
        Self {
            id: CompletionId::new(),
            task_id,
            submitted_by,
            position,
            distance_from_target: verification.distance_meters(),
            completion_verified: verification.within_radius(),
            completed_at: clock.utc(),
            verification_notes,
        }
    }

    /// Reconstructs a completion from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedCompletionData) -> Self {
        Self {
            id: data.id,
            task_id: data.task_id,
            submitted_by: data.submitted_by,
            position: data.position,
            distance_from_target: data.distance_from_target,
            completion_verified: data.completion_verified,
            completed_at: data.completed_at,
            verification_notes: data.verification_notes,
        }
    }

    /// Returns the completion identifier.
    #[must_use]
    pub const fn id(&self) -> CompletionId {
        self.id
    }

    /// Returns the task this completion belongs to.
    #[must_use]
    pub const fn task_id(&self) -> TaskId {
        self.task_id
    }

    /// Returns the submitting user.
    #[must_use]
    pub const fn submitted_by(&self) -> UserId {
        self.submitted_by
    }

    /// Returns the submitted position.
    #[must_use]
    pub const fn position(&self) -> Coordinate {
        self.position
    }

    /// Returns the distance from the target in meters.
    #[must_use]
    pub const fn distance_from_target(&self) -> f64 {
        self.distance_from_target
    }

    /// Returns whether the claim was inside the geofence.
    #[must_use]
    pub const fn completion_verified(&self) -> bool {
        self.completion_verified
    }

    /// Returns the submission timestamp.
    #[must_use]
    pub const fn completed_at(&self) -> DateTime<Utc> {
        self.completed_at
    }

    /// Returns the verification notes, if any.
    #[must_use]
    pub fn verification_notes(&self) -> Option<&str> {
        self.verification_notes.as_deref()
    }
}

/// Result of a completion submission.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompletionOutcome {
    new_status: TaskStatus,
    completion: TaskCompletion,
    verification: VerificationResult,
}

impl CompletionOutcome {
    pub(super) const fn new(
        new_status: TaskStatus,
        completion: TaskCompletion,
        verification: VerificationResult,
    ) -> Self {
        Self {
            new_status,
            completion,
            verification,
        }
    }

    /// Task status after the submission.
    #[must_use]
    pub const fn new_status(&self) -> TaskStatus {
        self.new_status
    }

    /// The recorded completion attempt.
    #[must_use]
    pub const fn completion(&self) -> &TaskCompletion {
        &self.completion
    }

    /// The geofence verdict.
    #[must_use]
    pub const fn verification(&self) -> VerificationResult {
        self.verification
    }

    /// Whether the submission completed the task.
    #[must_use]
    pub const fn is_verified(&self) -> bool {
        self.completion.completion_verified
    }

    /// Consumes the outcome and returns the completion record.
    #[must_use]
    pub fn into_completion(self) -> TaskCompletion {
        self.completion
    }
}
