//! Validated scalar values carried by a task.

use super::TaskDomainError;
use serde::{Deserialize, Serialize};
use std::fmt;

const MAX_TITLE_LENGTH: usize = 200;
const MAX_DESCRIPTION_LENGTH: usize = 1000;

/// Task title, 1 to 200 characters after trimming.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaskTitle(String);

impl TaskTitle {
    /// Creates a validated title.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::EmptyTitle`] when the value is blank or
    /// [`TaskDomainError::TitleTooLong`] when it exceeds 200 characters.
    pub fn new(value: impl Into<String>) -> Result<Self, TaskDomainError> {
        let normalized = bounded_text(
            &value.into(),
            MAX_TITLE_LENGTH,
            TaskDomainError::EmptyTitle,
            TaskDomainError::TitleTooLong,
        )?;
        Ok(Self(normalized))
    }

    /// Returns the title as `str`.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TaskTitle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Task description, 1 to 1000 characters after trimming.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaskDescription(String);

impl TaskDescription {
    /// Creates a validated description.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::EmptyDescription`] when the value is blank
    /// or [`TaskDomainError::DescriptionTooLong`] when it exceeds 1000
    /// characters.
    pub fn new(value: impl Into<String>) -> Result<Self, TaskDomainError> {
        let normalized = bounded_text(
            &value.into(),
            MAX_DESCRIPTION_LENGTH,
            TaskDomainError::EmptyDescription,
            TaskDomainError::DescriptionTooLong,
        )?;
        Ok(Self(normalized))
    }

    /// Returns the description as `str`.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Trims `raw` and checks it is non-empty and at most `max` characters.
fn bounded_text(
    raw: &str,
    max: usize,
    empty_error: TaskDomainError,
    too_long_error: fn(usize) -> TaskDomainError,
) -> Result<String, TaskDomainError> {
    let normalized = raw.trim();
    if normalized.is_empty() {
        return Err(empty_error);
    }
    let length = normalized.chars().count();
    if length > max {
        return Err(too_long_error(length));
    }
    Ok(normalized.to_owned())
}

/// Geofence radius in meters; finite and strictly positive.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub struct CompletionRadius(f64);

impl CompletionRadius {
    /// Radius applied when a task is created without one.
    pub const DEFAULT_METERS: f64 = 100.0;

    /// Creates a validated radius.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::InvalidCompletionRadius`] when the value is
    /// zero, negative, infinite or `NaN`.
    pub fn new(meters: f64) -> Result<Self, TaskDomainError> {
        if meters.is_finite() && meters > 0.0 {
            Ok(Self(meters))
        } else {
            Err(TaskDomainError::InvalidCompletionRadius(meters))
        }
    }

    /// Returns the radius in meters.
    #[must_use]
    pub const fn meters(self) -> f64 {
        self.0
    }
}

impl Default for CompletionRadius {
    fn default() -> Self {
        Self(Self::DEFAULT_METERS)
    }
}

impl TryFrom<f64> for CompletionRadius {
    type Error = TaskDomainError;

    fn try_from(meters: f64) -> Result<Self, Self::Error> {
        Self::new(meters)
    }
}

impl From<CompletionRadius> for f64 {
    fn from(radius: CompletionRadius) -> Self {
        radius.0
    }
}
