//! Domain model for task lifecycle management.
//!
//! The task domain models geofenced task creation, the
//! `Pending -> InProgress -> Completed` state machine and the append-only
//! completion log while keeping infrastructure concerns outside of the
//! domain boundary.

mod completion;
mod error;
mod ids;
mod task;
mod values;

pub use completion::{CompletionOutcome, PersistedCompletionData, TaskCompletion};
pub use error::{ParseTaskStatusError, TaskDomainError, TaskErrorKind};
pub use ids::{CompletionId, TaskId};
pub use task::{NewTask, PersistedTaskData, Task, TaskStatus};
pub use values::{CompletionRadius, TaskDescription, TaskTitle};
