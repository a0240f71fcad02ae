//! Application services for task lifecycle orchestration.

mod lifecycle;

pub use lifecycle::{
    CreateTaskRequest, SubmitCompletionRequest, TaskLifecycleError, TaskLifecycleResult,
    TaskLifecycleService,
};
