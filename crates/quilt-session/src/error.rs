//! Error types for the compiler session.

use thiserror::Error;

use crate::session::TaskId;

/// Errors that can occur in session operations.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum SessionError {
    /// The worker runtime could not be started.
    #[error("Failed to start session runtime: {0}")]
    Init(#[from] std::io::Error),

    /// No task with this id is pending. Results are consumed on
    /// retrieval, so asking twice for the same task also lands here.
    #[error("Unknown task: {0}")]
    UnknownTask(TaskId),

    /// The task ran and returned a compilation error.
    #[error("Task failed: {0}")]
    TaskFailed(#[from] quilt_compile::CompileError),

    /// The task panicked or was aborted before producing a result.
    #[error("Task panicked: {0}")]
    TaskPanicked(String),
}

/// Result type for session operations.
pub type SessionResult<T> = Result<T, SessionError>;
