//! Error types for the benchmark pipeline.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur in the benchmark pipeline.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum BenchError {
    /// The circuit source could not be read or parsed.
    #[error("Invalid circuit source '{name}': {reason}")]
    InvalidCircuitSource { name: String, reason: String },

    /// An input or output path does not exist or is not usable.
    #[error("Path not found: {0}")]
    PathNotFound(PathBuf),

    /// A scheduled task failed; the whole run is abandoned.
    #[error("Scheduler failure: {0}")]
    Scheduler(#[from] quilt_session::SessionError),

    /// Partitioning failed.
    #[error("Partitioning failure: {0}")]
    Partition(#[from] quilt_partition::PartitionError),

    /// Baseline compilation failed.
    #[error("Compilation failure: {0}")]
    Compile(#[from] quilt_compile::CompileError),

    /// Circuit reassembly or rewriting failed.
    #[error("Circuit error: {0}")]
    Circuit(#[from] quilt_ir::IrError),

    /// A label in the run configuration did not parse.
    #[error("Unknown replace filter '{0}' (expected always, less-than or less-than-multi)")]
    UnknownFilter(String),

    /// Result serialization failed.
    #[error("Serialization failure: {0}")]
    Serialization(String),

    /// File output failed.
    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl BenchError {
    /// Wrap a parse error with the offending source name.
    pub fn invalid_source(name: impl Into<String>, err: impl std::fmt::Display) -> Self {
        Self::InvalidCircuitSource {
            name: name.into(),
            reason: err.to_string(),
        }
    }
}

impl From<serde_json::Error> for BenchError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}

/// Result type for benchmark operations.
pub type BenchResult<T> = Result<T, BenchError>;
