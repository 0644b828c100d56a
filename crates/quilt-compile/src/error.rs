//! Error types for compilation.

use thiserror::Error;

/// Errors that can occur during compilation.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum CompileError {
    /// Unknown synthesis algorithm name.
    #[error("Unknown synthesis algorithm: {0}")]
    UnknownAlgorithm(String),

    /// Basis translation did not converge.
    #[error("Basis translation failed: gate '{0}' not reducible to the target basis")]
    Translation(String),

    /// IR error during circuit rewriting.
    #[error("Circuit error: {0}")]
    Circuit(#[from] quilt_ir::IrError),
}

/// Result type for compilation operations.
pub type CompileResult<T> = Result<T, CompileError>;
