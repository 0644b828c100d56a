//! Error types for partitioning.

use thiserror::Error;

/// Errors that can occur during partitioning.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum PartitionError {
    /// Block width too small to hold multi-qubit gates.
    #[error("Block width must be at least 2, got {0}")]
    InvalidBlockWidth(usize),

    /// An instruction touches more wires than a block can hold.
    #[error("Instruction '{name}' touches {width} wires, exceeding block width {limit}")]
    WideInstruction {
        name: String,
        width: usize,
        limit: usize,
    },

    /// Unknown partitioner name.
    #[error("Unknown partitioner: {0}")]
    UnknownStrategy(String),

    /// IR error during block construction or reassembly.
    #[error("Circuit error: {0}")]
    Circuit(#[from] quilt_ir::IrError),
}

/// Result type for partitioning operations.
pub type PartitionResult<T> = Result<T, PartitionError>;
