//! Error types for the IR crate.

use crate::qubit::QubitId;
use thiserror::Error;

/// Errors that can occur in IR operations.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum IrError {
    /// Qubit outside the circuit's wire range.
    #[error("Qubit {qubit} out of range for circuit with {num_qubits} qubits")]
    QubitOutOfRange {
        /// The offending qubit.
        qubit: QubitId,
        /// The circuit's wire count.
        num_qubits: usize,
    },

    /// Duplicate qubit in one operation.
    #[error("Duplicate qubit {qubit} in operation '{name}'")]
    DuplicateQubit {
        /// The duplicate qubit.
        qubit: QubitId,
        /// Name of the operation.
        name: String,
    },

    /// Gate requires a different number of qubits.
    #[error("Gate '{gate_name}' requires {expected} qubits, got {got}")]
    QubitCountMismatch {
        /// Name of the gate.
        gate_name: String,
        /// Expected number of qubits.
        expected: u32,
        /// Actual number of qubits provided.
        got: u32,
    },

    /// A block's wire count does not match its qubit mapping.
    #[error("Block with {block_qubits} wires cannot be applied at {mapping_len} qubits")]
    BlockMappingMismatch {
        /// The block's wire count.
        block_qubits: usize,
        /// The length of the supplied mapping.
        mapping_len: usize,
    },
}

/// Result type for IR operations.
pub type IrResult<T> = Result<T, IrError>;
