//! Quilt Circuit Intermediate Representation
//!
//! This crate provides the core data structures for representing quantum
//! circuits in Quilt. A circuit is an ordered sequence of instructions over
//! a fixed number of wires; the ordering encodes the causal dependency
//! between operations that share a wire.
//!
//! # Core Components
//!
//! - **Qubits**: [`QubitId`] for addressing wires
//! - **Gates**: [`Gate`] for the supported gate set with concrete angles
//! - **Instructions**: [`Instruction`] combining gates with their operands,
//!   including nested sub-circuit blocks ([`InstructionKind::Block`])
//! - **Circuit**: [`Circuit`] ordered instruction list with structural
//!   metrics (gate counts, multi-qubit counts, depth)
//!
//! # Example: Building a GHZ state
//!
//! ```rust
//! use quilt_ir::{Circuit, QubitId};
//!
//! let mut circuit = Circuit::with_size("ghz", 3);
//! circuit.h(QubitId(0)).unwrap();
//! circuit.cx(QubitId(0), QubitId(1)).unwrap();
//! circuit.cx(QubitId(1), QubitId(2)).unwrap();
//!
//! assert_eq!(circuit.num_qubits(), 3);
//! assert_eq!(circuit.num_gates(), 3);
//! assert_eq!(circuit.depth(), 3);
//! ```

pub mod circuit;
pub mod error;
pub mod gate;
pub mod instruction;
pub mod qubit;

pub use circuit::Circuit;
pub use error::{IrError, IrResult};
pub use gate::Gate;
pub use instruction::{Instruction, InstructionKind};
pub use qubit::QubitId;
