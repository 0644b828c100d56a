//! Circuit partitioning for Quilt.
//!
//! Cuts a circuit into blocks of bounded wire count so each block can be
//! resynthesized independently, and merges the optimized blocks back
//! together. Two strategies are provided:
//!
//! - [`ScanPartitioner`]: one open block, strict program order.
//! - [`QuickPartitioner`]: many open blocks, preserves per-wire order and
//!   packs parallel structure tighter.
//!
//! ```rust
//! use quilt_ir::Circuit;
//! use quilt_partition::{CircuitAssembler, Partitioner, ScanPartitioner};
//!
//! let circuit = Circuit::qft(5).unwrap();
//! let parts = ScanPartitioner::new(3).unwrap().partition(&circuit).unwrap();
//! assert!(parts.blocks.iter().all(|b| b.location.len() <= 3));
//!
//! let merged = CircuitAssembler::new("qft", 5).assemble(&parts.blocks).unwrap();
//! assert_eq!(merged.num_gates(), circuit.num_gates());
//! ```

mod assembler;
mod block;
mod builder;
mod error;
mod location;
mod quick;
mod scan;
mod strategy;

pub use assembler::CircuitAssembler;
pub use block::{Block, PartitionedCircuit};
pub use error::{PartitionError, PartitionResult};
pub use location::Location;
pub use quick::QuickPartitioner;
pub use scan::ScanPartitioner;
pub use strategy::{PartitionStrategy, Partitioner};
