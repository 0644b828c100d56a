//! Compilation passes and block resynthesis for Quilt.
//!
//! The pass layer rewrites circuits in place: inverse-pair cancellation,
//! rotation merging, control-wire commutation, and translation to the
//! `{x, sx, rz, cx}` basis. On top of it sit the block resynthesis
//! algorithms the partition-optimize-merge pipeline schedules per block.
//!
//! ```rust
//! use quilt_compile::{PassManagerBuilder, canonicalize};
//! use quilt_ir::Circuit;
//!
//! let mut circuit = Circuit::qft(4).unwrap();
//! PassManagerBuilder::new()
//!     .with_optimization_level(2)
//!     .build()
//!     .run(&mut circuit)
//!     .unwrap();
//!
//! // Everything ends up in the reporting basis.
//! assert!(circuit.instructions().iter().all(|i| {
//!     matches!(i.name(), "x" | "sx" | "rz" | "cx")
//! }));
//! ```

mod error;
mod manager;
mod pass;
pub mod passes;
mod synthesis;

pub use error::{CompileError, CompileResult};
pub use manager::{PassManager, PassManagerBuilder, canonicalize};
pub use pass::Pass;
pub use synthesis::{GreedySynthesis, LookaheadSynthesis, SynthesisAlgorithm, Synthesizer};
