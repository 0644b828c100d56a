//! Task scheduling for Quilt's partition-optimize-merge pipeline.
//!
//! A [`CompilerSession`] owns a pool of worker threads. Block
//! resynthesis jobs ([`Workflow`]s) are submitted without blocking and
//! their results retrieved by [`TaskId`], each exactly once.
//!
//! ```rust
//! use quilt_compile::SynthesisAlgorithm;
//! use quilt_ir::Circuit;
//! use quilt_session::{CompilerSession, Workflow};
//!
//! let session = CompilerSession::new().unwrap();
//! let id = session.submit(Workflow::new(
//!     Circuit::ghz(3).unwrap(),
//!     SynthesisAlgorithm::Greedy,
//! ));
//! let optimized = session.result(id).unwrap();
//! assert_eq!(optimized.num_qubits(), 3);
//! session.close();
//! ```

mod error;
mod session;
mod workflow;

pub use error::{SessionError, SessionResult};
pub use session::{CompilerSession, TaskId};
pub use workflow::Workflow;
