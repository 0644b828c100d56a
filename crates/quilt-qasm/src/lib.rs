//! `OpenQASM` reader and writer for Quilt.
//!
//! This crate parses the `OpenQASM` 2.0/3.0 subset that circuit benchmark
//! suites are written in, and serializes [`quilt_ir::Circuit`] values back
//! out. Gate parameters are constant-folded at parse time, so parsed
//! circuits are always fully bound.
//!
//! # Example: Parsing
//!
//! ```rust
//! use quilt_qasm::parse;
//!
//! let qasm = r#"
//!     OPENQASM 2.0;
//!     include "qelib1.inc";
//!     qreg q[2];
//!     creg c[2];
//!     h q[0];
//!     cx q[0], q[1];
//!     measure q[0] -> c[0];
//!     measure q[1] -> c[1];
//! "#;
//!
//! let circuit = parse(qasm).unwrap();
//! assert_eq!(circuit.num_qubits(), 2);
//! assert_eq!(circuit.num_gates(), 2);
//! ```
//!
//! # Example: Emitting
//!
//! ```rust
//! use quilt_ir::Circuit;
//! use quilt_qasm::emit;
//!
//! let circuit = Circuit::ghz(3).unwrap();
//! let qasm = emit(&circuit).unwrap();
//! assert!(qasm.contains("OPENQASM 3.0;"));
//! assert!(qasm.contains("cx q[0], q[1];"));
//! ```
//!
//! # Supported Gates
//!
//! Single-qubit: `id`, `x`, `y`, `z`, `h`, `s`, `sdg`, `t`, `tdg`, `sx`, `sxdg`
//!
//! Parameterized: `rx(θ)`, `ry(θ)`, `rz(θ)`, `p(θ)`, `u(θ,φ,λ)` plus the
//! legacy `u1`/`u2`/`u3` spellings
//!
//! Two-qubit: `cx`, `cy`, `cz`, `swap`, `crz(θ)`, `cp(θ)`
//!
//! Three-qubit: `ccx` (Toffoli)

mod emitter;
mod error;
mod lexer;
mod parser;

pub use emitter::{emit, emit_qasm2};
pub use error::{ParseError, ParseResult};
pub use parser::parse;
