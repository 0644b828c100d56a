//! Quantum gate types.

use serde::{Deserialize, Serialize};

/// The gates Quilt understands, with concrete rotation angles.
///
/// Angles are plain `f64` radians; Quilt circuits are always fully bound,
/// there are no symbolic parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Gate {
    // Single-qubit Pauli gates
    /// Identity gate.
    I,
    /// Pauli-X gate.
    X,
    /// Pauli-Y gate.
    Y,
    /// Pauli-Z gate.
    Z,

    // Single-qubit Clifford gates
    /// Hadamard gate.
    H,
    /// S gate (sqrt(Z)).
    S,
    /// S-dagger gate.
    Sdg,
    /// T gate (fourth root of Z).
    T,
    /// T-dagger gate.
    Tdg,
    /// sqrt(X) gate.
    SX,
    /// sqrt(X)-dagger gate.
    SXdg,

    // Single-qubit rotation gates
    /// Rotation around X axis.
    Rx(f64),
    /// Rotation around Y axis.
    Ry(f64),
    /// Rotation around Z axis.
    Rz(f64),
    /// Phase gate.
    P(f64),
    /// Universal single-qubit gate U(θ, φ, λ).
    U(f64, f64, f64),

    // Two-qubit gates
    /// Controlled-X (CNOT) gate.
    CX,
    /// Controlled-Y gate.
    CY,
    /// Controlled-Z gate.
    CZ,
    /// SWAP gate.
    Swap,
    /// Controlled rotation around Z.
    CRz(f64),
    /// Controlled phase gate.
    CP(f64),

    // Three-qubit gates
    /// Toffoli gate (CCX).
    CCX,
}

impl Gate {
    /// Get the name of this gate.
    #[inline]
    pub fn name(&self) -> &'static str {
        match self {
            Gate::I => "id",
            Gate::X => "x",
            Gate::Y => "y",
            Gate::Z => "z",
            Gate::H => "h",
            Gate::S => "s",
            Gate::Sdg => "sdg",
            Gate::T => "t",
            Gate::Tdg => "tdg",
            Gate::SX => "sx",
            Gate::SXdg => "sxdg",
            Gate::Rx(_) => "rx",
            Gate::Ry(_) => "ry",
            Gate::Rz(_) => "rz",
            Gate::P(_) => "p",
            Gate::U(_, _, _) => "u",
            Gate::CX => "cx",
            Gate::CY => "cy",
            Gate::CZ => "cz",
            Gate::Swap => "swap",
            Gate::CRz(_) => "crz",
            Gate::CP(_) => "cp",
            Gate::CCX => "ccx",
        }
    }

    /// Get the number of qubits this gate operates on.
    #[inline]
    pub fn num_qubits(&self) -> u32 {
        match self {
            Gate::I
            | Gate::X
            | Gate::Y
            | Gate::Z
            | Gate::H
            | Gate::S
            | Gate::Sdg
            | Gate::T
            | Gate::Tdg
            | Gate::SX
            | Gate::SXdg
            | Gate::Rx(_)
            | Gate::Ry(_)
            | Gate::Rz(_)
            | Gate::P(_)
            | Gate::U(_, _, _) => 1,

            Gate::CX | Gate::CY | Gate::CZ | Gate::Swap | Gate::CRz(_) | Gate::CP(_) => 2,

            Gate::CCX => 3,
        }
    }

    /// Check if this gate acts on more than one wire (entangling).
    #[inline]
    pub fn is_multi_qubit(&self) -> bool {
        self.num_qubits() > 1
    }

    /// Get the parameters of this gate.
    pub fn params(&self) -> Vec<f64> {
        match self {
            Gate::Rx(t) | Gate::Ry(t) | Gate::Rz(t) | Gate::P(t) | Gate::CRz(t) | Gate::CP(t) => {
                vec![*t]
            }
            Gate::U(t, p, l) => vec![*t, *p, *l],
            _ => vec![],
        }
    }

    /// The inverse of this gate, if it is expressible in the gate set.
    ///
    /// Used by cancellation passes: `g · g.inverse() = I`.
    pub fn inverse(&self) -> Option<Gate> {
        match self {
            Gate::I => Some(Gate::I),
            Gate::X => Some(Gate::X),
            Gate::Y => Some(Gate::Y),
            Gate::Z => Some(Gate::Z),
            Gate::H => Some(Gate::H),
            Gate::S => Some(Gate::Sdg),
            Gate::Sdg => Some(Gate::S),
            Gate::T => Some(Gate::Tdg),
            Gate::Tdg => Some(Gate::T),
            Gate::SX => Some(Gate::SXdg),
            Gate::SXdg => Some(Gate::SX),
            Gate::Rx(t) => Some(Gate::Rx(-t)),
            Gate::Ry(t) => Some(Gate::Ry(-t)),
            Gate::Rz(t) => Some(Gate::Rz(-t)),
            Gate::P(t) => Some(Gate::P(-t)),
            Gate::CX => Some(Gate::CX),
            Gate::CY => Some(Gate::CY),
            Gate::CZ => Some(Gate::CZ),
            Gate::Swap => Some(Gate::Swap),
            Gate::CRz(t) => Some(Gate::CRz(-t)),
            Gate::CP(t) => Some(Gate::CP(-t)),
            Gate::CCX => Some(Gate::CCX),
            Gate::U(_, _, _) => None,
        }
    }
}
