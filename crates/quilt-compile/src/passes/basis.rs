//! Translation to the {x, sx, rz, cx} basis.

use std::f64::consts::{FRAC_PI_2, FRAC_PI_4, PI};

use quilt_ir::{Circuit, Gate, Instruction, QubitId};
use tracing::debug;

use crate::error::{CompileError, CompileResult};
use crate::pass::Pass;

/// Maximum expansion rounds before giving up. Every rule strictly lowers
/// the gates toward the basis, so a handful of rounds always suffices
/// (`ccx` is the deepest chain: ccx → h/t/cx → u/rz → rz/sx).
const MAX_ROUNDS: usize = 10;

/// Rewrites every gate into the `{x, sx, rz, cx}` basis.
///
/// Single-qubit gates go through the ZXZXZ form
/// `U(θ,φ,λ) = rz(φ+π) · sx · rz(θ+π) · sx · rz(λ)`; two- and
/// three-qubit gates expand through standard `cx` decompositions.
/// The pass performs no optimization, so a circuit already in the basis
/// is returned unchanged and translation is idempotent.
pub struct BasisTranslation;

impl Pass for BasisTranslation {
    fn name(&self) -> &str {
        "basis-translation"
    }

    fn run(&self, circuit: &mut Circuit) -> CompileResult<()> {
        for _ in 0..MAX_ROUNDS {
            if circuit
                .instructions()
                .iter()
                .all(|inst| inst.as_gate().is_none_or(in_basis))
            {
                return Ok(());
            }

            let mut rebuilt = Circuit::with_size(circuit.name(), circuit.num_qubits());
            for inst in circuit.instructions() {
                match inst.as_gate() {
                    Some(gate) if !in_basis(gate) => {
                        for (g, qubit_indices) in expand(gate) {
                            let qubits: Vec<QubitId> =
                                qubit_indices.iter().map(|&k| inst.qubits[k]).collect();
                            rebuilt.push(Instruction::gate(g, qubits))?;
                        }
                    }
                    _ => rebuilt.push(inst.clone())?,
                }
            }
            *circuit = rebuilt;
            debug!(ops = circuit.num_ops(), "basis expansion round");
        }

        let offender = circuit
            .instructions()
            .iter()
            .filter_map(Instruction::as_gate)
            .find(|g| !in_basis(g))
            .map_or("?", Gate::name);
        Err(CompileError::Translation(offender.to_string()))
    }
}

fn in_basis(gate: &Gate) -> bool {
    matches!(gate, Gate::X | Gate::SX | Gate::Rz(_) | Gate::CX)
}

/// ZXZXZ decomposition of `U(θ, φ, λ)`, in circuit order.
fn zxzxz(theta: f64, phi: f64, lambda: f64) -> Vec<(Gate, Vec<usize>)> {
    vec![
        (Gate::Rz(lambda), vec![0]),
        (Gate::SX, vec![0]),
        (Gate::Rz(theta + PI), vec![0]),
        (Gate::SX, vec![0]),
        (Gate::Rz(phi + PI), vec![0]),
    ]
}

/// One expansion step. Output gates may still be outside the basis; the
/// pass iterates until everything lands.
fn expand(gate: &Gate) -> Vec<(Gate, Vec<usize>)> {
    match *gate {
        // Identity carries no operation.
        Gate::I => vec![],

        // Phase-only gates become rz directly (global phase dropped).
        Gate::Z => vec![(Gate::Rz(PI), vec![0])],
        Gate::S => vec![(Gate::Rz(FRAC_PI_2), vec![0])],
        Gate::Sdg => vec![(Gate::Rz(-FRAC_PI_2), vec![0])],
        Gate::T => vec![(Gate::Rz(FRAC_PI_4), vec![0])],
        Gate::Tdg => vec![(Gate::Rz(-FRAC_PI_4), vec![0])],
        Gate::P(lambda) => vec![(Gate::Rz(lambda), vec![0])],

        // sxdg = rz(pi) · sx · rz(pi) up to global phase.
        Gate::SXdg => vec![
            (Gate::Rz(PI), vec![0]),
            (Gate::SX, vec![0]),
            (Gate::Rz(PI), vec![0]),
        ],

        // Remaining single-qubit gates through ZXZXZ.
        Gate::H => zxzxz(FRAC_PI_2, 0.0, PI),
        Gate::Y => zxzxz(PI, FRAC_PI_2, FRAC_PI_2),
        Gate::Rx(theta) => zxzxz(theta, -FRAC_PI_2, FRAC_PI_2),
        Gate::Ry(theta) => zxzxz(theta, 0.0, 0.0),
        Gate::U(theta, phi, lambda) => zxzxz(theta, phi, lambda),

        Gate::CZ => vec![
            (Gate::H, vec![1]),
            (Gate::CX, vec![0, 1]),
            (Gate::H, vec![1]),
        ],
        Gate::CY => vec![
            (Gate::Sdg, vec![1]),
            (Gate::CX, vec![0, 1]),
            (Gate::S, vec![1]),
        ],
        Gate::Swap => vec![
            (Gate::CX, vec![0, 1]),
            (Gate::CX, vec![1, 0]),
            (Gate::CX, vec![0, 1]),
        ],
        Gate::CRz(theta) => vec![
            (Gate::Rz(theta / 2.0), vec![1]),
            (Gate::CX, vec![0, 1]),
            (Gate::Rz(-theta / 2.0), vec![1]),
            (Gate::CX, vec![0, 1]),
        ],
        Gate::CP(lambda) => vec![
            (Gate::Rz(lambda / 2.0), vec![0]),
            (Gate::CX, vec![0, 1]),
            (Gate::Rz(-lambda / 2.0), vec![1]),
            (Gate::CX, vec![0, 1]),
            (Gate::Rz(lambda / 2.0), vec![1]),
        ],

        // Standard Toffoli decomposition over {h, t, tdg, cx}.
        Gate::CCX => vec![
            (Gate::H, vec![2]),
            (Gate::CX, vec![1, 2]),
            (Gate::Tdg, vec![2]),
            (Gate::CX, vec![0, 2]),
            (Gate::T, vec![2]),
            (Gate::CX, vec![1, 2]),
            (Gate::Tdg, vec![2]),
            (Gate::CX, vec![0, 2]),
            (Gate::T, vec![1]),
            (Gate::T, vec![2]),
            (Gate::H, vec![2]),
            (Gate::CX, vec![0, 1]),
            (Gate::T, vec![0]),
            (Gate::Tdg, vec![1]),
            (Gate::CX, vec![0, 1]),
        ],

        // Already in the basis; expand() is never called for these.
        Gate::X | Gate::SX | Gate::Rz(_) | Gate::CX => vec![(gate.clone(), vec![0])],
    }
}
