//! Rotation merging.

use quilt_ir::{Circuit, Gate, Instruction, InstructionKind};
use tracing::debug;

use crate::error::CompileResult;
use crate::pass::Pass;

/// Merges adjacent same-axis rotations and drops the ones that are
/// (numerically) the identity.
///
/// `rz(a) · rz(b)` on the same wire becomes `rz(a + b)`, likewise for
/// `rx`, `ry`, `p`, `crz` and `cp` with matching operands. Rotations
/// with `|angle| < tolerance` are removed.
pub struct MergeRotations {
    tolerance: f64,
}

impl MergeRotations {
    /// Create the pass with the default angle tolerance.
    pub fn new() -> Self {
        Self { tolerance: 1e-10 }
    }

    /// Override the angle tolerance below which a rotation is dropped.
    #[must_use]
    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance;
        self
    }
}

impl Default for MergeRotations {
    fn default() -> Self {
        Self::new()
    }
}

impl Pass for MergeRotations {
    fn run(&self, circuit: &mut Circuit) -> CompileResult<()> {
        let mut instructions = circuit.instructions().to_vec();
        let before = instructions.len();

        loop {
            let Some((i, j, merged)) = find_mergeable_pair(&instructions) else {
                break;
            };
            instructions.remove(j);
            instructions[i].kind = InstructionKind::Gate(merged);
        }

        instructions.retain(|inst| !self.is_null_rotation(inst));

        if instructions.len() != before {
            debug!(removed = before - instructions.len(), "merged rotations");
            let mut rebuilt = Circuit::with_size(circuit.name(), circuit.num_qubits());
            for inst in instructions {
                rebuilt.push(inst)?;
            }
            *circuit = rebuilt;
        }
        Ok(())
    }

    fn name(&self) -> &str {
        "merge-rotations"
    }
}

impl MergeRotations {
    fn is_null_rotation(&self, inst: &Instruction) -> bool {
        match inst.as_gate() {
            Some(
                Gate::Rx(t) | Gate::Ry(t) | Gate::Rz(t) | Gate::P(t) | Gate::CRz(t) | Gate::CP(t),
            ) => t.abs() < self.tolerance,
            _ => false,
        }
    }
}

/// Find adjacent rotations `(i, j)` on identical operands with the same
/// axis, together with their merged gate.
fn find_mergeable_pair(instructions: &[Instruction]) -> Option<(usize, usize, Gate)> {
    for (i, inst) in instructions.iter().enumerate() {
        let Some(gate) = inst.as_gate() else { continue };
        if !is_rotation(gate) {
            continue;
        }

        for (j, other) in instructions.iter().enumerate().skip(i + 1) {
            let overlaps = other.qubits.iter().any(|q| inst.qubits.contains(q));
            if !overlaps {
                continue;
            }
            if other.qubits == inst.qubits {
                if let Some(merged) = other.as_gate().and_then(|g| merge(gate, g)) {
                    return Some((i, j, merged));
                }
            }
            break;
        }
    }
    None
}

fn is_rotation(gate: &Gate) -> bool {
    matches!(
        gate,
        Gate::Rx(_) | Gate::Ry(_) | Gate::Rz(_) | Gate::P(_) | Gate::CRz(_) | Gate::CP(_)
    )
}

fn merge(a: &Gate, b: &Gate) -> Option<Gate> {
    match (a, b) {
        (Gate::Rx(x), Gate::Rx(y)) => Some(Gate::Rx(x + y)),
        (Gate::Ry(x), Gate::Ry(y)) => Some(Gate::Ry(x + y)),
        (Gate::Rz(x), Gate::Rz(y)) => Some(Gate::Rz(x + y)),
        (Gate::P(x), Gate::P(y)) => Some(Gate::P(x + y)),
        (Gate::CRz(x), Gate::CRz(y)) => Some(Gate::CRz(x + y)),
        (Gate::CP(x), Gate::CP(y)) => Some(Gate::CP(x + y)),
        _ => None,
    }
}
