//! Commuting Z-rotations past control wires.

use quilt_ir::{Circuit, Gate};
use tracing::debug;

use crate::error::CompileResult;
use crate::pass::Pass;

/// Pushes `rz`/`p` gates rightward past gates they commute with: the
/// control wire of `cx`/`crz`/`cp`, and either wire of `cz`.
///
/// On its own this changes nothing measurable; its purpose is to bring
/// commuting rotations next to each other so [`MergeRotations`] and
/// [`CancelInversePairs`] can fire.
///
/// [`MergeRotations`]: crate::passes::MergeRotations
/// [`CancelInversePairs`]: crate::passes::CancelInversePairs
pub struct CommuteRzThroughControl;

impl Pass for CommuteRzThroughControl {
    fn name(&self) -> &str {
        "commute-rz-through-control"
    }

    fn run(&self, circuit: &mut Circuit) -> CompileResult<()> {
        let mut instructions = circuit.instructions().to_vec();
        let mut swaps = 0usize;

        // Bubble rotations rightward. One sweep per instruction bounds
        // the walk; the merging passes run afterwards anyway.
        for _ in 0..instructions.len() {
            let mut changed = false;
            for i in 0..instructions.len().saturating_sub(1) {
                if can_commute(&instructions[i], &instructions[i + 1]) {
                    instructions.swap(i, i + 1);
                    swaps += 1;
                    changed = true;
                }
            }
            if !changed {
                break;
            }
        }

        if swaps > 0 {
            debug!(swaps, "commuted rotations past controls");
            let mut rebuilt = Circuit::with_size(circuit.name(), circuit.num_qubits());
            for inst in instructions {
                rebuilt.push(inst)?;
            }
            *circuit = rebuilt;
        }
        Ok(())
    }
}

/// Whether `a` is a Z-rotation that commutes through `b` and should hop
/// over it. Only hop when `b` actually shares the wire, otherwise the
/// sweep would shuffle unrelated gates forever.
fn can_commute(a: &quilt_ir::Instruction, b: &quilt_ir::Instruction) -> bool {
    let Some(Gate::Rz(_) | Gate::P(_)) = a.as_gate() else {
        return false;
    };
    let wire = a.qubits[0];
    let Some(gate_b) = b.as_gate() else {
        return false;
    };

    match gate_b {
        Gate::CX | Gate::CRz(_) | Gate::CP(_) => b.qubits[0] == wire,
        Gate::CZ => b.qubits.contains(&wire),
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::passes::MergeRotations;
    use quilt_ir::QubitId;

    #[test]
    fn test_rz_hops_over_control() {
        let mut circuit = Circuit::with_size("test", 2);
        circuit.rz(0.5, QubitId(0)).unwrap();
        circuit.cx(QubitId(0), QubitId(1)).unwrap();

        CommuteRzThroughControl.run(&mut circuit).unwrap();
        assert_eq!(circuit.instructions()[0].name(), "cx");
        assert_eq!(circuit.instructions()[1].name(), "rz");
    }

    #[test]
    fn test_rz_on_target_stays() {
        let mut circuit = Circuit::with_size("test", 2);
        circuit.rz(0.5, QubitId(1)).unwrap();
        circuit.cx(QubitId(0), QubitId(1)).unwrap();

        CommuteRzThroughControl.run(&mut circuit).unwrap();
        assert_eq!(circuit.instructions()[0].name(), "rz");
    }

    #[test]
    fn test_commute_enables_merge() {
        // rz cx rz on the control wire merges to cx rz after commuting.
        let mut circuit = Circuit::with_size("test", 2);
        circuit.rz(0.3, QubitId(0)).unwrap();
        circuit.cx(QubitId(0), QubitId(1)).unwrap();
        circuit.rz(0.4, QubitId(0)).unwrap();

        CommuteRzThroughControl.run(&mut circuit).unwrap();
        MergeRotations::new().run(&mut circuit).unwrap();
        assert_eq!(circuit.num_gates(), 2);
    }
}
