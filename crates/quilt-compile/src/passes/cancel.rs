//! Inverse-pair cancellation.

use quilt_ir::{Circuit, Instruction};
use tracing::debug;

use crate::error::CompileResult;
use crate::pass::Pass;

/// Removes adjacent gate pairs `g · g⁻¹`.
///
/// Two gates are adjacent when no other instruction touching any of
/// their wires sits between them. The pass iterates to a fixpoint, so
/// cancellations that expose further pairs are picked up.
pub struct CancelInversePairs;

impl Pass for CancelInversePairs {
    fn name(&self) -> &str {
        "cancel-inverse-pairs"
    }

    fn run(&self, circuit: &mut Circuit) -> CompileResult<()> {
        let mut instructions = circuit.instructions().to_vec();
        let mut removed_total = 0usize;

        loop {
            match find_cancelling_pair(&instructions) {
                Some((i, j)) => {
                    // Remove j first so i stays valid.
                    instructions.remove(j);
                    instructions.remove(i);
                    removed_total += 2;
                }
                None => break,
            }
        }

        if removed_total > 0 {
            debug!(removed = removed_total, "cancelled inverse pairs");
            let mut rebuilt = Circuit::with_size(circuit.name(), circuit.num_qubits());
            for inst in instructions {
                rebuilt.push(inst)?;
            }
            *circuit = rebuilt;
        }
        Ok(())
    }
}

/// Find the first pair `(i, j)` of adjacent mutually-inverse gates.
fn find_cancelling_pair(instructions: &[Instruction]) -> Option<(usize, usize)> {
    for (i, inst) in instructions.iter().enumerate() {
        let Some(gate) = inst.as_gate() else { continue };
        let Some(inverse) = gate.inverse() else {
            continue;
        };

        for (j, other) in instructions.iter().enumerate().skip(i + 1) {
            let overlaps = other.qubits.iter().any(|q| inst.qubits.contains(q));
            if !overlaps {
                continue;
            }
            // The first wire-sharing instruction decides: either it
            // cancels, or it blocks.
            if other.qubits == inst.qubits && other.as_gate() == Some(&inverse) {
                return Some((i, j));
            }
            break;
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use quilt_ir::QubitId;

    #[test]
    fn test_adjacent_pair_cancels() {
        let mut circuit = Circuit::with_size("test", 2);
        circuit.h(QubitId(0)).unwrap();
        circuit.h(QubitId(0)).unwrap();
        circuit.cx(QubitId(0), QubitId(1)).unwrap();

        CancelInversePairs.run(&mut circuit).unwrap();
        assert_eq!(circuit.num_gates(), 1);
    }

    #[test]
    fn test_s_sdg_cancels() {
        let mut circuit = Circuit::with_size("test", 1);
        circuit.s(QubitId(0)).unwrap();
        circuit.sdg(QubitId(0)).unwrap();

        CancelInversePairs.run(&mut circuit).unwrap();
        assert!(circuit.is_empty());
    }

    #[test]
    fn test_blocked_pair_survives() {
        let mut circuit = Circuit::with_size("test", 2);
        circuit.h(QubitId(0)).unwrap();
        circuit.cx(QubitId(0), QubitId(1)).unwrap();
        circuit.h(QubitId(0)).unwrap();

        CancelInversePairs.run(&mut circuit).unwrap();
        assert_eq!(circuit.num_gates(), 3);
    }

    #[test]
    fn test_nested_cancellation() {
        // cx h h cx collapses completely once the inner pair goes.
        let mut circuit = Circuit::with_size("test", 2);
        circuit.cx(QubitId(0), QubitId(1)).unwrap();
        circuit.h(QubitId(0)).unwrap();
        circuit.h(QubitId(0)).unwrap();
        circuit.cx(QubitId(0), QubitId(1)).unwrap();

        CancelInversePairs.run(&mut circuit).unwrap();
        assert!(circuit.is_empty());
    }

    #[test]
    fn test_rotation_pair_cancels() {
        let mut circuit = Circuit::with_size("test", 1);
        circuit.rz(0.7, QubitId(0)).unwrap();
        circuit.rz(-0.7, QubitId(0)).unwrap();

        CancelInversePairs.run(&mut circuit).unwrap();
        assert!(circuit.is_empty());
    }
}
