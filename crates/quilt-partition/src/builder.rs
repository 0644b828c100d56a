//! Shared open-block accumulator for the partitioning strategies.

use quilt_ir::{Circuit, Instruction, QubitId};

use crate::block::Block;
use crate::error::PartitionResult;
use crate::location::Location;

/// A block under construction. Operands stay on original wires until
/// [`OpenBlock::finish`] remaps them to local indices.
pub(crate) struct OpenBlock {
    /// Occupied original wires, in first-use order.
    wires: Vec<QubitId>,
    /// Accumulated instructions, on original wires.
    ops: Vec<Instruction>,
}

impl OpenBlock {
    pub(crate) fn new() -> Self {
        Self {
            wires: vec![],
            ops: vec![],
        }
    }

    /// Wire count of the block if `qubits` were added to it.
    pub(crate) fn union_len(&self, qubits: &[QubitId]) -> usize {
        self.wires.len() + qubits.iter().filter(|q| !self.wires.contains(q)).count()
    }

    /// Whether an instruction on `qubits` fits under the width limit.
    pub(crate) fn fits(&self, qubits: &[QubitId], width: usize) -> bool {
        self.union_len(qubits) <= width
    }

    /// The occupied wires.
    pub(crate) fn wires(&self) -> &[QubitId] {
        &self.wires
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.ops.is_empty()
    }

    /// Add an instruction, claiming any wires it touches for the block.
    pub(crate) fn push(&mut self, instruction: Instruction) {
        for q in &instruction.qubits {
            if !self.wires.contains(q) {
                self.wires.push(*q);
            }
        }
        self.ops.push(instruction);
    }

    /// Close the block: remap operands to local wire indices and build
    /// the sub-circuit.
    pub(crate) fn finish(self, name: impl Into<String>) -> PartitionResult<Block> {
        let location = Location::new(self.wires.iter().copied());
        let mut circuit = Circuit::with_size(name, self.wires.len());
        for op in self.ops {
            let qubits: Vec<QubitId> = op
                .qubits
                .iter()
                .map(|q| {
                    // Every operand wire was claimed in push().
                    QubitId::from(location.local_index(*q).unwrap_or_default())
                })
                .collect();
            circuit.push(Instruction {
                kind: op.kind,
                qubits,
            })?;
        }
        Ok(Block { circuit, location })
    }
}
