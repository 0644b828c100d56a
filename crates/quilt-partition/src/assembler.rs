//! Reassembling optimized blocks into a full circuit.

use quilt_ir::Circuit;
use tracing::debug;

use crate::block::Block;
use crate::error::PartitionResult;

/// Merges blocks back into a full-width circuit.
///
/// Blocks are appended in order, each remapped through its location, so
/// the merged circuit has exactly the concatenation of the block gate
/// sequences on original wires.
#[derive(Debug, Clone)]
pub struct CircuitAssembler {
    name: String,
    num_qubits: usize,
}

impl CircuitAssembler {
    /// Create an assembler producing a circuit with the given name and
    /// wire count.
    pub fn new(name: impl Into<String>, num_qubits: usize) -> Self {
        Self {
            name: name.into(),
            num_qubits,
        }
    }

    /// Merge the blocks into one circuit.
    pub fn assemble<'a>(
        &self,
        blocks: impl IntoIterator<Item = &'a Block>,
    ) -> PartitionResult<Circuit> {
        let mut circuit = Circuit::with_size(self.name.clone(), self.num_qubits);
        let mut merged = 0usize;
        for block in blocks {
            circuit.append_block(&block.circuit, block.location.as_slice())?;
            merged += 1;
        }
        debug!(blocks = merged, qubits = self.num_qubits, "assembled circuit");
        Ok(circuit)
    }
}
