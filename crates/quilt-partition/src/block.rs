//! Partition blocks and the partitioned-circuit container.

use quilt_ir::Circuit;
use serde::{Deserialize, Serialize};

use crate::location::Location;

/// One block of a partitioned circuit: a sub-circuit on local wires plus
/// the location mapping its wires back to the original circuit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Block {
    /// The block's sub-circuit, on wires `0..location.len()`.
    pub circuit: Circuit,
    /// The original wires the block occupies.
    pub location: Location,
}

impl Block {
    /// Number of gates in the block.
    pub fn num_gates(&self) -> usize {
        self.circuit.num_gates()
    }

    /// Number of multi-qubit gates in the block.
    pub fn num_multi_qubit_gates(&self) -> usize {
        self.circuit.num_multi_qubit_gates()
    }
}

/// A circuit cut into width-bounded blocks.
///
/// Merging the blocks back in order reproduces the original gate
/// sequence up to commuting reorderings of wire-disjoint gates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PartitionedCircuit {
    /// Wire count of the original circuit.
    pub num_qubits: usize,
    /// The blocks, in merge order.
    pub blocks: Vec<Block>,
}

impl PartitionedCircuit {
    /// Number of blocks.
    pub fn num_blocks(&self) -> usize {
        self.blocks.len()
    }

    /// Total gate count across all blocks.
    pub fn num_gates(&self) -> usize {
        self.blocks.iter().map(Block::num_gates).sum()
    }

    /// Per-block multi-qubit gate counts, in merge order.
    pub fn multi_qubit_gate_counts(&self) -> Vec<usize> {
        self.blocks
            .iter()
            .map(Block::num_multi_qubit_gates)
            .collect()
    }
}
