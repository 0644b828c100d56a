//! Greedy multi-block partitioning.

use quilt_ir::Circuit;
use tracing::debug;

use crate::block::PartitionedCircuit;
use crate::builder::OpenBlock;
use crate::error::{PartitionError, PartitionResult};
use crate::strategy::Partitioner;

/// Partitioner that keeps every block open and routes each gate to the
/// most recent block any of its wires touched.
///
/// A gate lands in block `m = max(last_block[w])` over its wires `w`,
/// provided the gate still fits under the width limit there; otherwise it
/// opens a fresh block. Wires that have not been seen yet also open a
/// fresh block.
///
/// Blocks are emitted in creation order. Per-wire gate order is preserved:
/// a wire's gates are only ever assigned to blocks with non-decreasing
/// indices. Gates on disjoint wires may be reordered relative to each
/// other across blocks, which is exactly the commuting freedom the
/// partition is allowed to spend. Compared to the scan strategy this
/// typically produces fewer, fuller blocks on circuits with parallel
/// structure.
#[derive(Debug, Clone)]
pub struct QuickPartitioner {
    block_width: usize,
}

impl QuickPartitioner {
    /// Create a quick partitioner with the given block width.
    pub fn new(block_width: usize) -> PartitionResult<Self> {
        if block_width < 2 {
            return Err(PartitionError::InvalidBlockWidth(block_width));
        }
        Ok(Self { block_width })
    }

    /// The block width limit.
    pub fn block_width(&self) -> usize {
        self.block_width
    }
}

impl Partitioner for QuickPartitioner {
    fn partition(&self, circuit: &Circuit) -> PartitionResult<PartitionedCircuit> {
        let mut open_blocks: Vec<OpenBlock> = Vec::new();
        // Index into open_blocks of the last block each wire was routed to.
        let mut last_block: Vec<Option<usize>> = vec![None; circuit.num_qubits()];

        for inst in circuit.instructions() {
            if !inst.is_gate() {
                debug!(op = inst.name(), "skipping non-gate instruction");
                continue;
            }
            if inst.qubits.len() > self.block_width {
                return Err(PartitionError::WideInstruction {
                    name: inst.name().to_string(),
                    width: inst.qubits.len(),
                    limit: self.block_width,
                });
            }

            let candidate = inst
                .qubits
                .iter()
                .filter_map(|q| last_block[q.index()])
                .max();

            let target = match candidate {
                Some(m) if open_blocks[m].fits(&inst.qubits, self.block_width) => m,
                _ => {
                    open_blocks.push(OpenBlock::new());
                    open_blocks.len() - 1
                }
            };

            open_blocks[target].push(inst.clone());
            for q in &inst.qubits {
                last_block[q.index()] = Some(target);
            }
        }

        let blocks = open_blocks
            .into_iter()
            .enumerate()
            .map(|(i, open)| open.finish(format!("block{i}")))
            .collect::<PartitionResult<Vec<_>>>()?;

        debug!(
            num_blocks = blocks.len(),
            width = self.block_width,
            "quick partitioning complete"
        );

        Ok(PartitionedCircuit {
            num_qubits: circuit.num_qubits(),
            blocks,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use quilt_ir::QubitId;

    #[test]
    fn test_parallel_pairs_fill_separate_blocks() {
        // Two independent CX ladders: quick keeps both blocks open, scan
        // would cut at every alternation.
        let mut circuit = Circuit::with_size("parallel", 4);
        for _ in 0..3 {
            circuit.cx(QubitId(0), QubitId(1)).unwrap();
            circuit.cx(QubitId(2), QubitId(3)).unwrap();
        }

        let partitioner = QuickPartitioner::new(2).unwrap();
        let parts = partitioner.partition(&circuit).unwrap();

        assert_eq!(parts.num_blocks(), 2);
        assert_eq!(parts.blocks[0].num_gates(), 3);
        assert_eq!(parts.blocks[1].num_gates(), 3);
    }

    #[test]
    fn test_per_wire_order_preserved() {
        let circuit = Circuit::qft(5).unwrap();
        let partitioner = QuickPartitioner::new(3).unwrap();
        let parts = partitioner.partition(&circuit).unwrap();

        assert_eq!(parts.num_gates(), circuit.num_gates());

        // Replay merged blocks and check each wire sees its gates in the
        // same sequence as the original program.
        let mut merged: Vec<Vec<Vec<QubitId>>> = vec![vec![]; circuit.num_qubits()];
        for block in &parts.blocks {
            for inst in block.circuit.instructions() {
                let wires: Vec<QubitId> = inst
                    .qubits
                    .iter()
                    .map(|q| block.location.as_slice()[q.index()])
                    .collect();
                for w in &wires {
                    merged[w.index()].push(wires.clone());
                }
            }
        }

        let mut original: Vec<Vec<Vec<QubitId>>> = vec![vec![]; circuit.num_qubits()];
        for inst in circuit.instructions() {
            for w in &inst.qubits {
                original[w.index()].push(inst.qubits.clone());
            }
        }

        assert_eq!(merged, original);
    }

    #[test]
    fn test_width_respected() {
        let circuit = Circuit::qft(7).unwrap();
        let partitioner = QuickPartitioner::new(4).unwrap();
        let parts = partitioner.partition(&circuit).unwrap();

        for block in &parts.blocks {
            assert!(block.location.len() <= 4);
        }
    }

    #[test]
    fn test_rejects_width_one() {
        assert!(matches!(
            QuickPartitioner::new(1),
            Err(PartitionError::InvalidBlockWidth(1))
        ));
    }
}
