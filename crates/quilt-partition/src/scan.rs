//! Linear scan partitioning.

use quilt_ir::Circuit;
use tracing::debug;

use crate::block::PartitionedCircuit;
use crate::builder::OpenBlock;
use crate::error::{PartitionError, PartitionResult};
use crate::strategy::Partitioner;

/// Partitioner that sweeps the instruction list once, growing a single
/// open block and cutting whenever the next gate would push the block
/// past the width limit.
///
/// Blocks come out in strict program order, so the partition preserves the
/// original total gate ordering exactly. The tradeoff is that a gate on
/// fresh wires always cuts the current block, even when an earlier block
/// could still have held it.
#[derive(Debug, Clone)]
pub struct ScanPartitioner {
    block_width: usize,
}

impl ScanPartitioner {
    /// Create a scan partitioner with the given block width.
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

impl Partitioner for ScanPartitioner {
    fn partition(&self, circuit: &Circuit) -> PartitionResult<PartitionedCircuit> {
        let mut blocks = Vec::new();
        let mut open = OpenBlock::new();

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

            if !open.fits(&inst.qubits, self.block_width) {
                let index = blocks.len();
                blocks.push(open.finish(format!("block{index}"))?);
                open = OpenBlock::new();
            }
            open.push(inst.clone());
        }

        if !open.is_empty() {
            let index = blocks.len();
            blocks.push(open.finish(format!("block{index}"))?);
        }

        debug!(
            num_blocks = blocks.len(),
            width = self.block_width,
            "scan partitioning complete"
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

    fn ladder(n: usize) -> Circuit {
        let mut circuit = Circuit::with_size("ladder", n);
        for i in 0..n - 1 {
            circuit.cx(QubitId(i as u32), QubitId(i as u32 + 1)).unwrap();
        }
        circuit
    }

    #[test]
    fn test_width_validation() {
        assert!(ScanPartitioner::new(1).is_err());
        assert!(ScanPartitioner::new(2).is_ok());
    }

    #[test]
    fn test_ladder_cuts() {
        // CX ladder over 5 wires with width 3: {cx01, cx12}, {cx23, cx34}
        let partitioner = ScanPartitioner::new(3).unwrap();
        let parts = partitioner.partition(&ladder(5)).unwrap();

        assert_eq!(parts.num_blocks(), 2);
        assert_eq!(parts.blocks[0].location.as_slice(), &[
            QubitId(0),
            QubitId(1),
            QubitId(2)
        ]);
        assert_eq!(parts.blocks[1].location.as_slice(), &[
            QubitId(2),
            QubitId(3),
            QubitId(4)
        ]);
    }

    #[test]
    fn test_every_gate_covered() {
        let circuit = Circuit::qft(6).unwrap();
        let partitioner = ScanPartitioner::new(3).unwrap();
        let parts = partitioner.partition(&circuit).unwrap();

        assert_eq!(parts.num_gates(), circuit.num_gates());
        for block in &parts.blocks {
            assert!(block.location.len() <= 3);
            assert_eq!(block.circuit.num_qubits(), block.location.len());
        }
    }

    #[test]
    fn test_wide_instruction_rejected() {
        let mut circuit = Circuit::with_size("toffoli", 3);
        circuit
            .ccx(QubitId(0), QubitId(1), QubitId(2))
            .unwrap();
        let partitioner = ScanPartitioner::new(2).unwrap();
        assert!(matches!(
            partitioner.partition(&circuit),
            Err(PartitionError::WideInstruction { .. })
        ));
    }

    #[test]
    fn test_order_preserved_in_merge_order() {
        // Gate order inside the concatenated blocks must match program order.
        let circuit = ladder(6);
        let partitioner = ScanPartitioner::new(3).unwrap();
        let parts = partitioner.partition(&circuit).unwrap();

        let mut merged = Vec::new();
        for block in &parts.blocks {
            for inst in block.circuit.instructions() {
                let wires: Vec<QubitId> = inst
                    .qubits
                    .iter()
                    .map(|q| block.location.as_slice()[q.index()])
                    .collect();
                merged.push(wires);
            }
        }
        let original: Vec<Vec<QubitId>> = circuit
            .instructions()
            .iter()
            .map(|i| i.qubits.clone())
            .collect();
        assert_eq!(merged, original);
    }

    #[test]
    fn test_empty_circuit() {
        let circuit = Circuit::with_size("empty", 4);
        let partitioner = ScanPartitioner::new(3).unwrap();
        let parts = partitioner.partition(&circuit).unwrap();
        assert_eq!(parts.num_blocks(), 0);
    }
}
