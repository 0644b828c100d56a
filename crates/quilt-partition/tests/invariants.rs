//! Partitioning invariants over randomly generated circuits.

use proptest::prelude::*;
use quilt_ir::{Circuit, Gate, Instruction, QubitId};
use quilt_partition::{CircuitAssembler, PartitionStrategy};

fn arb_circuit() -> impl Strategy<Value = Circuit> {
    (3..8u32).prop_flat_map(|n| {
        let gate = prop_oneof![
            (0..n).prop_map(|q| Instruction::gate(Gate::H, [QubitId(q)])),
            (-5.0..5.0f64, 0..n)
                .prop_map(|(a, q)| Instruction::gate(Gate::Rz(a), [QubitId(q)])),
            (0..n, 0..n - 1).prop_map(move |(c, t)| {
                let t = if t >= c { t + 1 } else { t };
                Instruction::gate(Gate::CX, [QubitId(c), QubitId(t)])
            }),
        ];
        prop::collection::vec(gate, 0..60).prop_map(move |instructions| {
            let mut circuit = Circuit::with_size("random", n as usize);
            for inst in instructions {
                circuit.push(inst).unwrap();
            }
            circuit
        })
    })
}

proptest! {
    /// Every gate lands in exactly one block and no block exceeds the
    /// width limit, for both strategies.
    #[test]
    fn coverage_and_width(circuit in arb_circuit(), width in 2..5usize) {
        for strategy in [PartitionStrategy::Scan, PartitionStrategy::Quick] {
            let parts = strategy.build(width).unwrap().partition(&circuit).unwrap();

            prop_assert_eq!(parts.num_gates(), circuit.num_gates());
            for block in &parts.blocks {
                prop_assert!(block.location.len() <= width);
                prop_assert!(!block.circuit.is_empty());
                // Block wires are distinct.
                let wires = block.location.as_slice();
                for (i, w) in wires.iter().enumerate() {
                    prop_assert!(!wires[..i].contains(w));
                }
            }
        }
    }

    /// Merging scan blocks reproduces the original instruction sequence.
    #[test]
    fn scan_merge_is_identity(circuit in arb_circuit(), width in 2..5usize) {
        let parts = PartitionStrategy::Scan
            .build(width)
            .unwrap()
            .partition(&circuit)
            .unwrap();

        let merged = CircuitAssembler::new("merged", circuit.num_qubits())
            .assemble(&parts.blocks)
            .unwrap();

        prop_assert_eq!(merged.instructions(), circuit.instructions());
    }

    /// Quick partitioning preserves each wire's gate order.
    #[test]
    fn quick_preserves_per_wire_order(circuit in arb_circuit(), width in 2..5usize) {
        let parts = PartitionStrategy::Quick
            .build(width)
            .unwrap()
            .partition(&circuit)
            .unwrap();

        let merged = CircuitAssembler::new("merged", circuit.num_qubits())
            .assemble(&parts.blocks)
            .unwrap();

        for wire in 0..circuit.num_qubits() {
            let w = QubitId::from(wire);
            let original: Vec<_> = circuit
                .instructions()
                .iter()
                .filter(|i| i.qubits.contains(&w))
                .map(|i| (i.name().to_string(), i.qubits.clone()))
                .collect();
            let rebuilt: Vec<_> = merged
                .instructions()
                .iter()
                .filter(|i| i.qubits.contains(&w))
                .map(|i| (i.name().to_string(), i.qubits.clone()))
                .collect();
            prop_assert_eq!(original, rebuilt);
        }
    }
}
