//! Parse/emit round-trip tests over randomly generated circuits.

use proptest::prelude::*;
use quilt_ir::{Circuit, Gate, Instruction, QubitId};
use quilt_qasm::{emit, emit_qasm2, parse};

/// Strategy for a random gate instruction on `n` wires.
fn arb_instruction(n: u32) -> impl Strategy<Value = Instruction> {
    let angle = -10.0..10.0f64;
    prop_oneof![
        (0..n).prop_map(|q| Instruction::gate(Gate::H, [QubitId(q)])),
        (0..n).prop_map(|q| Instruction::gate(Gate::X, [QubitId(q)])),
        (0..n).prop_map(|q| Instruction::gate(Gate::T, [QubitId(q)])),
        (0..n).prop_map(|q| Instruction::gate(Gate::SX, [QubitId(q)])),
        (angle.clone(), 0..n).prop_map(|(a, q)| Instruction::gate(Gate::Rz(a), [QubitId(q)])),
        (angle, 0..n).prop_map(|(a, q)| Instruction::gate(Gate::Ry(a), [QubitId(q)])),
        (0..n, 0..n - 1).prop_map(move |(c, t)| {
            let t = if t >= c { t + 1 } else { t };
            Instruction::gate(Gate::CX, [QubitId(c), QubitId(t)])
        }),
    ]
}

fn arb_circuit() -> impl Strategy<Value = Circuit> {
    (2..6u32).prop_flat_map(|n| {
        prop::collection::vec(arb_instruction(n), 0..40).prop_map(move |instructions| {
            let mut circuit = Circuit::with_size("random", n as usize);
            for inst in instructions {
                circuit.push(inst).unwrap();
            }
            circuit
        })
    })
}

proptest! {
    #[test]
    fn qasm3_round_trip_preserves_circuit(circuit in arb_circuit()) {
        let emitted = emit(&circuit).unwrap();
        let reparsed = parse(&emitted).unwrap();

        prop_assert_eq!(reparsed.num_qubits(), circuit.num_qubits());
        prop_assert_eq!(reparsed.num_ops(), circuit.num_ops());

        for (a, b) in circuit.instructions().iter().zip(reparsed.instructions()) {
            prop_assert_eq!(&a.qubits, &b.qubits);
            prop_assert_eq!(a.name(), b.name());
            let pa = a.as_gate().unwrap().params();
            let pb = b.as_gate().unwrap().params();
            for (x, y) in pa.iter().zip(&pb) {
                prop_assert!((x - y).abs() < 1e-12);
            }
        }
    }

    #[test]
    fn qasm2_round_trip_preserves_counts(circuit in arb_circuit()) {
        let emitted = emit_qasm2(&circuit).unwrap();
        let reparsed = parse(&emitted).unwrap();

        prop_assert_eq!(reparsed.num_qubits(), circuit.num_qubits());
        prop_assert_eq!(reparsed.gate_counts(), circuit.gate_counts());
    }
}
