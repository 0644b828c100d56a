//! Ordered-instruction circuit representation.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::error::{IrError, IrResult};
use crate::gate::Gate;
use crate::instruction::{Instruction, InstructionKind};
use crate::qubit::QubitId;

/// A quantum circuit: an ordered sequence of instructions over a fixed
/// number of wires.
///
/// The instruction order encodes causality: two instructions sharing a wire
/// must not be reordered across each other. Instructions on disjoint wires
/// carry no mutual ordering constraint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Circuit {
    /// Name of the circuit.
    name: String,
    /// Number of wires.
    num_qubits: usize,
    /// The instruction sequence.
    instructions: Vec<Instruction>,
}

impl Circuit {
    /// Create a new empty circuit with no wires.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            num_qubits: 0,
            instructions: vec![],
        }
    }

    /// Create an empty circuit with a given number of wires.
    pub fn with_size(name: impl Into<String>, num_qubits: usize) -> Self {
        Self {
            name: name.into(),
            num_qubits,
            instructions: vec![],
        }
    }

    /// Validate and append an instruction.
    pub fn push(&mut self, instruction: Instruction) -> IrResult<()> {
        for (i, q) in instruction.qubits.iter().enumerate() {
            if q.index() >= self.num_qubits {
                return Err(IrError::QubitOutOfRange {
                    qubit: *q,
                    num_qubits: self.num_qubits,
                });
            }
            if instruction.qubits[..i].contains(q) {
                return Err(IrError::DuplicateQubit {
                    qubit: *q,
                    name: instruction.name().to_string(),
                });
            }
        }

        match &instruction.kind {
            InstructionKind::Gate(gate) => {
                let expected = gate.num_qubits();
                let got = instruction.qubits.len() as u32;
                if expected != got {
                    return Err(IrError::QubitCountMismatch {
                        gate_name: gate.name().to_string(),
                        expected,
                        got,
                    });
                }
            }
            InstructionKind::Block(inner) => {
                if inner.num_qubits != instruction.qubits.len() {
                    return Err(IrError::BlockMappingMismatch {
                        block_qubits: inner.num_qubits,
                        mapping_len: instruction.qubits.len(),
                    });
                }
            }
            InstructionKind::Measure | InstructionKind::Barrier => {}
        }

        self.instructions.push(instruction);
        Ok(())
    }

    /// Apply a gate to the given qubits.
    pub fn apply(
        &mut self,
        gate: Gate,
        qubits: impl IntoIterator<Item = QubitId>,
    ) -> IrResult<&mut Self> {
        self.push(Instruction::gate(gate, qubits))?;
        Ok(self)
    }

    // =========================================================================
    // Gate builder methods
    // =========================================================================

    /// Apply Hadamard gate.
    pub fn h(&mut self, q: QubitId) -> IrResult<&mut Self> {
        self.apply(Gate::H, [q])
    }

    /// Apply Pauli-X gate.
    pub fn x(&mut self, q: QubitId) -> IrResult<&mut Self> {
        self.apply(Gate::X, [q])
    }

    /// Apply Pauli-Y gate.
    pub fn y(&mut self, q: QubitId) -> IrResult<&mut Self> {
        self.apply(Gate::Y, [q])
    }

    /// Apply Pauli-Z gate.
    pub fn z(&mut self, q: QubitId) -> IrResult<&mut Self> {
        self.apply(Gate::Z, [q])
    }

    /// Apply S gate.
    pub fn s(&mut self, q: QubitId) -> IrResult<&mut Self> {
        self.apply(Gate::S, [q])
    }

    /// Apply S-dagger gate.
    pub fn sdg(&mut self, q: QubitId) -> IrResult<&mut Self> {
        self.apply(Gate::Sdg, [q])
    }

    /// Apply T gate.
    pub fn t(&mut self, q: QubitId) -> IrResult<&mut Self> {
        self.apply(Gate::T, [q])
    }

    /// Apply T-dagger gate.
    pub fn tdg(&mut self, q: QubitId) -> IrResult<&mut Self> {
        self.apply(Gate::Tdg, [q])
    }

    /// Apply sqrt(X) gate.
    pub fn sx(&mut self, q: QubitId) -> IrResult<&mut Self> {
        self.apply(Gate::SX, [q])
    }

    /// Apply Rx rotation gate.
    pub fn rx(&mut self, theta: f64, q: QubitId) -> IrResult<&mut Self> {
        self.apply(Gate::Rx(theta), [q])
    }

    /// Apply Ry rotation gate.
    pub fn ry(&mut self, theta: f64, q: QubitId) -> IrResult<&mut Self> {
        self.apply(Gate::Ry(theta), [q])
    }

    /// Apply Rz rotation gate.
    pub fn rz(&mut self, theta: f64, q: QubitId) -> IrResult<&mut Self> {
        self.apply(Gate::Rz(theta), [q])
    }

    /// Apply CNOT (CX) gate.
    pub fn cx(&mut self, control: QubitId, target: QubitId) -> IrResult<&mut Self> {
        self.apply(Gate::CX, [control, target])
    }

    /// Apply CZ gate.
    pub fn cz(&mut self, control: QubitId, target: QubitId) -> IrResult<&mut Self> {
        self.apply(Gate::CZ, [control, target])
    }

    /// Apply SWAP gate.
    pub fn swap(&mut self, q1: QubitId, q2: QubitId) -> IrResult<&mut Self> {
        self.apply(Gate::Swap, [q1, q2])
    }

    /// Apply controlled-phase gate.
    pub fn cp(&mut self, theta: f64, control: QubitId, target: QubitId) -> IrResult<&mut Self> {
        self.apply(Gate::CP(theta), [control, target])
    }

    /// Apply Toffoli (CCX) gate.
    pub fn ccx(&mut self, c1: QubitId, c2: QubitId, target: QubitId) -> IrResult<&mut Self> {
        self.apply(Gate::CCX, [c1, c2, target])
    }

    /// Measure a qubit.
    pub fn measure(&mut self, q: QubitId) -> IrResult<&mut Self> {
        self.push(Instruction::measure(q))?;
        Ok(self)
    }

    // =========================================================================
    // Accessors and metrics
    // =========================================================================

    /// Get the circuit name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Rename the circuit.
    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    /// Get the number of wires.
    pub fn num_qubits(&self) -> usize {
        self.num_qubits
    }

    /// Get the instruction sequence.
    pub fn instructions(&self) -> &[Instruction] {
        &self.instructions
    }

    /// Get the number of instructions (nested blocks count as one).
    pub fn num_ops(&self) -> usize {
        self.instructions.len()
    }

    /// Check if the circuit has no instructions.
    pub fn is_empty(&self) -> bool {
        self.instructions.is_empty()
    }

    /// Total gate count, recursing into nested blocks.
    pub fn num_gates(&self) -> usize {
        self.instructions
            .iter()
            .map(|inst| match &inst.kind {
                InstructionKind::Gate(_) => 1,
                InstructionKind::Block(inner) => inner.num_gates(),
                _ => 0,
            })
            .sum()
    }

    /// Count of gates acting on more than one wire, recursing into blocks.
    pub fn num_multi_qubit_gates(&self) -> usize {
        self.instructions
            .iter()
            .map(|inst| match &inst.kind {
                InstructionKind::Gate(g) if g.is_multi_qubit() => 1,
                InstructionKind::Block(inner) => inner.num_multi_qubit_gates(),
                _ => 0,
            })
            .sum()
    }

    /// Per-gate-name counts, recursing into nested blocks.
    pub fn gate_counts(&self) -> FxHashMap<&'static str, usize> {
        let mut counts = FxHashMap::default();
        self.collect_gate_counts(&mut counts);
        counts
    }

    fn collect_gate_counts(&self, counts: &mut FxHashMap<&'static str, usize>) {
        for inst in &self.instructions {
            match &inst.kind {
                InstructionKind::Gate(g) => *counts.entry(g.name()).or_insert(0) += 1,
                InstructionKind::Block(inner) => inner.collect_gate_counts(counts),
                _ => {}
            }
        }
    }

    /// Circuit depth: the longest chain of wire-sharing instructions.
    ///
    /// Gates and measurements count one layer each; barriers do not add
    /// depth. Nested blocks count as a single layer, so callers comparing
    /// depths should [`Circuit::unfold_all`] first.
    pub fn depth(&self) -> usize {
        let mut frontier = vec![0usize; self.num_qubits];
        for inst in &self.instructions {
            if inst.is_barrier() {
                continue;
            }
            let layer = inst
                .qubits
                .iter()
                .map(|q| frontier[q.index()])
                .max()
                .unwrap_or(0)
                + 1;
            for q in &inst.qubits {
                frontier[q.index()] = layer;
            }
        }
        frontier.into_iter().max().unwrap_or(0)
    }

    // =========================================================================
    // Mutators
    // =========================================================================

    /// Inline all nested block instructions, recursively.
    pub fn unfold_all(&mut self) {
        if !self.instructions.iter().any(Instruction::is_block) {
            return;
        }
        let old = std::mem::take(&mut self.instructions);
        for inst in old {
            match inst.kind {
                InstructionKind::Block(mut inner) => {
                    inner.unfold_all();
                    for sub in inner.instructions {
                        let qubits: Vec<QubitId> = sub
                            .qubits
                            .iter()
                            .map(|local| inst.qubits[local.index()])
                            .collect();
                        self.instructions.push(Instruction {
                            kind: sub.kind,
                            qubits,
                        });
                    }
                }
                _ => self.instructions.push(inst),
            }
        }
    }

    /// Drop all measurement instructions.
    pub fn remove_measurements(&mut self) {
        self.instructions.retain(|inst| !inst.is_measure());
    }

    /// Append every instruction of `other`, mapping its local wire `i`
    /// onto `location[i]`.
    pub fn append_block(&mut self, other: &Circuit, location: &[QubitId]) -> IrResult<()> {
        if location.len() != other.num_qubits {
            return Err(IrError::BlockMappingMismatch {
                block_qubits: other.num_qubits,
                mapping_len: location.len(),
            });
        }
        for inst in &other.instructions {
            let qubits: Vec<QubitId> = inst
                .qubits
                .iter()
                .map(|local| location[local.index()])
                .collect();
            self.push(Instruction {
                kind: inst.kind.clone(),
                qubits,
            })?;
        }
        Ok(())
    }

    // =========================================================================
    // Pre-built circuits
    // =========================================================================

    /// Create a GHZ state circuit (no measurements).
    pub fn ghz(n: usize) -> IrResult<Self> {
        let mut circuit = Self::with_size("ghz", n);
        if n == 0 {
            return Ok(circuit);
        }
        circuit.h(QubitId(0))?;
        for i in 0..n - 1 {
            circuit.cx(QubitId(i as u32), QubitId(i as u32 + 1))?;
        }
        Ok(circuit)
    }

    /// Create a QFT circuit (no measurements, no final bit-reversal swaps).
    pub fn qft(n: usize) -> IrResult<Self> {
        use std::f64::consts::PI;

        let mut circuit = Self::with_size("qft", n);
        for i in 0..n {
            circuit.h(QubitId(i as u32))?;
            for j in (i + 1)..n {
                let angle = PI / (1usize << (j - i)) as f64;
                circuit.cp(angle, QubitId(j as u32), QubitId(i as u32))?;
            }
        }
        Ok(circuit)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_circuit() {
        let circuit = Circuit::with_size("test", 3);
        assert_eq!(circuit.name(), "test");
        assert_eq!(circuit.num_qubits(), 3);
        assert!(circuit.is_empty());
    }

    #[test]
    fn test_out_of_range_rejected() {
        let mut circuit = Circuit::with_size("test", 2);
        let err = circuit.h(QubitId(2)).unwrap_err();
        assert!(matches!(err, IrError::QubitOutOfRange { .. }));
    }

    #[test]
    fn test_duplicate_qubit_rejected() {
        let mut circuit = Circuit::with_size("test", 2);
        let err = circuit.cx(QubitId(0), QubitId(0)).unwrap_err();
        assert!(matches!(err, IrError::DuplicateQubit { .. }));
    }

    #[test]
    fn test_gate_arity_rejected() {
        let mut circuit = Circuit::with_size("test", 2);
        let err = circuit.apply(Gate::CX, [QubitId(0)]).unwrap_err();
        assert!(matches!(err, IrError::QubitCountMismatch { .. }));
    }

    #[test]
    fn test_counts_and_depth() {
        let mut circuit = Circuit::with_size("test", 3);
        circuit.h(QubitId(0)).unwrap();
        circuit.cx(QubitId(0), QubitId(1)).unwrap();
        circuit.cx(QubitId(1), QubitId(2)).unwrap();
        circuit.rz(0.3, QubitId(2)).unwrap();

        assert_eq!(circuit.num_gates(), 4);
        assert_eq!(circuit.num_multi_qubit_gates(), 2);
        assert_eq!(circuit.depth(), 4);
        assert_eq!(circuit.gate_counts()["cx"], 2);
    }

    #[test]
    fn test_depth_parallel_ops() {
        let mut circuit = Circuit::with_size("test", 4);
        circuit.h(QubitId(0)).unwrap();
        circuit.h(QubitId(1)).unwrap();
        circuit.cx(QubitId(2), QubitId(3)).unwrap();
        assert_eq!(circuit.depth(), 1);
    }

    #[test]
    fn test_unfold_all() {
        let mut inner = Circuit::with_size("inner", 2);
        inner.h(QubitId(0)).unwrap();
        inner.cx(QubitId(0), QubitId(1)).unwrap();

        let mut outer = Circuit::with_size("outer", 4);
        outer
            .push(Instruction::block(inner, [QubitId(3), QubitId(1)]))
            .unwrap();
        assert_eq!(outer.num_ops(), 1);

        outer.unfold_all();
        assert_eq!(outer.num_ops(), 2);
        assert_eq!(outer.instructions()[0].qubits, vec![QubitId(3)]);
        assert_eq!(
            outer.instructions()[1].qubits,
            vec![QubitId(3), QubitId(1)]
        );
    }

    #[test]
    fn test_append_block_remaps_wires() {
        let mut block = Circuit::with_size("block", 2);
        block.cx(QubitId(0), QubitId(1)).unwrap();

        let mut circuit = Circuit::with_size("main", 5);
        circuit
            .append_block(&block, &[QubitId(4), QubitId(2)])
            .unwrap();

        assert_eq!(circuit.instructions()[0].qubits, vec![QubitId(4), QubitId(2)]);
    }

    #[test]
    fn test_append_block_length_mismatch() {
        let block = Circuit::with_size("block", 2);
        let mut circuit = Circuit::with_size("main", 5);
        let err = circuit.append_block(&block, &[QubitId(0)]).unwrap_err();
        assert!(matches!(err, IrError::BlockMappingMismatch { .. }));
    }

    #[test]
    fn test_remove_measurements() {
        let mut circuit = Circuit::with_size("test", 2);
        circuit.h(QubitId(0)).unwrap();
        circuit.measure(QubitId(0)).unwrap();
        circuit.measure(QubitId(1)).unwrap();
        circuit.remove_measurements();
        assert_eq!(circuit.num_ops(), 1);
    }

    #[test]
    fn test_ghz() {
        let circuit = Circuit::ghz(5).unwrap();
        assert_eq!(circuit.num_gates(), 5);
        assert_eq!(circuit.num_multi_qubit_gates(), 4);
    }

    #[test]
    fn test_qft_gate_count() {
        let circuit = Circuit::qft(3).unwrap();
        // 3 H + 3 CP
        assert_eq!(circuit.num_gates(), 6);
        assert_eq!(circuit.num_multi_qubit_gates(), 3);
    }
}
