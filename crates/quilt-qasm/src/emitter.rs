//! QASM emitter for serializing circuits.

use quilt_ir::{Circuit, Gate, Instruction, InstructionKind, QubitId};

use crate::error::{ParseError, ParseResult};

/// Emit a circuit as QASM3 source code.
pub fn emit(circuit: &Circuit) -> ParseResult<String> {
    emit_with_version(circuit, QasmVersion::V3)
}

/// Emit a circuit as QASM 2.0 source code.
///
/// Register declarations use the QASM2 style (`qreg q[n];` / `creg c[n];`)
/// and measurements use `measure q[i] -> c[i];`.
pub fn emit_qasm2(circuit: &Circuit) -> ParseResult<String> {
    emit_with_version(circuit, QasmVersion::V2)
}

#[derive(Clone, Copy, PartialEq)]
enum QasmVersion {
    V2,
    V3,
}

fn emit_with_version(circuit: &Circuit, version: QasmVersion) -> ParseResult<String> {
    let mut out = String::new();

    match version {
        QasmVersion::V2 => {
            out.push_str("OPENQASM 2.0;\n");
            out.push_str("include \"qelib1.inc\";\n\n");
        }
        QasmVersion::V3 => {
            out.push_str("OPENQASM 3.0;\n\n");
        }
    }

    let num_qubits = circuit.num_qubits();
    let has_measure = circuit.instructions().iter().any(Instruction::is_measure);

    if num_qubits > 0 {
        match version {
            QasmVersion::V2 => out.push_str(&format!("qreg q[{num_qubits}];\n")),
            QasmVersion::V3 => out.push_str(&format!("qubit[{num_qubits}] q;\n")),
        }
        if has_measure {
            match version {
                QasmVersion::V2 => out.push_str(&format!("creg c[{num_qubits}];\n")),
                QasmVersion::V3 => out.push_str(&format!("bit[{num_qubits}] c;\n")),
            }
        }
        out.push('\n');
    }

    for instruction in circuit.instructions() {
        emit_instruction(&mut out, instruction, version)?;
    }

    Ok(out)
}

fn emit_instruction(
    out: &mut String,
    instruction: &Instruction,
    version: QasmVersion,
) -> ParseResult<()> {
    match &instruction.kind {
        InstructionKind::Gate(gate) => {
            let name = gate.name();
            let params = emit_params(gate);
            let qubits = emit_qubits(&instruction.qubits);
            if params.is_empty() {
                out.push_str(&format!("{name} {qubits};\n"));
            } else {
                out.push_str(&format!("{name}({params}) {qubits};\n"));
            }
        }

        InstructionKind::Measure => {
            // Each wire measures into the classical bit of the same index.
            let q = instruction.qubits[0];
            match version {
                QasmVersion::V2 => {
                    out.push_str(&format!("measure q[{}] -> c[{}];\n", q.0, q.0));
                }
                QasmVersion::V3 => {
                    out.push_str(&format!("c[{}] = measure q[{}];\n", q.0, q.0));
                }
            }
        }

        InstructionKind::Barrier => {
            let qubits = emit_qubits(&instruction.qubits);
            if qubits.is_empty() {
                out.push_str("barrier;\n");
            } else {
                out.push_str(&format!("barrier {qubits};\n"));
            }
        }

        InstructionKind::Block(_) => {
            return Err(ParseError::Generic(
                "cannot emit a circuit containing nested blocks; unfold first".into(),
            ));
        }
    }
    Ok(())
}

fn emit_qubits(qubits: &[QubitId]) -> String {
    qubits
        .iter()
        .map(|q| format!("q[{}]", q.0))
        .collect::<Vec<_>>()
        .join(", ")
}

fn emit_params(gate: &Gate) -> String {
    gate.params()
        .iter()
        .map(|&p| emit_param(p))
        .collect::<Vec<_>>()
        .join(", ")
}

/// Format an angle, preferring the common pi fractions.
fn emit_param(value: f64) -> String {
    let pi = std::f64::consts::PI;
    let fractions: [(f64, &str); 6] = [
        (pi, "pi"),
        (-pi, "-pi"),
        (pi / 2.0, "pi/2"),
        (-pi / 2.0, "-pi/2"),
        (pi / 4.0, "pi/4"),
        (-pi / 4.0, "-pi/4"),
    ];
    for (v, s) in fractions {
        if (value - v).abs() < 1e-10 {
            return s.to_string();
        }
    }
    // Enough digits to round-trip an f64.
    format!("{value:.17}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse;

    #[test]
    fn test_emit_qasm3() {
        let mut circuit = Circuit::with_size("bell", 2);
        circuit.h(QubitId(0)).unwrap();
        circuit.cx(QubitId(0), QubitId(1)).unwrap();
        circuit.measure(QubitId(0)).unwrap();

        let qasm = emit(&circuit).unwrap();
        assert!(qasm.contains("OPENQASM 3.0;"));
        assert!(qasm.contains("qubit[2] q;"));
        assert!(qasm.contains("h q[0];"));
        assert!(qasm.contains("cx q[0], q[1];"));
        assert!(qasm.contains("c[0] = measure q[0];"));
    }

    #[test]
    fn test_emit_qasm2() {
        let mut circuit = Circuit::with_size("bell", 2);
        circuit.h(QubitId(0)).unwrap();
        circuit.cx(QubitId(0), QubitId(1)).unwrap();
        circuit.measure(QubitId(1)).unwrap();

        let qasm = emit_qasm2(&circuit).unwrap();
        assert!(qasm.contains("OPENQASM 2.0;"));
        assert!(qasm.contains("qreg q[2];"));
        assert!(qasm.contains("measure q[1] -> c[1];"));
    }

    #[test]
    fn test_emit_pi_fractions() {
        let mut circuit = Circuit::with_size("rot", 1);
        circuit.rz(std::f64::consts::FRAC_PI_2, QubitId(0)).unwrap();
        let qasm = emit(&circuit).unwrap();
        assert!(qasm.contains("rz(pi/2) q[0];"));
    }

    #[test]
    fn test_round_trip_preserves_structure() {
        let source = r"
            OPENQASM 3.0;
            qubit[3] q;
            h q[0];
            cx q[0], q[1];
            rz(0.12345) q[2];
            cx q[1], q[2];
        ";
        let circuit = parse(source).unwrap();
        let emitted = emit(&circuit).unwrap();
        let reparsed = parse(&emitted).unwrap();

        assert_eq!(circuit.num_qubits(), reparsed.num_qubits());
        assert_eq!(circuit.num_gates(), reparsed.num_gates());
        assert_eq!(circuit.gate_counts(), reparsed.gate_counts());
    }

    #[test]
    fn test_block_rejected() {
        let inner = Circuit::with_size("inner", 1);
        let mut circuit = Circuit::with_size("outer", 2);
        circuit
            .push(quilt_ir::Instruction::block(inner, [QubitId(0)]))
            .unwrap();
        assert!(emit(&circuit).is_err());
    }
}
