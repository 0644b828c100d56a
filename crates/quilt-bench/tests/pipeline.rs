//! End-to-end pipeline tests: QASM in, optimized QASM and metrics out.

use std::path::Path;

use quilt_bench::{
    BenchError, CircuitSource, ReplaceFilter, RunConfig, full_comparison, optimize_circuit,
    optimize_directory,
};
use quilt_ir::{Circuit, QubitId};
use quilt_partition::PartitionStrategy;

const CANONICAL_GATES: [&str; 4] = ["x", "sx", "rz", "cx"];

fn redundant_qasm() -> &'static str {
    "OPENQASM 2.0;\n\
     include \"qelib1.inc\";\n\
     qreg q[4];\n\
     creg c[4];\n\
     h q[0];\n\
     h q[0];\n\
     cx q[0], q[1];\n\
     rz(0.25) q[1];\n\
     rz(-0.25) q[1];\n\
     cx q[1], q[2];\n\
     t q[2];\n\
     tdg q[2];\n\
     cx q[2], q[3];\n\
     measure q -> c;\n"
}

fn assert_canonical(circuit: &Circuit) {
    for (gate, _) in circuit.gate_counts() {
        assert!(
            CANONICAL_GATES.contains(&gate),
            "non-canonical gate in output: {gate}"
        );
    }
}

#[test]
fn test_optimize_reduces_gates_and_preserves_wires() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("redundant.qasm");
    std::fs::write(&path, redundant_qasm()).unwrap();

    let config = RunConfig::default().with_filter(ReplaceFilter::LessThan);
    let outcome = optimize_circuit(&config, &CircuitSource::path(&path)).unwrap();

    assert_eq!(outcome.circuit.num_qubits(), 4);
    assert!(outcome.metrics.after.gates < outcome.metrics.before.gates);
    assert_eq!(outcome.metrics.name, "redundant");
    assert_canonical(&outcome.circuit);
}

#[test]
fn test_less_than_filter_never_increases_gate_count() {
    // QFT has no redundancy, so resynthesis cannot win; the filter must
    // keep every original block and the canonical forms must agree.
    let source = CircuitSource::memory("qft6", Circuit::qft(6).unwrap());

    for strategy in [PartitionStrategy::Scan, PartitionStrategy::Quick] {
        let config = RunConfig::default()
            .with_strategy(strategy)
            .with_filter(ReplaceFilter::LessThan);
        let outcome = optimize_circuit(&config, &source).unwrap();
        assert!(
            outcome.metrics.after.gates <= outcome.metrics.before.gates,
            "{strategy}: {} > {}",
            outcome.metrics.after.gates,
            outcome.metrics.before.gates
        );
    }
}

#[test]
fn test_entangling_count_never_increases_under_multi_filter() {
    let source = CircuitSource::memory("qft5", Circuit::qft(5).unwrap());
    let config = RunConfig::default(); // less-than-multi

    let outcome = optimize_circuit(&config, &source).unwrap();
    assert!(outcome.metrics.after.multi_qubit_gates <= outcome.metrics.before.multi_qubit_gates);
}

#[test]
fn test_directory_run_skips_non_qasm_files() {
    let input = tempfile::tempdir().unwrap();
    let output = tempfile::tempdir().unwrap();

    for name in ["a.qasm", "b.qasm", "c.qasm"] {
        std::fs::write(input.path().join(name), redundant_qasm()).unwrap();
    }
    std::fs::write(input.path().join("README.md"), "not a circuit").unwrap();

    let config = RunConfig::default();
    let records = optimize_directory(&config, input.path(), output.path()).unwrap();

    assert_eq!(records.len(), 3);
    assert_eq!(records[0].name, "a");
    assert_eq!(records[2].name, "c");

    // One circuit and one metrics file per input, under the labeled stem.
    assert!(
        output
            .path()
            .join("a_0.00000001_quick3_greedy.qasm")
            .is_file()
    );
    assert!(output.path().join("a_optimized.json").is_file());
}

#[test]
fn test_directory_run_rejects_missing_output_dir() {
    let input = tempfile::tempdir().unwrap();
    std::fs::write(input.path().join("a.qasm"), redundant_qasm()).unwrap();

    let config = RunConfig::default();
    let err =
        optimize_directory(&config, input.path(), Path::new("/no/such/output")).unwrap_err();
    assert!(matches!(err, BenchError::PathNotFound(_)));
}

#[test]
fn test_full_comparison_reports_both_labels() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("redundant.qasm");
    std::fs::write(&path, redundant_qasm()).unwrap();

    let config = RunConfig::default();
    let report = full_comparison(&config, &CircuitSource::path(&path), 3).unwrap();

    assert_eq!(report.name, "redundant");
    assert_eq!(report.pipeline.partitioner, "quick3");
    assert_eq!(report.baseline.algorithm, "baseline-o3");
    // Both sides measure the same canonicalized input.
    assert_eq!(report.pipeline.before, report.baseline.before);
}

#[test]
fn test_scan_always_preserves_irreducible_operations() {
    // 10 single-wire and 6 two-wire operations over 5 wires, all already
    // canonical, nothing adjacent that cancels or merges. Resynthesis has
    // no win available, so with the always filter every replaced block is
    // gate-for-gate equivalent and the merged circuit keeps all 16.
    let mut circuit = Circuit::with_size("dense", 5);
    for i in 0..5u32 {
        circuit.sx(QubitId(i)).unwrap();
        circuit.rz(0.3 + f64::from(i) * 0.1, QubitId(i)).unwrap();
    }
    for (c, t) in [(0u32, 1u32), (1, 2), (2, 3), (3, 4), (0, 2), (1, 3)] {
        circuit.cx(QubitId(c), QubitId(t)).unwrap();
    }
    assert_eq!(circuit.num_gates(), 16);

    let config = RunConfig::default()
        .with_strategy(PartitionStrategy::Scan)
        .with_filter(ReplaceFilter::Always);
    let outcome = optimize_circuit(&config, &CircuitSource::memory("dense", circuit)).unwrap();

    assert_eq!(outcome.metrics.partitioner, "scan3");
    assert_eq!(outcome.metrics.blocks_replaced, outcome.metrics.num_blocks);
    assert_eq!(outcome.metrics.before.gates, 16);
    assert_eq!(outcome.metrics.after.gates, 16);
    assert_canonical(&outcome.circuit);
}

#[test]
fn test_second_pass_never_regresses() {
    let mut circuit = Circuit::with_size("loop", 3);
    for i in 0..2u32 {
        circuit.h(QubitId(i)).unwrap();
        circuit.h(QubitId(i)).unwrap();
        circuit.cx(QubitId(i), QubitId(i + 1)).unwrap();
    }

    let config = RunConfig::default().with_filter(ReplaceFilter::LessThan);
    let first = optimize_circuit(&config, &CircuitSource::memory("loop", circuit)).unwrap();
    let second =
        optimize_circuit(&config, &CircuitSource::memory("loop", first.circuit.clone())).unwrap();

    assert!(second.metrics.after.gates <= first.metrics.after.gates);
}
