//! Writing run outputs to disk.

use std::path::{Path, PathBuf};

use quilt_ir::Circuit;
use tracing::info;

use crate::error::{BenchError, BenchResult};
use crate::metrics::MetricsRecord;

/// Check that an output directory exists.
///
/// Every invalid output location reports the same way, whether the
/// directory is missing or the path points at a file.
pub fn ensure_dir(dir: &Path) -> BenchResult<()> {
    if dir.is_dir() {
        Ok(())
    } else {
        Err(BenchError::PathNotFound(dir.to_path_buf()))
    }
}

/// Save a circuit as QASM under `{stem}.qasm` in `dir`.
pub fn save_circuit(circuit: &Circuit, dir: &Path, stem: &str) -> BenchResult<PathBuf> {
    ensure_dir(dir)?;
    let qasm = quilt_qasm::emit(circuit)
        .map_err(|e| BenchError::Serialization(e.to_string()))?;

    let path = dir.join(format!("{stem}.qasm"));
    std::fs::write(&path, qasm).map_err(|source| BenchError::Io {
        path: path.clone(),
        source,
    })?;
    info!(path = %path.display(), "saved circuit");
    Ok(path)
}

/// Save a metrics record as `{name}_optimized.json` in `dir`.
pub fn save_metrics(record: &MetricsRecord, dir: &Path) -> BenchResult<PathBuf> {
    ensure_dir(dir)?;
    let path = dir.join(format!("{}_optimized.json", record.name));
    std::fs::write(&path, record.to_json()).map_err(|source| BenchError::Io {
        path: path.clone(),
        source,
    })?;
    info!(path = %path.display(), "saved metrics");
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use quilt_ir::QubitId;

    #[test]
    fn test_missing_dir_reports_path_not_found() {
        let circuit = Circuit::with_size("t", 1);
        let err = save_circuit(&circuit, Path::new("/no/such/dir"), "t").unwrap_err();
        assert!(matches!(err, BenchError::PathNotFound(_)));
    }

    #[test]
    fn test_file_as_dir_reports_path_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("not_a_dir");
        std::fs::write(&file, "x").unwrap();

        let circuit = Circuit::with_size("t", 1);
        let err = save_circuit(&circuit, &file, "t").unwrap_err();
        assert!(matches!(err, BenchError::PathNotFound(_)));
    }

    #[test]
    fn test_save_circuit_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let mut circuit = Circuit::with_size("bell", 2);
        circuit.h(QubitId(0)).unwrap();
        circuit.cx(QubitId(0), QubitId(1)).unwrap();

        let path = save_circuit(&circuit, dir.path(), "bell_out").unwrap();
        let text = std::fs::read_to_string(path).unwrap();
        let back = quilt_qasm::parse(&text).unwrap();
        assert_eq!(back.num_gates(), 2);
    }
}
