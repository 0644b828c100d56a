//! Partition-shape comparison between circuits.
//!
//! Two circuits claiming to be the same computation should cut into
//! similarly shaped partitions. This module partitions circuits with a
//! quick partitioner, builds distributions over per-block
//! entangling-gate counts and scores their divergence, pairwise or
//! across whole directories.

use std::path::{Path, PathBuf};

use quilt_ir::Circuit;
use quilt_partition::{Partitioner, QuickPartitioner};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::config::CircuitSource;
use crate::distance::{
    DistanceStats, UnitaryBackend, chi2_distance, cross_block_distances, kl_divergence,
    padded_distributions,
};
use crate::error::{BenchError, BenchResult};
use crate::export;
use crate::run::load_circuit;

/// Partition-shape distances between two versions of one circuit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PartitionDistanceReport {
    /// Circuit name (taken from the first version).
    pub name: String,
    /// Block count of the first version.
    pub num_blocks_a: usize,
    /// Block count of the second version.
    pub num_blocks_b: usize,
    /// KL divergence of the block-size distributions, first against
    /// second.
    pub kl: f64,
    /// Chi-squared distance of the block-size distributions.
    pub chi2: f64,
    /// Per-block unitary distance rows, when a backend was supplied.
    pub unitary: Option<Vec<BlockDistanceRow>>,
}

/// Distance summary for one block of the first circuit against every
/// block of the second.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BlockDistanceRow {
    /// Block index in the first circuit.
    pub block: usize,
    /// Min/max/mean over the distances to every block of the second.
    pub stats: DistanceStats,
}

/// One row of a circuit's comparison report: how a sibling circuit
/// measures up against it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComparisonRow {
    /// The compared circuit's name.
    pub circuit: String,
    /// The compared circuit's entangling-gate count.
    pub multi_qubit_gates: usize,
    /// The compared circuit's depth.
    pub depth: usize,
    /// Chi-squared distance between the partition-size distributions.
    pub chi2: f64,
    /// KL divergence, base circuit against compared.
    pub kl: f64,
}

/// A circuit's comparison report: one row per sibling in the directory.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CircuitComparisonReport {
    /// The base circuit's name.
    pub name: String,
    /// Rows for every other circuit, in file-name order.
    pub rows: Vec<ComparisonRow>,
}

/// Per-block unitary distance table for one circuit pair.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PairDistanceReport {
    /// First circuit's name.
    pub circuit_a: String,
    /// Second circuit's name.
    pub circuit_b: String,
    /// One row per block of the first circuit.
    pub blocks: Vec<BlockDistanceRow>,
}

/// Compare the partition shapes of two circuits.
///
/// Both circuits are cut with a quick partitioner at `block_width`; the
/// distributions compared are over per-block entangling-gate counts.
pub fn compare_circuits(
    a: &Circuit,
    b: &Circuit,
    block_width: usize,
) -> BenchResult<PartitionDistanceReport> {
    compare_circuits_with_backend(a, b, block_width, None)
}

/// Like [`compare_circuits`], additionally scoring each block of `a`
/// against every block of `b` through `backend`.
pub fn compare_circuits_with_backend(
    a: &Circuit,
    b: &Circuit,
    block_width: usize,
    backend: Option<&dyn UnitaryBackend>,
) -> BenchResult<PartitionDistanceReport> {
    let partitioner = QuickPartitioner::new(block_width)?;
    let parts_a = partitioner.partition(a)?;
    let parts_b = partitioner.partition(b)?;

    let sizes_a = parts_a.multi_qubit_gate_counts();
    let sizes_b = parts_b.multi_qubit_gate_counts();
    let (p, q) = padded_distributions(&sizes_a, &sizes_b);

    let unitary = backend.map(|backend| {
        let blocks_a: Vec<_> = parts_a.blocks.iter().map(|b| b.circuit.clone()).collect();
        let blocks_b: Vec<_> = parts_b.blocks.iter().map(|b| b.circuit.clone()).collect();
        cross_block_distances(backend, &blocks_a, &blocks_b)
            .iter()
            .enumerate()
            .map(|(block, row)| BlockDistanceRow {
                block,
                stats: DistanceStats::summarize(row),
            })
            .collect()
    });

    Ok(PartitionDistanceReport {
        name: a.name().to_string(),
        num_blocks_a: parts_a.num_blocks(),
        num_blocks_b: parts_b.num_blocks(),
        kl: kl_divergence(&p, &q),
        chi2: chi2_distance(&p, &q),
        unitary,
    })
}

/// Compare the partition shapes of two circuit sources.
pub fn compare_sources(
    a: &CircuitSource,
    b: &CircuitSource,
    block_width: usize,
) -> BenchResult<PartitionDistanceReport> {
    let circuit_a = load_circuit(a)?;
    let circuit_b = load_circuit(b)?;
    compare_circuits(&circuit_a, &circuit_b, block_width)
}

/// Compare every `.qasm` file in `dir_a` against its same-named
/// counterpart in `dir_b`.
///
/// Files in `dir_a` without a counterpart are skipped with a warning;
/// reports come back in file-name order.
pub fn compare_directories(
    dir_a: &Path,
    dir_b: &Path,
    block_width: usize,
) -> BenchResult<Vec<PartitionDistanceReport>> {
    if !dir_b.is_dir() {
        return Err(BenchError::PathNotFound(dir_b.to_path_buf()));
    }

    let mut reports = Vec::new();
    for path_a in qasm_files(dir_a)? {
        let Some(file_name) = path_a.file_name() else {
            continue;
        };
        let path_b = dir_b.join(file_name);
        if !path_b.is_file() {
            warn!(file = %file_name.to_string_lossy(), "no counterpart, skipping");
            continue;
        }

        let report = compare_sources(
            &CircuitSource::path(&path_a),
            &CircuitSource::path(&path_b),
            block_width,
        )?;
        info!(
            name = %report.name,
            kl = report.kl,
            chi2 = report.chi2,
            "compared partition shapes"
        );
        reports.push(report);
    }
    Ok(reports)
}

/// Compare every circuit in a directory against every other.
///
/// For each circuit, one report with a row per sibling: the sibling's
/// entangling-gate count and depth, plus the chi-squared and KL scores
/// of the two partition-size distributions. Reports and rows come back
/// in file-name order.
pub fn comparison_stats(
    dir: &Path,
    block_width: usize,
) -> BenchResult<Vec<CircuitComparisonReport>> {
    let partitioner = QuickPartitioner::new(block_width)?;
    let circuits = load_directory(dir)?;

    let mut sizes = Vec::with_capacity(circuits.len());
    for circuit in &circuits {
        sizes.push(partitioner.partition(circuit)?.multi_qubit_gate_counts());
    }

    let mut reports = Vec::with_capacity(circuits.len());
    for (i, base) in circuits.iter().enumerate() {
        let mut rows = Vec::with_capacity(circuits.len().saturating_sub(1));
        for (j, other) in circuits.iter().enumerate() {
            if i == j {
                continue;
            }
            let (p, q) = padded_distributions(&sizes[i], &sizes[j]);
            rows.push(ComparisonRow {
                circuit: other.name().to_string(),
                multi_qubit_gates: other.num_multi_qubit_gates(),
                depth: other.depth(),
                chi2: chi2_distance(&p, &q),
                kl: kl_divergence(&p, &q),
            });
        }
        reports.push(CircuitComparisonReport {
            name: base.name().to_string(),
            rows,
        });
    }
    Ok(reports)
}

/// Save one `{name}_comparison.json` per report in `dir`.
pub fn save_comparison_stats(
    reports: &[CircuitComparisonReport],
    dir: &Path,
) -> BenchResult<Vec<PathBuf>> {
    export::ensure_dir(dir)?;
    let mut paths = Vec::with_capacity(reports.len());
    for report in reports {
        let path = dir.join(format!("{}_comparison.json", report.name));
        let json = serde_json::to_string_pretty(report)?;
        std::fs::write(&path, json).map_err(|source| BenchError::Io {
            path: path.clone(),
            source,
        })?;
        info!(path = %path.display(), "saved comparison report");
        paths.push(path);
    }
    Ok(paths)
}

/// Per-block unitary distance tables for every unique circuit pair in a
/// directory.
///
/// Each circuit is quick-partitioned once; for each pair `(a, b)` with
/// `a` before `b` in file-name order, every block of `a` is scored
/// against every block of `b` and summarized per block.
pub fn partition_distance_table(
    backend: &dyn UnitaryBackend,
    dir: &Path,
    block_width: usize,
) -> BenchResult<Vec<PairDistanceReport>> {
    let partitioner = QuickPartitioner::new(block_width)?;
    let circuits = load_directory(dir)?;

    let mut blocks = Vec::with_capacity(circuits.len());
    for circuit in &circuits {
        let parts = partitioner.partition(circuit)?;
        blocks.push(
            parts
                .blocks
                .into_iter()
                .map(|b| b.circuit)
                .collect::<Vec<_>>(),
        );
    }

    let mut results = Vec::new();
    for i in 0..circuits.len() {
        for j in (i + 1)..circuits.len() {
            let rows = cross_block_distances(backend, &blocks[i], &blocks[j])
                .iter()
                .enumerate()
                .map(|(block, row)| BlockDistanceRow {
                    block,
                    stats: DistanceStats::summarize(row),
                })
                .collect();
            results.push(PairDistanceReport {
                circuit_a: circuits[i].name().to_string(),
                circuit_b: circuits[j].name().to_string(),
                blocks: rows,
            });
        }
    }
    Ok(results)
}

/// Load every `.qasm` file in a directory, in file-name order.
fn load_directory(dir: &Path) -> BenchResult<Vec<Circuit>> {
    qasm_files(dir)?
        .into_iter()
        .map(|path| load_circuit(&CircuitSource::path(path)))
        .collect()
}

fn qasm_files(dir: &Path) -> BenchResult<Vec<PathBuf>> {
    if !dir.is_dir() {
        return Err(BenchError::PathNotFound(dir.to_path_buf()));
    }
    let mut paths: Vec<_> = std::fs::read_dir(dir)
        .map_err(|source| BenchError::Io {
            path: dir.to_path_buf(),
            source,
        })?
        .filter_map(Result::ok)
        .map(|entry| entry.path())
        .filter(|p| {
            p.extension()
                .is_some_and(|ext| ext.eq_ignore_ascii_case("qasm"))
        })
        .collect();
    paths.sort();
    Ok(paths)
}
