//! The run orchestrator: load, partition, resynthesize, filter, merge.

use std::path::Path;
use std::time::Instant;

use chrono::Utc;
use quilt_compile::{PassManagerBuilder, canonicalize};
use quilt_ir::Circuit;
use quilt_partition::CircuitAssembler;
use quilt_session::{CompilerSession, Workflow};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument, warn};

use crate::config::{CircuitSource, RunConfig};
use crate::error::{BenchError, BenchResult};
use crate::export;
use crate::metrics::{CircuitStats, MetricsRecord};

/// The outputs of one pipeline run: the optimized circuit and its
/// metrics record.
#[derive(Debug, Clone)]
pub struct RunOutcome {
    pub circuit: Circuit,
    pub metrics: MetricsRecord,
}

/// Side-by-side pipeline and baseline results for one circuit.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComparisonReport {
    /// Circuit name.
    pub name: String,
    /// Pipeline (partition-optimize-merge) result.
    pub pipeline: MetricsRecord,
    /// Monolithic baseline result; its `algorithm` field carries the
    /// `baseline-o{level}` label.
    pub baseline: MetricsRecord,
}

/// Load a circuit from a source and prepare it for partitioning:
/// nested blocks inlined, measurements stripped.
pub fn load_circuit(source: &CircuitSource) -> BenchResult<Circuit> {
    let mut circuit = match source {
        CircuitSource::Path { path } => {
            if !path.is_file() {
                return Err(BenchError::PathNotFound(path.clone()));
            }
            let text = std::fs::read_to_string(path)
                .map_err(|e| BenchError::invalid_source(path.display().to_string(), e))?;
            let mut circuit = quilt_qasm::parse(&text)
                .map_err(|e| BenchError::invalid_source(path.display().to_string(), e))?;
            circuit.set_name(source.name());
            circuit
        }
        CircuitSource::Memory { name, circuit } => {
            let mut circuit = circuit.clone();
            circuit.set_name(name.clone());
            circuit
        }
    };

    circuit.unfold_all();
    circuit.remove_measurements();
    Ok(circuit)
}

/// Run the partition-optimize-merge pipeline on one circuit.
///
/// Any block task failure abandons the whole run: a partially optimized
/// circuit is not a result.
#[instrument(skip(config, source), fields(name = %source.name()))]
pub fn optimize_circuit(config: &RunConfig, source: &CircuitSource) -> BenchResult<RunOutcome> {
    let start = Instant::now();
    let circuit = load_circuit(source)?;
    let name = circuit.name().to_string();

    // Both sides of the comparison are reported in the canonical basis.
    let mut reference = circuit.clone();
    canonicalize(&mut reference)?;
    let before = CircuitStats::of(&reference);

    let parts = config
        .strategy
        .build(config.block_width)?
        .partition(&circuit)?;
    let num_blocks = parts.num_blocks();
    info!(num_blocks, "circuit partitioned");

    let session = match config.workers {
        Some(workers) => CompilerSession::with_workers(workers)?,
        None => CompilerSession::new()?,
    };

    let task_ids: Vec<_> = parts
        .blocks
        .iter()
        .map(|block| {
            session.submit(
                Workflow::new(block.circuit.clone(), config.algorithm)
                    .with_threshold(config.threshold)
                    .with_search_width(config.search_width),
            )
        })
        .collect();

    let mut chosen = Vec::with_capacity(num_blocks);
    let mut blocks_replaced = 0usize;
    let mut block_gates_before = 0usize;
    let mut block_gates_after = 0usize;

    for (block, id) in parts.blocks.iter().zip(task_ids) {
        let optimized = session.result(id)?;
        block_gates_before += block.circuit.num_gates();

        if config.filter.accept(&block.circuit, &optimized) {
            blocks_replaced += 1;
            block_gates_after += optimized.num_gates();
            chosen.push(quilt_partition::Block {
                circuit: optimized,
                location: block.location.clone(),
            });
        } else {
            debug!(block = block.circuit.name(), "filter kept original block");
            block_gates_after += block.circuit.num_gates();
            chosen.push(block.clone());
        }
    }
    session.close();

    let mut merged = CircuitAssembler::new(name.clone(), circuit.num_qubits()).assemble(&chosen)?;
    canonicalize(&mut merged)?;
    let after = CircuitStats::of(&merged);

    if after.multi_qubit_gates > before.multi_qubit_gates {
        warn!(
            before = before.multi_qubit_gates,
            after = after.multi_qubit_gates,
            "pipeline increased entangling gate count"
        );
    }

    let metrics = MetricsRecord {
        name,
        num_qubits: merged.num_qubits(),
        partitioner: config.partitioner_label(),
        algorithm: config.algorithm.as_str().to_string(),
        filter: config.filter.as_str().to_string(),
        threshold: config.threshold,
        num_blocks,
        before,
        after,
        avg_block_gates_before: block_gates_before as f64 / num_blocks as f64,
        avg_block_gates_after: block_gates_after as f64 / num_blocks as f64,
        blocks_replaced,
        duration_ms: start.elapsed().as_millis() as u64,
        generated_at: Utc::now(),
    };

    info!(
        gates_before = metrics.before.gates,
        gates_after = metrics.after.gates,
        "pipeline run complete"
    );

    Ok(RunOutcome {
        circuit: merged,
        metrics,
    })
}

/// Optimize the whole circuit monolithically at a preset level, for
/// comparison against the partitioned pipeline.
#[instrument(skip(source), fields(name = %source.name()))]
pub fn baseline_circuit(source: &CircuitSource, level: u8) -> BenchResult<RunOutcome> {
    let start = Instant::now();
    let circuit = load_circuit(source)?;
    let name = circuit.name().to_string();

    let mut reference = circuit.clone();
    canonicalize(&mut reference)?;
    let before = CircuitStats::of(&reference);

    let mut optimized = circuit;
    PassManagerBuilder::new()
        .with_optimization_level(level)
        .build()
        .run(&mut optimized)?;
    let after = CircuitStats::of(&optimized);

    let metrics = MetricsRecord {
        name,
        num_qubits: optimized.num_qubits(),
        partitioner: "none".to_string(),
        algorithm: format!("baseline-o{level}"),
        filter: "none".to_string(),
        threshold: 0.0,
        num_blocks: 0,
        before,
        after,
        avg_block_gates_before: 0.0,
        avg_block_gates_after: 0.0,
        blocks_replaced: 0,
        duration_ms: start.elapsed().as_millis() as u64,
        generated_at: Utc::now(),
    };

    Ok(RunOutcome {
        circuit: optimized,
        metrics,
    })
}

/// Run the pipeline and the baseline on the same circuit.
pub fn full_comparison(
    config: &RunConfig,
    source: &CircuitSource,
    baseline_level: u8,
) -> BenchResult<ComparisonReport> {
    let pipeline = optimize_circuit(config, source)?;
    let baseline = baseline_circuit(source, baseline_level)?;

    Ok(ComparisonReport {
        name: source.name(),
        pipeline: pipeline.metrics,
        baseline: baseline.metrics,
    })
}

/// Run the pipeline over every `.qasm` file in a directory.
///
/// Non-QASM files are ignored. The optimized circuit and a metrics
/// record are written to `output_dir` for each input; the records are
/// also returned, in file-name order.
pub fn optimize_directory(
    config: &RunConfig,
    input_dir: &Path,
    output_dir: &Path,
) -> BenchResult<Vec<MetricsRecord>> {
    if !input_dir.is_dir() {
        return Err(BenchError::PathNotFound(input_dir.to_path_buf()));
    }
    export::ensure_dir(output_dir)?;

    let mut paths: Vec<_> = std::fs::read_dir(input_dir)
        .map_err(|source| BenchError::Io {
            path: input_dir.to_path_buf(),
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

    info!(circuits = paths.len(), dir = %input_dir.display(), "starting directory run");

    let mut records = Vec::with_capacity(paths.len());
    for path in paths {
        let source = CircuitSource::path(path);
        let outcome = optimize_circuit(config, &source)?;
        export::save_circuit(
            &outcome.circuit,
            output_dir,
            &config.output_stem(&outcome.metrics.name),
        )?;
        export::save_metrics(&outcome.metrics, output_dir)?;
        records.push(outcome.metrics);
    }
    Ok(records)
}
