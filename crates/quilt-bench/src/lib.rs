//! Benchmark pipeline for Quilt: partition, resynthesize, filter, merge.
//!
//! The pipeline cuts a circuit into width-bounded blocks, resynthesizes
//! each block on a compiler session, keeps the rewrites that pass the
//! replace filter and merges the result back into a full circuit. Both
//! sides of the before/after comparison are reported in the canonical
//! `{x, sx, rz, cx}` basis.
//!
//! ```rust
//! use quilt_bench::{CircuitSource, RunConfig, optimize_circuit};
//! use quilt_ir::Circuit;
//!
//! let config = RunConfig::default();
//! let source = CircuitSource::memory("qft5", Circuit::qft(5).unwrap());
//! let outcome = optimize_circuit(&config, &source).unwrap();
//! assert_eq!(outcome.circuit.num_qubits(), 5);
//! assert!(outcome.metrics.blocks_replaced <= outcome.metrics.num_blocks);
//! ```

mod config;
mod distance;
mod error;
mod export;
mod filter;
mod metrics;
mod report;
mod run;

pub use config::{CircuitSource, RunConfig};
pub use distance::{
    DistanceStats, UnitaryBackend, chi2_distance, cross_block_distances, kl_divergence,
    padded_distributions,
};
pub use error::{BenchError, BenchResult};
pub use export::{save_circuit, save_metrics};
pub use filter::ReplaceFilter;
pub use metrics::{CircuitStats, MetricsRecord};
pub use report::{
    BlockDistanceRow, CircuitComparisonReport, ComparisonRow, PairDistanceReport,
    PartitionDistanceReport, compare_circuits, compare_circuits_with_backend, compare_directories,
    compare_sources, comparison_stats, partition_distance_table, save_comparison_stats,
};
pub use run::{
    ComparisonReport, RunOutcome, baseline_circuit, full_comparison, load_circuit,
    optimize_circuit, optimize_directory,
};
