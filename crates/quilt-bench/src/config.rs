//! Run configuration for the benchmark pipeline.

use std::path::PathBuf;

use quilt_compile::SynthesisAlgorithm;
use quilt_ir::Circuit;
use quilt_partition::PartitionStrategy;
use serde::{Deserialize, Serialize};

use crate::filter::ReplaceFilter;

/// Where a circuit comes from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum CircuitSource {
    /// A QASM file on disk. The circuit takes its name from the file stem.
    Path { path: PathBuf },
    /// An already-built circuit.
    Memory { name: String, circuit: Circuit },
}

impl CircuitSource {
    /// Source a circuit from a QASM file.
    pub fn path(path: impl Into<PathBuf>) -> Self {
        Self::Path { path: path.into() }
    }

    /// Source an in-memory circuit under the given name.
    pub fn memory(name: impl Into<String>, circuit: Circuit) -> Self {
        Self::Memory {
            name: name.into(),
            circuit,
        }
    }

    /// The name the run will report under.
    pub fn name(&self) -> String {
        match self {
            Self::Path { path } => path
                .file_stem()
                .map(|s| s.to_string_lossy().into_owned())
                .unwrap_or_else(|| "circuit".to_string()),
            Self::Memory { name, .. } => name.clone(),
        }
    }
}

/// Configuration for one pipeline run. A plain value: cheap to clone,
/// serializable, and carried alongside the results it produced.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunConfig {
    /// Partitioning strategy.
    pub strategy: PartitionStrategy,
    /// Maximum wires per block.
    pub block_width: usize,
    /// Synthesis algorithm for block resynthesis.
    pub algorithm: SynthesisAlgorithm,
    /// Replace-filter policy.
    pub filter: ReplaceFilter,
    /// Identity tolerance for residual rotations.
    pub threshold: f64,
    /// Lookahead search width.
    pub search_width: usize,
    /// Worker threads for the compiler session. `None` uses one per core.
    pub workers: Option<usize>,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            strategy: PartitionStrategy::Quick,
            block_width: 3,
            algorithm: SynthesisAlgorithm::Greedy,
            filter: ReplaceFilter::LessThanMulti,
            threshold: 1e-8,
            search_width: 4,
            workers: None,
        }
    }
}

impl RunConfig {
    /// Set the partitioning strategy.
    #[must_use]
    pub fn with_strategy(mut self, strategy: PartitionStrategy) -> Self {
        self.strategy = strategy;
        self
    }

    /// Set the block width.
    #[must_use]
    pub fn with_block_width(mut self, block_width: usize) -> Self {
        self.block_width = block_width;
        self
    }

    /// Set the synthesis algorithm.
    #[must_use]
    pub fn with_algorithm(mut self, algorithm: SynthesisAlgorithm) -> Self {
        self.algorithm = algorithm;
        self
    }

    /// Set the replace filter.
    #[must_use]
    pub fn with_filter(mut self, filter: ReplaceFilter) -> Self {
        self.filter = filter;
        self
    }

    /// Set the identity tolerance.
    #[must_use]
    pub fn with_threshold(mut self, threshold: f64) -> Self {
        self.threshold = threshold;
        self
    }

    /// The width-bearing partitioner label, e.g. `quick3`.
    pub fn partitioner_label(&self) -> String {
        self.strategy.label(self.block_width)
    }

    /// The file stem for saved circuits:
    /// `{name}_{threshold}_{partitioner}_{algorithm}`.
    pub fn output_stem(&self, name: &str) -> String {
        format!(
            "{}_{}_{}_{}",
            name,
            self.threshold,
            self.partitioner_label(),
            self.algorithm.as_str()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_source_name_from_path() {
        let source = CircuitSource::path("benchmarks/adder_9.qasm");
        assert_eq!(source.name(), "adder_9");
    }

    #[test]
    fn test_source_name_from_memory() {
        let source = CircuitSource::memory("ghz5", Circuit::ghz(5).unwrap());
        assert_eq!(source.name(), "ghz5");
    }

    #[test]
    fn test_output_stem() {
        let config = RunConfig {
            strategy: PartitionStrategy::Scan,
            block_width: 3,
            algorithm: SynthesisAlgorithm::Lookahead,
            threshold: 1e-8,
            ..Default::default()
        };
        assert_eq!(
            config.output_stem("adder_9"),
            "adder_9_0.00000001_scan3_lookahead"
        );
    }

    #[test]
    fn test_config_round_trips_through_json() {
        let config = RunConfig::default();
        let json = serde_json::to_string(&config).unwrap();
        let back: RunConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(back, config);
    }
}
