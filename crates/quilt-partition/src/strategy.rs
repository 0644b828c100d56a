//! The partitioner trait and strategy selection.

use quilt_ir::Circuit;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::block::PartitionedCircuit;
use crate::error::{PartitionError, PartitionResult};
use crate::quick::QuickPartitioner;
use crate::scan::ScanPartitioner;

/// A strategy for cutting a circuit into width-bounded blocks.
pub trait Partitioner {
    /// Partition a circuit into blocks of at most the configured width.
    fn partition(&self, circuit: &Circuit) -> PartitionResult<PartitionedCircuit>;
}

/// The available partitioning strategies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PartitionStrategy {
    /// Single open block, strict program order ([`ScanPartitioner`]).
    Scan,
    /// Multiple open blocks, per-wire order ([`QuickPartitioner`]).
    Quick,
}

impl PartitionStrategy {
    /// Parse a strategy name.
    pub fn from_name(name: &str) -> PartitionResult<Self> {
        match name {
            "scan" => Ok(Self::Scan),
            "quick" => Ok(Self::Quick),
            other => Err(PartitionError::UnknownStrategy(other.to_string())),
        }
    }

    /// The strategy name.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Scan => "scan",
            Self::Quick => "quick",
        }
    }

    /// The width-bearing label used in output file names, e.g. `scan3`.
    pub fn label(self, block_width: usize) -> String {
        format!("{}{}", self.as_str(), block_width)
    }

    /// Instantiate the partitioner with the given block width.
    pub fn build(self, block_width: usize) -> PartitionResult<Box<dyn Partitioner>> {
        Ok(match self {
            Self::Scan => Box::new(ScanPartitioner::new(block_width)?),
            Self::Quick => Box::new(QuickPartitioner::new(block_width)?),
        })
    }
}

impl fmt::Display for PartitionStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_name() {
        assert_eq!(
            PartitionStrategy::from_name("scan").unwrap(),
            PartitionStrategy::Scan
        );
        assert_eq!(
            PartitionStrategy::from_name("quick").unwrap(),
            PartitionStrategy::Quick
        );
        assert!(PartitionStrategy::from_name("kahypar").is_err());
    }

    #[test]
    fn test_label() {
        assert_eq!(PartitionStrategy::Scan.label(3), "scan3");
        assert_eq!(PartitionStrategy::Quick.label(5), "quick5");
    }

    #[test]
    fn test_build_and_partition() {
        let circuit = Circuit::ghz(4).unwrap();
        for strategy in [PartitionStrategy::Scan, PartitionStrategy::Quick] {
            let partitioner = strategy.build(3).unwrap();
            let parts = partitioner.partition(&circuit).unwrap();
            assert_eq!(parts.num_gates(), circuit.num_gates());
        }
    }
}
