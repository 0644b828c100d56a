//! Replace-filter policy: deciding whether an optimized block replaces
//! its original.

use quilt_ir::Circuit;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{BenchError, BenchResult};

/// Policy deciding, per block, whether the resynthesized circuit is kept
/// or the original block retained.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ReplaceFilter {
    /// Always take the resynthesized block.
    Always,
    /// Take it only if it has strictly fewer gates.
    LessThan,
    /// Take it only if it has strictly fewer multi-qubit gates.
    LessThanMulti,
}

impl ReplaceFilter {
    /// Parse a filter name.
    pub fn from_name(name: &str) -> BenchResult<Self> {
        match name {
            "always" => Ok(Self::Always),
            "less-than" => Ok(Self::LessThan),
            "less-than-multi" => Ok(Self::LessThanMulti),
            other => Err(BenchError::UnknownFilter(other.to_string())),
        }
    }

    /// The filter name, as used in logs and labels.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Always => "always",
            Self::LessThan => "less-than",
            Self::LessThanMulti => "less-than-multi",
        }
    }

    /// Whether `candidate` should replace `original`. Ties keep the
    /// original.
    pub fn accept(self, original: &Circuit, candidate: &Circuit) -> bool {
        match self {
            Self::Always => true,
            Self::LessThan => candidate.num_gates() < original.num_gates(),
            Self::LessThanMulti => {
                candidate.num_multi_qubit_gates() < original.num_multi_qubit_gates()
            }
        }
    }
}

impl fmt::Display for ReplaceFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use quilt_ir::QubitId;

    fn circuit_with_gates(single: usize, multi: usize) -> Circuit {
        let mut circuit = Circuit::with_size("test", 2);
        for _ in 0..single {
            circuit.h(QubitId(0)).unwrap();
        }
        for _ in 0..multi {
            circuit.cx(QubitId(0), QubitId(1)).unwrap();
        }
        circuit
    }

    #[test]
    fn test_always_accepts_worse() {
        let original = circuit_with_gates(1, 1);
        let bigger = circuit_with_gates(5, 5);
        assert!(ReplaceFilter::Always.accept(&original, &bigger));
    }

    #[test]
    fn test_less_than_requires_strict_improvement() {
        let original = circuit_with_gates(2, 1);
        let same = circuit_with_gates(2, 1);
        let smaller = circuit_with_gates(1, 1);

        assert!(!ReplaceFilter::LessThan.accept(&original, &same));
        assert!(ReplaceFilter::LessThan.accept(&original, &smaller));
    }

    #[test]
    fn test_less_than_multi_ignores_single_qubit_gates() {
        let original = circuit_with_gates(0, 2);
        // More gates overall, but fewer entangling ones.
        let candidate = circuit_with_gates(6, 1);

        assert!(ReplaceFilter::LessThanMulti.accept(&original, &candidate));
        assert!(!ReplaceFilter::LessThan.accept(&original, &candidate));
    }

    #[test]
    fn test_from_name() {
        assert_eq!(
            ReplaceFilter::from_name("less-than").unwrap(),
            ReplaceFilter::LessThan
        );
        assert!(ReplaceFilter::from_name("sometimes").is_err());
    }
}
