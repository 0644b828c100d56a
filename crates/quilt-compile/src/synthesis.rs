//! Block resynthesis algorithms.

use quilt_ir::Circuit;
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::debug;

use crate::error::{CompileError, CompileResult};
use crate::pass::Pass;
use crate::passes::{
    BasisTranslation, CancelInversePairs, CommuteRzThroughControl, MergeRotations,
};

/// A block resynthesis algorithm.
///
/// Takes a narrow block, produces an equivalent circuit with (hopefully)
/// fewer gates, in the `{x, sx, rz, cx}` basis. The threshold is the
/// numeric tolerance under which a residual rotation counts as identity.
pub trait Synthesizer: Send + Sync {
    /// Get the name of this synthesizer.
    fn name(&self) -> &str;

    /// Resynthesize a block.
    fn resynthesize(&self, block: &Circuit, threshold: f64) -> CompileResult<Circuit>;
}

/// Peephole resynthesis: alternate cancellation and rotation merging
/// until the gate count stops improving, then translate to the basis.
pub struct GreedySynthesis;

impl Synthesizer for GreedySynthesis {
    fn name(&self) -> &str {
        "greedy"
    }

    fn resynthesize(&self, block: &Circuit, threshold: f64) -> CompileResult<Circuit> {
        let mut circuit = block.clone();
        let merge = MergeRotations::new().with_tolerance(threshold.max(1e-10));

        loop {
            let before = circuit.num_gates();
            CancelInversePairs.run(&mut circuit)?;
            merge.run(&mut circuit)?;
            if circuit.num_gates() >= before {
                break;
            }
        }

        BasisTranslation.run(&mut circuit)?;
        debug!(
            before = block.num_gates(),
            after = circuit.num_gates(),
            "greedy resynthesis"
        );
        Ok(circuit)
    }
}

/// Like [`GreedySynthesis`], but commutes Z-rotations past controls
/// between rounds to expose cancellations the greedy sweep misses, and
/// keeps searching for a bounded number of unimproving rounds.
pub struct LookaheadSynthesis {
    search_width: usize,
}

impl LookaheadSynthesis {
    /// Create the synthesizer with the default search width.
    pub fn new() -> Self {
        Self { search_width: 4 }
    }

    /// Number of unimproving rounds to tolerate before stopping.
    #[must_use]
    pub fn with_search_width(mut self, search_width: usize) -> Self {
        self.search_width = search_width.max(1);
        self
    }
}

impl Default for LookaheadSynthesis {
    fn default() -> Self {
        Self::new()
    }
}

impl Synthesizer for LookaheadSynthesis {
    fn name(&self) -> &str {
        "lookahead"
    }

    fn resynthesize(&self, block: &Circuit, threshold: f64) -> CompileResult<Circuit> {
        let mut circuit = block.clone();
        let merge = MergeRotations::new().with_tolerance(threshold.max(1e-10));
        let mut stale_rounds = 0usize;

        while stale_rounds < self.search_width {
            let before = circuit.num_gates();
            CommuteRzThroughControl.run(&mut circuit)?;
            CancelInversePairs.run(&mut circuit)?;
            merge.run(&mut circuit)?;
            if circuit.num_gates() < before {
                stale_rounds = 0;
            } else {
                stale_rounds += 1;
            }
        }

        BasisTranslation.run(&mut circuit)?;
        debug!(
            before = block.num_gates(),
            after = circuit.num_gates(),
            "lookahead resynthesis"
        );
        Ok(circuit)
    }
}

/// The available synthesis algorithms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SynthesisAlgorithm {
    /// Single-sweep peephole resynthesis ([`GreedySynthesis`]).
    Greedy,
    /// Commutation-aware resynthesis ([`LookaheadSynthesis`]).
    Lookahead,
}

impl SynthesisAlgorithm {
    /// Parse an algorithm name.
    pub fn from_name(name: &str) -> CompileResult<Self> {
        match name {
            "greedy" => Ok(Self::Greedy),
            "lookahead" => Ok(Self::Lookahead),
            other => Err(CompileError::UnknownAlgorithm(other.to_string())),
        }
    }

    /// The algorithm name, as used in output file labels.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Greedy => "greedy",
            Self::Lookahead => "lookahead",
        }
    }

    /// Instantiate the synthesizer.
    ///
    /// `search_width` only affects the lookahead algorithm.
    pub fn build(self, search_width: usize) -> Box<dyn Synthesizer> {
        match self {
            Self::Greedy => Box::new(GreedySynthesis),
            Self::Lookahead => Box::new(LookaheadSynthesis::new().with_search_width(search_width)),
        }
    }
}

impl fmt::Display for SynthesisAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
