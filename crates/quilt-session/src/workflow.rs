//! Compilation workflows: the unit of work a session schedules.

use quilt_compile::{CompileResult, SynthesisAlgorithm};
use quilt_ir::Circuit;
use tracing::trace;

/// A block resynthesis job: one circuit, one algorithm, plus the knobs
/// the algorithm needs.
#[derive(Debug, Clone)]
pub struct Workflow {
    circuit: Circuit,
    algorithm: SynthesisAlgorithm,
    threshold: f64,
    search_width: usize,
}

impl Workflow {
    /// Create a workflow resynthesizing `circuit` with `algorithm`.
    pub fn new(circuit: Circuit, algorithm: SynthesisAlgorithm) -> Self {
        Self {
            circuit,
            algorithm,
            threshold: 1e-8,
            search_width: 4,
        }
    }

    /// Set the identity tolerance for residual rotations.
    #[must_use]
    pub fn with_threshold(mut self, threshold: f64) -> Self {
        self.threshold = threshold;
        self
    }

    /// Set the lookahead search width.
    #[must_use]
    pub fn with_search_width(mut self, search_width: usize) -> Self {
        self.search_width = search_width;
        self
    }

    /// The circuit this workflow rewrites.
    pub fn circuit(&self) -> &Circuit {
        &self.circuit
    }

    /// Run the workflow to completion on the calling thread.
    pub fn run(self) -> CompileResult<Circuit> {
        trace!(
            algorithm = self.algorithm.as_str(),
            gates = self.circuit.num_gates(),
            "running workflow"
        );
        let synthesizer = self.algorithm.build(self.search_width);
        let mut out = synthesizer.resynthesize(&self.circuit, self.threshold)?;
        // Results are always delivered flat.
        out.unfold_all();
        Ok(out)
    }
}
