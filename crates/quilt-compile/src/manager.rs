//! Pass manager for orchestrating compilation.

use tracing::{debug, info, instrument};

use quilt_ir::Circuit;

use crate::error::CompileResult;
use crate::pass::Pass;
use crate::passes::{
    BasisTranslation, CancelInversePairs, CommuteRzThroughControl, MergeRotations,
};

/// Manages and executes a sequence of compilation passes.
pub struct PassManager {
    /// The passes to execute, in order.
    passes: Vec<Box<dyn Pass>>,
}

impl PassManager {
    /// Create a new empty pass manager.
    pub fn new() -> Self {
        Self { passes: vec![] }
    }

    /// Add a pass to the manager.
    pub fn add_pass(&mut self, pass: impl Pass + 'static) {
        self.passes.push(Box::new(pass));
    }

    /// Run all passes on the given circuit.
    #[instrument(skip(self, circuit))]
    pub fn run(&self, circuit: &mut Circuit) -> CompileResult<()> {
        info!(
            passes = self.passes.len(),
            qubits = circuit.num_qubits(),
            ops = circuit.num_ops(),
            "running pass manager"
        );

        for pass in &self.passes {
            if pass.should_run(circuit) {
                debug!("Running pass: {}", pass.name());
                pass.run(circuit)?;
                debug!("Pass {} completed, ops: {}", pass.name(), circuit.num_ops());
            } else {
                debug!("Skipping pass: {}", pass.name());
            }
        }

        info!(ops = circuit.num_ops(), "pass manager completed");
        Ok(())
    }

    /// Get the number of passes.
    pub fn len(&self) -> usize {
        self.passes.len()
    }

    /// Check if the manager has no passes.
    pub fn is_empty(&self) -> bool {
        self.passes.is_empty()
    }
}

impl Default for PassManager {
    fn default() -> Self {
        Self::new()
    }
}

/// Builder for creating pass managers with preset configurations.
pub struct PassManagerBuilder {
    /// Optimization level (0-3).
    optimization_level: u8,
}

impl PassManagerBuilder {
    /// Create a new builder with default settings.
    pub fn new() -> Self {
        Self {
            optimization_level: 1,
        }
    }

    /// Set the optimization level.
    ///
    /// - Level 0: basis translation only, no optimization
    /// - Level 1: inverse-pair cancellation (default)
    /// - Level 2: adds rotation merging
    /// - Level 3: adds commutation and a second cancellation round
    #[must_use]
    pub fn with_optimization_level(mut self, level: u8) -> Self {
        self.optimization_level = level.min(3);
        self
    }

    /// Build the pass manager.
    ///
    /// Every preset ends with [`BasisTranslation`], so the output is
    /// always in the `{x, sx, rz, cx}` basis.
    pub fn build(self) -> PassManager {
        let mut pm = PassManager::new();

        if self.optimization_level >= 3 {
            pm.add_pass(CommuteRzThroughControl);
        }
        if self.optimization_level >= 1 {
            pm.add_pass(CancelInversePairs);
        }
        if self.optimization_level >= 2 {
            pm.add_pass(MergeRotations::new());
        }
        if self.optimization_level >= 3 {
            pm.add_pass(CancelInversePairs);
        }
        pm.add_pass(BasisTranslation);

        pm
    }
}

impl Default for PassManagerBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Rewrite a circuit into the `{x, sx, rz, cx}` basis without optimizing.
///
/// This is the normal form all pipeline outputs are reported in; applying
/// it twice gives the same circuit as applying it once.
pub fn canonicalize(circuit: &mut Circuit) -> CompileResult<()> {
    PassManagerBuilder::new()
        .with_optimization_level(0)
        .build()
        .run(circuit)
}

#[cfg(test)]
mod tests {
    use super::*;
    use quilt_ir::QubitId;

    #[test]
    fn test_empty_pass_manager() {
        let pm = PassManager::new();
        assert!(pm.is_empty());
        assert_eq!(pm.len(), 0);
    }

    #[test]
    fn test_level0_is_canonicalization_only() {
        let pm = PassManagerBuilder::new().with_optimization_level(0).build();
        assert_eq!(pm.len(), 1);

        // h h stays two gates' worth of basis translation: no cancellation.
        let mut circuit = Circuit::with_size("test", 1);
        circuit.h(QubitId(0)).unwrap();
        circuit.h(QubitId(0)).unwrap();
        pm.run(&mut circuit).unwrap();
        assert_eq!(circuit.num_gates(), 10);
    }

    #[test]
    fn test_level1_cancels() {
        let mut circuit = Circuit::with_size("test", 2);
        circuit.h(QubitId(0)).unwrap();
        circuit.h(QubitId(0)).unwrap();
        circuit.cx(QubitId(0), QubitId(1)).unwrap();

        PassManagerBuilder::new()
            .with_optimization_level(1)
            .build()
            .run(&mut circuit)
            .unwrap();
        assert_eq!(circuit.num_gates(), 1);
    }

    #[test]
    fn test_canonicalize_idempotent() {
        let mut circuit = Circuit::qft(4).unwrap();
        canonicalize(&mut circuit).unwrap();
        let once = circuit.clone();
        canonicalize(&mut circuit).unwrap();
        assert_eq!(circuit, once);
    }

    #[test]
    fn test_level_clamped() {
        let pm = PassManagerBuilder::new().with_optimization_level(9).build();
        assert_eq!(pm.len(), 5);
    }
}
