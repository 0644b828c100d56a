//! Pass trait for circuit transformations.

use quilt_ir::Circuit;

use crate::error::CompileResult;

/// A compilation pass that rewrites a circuit in place.
///
/// Passes are the fundamental unit of compilation in Quilt. Each pass
/// performs one specific rewrite and must preserve the circuit's
/// semantics on its wires.
pub trait Pass: Send + Sync {
    /// Get the name of this pass.
    fn name(&self) -> &str;

    /// Run the pass on the given circuit.
    fn run(&self, circuit: &mut Circuit) -> CompileResult<()>;

    /// Check if this pass should run.
    ///
    /// This can be overridden to skip passes that are not needed.
    fn should_run(&self, _circuit: &Circuit) -> bool {
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct TestPass;

    impl Pass for TestPass {
        fn name(&self) -> &'static str {
            "test"
        }

        fn run(&self, _circuit: &mut Circuit) -> CompileResult<()> {
            Ok(())
        }
    }

    #[test]
    fn test_pass_defaults() {
        let pass = TestPass;
        assert_eq!(pass.name(), "test");
        assert!(pass.should_run(&Circuit::new("empty")));
    }
}
