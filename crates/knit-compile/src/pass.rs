//! Pass trait and types for compilation passes.

use knit_ir::CircuitDag;

use crate::error::CompileResult;
use crate::property::PropertySet;

/// The kind of compilation pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PassKind {
    /// Analysis pass that reads but does not modify the DAG.
    Analysis,
    /// Transformation pass that modifies the DAG.
    Transformation,
}

/// A compilation pass that operates on a circuit DAG.
///
/// The caller owns the DAG and lends it exclusively for the duration of
/// [`run`](Pass::run); a transformation pass edits it in place and the
/// caller observes the result once `run` returns.
pub trait Pass: Send + Sync {
    /// Get the name of this pass.
    fn name(&self) -> &str;

    /// Get the kind of this pass.
    fn kind(&self) -> PassKind;

    /// Run the pass on the given DAG.
    ///
    /// For analysis passes, this should not modify the DAG but may
    /// write to the `PropertySet`.
    ///
    /// For transformation passes, this modifies the DAG and may record
    /// what it did in the `PropertySet`.
    fn run(&self, dag: &mut CircuitDag, properties: &mut PropertySet) -> CompileResult<()>;

    /// Check if this pass should run based on current state.
    fn should_run(&self, _dag: &CircuitDag, _properties: &PropertySet) -> bool {
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use knit_ir::{Circuit, QubitId};

    struct CountOps;

    impl Pass for CountOps {
        fn name(&self) -> &'static str {
            "count_ops"
        }

        fn kind(&self) -> PassKind {
            PassKind::Analysis
        }

        fn run(&self, dag: &mut CircuitDag, properties: &mut PropertySet) -> CompileResult<()> {
            properties.insert(dag.num_ops());
            Ok(())
        }
    }

    #[test]
    fn test_pass_defaults() {
        let pass = CountOps;
        assert_eq!(pass.kind(), PassKind::Analysis);
        assert_eq!(pass.name(), "count_ops");

        let mut circuit = Circuit::with_size("test", 1, 0);
        circuit.reset(QubitId(0)).unwrap();
        let mut dag = circuit.into_dag();
        let mut props = PropertySet::new();

        assert!(pass.should_run(&dag, &props));
        pass.run(&mut dag, &mut props).unwrap();
        assert_eq!(props.get::<usize>(), Some(&1));
    }
}
