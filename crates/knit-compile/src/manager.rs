//! Pass manager for orchestrating compilation.

use tracing::{debug, info, instrument};

use knit_ir::CircuitDag;

use crate::config::PassConfig;
use crate::error::{CompileError, CompileResult};
use crate::pass::Pass;
use crate::passes::{ConsolidateResets, RemoveFinalReset};
use crate::property::PropertySet;

/// Manages and executes a sequence of compilation passes.
pub struct PassManager {
    /// The passes to execute, in order.
    passes: Vec<Box<dyn Pass>>,
    /// Run `verify_integrity` on the DAG after every pass.
    verify_integrity: bool,
}

impl PassManager {
    /// Create a new empty pass manager.
    pub fn new() -> Self {
        Self {
            passes: vec![],
            verify_integrity: false,
        }
    }

    /// Add a pass to the manager.
    pub fn add_pass(&mut self, pass: impl Pass + 'static) {
        self.passes.push(Box::new(pass));
    }

    /// Check DAG integrity after every pass.
    pub fn set_verify_integrity(&mut self, enabled: bool) {
        self.verify_integrity = enabled;
    }

    /// Run all passes on the given DAG, one at a time, in insertion order.
    #[instrument(skip(self, dag, properties))]
    pub fn run(&self, dag: &mut CircuitDag, properties: &mut PropertySet) -> CompileResult<()> {
        info!(
            "Running pass manager with {} passes on circuit with {} qubits",
            self.passes.len(),
            dag.num_qubits()
        );

        for pass in &self.passes {
            if !pass.should_run(dag, properties) {
                debug!("Skipping pass: {}", pass.name());
                continue;
            }

            debug!("Running pass: {}", pass.name());
            pass.run(dag, properties)?;

            if self.verify_integrity {
                dag.verify_integrity()
                    .map_err(|e| CompileError::PassFailed {
                        name: pass.name().to_string(),
                        reason: e.to_string(),
                    })?;
            }
            debug!("Pass {} completed, ops: {}", pass.name(), dag.num_ops());
        }

        info!("Pass manager completed, ops: {}", dag.num_ops());

        Ok(())
    }

    /// Names of the scheduled passes, in execution order.
    pub fn pass_names(&self) -> Vec<&str> {
        self.passes.iter().map(|p| p.name()).collect()
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

/// Builder for the reset cleanup pipeline.
///
/// Consolidation is scheduled before final-reset removal so that a wire
/// ending in a run of resets is emptied of all of them in a single pass
/// manager run.
pub struct PassManagerBuilder {
    config: PassConfig,
    properties: PropertySet,
}

impl PassManagerBuilder {
    /// Create a new builder with the default configuration.
    pub fn new() -> Self {
        Self {
            config: PassConfig::default(),
            properties: PropertySet::new(),
        }
    }

    /// Replace the whole configuration.
    #[must_use]
    pub fn with_config(mut self, config: PassConfig) -> Self {
        self.config = config;
        self
    }

    /// Enable or disable [`ConsolidateResets`].
    #[must_use]
    pub fn with_reset_consolidation(mut self, enabled: bool) -> Self {
        self.config.consolidate_resets = enabled;
        self
    }

    /// Enable or disable [`RemoveFinalReset`].
    #[must_use]
    pub fn with_final_reset_removal(mut self, enabled: bool) -> Self {
        self.config.remove_final_reset = enabled;
        self
    }

    /// Enable or disable the post-pass integrity check.
    #[must_use]
    pub fn with_integrity_check(mut self, enabled: bool) -> Self {
        self.config.verify_integrity = enabled;
        self
    }

    /// Seed the property set handed back by [`build`](Self::build).
    #[must_use]
    pub fn with_properties(mut self, properties: PropertySet) -> Self {
        self.properties = properties;
        self
    }

    /// Build the pass manager and return it with the properties.
    pub fn build(self) -> (PassManager, PropertySet) {
        let mut pm = PassManager::new();
        pm.set_verify_integrity(self.config.verify_integrity);

        if self.config.consolidate_resets {
            pm.add_pass(ConsolidateResets);
        }
        if self.config.remove_final_reset {
            pm.add_pass(RemoveFinalReset);
        }

        (pm, self.properties)
    }
}

impl Default for PassManagerBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pass::PassKind;
    use knit_ir::{Circuit, QubitId};

    #[test]
    fn test_empty_pass_manager() {
        let pm = PassManager::new();
        assert!(pm.is_empty());
        assert_eq!(pm.len(), 0);
    }

    #[test]
    fn test_empty_pass_manager_run() {
        let pm = PassManager::new();
        let mut props = PropertySet::new();

        let mut circuit = Circuit::with_size("test", 1, 0);
        circuit.h(QubitId(0)).unwrap();
        circuit.reset(QubitId(0)).unwrap();

        let mut dag = circuit.into_dag();
        pm.run(&mut dag, &mut props).unwrap();

        assert_eq!(dag.num_ops(), 2);
    }

    #[test]
    fn test_builder_default_order() {
        let (pm, _) = PassManagerBuilder::new().build();
        assert_eq!(
            pm.pass_names(),
            vec!["consolidate_resets", "remove_final_reset"]
        );
    }

    #[test]
    fn test_builder_toggles() {
        let (pm, _) = PassManagerBuilder::new()
            .with_reset_consolidation(false)
            .build();
        assert_eq!(pm.pass_names(), vec!["remove_final_reset"]);

        let (pm, _) = PassManagerBuilder::new()
            .with_config(PassConfig {
                consolidate_resets: false,
                remove_final_reset: false,
                verify_integrity: true,
            })
            .build();
        assert!(pm.is_empty());
    }

    struct SkipAlways;

    impl Pass for SkipAlways {
        fn name(&self) -> &'static str {
            "skip_always"
        }

        fn kind(&self) -> PassKind {
            PassKind::Transformation
        }

        fn run(&self, _dag: &mut CircuitDag, _props: &mut PropertySet) -> CompileResult<()> {
            Err(CompileError::PassFailed {
                name: self.name().to_string(),
                reason: "should have been skipped".into(),
            })
        }

        fn should_run(&self, _dag: &CircuitDag, _props: &PropertySet) -> bool {
            false
        }
    }

    #[test]
    fn test_should_run_false_skips_pass() {
        let mut pm = PassManager::new();
        pm.add_pass(SkipAlways);
        let mut dag = Circuit::with_size("test", 1, 0).into_dag();
        pm.run(&mut dag, &mut PropertySet::new()).unwrap();
    }

    #[test]
    fn test_seeded_properties_returned() {
        let mut seeded = PropertySet::new();
        seeded.insert(7u8);
        let (_, props) = PassManagerBuilder::new().with_properties(seeded).build();
        assert_eq!(props.get::<u8>(), Some(&7));
    }
}
