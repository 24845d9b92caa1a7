//! Removal of resets at the end of qubit wires.

use knit_ir::{CircuitDag, DagNode};
use tracing::{debug, warn};

use crate::error::CompileResult;
use crate::pass::{Pass, PassKind};
use crate::property::PropertySet;

use super::ResetCleanupStats;

/// Remove a reset when it is the final instruction on a qubit wire.
///
/// For every qubit output sentinel, the operation immediately before it is
/// inspected; if it is a reset, it is deleted. Classical wires are skipped.
/// Only the last operation is considered, so a wire ending in several
/// resets loses one per run; schedule [`ConsolidateResets`](super::ConsolidateResets)
/// first to collapse such runs.
///
/// A trailing reset that acts on more than one qubit may sit mid-wire on
/// another of its qubits, so it is left alone and reported with `warn!`.
pub struct RemoveFinalReset;

impl Pass for RemoveFinalReset {
    fn name(&self) -> &'static str {
        "remove_final_reset"
    }

    fn kind(&self) -> PassKind {
        PassKind::Transformation
    }

    fn run(&self, dag: &mut CircuitDag, properties: &mut PropertySet) -> CompileResult<()> {
        let mut removed = 0;

        for (wire, output) in dag.output_nodes() {
            if !wire.is_qubit() {
                continue;
            }

            let pred = dag.predecessor_on_wire(output, wire)?;
            let Some(DagNode::Op(inst)) = dag.node(pred) else {
                continue;
            };
            if !inst.is_reset() {
                continue;
            }
            if inst.qubits.len() != 1 {
                warn!(
                    %wire,
                    qubits = inst.qubits.len(),
                    "Skipping final reset that does not act on exactly one qubit"
                );
                continue;
            }

            dag.remove_op(pred)?;
            debug!(%wire, "Removed final reset");
            removed += 1;
        }

        properties
            .get_or_default::<ResetCleanupStats>()
            .final_resets_removed += removed;

        Ok(())
    }
}
