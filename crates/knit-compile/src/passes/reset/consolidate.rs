//! Collapsing of consecutive resets.

use knit_ir::{CircuitDag, DagNode, Instruction, IrError, WireId};
use tracing::{debug, warn};

use crate::error::CompileResult;
use crate::pass::{Pass, PassKind};
use crate::property::PropertySet;

use super::ResetCleanupStats;

/// Consolidate a run of duplicate resets into a single reset.
///
/// Every reset whose successor on its wire is also a reset is deleted, so a
/// run `R1 -> R2 -> ... -> Rk` keeps only `Rk`.
///
/// Resets are expected to act on exactly one qubit. A reset node touching
/// any other number of qubits is left alone and reported with `warn!`.
pub struct ConsolidateResets;

impl Pass for ConsolidateResets {
    fn name(&self) -> &'static str {
        "consolidate_resets"
    }

    fn kind(&self) -> PassKind {
        PassKind::Transformation
    }

    fn run(&self, dag: &mut CircuitDag, properties: &mut PropertySet) -> CompileResult<()> {
        // Snapshot before mutating. Removing Ri rewires the predecessor of
        // R(i+1) but leaves its index intact, so every remaining entry stays
        // valid for the successor lookups below.
        let resets = dag.op_nodes_where(Instruction::is_reset);
        let mut removed = 0;

        for node in resets {
            let inst = dag.get_instruction(node).ok_or(IrError::InvalidNode(node))?;
            let &[qubit] = inst.qubits.as_slice() else {
                warn!(
                    ?node,
                    qubits = inst.qubits.len(),
                    "Skipping reset that does not act on exactly one qubit"
                );
                continue;
            };

            let wire = WireId::Qubit(qubit);
            let succ = dag.successor_on_wire(node, wire)?;
            if dag.node(succ).is_some_and(DagNode::is_reset) {
                dag.remove_op(node)?;
                debug!(%wire, "Removed duplicate reset");
                removed += 1;
            }
        }

        properties
            .get_or_default::<ResetCleanupStats>()
            .duplicate_resets_removed += removed;

        Ok(())
    }
}
