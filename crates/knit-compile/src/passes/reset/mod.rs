//! Reset cleanup passes.
//!
//! Cutting a circuit into subexperiments leaves qubits padded with resets:
//! runs of back-to-back resets where cut wires were stitched together, and
//! trailing resets that re-prepare a qubit nobody reads again. Both are
//! no-ops on the measured distribution.
//!
//! - [`ConsolidateResets`] collapses every run of consecutive resets on a
//!   wire into one.
//! - [`RemoveFinalReset`] drops a reset that is the last operation on its
//!   qubit wire.
//!
//! Both passes only delete reset nodes and are idempotent.

mod consolidate;
mod final_reset;


use serde::Serialize;

pub use consolidate::ConsolidateResets;
pub use final_reset::RemoveFinalReset;

/// Running totals published to the [`PropertySet`](crate::PropertySet) by the
/// reset cleanup passes. Counts accumulate across passes and repeated runs.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ResetCleanupStats {
    /// Resets removed because they ended a qubit wire.
    pub final_resets_removed: usize,
    /// Resets removed because another reset immediately followed them.
    pub duplicate_resets_removed: usize,
}

impl ResetCleanupStats {
    /// Total number of resets removed.
    pub fn total(&self) -> usize {
        self.final_resets_removed + self.duplicate_resets_removed
    }
}
