//! Built-in compilation passes.

pub mod reset;

pub use reset::{ConsolidateResets, RemoveFinalReset, ResetCleanupStats};
