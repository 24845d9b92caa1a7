//! Knit Compilation Passes
//!
//! Pass infrastructure and the reset cleanup passes used after circuit
//! knitting. Cutting a circuit leaves subexperiments whose qubits carry
//! redundant resets; this crate removes them from a [`knit_ir::CircuitDag`].
//!
//! # Architecture
//!
//! ```text
//! CircuitDag
//!     │
//!     ▼
//! ┌─────────────┐
//! │ PassManager │ ◄── PropertySet (ResetCleanupStats, ...)
//! └─────────────┘
//!     │
//!     ├── ConsolidateResets   reset → reset  ⇒  reset
//!     └── RemoveFinalReset    reset → Out    ⇒  Out
//!     │
//!     ▼
//! CircuitDag (edited in place)
//! ```
//!
//! # Example
//!
//! ```rust
//! use knit_compile::{PassManagerBuilder, passes::ResetCleanupStats};
//! use knit_ir::{Circuit, QubitId};
//!
//! let mut circuit = Circuit::with_size("subexperiment", 1, 0);
//! circuit.reset(QubitId(0)).unwrap();
//! circuit.reset(QubitId(0)).unwrap();
//! circuit.x(QubitId(0)).unwrap();
//! circuit.reset(QubitId(0)).unwrap();
//!
//! let (pm, mut props) = PassManagerBuilder::new().build();
//! let mut dag = circuit.into_dag();
//! pm.run(&mut dag, &mut props).unwrap();
//!
//! assert_eq!(dag.count_ops("reset"), 1);
//! assert_eq!(props.get::<ResetCleanupStats>().unwrap().total(), 2);
//! ```
//!
//! # Custom Passes
//!
//! Implement the [`Pass`] trait to add passes to a [`PassManager`]:
//!
//! ```rust
//! use knit_compile::{CompileResult, Pass, PassKind, PropertySet};
//! use knit_ir::CircuitDag;
//!
//! struct MyCustomPass;
//!
//! impl Pass for MyCustomPass {
//!     fn name(&self) -> &str { "my_custom_pass" }
//!     fn kind(&self) -> PassKind { PassKind::Transformation }
//!
//!     fn run(&self, dag: &mut CircuitDag, props: &mut PropertySet) -> CompileResult<()> {
//!         Ok(())
//!     }
//! }
//! ```

pub mod config;
pub mod error;
pub mod manager;
pub mod pass;
pub mod property;

// Built-in passes
pub mod passes;

pub use config::PassConfig;
pub use error::{CompileError, CompileResult};
pub use manager::{PassManager, PassManagerBuilder};
pub use pass::{Pass, PassKind};
pub use passes::{ConsolidateResets, RemoveFinalReset, ResetCleanupStats};
pub use property::PropertySet;
