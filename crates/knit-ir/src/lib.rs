//! Knit Circuit Intermediate Representation
//!
//! Core data structures for representing quantum circuits as a DAG of
//! operations, used by the `knit-compile` transpiler passes.
//!
//! # Overview
//!
//! Every qubit and classical bit is a *wire*. Each wire starts at an input
//! sentinel and ends at an output sentinel, and every operation on the wire
//! sits on a single linear chain between the two. Passes navigate the chain
//! with [`CircuitDag::predecessor_on_wire`] and
//! [`CircuitDag::successor_on_wire`] and edit it with
//! [`CircuitDag::remove_op`].
//!
//! # Example
//!
//! ```rust
//! use knit_ir::{Circuit, QubitId, WireId};
//!
//! let mut circuit = Circuit::with_size("subexperiment", 1, 0);
//! circuit.h(QubitId(0)).unwrap();
//! circuit.reset(QubitId(0)).unwrap();
//!
//! let dag = circuit.into_dag();
//! let wire = WireId::Qubit(QubitId(0));
//! let out = dag.output_node(wire).unwrap();
//! let last = dag.predecessor_on_wire(out, wire).unwrap();
//! assert!(dag.get_instruction(last).unwrap().is_reset());
//! ```

pub mod circuit;
pub mod dag;
pub mod error;
pub mod gate;
pub mod instruction;
pub mod wire;

pub use circuit::Circuit;
pub use dag::{CircuitDag, DagEdge, DagNode, NodeIndex};
pub use error::{IrError, IrResult};
pub use gate::StandardGate;
pub use instruction::{Instruction, InstructionKind};
pub use wire::{ClbitId, QubitId, WireId};
