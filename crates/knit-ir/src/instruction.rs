//! Circuit instructions combining an operation kind with its operands.

use serde::{Deserialize, Serialize};

use crate::gate::StandardGate;
use crate::wire::{ClbitId, QubitId, WireId};

/// The kind of instruction in a circuit.
///
/// Passes dispatch on this tag with `match`; adding a variant forces every
/// exhaustive match in the pipeline to be revisited.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum InstructionKind {
    /// A quantum gate operation.
    Gate(StandardGate),
    /// Measurement operation.
    Measure,
    /// Reset qubit to |0⟩.
    Reset,
    /// Barrier (synchronization point).
    Barrier,
    /// Delay instruction.
    Delay {
        /// Duration in device-specific units.
        duration: u64,
    },
}

/// A complete instruction with operands.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Instruction {
    /// The kind of instruction.
    pub kind: InstructionKind,
    /// Qubits this instruction operates on.
    pub qubits: Vec<QubitId>,
    /// Classical bits this instruction operates on (for measure).
    pub clbits: Vec<ClbitId>,
}

impl Instruction {
    /// Create a gate instruction.
    pub fn gate(gate: StandardGate, qubits: impl IntoIterator<Item = QubitId>) -> Self {
        Self {
            kind: InstructionKind::Gate(gate),
            qubits: qubits.into_iter().collect(),
            clbits: vec![],
        }
    }

    /// Create a single-qubit gate instruction.
    pub fn single_qubit_gate(gate: StandardGate, qubit: QubitId) -> Self {
        Self::gate(gate, [qubit])
    }

    /// Create a two-qubit gate instruction.
    pub fn two_qubit_gate(gate: StandardGate, q1: QubitId, q2: QubitId) -> Self {
        Self::gate(gate, [q1, q2])
    }

    /// Create a measurement instruction.
    pub fn measure(qubit: QubitId, clbit: ClbitId) -> Self {
        Self {
            kind: InstructionKind::Measure,
            qubits: vec![qubit],
            clbits: vec![clbit],
        }
    }

    /// Create a reset instruction.
    pub fn reset(qubit: QubitId) -> Self {
        Self {
            kind: InstructionKind::Reset,
            qubits: vec![qubit],
            clbits: vec![],
        }
    }

    /// Create a barrier instruction.
    pub fn barrier(qubits: impl IntoIterator<Item = QubitId>) -> Self {
        Self {
            kind: InstructionKind::Barrier,
            qubits: qubits.into_iter().collect(),
            clbits: vec![],
        }
    }

    /// Create a delay instruction.
    pub fn delay(qubit: QubitId, duration: u64) -> Self {
        Self {
            kind: InstructionKind::Delay { duration },
            qubits: vec![qubit],
            clbits: vec![],
        }
    }

    /// Check if this is a gate instruction.
    pub fn is_gate(&self) -> bool {
        matches!(self.kind, InstructionKind::Gate(_))
    }

    /// Check if this is a measurement.
    pub fn is_measure(&self) -> bool {
        matches!(self.kind, InstructionKind::Measure)
    }

    /// Check if this is a reset.
    pub fn is_reset(&self) -> bool {
        matches!(self.kind, InstructionKind::Reset)
    }

    /// Check if this is a barrier.
    pub fn is_barrier(&self) -> bool {
        matches!(self.kind, InstructionKind::Barrier)
    }

    /// Get the gate if this is a gate instruction.
    pub fn as_gate(&self) -> Option<&StandardGate> {
        match &self.kind {
            InstructionKind::Gate(g) => Some(g),
            _ => None,
        }
    }

    /// Iterate over every wire this instruction touches, qubits first.
    pub fn wires(&self) -> impl Iterator<Item = WireId> + '_ {
        self.qubits
            .iter()
            .copied()
            .map(WireId::Qubit)
            .chain(self.clbits.iter().copied().map(WireId::Clbit))
    }

    /// Get the name of the instruction.
    pub fn name(&self) -> &str {
        match &self.kind {
            InstructionKind::Gate(g) => g.name(),
            InstructionKind::Measure => "measure",
            InstructionKind::Reset => "reset",
            InstructionKind::Barrier => "barrier",
            InstructionKind::Delay { .. } => "delay",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gate_instruction() {
        let inst = Instruction::single_qubit_gate(StandardGate::H, QubitId(0));
        assert!(inst.is_gate());
        assert!(!inst.is_reset());
        assert_eq!(inst.qubits.len(), 1);
        assert_eq!(inst.name(), "h");
        assert_eq!(inst.as_gate(), Some(&StandardGate::H));
    }

    #[test]
    fn test_reset_instruction() {
        let inst = Instruction::reset(QubitId(2));
        assert!(inst.is_reset());
        assert!(inst.as_gate().is_none());
        assert_eq!(inst.name(), "reset");
        assert_eq!(inst.wires().collect::<Vec<_>>(), vec![WireId::Qubit(QubitId(2))]);
    }

    #[test]
    fn test_measure_wires() {
        let inst = Instruction::measure(QubitId(0), ClbitId(1));
        assert!(inst.is_measure());
        assert_eq!(
            inst.wires().collect::<Vec<_>>(),
            vec![WireId::Qubit(QubitId(0)), WireId::Clbit(ClbitId(1))]
        );
    }

    #[test]
    fn test_barrier_and_delay() {
        let barrier = Instruction::barrier([QubitId(0), QubitId(1), QubitId(2)]);
        assert!(barrier.is_barrier());
        assert_eq!(barrier.qubits.len(), 3);

        let delay = Instruction::delay(QubitId(0), 40);
        assert_eq!(delay.name(), "delay");
        assert_eq!(delay.kind, InstructionKind::Delay { duration: 40 });
    }

    #[test]
    fn test_instruction_serde() {
        let inst = Instruction::reset(QubitId(1));
        let json = serde_json::to_string(&inst).unwrap();
        let back: Instruction = serde_json::from_str(&json).unwrap();
        assert_eq!(back, inst);
    }
}
