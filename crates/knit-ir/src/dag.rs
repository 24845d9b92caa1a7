//! DAG-based circuit representation.

use petgraph::Direction;
use petgraph::stable_graph::{NodeIndex as PetNodeIndex, StableDiGraph};
use petgraph::visit::EdgeRef;
use rustc_hash::{FxHashMap, FxHashSet};
use serde::{Deserialize, Serialize};

use crate::error::{IrError, IrResult};
use crate::instruction::{Instruction, InstructionKind};
use crate::wire::{ClbitId, QubitId, WireId};

/// Node index type for the circuit DAG.
pub type NodeIndex = PetNodeIndex<u32>;

/// A node in the circuit DAG.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum DagNode {
    /// Input sentinel for a wire.
    In(WireId),
    /// Output sentinel for a wire.
    Out(WireId),
    /// Operation node containing an instruction.
    Op(Instruction),
}

impl DagNode {
    /// Check if this is an input node.
    #[inline]
    pub fn is_input(&self) -> bool {
        matches!(self, DagNode::In(_))
    }

    /// Check if this is an output node.
    #[inline]
    pub fn is_output(&self) -> bool {
        matches!(self, DagNode::Out(_))
    }

    /// Check if this is an operation node.
    #[inline]
    pub fn is_op(&self) -> bool {
        matches!(self, DagNode::Op(_))
    }

    /// Get the instruction if this is an operation node.
    #[inline]
    pub fn instruction(&self) -> Option<&Instruction> {
        match self {
            DagNode::Op(inst) => Some(inst),
            _ => None,
        }
    }

    /// Check if this is an operation node holding a reset.
    #[inline]
    pub fn is_reset(&self) -> bool {
        matches!(
            self,
            DagNode::Op(Instruction {
                kind: InstructionKind::Reset,
                ..
            })
        )
    }
}

/// An edge in the circuit DAG representing a wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DagEdge {
    /// The wire this edge represents.
    pub wire: WireId,
}

/// DAG-based circuit representation.
///
/// The circuit is represented as a directed acyclic graph where:
/// - Nodes are either input sentinels, output sentinels, or operation nodes
/// - Edges represent wires (quantum or classical)
/// - Each wire has exactly one input and one output node
/// - Every node has exactly one incoming and one outgoing edge per wire it
///   touches, so each wire is a linear chain from `In` to `Out`
///
/// ## Index stability
///
/// The graph is a [`StableDiGraph`]: removing a node never renumbers the
/// others. Passes may snapshot a list of [`NodeIndex`] values, delete some
/// of them, and keep using the rest.
#[derive(Debug, Clone, Default)]
pub struct CircuitDag {
    /// The underlying graph.
    graph: StableDiGraph<DagNode, DagEdge, u32>,
    /// Map from wire to its input sentinel.
    inputs: FxHashMap<WireId, NodeIndex>,
    /// Map from wire to its output sentinel.
    outputs: FxHashMap<WireId, NodeIndex>,
}

impl CircuitDag {
    /// Create a new empty circuit DAG.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a qubit to the circuit. Adding an existing qubit is a no-op.
    pub fn add_qubit(&mut self, qubit: QubitId) {
        self.add_wire(WireId::Qubit(qubit));
    }

    /// Add a classical bit to the circuit. Adding an existing bit is a no-op.
    pub fn add_clbit(&mut self, clbit: ClbitId) {
        self.add_wire(WireId::Clbit(clbit));
    }

    fn add_wire(&mut self, wire: WireId) {
        if self.inputs.contains_key(&wire) {
            return;
        }
        let in_node = self.graph.add_node(DagNode::In(wire));
        let out_node = self.graph.add_node(DagNode::Out(wire));
        self.graph.add_edge(in_node, out_node, DagEdge { wire });
        self.inputs.insert(wire, in_node);
        self.outputs.insert(wire, out_node);
    }

    /// Append an instruction at the end of every wire it touches.
    pub fn apply(&mut self, instruction: Instruction) -> IrResult<NodeIndex> {
        let gate_name = instruction.as_gate().map(|g| g.name().to_string());

        if let InstructionKind::Gate(gate) = &instruction.kind {
            let expected = gate.num_qubits();
            let got = instruction.qubits.len();
            if expected != got {
                return Err(IrError::QubitCountMismatch {
                    gate_name: gate.name().to_string(),
                    expected,
                    got,
                });
            }
        }

        for &qubit in &instruction.qubits {
            if !self.inputs.contains_key(&WireId::Qubit(qubit)) {
                return Err(IrError::QubitNotFound {
                    qubit,
                    gate_name: gate_name.clone(),
                });
            }
        }

        for &clbit in &instruction.clbits {
            if !self.inputs.contains_key(&WireId::Clbit(clbit)) {
                return Err(IrError::ClbitNotFound {
                    clbit,
                    gate_name: gate_name.clone(),
                });
            }
        }

        let mut seen = FxHashSet::default();
        for &qubit in &instruction.qubits {
            if !seen.insert(qubit) {
                return Err(IrError::DuplicateQubit { qubit, gate_name });
            }
        }
        let mut seen_clbits = FxHashSet::default();
        for &clbit in &instruction.clbits {
            if !seen_clbits.insert(clbit) {
                return Err(IrError::InvalidDag(format!(
                    "Duplicate classical bit {clbit} in operation '{}'",
                    instruction.name()
                )));
            }
        }

        let wires: Vec<WireId> = instruction.wires().collect();
        let op_node = self.graph.add_node(DagNode::Op(instruction));

        for wire in wires {
            let out_node = self.outputs[&wire];
            let (edge_id, prev_node) = self
                .graph
                .edges_directed(out_node, Direction::Incoming)
                .find(|e| e.weight().wire == wire)
                .map(|e| (e.id(), e.source()))
                .ok_or_else(|| {
                    IrError::InvalidDag(format!("Output node of wire {wire} has no predecessor"))
                })?;

            self.graph.remove_edge(edge_id);
            self.graph.add_edge(prev_node, op_node, DagEdge { wire });
            self.graph.add_edge(op_node, out_node, DagEdge { wire });
        }

        Ok(op_node)
    }

    /// Get the node that immediately precedes `node` on `wire`.
    ///
    /// Defined for every operation node and output sentinel on `wire`.
    pub fn predecessor_on_wire(&self, node: NodeIndex, wire: WireId) -> IrResult<NodeIndex> {
        self.neighbor_on_wire(node, wire, Direction::Incoming)
    }

    /// Get the node that immediately follows `node` on `wire`.
    ///
    /// Defined for every operation node and input sentinel on `wire`.
    pub fn successor_on_wire(&self, node: NodeIndex, wire: WireId) -> IrResult<NodeIndex> {
        self.neighbor_on_wire(node, wire, Direction::Outgoing)
    }

    fn neighbor_on_wire(
        &self,
        node: NodeIndex,
        wire: WireId,
        direction: Direction,
    ) -> IrResult<NodeIndex> {
        if !self.graph.contains_node(node) {
            return Err(IrError::InvalidNode(node));
        }
        self.graph
            .edges_directed(node, direction)
            .find(|e| e.weight().wire == wire)
            .map(|e| match direction {
                Direction::Incoming => e.source(),
                Direction::Outgoing => e.target(),
            })
            .ok_or(IrError::WireNotFound { node, wire })
    }

    /// Get the node stored at `node`, if it is live.
    #[inline]
    pub fn node(&self, node: NodeIndex) -> Option<&DagNode> {
        self.graph.node_weight(node)
    }

    /// Get an instruction by node index.
    #[inline]
    pub fn get_instruction(&self, node: NodeIndex) -> Option<&Instruction> {
        self.graph.node_weight(node).and_then(DagNode::instruction)
    }

    /// Get the input sentinel of a wire.
    #[inline]
    pub fn input_node(&self, wire: WireId) -> Option<NodeIndex> {
        self.inputs.get(&wire).copied()
    }

    /// Get the output sentinel of a wire.
    #[inline]
    pub fn output_node(&self, wire: WireId) -> Option<NodeIndex> {
        self.outputs.get(&wire).copied()
    }

    /// All output sentinels, qubit wires first, each group in ascending id order.
    pub fn output_nodes(&self) -> Vec<(WireId, NodeIndex)> {
        let mut outputs: Vec<_> = self.outputs.iter().map(|(&w, &n)| (w, n)).collect();
        outputs.sort_unstable_by_key(|&(wire, _)| wire);
        outputs
    }

    /// Snapshot the operation nodes whose instruction satisfies `predicate`.
    ///
    /// The result is an owned list in node index order, so callers can remove
    /// nodes from the DAG while walking it.
    pub fn op_nodes_where(&self, predicate: impl Fn(&Instruction) -> bool) -> Vec<NodeIndex> {
        self.graph
            .node_indices()
            .filter(|&idx| self.get_instruction(idx).is_some_and(&predicate))
            .collect()
    }

    /// Iterate over operations in topological order.
    pub fn topological_ops(&self) -> impl Iterator<Item = (NodeIndex, &Instruction)> {
        petgraph::algo::toposort(&self.graph, None)
            .expect("DAG must be acyclic: cycle detected in circuit graph")
            .into_iter()
            .filter_map(|idx| self.get_instruction(idx).map(|inst| (idx, inst)))
    }

    /// Instructions on `wire`, walking from its input to its output sentinel.
    pub fn wire_ops(&self, wire: WireId) -> IrResult<Vec<&Instruction>> {
        let start = self.input_node(wire).ok_or_else(|| {
            IrError::InvalidDag(format!("Wire {wire} has no input node"))
        })?;

        let mut ops = Vec::new();
        let mut current = self.successor_on_wire(start, wire)?;
        let max_steps = self.graph.node_count();
        while let Some(DagNode::Op(inst)) = self.graph.node_weight(current) {
            ops.push(inst);
            if ops.len() > max_steps {
                return Err(IrError::InvalidDag(format!(
                    "Wire {wire} does not terminate"
                )));
            }
            current = self.successor_on_wire(current, wire)?;
        }
        Ok(ops)
    }

    /// Remove an operation node from the DAG.
    ///
    /// For every wire through the node, its predecessor is reconnected to its
    /// successor on that wire. The indices of all other nodes are unchanged.
    pub fn remove_op(&mut self, node: NodeIndex) -> IrResult<Instruction> {
        match self.graph.node_weight(node) {
            Some(DagNode::Op(_)) => {}
            Some(_) => {
                return Err(IrError::InvalidDag(
                    "Cannot remove non-operation node".into(),
                ));
            }
            None => return Err(IrError::InvalidNode(node)),
        }

        let mut splices = Vec::new();
        for incoming in self.graph.edges_directed(node, Direction::Incoming) {
            let wire = incoming.weight().wire;
            for outgoing in self.graph.edges_directed(node, Direction::Outgoing) {
                if outgoing.weight().wire == wire {
                    splices.push((incoming.source(), outgoing.target(), wire));
                }
            }
        }

        for (pred, succ, wire) in splices {
            self.graph.add_edge(pred, succ, DagEdge { wire });
        }

        match self.graph.remove_node(node) {
            Some(DagNode::Op(instruction)) => Ok(instruction),
            _ => Err(IrError::InvalidNode(node)),
        }
    }

    /// Get the number of qubits.
    #[inline]
    pub fn num_qubits(&self) -> usize {
        self.inputs.keys().filter(|w| w.is_qubit()).count()
    }

    /// Get the number of classical bits.
    #[inline]
    pub fn num_clbits(&self) -> usize {
        self.inputs.len() - self.num_qubits()
    }

    /// Get the number of operations.
    ///
    /// Computed as total nodes minus the two sentinels of every wire.
    #[inline]
    pub fn num_ops(&self) -> usize {
        self.graph
            .node_count()
            .saturating_sub(2 * self.inputs.len())
    }

    /// Count operations with the given instruction name.
    pub fn count_ops(&self, name: &str) -> usize {
        self.graph
            .node_indices()
            .filter_map(|idx| self.get_instruction(idx))
            .filter(|inst| inst.name() == name)
            .count()
    }

    /// Calculate the circuit depth.
    pub fn depth(&self) -> usize {
        let mut depths: FxHashMap<NodeIndex, usize> =
            FxHashMap::with_capacity_and_hasher(self.graph.node_count(), Default::default());
        let mut max_depth = 0usize;

        for node in petgraph::algo::toposort(&self.graph, None)
            .expect("DAG must be acyclic: cycle detected in circuit graph")
        {
            let max_pred_depth = self
                .graph
                .edges_directed(node, Direction::Incoming)
                .map(|e| depths.get(&e.source()).copied().unwrap_or(0))
                .max()
                .unwrap_or(0);

            let node_depth = if self.graph[node].is_op() {
                max_pred_depth + 1
            } else {
                max_pred_depth
            };

            max_depth = max_depth.max(node_depth);
            depths.insert(node, node_depth);
        }

        max_depth
    }

    /// Qubits in ascending order.
    pub fn qubits(&self) -> Vec<QubitId> {
        let mut qubits: Vec<_> = self.inputs.keys().filter_map(WireId::as_qubit).collect();
        qubits.sort_unstable();
        qubits
    }

    /// Classical bits in ascending order.
    pub fn clbits(&self) -> Vec<ClbitId> {
        let mut clbits: Vec<_> = self
            .inputs
            .keys()
            .filter_map(|w| match w {
                WireId::Clbit(c) => Some(*c),
                WireId::Qubit(_) => None,
            })
            .collect();
        clbits.sort_unstable();
        clbits
    }

    /// Get a reference to the underlying graph.
    pub fn graph(&self) -> &StableDiGraph<DagNode, DagEdge, u32> {
        &self.graph
    }

    /// Verify the structural integrity of the DAG.
    ///
    /// Checks that:
    /// - The graph is acyclic
    /// - Every wire has both sentinels
    /// - Every wire is a continuous chain from its `In` to its `Out` node
    /// - Every operation node has exactly one incoming and one outgoing edge
    ///   per wire its instruction touches
    pub fn verify_integrity(&self) -> IrResult<()> {
        if petgraph::algo::is_cyclic_directed(&self.graph) {
            return Err(IrError::InvalidDag("Graph contains a cycle".into()));
        }

        for wire in self.inputs.keys() {
            if !self.outputs.contains_key(wire) {
                return Err(IrError::InvalidDag(format!(
                    "Wire {wire} has an In node but no Out node"
                )));
            }
        }
        for wire in self.outputs.keys() {
            if !self.inputs.contains_key(wire) {
                return Err(IrError::InvalidDag(format!(
                    "Wire {wire} has an Out node but no In node"
                )));
            }
        }

        for (&wire, &in_node) in &self.inputs {
            let out_node = self.outputs[&wire];
            let mut current = in_node;
            let mut steps = 0;
            let max_steps = self.graph.node_count();

            while current != out_node {
                current = self.successor_on_wire(current, wire).map_err(|_| {
                    IrError::InvalidDag(format!(
                        "Wire {wire} is broken: no outgoing edge from node {current:?}"
                    ))
                })?;

                steps += 1;
                if steps > max_steps {
                    return Err(IrError::InvalidDag(format!(
                        "Wire {wire} has too many steps (possible infinite loop)"
                    )));
                }
            }
        }

        for idx in self.graph.node_indices() {
            let Some(inst) = self.get_instruction(idx) else {
                continue;
            };
            for wire in inst.wires() {
                let ins = self
                    .graph
                    .edges_directed(idx, Direction::Incoming)
                    .filter(|e| e.weight().wire == wire)
                    .count();
                let outs = self
                    .graph
                    .edges_directed(idx, Direction::Outgoing)
                    .filter(|e| e.weight().wire == wire)
                    .count();
                if ins != 1 || outs != 1 {
                    return Err(IrError::InvalidDag(format!(
                        "Operation '{}' at {idx:?} has {ins} incoming and {outs} outgoing edges on wire {wire}",
                        inst.name()
                    )));
                }
            }
        }

        Ok(())
    }
}
