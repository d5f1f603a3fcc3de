//! The proof as an AND/OR graph, and its dual.
//!
//! Every conclusion is an OR node over its deriving inferences, every
//! inference an AND node over its premises and its justification axioms, and
//! every axiom an OR leaf carrying the axiom as its initial element.
//! Dualization swaps the two node kinds, turning "enough axioms present to
//! derive" into "enough axioms absent to block": the minimal justifications
//! of the dual graph are exactly the minimal repairs of the original proof.

mod bottom_up;

pub(crate) use bottom_up::AndOrSearch;

use crate::proof::{AxiomId, IndexedProof, NodeId};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NodeKind {
    And,
    Or,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct AoId(u32);

impl AoId {
    pub(crate) fn index(self) -> usize {
        self.0 as usize
    }
}

/// An AND/OR view of an indexed proof. Nodes are laid out as conclusions,
/// then inferences, then one shared leaf per axiom. `deps` point from a node
/// to the nodes it is satisfied by.
#[derive(Clone, Debug)]
pub struct AndOrGraph {
    kinds: Vec<NodeKind>,
    deps: Vec<Vec<AoId>>,
    initial: Vec<Option<AxiomId>>,
    root: AoId,
    dualized: bool,
}

impl AndOrGraph {
    pub fn for_justifications<C, A>(proof: &IndexedProof<C, A>) -> Self {
        let conclusions = proof.node_count();
        let inferences = proof.inference_count();
        let axioms = proof.axiom_count();
        let total = conclusions + inferences + axioms;

        let conclusion_node = |node: NodeId| AoId(node.index() as u32);
        let inference_node = |index: usize| AoId((conclusions + index) as u32);
        let axiom_node = |axiom: AxiomId| AoId((conclusions + inferences + axiom.index()) as u32);

        let mut kinds = Vec::with_capacity(total);
        let mut deps = Vec::with_capacity(total);
        let mut initial = vec![None; total];

        for node in 0..conclusions {
            kinds.push(NodeKind::Or);
            deps.push(
                proof
                    .inferences_of(NodeId(node as u32))
                    .iter()
                    .map(|inf_id| inference_node(inf_id.index()))
                    .collect(),
            );
        }
        for index in 0..inferences {
            let inference = proof.inference(crate::proof::InfId(index as u32));
            kinds.push(NodeKind::And);
            deps.push(
                inference
                    .premises
                    .iter()
                    .map(|&premise| conclusion_node(premise))
                    .chain(inference.axioms.iter().map(|&axiom| axiom_node(axiom)))
                    .collect(),
            );
        }
        for index in 0..axioms {
            kinds.push(NodeKind::Or);
            deps.push(Vec::new());
            initial[conclusions + inferences + index] = Some(AxiomId(index as u32));
        }

        Self {
            kinds,
            deps,
            initial,
            root: conclusion_node(proof.goal()),
            dualized: false,
        }
    }

    /// Swaps AND and OR. The structure is shared; only the interpretation of
    /// the node kinds flips.
    pub fn dual(mut self) -> Self {
        self.dualized = !self.dualized;
        self
    }

    pub fn is_dualized(&self) -> bool {
        self.dualized
    }

    pub fn root(&self) -> AoId {
        self.root
    }

    pub fn node_count(&self) -> usize {
        self.kinds.len()
    }

    pub fn kind(&self, node: AoId) -> NodeKind {
        let kind = self.kinds[node.index()];
        if self.dualized {
            match kind {
                NodeKind::And => NodeKind::Or,
                NodeKind::Or => NodeKind::And,
            }
        } else {
            kind
        }
    }

    pub fn deps(&self, node: AoId) -> &[AoId] {
        &self.deps[node.index()]
    }

    pub fn initial(&self, node: AoId) -> Option<AxiomId> {
        self.initial[node.index()]
    }
}
