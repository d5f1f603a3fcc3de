//! Arena representation of the subproof reachable from a goal.
//!
//! Conclusions, inferences, and axioms are interned to integer ids by a
//! breadth-first traversal from the goal. All normalization passes and both
//! searches work on ids; caller values are resolved back only when a result
//! is emitted. Synthetic conclusions introduced by binarization are ids with
//! no caller value at all.

use std::{
    collections::{HashMap, VecDeque},
    hash::Hash,
};

use super::{Inference, InferenceJustifier, Proof};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub(crate) u32);

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct InfId(pub(crate) u32);

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct AxiomId(pub(crate) u32);

impl NodeId {
    pub(crate) fn index(self) -> usize {
        self.0 as usize
    }
}

impl InfId {
    pub(crate) fn index(self) -> usize {
        self.0 as usize
    }
}

impl AxiomId {
    pub(crate) fn index(self) -> usize {
        self.0 as usize
    }
}

/// An inference over interned ids. The axiom list is sorted and free of
/// duplicates.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct IndexedInference {
    pub(crate) conclusion: NodeId,
    pub(crate) premises: Vec<NodeId>,
    pub(crate) axioms: Vec<AxiomId>,
}

/// The goal-reachable part of a caller proof, interned into arenas.
#[derive(Clone, Debug)]
pub struct IndexedProof<C, A> {
    /// Caller conclusions by node id; `None` marks a synthetic conclusion.
    conclusions: Vec<Option<C>>,
    conclusion_index: HashMap<C, NodeId>,
    axioms: Vec<A>,
    axiom_index: HashMap<A, AxiomId>,
    inferences: Vec<IndexedInference>,
    /// Inference ids deriving each node, in first-seen order.
    inferences_of: Vec<Vec<InfId>>,
    goal: NodeId,
}

impl<C, A> IndexedProof<C, A>
where
    C: Clone + Eq + Hash,
    A: Clone + Eq + Hash,
{
    /// Interns everything reachable from `goal` by following premises.
    pub fn build<P, J>(proof: &P, justifier: &J, goal: &C) -> Self
    where
        P: Proof<C>,
        J: InferenceJustifier<P::Inference, Axiom = A>,
    {
        let mut this = Self {
            conclusions: Vec::new(),
            conclusion_index: HashMap::new(),
            axioms: Vec::new(),
            axiom_index: HashMap::new(),
            inferences: Vec::new(),
            inferences_of: Vec::new(),
            goal: NodeId(0),
        };
        let mut to_do = VecDeque::new();
        this.goal = this.intern_conclusion(goal, &mut to_do);

        while let Some(node) = to_do.pop_front() {
            let conclusion = this.conclusions[node.index()]
                .clone()
                .unwrap_or_else(|| unreachable!("traversal only visits caller conclusions"));
            for inference in proof.inferences(&conclusion) {
                let premises = inference
                    .premises()
                    .iter()
                    .map(|premise| this.intern_conclusion(premise, &mut to_do))
                    .collect();
                let mut axioms: Vec<AxiomId> = justifier
                    .justification(&inference)
                    .iter()
                    .map(|axiom| this.intern_axiom(axiom))
                    .collect();
                axioms.sort_unstable();
                axioms.dedup();
                let id = InfId(this.inferences.len() as u32);
                this.inferences.push(IndexedInference {
                    conclusion: node,
                    premises,
                    axioms,
                });
                this.inferences_of[node.index()].push(id);
            }
        }
        this
    }

    fn intern_conclusion(&mut self, conclusion: &C, to_do: &mut VecDeque<NodeId>) -> NodeId {
        if let Some(&id) = self.conclusion_index.get(conclusion) {
            return id;
        }
        let id = NodeId(self.conclusions.len() as u32);
        self.conclusions.push(Some(conclusion.clone()));
        self.conclusion_index.insert(conclusion.clone(), id);
        self.inferences_of.push(Vec::new());
        to_do.push_back(id);
        id
    }

    fn intern_axiom(&mut self, axiom: &A) -> AxiomId {
        if let Some(&id) = self.axiom_index.get(axiom) {
            return id;
        }
        let id = AxiomId(self.axioms.len() as u32);
        self.axioms.push(axiom.clone());
        self.axiom_index.insert(axiom.clone(), id);
        id
    }
}

impl<C, A> IndexedProof<C, A> {
    pub fn goal(&self) -> NodeId {
        self.goal
    }

    pub fn node_count(&self) -> usize {
        self.conclusions.len()
    }

    pub fn inference_count(&self) -> usize {
        self.inferences.len()
    }

    pub fn axiom_count(&self) -> usize {
        self.axioms.len()
    }

    pub fn conclusion(&self, node: NodeId) -> Option<&C> {
        self.conclusions[node.index()].as_ref()
    }

    pub fn is_synthetic(&self, node: NodeId) -> bool {
        self.conclusions[node.index()].is_none()
    }

    pub fn node_of(&self, conclusion: &C) -> Option<NodeId>
    where
        C: Eq + Hash,
    {
        self.conclusion_index.get(conclusion).copied()
    }

    pub fn axiom(&self, id: AxiomId) -> &A {
        &self.axioms[id.index()]
    }

    pub fn inference(&self, id: InfId) -> &IndexedInference {
        &self.inferences[id.index()]
    }

    pub fn inferences_of(&self, node: NodeId) -> &[InfId] {
        &self.inferences_of[node.index()]
    }

    pub(crate) fn inference_ids(&self) -> impl Iterator<Item = InfId> {
        (0..self.inferences.len() as u32).map(InfId)
    }

    /// Adds a synthetic conclusion with no caller value. Used by
    /// binarization only.
    pub(crate) fn push_synthetic(&mut self) -> NodeId {
        let id = NodeId(self.conclusions.len() as u32);
        self.conclusions.push(None);
        self.inferences_of.push(Vec::new());
        id
    }

    /// Replaces the inference arena, rebuilding the per-node index. The
    /// per-node inference order is the order of the given list.
    pub(crate) fn replace_inferences(&mut self, inferences: Vec<IndexedInference>) {
        for list in &mut self.inferences_of {
            list.clear();
        }
        for (index, inference) in inferences.iter().enumerate() {
            self.inferences_of[inference.conclusion.index()].push(InfId(index as u32));
        }
        self.inferences = inferences;
    }
}
