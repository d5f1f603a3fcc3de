//! The bottom-up minimal-justification search.
//!
//! Justification candidates propagate from premise-free inferences upward
//! through a priority queue ordered by size. Because candidates pop in
//! non-decreasing size, a candidate that survives the subset checks against
//! the completed sets of its conclusion is a minimal justification, and goal
//! results can be emitted the moment they are found, each exactly once.

use std::{
    cmp::Reverse,
    collections::{BinaryHeap, HashMap, HashSet, VecDeque},
    hash::Hash,
};

use log::{debug, trace, warn};

use super::{
    justification::{is_minimal, join, AxiomSet, Justification},
    Outcome,
};
use crate::{
    monitor::InterruptMonitor,
    proof::{IndexedProof, InfId, NodeId},
    stats::SearchStats,
};

pub(crate) struct BottomUpSearch<'a, C, A, M> {
    proof: &'a IndexedProof<C, A>,
    monitor: &'a M,
    size_limit: usize,
    /// Minimal justifications per node, in the order they were found.
    justifications: Vec<Vec<Justification<NodeId>>>,
    /// Inferences watching a premise. An entry disappears once the premise's
    /// only minimal justification is known to be the empty set.
    by_premise: HashMap<NodeId, Vec<InfId>>,
    queue: BinaryHeap<Reverse<Justification<NodeId>>>,
    stats: SearchStats,
}

impl<'a, C, A, M> BottomUpSearch<'a, C, A, M>
where
    A: Clone + Eq + Hash,
    M: InterruptMonitor,
{
    pub fn new(proof: &'a IndexedProof<C, A>, monitor: &'a M, size_limit: usize) -> Self {
        Self {
            proof,
            monitor,
            size_limit,
            justifications: vec![Vec::new(); proof.node_count()],
            by_premise: HashMap::new(),
            queue: BinaryHeap::new(),
            stats: SearchStats::default(),
        }
    }

    pub fn run(mut self, listener: &mut dyn FnMut(HashSet<A>)) -> (Outcome, SearchStats) {
        self.initialize();
        let outcome = self.process(listener);
        self.stats.log_statistics();
        (outcome, self.stats)
    }

    /// Walks the proof from the goal, indexes inferences by premise, and
    /// seeds the queue with the justifications of premise-free inferences.
    fn initialize(&mut self) {
        let mut relevant = vec![false; self.proof.node_count()];
        let mut to_do = VecDeque::new();
        relevant[self.proof.goal().index()] = true;
        to_do.push_back(self.proof.goal());

        while let Some(node) = to_do.pop_front() {
            self.stats.processed_conclusions += 1;
            trace!("{:?}: initializing justification computation", node);
            let mut derived = false;
            for &inf_id in self.proof.inferences_of(node) {
                derived = true;
                self.stats.processed_inferences += 1;
                let inference = self.proof.inference(inf_id);
                for &premise in &inference.premises {
                    self.by_premise.entry(premise).or_default().push(inf_id);
                    if !relevant[premise.index()] {
                        relevant[premise.index()] = true;
                        to_do.push_back(premise);
                    }
                }
                if inference.premises.is_empty() {
                    let axioms = AxiomSet::from_sorted(inference.axioms.clone());
                    self.produce(Justification::new(node, axioms));
                }
            }
            if !derived {
                warn!("{:?}: conclusion not derived by any inference", node);
            }
        }
    }

    /// Propagates queued candidates until the fixpoint, the size cutoff, or
    /// an interrupt.
    fn process(&mut self, listener: &mut dyn FnMut(HashSet<A>)) -> Outcome {
        let goal = self.proof.goal();
        while let Some(Reverse(just)) = self.queue.pop() {
            if self.monitor.is_interrupted() {
                debug!("enumeration interrupted");
                return Outcome::Interrupted;
            }
            let node = just.node();
            if !is_minimal(&just, &self.justifications[node.index()], &mut self.stats) {
                trace!("pruned {:?}", just);
                self.stats.pruned_candidates += 1;
                continue;
            }
            if node != goal && !is_minimal(&just, &self.justifications[goal.index()], &mut self.stats)
            {
                trace!("blocked {:?}", just);
                self.stats.blocked_candidates += 1;
                continue;
            }
            trace!("new {:?}", just);
            self.justifications[node.index()].push(just.clone());
            self.stats.minimal_justifications += 1;
            if node == goal {
                listener(self.resolve(&just));
            }

            if just.is_empty() {
                // the empty set is the only minimal justification, so
                // propagation into this conclusion is over
                for &inf_id in self.proof.inferences_of(node) {
                    for &premise in &self.proof.inference(inf_id).premises {
                        if let Some(watchers) = self.by_premise.get_mut(&premise) {
                            watchers.retain(|&id| id != inf_id);
                        }
                    }
                }
            }

            let Some(watchers) = self.by_premise.get(&node) else {
                continue;
            };
            for inf_id in watchers.clone() {
                let inference = self.proof.inference(inf_id);
                let seed = just
                    .copy_to(inference.conclusion)
                    .with_axioms(&AxiomSet::from_sorted(inference.axioms.clone()));
                let mut candidates = vec![seed];
                for &premise in &inference.premises {
                    if premise == node {
                        continue;
                    }
                    candidates = join(
                        candidates,
                        &self.justifications[premise.index()],
                        self.size_limit,
                        &mut self.stats,
                    );
                    if candidates.is_empty() {
                        break;
                    }
                }
                for candidate in candidates {
                    self.produce(candidate);
                }
            }
        }
        Outcome::Complete
    }

    fn produce(&mut self, just: Justification<NodeId>) {
        if just.len() > self.size_limit {
            trace!("oversized {:?}", just);
            return;
        }
        // a superset of a completed goal result can never contribute a new
        // minimal goal result
        let goal = self.proof.goal();
        if !is_minimal(&just, &self.justifications[goal.index()], &mut self.stats) {
            trace!("blocked {:?}", just);
            self.stats.blocked_candidates += 1;
            return;
        }
        self.stats.produced_candidates += 1;
        self.queue.push(Reverse(just));
    }

    fn resolve(&self, just: &Justification<NodeId>) -> HashSet<A> {
        just.axioms()
            .iter()
            .map(|id| self.proof.axiom(id).clone())
            .collect()
    }
}
