//! The bottom-up search over an AND/OR graph.
//!
//! The same propagation scheme as the proof search, restated over graph
//! nodes: an OR node passes a dependency's justification through unchanged,
//! an AND node joins it with the completed sets of all of its other
//! dependencies. Leaves seed the queue: an axiom leaf with its singleton,
//! an AND node with no dependencies with the empty set; an OR node with no
//! dependencies and no initial element is unsatisfiable and seeds nothing.

use std::{
    cmp::Reverse,
    collections::{BinaryHeap, HashMap, HashSet, VecDeque},
    hash::Hash,
};

use log::{debug, trace};

use super::{AndOrGraph, AoId, NodeKind};
use crate::{
    justifications::justification::{is_minimal, join, AxiomSet, Justification},
    justifications::Outcome,
    monitor::InterruptMonitor,
    proof::IndexedProof,
    stats::SearchStats,
};

pub(crate) struct AndOrSearch<'a, C, A, M> {
    graph: &'a AndOrGraph,
    /// Axioms are resolved against the proof the graph was built from.
    proof: &'a IndexedProof<C, A>,
    monitor: &'a M,
    size_limit: usize,
    justifications: Vec<Vec<Justification<AoId>>>,
    /// Reverse edges over the part of the graph reachable from the root.
    dependents: HashMap<AoId, Vec<AoId>>,
    queue: BinaryHeap<Reverse<Justification<AoId>>>,
    stats: SearchStats,
}

impl<'a, C, A, M> AndOrSearch<'a, C, A, M>
where
    A: Clone + Eq + Hash,
    M: InterruptMonitor,
{
    pub fn new(
        graph: &'a AndOrGraph,
        proof: &'a IndexedProof<C, A>,
        monitor: &'a M,
        size_limit: usize,
    ) -> Self {
        Self {
            graph,
            proof,
            monitor,
            size_limit,
            justifications: vec![Vec::new(); graph.node_count()],
            dependents: HashMap::new(),
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

    fn initialize(&mut self) {
        let mut relevant = vec![false; self.graph.node_count()];
        let mut to_do = VecDeque::new();
        relevant[self.graph.root().index()] = true;
        to_do.push_back(self.graph.root());

        while let Some(node) = to_do.pop_front() {
            self.stats.processed_conclusions += 1;
            trace!("{:?}: initializing node", node);
            for &dep in self.graph.deps(node) {
                self.stats.processed_inferences += 1;
                let watchers = self.dependents.entry(dep).or_default();
                if !watchers.contains(&node) {
                    watchers.push(node);
                }
                if !relevant[dep.index()] {
                    relevant[dep.index()] = true;
                    to_do.push_back(dep);
                }
            }
            if let Some(axiom) = self.graph.initial(node) {
                self.produce(Justification::new(node, AxiomSet::singleton(axiom)));
            } else if self.graph.deps(node).is_empty() {
                match self.graph.kind(node) {
                    // an empty conjunction is satisfied by nothing at all
                    NodeKind::And => {
                        self.produce(Justification::new(node, AxiomSet::empty()));
                    }
                    // an empty disjunction is unsatisfiable
                    NodeKind::Or => {}
                }
            }
        }
    }

    fn process(&mut self, listener: &mut dyn FnMut(HashSet<A>)) -> Outcome {
        let root = self.graph.root();
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
            if node != root && !is_minimal(&just, &self.justifications[root.index()], &mut self.stats)
            {
                trace!("blocked {:?}", just);
                self.stats.blocked_candidates += 1;
                continue;
            }
            trace!("new {:?}", just);
            self.justifications[node.index()].push(just.clone());
            self.stats.minimal_justifications += 1;
            if node == root {
                listener(self.resolve(&just));
            }

            if just.is_empty() {
                // nothing smaller can arrive; propagation into this node is over
                for &dep in self.graph.deps(node) {
                    if let Some(watchers) = self.dependents.get_mut(&dep) {
                        watchers.retain(|&watcher| watcher != node);
                    }
                }
            }

            let Some(watchers) = self.dependents.get(&node) else {
                continue;
            };
            for dependent in watchers.clone() {
                let moved = just.copy_to(dependent);
                match self.graph.kind(dependent) {
                    NodeKind::Or => self.produce(moved),
                    NodeKind::And => {
                        let mut candidates = vec![moved];
                        for &other in self.graph.deps(dependent) {
                            if other == node {
                                continue;
                            }
                            candidates = join(
                                candidates,
                                &self.justifications[other.index()],
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
            }
        }
        Outcome::Complete
    }

    fn produce(&mut self, just: Justification<AoId>) {
        if just.len() > self.size_limit {
            trace!("oversized {:?}", just);
            return;
        }
        let root = self.graph.root();
        if !is_minimal(&just, &self.justifications[root.index()], &mut self.stats) {
            trace!("blocked {:?}", just);
            self.stats.blocked_candidates += 1;
            return;
        }
        self.stats.produced_candidates += 1;
        self.queue.push(Reverse(just));
    }

    fn resolve(&self, just: &Justification<AoId>) -> HashSet<A> {
        just.axioms()
            .iter()
            .map(|id| self.proof.axiom(id).clone())
            .collect()
    }
}
