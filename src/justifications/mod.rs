//! Enumeration of minimal justifications and minimal repairs.
//!
//! A [`JustificationEngine`] borrows a caller proof, a justifier, and a
//! cancellation monitor. Each `enumerate_*` call normalizes the subproof
//! under the given goal, runs one search session with its own memoization
//! state, streams every minimal set to the listener exactly once in
//! non-decreasing size, and folds the session counters into the engine
//! statistics. Cancellation and size bounds end a session early with a
//! partial but valid result set; neither is an error.

mod bottom_up;
pub(crate) mod justification;
#[cfg(test)]
mod tests;

use std::{collections::HashSet, hash::Hash, marker::PhantomData};

use bottom_up::BottomUpSearch;

use crate::{
    andor::{AndOrGraph, AndOrSearch},
    monitor::InterruptMonitor,
    normalize::normalize,
    proof::{InferenceJustifier, Proof},
    stats::SearchStats,
};

/// How an enumeration session ended. An interrupted session has emitted a
/// subset of the full answer; a complete one has emitted all of it (within
/// the size limit, if one was given).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Outcome {
    Complete,
    Interrupted,
}

pub struct JustificationEngine<'a, C, A, P, J, M> {
    proof: &'a P,
    justifier: &'a J,
    monitor: &'a M,
    stats: SearchStats,
    _types: PhantomData<fn() -> (C, A)>,
}

impl<'a, C, A, P, J, M> JustificationEngine<'a, C, A, P, J, M>
where
    C: Clone + Eq + Hash,
    A: Clone + Eq + Hash,
    P: Proof<C>,
    J: InferenceJustifier<P::Inference, Axiom = A>,
    M: InterruptMonitor,
{
    pub fn new(proof: &'a P, justifier: &'a J, monitor: &'a M) -> Self {
        Self {
            proof,
            justifier,
            monitor,
            stats: SearchStats::default(),
            _types: PhantomData,
        }
    }

    /// Streams every inclusion-minimal justification of `goal` to the
    /// listener.
    pub fn enumerate_justifications(
        &mut self,
        goal: &C,
        listener: impl FnMut(HashSet<A>),
    ) -> Outcome {
        self.enumerate_justifications_within(goal, usize::MAX, listener)
    }

    /// Streams the minimal justifications of `goal` with at most
    /// `size_limit` axioms: exactly the subset of the unbounded answer that
    /// fits the bound.
    pub fn enumerate_justifications_within(
        &mut self,
        goal: &C,
        size_limit: usize,
        mut listener: impl FnMut(HashSet<A>),
    ) -> Outcome {
        let canonical = normalize(self.proof, self.justifier, goal);
        let search = BottomUpSearch::new(&canonical, self.monitor, size_limit);
        let (outcome, session) = search.run(&mut listener);
        self.stats.absorb(&session);
        outcome
    }

    /// Collects the minimal justifications of `goal`.
    pub fn justifications(&mut self, goal: &C) -> Vec<HashSet<A>> {
        self.justifications_within(goal, usize::MAX)
    }

    pub fn justifications_within(&mut self, goal: &C, size_limit: usize) -> Vec<HashSet<A>> {
        let mut collected = Vec::new();
        self.enumerate_justifications_within(goal, size_limit, |just| collected.push(just));
        collected
    }

    /// Streams every inclusion-minimal repair of `goal`: a minimal set of
    /// axioms whose removal blocks all derivations. Computed as the minimal
    /// justifications of the dualized AND/OR graph.
    pub fn enumerate_repairs(&mut self, goal: &C, listener: impl FnMut(HashSet<A>)) -> Outcome {
        self.enumerate_repairs_within(goal, usize::MAX, listener)
    }

    pub fn enumerate_repairs_within(
        &mut self,
        goal: &C,
        size_limit: usize,
        mut listener: impl FnMut(HashSet<A>),
    ) -> Outcome {
        let canonical = normalize(self.proof, self.justifier, goal);
        let dual = AndOrGraph::for_justifications(&canonical).dual();
        let search = AndOrSearch::new(&dual, &canonical, self.monitor, size_limit);
        let (outcome, session) = search.run(&mut listener);
        self.stats.absorb(&session);
        outcome
    }

    /// Collects the minimal repairs of `goal`.
    pub fn repairs(&mut self, goal: &C) -> Vec<HashSet<A>> {
        self.repairs_within(goal, usize::MAX)
    }

    pub fn repairs_within(&mut self, goal: &C, size_limit: usize) -> Vec<HashSet<A>> {
        let mut collected = Vec::new();
        self.enumerate_repairs_within(goal, size_limit, |repair| collected.push(repair));
        collected
    }

    /// Cumulative counters over all sessions since the last reset.
    pub fn statistics(&self) -> &SearchStats {
        &self.stats
    }

    pub fn reset_statistics(&mut self) {
        self.stats.reset();
    }
}
