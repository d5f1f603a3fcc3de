//! Counters collected during enumeration.
//!
//! The engine owns one cumulative [`SearchStats`] value; every enumeration
//! session adds its own counts into it. The counters are reset only on an
//! explicit caller request.

use log::debug;
use serde::Serialize;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct SearchStats {
    /// Conclusions (or graph nodes) whose computation was initialized.
    pub processed_conclusions: usize,
    /// Inferences (or graph edges) visited during initialization.
    pub processed_inferences: usize,
    /// Justification candidates pushed into the propagation queue.
    pub produced_candidates: usize,
    /// Minimal justifications recorded across all conclusions.
    pub minimal_justifications: usize,
    /// Candidates discarded because a completed set was a subset of them.
    pub pruned_candidates: usize,
    /// Candidates discarded because a completed goal result subsumed them.
    pub blocked_candidates: usize,
    /// Pairwise subset tests performed.
    pub subset_tests: usize,
    /// Subset tests decided by the occupancy signature alone.
    pub signature_rejections: usize,
}

impl SearchStats {
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Adds the counts of one enumeration session into this value.
    pub fn absorb(&mut self, session: &SearchStats) {
        self.processed_conclusions += session.processed_conclusions;
        self.processed_inferences += session.processed_inferences;
        self.produced_candidates += session.produced_candidates;
        self.minimal_justifications += session.minimal_justifications;
        self.pruned_candidates += session.pruned_candidates;
        self.blocked_candidates += session.blocked_candidates;
        self.subset_tests += session.subset_tests;
        self.signature_rejections += session.signature_rejections;
    }

    pub fn log_statistics(&self) {
        debug!("{}: processed conclusions", self.processed_conclusions);
        debug!("{}: processed inferences", self.processed_inferences);
        debug!("{}: produced justification candidates", self.produced_candidates);
        debug!("{}: minimal justifications", self.minimal_justifications);
        debug!("{}: pruned justification candidates", self.pruned_candidates);
        debug!("{}: blocked justification candidates", self.blocked_candidates);
        debug!(
            "{} of {}: subset tests decided by signatures",
            self.signature_rejections, self.subset_tests
        );
    }
}
