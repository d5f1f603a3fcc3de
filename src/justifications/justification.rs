//! Justification sets and the pruning primitives shared by the searches.
//!
//! An [`AxiomSet`] keeps its elements sorted and carries a 64-bit occupancy
//! signature, so most subset tests are decided without touching the
//! elements. A [`Justification`] ties an axiom set to the node it was
//! computed for and orders by size first, which is what lets the searches
//! emit results in non-decreasing size and cut off at a size limit.

use std::cmp::Ordering;

use itertools::Itertools;

use crate::{proof::AxiomId, stats::SearchStats};

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub(crate) struct AxiomSet {
    signature: u64,
    elements: Vec<AxiomId>,
}

impl AxiomSet {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn singleton(axiom: AxiomId) -> Self {
        Self::from_sorted(vec![axiom])
    }

    /// Expects `elements` sorted and duplicate-free.
    pub fn from_sorted(elements: Vec<AxiomId>) -> Self {
        let signature = elements
            .iter()
            .fold(0u64, |mask, axiom| mask | 1 << (axiom.index() % 64));
        Self {
            signature,
            elements,
        }
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = AxiomId> + '_ {
        self.elements.iter().copied()
    }

    pub fn union(&self, other: &Self) -> Self {
        Self {
            signature: self.signature | other.signature,
            elements: self
                .elements
                .iter()
                .copied()
                .merge(other.elements.iter().copied())
                .dedup()
                .collect(),
        }
    }

    pub fn is_subset_of(&self, other: &Self, stats: &mut SearchStats) -> bool {
        stats.subset_tests += 1;
        if self.elements.len() > other.elements.len() {
            return false;
        }
        // every occupied signature bit must be occupied in the superset
        if self.signature & !other.signature != 0 {
            stats.signature_rejections += 1;
            return false;
        }
        let mut candidates = other.elements.iter();
        'outer: for element in &self.elements {
            for candidate in candidates.by_ref() {
                match candidate.cmp(element) {
                    Ordering::Less => continue,
                    Ordering::Equal => continue 'outer,
                    Ordering::Greater => return false,
                }
            }
            return false;
        }
        true
    }
}

/// An axiom set computed for a node of the search space.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct Justification<N> {
    node: N,
    axioms: AxiomSet,
}

impl<N: Copy> Justification<N> {
    pub fn new(node: N, axioms: AxiomSet) -> Self {
        Self { node, axioms }
    }

    pub fn node(&self) -> N {
        self.node
    }

    pub fn axioms(&self) -> &AxiomSet {
        &self.axioms
    }

    pub fn len(&self) -> usize {
        self.axioms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.axioms.is_empty()
    }

    /// The same axioms, recorded for another node.
    pub fn copy_to(&self, node: N) -> Self {
        Self {
            node,
            axioms: self.axioms.clone(),
        }
    }

    pub fn with_axioms(&self, added: &AxiomSet) -> Self {
        Self {
            node: self.node,
            axioms: self.axioms.union(added),
        }
    }
}

impl<N: Ord + Copy> Ord for Justification<N> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.axioms
            .len()
            .cmp(&other.axioms.len())
            .then_with(|| self.node.cmp(&other.node))
            .then_with(|| self.axioms.elements.cmp(&other.axioms.elements))
    }
}

impl<N: Ord + Copy> PartialOrd for Justification<N> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Whether no completed justification is a subset of the given one.
pub(crate) fn is_minimal<N>(
    just: &Justification<N>,
    completed: &[Justification<N>],
    stats: &mut SearchStats,
) -> bool {
    completed
        .iter()
        .all(|other| !other.axioms.is_subset_of(&just.axioms, stats))
}

/// Inserts a justification into a subset-free collection unless a subset of
/// it is already present; proper supersets of it are removed. Returns whether
/// the collection changed.
pub(crate) fn merge<N: Copy>(
    just: Justification<N>,
    completed: &mut Vec<Justification<N>>,
    stats: &mut SearchStats,
) -> bool {
    let size = just.len();
    let mut subsumed_old = false;
    let mut index = 0;
    while index < completed.len() {
        let old = &completed[index];
        if size < old.len() {
            if just.axioms.is_subset_of(&old.axioms, stats) {
                completed.remove(index);
                subsumed_old = true;
                continue;
            }
        } else if !subsumed_old && old.axioms.is_subset_of(&just.axioms, stats) {
            return false;
        }
        index += 1;
    }
    completed.push(just);
    true
}

/// All pairwise unions of the two collections, minimized under inclusion and
/// bounded by the size limit. The node is taken from the first collection.
pub(crate) fn join<N: Copy>(
    first: Vec<Justification<N>>,
    second: &[Justification<N>],
    size_limit: usize,
    stats: &mut SearchStats,
) -> Vec<Justification<N>> {
    if first.is_empty() || second.is_empty() {
        return Vec::new();
    }
    let mut result = Vec::with_capacity(first.len() * second.len());
    for left in &first {
        for right in second {
            let union = left.with_axioms(right.axioms());
            if union.len() > size_limit {
                continue;
            }
            merge(union, &mut result, stats);
        }
    }
    result
}
