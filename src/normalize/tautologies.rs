//! Elimination of tautological and dominated inferences.
//!
//! Two passes. The first drops, per conclusion, every inference whose
//! premises are a superset of a sibling inference's premises while
//! contributing no new justification axioms: a selection using the dominated
//! inference can always use the dominating one instead, with equal or lesser
//! requirements. Inferences deriving their own premise are dropped as well.
//!
//! The second pass compresses true tautologies: a conclusion derivable by
//! inferences with an empty justification has the empty set as its only
//! minimal justification, so a single tautological inference is kept for it.

use std::collections::{HashMap, VecDeque};

use log::trace;

use crate::proof::{IndexedProof, InfId, NodeId};

pub fn eliminate_tautologies<C, A>(mut proof: IndexedProof<C, A>) -> IndexedProof<C, A> {
    let mut dropped = vec![false; proof.inference_count()];

    remove_dominated(&proof, &mut dropped);
    compress_tautologies(&proof, &mut dropped);

    let kept = proof
        .inference_ids()
        .filter(|id| !dropped[id.index()])
        .map(|id| proof.inference(id).clone())
        .collect();
    proof.replace_inferences(kept);
    proof
}

fn remove_dominated<C, A>(proof: &IndexedProof<C, A>, dropped: &mut [bool]) {
    for node in 0..proof.node_count() {
        let node = NodeId(node as u32);
        let ids = proof.inferences_of(node);
        if ids.is_empty() {
            continue;
        }
        // premise lists compared as sets
        let premise_sets: Vec<Vec<NodeId>> = ids
            .iter()
            .map(|&id| {
                let mut premises = proof.inference(id).premises.clone();
                premises.sort_unstable();
                premises.dedup();
                premises
            })
            .collect();
        for i in 0..ids.len() {
            let a = ids[i];
            if premise_sets[i].binary_search(&node).is_ok() {
                trace!("{:?}: derives its own premise", a);
                dropped[a.index()] = true;
                continue;
            }
            for j in 0..ids.len() {
                let b = ids[j];
                if i == j || dropped[b.index()] {
                    continue;
                }
                if !dominates(proof, ids, &premise_sets, j, i) {
                    continue;
                }
                // of two equivalent inferences the earlier one is kept
                if dominates(proof, ids, &premise_sets, i, j) && j > i {
                    continue;
                }
                trace!("{:?}: dominated by {:?}", a, b);
                dropped[a.index()] = true;
                break;
            }
        }
    }
}

/// Whether the inference at `winner` dominates the one at `loser`: both its
/// premise set and its axiom set are subsets of the loser's.
fn dominates<C, A>(
    proof: &IndexedProof<C, A>,
    ids: &[InfId],
    premise_sets: &[Vec<NodeId>],
    winner: usize,
    loser: usize,
) -> bool {
    is_sorted_subset(&premise_sets[winner], &premise_sets[loser])
        && is_sorted_subset(
            &proof.inference(ids[winner]).axioms,
            &proof.inference(ids[loser]).axioms,
        )
}

/// Subset test over sorted, duplicate-free slices.
fn is_sorted_subset<T: Ord>(small: &[T], large: &[T]) -> bool {
    if small.len() > large.len() {
        return false;
    }
    let mut cursor = large.iter();
    'outer: for element in small {
        for candidate in cursor.by_ref() {
            match candidate.cmp(element) {
                std::cmp::Ordering::Less => continue,
                std::cmp::Ordering::Equal => continue 'outer,
                std::cmp::Ordering::Greater => return false,
            }
        }
        return false;
    }
    true
}

fn compress_tautologies<C, A>(proof: &IndexedProof<C, A>, dropped: &mut [bool]) {
    // conclusions derivable with the empty justification
    let mut tautology = vec![false; proof.node_count()];
    // surviving empty-justification inferences indexed by premise
    let mut by_premise: HashMap<NodeId, Vec<InfId>> = HashMap::new();
    let mut to_do: VecDeque<NodeId> = VecDeque::new();

    for id in proof.inference_ids() {
        if dropped[id.index()] {
            continue;
        }
        let inference = proof.inference(id);
        if !inference.axioms.is_empty() {
            continue;
        }
        if inference.premises.is_empty() {
            mark_tautology(inference.conclusion, &mut tautology, &mut to_do);
        } else {
            for &premise in &inference.premises {
                by_premise.entry(premise).or_default().push(id);
            }
        }
    }

    while let Some(node) = to_do.pop_front() {
        let Some(candidates) = by_premise.get(&node).cloned() else {
            continue;
        };
        for id in candidates {
            let inference = proof.inference(id);
            if inference
                .premises
                .iter()
                .all(|premise| tautology[premise.index()])
            {
                mark_tautology(inference.conclusion, &mut tautology, &mut to_do);
            }
        }
    }

    // a tautology keeps a single tautological inference
    for node in 0..proof.node_count() {
        if !tautology[node] {
            continue;
        }
        let node = NodeId(node as u32);
        let mut kept_one = false;
        for &id in proof.inferences_of(node) {
            if dropped[id.index()] {
                continue;
            }
            let inference = proof.inference(id);
            let tautological = inference.axioms.is_empty()
                && inference
                    .premises
                    .iter()
                    .all(|premise| tautology[premise.index()]);
            if tautological && !kept_one {
                kept_one = true;
            } else {
                trace!("{:?}: removed in favor of a tautological inference", id);
                dropped[id.index()] = true;
            }
        }
    }
}

fn mark_tautology(node: NodeId, tautology: &mut [bool], to_do: &mut VecDeque<NodeId>) {
    if !tautology[node.index()] {
        trace!("{:?}: new tautology", node);
        tautology[node.index()] = true;
        to_do.push_back(node);
    }
}
