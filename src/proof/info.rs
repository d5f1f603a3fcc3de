//! Summary information about the subproof under a goal.

use std::{collections::HashSet, hash::Hash};

use super::{IndexedProof, InferenceJustifier, NodeId, Proof};

/// Counts over the goal-reachable subproof, plus whether any derivation path
/// leads back into a conclusion it is deriving.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ProofInfo {
    pub conclusions: usize,
    pub inferences: usize,
    pub axioms: usize,
    pub cyclic: bool,
}

impl ProofInfo {
    pub fn of<C, A>(proof: &IndexedProof<C, A>) -> Self {
        let mut conclusions = 0;
        let mut inferences = 0;
        let mut axioms = HashSet::new();
        let mut visited = vec![false; proof.node_count()];
        let mut to_do = vec![proof.goal()];
        visited[proof.goal().index()] = true;
        while let Some(node) = to_do.pop() {
            conclusions += 1;
            for &inf_id in proof.inferences_of(node) {
                inferences += 1;
                let inference = proof.inference(inf_id);
                axioms.extend(inference.axioms.iter().copied());
                for &premise in &inference.premises {
                    if !visited[premise.index()] {
                        visited[premise.index()] = true;
                        to_do.push(premise);
                    }
                }
            }
        }
        Self {
            conclusions,
            inferences,
            axioms: axioms.len(),
            cyclic: has_cycle(proof),
        }
    }
}

/// Computes [`ProofInfo`] for the part of a caller proof reachable from the
/// given goal.
pub fn info<C, A, P, J>(proof: &P, justifier: &J, goal: &C) -> ProofInfo
where
    C: Clone + Eq + Hash,
    A: Clone + Eq + Hash,
    P: Proof<C>,
    J: InferenceJustifier<P::Inference, Axiom = A>,
{
    ProofInfo::of(&IndexedProof::build(proof, justifier, goal))
}

/// Three-color depth-first search over conclusions; a premise edge into a
/// conclusion still being expanded is a cycle.
pub(crate) fn has_cycle<C, A>(proof: &IndexedProof<C, A>) -> bool {
    const WHITE: u8 = 0;
    const GRAY: u8 = 1;
    const BLACK: u8 = 2;

    let mut state = vec![WHITE; proof.node_count()];
    let mut stack: Vec<(NodeId, Vec<NodeId>, usize)> = Vec::new();

    state[proof.goal().index()] = GRAY;
    stack.push((proof.goal(), premise_edges(proof, proof.goal()), 0));

    while let Some((node, edges, cursor)) = stack.last_mut() {
        if *cursor < edges.len() {
            let next = edges[*cursor];
            *cursor += 1;
            match state[next.index()] {
                WHITE => {
                    state[next.index()] = GRAY;
                    stack.push((next, premise_edges(proof, next), 0));
                }
                GRAY => return true,
                _ => {}
            }
        } else {
            state[node.index()] = BLACK;
            stack.pop();
        }
    }
    false
}

fn premise_edges<C, A>(proof: &IndexedProof<C, A>, node: NodeId) -> Vec<NodeId> {
    proof
        .inferences_of(node)
        .iter()
        .flat_map(|&inf_id| proof.inference(inf_id).premises.iter().copied())
        .collect()
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::proof::InMemoryProofBuilder;

    fn s(value: &str) -> String {
        value.to_string()
    }

    #[test]
    fn info_counts_reachable_subproof() {
        let proof = InMemoryProofBuilder::new()
            .inference(s("goal"), vec![s("p"), s("q")], vec![s("c")])
            .asserted(s("p"), s("a"))
            .asserted(s("q"), s("b"))
            // unreachable from "goal"
            .asserted(s("elsewhere"), s("e"))
            .build()
            .unwrap();

        let info = info(&proof, &proof, &s("goal"));
        assert_eq!(
            info,
            ProofInfo {
                conclusions: 3,
                inferences: 3,
                axioms: 3,
                cyclic: false,
            }
        );
    }

    #[test]
    fn info_detects_cycles() {
        let proof = InMemoryProofBuilder::new()
            .inference(s("goal"), vec![s("lemma")], vec![s("g")])
            .inference(s("lemma"), vec![s("goal")], vec![s("l")])
            .asserted(s("lemma"), s("l0"))
            .build()
            .unwrap();

        assert!(info(&proof, &proof, &s("goal")).cyclic);
        assert!(info(&proof, &proof, &s("lemma")).cyclic);
    }
}
