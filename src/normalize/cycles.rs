//! Elimination of circular support.
//!
//! An inference is admitted once every one of its premises is derivable by
//! already-admitted inferences that do not use the inference's own conclusion
//! as a premise. Inferences whose conclusion appears among their own premises
//! are permanently dropped. A derivation that has to re-derive its own
//! premise can never ground out in a finite selection of axioms, so dropping
//! it changes no minimal justification.

use std::collections::{HashMap, VecDeque};

use log::trace;

use crate::proof::{IndexedProof, InfId, NodeId};

pub fn eliminate_cycles<C, A>(mut proof: IndexedProof<C, A>) -> IndexedProof<C, A> {
    let mut admitted_of: Vec<Vec<InfId>> = vec![Vec::new(); proof.node_count()];
    let mut admitted = vec![false; proof.inference_count()];
    // inferences waiting for their blocking premise to gain an inference
    let mut blocked_on: HashMap<NodeId, Vec<InfId>> = HashMap::new();
    let mut pending: VecDeque<InfId> = proof.inference_ids().collect();

    while let Some(id) = pending.pop_front() {
        let inference = proof.inference(id);
        let conclusion = inference.conclusion;
        if inference.premises.contains(&conclusion) {
            trace!("{:?}: permanently blocked", id);
            continue;
        }
        let blocking = inference
            .premises
            .iter()
            .copied()
            .find(|&premise| !derivable_without(&proof, &admitted_of, premise, conclusion));
        match blocking {
            Some(premise) => {
                trace!("{:?}: blocked by {:?}", id, premise);
                blocked_on.entry(premise).or_default().push(id);
            }
            None => {
                trace!("{:?}: admitted", id);
                admitted_of[conclusion.index()].push(id);
                admitted[id.index()] = true;
                if let Some(unblocked) = blocked_on.remove(&conclusion) {
                    pending.extend(unblocked);
                }
            }
        }
    }

    // arena order is kept so that re-normalization is stable
    let kept = proof
        .inference_ids()
        .filter(|id| admitted[id.index()])
        .map(|id| proof.inference(id).clone())
        .collect();
    proof.replace_inferences(kept);
    proof
}

/// Whether some admitted inference derives `node` without using `excluded`
/// as a premise.
fn derivable_without<C, A>(
    proof: &IndexedProof<C, A>,
    admitted_of: &[Vec<InfId>],
    node: NodeId,
    excluded: NodeId,
) -> bool {
    admitted_of[node.index()]
        .iter()
        .any(|&id| !proof.inference(id).premises.contains(&excluded))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::proof::{IndexedProof, InMemoryProofBuilder};

    fn s(value: &str) -> String {
        value.to_string()
    }

    fn indexed(
        builder: InMemoryProofBuilder<String, String>,
        goal: &str,
    ) -> IndexedProof<String, String> {
        let proof = builder.build().unwrap();
        IndexedProof::build(&proof, &proof, &s(goal))
    }

    #[test]
    fn drops_self_referential_inference() {
        let proof = indexed(
            InMemoryProofBuilder::new().inference(s("goal"), vec![s("goal")], vec![s("a")]),
            "goal",
        );
        let cleaned = eliminate_cycles(proof);
        assert!(cleaned.inferences_of(cleaned.goal()).is_empty());
    }

    #[test]
    fn drops_two_cycle_but_keeps_grounded_support() {
        // goal <-> lemma cycle, plus a grounded derivation of goal
        let proof = indexed(
            InMemoryProofBuilder::new()
                .inference(s("goal"), vec![s("lemma")], vec![])
                .inference(s("lemma"), vec![s("goal")], vec![])
                .asserted(s("goal"), s("a")),
            "goal",
        );
        let cleaned = eliminate_cycles(proof);

        let goal = cleaned.goal();
        // the asserted leaf survives
        assert_eq!(cleaned.inferences_of(goal).len(), 1);
        assert!(cleaned.inference(cleaned.inferences_of(goal)[0]).premises.is_empty());
        // lemma :- goal survives (goal is derivable without lemma) but
        // goal :- lemma does not (lemma is only derivable through goal)
        let lemma = cleaned.node_of(&s("lemma")).unwrap();
        assert_eq!(cleaned.inferences_of(lemma).len(), 1);
    }

    #[test]
    fn admission_is_order_independent() {
        // the grounded leaf comes last, so the chain above it is admitted
        // only after unblocking
        let proof = indexed(
            InMemoryProofBuilder::new()
                .inference(s("goal"), vec![s("mid")], vec![])
                .inference(s("mid"), vec![s("leaf")], vec![])
                .asserted(s("leaf"), s("a")),
            "goal",
        );
        let cleaned = eliminate_cycles(proof);
        assert_eq!(cleaned.inference_count(), 3);
    }
}
