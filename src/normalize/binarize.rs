//! Inference binarization.
//!
//! Inferences with more than two premises are rewritten into a left-leaning
//! chain of binary inferences over synthetic conclusions, each synthetic
//! conclusion standing for a prefix of the premise list that is already
//! satisfied. Only the final link, the one deriving the original conclusion,
//! carries the original justification axioms; the chain links carry none, so
//! synthetic conclusions can never surface in a justification. Equal
//! prefixes share their synthetic conclusion.

use std::collections::HashMap;

use log::trace;

use crate::proof::{IndexedInference, IndexedProof, NodeId};

pub fn binarize<C, A>(mut proof: IndexedProof<C, A>) -> IndexedProof<C, A> {
    let mut output: Vec<IndexedInference> = Vec::new();
    let mut synthetic_of: HashMap<Vec<NodeId>, NodeId> = HashMap::new();

    for id in proof.inference_ids() {
        let inference = proof.inference(id).clone();
        if inference.premises.len() <= 2 {
            output.push(inference);
            continue;
        }
        trace!(
            "{:?}: chaining {} premises",
            id,
            inference.premises.len()
        );
        let premises = &inference.premises;
        let mut prefix = premises[..2].to_vec();
        let mut left = chain_link(
            &mut proof,
            &mut output,
            &mut synthetic_of,
            prefix.clone(),
            [premises[0], premises[1]],
        );
        for &premise in &premises[2..premises.len() - 1] {
            prefix.push(premise);
            left = chain_link(
                &mut proof,
                &mut output,
                &mut synthetic_of,
                prefix.clone(),
                [left, premise],
            );
        }
        output.push(IndexedInference {
            conclusion: inference.conclusion,
            premises: vec![left, premises[premises.len() - 1]],
            axioms: inference.axioms,
        });
    }

    proof.replace_inferences(output);
    proof
}

/// Returns the synthetic conclusion for a premise prefix, creating it and
/// its single deriving inference on first use.
fn chain_link<C, A>(
    proof: &mut IndexedProof<C, A>,
    output: &mut Vec<IndexedInference>,
    synthetic_of: &mut HashMap<Vec<NodeId>, NodeId>,
    prefix: Vec<NodeId>,
    premises: [NodeId; 2],
) -> NodeId {
    if let Some(&node) = synthetic_of.get(&prefix) {
        return node;
    }
    let node = proof.push_synthetic();
    synthetic_of.insert(prefix, node);
    output.push(IndexedInference {
        conclusion: node,
        premises: premises.to_vec(),
        axioms: Vec::new(),
    });
    node
}
