//! Textual rendering of the subproof under a goal, for logs and debugging.

use std::{collections::HashSet, fmt::Debug, hash::Hash};

use itertools::Itertools;

use super::{IndexedProof, InferenceJustifier, NodeId, Proof};

/// Renders the subproof reachable from the goal as an indented tree. Each
/// conclusion is followed by its inferences (`-| [axioms]`) and their
/// premises. A conclusion that was already expanded is marked with `*` and
/// not expanded again, which also keeps cyclic proofs printable.
pub fn print_proof<C, A, P, J>(proof: &P, justifier: &J, goal: &C) -> String
where
    C: Clone + Eq + Hash + Debug,
    A: Clone + Eq + Hash + Debug,
    P: Proof<C>,
    J: InferenceJustifier<P::Inference, Axiom = A>,
{
    render(&IndexedProof::build(proof, justifier, goal))
}

pub fn render<C: Debug, A: Debug>(proof: &IndexedProof<C, A>) -> String {
    let mut out = String::new();
    let mut expanded = HashSet::new();
    render_conclusion(proof, proof.goal(), 0, &mut expanded, &mut out);
    out
}

fn render_conclusion<C: Debug, A: Debug>(
    proof: &IndexedProof<C, A>,
    node: NodeId,
    depth: usize,
    expanded: &mut HashSet<NodeId>,
    out: &mut String,
) {
    let indent = "  ".repeat(depth);
    let label = match proof.conclusion(node) {
        Some(conclusion) => format!("{:?}", conclusion),
        None => format!("#{}", node.index()),
    };
    if !expanded.insert(node) {
        out.push_str(&format!("{}{} *\n", indent, label));
        return;
    }
    out.push_str(&format!("{}{}\n", indent, label));
    for &inf_id in proof.inferences_of(node) {
        let inference = proof.inference(inf_id);
        let axioms = inference
            .axioms
            .iter()
            .map(|&id| format!("{:?}", proof.axiom(id)))
            .join(", ");
        out.push_str(&format!("{}  -| [{}]\n", indent, axioms));
        for &premise in &inference.premises {
            render_conclusion(proof, premise, depth + 2, expanded, out);
        }
    }
}
