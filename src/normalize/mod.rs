//! Proof normalization: cycle elimination, tautology elimination, and
//! inference binarization over the indexed proof.
//!
//! Normalization is justification-preserving: the minimal justifications of
//! the canonical proof equal those of the original proof for every
//! conclusion reachable from the goal. It is also idempotent; normalizing a
//! canonical proof yields an equivalent canonical form.

mod binarize;
mod cycles;
mod tautologies;

use std::hash::Hash;

pub use binarize::binarize;
pub use cycles::eliminate_cycles;
pub use tautologies::eliminate_tautologies;

use crate::proof::{IndexedProof, InferenceJustifier, Proof};

/// Indexes the goal-reachable subproof and brings it into canonical form.
pub fn normalize<C, A, P, J>(proof: &P, justifier: &J, goal: &C) -> IndexedProof<C, A>
where
    C: Clone + Eq + Hash,
    A: Clone + Eq + Hash,
    P: Proof<C>,
    J: InferenceJustifier<P::Inference, Axiom = A>,
{
    normalize_indexed(IndexedProof::build(proof, justifier, goal))
}

/// The indexed-to-indexed form of [`normalize`].
pub fn normalize_indexed<C, A>(proof: IndexedProof<C, A>) -> IndexedProof<C, A> {
    binarize(eliminate_tautologies(eliminate_cycles(proof)))
}
