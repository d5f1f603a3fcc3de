//! Attaching asserted conclusions to an existing proof.
//!
//! An asserted conclusion is a base fact that holds without derivation. The
//! wrapper gives each one a premise-free inference justified by a single
//! axiom obtained from the conclusion, so its sole minimal justification is
//! that singleton. The base proof and justifier are left untouched.

use std::{collections::HashSet, hash::Hash};

use super::{Inference, InferenceJustifier, Proof};

/// An inference of an [`AssertedConclusions`] proof: either one of the base
/// proof's inferences, or the self-justifying leaf of an asserted conclusion.
#[derive(Clone, Debug)]
pub enum AssertedInference<C, I> {
    Base(I),
    Asserted(C),
}

impl<C, I: Inference<C>> Inference<C> for AssertedInference<C, I> {
    fn conclusion(&self) -> &C {
        match self {
            Self::Base(inference) => inference.conclusion(),
            Self::Asserted(conclusion) => conclusion,
        }
    }

    fn premises(&self) -> &[C] {
        match self {
            Self::Base(inference) => inference.premises(),
            Self::Asserted(_) => &[],
        }
    }
}

/// A view of a base proof in which every conclusion of `asserted` gains one
/// additional premise-free inference. Doubles as the matching justifier,
/// delegating base inferences to the wrapped justifier and resolving an
/// asserted leaf to the axiom produced by `to_axiom`.
pub struct AssertedConclusions<'a, P, J, C, F> {
    proof: &'a P,
    justifier: &'a J,
    asserted: HashSet<C>,
    to_axiom: F,
}

impl<'a, P, J, C, F> AssertedConclusions<'a, P, J, C, F>
where
    C: Eq + Hash,
{
    pub fn new(proof: &'a P, justifier: &'a J, asserted: HashSet<C>, to_axiom: F) -> Self {
        Self {
            proof,
            justifier,
            asserted,
            to_axiom,
        }
    }
}

impl<P, J, C, F> Proof<C> for AssertedConclusions<'_, P, J, C, F>
where
    C: Clone + Eq + Hash,
    P: Proof<C>,
{
    type Inference = AssertedInference<C, P::Inference>;

    fn inferences(&self, conclusion: &C) -> Vec<Self::Inference> {
        let mut inferences: Vec<Self::Inference> = self
            .proof
            .inferences(conclusion)
            .into_iter()
            .map(AssertedInference::Base)
            .collect();
        if self.asserted.contains(conclusion) {
            inferences.push(AssertedInference::Asserted(conclusion.clone()));
        }
        inferences
    }
}

impl<P, J, C, A, F> InferenceJustifier<AssertedInference<C, P::Inference>>
    for AssertedConclusions<'_, P, J, C, F>
where
    C: Clone + Eq + Hash,
    P: Proof<C>,
    J: InferenceJustifier<P::Inference, Axiom = A>,
    F: Fn(&C) -> A,
{
    type Axiom = A;

    fn justification(&self, inference: &AssertedInference<C, P::Inference>) -> Vec<A> {
        match inference {
            AssertedInference::Base(inference) => self.justifier.justification(inference),
            AssertedInference::Asserted(conclusion) => vec![(self.to_axiom)(conclusion)],
        }
    }
}
