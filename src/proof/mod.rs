//! The proof model: the traits through which a caller exposes its derivation
//! structure to the engine, plus an owned in-memory proof used by callers and
//! tests.
//!
//! A [`Proof`] maps a conclusion to the inferences that derive it; an
//! [`InferenceJustifier`] maps an inference to the axioms it directly
//! requires. Both are passive, read-only views borrowed for the duration of
//! an enumeration session.

pub mod asserted;
mod indexed;
pub mod info;
pub mod printer;

use std::{collections::HashMap, fmt, hash::Hash};

pub use asserted::{AssertedConclusions, AssertedInference};
pub use indexed::*;
use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// One derivation step: a conclusion, an ordered (possibly empty) list of
/// premises, and the axioms directly required by this step.
pub trait Inference<C> {
    fn conclusion(&self) -> &C;
    fn premises(&self) -> &[C];
}

/// A multi-valued mapping from conclusions to the inferences deriving them.
/// The mapping may be cyclic; the normalizer takes care of that.
pub trait Proof<C> {
    type Inference: Inference<C>;

    /// All inferences with the given conclusion. Unknown conclusions yield an
    /// empty collection.
    fn inferences(&self, conclusion: &C) -> Vec<Self::Inference>;
}

/// Assigns to each inference the set of axioms it directly requires,
/// independently of whether its premises are derivable.
pub trait InferenceJustifier<I> {
    type Axiom;

    fn justification(&self, inference: &I) -> Vec<Self::Axiom>;
}

/// An inference of an [`InMemoryProof`], carrying its justification inline.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct InMemoryInference<C, A> {
    pub conclusion: C,
    pub premises: Vec<C>,
    pub axioms: Vec<A>,
}

impl<C, A> Inference<C> for InMemoryInference<C, A> {
    fn conclusion(&self) -> &C {
        &self.conclusion
    }

    fn premises(&self) -> &[C] {
        &self.premises
    }
}

/// An owned proof holding its inferences in insertion order, indexed by
/// conclusion. Doubles as its own justifier since the axioms are stored
/// inline on each inference.
#[derive(Clone, Debug)]
pub struct InMemoryProof<C, A> {
    inferences: Vec<InMemoryInference<C, A>>,
    by_conclusion: HashMap<C, Vec<usize>>,
}

impl<C, A> InMemoryProof<C, A>
where
    C: Clone + Eq + Hash + fmt::Debug,
{
    /// Indexes the given inferences, checking that every premise is the
    /// conclusion of at least one inference. A premise that is neither
    /// derived nor asserted cannot be resolved during the search, so it is
    /// rejected up front.
    pub fn from_inferences(inferences: Vec<InMemoryInference<C, A>>) -> Result<Self> {
        let mut by_conclusion: HashMap<C, Vec<usize>> = HashMap::new();
        for (index, inference) in inferences.iter().enumerate() {
            by_conclusion
                .entry(inference.conclusion.clone())
                .or_default()
                .push(index);
        }
        for inference in &inferences {
            for premise in &inference.premises {
                if !by_conclusion.contains_key(premise) {
                    return Err(Error::unresolved_premise(format!("{:?}", premise)));
                }
            }
        }
        Ok(Self {
            inferences,
            by_conclusion,
        })
    }

    pub fn as_inferences(&self) -> &[InMemoryInference<C, A>] {
        &self.inferences
    }
}

impl<C, A> Proof<C> for InMemoryProof<C, A>
where
    C: Clone + Eq + Hash,
    A: Clone,
{
    type Inference = InMemoryInference<C, A>;

    fn inferences(&self, conclusion: &C) -> Vec<Self::Inference> {
        match self.by_conclusion.get(conclusion) {
            Some(indices) => indices
                .iter()
                .map(|&index| self.inferences[index].clone())
                .collect(),
            None => Vec::new(),
        }
    }
}

impl<C, A> InferenceJustifier<InMemoryInference<C, A>> for InMemoryProof<C, A>
where
    A: Clone,
{
    type Axiom = A;

    fn justification(&self, inference: &InMemoryInference<C, A>) -> Vec<A> {
        inference.axioms.clone()
    }
}

/// Builds an [`InMemoryProof`] inference by inference.
#[derive(Clone, Debug, Default)]
pub struct InMemoryProofBuilder<C, A> {
    inferences: Vec<InMemoryInference<C, A>>,
}

impl<C, A> InMemoryProofBuilder<C, A>
where
    C: Clone + Eq + Hash + fmt::Debug,
{
    pub fn new() -> Self {
        Self {
            inferences: Vec::new(),
        }
    }

    pub fn inference(
        mut self,
        conclusion: C,
        premises: impl Into<Vec<C>>,
        axioms: impl Into<Vec<A>>,
    ) -> Self {
        self.inferences.push(InMemoryInference {
            conclusion,
            premises: premises.into(),
            axioms: axioms.into(),
        });
        self
    }

    /// Adds a self-justifying leaf: a premise-free inference deriving the
    /// conclusion from the given axiom alone. This is how asserted base facts
    /// enter a proof, so that their sole minimal justification is the
    /// singleton containing the axiom.
    pub fn asserted(self, conclusion: C, axiom: A) -> Self {
        self.inference(conclusion, Vec::new(), vec![axiom])
    }

    pub fn build(self) -> Result<InMemoryProof<C, A>> {
        InMemoryProof::from_inferences(self.inferences)
    }
}
