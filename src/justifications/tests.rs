//! End-to-end tests of the justification enumeration.

use std::collections::{BTreeSet, HashSet};

use pretty_assertions::assert_eq;

use super::{bottom_up::BottomUpSearch, JustificationEngine, Outcome};
use crate::{
    monitor::{AtomicMonitor, DummyMonitor},
    normalize::{normalize, normalize_indexed},
    proof::{IndexedProof, InMemoryProof, InMemoryProofBuilder},
    stats::SearchStats,
};

fn s(value: &str) -> String {
    value.to_string()
}

fn set(elements: &[&str]) -> BTreeSet<String> {
    elements.iter().map(|element| element.to_string()).collect()
}

fn as_sets(results: Vec<HashSet<String>>) -> BTreeSet<BTreeSet<String>> {
    results
        .into_iter()
        .map(|result| result.into_iter().collect())
        .collect()
}

fn minimal_justifications(
    proof: &InMemoryProof<String, String>,
    goal: &str,
) -> BTreeSet<BTreeSet<String>> {
    let monitor = DummyMonitor;
    let mut engine = JustificationEngine::new(proof, proof, &monitor);
    as_sets(engine.justifications(&s(goal)))
}

/// goal needs p and q; p is justified by {a} or {b}, q by {b} or {c}.
fn diamond() -> InMemoryProof<String, String> {
    InMemoryProofBuilder::new()
        .inference(s("goal"), vec![s("p"), s("q")], vec![])
        .inference(s("p"), vec![], vec![s("a")])
        .inference(s("p"), vec![], vec![s("b")])
        .inference(s("q"), vec![], vec![s("b")])
        .inference(s("q"), vec![], vec![s("c")])
        .build()
        .unwrap()
}

/// Three independent ways to derive the goal, one axiom each.
fn three_alternatives() -> InMemoryProof<String, String> {
    InMemoryProofBuilder::new()
        .inference(s("goal"), vec![], vec![s("a")])
        .inference(s("goal"), vec![], vec![s("b")])
        .inference(s("goal"), vec![], vec![s("c")])
        .build()
        .unwrap()
}

#[test]
fn premise_justifications_union_with_own_axioms() {
    let proof = InMemoryProofBuilder::new()
        .inference(s("goal"), vec![s("p1"), s("p2")], vec![s("c")])
        .asserted(s("p1"), s("a"))
        .asserted(s("p2"), s("b"))
        .build()
        .unwrap();

    assert_eq!(
        minimal_justifications(&proof, "goal"),
        BTreeSet::from([set(&["a", "b", "c"])])
    );
}

#[test]
fn superset_alternative_is_pruned() {
    let proof = InMemoryProofBuilder::new()
        .inference(s("goal"), vec![], vec![s("a")])
        .inference(s("goal"), vec![], vec![s("a"), s("b")])
        .build()
        .unwrap();

    assert_eq!(
        minimal_justifications(&proof, "goal"),
        BTreeSet::from([set(&["a"])])
    );
}

#[test]
fn self_referential_inference_derives_nothing() {
    let proof = InMemoryProofBuilder::new()
        .inference(s("goal"), vec![s("goal")], vec![s("a")])
        .build()
        .unwrap();

    assert_eq!(minimal_justifications(&proof, "goal"), BTreeSet::new());
}

#[test]
fn binarization_does_not_change_results() {
    let proof = InMemoryProofBuilder::new()
        .inference(s("goal"), vec![s("p"), s("q"), s("r")], vec![])
        .asserted(s("p"), s("x"))
        .asserted(s("q"), s("y"))
        .asserted(s("r"), s("z"))
        .build()
        .unwrap();

    assert_eq!(
        minimal_justifications(&proof, "goal"),
        BTreeSet::from([set(&["x", "y", "z"])])
    );
}

#[test]
fn alternatives_minimize_across_premises() {
    // picking {b} for both premises beats every mixed choice involving b
    assert_eq!(
        minimal_justifications(&diamond(), "goal"),
        BTreeSet::from([set(&["b"]), set(&["a", "c"])])
    );
}

#[test]
fn results_are_pairwise_incomparable() {
    let proof = InMemoryProofBuilder::new()
        .inference(s("goal"), vec![s("p"), s("q")], vec![])
        .inference(s("p"), vec![], vec![s("a")])
        .inference(s("p"), vec![], vec![s("b")])
        .inference(s("q"), vec![], vec![s("c")])
        .inference(s("q"), vec![], vec![s("d")])
        .build()
        .unwrap();

    let results: Vec<BTreeSet<String>> = minimal_justifications(&proof, "goal")
        .into_iter()
        .collect();
    assert_eq!(results.len(), 4);
    for (i, left) in results.iter().enumerate() {
        for (j, right) in results.iter().enumerate() {
            if i != j {
                assert!(
                    !left.is_subset(right),
                    "{:?} is a subset of {:?}",
                    left,
                    right
                );
            }
        }
    }
}

#[test]
fn re_enumeration_yields_the_same_results() {
    let proof = diamond();
    let monitor = DummyMonitor;
    let mut engine = JustificationEngine::new(&proof, &proof, &monitor);

    let first = engine.justifications(&s("goal"));
    let second = engine.justifications(&s("goal"));
    // exactly once per distinct minimal set, in both sessions
    assert_eq!(first.len(), 2);
    assert_eq!(as_sets(first), as_sets(second));
}

#[test]
fn cyclic_support_cannot_ground_a_justification() {
    let _ = env_logger::builder().is_test(true).try_init();
    let proof = InMemoryProofBuilder::new()
        .inference(s("goal"), vec![s("lemma")], vec![s("g")])
        .inference(s("lemma"), vec![s("goal")], vec![s("l")])
        .asserted(s("lemma"), s("m"))
        .build()
        .unwrap();

    assert_eq!(
        minimal_justifications(&proof, "goal"),
        BTreeSet::from([set(&["g", "m"])])
    );
}

#[test]
fn grounded_cycle_member_still_supports_other_conclusions() {
    let proof = InMemoryProofBuilder::new()
        .inference(s("root"), vec![s("goal"), s("lemma")], vec![])
        .inference(s("goal"), vec![s("lemma")], vec![])
        .inference(s("lemma"), vec![s("goal")], vec![s("l")])
        .asserted(s("goal"), s("a"))
        .build()
        .unwrap();

    assert_eq!(
        minimal_justifications(&proof, "root"),
        BTreeSet::from([set(&["a", "l"])])
    );
}

#[test]
fn renormalization_preserves_search_results() {
    let _ = env_logger::builder().is_test(true).try_init();
    let proof = InMemoryProofBuilder::new()
        .inference(s("goal"), vec![s("p"), s("q"), s("r")], vec![s("c")])
        .inference(s("goal"), vec![s("p"), s("q"), s("r")], vec![s("c"), s("d")])
        .inference(s("p"), vec![s("goal")], vec![])
        .asserted(s("p"), s("x"))
        .asserted(s("q"), s("y"))
        .asserted(s("r"), s("z"))
        .build()
        .unwrap();

    let once = normalize(&proof, &proof, &s("goal"));
    let twice = normalize_indexed(once.clone());
    assert_eq!(once.node_count(), twice.node_count());
    assert_eq!(once.inference_count(), twice.inference_count());

    let monitor = DummyMonitor;
    let run = |canonical: &IndexedProof<String, String>| {
        let mut results: Vec<BTreeSet<String>> = Vec::new();
        let (outcome, _) = BottomUpSearch::new(canonical, &monitor, usize::MAX)
            .run(&mut |just| results.push(just.into_iter().collect()));
        assert_eq!(outcome, Outcome::Complete);
        results.into_iter().collect::<BTreeSet<_>>()
    };
    let results = run(&once);
    assert_eq!(results, BTreeSet::from([set(&["c", "x", "y", "z"])]));
    assert_eq!(results, run(&twice));
}

#[test]
fn size_limit_is_a_filter() {
    let proof = diamond();
    let monitor = DummyMonitor;
    let mut engine = JustificationEngine::new(&proof, &proof, &monitor);

    let full = as_sets(engine.justifications(&s("goal")));
    let bounded = as_sets(engine.justifications_within(&s("goal"), 1));

    let expected: BTreeSet<BTreeSet<String>> =
        full.iter().filter(|just| just.len() <= 1).cloned().collect();
    assert_eq!(bounded, expected);
    assert_eq!(bounded, BTreeSet::from([set(&["b"])]));
}

#[test]
fn unconditional_conclusion_has_the_empty_justification() {
    let proof = InMemoryProofBuilder::new()
        .inference(s("goal"), vec![], Vec::<String>::new())
        .inference(s("goal"), vec![], vec![s("a")])
        .build()
        .unwrap();

    assert_eq!(
        minimal_justifications(&proof, "goal"),
        BTreeSet::from([set(&[])])
    );
}

#[test]
fn goal_without_derivations_has_no_justifications() {
    let proof = InMemoryProofBuilder::new()
        .asserted(s("fact"), s("a"))
        .build()
        .unwrap();

    assert_eq!(minimal_justifications(&proof, "goal"), BTreeSet::new());
}

#[test]
fn asserted_conclusion_justifies_itself() {
    let proof = InMemoryProofBuilder::new()
        .asserted(s("fact"), s("fact"))
        .build()
        .unwrap();

    assert_eq!(
        minimal_justifications(&proof, "fact"),
        BTreeSet::from([set(&["fact"])])
    );
}

#[test]
fn repeated_premise_is_satisfied_once() {
    let proof = InMemoryProofBuilder::new()
        .inference(s("goal"), vec![s("p"), s("p")], vec![])
        .asserted(s("p"), s("a"))
        .build()
        .unwrap();

    assert_eq!(
        minimal_justifications(&proof, "goal"),
        BTreeSet::from([set(&["a"])])
    );
}

#[test]
fn results_arrive_in_non_decreasing_size() {
    let proof = diamond();
    let monitor = DummyMonitor;
    let mut engine = JustificationEngine::new(&proof, &proof, &monitor);

    let mut sizes = Vec::new();
    let outcome = engine.enumerate_justifications(&s("goal"), |just| sizes.push(just.len()));
    assert_eq!(outcome, Outcome::Complete);
    assert_eq!(sizes, vec![1, 2]);
}

#[test]
fn interrupt_stops_the_session_before_any_result() {
    let proof = three_alternatives();
    let monitor = AtomicMonitor::new();
    monitor.interrupt();
    let mut engine = JustificationEngine::new(&proof, &proof, &monitor);

    let mut seen = Vec::new();
    let outcome = engine.enumerate_justifications(&s("goal"), |just| seen.push(just));
    assert_eq!(outcome, Outcome::Interrupted);
    assert!(seen.is_empty());
}

#[test]
fn interrupt_mid_run_keeps_a_partial_valid_answer() {
    let proof = three_alternatives();
    let monitor = AtomicMonitor::new();
    let mut engine = JustificationEngine::new(&proof, &proof, &monitor);

    let mut seen = Vec::new();
    let outcome = engine.enumerate_justifications(&s("goal"), |just| {
        monitor.interrupt();
        seen.push(just);
    });
    assert_eq!(outcome, Outcome::Interrupted);
    assert_eq!(seen.len(), 1);
    assert!(as_sets(seen).is_subset(&minimal_justifications(&proof, "goal")));

    // the monitor is reusable after a reset
    monitor.reset();
    assert_eq!(engine.justifications(&s("goal")).len(), 3);
}

#[test]
fn statistics_accumulate_until_reset() {
    let proof = diamond();
    let monitor = DummyMonitor;
    let mut engine = JustificationEngine::new(&proof, &proof, &monitor);
    assert_eq!(engine.statistics(), &SearchStats::default());

    engine.justifications(&s("goal"));
    let first = *engine.statistics();
    assert!(first.processed_conclusions > 0);
    assert!(first.minimal_justifications >= 2);

    engine.justifications(&s("goal"));
    assert!(engine.statistics().processed_conclusions > first.processed_conclusions);

    engine.reset_statistics();
    assert_eq!(engine.statistics(), &SearchStats::default());
}
