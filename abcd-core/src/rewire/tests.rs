//! Unit and property tests for the rewiring engine.

use proptest::prelude::*;
use rand::{Rng, SeedableRng, rngs::SmallRng};
use rstest::rstest;

use super::*;
use crate::{ConfigurationModel, GraphModel, test_utils::suite_proptest_config};

fn path_with_duplicate() -> AdjacencyMultiset {
    AdjacencyMultiset::from_edges([
        Edge::new(0, 1),
        Edge::new(0, 1),
        Edge::new(2, 3),
        Edge::new(4, 5),
        Edge::new(6, 7),
    ])
}

#[rstest]
#[case(1)]
#[case(2)]
#[case(99)]
fn a_single_duplicate_is_fixed_in_one_pass(#[case] seed: u64) {
    let mut multiset = path_with_duplicate();
    let mut rng = SmallRng::seed_from_u64(seed);
    let outcome = rewire_community(&mut multiset, &mut rng);
    assert_eq!(outcome, RewireOutcome::Simple { passes: 1 });
    assert!(multiset.is_simple());
    assert_eq!(multiset.edge_count(), 5);
}

#[test]
fn simple_input_needs_no_passes() {
    let mut multiset = AdjacencyMultiset::from_edges([Edge::new(0, 1), Edge::new(1, 2)]);
    let mut rng = SmallRng::seed_from_u64(1);
    assert_eq!(
        rewire_community(&mut multiset, &mut rng),
        RewireOutcome::Simple { passes: 0 }
    );
    assert_eq!(
        rewire_until_simple(&mut multiset, &mut rng, 10),
        RewireOutcome::Simple { passes: 0 }
    );
}

#[rstest]
#[case(1)]
#[case(8)]
#[case(31)]
fn partner_drawn_earlier_is_skipped_later_in_the_pass(#[case] seed: u64) {
    // With two distinct edges the first bad edge must pair with the second.
    let mut multiset = AdjacencyMultiset::from_edges([
        Edge::new(0, 1),
        Edge::new(0, 1),
        Edge::new(2, 3),
        Edge::new(2, 3),
    ]);
    let bad = multiset.bad_edges();
    assert_eq!(bad, vec![Edge::new(0, 1), Edge::new(2, 3)]);
    let mut rng = SmallRng::seed_from_u64(seed);

    assert_eq!(rewire_pass(&mut multiset, &bad, &mut rng), 1);
    for edge in [Edge::new(0, 1), Edge::new(2, 3), Edge::new(0, 2), Edge::new(1, 3)] {
        assert_eq!(multiset.multiplicity(edge), 1, "{edge}");
    }
    assert_eq!(multiset.edge_count(), 4);
}

#[test]
fn lone_loop_stalls_in_community_scope() {
    let mut multiset = AdjacencyMultiset::from_edges([Edge::new(3, 3), Edge::new(3, 3)]);
    let mut rng = SmallRng::seed_from_u64(1);
    let outcome = rewire_community(&mut multiset, &mut rng);
    assert_eq!(
        outcome,
        RewireOutcome::Stalled {
            passes: 1,
            bad_edges: vec![Edge::new(3, 3)],
        }
    );
    assert_eq!(multiset.multiplicity(Edge::new(3, 3)), 2);
}

#[test]
fn lone_loop_exhausts_whole_graph_scope_without_passes() {
    let mut multiset = AdjacencyMultiset::from_edges([Edge::new(3, 3)]);
    let mut rng = SmallRng::seed_from_u64(1);
    let outcome = rewire_until_simple(&mut multiset, &mut rng, 100);
    assert_eq!(
        outcome,
        RewireOutcome::Exhausted {
            passes: 0,
            bad_edges: 1,
        }
    );
    assert!(!outcome.is_simple());
}

#[test]
fn pass_budget_is_respected() {
    // Degrees [4, 2, 2] on three vertices have no simple realisation.
    let mut multiset = AdjacencyMultiset::from_edges([
        Edge::new(0, 0),
        Edge::new(0, 1),
        Edge::new(0, 2),
        Edge::new(1, 2),
    ]);
    let mut rng = SmallRng::seed_from_u64(4);
    let outcome = rewire_until_simple(&mut multiset, &mut rng, 7);
    assert_eq!(outcome.passes(), 7);
    assert!(!outcome.is_simple());
    assert_eq!(multiset.degrees(3), vec![4, 2, 2]);
}

#[test]
fn hub_loops_are_resolved_against_leaf_edges() {
    // Degrees [6, 1, 1, 1, 1, 1, 1]: the only simple realisation is a star.
    let mut multiset = AdjacencyMultiset::from_edges([
        Edge::new(0, 0),
        Edge::new(0, 0),
        Edge::new(0, 1),
        Edge::new(0, 2),
        Edge::new(3, 4),
        Edge::new(5, 6),
    ]);
    let mut rng = SmallRng::seed_from_u64(12);
    let outcome = rewire_until_simple(&mut multiset, &mut rng, 10_000);
    assert!(outcome.is_simple(), "outcome = {outcome:?}");
    assert_eq!(multiset.degrees(7), vec![6, 1, 1, 1, 1, 1, 1]);
    assert!((1..7).all(|leaf| multiset.contains(Edge::new(0, leaf))));
}

proptest! {
    #![proptest_config(suite_proptest_config(48))]

    #[test]
    fn rewiring_preserves_degrees_and_ends_simple(
        vertices in 30_usize..80,
        seed in any::<u64>(),
    ) {
        let mut rng = SmallRng::seed_from_u64(seed);
        let mut degrees: Vec<usize> = (0..vertices).map(|_| rng.gen_range(1..=5)).collect();
        if degrees.iter().sum::<usize>() % 2 == 1 {
            degrees[0] += 1;
        }
        let edges = ConfigurationModel.sample_edges(0, &degrees, &mut rng);
        let mut multiset = AdjacencyMultiset::from_edges(edges);

        let mut community_copy = multiset.clone();
        let community = rewire_community(&mut community_copy, &mut rng);
        prop_assert_eq!(community_copy.degrees(vertices), degrees.clone());
        if let RewireOutcome::Stalled { bad_edges, .. } = &community {
            prop_assert!(!bad_edges.is_empty());
        } else {
            prop_assert!(community_copy.is_simple());
        }

        let outcome = rewire_until_simple(&mut multiset, &mut rng, 10_000);
        prop_assert!(outcome.is_simple(), "outcome = {:?}", outcome);
        prop_assert!(multiset.is_simple());
        prop_assert_eq!(multiset.degrees(vertices), degrees);
    }
}
