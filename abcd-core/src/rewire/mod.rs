//! Edge-swap rewiring that removes self-loops and repeated edges while
//! preserving every vertex degree.
//!
//! A pass visits each bad edge once and swaps it with a random other edge.
//! Community scope stops at the first pass that fails to shrink the bad-edge
//! list and hands the leftovers back to the caller; whole-graph scope keeps
//! going until the graph is simple or the pass budget runs out.

use std::collections::HashSet;

use rand::Rng;

use crate::{AdjacencyMultiset, Edge};

/// Result of a rewiring run.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RewireOutcome {
    /// The multiset is simple.
    Simple {
        /// Passes performed.
        passes: usize,
    },
    /// A pass did not reduce the number of bad edges.
    Stalled {
        /// Passes performed, including the stalled one.
        passes: usize,
        /// Bad edges left after the stalled pass.
        bad_edges: Vec<Edge>,
    },
    /// The pass budget ran out, or no swap partner exists.
    Exhausted {
        /// Passes performed.
        passes: usize,
        /// Number of distinct bad edges left.
        bad_edges: usize,
    },
}

impl RewireOutcome {
    /// Number of passes performed.
    #[must_use]
    pub fn passes(&self) -> usize {
        match self {
            Self::Simple { passes }
            | Self::Stalled { passes, .. }
            | Self::Exhausted { passes, .. } => *passes,
        }
    }

    /// Returns `true` when the multiset ended simple.
    #[must_use]
    pub fn is_simple(&self) -> bool {
        matches!(self, Self::Simple { .. })
    }
}

/// Rewires until the bad-edge count stops shrinking.
///
/// # Examples
/// ```
/// use abcd_core::{AdjacencyMultiset, Edge, RewireOutcome, rewire_community};
/// use rand::{SeedableRng, rngs::SmallRng};
///
/// let mut multiset = AdjacencyMultiset::from_edges([
///     Edge::new(0, 1),
///     Edge::new(0, 1),
///     Edge::new(2, 3),
///     Edge::new(4, 5),
/// ]);
/// let mut rng = SmallRng::seed_from_u64(1);
/// assert_eq!(
///     rewire_community(&mut multiset, &mut rng),
///     RewireOutcome::Simple { passes: 1 }
/// );
/// assert!(multiset.is_simple());
/// ```
pub fn rewire_community<R: Rng + ?Sized>(
    multiset: &mut AdjacencyMultiset,
    rng: &mut R,
) -> RewireOutcome {
    let mut bad = multiset.bad_edges();
    let mut passes = 0;
    while !bad.is_empty() {
        rewire_pass(multiset, &bad, rng);
        passes += 1;
        let next = multiset.bad_edges();
        if next.len() >= bad.len() {
            return RewireOutcome::Stalled {
                passes,
                bad_edges: next,
            };
        }
        bad = next;
    }
    RewireOutcome::Simple { passes }
}

/// Rewires until the multiset is simple, for at most `max_passes` passes.
///
/// Stops early when fewer than two distinct edges remain, since no swap is
/// possible then.
pub fn rewire_until_simple<R: Rng + ?Sized>(
    multiset: &mut AdjacencyMultiset,
    rng: &mut R,
    max_passes: usize,
) -> RewireOutcome {
    let mut bad = multiset.bad_edges();
    let mut passes = 0;
    while !bad.is_empty() {
        if passes >= max_passes || multiset.distinct_len() < 2 {
            return RewireOutcome::Exhausted {
                passes,
                bad_edges: bad.len(),
            };
        }
        rewire_pass(multiset, &bad, rng);
        passes += 1;
        bad = multiset.bad_edges();
    }
    RewireOutcome::Simple { passes }
}

/// Swaps every bad edge once with a random partner.
///
/// A partner drawn earlier in the pass is skipped if it shows up later in
/// `bad`. Returns the number of swaps performed.
fn rewire_pass<R: Rng + ?Sized>(
    multiset: &mut AdjacencyMultiset,
    bad: &[Edge],
    rng: &mut R,
) -> usize {
    let mut consumed: HashSet<Edge> = HashSet::with_capacity(bad.len());
    let mut swaps = 0;
    for &edge in bad {
        if consumed.contains(&edge) {
            continue;
        }
        let Some(other) = multiset.random_other_edge(edge, rng) else {
            continue;
        };
        if multiset.swap_endpoints(edge, other) {
            swaps += 1;
        }
        consumed.insert(other);
    }
    swaps
}

#[cfg(test)]
mod tests;
