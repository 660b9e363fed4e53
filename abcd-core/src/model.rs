//! Pluggable random multigraph models.

use rand::{RngCore, seq::SliceRandom};

use crate::Edge;

/// Samples a random multigraph realising a degree sequence.
///
/// `degrees[i]` is the target degree of vertex `first_vertex + i`. The
/// returned edges may contain self-loops and repeats; the caller removes them
/// by rewiring. Callers supply an even degree sum.
///
/// Implementations must be `Sync` so communities can be sampled in parallel.
///
/// # Examples
/// ```
/// use abcd_core::{ConfigurationModel, Edge, GraphModel};
/// use rand::{SeedableRng, rngs::SmallRng};
///
/// let mut rng = SmallRng::seed_from_u64(5);
/// let edges = ConfigurationModel.sample_edges(10, &[2, 1, 1], &mut rng);
/// assert_eq!(edges.len(), 2);
/// assert!(edges.iter().all(|edge| edge.low() >= 10 && edge.high() <= 12));
/// ```
pub trait GraphModel: Sync {
    /// Human-readable model identifier used in logs and statistics.
    fn name(&self) -> &str;

    /// Returns the sampled edges.
    fn sample_edges(
        &self,
        first_vertex: usize,
        degrees: &[usize],
        rng: &mut dyn RngCore,
    ) -> Vec<Edge>;
}

/// Configuration model: every vertex contributes one stub per unit of degree,
/// the stubs are shuffled and consecutive stubs are joined.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ConfigurationModel;

impl GraphModel for ConfigurationModel {
    fn name(&self) -> &str {
        "configuration_model"
    }

    fn sample_edges(
        &self,
        first_vertex: usize,
        degrees: &[usize],
        rng: &mut dyn RngCore,
    ) -> Vec<Edge> {
        let mut stubs: Vec<usize> = degrees
            .iter()
            .enumerate()
            .flat_map(|(offset, &degree)| std::iter::repeat_n(first_vertex + offset, degree))
            .collect();
        stubs.shuffle(rng);
        // An odd trailing stub has no partner and is dropped.
        stubs
            .chunks_exact(2)
            .map(|pair| Edge::new(pair[0], pair[1]))
            .collect()
    }
}
