//! Degree sequences with a known rewiring workload.

use abcd_core::{AdjacencyMultiset, ConfigurationModel, GraphModel};
use rand::{SeedableRng, rngs::SmallRng};

use crate::params::RewireBenchParams;

/// Degrees of a star-heavy graph: one hub of degree `hub_degree` and every
/// other vertex of degree one or two, with an even total.
///
/// # Examples
/// ```
/// use abcd_benches::{params::RewireBenchParams, sequences::hub_degrees};
///
/// let degrees = hub_degrees(RewireBenchParams { vcount: 10, hub_degree: 5 });
/// assert_eq!(degrees.len(), 10);
/// assert_eq!(degrees[0], 5);
/// assert_eq!(degrees.iter().sum::<usize>() % 2, 0);
/// ```
#[must_use]
pub fn hub_degrees(params: RewireBenchParams) -> Vec<usize> {
    let mut degrees = vec![1; params.vcount];
    if let Some(hub) = degrees.first_mut() {
        *hub = params.hub_degree.min(params.vcount.saturating_sub(1));
    }
    if degrees.iter().sum::<usize>() % 2 == 1 {
        if let Some(last) = degrees.last_mut() {
            *last += 1;
        }
    }
    degrees
}

/// Samples the configuration-model multigraph for `params` with `seed`.
#[must_use]
pub fn hub_multigraph(params: RewireBenchParams, seed: u64) -> AdjacencyMultiset {
    let mut rng = SmallRng::seed_from_u64(seed);
    let degrees = hub_degrees(params);
    AdjacencyMultiset::from_edges(ConfigurationModel.sample_edges(0, &degrees, &mut rng))
}
