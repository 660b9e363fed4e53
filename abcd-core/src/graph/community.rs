//! Communities: vertex blocks with their rewired internal graphs.

use std::{fmt, ops::Range};

use rand::RngCore;
use tracing::debug;

use super::{AdjacencyMultiset, ConstructionDiagnostics, Edge, check_model_edges};
use crate::{
    Result,
    model::GraphModel,
    rewire::{RewireOutcome, rewire_community},
};

/// Identifier of a community within an [`AbcdGraph`](crate::AbcdGraph).
///
/// Regular communities are numbered from zero in partition order; the outlier
/// pseudo-community, when present, takes the last id.
///
/// # Examples
/// ```
/// use abcd_core::CommunityId;
///
/// let id = CommunityId::new(3);
/// assert_eq!(id.get(), 3);
/// ```
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct CommunityId(usize);

impl CommunityId {
    /// Creates a community identifier.
    #[rustfmt::skip]
    #[must_use]
    pub const fn new(id: usize) -> Self { Self(id) }

    /// Returns the underlying index.
    #[rustfmt::skip]
    #[must_use]
    pub const fn get(self) -> usize { self.0 }
}

impl fmt::Display for CommunityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A block of contiguous vertices and the simple graph realised among them.
#[derive(Clone, Debug)]
pub struct Community {
    id: CommunityId,
    vertices: Range<usize>,
    is_outlier: bool,
    edges: AdjacencyMultiset,
    community_degrees: Vec<usize>,
    background_degrees: Vec<usize>,
    edges_pushed: usize,
}

impl Community {
    /// Samples and rewires the community graph.
    ///
    /// `community_degrees` and `background_degrees` are the planned degrees,
    /// indexed relative to `vertices.start`. The community degrees are then
    /// taken from the sampled edges, and any shortfall against a vertex's
    /// planned total becomes background degree. Bad edges left by a stalled
    /// rewiring are moved to the background as well.
    ///
    /// # Errors
    /// Returns [`AbcdError::InvalidParameter`](crate::AbcdError::InvalidParameter)
    /// when the model produces an edge outside `vertices`.
    pub(crate) fn build(
        id: CommunityId,
        vertices: Range<usize>,
        is_outlier: bool,
        community_degrees: &[usize],
        background_degrees: &[usize],
        model: &dyn GraphModel,
        rng: &mut dyn RngCore,
    ) -> Result<Self> {
        let sampled = model.sample_edges(vertices.start, community_degrees, rng);
        let mut edges = AdjacencyMultiset::from_edges(sampled);
        check_model_edges(model.name(), &edges, &vertices)?;

        let realised: Vec<usize> = edges.degrees(vertices.end)[vertices.clone()].to_vec();
        let background: Vec<usize> = community_degrees
            .iter()
            .zip(background_degrees)
            .zip(&realised)
            .map(|((planned, outer), actual)| (planned + outer).saturating_sub(*actual))
            .collect();
        if realised != community_degrees {
            debug!(
                community = %id,
                model = model.name(),
                "sampled community degrees differ from the plan"
            );
        }

        let outcome = rewire_community(&mut edges, rng);
        let mut community = Self {
            id,
            vertices,
            is_outlier,
            edges,
            community_degrees: realised,
            background_degrees: background,
            edges_pushed: 0,
        };
        if let RewireOutcome::Stalled { passes, bad_edges } = outcome {
            debug!(
                community = %id,
                passes,
                bad_edges = bad_edges.len(),
                "community rewiring stalled, pushing bad edges to the background"
            );
            community.push_to_background(&bad_edges);
        }
        Ok(community)
    }

    /// Removes every copy of each self-loop and every surplus copy of each
    /// repeated edge, crediting both endpoints with background degree.
    fn push_to_background(&mut self, bad_edges: &[Edge]) {
        for &edge in bad_edges {
            let copies = self.edges.multiplicity(edge);
            let surplus = if edge.is_loop() {
                copies
            } else {
                copies.saturating_sub(1)
            };
            let removed = self.edges.remove_copies(edge, surplus);
            for _ in 0..removed {
                self.transfer(edge.low());
                self.transfer(edge.high());
            }
            self.edges_pushed += removed;
        }
    }

    fn transfer(&mut self, vertex: usize) {
        let local = vertex - self.vertices.start;
        self.community_degrees[local] -= 1;
        self.background_degrees[local] += 1;
    }

    /// Community identifier.
    #[must_use]
    #[rustfmt::skip]
    pub fn id(&self) -> CommunityId { self.id }

    /// Vertex ids owned by the community.
    #[must_use]
    #[rustfmt::skip]
    pub fn vertices(&self) -> Range<usize> { self.vertices.clone() }

    /// Number of vertices.
    #[must_use]
    #[rustfmt::skip]
    pub fn len(&self) -> usize { self.vertices.len() }

    /// Returns `true` for a community without vertices.
    #[must_use]
    #[rustfmt::skip]
    pub fn is_empty(&self) -> bool { self.vertices.is_empty() }

    /// Returns `true` for the outlier pseudo-community.
    #[must_use]
    #[rustfmt::skip]
    pub fn is_outlier(&self) -> bool { self.is_outlier }

    /// Internal edges after rewiring.
    #[must_use]
    #[rustfmt::skip]
    pub fn edges(&self) -> &AdjacencyMultiset { &self.edges }

    /// Number of internal edges after rewiring.
    #[must_use]
    #[rustfmt::skip]
    pub fn edge_count(&self) -> usize { self.edges.edge_count() }

    /// Loop and repeat counts of the sampled community graph.
    #[must_use]
    #[rustfmt::skip]
    pub fn diagnostics(&self) -> ConstructionDiagnostics { self.edges.diagnostics() }

    /// Edges moved to the background when rewiring stalled.
    #[must_use]
    #[rustfmt::skip]
    pub fn edges_pushed(&self) -> usize { self.edges_pushed }

    /// Community degree of each member, in vertex order.
    #[must_use]
    #[rustfmt::skip]
    pub fn community_degrees(&self) -> &[usize] { &self.community_degrees }

    /// Background degree of each member, in vertex order.
    #[must_use]
    #[rustfmt::skip]
    pub fn background_degrees(&self) -> &[usize] { &self.background_degrees }

    /// Total degree of each member, in vertex order.
    #[must_use]
    pub fn degree_sequence(&self) -> Vec<usize> {
        self.community_degrees
            .iter()
            .zip(&self.background_degrees)
            .map(|(inner, outer)| inner + outer)
            .collect()
    }

    /// Sum of the members' total degrees.
    #[must_use]
    pub fn volume(&self) -> usize {
        self.community_degrees.iter().sum::<usize>() + self.background_degrees.iter().sum::<usize>()
    }

    /// Sum of the members' background degrees.
    #[must_use]
    pub fn background_volume(&self) -> usize {
        self.background_degrees.iter().sum()
    }

    /// Mean total degree of the members, `0.0` for an empty community.
    #[must_use]
    pub fn average_degree(&self) -> f64 {
        if self.is_empty() {
            return 0.0;
        }
        self.volume() as f64 / self.len() as f64
    }

    /// Fraction of the community volume that is background degree.
    ///
    /// Returns `0.0` for a community with zero volume.
    #[must_use]
    pub fn empirical_xi(&self) -> f64 {
        let volume = self.volume();
        if volume == 0 {
            return 0.0;
        }
        self.background_volume() as f64 / volume as f64
    }
}

#[cfg(test)]
mod tests {
    use rand::{SeedableRng, rngs::SmallRng};
    use rstest::rstest;

    use super::*;
    use crate::{AbcdErrorCode, ConfigurationModel};

    /// Replays a fixed edge list regardless of the requested degrees.
    struct FixedEdges(Vec<Edge>);

    impl GraphModel for FixedEdges {
        fn name(&self) -> &str {
            "fixed"
        }

        fn sample_edges(
            &self,
            _first_vertex: usize,
            _degrees: &[usize],
            _rng: &mut dyn RngCore,
        ) -> Vec<Edge> {
            self.0.clone()
        }
    }

    fn build_fixed(edges: Vec<Edge>, degrees: &[usize]) -> Community {
        let background = vec![1; degrees.len()];
        let mut rng = SmallRng::seed_from_u64(3);
        Community::build(
            CommunityId::new(0),
            10..10 + degrees.len(),
            false,
            degrees,
            &background,
            &FixedEdges(edges),
            &mut rng,
        )
        .expect("fixed edges stay inside the community")
    }

    #[test]
    fn stalled_loops_move_two_credits_per_copy() {
        // A doubled loop on the only vertex cannot be rewired.
        let community = build_fixed(vec![Edge::new(10, 10), Edge::new(10, 10)], &[4]);
        assert!(community.edges().is_empty());
        assert_eq!(community.community_degrees(), &[0]);
        assert_eq!(community.background_degrees(), &[5]);
        assert_eq!(community.edges_pushed(), 2);
    }

    #[test]
    fn stalled_duplicates_keep_one_copy() {
        let community =
            build_fixed(vec![Edge::new(10, 11), Edge::new(10, 11), Edge::new(10, 11)], &[3, 3]);
        assert_eq!(community.edges().multiplicity(Edge::new(10, 11)), 1);
        assert!(community.edges().is_simple());
        assert_eq!(community.community_degrees(), &[1, 1]);
        assert_eq!(community.background_degrees(), &[3, 3]);
        assert_eq!(community.edges_pushed(), 2);
        assert_eq!(community.diagnostics().multi_edges(), 2);
    }

    #[test]
    fn realised_degrees_match_bookkeeping_after_push() {
        let community = build_fixed(
            vec![Edge::new(10, 10), Edge::new(10, 10), Edge::new(10, 11), Edge::new(10, 11)],
            &[6, 2],
        );
        let realised = community.edges().degrees(12);
        assert_eq!(&realised[10..], community.community_degrees());
        assert_eq!(community.volume(), 8 + 2);
    }

    #[test]
    fn missing_model_edges_become_background_degree() {
        let community = build_fixed(vec![Edge::new(10, 11)], &[3, 1, 2]);
        assert_eq!(community.community_degrees(), &[1, 1, 0]);
        assert_eq!(community.background_degrees(), &[3, 1, 3]);
        assert_eq!(community.volume(), 6 + 3);
    }

    #[test]
    fn surplus_model_edges_are_kept_with_no_background() {
        let community = build_fixed(
            vec![Edge::new(10, 11), Edge::new(10, 12), Edge::new(10, 13)],
            &[1, 1, 1, 1],
        );
        assert_eq!(community.community_degrees(), &[3, 1, 1, 1]);
        assert_eq!(community.background_degrees(), &[0, 1, 1, 1]);
    }

    #[rstest]
    #[case(Edge::new(3, 10))]
    #[case(Edge::new(11, 12))]
    fn edges_outside_the_block_are_rejected(#[case] stray: Edge) {
        let mut rng = SmallRng::seed_from_u64(3);
        let err = Community::build(
            CommunityId::new(0),
            10..12,
            false,
            &[1, 1],
            &[0, 0],
            &FixedEdges(vec![stray]),
            &mut rng,
        )
        .expect_err("stray edge must be rejected");
        assert_eq!(err.code(), AbcdErrorCode::InvalidParameter);
    }

    #[rstest]
    #[case(vec![4, 3, 3, 2, 2, 2])]
    #[case(vec![5, 5, 5, 5, 5, 5, 5, 5, 5, 5, 5, 5])]
    #[case(vec![9, 1, 1, 1, 1, 1])]
    fn configuration_model_communities_end_simple(#[case] degrees: Vec<usize>) {
        let len = degrees.len();
        let total: usize = degrees.iter().sum();
        let mut rng = SmallRng::seed_from_u64(17);
        let community = Community::build(
            CommunityId::new(1),
            0..len,
            false,
            &degrees,
            &vec![0; len],
            &ConfigurationModel,
            &mut rng,
        )
        .expect("configuration model stays inside the block");
        assert!(community.edges().is_simple());
        assert_eq!(community.volume(), total);
        let realised = community.edges().degrees(len);
        assert_eq!(realised, community.community_degrees());
        let pushed: usize = community.background_degrees().iter().sum();
        assert_eq!(pushed, 2 * community.edges_pushed());
    }

    #[test]
    fn empirical_xi_is_the_background_share() {
        let community = build_fixed(vec![Edge::new(10, 11)], &[1, 1]);
        assert!((community.empirical_xi() - 0.5).abs() < 1e-12);
        assert!((community.average_degree() - 2.0).abs() < 1e-12);
        assert_eq!(community.degree_sequence(), vec![2, 2]);
    }
}
