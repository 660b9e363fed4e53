//! Graph entities and the assembly of communities, background and combined
//! graph.

mod community;
mod edge;
mod multiset;

use std::{ops::Range, time::Duration};

use rand::{RngCore, rngs::SmallRng};
#[cfg(feature = "parallel")]
use rayon::prelude::*;
use tracing::{debug, instrument, warn};

pub use self::{
    community::{Community, CommunityId},
    edge::Edge,
    multiset::{AdjacencyMultiset, ConstructionDiagnostics},
};
use crate::{
    AbcdError, Result,
    assign::DegreeSplit,
    builder::ExecutionStrategy,
    model::GraphModel,
    params::AbcdParams,
    rewire::{RewireOutcome, rewire_until_simple},
    sampling::community_rng,
};

/// Everything the assembly stage needs from the sampling stages.
pub(crate) struct AssemblyPlan {
    pub(crate) blocks: Vec<Range<usize>>,
    pub(crate) outliers: Option<Range<usize>>,
    pub(crate) split: DegreeSplit,
}

/// A generated ABCD graph with its ground-truth communities.
///
/// # Examples
/// ```
/// use abcd_core::AbcdBuilder;
///
/// let abcd = AbcdBuilder::new()
///     .with_vcount(200)
///     .with_degree_bounds(3, 15)
///     .with_community_size_bounds(20, 60)
///     .with_seed(7)
///     .build()
///     .expect("parameters are valid");
/// let graph = abcd.generate().expect("generation succeeds");
/// assert_eq!(graph.vcount(), 200);
/// assert!(graph.is_proper_abcd());
/// ```
#[derive(Clone, Debug)]
pub struct AbcdGraph {
    params: AbcdParams,
    model_name: String,
    communities: Vec<Community>,
    membership: Vec<CommunityId>,
    community_degrees: Vec<usize>,
    background_degrees: Vec<usize>,
    background_diagnostics: ConstructionDiagnostics,
    edges: AdjacencyMultiset,
    rewiring: RewireOutcome,
    edges_pushed: usize,
    build_time: Duration,
}

impl AbcdGraph {
    /// Builds communities, the background graph and the combined graph.
    ///
    /// Recorded degrees follow the edges the model actually produced, so the
    /// handshake holds even for models that only match degrees on average.
    ///
    /// # Errors
    /// Returns [`AbcdError::InvalidParameter`] when the model produces an edge
    /// outside the vertex range it was asked to cover.
    pub(crate) fn assemble(
        params: AbcdParams,
        plan: AssemblyPlan,
        model: &dyn GraphModel,
        rng: &mut SmallRng,
    ) -> Result<Self> {
        let AssemblyPlan {
            blocks,
            outliers,
            split,
        } = plan;
        let (mut community_degrees, mut background_degrees) = split.into_parts();
        let vcount = community_degrees.len();

        let mut jobs: Vec<(Range<usize>, bool)> =
            blocks.into_iter().map(|block| (block, false)).collect();
        if let Some(block) = outliers {
            jobs.push((block, true));
        }

        let base_seed = rng.next_u64();
        let built = build_communities(
            &jobs,
            &community_degrees,
            &background_degrees,
            model,
            base_seed,
            params.execution_strategy(),
        )?;

        let mut communities = Vec::with_capacity(built.len());
        let mut membership = vec![CommunityId::new(0); vcount];
        let mut edges_pushed = 0;
        for community in built {
            edges_pushed += community.edges_pushed();
            let vertices = community.vertices();
            community_degrees[vertices.clone()].copy_from_slice(community.community_degrees());
            background_degrees[vertices.clone()].copy_from_slice(community.background_degrees());
            membership[vertices].fill(community.id());
            communities.push(community);
        }

        let background = build_background(&background_degrees, model, rng)?;
        let realised_background = background.degrees(vcount);
        let background_diagnostics = background.diagnostics();

        let mut edges = AdjacencyMultiset::new();
        for community in &communities {
            edges.merge(community.edges());
        }
        edges.merge(&background);
        let rewiring = rewire_graph(&mut edges, rng, params.max_rewire_passes());

        Ok(Self {
            model_name: model.name().to_owned(),
            params,
            communities,
            membership,
            community_degrees,
            background_degrees: realised_background,
            background_diagnostics,
            edges,
            rewiring,
            edges_pushed,
            build_time: Duration::ZERO,
        })
    }

    pub(crate) fn set_build_time(&mut self, elapsed: Duration) {
        self.build_time = elapsed;
    }

    /// Parameters the graph was generated from.
    #[must_use]
    #[rustfmt::skip]
    pub fn params(&self) -> &AbcdParams { &self.params }

    /// Name of the multigraph model used for sampling.
    #[must_use]
    #[rustfmt::skip]
    pub fn model_name(&self) -> &str { &self.model_name }

    /// Number of vertices, outliers included.
    #[must_use]
    #[rustfmt::skip]
    pub fn vcount(&self) -> usize { self.membership.len() }

    /// Number of edges, counted with multiplicity.
    #[must_use]
    #[rustfmt::skip]
    pub fn edge_count(&self) -> usize { self.edges.edge_count() }

    /// Combined edge multiset.
    #[must_use]
    #[rustfmt::skip]
    pub fn adjacency(&self) -> &AdjacencyMultiset { &self.edges }

    /// Every edge as a `(low, high)` vertex pair, repeated by multiplicity.
    #[must_use]
    pub fn edges(&self) -> Vec<(usize, usize)> {
        self.edges
            .iter_with_multiplicity()
            .map(|edge| edge.endpoints())
            .collect()
    }

    /// Communities in id order; the outlier pseudo-community comes last.
    #[must_use]
    #[rustfmt::skip]
    pub fn communities(&self) -> &[Community] { &self.communities }

    /// Community with the given id.
    #[must_use]
    pub fn community(&self, id: CommunityId) -> Option<&Community> {
        self.communities.get(id.get())
    }

    /// Outlier pseudo-community, when outliers were requested.
    #[must_use]
    pub fn outliers(&self) -> Option<&Community> {
        self.communities.last().filter(|community| community.is_outlier())
    }

    /// Number of communities, excluding the outlier pseudo-community.
    #[must_use]
    pub fn num_communities(&self) -> usize {
        self.communities.len() - usize::from(self.outliers().is_some())
    }

    /// Community of `vertex`, or `None` when it is out of range.
    #[must_use]
    pub fn membership(&self, vertex: usize) -> Option<CommunityId> {
        self.membership.get(vertex).copied()
    }

    /// Community of every vertex, indexed by vertex id.
    #[must_use]
    #[rustfmt::skip]
    pub fn membership_list(&self) -> &[CommunityId] { &self.membership }

    /// Community degree of every vertex after community rewiring.
    #[must_use]
    #[rustfmt::skip]
    pub fn community_degrees(&self) -> &[usize] { &self.community_degrees }

    /// Degree of every vertex in the sampled background graph, pushed edges
    /// included.
    #[must_use]
    #[rustfmt::skip]
    pub fn background_degrees(&self) -> &[usize] { &self.background_degrees }

    /// Loop and repeat counts of the sampled background graph.
    #[must_use]
    #[rustfmt::skip]
    pub fn background_diagnostics(&self) -> ConstructionDiagnostics { self.background_diagnostics }

    /// Outcome of the whole-graph rewiring.
    #[must_use]
    #[rustfmt::skip]
    pub fn rewiring(&self) -> &RewireOutcome { &self.rewiring }

    /// Edges moved from communities to the background.
    #[must_use]
    #[rustfmt::skip]
    pub fn edges_pushed(&self) -> usize { self.edges_pushed }

    /// Wall time spent generating the graph.
    #[must_use]
    #[rustfmt::skip]
    pub fn build_time(&self) -> Duration { self.build_time }

    /// Returns `true` when the graph has no self-loops and no repeated edges.
    #[must_use]
    pub fn is_proper_abcd(&self) -> bool {
        self.edges.is_simple()
    }

    /// Degree of every vertex computed from the realised edges.
    #[must_use]
    pub fn degree_sequence(&self) -> Vec<usize> {
        self.edges.degrees(self.vcount())
    }

    /// Dense symmetric adjacency matrix.
    ///
    /// # Errors
    /// Returns [`AbcdError::MalformedGraph`] when the graph is not proper.
    pub fn to_adjacency_matrix(&self) -> Result<Vec<Vec<bool>>> {
        let bad_edges = self.edges.bad_edge_count();
        if bad_edges > 0 {
            return Err(AbcdError::MalformedGraph { bad_edges });
        }
        let n = self.vcount();
        let mut matrix = vec![vec![false; n]; n];
        for (edge, _) in self.edges.iter() {
            matrix[edge.low()][edge.high()] = true;
            matrix[edge.high()][edge.low()] = true;
        }
        Ok(matrix)
    }
}

#[instrument(
    name = "abcd.build_communities",
    skip_all,
    fields(communities = jobs.len(), strategy = ?strategy),
)]
fn build_communities(
    jobs: &[(Range<usize>, bool)],
    community_degrees: &[usize],
    background_degrees: &[usize],
    model: &dyn GraphModel,
    base_seed: u64,
    strategy: ExecutionStrategy,
) -> Result<Vec<Community>> {
    let build_one = |(index, (vertices, is_outlier)): (usize, &(Range<usize>, bool))| {
        let mut rng = community_rng(base_seed, index);
        Community::build(
            CommunityId::new(index),
            vertices.clone(),
            *is_outlier,
            &community_degrees[vertices.clone()],
            &background_degrees[vertices.clone()],
            model,
            &mut rng,
        )
    };

    let built: Vec<Community> = match strategy {
        #[cfg(feature = "parallel")]
        ExecutionStrategy::Parallel => jobs
            .par_iter()
            .enumerate()
            .map(build_one)
            .collect::<Result<_>>()?,
        #[cfg(not(feature = "parallel"))]
        ExecutionStrategy::Parallel => jobs.iter().enumerate().map(build_one).collect::<Result<_>>()?,
        ExecutionStrategy::Sequential => {
            jobs.iter().enumerate().map(build_one).collect::<Result<_>>()?
        }
    };

    let pushed: usize = built.iter().map(Community::edges_pushed).sum();
    debug!(edges_pushed = pushed, "communities built");
    Ok(built)
}

#[instrument(
    name = "abcd.build_background",
    skip_all,
    fields(vertices = background_degrees.len(), model = model.name()),
)]
fn build_background(
    background_degrees: &[usize],
    model: &dyn GraphModel,
    rng: &mut SmallRng,
) -> Result<AdjacencyMultiset> {
    let background = AdjacencyMultiset::from_edges(model.sample_edges(0, background_degrees, rng));
    check_model_edges(model.name(), &background, &(0..background_degrees.len()))?;
    debug!(
        edges = background.edge_count(),
        loops = background.diagnostics().loops(),
        multi_edges = background.diagnostics().multi_edges(),
        "background graph sampled"
    );
    Ok(background)
}

/// Rejects edges with an endpoint outside `vertices`.
fn check_model_edges(
    model: &str,
    edges: &AdjacencyMultiset,
    vertices: &Range<usize>,
) -> Result<()> {
    let stray = edges
        .iter()
        .map(|(edge, _)| edge)
        .find(|edge| edge.low() < vertices.start || edge.high() >= vertices.end);
    match stray {
        Some(edge) => Err(AbcdError::invalid(
            "graph model",
            format!(
                "{model} produced edge {edge} outside vertices {}..{}",
                vertices.start, vertices.end
            ),
        )),
        None => Ok(()),
    }
}

#[instrument(
    name = "abcd.rewire_graph",
    skip_all,
    fields(edges = edges.edge_count(), max_passes = max_passes),
)]
fn rewire_graph(
    edges: &mut AdjacencyMultiset,
    rng: &mut SmallRng,
    max_passes: usize,
) -> RewireOutcome {
    let outcome = rewire_until_simple(edges, rng, max_passes);
    match &outcome {
        RewireOutcome::Exhausted { passes, bad_edges } => {
            warn!(
                passes,
                bad_edges,
                "whole-graph rewiring stopped before the graph became simple"
            );
        }
        RewireOutcome::Simple { passes } => debug!(passes, "whole-graph rewiring converged"),
        RewireOutcome::Stalled { .. } => {}
    }
    outcome
}
