//! Generation pipeline entry point.
//!
//! Provides [`Abcd`], which turns validated parameters into an
//! [`AbcdGraph`] by running the sampling, assignment, splitting and assembly
//! stages in order.

use std::time::{Duration, Instant};

use tracing::{debug, info, instrument};

use crate::{
    Result,
    assign::{assign_degrees, split_degrees},
    graph::{AbcdGraph, AssemblyPlan},
    model::{ConfigurationModel, GraphModel},
    params::AbcdParams,
    sampling::session_rng,
    sequence::{build_community_sizes, build_degrees, partition_vertices},
};

/// Generator for ABCD benchmark graphs.
///
/// # Examples
/// ```
/// use abcd_core::AbcdBuilder;
///
/// let abcd = AbcdBuilder::new()
///     .with_vcount(300)
///     .with_num_outliers(30)
///     .with_community_size_bounds(20, 100)
///     .build()
///     .expect("parameters are valid");
/// let graph = abcd.generate().expect("generation succeeds");
/// let outliers = graph.outliers().expect("outliers were requested");
/// assert_eq!(outliers.len(), 30);
/// assert!(outliers.community_degrees().iter().all(|&d| d == 0));
/// ```
#[derive(Clone, Debug)]
pub struct Abcd {
    params: AbcdParams,
}

impl Abcd {
    pub(crate) fn new(params: AbcdParams) -> Self {
        Self { params }
    }

    /// Validated parameters of this generator.
    #[must_use]
    #[rustfmt::skip]
    pub fn params(&self) -> &AbcdParams { &self.params }

    /// Generates a graph with the configuration model.
    ///
    /// # Errors
    /// Returns [`AbcdError::Infeasible`](crate::AbcdError::Infeasible) when
    /// community sizes cannot be sampled within their bounds.
    pub fn generate(&self) -> Result<AbcdGraph> {
        self.generate_with_model(&ConfigurationModel)
    }

    /// Generates a graph, sampling every community and the background with
    /// `model`.
    ///
    /// The same parameters, seed and model always yield the same graph.
    ///
    /// Models may match the requested degrees only on average; the recorded
    /// degrees always follow the sampled edges.
    ///
    /// # Errors
    /// Returns [`AbcdError::Infeasible`](crate::AbcdError::Infeasible) when
    /// community sizes cannot be sampled within their bounds and
    /// [`AbcdError::InvalidParameter`](crate::AbcdError::InvalidParameter) when
    /// `model` produces an edge outside the vertices it was asked to cover.
    #[instrument(
        name = "abcd.generate",
        err,
        skip(self, model),
        fields(
            vcount = self.params.vcount(),
            xi = self.params.xi(),
            outliers = self.params.num_outliers(),
            model = model.name(),
            strategy = ?self.params.execution_strategy(),
        ),
    )]
    pub fn generate_with_model<M: GraphModel>(&self, model: &M) -> Result<AbcdGraph> {
        let started = Instant::now();
        let params = &self.params;
        let mut rng = session_rng(params.seed());
        let regular = params.regular_vcount();

        let degrees = match params.degree_sequence() {
            Some(degrees) => degrees.to_vec(),
            None => build_degrees(
                regular,
                params.gamma(),
                params.min_degree(),
                params.max_degree(),
                &mut rng,
            )?,
        };
        let sizes = match params.community_sizes() {
            Some(sizes) => sizes.to_vec(),
            None => build_community_sizes(
                regular,
                params.beta(),
                params.min_community_size(),
                params.max_community_size(),
                &mut rng,
            )?,
        };
        debug!(
            communities = sizes.len(),
            volume = degrees.iter().sum::<usize>(),
            "degree and community-size sequences ready"
        );

        let assigned = assign_degrees(&degrees, &sizes, params.xi(), &mut rng)?;
        let blocks = partition_vertices(&sizes);
        let mut split = split_degrees(&assigned, &blocks, params.xi(), &mut rng)?;

        let outliers = if params.num_outliers() > 0 {
            let outlier_degrees = build_degrees(
                params.num_outliers(),
                params.gamma(),
                params.min_degree(),
                params.max_degree(),
                &mut rng,
            )?;
            split.append_outliers(&outlier_degrees);
            Some(regular..params.vcount())
        } else {
            None
        };

        let plan = AssemblyPlan {
            blocks,
            outliers,
            split,
        };
        let mut graph = AbcdGraph::assemble(params.clone(), plan, model, &mut rng)?;
        let elapsed = started.elapsed();
        graph.set_build_time(elapsed);
        record_generation(&graph, elapsed);

        info!(
            edges = graph.edge_count(),
            communities = graph.num_communities(),
            edges_pushed = graph.edges_pushed(),
            proper = graph.is_proper_abcd(),
            elapsed_secs = elapsed.as_secs_f64(),
            "graph generation completed"
        );
        Ok(graph)
    }
}

#[cfg(feature = "metrics")]
fn record_generation(graph: &AbcdGraph, elapsed: Duration) {
    metrics::counter!("abcd_rewire_passes").increment(graph.rewiring().passes() as u64);
    metrics::counter!("abcd_edges_pushed_to_background").increment(graph.edges_pushed() as u64);
    metrics::histogram!("abcd_generation_seconds").record(elapsed.as_secs_f64());
}

#[cfg(not(feature = "metrics"))]
fn record_generation(_graph: &AbcdGraph, _elapsed: Duration) {}
