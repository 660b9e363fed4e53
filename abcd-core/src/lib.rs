//! Artificial Benchmark for Community Detection (ABCD) graph generator.
//!
//! Produces undirected simple graphs with power-law degrees, power-law
//! community sizes and a single mixing parameter `xi` that controls the
//! share of edges falling outside a vertex's own community. Optional
//! outlier vertices join no community and attach only through the
//! background graph.
//!
//! ```
//! use abcd_core::AbcdBuilder;
//!
//! let graph = AbcdBuilder::new()
//!     .with_vcount(500)
//!     .with_xi(0.3)
//!     .with_seed(42)
//!     .build()?
//!     .generate()?;
//! assert_eq!(graph.vcount(), 500);
//! assert!(graph.is_proper_abcd());
//! # Ok::<(), abcd_core::AbcdError>(())
//! ```
#![cfg_attr(docsrs, feature(doc_cfg))]

mod abcd;
mod assign;
mod builder;
mod diagnostics;
mod error;
mod graph;
mod model;
mod params;
mod rewire;
mod sampling;
mod sequence;

#[cfg(test)]
mod test_utils;

pub use crate::{
    abcd::Abcd,
    assign::{DegreeSplit, assign_degrees, split_degrees},
    builder::{AbcdBuilder, DEFAULT_MAX_REWIRE_PASSES, DEFAULT_SEED, ExecutionStrategy},
    diagnostics::{BuildStatistics, XiMatrix},
    error::{AbcdError, AbcdErrorCode, Result},
    graph::{AbcdGraph, AdjacencyMultiset, Community, CommunityId, ConstructionDiagnostics, Edge},
    model::{ConfigurationModel, GraphModel},
    params::AbcdParams,
    rewire::{RewireOutcome, rewire_community, rewire_until_simple},
    sampling::PowerLaw,
    sequence::{build_community_sizes, build_degrees, partition_vertices},
};
