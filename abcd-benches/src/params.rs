//! Benchmark parameter types.

use std::fmt;

/// Parameters for a full generation benchmark run.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GenerateBenchParams {
    /// Number of vertices.
    pub vcount: usize,
    /// Mixing parameter.
    pub xi: f64,
}

impl fmt::Display for GenerateBenchParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "n={},xi={}", self.vcount, self.xi)
    }
}

/// Parameters for a rewiring benchmark run.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RewireBenchParams {
    /// Number of vertices in the sampled multigraph.
    pub vcount: usize,
    /// Degree of the hub vertex that forces repeated edges.
    pub hub_degree: usize,
}

impl fmt::Display for RewireBenchParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "n={},hub={}", self.vcount, self.hub_degree)
    }
}
