//! Validated generation parameters.

use crate::{AbcdError, Result, builder::ExecutionStrategy};

/// Validated parameters for one ABCD generator.
///
/// Built by [`AbcdBuilder::build`](crate::AbcdBuilder::build); every
/// invariant below holds for any instance obtained that way.
#[derive(Clone, Debug, PartialEq)]
pub struct AbcdParams {
    pub(crate) vcount: usize,
    pub(crate) gamma: f64,
    pub(crate) beta: f64,
    pub(crate) xi: f64,
    pub(crate) min_degree: usize,
    pub(crate) max_degree: usize,
    pub(crate) min_community_size: usize,
    pub(crate) max_community_size: usize,
    pub(crate) num_outliers: usize,
    pub(crate) degree_sequence: Option<Vec<usize>>,
    pub(crate) community_sizes: Option<Vec<usize>>,
    pub(crate) seed: u64,
    pub(crate) execution_strategy: ExecutionStrategy,
    pub(crate) max_rewire_passes: usize,
}

impl AbcdParams {
    /// Total number of vertices, outliers included.
    #[must_use]
    #[rustfmt::skip]
    pub fn vcount(&self) -> usize { self.vcount }

    /// Degree power-law exponent.
    #[must_use]
    #[rustfmt::skip]
    pub fn gamma(&self) -> f64 { self.gamma }

    /// Community-size power-law exponent.
    #[must_use]
    #[rustfmt::skip]
    pub fn beta(&self) -> f64 { self.beta }

    /// Mixing parameter.
    #[must_use]
    #[rustfmt::skip]
    pub fn xi(&self) -> f64 { self.xi }

    /// Smallest sampled degree.
    #[must_use]
    #[rustfmt::skip]
    pub fn min_degree(&self) -> usize { self.min_degree }

    /// Largest sampled degree.
    #[must_use]
    #[rustfmt::skip]
    pub fn max_degree(&self) -> usize { self.max_degree }

    /// Smallest sampled community size.
    #[must_use]
    #[rustfmt::skip]
    pub fn min_community_size(&self) -> usize { self.min_community_size }

    /// Largest sampled community size.
    #[must_use]
    #[rustfmt::skip]
    pub fn max_community_size(&self) -> usize { self.max_community_size }

    /// Number of outlier vertices.
    #[must_use]
    #[rustfmt::skip]
    pub fn num_outliers(&self) -> usize { self.num_outliers }

    /// Explicit degree sequence for the regular vertices, sorted descending.
    #[must_use]
    #[rustfmt::skip]
    pub fn degree_sequence(&self) -> Option<&[usize]> { self.degree_sequence.as_deref() }

    /// Explicit community sizes, sorted descending.
    #[must_use]
    #[rustfmt::skip]
    pub fn community_sizes(&self) -> Option<&[usize]> { self.community_sizes.as_deref() }

    /// Seed of the generation session.
    #[must_use]
    #[rustfmt::skip]
    pub fn seed(&self) -> u64 { self.seed }

    /// How per-community construction is scheduled.
    #[must_use]
    #[rustfmt::skip]
    pub fn execution_strategy(&self) -> ExecutionStrategy { self.execution_strategy }

    /// Pass budget of the whole-graph rewiring.
    #[must_use]
    #[rustfmt::skip]
    pub fn max_rewire_passes(&self) -> usize { self.max_rewire_passes }

    /// Number of vertices that belong to regular communities.
    #[must_use]
    pub fn regular_vcount(&self) -> usize {
        self.vcount - self.num_outliers
    }

    pub(crate) fn validate(&self) -> Result<()> {
        if self.vcount == 0 {
            return Err(AbcdError::invalid("vcount", "must be at least 1"));
        }
        check_interval("gamma", self.gamma, 2.0, 3.0)?;
        check_interval("beta", self.beta, 1.0, 2.0)?;
        check_interval("xi", self.xi, 0.0, 1.0)?;
        if self.min_degree > self.max_degree {
            return Err(AbcdError::InvalidRange {
                parameter: "degree",
                min: self.min_degree,
                max: self.max_degree,
            });
        }
        if self.min_degree == 0 {
            return Err(AbcdError::invalid("min_degree", "must be at least 1"));
        }
        if self.num_outliers >= self.vcount {
            return Err(AbcdError::invalid(
                "num_outliers",
                format!("must be less than vcount {}", self.vcount),
            ));
        }
        if self.max_rewire_passes == 0 {
            return Err(AbcdError::invalid("max_rewire_passes", "must be at least 1"));
        }

        let regular = self.regular_vcount();
        if let Some(degrees) = &self.degree_sequence {
            check_degree_sequence(degrees, regular)?;
        }
        match &self.community_sizes {
            Some(sizes) => check_community_sizes(sizes, regular)?,
            None => self.check_size_bounds(regular)?,
        }
        Ok(())
    }

    fn check_size_bounds(&self, regular: usize) -> Result<()> {
        if self.min_community_size > self.max_community_size {
            return Err(AbcdError::InvalidRange {
                parameter: "community size",
                min: self.min_community_size,
                max: self.max_community_size,
            });
        }
        if self.min_community_size < self.min_degree {
            return Err(AbcdError::invalid(
                "min_community_size",
                format!("must be at least min_degree {}", self.min_degree),
            ));
        }
        if self.max_community_size > regular {
            return Err(AbcdError::invalid(
                "max_community_size",
                format!("must not exceed the {regular} non-outlier vertices"),
            ));
        }
        if self.degree_sequence.is_none() && self.max_degree >= self.max_community_size {
            return Err(AbcdError::invalid(
                "max_degree",
                format!(
                    "must be less than max_community_size {}",
                    self.max_community_size
                ),
            ));
        }
        Ok(())
    }
}

fn check_interval(parameter: &'static str, value: f64, low: f64, high: f64) -> Result<()> {
    if (low..=high).contains(&value) {
        Ok(())
    } else {
        Err(AbcdError::invalid(
            parameter,
            format!("must lie in [{low}, {high}] (got {value})"),
        ))
    }
}

fn check_degree_sequence(degrees: &[usize], regular: usize) -> Result<()> {
    if degrees.len() != regular {
        return Err(AbcdError::invalid(
            "degree_sequence",
            format!(
                "has {} entries but {regular} non-outlier vertices exist",
                degrees.len()
            ),
        ));
    }
    if degrees.contains(&0) {
        return Err(AbcdError::invalid("degree_sequence", "entries must be at least 1"));
    }
    if degrees.iter().sum::<usize>() % 2 == 1 {
        return Err(AbcdError::invalid("degree_sequence", "sum must be even"));
    }
    Ok(())
}

fn check_community_sizes(sizes: &[usize], regular: usize) -> Result<()> {
    if sizes.contains(&0) {
        return Err(AbcdError::invalid("community_sizes", "entries must be at least 1"));
    }
    let total: usize = sizes.iter().sum();
    if total != regular {
        return Err(AbcdError::invalid(
            "community_sizes",
            format!("sum to {total} but {regular} non-outlier vertices exist"),
        ));
    }
    Ok(())
}
