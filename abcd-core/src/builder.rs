//! Builder for configuring ABCD generators.
//!
//! Exposes the execution strategy selection and the parameter validation that
//! runs before any sampling.

use crate::{Result, abcd::Abcd, params::AbcdParams};

/// Seed used when none is configured, so default runs are reproducible.
pub const DEFAULT_SEED: u64 = 0x00AB_CD00_5EED_2024;

/// Pass budget of the whole-graph rewiring when none is configured.
pub const DEFAULT_MAX_REWIRE_PASSES: usize = 10_000;

/// Selects how communities are sampled and rewired.
///
/// Every community owns an independent RNG stream, so both strategies produce
/// the same graph for the same seed. Without the `parallel` feature,
/// `Parallel` runs inline.
///
/// # Examples
/// ```
/// use abcd_core::ExecutionStrategy;
///
/// assert_eq!(ExecutionStrategy::default(), ExecutionStrategy::Parallel);
/// ```
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum ExecutionStrategy {
    /// Build communities one after another on the calling thread.
    Sequential,
    /// Build communities on the rayon thread pool.
    #[default]
    Parallel,
}

/// Configures and constructs [`Abcd`] generators.
///
/// Defaults follow common research settings: 1000 vertices, `gamma = 2.5`,
/// `beta = 1.5`, `xi = 0.25`, degrees in `[5, 30]`, community sizes in
/// `[20, 250]` and no outliers.
///
/// # Examples
/// ```
/// use abcd_core::{AbcdBuilder, ExecutionStrategy};
///
/// let abcd = AbcdBuilder::new()
///     .with_vcount(500)
///     .with_xi(0.3)
///     .with_execution_strategy(ExecutionStrategy::Sequential)
///     .build()
///     .expect("configuration is valid");
/// assert_eq!(abcd.params().vcount(), 500);
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct AbcdBuilder {
    vcount: usize,
    gamma: f64,
    beta: f64,
    xi: f64,
    min_degree: usize,
    max_degree: usize,
    min_community_size: usize,
    max_community_size: usize,
    num_outliers: usize,
    degree_sequence: Option<Vec<usize>>,
    community_sizes: Option<Vec<usize>>,
    seed: u64,
    execution_strategy: ExecutionStrategy,
    max_rewire_passes: usize,
}

impl Default for AbcdBuilder {
    fn default() -> Self {
        Self {
            vcount: 1000,
            gamma: 2.5,
            beta: 1.5,
            xi: 0.25,
            min_degree: 5,
            max_degree: 30,
            min_community_size: 20,
            max_community_size: 250,
            num_outliers: 0,
            degree_sequence: None,
            community_sizes: None,
            seed: DEFAULT_SEED,
            execution_strategy: ExecutionStrategy::default(),
            max_rewire_passes: DEFAULT_MAX_REWIRE_PASSES,
        }
    }
}

impl AbcdBuilder {
    /// Creates a builder populated with the default parameters.
    ///
    /// # Examples
    /// ```
    /// use abcd_core::AbcdBuilder;
    ///
    /// let builder = AbcdBuilder::new();
    /// assert_eq!(builder.vcount(), 1000);
    /// assert_eq!(builder.degree_bounds(), (5, 30));
    /// ```
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the total number of vertices, outliers included.
    #[must_use]
    pub fn with_vcount(mut self, vcount: usize) -> Self {
        self.vcount = vcount;
        self
    }

    /// Sets the degree power-law exponent, expected in `[2, 3]`.
    #[must_use]
    pub fn with_gamma(mut self, gamma: f64) -> Self {
        self.gamma = gamma;
        self
    }

    /// Sets the community-size power-law exponent, expected in `[1, 2]`.
    #[must_use]
    pub fn with_beta(mut self, beta: f64) -> Self {
        self.beta = beta;
        self
    }

    /// Sets the mixing parameter, expected in `[0, 1]`.
    #[must_use]
    pub fn with_xi(mut self, xi: f64) -> Self {
        self.xi = xi;
        self
    }

    /// Sets the inclusive degree bounds used for sampling.
    #[must_use]
    pub fn with_degree_bounds(mut self, min: usize, max: usize) -> Self {
        self.min_degree = min;
        self.max_degree = max;
        self
    }

    /// Sets the inclusive community-size bounds used for sampling.
    #[must_use]
    pub fn with_community_size_bounds(mut self, min: usize, max: usize) -> Self {
        self.min_community_size = min;
        self.max_community_size = max;
        self
    }

    /// Sets the number of outlier vertices.
    #[must_use]
    pub fn with_num_outliers(mut self, num_outliers: usize) -> Self {
        self.num_outliers = num_outliers;
        self
    }

    /// Uses an explicit degree sequence for the non-outlier vertices instead
    /// of sampling one.
    ///
    /// # Examples
    /// ```
    /// use abcd_core::AbcdBuilder;
    ///
    /// let abcd = AbcdBuilder::new()
    ///     .with_vcount(4)
    ///     .with_degree_sequence(vec![1, 3, 1, 1])
    ///     .with_community_sizes(vec![4])
    ///     .build()
    ///     .expect("explicit sequences are consistent");
    /// assert_eq!(abcd.params().degree_sequence(), Some(&[3, 1, 1, 1][..]));
    /// ```
    #[must_use]
    pub fn with_degree_sequence(mut self, degrees: Vec<usize>) -> Self {
        self.degree_sequence = Some(degrees);
        self
    }

    /// Uses explicit community sizes instead of sampling them.
    #[must_use]
    pub fn with_community_sizes(mut self, sizes: Vec<usize>) -> Self {
        self.community_sizes = Some(sizes);
        self
    }

    /// Sets the RNG seed.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Sets how communities are scheduled.
    #[must_use]
    pub fn with_execution_strategy(mut self, strategy: ExecutionStrategy) -> Self {
        self.execution_strategy = strategy;
        self
    }

    /// Sets the pass budget of the whole-graph rewiring.
    #[must_use]
    pub fn with_max_rewire_passes(mut self, passes: usize) -> Self {
        self.max_rewire_passes = passes;
        self
    }

    /// Configured vertex count.
    #[must_use]
    #[rustfmt::skip]
    pub fn vcount(&self) -> usize { self.vcount }

    /// Configured degree exponent.
    #[must_use]
    #[rustfmt::skip]
    pub fn gamma(&self) -> f64 { self.gamma }

    /// Configured community-size exponent.
    #[must_use]
    #[rustfmt::skip]
    pub fn beta(&self) -> f64 { self.beta }

    /// Configured mixing parameter.
    #[must_use]
    #[rustfmt::skip]
    pub fn xi(&self) -> f64 { self.xi }

    /// Configured degree bounds as `(min, max)`.
    #[must_use]
    #[rustfmt::skip]
    pub fn degree_bounds(&self) -> (usize, usize) { (self.min_degree, self.max_degree) }

    /// Configured community-size bounds as `(min, max)`.
    #[must_use]
    pub fn community_size_bounds(&self) -> (usize, usize) {
        (self.min_community_size, self.max_community_size)
    }

    /// Configured number of outliers.
    #[must_use]
    #[rustfmt::skip]
    pub fn num_outliers(&self) -> usize { self.num_outliers }

    /// Configured seed.
    #[must_use]
    #[rustfmt::skip]
    pub fn seed(&self) -> u64 { self.seed }

    /// Configured execution strategy.
    #[must_use]
    #[rustfmt::skip]
    pub fn execution_strategy(&self) -> ExecutionStrategy { self.execution_strategy }

    /// Configured whole-graph rewiring budget.
    #[must_use]
    #[rustfmt::skip]
    pub fn max_rewire_passes(&self) -> usize { self.max_rewire_passes }

    /// Validates the configuration and constructs an [`Abcd`] generator.
    ///
    /// Explicit sequences are sorted descending before validation.
    ///
    /// # Errors
    /// Returns [`AbcdError::InvalidRange`](crate::AbcdError::InvalidRange)
    /// for inverted bounds and
    /// [`AbcdError::InvalidParameter`](crate::AbcdError::InvalidParameter) for
    /// any other inconsistent setting.
    ///
    /// # Examples
    /// ```
    /// use abcd_core::{AbcdBuilder, AbcdErrorCode};
    ///
    /// let err = AbcdBuilder::new()
    ///     .with_xi(1.5)
    ///     .build()
    ///     .expect_err("xi outside [0, 1] must be rejected");
    /// assert_eq!(err.code(), AbcdErrorCode::InvalidParameter);
    /// ```
    pub fn build(self) -> Result<Abcd> {
        let params = AbcdParams {
            vcount: self.vcount,
            gamma: self.gamma,
            beta: self.beta,
            xi: self.xi,
            min_degree: self.min_degree,
            max_degree: self.max_degree,
            min_community_size: self.min_community_size,
            max_community_size: self.max_community_size,
            num_outliers: self.num_outliers,
            degree_sequence: self.degree_sequence.map(sorted_descending),
            community_sizes: self.community_sizes.map(sorted_descending),
            seed: self.seed,
            execution_strategy: self.execution_strategy,
            max_rewire_passes: self.max_rewire_passes,
        };
        params.validate()?;
        Ok(Abcd::new(params))
    }
}

fn sorted_descending(mut values: Vec<usize>) -> Vec<usize> {
    values.sort_unstable_by(|left, right| right.cmp(left));
    values
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;
    use crate::{AbcdError, AbcdErrorCode};

    #[test]
    fn defaults_are_valid() {
        let abcd = AbcdBuilder::new().build().expect("defaults must validate");
        let params = abcd.params();
        assert_eq!(params.vcount(), 1000);
        assert_eq!(params.seed(), DEFAULT_SEED);
        assert_eq!(params.max_rewire_passes(), DEFAULT_MAX_REWIRE_PASSES);
        assert_eq!(params.regular_vcount(), 1000);
    }

    #[rstest]
    #[case::zero_vertices(AbcdBuilder::new().with_vcount(0))]
    #[case::gamma_low(AbcdBuilder::new().with_gamma(1.9))]
    #[case::gamma_high(AbcdBuilder::new().with_gamma(3.1))]
    #[case::gamma_nan(AbcdBuilder::new().with_gamma(f64::NAN))]
    #[case::beta_low(AbcdBuilder::new().with_beta(0.5))]
    #[case::beta_high(AbcdBuilder::new().with_beta(2.5))]
    #[case::xi_negative(AbcdBuilder::new().with_xi(-0.01))]
    #[case::zero_min_degree(AbcdBuilder::new().with_degree_bounds(0, 30))]
    #[case::degree_not_below_size(AbcdBuilder::new().with_degree_bounds(5, 250))]
    #[case::min_size_below_min_degree(AbcdBuilder::new().with_community_size_bounds(4, 250))]
    #[case::max_size_above_vertices(AbcdBuilder::new().with_vcount(200))]
    #[case::too_many_outliers(AbcdBuilder::new().with_num_outliers(1000))]
    #[case::outliers_squeeze_sizes(AbcdBuilder::new().with_num_outliers(800))]
    #[case::zero_budget(AbcdBuilder::new().with_max_rewire_passes(0))]
    fn invalid_parameters_are_rejected(#[case] builder: AbcdBuilder) {
        let err = builder.build().expect_err("configuration must be rejected");
        assert_eq!(err.code(), AbcdErrorCode::InvalidParameter, "{err}");
    }

    #[rstest]
    #[case(AbcdBuilder::new().with_degree_bounds(31, 30), "degree", 31, 30)]
    #[case(AbcdBuilder::new().with_community_size_bounds(100, 50), "community size", 100, 50)]
    fn inverted_bounds_are_invalid_ranges(
        #[case] builder: AbcdBuilder,
        #[case] parameter: &'static str,
        #[case] min: usize,
        #[case] max: usize,
    ) {
        let err = builder.build().expect_err("inverted bounds must be rejected");
        assert_eq!(err, AbcdError::InvalidRange { parameter, min, max });
    }

    #[rstest]
    #[case::wrong_length(vec![2, 2, 2], vec![4])]
    #[case::zero_degree(vec![2, 2, 0, 0], vec![4])]
    #[case::odd_sum(vec![3, 2, 2, 2], vec![4])]
    #[case::sizes_do_not_cover(vec![2, 2, 2, 2], vec![3])]
    #[case::empty_community(vec![2, 2, 2, 2], vec![4, 0])]
    fn inconsistent_explicit_sequences_are_rejected(
        #[case] degrees: Vec<usize>,
        #[case] sizes: Vec<usize>,
    ) {
        let err = AbcdBuilder::new()
            .with_vcount(4)
            .with_degree_sequence(degrees)
            .with_community_sizes(sizes)
            .build()
            .expect_err("inconsistent sequences must be rejected");
        assert_eq!(err.code(), AbcdErrorCode::InvalidParameter);
    }

    #[test]
    fn explicit_sequences_skip_sampling_bounds() {
        // Default degree and size bounds would not fit ten vertices.
        let abcd = AbcdBuilder::new()
            .with_vcount(10)
            .with_degree_sequence(vec![1, 1, 1, 9, 1, 1, 1, 1, 1, 1])
            .with_community_sizes(vec![5, 5])
            .build()
            .expect("explicit sequences are consistent");
        assert_eq!(
            abcd.params().degree_sequence(),
            Some(&[9, 1, 1, 1, 1, 1, 1, 1, 1, 1][..])
        );
        assert_eq!(abcd.params().community_sizes(), Some(&[5, 5][..]));
    }

    #[test]
    fn explicit_degrees_with_sampled_sizes_still_check_size_bounds() {
        let err = AbcdBuilder::new()
            .with_vcount(10)
            .with_degree_sequence(vec![2; 10])
            .build()
            .expect_err("default size bounds exceed ten vertices");
        assert_eq!(err.code(), AbcdErrorCode::InvalidParameter);
    }

    #[test]
    fn setters_round_trip_through_accessors() {
        let builder = AbcdBuilder::new()
            .with_vcount(321)
            .with_gamma(2.1)
            .with_beta(1.1)
            .with_xi(0.4)
            .with_degree_bounds(2, 9)
            .with_community_size_bounds(10, 40)
            .with_num_outliers(7)
            .with_seed(99)
            .with_execution_strategy(ExecutionStrategy::Sequential)
            .with_max_rewire_passes(12);
        assert_eq!(builder.vcount(), 321);
        assert!((builder.gamma() - 2.1).abs() < f64::EPSILON);
        assert!((builder.beta() - 1.1).abs() < f64::EPSILON);
        assert!((builder.xi() - 0.4).abs() < f64::EPSILON);
        assert_eq!(builder.degree_bounds(), (2, 9));
        assert_eq!(builder.community_size_bounds(), (10, 40));
        assert_eq!(builder.num_outliers(), 7);
        assert_eq!(builder.seed(), 99);
        assert_eq!(builder.execution_strategy(), ExecutionStrategy::Sequential);
        assert_eq!(builder.max_rewire_passes(), 12);
        assert!(builder.build().is_ok());
    }
}
