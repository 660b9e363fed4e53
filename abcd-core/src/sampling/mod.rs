//! Truncated discrete power-law sampling and stochastic rounding.

mod rng;

use rand::{
    Rng,
    distributions::{Distribution, Standard, WeightedIndex},
};

use crate::{AbcdError, Result};

pub(crate) use self::rng::{community_rng, session_rng};

/// Truncated discrete power law over the inclusive range `[min, max]`.
///
/// The probability of drawing `x` is proportional to `x^-exponent`.
///
/// # Examples
/// ```
/// use abcd_core::PowerLaw;
/// use rand::{SeedableRng, rngs::SmallRng};
///
/// let law = PowerLaw::new(5, 30, 2.5).expect("range is valid");
/// let mut rng = SmallRng::seed_from_u64(7);
/// let draws = law.sample_n(100, &mut rng);
/// assert!(draws.iter().all(|d| (5..=30).contains(d)));
/// ```
#[derive(Clone, Debug)]
pub struct PowerLaw {
    min: usize,
    max: usize,
    exponent: f64,
    weights: Vec<f64>,
    index: WeightedIndex<f64>,
}

impl PowerLaw {
    /// Builds the distribution.
    ///
    /// Weights are computed relative to `min`, so the heaviest weight is
    /// exactly one and the vector never underflows to all zeros.
    ///
    /// # Errors
    /// Returns [`AbcdError::InvalidRange`] when `min > max` and
    /// [`AbcdError::InvalidParameter`] when `min` is zero or the exponent is
    /// not a positive finite number.
    pub fn new(min: usize, max: usize, exponent: f64) -> Result<Self> {
        if min > max {
            return Err(AbcdError::InvalidRange {
                parameter: "power-law support",
                min,
                max,
            });
        }
        if min == 0 {
            return Err(AbcdError::invalid(
                "power-law support",
                "lower bound must be at least 1",
            ));
        }
        if !exponent.is_finite() || exponent <= 0.0 {
            return Err(AbcdError::invalid(
                "power-law exponent",
                format!("must be a positive finite number (got {exponent})"),
            ));
        }

        let base = min as f64;
        let weights: Vec<f64> = (min..=max)
            .map(|value| (value as f64 / base).powf(-exponent))
            .collect();
        let index = WeightedIndex::new(&weights)
            .map_err(|error| AbcdError::domain(format!("power-law weights rejected: {error}")))?;

        Ok(Self {
            min,
            max,
            exponent,
            weights,
            index,
        })
    }

    /// Smallest value in the support.
    #[must_use]
    #[rustfmt::skip]
    pub fn min(&self) -> usize { self.min }

    /// Largest value in the support.
    #[must_use]
    #[rustfmt::skip]
    pub fn max(&self) -> usize { self.max }

    /// Power-law exponent.
    #[must_use]
    #[rustfmt::skip]
    pub fn exponent(&self) -> f64 { self.exponent }

    /// Draws one value.
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> usize {
        self.min + self.index.sample(rng)
    }

    /// Draws `count` independent values with replacement.
    pub fn sample_n<R: Rng + ?Sized>(&self, count: usize, rng: &mut R) -> Vec<usize> {
        (0..count).map(|_| self.sample(rng)).collect()
    }

    /// Normalised probability of each support value, in ascending order.
    #[must_use]
    pub fn probabilities(&self) -> Vec<f64> {
        let total: f64 = self.weights.iter().sum();
        self.weights.iter().map(|weight| weight / total).collect()
    }

    /// Expected value, `Σ x^(1-γ) / Σ x^-γ` over the support.
    #[must_use]
    pub fn mean(&self) -> f64 {
        (self.min..=self.max)
            .zip(self.probabilities())
            .map(|(value, probability)| value as f64 * probability)
            .sum()
    }

    /// Cumulative distribution at every support value.
    #[must_use]
    pub fn cdf(&self) -> Vec<(usize, f64)> {
        let mut running = 0.0_f64;
        (self.min..=self.max)
            .zip(self.probabilities())
            .map(|(value, probability)| {
                running += probability;
                (value, running.min(1.0))
            })
            .collect()
    }
}

/// Rounds `value` up with probability equal to its fractional part.
///
/// The expectation of the result equals `value`. Negative inputs round to 0.
pub(crate) fn rand_round<R: Rng + ?Sized>(value: f64, rng: &mut R) -> usize {
    if value <= 0.0 {
        return 0;
    }
    let floor = value.floor();
    let fraction = value - floor;
    let base = floor as usize;
    if fraction > 0.0 && rng.sample::<f64, _>(Standard) < fraction {
        base + 1
    } else {
        base
    }
}

#[cfg(test)]
mod tests;
