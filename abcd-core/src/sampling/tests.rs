//! Unit tests for power-law sampling and stochastic rounding.

use rand::{SeedableRng, rngs::SmallRng};
use rstest::rstest;

use super::{PowerLaw, rand_round};
use crate::{AbcdError, AbcdErrorCode};

#[test]
fn rejects_inverted_range() {
    let err = PowerLaw::new(10, 3, 2.5).expect_err("inverted range must fail");
    assert_eq!(
        err,
        AbcdError::InvalidRange {
            parameter: "power-law support",
            min: 10,
            max: 3,
        }
    );
}

#[rstest]
#[case(0.0)]
#[case(-1.5)]
#[case(f64::NAN)]
#[case(f64::INFINITY)]
fn rejects_non_positive_exponents(#[case] exponent: f64) {
    let err = PowerLaw::new(1, 10, exponent).expect_err("exponent must be rejected");
    assert_eq!(err.code(), AbcdErrorCode::InvalidParameter);
}

#[test]
fn rejects_zero_lower_bound() {
    let err = PowerLaw::new(0, 10, 2.0).expect_err("zero support must fail");
    assert_eq!(err.code(), AbcdErrorCode::InvalidParameter);
}

#[test]
fn single_point_support_always_returns_that_point() {
    let law = PowerLaw::new(7, 7, 2.5).expect("valid support");
    let mut rng = SmallRng::seed_from_u64(1);
    assert!(law.sample_n(50, &mut rng).iter().all(|&value| value == 7));
    assert_eq!(law.probabilities(), vec![1.0]);
}

#[rstest]
#[case(1, 10, 2.5)]
#[case(20, 250, 1.5)]
#[case(1, 1_000_000, 3.0)]
#[case(1_000, 1_000_000, 80.0)]
fn probabilities_are_normalised_and_decreasing(
    #[case] min: usize,
    #[case] max: usize,
    #[case] exponent: f64,
) {
    let law = PowerLaw::new(min, max, exponent).expect("valid support");
    let probabilities = law.probabilities();
    assert_eq!(probabilities.len(), max - min + 1);
    let total: f64 = probabilities.iter().sum();
    assert!((total - 1.0).abs() < 1e-9, "total = {total}");
    assert!(probabilities.windows(2).all(|pair| pair[0] >= pair[1]));
}

#[test]
fn samples_stay_within_support_and_favour_small_values() {
    let law = PowerLaw::new(5, 30, 2.5).expect("valid support");
    let mut rng = SmallRng::seed_from_u64(11);
    let draws = law.sample_n(5_000, &mut rng);
    assert!(draws.iter().all(|value| (5..=30).contains(value)));
    let small = draws.iter().filter(|&&value| value <= 10).count();
    let large = draws.iter().filter(|&&value| value >= 25).count();
    assert!(small > large * 5, "small={small} large={large}");
}

#[test]
fn mean_matches_closed_form() {
    let law = PowerLaw::new(5, 30, 2.5).expect("valid support");
    let top: f64 = (5..=30).map(|k| f64::from(k).powf(-1.5)).sum();
    let bottom: f64 = (5..=30).map(|k| f64::from(k).powf(-2.5)).sum();
    assert!((law.mean() - top / bottom).abs() < 1e-9);
}

#[test]
fn cdf_ends_at_one() {
    let law = PowerLaw::new(20, 250, 1.5).expect("valid support");
    let cdf = law.cdf();
    assert_eq!(cdf.first().map(|(value, _)| *value), Some(20));
    let (last_value, last_mass) = cdf.last().copied().expect("non-empty cdf");
    assert_eq!(last_value, 250);
    assert!((last_mass - 1.0).abs() < 1e-9);
}

#[rstest]
#[case(0.0, 0)]
#[case(-2.0, 0)]
#[case(3.0, 3)]
#[case(12.0, 12)]
fn rand_round_keeps_integers(#[case] value: f64, #[case] expected: usize) {
    let mut rng = SmallRng::seed_from_u64(5);
    for _ in 0..32 {
        assert_eq!(rand_round(value, &mut rng), expected);
    }
}

#[test]
fn rand_round_preserves_expectation() {
    let mut rng = SmallRng::seed_from_u64(17);
    let trials: u32 = 20_000;
    let total: usize = (0..trials).map(|_| rand_round(2.25, &mut rng)).sum();
    let mean = total as f64 / f64::from(trials);
    assert!((mean - 2.25).abs() < 0.03, "mean = {mean}");
}
