//! Degree sequences, community sizes and contiguous vertex partitions.

use std::ops::Range;

use rand::Rng;

use crate::{AbcdError, Result, sampling::PowerLaw};

/// Samples `count` degrees from a truncated power law, sorted descending.
///
/// When the sum is odd the largest degree is incremented, so a single value
/// may equal `max_degree + 1`.
///
/// # Errors
/// Returns [`AbcdError::InvalidRange`] when `min_degree > max_degree` and
/// [`AbcdError::InvalidParameter`] when `min_degree` is zero or `gamma` is not
/// positive.
///
/// # Examples
/// ```
/// use abcd_core::build_degrees;
/// use rand::{SeedableRng, rngs::SmallRng};
///
/// let mut rng = SmallRng::seed_from_u64(3);
/// let degrees = build_degrees(100, 2.5, 5, 30, &mut rng).expect("bounds are valid");
/// assert_eq!(degrees.len(), 100);
/// assert_eq!(degrees.iter().sum::<usize>() % 2, 0);
/// ```
pub fn build_degrees<R: Rng + ?Sized>(
    count: usize,
    gamma: f64,
    min_degree: usize,
    max_degree: usize,
    rng: &mut R,
) -> Result<Vec<usize>> {
    if min_degree > max_degree {
        return Err(AbcdError::InvalidRange {
            parameter: "degree",
            min: min_degree,
            max: max_degree,
        });
    }
    if min_degree == 0 {
        return Err(AbcdError::invalid("min_degree", "must be at least 1"));
    }
    let law = PowerLaw::new(min_degree, max_degree, gamma)?;
    let mut degrees = law.sample_n(count, rng);
    degrees.sort_unstable_by(|left, right| right.cmp(left));
    if degrees.iter().sum::<usize>() % 2 == 1 {
        if let Some(largest) = degrees.first_mut() {
            *largest += 1;
        }
    }
    Ok(degrees)
}

/// Samples community sizes in `[min_size, max_size]` summing exactly to
/// `vertices`, sorted descending.
///
/// Draws up to `ceil(vertices / min_size)` sizes and accepts them until the
/// running sum reaches `vertices`. The overshoot is absorbed by the last
/// accepted size when it can stay at or above `min_size`; otherwise that size
/// is dropped and its surplus over the overshoot is spread over the remaining
/// sizes in +1 steps, never pushing a size past `max_size`.
///
/// # Errors
/// Returns [`AbcdError::InvalidRange`] when `min_size > max_size`,
/// [`AbcdError::InvalidParameter`] when `min_size` is zero or `beta` is not
/// positive, and [`AbcdError::Infeasible`] when no partition within the
/// bounds exists.
///
/// # Examples
/// ```
/// use abcd_core::build_community_sizes;
/// use rand::{SeedableRng, rngs::SmallRng};
///
/// let mut rng = SmallRng::seed_from_u64(3);
/// let sizes = build_community_sizes(1000, 1.5, 20, 250, &mut rng).expect("bounds are valid");
/// assert_eq!(sizes.iter().sum::<usize>(), 1000);
/// ```
pub fn build_community_sizes<R: Rng + ?Sized>(
    vertices: usize,
    beta: f64,
    min_size: usize,
    max_size: usize,
    rng: &mut R,
) -> Result<Vec<usize>> {
    if min_size > max_size {
        return Err(AbcdError::InvalidRange {
            parameter: "community size",
            min: min_size,
            max: max_size,
        });
    }
    if min_size == 0 {
        return Err(AbcdError::invalid("min_community_size", "must be at least 1"));
    }
    let law = PowerLaw::new(min_size, max_size, beta)?;
    if vertices == 0 {
        return Ok(Vec::new());
    }
    if vertices < min_size {
        return Err(AbcdError::infeasible(format!(
            "{vertices} vertices cannot form a community of at least {min_size}"
        )));
    }

    let draws = vertices.div_ceil(min_size);
    let mut sizes = Vec::with_capacity(draws);
    let mut total = 0_usize;
    for size in law.sample_n(draws, rng) {
        if total >= vertices {
            break;
        }
        total += size;
        sizes.push(size);
    }

    let excess = total - vertices;
    if excess > 0 {
        absorb_excess(&mut sizes, excess, min_size, max_size)?;
    }
    sizes.sort_unstable_by(|left, right| right.cmp(left));
    Ok(sizes)
}

fn absorb_excess(
    sizes: &mut Vec<usize>,
    excess: usize,
    min_size: usize,
    max_size: usize,
) -> Result<()> {
    let Some(last) = sizes.last_mut() else {
        return Err(AbcdError::infeasible("no community sizes were drawn"));
    };
    if *last >= excess + min_size {
        *last -= excess;
        return Ok(());
    }

    let removed = *last;
    sizes.pop();
    let deficit = removed - excess;
    let capacity: usize = sizes.iter().map(|size| max_size - size).sum();
    if capacity < deficit {
        return Err(AbcdError::infeasible(format!(
            "{deficit} vertices cannot be redistributed without exceeding max_community_size {max_size}"
        )));
    }

    let mut remaining = deficit;
    while remaining > 0 {
        for size in sizes.iter_mut() {
            if remaining == 0 {
                break;
            }
            if *size < max_size {
                *size += 1;
                remaining -= 1;
            }
        }
    }
    Ok(())
}

/// Maps community sizes to contiguous vertex-id blocks, in input order.
///
/// # Examples
/// ```
/// use abcd_core::partition_vertices;
///
/// let blocks = partition_vertices(&[3, 2]);
/// assert_eq!(blocks, vec![0..3, 3..5]);
/// ```
#[must_use]
pub fn partition_vertices(sizes: &[usize]) -> Vec<Range<usize>> {
    let mut start = 0;
    sizes
        .iter()
        .map(|&size| {
            let block = start..start + size;
            start += size;
            block
        })
        .collect()
}
