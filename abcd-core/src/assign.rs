//! Degree-to-vertex assignment and the community/background degree split.

use std::ops::Range;

use rand::{Rng, seq::SliceRandom};

use crate::{AbcdError, Result, sampling::rand_round, sequence::partition_vertices};

/// Per-vertex split of the total degree into community and background parts.
///
/// `community[v] + background[v]` is the total degree of `v`, and the
/// community degrees of every community sum to an even number.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DegreeSplit {
    community: Vec<usize>,
    background: Vec<usize>,
}

impl DegreeSplit {
    /// Community degree of every vertex.
    #[must_use]
    #[rustfmt::skip]
    pub fn community(&self) -> &[usize] { &self.community }

    /// Background degree of every vertex.
    #[must_use]
    #[rustfmt::skip]
    pub fn background(&self) -> &[usize] { &self.background }

    /// Number of vertices covered by the split.
    #[must_use]
    #[rustfmt::skip]
    pub fn len(&self) -> usize { self.community.len() }

    /// Returns `true` when no vertex is covered.
    #[must_use]
    #[rustfmt::skip]
    pub fn is_empty(&self) -> bool { self.community.is_empty() }

    /// Total degree of `vertex`.
    #[must_use]
    pub fn total(&self, vertex: usize) -> usize {
        self.community[vertex] + self.background[vertex]
    }

    /// Appends outlier vertices: their whole degree is background.
    pub fn append_outliers(&mut self, degrees: &[usize]) {
        self.community.extend(std::iter::repeat_n(0, degrees.len()));
        self.background.extend_from_slice(degrees);
    }

    #[cfg(test)]
    pub(crate) fn from_parts(community: Vec<usize>, background: Vec<usize>) -> Self {
        Self {
            community,
            background,
        }
    }

    pub(crate) fn into_parts(self) -> (Vec<usize>, Vec<usize>) {
        (self.community, self.background)
    }
}

/// Assigns a descending degree sequence to the vertices of contiguous
/// communities, steering large degrees into large communities.
///
/// Communities are unlocked from largest to smallest. Each time the degree
/// drops, every locked community whose size reaches
/// `d * (1 - xi * phi) + 1` is unlocked, where
/// `phi = 1 - Σ size² / n²`; the vertex for the degree is drawn uniformly from
/// the unlocked, still unassigned vertices. Once every community is unlocked
/// the remaining degrees are matched to the remaining vertices by a single
/// shuffle. If the pool empties while communities are still locked, the next
/// community is unlocked regardless of the threshold.
///
/// Returns the degree of each vertex, indexed by vertex id.
///
/// # Errors
/// Returns [`AbcdError::InvalidParameter`] when `xi` lies outside `[0, 1]` or
/// when the number of degrees differs from the total community size.
///
/// # Examples
/// ```
/// use abcd_core::assign_degrees;
/// use rand::{SeedableRng, rngs::SmallRng};
///
/// let mut rng = SmallRng::seed_from_u64(1);
/// let assigned = assign_degrees(&[6, 4, 3, 2, 2, 1], &[4, 2], 0.2, &mut rng)
///     .expect("sizes match degrees");
/// let mut sorted = assigned.clone();
/// sorted.sort_unstable_by(|a, b| b.cmp(a));
/// assert_eq!(sorted, vec![6, 4, 3, 2, 2, 1]);
/// ```
pub fn assign_degrees<R: Rng + ?Sized>(
    degrees: &[usize],
    sizes: &[usize],
    xi: f64,
    rng: &mut R,
) -> Result<Vec<usize>> {
    check_xi(xi)?;
    let vertices: usize = sizes.iter().sum();
    if degrees.len() != vertices {
        return Err(AbcdError::invalid(
            "degree sequence",
            format!(
                "{} degrees cannot be assigned to {vertices} community vertices",
                degrees.len()
            ),
        ));
    }
    if vertices == 0 {
        return Ok(Vec::new());
    }

    let blocks = partition_vertices(sizes);
    let mut order: Vec<usize> = (0..sizes.len()).collect();
    order.sort_by(|&left, &right| sizes[right].cmp(&sizes[left]));

    let n = vertices as f64;
    let squares: f64 = sizes.iter().map(|&size| (size as f64).powi(2)).sum();
    let phi = 1.0 - squares / (n * n);

    let mut assigned = vec![0; vertices];
    let mut pool: Vec<usize> = Vec::with_capacity(vertices);
    let mut lock = 0;
    let mut previous: Option<usize> = None;

    for (position, &degree) in degrees.iter().enumerate() {
        if lock < order.len() && previous.is_none_or(|last| degree < last) {
            let threshold = degree as f64 * (1.0 - xi * phi) + 1.0;
            while lock < order.len() && sizes[order[lock]] as f64 >= threshold {
                pool.extend(blocks[order[lock]].clone());
                lock += 1;
            }
        }
        previous = Some(degree);

        if lock == order.len() {
            pool.shuffle(rng);
            for (&vertex, &rest) in pool.iter().zip(&degrees[position..]) {
                assigned[vertex] = rest;
            }
            return Ok(assigned);
        }

        while pool.is_empty() && lock < order.len() {
            pool.extend(blocks[order[lock]].clone());
            lock += 1;
        }
        if pool.is_empty() {
            return Err(AbcdError::domain("available vertex pool exhausted"));
        }
        let vertex = pool.swap_remove(rng.gen_range(0..pool.len()));
        assigned[vertex] = degree;
    }
    Ok(assigned)
}

/// Splits every vertex's degree into community and background degrees.
///
/// The community degree is `rand_round((1 - xi) * degree)`. When a community's
/// community degrees sum to an odd number, its first vertex with the largest
/// community degree gains one, or loses one instead when that would exceed its
/// total degree.
///
/// `degrees` is indexed by vertex id and `blocks` must cover every vertex.
///
/// # Errors
/// Returns [`AbcdError::InvalidParameter`] when `xi` lies outside `[0, 1]` or
/// a block reaches past the end of `degrees`.
pub fn split_degrees<R: Rng + ?Sized>(
    degrees: &[usize],
    blocks: &[Range<usize>],
    xi: f64,
    rng: &mut R,
) -> Result<DegreeSplit> {
    check_xi(xi)?;
    if let Some(block) = blocks.iter().find(|block| block.end > degrees.len()) {
        return Err(AbcdError::invalid(
            "community partition",
            format!(
                "block {block:?} exceeds the {} available vertices",
                degrees.len()
            ),
        ));
    }

    let mut community: Vec<usize> = degrees
        .iter()
        .map(|&degree| rand_round((1.0 - xi) * degree as f64, rng).min(degree))
        .collect();

    for block in blocks {
        let members = &mut community[block.clone()];
        if members.iter().sum::<usize>() % 2 == 0 {
            continue;
        }
        let Some(offset) = first_argmax(members) else {
            continue;
        };
        let vertex = block.start + offset;
        if members[offset] < degrees[vertex] {
            members[offset] += 1;
        } else {
            // An odd sum forces a positive maximum, so this cannot underflow.
            members[offset] -= 1;
        }
    }

    let background = degrees
        .iter()
        .zip(&community)
        .map(|(&total, &inner)| total - inner)
        .collect();
    Ok(DegreeSplit {
        community,
        background,
    })
}

fn first_argmax(values: &[usize]) -> Option<usize> {
    let max = values.iter().copied().max()?;
    values.iter().position(|&value| value == max)
}

fn check_xi(xi: f64) -> Result<()> {
    if (0.0..=1.0).contains(&xi) {
        Ok(())
    } else {
        Err(AbcdError::invalid(
            "xi",
            format!("must lie in [0, 1] (got {xi})"),
        ))
    }
}
