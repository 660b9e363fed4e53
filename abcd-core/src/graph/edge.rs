//! Canonical undirected edges.

use std::fmt;

/// Undirected edge between two vertex ids, stored with `low <= high`.
///
/// # Examples
/// ```
/// use abcd_core::Edge;
///
/// assert_eq!(Edge::new(7, 2), Edge::new(2, 7));
/// assert!(Edge::new(4, 4).is_loop());
/// ```
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct Edge {
    low: usize,
    high: usize,
}

impl Edge {
    /// Builds the canonical edge joining `a` and `b`.
    #[must_use]
    pub const fn new(a: usize, b: usize) -> Self {
        if a <= b {
            Self { low: a, high: b }
        } else {
            Self { low: b, high: a }
        }
    }

    /// Smaller endpoint.
    #[must_use]
    #[rustfmt::skip]
    pub const fn low(&self) -> usize { self.low }

    /// Larger endpoint.
    #[must_use]
    #[rustfmt::skip]
    pub const fn high(&self) -> usize { self.high }

    /// Both endpoints as a tuple.
    #[must_use]
    #[rustfmt::skip]
    pub const fn endpoints(&self) -> (usize, usize) { (self.low, self.high) }

    /// Returns `true` for a self-loop.
    #[must_use]
    #[rustfmt::skip]
    pub const fn is_loop(&self) -> bool { self.low == self.high }
}

impl From<(usize, usize)> for Edge {
    fn from((a, b): (usize, usize)) -> Self {
        Self::new(a, b)
    }
}

impl fmt::Display for Edge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.low, self.high)
    }
}
