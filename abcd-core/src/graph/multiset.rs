//! Edge multiset with multiplicities, shared by communities, the background
//! graph and the combined graph.

use indexmap::IndexMap;
use rand::Rng;

use super::Edge;

/// Self-loops and repeated edges produced when a multiset was first built.
///
/// Counts are frozen at construction; rewiring does not update them.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct ConstructionDiagnostics {
    loops: usize,
    multi_edges: usize,
}

impl ConstructionDiagnostics {
    /// Number of self-loop occurrences.
    #[must_use]
    #[rustfmt::skip]
    pub fn loops(&self) -> usize { self.loops }

    /// Number of occurrences that repeated an edge already present.
    #[must_use]
    #[rustfmt::skip]
    pub fn multi_edges(&self) -> usize { self.multi_edges }

    pub(crate) fn combine(self, other: Self) -> Self {
        Self {
            loops: self.loops + other.loops,
            multi_edges: self.multi_edges + other.multi_edges,
        }
    }
}

/// Mapping from [`Edge`] to its multiplicity.
///
/// Entries keep insertion order, so iteration and random edge selection are
/// reproducible under a fixed seed. Removing the last copy of an edge swaps
/// the final entry into its slot.
///
/// # Examples
/// ```
/// use abcd_core::{AdjacencyMultiset, Edge};
///
/// let multiset = AdjacencyMultiset::from_edges([
///     Edge::new(0, 1),
///     Edge::new(1, 0),
///     Edge::new(2, 2),
/// ]);
/// assert_eq!(multiset.edge_count(), 3);
/// assert_eq!(multiset.multiplicity(Edge::new(0, 1)), 2);
/// assert_eq!(multiset.bad_edges(), vec![Edge::new(0, 1), Edge::new(2, 2)]);
/// ```
#[derive(Clone, Debug, Default)]
pub struct AdjacencyMultiset {
    counts: IndexMap<Edge, usize>,
    edge_count: usize,
    diagnostics: ConstructionDiagnostics,
}

impl AdjacencyMultiset {
    /// Creates an empty multiset.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a multiset from sampled edges, recording loop and repeat counts.
    pub fn from_edges<I>(edges: I) -> Self
    where
        I: IntoIterator<Item = Edge>,
    {
        let mut multiset = Self::new();
        let mut diagnostics = ConstructionDiagnostics::default();
        for edge in edges {
            if edge.is_loop() {
                diagnostics.loops += 1;
            }
            if multiset.contains(edge) {
                diagnostics.multi_edges += 1;
            }
            multiset.insert(edge);
        }
        multiset.diagnostics = diagnostics;
        multiset
    }

    /// Adds one copy of `edge`.
    pub fn insert(&mut self, edge: Edge) {
        *self.counts.entry(edge).or_insert(0) += 1;
        self.edge_count += 1;
    }

    /// Removes one copy of `edge`, returning `false` when it was absent.
    pub fn remove_one(&mut self, edge: Edge) -> bool {
        let Some(count) = self.counts.get_mut(&edge) else {
            return false;
        };
        *count -= 1;
        if *count == 0 {
            self.counts.swap_remove(&edge);
        }
        self.edge_count -= 1;
        true
    }

    /// Multiplicity of `edge`, zero when absent.
    #[must_use]
    pub fn multiplicity(&self, edge: Edge) -> usize {
        self.counts.get(&edge).copied().unwrap_or(0)
    }

    /// Returns `true` when at least one copy of `edge` is present.
    #[must_use]
    pub fn contains(&self, edge: Edge) -> bool {
        self.counts.contains_key(&edge)
    }

    /// Number of distinct edges.
    #[must_use]
    #[rustfmt::skip]
    pub fn distinct_len(&self) -> usize { self.counts.len() }

    /// Number of edges counted with multiplicity.
    #[must_use]
    #[rustfmt::skip]
    pub fn edge_count(&self) -> usize { self.edge_count }

    /// Returns `true` when the multiset holds no edges.
    #[must_use]
    #[rustfmt::skip]
    pub fn is_empty(&self) -> bool { self.counts.is_empty() }

    /// Loop and repeat counts recorded by [`Self::from_edges`].
    #[must_use]
    #[rustfmt::skip]
    pub fn diagnostics(&self) -> ConstructionDiagnostics { self.diagnostics }

    /// Distinct edges that are self-loops or have multiplicity above one.
    #[must_use]
    pub fn bad_edges(&self) -> Vec<Edge> {
        self.counts
            .iter()
            .filter(|(edge, count)| edge.is_loop() || **count > 1)
            .map(|(edge, _)| *edge)
            .collect()
    }

    /// Number of distinct bad edges.
    #[must_use]
    pub fn bad_edge_count(&self) -> usize {
        self.counts
            .iter()
            .filter(|(edge, count)| edge.is_loop() || **count > 1)
            .count()
    }

    /// Returns `true` when there are no self-loops and no repeated edges.
    #[must_use]
    pub fn is_simple(&self) -> bool {
        self.bad_edge_count() == 0
    }

    /// Distinct edges with their multiplicities, in storage order.
    pub fn iter(&self) -> impl Iterator<Item = (Edge, usize)> + '_ {
        self.counts.iter().map(|(edge, count)| (*edge, *count))
    }

    /// Every edge repeated by its multiplicity.
    pub fn iter_with_multiplicity(&self) -> impl Iterator<Item = Edge> + '_ {
        self.counts
            .iter()
            .flat_map(|(edge, count)| std::iter::repeat_n(*edge, *count))
    }

    /// Adds every copy held by `other`, accumulating its diagnostics.
    pub fn merge(&mut self, other: &Self) {
        for (edge, count) in other.iter() {
            *self.counts.entry(edge).or_insert(0) += count;
            self.edge_count += count;
        }
        self.diagnostics = self.diagnostics.combine(other.diagnostics);
    }

    /// Degree of every vertex in `[0, vertex_count)`; a self-loop adds two.
    ///
    /// Endpoints outside the range are ignored.
    #[must_use]
    pub fn degrees(&self, vertex_count: usize) -> Vec<usize> {
        let mut degrees = vec![0; vertex_count];
        for (edge, count) in self.iter() {
            for vertex in [edge.low(), edge.high()] {
                if let Some(degree) = degrees.get_mut(vertex) {
                    *degree += count;
                }
            }
        }
        degrees
    }

    /// Draws a distinct edge other than `edge`, uniformly over distinct edges.
    ///
    /// Returns `None` when no such edge exists.
    pub fn random_other_edge<R: Rng + ?Sized>(&self, edge: Edge, rng: &mut R) -> Option<Edge> {
        let len = self.counts.len();
        let others = len - usize::from(self.contains(edge));
        if others == 0 {
            return None;
        }
        loop {
            let (candidate, _) = self.counts.get_index(rng.gen_range(0..len))?;
            if *candidate != edge {
                return Some(*candidate);
            }
        }
    }

    /// Replaces one copy each of `edge` and `other` by
    /// `(edge.low, other.low)` and `(edge.high, other.high)`.
    ///
    /// Every endpoint keeps its degree. Returns `false` without changes when
    /// either edge is absent.
    pub(crate) fn swap_endpoints(&mut self, edge: Edge, other: Edge) -> bool {
        if edge == other {
            if self.multiplicity(edge) < 2 {
                return false;
            }
        } else if !self.contains(edge) || !self.contains(other) {
            return false;
        }
        self.remove_one(edge);
        self.remove_one(other);
        self.insert(Edge::new(edge.low(), other.low()));
        self.insert(Edge::new(edge.high(), other.high()));
        true
    }

    /// Removes up to `copies` copies of `edge`, returning how many went.
    pub(crate) fn remove_copies(&mut self, edge: Edge, copies: usize) -> usize {
        let mut removed = 0;
        while removed < copies && self.remove_one(edge) {
            removed += 1;
        }
        removed
    }
}

impl FromIterator<Edge> for AdjacencyMultiset {
    fn from_iter<I: IntoIterator<Item = Edge>>(iter: I) -> Self {
        Self::from_edges(iter)
    }
}
