//! Expected-versus-actual statistics and the cross-community mixing matrix.

use std::time::Duration;

use crate::{AbcdError, AbcdGraph, Result, sampling::PowerLaw};

/// Normalised actual/expected edge counts between communities.
///
/// Rows and columns follow community ids, so the outlier pseudo-community,
/// when present, occupies the last index.
#[derive(Clone, Debug, PartialEq)]
pub struct XiMatrix {
    size: usize,
    values: Vec<f64>,
}

impl XiMatrix {
    fn zeros(size: usize) -> Self {
        Self {
            size,
            values: vec![0.0; size * size],
        }
    }

    /// Number of rows (and columns).
    #[must_use]
    #[rustfmt::skip]
    pub fn len(&self) -> usize { self.size }

    /// Returns `true` for a matrix without communities.
    #[must_use]
    #[rustfmt::skip]
    pub fn is_empty(&self) -> bool { self.size == 0 }

    /// Entry at `(row, column)`, or `None` when out of range.
    #[must_use]
    pub fn get(&self, row: usize, column: usize) -> Option<f64> {
        if row >= self.size || column >= self.size {
            return None;
        }
        self.values.get(row * self.size + column).copied()
    }

    /// Iterates over the rows.
    pub fn rows(&self) -> impl Iterator<Item = &[f64]> + '_ {
        self.values.chunks(self.size.max(1)).take(self.size)
    }

    fn set(&mut self, row: usize, column: usize, value: f64) {
        self.values[row * self.size + column] = value;
    }

    fn add(&mut self, row: usize, column: usize, value: f64) {
        self.values[row * self.size + column] += value;
    }
}

/// Summary of one generation run.
#[derive(Clone, Debug, PartialEq)]
#[non_exhaustive]
pub struct BuildStatistics {
    /// Name of the multigraph model.
    pub model_name: String,
    /// Number of vertices, outliers included.
    pub vcount: usize,
    /// Number of edges, counted with multiplicity.
    pub edge_count: usize,
    /// Number of communities, outliers excluded.
    pub num_communities: usize,
    /// Power-law mean degree; `None` for an explicit degree sequence.
    pub expected_average_degree: Option<f64>,
    /// Realised mean degree.
    pub actual_average_degree: f64,
    /// Power-law mean community size; `None` for explicit sizes.
    pub expected_average_community_size: Option<f64>,
    /// Realised mean community size, outliers excluded.
    pub actual_average_community_size: f64,
    /// Self-loops produced while sampling.
    pub num_loops: usize,
    /// Repeated edges produced while sampling.
    pub num_multi_edges: usize,
    /// Share of edges that do not stay inside a community.
    pub empirical_xi: f64,
    /// Edges moved from communities to the background.
    pub edges_pushed: usize,
    /// Whole-graph rewiring passes.
    pub rewire_passes: usize,
    /// Whether the final graph is simple.
    pub is_proper: bool,
    /// Wall time spent generating.
    pub build_time: Duration,
}

impl AbcdGraph {
    /// Cumulative share of vertices by total degree, over realised degrees.
    #[must_use]
    pub fn actual_degree_cdf(&self) -> Vec<(usize, f64)> {
        let degrees: Vec<usize> = self
            .community_degrees()
            .iter()
            .zip(self.background_degrees())
            .map(|(inner, outer)| inner + outer)
            .collect();
        empirical_cdf(degrees)
    }

    /// Power-law degree CDF over `[min_degree, max_degree]`.
    ///
    /// # Errors
    /// Returns [`AbcdError::Domain`] when an explicit degree sequence was used.
    pub fn expected_degree_cdf(&self) -> Result<Vec<(usize, f64)>> {
        Ok(self.degree_law()?.cdf())
    }

    /// Cumulative share of communities by size, outliers excluded.
    #[must_use]
    pub fn actual_community_cdf(&self) -> Vec<(usize, f64)> {
        empirical_cdf(self.regular_communities().map(|community| community.len()).collect())
    }

    /// Power-law community-size CDF over the size bounds.
    ///
    /// # Errors
    /// Returns [`AbcdError::Domain`] when explicit community sizes were used.
    pub fn expected_community_cdf(&self) -> Result<Vec<(usize, f64)>> {
        Ok(self.community_size_law()?.cdf())
    }

    /// Mean total degree over all vertices.
    #[must_use]
    pub fn actual_average_degree(&self) -> f64 {
        let volume: usize = self.community_degrees().iter().sum::<usize>()
            + self.background_degrees().iter().sum::<usize>();
        ratio(volume, self.vcount())
    }

    /// Mean of the degree power law.
    ///
    /// # Errors
    /// Returns [`AbcdError::Domain`] when an explicit degree sequence was used.
    pub fn expected_average_degree(&self) -> Result<f64> {
        Ok(self.degree_law()?.mean())
    }

    /// Mean community size, outliers excluded.
    #[must_use]
    pub fn actual_average_community_size(&self) -> f64 {
        let sizes: usize = self.regular_communities().map(|community| community.len()).sum();
        ratio(sizes, self.num_communities())
    }

    /// Mean of the community-size power law.
    ///
    /// # Errors
    /// Returns [`AbcdError::Domain`] when explicit community sizes were used.
    pub fn expected_average_community_size(&self) -> Result<f64> {
        Ok(self.community_size_law()?.mean())
    }

    /// Self-loops produced by the model across communities and background.
    #[must_use]
    pub fn num_loops(&self) -> usize {
        self.communities()
            .iter()
            .map(|community| community.diagnostics().loops())
            .sum::<usize>()
            + self.background_diagnostics().loops()
    }

    /// Repeated edges produced by the model across communities and
    /// background.
    #[must_use]
    pub fn num_multi_edges(&self) -> usize {
        self.communities()
            .iter()
            .map(|community| community.diagnostics().multi_edges())
            .sum::<usize>()
            + self.background_diagnostics().multi_edges()
    }

    /// `1 - community_edges / total_edges`, where community edges are those
    /// realised by the community graphs. Zero for an edgeless graph.
    #[must_use]
    pub fn empirical_xi(&self) -> f64 {
        let total = self.edge_count();
        if total == 0 {
            return 0.0;
        }
        let internal: usize = self.communities().iter().map(|c| c.edge_count()).sum();
        1.0 - internal as f64 / total as f64
    }

    /// Cross-community mixing matrix.
    ///
    /// Off-diagonal entries, and the outlier diagonal, divide the observed
    /// number of distinct edges between two communities by
    /// `vol_i * vol_j / (total_background_volume - 1)`, where `vol` is a
    /// community's background volume. Regular diagonal entries are
    /// `(1 - empirical_xi_i) / (1 - xi)`. An entry with zero expectation is
    /// `0.0` when nothing was observed and infinite otherwise.
    ///
    /// # Errors
    /// Returns [`AbcdError::Domain`] when `xi` is 0 or 1.
    pub fn xi_matrix(&self) -> Result<XiMatrix> {
        let xi = self.params().xi();
        if xi <= 0.0 {
            return Err(AbcdError::domain("xi matrix requires xi > 0"));
        }
        if xi >= 1.0 {
            return Err(AbcdError::domain("xi matrix requires xi < 1"));
        }

        let communities = self.communities();
        let size = communities.len();
        let membership = self.membership_list();

        let mut actual = XiMatrix::zeros(size);
        for (edge, _) in self.adjacency().iter() {
            let left = membership[edge.low()].get();
            let right = membership[edge.high()].get();
            actual.add(left, right, 1.0);
            actual.add(right, left, 1.0);
        }

        let volumes: Vec<f64> = communities
            .iter()
            .map(|community| community.background_volume() as f64)
            .collect();
        let bottom = self.background_degrees().iter().sum::<usize>() as f64 - 1.0;

        let mut normalised = XiMatrix::zeros(size);
        for (i, community) in communities.iter().enumerate() {
            for j in 0..size {
                let value = if i == j && !community.is_outlier() {
                    (1.0 - community.empirical_xi()) / (1.0 - xi)
                } else {
                    let expected = if bottom > 0.0 {
                        volumes[i] * volumes[j] / bottom
                    } else {
                        0.0
                    };
                    observed_over_expected(actual.values[i * size + j], expected)
                };
                normalised.set(i, j, value);
            }
        }
        Ok(normalised)
    }

    /// Collects the run summary.
    #[must_use]
    pub fn statistics(&self) -> BuildStatistics {
        BuildStatistics {
            model_name: self.model_name().to_owned(),
            vcount: self.vcount(),
            edge_count: self.edge_count(),
            num_communities: self.num_communities(),
            expected_average_degree: self.expected_average_degree().ok(),
            actual_average_degree: self.actual_average_degree(),
            expected_average_community_size: self.expected_average_community_size().ok(),
            actual_average_community_size: self.actual_average_community_size(),
            num_loops: self.num_loops(),
            num_multi_edges: self.num_multi_edges(),
            empirical_xi: self.empirical_xi(),
            edges_pushed: self.edges_pushed(),
            rewire_passes: self.rewiring().passes(),
            is_proper: self.is_proper_abcd(),
            build_time: self.build_time(),
        }
    }

    fn regular_communities(&self) -> impl Iterator<Item = &crate::Community> + '_ {
        self.communities()
            .iter()
            .filter(|community| !community.is_outlier())
    }

    fn degree_law(&self) -> Result<PowerLaw> {
        let params = self.params();
        if params.degree_sequence().is_some() {
            return Err(AbcdError::domain(
                "expected degree statistics are undefined for an explicit degree sequence",
            ));
        }
        PowerLaw::new(params.min_degree(), params.max_degree(), params.gamma())
    }

    fn community_size_law(&self) -> Result<PowerLaw> {
        let params = self.params();
        if params.community_sizes().is_some() {
            return Err(AbcdError::domain(
                "expected community-size statistics are undefined for explicit community sizes",
            ));
        }
        PowerLaw::new(
            params.min_community_size(),
            params.max_community_size(),
            params.beta(),
        )
    }
}

fn empirical_cdf(mut values: Vec<usize>) -> Vec<(usize, f64)> {
    let total = values.len();
    values.sort_unstable();
    let mut cdf: Vec<(usize, f64)> = Vec::new();
    for (position, value) in values.iter().enumerate() {
        let share = (position + 1) as f64 / total as f64;
        match cdf.last_mut() {
            Some((last, mass)) if last == value => *mass = share,
            _ => cdf.push((*value, share)),
        }
    }
    cdf
}

fn ratio(numerator: usize, denominator: usize) -> f64 {
    if denominator == 0 {
        0.0
    } else {
        numerator as f64 / denominator as f64
    }
}

fn observed_over_expected(observed: f64, expected: f64) -> f64 {
    if expected > 0.0 {
        observed / expected
    } else if observed == 0.0 {
        0.0
    } else {
        f64::INFINITY
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case(vec![3, 1, 2, 2], vec![(1, 0.25), (2, 0.75), (3, 1.0)])]
    #[case(vec![5], vec![(5, 1.0)])]
    #[case(vec![], vec![])]
    fn empirical_cdf_steps_over_distinct_values(
        #[case] values: Vec<usize>,
        #[case] expected: Vec<(usize, f64)>,
    ) {
        let cdf = empirical_cdf(values);
        assert_eq!(cdf.len(), expected.len());
        for ((value, mass), (want_value, want_mass)) in cdf.into_iter().zip(expected) {
            assert_eq!(value, want_value);
            assert!((mass - want_mass).abs() < 1e-12);
        }
    }

    #[rstest]
    #[case(4.0, 2.0, 2.0)]
    #[case(0.0, 0.0, 0.0)]
    #[case(3.0, 0.0, f64::INFINITY)]
    fn zero_expectations_are_handled(
        #[case] observed: f64,
        #[case] expected: f64,
        #[case] want: f64,
    ) {
        assert_eq!(observed_over_expected(observed, expected), want);
    }

    #[test]
    fn xi_matrix_accessors_respect_bounds() {
        let mut matrix = XiMatrix::zeros(2);
        matrix.set(1, 0, 0.5);
        assert_eq!(matrix.get(1, 0), Some(0.5));
        assert_eq!(matrix.get(2, 0), None);
        assert_eq!(matrix.rows().count(), 2);
        assert!(XiMatrix::zeros(0).is_empty());
        assert_eq!(XiMatrix::zeros(0).rows().count(), 0);
    }
}
