use super::boundaries::ChainBoundaries;
use super::error::AnalysisError;
use crate::core::models::matrix::ErrorMatrix;
use crate::core::models::pair::PairDistribution;
use itertools::Itertools;
use std::collections::BTreeMap;
use tracing::trace;

/// Partitions the error matrix into one pooled distribution per unordered chain pair.
///
/// Every ordered block `(row chain, column chain)` is flattened row by row. A block with
/// `row <= column` opens the pair's distribution; the mirrored block is appended to the
/// same pair, so a cross pair holds both directions and a self pair its diagonal block.
/// Distributions are returned in non-decreasing `(first, second)` order.
///
/// # Errors
///
/// Returns [`AnalysisError::BoundaryMismatch`] unless the chain lengths sum to the
/// matrix dimension.
pub fn build_pair_distributions(
    matrix: &ErrorMatrix,
    boundaries: &ChainBoundaries,
) -> Result<Vec<PairDistribution>, AnalysisError> {
    boundaries.validate_against(matrix.dimension())?;

    let ranges = boundaries.ranges();
    let mut pooled: BTreeMap<(usize, usize), Vec<f64>> = BTreeMap::new();

    let blocks = ranges
        .iter()
        .enumerate()
        .cartesian_product(ranges.iter().enumerate());
    for ((row_chain, rows), (col_chain, cols)) in blocks {
        let key = (row_chain.min(col_chain), row_chain.max(col_chain));
        let values = pooled.entry(key).or_default();
        matrix.extend_with_block(rows.clone(), cols.clone(), values);
        trace!(row_chain, col_chain, pooled = values.len(), "Block pooled.");
    }

    Ok(pooled
        .into_iter()
        .map(|((first, second), values)| PairDistribution {
            first,
            second,
            values,
        })
        .collect())
}

/// Number of unordered pairs, self pairs included, for `chains` chains.
pub fn pair_count(chains: usize) -> usize {
    chains * (chains + 1) / 2
}

#[cfg(test)]
mod tests {
    use super::*;

    fn matrix_from_fn(n: usize, f: impl Fn(usize, usize) -> f64) -> ErrorMatrix {
        ErrorMatrix::from_rows(
            (0..n)
                .map(|i| (0..n).map(|j| f(i, j)).collect())
                .collect(),
        )
        .unwrap()
    }

    #[test]
    fn two_chain_layout_pools_both_off_diagonal_blocks() {
        let matrix = matrix_from_fn(5, |i, j| if i == j { 0.0 } else { 10.0 });
        let boundaries = ChainBoundaries::from_lengths(vec![2, 3]);
        let pairs = build_pair_distributions(&matrix, &boundaries).unwrap();

        assert_eq!(pairs.len(), 3);
        assert_eq!((pairs[0].first, pairs[0].second), (0, 0));
        assert_eq!(pairs[0].values, vec![0.0, 10.0, 10.0, 0.0]);
        assert_eq!((pairs[1].first, pairs[1].second), (0, 1));
        assert_eq!(pairs[1].values, vec![10.0; 12]);
        assert_eq!((pairs[2].first, pairs[2].second), (1, 1));
        assert_eq!(pairs[2].values.len(), 9);
    }

    #[test]
    fn cross_pair_keeps_forward_block_before_reverse_block() {
        // Deliberate modelling choice: both directions of an asymmetric matrix are pooled.
        let matrix = matrix_from_fn(3, |i, j| (i * 10 + j) as f64);
        let boundaries = ChainBoundaries::from_lengths(vec![1, 2]);
        let pairs = build_pair_distributions(&matrix, &boundaries).unwrap();
        let cross = &pairs[1];
        assert_eq!((cross.first, cross.second), (0, 1));
        assert_eq!(cross.values, vec![1.0, 2.0, 10.0, 20.0]);
    }

    #[test]
    fn distribution_sizes_follow_chain_lengths() {
        let lengths = vec![3, 1, 4, 2];
        let n: usize = lengths.iter().sum();
        let matrix = matrix_from_fn(n, |i, j| (i + j) as f64);
        let boundaries = ChainBoundaries::from_lengths(lengths.clone());
        let pairs = build_pair_distributions(&matrix, &boundaries).unwrap();

        assert_eq!(pairs.len(), pair_count(lengths.len()));
        for pair in &pairs {
            let expected = if pair.first == pair.second {
                lengths[pair.first] * lengths[pair.first]
            } else {
                2 * lengths[pair.first] * lengths[pair.second]
            };
            assert_eq!(pair.values.len(), expected, "pair {:?}", (pair.first, pair.second));
        }
        let covered: usize = pairs.iter().map(|p| p.values.len()).sum();
        assert_eq!(covered, n * n);
    }

    #[test]
    fn every_matrix_cell_lands_in_exactly_one_distribution() {
        let n = 6;
        let matrix = matrix_from_fn(n, |i, j| (i * n + j) as f64);
        let boundaries = ChainBoundaries::from_lengths(vec![2, 1, 3]);
        let pairs = build_pair_distributions(&matrix, &boundaries).unwrap();

        let mut seen: Vec<f64> = pairs.into_iter().flat_map(|p| p.values).collect();
        seen.sort_by(f64::total_cmp);
        let expected: Vec<f64> = (0..n * n).map(|v| v as f64).collect();
        assert_eq!(seen, expected);
    }

    #[test]
    fn pairs_are_enumerated_in_non_decreasing_order() {
        let matrix = matrix_from_fn(3, |_, _| 1.0);
        let boundaries = ChainBoundaries::from_lengths(vec![1, 1, 1]);
        let keys: Vec<_> = build_pair_distributions(&matrix, &boundaries)
            .unwrap()
            .iter()
            .map(|p| (p.first, p.second))
            .collect();
        assert_eq!(keys, vec![(0, 0), (0, 1), (0, 2), (1, 1), (1, 2), (2, 2)]);
    }

    #[test]
    fn mismatched_total_is_rejected_without_partial_output() {
        let matrix = matrix_from_fn(5, |_, _| 1.0);
        let boundaries = ChainBoundaries::from_lengths(vec![2, 2]);
        assert!(matches!(
            build_pair_distributions(&matrix, &boundaries),
            Err(AnalysisError::BoundaryMismatch {
                chain_total: 4,
                matrix_dimension: 5
            })
        ));
    }
}
