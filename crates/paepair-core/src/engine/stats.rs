use super::error::AnalysisError;
use crate::core::models::pair::{PairDistribution, PairStats};

/// Computes the summary statistics of one pair distribution.
///
/// All statistics are computed over the sorted values, so the result does not depend
/// on the order in which the distribution was assembled. `signal` is `signal_scale`
/// minus the smallest error; `spread` is the population standard deviation over the mean.
///
/// # Errors
///
/// Returns [`AnalysisError::DegenerateDistribution`] for an empty distribution or one
/// whose mean is exactly zero.
pub fn summarize(
    distribution: &PairDistribution,
    signal_scale: f64,
) -> Result<PairStats, AnalysisError> {
    let degenerate = |reason| AnalysisError::DegenerateDistribution {
        first: distribution.first,
        second: distribution.second,
        reason,
    };

    if distribution.is_empty() {
        return Err(degenerate("distribution is empty"));
    }

    let mut sorted = distribution.values.clone();
    sorted.sort_by(f64::total_cmp);

    let count = sorted.len() as f64;
    let min = sorted[0];
    let median = median_of_sorted(&sorted);
    let mean = sorted.iter().sum::<f64>() / count;
    if mean == 0.0 {
        return Err(degenerate("mean is zero"));
    }
    let variance = sorted.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / count;
    let std_dev = variance.sqrt();

    Ok(PairStats {
        min,
        median,
        mean,
        std_dev,
        signal: signal_scale - min,
        spread: std_dev / mean,
    })
}

fn median_of_sorted(sorted: &[f64]) -> f64 {
    let mid = sorted.len() / 2;
    if sorted.len() % 2 == 0 {
        (sorted[mid - 1] + sorted[mid]) / 2.0
    } else {
        sorted[mid]
    }
}
