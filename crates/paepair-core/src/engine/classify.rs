use super::config::InteractionThresholds;
use crate::core::models::pair::{PairKind, PairRecord, PairStats};

/// Prediction-wide values repeated on every row of that prediction.
#[derive(Debug, Clone, Copy)]
pub struct PredictionHeader<'a> {
    pub id: &'a str,
    pub alignment_confidence: f64,
    pub interface_confidence: f64,
}

pub fn pair_kind(first: usize, second: usize, first_label: &str, second_label: &str) -> PairKind {
    if first == second {
        PairKind::SelfPair
    } else if first_label == second_label {
        PairKind::Homodimer
    } else {
        PairKind::Intermolecular
    }
}

/// Values exactly on a threshold are not interacting.
pub fn is_interacting(stats: &PairStats, thresholds: &InteractionThresholds) -> bool {
    stats.signal > thresholds.signal && stats.spread > thresholds.spread
}

pub fn classify(
    header: &PredictionHeader,
    (first, second): (usize, usize),
    stats: PairStats,
    labels: (&str, &str),
    thresholds: &InteractionThresholds,
) -> PairRecord {
    PairRecord {
        prediction_id: header.id.to_string(),
        alignment_confidence: header.alignment_confidence,
        interface_confidence: header.interface_confidence,
        first_chain: first,
        second_chain: second,
        interacting: is_interacting(&stats, thresholds),
        stats,
        first_label: labels.0.to_string(),
        second_label: labels.1.to_string(),
        kind: pair_kind(first, second, labels.0, labels.1),
    }
}
