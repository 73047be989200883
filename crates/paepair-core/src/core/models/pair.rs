use serde::Serialize;
use std::fmt;

/// Pooled error values of one unordered chain pair `{first, second}`, `first <= second`.
///
/// For a self pair this is the chain's own diagonal block. For a cross pair it is the
/// block aligned on `first` and scored on `second`, followed by the block aligned on
/// `second` and scored on `first`: both directions are treated as samples of one
/// relationship rather than kept apart or averaged.
#[derive(Debug, Clone, PartialEq)]
pub struct PairDistribution {
    pub first: usize,
    pub second: usize,
    pub values: Vec<f64>,
}

impl PairDistribution {
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// Summary statistics of a [`PairDistribution`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PairStats {
    pub min: f64,
    pub median: f64,
    pub mean: f64,
    pub std_dev: f64, // Population standard deviation
    pub signal: f64,  // Scale minus the smallest error
    pub spread: f64,  // Coefficient of variation, `std_dev / mean`
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum PairKind {
    #[serde(rename = "self")]
    SelfPair,
    #[serde(rename = "homodimer")]
    Homodimer,
    #[serde(rename = "intermolecular")]
    Intermolecular,
}

impl fmt::Display for PairKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}",
            match self {
                PairKind::SelfPair => "self",
                PairKind::Homodimer => "homodimer",
                PairKind::Intermolecular => "intermolecular",
            }
        )
    }
}

/// One finished output row: a chain pair of one prediction.
#[derive(Debug, Clone, PartialEq)]
pub struct PairRecord {
    pub prediction_id: String,
    pub alignment_confidence: f64, // Global pTM of the prediction
    pub interface_confidence: f64, // Global ipTM of the prediction
    pub first_chain: usize,        // Chain index in structure-file order
    pub second_chain: usize,
    pub stats: PairStats,
    pub interacting: bool,
    pub first_label: String,
    pub second_label: String,
    pub kind: PairKind,
}

impl PairRecord {
    pub fn signal(&self) -> f64 {
        self.stats.signal
    }

    pub fn spread(&self) -> f64 {
        self.stats.spread
    }

    /// The interaction call as written in reports.
    pub fn interaction_call(&self) -> &'static str {
        if self.interacting { "Yes" } else { "No" }
    }
}
