use crate::core::io::pdb::PdbFile;
use crate::core::io::scores::{PredictionScores, ScoresFile};
use crate::core::io::traits::InputFile;
use crate::core::models::chain::ChainSet;
use crate::core::models::pair::PairRecord;
use crate::engine::blocks::build_pair_distributions;
use crate::engine::boundaries::ChainBoundaries;
use crate::engine::classify::{PredictionHeader, classify};
use crate::engine::config::AnalysisConfig;
use crate::engine::error::AnalysisError;
use crate::engine::labels::chain_labels;
use crate::engine::stats::summarize;
use std::path::PathBuf;
use tracing::{debug, instrument, warn};

/// One prediction as resolved by file matching.
#[derive(Debug, Clone, PartialEq)]
pub struct PredictionInput {
    pub id: String,                      // Identifier written on every row
    pub name: String,                    // Source of name-fragment chain labels
    pub scores_path: PathBuf,            // JSON scores file
    pub structure_path: Option<PathBuf>, // Matching structure file, if one was found
}

/// A chain pair left out of the output because its statistics are undefined.
#[derive(Debug, Clone, PartialEq)]
pub struct SkippedPair {
    pub first: usize,
    pub second: usize,
    pub reason: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PredictionAnalysis {
    pub id: String,
    pub chain_ids: Vec<char>,
    pub boundaries: ChainBoundaries,
    pub records: Vec<PairRecord>,
    pub skipped_pairs: Vec<SkippedPair>,
}

/// Runs the pipeline on already parsed inputs.
///
/// Pairs whose distribution is degenerate are recorded in
/// [`PredictionAnalysis::skipped_pairs`]; every other error aborts this prediction.
#[instrument(skip_all, fields(prediction = id))]
pub fn analyze(
    id: &str,
    name: &str,
    chains: &ChainSet,
    scores: &PredictionScores,
    config: &AnalysisConfig,
) -> Result<PredictionAnalysis, AnalysisError> {
    let boundaries = ChainBoundaries::from_chains(chains)?;
    let distributions = build_pair_distributions(&scores.error_matrix, &boundaries)?;
    let labels = chain_labels(config.labeling, boundaries.len(), name)?;
    debug!(chains = ?boundaries.lengths(), "Chain boundaries extracted.");
    for chain in chains.chains() {
        debug!(
            chain = %chain.id,
            residues = chain.len(),
            mean_confidence = ?chain.mean_confidence(),
            "Chain summary."
        );
    }

    let header = PredictionHeader {
        id,
        alignment_confidence: round_to(scores.alignment_confidence, config.confidence_decimals),
        interface_confidence: round_to(scores.interface_confidence, config.confidence_decimals),
    };

    let mut records = Vec::with_capacity(distributions.len());
    let mut skipped_pairs = Vec::new();
    for distribution in &distributions {
        let pair = (distribution.first, distribution.second);
        match summarize(distribution, config.signal_scale) {
            Ok(stats) => records.push(classify(
                &header,
                pair,
                stats,
                (&labels[pair.0], &labels[pair.1]),
                &config.thresholds,
            )),
            Err(AnalysisError::DegenerateDistribution { reason, .. }) => {
                warn!(first = pair.0, second = pair.1, "Skipping chain pair: {}", reason);
                skipped_pairs.push(SkippedPair {
                    first: pair.0,
                    second: pair.1,
                    reason: reason.to_string(),
                });
            }
            Err(e) => return Err(e),
        }
    }

    Ok(PredictionAnalysis {
        id: id.to_string(),
        chain_ids: chains.chains().iter().map(|c| c.id).collect(),
        boundaries,
        records,
        skipped_pairs,
    })
}

/// Reads both files of a prediction and runs the pipeline.
///
/// # Errors
///
/// Returns [`AnalysisError::MissingStructure`] if no structure file was matched, and
/// the reader or pipeline error otherwise.
pub fn analyze_files(
    input: &PredictionInput,
    config: &AnalysisConfig,
) -> Result<PredictionAnalysis, AnalysisError> {
    let structure_path = input.structure_path.as_ref().ok_or_else(|| {
        AnalysisError::MissingStructure(input.scores_path.display().to_string())
    })?;

    let scores = ScoresFile::read_from_path(&input.scores_path)?;
    let chains = PdbFile::read_from_path(structure_path)?;
    analyze(&input.id, &input.name, &chains, &scores, config)
}

fn round_to(value: f64, decimals: u32) -> f64 {
    let factor = 10f64.powi(decimals as i32);
    (value * factor).round_ties_even() / factor
}
