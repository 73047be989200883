use crate::core::io::traits::InputFile;
use crate::core::models::matrix::{ErrorMatrix, MatrixError};
use serde::Deserialize;
use std::io::{self, BufRead};
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error)]
pub enum ScoresError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    #[error("Schema error: {0}")]
    Schema(String),
    #[error("Invalid error matrix: {0}")]
    Matrix(#[from] MatrixError),
}

/// A global score stored either as a single number or as one number per recycle/sample.
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(untagged)]
enum ScoreValue {
    Scalar(f64),
    Series(Vec<f64>),
}

impl ScoreValue {
    fn max(&self) -> Option<f64> {
        match self {
            ScoreValue::Scalar(v) => Some(*v),
            ScoreValue::Series(vs) => vs.iter().copied().reduce(f64::max),
        }
    }
}

#[derive(Debug, Deserialize)]
struct RawScores {
    #[serde(default, alias = "errorMatrix")]
    pae: Option<Vec<Vec<f64>>>,
    #[serde(default, alias = "alignmentConfidence")]
    ptm: Option<ScoreValue>,
    #[serde(default, alias = "interfaceConfidence")]
    iptm: Option<ScoreValue>,
    #[serde(default)]
    plddt: Option<Vec<f64>>,
}

/// Confidence metadata of one predicted model.
#[derive(Debug, Clone, PartialEq)]
pub struct PredictionScores {
    pub error_matrix: ErrorMatrix,
    pub alignment_confidence: f64, // pTM
    pub interface_confidence: f64, // ipTM
    pub plddt: Option<Vec<f64>>,   // Per-residue confidence, not used by the pair statistics
}

/// Reader for the JSON scores file written next to each predicted model.
///
/// Accepts the predictor's own keys (`pae`, `ptm`, `iptm`, `plddt`) as well as the
/// descriptive aliases `errorMatrix`, `alignmentConfidence` and `interfaceConfidence`.
/// Unknown keys are ignored.
pub struct ScoresFile;

impl ScoresFile {
    fn required<T>(value: Option<T>, field: &str) -> Result<T, ScoresError> {
        value.ok_or_else(|| ScoresError::Schema(format!("missing required field '{}'", field)))
    }

    fn score(value: Option<ScoreValue>, field: &str) -> Result<f64, ScoresError> {
        let value = Self::required(value, field)?;
        let score = value
            .max()
            .ok_or_else(|| ScoresError::Schema(format!("field '{}' is an empty array", field)))?;
        if !score.is_finite() {
            return Err(ScoresError::Schema(format!(
                "field '{}' is not a finite number",
                field
            )));
        }
        Ok(score)
    }
}

impl InputFile for ScoresFile {
    type Output = PredictionScores;
    type Error = ScoresError;

    fn read_from(reader: &mut impl BufRead) -> Result<Self::Output, Self::Error> {
        let raw: RawScores = serde_json::from_reader(reader).map_err(|e| {
            if e.is_io() {
                ScoresError::Io(e.into())
            } else {
                ScoresError::Schema(e.to_string())
            }
        })?;

        let error_matrix = ErrorMatrix::from_rows(Self::required(raw.pae, "pae")?)?;
        let alignment_confidence = Self::score(raw.ptm, "ptm")?;
        let interface_confidence = Self::score(raw.iptm, "iptm")?;

        debug!(
            dimension = error_matrix.dimension(),
            ptm = alignment_confidence,
            iptm = interface_confidence,
            "Parsed scores file."
        );
        Ok(PredictionScores {
            error_matrix,
            alignment_confidence,
            interface_confidence,
            plddt: raw.plddt,
        })
    }
}
