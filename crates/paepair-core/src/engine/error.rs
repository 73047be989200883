use super::config::ConfigError;
use crate::core::io::pdb::PdbError;
use crate::core::io::scores::ScoresError;
use std::fmt;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AnalysisError {
    #[error("Structure file error: {0}")]
    Format(#[from] PdbError),

    #[error("Scores file error: {0}")]
    Schema(#[from] ScoresError),

    #[error("No usable ATOM records (CB, or CA of GLY) found in structure")]
    EmptyStructure,

    #[error(
        "Chain lengths sum to {chain_total} residues but the error matrix is {matrix_dimension}x{matrix_dimension}"
    )]
    BoundaryMismatch {
        chain_total: usize,
        matrix_dimension: usize,
    },

    #[error("No structure file matched scores file '{0}'")]
    MissingStructure(String),

    #[error("Degenerate distribution for chain pair ({first}, {second}): {reason}")]
    DegenerateDistribution {
        first: usize,
        second: usize,
        reason: &'static str,
    },

    #[error("Name-fragment labeling needs {needed} fragments but '{name}' provides {available}")]
    Labeling {
        needed: usize,
        available: usize,
        name: String,
    },

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
}

/// Coarse failure category used when summarizing a batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum FailureKind {
    Io,
    Format,
    Schema,
    EmptyStructure,
    ShapeMismatch,
    DegenerateDistribution,
    Labeling,
    Config,
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}",
            match self {
                FailureKind::Io => "I/O error",
                FailureKind::Format => "format error",
                FailureKind::Schema => "schema error",
                FailureKind::EmptyStructure => "empty structure",
                FailureKind::ShapeMismatch => "shape mismatch",
                FailureKind::DegenerateDistribution => "degenerate distribution",
                FailureKind::Labeling => "labeling error",
                FailureKind::Config => "configuration error",
            }
        )
    }
}

impl AnalysisError {
    pub fn kind(&self) -> FailureKind {
        match self {
            AnalysisError::Format(PdbError::Io(_)) | AnalysisError::Schema(ScoresError::Io(_)) => {
                FailureKind::Io
            }
            AnalysisError::Format(_) => FailureKind::Format,
            AnalysisError::Schema(_) => FailureKind::Schema,
            AnalysisError::EmptyStructure => FailureKind::EmptyStructure,
            AnalysisError::BoundaryMismatch { .. } | AnalysisError::MissingStructure(_) => {
                FailureKind::ShapeMismatch
            }
            AnalysisError::DegenerateDistribution { .. } => FailureKind::DegenerateDistribution,
            AnalysisError::Labeling { .. } => FailureKind::Labeling,
            AnalysisError::Config(_) => FailureKind::Config,
        }
    }
}
