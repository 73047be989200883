use crate::error::Result;
use paepair::workflows::analyze::PredictionInput;
use paepair::workflows::batch::{BatchInput, CompanionWarning};
use std::collections::BTreeSet;
use std::fs;
use std::path::Path;
use tracing::{debug, info, warn};

const FIELD_SEPARATOR: &str = "_";

/// File naming conventions of the predictor output directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiscoveryConfig {
    pub metadata_suffix: String,
    pub structure_suffix: String,
    pub metadata_trailing_fields: usize, // Fields after the family key in a metadata stem
    pub model_fields: usize,             // Trailing fields shared with the model's structure file
    pub seed_fields: usize,              // Trailing fields dropped from the prediction id
    pub structure_tag: String,
    pub expected_companions: usize,
}

/// Keys derived from one metadata file stem.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PredictionKeys {
    pub id: String,
    pub family: String,
    pub model: String,
}

impl DiscoveryConfig {
    /// Splits `stem` on `_` and derives its keys, or `None` if it has too few fields.
    ///
    /// For `A_B_scores_rank_001_alphafold2_multimer_v3_model_1_seed_000` with the
    /// defaults this gives family `A_B`, model `model_1_seed_000` and id
    /// `A_B_scores_rank_001_alphafold2_multimer_v3_model_1`.
    pub fn derive_keys(&self, stem: &str) -> Option<PredictionKeys> {
        let fields: Vec<&str> = stem.split(FIELD_SEPARATOR).collect();
        let n = fields.len();
        let needed = self
            .metadata_trailing_fields
            .max(self.model_fields)
            .max(self.seed_fields);
        if n <= needed {
            return None;
        }
        Some(PredictionKeys {
            id: fields[..n - self.seed_fields].join(FIELD_SEPARATOR),
            family: fields[..n - self.metadata_trailing_fields].join(FIELD_SEPARATOR),
            model: fields[n - self.model_fields..].join(FIELD_SEPARATOR),
        })
    }

    fn family_marker(&self, family: &str) -> String {
        format!("{family}{FIELD_SEPARATOR}{}", self.structure_tag)
    }
}

/// Lists the directory and pairs every metadata file with its structure file.
pub fn discover(dir: &Path, config: &DiscoveryConfig) -> Result<BatchInput> {
    let mut metadata_files = Vec::new();
    let mut structure_files = Vec::new();
    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        if !entry.file_type()?.is_file() {
            continue;
        }
        let Ok(name) = entry.file_name().into_string() else {
            warn!(path = ?entry.path(), "Skipping file with a non UTF-8 name.");
            continue;
        };
        if name.ends_with(&config.metadata_suffix) {
            metadata_files.push(name);
        } else if name.ends_with(&config.structure_suffix) {
            structure_files.push(name);
        }
    }
    metadata_files.sort();
    structure_files.sort();
    info!(
        metadata = metadata_files.len(),
        structures = structure_files.len(),
        "Input directory scanned."
    );

    Ok(match_files(dir, &metadata_files, &structure_files, config))
}

/// Pairs metadata files with structure files by name.
///
/// Every metadata file yields one prediction. A prediction whose structure cannot be
/// found is still returned, without a structure path, so the batch reports it.
pub fn match_files(
    dir: &Path,
    metadata_files: &[String],
    structure_files: &[String],
    config: &DiscoveryConfig,
) -> BatchInput {
    let mut input = BatchInput {
        unmatched_structures: structure_files.iter().cloned().collect::<BTreeSet<_>>(),
        ..BatchInput::default()
    };

    for metadata in metadata_files {
        let stem = Path::new(metadata)
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or(metadata);
        let scores_path = dir.join(metadata);

        let Some(keys) = config.derive_keys(stem) else {
            warn!(file = %metadata, "Metadata file name has too few fields to locate its structure.");
            input.companion_warnings.push(CompanionWarning {
                scores_file: scores_path.clone(),
                family: stem.to_string(),
                found: Vec::new(),
                expected: config.expected_companions,
            });
            input.predictions.push(PredictionInput {
                id: stem.to_string(),
                name: stem.to_string(),
                scores_path,
                structure_path: None,
            });
            continue;
        };

        let marker = config.family_marker(&keys.family);
        let companions: Vec<&String> = structure_files
            .iter()
            .filter(|name| name.contains(&marker))
            .collect();
        if companions.len() != config.expected_companions {
            warn!(
                file = %metadata,
                family = %keys.family,
                found = companions.len(),
                expected = config.expected_companions,
                "Unexpected number of structure files for prediction family."
            );
            input.companion_warnings.push(CompanionWarning {
                scores_file: scores_path.clone(),
                family: keys.family.clone(),
                found: companions.iter().map(|s| s.to_string()).collect(),
                expected: config.expected_companions,
            });
        }

        let model_marker = format!("{FIELD_SEPARATOR}{}", keys.model);
        let structure = companions
            .into_iter()
            .find(|name| name.contains(&model_marker));
        match structure {
            Some(name) => {
                input.unmatched_structures.remove(name);
                debug!(file = %metadata, structure = %name, "Structure file matched.");
            }
            None => warn!(file = %metadata, model = %keys.model, "No structure file found for model."),
        }

        input.predictions.push(PredictionInput {
            id: keys.id,
            name: keys.family,
            scores_path,
            structure_path: structure.map(|name| dir.join(name)),
        });
    }

    input
}
