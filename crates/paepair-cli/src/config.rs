pub mod defaults;
pub mod models;

use crate::cli::AnalysisArgs;
use crate::discovery::DiscoveryConfig;
use crate::error::{CliError, Result};
use defaults::DefaultsConfig;
use models::AppConfig;
use paepair::engine::config::{AnalysisConfigBuilder, ChainLabeling, ParseChainLabelingError};
use serde::Deserialize;
use std::path::Path;
use std::str::FromStr;
use tracing::debug;

#[derive(Deserialize, Debug, Default)]
#[serde(deny_unknown_fields, rename_all = "kebab-case")]
struct PartialAnalysisConfig {
    labeling: Option<String>,
    signal_threshold: Option<f64>,
    spread_threshold: Option<f64>,
    signal_scale: Option<f64>,
    confidence_decimals: Option<u32>,
}

#[derive(Deserialize, Debug, Default)]
#[serde(deny_unknown_fields, rename_all = "kebab-case")]
struct PartialDiscoveryConfig {
    metadata_suffix: Option<String>,
    structure_suffix: Option<String>,
    metadata_trailing_fields: Option<usize>,
    model_fields: Option<usize>,
    seed_fields: Option<usize>,
    structure_tag: Option<String>,
    expected_companions: Option<usize>,
}

/// Configuration as read from a TOML file; every key is optional.
#[derive(Deserialize, Debug, Default)]
#[serde(deny_unknown_fields)]
pub struct PartialAppConfig {
    analysis: Option<PartialAnalysisConfig>,
    discovery: Option<PartialDiscoveryConfig>,
}

impl PartialAppConfig {
    pub fn from_file(path: &Path) -> Result<Self> {
        debug!("Loading configuration from file: {:?}", path);
        let content = std::fs::read_to_string(path)?;
        toml::from_str(&content).map_err(|e| CliError::FileParsing {
            path: path.to_path_buf(),
            source: e.into(),
        })
    }

    /// Reads `path` if one was given, otherwise starts from an empty configuration.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::from_file(path),
            None => Ok(Self::default()),
        }
    }

    /// Resolves every setting with the precedence CLI flag, `--set`, file, default.
    pub fn merge_with_cli(
        mut self,
        args: &AnalysisArgs,
        expected_companions: Option<usize>,
    ) -> Result<AppConfig> {
        self.apply_set_values(&args.set_values)?;

        let defaults = DefaultsConfig::default();
        let analysis = self.analysis.take().unwrap_or_default();
        let discovery = self.discovery.take().unwrap_or_default();

        let file_labeling = analysis
            .labeling
            .as_deref()
            .map(parse_labeling)
            .transpose()?;

        let analysis_config = AnalysisConfigBuilder::new()
            .labeling(args.labeling.or(file_labeling).unwrap_or(defaults.labeling))
            .signal_threshold(
                args.signal_threshold
                    .or(analysis.signal_threshold)
                    .unwrap_or(defaults.signal_threshold),
            )
            .spread_threshold(
                args.spread_threshold
                    .or(analysis.spread_threshold)
                    .unwrap_or(defaults.spread_threshold),
            )
            .signal_scale(
                args.signal_scale
                    .or(analysis.signal_scale)
                    .unwrap_or(defaults.signal_scale),
            )
            .confidence_decimals(
                analysis
                    .confidence_decimals
                    .unwrap_or(defaults.confidence_decimals),
            )
            .build()
            .map_err(|e| CliError::Config(e.to_string()))?;

        let discovery_config = DiscoveryConfig {
            metadata_suffix: non_empty(
                discovery.metadata_suffix.unwrap_or(defaults.metadata_suffix),
                "discovery.metadata-suffix",
            )?,
            structure_suffix: non_empty(
                discovery
                    .structure_suffix
                    .unwrap_or(defaults.structure_suffix),
                "discovery.structure-suffix",
            )?,
            metadata_trailing_fields: discovery
                .metadata_trailing_fields
                .unwrap_or(defaults.metadata_trailing_fields),
            model_fields: discovery.model_fields.unwrap_or(defaults.model_fields),
            seed_fields: discovery.seed_fields.unwrap_or(defaults.seed_fields),
            structure_tag: discovery.structure_tag.unwrap_or(defaults.structure_tag),
            expected_companions: expected_companions
                .or(discovery.expected_companions)
                .unwrap_or(defaults.expected_companions),
        };

        Ok(AppConfig {
            analysis: analysis_config,
            discovery: discovery_config,
        })
    }

    fn apply_set_values(&mut self, set_values: &[String]) -> Result<()> {
        for kv_pair in set_values {
            let Some((key, value_str)) = kv_pair.split_once('=') else {
                return Err(CliError::Config(format!(
                    "Invalid --set format: '{}'. Expected KEY=VALUE.",
                    kv_pair
                )));
            };

            match key {
                "analysis.labeling" => {
                    parse_labeling(value_str)?;
                    self.analysis_mut().labeling = Some(value_str.to_string());
                }
                "analysis.signal-threshold" => {
                    self.analysis_mut().signal_threshold = Some(parse_value(key, value_str)?);
                }
                "analysis.spread-threshold" => {
                    self.analysis_mut().spread_threshold = Some(parse_value(key, value_str)?);
                }
                "analysis.signal-scale" => {
                    self.analysis_mut().signal_scale = Some(parse_value(key, value_str)?);
                }
                "analysis.confidence-decimals" => {
                    self.analysis_mut().confidence_decimals = Some(parse_value(key, value_str)?);
                }
                "discovery.metadata-suffix" => {
                    self.discovery_mut().metadata_suffix = Some(value_str.to_string());
                }
                "discovery.structure-suffix" => {
                    self.discovery_mut().structure_suffix = Some(value_str.to_string());
                }
                "discovery.metadata-trailing-fields" => {
                    self.discovery_mut().metadata_trailing_fields =
                        Some(parse_value(key, value_str)?);
                }
                "discovery.model-fields" => {
                    self.discovery_mut().model_fields = Some(parse_value(key, value_str)?);
                }
                "discovery.seed-fields" => {
                    self.discovery_mut().seed_fields = Some(parse_value(key, value_str)?);
                }
                "discovery.structure-tag" => {
                    self.discovery_mut().structure_tag = Some(value_str.to_string());
                }
                "discovery.expected-companions" => {
                    self.discovery_mut().expected_companions = Some(parse_value(key, value_str)?);
                }
                _ => {
                    return Err(CliError::Config(format!(
                        "Unsupported configuration key for --set: '{}'",
                        key
                    )));
                }
            }
        }
        Ok(())
    }

    fn analysis_mut(&mut self) -> &mut PartialAnalysisConfig {
        self.analysis.get_or_insert_with(Default::default)
    }

    fn discovery_mut(&mut self) -> &mut PartialDiscoveryConfig {
        self.discovery.get_or_insert_with(Default::default)
    }
}

fn parse_value<T: FromStr>(key: &str, value_str: &str) -> Result<T> {
    value_str
        .trim()
        .parse()
        .map_err(|_| CliError::Config(format!("Invalid value for {}: {}", key, value_str)))
}

fn parse_labeling(value: &str) -> Result<ChainLabeling> {
    value
        .parse()
        .map_err(|e: ParseChainLabelingError| CliError::Config(e.to_string()))
}

fn non_empty(value: String, key: &str) -> Result<String> {
    if value.is_empty() {
        return Err(CliError::Config(format!("`{}` cannot be empty.", key)));
    }
    Ok(value)
}
