use std::fmt;
use std::str::FromStr;
use thiserror::Error;

pub const DEFAULT_SIGNAL_THRESHOLD: f64 = 24.84;
pub const DEFAULT_SPREAD_THRESHOLD: f64 = 0.2131;
pub const DEFAULT_SIGNAL_SCALE: f64 = 30.0;
pub const DEFAULT_CONFIDENCE_DECIMALS: u32 = 2;
/// Beyond this an `f64` carries no further decimal digits.
pub const MAX_CONFIDENCE_DECIMALS: u32 = 15;

#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum ConfigError {
    #[error("Missing required parameter: {0}")]
    MissingParameter(&'static str),
    #[error("Invalid value for parameter '{name}': {reason}")]
    InvalidParameter { name: &'static str, reason: String },
}

/// How chains are named in output rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ChainLabeling {
    /// The chain's 0-based position in the structure file.
    #[default]
    Positional,
    /// The `_`-separated fragment of the prediction name at the chain's position.
    NameFragments,
}

#[derive(Debug, Error)]
#[error("Invalid chain labeling '{0}'. Expected 'positional' or 'name-fragments'.")]
pub struct ParseChainLabelingError(String);

impl FromStr for ChainLabeling {
    type Err = ParseChainLabelingError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "positional" | "position" | "index" => Ok(ChainLabeling::Positional),
            "name-fragments" | "names" | "name" => Ok(ChainLabeling::NameFragments),
            _ => Err(ParseChainLabelingError(s.to_string())),
        }
    }
}

impl fmt::Display for ChainLabeling {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}",
            match self {
                ChainLabeling::Positional => "positional",
                ChainLabeling::NameFragments => "name-fragments",
            }
        )
    }
}

/// Both must be strictly exceeded for a pair to be called interacting.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InteractionThresholds {
    pub signal: f64,
    pub spread: f64,
}

impl Default for InteractionThresholds {
    fn default() -> Self {
        Self {
            signal: DEFAULT_SIGNAL_THRESHOLD,
            spread: DEFAULT_SPREAD_THRESHOLD,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct AnalysisConfig {
    pub labeling: ChainLabeling,
    pub thresholds: InteractionThresholds,
    pub signal_scale: f64,        // Upper bound of the error scale; `signal = scale - min`
    pub confidence_decimals: u32, // Rounding applied to reported pTM/ipTM
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            labeling: ChainLabeling::default(),
            thresholds: InteractionThresholds::default(),
            signal_scale: DEFAULT_SIGNAL_SCALE,
            confidence_decimals: DEFAULT_CONFIDENCE_DECIMALS,
        }
    }
}

#[derive(Default)]
pub struct AnalysisConfigBuilder {
    labeling: Option<ChainLabeling>,
    signal_threshold: Option<f64>,
    spread_threshold: Option<f64>,
    signal_scale: Option<f64>,
    confidence_decimals: Option<u32>,
}

impl AnalysisConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn labeling(mut self, labeling: ChainLabeling) -> Self {
        self.labeling = Some(labeling);
        self
    }
    pub fn signal_threshold(mut self, threshold: f64) -> Self {
        self.signal_threshold = Some(threshold);
        self
    }
    pub fn spread_threshold(mut self, threshold: f64) -> Self {
        self.spread_threshold = Some(threshold);
        self
    }
    pub fn signal_scale(mut self, scale: f64) -> Self {
        self.signal_scale = Some(scale);
        self
    }
    pub fn confidence_decimals(mut self, decimals: u32) -> Self {
        self.confidence_decimals = Some(decimals);
        self
    }

    pub fn build(self) -> Result<AnalysisConfig, ConfigError> {
        let thresholds = InteractionThresholds {
            signal: finite(
                "signal_threshold",
                self.signal_threshold
                    .ok_or(ConfigError::MissingParameter("signal_threshold"))?,
            )?,
            spread: finite(
                "spread_threshold",
                self.spread_threshold
                    .ok_or(ConfigError::MissingParameter("spread_threshold"))?,
            )?,
        };
        let signal_scale = finite(
            "signal_scale",
            self.signal_scale
                .ok_or(ConfigError::MissingParameter("signal_scale"))?,
        )?;
        if signal_scale <= 0.0 {
            return Err(ConfigError::InvalidParameter {
                name: "signal_scale",
                reason: format!("must be positive, got {}", signal_scale),
            });
        }

        let confidence_decimals = self
            .confidence_decimals
            .unwrap_or(DEFAULT_CONFIDENCE_DECIMALS);
        if confidence_decimals > MAX_CONFIDENCE_DECIMALS {
            return Err(ConfigError::InvalidParameter {
                name: "confidence_decimals",
                reason: format!(
                    "must be at most {}, got {}",
                    MAX_CONFIDENCE_DECIMALS, confidence_decimals
                ),
            });
        }

        Ok(AnalysisConfig {
            labeling: self
                .labeling
                .ok_or(ConfigError::MissingParameter("labeling"))?,
            thresholds,
            signal_scale,
            confidence_decimals,
        })
    }
}

fn finite(name: &'static str, value: f64) -> Result<f64, ConfigError> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(ConfigError::InvalidParameter {
            name,
            reason: format!("must be a finite number, got {}", value),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn complete_builder() -> AnalysisConfigBuilder {
        AnalysisConfigBuilder::new()
            .labeling(ChainLabeling::NameFragments)
            .signal_threshold(20.0)
            .spread_threshold(0.3)
            .signal_scale(31.75)
    }

    #[test]
    fn default_config_uses_calibrated_thresholds() {
        let config = AnalysisConfig::default();
        assert_eq!(config.thresholds.signal, 24.84);
        assert_eq!(config.thresholds.spread, 0.2131);
        assert_eq!(config.signal_scale, 30.0);
        assert_eq!(config.labeling, ChainLabeling::Positional);
        assert_eq!(config.confidence_decimals, 2);
    }

    #[test]
    fn builder_produces_config_with_given_values() {
        let config = complete_builder().confidence_decimals(3).build().unwrap();
        assert_eq!(config.labeling, ChainLabeling::NameFragments);
        assert_eq!(config.thresholds.signal, 20.0);
        assert_eq!(config.thresholds.spread, 0.3);
        assert_eq!(config.signal_scale, 31.75);
        assert_eq!(config.confidence_decimals, 3);
    }

    #[test]
    fn builder_reports_missing_parameter() {
        let err = AnalysisConfigBuilder::new()
            .labeling(ChainLabeling::Positional)
            .signal_threshold(1.0)
            .signal_scale(30.0)
            .build()
            .unwrap_err();
        assert_eq!(err, ConfigError::MissingParameter("spread_threshold"));
    }

    #[test]
    fn builder_rejects_non_finite_threshold_and_non_positive_scale() {
        assert!(matches!(
            complete_builder().signal_threshold(f64::NAN).build(),
            Err(ConfigError::InvalidParameter {
                name: "signal_threshold",
                ..
            })
        ));
        assert!(matches!(
            complete_builder().signal_scale(0.0).build(),
            Err(ConfigError::InvalidParameter {
                name: "signal_scale",
                ..
            })
        ));
    }

    #[test]
    fn builder_rejects_confidence_decimals_past_f64_precision() {
        let err = complete_builder().confidence_decimals(400).build().unwrap_err();
        assert!(matches!(
            err,
            ConfigError::InvalidParameter {
                name: "confidence_decimals",
                ..
            }
        ));
        assert!(matches!(
            complete_builder().confidence_decimals(u32::MAX).build(),
            Err(ConfigError::InvalidParameter { .. })
        ));

        let config = complete_builder()
            .confidence_decimals(MAX_CONFIDENCE_DECIMALS)
            .build()
            .unwrap();
        assert_eq!(config.confidence_decimals, 15);
    }

    #[test]
    fn chain_labeling_parses_aliases() {
        assert_eq!(
            "Positional".parse::<ChainLabeling>().unwrap(),
            ChainLabeling::Positional
        );
        assert_eq!(
            "names".parse::<ChainLabeling>().unwrap(),
            ChainLabeling::NameFragments
        );
        assert!("alphabetical".parse::<ChainLabeling>().is_err());
        assert_eq!(ChainLabeling::NameFragments.to_string(), "name-fragments");
    }
}
