use paepair::engine::config::{
    ChainLabeling, DEFAULT_CONFIDENCE_DECIMALS, DEFAULT_SIGNAL_SCALE, DEFAULT_SIGNAL_THRESHOLD,
    DEFAULT_SPREAD_THRESHOLD,
};

/// Built-in values used when neither the command line nor the config file sets a key.
pub struct DefaultsConfig {
    pub labeling: ChainLabeling,
    pub signal_threshold: f64,
    pub spread_threshold: f64,
    pub signal_scale: f64,
    pub confidence_decimals: u32,
    pub metadata_suffix: String,
    pub structure_suffix: String,
    pub metadata_trailing_fields: usize,
    pub model_fields: usize,
    pub seed_fields: usize,
    pub structure_tag: String,
    pub expected_companions: usize,
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        Self {
            labeling: ChainLabeling::Positional,
            signal_threshold: DEFAULT_SIGNAL_THRESHOLD,
            spread_threshold: DEFAULT_SPREAD_THRESHOLD,
            signal_scale: DEFAULT_SIGNAL_SCALE,
            confidence_decimals: DEFAULT_CONFIDENCE_DECIMALS,
            metadata_suffix: "000.json".to_string(),
            structure_suffix: "000.pdb".to_string(),
            metadata_trailing_fields: 10,
            model_fields: 4,
            seed_fields: 2,
            structure_tag: "u".to_string(),
            expected_companions: 5,
        }
    }
}
