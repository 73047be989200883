use crate::discovery::DiscoveryConfig;
use paepair::engine::config::AnalysisConfig;

pub struct AppConfig {
    pub analysis: AnalysisConfig,
    pub discovery: DiscoveryConfig,
}
