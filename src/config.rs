use serde::Deserialize;

use crate::models::energy::{DisplayFilter, PanelConfiguration};
use crate::services::energy_formula;

fn default_static_dir() -> String { "static".to_string() }

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub server: ServerConfig,
    #[serde(default)]
    pub engine: EngineConfig,
    #[serde(default = "default_static_dir")]
    pub static_dir: String,
    /// Initial panel configuration
    #[serde(default)]
    pub defaults: PanelConfiguration,
    /// Initial display filter
    #[serde(default)]
    pub filter: DisplayFilter,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub port: u16,
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct EngineConfig {
    /// Seed for the noise source. Unset means OS entropy.
    pub seed: Option<u64>,
}

impl Config {
    pub fn load(path: &str) -> Result<Self, Box<dyn std::error::Error>> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    pub fn from_json(content: &str) -> Result<Self, Box<dyn std::error::Error>> {
        let config: Config = serde_json::from_str(content)?;
        energy_formula::validate(&config.defaults)?;
        Ok(config)
    }
}
