use crate::constants::SAMPLE_CSV_PATH;
use crate::error::{CheckError, Result};
use serde::Deserialize;
use std::fs;

#[derive(Debug, Deserialize)]
pub struct Config {
    pub probe: ProbeConfig,
    pub csv: CsvConfig,
}

#[derive(Debug, Deserialize)]
pub struct ProbeConfig {
    pub base_url: String,
    pub timeout_seconds: u64,
}

#[derive(Debug, Deserialize)]
pub struct CsvConfig {
    pub sample_path: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            probe: ProbeConfig {
                base_url: "http://localhost:8000".to_string(),
                timeout_seconds: 10,
            },
            csv: CsvConfig {
                sample_path: SAMPLE_CSV_PATH.to_string(),
            },
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        let config_path = "config.toml";
        let config_content = fs::read_to_string(config_path).map_err(|e| {
            CheckError::Config(format!("Failed to read config file '{config_path}': {e}"))
        })?;

        let config: Config = toml::from_str(&config_content)?;
        Ok(config)
    }

    /// Load `config.toml`, falling back to defaults when it does not exist.
    /// A file that exists but fails to parse is still an error.
    pub fn load_or_default() -> Result<Self> {
        if std::path::Path::new("config.toml").exists() {
            Self::load()
        } else {
            Ok(Self::default())
        }
    }
}
