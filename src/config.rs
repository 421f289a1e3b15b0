use crate::error::{MailerError, Result};
use serde::Deserialize;
use std::fs;
use std::path::Path;
use tracing::info;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub input: InputConfig,
    pub output: OutputConfig,
    pub civic: CivicConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct InputConfig {
    pub attendees_csv: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub letters_dir: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CivicConfig {
    pub endpoint: String,
    pub timeout_seconds: u64,
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            attendees_csv: "event_attendees.csv".to_string(),
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            letters_dir: "output".to_string(),
        }
    }
}

impl Default for CivicConfig {
    fn default() -> Self {
        Self {
            endpoint: "https://www.googleapis.com/civicinfo/v2/representatives".to_string(),
            timeout_seconds: 10,
        }
    }
}

impl Config {
    /// Loads the TOML config, falling back to defaults when the file is
    /// absent so the binary runs with zero setup.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            info!("no config file at {}, using defaults", path.display());
            return Ok(Config::default());
        }

        let contents = fs::read_to_string(path).map_err(|e| {
            MailerError::Config(format!(
                "Failed to read config file '{}': {}",
                path.display(),
                e
            ))
        })?;

        let config: Config = toml::from_str(&contents)?;
        Ok(config)
    }
}
