use crate::discovery::DEFAULT_EXTENSIONS;
use crate::error::{Result, TagpixError};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

const CONFIG_FILENAME: &str = "config.json";

/// Configuration for tagpix, stored in `config.json` in the data directory.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TagpixConfig {
    /// Picture file extensions picked up by directory scans (e.g. "jpg", "png")
    #[serde(default = "default_extensions")]
    pub extensions: Vec<String>,
}

fn default_extensions() -> Vec<String> {
    DEFAULT_EXTENSIONS.iter().map(|e| e.to_string()).collect()
}

impl Default for TagpixConfig {
    fn default() -> Self {
        Self {
            extensions: default_extensions(),
        }
    }
}

impl TagpixConfig {
    pub const KEYS: &'static [&'static str] = &["extensions"];

    /// Load config from the given directory, or return defaults if not found
    pub fn load<P: AsRef<Path>>(config_dir: P) -> Result<Self> {
        let config_path = config_dir.as_ref().join(CONFIG_FILENAME);

        if !config_path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&config_path).map_err(TagpixError::Io)?;
        let config: TagpixConfig =
            serde_json::from_str(&content).map_err(TagpixError::Serialization)?;
        Ok(config)
    }

    pub fn save<P: AsRef<Path>>(&self, config_dir: P) -> Result<()> {
        let config_dir = config_dir.as_ref();
        if !config_dir.exists() {
            fs::create_dir_all(config_dir).map_err(TagpixError::Io)?;
        }

        let config_path = config_dir.join(CONFIG_FILENAME);
        let content = serde_json::to_string_pretty(self).map_err(TagpixError::Serialization)?;
        fs::write(config_path, content).map_err(TagpixError::Io)?;
        Ok(())
    }

    pub fn get(&self, key: &str) -> Option<String> {
        match key {
            "extensions" => Some(self.extensions.join(",")),
            _ => None,
        }
    }

    /// Set a key from its textual form. Extensions are comma separated and
    /// normalised to lowercase without a leading dot.
    pub fn set(&mut self, key: &str, value: &str) -> std::result::Result<(), String> {
        match key {
            "extensions" => {
                let extensions: Vec<String> = value
                    .split(',')
                    .map(|e| e.trim().trim_start_matches('.').to_lowercase())
                    .filter(|e| !e.is_empty())
                    .collect();
                if extensions.is_empty() {
                    return Err("At least one extension is required".to_string());
                }
                self.extensions = extensions;
                Ok(())
            }
            _ => Err(format!("Unknown config key: {}", key)),
        }
    }
}
