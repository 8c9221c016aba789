use log::warn;
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::Path;
use thiserror::Error;

pub const DEFAULT_CONFIG_FILE: &str = "spel.toml";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },
    #[error("Failed to parse {path}: {source}")]
    Parse {
        path: String,
        source: toml::de::Error,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EvaluatorConfig {
    pub url: String,
    pub timeout_seconds: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    /// "dark" or "light".
    pub theme: String,
    pub max_suggestions: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub evaluator: EvaluatorConfig,
    pub editor: EditorConfig,
}

impl Default for EvaluatorConfig {
    fn default() -> Self {
        EvaluatorConfig {
            url: "http://localhost:8080/api/evaluate".to_string(),
            timeout_seconds: 30,
        }
    }
}

impl Default for EditorConfig {
    fn default() -> Self {
        EditorConfig {
            theme: "dark".to_string(),
            max_suggestions: 10,
        }
    }
}

impl Config {
    /// Load `spel.toml` from the working directory with environment
    /// variable overrides. A missing file means defaults.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(Path::new(DEFAULT_CONFIG_FILE))
    }

    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let mut config = if path.exists() {
            Self::load_from_file(path)?
        } else {
            warn!("{} not found, using defaults", path.display());
            Config::default()
        };

        config.apply_env_overrides();
        Ok(config)
    }

    fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;

        toml::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.display().to_string(),
            source,
        })
    }

    fn apply_env_overrides(&mut self) {
        if let Ok(url) = env::var("SPEL_EVALUATOR_URL") {
            self.evaluator.url = url;
        }
        if let Ok(timeout) = env::var("SPEL_EVALUATOR_TIMEOUT_SECONDS") {
            match timeout.parse() {
                Ok(seconds) => self.evaluator.timeout_seconds = seconds,
                Err(_) => warn!("ignoring invalid SPEL_EVALUATOR_TIMEOUT_SECONDS: {}", timeout),
            }
        }
        if let Ok(theme) = env::var("SPEL_THEME") {
            self.editor.theme = theme;
        }
    }
}
