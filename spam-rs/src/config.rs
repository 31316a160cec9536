use crate::error::{Result, SpamError};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    pub models: ModelConfig,
    #[serde(default)]
    pub text: TextConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    #[serde(default = "default_listen_addr")]
    pub listen_addr: String,
}

/// Locations of the pre-trained artifacts
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ModelConfig {
    pub vectorizer_path: PathBuf,
    pub classifier_path: PathBuf,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct TextConfig {
    /// Replaces the built-in English stopword list (one word per line)
    #[serde(default)]
    pub stopwords_path: Option<PathBuf>,
    #[serde(default = "default_max_input_bytes")]
    pub max_input_bytes: usize,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default = "default_log_format")]
    pub format: String,
}

fn default_listen_addr() -> String {
    "127.0.0.1:8501".to_string()
}

fn default_max_input_bytes() -> usize {
    64 * 1024
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            listen_addr: default_listen_addr(),
        }
    }
}

impl Default for TextConfig {
    fn default() -> Self {
        Self {
            stopwords_path: None,
            max_input_bytes: default_max_input_bytes(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            vectorizer_path: PathBuf::from("models/vectorizer.json"),
            classifier_path: PathBuf::from("models/model.json"),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server: ServerConfig::default(),
            models: ModelConfig::default(),
            text: TextConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl Config {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| SpamError::Config(e.to_string()))?;

        Self::from_toml(&content)
    }

    pub fn from_toml(content: &str) -> Result<Self> {
        let config: Self =
            toml::from_str(content).map_err(|e| SpamError::Config(e.to_string()))?;

        if config.text.max_input_bytes == 0 {
            return Err(SpamError::Config(
                "text.max_input_bytes must be greater than zero".to_string(),
            ));
        }

        Ok(config)
    }
}
