use log::debug;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::models::generation::RequestMode;

/// Environment variable checked when the config file carries no key
pub const API_KEY_ENV_VAR: &str = "OPENAI_API_KEY";

/// Placeholder prefix shipped in sample configs; treated as no key at all
const PLACEHOLDER_KEY_PREFIX: &str = "sk-REPLACE_ME";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    FileRead(#[from] std::io::Error),

    #[error("Failed to parse config file: {0}")]
    Parse(#[from] serde_yaml::Error),

    #[error("Missing API credential: {0}")]
    MissingCredential(String),
}

/// Static configuration for a generation run
///
/// All fields are optional in the YAML file; accessors fill in the fixed
/// defaults. The value is constructed once at process start and read-only
/// afterwards.
#[derive(Debug, Serialize, Deserialize, Clone, Default)]
pub struct GeneratorConfig {
    /// API key for the generation service
    pub api_key: Option<String>,

    /// Chat-completions endpoint of the generation service
    pub api_endpoint: Option<String>,

    /// Model to request
    pub model: Option<String>,

    /// Directory the five artifacts are written into
    pub out_dir: Option<PathBuf>,

    /// How the response maps onto the four JSON sections
    pub request_mode: Option<RequestMode>,

    /// Sampling temperature (0.0-1.0)
    pub temperature: Option<f32>,

    /// Maximum tokens per completion
    pub max_tokens: Option<usize>,
}

impl GeneratorConfig {
    /// Load configuration from a YAML file
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path)?;
        let config: GeneratorConfig = serde_yaml::from_str(&contents)?;
        Ok(config)
    }

    /// Resolve the API credential, checking the environment if the config
    /// file carries none. Empty and placeholder values count as missing.
    /// Absence is fatal and reported immediately; there is no retry.
    pub fn resolve_api_key(&self) -> Result<String, ConfigError> {
        if let Some(key) = &self.api_key {
            if is_usable_key(key) {
                debug!("Using API key from config");
                return Ok(key.clone());
            }
            debug!("Config API key is empty or a placeholder, checking environment");
        }

        match std::env::var(API_KEY_ENV_VAR) {
            Ok(key) if is_usable_key(&key) => {
                debug!("Using API key from {}", API_KEY_ENV_VAR);
                Ok(key)
            }
            _ => Err(ConfigError::MissingCredential(format!(
                "set api_key in the config file or export {}",
                API_KEY_ENV_VAR
            ))),
        }
    }

    pub fn endpoint(&self) -> String {
        self.api_endpoint
            .clone()
            .unwrap_or_else(|| "https://api.openai.com/v1/chat/completions".to_string())
    }

    pub fn model(&self) -> String {
        self.model.clone().unwrap_or_else(|| "gpt-4o".to_string())
    }

    pub fn out_dir(&self) -> PathBuf {
        self.out_dir
            .clone()
            .unwrap_or_else(|| PathBuf::from("project/FunctionalSpecification"))
    }

    pub fn request_mode(&self) -> RequestMode {
        self.request_mode.unwrap_or(RequestMode::PerSection)
    }

    pub fn temperature(&self) -> f32 {
        self.temperature.unwrap_or(0.0)
    }

    pub fn max_tokens(&self) -> usize {
        self.max_tokens.unwrap_or(4096)
    }
}

fn is_usable_key(key: &str) -> bool {
    !key.trim().is_empty() && !key.starts_with(PLACEHOLDER_KEY_PREFIX)
}
