#![warn(missing_docs)]
#![warn(clippy::missing_docs_in_private_items)]

use std::{
    fs,
    path::{Path, PathBuf},
    sync::{Arc, Mutex, OnceLock},
};

use anyhow::{Context, Result};

use crate::constants::{
    API_KEY_VARS, DEFAULT_MAX_TOKENS, DEFAULT_MODEL, DEFAULT_TEMPERATURE, DEFAULT_TEMPLATE,
    SAMPLE_ENV_FILE,
};

/// Contents of the sample environment file.
const SAMPLE_ENV: &str = "# Photocopier configuration
# Copy this file to .env and fill in your API key

# OpenAI API configuration
OPENAI_API_KEY=your_openai_api_key_here

# Optional: model configuration (defaults shown)
OPENAI_MODEL=gpt-4o-mini
MAX_TOKENS=2000
TEMPERATURE=0.7

# Optional: OpenAI-compatible endpoint
# OPENAI_ENDPOINT=https://api.openai.com/v1

# Optional: project layout
# PHOTOCOPIER_BASE_DIR=.
# PHOTOCOPIER_TEMPLATE=A1-Defensive-Programming-Template

# Usage:
# 1. Get your API key from https://platform.openai.com/api-keys
# 2. Replace 'your_openai_api_key_here' with your actual API key
# 3. Save this file as '.env' in the project root directory
";

/// Settings the chat model client needs. Only exists when an API key is
/// configured.
#[derive(Clone, Debug)]
pub struct ModelSettings {
    /// API key sent as a bearer token.
    pub api_key:     String,
    /// Optional base URL for OpenAI-compatible servers.
    pub api_base:    Option<String>,
    /// Model identifier for chat completions.
    pub model:       String,
    /// Completion budget per request.
    pub max_tokens:  u32,
    /// Sampling temperature.
    pub temperature: f32,
}

/// Configuration sourced from the environment (after `.env` is loaded).
#[derive(Clone, Debug)]
pub struct Config {
    /// API key, from the first non-blank of `OPENAI_API_KEY`, `OPENAI_KEY`,
    /// `API_KEY`.
    api_key:     Option<String>,
    /// Optional base URL for OpenAI-compatible servers.
    api_base:    Option<String>,
    /// Model identifier.
    model:       String,
    /// Completion budget per request.
    max_tokens:  u32,
    /// Sampling temperature.
    temperature: f32,
    /// Project root holding the `Lessons/` directory.
    base_dir:    PathBuf,
    /// Name of the template course directory inside `Lessons/`.
    template:    String,
}

impl Default for Config {
    fn default() -> Self {
        Self::from_lookup(|_| None)
    }
}

impl Config {
    /// Reads configuration from the process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Reads configuration through `lookup`, which maps a variable name to its
    /// value. Blank values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| {
            lookup(key)
                .map(|value| value.trim().to_owned())
                .filter(|value| !value.is_empty())
        };

        let api_key = API_KEY_VARS.iter().find_map(|key| get(key));
        let api_base = get("OPENAI_ENDPOINT");
        let model = get("OPENAI_MODEL").unwrap_or_else(|| DEFAULT_MODEL.to_string());
        let max_tokens = get("MAX_TOKENS")
            .and_then(|s| s.parse::<u32>().ok())
            .unwrap_or(DEFAULT_MAX_TOKENS);
        let temperature = get("TEMPERATURE")
            .and_then(|s| s.parse::<f32>().ok())
            .unwrap_or(DEFAULT_TEMPERATURE);
        let base_dir = get("PHOTOCOPIER_BASE_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("."));
        let template = get("PHOTOCOPIER_TEMPLATE").unwrap_or_else(|| DEFAULT_TEMPLATE.to_string());

        Self {
            api_key,
            api_base,
            model,
            max_tokens,
            temperature,
            base_dir,
            template,
        }
    }

    /// Returns the configured API key, if any.
    pub fn api_key(&self) -> Option<&str> {
        self.api_key.as_deref()
    }

    /// Returns the optional API base URL.
    pub fn api_base(&self) -> Option<&str> {
        self.api_base.as_deref()
    }

    /// Returns the model identifier.
    pub fn model(&self) -> &str {
        &self.model
    }

    /// Returns the completion budget per request.
    pub fn max_tokens(&self) -> u32 {
        self.max_tokens
    }

    /// Returns the sampling temperature.
    pub fn temperature(&self) -> f32 {
        self.temperature
    }

    /// Returns the project root.
    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    /// Returns the template course directory name.
    pub fn template(&self) -> &str {
        &self.template
    }

    /// Returns a copy with a different project root.
    pub fn with_base_dir(mut self, base_dir: impl Into<PathBuf>) -> Self {
        self.base_dir = base_dir.into();
        self
    }

    /// Returns a copy with a different template course name.
    pub fn with_template(mut self, template: impl Into<String>) -> Self {
        self.template = template.into();
        self
    }

    /// Whether everything required for model-backed generation is present.
    pub fn is_configured(&self) -> bool {
        self.api_key.is_some()
    }

    /// Human-readable list of missing required settings.
    pub fn missing_config(&self) -> Vec<String> {
        let mut missing = Vec::new();
        if self.api_key.is_none() {
            missing.push("OpenAI API Key (set OPENAI_API_KEY environment variable)".to_string());
        }
        missing
    }

    /// Settings for the model client, or `None` without an API key.
    pub fn model_settings(&self) -> Option<ModelSettings> {
        let api_key = self.api_key.clone()?;
        Some(ModelSettings {
            api_key,
            api_base: self.api_base.clone(),
            model: self.model.clone(),
            max_tokens: self.max_tokens,
            temperature: self.temperature,
        })
    }

    /// Writes `.env.example` into `dir` and returns its path.
    pub fn write_sample_env(&self, dir: &Path) -> Result<PathBuf> {
        let path = dir.join(SAMPLE_ENV_FILE);
        fs::write(&path, SAMPLE_ENV)
            .with_context(|| format!("Could not write {}", path.display()))?;
        Ok(path)
    }
}

/// Global storage for the lazily constructed configuration.
static CONFIG_SLOT: OnceLock<Mutex<Option<Arc<Config>>>> = OnceLock::new();

/// Returns the mutex guarding the global configuration slot.
fn slot() -> &'static Mutex<Option<Arc<Config>>> {
    CONFIG_SLOT.get_or_init(|| Mutex::new(None))
}

/// Returns the process-wide configuration, reading the environment on first
/// use.
pub fn get() -> Arc<Config> {
    let mut guard = slot().lock().unwrap_or_else(|poisoned| poisoned.into_inner());
    if let Some(cfg) = guard.as_ref() {
        return Arc::clone(cfg);
    }

    let cfg = Arc::new(Config::from_env());
    *guard = Some(Arc::clone(&cfg));
    cfg
}

/// Replaces the process-wide configuration, e.g. after CLI overrides.
pub fn set(config: Config) -> Arc<Config> {
    let cfg = Arc::new(config);
    let mut guard = slot().lock().unwrap_or_else(|poisoned| poisoned.into_inner());
    *guard = Some(Arc::clone(&cfg));
    cfg
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn api_key_falls_through_alternate_names() {
        let cfg = Config::from_lookup(lookup(&[("OPENAI_API_KEY", "  "), ("API_KEY", "k-3")]));
        assert_eq!(cfg.api_key(), Some("k-3"));
        assert!(cfg.is_configured());
    }

    #[test]
    fn bad_numbers_use_defaults() {
        let cfg = Config::from_lookup(lookup(&[("MAX_TOKENS", "lots"), ("TEMPERATURE", "warm")]));
        assert_eq!(cfg.max_tokens(), DEFAULT_MAX_TOKENS);
        assert_eq!(cfg.temperature(), DEFAULT_TEMPERATURE);
    }
}
