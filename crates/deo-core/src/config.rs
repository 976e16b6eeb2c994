//! Pipeline configuration
//!
//! Loaded from TOML, then overridden by the environment:
//!
//! ```toml
//! pipeline_name = "document-generation"
//! model = "claude-sonnet-4-20250514"
//! max_tokens = 16000
//! temperature = 0.7
//! timeout_secs = 120
//! ```

use crate::error::ConfigError;
use deo_generation::GenerationSettings;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

/// Environment variable overriding the model id
pub const MODEL_ENV: &str = "DEO_MODEL";

/// Pipeline configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// Name recorded in operability log entries
    pub pipeline_name: String,
    /// Model id requested from the backend
    pub model: String,
    pub max_tokens: u32,
    pub temperature: f32,
    /// Upper bound on the backend call before falling back
    pub timeout_secs: u64,
}

impl PipelineConfig {
    /// Create default configuration
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    #[must_use]
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    #[inline]
    #[must_use]
    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = max_tokens;
        self
    }

    #[inline]
    #[must_use]
    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }

    #[inline]
    #[must_use]
    pub fn with_timeout_secs(mut self, timeout_secs: u64) -> Self {
        self.timeout_secs = timeout_secs;
        self
    }

    #[inline]
    #[must_use]
    pub fn with_pipeline_name(mut self, name: impl Into<String>) -> Self {
        self.pipeline_name = name.into();
        self
    }

    /// Parse TOML text and validate
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Load a TOML file and apply environment overrides
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_toml_str(&text)?.with_env_overrides();
        tracing::debug!(path = %path.display(), model = %config.model, "loaded pipeline config");
        Ok(config)
    }

    /// Apply `DEO_MODEL` when set and non-empty
    #[must_use]
    pub fn with_env_overrides(self) -> Self {
        self.with_overrides_from(|key| std::env::var(key).ok())
    }

    fn with_overrides_from(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        if let Some(model) = lookup(MODEL_ENV).filter(|m| !m.trim().is_empty()) {
            self.model = model.trim().to_string();
        }
        self
    }

    /// Check value ranges
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_tokens == 0 {
            return Err(ConfigError::InvalidValue {
                field: "max_tokens",
                message: "must be greater than zero".to_string(),
            });
        }
        if !(0.0..=1.0).contains(&self.temperature) {
            return Err(ConfigError::InvalidValue {
                field: "temperature",
                message: format!("{} is outside 0.0..=1.0", self.temperature),
            });
        }
        if self.timeout_secs == 0 {
            return Err(ConfigError::InvalidValue {
                field: "timeout_secs",
                message: "must be greater than zero".to_string(),
            });
        }
        Ok(())
    }

    /// Request parameters for the generation client
    #[must_use]
    pub fn generation_settings(&self) -> GenerationSettings {
        GenerationSettings {
            max_tokens: self.max_tokens,
            temperature: self.temperature,
        }
    }

    #[must_use]
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl Default for PipelineConfig {
    fn default() -> Self {
        let settings = GenerationSettings::default();
        Self {
            pipeline_name: "document-generation".to_string(),
            model: "claude-sonnet-4-20250514".to_string(),
            max_tokens: settings.max_tokens,
            temperature: settings.temperature,
            timeout_secs: 120,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn defaults_match_generation_settings() {
        let config = PipelineConfig::default();
        assert_eq!(config.generation_settings(), GenerationSettings::default());
        assert_eq!(config.timeout(), Duration::from_secs(120));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn partial_toml_keeps_defaults() {
        let config = PipelineConfig::from_toml_str("max_tokens = 8000\ntimeout_secs = 30\n").unwrap();
        assert_eq!(config.max_tokens, 8000);
        assert_eq!(config.timeout_secs, 30);
        assert_eq!(config.pipeline_name, "document-generation");
    }

    #[test]
    fn out_of_range_values_are_rejected() {
        let err = PipelineConfig::from_toml_str("temperature = 1.5").unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { field: "temperature", .. }));

        let err = PipelineConfig::from_toml_str("max_tokens = 0").unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { field: "max_tokens", .. }));
    }

    #[test]
    fn malformed_toml_is_parse_error() {
        let err = PipelineConfig::from_toml_str("max_tokens = \"many\"").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn model_override_from_environment() {
        let config = PipelineConfig::default().with_overrides_from(|key| {
            (key == MODEL_ENV).then(|| " claude-test ".to_string())
        });
        assert_eq!(config.model, "claude-test");

        let untouched = PipelineConfig::default()
            .with_model("kept")
            .with_overrides_from(|_| Some("   ".to_string()));
        assert_eq!(untouched.model, "kept");
    }

    #[test]
    fn load_reads_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "pipeline_name = \"nightly\"\ntemperature = 0.2").unwrap();

        let config = PipelineConfig::load(file.path()).unwrap();
        assert_eq!(config.pipeline_name, "nightly");
        assert!((config.temperature - 0.2).abs() < f32::EPSILON);
    }

    #[test]
    fn load_missing_file_is_io_error() {
        let err = PipelineConfig::load("/definitely/not/here.toml").unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }
}
