//! Error types for DEO Core
//!
//! - [`PipelineError`]: what `generate` can return to its caller
//! - [`StoreError`]: persistence collaborator failures
//! - [`ConfigError`]: configuration loading failures
//!
//! Generation failures never appear here; they are absorbed by the fallback
//! path inside the pipeline.

use deo_model::{DesignWeekId, DocumentType};
use std::path::PathBuf;

/// Caller-facing pipeline error
#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    /// No design week with this id
    #[error("design week not found: {0}")]
    DesignWeekNotFound(DesignWeekId),

    /// The design week has no approved or unreviewed items
    #[error("design week {0} has no approved items to generate from")]
    NoApprovedItems(DesignWeekId),

    /// Persistence failed
    #[error("store error: {0}")]
    Store(#[from] StoreError),

    /// Pipeline misconfigured
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Final document could not be serialized
    #[error("document serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl PipelineError {
    /// Whether the caller supplied unusable input
    #[inline]
    #[must_use]
    pub fn is_input_error(&self) -> bool {
        matches!(self, Self::DesignWeekNotFound(_) | Self::NoApprovedItems(_))
    }

    /// Whether retrying the same request may succeed
    #[inline]
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            Self::Store(StoreError::VersionConflict { .. } | StoreError::Unavailable(_))
        )
    }
}

/// Persistence collaborator errors
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// A document with this version already exists
    #[error("version conflict for {design_week_id}/{document_type}: version {version} already exists")]
    VersionConflict {
        design_week_id: DesignWeekId,
        document_type: DocumentType,
        version: u32,
    },

    /// Backing store unreachable
    #[error("store unavailable: {0}")]
    Unavailable(String),

    /// Stored data could not be decoded
    #[error("corrupt record: {0}")]
    Corrupt(String),
}

/// Configuration loading errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config file: {0}")]
    Parse(#[from] toml::de::Error),

    /// A value is out of its accepted range
    #[error("invalid value for {field}: {message}")]
    InvalidValue { field: &'static str, message: String },
}
