//! Generation metadata attached to every generated document

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Model id recorded when the document was synthesized without a backend
pub const FALLBACK_MODEL_ID: &str = "fallback-template";

/// Token counters reported by the backend
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenUsage {
    pub input_tokens: u64,
    pub output_tokens: u64,
}

impl TokenUsage {
    #[inline]
    #[must_use]
    pub fn new(input_tokens: u64, output_tokens: u64) -> Self {
        Self {
            input_tokens,
            output_tokens,
        }
    }

    #[inline]
    #[must_use]
    pub fn total(&self) -> u64 {
        self.input_tokens + self.output_tokens
    }
}

/// Provenance of a generated document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationMetadata {
    pub generated_at: DateTime<Utc>,
    /// Backend model id, or [`FALLBACK_MODEL_ID`]
    pub model: String,
    pub is_fallback: bool,
    pub source_item_count: usize,
    pub input_tokens: Option<u64>,
    pub output_tokens: Option<u64>,
    pub latency_ms: Option<u64>,
}

impl GenerationMetadata {
    /// Metadata for a backend-produced document
    #[must_use]
    pub fn generated(
        generated_at: DateTime<Utc>,
        model: impl Into<String>,
        usage: TokenUsage,
        latency_ms: u64,
        source_item_count: usize,
    ) -> Self {
        Self {
            generated_at,
            model: model.into(),
            is_fallback: false,
            source_item_count,
            input_tokens: Some(usage.input_tokens),
            output_tokens: Some(usage.output_tokens),
            latency_ms: Some(latency_ms),
        }
    }

    /// Metadata for a synthesized document
    #[must_use]
    pub fn fallback(
        generated_at: DateTime<Utc>,
        latency_ms: Option<u64>,
        source_item_count: usize,
    ) -> Self {
        Self {
            generated_at,
            model: FALLBACK_MODEL_ID.to_string(),
            is_fallback: true,
            source_item_count,
            input_tokens: None,
            output_tokens: None,
            latency_ms,
        }
    }

    /// Token usage, when the backend reported it
    #[must_use]
    pub fn usage(&self) -> Option<TokenUsage> {
        match (self.input_tokens, self.output_tokens) {
            (Some(input), Some(output)) => Some(TokenUsage::new(input, output)),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fallback_metadata_has_marker() {
        let meta = GenerationMetadata::fallback(Utc::now(), Some(12), 4);
        assert!(meta.is_fallback);
        assert_eq!(meta.model, FALLBACK_MODEL_ID);
        assert_eq!(meta.usage(), None);
    }

    #[test]
    fn generated_metadata_reports_usage() {
        let meta = GenerationMetadata::generated(Utc::now(), "m", TokenUsage::new(10, 20), 5, 3);
        assert!(!meta.is_fallback);
        assert_eq!(meta.usage().map(|u| u.total()), Some(30));
    }

    #[test]
    fn serializes_camel_case() {
        let meta = GenerationMetadata::fallback(Utc::now(), None, 0);
        let value = serde_json::to_value(&meta).unwrap();
        assert_eq!(value["isFallback"], true);
        assert!(value.get("sourceItemCount").is_some());
        assert!(value["latencyMs"].is_null());
    }
}
