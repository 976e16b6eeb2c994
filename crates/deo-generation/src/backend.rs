//! Generation backend seam

use crate::error::BackendError;
use async_trait::async_trait;
use deo_model::TokenUsage;
use serde::{Deserialize, Serialize};

/// One generation call
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompletionRequest {
    pub prompt: String,
    pub max_tokens: u32,
    pub temperature: f32,
}

/// Block of a backend answer
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContentBlock {
    Text(String),
    /// Non-text block (tool use, thinking, ...), identified by its type tag
    Other(String),
}

/// Backend answer
#[derive(Debug, Clone, PartialEq)]
pub struct CompletionResponse {
    /// Model id reported by the backend
    pub model: String,
    pub blocks: Vec<ContentBlock>,
    pub usage: TokenUsage,
}

impl CompletionResponse {
    /// Answer with a single text block
    #[must_use]
    pub fn text(model: impl Into<String>, text: impl Into<String>, usage: TokenUsage) -> Self {
        Self {
            model: model.into(),
            blocks: vec![ContentBlock::Text(text.into())],
            usage,
        }
    }

    /// First text block, if any
    #[must_use]
    pub fn first_text(&self) -> Option<&str> {
        self.blocks.iter().find_map(|block| match block {
            ContentBlock::Text(text) => Some(text.as_str()),
            ContentBlock::Other(_) => None,
        })
    }
}

/// External text-generation backend
///
/// Implementations make exactly one call per invocation; retry policy is
/// not theirs to decide.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait GenerationBackend: Send + Sync + std::fmt::Debug {
    /// Run one completion
    async fn complete(&self, request: &CompletionRequest) -> Result<CompletionResponse, BackendError>;

    /// Model id requests are sent to
    fn model_id(&self) -> &str;
}

/// Backend that never reaches a model
///
/// Every call fails with [`BackendError::Unavailable`], which routes the
/// pipeline to its fallback document.
#[derive(Debug, Clone, Default)]
pub struct OfflineBackend;

#[async_trait]
impl GenerationBackend for OfflineBackend {
    async fn complete(&self, _request: &CompletionRequest) -> Result<CompletionResponse, BackendError> {
        Err(BackendError::Unavailable("offline mode".to_string()))
    }

    fn model_id(&self) -> &str {
        "offline"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn offline_backend_is_unavailable() {
        let request = CompletionRequest {
            prompt: "p".into(),
            max_tokens: 10,
            temperature: 0.0,
        };
        let err = OfflineBackend.complete(&request).await.unwrap_err();
        assert!(matches!(err, BackendError::Unavailable(_)));
    }

    #[test]
    fn first_text_skips_other_blocks() {
        let response = CompletionResponse {
            model: "m".into(),
            blocks: vec![
                ContentBlock::Other("thinking".into()),
                ContentBlock::Text("hello".into()),
            ],
            usage: TokenUsage::default(),
        };
        assert_eq!(response.first_text(), Some("hello"));
    }

    #[test]
    fn no_text_blocks() {
        let response = CompletionResponse {
            model: "m".into(),
            blocks: vec![ContentBlock::Other("tool_use".into())],
            usage: TokenUsage::default(),
        };
        assert_eq!(response.first_text(), None);
    }
}
