//! Generation client
//!
//! Wraps a [`GenerationBackend`] with the request parameters, text
//! extraction, structured recovery and metadata. One backend call per
//! request; every failure is returned as a typed [`GenerationError`] for the
//! caller to route to the fallback synthesizer.

use crate::backend::{CompletionRequest, GenerationBackend};
use crate::error::GenerationError;
use crate::recovery::parse_sections;
use deo_model::{Clock, DomainGenerationContext, GeneratedContent, GenerationMetadata};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Instant;

/// Fixed request parameters
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerationSettings {
    /// Upper bound on generated tokens
    pub max_tokens: u32,
    /// Sampling temperature
    pub temperature: f32,
}

impl Default for GenerationSettings {
    fn default() -> Self {
        Self {
            max_tokens: 16_000,
            temperature: 0.7,
        }
    }
}

/// Single-attempt generation client
#[derive(Debug, Clone)]
pub struct GenerationClient {
    backend: Arc<dyn GenerationBackend>,
    clock: Arc<dyn Clock>,
    settings: GenerationSettings,
}

impl GenerationClient {
    #[must_use]
    pub fn new(
        backend: Arc<dyn GenerationBackend>,
        clock: Arc<dyn Clock>,
        settings: GenerationSettings,
    ) -> Self {
        Self {
            backend,
            clock,
            settings,
        }
    }

    /// Model id requests go to
    #[must_use]
    pub fn model_id(&self) -> &str {
        self.backend.model_id()
    }

    #[must_use]
    pub fn settings(&self) -> GenerationSettings {
        self.settings
    }

    /// Generate content for `prompt`
    ///
    /// # Errors
    /// - [`GenerationError::Backend`] when the call fails
    /// - [`GenerationError::NoTextContent`] when the answer has no text block
    /// - [`GenerationError::UnparsableContent`] when no section tree can be recovered
    pub async fn generate(
        &self,
        prompt: &str,
        ctx: &DomainGenerationContext,
    ) -> Result<GeneratedContent, GenerationError> {
        let request = CompletionRequest {
            prompt: prompt.to_string(),
            max_tokens: self.settings.max_tokens,
            temperature: self.settings.temperature,
        };

        let started = Instant::now();
        let response = self.backend.complete(&request).await?;
        let latency_ms = u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX);

        let text = response.first_text().ok_or(GenerationError::NoTextContent)?;
        let sections = parse_sections(text)?;

        tracing::debug!(
            model = %response.model,
            input_tokens = response.usage.input_tokens,
            output_tokens = response.usage.output_tokens,
            latency_ms,
            "generation succeeded"
        );

        let metadata = GenerationMetadata::generated(
            self.clock.now(),
            response.model.clone(),
            response.usage,
            latency_ms,
            ctx.source_item_count(),
        );
        Ok(GeneratedContent::new(sections, metadata))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::{CompletionResponse, ContentBlock, MockGenerationBackend};
    use crate::error::BackendError;
    use chrono::{TimeZone, Utc};
    use deo_model::context::{Goal, Stakeholder};
    use deo_model::{FixedClock, TokenUsage};

    fn clock() -> Arc<dyn Clock> {
        Arc::new(FixedClock::at(Utc.with_ymd_and_hms(2025, 6, 2, 10, 0, 0).unwrap()))
    }

    fn context() -> DomainGenerationContext {
        let mut ctx = DomainGenerationContext::new("Acme", "Ava");
        ctx.stakeholders.push(Stakeholder::default());
        ctx.goals.push(Goal::default());
        ctx.goals.push(Goal::default());
        ctx
    }

    fn client_with(mock: MockGenerationBackend) -> GenerationClient {
        GenerationClient::new(Arc::new(mock), clock(), GenerationSettings::default())
    }

    #[tokio::test]
    async fn success_attaches_metadata() {
        let mut mock = MockGenerationBackend::new();
        mock.expect_complete()
            .withf(|req| req.max_tokens == 16_000 && (req.temperature - 0.7).abs() < f32::EPSILON)
            .times(1)
            .returning(|_| {
                Ok(CompletionResponse::text(
                    "claude-test",
                    "```json\n{\"executiveSummary\": {\"overview\": \"Ava handles intake.\"}}\n```",
                    TokenUsage::new(900, 2100),
                ))
            });

        let content = client_with(mock).generate("prompt", &context()).await.unwrap();

        assert_eq!(content.sections.executive_summary.overview, "Ava handles intake.");
        assert!(!content.metadata.is_fallback);
        assert_eq!(content.metadata.model, "claude-test");
        assert_eq!(content.metadata.input_tokens, Some(900));
        assert_eq!(content.metadata.output_tokens, Some(2100));
        assert_eq!(content.metadata.source_item_count, 3);
        assert_eq!(content.metadata.generated_at, clock().now());
        assert!(content.metadata.latency_ms.is_some());
    }

    #[tokio::test]
    async fn no_text_block_fails() {
        let mut mock = MockGenerationBackend::new();
        mock.expect_complete().times(1).returning(|_| {
            Ok(CompletionResponse {
                model: "claude-test".into(),
                blocks: vec![ContentBlock::Other("tool_use".into())],
                usage: TokenUsage::default(),
            })
        });

        let err = client_with(mock).generate("prompt", &context()).await.unwrap_err();
        assert!(matches!(err, GenerationError::NoTextContent));
    }

    #[tokio::test]
    async fn prose_only_answer_is_unparsable() {
        let mut mock = MockGenerationBackend::new();
        mock.expect_complete().times(1).returning(|_| {
            Ok(CompletionResponse::text("claude-test", "Sorry, I can't.", TokenUsage::default()))
        });

        let err = client_with(mock).generate("prompt", &context()).await.unwrap_err();
        assert!(matches!(err, GenerationError::UnparsableContent(_)));
    }

    #[tokio::test]
    async fn backend_failure_is_not_retried() {
        let mut mock = MockGenerationBackend::new();
        mock.expect_complete().times(1).returning(|_| {
            Err(BackendError::Http {
                status: 529,
                body: "overloaded".into(),
            })
        });

        let err = client_with(mock).generate("prompt", &context()).await.unwrap_err();
        assert!(matches!(err, GenerationError::Backend(BackendError::Http { status: 529, .. })));
    }

    #[test]
    fn default_settings() {
        let settings = GenerationSettings::default();
        assert_eq!(settings.max_tokens, 16_000);
        assert!((settings.temperature - 0.7).abs() < f32::EPSILON);
    }
}
