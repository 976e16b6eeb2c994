//! Document pipeline
//!
//! The caller-facing entry point. One request runs sequentially:
//!
//! 1. Load the design week and reject unusable input
//! 2. Map items into a generation context
//! 3. Assemble the request and call the backend, bounded by a timeout
//! 4. Validate generated content, or synthesize a fallback on any failure
//! 5. Merge into the base document, persist a new draft version, log usage

use crate::base::BaseDocument;
use crate::config::PipelineConfig;
use crate::error::PipelineError;
use crate::fallback::FallbackSynthesizer;
use crate::merger::DocumentMerger;
use crate::missing::missing_fields;
use crate::store::{DesignWeekStore, DocumentRecord, OperabilityLogEntry};
use crate::validator::ConsistencyValidator;
use deo_generation::{GenerationBackend, GenerationClient, GenerationError};
use deo_mapper::map_design_week;
use deo_model::{
    Clock, DesignWeekId, DocumentType, DomainGenerationContext, GeneratedContent, TokenUsage,
};
use deo_prompt::PromptAssembler;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::sync::Arc;
use std::time::Instant;

/// Result of one `generate` call
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationOutput {
    /// Final merged document
    pub document: Value,
    /// Backend token usage; `None` for fallback documents
    pub usage: Option<TokenUsage>,
    /// Required item kinds with nothing captured
    pub missing_fields: Vec<String>,
    /// Consistency warnings for generated content
    pub warnings: Vec<String>,
    /// Stored document version
    pub version: u32,
    pub is_fallback: bool,
}

/// Outcome of the generation stage
#[derive(Debug)]
struct StageOutcome {
    content: GeneratedContent,
    warnings: Vec<String>,
    failure: Option<GenerationError>,
    elapsed_ms: u64,
}

/// Requirements-to-document pipeline
#[derive(Debug)]
pub struct DocumentPipeline {
    config: PipelineConfig,
    client: GenerationClient,
    store: Arc<dyn DesignWeekStore>,
    clock: Arc<dyn Clock>,
    assembler: PromptAssembler,
    validator: ConsistencyValidator,
    fallback: FallbackSynthesizer,
    merger: DocumentMerger,
}

impl DocumentPipeline {
    /// Create a pipeline over its collaborators
    pub fn new(
        config: PipelineConfig,
        backend: Arc<dyn GenerationBackend>,
        store: Arc<dyn DesignWeekStore>,
        clock: Arc<dyn Clock>,
    ) -> Result<Self, PipelineError> {
        config.validate()?;
        let client = GenerationClient::new(backend, Arc::clone(&clock), config.generation_settings());
        Ok(Self {
            client,
            store,
            fallback: FallbackSynthesizer::new(Arc::clone(&clock)),
            clock,
            config,
            assembler: PromptAssembler::new(),
            validator: ConsistencyValidator::new(),
            merger: DocumentMerger::new(),
        })
    }

    #[inline]
    #[must_use]
    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Generate, persist and return a document
    ///
    /// Generation failures never surface here: they produce a fallback
    /// document flagged with `isFallback`.
    ///
    /// # Errors
    /// - [`PipelineError::DesignWeekNotFound`] / [`PipelineError::NoApprovedItems`]
    ///   before any generation is attempted
    /// - [`PipelineError::Store`] when loading the week or storing the
    ///   document fails; a failed operability log write is only logged
    pub async fn generate(
        &self,
        design_week_id: DesignWeekId,
        document_type: DocumentType,
    ) -> Result<GenerationOutput, PipelineError> {
        tracing::info!(%design_week_id, %document_type, "generating document");

        let week = self
            .store
            .load_design_week(design_week_id)
            .await?
            .ok_or(PipelineError::DesignWeekNotFound(design_week_id))?;

        if week.participating_items().next().is_none() {
            tracing::info!(%design_week_id, "no approved items; refusing to generate");
            return Err(PipelineError::NoApprovedItems(design_week_id));
        }

        let ctx = map_design_week(&week);
        tracing::debug!(
            stakeholders = ctx.stakeholders.len(),
            goals = ctx.goals.len(),
            kpis = ctx.kpis.len(),
            process_steps = ctx.process_steps.len(),
            integrations = ctx.integrations.len(),
            language = ctx.language.code(),
            "mapped generation context"
        );

        let outcome = self.run_generation(&ctx).await;

        let base = BaseDocument::build(&ctx, document_type, week.timeline.as_deref()).to_value()?;
        let document = self.merger.merge(&base, &outcome.content)?;

        let version = self
            .store
            .latest_document_version(design_week_id, document_type)
            .await?
            .unwrap_or(0)
            + 1;

        let record = DocumentRecord::draft(
            design_week_id,
            document_type,
            version,
            document.clone(),
            self.clock.now(),
        );
        if let Err(e) = self.store.append_document(record).await {
            tracing::error!(%design_week_id, version, error = %e, "failed to store document");
            return Err(e.into());
        }

        let entry = self.operability_entry(design_week_id, document_type, version, &outcome);
        // The document is already stored; a lost log entry must not turn
        // into an error that invites a retry and a duplicate version.
        if let Err(e) = self.store.log_operation(entry).await {
            tracing::error!(%design_week_id, version, error = %e, "failed to write operability log");
        }

        let is_fallback = outcome.content.is_fallback();
        tracing::info!(
            %design_week_id,
            version,
            is_fallback,
            warnings = outcome.warnings.len(),
            "document generated"
        );

        Ok(GenerationOutput {
            document,
            usage: outcome.content.metadata.usage(),
            missing_fields: missing_fields(&week, document_type),
            warnings: outcome.warnings,
            version,
            is_fallback,
        })
    }

    /// Backend attempt with validation, or fallback on any failure
    async fn run_generation(&self, ctx: &DomainGenerationContext) -> StageOutcome {
        let prompt = self.assembler.assemble(ctx);
        tracing::debug!(prompt_chars = prompt.len(), model = self.client.model_id(), "assembled request");

        let started = Instant::now();
        let result = match tokio::time::timeout(self.config.timeout(), self.client.generate(&prompt, ctx)).await {
            Ok(result) => result,
            Err(_) => Err(GenerationError::TimedOut {
                after_secs: self.config.timeout_secs,
            }),
        };
        let elapsed_ms = u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX);

        match result {
            Ok(content) => {
                let warnings = self.validator.validate(&content.sections, &ctx.kpis);
                for warning in &warnings {
                    tracing::debug!(%warning, "consistency warning");
                }
                StageOutcome {
                    content,
                    warnings,
                    failure: None,
                    elapsed_ms,
                }
            }
            Err(e) => {
                tracing::warn!(kind = e.kind(), error = %e, "generation failed; using fallback document");
                StageOutcome {
                    content: self.fallback.synthesize(ctx, Some(elapsed_ms)),
                    warnings: Vec::new(),
                    failure: Some(e),
                    elapsed_ms,
                }
            }
        }
    }

    fn operability_entry(
        &self,
        design_week_id: DesignWeekId,
        document_type: DocumentType,
        version: u32,
        outcome: &StageOutcome,
    ) -> OperabilityLogEntry {
        let metadata = &outcome.content.metadata;
        OperabilityLogEntry {
            pipeline: self.config.pipeline_name.clone(),
            model: metadata.model.clone(),
            input_tokens: metadata.input_tokens,
            output_tokens: metadata.output_tokens,
            latency_ms: metadata.latency_ms.unwrap_or(outcome.elapsed_ms),
            success: outcome.failure.is_none(),
            metadata: json!({
                "designWeekId": design_week_id,
                "documentType": document_type,
                "version": version,
                "isFallback": metadata.is_fallback,
                "failure": outcome.failure.as_ref().map(GenerationError::kind),
                "error": outcome.failure.as_ref().map(ToString::to_string),
                "warningCount": outcome.warnings.len(),
            }),
            created_at: self.clock.now(),
        }
    }
}
