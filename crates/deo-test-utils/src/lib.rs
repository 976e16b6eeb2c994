//! Testing utilities for DEO workspace
//!
//! Shared fixtures, a scripted backend and a frozen clock.

#![allow(missing_docs)]

use async_trait::async_trait;
use chrono::{DateTime, TimeZone, Utc};
use deo_generation::{BackendError, CompletionRequest, CompletionResponse, GenerationBackend};
use deo_model::{
    DesignWeek, DomainGenerationContext, ExtractedItem, ExtractedItemType, FixedClock,
    IntegrationRecord, Language, ReviewStatus, ScopeClassification, ScopeItemRecord, Session,
    TokenUsage,
};
use serde_json::json;
use std::collections::VecDeque;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;

pub const TEST_MODEL: &str = "claude-test";

pub fn fixed_instant() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 6, 2, 10, 0, 0).unwrap()
}

pub fn fixed_clock() -> Arc<FixedClock> {
    Arc::new(FixedClock::at(fixed_instant()))
}

/// Design week for "Acme Insurance" with a mix of approved, pending,
/// rejected and unreviewed items
pub fn sample_design_week() -> DesignWeek {
    let mut week = DesignWeek::new("Acme Insurance", "Claire");
    week.description = Some("Claire handles first notice of loss for motor claims.".into());
    week.timeline = Some("Build in July, go-live 1 September".into());

    let kickoff = vec![
        ExtractedItem::new(ExtractedItemType::Stakeholder, "Jane Smith - CEO")
            .with_status(ReviewStatus::Approved),
        ExtractedItem::new(ExtractedItemType::Stakeholder, "Tom Jones - Claims Lead"),
        ExtractedItem::new(ExtractedItemType::Goal, "Reduce Claim Time: process faster")
            .with_status(ReviewStatus::Approved),
        ExtractedItem::new(ExtractedItemType::Goal, "Replace the call center entirely")
            .with_status(ReviewStatus::Rejected),
        ExtractedItem::new(ExtractedItemType::KpiTarget, "Average handling time")
            .with_status(ReviewStatus::Approved)
            .with_structured_data(json!({
                "name": "Average handling time",
                "target": "4",
                "unit": "minutes",
                "baseline": "11 minutes"
            })),
        ExtractedItem::new(ExtractedItemType::KpiTarget, "Automation rate: 40%")
            .with_status(ReviewStatus::Approved),
        ExtractedItem::new(ExtractedItemType::VolumeExpectation, "Claims per month: 12000")
            .with_status(ReviewStatus::Pending),
    ];

    let process = vec![
        ExtractedItem::new(ExtractedItemType::HappyPathStep, "Receive claim: customer submits FNOL form")
            .with_status(ReviewStatus::Approved),
        ExtractedItem::new(ExtractedItemType::HappyPathStep, "Validate policy: look up coverage")
            .with_status(ReviewStatus::Approved)
            .with_structured_data(json!({"title": "Validate policy", "system": "PolicyDB"})),
        ExtractedItem::new(ExtractedItemType::ExceptionCase, "Injury reported: bodily injury mentioned")
            .with_status(ReviewStatus::Approved),
        ExtractedItem::new(ExtractedItemType::GuardrailNever, "Never admit liability")
            .with_status(ReviewStatus::Approved),
        ExtractedItem::new(ExtractedItemType::FinancialLimit, "No payouts above EUR 5000")
            .with_status(ReviewStatus::Approved),
        ExtractedItem::new(ExtractedItemType::Channel, "Web chat: embedded on the claims portal")
            .with_status(ReviewStatus::Approved),
        ExtractedItem::new(ExtractedItemType::SystemIntegration, "Guidewire: claim registration")
            .with_status(ReviewStatus::Approved),
    ];

    week.sessions = vec![
        Session {
            id: "kickoff".into(),
            items: kickoff,
        },
        Session {
            id: "process".into(),
            items: process,
        },
    ];
    week.scope_items = vec![
        ScopeItemRecord::new("Motor claims intake", ScopeClassification::InScope),
        ScopeItemRecord::new("Property claims", ScopeClassification::OutOfScope),
        ScopeItemRecord::new("Fraud scoring", ScopeClassification::Ambiguous),
    ];
    week.integrations = vec![IntegrationRecord {
        system_name: "PolicyDB".into(),
        purpose: "Coverage lookup".into(),
        connection_type: Some("REST".into()),
        data_fields: vec!["policyNumber".into()],
    }];
    week
}

/// The same week with every item pending review
pub fn unapproved_design_week() -> DesignWeek {
    let mut week = sample_design_week();
    for session in &mut week.sessions {
        for item in &mut session.items {
            item.status = Some(ReviewStatus::Pending);
        }
    }
    week
}

pub fn sample_context() -> DomainGenerationContext {
    deo_mapper::map_design_week(&sample_design_week())
}

pub fn sample_context_in(language: Language) -> DomainGenerationContext {
    let mut week = sample_design_week();
    week.language = language;
    deo_mapper::map_design_week(&week)
}

/// Model answer wrapped in prose and a code fence
pub fn sample_model_answer() -> String {
    let body = json!({
        "executiveSummary": {
            "overview": "Claire takes first notice of loss for Acme Insurance.",
            "keyObjectives": [{"title": "Reduce Claim Time", "description": "process faster"}],
            "expectedOutcomes": ["Automate 40% of motor claims intake"],
            "keyBenefits": [{"benefit": "Faster intake", "metric": "4 minutes average handling"}],
            "recommendation": "Proceed to build."
        },
        "riskAssessment": {
            "narrative": "Moderate.",
            "risks": [{"risk": "PolicyDB outage", "likelihood": "LOW", "impact": "HIGH", "mitigation": "Queue and retry"}]
        }
    });
    format!("Here is the document you asked for:\n```json\n{body:#}\n```\nLet me know if you need changes.")
}

/// Model answer with claims no KPI supports
pub fn ungrounded_model_answer() -> String {
    json!({
        "executiveSummary": {
            "overview": "Claire transforms claims.",
            "expectedOutcomes": ["Cut operating cost by 65 %"],
            "keyBenefits": [{"benefit": "Loyalty", "metric": "NPS +25"}]
        }
    })
    .to_string()
}

pub fn text_response(text: impl Into<String>) -> CompletionResponse {
    CompletionResponse::text(TEST_MODEL, text, TokenUsage::new(1200, 3400))
}

/// Backend replaying scripted results in order
///
/// Once the script runs out every call fails with `Unavailable`.
#[derive(Debug)]
pub struct ScriptedBackend {
    script: Mutex<VecDeque<Result<CompletionResponse, BackendError>>>,
    requests: Mutex<Vec<CompletionRequest>>,
    delay: Option<Duration>,
}

impl ScriptedBackend {
    pub fn new(script: Vec<Result<CompletionResponse, BackendError>>) -> Self {
        Self {
            script: Mutex::new(script.into()),
            requests: Mutex::new(Vec::new()),
            delay: None,
        }
    }

    pub fn answering(text: impl Into<String>) -> Self {
        Self::new(vec![Ok(text_response(text))])
    }

    pub fn failing(error: BackendError) -> Self {
        Self::new(vec![Err(error)])
    }

    /// Sleep before answering
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub async fn requests(&self) -> Vec<CompletionRequest> {
        self.requests.lock().await.clone()
    }
}

#[async_trait]
impl GenerationBackend for ScriptedBackend {
    async fn complete(&self, request: &CompletionRequest) -> Result<CompletionResponse, BackendError> {
        self.requests.lock().await.push(request.clone());
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        self.script
            .lock()
            .await
            .pop_front()
            .unwrap_or_else(|| Err(BackendError::Unavailable("script exhausted".into())))
    }

    fn model_id(&self) -> &str {
        TEST_MODEL
    }
}
