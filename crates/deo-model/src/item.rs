//! Extracted requirement items
//!
//! An item is one typed fact captured during a facilitated design-week
//! session. Items arrive loosely typed: a tag, free text and an optional
//! JSON payload whose shape depends on the tag.

use crate::payload::ItemPayload;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

/// Closed vocabulary of item tags
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ExtractedItemType {
    Stakeholder,
    Goal,
    KpiTarget,
    VolumeExpectation,
    HappyPathStep,
    ExceptionCase,
    GuardrailNever,
    GuardrailAlways,
    FinancialLimit,
    LegalRestriction,
    SecurityRequirement,
    Channel,
    PersonaTrait,
    EscalationScript,
    MonitoringMetric,
    LaunchCriterion,
    SystemIntegration,
    BusinessRule,
    /// Any tag outside the vocabulary; never mapped
    #[serde(other)]
    Unknown,
}

impl ExtractedItemType {
    /// Wire tag, as stored upstream
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Stakeholder => "STAKEHOLDER",
            Self::Goal => "GOAL",
            Self::KpiTarget => "KPI_TARGET",
            Self::VolumeExpectation => "VOLUME_EXPECTATION",
            Self::HappyPathStep => "HAPPY_PATH_STEP",
            Self::ExceptionCase => "EXCEPTION_CASE",
            Self::GuardrailNever => "GUARDRAIL_NEVER",
            Self::GuardrailAlways => "GUARDRAIL_ALWAYS",
            Self::FinancialLimit => "FINANCIAL_LIMIT",
            Self::LegalRestriction => "LEGAL_RESTRICTION",
            Self::SecurityRequirement => "SECURITY_REQUIREMENT",
            Self::Channel => "CHANNEL",
            Self::PersonaTrait => "PERSONA_TRAIT",
            Self::EscalationScript => "ESCALATION_SCRIPT",
            Self::MonitoringMetric => "MONITORING_METRIC",
            Self::LaunchCriterion => "LAUNCH_CRITERION",
            Self::SystemIntegration => "SYSTEM_INTEGRATION",
            Self::BusinessRule => "BUSINESS_RULE",
            Self::Unknown => "UNKNOWN",
        }
    }

    /// The four tags unioned into the guardrail list
    #[inline]
    #[must_use]
    pub fn is_guardrail(&self) -> bool {
        matches!(
            self,
            Self::GuardrailNever | Self::GuardrailAlways | Self::FinancialLimit | Self::LegalRestriction
        )
    }
}

impl fmt::Display for ExtractedItemType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Review status assigned by the facilitator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ReviewStatus {
    Approved,
    Pending,
    Rejected,
    NeedsClarification,
}

/// One extracted requirement fact
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtractedItem {
    /// Upstream identifier
    #[serde(default)]
    pub id: String,
    /// Item tag
    #[serde(rename = "type")]
    pub item_type: ExtractedItemType,
    /// Free text as captured
    #[serde(default)]
    pub content: String,
    /// Type-specific named fields, when the extractor produced them
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub structured_data: Option<Value>,
    /// Review status; unset means "not yet reviewed" and still participates
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<ReviewStatus>,
    /// Extractor confidence
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub confidence: Option<f64>,
}

impl ExtractedItem {
    /// Create a status-less item with free text only
    #[must_use]
    pub fn new(item_type: ExtractedItemType, content: impl Into<String>) -> Self {
        Self {
            id: String::new(),
            item_type,
            content: content.into(),
            structured_data: None,
            status: None,
            confidence: None,
        }
    }

    /// With upstream id
    #[inline]
    #[must_use]
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = id.into();
        self
    }

    /// With review status
    #[inline]
    #[must_use]
    pub fn with_status(mut self, status: ReviewStatus) -> Self {
        self.status = Some(status);
        self
    }

    /// With structured payload
    #[inline]
    #[must_use]
    pub fn with_structured_data(mut self, data: Value) -> Self {
        self.structured_data = Some(data);
        self
    }

    /// Whether the item takes part in generation (approved or unreviewed)
    #[inline]
    #[must_use]
    pub fn participates(&self) -> bool {
        matches!(self.status, None | Some(ReviewStatus::Approved))
    }

    /// Decode the structured payload for this item's tag
    ///
    /// Returns `None` when there is no payload or it does not decode; callers
    /// then fall back to parsing `content`.
    #[must_use]
    pub fn payload(&self) -> Option<ItemPayload> {
        let data = self.structured_data.as_ref()?;
        ItemPayload::decode(self.item_type, data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn item_type_wire_tags() {
        let ty: ExtractedItemType = serde_json::from_value(json!("KPI_TARGET")).unwrap();
        assert_eq!(ty, ExtractedItemType::KpiTarget);
        assert_eq!(ty.as_str(), "KPI_TARGET");
        assert_eq!(
            serde_json::to_value(ExtractedItemType::HappyPathStep).unwrap(),
            json!("HAPPY_PATH_STEP")
        );
    }

    #[test]
    fn unknown_tag_is_tolerated() {
        let ty: ExtractedItemType = serde_json::from_value(json!("DATA_FIELD")).unwrap();
        assert_eq!(ty, ExtractedItemType::Unknown);
    }

    #[test]
    fn participation_by_status() {
        let base = ExtractedItem::new(ExtractedItemType::Goal, "x");
        assert!(base.participates());
        assert!(base.clone().with_status(ReviewStatus::Approved).participates());
        assert!(!base.clone().with_status(ReviewStatus::Pending).participates());
        assert!(!base.clone().with_status(ReviewStatus::Rejected).participates());
        assert!(!base.with_status(ReviewStatus::NeedsClarification).participates());
    }

    #[test]
    fn item_deserializes_from_upstream_shape() {
        let item: ExtractedItem = serde_json::from_value(json!({
            "id": "itm_1",
            "type": "STAKEHOLDER",
            "content": "Jane Smith - CEO",
            "status": "APPROVED",
            "structuredData": {"name": "Jane Smith", "role": "CEO"}
        }))
        .unwrap();

        assert_eq!(item.item_type, ExtractedItemType::Stakeholder);
        assert_eq!(item.status, Some(ReviewStatus::Approved));
        assert!(item.payload().is_some());
    }

    #[test]
    fn guardrail_tags() {
        assert!(ExtractedItemType::FinancialLimit.is_guardrail());
        assert!(ExtractedItemType::LegalRestriction.is_guardrail());
        assert!(!ExtractedItemType::BusinessRule.is_guardrail());
    }
}
