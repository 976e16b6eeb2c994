//! Per-type structured payloads
//!
//! Upstream extractors attach a free-form JSON object to many items. Each tag
//! has its own set of named fields; this module gives every tag a typed view
//! so the mapper never indexes into raw JSON. All fields are optional: the
//! mapper prefers a present field and falls back to parsing `content` for the
//! rest.
//!
//! Extractors disagree on key names (`title` or `description` for a guardrail
//! rule, `name` or `metric` for a KPI). Every key gets its own field so a
//! payload carrying several of them still decodes; precedence is applied in
//! the mapper.

use crate::item::ExtractedItemType;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Typed payload, one variant per mapped tag
#[derive(Debug, Clone, PartialEq)]
pub enum ItemPayload {
    Stakeholder(StakeholderFields),
    Goal(GoalFields),
    Kpi(KpiFields),
    Volume(VolumeFields),
    ProcessStep(ProcessStepFields),
    Exception(ExceptionFields),
    Guardrail(GuardrailFields),
    Security(SecurityFields),
    Channel(ChannelFields),
    PersonaTrait(PersonaTraitFields),
    EscalationScript(EscalationFields),
    MonitoringMetric(MonitoringFields),
    LaunchCriterion(LaunchCriterionFields),
    Integration(IntegrationFields),
    BusinessRule(BusinessRuleFields),
}

impl ItemPayload {
    /// Decode `data` according to `item_type`
    ///
    /// Returns `None` for unmapped tags, non-object payloads, or payloads
    /// whose fields have incompatible JSON types.
    #[must_use]
    pub fn decode(item_type: ExtractedItemType, data: &Value) -> Option<Self> {
        if !data.is_object() {
            return None;
        }

        fn typed<T: for<'de> Deserialize<'de>>(data: &Value) -> Option<T> {
            serde_json::from_value(data.clone()).ok()
        }

        use ExtractedItemType as Ty;
        match item_type {
            Ty::Stakeholder => typed(data).map(Self::Stakeholder),
            Ty::Goal => typed(data).map(Self::Goal),
            Ty::KpiTarget => typed(data).map(Self::Kpi),
            Ty::VolumeExpectation => typed(data).map(Self::Volume),
            Ty::HappyPathStep => typed(data).map(Self::ProcessStep),
            Ty::ExceptionCase => typed(data).map(Self::Exception),
            Ty::GuardrailNever | Ty::GuardrailAlways | Ty::FinancialLimit | Ty::LegalRestriction => {
                typed(data).map(Self::Guardrail)
            }
            Ty::SecurityRequirement => typed(data).map(Self::Security),
            Ty::Channel => typed(data).map(Self::Channel),
            Ty::PersonaTrait => typed(data).map(Self::PersonaTrait),
            Ty::EscalationScript => typed(data).map(Self::EscalationScript),
            Ty::MonitoringMetric => typed(data).map(Self::MonitoringMetric),
            Ty::LaunchCriterion => typed(data).map(Self::LaunchCriterion),
            Ty::SystemIntegration => typed(data).map(Self::Integration),
            Ty::BusinessRule => typed(data).map(Self::BusinessRule),
            Ty::Unknown => None,
        }
    }
}

/// Accepts strings, numbers and booleans; empty strings become `None`
fn lenient_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::String(s)) => {
            let trimmed = s.trim();
            (!trimmed.is_empty()).then(|| trimmed.to_string())
        }
        Some(Value::Number(n)) => Some(n.to_string()),
        Some(Value::Bool(b)) => Some(b.to_string()),
        _ => None,
    })
}

/// Accepts integers or numeric strings
fn lenient_u32<'de, D>(deserializer: D) -> Result<Option<u32>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::Number(n)) => n.as_u64().and_then(|v| u32::try_from(v).ok()),
        Some(Value::String(s)) => s.trim().parse().ok(),
        _ => None,
    })
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StakeholderFields {
    #[serde(default, deserialize_with = "lenient_string")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub role: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub title: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub email: Option<String>,
    #[serde(default)]
    pub is_decision_maker: Option<bool>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GoalFields {
    #[serde(default, deserialize_with = "lenient_string")]
    pub title: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub priority: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KpiFields {
    #[serde(default, deserialize_with = "lenient_string")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub metric: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub title: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub target: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub target_value: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub unit: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub baseline: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub current_value: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub frequency: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub measurement_frequency: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VolumeFields {
    #[serde(default, deserialize_with = "lenient_string")]
    pub metric: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub value: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub volume: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub amount: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub period: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub frequency: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProcessStepFields {
    #[serde(default, deserialize_with = "lenient_u32")]
    pub step_number: Option<u32>,
    #[serde(default, deserialize_with = "lenient_u32")]
    pub order: Option<u32>,
    #[serde(default, deserialize_with = "lenient_u32")]
    pub step: Option<u32>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub title: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub actor: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub system: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExceptionFields {
    #[serde(default, deserialize_with = "lenient_string")]
    pub title: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub scenario: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub trigger: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub condition: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub handling: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub resolution: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub action: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GuardrailFields {
    #[serde(default, deserialize_with = "lenient_string")]
    pub rule: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub title: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub rationale: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub reason: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub limit: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub amount: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub threshold: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SecurityFields {
    #[serde(default, deserialize_with = "lenient_string")]
    pub requirement: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub title: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub category: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChannelFields {
    #[serde(default, deserialize_with = "lenient_string")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub channel: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub description: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersonaTraitFields {
    #[serde(default, rename = "trait", deserialize_with = "lenient_string")]
    pub trait_name: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub example: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EscalationFields {
    #[serde(default, deserialize_with = "lenient_string")]
    pub trigger: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub condition: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub script: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub message: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub target: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub escalate_to: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MonitoringFields {
    #[serde(default, deserialize_with = "lenient_string")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub metric: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub threshold: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub description: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LaunchCriterionFields {
    #[serde(default, deserialize_with = "lenient_string")]
    pub criterion: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub title: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub target: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IntegrationFields {
    #[serde(default, deserialize_with = "lenient_string")]
    pub system_name: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub system: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub purpose: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub connection_type: Option<String>,
    #[serde(default)]
    pub data_fields: Option<Vec<String>>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BusinessRuleFields {
    #[serde(default, deserialize_with = "lenient_string")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub title: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub condition: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub action: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub category: Option<String>,
}
