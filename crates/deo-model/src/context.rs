//! Domain generation context
//!
//! Normalized, typed view of one design week. Built fresh per request by the
//! mapper and consumed by the prompt assembler, the fallback synthesizer and
//! the base-document builder. Every value traces back to a participating
//! extracted item or a relational row.

use crate::language::Language;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Stakeholder {
    pub name: String,
    pub role: String,
    pub email: Option<String>,
    pub is_decision_maker: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Goal {
    pub title: String,
    pub description: String,
    pub priority: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Kpi {
    pub name: String,
    pub target: String,
    pub unit: Option<String>,
    pub baseline: Option<String>,
    pub frequency: Option<String>,
}

impl Kpi {
    /// `"<name>: <target> <unit>"`, without trailing whitespace
    #[must_use]
    pub fn summary(&self) -> String {
        let unit = self.unit.as_deref().unwrap_or_default();
        format!("{}: {} {}", self.name, self.target, unit)
            .trim_end()
            .to_string()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Volume {
    pub metric: String,
    pub value: String,
    pub period: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProcessStep {
    /// 1-based position in the happy path
    pub order: u32,
    pub title: String,
    pub description: String,
    pub actor: Option<String>,
    pub system: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExceptionCase {
    pub title: String,
    pub trigger: String,
    pub handling: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScopeEntry {
    pub description: String,
    pub notes: Option<String>,
}

/// Which of the four guardrail tags produced an entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum GuardrailKind {
    Never,
    Always,
    FinancialLimit,
    LegalRestriction,
}

impl GuardrailKind {
    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            Self::Never => "NEVER",
            Self::Always => "ALWAYS",
            Self::FinancialLimit => "FINANCIAL LIMIT",
            Self::LegalRestriction => "LEGAL RESTRICTION",
        }
    }
}

impl fmt::Display for GuardrailKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Guardrail {
    pub kind: GuardrailKind,
    pub rule: String,
    pub rationale: Option<String>,
    pub limit: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Integration {
    pub system_name: String,
    pub purpose: String,
    pub connection_type: Option<String>,
    pub data_fields: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BusinessRule {
    pub name: String,
    pub category: Option<String>,
    pub condition: Option<String>,
    pub action: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SecurityRequirement {
    pub requirement: String,
    pub category: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Channel {
    pub name: String,
    pub description: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersonaTrait {
    pub name: String,
    pub description: String,
    pub example: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EscalationScript {
    pub trigger: String,
    pub script: String,
    pub target: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MonitoringMetric {
    pub name: String,
    pub threshold: Option<String>,
    pub description: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LaunchCriterion {
    pub criterion: String,
    pub target: Option<String>,
}

/// Everything the generator knows about one Digital Employee project
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DomainGenerationContext {
    pub company_name: String,
    pub agent_name: String,
    pub description: Option<String>,
    pub language: Language,

    pub stakeholders: Vec<Stakeholder>,
    pub goals: Vec<Goal>,
    pub kpis: Vec<Kpi>,
    pub volumes: Vec<Volume>,
    pub process_steps: Vec<ProcessStep>,
    pub exceptions: Vec<ExceptionCase>,
    pub in_scope: Vec<ScopeEntry>,
    pub out_of_scope: Vec<ScopeEntry>,
    pub guardrails: Vec<Guardrail>,
    pub integrations: Vec<Integration>,
    pub business_rules: Vec<BusinessRule>,
    pub security_requirements: Vec<SecurityRequirement>,
    pub channels: Vec<Channel>,
    pub persona_traits: Vec<PersonaTrait>,
    pub escalation_scripts: Vec<EscalationScript>,
    pub monitoring_metrics: Vec<MonitoringMetric>,
    pub launch_criteria: Vec<LaunchCriterion>,
}

impl DomainGenerationContext {
    /// Empty context for a project
    #[must_use]
    pub fn new(company_name: impl Into<String>, agent_name: impl Into<String>) -> Self {
        Self {
            company_name: company_name.into(),
            agent_name: agent_name.into(),
            ..Self::default()
        }
    }

    /// Items counted as "sources" in generation metadata
    #[must_use]
    pub fn source_item_count(&self) -> usize {
        self.stakeholders.len()
            + self.goals.len()
            + self.kpis.len()
            + self.process_steps.len()
            + self.integrations.len()
    }

    /// Guardrails of one kind, in mapped order
    pub fn guardrails_of(&self, kind: GuardrailKind) -> impl Iterator<Item = &Guardrail> {
        self.guardrails.iter().filter(move |g| g.kind == kind)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kpi_summary_formats() {
        let kpi = Kpi {
            name: "Handling time".into(),
            target: "4".into(),
            unit: Some("minutes".into()),
            ..Kpi::default()
        };
        assert_eq!(kpi.summary(), "Handling time: 4 minutes");

        let unitless = Kpi {
            name: "CSAT".into(),
            target: "90%".into(),
            ..Kpi::default()
        };
        assert_eq!(unitless.summary(), "CSAT: 90%");
    }

    #[test]
    fn source_item_count_sums_core_collections() {
        let mut ctx = DomainGenerationContext::new("Acme", "Ava");
        ctx.stakeholders.push(Stakeholder::default());
        ctx.goals.push(Goal::default());
        ctx.kpis.push(Kpi::default());
        ctx.process_steps.push(ProcessStep::default());
        ctx.integrations.push(Integration::default());
        // Not counted
        ctx.channels.push(Channel::default());
        assert_eq!(ctx.source_item_count(), 5);
    }
}
