//! Base document builder
//!
//! The base document is the structured, non-narrative half of a deliverable:
//! tables straight from the context plus fields maintained elsewhere (the
//! timeline). Narrative content is merged into it afterwards.

use deo_model::context::{Goal, Guardrail, Integration, Kpi, ProcessStep, ScopeEntry, Stakeholder};
use deo_model::{DocumentType, DomainGenerationContext, Language};
use serde::{Deserialize, Serialize};

/// Overview used when the project has no description
pub const OVERVIEW_PLACEHOLDER: &str = "[Project description to be provided]";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KeyObjectiveRow {
    pub title: String,
    pub description: String,
}

impl From<&Goal> for KeyObjectiveRow {
    fn from(goal: &Goal) -> Self {
        Self {
            title: goal.title.clone(),
            description: goal.description.clone(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScopeTable {
    pub in_scope: Vec<ScopeEntry>,
    pub out_of_scope: Vec<ScopeEntry>,
}

/// Structured skeleton of a deliverable
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BaseDocument {
    pub document_type: DocumentType,
    pub title: String,
    pub company_name: String,
    pub agent_name: String,
    pub language: Language,
    pub overview: String,
    pub key_objectives: Vec<KeyObjectiveRow>,
    pub stakeholders: Vec<Stakeholder>,
    pub kpis: Vec<Kpi>,
    pub process_steps: Vec<ProcessStep>,
    pub integrations: Vec<Integration>,
    pub scope: ScopeTable,
    pub guardrails: Vec<Guardrail>,
    /// Maintained outside the generator; carried through untouched
    pub timeline: Option<String>,
}

impl BaseDocument {
    /// Build from the context and the design week's timeline
    #[must_use]
    pub fn build(
        ctx: &DomainGenerationContext,
        document_type: DocumentType,
        timeline: Option<&str>,
    ) -> Self {
        Self {
            document_type,
            title: format!("{}: {}", document_type.title(), ctx.agent_name),
            company_name: ctx.company_name.clone(),
            agent_name: ctx.agent_name.clone(),
            language: ctx.language,
            overview: ctx
                .description
                .clone()
                .unwrap_or_else(|| OVERVIEW_PLACEHOLDER.to_string()),
            key_objectives: ctx.goals.iter().map(KeyObjectiveRow::from).collect(),
            stakeholders: ctx.stakeholders.clone(),
            kpis: ctx.kpis.clone(),
            process_steps: ctx.process_steps.clone(),
            integrations: ctx.integrations.clone(),
            scope: ScopeTable {
                in_scope: ctx.in_scope.clone(),
                out_of_scope: ctx.out_of_scope.clone(),
            },
            guardrails: ctx.guardrails.clone(),
            timeline: timeline.map(str::to_string),
        }
    }

    /// JSON tree the merger works on
    pub fn to_value(&self) -> Result<serde_json::Value, serde_json::Error> {
        serde_json::to_value(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_document_projects_context() {
        let mut ctx = DomainGenerationContext::new("Acme", "Ava");
        ctx.goals.push(Goal {
            title: "Reduce Claim Time".into(),
            description: "process faster".into(),
            priority: None,
        });

        let base = BaseDocument::build(&ctx, DocumentType::ExecutiveBrief, Some("Q3 go-live"));
        assert_eq!(base.title, "Digital Employee Executive Brief: Ava");
        assert_eq!(base.overview, OVERVIEW_PLACEHOLDER);
        assert_eq!(base.key_objectives[0].title, "Reduce Claim Time");

        let value = base.to_value().unwrap();
        assert_eq!(value["documentType"], "EXECUTIVE_BRIEF");
        assert_eq!(value["timeline"], "Q3 go-live");
        assert_eq!(value["language"], "en");
        assert!(value["scope"]["inScope"].is_array());
    }

    #[test]
    fn description_becomes_overview() {
        let mut ctx = DomainGenerationContext::new("Acme", "Ava");
        ctx.description = Some("Claims intake assistant".into());
        let base = BaseDocument::build(&ctx, DocumentType::DesignDocument, None);
        assert_eq!(base.overview, "Claims intake assistant");
        assert_eq!(base.timeline, None);
    }
}
