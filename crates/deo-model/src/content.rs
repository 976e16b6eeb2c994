//! Generated document content
//!
//! The section tree is fixed. Every struct uses container-level
//! `#[serde(default)]` so a backend answer that omits a list still yields
//! the full shape with empty collections, and serialization always emits
//! every key. Keys are camelCase on the wire.

use crate::metadata::GenerationMetadata;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct KeyObjective {
    pub title: String,
    pub description: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct KeyBenefit {
    pub benefit: String,
    /// Quantified claim backing the benefit; empty when qualitative
    pub metric: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ExecutiveSummary {
    pub overview: String,
    pub key_objectives: Vec<KeyObjective>,
    pub expected_outcomes: Vec<String>,
    pub key_benefits: Vec<KeyBenefit>,
    pub recommendation: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CurrentStateAnalysis {
    pub narrative: String,
    pub pain_points: Vec<String>,
    pub current_volumes: Vec<String>,
    pub baseline_metrics: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FutureStateVision {
    pub narrative: String,
    pub transformation_highlights: Vec<String>,
    pub agent_capabilities: Vec<String>,
    pub customer_experience: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ExceptionNarrative {
    pub scenario: String,
    pub handling: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProcessAnalysis {
    pub narrative: String,
    pub happy_path_summary: String,
    pub exception_handling: Vec<ExceptionNarrative>,
    pub automation_opportunities: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ScopeRationale {
    pub item: String,
    pub rationale: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ScopeAnalysis {
    pub narrative: String,
    pub in_scope_summary: Vec<String>,
    pub out_of_scope_rationale: Vec<ScopeRationale>,
    pub guardrails_summary: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct IntegrationNarrative {
    pub system: String,
    pub purpose: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TechnicalFoundation {
    pub narrative: String,
    pub integration_overview: Vec<IntegrationNarrative>,
    pub security_considerations: Vec<String>,
    pub data_flow_summary: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Risk {
    pub risk: String,
    pub likelihood: String,
    pub impact: String,
    pub mitigation: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RiskAssessment {
    pub narrative: String,
    pub risks: Vec<Risk>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Phase {
    pub name: String,
    pub duration: String,
    pub activities: Vec<String>,
    pub deliverables: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TrainingAudience {
    pub audience: String,
    pub format: String,
    pub topics: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TrainingPlan {
    pub overview: String,
    pub audiences: Vec<TrainingAudience>,
    pub timeline: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ImplementationApproach {
    pub narrative: String,
    pub phases: Vec<Phase>,
    pub change_management: Vec<String>,
    pub training_plan: TrainingPlan,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MetricNarrative {
    pub name: String,
    pub target: String,
    pub measurement: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SuccessMetrics {
    pub narrative: String,
    pub kpis: Vec<MetricNarrative>,
    pub monitoring_approach: String,
    pub launch_criteria: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Conclusion {
    pub summary: String,
    pub next_steps: Vec<String>,
    pub call_to_action: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct QuickReferenceCard {
    pub agent_name: String,
    pub primary_channels: Vec<String>,
    pub can_do: Vec<String>,
    pub cannot_do: Vec<String>,
    pub escalation_triggers: Vec<String>,
    pub key_contacts: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ExecutiveOnePager {
    pub headline: String,
    pub problem: String,
    pub solution: String,
    pub key_metrics: Vec<String>,
    pub timeline: String,
    pub decision_needed: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FlowStep {
    pub order: u32,
    pub actor: String,
    pub action: String,
    pub system: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProcessFlowSummary {
    pub steps: Vec<FlowStep>,
    pub decision_points: Vec<String>,
    pub handoffs: Vec<String>,
}

/// The section tree, as produced by the backend or the fallback synthesizer
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GeneratedSections {
    pub executive_summary: ExecutiveSummary,
    pub current_state_analysis: CurrentStateAnalysis,
    pub future_state_vision: FutureStateVision,
    pub process_analysis: ProcessAnalysis,
    pub scope_analysis: ScopeAnalysis,
    pub technical_foundation: TechnicalFoundation,
    pub risk_assessment: RiskAssessment,
    pub implementation_approach: ImplementationApproach,
    pub success_metrics: SuccessMetrics,
    pub conclusion: Conclusion,
    pub quick_reference_card: QuickReferenceCard,
    pub executive_one_pager: ExecutiveOnePager,
    pub process_flow_summary: ProcessFlowSummary,
}

impl GeneratedSections {
    /// Top-level section keys, in document order
    pub const SECTION_KEYS: [&'static str; 13] = [
        "executiveSummary",
        "currentStateAnalysis",
        "futureStateVision",
        "processAnalysis",
        "scopeAnalysis",
        "technicalFoundation",
        "riskAssessment",
        "implementationApproach",
        "successMetrics",
        "conclusion",
        "quickReferenceCard",
        "executiveOnePager",
        "processFlowSummary",
    ];

    /// Annotated JSON skeleton of the section tree, used as the target schema
    /// in generation requests. Every list holds one example element.
    #[must_use]
    pub fn schema_skeleton() -> Value {
        json!({
            "executiveSummary": {
                "overview": "2-3 paragraphs framing the opportunity and the Digital Employee",
                "keyObjectives": [{"title": "string", "description": "string"}],
                "expectedOutcomes": ["outcome grounded in the KPI targets"],
                "keyBenefits": [{"benefit": "string", "metric": "KPI target this benefit relies on, or empty"}],
                "recommendation": "string"
            },
            "currentStateAnalysis": {
                "narrative": "string",
                "painPoints": ["string"],
                "currentVolumes": ["string"],
                "baselineMetrics": ["string"]
            },
            "futureStateVision": {
                "narrative": "string",
                "transformationHighlights": ["string"],
                "agentCapabilities": ["string"],
                "customerExperience": "string"
            },
            "processAnalysis": {
                "narrative": "string",
                "happyPathSummary": "string",
                "exceptionHandling": [{"scenario": "string", "handling": "string"}],
                "automationOpportunities": ["string"]
            },
            "scopeAnalysis": {
                "narrative": "string",
                "inScopeSummary": ["string"],
                "outOfScopeRationale": [{"item": "string", "rationale": "string"}],
                "guardrailsSummary": ["string"]
            },
            "technicalFoundation": {
                "narrative": "string",
                "integrationOverview": [{"system": "string", "purpose": "string"}],
                "securityConsiderations": ["string"],
                "dataFlowSummary": "string"
            },
            "riskAssessment": {
                "narrative": "string",
                "risks": [{"risk": "string", "likelihood": "LOW | MEDIUM | HIGH", "impact": "LOW | MEDIUM | HIGH", "mitigation": "string"}]
            },
            "implementationApproach": {
                "narrative": "string",
                "phases": [{"name": "string", "duration": "string", "activities": ["string"], "deliverables": ["string"]}],
                "changeManagement": ["string"],
                "trainingPlan": {
                    "overview": "string",
                    "audiences": [{"audience": "string", "format": "string", "topics": ["string"]}],
                    "timeline": "string"
                }
            },
            "successMetrics": {
                "narrative": "string",
                "kpis": [{"name": "string", "target": "string", "measurement": "string"}],
                "monitoringApproach": "string",
                "launchCriteria": ["string"]
            },
            "conclusion": {
                "summary": "string",
                "nextSteps": ["string"],
                "callToAction": "string"
            },
            "quickReferenceCard": {
                "agentName": "string",
                "primaryChannels": ["string"],
                "canDo": ["string"],
                "cannotDo": ["string"],
                "escalationTriggers": ["string"],
                "keyContacts": ["string"]
            },
            "executiveOnePager": {
                "headline": "string",
                "problem": "string",
                "solution": "string",
                "keyMetrics": ["string"],
                "timeline": "string",
                "decisionNeeded": "string"
            },
            "processFlowSummary": {
                "steps": [{"order": 1, "actor": "string", "action": "string", "system": "string"}],
                "decisionPoints": ["string"],
                "handoffs": ["string"]
            }
        })
    }
}

/// Sections plus provenance
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneratedContent {
    #[serde(flatten)]
    pub sections: GeneratedSections,
    pub metadata: GenerationMetadata,
}

impl GeneratedContent {
    #[inline]
    #[must_use]
    pub fn new(sections: GeneratedSections, metadata: GenerationMetadata) -> Self {
        Self { sections, metadata }
    }

    #[inline]
    #[must_use]
    pub fn is_fallback(&self) -> bool {
        self.metadata.is_fallback
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::collections::BTreeSet;

    /// Dotted key paths of a JSON tree; arrays contribute their first element
    fn key_paths(value: &Value, prefix: &str, out: &mut BTreeSet<String>) {
        match value {
            Value::Object(map) => {
                for (k, v) in map {
                    let path = if prefix.is_empty() {
                        k.clone()
                    } else {
                        format!("{prefix}.{k}")
                    };
                    out.insert(path.clone());
                    key_paths(v, &path, out);
                }
            }
            Value::Array(items) => {
                if let Some(first) = items.first() {
                    key_paths(first, &format!("{prefix}[]"), out);
                }
            }
            _ => {}
        }
    }

    #[test]
    fn skeleton_matches_struct_shape() {
        let skeleton = GeneratedSections::schema_skeleton();
        let typed: GeneratedSections = serde_json::from_value(skeleton.clone()).unwrap();
        let reserialized = serde_json::to_value(&typed).unwrap();

        let mut expected = BTreeSet::new();
        let mut actual = BTreeSet::new();
        key_paths(&skeleton, "", &mut expected);
        key_paths(&reserialized, "", &mut actual);
        assert_eq!(expected, actual);
    }

    #[test]
    fn default_sections_emit_every_key() {
        let value = serde_json::to_value(GeneratedSections::default()).unwrap();
        let keys: Vec<_> = value.as_object().unwrap().keys().cloned().collect();
        let mut expected: Vec<_> = GeneratedSections::SECTION_KEYS.iter().map(|k| k.to_string()).collect();
        let mut keys_sorted = keys.clone();
        keys_sorted.sort();
        expected.sort();
        assert_eq!(keys_sorted, expected);

        assert_eq!(value["executiveSummary"]["keyBenefits"], json!([]));
        assert_eq!(value["implementationApproach"]["trainingPlan"]["audiences"], json!([]));
    }

    #[test]
    fn partial_answer_is_completed_with_empty_lists() {
        let partial = json!({
            "executiveSummary": {"overview": "Only an overview"}
        });
        let typed: GeneratedSections = serde_json::from_value(partial).unwrap();
        assert_eq!(typed.executive_summary.overview, "Only an overview");
        assert!(typed.executive_summary.key_objectives.is_empty());
        assert!(typed.process_flow_summary.steps.is_empty());
    }

    #[test]
    fn wrong_field_type_is_rejected() {
        let wrong = json!({"executiveSummary": {"keyObjectives": "not a list"}});
        assert!(serde_json::from_value::<GeneratedSections>(wrong).is_err());
    }

    #[test]
    fn content_flattens_sections_next_to_metadata() {
        let content = GeneratedContent::new(
            GeneratedSections::default(),
            GenerationMetadata::fallback(chrono::Utc::now(), None, 0),
        );
        let value = serde_json::to_value(&content).unwrap();
        assert!(value.get("executiveSummary").is_some());
        assert_eq!(value["metadata"]["isFallback"], true);
        assert!(content.is_fallback());
    }
}
