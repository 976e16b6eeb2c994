//! Fallback synthesizer
//!
//! Builds a complete section tree from the generation context alone. Every
//! value is either a projection of captured data or a bracketed placeholder
//! such as `[to be baselined]`; nothing numeric is ever made up. Output only
//! depends on the context, so two runs differ at most in metadata latency.

use deo_model::content::{
    Conclusion, CurrentStateAnalysis, ExceptionNarrative, ExecutiveOnePager, ExecutiveSummary,
    FlowStep, FutureStateVision, ImplementationApproach, IntegrationNarrative, KeyBenefit,
    KeyObjective, MetricNarrative, Phase, ProcessAnalysis, ProcessFlowSummary, QuickReferenceCard,
    Risk, RiskAssessment, ScopeAnalysis, ScopeRationale, SuccessMetrics, TechnicalFoundation,
    TrainingAudience, TrainingPlan,
};
use deo_model::context::{GuardrailKind, Kpi};
use deo_model::{Clock, DomainGenerationContext, GeneratedContent, GeneratedSections, GenerationMetadata};
use std::sync::Arc;

/// Maximum key objectives taken from goals
pub const MAX_KEY_OBJECTIVES: usize = 7;
/// Maximum KPIs projected into outcomes and benefits
pub const MAX_HEADLINE_KPIS: usize = 4;

const TO_BE_ASSESSED: &str = "[to be assessed]";
const TO_BE_BASELINED: &str = "[to be baselined]";
const TO_BE_PLANNED: &str = "[to be planned]";

/// Deterministic document synthesizer
#[derive(Debug, Clone)]
pub struct FallbackSynthesizer {
    clock: Arc<dyn Clock>,
}

impl FallbackSynthesizer {
    #[must_use]
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self { clock }
    }

    /// Full content with fallback metadata
    ///
    /// `latency_ms` is the duration of the failed attempt, when there was one.
    #[must_use]
    pub fn synthesize(&self, ctx: &DomainGenerationContext, latency_ms: Option<u64>) -> GeneratedContent {
        let metadata = GenerationMetadata::fallback(self.clock.now(), latency_ms, ctx.source_item_count());
        GeneratedContent::new(synthesize_sections(ctx), metadata)
    }
}

/// Section tree projected from `ctx`
#[must_use]
pub fn synthesize_sections(ctx: &DomainGenerationContext) -> GeneratedSections {
    GeneratedSections {
        executive_summary: executive_summary(ctx),
        current_state_analysis: current_state(ctx),
        future_state_vision: future_state(ctx),
        process_analysis: process_analysis(ctx),
        scope_analysis: scope_analysis(ctx),
        technical_foundation: technical_foundation(ctx),
        risk_assessment: risk_assessment(ctx),
        implementation_approach: implementation_approach(ctx),
        success_metrics: success_metrics(ctx),
        conclusion: conclusion(ctx),
        quick_reference_card: quick_reference_card(ctx),
        executive_one_pager: executive_one_pager(ctx),
        process_flow_summary: process_flow_summary(ctx),
    }
}

fn headline_kpis(ctx: &DomainGenerationContext) -> impl Iterator<Item = &Kpi> {
    ctx.kpis.iter().take(MAX_HEADLINE_KPIS)
}

fn or_placeholder(values: Vec<String>, placeholder: &str) -> Vec<String> {
    if values.is_empty() {
        vec![placeholder.to_string()]
    } else {
        values
    }
}

fn kpi_target(kpi: &Kpi) -> String {
    match kpi.unit.as_deref() {
        Some(unit) if !unit.is_empty() => format!("{} {unit}", kpi.target),
        _ => kpi.target.clone(),
    }
}

/// Description worth printing next to its title
///
/// Items captured without a separator carry their whole text as description.
fn detail<'a>(title: &str, description: &'a str) -> Option<&'a str> {
    let description = description.trim();
    (!description.is_empty() && description != title.trim()).then_some(description)
}

fn overview(ctx: &DomainGenerationContext) -> String {
    let intro = format!(
        "{} is introducing {}, a Digital Employee.",
        ctx.company_name, ctx.agent_name
    );
    match ctx.description.as_deref() {
        Some(description) => format!("{intro} {description}"),
        None => format!("{intro} [Project description to be provided]"),
    }
}

fn executive_summary(ctx: &DomainGenerationContext) -> ExecutiveSummary {
    let key_objectives = ctx
        .goals
        .iter()
        .take(MAX_KEY_OBJECTIVES)
        .map(|goal| KeyObjective {
            title: goal.title.clone(),
            description: detail(&goal.title, &goal.description).unwrap_or_default().to_string(),
        })
        .collect();

    let (expected_outcomes, key_benefits) = if ctx.kpis.is_empty() {
        (
            vec![
                "[Measurable outcomes to be defined once KPI targets are agreed]".to_string(),
                "24/7 operational capability".to_string(),
                "Enhanced compliance and audit trails".to_string(),
            ],
            vec![
                KeyBenefit {
                    benefit: "[Quantified benefit to be defined]".to_string(),
                    metric: String::new(),
                },
                KeyBenefit {
                    benefit: "24/7 operational capability".to_string(),
                    metric: String::new(),
                },
                KeyBenefit {
                    benefit: "Enhanced compliance and audit trails".to_string(),
                    metric: String::new(),
                },
            ],
        )
    } else {
        (
            headline_kpis(ctx).map(Kpi::summary).collect(),
            headline_kpis(ctx)
                .map(|kpi| KeyBenefit {
                    benefit: kpi.name.clone(),
                    metric: kpi_target(kpi),
                })
                .collect(),
        )
    };

    ExecutiveSummary {
        overview: overview(ctx),
        key_objectives,
        expected_outcomes,
        key_benefits,
        recommendation: format!(
            "Review the captured requirements and approve {} for the build phase.",
            ctx.agent_name
        ),
    }
}

fn current_state(ctx: &DomainGenerationContext) -> CurrentStateAnalysis {
    let current_volumes = ctx
        .volumes
        .iter()
        .map(|v| match v.period.as_deref() {
            Some(period) => format!("{}: {} {period}", v.metric, v.value),
            None => format!("{}: {}", v.metric, v.value),
        })
        .collect();

    let baseline_metrics = ctx
        .kpis
        .iter()
        .map(|kpi| format!("{}: {}", kpi.name, kpi.baseline.as_deref().unwrap_or(TO_BE_BASELINED)))
        .collect();

    let pain_points = ctx
        .exceptions
        .iter()
        .map(|e| e.title.clone())
        .collect::<Vec<_>>();

    CurrentStateAnalysis {
        narrative: format!(
            "{} currently handles this work without a Digital Employee. [Current-state narrative to be completed]",
            ctx.company_name
        ),
        pain_points: or_placeholder(pain_points, "[Pain points to be confirmed with stakeholders]"),
        current_volumes,
        baseline_metrics,
    }
}

fn future_state(ctx: &DomainGenerationContext) -> FutureStateVision {
    let customer_experience = if ctx.channels.is_empty() {
        "[Customer channels to be confirmed]".to_string()
    } else {
        let names: Vec<_> = ctx.channels.iter().map(|c| c.name.as_str()).collect();
        format!("Customers reach {} through {}.", ctx.agent_name, names.join(", "))
    };

    FutureStateVision {
        narrative: format!(
            "{} takes over the agreed process steps for {} and escalates to people where guardrails require it.",
            ctx.agent_name, ctx.company_name
        ),
        transformation_highlights: ctx.goals.iter().map(|g| g.title.clone()).collect(),
        agent_capabilities: ctx.process_steps.iter().map(|s| s.title.clone()).collect(),
        customer_experience,
    }
}

fn process_analysis(ctx: &DomainGenerationContext) -> ProcessAnalysis {
    let narrative = if ctx.process_steps.is_empty() {
        "[Happy path to be documented]".to_string()
    } else {
        ctx.process_steps
            .iter()
            .map(|step| match detail(&step.title, &step.description) {
                Some(description) => format!("{}. {}: {description}", step.order, step.title),
                None => format!("{}. {}", step.order, step.title),
            })
            .collect::<Vec<_>>()
            .join("\n")
    };

    let happy_path_summary = match (ctx.process_steps.first(), ctx.process_steps.last()) {
        (Some(first), Some(last)) => format!(
            "The happy path runs in {} steps, from \"{}\" to \"{}\".",
            ctx.process_steps.len(),
            first.title,
            last.title
        ),
        _ => "[Happy path to be documented]".to_string(),
    };

    ProcessAnalysis {
        narrative,
        happy_path_summary,
        exception_handling: ctx
            .exceptions
            .iter()
            .map(|e| ExceptionNarrative {
                scenario: e.title.clone(),
                handling: if e.handling.is_empty() {
                    "[Handling to be defined]".to_string()
                } else {
                    e.handling.clone()
                },
            })
            .collect(),
        automation_opportunities: ctx.in_scope.iter().map(|s| s.description.clone()).collect(),
    }
}

fn scope_analysis(ctx: &DomainGenerationContext) -> ScopeAnalysis {
    ScopeAnalysis {
        narrative: format!(
            "{} items are in scope and {} are explicitly out of scope.",
            ctx.in_scope.len(),
            ctx.out_of_scope.len()
        ),
        in_scope_summary: ctx.in_scope.iter().map(|s| s.description.clone()).collect(),
        out_of_scope_rationale: ctx
            .out_of_scope
            .iter()
            .map(|s| ScopeRationale {
                item: s.description.clone(),
                rationale: s
                    .notes
                    .clone()
                    .unwrap_or_else(|| "[Rationale to be documented]".to_string()),
            })
            .collect(),
        guardrails_summary: ctx
            .guardrails
            .iter()
            .map(|g| format!("{}: {}", g.kind, g.rule))
            .collect(),
    }
}

fn technical_foundation(ctx: &DomainGenerationContext) -> TechnicalFoundation {
    let data_flow_summary = if ctx.integrations.is_empty() {
        "[Data flows to be defined]".to_string()
    } else {
        let systems: Vec<_> = ctx.integrations.iter().map(|i| i.system_name.as_str()).collect();
        format!("{} exchanges data with {}.", ctx.agent_name, systems.join(", "))
    };

    TechnicalFoundation {
        narrative: format!(
            "{} connects to {} system(s).",
            ctx.agent_name,
            ctx.integrations.len()
        ),
        integration_overview: ctx
            .integrations
            .iter()
            .map(|i| IntegrationNarrative {
                system: i.system_name.clone(),
                purpose: i.purpose.clone(),
            })
            .collect(),
        security_considerations: ctx
            .security_requirements
            .iter()
            .map(|s| s.requirement.clone())
            .collect(),
        data_flow_summary,
    }
}

fn risk_assessment(ctx: &DomainGenerationContext) -> RiskAssessment {
    let mut risks: Vec<Risk> = ctx
        .integrations
        .iter()
        .map(|i| Risk {
            risk: format!("Availability of {}", i.system_name),
            likelihood: TO_BE_ASSESSED.to_string(),
            impact: TO_BE_ASSESSED.to_string(),
            mitigation: "[Mitigation to be defined]".to_string(),
        })
        .collect();
    risks.extend(ctx.exceptions.iter().map(|e| Risk {
        risk: e.title.clone(),
        likelihood: TO_BE_ASSESSED.to_string(),
        impact: TO_BE_ASSESSED.to_string(),
        mitigation: if e.handling.is_empty() {
            "[Mitigation to be defined]".to_string()
        } else {
            e.handling.clone()
        },
    }));

    RiskAssessment {
        narrative: "[Risk assessment to be completed with the project team]".to_string(),
        risks,
    }
}

fn implementation_approach(ctx: &DomainGenerationContext) -> ImplementationApproach {
    let phase = |name: &str, activities: Vec<String>, deliverables: &[&str]| Phase {
        name: name.to_string(),
        duration: TO_BE_PLANNED.to_string(),
        activities,
        deliverables: deliverables.iter().map(|d| d.to_string()).collect(),
    };

    let build_activities = ctx
        .integrations
        .iter()
        .map(|i| format!("Connect {}", i.system_name))
        .collect();
    let launch_activities = ctx
        .launch_criteria
        .iter()
        .map(|c| format!("Verify: {}", c.criterion))
        .collect();

    let mut roles: Vec<String> = Vec::new();
    for stakeholder in &ctx.stakeholders {
        if !stakeholder.role.is_empty() && !roles.contains(&stakeholder.role) {
            roles.push(stakeholder.role.clone());
        }
    }

    ImplementationApproach {
        narrative: format!("{} is delivered in four phases.", ctx.agent_name),
        phases: vec![
            phase("Design", Vec::new(), &["Approved design document"]),
            phase("Build", build_activities, &["Configured Digital Employee"]),
            phase("Test", Vec::new(), &["Test report"]),
            phase("Launch", launch_activities, &["Go-live decision"]),
        ],
        change_management: ctx
            .stakeholders
            .iter()
            .map(|s| {
                if s.role.is_empty() {
                    format!("Brief {}", s.name)
                } else {
                    format!("Brief {} ({})", s.name, s.role)
                }
            })
            .collect(),
        training_plan: TrainingPlan {
            overview: "[Training plan to be agreed]".to_string(),
            audiences: roles
                .into_iter()
                .map(|audience| TrainingAudience {
                    audience,
                    format: "[Format to be agreed]".to_string(),
                    topics: vec![format!("Working alongside {}", ctx.agent_name)],
                })
                .collect(),
            timeline: TO_BE_PLANNED.to_string(),
        },
    }
}

fn success_metrics(ctx: &DomainGenerationContext) -> SuccessMetrics {
    let monitoring_approach = if ctx.monitoring_metrics.is_empty() {
        "[Monitoring approach to be defined]".to_string()
    } else {
        let names: Vec<_> = ctx.monitoring_metrics.iter().map(|m| m.name.as_str()).collect();
        format!("Monitored continuously: {}.", names.join(", "))
    };

    SuccessMetrics {
        narrative: format!("{} KPI target(s) were captured.", ctx.kpis.len()),
        kpis: ctx
            .kpis
            .iter()
            .map(|kpi| MetricNarrative {
                name: kpi.name.clone(),
                target: kpi_target(kpi),
                measurement: kpi
                    .frequency
                    .clone()
                    .unwrap_or_else(|| "[Measurement method to be defined]".to_string()),
            })
            .collect(),
        monitoring_approach,
        launch_criteria: ctx
            .launch_criteria
            .iter()
            .map(|c| match c.target.as_deref() {
                Some(target) => format!("{}: {target}", c.criterion),
                None => c.criterion.clone(),
            })
            .collect(),
    }
}

fn conclusion(ctx: &DomainGenerationContext) -> Conclusion {
    Conclusion {
        summary: format!(
            "This document captures the requirements for {} at {}.",
            ctx.agent_name, ctx.company_name
        ),
        next_steps: vec![
            "Review and approve this document".to_string(),
            "Confirm KPI baselines".to_string(),
            "Plan the build phase".to_string(),
        ],
        call_to_action: "[Decision owner to confirm go-ahead]".to_string(),
    }
}

fn quick_reference_card(ctx: &DomainGenerationContext) -> QuickReferenceCard {
    let mut cannot_do: Vec<String> = ctx
        .guardrails_of(GuardrailKind::Never)
        .map(|g| g.rule.clone())
        .collect();
    cannot_do.extend(ctx.out_of_scope.iter().map(|s| s.description.clone()));

    QuickReferenceCard {
        agent_name: ctx.agent_name.clone(),
        primary_channels: ctx.channels.iter().map(|c| c.name.clone()).collect(),
        can_do: ctx.process_steps.iter().map(|s| s.title.clone()).collect(),
        cannot_do,
        escalation_triggers: ctx.escalation_scripts.iter().map(|e| e.trigger.clone()).collect(),
        key_contacts: ctx
            .stakeholders
            .iter()
            .map(|s| {
                if s.role.is_empty() {
                    s.name.clone()
                } else {
                    format!("{} ({})", s.name, s.role)
                }
            })
            .collect(),
    }
}

fn executive_one_pager(ctx: &DomainGenerationContext) -> ExecutiveOnePager {
    ExecutiveOnePager {
        headline: format!("{}: a Digital Employee for {}", ctx.agent_name, ctx.company_name),
        problem: ctx
            .description
            .clone()
            .unwrap_or_else(|| "[Problem statement to be provided]".to_string()),
        solution: format!(
            "{} automates {} process step(s) within agreed guardrails.",
            ctx.agent_name,
            ctx.process_steps.len()
        ),
        key_metrics: ctx.kpis.iter().map(Kpi::summary).collect(),
        timeline: "[Timeline to be confirmed]".to_string(),
        decision_needed: format!("Approval to start building {}", ctx.agent_name),
    }
}

fn process_flow_summary(ctx: &DomainGenerationContext) -> ProcessFlowSummary {
    ProcessFlowSummary {
        steps: ctx
            .process_steps
            .iter()
            .map(|step| FlowStep {
                order: step.order,
                actor: step.actor.clone().unwrap_or_else(|| ctx.agent_name.clone()),
                action: step.title.clone(),
                system: step.system.clone().unwrap_or_default(),
            })
            .collect(),
        decision_points: ctx
            .exceptions
            .iter()
            .filter(|e| !e.trigger.is_empty())
            .map(|e| e.trigger.clone())
            .collect(),
        handoffs: ctx
            .escalation_scripts
            .iter()
            .map(|e| match e.target.as_deref() {
                Some(target) => format!("{} -> {target}", e.trigger),
                None => e.trigger.clone(),
            })
            .collect(),
    }
}
