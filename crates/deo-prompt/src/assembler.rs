//! Request assembly

use crate::templates::{
    GENERATION_INSTRUCTION, NO_DATA_PLACEHOLDER, PERSONA_PREAMBLE, QUALITY_CHECKLIST,
    WRITING_GUIDELINES,
};
use deo_model::context::GuardrailKind;
use deo_model::{DomainGenerationContext, GeneratedSections, Language};

/// Renders generation requests
///
/// Stateless; kept as a type so callers can hold it next to the other
/// pipeline stages.
#[derive(Debug, Clone, Copy, Default)]
pub struct PromptAssembler;

impl PromptAssembler {
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Render the full request for `ctx`
    #[must_use]
    pub fn assemble(&self, ctx: &DomainGenerationContext) -> String {
        assemble_prompt(ctx)
    }
}

/// Explicit language instruction; empty for the default language
#[must_use]
pub fn language_directive(language: Language) -> String {
    if language.is_default() {
        return String::new();
    }
    format!(
        "LANGUAGE: Write the entire document in {} ({}). Every string value in the JSON must be in {}. \
         Keep the JSON keys exactly as given in the schema, in English.",
        language.english_name(),
        language.native_name(),
        language.english_name(),
    )
}

/// Render the full request for `ctx`
#[must_use]
pub fn assemble_prompt(ctx: &DomainGenerationContext) -> String {
    let mut out = String::with_capacity(16 * 1024);

    out.push_str(PERSONA_PREAMBLE);
    out.push_str("\n\n");

    let directive = language_directive(ctx.language);
    if !directive.is_empty() {
        out.push_str(&directive);
        out.push_str("\n\n");
    }

    render_framing(&mut out, ctx);
    render_data(&mut out, ctx);
    render_schema(&mut out);
    render_numbered(&mut out, "WRITING GUIDELINES", &WRITING_GUIDELINES);
    render_numbered(&mut out, "QUALITY CHECKLIST (verify before answering)", &QUALITY_CHECKLIST);
    out.push_str(GENERATION_INSTRUCTION);
    out.push('\n');

    out
}

fn render_framing(out: &mut String, ctx: &DomainGenerationContext) {
    out.push_str("## PROJECT\n");
    out.push_str(&format!("Client: {}\n", ctx.company_name));
    out.push_str(&format!("Digital Employee: {}\n", ctx.agent_name));
    match ctx.description.as_deref() {
        Some(description) => out.push_str(&format!("Description: {description}\n")),
        None => out.push_str(&format!("Description: {NO_DATA_PLACEHOLDER}\n")),
    }
    out.push_str(&format!(
        "Deliverable: a client-facing design document explaining what {} will do for {}, how, and how success is measured.\n\n",
        ctx.agent_name, ctx.company_name
    ));
}

/// One titled data block; placeholder when `lines` is empty
fn render_block(out: &mut String, title: &str, lines: Vec<String>) {
    out.push_str("## ");
    out.push_str(title);
    out.push('\n');
    if lines.is_empty() {
        out.push_str(NO_DATA_PLACEHOLDER);
        out.push('\n');
    } else {
        for line in lines {
            out.push_str("- ");
            out.push_str(&line);
            out.push('\n');
        }
    }
    out.push('\n');
}

fn with_detail(head: String, detail: Option<&str>, label: &str) -> String {
    match detail {
        Some(d) if !d.is_empty() => format!("{head} ({label}: {d})"),
        _ => head,
    }
}

fn render_data(out: &mut String, ctx: &DomainGenerationContext) {
    render_block(
        out,
        "STAKEHOLDERS",
        ctx.stakeholders
            .iter()
            .map(|s| {
                let mut line = if s.role.is_empty() {
                    s.name.clone()
                } else {
                    format!("{} - {}", s.name, s.role)
                };
                if s.is_decision_maker {
                    line.push_str(" [decision maker]");
                }
                line
            })
            .collect(),
    );

    render_block(
        out,
        "BUSINESS GOALS",
        ctx.goals
            .iter()
            .map(|g| {
                let line = if g.description.is_empty() || g.description == g.title {
                    g.title.clone()
                } else {
                    format!("{}: {}", g.title, g.description)
                };
                with_detail(line, g.priority.as_deref(), "priority")
            })
            .collect(),
    );

    render_block(
        out,
        "KPI TARGETS (the only numbers you may use)",
        ctx.kpis
            .iter()
            .map(|k| {
                let line = with_detail(k.summary(), k.baseline.as_deref(), "baseline");
                with_detail(line, k.frequency.as_deref(), "measured")
            })
            .collect(),
    );

    render_block(
        out,
        "VOLUMES",
        ctx.volumes
            .iter()
            .map(|v| with_detail(format!("{}: {}", v.metric, v.value), v.period.as_deref(), "per"))
            .collect(),
    );

    render_block(
        out,
        "HAPPY PATH (in order)",
        ctx.process_steps
            .iter()
            .map(|s| {
                let mut line = format!("Step {}: {}", s.order, s.title);
                if !s.description.is_empty() && s.description != s.title {
                    line.push_str(&format!(" - {}", s.description));
                }
                let line = with_detail(line, s.actor.as_deref(), "actor");
                with_detail(line, s.system.as_deref(), "system")
            })
            .collect(),
    );

    render_block(
        out,
        "EXCEPTIONS",
        ctx.exceptions
            .iter()
            .map(|e| {
                let line = with_detail(e.title.clone(), Some(e.trigger.as_str()), "trigger");
                with_detail(line, Some(e.handling.as_str()), "handling")
            })
            .collect(),
    );

    render_block(
        out,
        "IN SCOPE",
        ctx.in_scope
            .iter()
            .map(|s| with_detail(s.description.clone(), s.notes.as_deref(), "note"))
            .collect(),
    );

    render_block(
        out,
        "OUT OF SCOPE",
        ctx.out_of_scope
            .iter()
            .map(|s| with_detail(s.description.clone(), s.notes.as_deref(), "note"))
            .collect(),
    );

    render_block(
        out,
        "GUARDRAILS",
        [
            GuardrailKind::Never,
            GuardrailKind::Always,
            GuardrailKind::FinancialLimit,
            GuardrailKind::LegalRestriction,
        ]
        .into_iter()
        .flat_map(|kind| ctx.guardrails_of(kind))
        .map(|g| {
            let line = with_detail(format!("[{}] {}", g.kind, g.rule), g.limit.as_deref(), "limit");
            with_detail(line, g.rationale.as_deref(), "why")
        })
        .collect(),
    );

    render_block(
        out,
        "SYSTEM INTEGRATIONS",
        ctx.integrations
            .iter()
            .map(|i| {
                let mut line = if i.purpose.is_empty() {
                    i.system_name.clone()
                } else {
                    format!("{}: {}", i.system_name, i.purpose)
                };
                line = with_detail(line, i.connection_type.as_deref(), "via");
                if !i.data_fields.is_empty() {
                    line.push_str(&format!(" [fields: {}]", i.data_fields.join(", ")));
                }
                line
            })
            .collect(),
    );

    render_block(
        out,
        "BUSINESS RULES",
        ctx.business_rules
            .iter()
            .map(|r| {
                let mut line = r.name.clone();
                if let Some(condition) = r.condition.as_deref() {
                    line.push_str(&format!(" - IF {condition}"));
                }
                if let Some(action) = r.action.as_deref() {
                    line.push_str(&format!(" THEN {action}"));
                }
                with_detail(line, r.category.as_deref(), "category")
            })
            .collect(),
    );

    render_block(
        out,
        "SECURITY REQUIREMENTS",
        ctx.security_requirements
            .iter()
            .map(|s| with_detail(s.requirement.clone(), s.category.as_deref(), "category"))
            .collect(),
    );

    render_block(
        out,
        "CHANNELS",
        ctx.channels
            .iter()
            .map(|c| match c.description.as_deref() {
                Some(d) => format!("{}: {}", c.name, d),
                None => c.name.clone(),
            })
            .collect(),
    );

    render_block(
        out,
        "PERSONA & TONE OF VOICE",
        ctx.persona_traits
            .iter()
            .map(|p| {
                let line = format!("{}: {}", p.name, p.description);
                with_detail(line, p.example.as_deref(), "example")
            })
            .collect(),
    );

    render_block(
        out,
        "ESCALATION SCRIPTS",
        ctx.escalation_scripts
            .iter()
            .map(|e| {
                let line = format!("When {}: \"{}\"", e.trigger, e.script);
                with_detail(line, e.target.as_deref(), "to")
            })
            .collect(),
    );

    render_block(
        out,
        "MONITORING METRICS",
        ctx.monitoring_metrics
            .iter()
            .map(|m| {
                let line = with_detail(m.name.clone(), m.threshold.as_deref(), "threshold");
                with_detail(line, m.description.as_deref(), "about")
            })
            .collect(),
    );

    render_block(
        out,
        "LAUNCH CRITERIA",
        ctx.launch_criteria
            .iter()
            .map(|l| with_detail(l.criterion.clone(), l.target.as_deref(), "target"))
            .collect(),
    );
}

fn render_schema(out: &mut String) {
    out.push_str("## TARGET SCHEMA\n");
    out.push_str("Return one JSON object with exactly this structure. Every key is required; lists may be empty.\n");
    // Pretty-printing a json! value cannot fail
    let skeleton = serde_json::to_string_pretty(&GeneratedSections::schema_skeleton())
        .unwrap_or_default();
    out.push_str(&skeleton);
    out.push_str("\n\n");
}

fn render_numbered(out: &mut String, title: &str, entries: &[&str]) {
    out.push_str("## ");
    out.push_str(title);
    out.push('\n');
    for (index, entry) in entries.iter().enumerate() {
        out.push_str(&format!("{}. {}\n", index + 1, entry));
    }
    out.push('\n');
}

#[cfg(test)]
mod tests {
    use super::*;
    use deo_model::context::{Goal, Guardrail, Kpi, ProcessStep, Stakeholder};
    use pretty_assertions::assert_eq;

    fn sample_context() -> DomainGenerationContext {
        let mut ctx = DomainGenerationContext::new("Acme Insurance", "Claire");
        ctx.description = Some("Claims intake assistant".into());
        ctx.stakeholders.push(Stakeholder {
            name: "Jane Smith".into(),
            role: "CEO".into(),
            is_decision_maker: true,
            ..Stakeholder::default()
        });
        ctx.goals.push(Goal {
            title: "Reduce Claim Time".into(),
            description: "process faster".into(),
            priority: Some("HIGH".into()),
        });
        ctx.kpis.push(Kpi {
            name: "Handling time".into(),
            target: "4".into(),
            unit: Some("minutes".into()),
            ..Kpi::default()
        });
        ctx.process_steps.push(ProcessStep {
            order: 1,
            title: "Receive claim".into(),
            description: "via web form".into(),
            actor: Some("Customer".into()),
            system: None,
        });
        ctx.guardrails.push(Guardrail {
            kind: GuardrailKind::Never,
            rule: "Never promise payout".into(),
            rationale: None,
            limit: None,
        });
        ctx
    }

    #[test]
    fn blocks_appear_in_fixed_order() {
        let prompt = assemble_prompt(&sample_context());
        let order = [
            "You are a senior management consultant",
            "## PROJECT",
            "## STAKEHOLDERS",
            "## BUSINESS GOALS",
            "## KPI TARGETS",
            "## HAPPY PATH",
            "## GUARDRAILS",
            "## LAUNCH CRITERIA",
            "## TARGET SCHEMA",
            "## WRITING GUIDELINES",
            "## QUALITY CHECKLIST",
            "Generate the document now.",
        ];
        let positions: Vec<usize> = order
            .iter()
            .map(|marker| prompt.find(marker).unwrap_or_else(|| panic!("missing {marker}")))
            .collect();
        let mut sorted = positions.clone();
        sorted.sort_unstable();
        assert_eq!(positions, sorted);
    }

    #[test]
    fn data_is_rendered() {
        let prompt = assemble_prompt(&sample_context());
        assert!(prompt.contains("- Jane Smith - CEO [decision maker]"));
        assert!(prompt.contains("- Reduce Claim Time: process faster (priority: HIGH)"));
        assert!(prompt.contains("- Handling time: 4 minutes"));
        assert!(prompt.contains("- Step 1: Receive claim - via web form (actor: Customer)"));
        assert!(prompt.contains("- [NEVER] Never promise payout"));
    }

    #[test]
    fn empty_context_uses_placeholders() {
        let prompt = assemble_prompt(&DomainGenerationContext::new("Acme", "Ava"));
        // Description plus every data block
        assert_eq!(prompt.matches(NO_DATA_PLACEHOLDER).count(), 18);
        assert!(prompt.contains("\"executiveSummary\""));
    }

    #[test]
    fn default_language_has_no_directive() {
        assert_eq!(language_directive(Language::En), "");
        let prompt = assemble_prompt(&sample_context());
        assert!(!prompt.contains("LANGUAGE:"));
    }

    #[test]
    fn other_language_gets_directive() {
        let mut ctx = sample_context();
        ctx.language = Language::De;
        let prompt = assemble_prompt(&ctx);
        assert!(prompt.contains("Write the entire document in German (Deutsch)"));
        assert!(prompt.find("LANGUAGE:").unwrap() < prompt.find("## PROJECT").unwrap());
    }

    #[test]
    fn assembly_is_deterministic() {
        let ctx = sample_context();
        assert_eq!(assemble_prompt(&ctx), PromptAssembler::new().assemble(&ctx));
    }

    #[test]
    fn guidelines_are_numbered() {
        let prompt = assemble_prompt(&sample_context());
        assert!(prompt.contains("1. Write in full paragraphs"));
        assert!(prompt.contains(&format!("{}. ", WRITING_GUIDELINES.len())));
    }
}
