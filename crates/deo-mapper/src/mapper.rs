//! Item → context mapping

use crate::text::{extract_remainder, extract_title, parse_stakeholder};
use deo_model::context::{
    BusinessRule, Channel, EscalationScript, ExceptionCase, Goal, Guardrail, GuardrailKind,
    Integration, Kpi, LaunchCriterion, MonitoringMetric, PersonaTrait, ProcessStep, ScopeEntry,
    SecurityRequirement, Stakeholder, Volume,
};
use deo_model::payload::{
    BusinessRuleFields, ChannelFields, EscalationFields, ExceptionFields, GoalFields,
    GuardrailFields, IntegrationFields, KpiFields, LaunchCriterionFields, MonitoringFields,
    PersonaTraitFields, ProcessStepFields, SecurityFields, StakeholderFields, VolumeFields,
};
use deo_model::{
    BusinessRuleRecord, DesignWeek, DomainGenerationContext, ExtractedItem, ExtractedItemType,
    IntegrationRecord, ItemPayload, Language, ScopeClassification, ScopeItemRecord,
};

/// Project-level fields copied verbatim into the context
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProjectHeader {
    pub company_name: String,
    pub agent_name: String,
    pub description: Option<String>,
    pub language: Language,
}

impl ProjectHeader {
    #[must_use]
    pub fn new(company_name: impl Into<String>, agent_name: impl Into<String>) -> Self {
        Self {
            company_name: company_name.into(),
            agent_name: agent_name.into(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_language(mut self, language: Language) -> Self {
        self.language = language;
        self
    }
}

/// Dedicated relational tables of a design week
#[derive(Debug, Clone, Copy, Default)]
pub struct RelationalSources<'a> {
    pub scope_items: &'a [ScopeItemRecord],
    pub integrations: &'a [IntegrationRecord],
    pub business_rules: &'a [BusinessRuleRecord],
}

/// Map a whole design-week aggregate
#[must_use]
pub fn map_design_week(week: &DesignWeek) -> DomainGenerationContext {
    let header = ProjectHeader {
        company_name: week.company_name.clone(),
        agent_name: week.agent_name.clone(),
        description: week.description.clone(),
        language: week.language,
    };
    let sources = RelationalSources {
        scope_items: &week.scope_items,
        integrations: &week.integrations,
        business_rules: &week.business_rules,
    };
    let items: Vec<ExtractedItem> = week.items().cloned().collect();
    map_items(header, &items, sources)
}

/// Map items and relational rows into a context
///
/// Items that are neither approved nor unreviewed are ignored.
#[must_use]
pub fn map_items(
    header: ProjectHeader,
    items: &[ExtractedItem],
    sources: RelationalSources<'_>,
) -> DomainGenerationContext {
    let mut ctx = DomainGenerationContext {
        company_name: header.company_name,
        agent_name: header.agent_name,
        description: header.description.filter(|d| !d.trim().is_empty()),
        language: header.language,
        ..DomainGenerationContext::default()
    };

    let mut integration_items = Vec::new();
    let mut rule_items = Vec::new();

    for item in items.iter().filter(|item| item.participates()) {
        let payload = item.payload();
        match item.item_type {
            ExtractedItemType::Stakeholder => ctx.stakeholders.push(stakeholder(item, payload)),
            ExtractedItemType::Goal => ctx.goals.push(goal(item, payload)),
            ExtractedItemType::KpiTarget => ctx.kpis.push(kpi(item, payload)),
            ExtractedItemType::VolumeExpectation => ctx.volumes.push(volume(item, payload)),
            ExtractedItemType::HappyPathStep => {
                let position = u32::try_from(ctx.process_steps.len() + 1).unwrap_or(u32::MAX);
                ctx.process_steps.push(process_step(item, payload, position));
            }
            ExtractedItemType::ExceptionCase => ctx.exceptions.push(exception(item, payload)),
            ExtractedItemType::GuardrailNever => {
                ctx.guardrails.push(guardrail(item, payload, GuardrailKind::Never));
            }
            ExtractedItemType::GuardrailAlways => {
                ctx.guardrails.push(guardrail(item, payload, GuardrailKind::Always));
            }
            ExtractedItemType::FinancialLimit => {
                ctx.guardrails.push(guardrail(item, payload, GuardrailKind::FinancialLimit));
            }
            ExtractedItemType::LegalRestriction => {
                ctx.guardrails.push(guardrail(item, payload, GuardrailKind::LegalRestriction));
            }
            ExtractedItemType::SecurityRequirement => {
                ctx.security_requirements.push(security(item, payload));
            }
            ExtractedItemType::Channel => ctx.channels.push(channel(item, payload)),
            ExtractedItemType::PersonaTrait => ctx.persona_traits.push(persona_trait(item, payload)),
            ExtractedItemType::EscalationScript => {
                ctx.escalation_scripts.push(escalation(item, payload));
            }
            ExtractedItemType::MonitoringMetric => {
                ctx.monitoring_metrics.push(monitoring(item, payload));
            }
            ExtractedItemType::LaunchCriterion => {
                ctx.launch_criteria.push(launch_criterion(item, payload));
            }
            ExtractedItemType::SystemIntegration => integration_items.push((item, payload)),
            ExtractedItemType::BusinessRule => rule_items.push((item, payload)),
            ExtractedItemType::Unknown => {}
        }
    }

    // Stable: steps without an explicit number keep their capture order.
    // Explicit and positional numbers can collide, so renumber afterwards.
    ctx.process_steps.sort_by_key(|step| step.order);
    for (order, step) in (1u32..).zip(ctx.process_steps.iter_mut()) {
        step.order = order;
    }

    for record in sources.scope_items {
        let entry = ScopeEntry {
            description: record.description.clone(),
            notes: record.notes.clone(),
        };
        match record.classification {
            ScopeClassification::InScope => ctx.in_scope.push(entry),
            ScopeClassification::OutOfScope => ctx.out_of_scope.push(entry),
            ScopeClassification::Ambiguous => {}
        }
    }

    ctx.integrations = if sources.integrations.is_empty() {
        integration_items
            .into_iter()
            .map(|(item, payload)| integration(item, payload))
            .collect()
    } else {
        sources.integrations.iter().map(integration_from_record).collect()
    };

    ctx.business_rules = if sources.business_rules.is_empty() {
        rule_items
            .into_iter()
            .map(|(item, payload)| business_rule(item, payload))
            .collect()
    } else {
        sources.business_rules.iter().map(business_rule_from_record).collect()
    };

    ctx
}

fn full_text(item: &ExtractedItem) -> String {
    item.content.trim().to_string()
}

fn stakeholder(item: &ExtractedItem, payload: Option<ItemPayload>) -> Stakeholder {
    let fields = match payload {
        Some(ItemPayload::Stakeholder(f)) => f,
        _ => StakeholderFields::default(),
    };
    let (parsed_name, parsed_role) = parse_stakeholder(&item.content);
    Stakeholder {
        name: fields.name.unwrap_or(parsed_name),
        role: fields.role.or(fields.title).unwrap_or(parsed_role),
        email: fields.email,
        is_decision_maker: fields.is_decision_maker.unwrap_or(false),
    }
}

fn goal(item: &ExtractedItem, payload: Option<ItemPayload>) -> Goal {
    let fields = match payload {
        Some(ItemPayload::Goal(f)) => f,
        _ => GoalFields::default(),
    };
    Goal {
        title: fields.title.or(fields.name).unwrap_or_else(|| extract_title(&item.content)),
        description: fields
            .description
            .or_else(|| extract_remainder(&item.content))
            .unwrap_or_else(|| full_text(item)),
        priority: fields.priority,
    }
}

fn kpi(item: &ExtractedItem, payload: Option<ItemPayload>) -> Kpi {
    let fields = match payload {
        Some(ItemPayload::Kpi(f)) => f,
        _ => KpiFields::default(),
    };
    Kpi {
        name: fields
            .name
            .or(fields.metric)
            .or(fields.title)
            .unwrap_or_else(|| extract_title(&item.content)),
        target: fields
            .target
            .or(fields.target_value)
            .or_else(|| extract_remainder(&item.content))
            .unwrap_or_default(),
        unit: fields.unit,
        baseline: fields.baseline.or(fields.current_value),
        frequency: fields.frequency.or(fields.measurement_frequency),
    }
}

fn volume(item: &ExtractedItem, payload: Option<ItemPayload>) -> Volume {
    let fields = match payload {
        Some(ItemPayload::Volume(f)) => f,
        _ => VolumeFields::default(),
    };
    Volume {
        metric: fields.metric.or(fields.name).unwrap_or_else(|| extract_title(&item.content)),
        value: fields
            .value
            .or(fields.volume)
            .or(fields.amount)
            .or_else(|| extract_remainder(&item.content))
            .unwrap_or_else(|| full_text(item)),
        period: fields.period.or(fields.frequency),
    }
}

fn process_step(item: &ExtractedItem, payload: Option<ItemPayload>, position: u32) -> ProcessStep {
    let fields = match payload {
        Some(ItemPayload::ProcessStep(f)) => f,
        _ => ProcessStepFields::default(),
    };
    ProcessStep {
        order: fields.step_number.or(fields.order).or(fields.step).unwrap_or(position),
        title: fields.title.or(fields.name).unwrap_or_else(|| extract_title(&item.content)),
        description: fields
            .description
            .or_else(|| extract_remainder(&item.content))
            .unwrap_or_else(|| full_text(item)),
        actor: fields.actor,
        system: fields.system,
    }
}

fn exception(item: &ExtractedItem, payload: Option<ItemPayload>) -> ExceptionCase {
    let fields = match payload {
        Some(ItemPayload::Exception(f)) => f,
        _ => ExceptionFields::default(),
    };
    ExceptionCase {
        title: fields
            .title
            .or(fields.scenario)
            .or(fields.name)
            .unwrap_or_else(|| extract_title(&item.content)),
        trigger: fields
            .trigger
            .or(fields.condition)
            .or_else(|| extract_remainder(&item.content))
            .unwrap_or_default(),
        handling: fields
            .handling
            .or(fields.resolution)
            .or(fields.action)
            .unwrap_or_default(),
    }
}

fn guardrail(item: &ExtractedItem, payload: Option<ItemPayload>, kind: GuardrailKind) -> Guardrail {
    let fields = match payload {
        Some(ItemPayload::Guardrail(f)) => f,
        _ => GuardrailFields::default(),
    };
    Guardrail {
        kind,
        rule: fields
            .rule
            .or(fields.description)
            .or(fields.title)
            .unwrap_or_else(|| full_text(item)),
        rationale: fields.rationale.or(fields.reason),
        limit: fields.limit.or(fields.amount).or(fields.threshold),
    }
}

fn security(item: &ExtractedItem, payload: Option<ItemPayload>) -> SecurityRequirement {
    let fields = match payload {
        Some(ItemPayload::Security(f)) => f,
        _ => SecurityFields::default(),
    };
    SecurityRequirement {
        requirement: fields.requirement.or(fields.title).unwrap_or_else(|| full_text(item)),
        category: fields.category,
    }
}

fn channel(item: &ExtractedItem, payload: Option<ItemPayload>) -> Channel {
    let fields = match payload {
        Some(ItemPayload::Channel(f)) => f,
        _ => ChannelFields::default(),
    };
    Channel {
        name: fields.name.or(fields.channel).unwrap_or_else(|| extract_title(&item.content)),
        description: fields.description.or_else(|| extract_remainder(&item.content)),
    }
}

fn persona_trait(item: &ExtractedItem, payload: Option<ItemPayload>) -> PersonaTrait {
    let fields = match payload {
        Some(ItemPayload::PersonaTrait(f)) => f,
        _ => PersonaTraitFields::default(),
    };
    PersonaTrait {
        name: fields.trait_name.or(fields.name).unwrap_or_else(|| extract_title(&item.content)),
        description: fields
            .description
            .or_else(|| extract_remainder(&item.content))
            .unwrap_or_else(|| full_text(item)),
        example: fields.example,
    }
}

fn escalation(item: &ExtractedItem, payload: Option<ItemPayload>) -> EscalationScript {
    let fields = match payload {
        Some(ItemPayload::EscalationScript(f)) => f,
        _ => EscalationFields::default(),
    };
    EscalationScript {
        trigger: fields
            .trigger
            .or(fields.condition)
            .unwrap_or_else(|| extract_title(&item.content)),
        script: fields
            .script
            .or(fields.message)
            .or_else(|| extract_remainder(&item.content))
            .unwrap_or_else(|| full_text(item)),
        target: fields.target.or(fields.escalate_to),
    }
}

fn monitoring(item: &ExtractedItem, payload: Option<ItemPayload>) -> MonitoringMetric {
    let fields = match payload {
        Some(ItemPayload::MonitoringMetric(f)) => f,
        _ => MonitoringFields::default(),
    };
    MonitoringMetric {
        name: fields.name.or(fields.metric).unwrap_or_else(|| extract_title(&item.content)),
        threshold: fields.threshold.or_else(|| extract_remainder(&item.content)),
        description: fields.description,
    }
}

fn launch_criterion(item: &ExtractedItem, payload: Option<ItemPayload>) -> LaunchCriterion {
    let fields = match payload {
        Some(ItemPayload::LaunchCriterion(f)) => f,
        _ => LaunchCriterionFields::default(),
    };
    LaunchCriterion {
        criterion: fields.criterion.or(fields.title).or(fields.name).unwrap_or_else(|| full_text(item)),
        target: fields.target,
    }
}

fn integration(item: &ExtractedItem, payload: Option<ItemPayload>) -> Integration {
    let fields = match payload {
        Some(ItemPayload::Integration(f)) => f,
        _ => IntegrationFields::default(),
    };
    Integration {
        system_name: fields
            .system_name
            .or(fields.system)
            .or(fields.name)
            .unwrap_or_else(|| extract_title(&item.content)),
        purpose: fields
            .purpose
            .or_else(|| extract_remainder(&item.content))
            .unwrap_or_default(),
        connection_type: fields.connection_type,
        data_fields: fields.data_fields.unwrap_or_default(),
    }
}

fn integration_from_record(record: &IntegrationRecord) -> Integration {
    Integration {
        system_name: record.system_name.clone(),
        purpose: record.purpose.clone(),
        connection_type: record.connection_type.clone(),
        data_fields: record.data_fields.clone(),
    }
}

fn business_rule(item: &ExtractedItem, payload: Option<ItemPayload>) -> BusinessRule {
    let fields = match payload {
        Some(ItemPayload::BusinessRule(f)) => f,
        _ => BusinessRuleFields::default(),
    };
    BusinessRule {
        name: fields.name.or(fields.title).unwrap_or_else(|| extract_title(&item.content)),
        category: fields.category,
        condition: fields.condition,
        action: fields.action.or_else(|| extract_remainder(&item.content)),
    }
}

fn business_rule_from_record(record: &BusinessRuleRecord) -> BusinessRule {
    BusinessRule {
        name: record.name.clone(),
        category: record.category.clone(),
        condition: record.condition.clone(),
        action: record.action.clone(),
    }
}
