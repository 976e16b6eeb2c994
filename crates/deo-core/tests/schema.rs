//! Shape of generated and synthesized content

use deo_core::{check_consistency, synthesize_sections, FallbackSynthesizer};
use deo_generation::parse_sections;
use deo_model::{GeneratedContent, GeneratedSections, Language};
use deo_test_utils::{fixed_clock, sample_context, sample_context_in, sample_model_answer};
use pretty_assertions::assert_eq;
use serde_json::Value;

fn section_keys(value: &Value) -> Vec<String> {
    let mut keys: Vec<String> = value
        .as_object()
        .map(|map| map.keys().filter(|k| *k != "metadata").cloned().collect())
        .unwrap_or_default();
    keys.sort();
    keys
}

fn expected_keys() -> Vec<String> {
    let mut keys: Vec<String> = GeneratedSections::SECTION_KEYS.iter().map(|k| k.to_string()).collect();
    keys.sort();
    keys
}

#[test]
fn partial_model_answer_serializes_every_section() {
    let sections = parse_sections(&sample_model_answer()).unwrap();
    let value = serde_json::to_value(&sections).unwrap();

    assert_eq!(section_keys(&value), expected_keys());
    assert_eq!(value["conclusion"]["nextSteps"], Value::Array(Vec::new()));
    assert_eq!(value["implementationApproach"]["trainingPlan"]["audiences"], Value::Array(Vec::new()));
}

#[test]
fn fallback_content_has_same_shape_as_generated() {
    let ctx = sample_context();
    let fallback = FallbackSynthesizer::new(fixed_clock()).synthesize(&ctx, Some(42));
    let value = serde_json::to_value(&fallback).unwrap();

    assert_eq!(section_keys(&value), expected_keys());
    assert_eq!(value["metadata"]["latencyMs"], 42);
    assert_eq!(value["metadata"]["sourceItemCount"], ctx.source_item_count());

    let reparsed: GeneratedContent = serde_json::from_value(value).unwrap();
    assert_eq!(reparsed, fallback);
}

#[test]
fn fallback_grounds_its_own_claims() {
    let ctx = sample_context();
    let sections = synthesize_sections(&ctx);
    assert!(check_consistency(&sections, &ctx.kpis).is_empty());
}

#[test]
fn fallback_projects_sample_week() {
    let sections = synthesize_sections(&sample_context());

    let card = &sections.quick_reference_card;
    assert_eq!(card.agent_name, "Claire");
    assert_eq!(card.cannot_do, ["Never admit liability", "Property claims"]);
    assert_eq!(card.primary_channels, ["Web chat"]);
    assert!(card.key_contacts.contains(&"Jane Smith (CEO)".to_string()));

    assert_eq!(sections.scope_analysis.in_scope_summary, ["Motor claims intake"]);
    assert_eq!(
        sections.scope_analysis.guardrails_summary,
        ["NEVER: Never admit liability", "FINANCIAL LIMIT: No payouts above EUR 5000"]
    );
    assert_eq!(sections.technical_foundation.integration_overview[0].system, "PolicyDB");
    assert_eq!(
        sections.current_state_analysis.baseline_metrics,
        ["Average handling time: 11 minutes", "Automation rate: [to be baselined]"]
    );
}

#[test]
fn fallback_ignores_language() {
    let english = synthesize_sections(&sample_context_in(Language::En));
    let dutch = synthesize_sections(&sample_context_in(Language::Nl));
    assert_eq!(english, dutch);
}
