//! Consistency validator
//!
//! Flags numeric claims in the executive summary that no grounding KPI
//! supports. The check is lexical containment, nothing more: a claim is
//! grounded when a KPI target mentions the same digits (or any percentage),
//! or when a KPI target and the claimed metric contain one another.
//!
//! Without grounding KPIs nothing is flagged.

use deo_model::context::Kpi;
use deo_model::GeneratedSections;
use once_cell::sync::Lazy;
use regex::Regex;

/// Prefix of every warning
pub const WARNING_PREFIX: &str = "Ungrounded metric";

static PERCENTAGE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(\d+(?:\.\d+)?)\s*%").expect("percentage pattern is valid"));

/// Validates generated sections against grounding KPIs
#[derive(Debug, Clone, Copy, Default)]
pub struct ConsistencyValidator;

impl ConsistencyValidator {
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Warnings for ungrounded claims, in document order
    #[must_use]
    pub fn validate(&self, sections: &GeneratedSections, kpis: &[Kpi]) -> Vec<String> {
        check_consistency(sections, kpis)
    }
}

/// Warnings for ungrounded claims, in document order
#[must_use]
pub fn check_consistency(sections: &GeneratedSections, kpis: &[Kpi]) -> Vec<String> {
    if kpis.is_empty() {
        return Vec::new();
    }

    let summary = &sections.executive_summary;
    let mut warnings = Vec::new();

    for outcome in &summary.expected_outcomes {
        for caps in PERCENTAGE.captures_iter(outcome) {
            let digits = &caps[1];
            if !kpis.iter().any(|kpi| percentage_grounded(&kpi.target, digits)) {
                warnings.push(format!(
                    "{WARNING_PREFIX} in expected outcome: \"{}\" is not backed by any KPI target",
                    &caps[0]
                ));
            }
        }
    }

    for benefit in &summary.key_benefits {
        let metric = benefit.metric.trim();
        if metric.is_empty() {
            continue;
        }
        if !kpis.iter().any(|kpi| metric_grounded(&kpi.target, metric)) {
            warnings.push(format!(
                "{WARNING_PREFIX} in key benefit \"{}\": \"{metric}\" does not match any KPI target",
                benefit.benefit
            ));
        }
    }

    if !warnings.is_empty() {
        tracing::debug!(count = warnings.len(), "consistency warnings raised");
    }
    warnings
}

fn percentage_grounded(target: &str, digits: &str) -> bool {
    target.contains(digits) || target.contains('%')
}

fn metric_grounded(target: &str, metric: &str) -> bool {
    let target = target.to_lowercase();
    let metric = metric.to_lowercase();
    if target.is_empty() {
        return false;
    }
    metric.contains(&target)
        || target.contains(&metric)
        || target.split_whitespace().any(|word| metric.contains(word))
}

#[cfg(test)]
mod tests {
    use super::*;
    use deo_model::content::KeyBenefit;
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;

    fn kpi(name: &str, target: &str) -> Kpi {
        Kpi {
            name: name.into(),
            target: target.into(),
            ..Kpi::default()
        }
    }

    fn sections(outcomes: &[&str], benefits: &[(&str, &str)]) -> GeneratedSections {
        let mut sections = GeneratedSections::default();
        sections.executive_summary.expected_outcomes = outcomes.iter().map(|s| s.to_string()).collect();
        sections.executive_summary.key_benefits = benefits
            .iter()
            .map(|(benefit, metric)| KeyBenefit {
                benefit: benefit.to_string(),
                metric: metric.to_string(),
            })
            .collect();
        sections
    }

    #[test]
    fn grounded_percentage_passes() {
        let kpis = [kpi("Automation rate", "40%")];
        let warnings = check_consistency(&sections(&["Automate 40% of claims intake"], &[]), &kpis);
        assert!(warnings.is_empty());
    }

    #[test]
    fn ungrounded_percentage_is_flagged() {
        let kpis = [kpi("Handling time", "4 minutes")];
        let warnings = check_consistency(&sections(&["Cut costs by 35 %"], &[]), &kpis);
        assert_eq!(warnings.len(), 1);
        assert!(warnings[0].starts_with(WARNING_PREFIX));
        assert!(warnings[0].contains("35 %"));
    }

    #[test]
    fn any_percentage_target_grounds_every_percentage() {
        let kpis = [kpi("CSAT", "90%")];
        let warnings = check_consistency(&sections(&["Reach 99.5% uptime"], &[]), &kpis);
        assert!(warnings.is_empty());
    }

    #[test]
    fn each_percentage_in_an_outcome_is_checked() {
        let kpis = [kpi("First contact resolution", "up by 20 points")];
        let warnings = check_consistency(&sections(&["From 20% to 65% resolution"], &[]), &kpis);
        assert_eq!(warnings.len(), 1);
        assert!(warnings[0].contains("65%"));
    }

    #[test]
    fn benefit_metric_containment() {
        let kpis = [kpi("Handling time", "4 minutes")];
        let ok = sections(&[], &[("Faster handling", "Average handling under 4 minutes")]);
        assert!(check_consistency(&ok, &kpis).is_empty());

        let partial_word = sections(&[], &[("Faster handling", "handled in minutes")]);
        assert!(check_consistency(&partial_word, &kpis).is_empty());

        let bad = sections(&[], &[("Happier customers", "NPS +12")]);
        let warnings = check_consistency(&bad, &kpis);
        assert_eq!(warnings.len(), 1);
        assert!(warnings[0].starts_with("Ungrounded metric"));
        assert!(warnings[0].contains("Happier customers"));
    }

    #[test]
    fn empty_metric_is_not_checked() {
        let kpis = [kpi("CSAT", "90")];
        let warnings = check_consistency(&sections(&[], &[("Goodwill", "  ")]), &kpis);
        assert!(warnings.is_empty());
    }

    #[test]
    fn no_grounding_means_no_warnings() {
        let claims = sections(&["Save 75% of effort"], &[("Savings", "EUR 2M per year")]);
        assert!(check_consistency(&claims, &[]).is_empty());
    }

    #[test]
    fn validator_delegates() {
        let kpis = [kpi("Handling time", "4 minutes")];
        let claims = sections(&["Cut costs by 35%"], &[]);
        assert_eq!(
            ConsistencyValidator::new().validate(&claims, &kpis),
            check_consistency(&claims, &kpis)
        );
    }

    proptest! {
        #[test]
        fn claims_without_grounding_never_warn(
            outcomes in proptest::collection::vec("[a-z0-9 %.]{0,30}", 0..5),
            metric in "[A-Za-z0-9 +%]{0,20}",
        ) {
            let refs: Vec<&str> = outcomes.iter().map(String::as_str).collect();
            let claims = sections(&refs, &[("benefit", metric.as_str())]);
            prop_assert!(check_consistency(&claims, &[]).is_empty());
        }

        #[test]
        fn every_warning_carries_the_prefix(value in 0u32..1000) {
            let kpis = [kpi("Handling time", "4 minutes")];
            let outcome = format!("Improve by {value}%");
            for warning in check_consistency(&sections(&[outcome.as_str()], &[]), &kpis) {
                prop_assert!(warning.starts_with(WARNING_PREFIX));
            }
        }
    }
}
