//! Missing-field report
//!
//! Each document type needs certain kinds of captured requirements to read
//! well. Kinds with no participating item are reported by their tag name so
//! facilitators know what to collect before regenerating.

use deo_model::{DesignWeek, DocumentType, ExtractedItemType};
use std::collections::HashSet;

/// Item kinds a document type relies on, in report order
#[must_use]
pub fn required_item_types(document_type: DocumentType) -> &'static [ExtractedItemType] {
    use ExtractedItemType as Ty;
    match document_type {
        DocumentType::DesignDocument => &[
            Ty::Stakeholder,
            Ty::Goal,
            Ty::KpiTarget,
            Ty::HappyPathStep,
            Ty::ExceptionCase,
            Ty::GuardrailNever,
            Ty::SystemIntegration,
            Ty::EscalationScript,
        ],
        DocumentType::ExecutiveBrief => &[
            Ty::Stakeholder,
            Ty::Goal,
            Ty::KpiTarget,
            Ty::VolumeExpectation,
        ],
        DocumentType::TechnicalSpecification => &[
            Ty::HappyPathStep,
            Ty::SystemIntegration,
            Ty::BusinessRule,
            Ty::SecurityRequirement,
            Ty::MonitoringMetric,
        ],
    }
}

/// Tag names of required kinds with nothing captured
///
/// Relational integration and business-rule rows satisfy their kinds.
#[must_use]
pub fn missing_fields(week: &DesignWeek, document_type: DocumentType) -> Vec<String> {
    let mut present: HashSet<ExtractedItemType> =
        week.participating_items().map(|item| item.item_type).collect();
    if !week.integrations.is_empty() {
        present.insert(ExtractedItemType::SystemIntegration);
    }
    if !week.business_rules.is_empty() {
        present.insert(ExtractedItemType::BusinessRule);
    }

    required_item_types(document_type)
        .iter()
        .filter(|ty| !present.contains(*ty))
        .map(|ty| ty.as_str().to_string())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use deo_model::{ExtractedItem, IntegrationRecord, ReviewStatus, Session};
    use pretty_assertions::assert_eq;

    fn week_with(items: Vec<ExtractedItem>) -> DesignWeek {
        let mut week = DesignWeek::new("Acme", "Ava");
        week.sessions.push(Session {
            id: "s1".into(),
            items,
        });
        week
    }

    #[test]
    fn reports_absent_kinds_in_order() {
        let week = week_with(vec![
            ExtractedItem::new(ExtractedItemType::Stakeholder, "Jane Smith - CEO"),
            ExtractedItem::new(ExtractedItemType::Goal, "Reduce Claim Time"),
        ]);
        assert_eq!(
            missing_fields(&week, DocumentType::ExecutiveBrief),
            ["KPI_TARGET", "VOLUME_EXPECTATION"]
        );
    }

    #[test]
    fn rejected_items_do_not_count() {
        let week = week_with(vec![ExtractedItem::new(ExtractedItemType::KpiTarget, "CSAT: 90%")
            .with_status(ReviewStatus::Rejected)]);
        assert!(missing_fields(&week, DocumentType::ExecutiveBrief).contains(&"KPI_TARGET".to_string()));
    }

    #[test]
    fn relational_rows_satisfy_integrations() {
        let mut week = week_with(Vec::new());
        week.integrations.push(IntegrationRecord {
            system_name: "Salesforce".into(),
            ..IntegrationRecord::default()
        });
        let missing = missing_fields(&week, DocumentType::TechnicalSpecification);
        assert!(!missing.contains(&"SYSTEM_INTEGRATION".to_string()));
        assert!(missing.contains(&"BUSINESS_RULE".to_string()));
    }
}
