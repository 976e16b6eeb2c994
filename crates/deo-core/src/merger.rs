//! Document merger
//!
//! Folds generated (or synthesized) content into a base document. The base
//! is treated as an opaque JSON tree so fields the generator knows nothing
//! about, such as `timeline`, survive untouched. Merging twice with the same
//! content gives the same tree.

use deo_model::GeneratedContent;
use serde_json::{Map, Value};

/// Key holding the full generated content in the merged document
pub const GENERATED_CONTENT_KEY: &str = "generatedContent";

/// JSON document addressed by dotted paths
#[derive(Debug, Clone, PartialEq)]
pub struct DocumentTree {
    root: Value,
}

impl DocumentTree {
    #[inline]
    #[must_use]
    pub fn new(root: Value) -> Self {
        Self { root }
    }

    #[inline]
    #[must_use]
    pub fn into_value(self) -> Value {
        self.root
    }

    /// Value at a dotted path
    #[must_use]
    pub fn get_path(&self, path: &str) -> Option<&Value> {
        let mut current = &self.root;
        for segment in path.split('.') {
            match current {
                Value::Object(map) => current = map.get(segment)?,
                _ => return None,
            }
        }
        Some(current)
    }

    /// Set a dotted path, creating intermediate objects
    ///
    /// A non-object met on the way is replaced by an object.
    pub fn set_path(&mut self, path: &str, value: Value) {
        let segments: Vec<&str> = path.split('.').collect();
        let Some((last, parents)) = segments.split_last() else {
            return;
        };

        let mut current = &mut self.root;
        for segment in parents {
            current = object_mut(current)
                .entry((*segment).to_string())
                .or_insert_with(|| Value::Object(Map::new()));
        }
        object_mut(current).insert((*last).to_string(), value);
    }
}

fn object_mut(value: &mut Value) -> &mut Map<String, Value> {
    if !value.is_object() {
        *value = Value::Object(Map::new());
    }
    match value {
        Value::Object(map) => map,
        _ => unreachable!("value was just replaced by an object"),
    }
}

/// Merges generated content into base documents
#[derive(Debug, Clone, Copy, Default)]
pub struct DocumentMerger;

impl DocumentMerger {
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Final document
    ///
    /// `overview` and `keyObjectives` take the generated values when those
    /// are non-empty; the whole content, metadata included, lands under
    /// [`GENERATED_CONTENT_KEY`]. Every other base field is kept.
    pub fn merge(&self, base: &Value, content: &GeneratedContent) -> Result<Value, serde_json::Error> {
        let summary = &content.sections.executive_summary;
        let mut tree = DocumentTree::new(base.clone());

        if !summary.overview.trim().is_empty() {
            tree.set_path("overview", Value::String(summary.overview.clone()));
        }
        if !summary.key_objectives.is_empty() {
            tree.set_path("keyObjectives", serde_json::to_value(&summary.key_objectives)?);
        }
        tree.set_path(GENERATED_CONTENT_KEY, serde_json::to_value(content)?);

        Ok(tree.into_value())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use deo_model::content::KeyObjective;
    use deo_model::{GeneratedSections, GenerationMetadata};
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn content(overview: &str) -> GeneratedContent {
        let mut sections = GeneratedSections::default();
        sections.executive_summary.overview = overview.into();
        sections.executive_summary.key_objectives = vec![KeyObjective {
            title: "Faster claims".into(),
            description: "Cut handling time".into(),
        }];
        let at = Utc.with_ymd_and_hms(2025, 6, 2, 10, 0, 0).unwrap();
        GeneratedContent::new(sections, GenerationMetadata::fallback(at, Some(5), 2))
    }

    fn base() -> Value {
        json!({
            "title": "Design Document",
            "overview": "placeholder",
            "keyObjectives": [],
            "timeline": "Kick-off in week 23",
        })
    }

    #[test]
    fn tree_get_and_set_paths() {
        let mut tree = DocumentTree::new(json!({"a": {"b": 1}, "c": 2}));
        assert_eq!(tree.get_path("a.b"), Some(&json!(1)));
        assert_eq!(tree.get_path("a.missing"), None);

        tree.set_path("a.d.e", json!("x"));
        tree.set_path("c.f", json!(true));
        assert_eq!(tree.get_path("a.d.e"), Some(&json!("x")));
        assert_eq!(tree.get_path("c.f"), Some(&json!(true)));
        assert_eq!(tree.get_path("a.b"), Some(&json!(1)));
    }

    #[test]
    fn merge_overwrites_narrative_and_keeps_base_fields() {
        let merged = DocumentMerger::new().merge(&base(), &content("Ava handles intake.")).unwrap();

        assert_eq!(merged["overview"], "Ava handles intake.");
        assert_eq!(merged["keyObjectives"][0]["title"], "Faster claims");
        assert_eq!(merged["timeline"], "Kick-off in week 23");
        assert_eq!(merged["title"], "Design Document");
        assert_eq!(merged["generatedContent"]["metadata"]["isFallback"], true);
        assert_eq!(
            merged["generatedContent"]["executiveSummary"]["overview"],
            "Ava handles intake."
        );
    }

    #[test]
    fn empty_generated_overview_keeps_base() {
        let merged = DocumentMerger::new().merge(&base(), &content("   ")).unwrap();
        assert_eq!(merged["overview"], "placeholder");
    }

    #[test]
    fn merge_is_idempotent() {
        let merger = DocumentMerger::new();
        let generated = content("Ava handles intake.");
        let once = merger.merge(&base(), &generated).unwrap();
        let twice = merger.merge(&once, &generated).unwrap();
        assert_eq!(once, twice);
    }

    #[test]
    fn non_object_base_becomes_object() {
        let merged = DocumentMerger::new().merge(&Value::Null, &content("x")).unwrap();
        assert_eq!(merged["overview"], "x");
    }
}
