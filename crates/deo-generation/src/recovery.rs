//! Structured-content recovery from free-form model text
//!
//! Models wrap JSON in prose or code fences. Recovery is a bracket-balance
//! scan from the first `{` to the brace that closes it, followed by a strict
//! parse of exactly that substring. Braces inside string literals do not
//! count.

use crate::error::GenerationError;
use deo_model::GeneratedSections;

/// The first complete balanced `{...}` object in `text`
///
/// Returns `None` when there is no `{` or the first one is never closed.
#[must_use]
pub fn extract_json_object(text: &str) -> Option<&str> {
    let start = text.find('{')?;
    let mut depth = 0usize;
    let mut in_string = false;
    let mut escaped = false;

    for (offset, ch) in text[start..].char_indices() {
        if in_string {
            match ch {
                _ if escaped => escaped = false,
                '\\' => escaped = true,
                '"' => in_string = false,
                _ => {}
            }
            continue;
        }

        match ch {
            '"' => in_string = true,
            '{' => depth += 1,
            '}' => {
                depth -= 1;
                if depth == 0 {
                    let end = start + offset + ch.len_utf8();
                    return Some(&text[start..end]);
                }
            }
            _ => {}
        }
    }

    None
}

/// Recover the section tree from model text
///
/// # Errors
/// [`GenerationError::UnparsableContent`] when no balanced object exists or
/// the object does not parse into the section schema.
pub fn parse_sections(text: &str) -> Result<GeneratedSections, GenerationError> {
    let candidate = extract_json_object(text).ok_or_else(|| {
        GenerationError::UnparsableContent("no balanced JSON object found in response".to_string())
    })?;

    serde_json::from_str(candidate)
        .map_err(|e| GenerationError::UnparsableContent(format!("JSON parse error: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn plain_object() {
        assert_eq!(extract_json_object(r#"{"a": 1}"#), Some(r#"{"a": 1}"#));
    }

    #[test]
    fn object_in_prose_and_fences() {
        let text = "Here is the document:\n```json\n{\"a\": {\"b\": [1, 2]}}\n```\nLet me know!";
        assert_eq!(extract_json_object(text), Some("{\"a\": {\"b\": [1, 2]}}"));
    }

    #[test]
    fn braces_inside_strings_are_ignored() {
        let text = r#"{"note": "use {curly} and \"quoted } braces\"", "n": 2} trailing }"#;
        assert_eq!(
            extract_json_object(text),
            Some(r#"{"note": "use {curly} and \"quoted } braces\"", "n": 2}"#)
        );
    }

    #[test]
    fn first_complete_object_wins() {
        assert_eq!(extract_json_object(r#"{"a":1} {"b":2}"#), Some(r#"{"a":1}"#));
    }

    #[test]
    fn unbalanced_or_missing() {
        assert_eq!(extract_json_object("no json here"), None);
        assert_eq!(extract_json_object(r#"{"a": {"b": 1}"#), None);
    }

    #[test]
    fn multibyte_text_around_object() {
        let text = "Voilà le document — {\"titre\": \"Résumé\"} — fin";
        assert_eq!(extract_json_object(text), Some("{\"titre\": \"Résumé\"}"));
    }

    #[test]
    fn parse_sections_from_wrapped_answer() {
        let text = r#"Sure! {"executiveSummary": {"overview": "Claire handles intake."}}"#;
        let sections = parse_sections(text).unwrap();
        assert_eq!(sections.executive_summary.overview, "Claire handles intake.");
        assert!(sections.risk_assessment.risks.is_empty());
    }

    #[test]
    fn parse_sections_failures_are_unparsable() {
        assert!(matches!(
            parse_sections("I cannot help with that."),
            Err(GenerationError::UnparsableContent(_))
        ));
        assert!(matches!(
            parse_sections(r#"{"executiveSummary": {"overview": 'single quotes'}}"#),
            Err(GenerationError::UnparsableContent(_))
        ));
        assert!(matches!(
            parse_sections(r#"{"executiveSummary": {"keyObjectives": "wrong type"}}"#),
            Err(GenerationError::UnparsableContent(_))
        ));
    }

    proptest! {
        #[test]
        fn object_survives_brace_free_wrapping(
            prefix in "[^{}]{0,40}",
            suffix in "[^{}]{0,40}",
            key in "[a-z]{1,8}",
            value in "[a-zA-Z0-9 {}]{0,20}",
        ) {
            let mut map = serde_json::Map::new();
            map.insert(key, serde_json::Value::String(value));
            let object = serde_json::Value::Object(map).to_string();
            let text = format!("{prefix}{object}{suffix}");
            prop_assert_eq!(extract_json_object(&text), Some(object.as_str()));
        }
    }
}
