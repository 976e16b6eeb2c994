//! Free-text heuristics used when an item has no usable structured payload

/// Maximum length, in characters, of a heuristically extracted title
pub const MAX_TITLE_CHARS: usize = 100;

/// Separators that end the leading clause. Dashes only count when surrounded
/// by spaces so hyphenated words ("self-service") stay intact.
const CLAUSE_SEPARATORS: [&str; 6] = [":", "\n", "\r", " - ", " – ", " — "];

/// Separators between a stakeholder's name and role
const ROLE_SEPARATORS: [&str; 3] = [" - ", " – ", " — "];

/// Byte range of the earliest clause separator
fn first_separator(content: &str) -> Option<(usize, usize)> {
    CLAUSE_SEPARATORS
        .iter()
        .filter_map(|sep| content.find(sep).map(|at| (at, at + sep.len())))
        .min_by_key(|(start, _)| *start)
}

fn truncate_chars(s: &str, max: usize) -> String {
    s.chars().take(max).collect::<String>().trim_end().to_string()
}

/// Leading clause of `content`, capped at [`MAX_TITLE_CHARS`]
///
/// Falls back to the (capped) whole text when the leading clause is empty.
#[must_use]
pub fn extract_title(content: &str) -> String {
    let trimmed = content.trim();
    let clause = match first_separator(trimmed) {
        Some((start, _)) => trimmed[..start].trim(),
        None => trimmed,
    };

    if clause.is_empty() {
        truncate_chars(trimmed.trim_start_matches(|c: char| c == ':' || c == '-' || c.is_whitespace()), MAX_TITLE_CHARS)
    } else {
        truncate_chars(clause, MAX_TITLE_CHARS)
    }
}

/// Text after the leading clause's separator, if any
#[must_use]
pub fn extract_remainder(content: &str) -> Option<String> {
    let trimmed = content.trim();
    let (_, end) = first_separator(trimmed)?;
    let rest = trimmed[end..].trim();
    (!rest.is_empty()).then(|| rest.to_string())
}

/// Split `"Name - Role"`; role is empty when there is no separator
#[must_use]
pub fn parse_stakeholder(content: &str) -> (String, String) {
    let trimmed = content.trim();
    let split = ROLE_SEPARATORS
        .iter()
        .filter_map(|sep| trimmed.find(sep).map(|at| (at, at + sep.len())))
        .min_by_key(|(start, _)| *start);

    match split {
        Some((start, end)) => (
            trimmed[..start].trim().to_string(),
            trimmed[end..].trim().to_string(),
        ),
        None => (extract_title(trimmed), String::new()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn title_before_colon() {
        assert_eq!(extract_title("Reduce Claim Time: process faster"), "Reduce Claim Time");
        assert_eq!(
            extract_remainder("Reduce Claim Time: process faster").as_deref(),
            Some("process faster")
        );
    }

    #[test]
    fn title_before_spaced_dash_or_newline() {
        assert_eq!(extract_title("Order lookup - via ERP"), "Order lookup");
        assert_eq!(extract_title("First line\nsecond line"), "First line");
    }

    #[test]
    fn hyphenated_words_are_kept() {
        assert_eq!(extract_title("Self-service refunds"), "Self-service refunds");
        assert_eq!(extract_remainder("Self-service refunds"), None);
    }

    #[test]
    fn earliest_separator_wins() {
        assert_eq!(extract_title("A - B: C"), "A");
        assert_eq!(extract_remainder("A - B: C").as_deref(), Some("B: C"));
    }

    #[test]
    fn title_is_capped() {
        let long = "x".repeat(250);
        assert_eq!(extract_title(&long).chars().count(), MAX_TITLE_CHARS);
    }

    #[test]
    fn empty_leading_clause_uses_rest() {
        assert_eq!(extract_title(": only details"), "only details");
        assert_eq!(extract_title(""), "");
    }

    #[test]
    fn stakeholder_name_and_role() {
        assert_eq!(
            parse_stakeholder("Jane Smith - CEO"),
            ("Jane Smith".to_string(), "CEO".to_string())
        );
        assert_eq!(
            parse_stakeholder("Piet de Vries – Head of Claims"),
            ("Piet de Vries".to_string(), "Head of Claims".to_string())
        );
        assert_eq!(
            parse_stakeholder("Operations team"),
            ("Operations team".to_string(), String::new())
        );
    }

    proptest! {
        #[test]
        fn title_never_exceeds_cap(s in "\\PC{0,300}") {
            prop_assert!(extract_title(&s).chars().count() <= MAX_TITLE_CHARS);
        }

        #[test]
        fn title_has_no_colon_or_newline(s in "[a-zA-Z :\\n-]{1,120}") {
            let title = extract_title(&s);
            // A colon or newline can only survive when it was inside the capped fallback
            if first_separator(s.trim()).map_or(false, |(start, _)| start > 0) {
                prop_assert!(!title.contains(':'));
                prop_assert!(!title.contains('\n'));
            }
        }
    }
}
