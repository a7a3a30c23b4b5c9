//! Rendering filters back to their canonical string form.
//!
//! The serializer is the inverse of parsing: for any filter whose values
//! stay inside the quoting scheme, parsing the rendered string yields an
//! equal filter.

use crate::term::FilterTerm;

/// Render a sequence of terms as one filter string, space-separated in
/// term order.
pub fn filter_to_string(terms: &[FilterTerm]) -> String {
    terms
        .iter()
        .map(term_to_string)
        .collect::<Vec<_>>()
        .join(" ")
}

/// Render one term as `keyword` + `relation` + `value`, each part only
/// if present. Marker terms come out as the bare reserved word.
pub fn term_to_string(term: &FilterTerm) -> String {
    let mut out = String::new();
    if let Some(keyword) = &term.keyword {
        out.push_str(keyword);
    }
    if let Some(relation) = term.relation {
        out.push(relation.as_char());
    }
    if let Some(value) = &term.value {
        out.push_str(&quote_if_needed(&value.to_string()));
    }
    out
}

/// Quote a value when emitting it bare would change how it parses back:
/// embedded whitespace, an empty string, or a leading relation operator.
/// Values that already carry surrounding quotes (range-query shorthand)
/// are emitted verbatim.
fn quote_if_needed(text: &str) -> String {
    if text.len() >= 2 && text.starts_with('"') && text.ends_with('"') {
        return text.to_string();
    }

    let ambiguous_start = text
        .chars()
        .next()
        .is_some_and(|c| matches!(c, '=' | '<' | '>' | '~' | '"'));
    if text.is_empty() || ambiguous_start || text.chars().any(char::is_whitespace) {
        let escaped = text.replace('"', "\\\"");
        format!("\"{}\"", escaped)
    } else {
        text.to_string()
    }
}
