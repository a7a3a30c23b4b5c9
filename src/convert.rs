//! Normalization of raw `(keyword, relation, value)` triples.
//!
//! Everything the term parser produces funnels through [`convert`], which
//! applies per-keyword type coercion and defaulting so that equal filters
//! compare equal regardless of how they were written (`rows=010` and
//! `rows=10` normalize to the same term).

use crate::keyword::{KeywordClass, is_reserved_value};
use crate::term::{FilterTerm, Relation, TermValue};

/// Convert a raw triple into a canonical [`FilterTerm`]. Total: every
/// input produces a term, unknown keywords pass through verbatim.
///
/// Dispatch order:
/// 1. classified keywords apply their class strategy;
/// 2. reserved bare values (`and`, `or`, `not`, `re`, `regexp`, `""`)
///    become value-only marker terms;
/// 3. an empty keyword (atom starting with an operator) degrades to a
///    bare value that keeps its relation;
/// 4. a keyword that parses as a number is range-query shorthand: the
///    whole atom is folded into one approximate term, quotes included
///    (`7<8` becomes `~"7<8"`);
/// 5. anything else passes through unchanged.
pub fn convert(
    keyword: Option<&str>,
    value: Option<&str>,
    relation: Option<Relation>,
) -> FilterTerm {
    if let Some(kw) = keyword
        && !kw.is_empty()
        && let Some(class) = KeywordClass::of(kw)
    {
        return apply_class(class, kw, value, relation);
    }

    if let Some(v) = value
        && is_reserved_value(v)
    {
        return FilterTerm::marker(v);
    }

    if keyword == Some("") {
        return FilterTerm {
            keyword: None,
            relation,
            value: value.map(TermValue::from),
        };
    }

    if let Some(kw) = keyword
        && kw.parse::<f64>().is_ok()
    {
        let folded = format!(
            "\"{}{}{}\"",
            kw,
            relation.map(|r| r.as_char().to_string()).unwrap_or_default(),
            value.unwrap_or_default()
        );
        return FilterTerm {
            keyword: None,
            relation: Some(Relation::Approx),
            value: Some(TermValue::Text(folded)),
        };
    }

    FilterTerm {
        keyword: keyword.map(String::from),
        relation,
        value: value.map(TermValue::from),
    }
}

fn apply_class(
    class: KeywordClass,
    keyword: &str,
    value: Option<&str>,
    relation: Option<Relation>,
) -> FilterTerm {
    let parsed = value.and_then(parse_int);
    // Keywords with typed values always carry a comparator.
    let relation_or_equals = relation.or(Some(Relation::Equals));

    let (value, relation) = match class {
        KeywordClass::BoolInt => {
            let canonical = match parsed {
                Some(n) if n >= 1 => 1,
                _ => 0,
            };
            (Some(TermValue::Int(canonical)), relation_or_equals)
        }
        KeywordClass::First => {
            let canonical = match parsed {
                Some(n) if n > 0 => n,
                _ => 1,
            };
            (Some(TermValue::Int(canonical)), Some(Relation::Equals))
        }
        KeywordClass::Rows => (Some(int_or_text(parsed, value)), Some(Relation::Equals)),
        KeywordClass::Int => (Some(int_or_text(parsed, value)), relation_or_equals),
        KeywordClass::Text => {
            let text = value.filter(|v| !v.trim().is_empty());
            (text.map(TermValue::from), relation_or_equals)
        }
    };

    FilterTerm {
        keyword: Some(keyword.to_string()),
        relation,
        value,
    }
}

fn parse_int(s: &str) -> Option<i64> {
    s.trim().parse().ok()
}

/// Unparseable numeric input is kept as text rather than dropped, so the
/// term still round-trips even when the backend would reject it.
fn int_or_text(parsed: Option<i64>, original: Option<&str>) -> TermValue {
    match parsed {
        Some(n) => TermValue::Int(n),
        None => TermValue::Text(original.unwrap_or_default().to_string()),
    }
}
