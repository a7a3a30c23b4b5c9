//! Filter terms: the `(keyword, relation, value)` triple.
//!
//! A term is the atomic unit of the filter language. All three parts are
//! optional: a bare search word has no keyword and no relation, a
//! combinator marker such as `and` has only a value, and pagination terms
//! like `first=1` have all three.

use crate::convert::convert;
use crate::error::FilterError;
use serde::Serialize;
use std::fmt;
use std::str::FromStr;

/// Comparison operator between a keyword and its value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Relation {
    #[serde(rename = "=")]
    Equals,
    #[serde(rename = "<")]
    Less,
    #[serde(rename = ">")]
    Greater,
    /// Approximate/regex match (`~`).
    #[serde(rename = "~")]
    Approx,
}

impl Relation {
    pub fn as_char(self) -> char {
        match self {
            Relation::Equals => '=',
            Relation::Less => '<',
            Relation::Greater => '>',
            Relation::Approx => '~',
        }
    }

    pub fn from_char(c: char) -> Option<Relation> {
        match c {
            '=' => Some(Relation::Equals),
            '<' => Some(Relation::Less),
            '>' => Some(Relation::Greater),
            '~' => Some(Relation::Approx),
            _ => None,
        }
    }
}

impl fmt::Display for Relation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

impl FromStr for Relation {
    type Err = FilterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => {
                Relation::from_char(c).ok_or_else(|| FilterError::UnknownRelation(s.to_string()))
            }
            _ => Err(FilterError::UnknownRelation(s.to_string())),
        }
    }
}

/// A normalized term value: numeric keywords hold integers, everything
/// else holds text.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum TermValue {
    Int(i64),
    Text(String),
}

impl TermValue {
    /// The value as an integer, parsing text values on the fly.
    pub fn as_int(&self) -> Option<i64> {
        match self {
            TermValue::Int(n) => Some(*n),
            TermValue::Text(s) => s.trim().parse().ok(),
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            TermValue::Int(_) => None,
            TermValue::Text(s) => Some(s),
        }
    }
}

impl fmt::Display for TermValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TermValue::Int(n) => write!(f, "{}", n),
            TermValue::Text(s) => write!(f, "{}", s),
        }
    }
}

impl From<i64> for TermValue {
    fn from(n: i64) -> Self {
        TermValue::Int(n)
    }
}

impl From<&str> for TermValue {
    fn from(s: &str) -> Self {
        TermValue::Text(s.to_string())
    }
}

impl From<String> for TermValue {
    fn from(s: String) -> Self {
        TermValue::Text(s)
    }
}

/// One `(keyword, relation, value)` unit of a filter.
///
/// Equality is full-triple equality, so `severity>3` and `severity>4`
/// are distinct terms even though they share a keyword.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FilterTerm {
    pub keyword: Option<String>,
    pub relation: Option<Relation>,
    pub value: Option<TermValue>,
}

impl FilterTerm {
    /// A full keyword term, e.g. `severity>3`.
    pub fn new(
        keyword: impl Into<String>,
        relation: Relation,
        value: impl Into<TermValue>,
    ) -> Self {
        FilterTerm {
            keyword: Some(keyword.into()),
            relation: Some(relation),
            value: Some(value.into()),
        }
    }

    /// A bare search value with no keyword and no relation.
    pub fn bare(value: impl Into<TermValue>) -> Self {
        FilterTerm {
            keyword: None,
            relation: None,
            value: Some(value.into()),
        }
    }

    /// A value-only marker term (`and`, `or`, `not`, `re`, `regexp`).
    pub fn marker(word: impl Into<String>) -> Self {
        FilterTerm {
            keyword: None,
            relation: None,
            value: Some(TermValue::Text(word.into())),
        }
    }

    /// Parse one atom into a normalized term.
    ///
    /// This never fails: an atom with no recognized relation operator
    /// becomes a bare value, and unknown keywords pass through verbatim.
    pub fn parse(atom: &str) -> FilterTerm {
        let (keyword, relation, raw_value) = split_atom(atom);
        let value = unquote(raw_value);
        convert(keyword, Some(value.as_str()), relation)
    }
}

impl fmt::Display for FilterTerm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", crate::serialize::term_to_string(self))
    }
}

/// Split an atom at the first relation operator outside of quotes.
///
/// Returns `(keyword, relation, raw value)`; the keyword is `Some("")`
/// when the atom starts with an operator (e.g. `=foo`), which the
/// converter maps to a bare term.
fn split_atom(atom: &str) -> (Option<&str>, Option<Relation>, &str) {
    let mut in_quotes = false;
    let mut escaped = false;

    for (i, c) in atom.char_indices() {
        if escaped {
            escaped = false;
            continue;
        }
        match c {
            '\\' if in_quotes => escaped = true,
            '"' => in_quotes = !in_quotes,
            _ if !in_quotes => {
                if let Some(relation) = Relation::from_char(c) {
                    return (Some(&atom[..i]), Some(relation), &atom[i + 1..]);
                }
            }
            _ => {}
        }
    }

    (None, None, atom)
}

/// Strip surrounding quotes and resolve `\"` escapes.
///
/// Values without a leading quote are returned unchanged. A missing
/// closing quote is tolerated.
fn unquote(raw: &str) -> String {
    let Some(inner) = raw.strip_prefix('"') else {
        return raw.to_string();
    };
    let inner = inner.strip_suffix('"').unwrap_or(inner);

    let mut out = String::with_capacity(inner.len());
    let mut escaped = false;
    for c in inner.chars() {
        if escaped {
            if c != '"' {
                out.push('\\');
            }
            out.push(c);
            escaped = false;
        } else if c == '\\' {
            escaped = true;
        } else {
            out.push(c);
        }
    }
    if escaped {
        out.push('\\');
    }
    out
}
