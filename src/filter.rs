//! The ordered, immutable term collection.
//!
//! A [`Filter`] is a value object: every mutating-looking operation
//! returns a new instance, so holders of a filter can read it from any
//! number of places without coordination. Terms combine with AND
//! semantics; `or`/`not` groupings are represented by marker terms in
//! the sequence.

use crate::convert::convert;
use crate::keyword::is_singleton;
use crate::serialize::filter_to_string;
use crate::term::{FilterTerm, Relation, TermValue};
use crate::tokenizer::tokenize;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// An ordered sequence of filter terms with singleton-keyword set
/// semantics.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Filter {
    terms: Vec<FilterTerm>,
}

impl Filter {
    pub fn new() -> Filter {
        Filter::default()
    }

    /// Parse a filter string. Never fails: malformed pieces degrade to
    /// passthrough terms so user input is always representable.
    pub fn from_string(text: &str) -> Filter {
        let mut filter = Filter::new();
        for atom in tokenize(text) {
            filter.apply(FilterTerm::parse(atom));
        }
        filter
    }

    /// A one-term filter, useful as a combination seed.
    pub fn from_term(term: FilterTerm) -> Filter {
        let mut filter = Filter::new();
        filter.apply(term);
        filter
    }

    /// Combine two filters with AND semantics: this filter's terms
    /// followed by the other's, with the other's singleton keywords
    /// winning over ours.
    pub fn and(&self, other: &Filter) -> Filter {
        let mut combined = self.clone();
        for term in &other.terms {
            combined.apply(term.clone());
        }
        combined
    }

    /// The value of the first term carrying this keyword.
    pub fn get(&self, keyword: &str) -> Option<&TermValue> {
        self.terms
            .iter()
            .find(|t| t.keyword.as_deref() == Some(keyword))
            .and_then(|t| t.value.as_ref())
    }

    /// Replace or insert the term for a keyword, running the new value
    /// through normalization. Passing `None` (or a value that
    /// normalizes to unset, like an empty string for text keywords)
    /// removes the term.
    pub fn set(&self, keyword: &str, value: Option<&str>, relation: Option<Relation>) -> Filter {
        let mut next = self.clone();

        // An absent value is an explicit removal request; conversion
        // would otherwise substitute the keyword's default for
        // integer-class keywords.
        let Some(value) = value else {
            next.terms.retain(|t| t.keyword.as_deref() != Some(keyword));
            return next;
        };

        let term = convert(Some(keyword), Some(value), relation);

        // Normalization may rewrite the term away from the requested
        // keyword (reserved values, numeric shorthand); those just
        // append.
        if term.keyword.as_deref() != Some(keyword) {
            next.apply(term);
            return next;
        }

        if term.value.is_none() {
            next.terms.retain(|t| t.keyword.as_deref() != Some(keyword));
        } else if let Some(slot) = next
            .terms
            .iter_mut()
            .find(|t| t.keyword.as_deref() == Some(keyword))
        {
            *slot = term;
        } else {
            next.terms.push(term);
        }
        next
    }

    /// Exact triple match: `severity>3` is present, `severity>4` is not.
    pub fn has_term(&self, term: &FilterTerm) -> bool {
        self.terms.contains(term)
    }

    /// A variant asking for every matching result: pagination reset to
    /// `first=1 rows=-1` (unlimited), e.g. for bulk export.
    pub fn all(&self) -> Filter {
        self.set("first", Some("1"), None)
            .set("rows", Some("-1"), None)
    }

    /// Canonical string form; parsing it back yields an equal filter for
    /// values inside the quoting scheme.
    pub fn to_filter_string(&self) -> String {
        filter_to_string(&self.terms)
    }

    pub fn terms(&self) -> &[FilterTerm] {
        &self.terms
    }

    pub fn iter(&self) -> std::slice::Iter<'_, FilterTerm> {
        self.terms.iter()
    }

    pub fn len(&self) -> usize {
        self.terms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    /// Append a term with singleton collapse: a singleton keyword
    /// replaces its existing term in place (last write wins), and an
    /// unset value removes the term entirely.
    fn apply(&mut self, term: FilterTerm) {
        let singleton = term.keyword.as_deref().is_some_and(is_singleton);

        if singleton {
            let keyword = term.keyword.clone();
            let keyword = keyword.as_deref();
            if term.value.is_none() {
                self.terms.retain(|t| t.keyword.as_deref() != keyword);
                return;
            }
            if let Some(slot) = self
                .terms
                .iter_mut()
                .find(|t| t.keyword.as_deref() == keyword)
            {
                *slot = term;
                return;
            }
        } else if term.value.is_none() {
            // A keyword term whose value normalized to unset carries no
            // information; drop it.
            return;
        }

        self.terms.push(term);
    }
}

impl fmt::Display for Filter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_filter_string())
    }
}

impl<'a> IntoIterator for &'a Filter {
    type Item = &'a FilterTerm;
    type IntoIter = std::slice::Iter<'a, FilterTerm>;

    fn into_iter(self) -> Self::IntoIter {
        self.terms.iter()
    }
}

/// Filters serialize as their canonical string so they can embed
/// directly in request and settings payloads.
impl Serialize for Filter {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_filter_string())
    }
}

impl<'de> Deserialize<'de> for Filter {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        Ok(Filter::from_string(&text))
    }
}
