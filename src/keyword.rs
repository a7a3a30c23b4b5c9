//! Keyword classification.
//!
//! The backend gives a handful of keywords dedicated semantics: pagination
//! (`first`, `rows`), result quality (`min_qod`), boolean toggles encoded
//! as integers (`apply_overrides`, ...), and sorting/grouping strings
//! (`sort`, `levels`, ...). Everything else is an ordinary search term
//! and passes through untouched.

/// Normalization strategy for a recognized keyword.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeywordClass {
    /// Integer-encoded boolean: any value >= 1 canonicalizes to 1, all
    /// else (including unparseable input) to 0.
    BoolInt,
    /// Pagination offset: positive integer, defaulting to 1; the relation
    /// is always `=`.
    First,
    /// Page size: integer with the relation forced to `=`; -1 means
    /// unlimited.
    Rows,
    /// Plain integer with comparators allowed (`min_qod>70`).
    Int,
    /// String value; an empty or whitespace-only value means "unset".
    Text,
}

impl KeywordClass {
    /// Look up the class of a keyword, or `None` for passthrough keywords.
    pub fn of(keyword: &str) -> Option<KeywordClass> {
        match keyword {
            "apply_overrides" | "notes" | "overrides" | "result_hosts_only" => {
                Some(KeywordClass::BoolInt)
            }
            "first" => Some(KeywordClass::First),
            "rows" => Some(KeywordClass::Rows),
            "min_qod" => Some(KeywordClass::Int),
            "name" | "sort" | "sort-reverse" | "levels" => Some(KeywordClass::Text),
            _ => None,
        }
    }
}

/// Whether at most one term may exist for this keyword in a filter.
///
/// All classified keywords are singletons; repeatable comparator terms
/// like `severity>3` are the unclassified ones.
pub fn is_singleton(keyword: &str) -> bool {
    KeywordClass::of(keyword).is_some()
}

/// Bare values with reserved structural meaning: combinators, regex
/// markers, and the empty string.
pub fn is_reserved_value(value: &str) -> bool {
    matches!(value, "and" | "or" | "not" | "re" | "regexp" | "")
}
