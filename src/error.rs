use thiserror::Error;

/// Errors for the few fallible surfaces of the crate.
///
/// Filter-string parsing itself is total and never produces an error;
/// these variants cover CLI-facing input that has a fixed vocabulary.
#[derive(Debug, Error)]
pub enum FilterError {
    #[error("Unknown relation operator: '{0}'. Valid operators are: =, <, >, ~")]
    UnknownRelation(String),

    #[error("Empty keyword")]
    EmptyKeyword,
}
