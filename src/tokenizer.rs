//! Splitting a filter string into atoms.
//!
//! An atom is one whitespace-delimited unit of the filter language, e.g.
//! `rows=10`, `severity>3`, or `name="foo bar"`. Quoted spans keep their
//! internal whitespace, and `\"` inside a quoted span is an escaped quote.
//! Quotes are left in place; the term parser strips them.

/// Split a filter string into atoms, preserving quoted spans.
///
/// Leading, trailing, and repeated whitespace is insignificant. An
/// unterminated quote runs to the end of the input rather than being an
/// error, so a filter remains usable while the user is still typing it.
/// Empty input yields no atoms.
pub fn tokenize(input: &str) -> Vec<&str> {
    let mut atoms = Vec::new();
    let mut in_quotes = false;
    let mut escaped = false;
    let mut start = 0;

    for (i, c) in input.char_indices() {
        if escaped {
            escaped = false;
            continue;
        }
        match c {
            '\\' if in_quotes => escaped = true,
            '"' => in_quotes = !in_quotes,
            c if c.is_whitespace() && !in_quotes => {
                if i > start {
                    let atom = &input[start..i];
                    if !atom.trim().is_empty() {
                        atoms.push(atom.trim());
                    }
                }
                start = i + c.len_utf8();
            }
            _ => {}
        }
    }

    if start < input.len() {
        let atom = &input[start..];
        if !atom.trim().is_empty() {
            atoms.push(atom.trim());
        }
    }

    atoms
}
