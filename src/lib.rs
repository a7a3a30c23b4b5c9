//! Filter-string parsing, normalization, and serialization
//!
//! This crate implements the small query language used to describe
//! search, sort, and pagination criteria for a remote management
//! backend. A filter string is a sequence of whitespace-separated terms:
//!
//! ```text
//! apply_overrides=0 levels=hml rows=100 min_qod=70 first=1 sort=compliant
//! ```
//!
//! # Syntax
//!
//! ```text
//! keyword=value         comparator term; relations are =, <, >, ~
//! value                 bare search word, no keyword
//! "quoted value"        value with whitespace; \" is an escaped quote
//! and / or / not        combinator markers between terms
//! re / regexp           raw regex search markers
//! ```
//!
//! Known keywords are normalized on parse: pagination keywords coerce to
//! integers with documented defaults (`first=-3` becomes `first=1`),
//! boolean keywords clamp to 0/1, and string keywords treat an empty
//! value as "unset". Unknown keywords pass through verbatim, so a filter
//! is always constructible from any input; validation is the backend's
//! job.
//!
//! [`Filter`] is immutable: `and`, `set`, and `all` return new
//! instances, and serialization round-trips (`Filter::from_string` of
//! `to_filter_string` yields an equal filter).

pub mod cli;
pub mod convert;
pub mod error;
pub mod filter;
pub mod keyword;
pub mod serialize;
pub mod term;
pub mod tokenizer;

pub use cli::{Cli, Commands, OutputFormat, cli_parse};
pub use convert::convert;
pub use error::FilterError;
pub use filter::Filter;
pub use keyword::{KeywordClass, is_reserved_value, is_singleton};
pub use term::{FilterTerm, Relation, TermValue};
pub use tokenizer::tokenize;

use anyhow::{Context, Result};
use colored::Colorize;
use comfy_table::{Attribute, Cell, ContentArrangement, Table, presets};
use serde_json::json;
use std::path::Path;

fn create_styled_table(headers: &[&str]) -> Table {
    let mut table = Table::new();
    table
        .load_preset(presets::UTF8_BORDERS_ONLY)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(
            headers
                .iter()
                .map(|h| Cell::new(h).add_attribute(Attribute::Bold)),
        );
    table
}

fn render_parse(filter: &Filter, format: OutputFormat) -> String {
    match format {
        OutputFormat::Json => serde_json::to_string_pretty(&json!({
            "filter": filter.to_filter_string(),
            "term_count": filter.len(),
            "terms": filter.terms(),
        }))
        .unwrap_or_else(|_| "{\"error\":\"failed to serialize terms\"}".into()),
        OutputFormat::Text => {
            let mut table = create_styled_table(&["Keyword", "Relation", "Value"]);
            for term in filter {
                table.add_row(vec![
                    term.keyword.clone().unwrap_or_else(|| "-".to_string()),
                    term.relation
                        .map(|r| r.to_string())
                        .unwrap_or_else(|| "-".to_string()),
                    term.value
                        .as_ref()
                        .map(|v| v.to_string())
                        .unwrap_or_else(|| "-".to_string()),
                ]);
            }
            format!(
                "{} {}\n{}\n",
                "Canonical:".bold(),
                filter.to_filter_string(),
                table
            )
        }
    }
}

fn render_filter(filter: &Filter, format: OutputFormat) -> String {
    match format {
        OutputFormat::Json => serde_json::to_string_pretty(&json!({
            "filter": filter.to_filter_string(),
        }))
        .unwrap_or_else(|_| "{\"error\":\"failed to serialize filter\"}".into()),
        OutputFormat::Text => filter.to_filter_string(),
    }
}

fn render_get(keyword: &str, value: Option<&TermValue>, format: OutputFormat) -> String {
    match format {
        OutputFormat::Json => serde_json::to_string_pretty(&json!({
            "keyword": keyword,
            "value": value,
        }))
        .unwrap_or_else(|_| "{\"error\":\"failed to serialize value\"}".into()),
        OutputFormat::Text => match value {
            Some(value) => format!("{} {}", keyword.cyan(), value),
            None => format!("{} {}", keyword.cyan(), "(not set)".dimmed()),
        },
    }
}

fn write_output_file(path: &Path, content: &str) -> Result<()> {
    std::fs::write(path, content)
        .with_context(|| format!("Failed to write output file '{}'", path.display()))
}

pub fn run() -> Result<()> {
    let cli = cli_parse();
    let format = cli.format;

    let rendered = match &cli.command {
        Commands::Parse { filter } => {
            let filter = Filter::from_string(filter);
            render_parse(&filter, format)
        }
        Commands::Normalize { filter } => {
            let filter = Filter::from_string(filter);
            render_filter(&filter, format)
        }
        Commands::Combine { filters } => {
            let combined = filters
                .iter()
                .map(|text| Filter::from_string(text))
                .reduce(|acc, next| acc.and(&next))
                .unwrap_or_default();
            render_filter(&combined, format)
        }
        Commands::Get { filter, keyword } => {
            let filter = Filter::from_string(filter);
            render_get(keyword, filter.get(keyword), format)
        }
        Commands::Set {
            filter,
            keyword,
            value,
            relation,
        } => {
            if keyword.trim().is_empty() {
                return Err(FilterError::EmptyKeyword.into());
            }
            let relation = relation
                .as_deref()
                .map(str::parse::<Relation>)
                .transpose()?;
            let filter = Filter::from_string(filter);
            let updated = filter.set(keyword, value.as_deref(), relation);
            render_filter(&updated, format)
        }
    };

    println!("{}", rendered);
    if let Some(path) = &cli.output {
        write_output_file(path, &rendered)?;
    }

    Ok(())
}
