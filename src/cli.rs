use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// A tool to parse, normalize, and combine management-backend filter
/// strings
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Output format
    #[arg(short = 'F', long, global = true, value_enum, default_value = "text")]
    pub format: OutputFormat,

    /// Write the output to a file in addition to stdout
    #[arg(short, long, global = true)]
    pub output: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Parse a filter string and show its normalized terms
    Parse {
        /// Filter string, e.g. "apply_overrides=0 rows=100 sort=name"
        filter: String,
    },
    /// Re-serialize a filter string in canonical form
    Normalize {
        /// Filter string to normalize
        filter: String,
    },
    /// Combine filter strings left to right with AND semantics
    Combine {
        /// Filter strings; later singleton keywords win over earlier ones
        #[arg(required = true, num_args = 1..)]
        filters: Vec<String>,
    },
    /// Look up the value of a keyword in a filter string
    Get {
        /// Filter string to inspect
        filter: String,
        /// Keyword to look up, e.g. "rows"
        keyword: String,
    },
    /// Set, replace, or remove a keyword term
    Set {
        /// Filter string to update
        filter: String,
        /// Keyword to set, e.g. "rows"
        keyword: String,
        /// New value; omit to remove the term
        value: Option<String>,
        /// Relation operator (=, <, >, ~); defaults per keyword
        #[arg(short, long)]
        relation: Option<String>,
    },
}

pub fn cli_parse() -> Cli {
    Cli::parse()
}
