//! CLI interface for costexp
//!
//! This module defines the command-line interface using clap. Every command
//! works offline: it lists the modelled operations, checks request
//! documents against them, or builds filter expressions from flags.
//!
//! # Example
//!
//! ```bash
//! # List operations and their X-Amz-Target values
//! costexp operations
//!
//! # Validate a request document
//! costexp validate forecast.json --operation GetCostForecast
//!
//! # Build a filter: REGION in (us-east-1, us-west-1) AND NOT USAGE_TYPE = DataTransfer
//! costexp filter --dimension REGION=us-east-1,us-west-1 --exclude-dimension USAGE_TYPE=DataTransfer
//! ```

use clap::{Args, Parser, Subcommand};
use costexp_model::operation::OperationName;
use std::path::PathBuf;

/// Work with AWS Cost Explorer request and response documents
#[derive(Parser, Debug, Clone)]
#[command(name = "costexp")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Show informational output (default is quiet mode with only warnings and errors)
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,

    /// Only show errors
    #[arg(long, short = 'q', global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Output as JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands
#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// List every operation with its X-Amz-Target header value
    Operations,

    /// Parse a request document as an operation and report validation issues
    Validate(DocumentArgs),

    /// Print the request envelope (target, content type, body) for a document
    Envelope(DocumentArgs),

    /// Build a filter expression from predicate flags and print its JSON
    Filter(FilterArgs),
}

/// A request document and the operation it is for
#[derive(Args, Debug, Clone)]
pub struct DocumentArgs {
    /// Path to the request JSON document
    pub file: PathBuf,

    /// Operation name, e.g. GetCostAndUsage
    #[arg(long, short = 'o', env = "COSTEXP_OPERATION", value_parser = parse_operation)]
    pub operation: OperationName,
}

/// Predicates for the filter command
///
/// Each predicate flag takes `KEY=V1,V2,...` and may be repeated.
#[derive(Args, Debug, Clone, Default)]
pub struct FilterArgs {
    /// Dimension predicate, e.g. REGION=us-east-1,us-west-1
    #[arg(long = "dimension", value_name = "KEY=VALUES")]
    pub dimensions: Vec<String>,

    /// Tag predicate, e.g. team=web,data
    #[arg(long = "tag", value_name = "KEY=VALUES")]
    pub tags: Vec<String>,

    /// Cost category predicate, e.g. Environment=prod
    #[arg(long = "cost-category", value_name = "NAME=VALUES")]
    pub cost_categories: Vec<String>,

    /// Dimension predicate to exclude (wrapped in Not)
    #[arg(long = "exclude-dimension", value_name = "KEY=VALUES")]
    pub exclude_dimensions: Vec<String>,

    /// Combine predicates with Or instead of And
    #[arg(long)]
    pub any: bool,
}

/// Parse an operation name for clap
pub fn parse_operation(value: &str) -> std::result::Result<OperationName, String> {
    value.parse::<OperationName>().map_err(|e| e.to_string())
}
