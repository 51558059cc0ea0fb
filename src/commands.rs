//! Command execution
//!
//! Each command renders its result through an [`OutputFormatter`] and
//! reports whether it succeeded, so `main` only has to print and pick an
//! exit code.

use crate::cli::{Command, DocumentArgs, FilterArgs};
use crate::error::{CostexpError, Result};
use crate::filter_args::build_filter;
use crate::output::OutputFormatter;
use costexp_model::operation::OperationName;
use std::path::Path;
use tracing::{info, warn};

/// Rendered result of one command
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandOutput {
    pub text: String,
    /// False when the command found problems the exit code should reflect
    pub success: bool,
}

impl CommandOutput {
    fn ok(text: String) -> Self {
        Self {
            text,
            success: true,
        }
    }
}

/// Read a request document from disk
pub fn load_document(path: &Path) -> Result<String> {
    std::fs::read_to_string(path).map_err(|source| CostexpError::ReadDocument {
        path: path.to_path_buf(),
        source,
    })
}

pub fn run_operations(formatter: &dyn OutputFormatter) -> CommandOutput {
    CommandOutput::ok(formatter.format_operations(OperationName::ALL))
}

pub fn run_validate(args: &DocumentArgs, formatter: &dyn OutputFormatter) -> Result<CommandOutput> {
    info!("Validating {} as {}", args.file.display(), args.operation);
    let document = load_document(&args.file)?;
    let checked = args.operation.check_document(&document)?;
    Ok(CommandOutput {
        text: formatter.format_check(&checked),
        success: checked.report.is_empty(),
    })
}

pub fn run_envelope(args: &DocumentArgs, formatter: &dyn OutputFormatter) -> Result<CommandOutput> {
    info!("Encoding {} as {}", args.file.display(), args.operation);
    let document = load_document(&args.file)?;
    let checked = args.operation.check_document(&document)?;
    if !checked.report.is_empty() {
        warn!(
            "{} request has {} validation issue(s); run `costexp validate` for details",
            checked.operation,
            checked.report.len()
        );
    }
    Ok(CommandOutput::ok(formatter.format_envelope(&checked.envelope)))
}

pub fn run_filter(args: &FilterArgs, formatter: &dyn OutputFormatter) -> Result<CommandOutput> {
    let filter = build_filter(args)?;
    Ok(CommandOutput::ok(formatter.format_filter(&filter)))
}

/// Run `command`
pub fn run(command: &Command, formatter: &dyn OutputFormatter) -> Result<CommandOutput> {
    match command {
        Command::Operations => Ok(run_operations(formatter)),
        Command::Validate(args) => run_validate(args, formatter),
        Command::Envelope(args) => run_envelope(args, formatter),
        Command::Filter(args) => run_filter(args, formatter),
    }
}
