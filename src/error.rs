//! Error types for the costexp command line
//!
//! Library errors from the model crates are wrapped unchanged; the variants
//! added here carry the context only the command line has, such as the
//! path of a request document or the flag that failed to parse.
//!
//! # Example
//!
//! ```
//! use costexp::error::{CostexpError, Result};
//!
//! fn read_document(path: &str) -> Result<String> {
//!     std::fs::read_to_string(path).map_err(|source| CostexpError::ReadDocument {
//!         path: path.into(),
//!         source,
//!     })
//! }
//!
//! assert!(matches!(
//!     read_document("does-not-exist.json"),
//!     Err(CostexpError::ReadDocument { .. })
//! ));
//! ```

use costexp_core::error::CostExplorerError;
use std::path::PathBuf;
use thiserror::Error;

/// Main error type for the costexp binary
#[derive(Error, Debug)]
pub enum CostexpError {
    /// Error from the model crates
    #[error(transparent)]
    CostExplorer(#[from] CostExplorerError),

    /// A request document could not be read
    #[error("Failed to read {path}: {source}")]
    ReadDocument {
        /// The document that failed to read
        path: PathBuf,
        /// The underlying IO error
        source: std::io::Error,
    },

    /// A `KEY=V1,V2` filter flag did not parse
    #[error("Invalid filter argument '{arg}': {reason}")]
    InvalidFilterArg {
        /// The flag value as given
        arg: String,
        /// What is wrong with it
        reason: String,
    },

    /// The filter command was given no predicates
    #[error("No predicates given; pass at least one of --dimension, --tag, --cost-category or --exclude-dimension")]
    EmptyFilter,
}

/// Convenience type alias for Results in costexp
pub type Result<T> = std::result::Result<T, CostexpError>;
