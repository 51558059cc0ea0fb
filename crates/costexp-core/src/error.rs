//! Error types for costexp
//!
//! This module defines the error types used throughout the costexp crates.
//! All errors are derived from `thiserror` for convenient error handling
//! and automatic `From` implementations.
//!
//! # Example
//!
//! ```
//! use costexp_core::error::{CostExplorerError, Result};
//! use costexp_core::expression::Expression;
//!
//! fn parse_filter(json: &str) -> Result<Expression> {
//!     // serde_json::Error converts into CostExplorerError::Json
//!     Ok(serde_json::from_str(json)?)
//! }
//!
//! assert!(matches!(parse_filter("{}"), Err(CostExplorerError::Json(_))));
//! ```

use crate::enums::ServiceErrorKind;
use crate::validation::ValidationReport;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Main error type for costexp operations
#[derive(Error, Debug)]
pub enum CostExplorerError {
    /// IO error occurred
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON encoding or decoding error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Client-side validation found problems
    #[error("Validation failed with {0}")]
    Validation(ValidationReport),

    /// Operation name not recognised
    #[error("Unknown operation: {0}")]
    UnknownOperation(String),

    /// Invalid argument
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Error document returned by the service
    #[error("Service error: {0}")]
    Service(ServiceError),
}

/// Structured error returned by the Cost Explorer service
///
/// The service sends `{"__type": "<namespace>#<Code>", "message": "..."}`;
/// only the code after the `#` is kept.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceError {
    /// Error code
    pub kind: ServiceErrorKind,
    /// Human-readable message, when the service sent one
    pub message: Option<String>,
}

impl ServiceError {
    pub fn new(kind: ServiceErrorKind, message: Option<String>) -> Self {
        Self { kind, message }
    }

    /// Build from a raw `__type` value, stripping any namespace prefix
    pub fn from_type(type_name: &str, message: Option<String>) -> Self {
        let code = type_name.rsplit('#').next().unwrap_or(type_name);
        Self::new(ServiceErrorKind::from(code), message)
    }

    /// Whether the error means the caller should back off and retry later
    pub fn is_throttling(&self) -> bool {
        self.kind == ServiceErrorKind::LimitExceeded
    }
}

impl fmt::Display for ServiceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.message {
            Some(message) => write!(f, "{}: {}", self.kind, message),
            None => write!(f, "{}", self.kind),
        }
    }
}

impl From<ServiceError> for CostExplorerError {
    fn from(error: ServiceError) -> Self {
        Self::Service(error)
    }
}

impl From<ValidationReport> for CostExplorerError {
    fn from(report: ValidationReport) -> Self {
        Self::Validation(report)
    }
}

/// Convenience type alias for Results in costexp
pub type Result<T> = std::result::Result<T, CostExplorerError>;
