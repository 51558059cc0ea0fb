//! Core types for costexp
//!
//! This crate provides the service enumerations, the shared value objects,
//! the recursive filter [`Expression`](expression::Expression), opt-in
//! validation and the error type used by every other costexp crate.

pub mod enums;
pub mod error;
pub mod expression;
pub mod types;
pub mod validation;

// Re-export commonly used types
pub use enums::{Dimension, Granularity, MatchOption, Metric, WireEnum};
pub use error::{CostExplorerError, Result, ServiceError};
pub use expression::Expression;
pub use types::{CostCategoryValues, DateInterval, DimensionValues, GroupDefinition, MetricValue, TagValues};
pub use validation::{Validate, ValidationReport};
