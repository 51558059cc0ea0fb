//! costexp - Typed models for the AWS Cost Explorer API
//!
//! This library provides:
//! - Request and response records for every Cost Explorer operation
//! - The recursive filter [`Expression`] with structural equality and hashing
//! - Opt-in client-side validation with wire-path issue reports
//! - The JSON 1.1 request envelope and service error decoding
//!
//! The model types live in the `costexp-core` and `costexp-model` crates; the
//! common ones are re-exported here and the rest are reachable through
//! [`model`]; the modules below back the `costexp` binary.
//!
//! # Examples
//!
//! ```
//! use costexp::{DateInterval, Dimension, DimensionValues, Expression, Granularity, Validate};
//! use costexp::model::cost_and_usage::GetCostAndUsageRequest;
//!
//! let request = GetCostAndUsageRequest::new(DateInterval::new("2020-01-01", "2020-02-01"))
//!     .with_granularity(Granularity::Monthly)
//!     .with_metrics(["UnblendedCost"])
//!     .with_filter(Expression::and([
//!         DimensionValues::new(Dimension::Region, ["us-east-1", "us-west-1"]).into(),
//!         !Expression::from(DimensionValues::new(Dimension::UsageType, ["DataTransfer"])),
//!     ]));
//!
//! assert!(request.validate().is_empty());
//! ```

pub mod cli;
pub mod commands;
pub mod error;
pub mod filter_args;
pub mod output;

pub use costexp_model as model;

// Re-export commonly used types
pub use costexp_core::{
    CostCategoryValues, CostExplorerError, DateInterval, Dimension, DimensionValues, Expression,
    Granularity, GroupDefinition, MatchOption, Metric, MetricValue, ServiceError, TagValues,
    Validate, ValidationReport, WireEnum,
};
pub use costexp_model::{Operation, OperationName, RequestEnvelope, encode_request};
pub use error::{CostexpError, Result};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
