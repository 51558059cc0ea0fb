//! Cost Explorer request and response models
//!
//! One module per service area, one request/response pair per operation.
//! Requests take their required fields in `new(..)` and optional ones
//! through `with_*` builders; responses are plain records whose fields are
//! all optional. [`operation`] binds each request to its wire name and
//! response type and provides the JSON 1.1 codec.
//!
//! # Examples
//!
//! ```
//! use costexp_core::enums::{Dimension, Granularity, Metric};
//! use costexp_core::expression::Expression;
//! use costexp_core::types::{DateInterval, DimensionValues};
//! use costexp_core::validation::Validate;
//! use costexp_model::forecast::GetCostForecastRequest;
//! use costexp_model::operation::encode_request;
//!
//! let request = GetCostForecastRequest::new(
//!     DateInterval::new("2020-03-01", "2020-04-01"),
//!     Metric::UnblendedCost,
//!     Granularity::Monthly,
//! )
//! .with_filter(Expression::dimensions(DimensionValues::new(
//!     Dimension::Service,
//!     ["Amazon Elastic Compute Cloud - Compute"],
//! )));
//!
//! assert!(request.validate().is_empty());
//! let envelope = encode_request(&request).unwrap();
//! assert_eq!(envelope.target, "AWSInsightsIndexService.GetCostForecast");
//! ```

pub mod cost_and_usage;
pub mod cost_category;
pub mod dimensions;
pub mod forecast;
pub mod operation;
pub mod reservations;
pub mod rightsizing;
pub mod savings_plans;

// Re-export commonly used types
pub use operation::{
    CheckedRequest, JSON_CONTENT_TYPE, Operation, OperationName, RequestEnvelope, TARGET_PREFIX,
    decode_response, decode_service_error, encode_request,
};
