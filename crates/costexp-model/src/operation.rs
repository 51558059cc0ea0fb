//! Operation binding and the JSON 1.1 wire codec
//!
//! Every request type implements [`Operation`], which ties it to its wire
//! name and response type. [`encode_request`] turns a request into the
//! pieces an HTTP layer needs (`X-Amz-Target`, content type and body);
//! [`decode_response`] and [`decode_service_error`] handle what comes back.
//!
//! # Examples
//!
//! ```
//! use costexp_core::types::DateInterval;
//! use costexp_model::cost_and_usage::GetCostAndUsageRequest;
//! use costexp_model::operation::{JSON_CONTENT_TYPE, encode_request};
//!
//! let request = GetCostAndUsageRequest::new(DateInterval::new("2020-01-01", "2020-02-01"))
//!     .with_metrics(["UnblendedCost"]);
//! let envelope = encode_request(&request).unwrap();
//!
//! assert_eq!(envelope.target, "AWSInsightsIndexService.GetCostAndUsage");
//! assert_eq!(envelope.content_type, JSON_CONTENT_TYPE);
//! assert!(envelope.body.starts_with(r#"{"TimePeriod""#));
//! ```

use crate::cost_and_usage::{
    GetCostAndUsageRequest, GetCostAndUsageResponse, GetCostAndUsageWithResourcesRequest,
    GetCostAndUsageWithResourcesResponse,
};
use crate::cost_category::{
    CreateCostCategoryDefinitionRequest, CreateCostCategoryDefinitionResponse,
    DeleteCostCategoryDefinitionRequest, DeleteCostCategoryDefinitionResponse,
    DescribeCostCategoryDefinitionRequest, DescribeCostCategoryDefinitionResponse,
    ListCostCategoryDefinitionsRequest, ListCostCategoryDefinitionsResponse,
    UpdateCostCategoryDefinitionRequest, UpdateCostCategoryDefinitionResponse,
};
use crate::dimensions::{
    GetDimensionValuesRequest, GetDimensionValuesResponse, GetTagsRequest, GetTagsResponse,
};
use crate::forecast::{
    GetCostForecastRequest, GetCostForecastResponse, GetUsageForecastRequest,
    GetUsageForecastResponse,
};
use crate::reservations::{
    GetReservationCoverageRequest, GetReservationCoverageResponse,
    GetReservationPurchaseRecommendationRequest, GetReservationPurchaseRecommendationResponse,
    GetReservationUtilizationRequest, GetReservationUtilizationResponse,
};
use crate::rightsizing::{GetRightsizingRecommendationRequest, GetRightsizingRecommendationResponse};
use crate::savings_plans::{
    GetSavingsPlansCoverageRequest, GetSavingsPlansCoverageResponse,
    GetSavingsPlansPurchaseRecommendationRequest, GetSavingsPlansPurchaseRecommendationResponse,
    GetSavingsPlansUtilizationDetailsRequest, GetSavingsPlansUtilizationDetailsResponse,
    GetSavingsPlansUtilizationRequest, GetSavingsPlansUtilizationResponse,
};
use costexp_core::error::{CostExplorerError, Result, ServiceError};
use costexp_core::validation::{Validate, ValidationReport};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use tracing::{debug, warn};

/// Service prefix of every `X-Amz-Target` value
pub const TARGET_PREFIX: &str = "AWSInsightsIndexService";

/// Content type of requests and responses
pub const JSON_CONTENT_TYPE: &str = "application/x-amz-json-1.1";

/// A request type bound to its service operation
pub trait Operation: Serialize + DeserializeOwned + Validate {
    /// Operation name as the service spells it
    const NAME: &'static str;

    /// Response body type
    type Output: DeserializeOwned + Default;

    /// Value of the `X-Amz-Target` header
    fn target() -> String {
        format!("{TARGET_PREFIX}.{}", Self::NAME)
    }
}

/// Everything needed to send one request
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RequestEnvelope {
    /// `X-Amz-Target` header value
    pub target: String,
    /// `Content-Type` header value
    pub content_type: &'static str,
    /// JSON body
    pub body: String,
}

impl RequestEnvelope {
    /// The two headers the service routes on
    pub fn headers(&self) -> [(&'static str, &str); 2] {
        [
            ("X-Amz-Target", self.target.as_str()),
            ("Content-Type", self.content_type),
        ]
    }
}

/// Serialize `request` into a request envelope
pub fn encode_request<O: Operation>(request: &O) -> Result<RequestEnvelope> {
    let body = serde_json::to_string(request)?;
    let envelope = RequestEnvelope {
        target: O::target(),
        content_type: JSON_CONTENT_TYPE,
        body,
    };
    debug!(
        "Encoded {} request ({} bytes)",
        envelope.target,
        envelope.body.len()
    );
    Ok(envelope)
}

#[derive(Deserialize)]
struct ErrorDocument {
    #[serde(rename = "__type")]
    type_name: String,
    #[serde(default)]
    message: Option<String>,
    #[serde(default, rename = "Message")]
    capitalized_message: Option<String>,
}

/// Parse a service error document
///
/// Fails with [`CostExplorerError::InvalidArgument`] when `body` is JSON
/// but carries no `__type`.
pub fn decode_service_error(body: &[u8]) -> Result<ServiceError> {
    let value: serde_json::Value = serde_json::from_slice(body)?;
    if value.get("__type").is_none() {
        return Err(CostExplorerError::InvalidArgument(
            "body is not a service error document".to_string(),
        ));
    }
    let document: ErrorDocument = serde_json::from_value(value)?;
    // Either spelling may appear; the lowercase key wins when both do
    let message = document.message.or(document.capitalized_message);
    let error = ServiceError::from_type(&document.type_name, message);
    if !error.kind.is_known() {
        warn!("Unrecognised service error type: {}", document.type_name);
    }
    Ok(error)
}

/// Parse a response body for operation `O`
///
/// A body carrying `__type` is turned into [`CostExplorerError::Service`];
/// an empty body yields the default (all fields absent) response.
pub fn decode_response<O: Operation>(body: &[u8]) -> Result<O::Output> {
    if body.iter().all(u8::is_ascii_whitespace) {
        debug!("Empty {} response body", O::NAME);
        return Ok(O::Output::default());
    }
    let value: serde_json::Value = serde_json::from_slice(body)?;
    if value.get("__type").is_some() {
        return Err(decode_service_error(body)?.into());
    }
    Ok(serde_json::from_value(value)?)
}

/// A request document that parsed as its operation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckedRequest {
    pub operation: OperationName,
    pub envelope: RequestEnvelope,
    /// Problems validation found; empty when the request looks sendable
    pub report: ValidationReport,
}

fn check<O: Operation>(operation: OperationName, document: &str) -> Result<CheckedRequest> {
    let request: O = serde_json::from_str(document)?;
    let report = request.validate();
    let envelope = encode_request(&request)?;
    Ok(CheckedRequest {
        operation,
        envelope,
        report,
    })
}

macro_rules! operations {
    ( $( $(#[$meta:meta])* $variant:ident => $request:ty, $response:ty; )+ ) => {
        $(
            impl Operation for $request {
                const NAME: &'static str = stringify!($variant);
                type Output = $response;
            }
        )+

        /// Names of every operation this crate models
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
        pub enum OperationName {
            $( $(#[$meta])* $variant, )+
        }

        impl OperationName {
            /// Every operation, in declaration order
            pub const ALL: &'static [OperationName] = &[$(Self::$variant),+];

            /// Operation name as the service spells it
            pub fn as_str(&self) -> &'static str {
                match self {
                    $( Self::$variant => stringify!($variant), )+
                }
            }

            /// Parse `document` as this operation's request, validate it and
            /// encode its envelope
            pub fn check_document(&self, document: &str) -> Result<CheckedRequest> {
                match self {
                    $( Self::$variant => check::<$request>(*self, document), )+
                }
            }
        }
    };
}

operations! {
    CreateCostCategoryDefinition => CreateCostCategoryDefinitionRequest, CreateCostCategoryDefinitionResponse;
    DeleteCostCategoryDefinition => DeleteCostCategoryDefinitionRequest, DeleteCostCategoryDefinitionResponse;
    DescribeCostCategoryDefinition => DescribeCostCategoryDefinitionRequest, DescribeCostCategoryDefinitionResponse;
    GetCostAndUsage => GetCostAndUsageRequest, GetCostAndUsageResponse;
    GetCostAndUsageWithResources => GetCostAndUsageWithResourcesRequest, GetCostAndUsageWithResourcesResponse;
    GetCostForecast => GetCostForecastRequest, GetCostForecastResponse;
    GetDimensionValues => GetDimensionValuesRequest, GetDimensionValuesResponse;
    GetReservationCoverage => GetReservationCoverageRequest, GetReservationCoverageResponse;
    GetReservationPurchaseRecommendation => GetReservationPurchaseRecommendationRequest, GetReservationPurchaseRecommendationResponse;
    GetReservationUtilization => GetReservationUtilizationRequest, GetReservationUtilizationResponse;
    GetRightsizingRecommendation => GetRightsizingRecommendationRequest, GetRightsizingRecommendationResponse;
    GetSavingsPlansCoverage => GetSavingsPlansCoverageRequest, GetSavingsPlansCoverageResponse;
    GetSavingsPlansPurchaseRecommendation => GetSavingsPlansPurchaseRecommendationRequest, GetSavingsPlansPurchaseRecommendationResponse;
    GetSavingsPlansUtilization => GetSavingsPlansUtilizationRequest, GetSavingsPlansUtilizationResponse;
    GetSavingsPlansUtilizationDetails => GetSavingsPlansUtilizationDetailsRequest, GetSavingsPlansUtilizationDetailsResponse;
    GetTags => GetTagsRequest, GetTagsResponse;
    GetUsageForecast => GetUsageForecastRequest, GetUsageForecastResponse;
    ListCostCategoryDefinitions => ListCostCategoryDefinitionsRequest, ListCostCategoryDefinitionsResponse;
    UpdateCostCategoryDefinition => UpdateCostCategoryDefinitionRequest, UpdateCostCategoryDefinitionResponse;
}

impl OperationName {
    /// Value of the `X-Amz-Target` header
    pub fn target(&self) -> String {
        format!("{TARGET_PREFIX}.{}", self.as_str())
    }
}

impl fmt::Display for OperationName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Accepts the bare name (`GetCostAndUsage`) or the full target
/// (`AWSInsightsIndexService.GetCostAndUsage`)
impl FromStr for OperationName {
    type Err = CostExplorerError;

    fn from_str(s: &str) -> Result<Self> {
        let name = s
            .strip_prefix(TARGET_PREFIX)
            .and_then(|rest| rest.strip_prefix('.'))
            .unwrap_or(s);
        Self::ALL
            .iter()
            .copied()
            .find(|operation| operation.as_str() == name)
            .ok_or_else(|| CostExplorerError::UnknownOperation(s.to_string()))
    }
}
