//! Service enumerations
//!
//! Every enumeration the Cost Explorer API defines is a closed set of wire
//! strings. The service is free to add new values at any time, so each enum
//! here carries an `Unknown(String)` variant that keeps unrecognised values
//! verbatim instead of failing deserialization.
//!
//! # Examples
//!
//! ```
//! use costexp_core::enums::{Granularity, WireEnum};
//!
//! let g: Granularity = "MONTHLY".parse().unwrap();
//! assert_eq!(g, Granularity::Monthly);
//!
//! let future: Granularity = "QUARTERLY".parse().unwrap();
//! assert_eq!(future, Granularity::Unknown("QUARTERLY".to_string()));
//! assert!(!future.is_known());
//! assert_eq!(future.as_str(), "QUARTERLY");
//!
//! // Values compare by their wire spelling
//! assert_eq!(Granularity::Unknown("MONTHLY".to_string()), Granularity::Monthly);
//! ```

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::hash::{Hash, Hasher};

/// Behaviour shared by every service enumeration
pub trait WireEnum {
    /// The wire representation of this value
    fn as_str(&self) -> &str;

    /// Whether the value is one this client knows about
    fn is_known(&self) -> bool;

    /// All wire values known to this client, in declaration order
    fn values() -> &'static [&'static str]
    where
        Self: Sized;
}

/// Declares a service enumeration with string serde, `Display`, `FromStr`
/// and an `Unknown(String)` fallback.
///
/// Equality and hashing go through the wire string, so an `Unknown` holding
/// a known spelling equals the named variant.
macro_rules! wire_enum {
    (
        $(#[$meta:meta])*
        $name:ident {
            $( $(#[$vmeta:meta])* $variant:ident => $wire:literal, )+
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone)]
        pub enum $name {
            $( $(#[$vmeta])* $variant, )+
            /// A value not known to this client, kept verbatim
            Unknown(String),
        }

        impl $name {
            const VALUES: &'static [&'static str] = &[$($wire),+];

            /// The wire representation of this value
            pub fn as_str(&self) -> &str {
                match self {
                    $( Self::$variant => $wire, )+
                    Self::Unknown(value) => value.as_str(),
                }
            }

            /// Whether the value is one this client knows about
            pub fn is_known(&self) -> bool {
                Self::VALUES.contains(&self.as_str())
            }

            /// The named variant for a known spelling held in `Unknown`
            pub fn normalized(&self) -> Self {
                match self {
                    Self::Unknown(value) => Self::from(value.as_str()),
                    other => other.clone(),
                }
            }
        }

        impl PartialEq for $name {
            fn eq(&self, other: &Self) -> bool {
                self.as_str() == other.as_str()
            }
        }

        impl Eq for $name {}

        impl Hash for $name {
            fn hash<H: Hasher>(&self, state: &mut H) {
                self.as_str().hash(state);
            }
        }

        impl WireEnum for $name {
            fn as_str(&self) -> &str {
                $name::as_str(self)
            }

            fn is_known(&self) -> bool {
                $name::is_known(self)
            }

            fn values() -> &'static [&'static str] {
                Self::VALUES
            }
        }

        impl From<&str> for $name {
            fn from(value: &str) -> Self {
                match value {
                    $( $wire => Self::$variant, )+
                    other => Self::Unknown(other.to_string()),
                }
            }
        }

        impl From<String> for $name {
            fn from(value: String) -> Self {
                match Self::from(value.as_str()) {
                    Self::Unknown(_) => Self::Unknown(value),
                    known => known,
                }
            }
        }

        impl std::str::FromStr for $name {
            type Err = std::convert::Infallible;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Ok(Self::from(s))
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl Serialize for $name {
            fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                serializer.serialize_str(self.as_str())
            }
        }

        impl<'de> Deserialize<'de> for $name {
            fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
                let value = String::deserialize(deserializer)?;
                let parsed = Self::from(value);
                if !parsed.is_known() {
                    tracing::debug!(
                        "Unrecognised {} value from the wire: {}",
                        stringify!($name),
                        parsed.as_str()
                    );
                }
                Ok(parsed)
            }
        }
    };
}

wire_enum! {
    /// Which accounts a recommendation is computed for
    AccountScope {
        /// The management (payer) account and all linked accounts
        Payer => "PAYER",
        /// Each linked account individually
        Linked => "LINKED",
    }
}

wire_enum! {
    /// The data set a `GetDimensionValues` search runs against
    Context {
        CostAndUsage => "COST_AND_USAGE",
        Reservations => "RESERVATIONS",
        SavingsPlans => "SAVINGS_PLANS",
    }
}

wire_enum! {
    /// Version of the rule grammar used by cost category definitions
    CostCategoryRuleVersion {
        CostCategoryExpressionV1 => "CostCategoryExpression.v1",
    }
}

wire_enum! {
    /// Predefined metadata axes usable in filters and groupings
    Dimension {
        Az => "AZ",
        InstanceType => "INSTANCE_TYPE",
        LinkedAccount => "LINKED_ACCOUNT",
        LinkedAccountName => "LINKED_ACCOUNT_NAME",
        Operation => "OPERATION",
        PurchaseType => "PURCHASE_TYPE",
        Region => "REGION",
        Service => "SERVICE",
        ServiceCode => "SERVICE_CODE",
        UsageType => "USAGE_TYPE",
        UsageTypeGroup => "USAGE_TYPE_GROUP",
        RecordType => "RECORD_TYPE",
        OperatingSystem => "OPERATING_SYSTEM",
        Tenancy => "TENANCY",
        Scope => "SCOPE",
        Platform => "PLATFORM",
        SubscriptionId => "SUBSCRIPTION_ID",
        LegalEntityName => "LEGAL_ENTITY_NAME",
        DeploymentOption => "DEPLOYMENT_OPTION",
        DatabaseEngine => "DATABASE_ENGINE",
        CacheEngine => "CACHE_ENGINE",
        InstanceTypeFamily => "INSTANCE_TYPE_FAMILY",
        BillingEntity => "BILLING_ENTITY",
        ReservationId => "RESERVATION_ID",
        ResourceId => "RESOURCE_ID",
        RightsizingType => "RIGHTSIZING_TYPE",
        SavingsPlansType => "SAVINGS_PLANS_TYPE",
        SavingsPlanArn => "SAVINGS_PLAN_ARN",
        PaymentOption => "PAYMENT_OPTION",
    }
}

wire_enum! {
    /// Time bucket size for results and forecasts
    Granularity {
        Daily => "DAILY",
        Monthly => "MONTHLY",
        Hourly => "HOURLY",
    }
}

wire_enum! {
    /// What a `GroupDefinition` key refers to
    GroupDefinitionType {
        Dimension => "DIMENSION",
        Tag => "TAG",
        CostCategory => "COST_CATEGORY",
    }
}

wire_enum! {
    /// Historical window a recommendation is based on
    LookbackPeriodInDays {
        SevenDays => "SEVEN_DAYS",
        ThirtyDays => "THIRTY_DAYS",
        SixtyDays => "SIXTY_DAYS",
    }
}

wire_enum! {
    /// How a predicate's values are compared against record values
    MatchOption {
        Equals => "EQUALS",
        StartsWith => "STARTS_WITH",
        EndsWith => "ENDS_WITH",
        Contains => "CONTAINS",
        CaseSensitive => "CASE_SENSITIVE",
        CaseInsensitive => "CASE_INSENSITIVE",
    }
}

wire_enum! {
    /// Cost or usage metric used by forecasts
    ///
    /// `GetCostAndUsage` takes the same metrics spelled in PascalCase; see
    /// [`Metric::metric_name`].
    Metric {
        BlendedCost => "BLENDED_COST",
        UnblendedCost => "UNBLENDED_COST",
        AmortizedCost => "AMORTIZED_COST",
        NetUnblendedCost => "NET_UNBLENDED_COST",
        NetAmortizedCost => "NET_AMORTIZED_COST",
        UsageQuantity => "USAGE_QUANTITY",
        NormalizedUsageAmount => "NORMALIZED_USAGE_AMOUNT",
    }
}

impl Metric {
    /// Metric names accepted by `GetCostAndUsage` and its variants
    pub const METRIC_NAMES: &'static [&'static str] = &[
        "BlendedCost",
        "UnblendedCost",
        "AmortizedCost",
        "NetUnblendedCost",
        "NetAmortizedCost",
        "UsageQuantity",
        "NormalizedUsageAmount",
    ];

    /// The PascalCase spelling used in `GetCostAndUsage.Metrics`
    ///
    /// ```
    /// use costexp_core::enums::Metric;
    ///
    /// assert_eq!(Metric::UnblendedCost.metric_name(), Some("UnblendedCost"));
    /// assert_eq!(Metric::Unknown("X".into()).metric_name(), None);
    /// ```
    pub fn metric_name(&self) -> Option<&'static str> {
        match self.normalized() {
            Self::BlendedCost => Some("BlendedCost"),
            Self::UnblendedCost => Some("UnblendedCost"),
            Self::AmortizedCost => Some("AmortizedCost"),
            Self::NetUnblendedCost => Some("NetUnblendedCost"),
            Self::NetAmortizedCost => Some("NetAmortizedCost"),
            Self::UsageQuantity => Some("UsageQuantity"),
            Self::NormalizedUsageAmount => Some("NormalizedUsageAmount"),
            Self::Unknown(_) => None,
        }
    }
}

wire_enum! {
    /// Reserved Instance offering class
    OfferingClass {
        Standard => "STANDARD",
        Convertible => "CONVERTIBLE",
    }
}

wire_enum! {
    /// Upfront payment model for a commitment
    PaymentOption {
        NoUpfront => "NO_UPFRONT",
        PartialUpfront => "PARTIAL_UPFRONT",
        AllUpfront => "ALL_UPFRONT",
        LightUtilization => "LIGHT_UTILIZATION",
        MediumUtilization => "MEDIUM_UTILIZATION",
        HeavyUtilization => "HEAVY_UTILIZATION",
    }
}

wire_enum! {
    /// Whether rightsizing may suggest instances outside the current family
    RecommendationTarget {
        SameInstanceFamily => "SAME_INSTANCE_FAMILY",
        CrossInstanceFamily => "CROSS_INSTANCE_FAMILY",
    }
}

wire_enum! {
    /// Kind of rightsizing action
    RightsizingType {
        Terminate => "TERMINATE",
        Modify => "MODIFY",
    }
}

wire_enum! {
    /// Sections of Savings Plans utilization details to return
    SavingsPlansDataType {
        Attributes => "ATTRIBUTES",
        Utilization => "UTILIZATION",
        AmortizedCommitment => "AMORTIZED_COMMITMENT",
        Savings => "SAVINGS",
    }
}

wire_enum! {
    /// Savings Plans types that purchase recommendations support
    SupportedSavingsPlansType {
        ComputeSp => "COMPUTE_SP",
        Ec2InstanceSp => "EC2_INSTANCE_SP",
    }
}

wire_enum! {
    /// Commitment term
    TermInYears {
        OneYear => "ONE_YEAR",
        ThreeYears => "THREE_YEARS",
    }
}

wire_enum! {
    /// Error codes the service returns in its `__type` field
    ServiceErrorKind {
        BillExpiration => "BillExpirationException",
        DataUnavailable => "DataUnavailableException",
        InvalidNextToken => "InvalidNextTokenException",
        LimitExceeded => "LimitExceededException",
        RequestChanged => "RequestChangedException",
        ResourceNotFound => "ResourceNotFoundException",
        ServiceQuotaExceeded => "ServiceQuotaExceededException",
        UnresolvableUsageUnit => "UnresolvableUsageUnitException",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_value_round_trip() {
        let json = serde_json::to_string(&Dimension::LinkedAccount).unwrap();
        assert_eq!(json, "\"LINKED_ACCOUNT\"");

        let parsed: Dimension = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, Dimension::LinkedAccount);
    }

    #[test]
    fn test_unknown_value_is_preserved() {
        let parsed: Dimension = serde_json::from_str("\"INVOICING_ENTITY\"").unwrap();
        assert_eq!(parsed, Dimension::Unknown("INVOICING_ENTITY".to_string()));
        assert!(!parsed.is_known());
        assert_eq!(
            serde_json::to_string(&parsed).unwrap(),
            "\"INVOICING_ENTITY\""
        );
    }

    #[test]
    fn test_from_str_is_case_sensitive() {
        assert_eq!("DAILY".parse::<Granularity>().unwrap(), Granularity::Daily);
        assert_eq!(
            "daily".parse::<Granularity>().unwrap(),
            Granularity::Unknown("daily".to_string())
        );
    }

    #[test]
    fn test_display_matches_wire() {
        assert_eq!(
            CostCategoryRuleVersion::CostCategoryExpressionV1.to_string(),
            "CostCategoryExpression.v1"
        );
        assert_eq!(PaymentOption::AllUpfront.to_string(), "ALL_UPFRONT");
    }

    #[test]
    fn test_values_lists_every_known_variant() {
        assert_eq!(Granularity::values(), &["DAILY", "MONTHLY", "HOURLY"]);
        assert_eq!(Dimension::values().len(), 29);
        for value in MatchOption::values() {
            assert!(MatchOption::from(*value).is_known());
        }
    }

    #[test]
    fn test_metric_names_cover_every_metric() {
        for wire in Metric::values() {
            let metric = Metric::from(*wire);
            let name = metric.metric_name().unwrap();
            assert!(Metric::METRIC_NAMES.contains(&name));
        }
    }

    #[test]
    fn test_unknown_spelled_like_known_equals_named_variant() {
        use std::collections::hash_map::DefaultHasher;

        fn hash_of(value: &Granularity) -> u64 {
            let mut hasher = DefaultHasher::new();
            value.hash(&mut hasher);
            hasher.finish()
        }

        let spelled = Granularity::Unknown("MONTHLY".to_string());
        assert_eq!(spelled, Granularity::Monthly);
        assert_eq!(hash_of(&spelled), hash_of(&Granularity::Monthly));
        assert!(spelled.is_known());
        assert!(matches!(spelled.normalized(), Granularity::Monthly));
        assert_ne!(Granularity::Unknown("monthly".to_string()), Granularity::Monthly);

        let metric = Metric::Unknown("UNBLENDED_COST".to_string());
        assert_eq!(metric.metric_name(), Some("UnblendedCost"));
    }

    #[test]
    fn test_service_error_kind_from_code() {
        assert_eq!(
            ServiceErrorKind::from("LimitExceededException"),
            ServiceErrorKind::LimitExceeded
        );
    }

    mod properties {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn any_string_round_trips(raw in "\\PC{0,24}") {
                let value = PaymentOption::from(raw.as_str());
                prop_assert_eq!(value.as_str(), raw.as_str());

                let json = serde_json::to_string(&value).unwrap();
                let parsed: PaymentOption = serde_json::from_str(&json).unwrap();
                prop_assert_eq!(parsed, value);
            }

            #[test]
            fn known_values_parse_to_known_variants(
                wire in prop::sample::select(Dimension::values())
            ) {
                let value: Dimension = wire.parse().unwrap();
                prop_assert!(value.is_known());
                prop_assert_eq!(value.to_string(), wire);
            }
        }
    }
}
