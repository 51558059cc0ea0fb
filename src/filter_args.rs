//! Building filter expressions from command-line flags
//!
//! Each flag value has the form `KEY=V1,V2,...`. Predicates are combined
//! with `And` (or `Or` with `--any`); a single predicate is used as-is
//! since a combinator needs at least two operands.

use crate::cli::FilterArgs;
use crate::error::{CostexpError, Result};
use costexp_core::enums::{Dimension, WireEnum};
use costexp_core::expression::Expression;
use costexp_core::types::{CostCategoryValues, DimensionValues, TagValues};
use tracing::debug;

/// Split `KEY=V1,V2` into its key and non-empty values
///
/// ```
/// use costexp::filter_args::parse_predicate_arg;
///
/// let (key, values) = parse_predicate_arg("REGION=us-east-1, us-west-1").unwrap();
/// assert_eq!(key, "REGION");
/// assert_eq!(values, vec!["us-east-1", "us-west-1"]);
///
/// assert!(parse_predicate_arg("REGION").is_err());
/// ```
pub fn parse_predicate_arg(arg: &str) -> Result<(String, Vec<String>)> {
    let invalid = |reason: &str| CostexpError::InvalidFilterArg {
        arg: arg.to_string(),
        reason: reason.to_string(),
    };

    let (key, values) = arg
        .split_once('=')
        .ok_or_else(|| invalid("expected KEY=V1,V2"))?;
    let key = key.trim();
    if key.is_empty() {
        return Err(invalid("key is empty"));
    }

    let values: Vec<String> = values
        .split(',')
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .map(str::to_string)
        .collect();
    if values.is_empty() {
        return Err(invalid("no values given"));
    }

    Ok((key.to_string(), values))
}

/// Parse a dimension name, accepting lower case and dashes
///
/// ```
/// use costexp::filter_args::parse_dimension;
/// use costexp_core::enums::Dimension;
///
/// assert_eq!(parse_dimension("linked-account").unwrap(), Dimension::LinkedAccount);
/// assert!(parse_dimension("GALAXY").is_err());
/// ```
pub fn parse_dimension(name: &str) -> Result<Dimension> {
    let normalized = name.trim().to_ascii_uppercase().replace('-', "_");
    let dimension = Dimension::from(normalized);
    if dimension.is_known() {
        Ok(dimension)
    } else {
        Err(CostexpError::InvalidFilterArg {
            arg: name.to_string(),
            reason: format!(
                "unknown dimension; expected one of {}",
                Dimension::values().join(", ")
            ),
        })
    }
}

fn dimension_predicate(arg: &str) -> Result<Expression> {
    let (key, values) = parse_predicate_arg(arg)?;
    Ok(DimensionValues::new(parse_dimension(&key)?, values).into())
}

/// Build the expression described by `args`
pub fn build_filter(args: &FilterArgs) -> Result<Expression> {
    let mut predicates = Vec::new();

    for arg in &args.dimensions {
        predicates.push(dimension_predicate(arg)?);
    }
    for arg in &args.tags {
        let (key, values) = parse_predicate_arg(arg)?;
        predicates.push(TagValues::new(key, values).into());
    }
    for arg in &args.cost_categories {
        let (key, values) = parse_predicate_arg(arg)?;
        predicates.push(CostCategoryValues::new(key, values).into());
    }
    for arg in &args.exclude_dimensions {
        predicates.push(!dimension_predicate(arg)?);
    }

    debug!("Built {} filter predicate(s)", predicates.len());

    match predicates.len() {
        0 => Err(CostexpError::EmptyFilter),
        1 => Ok(predicates.remove(0)),
        _ if args.any => Ok(Expression::or(predicates)),
        _ => Ok(Expression::and(predicates)),
    }
}
