//! Filter expressions
//!
//! An [`Expression`] is a boolean tree over dimension, tag and cost category
//! predicates. The service evaluates it; this crate only builds, compares
//! and serializes it.
//!
//! Each node populates exactly one of six slots on the wire
//! (`Or`, `And`, `Not`, `Dimensions`, `Tags`, `CostCategories`). The enum
//! makes that a property of the type: a node cannot hold two slots, and a
//! wire document that does fails to deserialize.
//!
//! # Examples
//!
//! ```
//! use costexp_core::enums::Dimension;
//! use costexp_core::expression::Expression;
//! use costexp_core::types::DimensionValues;
//!
//! let filter = Expression::and([
//!     Expression::dimensions(DimensionValues::new(
//!         Dimension::Region,
//!         ["us-east-1", "us-west-1"],
//!     )),
//!     !Expression::dimensions(DimensionValues::new(Dimension::UsageType, ["DataTransfer"])),
//! ]);
//!
//! assert_eq!(
//!     serde_json::to_string(&filter).unwrap(),
//!     r#"{"And":[{"Dimensions":{"Key":"REGION","Values":["us-east-1","us-west-1"]}},{"Not":{"Dimensions":{"Key":"USAGE_TYPE","Values":["DataTransfer"]}}}]}"#
//! );
//! ```

use crate::types::{CostCategoryValues, DimensionValues, TagValues};
use serde::{Deserialize, Serialize};
use std::ops::{BitAnd, BitOr, Not};

/// A node of a filter tree
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Expression {
    /// Matches when any operand matches
    Or(Vec<Expression>),
    /// Matches when every operand matches
    And(Vec<Expression>),
    /// Matches when the operand does not
    Not(Box<Expression>),
    /// Dimension predicate
    Dimensions(DimensionValues),
    /// Tag predicate
    Tags(TagValues),
    /// Cost category predicate
    CostCategories(CostCategoryValues),
}

/// Borrowed view of a leaf predicate
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Predicate<'a> {
    Dimensions(&'a DimensionValues),
    Tags(&'a TagValues),
    CostCategories(&'a CostCategoryValues),
}

impl Expression {
    /// Conjunction of `operands`
    pub fn and(operands: impl IntoIterator<Item = Expression>) -> Self {
        Self::And(operands.into_iter().collect())
    }

    /// Disjunction of `operands`
    pub fn or(operands: impl IntoIterator<Item = Expression>) -> Self {
        Self::Or(operands.into_iter().collect())
    }

    /// Negation of `operand`
    pub fn not(operand: Expression) -> Self {
        Self::Not(Box::new(operand))
    }

    pub fn dimensions(values: DimensionValues) -> Self {
        Self::Dimensions(values)
    }

    pub fn tags(values: TagValues) -> Self {
        Self::Tags(values)
    }

    pub fn cost_categories(values: CostCategoryValues) -> Self {
        Self::CostCategories(values)
    }

    /// Wire name of the populated slot
    pub fn slot_name(&self) -> &'static str {
        match self {
            Self::Or(_) => "Or",
            Self::And(_) => "And",
            Self::Not(_) => "Not",
            Self::Dimensions(_) => "Dimensions",
            Self::Tags(_) => "Tags",
            Self::CostCategories(_) => "CostCategories",
        }
    }

    /// Whether this node is a predicate rather than a combinator
    pub fn is_leaf(&self) -> bool {
        matches!(
            self,
            Self::Dimensions(_) | Self::Tags(_) | Self::CostCategories(_)
        )
    }

    /// The leaf predicate held by this node, if any
    pub fn as_predicate(&self) -> Option<Predicate<'_>> {
        match self {
            Self::Dimensions(values) => Some(Predicate::Dimensions(values)),
            Self::Tags(values) => Some(Predicate::Tags(values)),
            Self::CostCategories(values) => Some(Predicate::CostCategories(values)),
            Self::Or(_) | Self::And(_) | Self::Not(_) => None,
        }
    }

    /// Direct children of this node
    pub fn children(&self) -> &[Expression] {
        match self {
            Self::Or(operands) | Self::And(operands) => operands,
            Self::Not(operand) => std::slice::from_ref(&**operand),
            _ => &[],
        }
    }

    /// Number of levels in the tree; a single leaf has depth 1
    pub fn depth(&self) -> usize {
        1 + self
            .children()
            .iter()
            .map(Expression::depth)
            .max()
            .unwrap_or(0)
    }

    /// Total number of nodes in the tree
    pub fn node_count(&self) -> usize {
        1 + self
            .children()
            .iter()
            .map(Expression::node_count)
            .sum::<usize>()
    }

    /// Pre-order iterator over the leaf predicates
    pub fn leaves(&self) -> Leaves<'_> {
        Leaves { stack: vec![self] }
    }
}

/// Pre-order iterator over the leaf predicates of an [`Expression`]
#[derive(Debug)]
pub struct Leaves<'a> {
    stack: Vec<&'a Expression>,
}

impl<'a> Iterator for Leaves<'a> {
    type Item = Predicate<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(node) = self.stack.pop() {
            if let Some(predicate) = node.as_predicate() {
                return Some(predicate);
            }
            self.stack.extend(node.children().iter().rev());
        }
        None
    }
}

impl From<DimensionValues> for Expression {
    fn from(values: DimensionValues) -> Self {
        Self::Dimensions(values)
    }
}

impl From<TagValues> for Expression {
    fn from(values: TagValues) -> Self {
        Self::Tags(values)
    }
}

impl From<CostCategoryValues> for Expression {
    fn from(values: CostCategoryValues) -> Self {
        Self::CostCategories(values)
    }
}

impl Not for Expression {
    type Output = Self;

    fn not(self) -> Self {
        Expression::not(self)
    }
}

/// `a & b` appends to an existing `And` on the left, otherwise starts one
impl BitAnd for Expression {
    type Output = Self;

    fn bitand(self, other: Self) -> Self {
        match self {
            Self::And(mut operands) => {
                operands.push(other);
                Self::And(operands)
            }
            lhs => Self::And(vec![lhs, other]),
        }
    }
}

/// `a | b` appends to an existing `Or` on the left, otherwise starts one
impl BitOr for Expression {
    type Output = Self;

    fn bitor(self, other: Self) -> Self {
        match self {
            Self::Or(mut operands) => {
                operands.push(other);
                Self::Or(operands)
            }
            lhs => Self::Or(vec![lhs, other]),
        }
    }
}
