//! Integer constraint set: `min`, `max`, `in`.

use super::Constraint;
use crate::error::{ValidateError, ValidateResult};
use crate::report::ViolationKind;
use crate::rule::Condition;

/// A resolved integer constraint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IntConstraint {
    /// Inclusive lower bound.
    Min(i64),
    /// Inclusive upper bound.
    Max(i64),
    /// Membership in a literal set.
    In(Vec<i64>),
}

fn parse_operand(field: &str, condition: &Condition, operand: &str) -> ValidateResult<i64> {
    operand.parse().map_err(|source| ValidateError::Parse {
        field: field.to_owned(),
        operator: condition.operator.clone(),
        operand: operand.to_owned(),
        source,
    })
}

impl Constraint for IntConstraint {
    type Input = i64;

    fn resolve(field: &str, condition: &Condition) -> ValidateResult<Self> {
        match condition.operator.as_str() {
            "min" => parse_operand(field, condition, &condition.operand).map(Self::Min),
            "max" => parse_operand(field, condition, &condition.operand).map(Self::Max),
            "in" => condition
                .members()
                .map(|member| parse_operand(field, condition, member))
                .collect::<ValidateResult<Vec<_>>>()
                .map(Self::In),
            other => Err(ValidateError::UnsupportedOperator {
                field: field.to_owned(),
                operator: other.to_owned(),
            }),
        }
    }

    fn check(&self, input: &i64) -> Result<(), ViolationKind> {
        match self {
            Self::Min(min) if input < min => Err(ViolationKind::IntMin),
            Self::Max(max) if input > max => Err(ViolationKind::IntMax),
            Self::In(members) if !members.contains(input) => Err(ViolationKind::IntIn),
            _ => Ok(()),
        }
    }
}
