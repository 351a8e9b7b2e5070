//! Constraint sets.
//!
//! Each set turns parsed [`Condition`]s into typed constraints for one value
//! type, then checks values against them:
//!
//! - [`StringConstraint`]: `len`, `regexp`, `in`
//! - [`IntConstraint`]: `min`, `max`, `in`
//!
//! Resolving is fail-fast: the first unknown operator, unparsable operand or
//! broken pattern aborts with a [`ValidateError`](crate::ValidateError).
//! Checking is fail-soft: every failing `(value, constraint)` pair becomes a
//! violation.

pub mod int;
pub mod string;

pub use int::IntConstraint;
pub use string::StringConstraint;

use crate::error::ValidateResult;
use crate::report::{Violation, ViolationKind};
use crate::rule::Condition;

/// A typed constraint resolved from one condition.
pub trait Constraint: Sized {
    /// The type of value checked.
    type Input: ?Sized;

    /// Builds the constraint for `condition` on `field`.
    fn resolve(field: &str, condition: &Condition) -> ValidateResult<Self>;

    /// Checks one value.
    fn check(&self, input: &Self::Input) -> Result<(), ViolationKind>;
}

/// Resolves every condition, in order.
pub fn resolve_all<C: Constraint>(field: &str, conditions: &[Condition]) -> ValidateResult<Vec<C>> {
    conditions
        .iter()
        .map(|condition| C::resolve(field, condition))
        .collect()
}

/// Checks each value against every constraint, value-major.
///
/// For values `[v1, v2]` and constraints `[c1, c2]` violations come out as
/// `(v1,c1), (v1,c2), (v2,c1), (v2,c2)`, keeping only the failures.
pub fn evaluate<'v, C, I>(field: &str, constraints: &[C], values: I) -> Vec<Violation>
where
    C: Constraint,
    C::Input: 'v,
    I: IntoIterator<Item = &'v C::Input>,
{
    values
        .into_iter()
        .flat_map(move |value| constraints.iter().filter_map(move |c| c.check(value).err()))
        .map(|kind| Violation::new(field, kind))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rule::parse_rule;
    use pretty_assertions::assert_eq;

    #[test]
    fn evaluation_is_value_major() {
        let conditions = parse_rule("in:0,11|max:6|min:13").unwrap();
        let constraints: Vec<IntConstraint> = resolve_all("multi", &conditions).unwrap();
        let kinds: Vec<_> = evaluate("multi", &constraints, &[12, 5])
            .into_iter()
            .map(|v| v.kind)
            .collect();
        assert_eq!(
            kinds,
            vec![
                ViolationKind::IntIn,
                ViolationKind::IntMax,
                ViolationKind::IntMin,
                ViolationKind::IntIn,
                ViolationKind::IntMin,
            ]
        );
    }

    #[test]
    fn no_values_no_violations() {
        let conditions = parse_rule("len:3").unwrap();
        let constraints: Vec<StringConstraint> = resolve_all("tags", &conditions).unwrap();
        let empty: [&str; 0] = [];
        assert!(evaluate("tags", &constraints, empty.iter().copied()).is_empty());
    }
}
