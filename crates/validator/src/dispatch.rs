//! Routing of a field to its constraint set.
//!
//! The route is fixed by the [`FieldValue`] variant:
//!
//! | value               | handled by                                  |
//! |---------------------|---------------------------------------------|
//! | `Str` / `StrSeq`    | [`StringConstraint`] over each element      |
//! | `Int` / `IntSeq`    | [`IntConstraint`] over each element         |
//! | `Record`            | recursive validation, `nested` operator only |
//! | `Other`             | [`ValidateError::UnsupportedType`]          |
//! | `Mismatch`          | [`ValidateError::ValueMismatch`]            |

use tracing::trace;

use crate::config::EmptySequencePolicy;
use crate::constraints::{Constraint, IntConstraint, StringConstraint, evaluate, resolve_all};
use crate::error::{ValidateError, ValidateResult};
use crate::field::{FieldDescriptor, FieldValue, Record};
use crate::report::Violation;
use crate::rule::{Condition, parse_rule};
use crate::validator::Validator;

/// Operator that triggers validation of a nested record.
pub const NESTED_OPERATOR: &str = "nested";

impl Validator {
    /// Validates one field, returning its violations in value-then-condition order.
    pub(crate) fn dispatch(
        &self,
        field: &FieldDescriptor<'_>,
        depth: usize,
    ) -> ValidateResult<Vec<Violation>> {
        let name = field.name;
        trace!(field = name, kind = %field.value.kind(), rule = field.rule, depth, "dispatching field");

        match &field.value {
            FieldValue::Other { type_name } => Err(ValidateError::UnsupportedType {
                field: name.to_owned(),
                type_name: (*type_name).to_owned(),
            }),
            FieldValue::Mismatch { expected, actual } => Err(ValidateError::ValueMismatch {
                field: name.to_owned(),
                expected: *expected,
                actual: actual.clone(),
            }),
            FieldValue::Record(inner) => {
                let conditions = parse_rule(field.rule)?;
                self.nested(name, &conditions, *inner, depth)
            }
            FieldValue::Str(value) => {
                let conditions = parse_rule(field.rule)?;
                let constraints = resolve_all::<StringConstraint>(name, &conditions)?;
                Ok(evaluate(name, &constraints, [*value]))
            }
            FieldValue::Int(value) => {
                let conditions = parse_rule(field.rule)?;
                let constraints = resolve_all::<IntConstraint>(name, &conditions)?;
                Ok(evaluate(name, &constraints, [value]))
            }
            FieldValue::StrSeq(values) => {
                let conditions = parse_rule(field.rule)?;
                let constraints = resolve_all::<StringConstraint>(name, &conditions)?;
                self.ensure_elements(name, values.len())?;
                Ok(evaluate(name, &constraints, values.iter().copied()))
            }
            FieldValue::IntSeq(values) => {
                let conditions = parse_rule(field.rule)?;
                let constraints = resolve_all::<IntConstraint>(name, &conditions)?;
                self.ensure_elements(name, values.len())?;
                Ok(evaluate(name, &constraints, values.iter()))
            }
        }
    }

    /// Runs one recursive validation per `nested` condition.
    ///
    /// Inner violations keep the inner field names.
    fn nested(
        &self,
        name: &str,
        conditions: &[Condition],
        inner: &dyn Record,
        depth: usize,
    ) -> ValidateResult<Vec<Violation>> {
        let mut violations = Vec::new();
        for condition in conditions {
            if condition.operator != NESTED_OPERATOR {
                return Err(ValidateError::UnsupportedOperator {
                    field: name.to_owned(),
                    operator: condition.operator.clone(),
                });
            }
            trace!(field = name, depth = depth + 1, "descending into nested record");
            violations.extend(self.run(inner, depth + 1)?);
        }
        Ok(violations)
    }

    fn ensure_elements(&self, name: &str, len: usize) -> ValidateResult<()> {
        if len == 0 && self.config().empty_sequence == EmptySequencePolicy::Reject {
            return Err(ValidateError::EmptySequence {
                field: name.to_owned(),
            });
        }
        Ok(())
    }
}

/// Checks `values` against the constraint set `C` built from `rule`.
///
/// Exposed for callers that hold bare values rather than records.
///
/// # Examples
///
/// ```
/// use ruleval_validator::constraints::IntConstraint;
/// use ruleval_validator::dispatch::check_values;
/// use ruleval_validator::ViolationKind;
///
/// let violations = check_values::<IntConstraint, _>("Age", "min:18|max:50", &[1, 30]).unwrap();
/// assert_eq!(violations.len(), 1);
/// assert_eq!(violations[0].kind, ViolationKind::IntMin);
/// ```
pub fn check_values<'v, C, I>(field: &str, rule: &str, values: I) -> ValidateResult<Vec<Violation>>
where
    C: Constraint,
    C::Input: 'v,
    I: IntoIterator<Item = &'v C::Input>,
{
    let conditions = parse_rule(rule)?;
    let constraints = resolve_all::<C>(field, &conditions)?;
    Ok(evaluate(field, &constraints, values))
}
