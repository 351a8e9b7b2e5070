//! Property-based tests for ruleval-validator.

use std::borrow::Cow;

use proptest::prelude::*;
use ruleval_validator::constraints::{IntConstraint, StringConstraint};
use ruleval_validator::dispatch::check_values;
use ruleval_validator::prelude::*;
use ruleval_validator::parse_rule;

struct Bag<'a> {
    rule: &'a str,
    values: &'a [i64],
}

impl Record for Bag<'_> {
    fn fields(&self, _: &str) -> ValidateResult<Vec<FieldDescriptor<'_>>> {
        Ok(vec![FieldDescriptor::new(
            "bag",
            self.rule,
            FieldValue::IntSeq(Cow::Borrowed(self.values)),
        )])
    }
}

// ============================================================================
// IDEMPOTENCY: validate(x) == validate(x)
// ============================================================================

proptest! {
    #[test]
    fn int_sequence_validation_is_idempotent(values in prop::collection::vec(any::<i64>(), 0..8)) {
        let bag = Bag { rule: "min:-10|max:10|in:1,2,3", values: &values };
        let first = validate(&bag).unwrap();
        let second = validate(&bag).unwrap();
        prop_assert_eq!(first, second);
    }

    #[test]
    fn string_validation_is_idempotent(s in ".{0,20}") {
        let first = check_values::<StringConstraint, _>("s", r"len:5|regexp:^\d+$|in:a,b", [s.as_str()]).unwrap();
        let second = check_values::<StringConstraint, _>("s", r"len:5|regexp:^\d+$|in:a,b", [s.as_str()]).unwrap();
        prop_assert_eq!(first, second);
    }
}

// ============================================================================
// ORDERING: value-major, then condition order
// ============================================================================

proptest! {
    #[test]
    fn violations_follow_values_then_conditions(values in prop::collection::vec(-50i64..50, 1..10)) {
        let report = validate(&Bag { rule: "min:0|max:10", values: &values }).unwrap();

        let expected: Vec<ViolationKind> = values
            .iter()
            .flat_map(|v| {
                let mut kinds = Vec::new();
                if *v < 0 { kinds.push(ViolationKind::IntMin); }
                if *v > 10 { kinds.push(ViolationKind::IntMax); }
                kinds
            })
            .collect();
        let actual: Vec<ViolationKind> = report.iter().map(|v| v.kind).collect();
        prop_assert_eq!(actual, expected);
    }

    #[test]
    fn min_and_max_are_inclusive(bound in -1000i64..1000, value in -1000i64..1000) {
        let rule = format!("min:{bound}|max:{bound}");
        let violations = check_values::<IntConstraint, _>("n", &rule, [&value]).unwrap();
        prop_assert_eq!(violations.is_empty(), value == bound);
    }
}

// ============================================================================
// PARSING
// ============================================================================

proptest! {
    #[test]
    fn clause_count_matches_separators(ops in prop::collection::vec("[a-z]{1,6}", 1..6)) {
        let rule = ops.iter().map(|op| format!("{op}:1")).collect::<Vec<_>>().join("|");
        let conditions = parse_rule(&rule).unwrap();
        prop_assert_eq!(conditions.len(), ops.len());
        for (condition, op) in conditions.iter().zip(&ops) {
            prop_assert_eq!(&condition.operator, op);
            prop_assert_eq!(condition.operand.as_str(), "1");
        }
    }

    #[test]
    fn unknown_operators_never_yield_violations(op in "[a-z]{3,8}".prop_filter("known", |op| !["min", "max"].contains(&op.as_str()))) {
        let rule = format!("{op}:1");
        let result = validate(&Bag { rule: &rule, values: &[1, 2] });
        prop_assert!(
            matches!(result, Err(ValidateError::UnsupportedOperator { .. })),
            "unexpected result {:?}",
            result
        );
    }
}
