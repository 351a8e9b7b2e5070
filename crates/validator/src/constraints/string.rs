//! String constraint set: `len`, `regexp`, `in`.

use regex::Regex;

use super::Constraint;
use crate::error::{ValidateError, ValidateResult};
use crate::report::ViolationKind;
use crate::rule::Condition;

/// A resolved string constraint.
#[derive(Debug, Clone)]
pub enum StringConstraint {
    /// Exact length in Unicode scalar values.
    Len(usize),
    /// Unanchored regular-expression search.
    Regexp(Regex),
    /// Case-sensitive membership in a literal set.
    In(Vec<String>),
}

impl Constraint for StringConstraint {
    type Input = str;

    fn resolve(field: &str, condition: &Condition) -> ValidateResult<Self> {
        match condition.operator.as_str() {
            "len" => condition
                .operand
                .parse::<usize>()
                .map(Self::Len)
                .map_err(|source| ValidateError::Parse {
                    field: field.to_owned(),
                    operator: condition.operator.clone(),
                    operand: condition.operand.clone(),
                    source,
                }),
            "regexp" => Regex::new(&condition.operand)
                .map(Self::Regexp)
                .map_err(|source| ValidateError::Pattern {
                    field: field.to_owned(),
                    pattern: condition.operand.clone(),
                    source,
                }),
            "in" => Ok(Self::In(condition.members().map(str::to_owned).collect())),
            other => Err(ValidateError::UnsupportedOperator {
                field: field.to_owned(),
                operator: other.to_owned(),
            }),
        }
    }

    fn check(&self, input: &str) -> Result<(), ViolationKind> {
        let ok = match self {
            Self::Len(expected) => input.chars().count() == *expected,
            Self::Regexp(pattern) => pattern.is_match(input),
            // `in:` is the set {""}, so an empty value matches an empty operand.
            Self::In(members) => members.iter().any(|member| member == input),
        };
        if ok { Ok(()) } else { Err(self.violation()) }
    }
}

impl StringConstraint {
    /// Violation raised when a value fails this constraint.
    #[must_use]
    pub fn violation(&self) -> ViolationKind {
        match self {
            Self::Len(_) => ViolationKind::StrLen,
            Self::Regexp(_) => ViolationKind::StrRegexp,
            Self::In(_) => ViolationKind::StrIn,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn resolve(operator: &str, operand: &str) -> ValidateResult<StringConstraint> {
        StringConstraint::resolve("field", &Condition::new(operator, operand))
    }

    #[rstest]
    #[case("len", "6", "foobar", None)]
    #[case("len", "2", "foo", Some(ViolationKind::StrLen))]
    #[case("len", "4", "пока", None)]
    #[case("len", "0", "", None)]
    #[case("regexp", r"^\w+@\w+\.\w+$", "somemail@gmail.com", None)]
    #[case("regexp", r"^\w+@\w+\.\w+$", "error", Some(ViolationKind::StrRegexp))]
    #[case("regexp", "ail", "somemail", None)]
    #[case("in", "admin,stuff", "admin", None)]
    #[case("in", "admin,stuff", "role", Some(ViolationKind::StrIn))]
    #[case("in", "admin,stuff", "Admin", Some(ViolationKind::StrIn))]
    #[case("in", "", "", None)]
    #[case("in", "", "x", Some(ViolationKind::StrIn))]
    fn checks(
        #[case] operator: &str,
        #[case] operand: &str,
        #[case] value: &str,
        #[case] expected: Option<ViolationKind>,
    ) {
        let constraint = resolve(operator, operand).unwrap();
        assert_eq!(constraint.check(value).err(), expected);
    }

    #[test]
    fn len_counts_code_points_not_bytes() {
        let constraint = resolve("len", "5").unwrap();
        assert!(constraint.check("héllo").is_ok());
        assert_eq!(constraint.check("hello!"), Err(ViolationKind::StrLen));
    }

    #[test]
    fn non_numeric_len_is_parse_error() {
        let err = resolve("len", "six").unwrap_err();
        assert!(matches!(
            err,
            ValidateError::Parse { ref operator, ref operand, .. }
                if operator == "len" && operand == "six"
        ));
    }

    #[test]
    fn negative_len_is_parse_error() {
        assert!(matches!(
            resolve("len", "-1"),
            Err(ValidateError::Parse { .. })
        ));
    }

    #[test]
    fn broken_pattern_is_pattern_error() {
        let err = resolve("regexp", "(unclosed").unwrap_err();
        assert!(matches!(err, ValidateError::Pattern { ref pattern, .. } if pattern == "(unclosed"));
    }

    #[test]
    fn unknown_operator() {
        let err = resolve("min", "3").unwrap_err();
        assert_eq!(
            err,
            ValidateError::UnsupportedOperator {
                field: "field".into(),
                operator: "min".into(),
            }
        );
    }
}
