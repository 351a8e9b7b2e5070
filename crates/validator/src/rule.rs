//! Rule string parsing.
//!
//! A rule is a `|`-separated list of clauses, each clause an operator with an
//! optional `:`-separated operand:
//!
//! ```text
//! rule   := clause ("|" clause)*
//! clause := operator (":" operand)?
//! ```
//!
//! There is no escaping. Operands may contain commas (used by `in`) but never
//! `:` or `|`.

use smallvec::SmallVec;

use crate::error::{ValidateError, ValidateResult};

/// Separates clauses within a rule.
pub const CLAUSE_SEPARATOR: char = '|';

/// Separates an operator from its operand.
pub const OPERAND_SEPARATOR: char = ':';

/// Separates members of an `in` operand.
pub const LIST_SEPARATOR: char = ',';

/// Parsed clauses of one rule. Rules rarely carry more than a few clauses.
pub type Conditions = SmallVec<[Condition; 4]>;

/// One parsed `(operator, operand)` pair.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Condition {
    /// Operator name, e.g. `min`.
    pub operator: String,
    /// Operand text; empty for operators that take none.
    pub operand: String,
}

impl Condition {
    /// Creates a condition.
    pub fn new(operator: impl Into<String>, operand: impl Into<String>) -> Self {
        Self {
            operator: operator.into(),
            operand: operand.into(),
        }
    }

    /// Splits the operand into `in` list members.
    ///
    /// An empty operand yields a single empty member.
    pub fn members(&self) -> impl Iterator<Item = &str> {
        self.operand.split(LIST_SEPARATOR)
    }
}

/// Parses a raw rule string into its conditions, in clause order.
///
/// # Errors
///
/// [`ValidateError::Format`] when a clause contains more than one operand
/// separator.
///
/// # Examples
///
/// ```
/// use ruleval_validator::rule::{parse_rule, Condition};
///
/// let conditions = parse_rule("min:18|max:50").unwrap();
/// assert_eq!(conditions[0], Condition::new("min", "18"));
/// assert_eq!(conditions[1], Condition::new("max", "50"));
/// ```
pub fn parse_rule(rule: &str) -> ValidateResult<Conditions> {
    rule.split(CLAUSE_SEPARATOR)
        .map(|clause| {
            let mut parts = clause.splitn(3, OPERAND_SEPARATOR);
            let operator = parts.next().unwrap_or_default();
            let operand = parts.next().unwrap_or_default();
            if parts.next().is_some() {
                return Err(ValidateError::Format {
                    rule: rule.to_owned(),
                    clause: clause.to_owned(),
                });
            }
            Ok(Condition::new(operator, operand))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn single_clause_with_operand() {
        let conditions = parse_rule("len:36").unwrap();
        assert_eq!(conditions.as_slice(), &[Condition::new("len", "36")]);
    }

    #[test]
    fn clauses_keep_order() {
        let conditions = parse_rule("in:0,11|max:6|min:13").unwrap();
        assert_eq!(
            conditions.as_slice(),
            &[
                Condition::new("in", "0,11"),
                Condition::new("max", "6"),
                Condition::new("min", "13"),
            ]
        );
    }

    #[test]
    fn operand_is_optional() {
        let conditions = parse_rule("nested").unwrap();
        assert_eq!(conditions.as_slice(), &[Condition::new("nested", "")]);
    }

    #[test]
    fn trailing_separator_gives_empty_operand() {
        let conditions = parse_rule("in:").unwrap();
        assert_eq!(conditions.as_slice(), &[Condition::new("in", "")]);
        assert_eq!(conditions[0].members().collect::<Vec<_>>(), vec![""]);
    }

    #[test]
    fn regexp_operand_is_kept_verbatim() {
        let conditions = parse_rule(r"regexp:^\w+@\w+\.\w+$").unwrap();
        assert_eq!(conditions[0].operand, r"^\w+@\w+\.\w+$");
    }

    #[test]
    fn too_many_delimiters_is_format_error() {
        let err = parse_rule("min:1|regexp:a:b").unwrap_err();
        assert_eq!(
            err,
            ValidateError::Format {
                rule: "min:1|regexp:a:b".into(),
                clause: "regexp:a:b".into(),
            }
        );
    }

    #[test]
    fn empty_rule_is_one_empty_condition() {
        let conditions = parse_rule("").unwrap();
        assert_eq!(conditions.as_slice(), &[Condition::new("", "")]);
    }

    #[test]
    fn members_split_on_commas() {
        let condition = Condition::new("in", "admin,stuff");
        assert_eq!(condition.members().collect::<Vec<_>>(), vec!["admin", "stuff"]);
    }
}
