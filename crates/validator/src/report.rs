//! Violations and the aggregated report.
//!
//! A [`ValidationReport`] is the fail-soft half of the error model: it collects
//! every failing `(value, condition)` pair across every field, in order. An
//! empty report means the record is valid.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::ValidateError;

// ============================================================================
// VIOLATION KIND
// ============================================================================

/// What a value failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ViolationKind {
    /// String length differs from `len:N`.
    StrLen,
    /// String does not match `regexp:P`.
    StrRegexp,
    /// String is not a member of `in:...`.
    StrIn,
    /// Integer is below `min:N`.
    IntMin,
    /// Integer is above `max:N`.
    IntMax,
    /// Integer is not a member of `in:...`.
    IntIn,
}

impl ViolationKind {
    /// Machine-readable code.
    #[must_use]
    pub fn code(self) -> &'static str {
        match self {
            Self::StrLen => "str_len",
            Self::StrRegexp => "str_regexp",
            Self::StrIn => "str_in",
            Self::IntMin => "int_min",
            Self::IntMax => "int_max",
            Self::IntIn => "int_in",
        }
    }

    /// Human-readable description.
    #[must_use]
    pub fn description(self) -> &'static str {
        match self {
            Self::StrLen => "string length is not as expected",
            Self::StrRegexp => "string does not match the pattern",
            Self::StrIn => "string is not one of the allowed values",
            Self::IntMin => "value is less than the minimum",
            Self::IntMax => "value is greater than the maximum",
            Self::IntIn => "value is not one of the allowed values",
        }
    }
}

impl fmt::Display for ViolationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.description())
    }
}

// ============================================================================
// VIOLATION
// ============================================================================

/// One value failing one condition of a named field.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Violation {
    /// Name of the field the value belongs to.
    pub field: String,
    /// Which check failed.
    pub kind: ViolationKind,
}

impl Violation {
    /// Creates a violation.
    pub fn new(field: impl Into<String>, kind: ViolationKind) -> Self {
        Self {
            field: field.into(),
            kind,
        }
    }
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.kind)
    }
}

// ============================================================================
// REPORT
// ============================================================================

/// Ordered violations of one validation call.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ValidationReport {
    violations: Vec<Violation>,
}

impl ValidationReport {
    /// Separator used by the `Display` implementation.
    pub const SEPARATOR: &'static str = "; ";

    /// Creates an empty report.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a violation.
    pub fn push(&mut self, violation: Violation) {
        self.violations.push(violation);
    }

    /// Appends every violation of another report, keeping its order.
    pub fn merge(&mut self, other: ValidationReport) {
        self.violations.extend(other.violations);
    }

    /// Returns true if the record passed.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.violations.is_empty()
    }

    /// Returns true if there are no violations.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.violations.is_empty()
    }

    /// Number of violations.
    #[must_use]
    pub fn len(&self) -> usize {
        self.violations.len()
    }

    /// All violations, in report order.
    #[must_use]
    pub fn violations(&self) -> &[Violation] {
        &self.violations
    }

    /// Iterates over the violations.
    pub fn iter(&self) -> std::slice::Iter<'_, Violation> {
        self.violations.iter()
    }

    /// Violations of one field.
    pub fn for_field<'a>(&'a self, field: &'a str) -> impl Iterator<Item = &'a Violation> + 'a {
        self.violations.iter().filter(move |v| v.field == field)
    }

    /// Renders every violation as `field: description`, joined by `separator`.
    ///
    /// `render("")` yields the undelimited legacy form.
    #[must_use]
    pub fn render(&self, separator: &str) -> String {
        self.violations
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(separator)
    }

    /// Converts the report to a JSON structure for transport.
    #[must_use]
    pub fn to_json(&self) -> serde_json::Value {
        serde_json::json!({
            "valid": self.is_valid(),
            "violations": self.violations.iter().map(|v| serde_json::json!({
                "field": v.field,
                "code": v.kind.code(),
                "message": v.kind.description(),
            })).collect::<Vec<_>>(),
        })
    }

    /// `Ok(value)` when empty, the report itself as the error otherwise.
    #[must_use = "result must be used"]
    pub fn into_result<T>(self, ok_value: T) -> Result<T, ValidationReport> {
        if self.is_empty() {
            Ok(ok_value)
        } else {
            Err(self)
        }
    }
}

impl fmt::Display for ValidationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render(Self::SEPARATOR))
    }
}

impl std::error::Error for ValidationReport {}

impl FromIterator<Violation> for ValidationReport {
    fn from_iter<I: IntoIterator<Item = Violation>>(iter: I) -> Self {
        Self {
            violations: iter.into_iter().collect(),
        }
    }
}

impl Extend<Violation> for ValidationReport {
    fn extend<I: IntoIterator<Item = Violation>>(&mut self, iter: I) {
        self.violations.extend(iter);
    }
}

impl IntoIterator for ValidationReport {
    type Item = Violation;
    type IntoIter = std::vec::IntoIter<Violation>;

    fn into_iter(self) -> Self::IntoIter {
        self.violations.into_iter()
    }
}

impl<'a> IntoIterator for &'a ValidationReport {
    type Item = &'a Violation;
    type IntoIter = std::slice::Iter<'a, Violation>;

    fn into_iter(self) -> Self::IntoIter {
        self.violations.iter()
    }
}

// ============================================================================
// CHECK ERROR
// ============================================================================

/// Single error type for callers that treat both outcomes as failure.
///
/// Returned by [`Validator::check`](crate::Validator::check).
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum CheckError {
    /// The data failed one or more constraints.
    #[error("validation failed: {0}")]
    Rejected(ValidationReport),

    /// The schema or a rule is broken.
    #[error(transparent)]
    Infrastructure(#[from] ValidateError),
}

impl CheckError {
    /// The report, when the data was rejected.
    #[must_use]
    pub fn report(&self) -> Option<&ValidationReport> {
        match self {
            Self::Rejected(report) => Some(report),
            Self::Infrastructure(_) => None,
        }
    }

    /// Returns true when the failure is a data problem rather than a broken rule.
    #[must_use]
    pub fn is_rejected(&self) -> bool {
        matches!(self, Self::Rejected(_))
    }
}

impl From<ValidationReport> for CheckError {
    fn from(report: ValidationReport) -> Self {
        Self::Rejected(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn sample() -> ValidationReport {
        [
            Violation::new("ID", ViolationKind::StrLen),
            Violation::new("Age", ViolationKind::IntMin),
        ]
        .into_iter()
        .collect()
    }

    #[test]
    fn empty_report_is_valid() {
        let report = ValidationReport::new();
        assert!(report.is_valid());
        assert_eq!(report.to_string(), "");
        assert_eq!(report.into_result(7), Ok(7));
    }

    #[test]
    fn display_uses_separator() {
        assert_eq!(
            sample().to_string(),
            "ID: string length is not as expected; Age: value is less than the minimum"
        );
    }

    #[test]
    fn legacy_render_has_no_delimiter() {
        assert_eq!(
            sample().render(""),
            "ID: string length is not as expectedAge: value is less than the minimum"
        );
    }

    #[test]
    fn merge_appends_in_order() {
        let mut report = sample();
        report.merge(
            std::iter::once(Violation::new("Code", ViolationKind::IntIn)).collect(),
        );
        let fields: Vec<_> = report.iter().map(|v| v.field.as_str()).collect();
        assert_eq!(fields, vec!["ID", "Age", "Code"]);
    }

    #[test]
    fn for_field_filters() {
        let report = sample();
        assert_eq!(report.for_field("Age").count(), 1);
        assert_eq!(report.for_field("Name").count(), 0);
    }

    #[test]
    fn json_shape() {
        let json = sample().to_json();
        assert_eq!(json["valid"], false);
        assert_eq!(json["violations"][0]["field"], "ID");
        assert_eq!(json["violations"][1]["code"], "int_min");
    }

    #[test]
    fn serde_is_a_plain_list() {
        let text = serde_json::to_string(&sample()).unwrap();
        assert_eq!(
            text,
            r#"[{"field":"ID","kind":"str_len"},{"field":"Age","kind":"int_min"}]"#
        );
        let back: ValidationReport = serde_json::from_str(&text).unwrap();
        assert_eq!(back, sample());
    }

    #[test]
    fn check_error_distinguishes_outcomes() {
        let rejected = CheckError::from(sample());
        assert!(rejected.is_rejected());
        assert_eq!(rejected.report().map(ValidationReport::len), Some(2));

        let broken = CheckError::from(ValidateError::NotARecord {
            actual: "number".into(),
        });
        assert!(!broken.is_rejected());
        assert_eq!(
            broken.to_string(),
            "invalid type, expected a record but got number"
        );
    }
}
