//! Infrastructure errors.
//!
//! A [`ValidateError`] means the schema or one of its rules is broken, not the
//! data. It aborts a validation call immediately and is never mixed with
//! collected violations (see [`ValidationReport`](crate::ValidationReport)).

use std::num::ParseIntError;

use crate::field::FieldKind;

/// Result alias used throughout the engine.
pub type ValidateResult<T> = Result<T, ValidateError>;

/// Error type for malformed rules and schemas.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ValidateError {
    /// A clause holds more than one `:` delimiter.
    #[error("invalid rule format `{rule}` at clause `{clause}`, expected operator[:operand]")]
    Format { rule: String, clause: String },

    /// The operator is not known to the constraint set selected for the field.
    #[error("unsupported operator `{operator}` on field `{field}`")]
    UnsupportedOperator { field: String, operator: String },

    /// The field's declared kind has no constraint set and is not a record.
    #[error("unsupported type `{type_name}` on field `{field}`")]
    UnsupportedType { field: String, type_name: String },

    /// An operand that must be an integer is not.
    #[error("operand `{operand}` of `{operator}` on field `{field}` is not an integer: {source}")]
    Parse {
        field: String,
        operator: String,
        operand: String,
        #[source]
        source: ParseIntError,
    },

    /// A `regexp` operand does not compile.
    #[error("invalid pattern `{pattern}` on field `{field}`: {source}")]
    Pattern {
        field: String,
        pattern: String,
        #[source]
        source: regex::Error,
    },

    /// The value handed to the engine is not a structured record.
    #[error("invalid type, expected a record but got {actual}")]
    NotARecord { actual: String },

    /// A field value does not match its declared kind.
    #[error("field `{field}` declared as {expected} but holds {actual}")]
    ValueMismatch {
        field: String,
        expected: FieldKind,
        actual: String,
    },

    /// A sequence field is empty under [`EmptySequencePolicy::Reject`](crate::EmptySequencePolicy::Reject).
    #[error("sequence field `{field}` is empty")]
    EmptySequence { field: String },
}

impl ValidateError {
    /// Broad error category for grouping in logs.
    #[must_use]
    pub fn category(&self) -> &'static str {
        match self {
            Self::Format { .. }
            | Self::UnsupportedOperator { .. }
            | Self::Parse { .. }
            | Self::Pattern { .. } => "rule",
            Self::UnsupportedType { .. }
            | Self::NotARecord { .. }
            | Self::ValueMismatch { .. }
            | Self::EmptySequence { .. } => "schema",
        }
    }

    /// Machine-readable error code.
    #[must_use]
    pub fn code(&self) -> &'static str {
        match self {
            Self::Format { .. } => "RULE_FORMAT",
            Self::UnsupportedOperator { .. } => "RULE_UNSUPPORTED_OPERATOR",
            Self::UnsupportedType { .. } => "SCHEMA_UNSUPPORTED_TYPE",
            Self::Parse { .. } => "RULE_PARSE",
            Self::Pattern { .. } => "RULE_PATTERN",
            Self::NotARecord { .. } => "SCHEMA_NOT_A_RECORD",
            Self::ValueMismatch { .. } => "SCHEMA_VALUE_MISMATCH",
            Self::EmptySequence { .. } => "SCHEMA_EMPTY_SEQUENCE",
        }
    }

    /// Name of the field the error was raised for, when there is one.
    #[must_use]
    pub fn field(&self) -> Option<&str> {
        match self {
            Self::UnsupportedOperator { field, .. }
            | Self::UnsupportedType { field, .. }
            | Self::Parse { field, .. }
            | Self::Pattern { field, .. }
            | Self::ValueMismatch { field, .. }
            | Self::EmptySequence { field } => Some(field),
            Self::Format { .. } | Self::NotARecord { .. } => None,
        }
    }
}
