//! Field model and the [`Record`] extraction trait.
//!
//! The engine never inspects host types. A record hands it an ordered list of
//! [`FieldDescriptor`]s, each pairing a rule string with a [`FieldValue`] whose
//! variant fixes the declared kind.

use std::borrow::Cow;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::ValidateResult;

// ============================================================================
// FIELD KIND
// ============================================================================

/// Declared kind of a field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldKind {
    /// A single string.
    String,
    /// A single integer.
    Int,
    /// A sequence of strings.
    StringSeq,
    /// A sequence of integers.
    IntSeq,
    /// A nested record.
    Record,
    /// Anything the engine has no constraint set for.
    #[serde(other)]
    Other,
}

impl FieldKind {
    /// Snake-case name of the kind.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::String => "string",
            Self::Int => "int",
            Self::StringSeq => "string_seq",
            Self::IntSeq => "int_seq",
            Self::Record => "record",
            Self::Other => "other",
        }
    }
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// FIELD VALUE
// ============================================================================

/// Typed view of a field's current value.
#[derive(Clone)]
pub enum FieldValue<'a> {
    Str(&'a str),
    Int(i64),
    StrSeq(Vec<&'a str>),
    IntSeq(Cow<'a, [i64]>),
    Record(&'a dyn Record),
    /// Unsupported kind; `type_name` is reported back in the error.
    Other { type_name: &'a str },
    /// A value that does not hold its declared kind.
    ///
    /// Raised as [`ValidateError::ValueMismatch`](crate::ValidateError::ValueMismatch)
    /// when the field is reached, so earlier fields keep their precedence.
    Mismatch { expected: FieldKind, actual: String },
}

impl FieldValue<'_> {
    /// Declared kind carried by this value.
    #[must_use]
    pub fn kind(&self) -> FieldKind {
        match self {
            Self::Str(_) => FieldKind::String,
            Self::Int(_) => FieldKind::Int,
            Self::StrSeq(_) => FieldKind::StringSeq,
            Self::IntSeq(_) => FieldKind::IntSeq,
            Self::Record(_) => FieldKind::Record,
            Self::Other { .. } => FieldKind::Other,
            Self::Mismatch { expected, .. } => *expected,
        }
    }
}

impl fmt::Debug for FieldValue<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Str(s) => f.debug_tuple("Str").field(s).finish(),
            Self::Int(n) => f.debug_tuple("Int").field(n).finish(),
            Self::StrSeq(v) => f.debug_tuple("StrSeq").field(v).finish(),
            Self::IntSeq(v) => f.debug_tuple("IntSeq").field(v).finish(),
            Self::Record(_) => f.write_str("Record(..)"),
            Self::Other { type_name } => f
                .debug_struct("Other")
                .field("type_name", type_name)
                .finish(),
            Self::Mismatch { expected, actual } => f
                .debug_struct("Mismatch")
                .field("expected", expected)
                .field("actual", actual)
                .finish(),
        }
    }
}

// ============================================================================
// FIELD DESCRIPTOR
// ============================================================================

/// One annotated field as seen by the engine.
#[derive(Debug, Clone)]
pub struct FieldDescriptor<'a> {
    /// Field name reported in violations.
    pub name: &'a str,
    /// Raw rule string.
    pub rule: &'a str,
    /// Current value.
    pub value: FieldValue<'a>,
}

impl<'a> FieldDescriptor<'a> {
    /// Creates a descriptor.
    pub fn new(name: &'a str, rule: &'a str, value: FieldValue<'a>) -> Self {
        Self { name, rule, value }
    }
}

// ============================================================================
// RECORD
// ============================================================================

/// A structured value whose annotated fields can be validated.
///
/// Implementations yield only the fields carrying a rule under
/// `annotation_key`, in declaration order. Use [`record!`](crate::record) to
/// derive an implementation for a plain struct.
///
/// # Examples
///
/// ```
/// use ruleval_validator::{FieldDescriptor, FieldValue, Record, ValidateResult};
///
/// struct Response {
///     code: i64,
/// }
///
/// impl Record for Response {
///     fn fields(&self, annotation_key: &str) -> ValidateResult<Vec<FieldDescriptor<'_>>> {
///         if annotation_key != "validate" {
///             return Ok(Vec::new());
///         }
///         Ok(vec![FieldDescriptor::new(
///             "Code",
///             "in:200,404,500",
///             FieldValue::Int(self.code),
///         )])
///     }
/// }
///
/// let report = ruleval_validator::validate(&Response { code: 213 }).unwrap();
/// assert_eq!(report.len(), 1);
/// ```
pub trait Record {
    /// Extracts the annotated fields of this record.
    fn fields(&self, annotation_key: &str) -> ValidateResult<Vec<FieldDescriptor<'_>>>;
}

impl<R: Record + ?Sized> Record for &R {
    fn fields(&self, annotation_key: &str) -> ValidateResult<Vec<FieldDescriptor<'_>>> {
        (**self).fields(annotation_key)
    }
}

// ============================================================================
// VALUE CONVERSION
// ============================================================================

/// Conversion from a host field type into a [`FieldValue`].
///
/// Implemented for the string and integer types the engine has constraint
/// sets for, their vectors, and a few scalar types that map to
/// [`FieldValue::Other`]. Types defined through [`record!`](crate::record)
/// implement it as nested records.
pub trait IntoFieldValue {
    /// Borrows `self` as a field value.
    fn field_value(&self) -> FieldValue<'_>;
}

impl IntoFieldValue for String {
    fn field_value(&self) -> FieldValue<'_> {
        FieldValue::Str(self)
    }
}

impl IntoFieldValue for &str {
    fn field_value(&self) -> FieldValue<'_> {
        FieldValue::Str(self)
    }
}

macro_rules! int_field_value {
    ($($ty:ty),+ $(,)?) => {
        $(
            impl IntoFieldValue for $ty {
                fn field_value(&self) -> FieldValue<'_> {
                    FieldValue::Int(i64::from(*self))
                }
            }
        )+
    };
}

int_field_value!(i8, i16, i32, i64, u8, u16, u32);

impl IntoFieldValue for Vec<i64> {
    fn field_value(&self) -> FieldValue<'_> {
        FieldValue::IntSeq(Cow::Borrowed(self.as_slice()))
    }
}

macro_rules! int_seq_field_value {
    ($($ty:ty),+ $(,)?) => {
        $(
            impl IntoFieldValue for Vec<$ty> {
                fn field_value(&self) -> FieldValue<'_> {
                    FieldValue::IntSeq(self.iter().copied().map(i64::from).collect())
                }
            }
        )+
    };
}

// `Vec<u8>` stays a byte buffer, see `other_field_value!` below.
int_seq_field_value!(i8, i16, i32, u16, u32);

impl IntoFieldValue for Vec<String> {
    fn field_value(&self) -> FieldValue<'_> {
        FieldValue::StrSeq(self.iter().map(String::as_str).collect())
    }
}

impl IntoFieldValue for Vec<&str> {
    fn field_value(&self) -> FieldValue<'_> {
        FieldValue::StrSeq(self.clone())
    }
}

macro_rules! other_field_value {
    ($($ty:ty),+ $(,)?) => {
        $(
            impl IntoFieldValue for $ty {
                fn field_value(&self) -> FieldValue<'_> {
                    FieldValue::Other { type_name: std::any::type_name::<$ty>() }
                }
            }
        )+
    };
}

other_field_value!(bool, f32, f64, Vec<u8>, Vec<bool>, Vec<f64>);
