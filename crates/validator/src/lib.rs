//! # ruleval-validator
//!
//! A rule-string constraint engine for structured records.
//!
//! Fields carry a compact rule such as `"min:18|max:50"` or
//! `"regexp:^\w+@\w+\.\w+$"`. The engine parses each rule, applies the
//! constraint set matching the field's kind, recurses into nested records,
//! and returns every violation in one ordered [`ValidationReport`].
//!
//! ## Quick Start
//!
//! ```
//! use ruleval_validator::prelude::*;
//!
//! record! {
//!     struct User {
//!         #[validate = "min:18|max:50"]
//!         age: i64,
//!         #[validate = "len:11"]
//!         phones: Vec<String>,
//!     }
//! }
//!
//! let user = User { age: 16, phones: vec!["12345678901".into(), "123".into()] };
//! let report = validate(&user).unwrap();
//! assert_eq!(
//!     report.to_string(),
//!     "age: value is less than the minimum; phones: string length is not as expected"
//! );
//! ```
//!
//! ## Rules
//!
//! | kind                          | operators                |
//! |-------------------------------|--------------------------|
//! | string, sequence of strings   | `len`, `regexp`, `in`    |
//! | integer, sequence of integers | `min`, `max`, `in`       |
//! | nested record                 | `nested`                 |
//!
//! Violations are collected; a malformed rule, an unknown operator, an
//! unparsable operand, or an unsupported field kind aborts the call with a
//! [`ValidateError`].
//!
//! ## Extractors
//!
//! Records are anything implementing [`Record`]: structs declared with
//! [`record!`], [`json::JsonRecord`] for schema-described JSON, or a manual
//! implementation.

mod macros;

pub mod config;
pub mod constraints;
pub mod dispatch;
pub mod error;
pub mod field;
#[cfg(feature = "json")]
pub mod json;
pub mod prelude;
pub mod report;
pub mod rule;
mod validator;

pub use config::{EmptySequencePolicy, ValidatorConfig};
pub use error::{ValidateError, ValidateResult};
pub use field::{FieldDescriptor, FieldKind, FieldValue, IntoFieldValue, Record};
pub use report::{CheckError, ValidationReport, Violation, ViolationKind};
pub use rule::{Condition, parse_rule};
pub use validator::{Validator, check, validate};
