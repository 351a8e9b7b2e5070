//! Prelude module for convenient imports.
//!
//! ```
//! use ruleval_validator::prelude::*;
//!
//! record! {
//!     struct App {
//!         #[validate = "len:5"]
//!         version: String,
//!     }
//! }
//!
//! assert!(check(&App { version: "debug".into() }).is_ok());
//! ```

// ============================================================================
// ENGINE
// ============================================================================

pub use crate::config::{EmptySequencePolicy, ValidatorConfig};
pub use crate::validator::{Validator, check, validate};

// ============================================================================
// RECORDS
// ============================================================================

pub use crate::field::{FieldDescriptor, FieldKind, FieldValue, IntoFieldValue, Record};
pub use crate::record;

// ============================================================================
// RESULTS
// ============================================================================

pub use crate::error::{ValidateError, ValidateResult};
pub use crate::report::{CheckError, ValidationReport, Violation, ViolationKind};

// ============================================================================
// SERDE-GATED: JSON records
// ============================================================================

#[cfg(feature = "json")]
pub use crate::json::{JsonRecord, Schema, SchemaField};
