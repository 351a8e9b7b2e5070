//! Validation entry point and error aggregation.
//!
//! Violations from every field are collected into one [`ValidationReport`].
//! The first [`ValidateError`] aborts the call and discards whatever was
//! collected before it, so a call yields a report or an error, never both.

use tracing::debug;

use crate::config::ValidatorConfig;
use crate::error::{ValidateError, ValidateResult};
use crate::field::Record;
use crate::report::{CheckError, ValidationReport};

/// Validates records against the rules their fields carry.
///
/// A `Validator` holds only its configuration; it is cheap to clone and safe
/// to share between threads.
///
/// # Examples
///
/// ```
/// use ruleval_validator::{Validator, ViolationKind, record};
///
/// record! {
///     struct Response {
///         #[validate = "in:200,404,500"]
///         code: i64,
///         body: String,
///     }
/// }
///
/// let validator = Validator::default();
/// let report = validator
///     .validate(&Response { code: 213, body: "body".into() })
///     .unwrap();
/// assert_eq!(report.violations()[0].field, "code");
/// assert_eq!(report.violations()[0].kind, ViolationKind::IntIn);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Validator {
    config: ValidatorConfig,
}

impl Validator {
    /// Creates a validator with the given configuration.
    #[must_use]
    pub fn new(config: ValidatorConfig) -> Self {
        Self { config }
    }

    /// The active configuration.
    #[must_use]
    pub fn config(&self) -> &ValidatorConfig {
        &self.config
    }

    /// Validates every annotated field of `record`.
    ///
    /// Returns the ordered violations (empty when the record is valid), or the
    /// first infrastructure error met.
    pub fn validate<R: Record + ?Sized>(&self, record: &R) -> ValidateResult<ValidationReport> {
        debug!(annotation_key = %self.config.annotation_key, "validating record");
        let report = self.run(&record, 0)?;
        debug!(violations = report.len(), "validation finished");
        Ok(report)
    }

    /// Like [`validate`](Self::validate), but treats a non-empty report as an error.
    pub fn check<R: Record + ?Sized>(&self, record: &R) -> Result<(), CheckError> {
        self.validate(record)?.into_result(()).map_err(CheckError::Rejected)
    }

    pub(crate) fn run(&self, record: &dyn Record, depth: usize) -> ValidateResult<ValidationReport> {
        let fields = record
            .fields(&self.config.annotation_key)
            .inspect_err(|err| abort(err, depth))?;

        debug!(fields = fields.len(), depth, "record fields extracted");

        let mut report = ValidationReport::new();
        for field in &fields {
            let violations = self.dispatch(field, depth).inspect_err(|err| abort(err, depth))?;
            report.extend(violations);
        }
        debug!(
            fields = fields.len(),
            violations = report.len(),
            depth,
            "record validated"
        );
        Ok(report)
    }
}

fn abort(err: &ValidateError, depth: usize) {
    debug!(
        code = err.code(),
        field = err.field().unwrap_or_default(),
        depth,
        error = %err,
        "validation aborted"
    );
}

/// Validates `record` with the default configuration.
///
/// # Examples
///
/// ```
/// use ruleval_validator::record;
///
/// record! {
///     struct App {
///         #[validate = "len:5"]
///         version: String,
///     }
/// }
///
/// assert!(ruleval_validator::validate(&App { version: "debug".into() }).unwrap().is_valid());
/// assert_eq!(ruleval_validator::validate(&App { version: "release".into() }).unwrap().len(), 1);
/// ```
pub fn validate<R: Record + ?Sized>(record: &R) -> ValidateResult<ValidationReport> {
    Validator::default().validate(record)
}

/// Checks `record` with the default configuration.
pub fn check<R: Record + ?Sized>(record: &R) -> Result<(), CheckError> {
    Validator::default().check(record)
}

#[cfg(test)]
mod tests {
    use std::io;
    use std::sync::{Arc, Mutex};

    use tracing_subscriber::fmt::MakeWriter;

    use super::*;
    use crate::record;

    record! {
        struct Login {
            #[validate = "len:5"]
            name: String,
            #[validate = "min:1"]
            attempts: i64,
            note: String,
        }
    }

    record! {
        struct Broken {
            #[validate = "len:x"]
            name: String,
        }
    }

    #[derive(Clone, Default)]
    struct Captured(Arc<Mutex<Vec<u8>>>);

    impl io::Write for Captured {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    impl<'a> MakeWriter<'a> for Captured {
        type Writer = Self;

        fn make_writer(&'a self) -> Self::Writer {
            self.clone()
        }
    }

    fn logs_of(run: impl FnOnce()) -> String {
        let captured = Captured::default();
        let subscriber = tracing_subscriber::fmt()
            .with_writer(captured.clone())
            .with_max_level(tracing::Level::DEBUG)
            .finish();
        tracing::subscriber::with_default(subscriber, run);
        let bytes = captured.0.lock().unwrap().clone();
        String::from_utf8(bytes).unwrap()
    }

    #[test]
    fn logs_field_and_violation_counts() {
        let login = Login {
            name: "bob".into(),
            attempts: 0,
            note: String::new(),
        };
        let logs = logs_of(|| {
            validate(&login).unwrap();
        });
        assert!(logs.contains("record fields extracted"), "{logs}");
        assert!(logs.contains("fields=2"), "{logs}");
        assert!(logs.contains("violations=2"), "{logs}");
        assert!(login.note.is_empty());
    }

    #[test]
    fn logs_abort_code() {
        let broken = Broken { name: "bob".into() };
        let logs = logs_of(|| {
            assert!(validate(&broken).is_err());
        });
        assert!(logs.contains("validation aborted"), "{logs}");
        assert!(logs.contains("RULE_PARSE"), "{logs}");
    }
}
