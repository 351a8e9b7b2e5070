//! Schema-driven records over `serde_json::Value`.
//!
//! A [`Schema`] declares the fields of a JSON object: their kind and the
//! rule tags attached to them. [`JsonRecord`] pairs a schema with a value and
//! implements [`Record`], so JSON documents validate exactly like `record!`
//! structs.
//!
//! # Examples
//!
//! ```
//! use ruleval_validator::json::{JsonRecord, Schema};
//! use ruleval_validator::ViolationKind;
//! use serde_json::json;
//!
//! let schema = Schema::from_json(
//!     r#"{ "fields": [
//!         { "name": "role", "kind": "string", "tags": { "validate": "in:admin,stuff" } },
//!         { "name": "age",  "kind": "int",    "tags": { "validate": "min:18|max:50" } }
//!     ] }"#,
//! )
//! .unwrap();
//!
//! let user = json!({ "role": "role", "age": 30 });
//! let report = ruleval_validator::validate(&JsonRecord::new(&schema, &user)).unwrap();
//! assert_eq!(report.violations()[0].kind, ViolationKind::StrIn);
//! ```

use std::borrow::Cow;
use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{ValidateError, ValidateResult};
use crate::field::{FieldDescriptor, FieldKind, FieldValue, Record};

static EMPTY_SCHEMA: Schema = Schema { fields: Vec::new() };

// ============================================================================
// SCHEMA
// ============================================================================

/// Ordered field declarations for a JSON object.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Schema {
    /// Fields in validation order.
    #[serde(default)]
    pub fields: Vec<SchemaField>,
}

impl Schema {
    /// Creates a schema from its fields.
    #[must_use]
    pub fn new(fields: Vec<SchemaField>) -> Self {
        Self { fields }
    }

    /// Parses a schema from its JSON form.
    pub fn from_json(text: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(text)
    }

    /// Pairs this schema with a value.
    #[must_use]
    pub fn bind<'a>(&'a self, value: &'a Value) -> JsonRecord<'a> {
        JsonRecord::new(self, value)
    }
}

/// One declared field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchemaField {
    /// Object key, also the field name in violations.
    pub name: String,
    /// Declared kind.
    pub kind: FieldKind,
    /// Rule strings keyed by annotation key.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub tags: BTreeMap<String, String>,
    /// Layout of a `record` field; absent means no annotated fields.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schema: Option<Box<Schema>>,
}

impl SchemaField {
    /// Declares an untagged field.
    pub fn new(name: impl Into<String>, kind: FieldKind) -> Self {
        Self {
            name: name.into(),
            kind,
            tags: BTreeMap::new(),
            schema: None,
        }
    }

    /// Attaches `rule` under `key`, replacing any previous rule for that key.
    #[must_use = "builder methods must be chained or built"]
    pub fn tag(mut self, key: impl Into<String>, rule: impl Into<String>) -> Self {
        self.tags.insert(key.into(), rule.into());
        self
    }

    /// Sets the nested layout of a `record` field.
    #[must_use = "builder methods must be chained or built"]
    pub fn with_schema(mut self, schema: Schema) -> Self {
        self.schema = Some(Box::new(schema));
        self
    }
}

// ============================================================================
// JSON RECORD
// ============================================================================

/// A JSON value viewed through a [`Schema`].
#[derive(Debug)]
pub struct JsonRecord<'a> {
    schema: &'a Schema,
    value: &'a Value,
    // Parallel to `schema.fields`; set for `record` fields holding an object.
    children: Vec<Option<JsonRecord<'a>>>,
}

impl<'a> JsonRecord<'a> {
    /// Binds `schema` to `value`.
    ///
    /// Shape errors surface when the record is validated, not here.
    #[must_use]
    pub fn new(schema: &'a Schema, value: &'a Value) -> Self {
        let children = schema
            .fields
            .iter()
            .map(|field| {
                if field.kind != FieldKind::Record {
                    return None;
                }
                let nested = value.get(field.name.as_str()).filter(|v| v.is_object())?;
                let schema = field.schema.as_deref().unwrap_or(&EMPTY_SCHEMA);
                Some(JsonRecord::new(schema, nested))
            })
            .collect();

        Self {
            schema,
            value,
            children,
        }
    }

    /// The bound value.
    #[must_use]
    pub fn value(&self) -> &'a Value {
        self.value
    }
}

impl Record for JsonRecord<'_> {
    fn fields(&self, annotation_key: &str) -> ValidateResult<Vec<FieldDescriptor<'_>>> {
        let Value::Object(object) = self.value else {
            return Err(ValidateError::NotARecord {
                actual: json_type(self.value).to_owned(),
            });
        };

        let fields = self
            .schema
            .fields
            .iter()
            .zip(&self.children)
            .filter_map(|(field, child)| {
                let rule = field.tags.get(annotation_key)?;
                let value = typed_value(field, object.get(field.name.as_str()), child.as_ref());
                Some(FieldDescriptor::new(&field.name, rule, value))
            })
            .collect();
        Ok(fields)
    }
}

// A value of the wrong shape stays attached to its field and is raised when
// the field is dispatched.
fn typed_value<'v>(
    field: &'v SchemaField,
    value: Option<&'v Value>,
    child: Option<&'v JsonRecord<'_>>,
) -> FieldValue<'v> {
    let Some(value) = value else {
        return FieldValue::Mismatch {
            expected: field.kind,
            actual: "missing".to_owned(),
        };
    };

    let typed = match field.kind {
        FieldKind::String => value.as_str().map(FieldValue::Str),
        FieldKind::Int => value.as_i64().map(FieldValue::Int),
        FieldKind::StringSeq => value
            .as_array()
            .and_then(|items| items.iter().map(Value::as_str).collect::<Option<Vec<_>>>())
            .map(FieldValue::StrSeq),
        FieldKind::IntSeq => value
            .as_array()
            .and_then(|items| items.iter().map(Value::as_i64).collect::<Option<Vec<_>>>())
            .map(|items| FieldValue::IntSeq(Cow::Owned(items))),
        FieldKind::Record => child.map(|record| FieldValue::Record(record)),
        FieldKind::Other => Some(FieldValue::Other {
            type_name: json_type(value),
        }),
    };

    typed.unwrap_or_else(|| FieldValue::Mismatch {
        expected: field.kind,
        actual: describe(value),
    })
}

fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(n) if n.is_i64() => "int",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

fn describe(value: &Value) -> String {
    match value.as_array() {
        Some(items) => match items.iter().map(json_type).find(|t| *t != "string" && *t != "int") {
            Some(element) => format!("array containing {element}"),
            None if items.iter().any(Value::is_string) && items.iter().any(Value::is_i64) => {
                "array of mixed elements".to_owned()
            }
            None if items.iter().any(Value::is_string) => "array of string".to_owned(),
            None => "array of int".to_owned(),
        },
        None => json_type(value).to_owned(),
    }
}
