//! Payload schema declarations and structural validation.

use chrono::{DateTime, NaiveDate};
use serde_json::{Map, Value};

use crate::error::SchemaError;
use crate::payload::PagePayload;

/// The shape a single payload field must satisfy.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldType {
    /// Any JSON string.
    String,
    /// A string holding an ISO-8601 date (`2024-05-01`) or RFC 3339 date-time.
    IsoDate,
    /// A JSON boolean.
    Bool,
    /// A non-negative JSON integer.
    Count,
    /// Any JSON object. The contents are opaque to the adapter.
    Object,
    /// A JSON array whose every item satisfies the inner type.
    SequenceOf(Box<FieldType>),
    /// A JSON object validated by its own schema unit.
    Nested(Box<PayloadSchema>),
    /// `null` or the inner type.
    Nullable(Box<FieldType>),
}

impl FieldType {
    /// A sequence of items of the given type.
    pub fn sequence_of(item: FieldType) -> Self {
        Self::SequenceOf(Box::new(item))
    }

    /// An object validated by a separate schema.
    pub fn nested(schema: PayloadSchema) -> Self {
        Self::Nested(Box::new(schema))
    }

    /// Allow `null` in addition to this type.
    pub fn nullable(self) -> Self {
        match self {
            Self::Nullable(_) => self,
            other => Self::Nullable(Box::new(other)),
        }
    }

    /// Whether `null` satisfies this type.
    pub fn is_nullable(&self) -> bool {
        matches!(self, Self::Nullable(_))
    }

    /// Human-readable name used in error messages.
    pub fn expected(&self) -> &'static str {
        match self {
            Self::String => "string",
            Self::IsoDate => "ISO-8601 date string",
            Self::Bool => "boolean",
            Self::Count => "non-negative integer",
            Self::Object | Self::Nested(_) => "object",
            Self::SequenceOf(_) => "array",
            Self::Nullable(inner) => inner.expected(),
        }
    }

    fn check(&self, field: &str, value: &Value) -> Result<(), SchemaError> {
        let wrong_type = || SchemaError::WrongType {
            field: field.to_string(),
            expected: self.expected(),
            found: json_kind(value),
        };

        match self {
            Self::Nullable(inner) => {
                if value.is_null() {
                    Ok(())
                } else {
                    inner.check(field, value)
                }
            }
            Self::String => value.is_string().then_some(()).ok_or_else(wrong_type),
            Self::Bool => value.is_boolean().then_some(()).ok_or_else(wrong_type),
            Self::Object => value.is_object().then_some(()).ok_or_else(wrong_type),
            Self::IsoDate => {
                let text = value.as_str().ok_or_else(wrong_type)?;
                if is_iso_date(text) {
                    Ok(())
                } else {
                    Err(SchemaError::InvalidDate {
                        field: field.to_string(),
                        value: text.to_string(),
                    })
                }
            }
            Self::Count => {
                if value.as_u64().is_some() {
                    return Ok(());
                }
                match value.as_i64() {
                    Some(negative) => Err(SchemaError::NegativeCount {
                        field: field.to_string(),
                        value: negative,
                    }),
                    None => Err(wrong_type()),
                }
            }
            Self::SequenceOf(item) => {
                let items = value.as_array().ok_or_else(wrong_type)?;
                for (index, entry) in items.iter().enumerate() {
                    item.check(&format!("{}[{}]", field, index), entry)?;
                }
                Ok(())
            }
            Self::Nested(schema) => {
                let map = value.as_object().ok_or_else(wrong_type)?;
                schema
                    .check_map(map)
                    .map_err(|err| err.nested_under(field))
            }
        }
    }
}

/// One declared field of a schema.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldSpec {
    /// Wire key of the field.
    pub name: String,
    /// Shape the value must satisfy.
    pub ty: FieldType,
}

/// Static description of the payload a page expects.
///
/// # Example
///
/// ```rust
/// use serde_json::json;
/// use turbo_props::{FieldType, PayloadSchema};
///
/// let schema = PayloadSchema::new("Products/Show")
///     .field("id", FieldType::String)
///     .field("thumbnail", FieldType::Object.nullable());
///
/// let payload = schema
///     .validate_value(json!({ "id": "abc", "thumbnail": null }))
///     .unwrap();
/// assert_eq!(payload.get("id"), Some(&json!("abc")));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct PayloadSchema {
    name: String,
    fields: Vec<FieldSpec>,
    deny_unknown: bool,
}

impl PayloadSchema {
    /// Create an empty schema with the given name.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            fields: Vec::new(),
            deny_unknown: false,
        }
    }

    /// Declare a required field.
    pub fn field(mut self, name: impl Into<String>, ty: FieldType) -> Self {
        self.fields.push(FieldSpec {
            name: name.into(),
            ty,
        });
        self
    }

    /// Reject payload keys the schema does not declare.
    pub fn deny_unknown_fields(mut self) -> Self {
        self.deny_unknown = true;
        self
    }

    /// Schema name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Declared fields in declaration order.
    pub fn fields(&self) -> &[FieldSpec] {
        &self.fields
    }

    /// Look up a declared field by wire key.
    pub fn field_spec(&self, name: &str) -> Option<&FieldSpec> {
        self.fields.iter().find(|spec| spec.name == name)
    }

    /// Whether undeclared keys are rejected.
    pub fn denies_unknown_fields(&self) -> bool {
        self.deny_unknown
    }

    /// Validate a payload mapping.
    ///
    /// Fields are checked in declaration order; the first violation wins.
    pub fn validate(&self, payload: Map<String, Value>) -> Result<PagePayload, SchemaError> {
        self.check_map(&payload)?;
        Ok(PagePayload::new(self.name.clone(), payload))
    }

    /// Validate an arbitrary JSON value, which must be an object.
    pub fn validate_value(&self, payload: Value) -> Result<PagePayload, SchemaError> {
        match payload {
            Value::Object(map) => self.validate(map),
            other => Err(SchemaError::NotAnObject {
                schema: self.name.clone(),
                found: json_kind(&other),
            }),
        }
    }

    pub(crate) fn check_map(&self, map: &Map<String, Value>) -> Result<(), SchemaError> {
        for spec in &self.fields {
            match map.get(&spec.name) {
                Some(value) => spec.ty.check(&spec.name, value)?,
                None => {
                    return Err(SchemaError::MissingField {
                        field: spec.name.clone(),
                    })
                }
            }
        }

        if self.deny_unknown {
            if let Some(unknown) = map.keys().find(|key| self.field_spec(key).is_none()) {
                return Err(SchemaError::UnknownField {
                    field: unknown.clone(),
                });
            }
        }

        Ok(())
    }
}

fn is_iso_date(text: &str) -> bool {
    NaiveDate::parse_from_str(text, "%Y-%m-%d").is_ok() || DateTime::parse_from_rfc3339(text).is_ok()
}

/// JSON type name of a value, for error messages.
pub fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
