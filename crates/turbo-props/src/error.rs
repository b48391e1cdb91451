//! Schema validation error types.

use thiserror::Error;

/// Reasons a page payload can fail its schema.
///
/// Field paths are dotted for nested units (`status.success`) and indexed
/// for sequence items (`existing_files[2]`).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SchemaError {
    /// The payload itself is not a JSON object.
    #[error("Payload for {schema} must be an object, got {found}")]
    NotAnObject { schema: String, found: &'static str },

    /// A required field is absent.
    #[error("Missing required field: {field}")]
    MissingField { field: String },

    /// A field is present but has the wrong JSON type.
    #[error("Field {field} expected {expected}, got {found}")]
    WrongType {
        field: String,
        expected: &'static str,
        found: &'static str,
    },

    /// A count field holds a negative number.
    #[error("Field {field} must be >= 0, got {value}")]
    NegativeCount { field: String, value: i64 },

    /// A date field holds a string that is not an ISO-8601 date.
    #[error("Field {field} is not an ISO-8601 date: {value}")]
    InvalidDate { field: String, value: String },

    /// A field the schema does not declare (strict schemas only).
    #[error("Unknown field: {field}")]
    UnknownField { field: String },
}

impl SchemaError {
    /// The field path the error refers to, if any.
    pub fn field(&self) -> Option<&str> {
        match self {
            Self::NotAnObject { .. } => None,
            Self::MissingField { field }
            | Self::WrongType { field, .. }
            | Self::NegativeCount { field, .. }
            | Self::InvalidDate { field, .. }
            | Self::UnknownField { field } => Some(field),
        }
    }

    /// Prefix the field path with a parent path.
    pub(crate) fn nested_under(self, parent: &str) -> Self {
        let join = |field: String| {
            if field.starts_with('[') {
                format!("{}{}", parent, field)
            } else {
                format!("{}.{}", parent, field)
            }
        };

        match self {
            Self::NotAnObject { found, .. } => Self::WrongType {
                field: parent.to_string(),
                expected: "object",
                found,
            },
            Self::MissingField { field } => Self::MissingField { field: join(field) },
            Self::WrongType {
                field,
                expected,
                found,
            } => Self::WrongType {
                field: join(field),
                expected,
                found,
            },
            Self::NegativeCount { field, value } => Self::NegativeCount {
                field: join(field),
                value,
            },
            Self::InvalidDate { field, value } => Self::InvalidDate {
                field: join(field),
                value,
            },
            Self::UnknownField { field } => Self::UnknownField { field: join(field) },
        }
    }
}
