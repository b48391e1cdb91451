//! Error types for page bindings.

use thiserror::Error;
use turbo_props::SchemaError;

/// Errors that can occur while binding a page payload to its renderer.
///
/// All of these are contract violations between the presenter, the
/// transport and the page adapter. None are retried.
#[derive(Error, Debug)]
pub enum PageError {
    /// Render attempted before the transport hydrated page state.
    #[error("Page state missing: no payload hydrated for {0}")]
    PageStateMissing(String),

    /// Page state was hydrated for a different page.
    #[error("Page mismatch: binding is for {expected}, state holds {found}")]
    PageMismatch { expected: String, found: String },

    /// No schema or entry point registered for the page.
    #[error("Unknown page: {0}")]
    UnknownPage(String),

    /// The payload does not satisfy the page schema.
    #[error("Schema error: {0}")]
    Schema(#[from] SchemaError),

    /// The transport envelope could not be decoded.
    #[error("Envelope error: {0}")]
    Envelope(String),
}

impl From<serde_json::Error> for PageError {
    fn from(e: serde_json::Error) -> Self {
        PageError::Envelope(e.to_string())
    }
}

impl PageError {
    /// The schema error, if this is one.
    pub fn as_schema_error(&self) -> Option<&SchemaError> {
        match self {
            Self::Schema(err) => Some(err),
            _ => None,
        }
    }
}
