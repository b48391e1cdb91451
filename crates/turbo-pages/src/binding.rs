//! Page binding: the hand-off from page payload to render entry point.

use serde_json::{Map, Value};
use turbo_props::PagePayload;

use crate::config::PagesConfig;
use crate::envelope::PageEnvelope;
use crate::error::PageError;
use crate::logging::{LogLevel, StructuredLogger};
use crate::page::PageId;
use crate::registry::{PageEntry, PageRegistry};
use crate::state::PageState;
use crate::view::ViewTree;

/// Binds one page identifier to its schema and render entry point.
///
/// Stateless per call: the page state it reads is owned by the transport.
/// A payload that fails its schema is never rendered, not even partially.
///
/// # Example
///
/// ```rust,ignore
/// let registry = PageRegistry::standard();
/// let binding = PageBinding::new(&registry, PageId::new("Products/Edit"))?;
///
/// // Preferred: the transport hands the payload over directly.
/// let tree = binding.mount_envelope(envelope)?;
///
/// // Or read whatever the transport hydrated.
/// let tree = binding.mount(&state)?;
/// ```
#[derive(Debug)]
pub struct PageBinding<'r> {
    page_id: PageId,
    entry: &'r PageEntry,
    logger: StructuredLogger,
}

impl<'r> PageBinding<'r> {
    /// Bind a registered page.
    pub fn new(registry: &'r PageRegistry, page_id: PageId) -> Result<Self, PageError> {
        let entry = registry.resolve(&page_id)?;
        let logger = StructuredLogger::new(page_id.clone());
        Ok(Self {
            page_id,
            entry,
            logger,
        })
    }

    /// Apply logging settings from configuration.
    pub fn with_config(mut self, config: &PagesConfig) -> Self {
        self.logger = self
            .logger
            .with_min_level(config.log_level)
            .with_format(config.log_format);
        self
    }

    /// Page this binding serves.
    pub fn page_id(&self) -> &PageId {
        &self.page_id
    }

    /// Registered schema and entry point.
    pub fn entry(&self) -> &PageEntry {
        self.entry
    }

    /// Read the raw payload the transport hydrated for this page.
    ///
    /// Fails rather than returning an empty payload when the transport has
    /// not populated the state yet.
    pub fn resolve_current_payload<'s>(
        &self,
        state: &'s PageState,
    ) -> Result<&'s Map<String, Value>, PageError> {
        let envelope = match state.envelope() {
            Some(envelope) => envelope,
            None => {
                self.logger
                    .event(LogLevel::Error, "Page state missing before hydration")
                    .emit();
                return Err(PageError::PageStateMissing(self.page_id.to_string()));
            }
        };

        self.check_page(&envelope.component)?;
        Ok(&envelope.props)
    }

    /// Validate a raw payload against the page schema.
    pub fn validate(&self, payload: Map<String, Value>) -> Result<PagePayload, PageError> {
        self.entry.schema().validate(payload).map_err(|err| {
            self.logger
                .event(LogLevel::Error, "Payload rejected by schema")
                .field("field", err.field().unwrap_or_default())
                .field("error", err.to_string())
                .emit();
            PageError::Schema(err)
        })
    }

    /// Forward a validated payload to the render entry point unchanged.
    pub fn render(&self, payload: &PagePayload) -> ViewTree {
        let tree = self.entry.entry_point().render(payload);
        self.logger
            .event(LogLevel::Debug, "Page rendered")
            .field("component", tree.component.as_str())
            .field("fields", payload.len())
            .emit();
        tree
    }

    /// Resolve, validate and render from hydrated page state.
    pub fn mount(&self, state: &PageState) -> Result<ViewTree, PageError> {
        let raw = self.resolve_current_payload(state)?;
        self.mount_payload(raw.clone())
    }

    /// Validate and render a payload handed over directly by the transport.
    pub fn mount_payload(&self, payload: Map<String, Value>) -> Result<ViewTree, PageError> {
        self.logger
            .event(LogLevel::Debug, "Mount started")
            .field("fields", payload.len())
            .emit();
        let payload = self.validate(payload)?;
        Ok(self.render(&payload))
    }

    /// Validate and render a transport envelope addressed to this page.
    pub fn mount_envelope(&self, envelope: PageEnvelope) -> Result<ViewTree, PageError> {
        self.check_page(&envelope.component)?;
        self.mount_payload(envelope.props)
    }

    fn check_page(&self, found: &PageId) -> Result<(), PageError> {
        if found == &self.page_id {
            return Ok(());
        }

        self.logger
            .event(LogLevel::Error, "Page state hydrated for another page")
            .field("found", found.as_str())
            .emit();
        Err(PageError::PageMismatch {
            expected: self.page_id.to_string(),
            found: found.to_string(),
        })
    }
}
