//! Page registry: page identifier to schema and entry point.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use turbo_props::product_edit::{product_edit_schema, PRODUCTS_EDIT};
use turbo_props::PayloadSchema;

use crate::error::PageError;
use crate::page::PageId;
use crate::view::{RenderEntryPoint, SpreadProps};

/// Schema and renderer registered for one page.
#[derive(Clone)]
pub struct PageEntry {
    schema: PayloadSchema,
    entry_point: Arc<dyn RenderEntryPoint>,
}

impl PageEntry {
    /// Create an entry.
    pub fn new(schema: PayloadSchema, entry_point: impl RenderEntryPoint + 'static) -> Self {
        Self {
            schema,
            entry_point: Arc::new(entry_point),
        }
    }

    /// The payload schema.
    pub fn schema(&self) -> &PayloadSchema {
        &self.schema
    }

    /// The render entry point.
    pub fn entry_point(&self) -> &dyn RenderEntryPoint {
        self.entry_point.as_ref()
    }
}

impl fmt::Debug for PageEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PageEntry")
            .field("schema", &self.schema.name())
            .finish_non_exhaustive()
    }
}

/// Registry of page bindings.
///
/// Built once at startup and read-only afterwards.
///
/// # Example
///
/// ```rust,ignore
/// let registry = PageRegistry::standard()
///     .page("Products/Show", show_schema(), SpreadProps::new("ProductShowPage"));
/// ```
#[derive(Debug, Clone, Default)]
pub struct PageRegistry {
    pages: HashMap<PageId, PageEntry>,
}

impl PageRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry with the built-in pages (`Products/Edit`).
    pub fn standard() -> Self {
        Self::new().page(
            PRODUCTS_EDIT,
            product_edit_schema(),
            SpreadProps::product_edit(),
        )
    }

    /// Register a page, replacing any previous registration.
    pub fn register(
        &mut self,
        id: impl Into<PageId>,
        schema: PayloadSchema,
        entry_point: impl RenderEntryPoint + 'static,
    ) -> Option<PageEntry> {
        self.pages
            .insert(id.into(), PageEntry::new(schema, entry_point))
    }

    /// Register a page (builder style).
    pub fn page(
        mut self,
        id: impl Into<PageId>,
        schema: PayloadSchema,
        entry_point: impl RenderEntryPoint + 'static,
    ) -> Self {
        self.register(id, schema, entry_point);
        self
    }

    /// Resolve a page identifier to its entry.
    pub fn resolve(&self, id: &PageId) -> Result<&PageEntry, PageError> {
        self.pages
            .get(id)
            .ok_or_else(|| PageError::UnknownPage(id.to_string()))
    }

    /// Number of registered pages.
    pub fn len(&self) -> usize {
        self.pages.len()
    }

    /// Check whether the registry is empty.
    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }
}
