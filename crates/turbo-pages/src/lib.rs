//! Page bindings and hydration for TurboCommerce pages.
//!
//! A page binding is the single point where "this page" becomes "this
//! payload, this renderer":
//!
//! - `PageRegistry` - Page identifier to schema and render entry point
//! - `PageBinding` - Resolve, validate and forward a page payload
//! - `PageState` / `PageEnvelope` - What the transport delivers
//! - `ViewTree` / `RenderEntryPoint` - What the renderer produces
//! - `render_document` - SSR shell carrying the envelope for hydration
//!
//! # Example
//!
//! ```rust,ignore
//! use turbo_pages::prelude::*;
//!
//! let registry = PageRegistry::standard();
//! let binding = PageBinding::new(&registry, PageId::new(PRODUCTS_EDIT))?;
//!
//! let envelope = PageEnvelope::from_json(&page_json)?;
//! let tree = binding.mount_envelope(envelope)?;
//! assert_eq!(tree.component, "ProductEditPage");
//! ```

mod binding;
mod config;
mod document;
mod envelope;
mod error;
mod logging;
mod page;
mod registry;
mod state;
mod view;

pub use binding::*;
pub use config::*;
pub use document::{extract_envelope, render_document};
pub use envelope::*;
pub use error::*;
pub use logging::*;
pub use page::*;
pub use registry::*;
pub use state::*;
pub use view::*;

pub use turbo_props;

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::{
        extract_envelope, render_document, PageBinding, PageEnvelope, PageError, PageId,
        PageRegistry, PageState, PagesConfig, RenderEntryPoint, SpreadProps, ViewTree,
    };
    pub use turbo_props::prelude::*;
}
