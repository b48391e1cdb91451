//! View trees and render entry points.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use turbo_props::PagePayload;

/// Component name the product edit page renders into.
pub const PRODUCT_EDIT_COMPONENT: &str = "ProductEditPage";

/// Structural description of a rendered component invocation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ViewTree {
    /// Component name.
    pub component: String,
    /// Props passed to the component.
    pub props: Map<String, Value>,
}

impl ViewTree {
    /// Create a leaf node for a component with the given props.
    pub fn component(name: impl Into<String>, props: Map<String, Value>) -> Self {
        Self {
            component: name.into(),
            props,
        }
    }

    /// Get a prop by name.
    pub fn prop(&self, name: &str) -> Option<&Value> {
        self.props.get(name)
    }
}

/// Turns a validated payload into a view tree.
///
/// Implementations must be pure: the same payload always yields the same
/// tree, and nothing is retained between calls. Closures of the right
/// shape implement this trait.
pub trait RenderEntryPoint: Send + Sync {
    /// Render the page from its payload.
    fn render(&self, payload: &PagePayload) -> ViewTree;
}

impl<F> RenderEntryPoint for F
where
    F: Fn(&PagePayload) -> ViewTree + Send + Sync,
{
    fn render(&self, payload: &PagePayload) -> ViewTree {
        self(payload)
    }
}

/// Entry point that hands every payload field to one component as props.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpreadProps {
    component: String,
}

impl SpreadProps {
    /// Spread payloads into the named component.
    pub fn new(component: impl Into<String>) -> Self {
        Self {
            component: component.into(),
        }
    }

    /// Entry point for the product edit page.
    pub fn product_edit() -> Self {
        Self::new(PRODUCT_EDIT_COMPONENT)
    }
}

impl RenderEntryPoint for SpreadProps {
    fn render(&self, payload: &PagePayload) -> ViewTree {
        ViewTree::component(self.component.clone(), payload.as_map().clone())
    }
}
