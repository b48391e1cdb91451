//! Page envelopes delivered by the transport.
//!
//! The server embeds a page object in the document:
//!
//! ```text
//! {"component":"Products/Edit","props":{...},"url":"/products/abc/edit","version":"1f2e"}
//! ```
//!
//! either as raw JSON or HTML-escaped inside the root element's
//! `data-page` attribute.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use html_escape::decode_html_entities;

use crate::document::escape_html;
use crate::error::PageError;
use crate::page::PageId;

/// A page object as delivered by the transport.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageEnvelope {
    /// Page identifier.
    pub component: PageId,
    /// Raw payload produced by the presenter.
    pub props: Map<String, Value>,
    /// URL the page was rendered for.
    #[serde(default)]
    pub url: String,
    /// Asset version the server rendered with.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
}

impl PageEnvelope {
    /// Create an envelope for a page and its raw props.
    pub fn new(component: impl Into<PageId>, props: Map<String, Value>) -> Self {
        Self {
            component: component.into(),
            props,
            url: String::new(),
            version: None,
        }
    }

    /// Set the URL.
    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = url.into();
        self
    }

    /// Set the asset version.
    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version = Some(version.into());
        self
    }

    /// Decode an envelope from raw JSON.
    pub fn from_json(json: &str) -> Result<Self, PageError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Encode as raw JSON.
    pub fn to_json(&self) -> Result<String, PageError> {
        Ok(serde_json::to_string(self)?)
    }

    /// Decode an envelope from an HTML-escaped `data-page` attribute value.
    pub fn from_data_attribute(attribute: &str) -> Result<Self, PageError> {
        Self::from_json(&decode_html_entities(attribute))
    }

    /// Encode for embedding in a `data-page` attribute.
    pub fn to_data_attribute(&self) -> Result<String, PageError> {
        Ok(escape_html(&self.to_json()?))
    }
}
