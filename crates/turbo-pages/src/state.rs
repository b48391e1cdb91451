//! Page state populated by the transport.

use crate::envelope::PageEnvelope;

/// The page the transport has hydrated, if any.
///
/// The binding only reads this. A navigation replaces the whole envelope;
/// nothing from the previous page survives.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PageState {
    current: Option<PageEnvelope>,
}

impl PageState {
    /// Create empty, not-yet-hydrated state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create state already hydrated with an envelope.
    pub fn hydrated(envelope: PageEnvelope) -> Self {
        Self {
            current: Some(envelope),
        }
    }

    /// Hydrate with a new envelope, returning the one it replaces.
    pub fn hydrate(&mut self, envelope: PageEnvelope) -> Option<PageEnvelope> {
        self.current.replace(envelope)
    }

    /// The hydrated envelope.
    pub fn envelope(&self) -> Option<&PageEnvelope> {
        self.current.as_ref()
    }
}
