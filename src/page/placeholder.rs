//! Placeholder records and display surfaces.
//!
//! A placeholder is the renderer-facing description of one encrypted message:
//! an opaque identifier, an opaque ciphertext blob, and the identifier of the
//! container designated to receive rendered output.

/// One encrypted message awaiting rendering.
///
/// The ciphertext encoding is unspecified and treated as opaque text; only the
/// decryption agent interprets it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessagePlaceholder {
    /// Stable identifier of the message within the page
    pub message_id: String,

    /// Opaque ciphertext payload
    pub ciphertext: String,

    /// Identifier of the nested container designated for decrypted output
    pub container_id: String,
}

impl MessagePlaceholder {
    pub fn new(
        message_id: impl Into<String>,
        ciphertext: impl Into<String>,
        container_id: impl Into<String>,
    ) -> Self {
        Self {
            message_id: message_id.into(),
            ciphertext: ciphertext.into(),
            container_id: container_id.into(),
        }
    }
}

/// Opaque renderable unit produced by a decryption agent.
///
/// The renderer never inspects a surface; it only moves ownership into the
/// target container. The content accessor exists for page implementations
/// that need to materialize a view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplaySurface {
    content: String,
}

impl DisplaySurface {
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
        }
    }

    /// Rendered content carried by this surface
    pub fn content(&self) -> &str {
        &self.content
    }
}
