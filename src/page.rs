//! Page model abstraction for encrypted-message rendering.
//!
//! This module defines the placeholder records the renderer consumes and the
//! `PageModel` trait it mutates through. Keeping the page behind a trait decouples
//! the renderer from any particular rendering technology: placeholder extraction
//! happens elsewhere, and the renderer only sees identifiers.

pub mod in_memory;
pub mod placeholder;
pub mod snapshot;

pub use in_memory::{InMemoryPage, RenderedMessage};
pub use placeholder::{DisplaySurface, MessagePlaceholder};
pub use snapshot::PageSnapshot;

use crate::error::Result;
use async_trait::async_trait;

/// Core trait for page access during a render pass.
///
/// Implementations own the page state exclusively; the renderer only ever
/// performs the two mutations below, each aimed at a single placeholder.
/// All implementations must be thread-safe.
#[async_trait]
pub trait PageModel: Send + Sync {
    /// Snapshot of the message placeholders present in the page right now
    ///
    /// # Returns
    /// * Placeholder records in page order
    ///
    /// # Usage
    /// This is the discovery step: the render session calls it once per pass and
    /// works from the returned list. Placeholders added to the page later are
    /// not observed.
    fn placeholders(&self) -> Vec<MessagePlaceholder>;

    /// Hide the fallback/raw content of one message placeholder
    ///
    /// # Arguments
    /// * `message_id` - Identifier of the placeholder whose fallback to hide
    ///
    /// # Errors
    /// * `PlaceholderNotFound` if the page has no such message
    ///
    /// # Usage
    /// Called after the agent produced a surface and strictly before the surface
    /// is attached, so the fallback and the decrypted view are never visible
    /// together.
    async fn hide_fallback(&self, message_id: &str) -> Result<()>;

    /// Append a display surface into one decryption container
    ///
    /// # Arguments
    /// * `container_id` - Identifier of the container designated to receive output
    /// * `surface` - The surface produced by the decryption agent; ownership
    ///   transfers to the page
    ///
    /// # Errors
    /// * `ContainerNotFound` if the page has no such container
    ///
    /// # Usage
    /// Surfaces are appended, never removed. The renderer attaches at most one
    /// surface per container per page load.
    async fn attach_surface(&self, container_id: &str, surface: DisplaySurface) -> Result<()>;
}
