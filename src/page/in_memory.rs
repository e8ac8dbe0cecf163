//! In-memory page model.
//!
//! This module provides the InMemoryPage implementation that holds the full
//! placeholder set and mutable per-message state (fallback visibility, attached
//! surfaces) behind a single lock. It backs the preview binary and the test
//! suite; a host embedding the renderer against a real document would supply
//! its own `PageModel`.

use crate::error::{CipherpaneError, Result};
use crate::page::placeholder::{DisplaySurface, MessagePlaceholder};
use crate::page::PageModel;
use async_trait::async_trait;
use parking_lot::RwLock;
use std::collections::HashMap;

/// Mutable page state guarded by the page lock.
#[derive(Default)]
struct PageState {
    /// Per-message fallback content and its visibility
    fallbacks: HashMap<String, FallbackState>,

    /// Per-container attached surfaces, in attachment order
    containers: HashMap<String, Vec<DisplaySurface>>,
}

struct FallbackState {
    content: String,
    visible: bool,
}

/// A message as it would currently be shown: either its decrypted surface or
/// its fallback content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedMessage {
    pub message_id: String,
    pub body: String,
    /// True when the body comes from an attached display surface
    pub decrypted: bool,
}

/// Reference page model holding all placeholder state in memory.
///
/// Placeholders are registered up front with `insert_message` and form the
/// static set returned by `placeholders()`. Identifiers are expected to be
/// unique within a page; the snapshot loader validates this.
#[derive(Default)]
pub struct InMemoryPage {
    /// Static placeholder set, in insertion order
    placeholders: Vec<MessagePlaceholder>,

    state: RwLock<PageState>,
}

impl InMemoryPage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register one encrypted message with its visible fallback content
    ///
    /// The fallback starts visible and its container starts empty, mirroring a
    /// freshly loaded page.
    pub fn insert_message(&mut self, placeholder: MessagePlaceholder, fallback: impl Into<String>) {
        let state = self.state.get_mut();
        state.fallbacks.insert(
            placeholder.message_id.clone(),
            FallbackState {
                content: fallback.into(),
                visible: true,
            },
        );
        state
            .containers
            .insert(placeholder.container_id.clone(), Vec::new());
        self.placeholders.push(placeholder);
    }

    /// Visibility of a message's fallback content, or None for unknown ids
    pub fn fallback_visible(&self, message_id: &str) -> Option<bool> {
        self.state
            .read()
            .fallbacks
            .get(message_id)
            .map(|fallback| fallback.visible)
    }

    /// Surfaces attached to a container so far, or None for unknown ids
    pub fn attached_surfaces(&self, container_id: &str) -> Option<Vec<DisplaySurface>> {
        self.state.read().containers.get(container_id).cloned()
    }

    /// True while no mutation has been applied to any placeholder
    pub fn is_pristine(&self) -> bool {
        let state = self.state.read();
        state.fallbacks.values().all(|fallback| fallback.visible)
            && state.containers.values().all(|surfaces| surfaces.is_empty())
    }

    /// Materialize the page as it would currently be shown, in page order
    pub fn rendered_view(&self) -> Vec<RenderedMessage> {
        let state = self.state.read();
        self.placeholders
            .iter()
            .map(|placeholder| {
                let surfaces = state
                    .containers
                    .get(&placeholder.container_id)
                    .map(Vec::as_slice)
                    .unwrap_or_default();

                if !surfaces.is_empty() {
                    let body = surfaces
                        .iter()
                        .map(DisplaySurface::content)
                        .collect::<Vec<_>>()
                        .join("\n");
                    return RenderedMessage {
                        message_id: placeholder.message_id.clone(),
                        body,
                        decrypted: true,
                    };
                }

                let body = state
                    .fallbacks
                    .get(&placeholder.message_id)
                    .filter(|fallback| fallback.visible)
                    .map(|fallback| fallback.content.clone())
                    .unwrap_or_default();
                RenderedMessage {
                    message_id: placeholder.message_id.clone(),
                    body,
                    decrypted: false,
                }
            })
            .collect()
    }
}

#[async_trait]
impl PageModel for InMemoryPage {
    fn placeholders(&self) -> Vec<MessagePlaceholder> {
        self.placeholders.clone()
    }

    async fn hide_fallback(&self, message_id: &str) -> Result<()> {
        let mut state = self.state.write();
        let fallback = state
            .fallbacks
            .get_mut(message_id)
            .ok_or_else(|| CipherpaneError::placeholder_not_found(message_id))?;
        fallback.visible = false;
        Ok(())
    }

    async fn attach_surface(&self, container_id: &str, surface: DisplaySurface) -> Result<()> {
        let mut state = self.state.write();
        let surfaces = state
            .containers
            .get_mut(container_id)
            .ok_or_else(|| CipherpaneError::container_not_found(container_id))?;
        surfaces.push(surface);
        Ok(())
    }
}
