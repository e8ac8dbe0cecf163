//! Decryption capability seam.
//!
//! The renderer never decrypts anything itself; it depends on an injected
//! `DecryptionAgent` that is either present or absent for the lifetime of a
//! page view. The trait below is the entire contract surface with that agent.

pub mod scripted;

pub use scripted::ScriptedAgent;

use crate::error::Result;
use crate::page::DisplaySurface;
use async_trait::async_trait;

/// External capability that turns ciphertext into a renderable surface.
///
/// Implementations are free to do network round trips, prompt for keys, or
/// take arbitrarily long; the renderer imposes no timeout and issues each
/// request as an independent task.
#[async_trait]
pub trait DecryptionAgent: Send + Sync {
    /// Produce a display surface for one placeholder's ciphertext
    ///
    /// # Arguments
    /// * `container_id` - Identifier of the container the surface is destined for
    /// * `ciphertext` - Opaque ciphertext payload
    ///
    /// # Errors
    /// * `AgentFailure` (or any other error) if the agent cannot render the
    ///   message; the placeholder is then left in its pre-processing state
    async fn create_display_surface(
        &self,
        container_id: &str,
        ciphertext: &str,
    ) -> Result<DisplaySurface>;
}
