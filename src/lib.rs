//! # cipherpane - Encrypted Message Renderer
//!
//! An orchestration layer that renders end-to-end-encrypted message placeholders
//! through an external decryption agent, without ever decrypting anything itself.
//!
//! ## Behavior
//!
//! - **Injected capability**: the decryption agent is a constructor argument,
//!   present or absent; no global detection, no re-probing
//! - **Independent tasks**: every placeholder renders as its own async task;
//!   completions are unordered and a slow message never blocks its siblings
//! - **Hide-then-attach**: the fallback content is hidden strictly before the
//!   decrypted surface is attached, so both states are never visible together
//! - **Non-fatal degradation**: a missing agent or a failed decryption leaves
//!   the placeholder on its fallback content and only produces a log line
//!
//! ## Architecture
//!
//! The library is organized into focused modules following modern Rust patterns:
//!
//! - [`error`] - Centralized error types and handling
//! - [`page`] - Page model abstraction, placeholder records, snapshot loading
//! - [`agent`] - Decryption capability seam and the scripted test agent
//! - [`render`] - Render session, placeholder worker, and their protocol
//! - [`app`] - Application core and component coordination

// Core modules
pub mod error;
pub mod page;

// Capability seam and rendering subsystem
pub mod agent;
pub mod render;

// Core components
pub mod app;

// Re-export commonly used types for convenience
pub use error::{CipherpaneError, Result};

// Public API surface for external usage
pub use agent::{DecryptionAgent, ScriptedAgent};
pub use app::Application;
pub use page::{DisplaySurface, InMemoryPage, MessagePlaceholder, PageModel, PageSnapshot};
pub use render::{RenderReport, RenderSession};

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
