//! Application orchestration layer
//!
//! This module provides minimal coordination between the page snapshot, the
//! decryption agent, and the render session. It avoids duplicating state
//! management that already exists in individual components.

use crate::agent::DecryptionAgent;
use crate::error::Result;
use crate::page::{InMemoryPage, PageModel, PageSnapshot};
use crate::render::{RenderReport, RenderSession};
use std::path::Path;
use std::sync::Arc;

/// Application orchestrator - wires components without duplicating their state
pub struct Application {
    page: Arc<InMemoryPage>,
    session: RenderSession,
}

impl Application {
    /// Create application by loading a page snapshot and wiring components together
    pub fn new(snapshot_path: &Path) -> Result<Self> {
        let snapshot = PageSnapshot::load(snapshot_path)?;
        let (page, agent) = snapshot.into_parts();
        let page = Arc::new(page);
        let agent = agent.map(|scripted| Arc::new(scripted) as Arc<dyn DecryptionAgent>);
        let session = RenderSession::new(Arc::clone(&page) as Arc<dyn PageModel>, agent);

        Ok(Self { page, session })
    }

    /// Run one render pass over the page and return the outcome report
    pub async fn run(&mut self) -> Result<RenderReport> {
        self.session.render_all().await
    }

    /// The page this application renders into
    pub fn page(&self) -> &InMemoryPage {
        &self.page
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[tokio::test]
    async fn application_renders_snapshot_end_to_end() {
        let mut file = NamedTempFile::new().expect("create temp file");
        file.write_all(
            br#"{
                "placeholders": [
                    {"message_id": "msg-a", "ciphertext": "xxA", "container_id": "view-a", "fallback": "[locked]"}
                ],
                "agent": {"surfaces": {"view-a": "plain A"}}
            }"#,
        )
        .expect("write snapshot");
        file.flush().expect("flush snapshot");

        let mut app = Application::new(file.path()).unwrap();
        let report = app.run().await.unwrap();

        assert_eq!(report.rendered_count(), 1);
        let view = app.page().rendered_view();
        assert_eq!(view[0].body, "plain A");
        assert!(view[0].decrypted);
    }
}
