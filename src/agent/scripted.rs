//! Deterministic scripted agent.
//!
//! Drives the renderer from a fixed table of per-container outcomes. The
//! preview binary builds one from the snapshot's `agent` section; tests use it
//! to stage successes, failures, and slow responses.

use crate::agent::DecryptionAgent;
use crate::error::{CipherpaneError, Result};
use crate::page::DisplaySurface;
use async_trait::async_trait;
use std::collections::HashMap;
use std::time::Duration;

#[derive(Debug, Clone)]
enum ScriptedOutcome {
    Succeed(String),
    Fail(String),
}

/// Agent whose responses are fully scripted per container.
///
/// Containers without a scripted outcome fail, which keeps accidental
/// fixture gaps visible in reports instead of silently rendering.
#[derive(Debug, Default)]
pub struct ScriptedAgent {
    outcomes: HashMap<String, ScriptedOutcome>,
    delays: HashMap<String, Duration>,
}

impl ScriptedAgent {
    pub fn new() -> Self {
        Self::default()
    }

    /// Script a successful render for a container
    pub fn succeed_with(
        mut self,
        container_id: impl Into<String>,
        plaintext: impl Into<String>,
    ) -> Self {
        self.outcomes.insert(
            container_id.into(),
            ScriptedOutcome::Succeed(plaintext.into()),
        );
        self
    }

    /// Script a rejection for a container
    pub fn fail_with(
        mut self,
        container_id: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        self.outcomes
            .insert(container_id.into(), ScriptedOutcome::Fail(message.into()));
        self
    }

    /// Add artificial latency before a container's outcome resolves
    pub fn delay(mut self, container_id: impl Into<String>, delay: Duration) -> Self {
        self.delays.insert(container_id.into(), delay);
        self
    }
}

#[async_trait]
impl DecryptionAgent for ScriptedAgent {
    async fn create_display_surface(
        &self,
        container_id: &str,
        _ciphertext: &str,
    ) -> Result<DisplaySurface> {
        if let Some(delay) = self.delays.get(container_id) {
            tokio::time::sleep(*delay).await;
        }

        match self.outcomes.get(container_id) {
            Some(ScriptedOutcome::Succeed(plaintext)) => Ok(DisplaySurface::new(plaintext.clone())),
            Some(ScriptedOutcome::Fail(message)) => {
                Err(CipherpaneError::agent_failure(message.clone()))
            }
            None => Err(CipherpaneError::agent_failure(format!(
                "no scripted outcome for container {container_id}"
            ))),
        }
    }
}
