//! Page snapshot loading.
//!
//! A snapshot is a JSON fixture describing a page's encrypted-message
//! placeholders and, optionally, a scripted decryption agent. It is the input
//! format of the preview binary and the file-based tests. Omitting the `agent`
//! section entirely models a page viewed without the decryption capability
//! installed.

use crate::agent::ScriptedAgent;
use crate::error::{CipherpaneError, Result};
use crate::page::in_memory::InMemoryPage;
use crate::page::placeholder::MessagePlaceholder;
use serde::Deserialize;
use std::collections::{HashMap, HashSet};
use std::path::Path;
use std::time::Duration;

/// One placeholder entry as described in the snapshot file.
#[derive(Debug, Deserialize)]
pub struct SnapshotPlaceholder {
    pub message_id: String,
    pub ciphertext: String,
    pub container_id: String,

    /// Fallback content shown until (and unless) the message renders.
    /// Defaults to the raw ciphertext when omitted.
    #[serde(default)]
    pub fallback: Option<String>,
}

/// Scripted agent behavior, keyed by container identifier.
#[derive(Debug, Default, Deserialize)]
pub struct AgentScript {
    /// Containers the agent renders successfully, with their plaintext
    #[serde(default)]
    pub surfaces: HashMap<String, String>,

    /// Containers the agent rejects, with the failure message
    #[serde(default)]
    pub failures: HashMap<String, String>,

    /// Artificial per-container latency in milliseconds
    #[serde(default)]
    pub delays_ms: HashMap<String, u64>,
}

/// Parsed page snapshot.
#[derive(Debug, Deserialize)]
pub struct PageSnapshot {
    pub placeholders: Vec<SnapshotPlaceholder>,

    /// Absent section means no decryption capability is installed
    #[serde(default)]
    pub agent: Option<AgentScript>,
}

impl PageSnapshot {
    /// Load and validate a snapshot from disk
    ///
    /// # Errors
    /// * `SnapshotIo` if the file cannot be read
    /// * `SnapshotFormat` if the content is not a valid page description
    pub fn load(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path).map_err(|e| {
            CipherpaneError::snapshot_io(format!("Failed to read snapshot: {}", path.display()), e)
        })?;
        Self::from_json(&raw)
    }

    /// Parse and validate a snapshot from a JSON string
    pub fn from_json(raw: &str) -> Result<Self> {
        let snapshot: PageSnapshot = serde_json::from_str(raw)?;
        snapshot.validate()?;
        Ok(snapshot)
    }

    fn validate(&self) -> Result<()> {
        let mut seen_messages = HashSet::new();
        let mut seen_containers = HashSet::new();

        for entry in &self.placeholders {
            if entry.message_id.is_empty() {
                return Err(CipherpaneError::snapshot_format(
                    "placeholder with empty message_id",
                ));
            }
            if entry.container_id.is_empty() {
                return Err(CipherpaneError::snapshot_format(format!(
                    "placeholder {} with empty container_id",
                    entry.message_id
                )));
            }
            if !seen_messages.insert(entry.message_id.as_str()) {
                return Err(CipherpaneError::snapshot_format(format!(
                    "duplicate message_id: {}",
                    entry.message_id
                )));
            }
            if !seen_containers.insert(entry.container_id.as_str()) {
                return Err(CipherpaneError::snapshot_format(format!(
                    "duplicate container_id: {}",
                    entry.container_id
                )));
            }
        }
        Ok(())
    }

    /// Build the page and the optional scripted agent this snapshot describes
    pub fn into_parts(self) -> (InMemoryPage, Option<ScriptedAgent>) {
        let mut page = InMemoryPage::new();
        for entry in self.placeholders {
            let fallback = entry
                .fallback
                .unwrap_or_else(|| entry.ciphertext.clone());
            page.insert_message(
                MessagePlaceholder::new(entry.message_id, entry.ciphertext, entry.container_id),
                fallback,
            );
        }

        let agent = self.agent.map(|script| {
            let mut agent = ScriptedAgent::new();
            for (container_id, plaintext) in script.surfaces {
                agent = agent.succeed_with(container_id, plaintext);
            }
            for (container_id, message) in script.failures {
                agent = agent.fail_with(container_id, message);
            }
            for (container_id, millis) in script.delays_ms {
                agent = agent.delay(container_id, Duration::from_millis(millis));
            }
            agent
        });

        (page, agent)
    }
}
