//! Render pass coordination.
//!
//! `RenderSession` owns the state that must persist across discovery passes:
//! which placeholders have already been dispatched, and the request-id
//! sequence used to correlate worker responses. A pass snapshots the page's
//! placeholders, hands the unprocessed ones to the worker, and folds the
//! responses into a `RenderReport` while emitting the diagnostic log lines.

use crate::agent::DecryptionAgent;
use crate::error::{CipherpaneError, Result};
use crate::page::PageModel;
use crate::render::protocol::{RenderCommand, RenderResponse, RequestId, SkipReason};
use crate::render::worker::render_worker_loop;
use std::collections::HashSet;
use std::sync::Arc;
use tokio::sync::mpsc;

/// Final state of one placeholder after a render pass.
#[derive(Debug)]
pub enum OutcomeStatus {
    /// Fallback hidden, surface attached
    Rendered,
    /// Left untouched for a non-error reason
    Skipped(SkipReason),
    /// Left untouched because the agent or the page errored
    Failed(CipherpaneError),
}

impl OutcomeStatus {
    pub fn is_rendered(&self) -> bool {
        matches!(self, OutcomeStatus::Rendered)
    }
}

/// Per-placeholder outcome recorded in the report.
#[derive(Debug)]
pub struct PlaceholderOutcome {
    pub message_id: String,
    pub status: OutcomeStatus,
}

/// Summary of one render pass. Outcomes appear in completion order, which is
/// not necessarily page order.
#[derive(Debug, Default)]
pub struct RenderReport {
    outcomes: Vec<PlaceholderOutcome>,
}

impl RenderReport {
    fn new(outcomes: Vec<PlaceholderOutcome>) -> Self {
        Self { outcomes }
    }

    pub fn outcomes(&self) -> &[PlaceholderOutcome] {
        &self.outcomes
    }

    /// Outcome for a specific message, if it appeared in this pass
    pub fn outcome_for(&self, message_id: &str) -> Option<&OutcomeStatus> {
        self.outcomes
            .iter()
            .find(|outcome| outcome.message_id == message_id)
            .map(|outcome| &outcome.status)
    }

    pub fn rendered_count(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|outcome| outcome.status.is_rendered())
            .count()
    }

    pub fn skipped_count(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|outcome| matches!(outcome.status, OutcomeStatus::Skipped(_)))
            .count()
    }

    pub fn failed_count(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|outcome| matches!(outcome.status, OutcomeStatus::Failed(_)))
            .count()
    }
}

/// Coordinates render passes over one page with one (optional) agent.
pub struct RenderSession {
    page: Arc<dyn PageModel>,
    agent: Option<Arc<dyn DecryptionAgent>>,
    /// Message ids dispatched (or capability-skipped) in earlier passes.
    /// Nothing in here is ever retried.
    processed: HashSet<String>,
    next_request_id: RequestId,
}

impl RenderSession {
    pub fn new(page: Arc<dyn PageModel>, agent: Option<Arc<dyn DecryptionAgent>>) -> Self {
        Self {
            page,
            agent,
            processed: HashSet::new(),
            next_request_id: 0,
        }
    }

    /// Run one render pass over the placeholders currently in the page.
    ///
    /// Placeholders seen in an earlier pass are skipped outright, so invoking
    /// discovery twice never attaches a second surface to a container. Errors
    /// from individual placeholders land in the report; the returned `Result`
    /// only fails if the worker itself becomes unreachable.
    pub async fn render_all(&mut self) -> Result<RenderReport> {
        let placeholders = self.page.placeholders();
        let channel_capacity = placeholders.len().max(1);
        let (cmd_tx, cmd_rx) = mpsc::channel(channel_capacity + 1);
        let (resp_tx, mut resp_rx) = mpsc::channel(channel_capacity);
        let worker = tokio::spawn(render_worker_loop(
            cmd_rx,
            resp_tx,
            Arc::clone(&self.page),
            self.agent.clone(),
        ));

        let mut outcomes = Vec::with_capacity(placeholders.len());
        let mut outstanding = 0usize;
        for placeholder in placeholders {
            if !self.processed.insert(placeholder.message_id.clone()) {
                log::debug!(
                    "message {} already processed; leaving it as-is",
                    placeholder.message_id
                );
                outcomes.push(PlaceholderOutcome {
                    message_id: placeholder.message_id,
                    status: OutcomeStatus::Skipped(SkipReason::AlreadyProcessed),
                });
                continue;
            }

            let request_id = self.next_request_id;
            self.next_request_id += 1;
            cmd_tx
                .send(RenderCommand::RenderMessage {
                    request_id,
                    placeholder,
                })
                .await
                .map_err(|_| CipherpaneError::other("render worker unavailable"))?;
            outstanding += 1;
        }
        cmd_tx
            .send(RenderCommand::Shutdown)
            .await
            .map_err(|_| CipherpaneError::other("render worker unavailable"))?;

        while outstanding > 0 {
            let response = resp_rx
                .recv()
                .await
                .ok_or_else(|| CipherpaneError::other("render worker exited early"))?;
            outcomes.push(Self::note_response(response));
            outstanding -= 1;
        }

        let _ = worker.await;
        Ok(RenderReport::new(outcomes))
    }

    /// Convert a worker response into an outcome, emitting the diagnostic line
    fn note_response(response: RenderResponse) -> PlaceholderOutcome {
        match response {
            RenderResponse::Rendered { message_id, .. } => {
                log::debug!("rendered decrypted view for message {message_id}");
                PlaceholderOutcome {
                    message_id,
                    status: OutcomeStatus::Rendered,
                }
            }
            RenderResponse::Skipped {
                message_id, reason, ..
            } => {
                if reason == SkipReason::AgentUnavailable {
                    log::info!("decryption agent not detected; message {message_id} left unrendered");
                }
                PlaceholderOutcome {
                    message_id,
                    status: OutcomeStatus::Skipped(reason),
                }
            }
            RenderResponse::Failed {
                message_id, error, ..
            } => {
                log::warn!("decryption failed for message {message_id}: {error}");
                PlaceholderOutcome {
                    message_id,
                    status: OutcomeStatus::Failed(error),
                }
            }
        }
    }
}
