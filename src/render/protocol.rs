//! Protocol definitions shared between the render session and the placeholder worker.

use crate::error::CipherpaneError;
use crate::page::MessagePlaceholder;

/// Identifier attached to dispatched requests so responses can be correlated.
pub type RequestId = u64;

/// Why a placeholder was left untouched without being treated as an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// No decryption agent is present in the environment
    AgentUnavailable,
    /// The placeholder was already dispatched in an earlier discovery pass.
    /// Emitted by the session, never by the worker.
    AlreadyProcessed,
}

/// Commands sent from the render session to the placeholder worker.
#[derive(Debug, Clone, PartialEq)]
pub enum RenderCommand {
    /// Render one placeholder; the worker issues the agent request as an
    /// independent task and responds on completion, in any order.
    RenderMessage {
        request_id: RequestId,
        placeholder: MessagePlaceholder,
    },
    /// Stop accepting commands; in-flight placeholders still run to completion.
    Shutdown,
}

/// Responses emitted by the placeholder worker back to the session.
#[derive(Debug)]
pub enum RenderResponse {
    /// Fallback hidden and surface attached
    Rendered {
        request_id: RequestId,
        message_id: String,
    },
    /// Placeholder left untouched for a non-error reason
    Skipped {
        request_id: RequestId,
        message_id: String,
        reason: SkipReason,
    },
    /// Agent or page error; the placeholder stays unrendered and siblings are
    /// unaffected
    Failed {
        request_id: RequestId,
        message_id: String,
        error: CipherpaneError,
    },
}

impl RenderResponse {
    /// The request this response answers
    pub fn request_id(&self) -> RequestId {
        match self {
            RenderResponse::Rendered { request_id, .. }
            | RenderResponse::Skipped { request_id, .. }
            | RenderResponse::Failed { request_id, .. } => *request_id,
        }
    }

    /// The placeholder this response is about
    pub fn message_id(&self) -> &str {
        match self {
            RenderResponse::Rendered { message_id, .. }
            | RenderResponse::Skipped { message_id, .. }
            | RenderResponse::Failed { message_id, .. } => message_id,
        }
    }
}
