use crate::agent::DecryptionAgent;
use crate::page::{MessagePlaceholder, PageModel};
use crate::render::protocol::{RenderCommand, RenderResponse, RequestId, SkipReason};
use futures::stream::FuturesUnordered;
use futures::StreamExt;
use std::sync::Arc;
use tokio::sync::mpsc::{Receiver, Sender};

/// Run the placeholder worker processing commands from the render session.
///
/// Every `RenderMessage` becomes its own in-flight future; the loop keeps
/// polling the command channel while placeholders are pending, so a slow agent
/// call never delays siblings. Responses go out in completion order. After
/// `Shutdown` (or the session dropping its sender) intake stops and remaining
/// in-flight work is drained to completion — there is no cancellation.
pub async fn render_worker_loop(
    mut rx: Receiver<RenderCommand>,
    tx: Sender<RenderResponse>,
    page: Arc<dyn PageModel>,
    agent: Option<Arc<dyn DecryptionAgent>>,
) {
    let mut inflight = FuturesUnordered::new();
    let mut accepting = true;

    loop {
        tokio::select! {
            cmd = rx.recv(), if accepting => match cmd {
                Some(RenderCommand::RenderMessage { request_id, placeholder }) => {
                    match agent.as_ref() {
                        Some(agent) => inflight.push(render_placeholder(
                            Arc::clone(&page),
                            Arc::clone(agent),
                            request_id,
                            placeholder,
                        )),
                        None => {
                            let response = RenderResponse::Skipped {
                                request_id,
                                message_id: placeholder.message_id,
                                reason: SkipReason::AgentUnavailable,
                            };
                            if tx.send(response).await.is_err() {
                                return;
                            }
                        }
                    }
                }
                Some(RenderCommand::Shutdown) | None => accepting = false,
            },
            Some(response) = inflight.next() => {
                if tx.send(response).await.is_err() {
                    return;
                }
            }
            else => break,
        }
    }
}

/// Process one placeholder: agent request, then hide-then-attach.
///
/// The fallback is hidden strictly before the surface is attached so both
/// states are never visible together. Any error leaves this placeholder in
/// its current state and is reported only for it.
async fn render_placeholder(
    page: Arc<dyn PageModel>,
    agent: Arc<dyn DecryptionAgent>,
    request_id: RequestId,
    placeholder: MessagePlaceholder,
) -> RenderResponse {
    let MessagePlaceholder {
        message_id,
        ciphertext,
        container_id,
    } = placeholder;

    let surface = match agent.create_display_surface(&container_id, &ciphertext).await {
        Ok(surface) => surface,
        Err(error) => {
            return RenderResponse::Failed {
                request_id,
                message_id,
                error,
            }
        }
    };

    if let Err(error) = page.hide_fallback(&message_id).await {
        return RenderResponse::Failed {
            request_id,
            message_id,
            error,
        };
    }
    if let Err(error) = page.attach_surface(&container_id, surface).await {
        return RenderResponse::Failed {
            request_id,
            message_id,
            error,
        };
    }

    RenderResponse::Rendered {
        request_id,
        message_id,
    }
}
