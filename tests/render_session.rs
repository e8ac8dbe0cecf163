use std::sync::Arc;

use proptest::prelude::*;

use cipherpane::render::{OutcomeStatus, RenderSession, SkipReason};
use cipherpane::{DecryptionAgent, InMemoryPage, MessagePlaceholder, PageModel, ScriptedAgent};

fn two_message_page() -> Arc<InMemoryPage> {
    let mut page = InMemoryPage::new();
    page.insert_message(
        MessagePlaceholder::new("msg-a", "xxA", "view-a"),
        "[encrypted message]",
    );
    page.insert_message(
        MessagePlaceholder::new("msg-b", "xxB", "view-b"),
        "[encrypted message]",
    );
    Arc::new(page)
}

fn session_for(
    page: &Arc<InMemoryPage>,
    agent: Option<Arc<dyn DecryptionAgent>>,
) -> RenderSession {
    RenderSession::new(Arc::clone(page) as Arc<dyn PageModel>, agent)
}

#[tokio::test]
async fn mixed_outcomes_are_isolated_per_placeholder() {
    let page = two_message_page();
    let agent: Arc<dyn DecryptionAgent> = Arc::new(
        ScriptedAgent::new()
            .succeed_with("view-a", "plain A")
            .fail_with("view-b", "bad armor"),
    );
    let mut session = session_for(&page, Some(agent));

    let report = session.render_all().await.unwrap();

    assert_eq!(report.rendered_count(), 1);
    assert_eq!(report.failed_count(), 1);
    assert_eq!(report.skipped_count(), 0);
    assert!(report.outcome_for("msg-a").unwrap().is_rendered());
    assert!(matches!(
        report.outcome_for("msg-b"),
        Some(OutcomeStatus::Failed(_))
    ));

    // msg-a fully rendered
    assert_eq!(page.fallback_visible("msg-a"), Some(false));
    let surfaces = page.attached_surfaces("view-a").unwrap();
    assert_eq!(surfaces.len(), 1);
    assert_eq!(surfaces[0].content(), "plain A");

    // msg-b untouched by its failure
    assert_eq!(page.fallback_visible("msg-b"), Some(true));
    assert_eq!(page.attached_surfaces("view-b"), Some(Vec::new()));
}

#[tokio::test]
async fn missing_agent_leaves_single_placeholder_untouched() {
    let mut page = InMemoryPage::new();
    page.insert_message(
        MessagePlaceholder::new("msg-a", "xxA", "view-a"),
        "[encrypted message]",
    );
    let page = Arc::new(page);
    let mut session = session_for(&page, None);

    let report = session.render_all().await.unwrap();

    assert_eq!(report.outcomes().len(), 1);
    assert!(matches!(
        report.outcome_for("msg-a"),
        Some(OutcomeStatus::Skipped(SkipReason::AgentUnavailable))
    ));
    assert!(page.is_pristine());
}

#[tokio::test]
async fn second_discovery_pass_does_not_attach_twice() {
    let page = two_message_page();
    let agent: Arc<dyn DecryptionAgent> = Arc::new(
        ScriptedAgent::new()
            .succeed_with("view-a", "plain A")
            .succeed_with("view-b", "plain B"),
    );
    let mut session = session_for(&page, Some(agent));

    let first = session.render_all().await.unwrap();
    assert_eq!(first.rendered_count(), 2);

    let second = session.render_all().await.unwrap();
    assert_eq!(second.rendered_count(), 0);
    assert_eq!(second.skipped_count(), 2);
    for outcome in second.outcomes() {
        assert!(matches!(
            outcome.status,
            OutcomeStatus::Skipped(SkipReason::AlreadyProcessed)
        ));
    }

    // Still exactly one surface per container
    assert_eq!(page.attached_surfaces("view-a").unwrap().len(), 1);
    assert_eq!(page.attached_surfaces("view-b").unwrap().len(), 1);
}

#[tokio::test]
async fn failed_placeholder_is_not_retried() {
    let page = two_message_page();
    let agent: Arc<dyn DecryptionAgent> = Arc::new(
        ScriptedAgent::new()
            .succeed_with("view-a", "plain A")
            .fail_with("view-b", "bad armor"),
    );
    let mut session = session_for(&page, Some(agent));

    let first = session.render_all().await.unwrap();
    assert_eq!(first.failed_count(), 1);

    let second = session.render_all().await.unwrap();
    assert_eq!(second.failed_count(), 0);
    assert!(matches!(
        second.outcome_for("msg-b"),
        Some(OutcomeStatus::Skipped(SkipReason::AlreadyProcessed))
    ));

    // The failed message stays on its fallback for the lifetime of the page view
    assert_eq!(page.fallback_visible("msg-b"), Some(true));
    assert_eq!(page.attached_surfaces("view-b"), Some(Vec::new()));
}

proptest! {
    // Whatever the page contains, a missing capability must produce no
    // mutation at all and exactly one skip outcome per placeholder.
    #[test]
    fn missing_capability_never_mutates_page(
        ciphertexts in prop::collection::vec(".{0,32}", 0..8)
    ) {
        tokio_test::block_on(async {
            let mut page = InMemoryPage::new();
            for (i, ciphertext) in ciphertexts.iter().enumerate() {
                page.insert_message(
                    MessagePlaceholder::new(
                        format!("msg-{i}"),
                        ciphertext.clone(),
                        format!("view-{i}"),
                    ),
                    "[encrypted message]",
                );
            }
            let page = Arc::new(page);
            let mut session = RenderSession::new(Arc::clone(&page) as Arc<dyn PageModel>, None);

            let report = session.render_all().await.unwrap();

            assert!(page.is_pristine());
            assert_eq!(report.outcomes().len(), ciphertexts.len());
            for outcome in report.outcomes() {
                assert!(matches!(
                    outcome.status,
                    OutcomeStatus::Skipped(SkipReason::AgentUnavailable)
                ));
            }
        });
    }
}
