//! Integration tests for the form flow
//!
//! These tests drive the controller the way the UI does, over a
//! recording backend:
//! - the four-question walkthrough with navigation saves and submit
//! - submission gating on the current page's answer
//! - degraded behavior when no session was established

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use intake::api::mock::{BackendCall, RecordingBackend};
use intake::config::FormConfig;
use intake::controller::{FormController, EMPTY_ANSWER_ERROR, SUBMIT_FAILED_ERROR};
use intake::form::QuestionId;
use intake::session::SessionHandle;

// ─── Helpers ──────────────────────────────────────────────────────────────────

struct FlowContext {
    controller: FormController,
    backend: Arc<RecordingBackend>,
    completions: Arc<AtomicUsize>,
}

impl FlowContext {
    fn new(with_session: bool) -> Self {
        let backend = Arc::new(RecordingBackend::new("sess-1"));
        let session = SessionHandle::new();
        if with_session {
            session.set("sess-1".to_string());
        }

        let completions = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&completions);
        let controller = FormController::new(
            Arc::clone(&backend) as Arc<dyn intake::api::FormsBackend>,
            session,
            &FormConfig::default(),
            Box::new(move || {
                counter.fetch_add(1, Ordering::SeqCst);
            }),
        );

        Self {
            controller,
            backend,
            completions,
        }
    }
}

/// Let spawned fire-and-forget saves run without reaching the debounce
/// window (time is paused, so this is instantaneous in wall-clock terms).
async fn drain_spawned_saves() {
    tokio::time::sleep(Duration::from_millis(10)).await;
}

// ─── Walkthrough ──────────────────────────────────────────────────────────────

#[tokio::test(start_paused = true)]
async fn walkthrough_saves_each_page_then_submits_once() {
    let mut ctx = FlowContext::new(true);

    let answers = ["Alice", "alice@x.com", "Engineer", "Great tool"];

    for (i, answer) in answers.iter().enumerate() {
        let question = QuestionId::from_index(i).unwrap();
        ctx.controller.change_answer(question, *answer);
        if i + 1 < answers.len() {
            ctx.controller.go_next();
            drain_spawned_saves().await;
        }
    }

    assert!(ctx.controller.is_last_page());
    ctx.controller.submit().await;

    let calls = ctx.backend.calls();
    let expected_saves: Vec<BackendCall> = answers
        .iter()
        .enumerate()
        .map(|(i, answer)| BackendCall::SaveAnswer {
            session_id: "sess-1".to_string(),
            question_number: i as u8 + 1,
            answer: (*answer).to_string(),
        })
        .collect();

    // Four saves numbered 1..4, then exactly one submit
    assert_eq!(calls.len(), 5);
    assert_eq!(&calls[..4], expected_saves.as_slice());
    assert_eq!(
        calls[4],
        BackendCall::Submit {
            session_id: "sess-1".to_string()
        }
    );

    assert_eq!(ctx.completions.load(Ordering::SeqCst), 1);
    assert!(!ctx.controller.is_loading());
}

#[tokio::test(start_paused = true)]
async fn revisiting_a_page_saves_the_latest_value() {
    let mut ctx = FlowContext::new(true);

    ctx.controller.change_answer(QuestionId::Name, "Alise");
    ctx.controller.go_next();
    drain_spawned_saves().await;

    ctx.controller.go_prev();
    drain_spawned_saves().await;

    ctx.controller.change_answer(QuestionId::Name, "Alice");
    ctx.controller.go_next();
    drain_spawned_saves().await;

    let saves = ctx.backend.saves();
    assert_eq!(
        saves.last(),
        Some(&BackendCall::SaveAnswer {
            session_id: "sess-1".to_string(),
            question_number: 1,
            answer: "Alice".to_string(),
        })
    );
}

// ─── Submission gating ────────────────────────────────────────────────────────

#[tokio::test]
async fn submit_on_an_empty_page_sets_the_error_and_calls_nothing() {
    let mut ctx = FlowContext::new(true);

    ctx.controller.submit().await;

    assert_eq!(ctx.controller.error(), Some(EMPTY_ANSWER_ERROR));
    assert!(ctx.backend.calls().is_empty());
    assert_eq!(ctx.completions.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn whitespace_only_answers_do_not_pass_the_submit_gate() {
    let mut ctx = FlowContext::new(true);

    ctx.controller.change_answer(QuestionId::Name, "   \n ");
    ctx.controller.submit().await;

    assert_eq!(ctx.controller.error(), Some(EMPTY_ANSWER_ERROR));
    assert!(ctx.backend.saves().is_empty());
}

#[tokio::test]
async fn failed_submit_is_recoverable_by_retrying() {
    let mut ctx = FlowContext::new(true);

    ctx.controller.change_answer(QuestionId::Name, "Alice");
    ctx.backend.set_fail_submit(true);
    ctx.controller.submit().await;

    assert_eq!(ctx.controller.error(), Some(SUBMIT_FAILED_ERROR));
    assert_eq!(ctx.controller.current_page(), 0);
    assert_eq!(ctx.completions.load(Ordering::SeqCst), 0);
    assert!(!ctx.controller.is_loading());

    // The same submit succeeds once the backend recovers
    ctx.backend.set_fail_submit(false);
    ctx.controller.submit().await;

    assert_eq!(ctx.completions.load(Ordering::SeqCst), 1);
}

// ─── Degraded mode (no session) ───────────────────────────────────────────────

#[tokio::test(start_paused = true)]
async fn without_a_session_every_network_call_is_skipped() {
    let mut ctx = FlowContext::new(false);

    ctx.controller.change_answer(QuestionId::Name, "Alice");
    ctx.controller.save_on_blur(QuestionId::Name);
    ctx.controller.go_next();
    ctx.controller.go_prev();
    tokio::time::sleep(Duration::from_millis(1500)).await;

    // The answer is non-empty, so only the missing session stops this
    ctx.controller.submit().await;

    assert!(ctx.backend.calls().is_empty());
    assert_eq!(ctx.controller.error(), None);
    assert_eq!(ctx.completions.load(Ordering::SeqCst), 0);
}

// ─── Save failures stay silent ────────────────────────────────────────────────

#[tokio::test(start_paused = true)]
async fn save_failures_never_surface_to_the_user() {
    let mut ctx = FlowContext::new(true);
    ctx.backend.set_fail_saves(true);

    ctx.controller.change_answer(QuestionId::Name, "Alice");
    ctx.controller.save_on_blur(QuestionId::Name);
    drain_spawned_saves().await;

    assert_eq!(ctx.controller.error(), None);
    assert_eq!(ctx.backend.saves().len(), 1);
}
