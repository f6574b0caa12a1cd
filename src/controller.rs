//! Page/session controller for the intake form.
//!
//! Owns the page index, the answers, the error/loading flags, and the
//! autosave machinery. All mutation happens on the UI task; the only
//! concurrency is the spawned save calls, which are fire-and-forget and
//! never cancelled once their request is in flight.

use std::sync::Arc;
use std::time::{Duration, Instant};

use tokio::task::JoinHandle;

use crate::api::FormsBackend;
use crate::config::FormConfig;
use crate::form::{Answers, QuestionId, QUESTION_COUNT};
use crate::session::SessionHandle;

/// Error shown when submitting with an empty answer.
pub const EMPTY_ANSWER_ERROR: &str = "Please answer all questions before submitting.";

/// Error shown when the submit request fails.
pub const SUBMIT_FAILED_ERROR: &str = "Failed to submit form. Please try again.";

/// Invoked once when the form has been submitted successfully.
pub type CompletionCallback = Box<dyn FnMut() + Send>;

struct ErrorNotice {
    message: String,
    raised_at: Instant,
}

pub struct FormController {
    backend: Arc<dyn FormsBackend>,
    session: SessionHandle,
    answers: Answers,
    page: usize,
    error: Option<ErrorNotice>,
    loading: bool,
    /// Single debounce slot, shared across questions. Rescheduling
    /// aborts whatever save was pending.
    pending_save: Option<JoinHandle<()>>,
    quiet_window: Duration,
    error_display: Duration,
    on_complete: CompletionCallback,
}

impl FormController {
    pub fn new(
        backend: Arc<dyn FormsBackend>,
        session: SessionHandle,
        config: &FormConfig,
        on_complete: CompletionCallback,
    ) -> Self {
        Self {
            backend,
            session,
            answers: Answers::new(),
            page: 0,
            error: None,
            loading: false,
            pending_save: None,
            quiet_window: config.quiet_window(),
            error_display: config.error_display(),
            on_complete,
        }
    }

    pub fn current_page(&self) -> usize {
        self.page
    }

    pub fn current_question(&self) -> QuestionId {
        QuestionId::ALL[self.page]
    }

    pub fn answer(&self, id: QuestionId) -> &str {
        self.answers.get(id)
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_ref().map(|n| n.message.as_str())
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn is_first_page(&self) -> bool {
        self.page == 0
    }

    pub fn is_last_page(&self) -> bool {
        self.page + 1 == QUESTION_COUNT
    }

    /// Update an answer and reschedule the debounced autosave.
    ///
    /// The map update is synchronous so the UI always renders the latest
    /// keystroke; the save happens after a quiet window with no further
    /// edits.
    pub fn change_answer(&mut self, id: QuestionId, value: impl Into<String>) {
        self.answers.set(id, value);

        if let Some(pending) = self.pending_save.take() {
            pending.abort();
        }

        let backend = Arc::clone(&self.backend);
        let session = self.session.clone();
        let value = self.answers.get(id).to_owned();
        let window = self.quiet_window;

        self.pending_save = Some(tokio::spawn(async move {
            tokio::time::sleep(window).await;
            persist_answer(backend, session, id, value).await;
        }));
    }

    /// Save the current value for a question immediately, no debounce.
    ///
    /// A stronger checkpoint than the debounced path; any save still
    /// pending in the debounce slot is left alone.
    pub fn save_on_blur(&mut self, id: QuestionId) {
        self.spawn_save(id);
    }

    /// Advance to the next page, saving the current answer on the way.
    pub fn go_next(&mut self) {
        if self.is_last_page() {
            return;
        }
        self.spawn_save(self.current_question());
        self.page += 1;
    }

    /// Go back one page, saving the current answer on the way.
    pub fn go_prev(&mut self) {
        if self.is_first_page() {
            return;
        }
        self.spawn_save(self.current_question());
        self.page -= 1;
    }

    /// Submit the session.
    ///
    /// Validates the current page's answer, checkpoints it, then issues
    /// the submit request. The completion callback fires on success; a
    /// failure raises a user-visible error and leaves the page alone.
    /// Loading is cleared on both paths.
    pub async fn submit(&mut self) {
        let question = self.current_question();
        if self.answers.is_blank(question) {
            self.raise_error(EMPTY_ANSWER_ERROR);
            return;
        }

        let Some(session_id) = self.session.get().map(str::to_owned) else {
            tracing::warn!("Submit requested before a session was established");
            return;
        };

        persist_answer(
            Arc::clone(&self.backend),
            self.session.clone(),
            question,
            self.answers.get(question).to_owned(),
        )
        .await;

        self.loading = true;
        match self.backend.submit(&session_id).await {
            Ok(()) => {
                tracing::info!(session_id = %session_id, "Form submitted");
                (self.on_complete)();
            }
            Err(e) => {
                tracing::error!("Failed to submit form: {}", e);
                self.raise_error(SUBMIT_FAILED_ERROR);
            }
        }
        self.loading = false;
    }

    /// Whether the host should ask before closing the form.
    ///
    /// True while the current page is before the last. The host may
    /// ignore this entirely.
    pub fn should_confirm_close(&self) -> bool {
        self.page + 1 < QUESTION_COUNT
    }

    /// Set the user-visible error, re-arming the display window.
    pub fn raise_error(&mut self, message: impl Into<String>) {
        self.error = Some(ErrorNotice {
            message: message.into(),
            raised_at: Instant::now(),
        });
    }

    pub fn clear_error(&mut self) {
        self.error = None;
    }

    /// Drop the error once its display window has elapsed.
    ///
    /// Called from the UI tick; a new error restarts the window.
    pub fn expire_error(&mut self) {
        if let Some(notice) = &self.error {
            if notice.raised_at.elapsed() >= self.error_display {
                self.error = None;
            }
        }
    }

    fn spawn_save(&self, id: QuestionId) {
        let backend = Arc::clone(&self.backend);
        let session = self.session.clone();
        let value = self.answers.get(id).to_owned();
        tokio::spawn(persist_answer(backend, session, id, value));
    }
}

/// Shared save path for the debounced, blur, and navigation saves.
///
/// No-op while the session is not established or when the trimmed value
/// is empty. Failures are logged and never retried, so an answer can
/// silently fail to persist.
async fn persist_answer(
    backend: Arc<dyn FormsBackend>,
    session: SessionHandle,
    question: QuestionId,
    value: String,
) {
    let Some(session_id) = session.get() else {
        tracing::debug!(
            question = question.number(),
            "Skipping save: no session yet"
        );
        return;
    };

    let trimmed = value.trim();
    if trimmed.is_empty() {
        return;
    }

    match backend.save_answer(session_id, question, trimmed).await {
        Ok(()) => {
            tracing::debug!(question = question.number(), "Answer saved");
        }
        Err(e) => {
            tracing::warn!(question = question.number(), "Failed to save answer: {}", e);
        }
    }
}
