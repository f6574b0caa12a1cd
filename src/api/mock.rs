//! Recording mock of the forms backend for tests.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;

use crate::form::QuestionId;

use super::{ApiError, FormData, FormsBackend, SavedAnswer};

/// One recorded backend call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BackendCall {
    Init,
    SaveAnswer {
        session_id: String,
        question_number: u8,
        answer: String,
    },
    Submit {
        session_id: String,
    },
    FormData {
        session_id: String,
    },
}

/// In-memory backend that records every call and can be told to fail.
#[derive(Debug, Default)]
pub struct RecordingBackend {
    calls: Mutex<Vec<BackendCall>>,
    session_id: String,
    fail_init: AtomicBool,
    fail_saves: AtomicBool,
    fail_submit: AtomicBool,
}

impl RecordingBackend {
    pub fn new(session_id: impl Into<String>) -> Self {
        Self {
            session_id: session_id.into(),
            ..Self::default()
        }
    }

    pub fn set_fail_init(&self, fail: bool) {
        self.fail_init.store(fail, Ordering::SeqCst);
    }

    pub fn set_fail_saves(&self, fail: bool) {
        self.fail_saves.store(fail, Ordering::SeqCst);
    }

    pub fn set_fail_submit(&self, fail: bool) {
        self.fail_submit.store(fail, Ordering::SeqCst);
    }

    /// Snapshot of all recorded calls, in order.
    pub fn calls(&self) -> Vec<BackendCall> {
        self.calls.lock().unwrap().clone()
    }

    /// Only the recorded save-answer calls, in order.
    pub fn saves(&self) -> Vec<BackendCall> {
        self.calls()
            .into_iter()
            .filter(|c| matches!(c, BackendCall::SaveAnswer { .. }))
            .collect()
    }

    fn record(&self, call: BackendCall) {
        self.calls.lock().unwrap().push(call);
    }
}

#[async_trait]
impl FormsBackend for RecordingBackend {
    async fn init_session(&self) -> Result<String, ApiError> {
        self.record(BackendCall::Init);
        if self.fail_init.load(Ordering::SeqCst) {
            return Err(ApiError::http("init", 500));
        }
        Ok(self.session_id.clone())
    }

    async fn save_answer(
        &self,
        session_id: &str,
        question: QuestionId,
        answer: &str,
    ) -> Result<(), ApiError> {
        self.record(BackendCall::SaveAnswer {
            session_id: session_id.to_string(),
            question_number: question.number(),
            answer: answer.to_string(),
        });
        if self.fail_saves.load(Ordering::SeqCst) {
            return Err(ApiError::http("save-answer", 500));
        }
        Ok(())
    }

    async fn submit(&self, session_id: &str) -> Result<(), ApiError> {
        self.record(BackendCall::Submit {
            session_id: session_id.to_string(),
        });
        if self.fail_submit.load(Ordering::SeqCst) {
            return Err(ApiError::http("submit", 500));
        }
        Ok(())
    }

    async fn form_data(&self, session_id: &str) -> Result<FormData, ApiError> {
        self.record(BackendCall::FormData {
            session_id: session_id.to_string(),
        });

        // Assemble the record from whatever saves were recorded, keeping
        // only the latest value per question like the real backend does.
        let mut latest: Vec<Option<String>> = vec![None; crate::form::QUESTION_COUNT];
        for call in self.calls() {
            if let BackendCall::SaveAnswer {
                question_number,
                answer,
                ..
            } = call
            {
                if let Some(slot) = usize::from(question_number)
                    .checked_sub(1)
                    .and_then(|i| latest.get_mut(i))
                {
                    *slot = Some(answer);
                }
            }
        }

        let answers = latest
            .into_iter()
            .enumerate()
            .filter_map(|(i, answer)| {
                answer.map(|answer| SavedAnswer {
                    question_number: i as u8 + 1,
                    answer,
                    saved_at: None,
                })
            })
            .collect();

        Ok(FormData {
            session_id: session_id.to_string(),
            created_at: None,
            submitted_at: None,
            is_submitted: 0,
            answers,
        })
    }
}
