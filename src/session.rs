//! Session initialization and the write-once session handle.

use std::sync::Arc;

use once_cell::sync::OnceCell;

use crate::api::FormsBackend;

/// Write-once holder for the backend session identifier.
///
/// Clones share the same cell, so the spawned initializer and the
/// controller observe the same value. Once set, the identifier is never
/// reassigned.
#[derive(Debug, Clone, Default)]
pub struct SessionHandle {
    id: Arc<OnceCell<String>>,
}

impl SessionHandle {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store the identifier. Returns false if one was already set, in
    /// which case the existing value is kept.
    pub fn set(&self, id: String) -> bool {
        self.id.set(id).is_ok()
    }

    pub fn get(&self) -> Option<&str> {
        self.id.get().map(String::as_str)
    }

    pub fn is_set(&self) -> bool {
        self.id.get().is_some()
    }
}

/// Request a session from the backend and store it in the handle.
///
/// Best-effort: a failure is logged and the handle stays unset, which
/// turns later saves and the submit into no-ops.
pub async fn initialize(backend: Arc<dyn FormsBackend>, handle: SessionHandle) {
    match backend.init_session().await {
        Ok(id) => {
            tracing::info!(session_id = %id, "Form session initialized");
            if !handle.set(id) {
                tracing::warn!("Session identifier was already set; keeping the first");
            }
        }
        Err(e) => {
            tracing::error!("Failed to initialize form session: {}", e);
        }
    }
}
