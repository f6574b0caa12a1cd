//! HTTP client for the forms backend.
//!
//! The backend is an external service exposing a small JSON contract:
//! open a session, persist one answer at a time, mark the session
//! submitted, and read a session back. `FormsBackend` is the seam the
//! controller talks through so tests can swap in a recording mock.

mod error;
pub mod mock;

pub use error::ApiError;

use anyhow::{Context, Result};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::form::QuestionId;

/// Operations the forms backend exposes.
#[async_trait]
pub trait FormsBackend: Send + Sync {
    /// Open a new form session and return its identifier.
    async fn init_session(&self) -> Result<String, ApiError>;

    /// Persist the answer for one question.
    async fn save_answer(
        &self,
        session_id: &str,
        question: QuestionId,
        answer: &str,
    ) -> Result<(), ApiError>;

    /// Mark the session as submitted.
    async fn submit(&self, session_id: &str) -> Result<(), ApiError>;

    /// Read back a session and its saved answers.
    async fn form_data(&self, session_id: &str) -> Result<FormData, ApiError>;
}

/// One saved answer as returned by the read-back endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct SavedAnswer {
    pub question_number: u8,
    pub answer: String,
    #[serde(default)]
    pub saved_at: Option<String>,
}

/// A session record with its saved answers.
#[derive(Debug, Clone, Deserialize)]
pub struct FormData {
    pub session_id: String,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub submitted_at: Option<String>,
    /// The backend stores this as 0/1.
    #[serde(default)]
    pub is_submitted: u8,
    #[serde(default)]
    pub answers: Vec<SavedAnswer>,
}

impl FormData {
    pub fn submitted(&self) -> bool {
        self.is_submitted != 0
    }
}

// Request/response types for the wire contract
#[derive(Debug, Serialize)]
struct SaveAnswerRequest<'a> {
    session_id: &'a str,
    question_number: u8,
    answer: &'a str,
}

#[derive(Debug, Serialize)]
struct SubmitRequest<'a> {
    session_id: &'a str,
}

#[derive(Debug, Deserialize)]
struct InitResponse {
    session_id: String,
}

/// Forms backend client over HTTP.
pub struct HttpFormsClient {
    base_url: String,
    client: reqwest::Client,
}

impl HttpFormsClient {
    /// Create a client for the given base URL.
    pub fn new(base_url: impl Into<String>) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(concat!("intake/", env!("CARGO_PKG_VERSION")))
            .build()
            .context("Failed to build HTTP client")?;

        let mut base_url = base_url.into();
        while base_url.ends_with('/') {
            base_url.pop();
        }

        Ok(Self { base_url, client })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// POST a JSON body and map transport/status failures to `ApiError`.
    async fn post_json<T: Serialize + ?Sized>(
        &self,
        endpoint: &'static str,
        path: &str,
        body: &T,
    ) -> Result<reqwest::Response, ApiError> {
        let response = self
            .client
            .post(self.url(path))
            .json(body)
            .send()
            .await
            .map_err(|e| ApiError::network(endpoint, e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(ApiError::http(endpoint, status.as_u16()));
        }

        Ok(response)
    }
}

#[async_trait]
impl FormsBackend for HttpFormsClient {
    async fn init_session(&self) -> Result<String, ApiError> {
        let response = self
            .post_json("init", "/api/forms/init", &serde_json::json!({}))
            .await?;

        let body: InitResponse = response
            .json()
            .await
            .map_err(|e| ApiError::decode("init", e.to_string()))?;

        Ok(body.session_id)
    }

    async fn save_answer(
        &self,
        session_id: &str,
        question: QuestionId,
        answer: &str,
    ) -> Result<(), ApiError> {
        let request = SaveAnswerRequest {
            session_id,
            question_number: question.number(),
            answer,
        };

        self.post_json("save-answer", "/api/forms/save-answer", &request)
            .await?;

        Ok(())
    }

    async fn submit(&self, session_id: &str) -> Result<(), ApiError> {
        let request = SubmitRequest { session_id };

        self.post_json("submit", "/api/forms/submit", &request)
            .await?;

        Ok(())
    }

    async fn form_data(&self, session_id: &str) -> Result<FormData, ApiError> {
        let endpoint = "form-data";
        let response = self
            .client
            .get(self.url(&format!("/api/forms/{session_id}")))
            .send()
            .await
            .map_err(|e| ApiError::network(endpoint, e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(ApiError::http(endpoint, status.as_u16()));
        }

        response
            .json()
            .await
            .map_err(|e| ApiError::decode(endpoint, e.to_string()))
    }
}
