//! Integration tests for the HTTP backend client
//!
//! These tests run `HttpFormsClient` against an in-process axum server
//! implementing the forms contract:
//! - happy paths for init, save-answer, submit, and read-back
//! - non-2xx statuses mapping to `ApiError::Http`
//! - unreachable servers mapping to `ApiError::Network`
//!
//! The server binds an ephemeral port, so tests run in parallel without
//! conflicts and need no environment setup.

use std::collections::{BTreeMap, HashMap};
use std::sync::{Arc, Mutex};

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::Deserialize;
use serde_json::{json, Value};

use intake::api::{ApiError, FormsBackend, HttpFormsClient};
use intake::form::QuestionId;

// ─── Test server ──────────────────────────────────────────────────────────────

#[derive(Default, Clone)]
struct SessionRecord {
    submitted: bool,
    answers: BTreeMap<u8, String>,
}

#[derive(Default)]
struct ServerState {
    sessions: Mutex<HashMap<String, SessionRecord>>,
}

#[derive(Deserialize)]
struct SaveAnswerBody {
    session_id: String,
    question_number: u8,
    answer: String,
}

#[derive(Deserialize)]
struct SubmitBody {
    session_id: String,
}

async fn init(State(state): State<Arc<ServerState>>) -> Json<Value> {
    let session_id = uuid::Uuid::new_v4().to_string();
    state
        .sessions
        .lock()
        .unwrap()
        .insert(session_id.clone(), SessionRecord::default());

    Json(json!({
        "session_id": session_id,
        "message": "Form session initialized"
    }))
}

async fn save_answer(
    State(state): State<Arc<ServerState>>,
    Json(body): Json<SaveAnswerBody>,
) -> Result<Json<Value>, StatusCode> {
    let mut sessions = state.sessions.lock().unwrap();
    let Some(record) = sessions.get_mut(&body.session_id) else {
        return Err(StatusCode::NOT_FOUND);
    };

    record.answers.insert(body.question_number, body.answer);
    Ok(Json(json!({ "status": "success" })))
}

async fn submit(
    State(state): State<Arc<ServerState>>,
    Json(body): Json<SubmitBody>,
) -> Result<Json<Value>, StatusCode> {
    let mut sessions = state.sessions.lock().unwrap();
    let Some(record) = sessions.get_mut(&body.session_id) else {
        return Err(StatusCode::NOT_FOUND);
    };

    record.submitted = true;
    Ok(Json(json!({ "status": "success" })))
}

async fn form_data(
    State(state): State<Arc<ServerState>>,
    Path(session_id): Path<String>,
) -> Result<Json<Value>, StatusCode> {
    let sessions = state.sessions.lock().unwrap();
    let Some(record) = sessions.get(&session_id) else {
        return Err(StatusCode::NOT_FOUND);
    };

    let answers: Vec<Value> = record
        .answers
        .iter()
        .map(|(number, answer)| json!({ "question_number": number, "answer": answer }))
        .collect();

    Ok(Json(json!({
        "session_id": session_id,
        "is_submitted": i32::from(record.submitted),
        "answers": answers,
    })))
}

/// Start the contract server on an ephemeral port, returning a base URL.
async fn spawn_server() -> String {
    let state = Arc::new(ServerState::default());
    let app = Router::new()
        .route("/api/forms/init", post(init))
        .route("/api/forms/save-answer", post(save_answer))
        .route("/api/forms/submit", post(submit))
        .route("/api/forms/:session_id", get(form_data))
        .with_state(state);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind test server");
    let addr = listener.local_addr().expect("Failed to read local addr");

    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("Server crashed");
    });

    format!("http://{addr}")
}

// ─── Tests ────────────────────────────────────────────────────────────────────

#[tokio::test]
async fn init_returns_a_fresh_session_id() {
    let base_url = spawn_server().await;
    let client = HttpFormsClient::new(&base_url).unwrap();

    let session_id = client.init_session().await.unwrap();
    assert!(!session_id.is_empty());

    let data = client.form_data(&session_id).await.unwrap();
    assert_eq!(data.session_id, session_id);
    assert!(!data.submitted());
    assert!(data.answers.is_empty());
}

#[tokio::test]
async fn saved_answers_read_back_in_question_order() {
    let base_url = spawn_server().await;
    let client = HttpFormsClient::new(&base_url).unwrap();

    let session_id = client.init_session().await.unwrap();
    client
        .save_answer(&session_id, QuestionId::Email, "alice@x.com")
        .await
        .unwrap();
    client
        .save_answer(&session_id, QuestionId::Name, "Alice")
        .await
        .unwrap();

    let data = client.form_data(&session_id).await.unwrap();
    let numbers: Vec<u8> = data.answers.iter().map(|a| a.question_number).collect();
    assert_eq!(numbers, vec![1, 2]);
    assert_eq!(data.answers[0].answer, "Alice");
}

#[tokio::test]
async fn resaving_a_question_overwrites_the_answer() {
    let base_url = spawn_server().await;
    let client = HttpFormsClient::new(&base_url).unwrap();

    let session_id = client.init_session().await.unwrap();
    client
        .save_answer(&session_id, QuestionId::Name, "Alise")
        .await
        .unwrap();
    client
        .save_answer(&session_id, QuestionId::Name, "Alice")
        .await
        .unwrap();

    let data = client.form_data(&session_id).await.unwrap();
    assert_eq!(data.answers.len(), 1);
    assert_eq!(data.answers[0].answer, "Alice");
}

#[tokio::test]
async fn submit_marks_the_session_submitted() {
    let base_url = spawn_server().await;
    let client = HttpFormsClient::new(&base_url).unwrap();

    let session_id = client.init_session().await.unwrap();
    client.submit(&session_id).await.unwrap();

    let data = client.form_data(&session_id).await.unwrap();
    assert!(data.submitted());
}

#[tokio::test]
async fn unknown_sessions_map_to_http_errors() {
    let base_url = spawn_server().await;
    let client = HttpFormsClient::new(&base_url).unwrap();

    let err = client
        .save_answer("no-such-session", QuestionId::Name, "Alice")
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        ApiError::Http {
            endpoint: "save-answer",
            status: 404
        }
    ));

    let err = client.submit("no-such-session").await.unwrap_err();
    assert_eq!(err.status(), Some(404));
}

#[tokio::test]
async fn unreachable_servers_map_to_network_errors() {
    // Nothing listens on port 1
    let client = HttpFormsClient::new("http://127.0.0.1:1").unwrap();

    let err = client.init_session().await.unwrap_err();
    assert!(matches!(err, ApiError::Network { .. }));
    assert_eq!(err.endpoint(), "init");
}
