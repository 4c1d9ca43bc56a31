//! Shared test infrastructure for Kanban integration tests.
//!
//! Provides an in-process fake backend speaking the task REST surface, and a
//! TestEnv helper that points clients and boards at it.

#![allow(dead_code)]

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, put};
use axum::{Json, Router};
use chrono::{DateTime, Utc};
use kanban::{ApiConfig, Board, HttpApi, Status, Task, TaskId};
use serde_json::Value;
use std::sync::{Arc, Mutex};

/// Timestamp the fake backend stamps on created tasks.
pub const CREATED_AT: &str = "2024-01-01T00:00:00Z";

#[derive(Default)]
struct BackendState {
    tasks: Vec<Task>,
    next_id: u64,
    requests: Vec<String>,
    fail_next: Option<(StatusCode, String)>,
    list_body: Option<Value>,
    last_body: Option<Value>,
}

/// Scriptable in-memory task backend.
#[derive(Clone, Default)]
pub struct Backend {
    inner: Arc<Mutex<BackendState>>,
}

impl Backend {
    pub fn new() -> Self {
        let backend = Self::default();
        backend.inner.lock().unwrap().next_id = 1;
        backend
    }

    /// Seed a task with the next id.
    pub fn seed(&self, title: &str, status: Status) -> Task {
        let id = {
            let mut state = self.inner.lock().unwrap();
            state.next_id += 1;
            TaskId::Number(state.next_id - 1)
        };
        self.seed_with_id(id, title, status)
    }

    /// Seed a task under a caller-chosen id.
    pub fn seed_with_id(&self, id: TaskId, title: &str, status: Status) -> Task {
        let mut state = self.inner.lock().unwrap();
        let task = Task {
            id,
            title: title.to_string(),
            description: String::new(),
            status,
            created_at: Some(created_at()),
            updated_at: Some(created_at()),
        };
        state.tasks.push(task.clone());
        task
    }

    /// Fail the next request with the given status and body.
    pub fn fail_next(&self, status: u16, body: &str) {
        let status = StatusCode::from_u16(status).expect("valid status");
        self.inner.lock().unwrap().fail_next = Some((status, body.to_string()));
    }

    /// Answer list requests with this raw body instead of the task array.
    pub fn set_list_body(&self, body: Value) {
        self.inner.lock().unwrap().list_body = Some(body);
    }

    /// "METHOD /path" for every request served, in order.
    pub fn requests(&self) -> Vec<String> {
        self.inner.lock().unwrap().requests.clone()
    }

    pub fn request_count(&self) -> usize {
        self.inner.lock().unwrap().requests.len()
    }

    /// JSON body of the most recent create/update request.
    pub fn last_body(&self) -> Option<Value> {
        self.inner.lock().unwrap().last_body.clone()
    }

    pub fn tasks(&self) -> Vec<Task> {
        self.inner.lock().unwrap().tasks.clone()
    }

    /// Record a request and take a pending scripted failure, if any.
    fn begin(&self, request: String, body: Option<Value>) -> Option<Response> {
        let mut state = self.inner.lock().unwrap();
        state.requests.push(request);
        if body.is_some() {
            state.last_body = body;
        }
        state
            .fail_next
            .take()
            .map(|(status, body)| (status, body).into_response())
    }
}

fn created_at() -> DateTime<Utc> {
    CREATED_AT.parse().expect("valid timestamp")
}

fn parse_status(value: &Value) -> Option<Status> {
    match value.get("status").and_then(Value::as_str) {
        None | Some("") => Some(Status::Todo),
        Some(s) => s.parse().ok(),
    }
}

async fn list_tasks(State(backend): State<Backend>) -> Response {
    if let Some(failure) = backend.begin("GET /tasks".to_string(), None) {
        return failure;
    }

    let state = backend.inner.lock().unwrap();
    match &state.list_body {
        Some(body) => Json(body.clone()).into_response(),
        None => Json(state.tasks.clone()).into_response(),
    }
}

async fn create_task(State(backend): State<Backend>, Json(body): Json<Value>) -> Response {
    if let Some(failure) = backend.begin("POST /tasks".to_string(), Some(body.clone())) {
        return failure;
    }

    let title = body.get("title").and_then(Value::as_str).unwrap_or_default();
    if title.is_empty() {
        return (StatusCode::BAD_REQUEST, "Title is required").into_response();
    }
    let Some(status) = parse_status(&body) else {
        return (StatusCode::BAD_REQUEST, "Invalid status").into_response();
    };

    let mut state = backend.inner.lock().unwrap();
    let task = Task {
        id: TaskId::Number(state.next_id),
        title: title.to_string(),
        description: body
            .get("description")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string(),
        status,
        created_at: Some(created_at()),
        updated_at: Some(created_at()),
    };
    state.next_id += 1;
    state.tasks.push(task.clone());

    (StatusCode::CREATED, Json(task)).into_response()
}

/// Path ids arrive percent-decoded; numeric ones match numeric task ids.
fn path_id(raw: &str) -> TaskId {
    raw.parse().unwrap_or_else(|never| match never {})
}

async fn update_task(State(backend): State<Backend>, Path(raw): Path<String>, Json(body): Json<Value>) -> Response {
    let id = path_id(&raw);
    if let Some(failure) = backend.begin(format!("PUT /tasks/{}", id), Some(body.clone())) {
        return failure;
    }

    let incoming: Task = match serde_json::from_value(body) {
        Ok(task) => task,
        Err(_) => return (StatusCode::BAD_REQUEST, "Invalid JSON").into_response(),
    };

    let mut state = backend.inner.lock().unwrap();
    match state.tasks.iter_mut().find(|t| t.id == id) {
        Some(task) => {
            task.title = incoming.title;
            task.description = incoming.description;
            task.status = incoming.status;
            task.updated_at = Some(Utc::now());
            Json(task.clone()).into_response()
        }
        None => (StatusCode::NOT_FOUND, "Task not found").into_response(),
    }
}

async fn delete_task(State(backend): State<Backend>, Path(raw): Path<String>) -> Response {
    let id = path_id(&raw);
    if let Some(failure) = backend.begin(format!("DELETE /tasks/{}", id), None) {
        return failure;
    }

    let mut state = backend.inner.lock().unwrap();
    let before = state.tasks.len();
    state.tasks.retain(|t| t.id != id);
    if state.tasks.len() == before {
        return (StatusCode::NOT_FOUND, "Task not found").into_response();
    }
    StatusCode::NO_CONTENT.into_response()
}

/// Confirmation that always agrees.
pub fn accept(_: &str) -> bool {
    true
}

/// Confirmation that always declines.
pub fn decline(_: &str) -> bool {
    false
}

/// Test environment with a running fake backend.
pub struct TestEnv {
    pub backend: Backend,
    pub base_url: String,
}

impl TestEnv {
    /// Start a fake backend on an ephemeral port.
    pub async fn new() -> Self {
        let backend = Backend::new();
        let app = Router::new()
            .route("/tasks", get(list_tasks).post(create_task))
            .route("/tasks/:id", put(update_task).delete(delete_task))
            .with_state(backend.clone());

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind test listener");
        let addr = listener.local_addr().expect("Failed to read local addr");
        tokio::spawn(async move {
            axum::serve(listener, app).await.expect("Test backend failed");
        });

        Self {
            backend,
            base_url: format!("http://{}", addr),
        }
    }

    pub fn config(&self) -> ApiConfig {
        ApiConfig::new(&self.base_url)
    }

    pub fn api(&self) -> HttpApi {
        HttpApi::new(self.config())
    }

    /// Board whose delete confirmation always agrees.
    pub fn board(&self) -> Board<HttpApi, fn(&str) -> bool> {
        Board::new(self.api(), accept as fn(&str) -> bool)
    }

    /// Board whose delete confirmation always declines.
    pub fn declining_board(&self) -> Board<HttpApi, fn(&str) -> bool> {
        Board::new(self.api(), decline as fn(&str) -> bool)
    }
}

/// Base URL of a port nothing listens on.
pub async fn dead_url() -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind listener");
    let addr = listener.local_addr().expect("Failed to read local addr");
    drop(listener);
    format!("http://{}", addr)
}
