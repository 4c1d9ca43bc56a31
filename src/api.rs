//! HTTP client for the task backend.
//!
//! Four operations map onto the REST surface:
//! - `GET    {base}/tasks`      list
//! - `POST   {base}/tasks`      create
//! - `PUT    {base}/tasks/{id}` full-replace update
//! - `DELETE {base}/tasks/{id}` delete (204 on success)
//!
//! Each call is a single round trip with no retry and no timeout.

use crate::config::ApiConfig;
use crate::types::{Task, TaskId, TaskInput};
use async_trait::async_trait;
use log::{debug, warn};
use reqwest::{Client, RequestBuilder, StatusCode, Url};
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::fmt;

/// Errors returned by the API client.
#[derive(Debug, Clone, PartialEq)]
pub enum ApiError {
    /// The request could not complete (connection refused, DNS, broken body).
    Network(String),
    /// The backend answered with a non-success status.
    Request { status: u16, message: String },
    /// The backend answered successfully but the body had the wrong shape.
    InvalidResponse(String),
}

impl ApiError {
    /// Build a request error from a non-success status and its body.
    ///
    /// An empty body falls back to `HTTP error {status}`.
    pub fn request(status: u16, body: &str) -> Self {
        let message = if body.trim().is_empty() {
            format!("HTTP error {}", status)
        } else {
            body.to_string()
        };
        ApiError::Request { status, message }
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::Network(e) => write!(f, "network failure: {}", e),
            ApiError::Request { message, .. } => f.write_str(message),
            ApiError::InvalidResponse(e) => write!(f, "invalid response: {}", e),
        }
    }
}

impl std::error::Error for ApiError {}

/// The four backend operations the board depends on.
#[async_trait]
pub trait TaskApi: Send + Sync {
    /// Fetch every task, in backend order.
    async fn list_tasks(&self) -> Result<Vec<Task>, ApiError>;

    /// Create a task. The backend assigns id and timestamps.
    async fn create_task(&self, input: &TaskInput) -> Result<Task, ApiError>;

    /// Replace a task with the given full representation.
    async fn update_task(&self, id: &TaskId, task: &Task) -> Result<Task, ApiError>;

    /// Delete a task.
    async fn delete_task(&self, id: &TaskId) -> Result<(), ApiError>;
}

/// `TaskApi` over HTTP with JSON bodies.
pub struct HttpApi {
    client: Client,
    config: ApiConfig,
}

impl HttpApi {
    /// Create a client for the configured backend.
    pub fn new(config: ApiConfig) -> Self {
        Self {
            client: Client::new(),
            config,
        }
    }

    /// Single-task endpoint. A base URL that cannot take a path fails before any I/O.
    fn task_url(&self, id: &TaskId) -> Result<Url, ApiError> {
        self.config.task_url(id).map_err(|e| ApiError::Network(e.to_string()))
    }

    /// Send a request and return the body of a successful response.
    async fn send(&self, request: RequestBuilder) -> Result<(StatusCode, String), ApiError> {
        let response = request.send().await.map_err(|e| ApiError::Network(e.to_string()))?;

        let status = response.status();
        let body = response.text().await.map_err(|e| ApiError::Network(e.to_string()))?;
        debug!("<- {} ({} bytes)", status, body.len());

        if !status.is_success() {
            return Err(ApiError::request(status.as_u16(), &body));
        }

        Ok((status, body))
    }
}

fn decode<T: DeserializeOwned>(body: &str) -> Result<T, ApiError> {
    serde_json::from_str(body).map_err(|e| ApiError::InvalidResponse(e.to_string()))
}

/// Turn a list response into tasks.
///
/// A body that parses but is not an array is treated as an empty list.
pub fn normalize_task_list(value: Value) -> Result<Vec<Task>, ApiError> {
    match value {
        Value::Array(_) => serde_json::from_value(value).map_err(|e| ApiError::InvalidResponse(e.to_string())),
        other => {
            warn!("Task list response was not an array, treating as empty: {}", other);
            Ok(Vec::new())
        }
    }
}

#[async_trait]
impl TaskApi for HttpApi {
    async fn list_tasks(&self) -> Result<Vec<Task>, ApiError> {
        let url = self.config.tasks_url();
        debug!("-> GET {}", url);

        let (_, body) = self.send(self.client.get(&url)).await?;
        normalize_task_list(decode(&body)?)
    }

    async fn create_task(&self, input: &TaskInput) -> Result<Task, ApiError> {
        let url = self.config.tasks_url();
        debug!("-> POST {}", url);

        let (_, body) = self.send(self.client.post(&url).json(input)).await?;
        decode(&body)
    }

    async fn update_task(&self, id: &TaskId, task: &Task) -> Result<Task, ApiError> {
        let url = self.task_url(id)?;
        debug!("-> PUT {}", url);

        let (_, body) = self.send(self.client.put(url).json(task)).await?;
        decode(&body)
    }

    async fn delete_task(&self, id: &TaskId) -> Result<(), ApiError> {
        let url = self.task_url(id)?;
        debug!("-> DELETE {}", url);

        let (status, _) = self.send(self.client.delete(url)).await?;
        if status != StatusCode::NO_CONTENT {
            debug!("Delete answered {} instead of 204, body ignored", status);
        }
        Ok(())
    }
}
