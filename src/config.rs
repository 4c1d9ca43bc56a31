//! Backend endpoint configuration.

use crate::types::TaskId;
use reqwest::Url;
use std::fmt;

/// Environment variable that overrides the backend base URL.
pub const API_URL_ENV: &str = "KANBAN_API_URL";

/// Base URL used when no override is given.
pub const DEFAULT_API_URL: &str = "http://localhost:8080";

/// The base URL cannot carry a task path.
#[derive(Debug, Clone, PartialEq)]
pub struct InvalidBaseUrl(pub String);

impl fmt::Display for InvalidBaseUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid base URL '{}'", self.0)
    }
}

impl std::error::Error for InvalidBaseUrl {}

/// Configuration for the API client.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiConfig {
    /// Base URL without a trailing slash
    pub base_url: String,
}

impl ApiConfig {
    /// Create config for the given base URL.
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into();
        Self {
            base_url: base_url.trim().trim_end_matches('/').to_string(),
        }
    }

    /// Use `explicit` if given, else the environment, else the local default.
    pub fn from_env(explicit: Option<&str>) -> Self {
        Self::resolve(explicit, std::env::var(API_URL_ENV).ok().as_deref())
    }

    /// Pick the first non-blank of an explicit override, then the environment value,
    /// then the default.
    pub fn resolve(explicit: Option<&str>, env_value: Option<&str>) -> Self {
        let chosen = [explicit, env_value]
            .into_iter()
            .flatten()
            .find(|v| !v.trim().is_empty())
            .unwrap_or(DEFAULT_API_URL);
        Self::new(chosen)
    }

    /// Collection endpoint.
    pub fn tasks_url(&self) -> String {
        format!("{}/tasks", self.base_url)
    }

    /// Endpoint for a single task. The id is one percent-encoded path segment.
    pub fn task_url(&self, id: &TaskId) -> Result<Url, InvalidBaseUrl> {
        let invalid = || InvalidBaseUrl(self.base_url.clone());
        let mut url = Url::parse(&self.tasks_url()).map_err(|_| invalid())?;
        url.path_segments_mut()
            .map_err(|_| invalid())?
            .push(&id.to_string());
        Ok(url)
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self::new(DEFAULT_API_URL)
    }
}
