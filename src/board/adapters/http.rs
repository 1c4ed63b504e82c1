//! `reqwest` adapter for the task store API.

use crate::board::domain::{NewTaskPayload, StatusMove, TaskEdit};
use crate::board::ports::{TaskApi, TaskApiError, TaskApiErrorKind, TaskApiResult};
use crate::config::BoardConfig;
use crate::task::domain::{Task, TaskId, TaskQuery};
use async_trait::async_trait;
use serde::de::DeserializeOwned;

const BODY_PREVIEW_LIMIT: usize = 512;

/// Task API client over HTTP/JSON.
#[derive(Debug, Clone)]
pub struct HttpTaskApi {
    http: reqwest::Client,
    base_url: String,
}

impl HttpTaskApi {
    /// Creates a client for the configured base URL.
    ///
    /// # Errors
    ///
    /// Returns a [`TaskApiErrorKind::Request`] error when the HTTP client
    /// cannot be initialised.
    pub fn new(config: &BoardConfig) -> TaskApiResult<Self> {
        let http = reqwest::Client::builder()
            .build()
            .map_err(|err| TaskApiError::new(TaskApiErrorKind::Request, err.to_string()))?;
        Ok(Self::with_client(http, config))
    }

    /// Creates a client reusing an existing `reqwest` client.
    #[must_use]
    pub fn with_client(http: reqwest::Client, config: &BoardConfig) -> Self {
        Self {
            http,
            base_url: config.api_base_url.clone(),
        }
    }

    fn tasks_url(&self) -> String {
        format!("{}/tasks", self.base_url)
    }

    fn task_url(&self, id: TaskId, suffix: &str) -> String {
        format!("{}/tasks/{id}{suffix}", self.base_url)
    }
}

/// Query string for a list request: sort and search always, filters only
/// when set.
fn list_params(query: &TaskQuery) -> Vec<(&'static str, String)> {
    let filter = query.filter();
    let sort = query.sort();
    let mut params = vec![
        ("sortBy", sort.field.as_str().to_owned()),
        ("sortOrder", sort.direction.as_str().to_owned()),
        ("search", filter.search().unwrap_or_default().to_owned()),
    ];
    if let Some(priority) = filter.priority() {
        params.push(("priority", priority.as_str().to_owned()));
    }
    if let Some(subject) = filter.subject() {
        params.push(("subject", subject.as_str().to_owned()));
    }
    if let Some(status) = filter.status() {
        params.push(("status", status.as_str().to_owned()));
    }
    params
}

#[async_trait]
impl TaskApi for HttpTaskApi {
    async fn list(&self, query: &TaskQuery) -> TaskApiResult<Vec<Task>> {
        let url = self.tasks_url();
        tracing::debug!(url = %url, "fetching tasks");
        let request = self.http.get(&url).query(&list_params(query));
        send_json(request, url).await
    }

    async fn create(&self, payload: &NewTaskPayload) -> TaskApiResult<Task> {
        let url = self.tasks_url();
        send_json(self.http.post(&url).json(payload), url).await
    }

    async fn update(&self, id: TaskId, edit: &TaskEdit) -> TaskApiResult<Task> {
        let url = self.task_url(id, "");
        send_json(self.http.put(&url).json(edit), url).await
    }

    async fn patch_status(&self, change: &StatusMove) -> TaskApiResult<Task> {
        let url = self.task_url(change.task_id, "/status");
        send_json(self.http.patch(&url).json(change), url).await
    }

    async fn toggle(&self, id: TaskId) -> TaskApiResult<Task> {
        let url = self.task_url(id, "/toggle");
        send_json(self.http.patch(&url), url).await
    }

    async fn delete(&self, id: TaskId) -> TaskApiResult<()> {
        let url = self.task_url(id, "");
        read_success(self.http.delete(&url), url).await.map(drop)
    }
}

async fn send_json<T: DeserializeOwned>(
    request: reqwest::RequestBuilder,
    url: String,
) -> TaskApiResult<T> {
    let (status, body) = read_success(request, url.clone()).await?;
    serde_json::from_str::<T>(&body).map_err(|err| {
        TaskApiError::new(
            TaskApiErrorKind::Decode,
            format!(
                "failed to decode response body: {err} | body={}",
                preview_body(&body)
            ),
        )
        .with_status(status)
        .with_url(url)
    })
}

/// Sends the request and returns the status and body of a 2xx response.
async fn read_success(
    request: reqwest::RequestBuilder,
    url: String,
) -> TaskApiResult<(u16, String)> {
    let response = request
        .send()
        .await
        .map_err(|err| from_reqwest(&err, &url))?;
    let status = response.status();
    let body = response
        .text()
        .await
        .map_err(|err| from_reqwest(&err, &url))?;

    if !status.is_success() {
        return Err(
            TaskApiError::new(TaskApiErrorKind::Status, error_message(&body))
                .with_status(status.as_u16())
                .with_url(url),
        );
    }
    Ok((status.as_u16(), body))
}

fn from_reqwest(err: &reqwest::Error, url: &str) -> TaskApiError {
    let kind = if err.is_timeout() {
        TaskApiErrorKind::Timeout
    } else if err.is_connect() {
        TaskApiErrorKind::Connect
    } else if err.is_decode() || err.is_body() {
        TaskApiErrorKind::Decode
    } else {
        TaskApiErrorKind::Request
    };
    let error = TaskApiError::new(kind, err.to_string()).with_url(url);
    match err.status() {
        Some(status) => error.with_status(status.as_u16()),
        None => error,
    }
}

/// Extracts the API's `error` message, falling back to a body preview.
fn error_message(body: &str) -> String {
    serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|value| value.get("error")?.as_str().map(str::to_owned))
        .unwrap_or_else(|| preview_body(body))
}

fn preview_body(body: &str) -> String {
    let trimmed = body.trim();
    if trimmed.is_empty() {
        return "<empty body>".to_owned();
    }
    let mut preview: String = trimmed.chars().take(BODY_PREVIEW_LIMIT).collect();
    if trimmed.chars().count() > BODY_PREVIEW_LIMIT {
        preview.push_str("...");
    }
    preview
}
