//! Remote API
//!
//! HTTP bindings for the sync server. Sync code only sees `TaskRemote`.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::models::TaskItem;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("no server url configured")]
    MissingServer,
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("server responded with status {0}")]
    Status(u16),
}

/// Push/pull access to the authoritative task list
#[async_trait(?Send)]
pub trait TaskRemote {
    async fn push(&self, tasks: &[TaskItem], server_url: &str, token: &str) -> Result<(), ApiError>;
    async fn pull(&self, server_url: &str, token: &str) -> Result<Vec<TaskItem>, ApiError>;
}

// ========================
// Wire Types
// ========================

#[derive(Serialize)]
struct PushBody<'a> {
    tasks: &'a [TaskItem],
}

#[derive(Deserialize)]
struct PullBody {
    tasks: Vec<TaskItem>,
}

#[derive(Serialize)]
struct LoginArgs<'a> {
    username: &'a str,
    password: &'a str,
}

#[derive(Deserialize)]
struct LoginReply {
    token: String,
}

fn endpoint(server_url: &str, path: &str) -> Result<String, ApiError> {
    let base = server_url.trim().trim_end_matches('/');
    if base.is_empty() {
        return Err(ApiError::MissingServer);
    }
    Ok(format!("{}/api/{}", base, path))
}

fn check_status(response: reqwest::Response) -> Result<reqwest::Response, ApiError> {
    let status = response.status();
    if status.is_success() {
        Ok(response)
    } else {
        Err(ApiError::Status(status.as_u16()))
    }
}

// ========================
// HTTP Client
// ========================

#[derive(Clone, Debug, Default)]
pub struct HttpRemote {
    client: reqwest::Client,
}

impl HttpRemote {
    pub fn new() -> Self {
        Self::default()
    }

    /// Exchange credentials for an auth token
    pub async fn login(&self, server_url: &str, username: &str, password: &str) -> Result<String, ApiError> {
        let url = endpoint(server_url, "login")?;
        let response = self
            .client
            .post(url)
            .json(&LoginArgs { username, password })
            .send()
            .await?;
        let reply: LoginReply = check_status(response)?.json().await?;
        Ok(reply.token)
    }
}

#[async_trait(?Send)]
impl TaskRemote for HttpRemote {
    async fn push(&self, tasks: &[TaskItem], server_url: &str, token: &str) -> Result<(), ApiError> {
        let url = endpoint(server_url, "tasks")?;
        let response = self
            .client
            .post(url)
            .bearer_auth(token)
            .json(&PushBody { tasks })
            .send()
            .await?;
        check_status(response)?;
        tracing::debug!(count = tasks.len(), "pushed tasks");
        Ok(())
    }

    async fn pull(&self, server_url: &str, token: &str) -> Result<Vec<TaskItem>, ApiError> {
        let url = endpoint(server_url, "tasks")?;
        let response = self.client.get(url).bearer_auth(token).send().await?;
        let body: PullBody = check_status(response)?.json().await?;
        tracing::debug!(count = body.tasks.len(), "pulled tasks");
        Ok(body.tasks)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoint_joins_paths() {
        assert_eq!(endpoint("https://sync.example/", "tasks").unwrap(), "https://sync.example/api/tasks");
        assert_eq!(endpoint(" https://sync.example ", "login").unwrap(), "https://sync.example/api/login");
        assert!(matches!(endpoint("  ", "tasks"), Err(ApiError::MissingServer)));
    }

    #[test]
    fn test_pull_body_shape() {
        let body: PullBody =
            serde_json::from_str(r#"{"tasks":[{"id":1,"tag":"@a","title":"x","status":3}]}"#).unwrap();
        assert_eq!(body.tasks.len(), 1);

        let tasks = vec![TaskItem::new(1, "@a", "x", 0)];
        let json = serde_json::to_value(PushBody { tasks: &tasks }).unwrap();
        assert_eq!(json["tasks"][0]["status"], serde_json::json!(3));
    }
}
