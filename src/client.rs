//! HTTP client for the task service.
//!
//! `TaskApi` is the seam the client state manager talks to; `HttpTaskApi`
//! is the reqwest implementation used by the board and the CLI commands.

use async_trait::async_trait;
use reqwest::{Response, StatusCode};
use serde::Deserialize;

use crate::error::ClientError;
use crate::task::{NewTask, Task, TaskPatch};

/// Result type for client operations
pub type ClientResult<T> = std::result::Result<T, ClientError>;

/// The four request/response round trips the service offers.
#[async_trait]
pub trait TaskApi: Send + Sync {
    async fn list(&self) -> ClientResult<Vec<Task>>;

    async fn create(&self, new: &NewTask) -> ClientResult<Task>;

    async fn update(&self, id: u64, patch: &TaskPatch) -> ClientResult<Task>;

    async fn delete(&self, id: u64) -> ClientResult<String>;
}

#[derive(Deserialize)]
struct ErrorBody {
    error: String,
}

#[derive(Deserialize)]
struct MessageBody {
    message: String,
}

/// reqwest-backed `TaskApi`.
#[derive(Debug, Clone)]
pub struct HttpTaskApi {
    http: reqwest::Client,
    base: String,
}

impl HttpTaskApi {
    /// `base` is the task collection URL, e.g. `http://127.0.0.1:5000/api/tasks`.
    pub fn new(base: impl Into<String>) -> Self {
        let base = base.into().trim_end_matches('/').to_string();
        HttpTaskApi {
            http: reqwest::Client::new(),
            base,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base
    }

    fn item_url(&self, id: u64) -> String {
        format!("{}/{}", self.base, id)
    }
}

/// Turn a non-success response into a `ClientError`, passing successes through.
async fn check(response: Response) -> ClientResult<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let text = response.text().await.unwrap_or_default();
    let message = serde_json::from_str::<ErrorBody>(&text)
        .map(|b| b.error)
        .unwrap_or(text);
    Err(ClientError::Api {
        status: status.as_u16(),
        message,
    })
}

#[async_trait]
impl TaskApi for HttpTaskApi {
    async fn list(&self) -> ClientResult<Vec<Task>> {
        let response = check(self.http.get(&self.base).send().await?).await?;
        Ok(response.json().await?)
    }

    async fn create(&self, new: &NewTask) -> ClientResult<Task> {
        let response = check(self.http.post(&self.base).json(new).send().await?).await?;
        Ok(response.json().await?)
    }

    async fn update(&self, id: u64, patch: &TaskPatch) -> ClientResult<Task> {
        let response = self.http.put(self.item_url(id)).json(patch).send().await?;
        if response.status() == StatusCode::NOT_FOUND {
            return Err(ClientError::NotFound(id));
        }
        // A `null` body also means the id is unknown.
        let task: Option<Task> = check(response).await?.json().await?;
        task.ok_or(ClientError::NotFound(id))
    }

    async fn delete(&self, id: u64) -> ClientResult<String> {
        let response = check(self.http.delete(self.item_url(id)).send().await?).await?;
        let body: MessageBody = response.json().await?;
        Ok(body.message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::FileStore;
    use crate::fields::Status;
    use crate::service::{router, TASKS_PATH};
    use std::sync::Arc;
    use tokio::net::TcpListener;

    async fn spawn_service() -> HttpTaskApi {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let app = router(Arc::new(FileStore::in_memory()));
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        HttpTaskApi::new(format!("http://{addr}{TASKS_PATH}/"))
    }

    #[tokio::test]
    async fn test_round_trips_against_live_service() {
        let api = spawn_service().await;
        assert!(api.list().await.unwrap().is_empty());

        let created = api
            .create(&NewTask::new("Write spec").with_description("draft"))
            .await
            .unwrap();
        assert_eq!(created.status, Status::Todo);

        let moved = api
            .update(created.id, &TaskPatch::status(Status::Done))
            .await
            .unwrap();
        assert_eq!(moved.status, Status::Done);
        assert_eq!(moved.description, "draft");

        assert_eq!(api.delete(created.id).await.unwrap(), "Task deleted");
        assert!(api.list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_errors_are_decoded() {
        let api = spawn_service().await;

        let err = api.create(&NewTask::default()).await.unwrap_err();
        match err {
            ClientError::Api { status, message } => {
                assert_eq!(status, 400);
                assert_eq!(message, "Title is required");
            }
            other => panic!("unexpected error: {other:?}"),
        }

        let err = api.update(77, &TaskPatch::status(Status::Done)).await.unwrap_err();
        assert!(matches!(err, ClientError::NotFound(77)));
    }

    #[tokio::test]
    async fn test_unreachable_service_is_http_error() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let api = HttpTaskApi::new(format!("http://{addr}{TASKS_PATH}"));
        assert!(matches!(api.list().await, Err(ClientError::Http(_))));
    }
}
