//! Task service: the REST API in front of a task store.
//!
//! Handlers are stateless; each request maps onto exactly one store call.
//! Store failures are logged here and answered with a generic 500 so no
//! internal detail reaches the caller.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, put},
    Json, Router,
};
use serde_json::json;
use tokio::net::TcpListener;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::db::TaskStore;
use crate::error::StoreError;
use crate::task::{NewTask, Task, TaskPatch};

/// Mount point of the task routes.
pub const TASKS_PATH: &str = "/api/tasks";

/// Shared handler state.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn TaskStore>,
}

/// Error response of the task routes.
#[derive(Debug)]
pub enum ApiError {
    BadRequest(String),
    NotFound,
    Internal,
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::Validation(message) => ApiError::BadRequest(message),
            StoreError::NotFound(_) => ApiError::NotFound,
            other => {
                tracing::error!(error = %other, "task store failure");
                ApiError::Internal
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::BadRequest(message) => (StatusCode::BAD_REQUEST, message),
            ApiError::NotFound => (StatusCode::NOT_FOUND, "Task not found".to_string()),
            ApiError::Internal => (StatusCode::INTERNAL_SERVER_ERROR, "Server error".to_string()),
        };
        (status, Json(json!({ "error": message }))).into_response()
    }
}

/// Build the application router over `store`.
pub fn router(store: Arc<dyn TaskStore>) -> Router {
    let tasks = Router::new()
        .route("/", get(list_tasks).post(create_task))
        .route("/:id", put(update_task).delete(delete_task));

    Router::new()
        .route("/", get(health))
        .nest(TASKS_PATH, tasks)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(AppState { store })
}

/// Bind `addr` and serve until the process is stopped.
pub async fn serve(store: Arc<dyn TaskStore>, addr: SocketAddr) -> std::io::Result<()> {
    let listener = TcpListener::bind(addr).await?;
    tracing::info!("Kanban API listening on http://{}{}", listener.local_addr()?, TASKS_PATH);
    axum::serve(listener, router(store)).await
}

async fn health() -> &'static str {
    "Kanban API running"
}

async fn list_tasks(State(state): State<AppState>) -> Result<Json<Vec<Task>>, ApiError> {
    Ok(Json(state.store.list_all()?))
}

async fn create_task(
    State(state): State<AppState>,
    Json(new): Json<NewTask>,
) -> Result<Json<Task>, ApiError> {
    let task = state.store.create(new)?;
    tracing::info!(id = task.id, "task created");
    Ok(Json(task))
}

async fn update_task(
    State(state): State<AppState>,
    Path(id): Path<u64>,
    Json(patch): Json<TaskPatch>,
) -> Result<Json<Task>, ApiError> {
    Ok(Json(state.store.update_by_id(id, patch)?))
}

/// Deleting an id that does not exist still answers with the confirmation.
async fn delete_task(
    State(state): State<AppState>,
    Path(id): Path<u64>,
) -> Result<Json<serde_json::Value>, ApiError> {
    match state.store.delete_by_id(id) {
        Ok(()) => tracing::info!(id, "task deleted"),
        Err(StoreError::NotFound(_)) => tracing::debug!(id, "delete of unknown task"),
        Err(err) => return Err(err.into()),
    }
    Ok(Json(json!({ "message": "Task deleted" })))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::FileStore;
    use crate::error::StoreResult;
    use crate::fields::Status;
    use axum::body::Body;
    use axum::http::{header, Method, Request};
    use serde_json::Value;
    use tower::ServiceExt;

    /// Store whose backing storage is always unavailable.
    struct BrokenStore;

    impl TaskStore for BrokenStore {
        fn create(&self, _new: NewTask) -> StoreResult<Task> {
            Err(StoreError::Storage("disk on fire".into()))
        }
        fn list_all(&self) -> StoreResult<Vec<Task>> {
            Err(StoreError::Storage("disk on fire".into()))
        }
        fn update_by_id(&self, _id: u64, _patch: TaskPatch) -> StoreResult<Task> {
            Err(StoreError::Storage("disk on fire".into()))
        }
        fn delete_by_id(&self, _id: u64) -> StoreResult<()> {
            Err(StoreError::Storage("disk on fire".into()))
        }
    }

    async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        let body = match body {
            Some(v) => {
                builder = builder.header(header::CONTENT_TYPE, "application/json");
                Body::from(v.to_string())
            }
            None => Body::empty(),
        };
        let response = app.clone().oneshot(builder.body(body).unwrap()).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, value)
    }

    fn app() -> Router {
        router(Arc::new(FileStore::in_memory()))
    }

    #[tokio::test]
    async fn test_list_empty_is_not_an_error() {
        let (status, body) = send(&app(), Method::GET, "/api/tasks", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!([]));
    }

    #[tokio::test]
    async fn test_create_with_defaults() {
        let app = app();
        let (status, body) =
            send(&app, Method::POST, "/api/tasks", Some(json!({ "title": "Write spec" }))).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["title"], "Write spec");
        assert_eq!(body["status"], "todo");
        assert_eq!(body["description"], "");
        assert!(body["id"].is_u64());
        assert!(body["created_at"].is_string());

        let (_, list) = send(&app, Method::GET, "/api/tasks", None).await;
        assert_eq!(list.as_array().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_create_requires_title() {
        let app = app();
        let (status, body) =
            send(&app, Method::POST, "/api/tasks", Some(json!({ "description": "x" }))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "Title is required");

        let (status, _) = send(&app, Method::POST, "/api/tasks", Some(json!({ "title": "" }))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (_, list) = send(&app, Method::GET, "/api/tasks", None).await;
        assert_eq!(list, json!([]));
    }

    #[tokio::test]
    async fn test_create_rejects_unknown_status() {
        let (status, _) = send(
            &app(),
            Method::POST,
            "/api/tasks",
            Some(json!({ "title": "t", "status": "blocked" })),
        )
        .await;
        assert!(status.is_client_error());
    }

    #[tokio::test]
    async fn test_update_is_partial() {
        let app = app();
        let (_, created) = send(
            &app,
            Method::POST,
            "/api/tasks",
            Some(json!({ "title": "t", "description": "d" })),
        )
        .await;
        let uri = format!("/api/tasks/{}", created["id"]);

        let (status, body) = send(&app, Method::PUT, &uri, Some(json!({ "title": "t2" }))).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["title"], "t2");
        assert_eq!(body["description"], "d");

        let (_, body) = send(&app, Method::PUT, &uri, Some(json!({ "status": "done" }))).await;
        assert_eq!(body["status"], Status::Done.as_str());
        assert_eq!(body["title"], "t2");
    }

    #[tokio::test]
    async fn test_update_unknown_id_is_not_found() {
        let (status, body) =
            send(&app(), Method::PUT, "/api/tasks/42", Some(json!({ "status": "done" }))).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"], "Task not found");
    }

    #[tokio::test]
    async fn test_delete_is_idempotent() {
        let app = app();
        let (_, first) = send(&app, Method::POST, "/api/tasks", Some(json!({ "title": "a" }))).await;
        let (_, second) = send(&app, Method::POST, "/api/tasks", Some(json!({ "title": "b" }))).await;
        let uri = format!("/api/tasks/{}", first["id"]);

        let (status, body) = send(&app, Method::DELETE, &uri, None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["message"], "Task deleted");

        let (_, list) = send(&app, Method::GET, "/api/tasks", None).await;
        assert_eq!(list, json!([second]));

        let (status, body) = send(&app, Method::DELETE, &uri, None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["message"], "Task deleted");
    }

    #[tokio::test]
    async fn test_storage_failures_are_generic() {
        let app = router(Arc::new(BrokenStore));
        for (method, uri, body) in [
            (Method::GET, "/api/tasks", None),
            (Method::POST, "/api/tasks", Some(json!({ "title": "t" }))),
            (Method::PUT, "/api/tasks/1", Some(json!({ "title": "t" }))),
            (Method::DELETE, "/api/tasks/1", None),
        ] {
            let (status, body) = send(&app, method, uri, body).await;
            assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
            assert_eq!(body, json!({ "error": "Server error" }));
        }
    }

    #[tokio::test]
    async fn test_health() {
        let response = app()
            .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
            .await
            .unwrap();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        assert_eq!(&bytes[..], b"Kanban API running");
    }
}
