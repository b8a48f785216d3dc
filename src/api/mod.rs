//! JSON API routes: content listings and the contact mail endpoint

use axum::{
    body::Bytes,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::Serialize;
use std::sync::Arc;

use crate::contact::{ContactMessage, SendEmailResponse};
use crate::content::{ContentError, Project, Writing};
use crate::server::ServerState;

/// Routes mounted under `/api`
pub fn router() -> Router<Arc<ServerState>> {
    Router::new()
        .route("/projects", get(projects_handler))
        .route("/writings", get(writings_handler))
        .route("/send-email", post(send_email_handler))
}

/// Body of a failed content request
#[derive(Debug, Serialize)]
struct ErrorBody {
    error: &'static str,
    details: String,
}

/// Content API failures
#[derive(Debug)]
pub enum ApiError {
    Projects(ContentError),
    Writings(ContentError),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (error, source) = match self {
            ApiError::Projects(source) => ("Failed to load projects", source),
            ApiError::Writings(source) => ("Failed to load blogs", source),
        };
        tracing::error!("{}: {}", error, source);

        let body = ErrorBody {
            error,
            details: source.to_string(),
        };
        (StatusCode::INTERNAL_SERVER_ERROR, Json(body)).into_response()
    }
}

/// GET /api/projects
async fn projects_handler(
    State(state): State<Arc<ServerState>>,
) -> Result<Json<Vec<Project>>, ApiError> {
    let projects = state.store.load_projects().await.map_err(ApiError::Projects)?;
    Ok(Json(projects))
}

/// GET /api/writings
async fn writings_handler(
    State(state): State<Arc<ServerState>>,
) -> Result<Json<Vec<Writing>>, ApiError> {
    let writings = state.store.load_writings().await.map_err(ApiError::Writings)?;
    Ok(Json(writings))
}

/// POST /api/send-email
async fn send_email_handler(State(state): State<Arc<ServerState>>, body: Bytes) -> Response {
    let message: ContactMessage = match serde_json::from_slice(&body) {
        Ok(message) => message,
        Err(e) => {
            tracing::error!("Error sending email: invalid request body: {}", e);
            return envelope(
                StatusCode::INTERNAL_SERVER_ERROR,
                SendEmailResponse::failed("Failed to send email"),
            );
        }
    };

    if message.is_missing_message() {
        return envelope(
            StatusCode::BAD_REQUEST,
            SendEmailResponse::failed("Message is required"),
        );
    }

    match state.mailer.send(message.to_mail()).await {
        Ok(()) => {
            tracing::info!("Contact message sent");
            envelope(StatusCode::OK, SendEmailResponse::ok())
        }
        Err(e) => {
            tracing::error!("Error sending email: {}", e);
            envelope(
                StatusCode::INTERNAL_SERVER_ERROR,
                SendEmailResponse::failed("Failed to send email"),
            )
        }
    }
}

fn envelope(status: StatusCode, body: SendEmailResponse) -> Response {
    (status, Json(body)).into_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::server::test_support::{state_with, RecordingMailer};
    use axum::body::{to_bytes, Body};
    use axum::http::{header, Request};
    use std::fs;
    use tempfile::TempDir;
    use tower::ServiceExt;

    fn app(state: Arc<ServerState>) -> Router {
        Router::new().nest("/api", router()).with_state(state)
    }

    async fn json_body(response: Response) -> serde_json::Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    fn post_json(uri: &str, body: &str) -> Request<Body> {
        Request::post(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    #[tokio::test]
    async fn test_projects_sorted_desc() {
        let dir = TempDir::new().unwrap();
        fs::create_dir_all(dir.path().join("public")).unwrap();
        fs::write(
            dir.path().join("public/projects.json"),
            r#"[{"id": 2, "title": "B", "desc": "", "github": "g"},
                {"id": 5, "title": "E", "desc": "", "github": "g"},
                {"id": 3, "title": "C", "desc": "", "github": "g"}]"#,
        )
        .unwrap();

        let (state, _) = state_with(dir.path(), RecordingMailer::accepting());
        let response = app(state)
            .oneshot(Request::get("/api/projects").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = json_body(response).await;
        let ids: Vec<i64> = body
            .as_array()
            .unwrap()
            .iter()
            .map(|p| p["id"].as_i64().unwrap())
            .collect();
        assert_eq!(ids, vec![5, 3, 2]);
    }

    #[tokio::test]
    async fn test_projects_missing_file_is_500() {
        let dir = TempDir::new().unwrap();
        let (state, _) = state_with(dir.path(), RecordingMailer::accepting());
        let response = app(state)
            .oneshot(Request::get("/api/projects").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body = json_body(response).await;
        assert_eq!(body["error"], "Failed to load projects");
        assert!(body["details"].is_string());
    }

    #[tokio::test]
    async fn test_writings_unwrapped_and_sorted() {
        let dir = TempDir::new().unwrap();
        fs::create_dir_all(dir.path().join("public")).unwrap();
        fs::write(
            dir.path().join("public/writings.json"),
            r#"{"posts": [
                {"id": 1, "title": "First", "desc": "", "date": "2023-01-01"},
                {"id": 8, "title": "Latest", "desc": "", "date": "2024-06-01"}
            ]}"#,
        )
        .unwrap();

        let (state, _) = state_with(dir.path(), RecordingMailer::accepting());
        let response = app(state)
            .oneshot(Request::get("/api/writings").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = json_body(response).await;
        assert_eq!(body[0]["id"], 8);
        assert_eq!(body[1]["id"], 1);
    }

    #[tokio::test]
    async fn test_writings_without_posts_is_empty_array() {
        let dir = TempDir::new().unwrap();
        fs::create_dir_all(dir.path().join("public")).unwrap();
        fs::write(dir.path().join("public/writings.json"), "{}").unwrap();

        let (state, _) = state_with(dir.path(), RecordingMailer::accepting());
        let response = app(state)
            .oneshot(Request::get("/api/writings").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(json_body(response).await, serde_json::json!([]));
    }

    #[tokio::test]
    async fn test_writings_null_posts_is_empty_array() {
        let dir = TempDir::new().unwrap();
        fs::create_dir_all(dir.path().join("public")).unwrap();
        fs::write(dir.path().join("public/writings.json"), r#"{"posts": null}"#).unwrap();

        let (state, _) = state_with(dir.path(), RecordingMailer::accepting());
        let response = app(state)
            .oneshot(Request::get("/api/writings").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(json_body(response).await, serde_json::json!([]));
    }

    #[tokio::test]
    async fn test_writings_malformed_is_500() {
        let dir = TempDir::new().unwrap();
        fs::create_dir_all(dir.path().join("public")).unwrap();
        fs::write(dir.path().join("public/writings.json"), "[oops").unwrap();

        let (state, _) = state_with(dir.path(), RecordingMailer::accepting());
        let response = app(state)
            .oneshot(Request::get("/api/writings").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(json_body(response).await["error"], "Failed to load blogs");
    }

    #[tokio::test]
    async fn test_send_email_requires_message() {
        let dir = TempDir::new().unwrap();
        let (state, mailer) = state_with(dir.path(), RecordingMailer::accepting());
        let response = app(state)
            .oneshot(post_json("/api/send-email", r#"{"name": "Ann"}"#))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = json_body(response).await;
        assert_eq!(body["success"], false);
        assert_eq!(body["error"], "Message is required");
        assert!(mailer.sent().is_empty());
    }

    #[tokio::test]
    async fn test_send_email_null_message_is_missing() {
        let dir = TempDir::new().unwrap();
        let (state, mailer) = state_with(dir.path(), RecordingMailer::accepting());
        let response = app(state)
            .oneshot(post_json(
                "/api/send-email",
                r#"{"name": "A", "message": null}"#,
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = json_body(response).await;
        assert_eq!(body["error"], "Message is required");
        assert!(mailer.sent().is_empty());
    }

    #[tokio::test]
    async fn test_send_email_success() {
        let dir = TempDir::new().unwrap();
        let (state, mailer) = state_with(dir.path(), RecordingMailer::accepting());
        let response = app(state)
            .oneshot(post_json(
                "/api/send-email",
                r#"{"name": "Ann", "email": "ann@example.com", "message": "Hi!"}"#,
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(json_body(response).await, serde_json::json!({"success": true}));

        let sent = mailer.sent();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].subject, "New Contact Message");
        assert!(sent[0].body.contains("From: Ann"));
        assert!(sent[0].body.ends_with("Message: Hi!"));
    }

    #[tokio::test]
    async fn test_send_email_transport_failure() {
        let dir = TempDir::new().unwrap();
        let (state, _) = state_with(dir.path(), RecordingMailer::failing());
        let response = app(state)
            .oneshot(post_json("/api/send-email", r#"{"message": "Hi"}"#))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body = json_body(response).await;
        assert_eq!(body["success"], false);
        assert_eq!(body["error"], "Failed to send email");
    }

    #[tokio::test]
    async fn test_send_email_malformed_body() {
        let dir = TempDir::new().unwrap();
        let (state, mailer) = state_with(dir.path(), RecordingMailer::accepting());
        let response = app(state)
            .oneshot(post_json("/api/send-email", "not json"))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(json_body(response).await["success"], false);
        assert!(mailer.sent().is_empty());
    }
}
