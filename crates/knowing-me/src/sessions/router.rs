use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use serde::Deserialize;
use serde_json::json;

use super::domain::{QuestionId, Rating, Role};
use super::repository::{RepositoryError, SessionRepository};
use super::service::{SessionService, SessionServiceError};
use super::session::SessionId;

/// Incoming rating payload. The value range is checked by the session, not
/// here, so the error response can carry the domain message.
#[derive(Debug, Deserialize)]
pub struct RatingSubmission {
    pub question_id: String,
    pub rater: Role,
    pub target: Role,
    pub value: u8,
}

/// Router builder exposing HTTP endpoints for session play and results.
pub fn session_router<R>(service: Arc<SessionService<R>>) -> Router
where
    R: SessionRepository + 'static,
{
    Router::new()
        .route("/api/v1/sessions", post(create_handler::<R>))
        .route("/api/v1/sessions/:session_id", get(status_handler::<R>))
        .route(
            "/api/v1/sessions/:session_id/ratings",
            post(rating_handler::<R>),
        )
        .route(
            "/api/v1/sessions/:session_id/results",
            get(results_handler::<R>),
        )
        .with_state(service)
}

pub(crate) async fn create_handler<R>(
    State(service): State<Arc<SessionService<R>>>,
) -> Response
where
    R: SessionRepository + 'static,
{
    match service.create() {
        Ok(record) => (StatusCode::CREATED, axum::Json(record.status_view())).into_response(),
        Err(error) => internal_error(error),
    }
}

pub(crate) async fn status_handler<R>(
    State(service): State<Arc<SessionService<R>>>,
    Path(session_id): Path<String>,
) -> Response
where
    R: SessionRepository + 'static,
{
    let id = SessionId(session_id);
    match service.status(&id) {
        Ok(record) => (StatusCode::OK, axum::Json(record.status_view())).into_response(),
        Err(error) => error_response(&id, error),
    }
}

pub(crate) async fn rating_handler<R>(
    State(service): State<Arc<SessionService<R>>>,
    Path(session_id): Path<String>,
    axum::Json(submission): axum::Json<RatingSubmission>,
) -> Response
where
    R: SessionRepository + 'static,
{
    let id = SessionId(session_id);
    let rating = Rating {
        question_id: QuestionId(submission.question_id),
        rater: submission.rater,
        target: submission.target,
        value: submission.value,
    };

    match service.submit_rating(&id, rating) {
        Ok(record) => (StatusCode::OK, axum::Json(record.status_view())).into_response(),
        Err(error) => error_response(&id, error),
    }
}

pub(crate) async fn results_handler<R>(
    State(service): State<Arc<SessionService<R>>>,
    Path(session_id): Path<String>,
) -> Response
where
    R: SessionRepository + 'static,
{
    let id = SessionId(session_id);
    match service.results(&id) {
        Ok(view) => (StatusCode::OK, axum::Json(view)).into_response(),
        Err(error) => error_response(&id, error),
    }
}

fn error_response(session_id: &SessionId, error: SessionServiceError) -> Response {
    match error {
        SessionServiceError::Session(error) => {
            let payload = json!({ "error": error.to_string() });
            (StatusCode::UNPROCESSABLE_ENTITY, axum::Json(payload)).into_response()
        }
        SessionServiceError::Repository(RepositoryError::NotFound) => {
            let payload = json!({
                "error": "session not found",
                "session_id": session_id.0,
            });
            (StatusCode::NOT_FOUND, axum::Json(payload)).into_response()
        }
        SessionServiceError::Repository(RepositoryError::Conflict) => {
            let payload = json!({ "error": "session already exists" });
            (StatusCode::CONFLICT, axum::Json(payload)).into_response()
        }
        other => internal_error(other),
    }
}

fn internal_error(error: SessionServiceError) -> Response {
    let payload = json!({ "error": error.to_string() });
    (StatusCode::INTERNAL_SERVER_ERROR, axum::Json(payload)).into_response()
}
