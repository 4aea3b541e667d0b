pub mod chat;
pub mod model;
pub mod session;

use super::dto::ErrorResponse;
use super::state::{ServerState, SharedSession};
use crate::application::{HandlerError, SessionError};
use axum::Json;
use axum::http::StatusCode;
use tracing::error;

pub(super) type ApiError = (StatusCode, Json<ErrorResponse>);

pub(super) fn api_error(status: StatusCode, message: impl Into<String>) -> ApiError {
    (
        status,
        Json(ErrorResponse {
            error: message.into(),
            detail: None,
        }),
    )
}

pub(super) fn session_error(error: &SessionError) -> ApiError {
    let status = match error {
        SessionError::EmptyPrompt | SessionError::MissingDestination => StatusCode::BAD_REQUEST,
        SessionError::Handler(handler) => match handler {
            HandlerError::UnknownProvider { .. } => StatusCode::NOT_FOUND,
            HandlerError::ServiceUnavailable { .. } => StatusCode::SERVICE_UNAVAILABLE,
            HandlerError::MissingCredential { .. } => StatusCode::BAD_REQUEST,
            HandlerError::NotInitialized => StatusCode::CONFLICT,
            HandlerError::ChatDispatchFailed { .. } => StatusCode::BAD_GATEWAY,
        },
    };
    error!(status = status.as_u16(), %error, "Request failed");
    (
        status,
        Json(ErrorResponse {
            error: error.user_message(),
            detail: Some(error.to_string()),
        }),
    )
}

pub(super) fn session_not_found(id: &str) -> ApiError {
    api_error(StatusCode::NOT_FOUND, format!("session '{id}' not found"))
}

/// Look up `id`; a missing or blank id yields `None`.
pub(super) async fn existing_session(
    state: &ServerState,
    id: Option<&str>,
) -> Result<Option<(String, SharedSession)>, ApiError> {
    match id.map(str::trim).filter(|id| !id.is_empty()) {
        Some(id) => state
            .session(id)
            .await
            .map(|session| Some((id.to_string(), session)))
            .ok_or_else(|| session_not_found(id)),
        None => Ok(None),
    }
}

/// A request without a session can never have a model selected.
pub(super) fn not_initialized() -> ApiError {
    session_error(&SessionError::Handler(HandlerError::NotInitialized))
}
