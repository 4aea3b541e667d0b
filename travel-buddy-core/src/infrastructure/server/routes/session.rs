use super::super::dto::{ErrorResponse, HistoryResponse};
use super::super::state::ServerState;
use super::{ApiError, session_not_found};
use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use std::sync::Arc;
use tracing::info;

#[utoipa::path(
    get,
    path = "/sessions/{id}/history",
    tag = "session",
    params(("id" = String, Path, description = "Session id")),
    responses(
        (status = 200, description = "Conversation turns in order", body = HistoryResponse),
        (status = 404, description = "Unknown session", body = ErrorResponse)
    )
)]
pub async fn history_handler(
    State(state): State<Arc<ServerState>>,
    Path(id): Path<String>,
) -> Result<Json<HistoryResponse>, ApiError> {
    let session = state.session(&id).await.ok_or_else(|| session_not_found(&id))?;
    let session = session.lock().await;
    Ok(Json(HistoryResponse {
        session_id: id,
        started_at: session.started_at().to_rfc3339(),
        turns: session.history().to_vec(),
    }))
}

#[utoipa::path(
    delete,
    path = "/sessions/{id}",
    tag = "session",
    params(("id" = String, Path, description = "Session id")),
    responses(
        (status = 204, description = "Session ended"),
        (status = 404, description = "Unknown session", body = ErrorResponse)
    )
)]
pub async fn delete_session_handler(
    State(state): State<Arc<ServerState>>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    if state.remove_session(&id).await {
        info!(session = id.as_str(), "Session ended");
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(session_not_found(&id))
    }
}
