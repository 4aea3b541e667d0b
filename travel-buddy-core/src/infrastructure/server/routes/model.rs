use super::super::dto::{
    ErrorResponse, InitModelRequest, ProviderInfo, ProvidersResponse, SessionModelResponse,
};
use super::super::state::ServerState;
use super::{ApiError, existing_session, session_error, session_not_found};
use crate::application::ChatSession;
use crate::config::TravelOptions;
use axum::Json;
use axum::extract::{Path, State};
use std::sync::Arc;
use tracing::info;

#[utoipa::path(
    get,
    path = "/providers",
    tag = "model",
    responses((status = 200, description = "Configured providers in display order", body = ProvidersResponse))
)]
pub async fn providers_handler(State(state): State<Arc<ServerState>>) -> Json<ProvidersResponse> {
    Json(ProvidersResponse {
        providers: state.registry().iter().map(ProviderInfo::from).collect(),
    })
}

#[utoipa::path(
    get,
    path = "/options",
    tag = "model",
    responses((status = 200, description = "Interest and budget choices offered to users", body = TravelOptions))
)]
pub async fn options_handler(State(state): State<Arc<ServerState>>) -> Json<TravelOptions> {
    Json(state.travel_options().clone())
}

#[utoipa::path(
    post,
    path = "/model",
    tag = "model",
    request_body = InitModelRequest,
    responses(
        (status = 200, description = "Model selected for the session", body = SessionModelResponse),
        (status = 400, description = "Credential missing for a hosted provider", body = ErrorResponse),
        (status = 404, description = "Unknown provider or session", body = ErrorResponse),
        (status = 503, description = "Local model service unreachable", body = ErrorResponse)
    )
)]
pub async fn init_model_handler(
    State(state): State<Arc<ServerState>>,
    Json(payload): Json<InitModelRequest>,
) -> Result<Json<SessionModelResponse>, ApiError> {
    info!(
        session = payload.session_id.as_deref(),
        provider = payload.provider.as_str(),
        "Received /model request"
    );

    let (session_id, provider) = match existing_session(&state, payload.session_id.as_deref()).await? {
        Some((session_id, session)) => {
            let mut session = session.lock().await;
            (session_id, select_provider(&mut session, &payload).await?)
        }
        None => {
            // Registered only once a model is active; failed selections leave no session behind.
            let mut session = state.new_session();
            let provider = select_provider(&mut session, &payload).await?;
            let (session_id, _) = state.insert_session(session).await;
            (session_id, provider)
        }
    };

    Ok(Json(SessionModelResponse {
        session_id,
        provider,
    }))
}

async fn select_provider(
    session: &mut ChatSession,
    payload: &InitModelRequest,
) -> Result<ProviderInfo, ApiError> {
    session
        .select_model(payload.provider.trim(), payload.credential.as_deref())
        .await
        .map_err(|error| session_error(&error))?;
    session
        .current_provider()
        .map(ProviderInfo::from)
        .map_err(|error| session_error(&error))
}

#[utoipa::path(
    get,
    path = "/sessions/{id}/model",
    tag = "model",
    params(("id" = String, Path, description = "Session id")),
    responses(
        (status = 200, description = "Active provider of the session", body = SessionModelResponse),
        (status = 404, description = "Unknown session", body = ErrorResponse),
        (status = 409, description = "No model selected yet", body = ErrorResponse)
    )
)]
pub async fn current_model_handler(
    State(state): State<Arc<ServerState>>,
    Path(id): Path<String>,
) -> Result<Json<SessionModelResponse>, ApiError> {
    let session = state.session(&id).await.ok_or_else(|| session_not_found(&id))?;
    let session = session.lock().await;
    let provider = session
        .current_provider()
        .map(ProviderInfo::from)
        .map_err(|error| session_error(&error))?;
    Ok(Json(SessionModelResponse {
        session_id: id,
        provider,
    }))
}
