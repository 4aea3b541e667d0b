use super::super::dto::{
    ErrorResponse, RestChatRequest, RestChatResponse, TravelPlanRequest, WelcomeResponse,
};
use super::super::state::ServerState;
use super::{ApiError, api_error, existing_session, not_initialized, session_error};
use crate::application::{SessionError, TravelPlan};
use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use std::sync::Arc;
use tracing::{debug, info};

#[utoipa::path(
    get,
    path = "/",
    tag = "chat",
    responses((status = 200, description = "Service greeting", body = WelcomeResponse))
)]
pub async fn root_handler() -> Json<WelcomeResponse> {
    Json(WelcomeResponse {
        message: "Welcome to the Travel Buddy AI API".to_string(),
    })
}

#[utoipa::path(
    post,
    path = "/chat",
    tag = "chat",
    request_body = RestChatRequest,
    responses(
        (status = 200, description = "Reply from the selected model", body = RestChatResponse),
        (status = 400, description = "Empty prompt", body = ErrorResponse),
        (status = 404, description = "Unknown session", body = ErrorResponse),
        (status = 409, description = "No session id given or no model selected for the session", body = ErrorResponse),
        (status = 502, description = "Model provider failed", body = ErrorResponse)
    )
)]
pub async fn chat_handler(
    State(state): State<Arc<ServerState>>,
    Json(payload): Json<RestChatRequest>,
) -> Result<Json<RestChatResponse>, ApiError> {
    let RestChatRequest {
        session_id,
        prompt,
        context,
        category,
    } = payload;

    info!(
        session = session_id.as_deref(),
        category = category.as_deref(),
        prompt = %prompt.chars().take(50).collect::<String>(),
        "Received /chat request"
    );

    if prompt.trim().is_empty() {
        return Err(api_error(StatusCode::BAD_REQUEST, "prompt cannot be empty"));
    }

    let Some((session_id, session)) = existing_session(&state, session_id.as_deref()).await? else {
        return Err(not_initialized());
    };
    let mut session = session.lock().await;
    let previous = context.map(|context| {
        debug!(session = session_id.as_str(), "Updating stored travel context");
        std::mem::replace(session.context_mut(), context)
    });

    let result = match category.as_deref().map(str::trim).filter(|c| !c.is_empty()) {
        Some(category) => session.ask_focused(category, &prompt).await,
        None => session.ask(&prompt).await,
    };
    let content = match result {
        Ok(content) => content,
        Err(error) => {
            if let Some(previous) = previous {
                session.set_context(previous);
            }
            return Err(session_error(&error));
        }
    };
    let provider = session
        .current_provider()
        .map(|p| p.id.clone())
        .unwrap_or_default();

    info!(session = session_id.as_str(), provider = provider.as_str(), "Chat request completed");
    Ok(Json(RestChatResponse {
        session_id,
        provider,
        content,
    }))
}

#[utoipa::path(
    post,
    path = "/travel-plan",
    tag = "chat",
    request_body = TravelPlanRequest,
    responses(
        (status = 200, description = "Generated travel plan", body = RestChatResponse),
        (status = 400, description = "Missing destination", body = ErrorResponse),
        (status = 404, description = "Unknown session", body = ErrorResponse),
        (status = 409, description = "No session id given or no model selected for the session", body = ErrorResponse),
        (status = 502, description = "Model provider failed", body = ErrorResponse)
    )
)]
pub async fn travel_plan_handler(
    State(state): State<Arc<ServerState>>,
    Json(payload): Json<TravelPlanRequest>,
) -> Result<Json<RestChatResponse>, ApiError> {
    info!(destination = payload.destination.as_str(), "Received /travel-plan request");

    if payload.destination.trim().is_empty() {
        return Err(session_error(&SessionError::MissingDestination));
    }
    let Some((session_id, session)) = existing_session(&state, payload.session_id.as_deref()).await?
    else {
        return Err(not_initialized());
    };
    let plan = TravelPlan {
        destination: payload.destination,
        dates: payload.dates,
        budget: payload.budget,
        preferences: payload.preferences,
    };

    let mut session = session.lock().await;
    let content = session
        .travel_plan(&plan)
        .await
        .map_err(|error| session_error(&error))?;
    let provider = session
        .current_provider()
        .map(|p| p.id.clone())
        .unwrap_or_default();

    Ok(Json(RestChatResponse {
        session_id,
        provider,
        content,
    }))
}
