use super::docs::ApiDoc;
use super::error::ServerError;
use super::port::bind_available;
use super::routes;
use super::state::ServerState;
use crate::config::RestServerConfig;
use axum::Router;
use axum::http::{HeaderValue, Method};
use axum::routing::{delete, get, post};
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tracing::{info, warn};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

fn cors_layer(origins: &[String]) -> CorsLayer {
    let allowed: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(_) => {
                warn!(origin = origin.as_str(), "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    let allow_origin = if allowed.is_empty() {
        AllowOrigin::from(Any)
    } else {
        AllowOrigin::list(allowed)
    };

    CorsLayer::new()
        .allow_origin(allow_origin)
        .allow_methods([Method::GET, Method::POST, Method::DELETE, Method::OPTIONS])
        .allow_headers(Any)
}

pub fn router(state: Arc<ServerState>, cors_origins: &[String]) -> Router {
    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-doc/openapi.json", ApiDoc::openapi()))
        .route("/", get(routes::chat::root_handler))
        .route("/chat", post(routes::chat::chat_handler))
        .route("/travel-plan", post(routes::chat::travel_plan_handler))
        .route("/providers", get(routes::model::providers_handler))
        .route("/options", get(routes::model::options_handler))
        .route("/model", post(routes::model::init_model_handler))
        .route("/sessions/{id}", delete(routes::session::delete_session_handler))
        .route("/sessions/{id}/model", get(routes::model::current_model_handler))
        .route("/sessions/{id}/history", get(routes::session::history_handler))
        .layer(cors_layer(cors_origins))
        .with_state(state)
}

/// Bind the first free port from the configured range as a tokio listener.
///
/// Fails with [`ServerError::NoAvailablePort`] when every port in the range
/// is taken. Callers that run the server in the background bind first so
/// this error reaches them before anything is spawned.
pub fn bind_listener(config: &RestServerConfig) -> Result<TcpListener, ServerError> {
    let listener = bind_available(&config.host, config.start_port, config.max_port_attempts)?;
    let addr = listener.local_addr()?;
    listener.set_nonblocking(true)?;
    TcpListener::from_std(listener).map_err(|source| ServerError::Bind { addr, source })
}

/// Bind the first free port from the configured range and serve until the
/// process ends.
pub async fn serve(state: Arc<ServerState>, config: &RestServerConfig) -> Result<(), ServerError> {
    let listener = bind_listener(config)?;
    serve_listener(state, listener, &config.cors_origins).await
}

pub async fn serve_listener(
    state: Arc<ServerState>,
    listener: TcpListener,
    cors_origins: &[String],
) -> Result<(), ServerError> {
    let addr = listener.local_addr()?;
    let app = router(state, cors_origins);
    info!(%addr, "REST server ready to accept connections");
    println!("Travel Buddy API listening on http://{addr}");

    axum::serve(listener, app.into_make_service())
        .await
        .map_err(ServerError::Serve)
}
