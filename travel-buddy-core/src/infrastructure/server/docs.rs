use super::dto::{
    ErrorResponse, HistoryResponse, InitModelRequest, ProviderInfo, ProvidersResponse,
    RestChatRequest, RestChatResponse, SessionModelResponse, TravelPlanRequest, WelcomeResponse,
};
use super::routes;
use crate::config::{ProviderFamily, TravelOptions};
use crate::domain::{ConversationTurn, MessageRole, TravelContext};
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    paths(
        routes::chat::root_handler,
        routes::chat::chat_handler,
        routes::chat::travel_plan_handler,
        routes::model::providers_handler,
        routes::model::options_handler,
        routes::model::init_model_handler,
        routes::model::current_model_handler,
        routes::session::history_handler,
        routes::session::delete_session_handler
    ),
    components(
        schemas(
            WelcomeResponse,
            ProviderInfo,
            ProvidersResponse,
            ProviderFamily,
            InitModelRequest,
            SessionModelResponse,
            RestChatRequest,
            RestChatResponse,
            TravelPlanRequest,
            HistoryResponse,
            ErrorResponse,
            TravelContext,
            TravelOptions,
            ConversationTurn,
            MessageRole
        )
    ),
    tags(
        (name = "chat", description = "Travel questions and itinerary generation"),
        (name = "model", description = "Provider listing and per-session model selection"),
        (name = "session", description = "Conversation history and session lifecycle")
    )
)]
pub(super) struct ApiDoc;
