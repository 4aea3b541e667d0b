use crate::config::ProviderFamily;
use crate::domain::{ConversationTurn, TravelContext};
use crate::infrastructure::model::ProviderDescriptor;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use utoipa::ToSchema;

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct WelcomeResponse {
    pub message: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ProviderInfo {
    pub id: String,
    pub display_name: String,
    pub model_id: String,
    pub family: ProviderFamily,
    pub description: String,
}

impl From<&ProviderDescriptor> for ProviderInfo {
    fn from(descriptor: &ProviderDescriptor) -> Self {
        Self {
            id: descriptor.id.clone(),
            display_name: descriptor.display_name.clone(),
            model_id: descriptor.model_id.clone(),
            family: descriptor.family(),
            description: descriptor.description.clone(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ProvidersResponse {
    pub providers: Vec<ProviderInfo>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct InitModelRequest {
    pub session_id: Option<String>,
    pub provider: String,
    #[serde(default)]
    pub credential: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct SessionModelResponse {
    pub session_id: String,
    pub provider: ProviderInfo,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct RestChatRequest {
    pub session_id: Option<String>,
    pub prompt: String,
    /// Replaces the session's stored travel preferences when present
    #[serde(default)]
    pub context: Option<TravelContext>,
    /// Narrows the query to one topic (e.g. "hotels"); stored preferences
    /// are not applied to focused queries
    #[serde(default)]
    pub category: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct RestChatResponse {
    pub session_id: String,
    pub provider: String,
    pub content: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct TravelPlanRequest {
    pub session_id: Option<String>,
    pub destination: String,
    #[serde(default)]
    pub dates: Option<String>,
    #[serde(default)]
    pub budget: Option<String>,
    #[serde(default)]
    #[schema(value_type = Option<Object>)]
    pub preferences: Option<Value>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct HistoryResponse {
    pub session_id: String,
    pub started_at: String,
    pub turns: Vec<ConversationTurn>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    pub error: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}
