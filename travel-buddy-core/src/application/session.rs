//! UI-scoped chat session: one handler, the user's travel preferences, and
//! the conversation history.

use super::handler::{HandlerError, ModelHandler};
use super::prompt::{QuickAction, TravelPlan, focus_prompt, travel_plan_prompt};
use crate::domain::{ConversationTurn, TravelContext};
use crate::infrastructure::model::{ProviderDescriptor, Session};
use chrono::{DateTime, Utc};
use thiserror::Error;
use tracing::info;
use uuid::Uuid;

#[derive(Debug, Error)]
pub enum SessionError {
    #[error(transparent)]
    Handler(#[from] HandlerError),
    #[error("prompt cannot be empty")]
    EmptyPrompt,
    #[error("a destination is required for this request")]
    MissingDestination,
}

impl SessionError {
    pub fn user_message(&self) -> String {
        match self {
            SessionError::Handler(error) => error.user_message(),
            SessionError::EmptyPrompt => "Please enter a question first.".to_string(),
            SessionError::MissingDestination => "Please specify a destination first.".to_string(),
        }
    }
}

/// State owned by one interactive user session.
///
/// Created when the session starts and dropped when it ends; nothing here is
/// shared with other sessions.
pub struct ChatSession {
    id: String,
    started_at: DateTime<Utc>,
    handler: ModelHandler,
    context: TravelContext,
    history: Vec<ConversationTurn>,
}

impl ChatSession {
    pub fn new(handler: ModelHandler) -> Self {
        Self::with_id(Uuid::new_v4().to_string(), handler)
    }

    pub fn with_id(id: impl Into<String>, handler: ModelHandler) -> Self {
        Self {
            id: id.into(),
            started_at: Utc::now(),
            handler,
            context: TravelContext::default(),
            history: Vec::new(),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    pub fn handler(&self) -> &ModelHandler {
        &self.handler
    }

    pub async fn select_model(
        &mut self,
        provider_id: &str,
        credential: Option<&str>,
    ) -> Result<&Session, SessionError> {
        info!(session = self.id.as_str(), provider = provider_id, "Selecting model");
        Ok(self.handler.initialize_model(provider_id, credential).await?)
    }

    pub fn current_provider(&self) -> Result<&ProviderDescriptor, SessionError> {
        Ok(self.handler.current_provider()?)
    }

    pub fn context(&self) -> &TravelContext {
        &self.context
    }

    pub fn context_mut(&mut self) -> &mut TravelContext {
        &mut self.context
    }

    pub fn set_context(&mut self, context: TravelContext) {
        self.context = context;
    }

    /// Ask a free-text question enriched with the stored preferences.
    pub async fn ask(&mut self, prompt: &str) -> Result<String, SessionError> {
        let prompt = prompt.trim();
        if prompt.is_empty() {
            return Err(SessionError::EmptyPrompt);
        }
        let reply = self.handler.chat(prompt, Some(&self.context)).await?;
        self.record(prompt, &reply);
        Ok(reply)
    }

    /// Ask a question narrowed to `category` (e.g. "hotels"), without the
    /// stored preferences.
    pub async fn ask_focused(&mut self, category: &str, prompt: &str) -> Result<String, SessionError> {
        let prompt = prompt.trim();
        if prompt.is_empty() {
            return Err(SessionError::EmptyPrompt);
        }
        let reply = self
            .handler
            .chat(&focus_prompt(category, prompt), None)
            .await?;
        self.record(prompt, &reply);
        Ok(reply)
    }

    pub async fn quick_action(&mut self, action: QuickAction) -> Result<String, SessionError> {
        let destination = self
            .context
            .destination()
            .ok_or(SessionError::MissingDestination)?;
        let prompt = action.prompt(destination, self.context.budget());
        self.ask_focused(action.category(), &prompt).await
    }

    pub async fn travel_plan(&mut self, plan: &TravelPlan) -> Result<String, SessionError> {
        if plan.destination.trim().is_empty() {
            return Err(SessionError::MissingDestination);
        }
        let prompt = travel_plan_prompt(plan);
        let reply = self.handler.chat(&prompt, None).await?;
        self.record(&prompt, &reply);
        Ok(reply)
    }

    pub fn history(&self) -> &[ConversationTurn] {
        &self.history
    }

    /// Forget history and preferences; the selected model stays active.
    pub fn reset(&mut self) {
        info!(session = self.id.as_str(), turns = self.history.len(), "Resetting chat session");
        self.history.clear();
        self.context = TravelContext::default();
    }

    fn record(&mut self, prompt: &str, reply: &str) {
        self.history.push(ConversationTurn::user(prompt));
        self.history.push(ConversationTurn::assistant(reply));
    }
}
