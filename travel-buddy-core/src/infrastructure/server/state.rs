use crate::application::{ChatSession, ModelHandler};
use crate::config::{AppConfig, TravelOptions};
use crate::infrastructure::model::{ProviderRegistry, SessionFactory};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::debug;

pub type SharedSession = Arc<Mutex<ChatSession>>;

/// Shared server state: the registry plus one chat session per session id.
///
/// Every session owns its own handler; handlers are never shared between
/// session ids.
pub struct ServerState {
    registry: Arc<ProviderRegistry>,
    factory: SessionFactory,
    travel: TravelOptions,
    sessions: Mutex<HashMap<String, SharedSession>>,
}

impl ServerState {
    pub fn new(
        registry: Arc<ProviderRegistry>,
        factory: SessionFactory,
        travel: TravelOptions,
    ) -> Self {
        Self {
            registry,
            factory,
            travel,
            sessions: Mutex::new(HashMap::new()),
        }
    }

    pub fn from_config(config: &AppConfig) -> Self {
        Self::new(
            Arc::new(ProviderRegistry::from_config(config)),
            SessionFactory::new(config.system_prompt.clone()),
            config.travel.clone(),
        )
    }

    pub fn registry(&self) -> &ProviderRegistry {
        &self.registry
    }

    pub fn travel_options(&self) -> &TravelOptions {
        &self.travel
    }

    /// Build a fresh session with its own handler, not yet registered.
    pub fn new_session(&self) -> ChatSession {
        let handler = ModelHandler::new(Arc::clone(&self.registry), self.factory.clone());
        ChatSession::new(handler)
    }

    /// Register `session` under its id so later requests can reach it.
    pub async fn insert_session(&self, session: ChatSession) -> (String, SharedSession) {
        let id = session.id().to_string();
        let shared = Arc::new(Mutex::new(session));
        self.sessions
            .lock()
            .await
            .insert(id.clone(), Arc::clone(&shared));
        debug!(session = id.as_str(), "Registered chat session");
        (id, shared)
    }

    pub async fn session(&self, id: &str) -> Option<SharedSession> {
        self.sessions.lock().await.get(id).cloned()
    }

    pub async fn remove_session(&self, id: &str) -> bool {
        self.sessions.lock().await.remove(id).is_some()
    }

    pub async fn session_count(&self) -> usize {
        self.sessions.lock().await.len()
    }
}
