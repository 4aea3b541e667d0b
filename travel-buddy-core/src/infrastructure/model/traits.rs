use super::types::{ModelError, ModelRequest, ModelResponse};
use async_trait::async_trait;

/// Wire-level connection to one provider.
///
/// Implementations own their HTTP client and credentials; a [`Session`]
/// holds one behind a `Box<dyn ModelClient>` so the handler never sees the
/// provider family it is talking to.
///
/// [`Session`]: super::Session
#[async_trait]
pub trait ModelClient: Send + Sync {
    /// Registry id of the provider this client was built for
    fn id(&self) -> &str;

    /// Send one non-streaming chat request; the reply text is already
    /// normalized to a plain string.
    async fn chat(&self, request: ModelRequest) -> Result<ModelResponse, ModelError>;
}
