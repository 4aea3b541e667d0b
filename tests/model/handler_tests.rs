// Model handler tests - provider initialization and chat dispatch against
// mocked Ollama and OpenAI endpoints

use serde_json::json;
use serial_test::serial;
use std::sync::Arc;
use std::time::Duration;
use travel_buddy_core::application::{HandlerError, HandlerState, ModelHandler};
use travel_buddy_core::domain::TravelContext;
use travel_buddy_core::model::{
    ModelError, ProviderDescriptor, ProviderKind, ProviderRegistry, SessionFactory,
};
use wiremock::matchers::{body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const SYSTEM_PROMPT: &str = "You are a helpful travel assistant.";

fn local(id: &str, endpoint: &str) -> ProviderDescriptor {
    ProviderDescriptor {
        id: id.to_string(),
        display_name: format!("{id} (Local)"),
        model_id: "deepseek-r1".to_string(),
        description: String::new(),
        kind: ProviderKind::Local {
            endpoint: endpoint.to_string(),
            probe_timeout: Duration::from_secs(2),
        },
    }
}

fn hosted(id: &str, endpoint: &str, api_key_env: Option<&str>) -> ProviderDescriptor {
    ProviderDescriptor {
        id: id.to_string(),
        display_name: id.to_string(),
        model_id: "gpt-3.5-turbo".to_string(),
        description: String::new(),
        kind: ProviderKind::Hosted {
            endpoint: endpoint.to_string(),
            api_path: None,
            temperature: 0.7,
            api_key_env: api_key_env.map(str::to_string),
        },
    }
}

fn handler(providers: Vec<ProviderDescriptor>) -> ModelHandler {
    ModelHandler::new(
        Arc::new(ProviderRegistry::new(providers)),
        SessionFactory::new(SYSTEM_PROMPT),
    )
}

fn closed_endpoint() -> String {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").expect("bind ephemeral");
    let port = listener.local_addr().expect("addr").port();
    format!("http://127.0.0.1:{port}")
}

async fn ollama_up(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path("/api/version"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "version": "0.5.7" })))
        .mount(server)
        .await;
}

#[tokio::test]
async fn chat_before_initialization_is_not_initialized() {
    let handler = handler(vec![local("ollama", "http://127.0.0.1:9")]);
    assert_eq!(handler.state(), HandlerState::Uninitialized);
    assert!(matches!(
        handler.chat("Hello", None).await,
        Err(HandlerError::NotInitialized)
    ));
    assert!(matches!(
        handler.current_provider(),
        Err(HandlerError::NotInitialized)
    ));
}

#[tokio::test]
async fn unknown_provider_is_rejected_without_network() {
    let mut handler = handler(vec![local("ollama", "http://127.0.0.1:9")]);
    let result = handler.initialize_model("claude", None).await;
    assert!(matches!(
        result,
        Err(HandlerError::UnknownProvider { ref provider }) if provider == "claude"
    ));
    assert!(!handler.is_ready());
}

#[tokio::test]
async fn local_provider_initializes_when_probe_succeeds() {
    let server = MockServer::start().await;
    ollama_up(&server).await;

    let mut handler = handler(vec![local("ollama", &server.uri())]);
    let session = handler
        .initialize_model("ollama", None)
        .await
        .expect("probe succeeds");
    assert_eq!(session.provider_id(), "ollama");
    assert_eq!(session.system_prompt(), Some(SYSTEM_PROMPT));

    assert_eq!(
        handler.state(),
        HandlerState::Ready {
            provider: "ollama".to_string()
        }
    );
    assert_eq!(handler.current_provider().expect("active").id, "ollama");
}

#[tokio::test]
async fn unreachable_local_service_is_service_unavailable() {
    let endpoint = closed_endpoint();

    let mut handler = handler(vec![local("ollama", &endpoint)]);
    let result = handler.initialize_model("ollama", None).await;
    assert!(matches!(
        result,
        Err(HandlerError::ServiceUnavailable { ref provider, .. }) if provider == "ollama"
    ));
    assert!(!handler.is_ready());
}

#[tokio::test]
async fn hung_local_service_times_out_within_bound() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/version"))
        .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_secs(10)))
        .mount(&server)
        .await;

    let mut provider = local("ollama", &server.uri());
    provider.kind = ProviderKind::Local {
        endpoint: server.uri(),
        probe_timeout: Duration::from_millis(500),
    };
    let mut handler = handler(vec![provider]);

    let started = std::time::Instant::now();
    let result = handler.initialize_model("ollama", None).await;
    assert!(matches!(result, Err(HandlerError::ServiceUnavailable { .. })));
    assert!(started.elapsed() < Duration::from_secs(5));
    assert!(!handler.is_ready());
}

#[tokio::test]
async fn failed_switch_keeps_previous_session() {
    let healthy = MockServer::start().await;
    ollama_up(&healthy).await;
    let broken = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/version"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&broken)
        .await;

    let mut handler = handler(vec![
        local("ollama", &healthy.uri()),
        local("backup", &broken.uri()),
    ]);
    handler
        .initialize_model("ollama", None)
        .await
        .expect("first provider up");

    let result = handler.initialize_model("backup", None).await;
    assert!(matches!(result, Err(HandlerError::ServiceUnavailable { .. })));
    assert_eq!(handler.current_provider().expect("retained").id, "ollama");

    let result = handler.initialize_model("missing", None).await;
    assert!(matches!(result, Err(HandlerError::UnknownProvider { .. })));
    assert_eq!(handler.current_provider().expect("retained").id, "ollama");
}

#[tokio::test]
async fn hosted_provider_requires_credential() {
    let mut handler = handler(vec![hosted("openai", "http://127.0.0.1:9", None)]);

    let result = handler.initialize_model("openai", None).await;
    assert!(matches!(
        result,
        Err(HandlerError::MissingCredential { ref provider }) if provider == "openai"
    ));

    let result = handler.initialize_model("openai", Some("   ")).await;
    assert!(matches!(result, Err(HandlerError::MissingCredential { .. })));
    assert!(!handler.is_ready());
}

#[tokio::test]
async fn hosted_provider_initializes_without_contacting_service() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(500))
        .expect(0)
        .mount(&server)
        .await;

    let mut handler = handler(vec![hosted("openai", &server.uri(), None)]);
    let session = handler
        .initialize_model("openai", Some("sk-test"))
        .await
        .expect("credential present");
    assert_eq!(session.model(), "gpt-3.5-turbo");
    assert_eq!(session.system_prompt(), None);
}

#[tokio::test]
#[serial]
async fn hosted_credential_falls_back_to_environment() {
    const VAR: &str = "TRAVEL_BUDDY_TEST_OPENAI_KEY";
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .and(header("authorization", "Bearer sk-from-env"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "choices": [{ "message": { "role": "assistant", "content": "Bonjour" } }]
        })))
        .mount(&server)
        .await;

    unsafe {
        std::env::set_var(VAR, "sk-from-env");
    }
    let mut handler = handler(vec![hosted("openai", &server.uri(), Some(VAR))]);
    let init = handler.initialize_model("openai", None).await;
    unsafe {
        std::env::remove_var(VAR);
    }

    init.expect("credential from environment");
    assert_eq!(handler.chat("Hi", None).await.expect("reply"), "Bonjour");
}

#[tokio::test]
async fn local_chat_sends_system_prompt_and_context() {
    let server = MockServer::start().await;
    ollama_up(&server).await;
    Mock::given(method("POST"))
        .and(path("/api/chat"))
        .and(body_partial_json(json!({
            "model": "deepseek-r1",
            "stream": false,
            "messages": [
                { "role": "system", "content": SYSTEM_PROMPT },
                {
                    "role": "user",
                    "content": "Context: Destination: Paris.\n\nQuery: What should I pack?"
                }
            ]
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "model": "deepseek-r1",
            "message": { "role": "assistant", "content": "Pack layers." },
            "done": true
        })))
        .expect(1)
        .mount(&server)
        .await;

    let mut handler = handler(vec![local("ollama", &server.uri())]);
    handler.initialize_model("ollama", None).await.expect("init");

    let context = TravelContext::new().with_destination("Paris");
    let reply = handler
        .chat("What should I pack?", Some(&context))
        .await
        .expect("reply");
    assert_eq!(reply, "Pack layers.");
}

#[tokio::test]
async fn reply_without_text_is_stringified() {
    let server = MockServer::start().await;
    ollama_up(&server).await;
    Mock::given(method("POST"))
        .and(path("/api/chat"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "done": true })))
        .mount(&server)
        .await;

    let mut handler = handler(vec![local("ollama", &server.uri())]);
    handler.initialize_model("ollama", None).await.expect("init");

    let reply = handler.chat("Hello", None).await.expect("reply");
    assert_eq!(reply, r#"{"done":true}"#);
}

#[tokio::test]
async fn rejected_credential_surfaces_as_dispatch_failure() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .respond_with(
            ResponseTemplate::new(401)
                .set_body_json(json!({ "error": { "message": "Incorrect API key provided" } })),
        )
        .mount(&server)
        .await;

    let mut handler = handler(vec![hosted("openai", &server.uri(), None)]);
    handler
        .initialize_model("openai", Some("sk-wrong"))
        .await
        .expect("presence check only");

    let error = handler
        .chat("Plan a weekend in Rome", None)
        .await
        .expect_err("401 from provider");
    match &error {
        HandlerError::ChatDispatchFailed { provider, source } => {
            assert_eq!(provider, "openai");
            assert!(matches!(source, ModelError::Status { .. }));
        }
        other => panic!("expected dispatch failure, got {other:?}"),
    }
    assert!(error.user_message().contains("API key"));
    assert!(handler.is_ready());
}

#[tokio::test]
async fn openai_chat_sends_bearer_and_user_message() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .and(header("authorization", "Bearer sk-test"))
        .and(body_partial_json(json!({
            "model": "gpt-3.5-turbo",
            "messages": [{ "role": "user", "content": "Best time to visit Lisbon?" }]
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "choices": [{ "message": { "role": "assistant", "content": "Spring or autumn." } }]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let mut handler = handler(vec![hosted("openai", &server.uri(), None)]);
    handler
        .initialize_model("openai", Some("sk-test"))
        .await
        .expect("init");

    let reply = handler
        .chat("Best time to visit Lisbon?", Some(&TravelContext::new()))
        .await
        .expect("reply");
    assert_eq!(reply, "Spring or autumn.");
}
