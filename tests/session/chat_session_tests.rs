// Chat session tests - history, stored preferences, quick actions and
// travel plans over a mocked local provider

use serde_json::json;
use std::sync::Arc;
use std::time::Duration;
use travel_buddy_core::application::{ChatSession, ModelHandler, QuickAction, SessionError, TravelPlan};
use travel_buddy_core::domain::{MessageRole, TravelContext};
use travel_buddy_core::model::{ProviderDescriptor, ProviderKind, ProviderRegistry, SessionFactory};
use travel_buddy_core::HandlerError;
use wiremock::matchers::{body_string_contains, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn ollama_reply(content: &str) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(json!({
        "message": { "role": "assistant", "content": content },
        "done": true
    }))
}

async fn ready_session(server: &MockServer) -> ChatSession {
    Mock::given(method("GET"))
        .and(path("/api/version"))
        .respond_with(ResponseTemplate::new(200))
        .mount(server)
        .await;

    let registry = ProviderRegistry::new(vec![ProviderDescriptor {
        id: "ollama".to_string(),
        display_name: "Ollama (Local)".to_string(),
        model_id: "deepseek-r1".to_string(),
        description: String::new(),
        kind: ProviderKind::Local {
            endpoint: server.uri(),
            probe_timeout: Duration::from_secs(2),
        },
    }]);
    let handler = ModelHandler::new(Arc::new(registry), SessionFactory::default());
    let mut session = ChatSession::new(handler);
    session
        .select_model("ollama", None)
        .await
        .expect("local provider reachable");
    session
}

#[tokio::test]
async fn ask_records_raw_prompt_and_reply() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/chat"))
        .and(body_string_contains("Destination: Lisbon"))
        .respond_with(ollama_reply("Try pastel de nata."))
        .expect(1)
        .mount(&server)
        .await;

    let mut session = ready_session(&server).await;
    session.set_context(TravelContext::new().with_destination("Lisbon"));

    let reply = session.ask("  What should I eat?  ").await.expect("reply");
    assert_eq!(reply, "Try pastel de nata.");

    let history = session.history();
    assert_eq!(history.len(), 2);
    assert_eq!(history[0].role, MessageRole::User);
    assert_eq!(history[0].content, "What should I eat?");
    assert_eq!(history[1].role, MessageRole::Assistant);
    assert_eq!(history[1].content, "Try pastel de nata.");
}

#[tokio::test]
async fn blank_prompt_is_rejected_before_dispatch() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ollama_reply("unused"))
        .expect(0)
        .mount(&server)
        .await;

    let mut session = ready_session(&server).await;
    assert!(matches!(session.ask("   ").await, Err(SessionError::EmptyPrompt)));
    assert!(session.history().is_empty());
}

#[tokio::test]
async fn failed_dispatch_leaves_history_unchanged() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/chat"))
        .respond_with(ResponseTemplate::new(500).set_body_string("model crashed"))
        .mount(&server)
        .await;

    let mut session = ready_session(&server).await;
    let result = session.ask("Hello").await;
    assert!(matches!(
        result,
        Err(SessionError::Handler(HandlerError::ChatDispatchFailed { .. }))
    ));
    assert!(session.history().is_empty());
}

#[tokio::test]
async fn quick_action_needs_destination() {
    let server = MockServer::start().await;
    let mut session = ready_session(&server).await;

    let result = session.quick_action(QuickAction::Activities).await;
    assert!(matches!(result, Err(SessionError::MissingDestination)));
}

#[tokio::test]
async fn hotel_quick_action_is_focused_and_uses_budget() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/chat"))
        .and(body_string_contains(
            "Focus on hotels for this query: Suggest hotels in Bali for Luxury budget",
        ))
        .respond_with(ollama_reply("Four Seasons Jimbaran."))
        .expect(1)
        .mount(&server)
        .await;

    let mut session = ready_session(&server).await;
    session.set_context(
        TravelContext::new()
            .with_destination("Bali")
            .with_budget("Luxury")
            .with_interests(["Beaches"]),
    );

    let reply = session
        .quick_action(QuickAction::FindHotels)
        .await
        .expect("reply");
    assert_eq!(reply, "Four Seasons Jimbaran.");
    assert_eq!(
        session.history()[0].content,
        "Suggest hotels in Bali for Luxury budget"
    );
}

#[tokio::test]
async fn not_specified_budget_is_treated_as_absent() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/chat"))
        .and(body_string_contains("Suggest hotels in Bali for Not specified budget"))
        .respond_with(ollama_reply("Any guesthouse."))
        .expect(1)
        .mount(&server)
        .await;

    let mut session = ready_session(&server).await;
    session.set_context(
        TravelContext::new()
            .with_destination("Bali")
            .with_budget("Not specified"),
    );
    assert_eq!(session.context().budget(), None);
    session
        .quick_action(QuickAction::FindHotels)
        .await
        .expect("reply");
}

#[tokio::test]
async fn travel_plan_records_full_prompt() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/chat"))
        .and(body_string_contains("Create a travel plan for Kyoto"))
        .respond_with(ollama_reply("Day 1: Fushimi Inari."))
        .expect(1)
        .mount(&server)
        .await;

    let mut session = ready_session(&server).await;
    let plan = TravelPlan {
        destination: "Kyoto".to_string(),
        dates: Some("April 1-7".to_string()),
        budget: None,
        preferences: Some(json!({ "interests": ["Temples"] })),
    };

    let reply = session.travel_plan(&plan).await.expect("reply");
    assert_eq!(reply, "Day 1: Fushimi Inari.");
    let prompt = &session.history()[0].content;
    assert!(prompt.starts_with("Create a travel plan for Kyoto\nDates: April 1-7\n"));
    assert!(prompt.contains(r#"Preferences: {"interests": ["Temples"]}"#));
}

#[tokio::test]
async fn travel_plan_without_destination_is_rejected() {
    let server = MockServer::start().await;
    let mut session = ready_session(&server).await;
    let result = session.travel_plan(&TravelPlan::default()).await;
    assert!(matches!(result, Err(SessionError::MissingDestination)));
}

#[tokio::test]
async fn reset_clears_history_and_context_but_keeps_model() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/chat"))
        .respond_with(ollama_reply("Sure."))
        .mount(&server)
        .await;

    let mut session = ready_session(&server).await;
    session.set_context(TravelContext::new().with_destination("Oslo"));
    session.ask("Hi").await.expect("reply");

    session.reset();
    assert!(session.history().is_empty());
    assert!(session.context().is_empty());
    assert_eq!(session.current_provider().expect("model kept").id, "ollama");
}

#[tokio::test]
async fn sessions_get_distinct_ids() {
    let first = ChatSession::new(ModelHandler::new(
        Arc::new(ProviderRegistry::default()),
        SessionFactory::default(),
    ));
    let second = ChatSession::new(ModelHandler::new(
        Arc::new(ProviderRegistry::default()),
        SessionFactory::default(),
    ));
    assert_ne!(first.id(), second.id());
    assert!(matches!(
        first.current_provider(),
        Err(SessionError::Handler(HandlerError::NotInitialized))
    ));
}
