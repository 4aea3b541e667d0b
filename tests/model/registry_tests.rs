// Registry tests - provider table built from configuration

use std::fs;
use tempfile::tempdir;
use travel_buddy_core::config::{AppConfig, ProviderFamily};
use travel_buddy_core::model::{ProviderKind, ProviderRegistry, RegistryError};

fn registry_from(toml: &str) -> ProviderRegistry {
    let dir = tempdir().expect("tempdir");
    let path = dir.path().join("travel.toml");
    fs::write(&path, toml).expect("write config");
    let config = AppConfig::load(Some(&path)).expect("valid config");
    ProviderRegistry::from_config(&config)
}

#[test]
fn keeps_configuration_order() {
    let registry = registry_from(
        r#"
[[providers]]
id = "openai"
type = "openai"
model = "gpt-4o-mini"
endpoint = "https://api.openai.com"

[[providers]]
id = "ollama"
type = "ollama"
model = "deepseek-r1"
endpoint = "http://localhost:11434"
"#,
    );

    assert_eq!(registry.len(), 2);
    assert_eq!(registry.ids().collect::<Vec<_>>(), ["openai", "ollama"]);
    let families: Vec<ProviderFamily> = registry.iter().map(|p| p.family()).collect();
    assert_eq!(families, [ProviderFamily::Hosted, ProviderFamily::Local]);
}

#[test]
fn hosted_descriptor_carries_request_settings() {
    let registry = registry_from(
        r#"
probe_timeout_secs = 1

[[providers]]
id = "azure"
type = "hosted"
model = "gpt-35"
endpoint = "https://example.openai.azure.com/"
api_path = "/openai/deployments/gpt-35/chat/completions"
temperature = 1.1
api_key_env = "AZURE_KEY"
"#,
    );

    let azure = registry.lookup("azure").expect("azure registered");
    assert_eq!(azure.kind.endpoint(), "https://example.openai.azure.com/");
    match &azure.kind {
        ProviderKind::Hosted {
            api_path,
            temperature,
            api_key_env,
            ..
        } => {
            assert_eq!(
                api_path.as_deref(),
                Some("/openai/deployments/gpt-35/chat/completions")
            );
            assert!((*temperature - 1.1).abs() < f32::EPSILON);
            assert_eq!(api_key_env.as_deref(), Some("AZURE_KEY"));
        }
        other => panic!("expected hosted provider, got {other:?}"),
    }
}

#[test]
fn lookup_is_exact_match() {
    let registry = ProviderRegistry::from_config(&AppConfig::default());
    assert!(registry.contains("ollama"));
    assert_eq!(
        registry.lookup("Ollama"),
        Err(RegistryError::UnknownProvider {
            provider: "Ollama".to_string()
        })
    );
    assert!(registry.lookup("").is_err());
}

#[test]
fn empty_registry_rejects_everything() {
    let registry = ProviderRegistry::new(Vec::new());
    assert!(registry.is_empty());
    assert!(matches!(
        registry.lookup("ollama"),
        Err(RegistryError::UnknownProvider { .. })
    ));
}
