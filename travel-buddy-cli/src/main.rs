mod cli;
mod stdio;

use clap::Parser;
use cli::{Cli, RunMode};
use std::error::Error;
use std::io::{self, Write};
use std::path::Path;
use std::sync::Arc;
use tokio::task::JoinHandle;
use tracing::{debug, error, info};
use tracing_subscriber::{EnvFilter, fmt};
use travel_buddy_core::server::{self, ServerError, ServerState};
use travel_buddy_core::{AppConfig, ChatSession, ModelHandler};

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();
    run(cli).await
}

async fn run(cli: Cli) -> Result<(), Box<dyn Error>> {
    let mode = match cli.mode {
        Some(m) => m,
        None => select_mode_interactive()?,
    };

    let quiet_mode = matches!(mode, RunMode::Stdio | RunMode::All);
    init_tracing(quiet_mode);
    info!("Starting travel-buddy");
    debug!(mode = ?mode, config = ?cli.config, provider = ?cli.provider, "CLI arguments parsed");

    let config_path = cli.config.as_deref().map(Path::new);
    let mut config = AppConfig::load(config_path)?;
    apply_cli_overrides(&cli, &mut config);
    info!(
        providers = config.providers.len(),
        default_provider = config.default_provider.as_deref(),
        "Configuration loaded"
    );

    let startup_provider = cli.provider.clone().or(config.default_provider.clone());

    match mode {
        RunMode::Stdio => {
            let session = ChatSession::new(ModelHandler::from_config(&config));
            stdio::run(session, config.travel.clone(), startup_provider).await?;
        }
        RunMode::Rest => {
            info!(host = config.server.host.as_str(), start_port = config.server.start_port, "Starting REST server");
            let state = Arc::new(ServerState::from_config(&config));
            server::serve(state, &config.server).await?;
        }
        RunMode::All => {
            let rest_handle = spawn_rest(&config)?;

            let session = ChatSession::new(ModelHandler::from_config(&config));
            let stdio_result = stdio::run(session, config.travel.clone(), startup_provider).await;

            rest_handle.abort();
            stdio_result?;
        }
    }
    info!("travel-buddy finished");
    Ok(())
}

/// Bind the REST listener up front, then serve it in the background.
///
/// Port exhaustion is returned to the caller instead of surfacing inside the
/// spawned task, where quiet logging would hide it.
fn spawn_rest(config: &AppConfig) -> Result<JoinHandle<()>, ServerError> {
    let listener = server::bind_listener(&config.server)?;
    let state = Arc::new(ServerState::from_config(config));
    let cors_origins = config.server.cors_origins.clone();
    Ok(tokio::spawn(async move {
        if let Err(e) = server::serve_listener(state, listener, &cors_origins).await {
            error!(error = %e, "REST server error");
        }
    }))
}

fn select_mode_interactive() -> Result<RunMode, Box<dyn Error>> {
    println!();
    println!("Available modes:");
    println!("  1. Chat - Interactive travel assistant");
    println!("  2. REST - API server");
    println!("  3. Both - Run chat + REST simultaneously");
    println!();
    print!("Select mode [1-3]: ");
    io::stdout().flush()?;

    let mut input = String::new();
    io::stdin().read_line(&mut input)?;

    match input.trim() {
        "1" | "stdio" | "chat" => Ok(RunMode::Stdio),
        "2" | "rest" => Ok(RunMode::Rest),
        "3" | "both" | "all" => Ok(RunMode::All),
        _ => {
            println!("Invalid selection, defaulting to chat");
            Ok(RunMode::Stdio)
        }
    }
}

fn init_tracing(quiet: bool) {
    static INIT: std::sync::Once = std::sync::Once::new();
    INIT.call_once(|| {
        let filter = if quiet {
            EnvFilter::new("off")
        } else {
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
        };
        fmt()
            .with_env_filter(filter)
            .with_target(false)
            .with_level(true)
            .init();
    });
}

fn apply_cli_overrides(cli: &Cli, config: &mut AppConfig) {
    if let Some(host) = &cli.host {
        info!(host = host.as_str(), "Overriding REST host from CLI flag");
        config.server.host = host.clone();
    }
    if let Some(port) = cli.port {
        info!(port, "Overriding REST start port from CLI flag");
        config.server.start_port = port;
    }
}
