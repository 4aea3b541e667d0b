use serde_json::json;
use thiserror::Error;
use tokio::io::{self, AsyncBufReadExt, AsyncWriteExt, BufReader};
use tracing::{debug, info};
use travel_buddy_core::application::{QuickAction, SessionError, TravelPlan};
use travel_buddy_core::config::TravelOptions;
use travel_buddy_core::domain::{MessageRole, TravelContext};
use travel_buddy_core::ChatSession;

#[derive(Debug, Error)]
pub enum StdioError {
    #[error("stdin/stdout I/O error: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Command {
    Model {
        provider: Option<String>,
        credential: Option<String>,
    },
    Destination(String),
    Dates(String),
    Budget(String),
    Interests(Vec<String>),
    Context,
    Quick(QuickAction),
    Plan,
    History,
    Providers,
    Reset,
    Help,
    Exit,
    Unknown(String),
}

impl Command {
    /// `None` when the line is a plain question rather than a command.
    fn parse(input: &str) -> Option<Self> {
        let command = input.trim().strip_prefix('/')?;
        let (name, rest) = match command.split_once(char::is_whitespace) {
            Some((name, rest)) => (name, rest.trim()),
            None => (command, ""),
        };

        let command = match name.to_ascii_lowercase().as_str() {
            "model" => {
                let mut args = rest.split_whitespace();
                Command::Model {
                    provider: args.next().map(str::to_string),
                    credential: args.next().map(str::to_string),
                }
            }
            "dest" | "destination" => Command::Destination(rest.to_string()),
            "dates" => Command::Dates(rest.to_string()),
            "budget" => Command::Budget(rest.to_string()),
            "interests" => Command::Interests(
                rest.split(',')
                    .map(str::trim)
                    .filter(|i| !i.is_empty())
                    .map(str::to_string)
                    .collect(),
            ),
            "context" => Command::Context,
            "hotels" => Command::Quick(QuickAction::FindHotels),
            "food" => Command::Quick(QuickAction::LocalFood),
            "activities" => Command::Quick(QuickAction::Activities),
            "plan" => Command::Plan,
            "history" => Command::History,
            "providers" => Command::Providers,
            "reset" | "clear" => Command::Reset,
            "help" | "?" => Command::Help,
            "exit" | "quit" | "q" => Command::Exit,
            other => Command::Unknown(other.to_string()),
        };
        Some(command)
    }
}

enum LoopControl {
    Continue,
    Exit,
}

pub async fn run(
    mut session: ChatSession,
    travel: TravelOptions,
    startup_provider: Option<String>,
) -> Result<(), StdioError> {
    let mut stdout = io::stdout();
    let stdin = BufReader::new(io::stdin());
    let mut lines = stdin.lines();

    print_banner(&mut stdout).await?;
    print_help(&mut stdout).await?;

    if let Some(provider) = startup_provider {
        select_model(&mut session, &provider, None, &mut stdout).await?;
    }

    loop {
        prompt(&mut stdout, &session).await?;
        let line = match lines.next_line().await? {
            Some(line) => line,
            None => {
                write_line(&mut stdout, "\nInput closed. Leaving chat.").await?;
                break;
            }
        };

        let input = line.trim();
        if input.is_empty() {
            continue;
        }

        match Command::parse(input) {
            Some(command) => {
                match handle_command(command, &mut session, &travel, &mut stdout).await? {
                    LoopControl::Continue => continue,
                    LoopControl::Exit => break,
                }
            }
            None => {
                let result = session.ask(input).await;
                print_reply(&mut stdout, result).await?;
            }
        }
    }

    stdout.flush().await?;
    info!(session = session.id(), turns = session.history().len(), "Chat session ended");
    Ok(())
}

async fn handle_command(
    command: Command,
    session: &mut ChatSession,
    travel: &TravelOptions,
    stdout: &mut io::Stdout,
) -> Result<LoopControl, StdioError> {
    debug!(?command, "Processing chat command");

    match command {
        Command::Model {
            provider: Some(provider),
            credential,
        } => {
            select_model(session, &provider, credential.as_deref(), stdout).await?;
        }
        Command::Model { provider: None, .. } => match session.current_provider() {
            Ok(provider) => {
                let line = format!(
                    "Active model: {} ({})",
                    provider.display_name, provider.model_id
                );
                write_line(stdout, &line).await?;
            }
            Err(error) => write_line(stdout, &error.user_message()).await?,
        },
        Command::Destination(value) => {
            let context = std::mem::take(session.context_mut()).with_destination(value);
            session.set_context(context);
            print_context(stdout, session.context()).await?;
        }
        Command::Dates(value) => {
            let context = std::mem::take(session.context_mut()).with_dates(value);
            session.set_context(context);
            print_context(stdout, session.context()).await?;
        }
        Command::Budget(value) if value.is_empty() => {
            let line = format!("Budget options: {}", travel.budget_options.join(", "));
            write_line(stdout, &line).await?;
        }
        Command::Budget(value) => {
            let context = std::mem::take(session.context_mut()).with_budget(value);
            session.set_context(context);
            print_context(stdout, session.context()).await?;
        }
        Command::Interests(values) if values.is_empty() => {
            let line = format!("Suggested interests: {}", travel.interests.join(", "));
            write_line(stdout, &line).await?;
        }
        Command::Interests(values) => {
            let context = std::mem::take(session.context_mut()).with_interests(values);
            session.set_context(context);
            print_context(stdout, session.context()).await?;
        }
        Command::Context => print_context(stdout, session.context()).await?,
        Command::Quick(action) => {
            write_line(stdout, &format!("{}...", action.label())).await?;
            let result = session.quick_action(action).await;
            print_reply(stdout, result).await?;
        }
        Command::Plan => {
            let plan = plan_from_context(session.context());
            let result = session.travel_plan(&plan).await;
            print_reply(stdout, result).await?;
        }
        Command::History => {
            if session.history().is_empty() {
                write_line(stdout, "No messages yet.").await?;
            }
            for turn in session.history() {
                let speaker = match turn.role {
                    MessageRole::User => "You",
                    _ => "Travel Buddy",
                };
                write_line(stdout, &format!("{speaker}: {}", turn.content)).await?;
            }
        }
        Command::Providers => {
            write_line(stdout, "\nAvailable models:").await?;
            for provider in session.handler().registry().iter() {
                let line = format!(
                    "  {:<10} {} [{}] {}",
                    provider.id,
                    provider.display_name,
                    provider.family().as_str(),
                    provider.description
                );
                write_line(stdout, &line).await?;
            }
        }
        Command::Reset => {
            session.reset();
            write_line(stdout, "History and preferences cleared.").await?;
        }
        Command::Help => print_help(stdout).await?,
        Command::Exit => {
            write_line(stdout, "Goodbye, safe travels!").await?;
            return Ok(LoopControl::Exit);
        }
        Command::Unknown(name) => {
            write_line(stdout, &format!("Unknown command '/{name}'. Type /help.")).await?;
        }
    }
    Ok(LoopControl::Continue)
}

async fn select_model(
    session: &mut ChatSession,
    provider: &str,
    credential: Option<&str>,
    stdout: &mut io::Stdout,
) -> Result<(), StdioError> {
    match session.select_model(provider, credential).await {
        Ok(active) => {
            let line = format!("Using {} ({})", active.provider_id(), active.model());
            write_line(stdout, &line).await
        }
        Err(error) => write_line(stdout, &error.user_message()).await,
    }
    .map_err(StdioError::from)
}

fn plan_from_context(context: &TravelContext) -> TravelPlan {
    let interests: Vec<&str> = context.interests().collect();
    TravelPlan {
        destination: context.destination().unwrap_or_default().to_string(),
        dates: context.dates().map(str::to_string),
        budget: context.budget().map(str::to_string),
        preferences: (!interests.is_empty()).then(|| json!({ "interests": interests })),
    }
}

async fn print_reply(
    stdout: &mut io::Stdout,
    result: Result<String, SessionError>,
) -> io::Result<()> {
    match result {
        Ok(reply) => write_line(stdout, &format!("\n{reply}\n")).await,
        Err(error) => write_line(stdout, &error.user_message()).await,
    }
}

async fn print_context(stdout: &mut io::Stdout, context: &TravelContext) -> io::Result<()> {
    let interests: Vec<&str> = context.interests().collect();
    write_line(stdout, "Trip preferences:").await?;
    write_line(stdout, &format!("  Destination: {}", context.destination().unwrap_or("-"))).await?;
    write_line(stdout, &format!("  Dates:       {}", context.dates().unwrap_or("-"))).await?;
    write_line(stdout, &format!("  Budget:      {}", context.budget().unwrap_or("-"))).await?;
    let interests = if interests.is_empty() {
        "-".to_string()
    } else {
        interests.join(", ")
    };
    write_line(stdout, &format!("  Interests:   {interests}")).await
}

async fn print_banner(stdout: &mut io::Stdout) -> io::Result<()> {
    write_line(stdout, "Travel Buddy AI is ready.").await?;
    write_line(stdout, "Pick a model with /model, then ask anything about your trip.").await?;
    write_line(stdout, "Use /help for the list of commands.").await
}

async fn print_help(stdout: &mut io::Stdout) -> io::Result<()> {
    write_line(stdout, "\nAvailable commands:").await?;
    write_line(stdout, "  /model <id> [key]    Select a model (key for hosted providers)").await?;
    write_line(stdout, "  /providers           List configured models").await?;
    write_line(stdout, "  /dest <place>        Set the destination").await?;
    write_line(stdout, "  /dates <range>       Set travel dates").await?;
    write_line(stdout, "  /budget [level]      Set the budget or list options").await?;
    write_line(stdout, "  /interests [a, b]    Set interests or list suggestions").await?;
    write_line(stdout, "  /context             Show trip preferences").await?;
    write_line(stdout, "  /hotels              Hotel suggestions for the destination").await?;
    write_line(stdout, "  /food                Local food recommendations").await?;
    write_line(stdout, "  /activities          Activities and attractions").await?;
    write_line(stdout, "  /plan                Generate a full travel plan").await?;
    write_line(stdout, "  /history             Show the conversation").await?;
    write_line(stdout, "  /reset               Clear history and preferences").await?;
    write_line(stdout, "  /exit                Quit").await?;
    write_line(stdout, "Type a message without / to ask a question.").await
}

async fn prompt(stdout: &mut io::Stdout, session: &ChatSession) -> io::Result<()> {
    let label = match session.current_provider() {
        Ok(provider) => format!("{}> ", provider.id),
        Err(_) => "travel> ".to_string(),
    };
    stdout.write_all(label.as_bytes()).await?;
    stdout.flush().await
}

async fn write_line(stdout: &mut io::Stdout, line: &str) -> io::Result<()> {
    stdout.write_all(line.as_bytes()).await?;
    stdout.write_all(b"\n").await?;
    Ok(())
}
