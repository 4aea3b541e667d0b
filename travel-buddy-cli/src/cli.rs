use clap::{Parser, ValueEnum};

#[derive(Parser, Debug)]
#[command(
    name = "travel-buddy",
    version,
    about = "Travel planning assistant backed by local or hosted language models"
)]
pub struct Cli {
    /// Configuration file (defaults to config/travel.toml)
    #[arg(long)]
    pub config: Option<String>,
    #[arg(long, short, value_enum)]
    pub mode: Option<RunMode>,
    /// Overrides the REST listener host
    #[arg(long)]
    pub host: Option<String>,
    /// First port probed by the REST listener
    #[arg(long)]
    pub port: Option<u16>,
    /// Provider to initialize when the terminal chat starts
    #[arg(long)]
    pub provider: Option<String>,
}

#[derive(Debug, Clone, Copy, ValueEnum, PartialEq, Eq)]
pub enum RunMode {
    /// Interactive terminal chat
    Stdio,
    /// REST API server
    Rest,
    /// Run both terminal chat and REST simultaneously
    All,
}
