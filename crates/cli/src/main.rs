//! Postcord CLI
//!
//! Sends chat notifications for publishing events from the command line.

mod commands;
mod services;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::{EnvFilter, fmt};

/// Postcord CLI: announce content events on a chat webhook.
#[derive(Parser, Debug)]
#[command(name = "postcord", version, about)]
struct Cli {
    /// Path to the TOML configuration file. A missing file means defaults.
    #[arg(
        long,
        env = "POSTCORD_CONFIG",
        default_value = "postcord.toml",
        global = true
    )]
    config: PathBuf,

    /// Bot token; overrides `bot.token` from the configuration.
    #[arg(long, env = "POSTCORD_BOT_TOKEN", hide_env_values = true, global = true)]
    token: Option<String>,

    /// Log outbound requests instead of sending them.
    #[arg(long, global = true)]
    dry_run: bool,

    /// Output format.
    #[arg(long, default_value = "text", global = true)]
    format: OutputFormat,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Clone, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Send an ad-hoc message.
    Send(commands::send::SendArgs),
    /// Feed a domain event from a JSON file through the adapters.
    Event(commands::event::EventArgs),
    /// Show the webhook URL a context resolves to.
    Resolve(commands::resolve::ResolveArgs),
    /// Inspect sent markers.
    Markers(commands::markers::MarkersArgs),
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let options = services::Options {
        config: cli.config,
        token: cli.token,
        dry_run: cli.dry_run,
    };

    match cli.command {
        Command::Send(args) => commands::send::run(&options, &args, &cli.format).await,
        Command::Event(args) => commands::event::run(&options, &args, &cli.format).await,
        Command::Resolve(args) => commands::resolve::run(&options, &args),
        Command::Markers(args) => commands::markers::run(&options, &args, &cli.format).await,
    }
}
