//! Focuskeeper CLI — one subcommand per assistant lifecycle event.
//!
//! Commands:
//! - `session-start` — register the session and inject tiered context
//! - `stop`          — refresh the session's last-active timestamp
//! - `pre-compact`   — persist preserved state and emit a compact summary
//! - `status`        — operator report of the current focus state
//!
//! Hook commands read the host's JSON payload from stdin and write the
//! response envelope to stdout. All logging goes to stderr so stdout stays
//! a single self-contained JSON blob per call.

use clap::{Parser, Subcommand};

mod commands;
mod payload;

#[derive(Parser)]
#[command(
    name = "focuskeeper",
    about = "Focuskeeper — durable focus state for assistant sessions",
    version,
    author
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging (stderr)
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Handle the SessionStart hook: register and inject context
    SessionStart,

    /// Handle the Stop hook: touch the session timestamp
    Stop,

    /// Handle the PreCompact hook: preserve state across compaction
    PreCompact,

    /// Show the current focus state for this project
    Status,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // stdout carries the hook envelope; logs must go to stderr.
    let filter = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(filter)),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    match cli.command {
        Commands::SessionStart => commands::session_start::run().await?,
        Commands::Stop => commands::stop::run().await?,
        Commands::PreCompact => commands::pre_compact::run().await?,
        Commands::Status => commands::status::run().await?,
    }

    Ok(())
}
