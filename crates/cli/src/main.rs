mod app;
mod language;
mod logging;
mod render;
mod strings;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use providers::tutor::{TutorConfig, TutorService};
use tracing::info;

#[derive(Parser)]
#[command(name = "tutor", about = "Chat with an AI tutor and get feedback on code")]
struct Cli {
    /// Chat proxy endpoint (overrides config and TUTOR_PROXY_URL)
    #[arg(long, global = true)]
    proxy_url: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Interactive tutor chat
    Chat {
        /// Subject the tutor specializes in
        #[arg(long, default_value = "JavaScript")]
        topic: String,
    },
    /// One-shot feedback on a source file
    Review {
        path: PathBuf,
        /// Fence tag for the code; inferred from the extension when omitted
        #[arg(long)]
        language: Option<String>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let _guard = logging::init()?;

    let mut cfg = TutorConfig::from_env_and_file()?;
    if let Some(url) = &cli.proxy_url {
        cfg.set_proxy_url(url)?;
    }
    info!(target: "cli", "proxy={} model={} fallback={} timeout_ms={}", cfg.proxy_url, cfg.primary.model, cfg.fallback.model, cfg.timeout.as_millis());
    let svc = TutorService::from_config(cfg)?;

    match cli.command {
        Command::Chat { topic } => app::run_chat(&svc, topic).await,
        Command::Review { path, language } => app::run_review(&svc, &path, language).await,
    }
}
