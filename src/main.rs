//! Reply Pro - advertising inquiry reply drafter
//!
//! Paste a client inquiry, get back a reply email, a budget range and a
//! list of attachments to send along.

use anyhow::{Context, Result};
use clap::Parser;
use reply_pro::app;
use reply_pro::config::{self, Config};
use reply_pro::reply::{GeminiClient, GenerationError};
use std::fs::{self, OpenOptions};
use std::io::{self, IsTerminal};
use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser, Debug)]
#[command(
    name = "reply-pro",
    about = "Draft replies to advertising inquiries with Gemini",
    long_about = "Ki's Smart AI Reply Pro\n\n\
                  Turns a raw client inquiry into a reply email,\n\
                  a budget estimate and suggested attachments.",
    version
)]
struct Args {
    /// Set up the Gemini API key (stored in the system keychain)
    #[arg(long)]
    setup: bool,

    /// Gemini model to use for this session
    #[arg(long)]
    model: Option<String>,

    /// Write logs here instead of the config directory
    #[arg(long)]
    log_file: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    if let Err(e) = init_logging(args.log_file.clone()) {
        eprintln!("  ! Logging disabled: {:#}", e);
    }

    if args.setup {
        config::setup_api_key_interactive().map_err(|e| anyhow::anyhow!("{}", e))?;
        return Ok(());
    }

    let mut config = Config::load();
    if let Some(model) = args.model {
        config.model = model;
    }

    let client = match GeminiClient::from_config(&config) {
        Ok(client) => client,
        Err(GenerationError::MissingApiKey) => {
            run_key_setup()?;
            GeminiClient::from_config(&config)
                .context("API key was saved but cannot be read back; set GEMINI_API_KEY instead")?
        }
        Err(e) => return Err(e.into()),
    };

    let model = client.model().to_string();
    app::run_tui(Arc::new(client), model).await
}

/// First run without a key: ask for one, or explain how to provide it.
fn run_key_setup() -> Result<()> {
    if !io::stdin().is_terminal() {
        anyhow::bail!(
            "No Gemini API key found. Run `reply-pro --setup` or set GEMINI_API_KEY."
        );
    }
    loop {
        match config::setup_api_key_interactive() {
            Ok(_) => return Ok(()),
            Err(err) if err == "No API key provided" => {
                println!();
                println!("  An API key is required to continue. Press Ctrl+C to exit.");
                println!();
            }
            Err(err) => return Err(anyhow::anyhow!("{}", err)),
        }
    }
}

/// Log to a file; the terminal belongs to the TUI.
fn init_logging(path: Option<PathBuf>) -> Result<()> {
    let path = path
        .or_else(Config::default_log_path)
        .context("no config directory for the log file")?;
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("creating {}", parent.display()))?;
    }
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .with_context(|| format!("opening {}", path.display()))?;

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_env("REPLY_PRO_LOG")
                .unwrap_or_else(|_| "reply_pro=info".into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .with_ansi(false)
                .with_writer(Mutex::new(file)),
        )
        .init();

    tracing::info!(log = %path.display(), "starting reply-pro");
    Ok(())
}
