//! Greenlight - approval request detail frontend.
//!
//! Renders one approval request in the terminal and lets the user approve
//! or deny it. The request arrives as a JSON file (the serialized
//! `ApprovalRequest` form) or via `--demo`; decisions run against a
//! simulated SDK since the real one is supplied by a hosting application.

#![deny(unsafe_code)]
#![warn(missing_docs)]
#![deny(clippy::all)]
#![warn(unreachable_pub)]
#![deny(clippy::unwrap_used)]
#![cfg_attr(test, allow(clippy::unwrap_used))]

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, bail};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use greenlight_core::ApprovalRequest;
use greenlight_tui::demo::{DemoAuthClient, DemoImageLoader, DemoOutcome, demo_request};
use greenlight_tui::terminal::{init_terminal, restore_terminal};
use greenlight_tui::{App, FrontendConfig};

/// Greenlight - approval request detail frontend.
#[derive(Parser)]
#[command(name = "greenlight")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Path to a serialized approval request (JSON).
    request: Option<PathBuf>,

    /// Path to a configuration file (TOML).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Use the bundled demo request.
    #[arg(long)]
    demo: bool,

    /// Simulate an SDK failure for every decision.
    #[arg(long)]
    fail: bool,

    /// Simulate a deleted device registration (implies failures).
    #[arg(long)]
    deregistered: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("warn,greenlight_tui=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = FrontendConfig::load(cli.config.as_deref())?;

    let request: ApprovalRequest = if let Some(path) = &cli.request {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("reading request from {}", path.display()))?;
        serde_json::from_str(&raw)
            .with_context(|| format!("parsing request from {}", path.display()))?
    } else if cli.demo {
        demo_request()
    } else {
        bail!("provide a request file or pass --demo");
    };

    let outcome = if cli.deregistered {
        DemoOutcome::FailDeregistered
    } else if cli.fail {
        DemoOutcome::Fail
    } else {
        DemoOutcome::Succeed
    };
    let client = Arc::new(DemoAuthClient::new(outcome));
    let loader = Arc::new(DemoImageLoader::new());

    let mut terminal = init_terminal()?;
    let mut app = App::new(request, client, loader, config);
    let result = app.run(&mut terminal).await;
    restore_terminal(&mut terminal)?;

    result.map_err(Into::into)
}
