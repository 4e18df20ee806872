//! DsmDash CLI - Main entry point

mod tui;

use clap::Parser;
use dsm_foundation::MonitorConfig;
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// DsmDash - Terminal dashboard for one DSM cluster node
#[derive(Parser, Debug)]
#[command(name = "dsmdash")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Node identity, passed through to the backend
    node_id: String,

    /// Path to a specific config file (skips global/project merge)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Backend binary path (overrides config)
    #[arg(long)]
    backend: Option<PathBuf>,

    /// Cluster config path, passed through to the backend (overrides config)
    #[arg(long)]
    cluster_config: Option<PathBuf>,

    /// Relaunch the backend when it exits
    #[arg(long)]
    restart: bool,

    /// TUI theme (dark, light)
    #[arg(long)]
    theme: Option<String>,

    /// Enable debug logging
    #[arg(short, long)]
    debug: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    // Initialize logging (stderr - stdout은 TUI가 쓴다)
    let log_level = if args.debug { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(log_level)),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .init();

    // Load configuration
    let mut config = match &args.config {
        Some(path) => MonitorConfig::load_from(path)?,
        None => MonitorConfig::load().unwrap_or_else(|e| {
            eprintln!("Warning: Failed to load config: {}", e);
            MonitorConfig::default()
        }),
    };

    // CLI 플래그가 설정을 덮어쓴다
    if let Some(backend) = args.backend {
        config.backend = backend;
    }
    if let Some(cluster_config) = args.cluster_config {
        config.cluster_config = cluster_config;
    }
    if args.restart {
        config.restart = true;
    }
    if let Some(theme) = args.theme {
        config.theme = theme;
    }

    tui::run(&config, &args.node_id).await
}
