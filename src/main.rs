//! Winona - draft tournament helper
//!
//! A Discord bot and CLI that keeps a store of species, users and guilds,
//! and checks a shared draft sheet for illegal, duplicate and banned picks.

mod catalog;
mod cli;
mod common;
mod config;
mod discord;
mod sheet;
mod store;
mod validation;

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use tokio::signal;
use tokio::sync::watch;
use tracing::{debug, error, info, warn};

use cli::actions;
use cli::{Cli, Command};
use config::env::get_config_path;
use config::{validate_bot_config, validate_config, Config};
use discord::DiscordBot;
use sheet::SheetSource;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    let cli = Cli::parse();
    debug!("Winona v{} starting...", env!("CARGO_PKG_VERSION"));

    // Load configuration
    let config_path = get_config_path();
    debug!("Loading configuration from {}...", config_path);

    let mut config = config::load(&config_path).map_err(|e| {
        error!("Failed to load configuration: {}", e);
        error!("Please ensure {} is properly formatted.", config_path);
        e
    })?;

    if let Some(db_file) = &cli.db_file {
        config.database.path = db_file.display().to_string();
    }
    if let Some(url) = &cli.draft_sheet_url {
        config.sheet.draft_url = Some(url.clone());
    }
    validate_config(&config)?;

    if cli.command == Command::Bot {
        return run_bot(config).await;
    }

    let db_path = PathBuf::from(&config.database.path);
    let sheet = SheetSource::from_config(&config, cli.sheet_file);
    actions::run(cli.command, &db_path, sheet).await
}

async fn run_bot(config: Config) -> Result<()> {
    validate_bot_config(&config)?;

    info!("Configuration loaded successfully");
    info!("  Database: {}", config.database.path);
    info!(
        "  Draft sheet: {}",
        config.sheet.draft_url.as_deref().unwrap_or("-")
    );

    let (shutdown_tx, shutdown_rx) = watch::channel(false);
    let bot = DiscordBot::build(&config, shutdown_rx).await?;

    info!("Starting Discord bot...");
    let mut discord_task = tokio::spawn(bot.run());

    let shutdown = tokio::select! {
        biased;
        _ = shutdown_signal() => {
            info!("Shutdown signal received - stopping bot...");
            true
        }
        _ = &mut discord_task => false,
    };

    if shutdown {
        if let Err(e) = shutdown_tx.send(true) {
            debug!("Shutdown channel closed (bot already exited): {}", e);
        }
        let timeout = tokio::time::Duration::from_secs(5);
        match tokio::time::timeout(timeout, discord_task).await {
            Ok(Ok(())) => info!("Discord bot stopped gracefully"),
            Ok(Err(e)) => warn!("Discord task panicked: {}", e),
            Err(_) => warn!("Discord shutdown timed out"),
        }
    }

    info!("Exiting...");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => info!("Received Ctrl+C"),
        _ = terminate => info!("Received SIGTERM"),
    }
}
