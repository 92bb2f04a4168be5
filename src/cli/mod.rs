use std::sync::Arc;

use anyhow::Context;
use clap::{Parser, Subcommand};

use crate::app::app;
use crate::config::AppConfig;
use crate::database::{DatabaseManager, PgStore};
use crate::state::AppState;

#[derive(Parser)]
#[command(name = "estate-api")]
#[command(about = "Property-management API server")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand)]
pub enum Command {
    #[command(about = "Run the HTTP server (default)")]
    Serve {
        #[arg(long, help = "Port to listen on, overriding PORT")]
        port: Option<u16>,
    },

    #[command(about = "Apply pending database migrations and exit")]
    Migrate,
}

pub async fn run(cli: Cli, config: AppConfig) -> anyhow::Result<()> {
    match cli.command.unwrap_or(Command::Serve { port: None }) {
        Command::Serve { port } => serve(config, port).await,
        Command::Migrate => migrate(&config).await,
    }
}

async fn serve(mut config: AppConfig, port: Option<u16>) -> anyhow::Result<()> {
    if let Some(port) = port {
        config.server.port = port;
    }
    config
        .validate()
        .map_err(|e| anyhow::anyhow!("invalid configuration: {}", e))?;

    let pool = DatabaseManager::connect_lazy(&config.database)?;
    let bind_addr = format!("{}:{}", config.server.host, config.server.port);
    let state = AppState::new(Arc::new(PgStore::new(pool)), config);

    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", bind_addr))?;

    tracing::info!(
        "Estate API listening on http://{} ({:?})",
        bind_addr,
        state.config.environment
    );

    axum::serve(listener, app(state))
        .await
        .context("server error")?;
    Ok(())
}

async fn migrate(config: &AppConfig) -> anyhow::Result<()> {
    if config.database.url.is_empty() {
        anyhow::bail!("DATABASE_URL is not configured");
    }
    let pool = DatabaseManager::connect_lazy(&config.database)?;
    DatabaseManager::migrate(&pool).await?;
    tracing::info!("Migrations applied");
    Ok(())
}
