use clap::Parser;
use tracing_subscriber::EnvFilter;

use estate_api::cli::{self, Cli};
use estate_api::config::config;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env if present so cargo run picks up DATABASE_URL, JWT_SECRET, etc.
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("estate_api=info,tower_http=info")),
        )
        .init();

    let config = config().clone();
    tracing::info!("Starting Estate API in {:?} mode", config.environment);

    cli::run(Cli::parse(), config).await
}
