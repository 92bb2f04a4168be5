use std::time::Duration;

use sqlx::{
    postgres::{PgConnectOptions, PgPoolOptions},
    PgPool,
};
use tracing::info;

use crate::config::DatabaseConfig;
use crate::database::store::{StoreError, StoreResult};

/// Builds and maintains the application's Postgres pool
pub struct DatabaseManager;

impl DatabaseManager {
    /// Build the pool without connecting; connections are opened on first use
    /// so the server can start (and report degraded health) without a database.
    pub fn connect_lazy(config: &DatabaseConfig) -> StoreResult<PgPool> {
        let options: PgConnectOptions = config
            .url
            .parse()
            .map_err(|e: sqlx::Error| StoreError::Unavailable(format!("invalid DATABASE_URL: {}", e)))?;

        let pool = PgPoolOptions::new()
            .max_connections(config.max_connections)
            .acquire_timeout(Duration::from_secs(config.connection_timeout))
            .connect_lazy_with(options);

        info!("Configured database pool for {}", Self::redacted_url(&config.url));
        Ok(pool)
    }

    /// Apply the embedded migrations in `migrations/`
    pub async fn migrate(pool: &PgPool) -> StoreResult<()> {
        sqlx::migrate!("./migrations").run(pool).await?;
        info!("Database migrations applied");
        Ok(())
    }

    /// Database URL with any password replaced, for logging
    pub fn redacted_url(raw: &str) -> String {
        match url::Url::parse(raw) {
            Ok(mut url) => {
                if url.password().is_some() {
                    let _ = url.set_password(Some("****"));
                }
                url.into()
            }
            Err(_) => "<invalid url>".to_string(),
        }
    }
}
