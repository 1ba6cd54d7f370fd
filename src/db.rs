use anyhow::{Context, Result};
use sqlx::MySqlPool;
use sqlx::mysql::MySqlPoolOptions;

/// Builds the process-wide pool once at startup; handlers receive it through
/// the repository, never through a global.
pub async fn init_db(database_url: &str, max_connections: u32) -> Result<MySqlPool> {
    MySqlPoolOptions::new()
        .max_connections(max_connections)
        .connect(database_url)
        .await
        .context("Failed to connect to database")
}
