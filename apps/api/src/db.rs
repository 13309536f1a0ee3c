use std::time::Duration;

use anyhow::Result;
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use tracing::info;

/// Creates a PostgreSQL pool for the chat-log warehouse.
///
/// The pool connects lazily, so an unreachable warehouse never blocks startup;
/// failures surface on first use and are handled by the best-effort sink.
pub fn create_lazy_pool(database_url: &str) -> Result<PgPool> {
    let pool = PgPoolOptions::new()
        .max_connections(5)
        .acquire_timeout(Duration::from_secs(5))
        .connect_lazy(database_url)?;

    info!("Warehouse pool configured (lazy connect)");
    Ok(pool)
}
