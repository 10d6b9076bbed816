//! # SchoolHub DB
//!
//! PostgreSQL connection pool and schema migrations.
//!
//! ```ignore
//! let pool = schoolhub_db::connect(&database_url, 10).await?;
//! schoolhub_db::run_migrations(&pool).await?;
//! ```

use std::time::Duration;

use sqlx::postgres::PgPoolOptions;
use tracing::info;

pub use sqlx::PgPool;

/// Opens a pool against `database_url`.
///
/// The pool is cheap to clone and is shared by every request handler.
pub async fn connect(database_url: &str, max_connections: u32) -> Result<PgPool, sqlx::Error> {
    let pool = PgPoolOptions::new()
        .max_connections(max_connections)
        .acquire_timeout(Duration::from_secs(5))
        .connect(database_url)
        .await?;

    info!(max_connections, "Database pool established");
    Ok(pool)
}

/// Applies every pending migration under `migrations/`.
pub async fn run_migrations(pool: &PgPool) -> Result<(), sqlx::migrate::MigrateError> {
    sqlx::migrate!("../../migrations").run(pool).await?;
    info!("Database migrations applied");
    Ok(())
}

/// Waits for in-flight connections to be returned, then closes the pool.
pub async fn close(pool: &PgPool) {
    pool.close().await;
    info!("Database pool closed");
}
