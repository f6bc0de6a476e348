//! Connection pool setup and schema bootstrap.

use std::time::Duration;

use sea_orm::{ConnectOptions, ConnectionTrait, Database, DatabaseConnection};
use sea_orm_migration::{MigratorTrait, SchemaManager};

use crate::config::DatabaseConfig;
use crate::store::migrator::{requestlog_table, Migrator};
use crate::store::{StoreError, StoreResult};

/// Open the shared connection pool.
///
/// Fails if the store cannot be reached within the configured timeout.
pub async fn connect(config: &DatabaseConfig) -> StoreResult<DatabaseConnection> {
    let timeout = Duration::from_secs(config.connect_timeout_secs);

    let mut options = ConnectOptions::new(config.url.clone());
    options
        .max_connections(config.max_connections)
        .connect_timeout(timeout)
        .acquire_timeout(timeout)
        .sqlx_logging(false);

    let db = Database::connect(options)
        .await
        .map_err(StoreError::Connect)?;

    tracing::info!(
        backend = ?db.get_database_backend(),
        max_connections = config.max_connections,
        "Store connected"
    );
    Ok(db)
}

/// Create the `requestlog` table if it does not exist. Safe to call repeatedly.
///
/// The table is re-created even when the migration history says it was
/// applied, so a table dropped out-of-band is restored on the next start.
pub async fn ensure_schema(db: &DatabaseConnection) -> StoreResult<()> {
    Migrator::up(db, None).await.map_err(StoreError::Schema)?;

    let manager = SchemaManager::new(db);
    manager
        .create_table(requestlog_table())
        .await
        .map_err(StoreError::Schema)?;
    tracing::info!("requestlog schema ready");
    Ok(())
}
