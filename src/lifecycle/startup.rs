//! Startup orchestration.
//!
//! # Design Decisions
//! - Fail fast: an unreachable store or a missing table is fatal
//! - The listener is bound only after the store is ready

use thiserror::Error;

use crate::config::{ConfigError, ServiceConfig};
use crate::store::{self, ArchivePersister, StoreError};

/// Errors that stop the process before it serves traffic.
#[derive(Debug, Error)]
pub enum StartupError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("failed to bind {address}: {source}")]
    Bind {
        address: String,
        #[source]
        source: std::io::Error,
    },
}

/// Connect to the store and make sure the `requestlog` table exists.
pub async fn bootstrap(config: &ServiceConfig) -> Result<ArchivePersister, StartupError> {
    let db = store::connect(&config.database).await?;
    store::ensure_schema(&db).await?;
    Ok(ArchivePersister::new(db))
}

#[cfg(test)]
mod tests {
    use super::*;
    use sea_orm::{EntityTrait, PaginatorTrait};

    use crate::store::entities::LoggedRequest;

    #[tokio::test]
    async fn test_bootstrap_prepares_schema() {
        let mut config = ServiceConfig::default();
        config.database.url = "sqlite::memory:".into();
        config.database.max_connections = 1;

        let persister = bootstrap(&config).await.unwrap();
        let rows = LoggedRequest::find().count(persister.connection()).await.unwrap();
        assert_eq!(rows, 0);
    }

    #[tokio::test]
    async fn test_bootstrap_fails_on_unreachable_store() {
        let mut config = ServiceConfig::default();
        config.database.url = "sqlite:///nonexistent-dir/requestlog.db".into();

        let err = bootstrap(&config).await.unwrap_err();
        assert!(matches!(err, StartupError::Store(StoreError::Connect(_))));
    }

    #[tokio::test]
    async fn test_bootstrap_fails_on_unreachable_postgres() {
        let mut config = ServiceConfig::default();
        config.database.url = "postgres://127.0.0.1:1/requestlog".into();
        config.database.connect_timeout_secs = 1;

        let err = bootstrap(&config).await.unwrap_err();
        assert!(matches!(err, StartupError::Store(StoreError::Connect(_))));
    }
}
