//! Fire-and-forget persistence of archived requests.

use std::time::Instant;

use sea_orm::{ActiveModelTrait, DatabaseConnection, Set};
use tokio::task::JoinHandle;

use crate::observability::metrics;
use crate::store::entities::logged_request;
use crate::store::{StoreError, StoreResult};

/// Handle used by the capture path to append records.
///
/// Cloning is cheap; every clone shares the same connection pool.
#[derive(Clone, Debug)]
pub struct ArchivePersister {
    db: DatabaseConnection,
}

impl ArchivePersister {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// The underlying connection pool.
    pub fn connection(&self) -> &DatabaseConnection {
        &self.db
    }

    /// Insert one row and return the id the store assigned to it.
    pub async fn persist(&self, payload: serde_json::Value) -> StoreResult<i32> {
        let row = logged_request::ActiveModel {
            request: Set(payload),
            ..Default::default()
        };

        let model = row.insert(&self.db).await.map_err(StoreError::Insert)?;
        Ok(model.id)
    }

    /// Spawn the insert as an independent task.
    ///
    /// The outcome is only logged. Callers on the request path must not await
    /// the returned handle.
    pub fn dispatch(&self, payload: serde_json::Value, request_id: Option<String>) -> JoinHandle<()> {
        let persister = self.clone();

        tokio::spawn(async move {
            let start = Instant::now();
            let request_id = request_id.as_deref().unwrap_or("unknown");

            match persister.persist(payload).await {
                Ok(id) => {
                    tracing::debug!(request_id = %request_id, id, "Request record persisted");
                    metrics::record_persisted(start);
                }
                Err(e) => {
                    tracing::error!(request_id = %request_id, error = %e, "Failed to persist request record");
                    metrics::record_persist_failure(start);
                }
            }
        })
    }
}
