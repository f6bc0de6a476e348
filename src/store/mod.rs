//! Durable storage for archived requests.
//!
//! # Data Flow
//! ```text
//! startup:
//!     connection.rs (pooled connect) → migrator (CREATE TABLE IF NOT EXISTS requestlog)
//!
//! per request:
//!     serialized record
//!     → persister.rs dispatch (spawned task, not awaited)
//!     → INSERT INTO requestlog (request)
//!     → outcome logged, never returned
//! ```
//!
//! # Design Decisions
//! - One pool per process, shared by every in-flight write
//! - No retries, no ordering between concurrent inserts
//! - Schema setup runs once at startup; failure there is fatal

pub mod connection;
pub mod entities;
pub mod migrator;
pub mod persister;

use sea_orm::DbErr;
use thiserror::Error;

pub use connection::{connect, ensure_schema};
pub use persister::ArchivePersister;

/// Errors raised by the store.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Could not open the connection pool.
    #[error("failed to connect to store: {0}")]
    Connect(#[source] DbErr),

    /// Destination table could not be created.
    #[error("failed to prepare requestlog schema: {0}")]
    Schema(#[source] DbErr),

    /// Row insert was rejected or the store was unreachable.
    #[error("failed to insert request record: {0}")]
    Insert(#[source] DbErr),
}

/// Result type for store operations.
pub type StoreResult<T> = Result<T, StoreError>;
