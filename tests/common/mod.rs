//! Shared utilities for integration and load testing.

use std::net::SocketAddr;
use std::time::Duration;

use axum::{body::Bytes, routing::any, Router};
use request_ledger::config::ServiceConfig;
use request_ledger::http::HttpServer;
use request_ledger::lifecycle::Shutdown;
use request_ledger::store::entities::{logged_request, LoggedRequest};
use request_ledger::store::{connect, ensure_schema, ArchivePersister};
use sea_orm::{DatabaseConnection, EntityTrait, PaginatorTrait, QueryOrder};
use tokio::net::TcpListener;

/// Config pointing at a private in-memory SQLite database.
pub fn test_config() -> ServiceConfig {
    let mut config = ServiceConfig::default();
    config.listener.bind_address = "127.0.0.1:0".into();
    config.database.url = "sqlite::memory:".into();
    config.database.max_connections = 1;
    config
}

/// Persister over a fresh in-memory store. Without the schema every insert fails.
pub async fn memory_persister(with_schema: bool) -> ArchivePersister {
    let config = test_config();
    let db = connect(&config.database).await.unwrap();
    if with_schema {
        ensure_schema(&db).await.unwrap();
    }
    ArchivePersister::new(db)
}

/// Downstream app that answers with the request body it received.
pub fn echo_app() -> Router {
    async fn echo(body: Bytes) -> Bytes {
        body
    }

    Router::new()
        .route("/", any(echo))
        .route("/{*path}", any(echo))
}

/// Layered router for `oneshot` style tests.
#[allow(dead_code)]
pub fn layered_router(persister: ArchivePersister) -> Router {
    HttpServer::new(test_config(), persister, echo_app()).router()
}

/// Start a real server on an ephemeral port.
#[allow(dead_code)]
pub async fn start_server(persister: ArchivePersister) -> (SocketAddr, Shutdown) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let shutdown = Shutdown::new();
    let server = HttpServer::new(test_config(), persister, echo_app());
    let server_shutdown = shutdown.subscribe();

    tokio::spawn(async move {
        let _ = server.run(listener, server_shutdown).await;
    });

    (addr, shutdown)
}

/// Poll until the table holds `expected` rows or five seconds pass.
pub async fn wait_for_rows(db: &DatabaseConnection, expected: u64) -> u64 {
    let mut rows = 0;
    for _ in 0..100 {
        rows = LoggedRequest::find().count(db).await.unwrap();
        if rows >= expected {
            break;
        }
        tokio::time::sleep(Duration::from_millis(50)).await;
    }
    rows
}

/// Wait for `expected` rows, then give late writes time to land and recount.
#[allow(dead_code)]
pub async fn settled_row_count(db: &DatabaseConnection, expected: u64) -> u64 {
    wait_for_rows(db, expected).await;
    tokio::time::sleep(Duration::from_millis(300)).await;
    LoggedRequest::find().count(db).await.unwrap()
}

/// Every persisted row, ordered by id.
pub async fn fetch_rows(db: &DatabaseConnection) -> Vec<logged_request::Model> {
    LoggedRequest::find()
        .order_by_asc(logged_request::Column::Id)
        .all(db)
        .await
        .unwrap()
}

/// Names and values of the archived pairs under `key` ("headers" or "queryString").
#[allow(dead_code)]
pub fn pairs(record: &serde_json::Value, key: &str, name: &str) -> Vec<String> {
    record[key]
        .as_array()
        .unwrap()
        .iter()
        .filter(|pair| pair["name"].as_str().unwrap().eq_ignore_ascii_case(name))
        .map(|pair| pair["value"].as_str().unwrap().to_string())
        .collect()
}
