//! Failure injection tests: the logging path must never alter the response.

use std::io;

use axum::body::{Body, Bytes};
use axum::http::{Request, StatusCode};
use request_ledger::lifecycle::{bootstrap, StartupError};
use request_ledger::store::StoreError;
use tower::ServiceExt;

mod common;

async fn post_hello(app: axum::Router) -> (StatusCode, Bytes) {
    let request = Request::builder()
        .method("POST")
        .uri("/submit")
        .header("Content-Type", "text/plain")
        .body(Body::from("hello"))
        .unwrap();
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, body)
}

#[tokio::test]
async fn test_missing_table_does_not_change_response() {
    let healthy = common::memory_persister(true).await;
    let broken = common::memory_persister(false).await;

    let expected = post_hello(common::layered_router(healthy)).await;
    let actual = post_hello(common::layered_router(broken)).await;

    assert_eq!(actual, expected);
    assert_eq!(actual.0, StatusCode::OK);
}

#[tokio::test]
async fn test_closed_store_does_not_change_response() {
    let persister = common::memory_persister(true).await;
    persister.connection().clone().close().await.unwrap();

    let (status, body) = post_hello(common::layered_router(persister)).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(&body[..], b"hello");
}

#[tokio::test]
async fn test_body_read_failure_archives_empty_body() {
    let persister = common::memory_persister(true).await;
    let app = common::layered_router(persister.clone());

    let chunks: Vec<Result<Bytes, io::Error>> = vec![
        Ok(Bytes::from_static(b"partial")),
        Err(io::Error::new(io::ErrorKind::ConnectionReset, "client went away")),
    ];
    let request = Request::builder()
        .method("POST")
        .uri("/upload")
        .body(Body::from_stream(futures_util::stream::iter(chunks)))
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let echoed = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    assert!(echoed.is_empty(), "downstream should see an empty body");

    assert_eq!(common::wait_for_rows(persister.connection(), 1).await, 1);
    let rows = common::fetch_rows(persister.connection()).await;
    assert_eq!(rows[0].request["postData"]["text"], "");
    assert_eq!(rows[0].request["bodySize"], 0);
}

#[tokio::test]
async fn test_startup_fails_on_unreachable_store() {
    let mut config = common::test_config();
    config.database.url = "sqlite:///nonexistent-dir/requestlog.db".into();

    let result = bootstrap(&config).await;

    assert!(matches!(
        result,
        Err(StartupError::Store(StoreError::Connect(_)))
    ));
}

#[tokio::test]
async fn test_startup_fails_on_unreachable_postgres() {
    let mut config = common::test_config();
    config.database.url = "postgres://127.0.0.1:1/requestlog".into();
    config.database.connect_timeout_secs = 1;

    let result = bootstrap(&config).await;

    assert!(matches!(
        result,
        Err(StartupError::Store(StoreError::Connect(_)))
    ));
}
