//! HTTP request ledger library.
//!
//! Middleware that archives every inbound request as an HTTP-archive request
//! record and writes it to a relational store without delaying the response.

pub mod archive;
pub mod config;
pub mod http;
pub mod lifecycle;
pub mod observability;
pub mod store;

pub use archive::ArchiveRequest;
pub use config::ServiceConfig;
pub use http::HttpServer;
pub use lifecycle::Shutdown;
pub use store::ArchivePersister;
