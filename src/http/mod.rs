//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, layers)
//!     → request.rs (assign request ID)
//!     → middleware/capture.rs (buffer body, build record, dispatch write)
//!     → downstream handler (body replayed from buffer)
//!     → response returned unchanged
//! ```

pub mod middleware;
pub mod request;
pub mod server;

pub use middleware::{capture_requests, CaptureState};
pub use request::X_REQUEST_ID;
pub use server::{default_app, HttpServer};
