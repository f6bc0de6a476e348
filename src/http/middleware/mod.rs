//! HTTP middleware.

pub mod capture;

pub use capture::{capture_middleware, capture_requests, CaptureState};
