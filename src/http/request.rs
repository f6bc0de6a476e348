//! Request ID handling.
//!
//! # Responsibilities
//! - Generate a UUID v4 request ID when the client did not send one
//! - Expose the ID to the capture path for log correlation
//!
//! # Design Decisions
//! - Request ID added before capture so it is part of the archived headers
//! - Client-supplied IDs are kept as-is

use axum::http::HeaderMap;

/// Header carrying the request ID.
pub const X_REQUEST_ID: &str = "x-request-id";

/// Read the request ID from the headers, if present and printable.
pub fn request_id(headers: &HeaderMap) -> Option<String> {
    headers
        .get(X_REQUEST_ID)
        .and_then(|v| v.to_str().ok())
        .map(ToString::to_string)
}
