//! Request capture middleware.
//!
//! Buffers the body once, archives the request, hands the record to the
//! persister and forwards the request with the buffered body replayed.

use std::sync::Arc;

use axum::{
    body::{Body, Bytes},
    extract::{Request, State},
    middleware::{from_fn_with_state, Next},
    response::Response,
    Router,
};

use crate::archive::{ArchiveRequest, CaptureOptions};
use crate::http::request::request_id;
use crate::observability::metrics::{self, CaptureStage};
use crate::store::ArchivePersister;

/// State shared by every invocation of the capture middleware.
#[derive(Clone)]
pub struct CaptureState {
    persister: ArchivePersister,
    options: Arc<CaptureOptions>,
}

impl CaptureState {
    pub fn new(persister: ArchivePersister, options: CaptureOptions) -> Self {
        Self {
            persister,
            options: Arc::new(options),
        }
    }
}

/// Wrap `app` so every request reaching it is archived.
pub fn capture_requests(app: Router, state: CaptureState) -> Router {
    app.layer(from_fn_with_state(state, capture_middleware))
}

pub async fn capture_middleware(
    State(state): State<CaptureState>,
    request: Request,
    next: Next,
) -> Response {
    let (parts, body) = request.into_parts();

    let body = match axum::body::to_bytes(body, usize::MAX).await {
        Ok(bytes) => bytes,
        Err(e) => {
            tracing::warn!(
                method = %parts.method,
                uri = %parts.uri,
                error = %e,
                "Failed to read request body, archiving empty body"
            );
            metrics::record_capture_error(CaptureStage::Body);
            Bytes::new()
        }
    };

    let record = ArchiveRequest::capture(&parts, &body, &state.options);
    metrics::record_capture();

    match record.to_json() {
        Ok(payload) => {
            // Not awaited: the write must never delay the response.
            state.persister.dispatch(payload, request_id(&parts.headers));
        }
        Err(e) => {
            tracing::error!(
                method = %parts.method,
                uri = %parts.uri,
                error = %e,
                "Failed to encode archive record, skipping persistence"
            );
            metrics::record_capture_error(CaptureStage::Serialize);
        }
    }

    next.run(Request::from_parts(parts, Body::from(body))).await
}
