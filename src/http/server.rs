//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Wrap the downstream Router with capture, request ID and trace layers
//! - Bind server to listener
//! - Serve until the shutdown signal fires

use axum::{routing::any, Router};
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower_http::{
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    trace::TraceLayer,
};

use crate::config::ServiceConfig;
use crate::http::middleware::{capture_requests, CaptureState};
use crate::store::ArchivePersister;

/// HTTP server that archives every request before handing it to `app`.
pub struct HttpServer {
    router: Router,
}

impl HttpServer {
    /// Create a new HTTP server around the downstream `app`.
    pub fn new(config: ServiceConfig, persister: ArchivePersister, app: Router) -> Self {
        let router = Self::build_router(&config, persister, app);
        Self { router }
    }

    /// Build the Axum router with all middleware layers.
    ///
    /// Outermost first: request ID, trace, ID propagation, capture, app.
    fn build_router(config: &ServiceConfig, persister: ArchivePersister, app: Router) -> Router {
        let state = CaptureState::new(persister, config.capture.clone());

        capture_requests(app, state)
            .layer(PropagateRequestIdLayer::x_request_id())
            .layer(TraceLayer::new_for_http())
            .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
    }

    /// The fully layered router.
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    /// Run the server, accepting connections on the given listener.
    pub async fn run(
        self,
        listener: TcpListener,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(address = %addr, "HTTP server starting");

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                let _ = shutdown.recv().await;
                tracing::info!("HTTP server draining connections");
            })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }
}

/// Downstream handler used by the binary: every request gets `200 OK`.
pub fn default_app() -> Router {
    Router::new()
        .route("/", any(ok_handler))
        .route("/{*path}", any(ok_handler))
}

async fn ok_handler() -> &'static str {
    "OK"
}
