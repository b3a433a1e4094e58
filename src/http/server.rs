//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create Axum Router with the redirect chain as its fallback service
//! - Wire up middleware (tracing, timeout, request ID)
//! - Bind server to listener and serve until shutdown

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use axum::{body::Body, http::Request, Router};
use tokio::net::TcpListener;
use tower::Layer;
use tower_http::{timeout::TimeoutLayer, trace::TraceLayer};

use crate::config::ServerConfig;
use crate::http::redirect::RedirectLayer;
use crate::http::request::{request_id, RequestIdLayer};
use crate::http::response::{fallback_handler, Fallback};
use crate::routing::LookupTable;

/// HTTP server for the redirector.
pub struct HttpServer {
    router: Router,
    config: ServerConfig,
}

impl HttpServer {
    /// Create a server from config and the redirect document's table.
    ///
    /// Requests are resolved against `document` first, then against the
    /// inline `[paths]` mapping, then answered by the configured fallback.
    pub fn new(config: ServerConfig, document: LookupTable) -> Self {
        let inline = LookupTable::from_map(config.paths.clone());
        let router = Self::build_router(&config, Arc::new(document), Arc::new(inline));
        Self { router, config }
    }

    /// Build the Axum router with all middleware layers.
    #[allow(deprecated)]
    fn build_router(
        config: &ServerConfig,
        document: Arc<LookupTable>,
        inline: Arc<LookupTable>,
    ) -> Router {
        let fallback = Router::new()
            .fallback(fallback_handler)
            .with_state(Fallback::from_config(&config.fallback));

        let inline = RedirectLayer::new(inline).layer(fallback);
        let redirects = RedirectLayer::new(document).layer(inline);

        Router::new()
            .fallback_service(redirects)
            .layer(TimeoutLayer::new(Duration::from_secs(config.timeouts.request_secs)))
            .layer(TraceLayer::new_for_http().make_span_with(|request: &Request<Body>| {
                tracing::info_span!(
                    "request",
                    method = %request.method(),
                    path = %request.uri().path(),
                    request_id = %request_id(request),
                )
            }))
            .layer(RequestIdLayer)
    }

    /// Run the server until `shutdown` resolves, then drain in-flight requests.
    pub async fn run<S>(self, listener: TcpListener, shutdown: S) -> Result<(), std::io::Error>
    where
        S: Future<Output = ()> + Send + 'static,
    {
        let addr = listener.local_addr()?;
        tracing::info!(address = %addr, "HTTP server starting");

        axum::serve(listener, self.router.into_make_service())
            .with_graceful_shutdown(shutdown)
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }

    /// Get a reference to the config.
    pub fn config(&self) -> &ServerConfig {
        &self.config
    }

    /// The router, for driving requests without a listener.
    pub fn router(&self) -> Router {
        self.router.clone()
    }
}
