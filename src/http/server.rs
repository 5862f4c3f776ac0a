//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create Axum Router with all handlers
//! - Wire up middleware (tracing, limits, request ID, webhook auth)
//! - Bind server to listener
//! - Drain in-flight requests on shutdown

use std::sync::Arc;
use std::time::Duration;

use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower_http::{
    limit::RequestBodyLimitLayer,
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::auth::Authenticator;
use crate::config::ServiceConfig;
use crate::http::handlers::{get_health, webhook_handler};
use crate::http::middleware::{request_metrics, webhook_auth_middleware};
use crate::resources::ResourceSource;

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub authenticator: Arc<Authenticator>,
    pub source: Arc<dyn ResourceSource>,
    pub max_body_size: usize,
}

/// HTTP server for the webhook endpoint.
pub struct HttpServer {
    router: Router,
    config: ServiceConfig,
}

impl HttpServer {
    /// Create a new HTTP server with the given configuration and state.
    pub fn new(config: ServiceConfig, state: AppState) -> Self {
        let router = Self::build_router(&config, state);
        Self { router, config }
    }

    /// Build the Axum router with all middleware layers.
    #[allow(deprecated)]
    fn build_router(config: &ServiceConfig, state: AppState) -> Router {
        let webhooks = Router::new()
            .route("/", post(webhook_handler))
            .route("/{*path}", post(webhook_handler))
            .route_layer(middleware::from_fn_with_state(
                state.clone(),
                webhook_auth_middleware,
            ));

        Router::new()
            .route("/health", get(get_health))
            .merge(webhooks)
            .with_state(state)
            .layer(middleware::from_fn(request_metrics))
            .layer(RequestBodyLimitLayer::new(config.security.max_body_size))
            .layer(TimeoutLayer::new(Duration::from_secs(config.timeouts.request_secs)))
            .layer(PropagateRequestIdLayer::x_request_id())
            .layer(TraceLayer::new_for_http())
            .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
    }

    /// Run the server until `shutdown` fires.
    pub async fn run(
        self,
        listener: TcpListener,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            "HTTP server starting"
        );

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                let _ = shutdown.recv().await;
                tracing::info!("Shutdown signal received");
            })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }

    /// Get a reference to the config.
    pub fn config(&self) -> &ServiceConfig {
        &self.config
    }

    /// The router, for driving the service without a socket.
    pub fn into_router(self) -> Router {
        self.router
    }
}
