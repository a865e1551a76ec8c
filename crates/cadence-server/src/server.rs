use std::sync::Arc;

use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use cadence_store::{InMemoryStore, Store};
use cadence_types::{Clock, SystemClock};

use crate::config::ServerConfig;
use crate::error::{ServerError, ServerResult};
use crate::router::build_router;
use crate::state::AppState;

/// Cadence HTTP server.
pub struct CadenceServer {
    config: ServerConfig,
    state: AppState,
}

impl CadenceServer {
    pub fn new(config: ServerConfig, store: Arc<dyn Store>, clock: Arc<dyn Clock>) -> Self {
        Self {
            config,
            state: AppState::new(store, clock),
        }
    }

    /// Server over an empty in-memory store and the system clock.
    pub fn in_memory(config: ServerConfig) -> Self {
        Self::new(
            config,
            Arc::new(InMemoryStore::new()),
            Arc::new(SystemClock),
        )
    }

    pub fn config(&self) -> &ServerConfig {
        &self.config
    }

    /// Build the router with the tracing, timeout and CORS layers applied.
    pub fn router(&self) -> axum::Router {
        let router = build_router(self.state.clone())
            .layer(TimeoutLayer::new(self.config.request_timeout()))
            .layer(TraceLayer::new_for_http());
        if self.config.cors_permissive {
            router.layer(CorsLayer::permissive())
        } else {
            router
        }
    }

    /// Bind the configured address without serving yet.
    pub async fn bind(&self) -> ServerResult<TcpListener> {
        Ok(TcpListener::bind(self.config.bind_addr).await?)
    }

    /// Bind and serve until Ctrl-C.
    pub async fn serve(self) -> ServerResult<()> {
        let listener = self.bind().await?;
        self.serve_on(listener).await
    }

    /// Serve on an already bound listener until Ctrl-C.
    pub async fn serve_on(self, listener: TcpListener) -> ServerResult<()> {
        self.serve_on_with_shutdown(listener, async {
            if let Err(e) = tokio::signal::ctrl_c().await {
                tracing::warn!(error = %e, "failed to listen for shutdown signal");
                std::future::pending::<()>().await;
            }
        })
        .await
    }

    /// Serve on an already bound listener until `shutdown` resolves.
    pub async fn serve_on_with_shutdown<F>(
        self,
        listener: TcpListener,
        shutdown: F,
    ) -> ServerResult<()>
    where
        F: std::future::Future<Output = ()> + Send + 'static,
    {
        let app = self.router();
        let local = listener.local_addr()?;
        tracing::info!(addr = %local, "cadence server listening");
        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown)
            .await
            .map_err(|e| ServerError::Internal(e.to_string()))?;
        tracing::info!("cadence server stopped");
        Ok(())
    }
}
