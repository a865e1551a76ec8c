//! HTTP server for Cadence.
//!
//! Exposes the media, post and publication services as JSON REST routes.
//! Request bodies are validated before reaching a service, and every
//! failure is answered with a `{"error", "code"}` body.

pub mod config;
pub mod error;
pub mod extract;
pub mod handler;
pub mod router;
pub mod server;
pub mod state;

pub use config::{ServerConfig, ENV_BIND_ADDR, ENV_LOG};
pub use error::{ApiError, ErrorResponse, ServerError, ServerResult};
pub use extract::{QueryParams, RowId, ValidatedJson};
pub use router::build_router;
pub use server::CadenceServer;
pub use state::AppState;

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use axum::body::{to_bytes, Body};
    use axum::http::{Request, StatusCode};
    use cadence_store::InMemoryStore;
    use cadence_types::SystemClock;
    use tower::util::ServiceExt;

    fn app() -> axum::Router {
        build_router(AppState::new(
            Arc::new(InMemoryStore::new()),
            Arc::new(SystemClock),
        ))
    }

    #[tokio::test]
    async fn health_endpoint() {
        let response = app()
            .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn info_endpoint() {
        let response = app()
            .oneshot(Request::builder().uri("/info").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["version"], env!("CARGO_PKG_VERSION"));
    }

    #[tokio::test]
    async fn unknown_route_is_404() {
        let response = app()
            .oneshot(Request::builder().uri("/nope").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn malformed_json_is_a_json_400() {
        let response = app()
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/medias")
                    .header("content-type", "application/json")
                    .body(Body::from("{not json"))
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body: ErrorResponse = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body.code, 400);
        assert!(body.error.starts_with("invalid request body"));
    }
}
