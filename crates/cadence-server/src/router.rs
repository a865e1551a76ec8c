use axum::routing::get;
use axum::Router;

use crate::handler::{health, media, post, publication};
use crate::state::AppState;

/// Build the axum router with all Cadence endpoints.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        .route("/info", get(health::info_handler))
        .route("/medias", get(media::list).post(media::create))
        .route(
            "/medias/:id",
            get(media::get).put(media::update).delete(media::delete),
        )
        .route("/posts", get(post::list).post(post::create))
        .route(
            "/posts/:id",
            get(post::get).put(post::update).delete(post::delete),
        )
        .route(
            "/publications",
            get(publication::list).post(publication::create),
        )
        .route(
            "/publications/:id",
            get(publication::get)
                .put(publication::update)
                .delete(publication::delete),
        )
        .route("/publications/:id/status", get(publication::status))
        .with_state(state)
}
