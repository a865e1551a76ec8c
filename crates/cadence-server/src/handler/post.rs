use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;

use cadence_types::{Post, PostDraft, PostPatch};

use crate::error::ApiError;
use crate::extract::{RowId, ValidatedJson};
use crate::state::AppState;

/// `POST /posts`
pub async fn create(
    State(state): State<AppState>,
    ValidatedJson(draft): ValidatedJson<PostDraft>,
) -> Result<(StatusCode, Json<Post>), ApiError> {
    let post = state.services.posts.create(draft)?;
    Ok((StatusCode::CREATED, Json(post)))
}

/// `GET /posts`
pub async fn list(State(state): State<AppState>) -> Result<Json<Vec<Post>>, ApiError> {
    Ok(Json(state.services.posts.find_all()?))
}

/// `GET /posts/:id`
pub async fn get(State(state): State<AppState>, id: RowId) -> Result<Json<Post>, ApiError> {
    Ok(Json(state.services.posts.find_one(id.into_id())?))
}

/// `PUT /posts/:id`
pub async fn update(
    State(state): State<AppState>,
    id: RowId,
    ValidatedJson(patch): ValidatedJson<PostPatch>,
) -> Result<StatusCode, ApiError> {
    state.services.posts.update(id.into_id(), patch)?;
    Ok(StatusCode::NO_CONTENT)
}

/// `DELETE /posts/:id`
pub async fn delete(State(state): State<AppState>, id: RowId) -> Result<StatusCode, ApiError> {
    state.services.posts.delete(id.into_id())?;
    Ok(StatusCode::NO_CONTENT)
}
