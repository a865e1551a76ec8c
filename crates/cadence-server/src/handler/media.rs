use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;

use cadence_types::{Media, MediaDraft, MediaPatch};

use crate::error::ApiError;
use crate::extract::{RowId, ValidatedJson};
use crate::state::AppState;

/// `POST /medias`
pub async fn create(
    State(state): State<AppState>,
    ValidatedJson(draft): ValidatedJson<MediaDraft>,
) -> Result<(StatusCode, Json<Media>), ApiError> {
    let media = state.services.media.create(draft)?;
    Ok((StatusCode::CREATED, Json(media)))
}

/// `GET /medias`
pub async fn list(State(state): State<AppState>) -> Result<Json<Vec<Media>>, ApiError> {
    Ok(Json(state.services.media.find_all()?))
}

/// `GET /medias/:id`
pub async fn get(State(state): State<AppState>, id: RowId) -> Result<Json<Media>, ApiError> {
    Ok(Json(state.services.media.find_one(id.into_id())?))
}

/// `PUT /medias/:id`
pub async fn update(
    State(state): State<AppState>,
    id: RowId,
    ValidatedJson(patch): ValidatedJson<MediaPatch>,
) -> Result<StatusCode, ApiError> {
    state.services.media.update(id.into_id(), patch)?;
    Ok(StatusCode::NO_CONTENT)
}

/// `DELETE /medias/:id`
pub async fn delete(State(state): State<AppState>, id: RowId) -> Result<StatusCode, ApiError> {
    state.services.media.delete(id.into_id())?;
    Ok(StatusCode::NO_CONTENT)
}
