use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Serialize};

use cadence_types::{
    parse_published_flag, parse_timestamp, Publication, PublicationDraft, PublicationId,
    PublicationPatch, PublicationStatus,
};

use crate::error::ApiError;
use crate::extract::{QueryParams, RowId, ValidatedJson};
use crate::state::AppState;

/// Query string of `GET /publications`.
#[derive(Debug, Default, Deserialize)]
pub struct ListQuery {
    pub published: Option<String>,
    pub after: Option<String>,
}

/// Body of `GET /publications/:id/status`.
#[derive(Debug, Serialize, Deserialize)]
pub struct StatusResponse {
    pub id: PublicationId,
    pub status: PublicationStatus,
}

/// `POST /publications`
pub async fn create(
    State(state): State<AppState>,
    ValidatedJson(draft): ValidatedJson<PublicationDraft>,
) -> Result<(StatusCode, Json<Publication>), ApiError> {
    let publication = state.services.publications.create(draft)?;
    Ok((StatusCode::CREATED, Json(publication)))
}

/// `GET /publications?published=true|false&after=<date>`
pub async fn list(
    State(state): State<AppState>,
    QueryParams(query): QueryParams<ListQuery>,
) -> Result<Json<Vec<Publication>>, ApiError> {
    let published = query
        .published
        .as_deref()
        .map(parse_published_flag)
        .transpose()?;
    let after = query.after.as_deref().map(parse_timestamp).transpose()?;
    Ok(Json(state.services.publications.find_all(published, after)?))
}

/// `GET /publications/:id`
pub async fn get(
    State(state): State<AppState>,
    id: RowId,
) -> Result<Json<Publication>, ApiError> {
    Ok(Json(state.services.publications.find_one(id.into_id())?))
}

/// `GET /publications/:id/status`
pub async fn status(
    State(state): State<AppState>,
    id: RowId,
) -> Result<Json<StatusResponse>, ApiError> {
    let id: PublicationId = id.into_id();
    let status = state.services.publications.status(id)?;
    Ok(Json(StatusResponse { id, status }))
}

/// `PUT /publications/:id`
pub async fn update(
    State(state): State<AppState>,
    id: RowId,
    ValidatedJson(patch): ValidatedJson<PublicationPatch>,
) -> Result<StatusCode, ApiError> {
    state.services.publications.update(id.into_id(), patch)?;
    Ok(StatusCode::NO_CONTENT)
}

/// `DELETE /publications/:id`
pub async fn delete(State(state): State<AppState>, id: RowId) -> Result<StatusCode, ApiError> {
    state.services.publications.delete(id.into_id())?;
    Ok(StatusCode::NO_CONTENT)
}
