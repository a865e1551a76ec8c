//! Request extractors that answer 400 with a JSON error body instead of
//! axum's plain-text rejections.

use async_trait::async_trait;
use axum::body::Bytes;
use axum::extract::{FromRequest, FromRequestParts, Path, Query, Request};
use axum::http::request::Parts;
use serde::de::DeserializeOwned;

use cadence_types::Validate;

use crate::error::ApiError;

/// JSON body that has been deserialized and passed [`Validate`].
///
/// The `Content-Type` header is not inspected. An empty body reads as `{}`,
/// so a bodiless `PUT` is an empty patch rather than a parse error.
#[derive(Debug)]
pub struct ValidatedJson<T>(pub T);

#[async_trait]
impl<T, S> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate + Send,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let bytes = Bytes::from_request(req, state)
            .await
            .map_err(|rejection| ApiError::BadRequest(rejection.body_text()))?;
        let raw: &[u8] = if bytes.iter().all(u8::is_ascii_whitespace) {
            b"{}"
        } else {
            &bytes
        };
        let value: T = serde_json::from_slice(raw)
            .map_err(|e| ApiError::BadRequest(format!("invalid request body: {e}")))?;
        value.validate()?;
        Ok(Self(value))
    }
}

/// Query string deserialized into `T`, rejected as a JSON 400.
#[derive(Debug)]
pub struct QueryParams<T>(pub T);

#[async_trait]
impl<T, S> FromRequestParts<S> for QueryParams<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(value) = Query::<T>::from_request_parts(parts, state)
            .await
            .map_err(|rejection| ApiError::BadRequest(rejection.body_text()))?;
        Ok(Self(value))
    }
}

/// Integer row id taken from the `:id` path segment.
#[derive(Clone, Copy, Debug)]
pub struct RowId(pub i64);

#[async_trait]
impl<S> FromRequestParts<S> for RowId
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(id) = Path::<i64>::from_request_parts(parts, state)
            .await
            .map_err(|rejection| ApiError::BadRequest(rejection.body_text()))?;
        Ok(Self(id))
    }
}

impl RowId {
    /// Convert into a typed id such as `MediaId`.
    pub fn into_id<T: From<i64>>(self) -> T {
        T::from(self.0)
    }
}
