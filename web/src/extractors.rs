//! Custom Axum extractors.
//!
//! - [`CorrelationId`]: the request's correlation ID
//! - [`JsonBody`]: a JSON request body
//! - [`PatchBody`]: a JSON partial-update body where an empty body means `{}`
//! - [`PathId`]: a typed path parameter
//!
//! Body and path rejections are rendered as [`AppError`], so clients get the
//! same `{code, message}` envelope as for domain errors.
//!
//! # Examples
//!
//! ```ignore
//! use ride_request_web::extractors::{CorrelationId, PatchBody, PathId};
//!
//! async fn patch_passenger(
//!     correlation_id: CorrelationId,
//!     PathId(id): PathId<PassengerId>,
//!     State(state): State<AppState>,
//!     PatchBody(patch): PatchBody<PatchPassenger>,
//! ) -> Result<Json<Passenger>, AppError> {
//!     tracing::info!(correlation_id = %correlation_id.0, %id, "Patching passenger");
//!     ...
//! }
//! ```

use crate::error::AppError;
use crate::middleware::correlation_id_from_headers;
use axum::{
    async_trait,
    body::Bytes,
    extract::{
        rejection::{JsonRejection, PathRejection},
        FromRequest, FromRequestParts, Path, Request,
    },
    http::{request::Parts, StatusCode},
    Json,
};
use serde::de::DeserializeOwned;
use uuid::Uuid;

/// Correlation ID for request tracing.
///
/// Prefers the ID the correlation middleware stored in request extensions, so
/// handler logs and the `X-Correlation-ID` response header agree. Without the
/// middleware it falls back to the request header, then to a fresh UUID v4.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CorrelationId(pub Uuid);

#[async_trait]
impl<S> FromRequestParts<S> for CorrelationId
where
    S: Send + Sync,
{
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        if let Some(id) = parts.extensions.get::<Self>() {
            return Ok(*id);
        }

        let correlation_id = correlation_id_from_headers(&parts.headers).unwrap_or_else(Uuid::new_v4);

        Ok(Self(correlation_id))
    }
}

/// JSON request body.
///
/// Same decoding as [`axum::Json`], with rejections mapped to [`AppError`]:
///
/// - syntactically invalid JSON: `400 BAD_REQUEST`
/// - valid JSON of the wrong shape (missing or mistyped field): `422 VALIDATION_ERROR`
/// - missing `Content-Type: application/json`: `415 UNSUPPORTED_MEDIA_TYPE`
#[derive(Debug, Clone, Default)]
pub struct JsonBody<T>(pub T);

#[async_trait]
impl<T, S> FromRequest<S> for JsonBody<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        Json::<T>::from_request(req, state)
            .await
            .map(|Json(value)| Self(value))
            .map_err(json_rejection)
    }
}

fn json_rejection(rejection: JsonRejection) -> AppError {
    let message = rejection.body_text();
    match rejection.status() {
        StatusCode::UNPROCESSABLE_ENTITY => AppError::validation(message),
        StatusCode::UNSUPPORTED_MEDIA_TYPE => AppError::new(
            StatusCode::UNSUPPORTED_MEDIA_TYPE,
            message,
            "UNSUPPORTED_MEDIA_TYPE".to_string(),
        ),
        StatusCode::BAD_REQUEST => AppError::bad_request(message),
        status => AppError::new(status, message, "INVALID_REQUEST".to_string()),
    }
}

/// Typed path parameter.
///
/// Same decoding as [`axum::extract::Path`]; a segment that does not parse
/// (e.g. `/passengers/abc`) is rejected with `400 BAD_REQUEST`.
#[derive(Debug, Clone, Copy)]
pub struct PathId<T>(pub T);

#[async_trait]
impl<T, S> FromRequestParts<S> for PathId<T>
where
    T: DeserializeOwned + Send,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        Path::<T>::from_request_parts(parts, state)
            .await
            .map(|Path(value)| Self(value))
            .map_err(path_rejection)
    }
}

fn path_rejection(rejection: PathRejection) -> AppError {
    if rejection.status().is_server_error() {
        // Route and handler disagree on the parameters
        AppError::internal("An internal error occurred")
            .with_source(anyhow::anyhow!(rejection.body_text()))
    } else {
        AppError::bad_request(rejection.body_text())
    }
}

/// JSON body for partial updates.
///
/// An empty (or all-whitespace) body decodes as `T::default()`, so `PATCH`
/// without a payload behaves like `PATCH {}` and changes nothing. Malformed
/// JSON is rejected with `400 BAD_REQUEST`.
#[derive(Debug, Clone, Default)]
pub struct PatchBody<T>(pub T);

#[async_trait]
impl<T, S> FromRequest<S> for PatchBody<T>
where
    T: DeserializeOwned + Default,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let bytes = Bytes::from_request(req, state)
            .await
            .map_err(|e| AppError::bad_request(e.body_text()))?;

        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Ok(Self(T::default()));
        }

        serde_json::from_slice(&bytes)
            .map(Self)
            .map_err(|e| AppError::bad_request(format!("Invalid JSON body: {e}")))
    }
}
