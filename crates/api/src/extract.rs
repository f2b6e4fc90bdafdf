//! Request extractors.
//!
//! Thin wrappers over axum's `Json`, `Path` and `Query` whose rejections use
//! the API's error envelope instead of axum's plain-text 4xx bodies.

use axum::extract::rejection::JsonRejection;
use axum::extract::{FromRequest, FromRequestParts, OriginalUri, Path, Query, Request};
use axum::http::request::Parts;
use axum::Json;
use petkare_core::error::CoreError;
use serde::de::DeserializeOwned;

use crate::error::AppError;

/// JSON request body.
///
/// Malformed JSON and type mismatches (a string where an integer belongs, an
/// unknown `sex` value) become `VALIDATION_ERROR` responses. Field
/// constraints are checked later, when the payload is converted into its
/// validated form.
#[derive(Debug, Clone)]
pub struct JsonBody<T>(pub T);

impl<S, T> FromRequest<S> for JsonBody<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match Json::<T>::from_request(req, state).await {
            Ok(Json(value)) => Ok(Self(value)),
            Err(rejection @ JsonRejection::MissingJsonContentType(_)) => {
                Err(AppError::BadRequest(rejection.body_text()))
            }
            Err(rejection) => Err(AppError::Core(CoreError::Validation(rejection.body_text()))),
        }
    }
}

/// Path segment parameters.
///
/// A segment that does not parse (`/pets/abc`) cannot name an existing
/// resource, so it is reported as `NOT_FOUND`.
#[derive(Debug, Clone)]
pub struct PathParam<T>(pub T);

impl<S, T> FromRequestParts<S> for PathParam<T>
where
    T: DeserializeOwned + Send,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        match Path::<T>::from_request_parts(parts, state).await {
            Ok(Path(value)) => Ok(Self(value)),
            Err(rejection) => {
                // Nested routers strip their prefix from `parts.uri`.
                let path = parts
                    .extensions
                    .get::<OriginalUri>()
                    .map_or_else(|| parts.uri.path(), |original| original.0.path());
                tracing::debug!(path, error = %rejection.body_text(), "Unparseable path parameter");
                Err(AppError::NotFound(format!("No resource at {path}")))
            }
        }
    }
}

/// Query string parameters. Unparseable or repeated keys are a
/// `VALIDATION_ERROR`.
#[derive(Debug, Clone)]
pub struct QueryParams<T>(pub T);

impl<S, T> FromRequestParts<S> for QueryParams<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        match Query::<T>::from_request_parts(parts, state).await {
            Ok(Query(value)) => Ok(Self(value)),
            Err(rejection) => Err(AppError::Core(CoreError::Validation(rejection.body_text()))),
        }
    }
}
