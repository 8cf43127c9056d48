//! HTTP handlers for the IPMA proxy

pub mod agriculture;
pub mod forecast;
pub mod health;
pub mod marine;
pub mod seismic;
pub mod stations;
pub mod warnings;

pub use agriculture::*;
pub use forecast::*;
pub use health::*;
pub use marine::*;
pub use seismic::*;
pub use stations::*;
pub use warnings::*;

use axum::{
    extract::{FromRequestParts, Path, Query},
    http::request::Parts,
    Json,
};
use serde::de::DeserializeOwned;
use shared::ApiResponse;
use validator::{Validate, ValidationErrors};

use crate::error::{AppError, AppResult};
use crate::external::UpstreamError;
use crate::AppState;

/// Envelope around a list payload
pub type ListResponse<T> = AppResult<Json<ApiResponse<Vec<T>>>>;

/// Successful list response with a count message, or `empty` when there is nothing
pub(crate) fn list_ok<T>(
    items: Vec<T>,
    found: impl FnOnce(usize) -> String,
    empty: impl Into<String>,
) -> Json<ApiResponse<Vec<T>>> {
    let message = if items.is_empty() {
        empty.into()
    } else {
        found(items.len())
    };
    Json(ApiResponse::ok(items).with_message(message))
}

/// Apply the upstream failure policy to a list endpoint: an empty list with
/// `unavailable` as message, or a 502
pub(crate) fn degrade<T>(state: &AppState, err: UpstreamError, unavailable: &str) -> ListResponse<T> {
    if state.config.upstream.degrade_to_empty {
        tracing::warn!(error = %err, "Upstream unavailable, answering with an empty list");
        Ok(Json(ApiResponse::ok(Vec::new()).with_message(unavailable)))
    } else {
        Err(AppError::Upstream(err))
    }
}

/// Query string extractor that runs `validator` rules before the handler
#[derive(Debug, Clone, Copy, Default)]
pub struct ValidatedQuery<T>(pub T);

#[axum::async_trait]
impl<T, S> FromRequestParts<S> for ValidatedQuery<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(value) = Query::<T>::from_request_parts(parts, state).await?;

        value.validate().map_err(validation_failed)?;

        Ok(Self(value))
    }
}

/// `Query` whose rejection is rendered inside the error envelope
#[derive(Debug, Clone, Copy, Default)]
pub struct ApiQuery<T>(pub T);

#[axum::async_trait]
impl<T, S> FromRequestParts<S> for ApiQuery<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(value) = Query::<T>::from_request_parts(parts, state).await?;
        Ok(Self(value))
    }
}

/// `Path` whose rejection is rendered inside the error envelope
#[derive(Debug, Clone, Copy, Default)]
pub struct ApiPath<T>(pub T);

#[axum::async_trait]
impl<T, S> FromRequestParts<S> for ApiPath<T>
where
    T: DeserializeOwned + Send,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(value) = Path::<T>::from_request_parts(parts, state).await?;
        Ok(Self(value))
    }
}

fn validation_failed(errors: ValidationErrors) -> AppError {
    let field_errors = errors.field_errors();
    let first = field_errors
        .iter()
        .flat_map(|(field, errors)| errors.iter().map(move |e| (*field, e)))
        .next();

    match first {
        Some((field, error)) => {
            let message = error
                .message
                .as_ref()
                .map_or_else(|| error.code.to_string(), ToString::to_string);
            AppError::Validation {
                field: field.to_string(),
                message_pt: format!("Parâmetro '{}' inválido: {}", field, message),
                message,
            }
        }
        None => AppError::ValidationError(errors.to_string()),
    }
}
