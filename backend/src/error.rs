//! Error handling for the IPMA proxy
//!
//! Every error is rendered inside the response envelope with an English
//! message and its Portuguese rendering.

use axum::{
    extract::rejection::{PathRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use std::any::Any;
use thiserror::Error;

use crate::external::UpstreamError;

/// Application error types
#[derive(Error, Debug)]
pub enum AppError {
    // Validation errors
    #[error("Validation error: {message}")]
    Validation {
        field: String,
        message: String,
        message_pt: String,
    },

    #[error("Validation error: {0}")]
    ValidationError(String),

    // Lookup errors
    #[error("District '{0}' not found")]
    DistrictNotFound(String),

    #[error("Location '{location}' not found in district '{district}'")]
    LocationNotFound {
        district: String,
        location: String,
        available: Vec<String>,
    },

    #[error("No forecast data for {0}")]
    NoDataForDay(String),

    // External service errors
    #[error("Upstream error: {0}")]
    Upstream(#[from] UpstreamError),

    // Internal errors
    #[error("Internal server error: {0}")]
    Internal(String),
}

/// Error envelope: `{success: false, data: null, message, code, message_pt}`
#[derive(Serialize)]
pub struct ErrorResponse {
    pub success: bool,
    pub data: Option<()>,
    #[serde(flatten)]
    pub error: ErrorDetail,
}

#[derive(Serialize)]
pub struct ErrorDetail {
    pub code: String,
    pub message: String,
    pub message_pt: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
}

impl AppError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::Validation { .. } | AppError::ValidationError(_) => StatusCode::BAD_REQUEST,
            AppError::DistrictNotFound(_)
            | AppError::LocationNotFound { .. }
            | AppError::NoDataForDay(_) => StatusCode::NOT_FOUND,
            AppError::Upstream(_) => StatusCode::BAD_GATEWAY,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn detail(&self) -> ErrorDetail {
        match self {
            AppError::Validation {
                field,
                message,
                message_pt,
            } => ErrorDetail {
                code: "VALIDATION_ERROR".to_string(),
                message: message.clone(),
                message_pt: message_pt.clone(),
                field: Some(field.clone()),
            },
            AppError::ValidationError(msg) => ErrorDetail {
                code: "VALIDATION_ERROR".to_string(),
                message: msg.clone(),
                message_pt: format!("Dados inválidos: {}", msg),
                field: None,
            },
            AppError::DistrictNotFound(district) => ErrorDetail {
                code: "NOT_FOUND".to_string(),
                message: format!(
                    "District '{}' not found. Check the name (e.g. 'lisboa', 'porto', 'faro')",
                    district
                ),
                message_pt: format!("Distrito '{}' não encontrado", district),
                field: None,
            },
            AppError::LocationNotFound {
                district,
                location,
                available,
            } => ErrorDetail {
                code: "NOT_FOUND".to_string(),
                message: format!(
                    "Location '{}' not found in district '{}'. Available locations: {}",
                    location,
                    district,
                    available.join(", ")
                ),
                message_pt: format!(
                    "Localidade '{}' não encontrada no distrito '{}'",
                    location, district
                ),
                field: None,
            },
            AppError::NoDataForDay(day) => ErrorDetail {
                code: "NOT_FOUND".to_string(),
                message: format!("Weather data not available for {}", day),
                message_pt: format!("Dados meteorológicos não disponíveis para {}", day),
                field: None,
            },
            AppError::Upstream(_) => ErrorDetail {
                code: "UPSTREAM_ERROR".to_string(),
                message: "Failed to obtain data from IPMA".to_string(),
                message_pt: "Erro ao obter dados do IPMA".to_string(),
                field: None,
            },
            AppError::Internal(_) => ErrorDetail {
                code: "INTERNAL_ERROR".to_string(),
                message: "An internal server error occurred".to_string(),
                message_pt: "Erro interno do servidor".to_string(),
                field: None,
            },
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        match status {
            StatusCode::INTERNAL_SERVER_ERROR => tracing::error!(error = ?self, "Request failed"),
            StatusCode::BAD_GATEWAY => tracing::warn!(error = %self, "Upstream unavailable"),
            _ => tracing::debug!(error = %self, "Request rejected"),
        }

        let body = ErrorResponse {
            success: false,
            data: None,
            error: self.detail(),
        };

        (status, Json(body)).into_response()
    }
}

impl From<QueryRejection> for AppError {
    fn from(rejection: QueryRejection) -> Self {
        AppError::ValidationError(rejection.body_text())
    }
}

impl From<PathRejection> for AppError {
    fn from(rejection: PathRejection) -> Self {
        AppError::ValidationError(rejection.body_text())
    }
}

/// Render a handler panic as a generic 500 envelope
pub fn panic_response(payload: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else if let Some(message) = payload.downcast_ref::<&str>() {
        message.to_string()
    } else {
        "panic with a non-string payload".to_string()
    };

    AppError::Internal(detail).into_response()
}

/// Result type alias for handlers
pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    fn body_of(err: AppError) -> serde_json::Value {
        let body = ErrorResponse {
            success: false,
            data: None,
            error: err.detail(),
        };
        serde_json::to_value(body).unwrap()
    }

    #[test]
    fn test_status_codes() {
        assert_eq!(
            AppError::ValidationError("x".into()).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            AppError::DistrictNotFound("x".into()).status_code(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            AppError::NoDataForDay("2025-01-01".into()).status_code(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            AppError::Upstream(UpstreamError::Status {
                resource: "warnings/warnings_www.json".into(),
                status: 503,
            })
            .status_code(),
            StatusCode::BAD_GATEWAY
        );
        assert_eq!(
            AppError::Internal("boom".into()).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_envelope_shape() {
        let json = body_of(AppError::DistrictNotFound("atlantida".into()));
        assert_eq!(json["success"], false);
        assert!(json["data"].is_null());
        assert_eq!(json["code"], "NOT_FOUND");
        assert!(json["message"].as_str().unwrap().contains("atlantida"));
        assert!(json["message_pt"].as_str().unwrap().contains("atlantida"));
        assert!(json.get("field").is_none());
    }

    #[test]
    fn test_location_not_found_lists_alternatives() {
        let json = body_of(AppError::LocationNotFound {
            district: "lisboa".into(),
            location: "gotham".into(),
            available: vec!["Lisboa".into(), "Sintra".into()],
        });
        let message = json["message"].as_str().unwrap();
        assert!(message.contains("gotham"));
        assert!(message.contains("Lisboa, Sintra"));
    }

    #[tokio::test]
    async fn test_panic_payload_becomes_internal_error() {
        let response = panic_response(Box::new("secret detail"));
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let json: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(json["success"], false);
        assert_eq!(json["code"], "INTERNAL_ERROR");
        assert!(!json["message"].as_str().unwrap().contains("secret"));
    }

    #[test]
    fn test_internal_detail_is_generic() {
        let json = body_of(AppError::Internal("connection string leaked".into()));
        assert_eq!(json["code"], "INTERNAL_ERROR");
        assert!(!json["message"].as_str().unwrap().contains("leaked"));
    }
}
