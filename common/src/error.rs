use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use serde_json::json;
use std::net::AddrParseError;
use thiserror::Error;

use crate::validation::ValidationErrors;

pub type Result<T> = std::result::Result<T, HubError>;

#[derive(Error, Debug)]
pub enum HubError {
    #[error("Validation error: {0}")]
    ValidationError(ValidationErrors),
    #[error("device not found with ID: {0}")]
    DeviceNotFound(i64),
    #[error("{0}")]
    BadRequest(String),
    #[error("Storage error: {0}")]
    StorageError(String),
    #[error("Serialization error: {0}")]
    SerializationError(String),
    #[error("Network error: {0}")]
    NetworkError(String),
    #[error("Configuration error: {0}")]
    ConfigError(String),
    #[error("Internal error: {0}")]
    InternalError(String),
}

impl From<ValidationErrors> for HubError {
    fn from(errors: ValidationErrors) -> Self {
        HubError::ValidationError(errors)
    }
}

impl From<std::io::Error> for HubError {
    fn from(err: std::io::Error) -> Self {
        HubError::NetworkError(err.to_string())
    }
}

impl From<serde_json::Error> for HubError {
    fn from(err: serde_json::Error) -> Self {
        HubError::SerializationError(err.to_string())
    }
}

impl From<AddrParseError> for HubError {
    fn from(err: AddrParseError) -> Self {
        HubError::ConfigError(err.to_string())
    }
}

impl From<sqlx::Error> for HubError {
    fn from(err: sqlx::Error) -> Self {
        HubError::StorageError(err.to_string())
    }
}

impl ResponseError for HubError {
    fn status_code(&self) -> StatusCode {
        match self {
            Self::ValidationError(_) | Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::DeviceNotFound(_) => StatusCode::NOT_FOUND,
            Self::StorageError(_) |
            Self::SerializationError(_) |
            Self::NetworkError(_) |
            Self::ConfigError(_) |
            Self::InternalError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        match self {
            Self::ValidationError(errors) => {
                HttpResponse::build(self.status_code()).json(json!({ "errors": errors }))
            }
            _ => HttpResponse::build(self.status_code()).json(json!({ "error": self.to_string() })),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::body::to_bytes;

    #[actix_web::test]
    async fn test_validation_error_response_body() {
        let mut errors = ValidationErrors::new();
        errors.add("name", "must be between 1-100 characters");

        let response = HubError::from(errors).error_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let body = to_bytes(response.into_body()).await.unwrap();
        let value: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(value, json!({"errors": {"name": "must be between 1-100 characters"}}));
    }

    #[actix_web::test]
    async fn test_not_found_response_body() {
        let response = HubError::DeviceNotFound(9).error_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let body = to_bytes(response.into_body()).await.unwrap();
        let value: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(value, json!({"error": "device not found with ID: 9"}));
    }

    #[test]
    fn test_storage_errors_are_server_errors() {
        let err = HubError::from(sqlx::Error::RowNotFound);
        assert!(matches!(err, HubError::StorageError(_)));
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
