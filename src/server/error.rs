use crate::catalog_store::{CatalogError, FieldErrors};
use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;
use tracing::error;

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fields: Option<FieldErrors>,
}

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("invalid request body: {0}")]
    InvalidBody(String),

    #[error(transparent)]
    Catalog(#[from] CatalogError),
}

pub type ApiResult<T> = Result<T, ApiError>;

impl ApiError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::InvalidBody(_) => StatusCode::BAD_REQUEST,
            Self::Catalog(err) => match err {
                CatalogError::Validation(_) | CatalogError::ConstraintViolation { .. } => {
                    StatusCode::BAD_REQUEST
                }
                CatalogError::NotFound { .. } => StatusCode::NOT_FOUND,
                // Retries are exhausted inside the store before this surfaces.
                CatalogError::ConcurrencyConflict(_) | CatalogError::Storage(_) => {
                    StatusCode::INTERNAL_SERVER_ERROR
                }
            },
        }
    }

    fn to_body(&self) -> ErrorResponse {
        match self {
            Self::InvalidBody(_) => ErrorResponse {
                error: self.to_string(),
                fields: None,
            },
            Self::Catalog(CatalogError::Validation(fields)) => ErrorResponse {
                error: "Invalid input.".to_string(),
                fields: Some(fields.clone()),
            },
            Self::Catalog(CatalogError::ConstraintViolation { field, message }) => ErrorResponse {
                error: message.clone(),
                fields: field.map(|field| FieldErrors::single(field, message.clone())),
            },
            Self::Catalog(CatalogError::NotFound { .. }) => ErrorResponse {
                error: "Not found.".to_string(),
                fields: None,
            },
            Self::Catalog(_) => ErrorResponse {
                error: "Internal server error.".to_string(),
                fields: None,
            },
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::InvalidBody(rejection.body_text())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            error!("Request failed: {}", self);
        }
        (status, Json(self.to_body())).into_response()
    }
}
