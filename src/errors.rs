use crate::constants::UNEXPECTED_ERROR;
use crate::gemini::ModelError;
use crate::utils::ImageValidationError;
use axum::{
    extract::multipart::MultipartError,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

/// JSON body of every error response.
#[derive(Debug, Serialize)]
pub struct ErrorDetail {
    pub detail: String,
}

#[derive(Debug, Error)]
pub enum ApiError {
    /// Invalid client input
    #[error("{0}")]
    BadRequest(String),

    /// Malformed or oversized multipart body
    #[error(transparent)]
    Multipart(#[from] MultipartError),

    /// External model call failed
    #[error(transparent)]
    Model(#[from] ModelError),

    /// Anything else; the cause is logged, never returned
    #[error("{0}")]
    Internal(String),
}

impl From<ImageValidationError> for ApiError {
    fn from(e: ImageValidationError) -> Self {
        ApiError::BadRequest(format!("Invalid image file: {}", e))
    }
}

impl ApiError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Multipart(e) => e.status(),
            ApiError::Model(_) | ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn detail(&self) -> String {
        match self {
            ApiError::Multipart(e) => e.body_text(),
            ApiError::Internal(_) => UNEXPECTED_ERROR.to_string(),
            other => other.to_string(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        match &self {
            ApiError::Model(e) => log::error!("{}", e),
            ApiError::Internal(cause) => log::error!("Unexpected error in upload_image: {}", cause),
            _ => log::warn!("Rejected upload: {}", self),
        }
        (status, Json(ErrorDetail { detail: self.detail() })).into_response()
    }
}
