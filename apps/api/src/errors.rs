use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::analysis::AnalysisError;
use crate::extraction::ExtractionError;

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
/// Every variant renders as `{"error": "<message>"}`.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("No resume file provided.")]
    MissingFile,

    #[error("No job description provided.")]
    MissingJobDescription,

    /// Carries the status axum assigns to the multipart failure
    /// (400 for malformed bodies, 413 past the upload limit).
    #[error("Invalid multipart request: {message}")]
    InvalidMultipart { status: StatusCode, message: String },

    #[error("Unsupported file type.")]
    UnsupportedFileType,

    #[error("Error extracting text: {0}")]
    Extraction(#[from] ExtractionError),

    #[error("n8n webhook error: {0}")]
    Webhook(#[from] AnalysisError),
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::MissingFile
            | AppError::MissingJobDescription
            | AppError::UnsupportedFileType => StatusCode::BAD_REQUEST,
            AppError::InvalidMultipart { status, .. } => *status,
            AppError::Extraction(_) | AppError::Webhook(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = self.to_string();

        if status.is_server_error() {
            tracing::error!("{message}");
        } else {
            tracing::warn!("Rejected upload: {message}");
        }

        (status, Json(json!({ "error": message }))).into_response()
    }
}
