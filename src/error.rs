use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::auth::password::CredentialError;

#[derive(Error, Debug)]
pub enum RepoError {
    #[error("{0}")]
    Conflict(String),
    #[error("user not found")]
    NotFound,
    #[error("storage error: {0}")]
    Storage(#[from] sqlx::Error),
    #[error("credential error: {0}")]
    Credential(#[from] CredentialError),
}

pub type Result<T> = std::result::Result<T, RepoError>;

impl IntoResponse for RepoError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            RepoError::Conflict(msg) => {
                tracing::debug!(message = %msg, "conflict");
                (StatusCode::CONFLICT, msg)
            }
            RepoError::NotFound => (StatusCode::NOT_FOUND, "user not found".to_string()),
            RepoError::Storage(e) => {
                tracing::error!(error = %e, "storage error");
                (StatusCode::INTERNAL_SERVER_ERROR, "internal server error".to_string())
            }
            RepoError::Credential(e) => {
                tracing::error!(error = %e, "credential error");
                (StatusCode::INTERNAL_SERVER_ERROR, "internal server error".to_string())
            }
        };

        (status, Json(json!({ "error": message }))).into_response()
    }
}
