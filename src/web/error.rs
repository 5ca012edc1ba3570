use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;
use tracing::{error, warn};

use crate::logic::{groups::GroupError, movies::MovieError};

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("{0}")]
    BadRequest(String),

    #[error("{0}")]
    Internal(&'static str),
}

#[derive(Serialize)]
struct ErrorBody {
    detail: String,
}

impl From<GroupError> for ApiError {
    fn from(value: GroupError) -> Self {
        match value {
            GroupError::UnknownUser(_) => {
                warn!("Rejected group: {}", value);
                ApiError::BadRequest(value.to_string())
            }
            GroupError::DatabaseError(err) => {
                error!("Database error: {}", err);
                ApiError::Internal("Database error")
            }
        }
    }
}

impl From<MovieError> for ApiError {
    fn from(value: MovieError) -> Self {
        let cause = std::error::Error::source(&value.source)
            .map(|e| e.to_string())
            .unwrap_or_default();
        error!(operation = ?value.operation, "{}: {}", value.source, cause);
        ApiError::Internal(value.operation.failure_message())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, detail) = match self {
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            ApiError::Internal(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg.to_string()),
        };
        (status, Json(ErrorBody { detail })).into_response()
    }
}
