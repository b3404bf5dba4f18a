use crate::{books, vocabulary};
use axum::extract::multipart::MultipartError;
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use tracing::{error, warn};

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("Invalid request")]
    InvalidRequest,
    #[error("Invalid word")]
    InvalidWord,
    #[error("Error retrieving the file")]
    InvalidUpload,
    #[error("Book not found")]
    BookNotFound,
    #[error("storage error: {0}")]
    Storage(std::io::Error),
}

impl From<JsonRejection> for ApiError {
    fn from(e: JsonRejection) -> Self {
        warn!(error = %e, "invalid json body");
        ApiError::InvalidRequest
    }
}

impl From<MultipartError> for ApiError {
    fn from(e: MultipartError) -> Self {
        warn!(error = %e, "invalid multipart body");
        ApiError::InvalidUpload
    }
}

impl From<vocabulary::Error> for ApiError {
    fn from(e: vocabulary::Error) -> Self {
        match e {
            vocabulary::Error::InvalidWord(_) => ApiError::InvalidWord,
            vocabulary::Error::EmptyText => ApiError::InvalidRequest,
        }
    }
}

impl From<books::Error> for ApiError {
    fn from(e: books::Error) -> Self {
        match e {
            books::Error::NotFound(_) => ApiError::BookNotFound,
            books::Error::InvalidFileName(_) => ApiError::InvalidUpload,
            books::Error::Io(e) => ApiError::Storage(e),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::InvalidRequest | ApiError::InvalidWord | ApiError::InvalidUpload => {
                (StatusCode::BAD_REQUEST, self.to_string()).into_response()
            }

            ApiError::BookNotFound => (StatusCode::NOT_FOUND, self.to_string()).into_response(),

            ApiError::Storage(e) => {
                error!(error = %e, "book storage failed");
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error").into_response()
            }
        }
    }
}
