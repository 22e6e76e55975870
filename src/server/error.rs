//! Error responses for the HTTP API.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use homepage_core::{EditError, StoreError};
use serde::Serialize;

/// Errors returned by API handlers.
#[derive(Debug)]
pub enum ApiError {
    /// The request body or path was invalid.
    BadRequest(String),
    /// Login failed.
    Unauthorized(String),
    /// Unknown section, missing document, or missing item.
    NotFound(String),
    /// The section does not support this method.
    MethodNotAllowed(String),
    /// A document operation failed.
    Edit(EditError),
    /// Anything else (e.g. a blocking task panicked).
    Internal(String),
}

impl From<EditError> for ApiError {
    fn from(e: EditError) -> Self {
        ApiError::Edit(e)
    }
}

/// Error response body.
#[derive(Serialize)]
struct ErrorBody {
    success: bool,
    error: &'static str,
    message: String,
}

impl ApiError {
    fn status(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::MethodNotAllowed(_) => StatusCode::METHOD_NOT_ALLOWED,
            ApiError::Edit(EditError::SectionNotFound(_))
            | ApiError::Edit(EditError::IndexOutOfRange { .. }) => StatusCode::NOT_FOUND,
            ApiError::Edit(EditError::NotAList(_)) => StatusCode::CONFLICT,
            ApiError::Edit(EditError::Store(_)) | ApiError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    fn title(&self) -> &'static str {
        match self {
            ApiError::BadRequest(_) => "invalid_request",
            ApiError::Unauthorized(_) => "unauthorized",
            ApiError::NotFound(_) => "not_found",
            ApiError::MethodNotAllowed(_) => "method_not_allowed",
            ApiError::Edit(EditError::SectionNotFound(_)) => "section_not_found",
            ApiError::Edit(EditError::IndexOutOfRange { .. }) => "index_out_of_range",
            ApiError::Edit(EditError::NotAList(_)) => "not_a_list",
            ApiError::Edit(EditError::Store(StoreError::Corrupt { .. })) => "corrupt_document",
            ApiError::Edit(EditError::Store(StoreError::Io { .. })) => "storage_error",
            ApiError::Internal(_) => "internal_error",
        }
    }

    fn message(&self) -> String {
        match self {
            ApiError::BadRequest(m)
            | ApiError::Unauthorized(m)
            | ApiError::NotFound(m)
            | ApiError::MethodNotAllowed(m)
            | ApiError::Internal(m) => m.clone(),
            ApiError::Edit(e) => e.to_string(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = self.message();

        if status.is_server_error() {
            tracing::error!("{} ({})", message, status);
        } else {
            tracing::warn!("{} ({})", message, status);
        }

        let body = ErrorBody {
            success: false,
            error: self.title(),
            message,
        };

        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_edit_error_status_codes() {
        let cases = [
            (
                ApiError::from(EditError::SectionNotFound("skills".into())),
                StatusCode::NOT_FOUND,
            ),
            (
                ApiError::from(EditError::IndexOutOfRange {
                    section: "skills".into(),
                    index: 4,
                    len: 2,
                }),
                StatusCode::NOT_FOUND,
            ),
            (
                ApiError::from(EditError::NotAList("profile".into())),
                StatusCode::CONFLICT,
            ),
            (
                ApiError::from(EditError::Store(StoreError::Corrupt {
                    path: PathBuf::from("config.json"),
                    reason: "bad".into(),
                })),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];

        for (error, expected) in cases {
            assert_eq!(error.status(), expected);
        }
    }

    #[test]
    fn test_message_uses_error_display() {
        let error = ApiError::from(EditError::NotAList("profile".into()));
        assert_eq!(error.message(), "Section 'profile' is not a list");
        assert_eq!(error.title(), "not_a_list");
    }
}
