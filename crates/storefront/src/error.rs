//! Unified error handling with Sentry integration.
//!
//! Provides a unified `AppError` type that captures server-side errors to
//! Sentry before responding. Every error response uses the same
//! `{"success": false, "error": {...}}` envelope as successful responses.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use nanasu_core::{ApiError, ApiResponse, ErrorCode};
use thiserror::Error;

/// Application-level error type for the storefront.
#[derive(Debug, Error)]
pub enum AppError {
    /// Catalog operation returned a failure result.
    #[error(transparent)]
    Catalog(#[from] ApiError),

    /// Bad request from client.
    #[error("Bad request: {0}")]
    BadRequest(String),
}

impl AppError {
    /// HTTP status for this error.
    #[must_use]
    pub fn status(&self) -> StatusCode {
        match self {
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::Catalog(error) => match error.code {
                ErrorCode::ProductNotFound => StatusCode::NOT_FOUND,
                ErrorCode::InvalidQuery => StatusCode::BAD_REQUEST,
                ErrorCode::ApiError | ErrorCode::NetworkError | ErrorCode::Other(_) => {
                    StatusCode::BAD_GATEWAY
                }
                ErrorCode::UnknownError => StatusCode::INTERNAL_SERVER_ERROR,
            },
        }
    }

    /// The error record sent to the client.
    fn into_api_error(self) -> ApiError {
        match self {
            Self::Catalog(error) => error,
            Self::BadRequest(message) => ApiError::new(ErrorCode::InvalidQuery, message),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();

        // Capture server errors to Sentry
        if status.is_server_error() {
            let event_id = sentry::capture_error(&self);
            tracing::error!(
                error = %self,
                sentry_event_id = %event_id,
                "Request error"
            );
        }

        (status, Json(ApiResponse::<()>::err(self.into_api_error()))).into_response()
    }
}

/// Result type alias for `AppError`.
pub type Result<T> = std::result::Result<T, AppError>;

/// Add a breadcrumb for user actions.
///
/// Breadcrumbs appear in Sentry error reports to show the trail of user actions
/// leading up to an error.
///
/// # Example
///
/// ```rust,ignore
/// add_breadcrumb("catalog", "Viewed product", Some(&[("id_or_slug", "nanas-madu-premium")]));
/// ```
pub fn add_breadcrumb(category: &str, message: &str, data: Option<&[(&str, &str)]>) {
    let mut breadcrumb = sentry::Breadcrumb {
        category: Some(category.to_string()),
        message: Some(message.to_string()),
        level: sentry::Level::Info,
        ..Default::default()
    };

    if let Some(pairs) = data {
        for (key, value) in pairs {
            breadcrumb.data.insert(
                (*key).to_string(),
                serde_json::Value::String((*value).to_string()),
            );
        }
    }

    sentry::add_breadcrumb(breadcrumb);
}
