//! Classification of upstream failures into a single [`ApiError`] shape.
//!
//! Failures come in three flavours:
//! - the upstream answered, possibly with an error payload
//! - the request went out but nothing came back
//! - anything else (bad URL, undecodable body, ...)
//!
//! [`normalize_error`] is pure: the same failure always yields the same error.

use serde_json::Value;

use crate::api::{ApiError, ErrorCode};

/// Fallback message when an error response carries no message of its own.
pub const API_ERROR_MESSAGE: &str = "Terjadi kesalahan pada server";

/// Message for requests that never got a response.
pub const NETWORK_ERROR_MESSAGE: &str =
    "Tidak dapat terhubung ke server. Periksa koneksi internet Anda.";

/// Fallback message for failures that carry no message at all.
pub const UNKNOWN_ERROR_MESSAGE: &str = "Terjadi kesalahan yang tidak diketahui";

/// A failure observed while talking to an upstream service.
#[derive(Debug, Clone, PartialEq)]
pub enum UpstreamFailure {
    /// The upstream responded. `payload` is the parsed body, if it was JSON.
    Response {
        status: u16,
        payload: Option<Value>,
    },
    /// The request was sent but no response arrived (connect error, timeout).
    NoResponse { reason: String },
    /// Anything else.
    Other { message: Option<String> },
}

/// Convert an upstream failure into a normalized [`ApiError`].
#[must_use]
pub fn normalize_error(failure: &UpstreamFailure) -> ApiError {
    match failure {
        UpstreamFailure::Response { payload, .. } => from_payload(payload.as_ref()),
        UpstreamFailure::NoResponse { .. } => {
            ApiError::new(ErrorCode::NetworkError, NETWORK_ERROR_MESSAGE)
        }
        UpstreamFailure::Other { message } => ApiError::new(
            ErrorCode::UnknownError,
            message
                .as_deref()
                .filter(|m| !m.trim().is_empty())
                .unwrap_or(UNKNOWN_ERROR_MESSAGE),
        ),
    }
}

/// Pull `code`, `message` and `details` out of an error body.
///
/// Accepts both the flat shape `{code, message}` and the envelope shape
/// `{success: false, error: {code, message}}`.
fn from_payload(payload: Option<&Value>) -> ApiError {
    let source = payload.map(|body| match body.get("error") {
        Some(nested) if nested.is_object() => nested,
        _ => body,
    });

    let non_empty_str = |key: &str| {
        source
            .and_then(|s| s.get(key))
            .and_then(Value::as_str)
            .filter(|s| !s.trim().is_empty())
    };

    let code = non_empty_str("code").map_or(ErrorCode::ApiError, ErrorCode::from);
    let message = non_empty_str("message").unwrap_or(API_ERROR_MESSAGE);
    let details = source
        .and_then(|s| s.get("details"))
        .filter(|d| !d.is_null())
        .cloned();

    ApiError {
        code,
        message: message.to_owned(),
        details,
    }
}
