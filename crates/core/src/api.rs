//! The tagged success/failure envelope shared by the library, the JSON API
//! and the remote catalog backend.
//!
//! Inside Rust code results are plain `Result<T, ApiError>`. On the wire they
//! are wrapped in [`ApiResponse`]:
//!
//! ```json
//! {"success": true, "data": {...}}
//! {"success": false, "error": {"code": "PRODUCT_NOT_FOUND", "message": "..."}}
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Message for lookups that resolve to nothing.
pub const PRODUCT_NOT_FOUND_MESSAGE: &str = "Produk tidak ditemukan";

/// Machine-readable error code.
///
/// Codes received from a remote backend that are not known here are kept
/// verbatim in [`ErrorCode::Other`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ErrorCode {
    ProductNotFound,
    InvalidQuery,
    /// The upstream API answered with an error.
    ApiError,
    /// The request was sent but no response arrived.
    NetworkError,
    UnknownError,
    Other(String),
}

impl ErrorCode {
    /// The wire representation of the code.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::ProductNotFound => "PRODUCT_NOT_FOUND",
            Self::InvalidQuery => "INVALID_QUERY",
            Self::ApiError => "API_ERROR",
            Self::NetworkError => "NETWORK_ERROR",
            Self::UnknownError => "UNKNOWN_ERROR",
            Self::Other(code) => code,
        }
    }
}

impl From<String> for ErrorCode {
    fn from(code: String) -> Self {
        match code.as_str() {
            "PRODUCT_NOT_FOUND" => Self::ProductNotFound,
            "INVALID_QUERY" => Self::InvalidQuery,
            "API_ERROR" => Self::ApiError,
            "NETWORK_ERROR" => Self::NetworkError,
            "UNKNOWN_ERROR" => Self::UnknownError,
            _ => Self::Other(code),
        }
    }
}

impl From<&str> for ErrorCode {
    fn from(code: &str) -> Self {
        Self::from(code.to_owned())
    }
}

impl From<ErrorCode> for String {
    fn from(code: ErrorCode) -> Self {
        match code {
            ErrorCode::Other(code) => code,
            known => known.as_str().to_owned(),
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A normalized error record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Error)]
#[error("{code}: {message}")]
pub struct ApiError {
    pub code: ErrorCode,
    /// User-facing message.
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl ApiError {
    /// Create an error without details.
    #[must_use]
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            details: None,
        }
    }

    /// The `PRODUCT_NOT_FOUND` error for a lookup key.
    #[must_use]
    pub fn product_not_found(id_or_slug: &str) -> Self {
        Self::new(ErrorCode::ProductNotFound, PRODUCT_NOT_FOUND_MESSAGE)
            .with_details(serde_json::json!({ "id": id_or_slug }))
    }

    /// Attach structured details.
    #[must_use]
    pub fn with_details(mut self, details: serde_json::Value) -> Self {
        self.details = Some(details);
        self
    }

    /// Whether this is a not-found outcome rather than a failure.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        self.code == ErrorCode::ProductNotFound
    }
}

/// Wire envelope for a result. Check `success` before reading `data`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<ApiError>,
}

impl<T> ApiResponse<T> {
    /// A successful envelope.
    #[must_use]
    pub const fn ok(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    /// A failed envelope.
    #[must_use]
    pub const fn err(error: ApiError) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(error),
        }
    }

    /// Unwrap the envelope into a `Result`.
    ///
    /// # Errors
    ///
    /// Returns the carried error for failed envelopes, or `UNKNOWN_ERROR` for
    /// envelopes that are inconsistent (success without data, failure
    /// without error).
    pub fn into_result(self) -> Result<T, ApiError> {
        match (self.success, self.data, self.error) {
            (true, Some(data), _) => Ok(data),
            (false, _, Some(error)) => Err(error),
            (true, None, _) => Err(ApiError::new(
                ErrorCode::UnknownError,
                "Respons tidak berisi data",
            )),
            (false, _, None) => Err(ApiError::new(
                ErrorCode::UnknownError,
                "Respons gagal tanpa keterangan",
            )),
        }
    }
}

impl<T> From<Result<T, ApiError>> for ApiResponse<T> {
    fn from(result: Result<T, ApiError>) -> Self {
        match result {
            Ok(data) => Self::ok(data),
            Err(error) => Self::err(error),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_success_envelope_shape() {
        let value = serde_json::to_value(ApiResponse::ok(vec![1, 2])).unwrap();
        assert_eq!(value, json!({ "success": true, "data": [1, 2] }));
    }

    #[test]
    fn test_failure_envelope_shape() {
        let error = ApiError::new(ErrorCode::ProductNotFound, PRODUCT_NOT_FOUND_MESSAGE);
        let value = serde_json::to_value(ApiResponse::<()>::err(error)).unwrap();
        assert_eq!(
            value,
            json!({
                "success": false,
                "error": { "code": "PRODUCT_NOT_FOUND", "message": "Produk tidak ditemukan" }
            })
        );
    }

    #[test]
    fn test_into_result() {
        let ok: ApiResponse<u8> = serde_json::from_value(json!({ "success": true, "data": 7 })).unwrap();
        assert_eq!(ok.into_result(), Ok(7));

        let err: ApiResponse<u8> = serde_json::from_value(json!({
            "success": false,
            "error": { "code": "OUT_OF_STOCK", "message": "Stok habis" }
        }))
        .unwrap();
        let error = err.into_result().unwrap_err();
        assert_eq!(error.code, ErrorCode::Other("OUT_OF_STOCK".to_string()));
        assert_eq!(error.message, "Stok habis");
    }

    /// Decodes through a generic bound only, as HTTP clients do.
    fn decode<T: serde::de::DeserializeOwned>(value: serde_json::Value) -> Result<T, ApiError> {
        serde_json::from_value::<ApiResponse<T>>(value)
            .unwrap()
            .into_result()
    }

    #[test]
    fn test_envelope_decodes_payload_without_default() {
        #[derive(Debug, PartialEq, Deserialize)]
        struct Weight {
            grams: u32,
        }

        assert_eq!(
            decode::<Weight>(json!({ "success": true, "data": { "grams": 1500 } })),
            Ok(Weight { grams: 1500 })
        );

        let error = decode::<Weight>(json!({
            "success": false,
            "error": { "code": "PRODUCT_NOT_FOUND", "message": "Produk tidak ditemukan" }
        }))
        .unwrap_err();
        assert!(error.is_not_found());
    }

    #[test]
    fn test_inconsistent_envelope_is_unknown_error() {
        let envelope: ApiResponse<u8> = serde_json::from_value(json!({ "success": true })).unwrap();
        assert_eq!(
            envelope.into_result().unwrap_err().code,
            ErrorCode::UnknownError
        );
    }

    #[test]
    fn test_product_not_found() {
        let error = ApiError::product_not_found("nonexistent-id");
        assert!(error.is_not_found());
        assert_eq!(error.to_string(), "PRODUCT_NOT_FOUND: Produk tidak ditemukan");
        assert_eq!(error.details, Some(json!({ "id": "nonexistent-id" })));
    }
}
