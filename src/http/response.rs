//! Uniform response envelopes.
//!
//! Every endpoint answers `{ message, data }`; paged listings additionally
//! echo the page cursor so clients can render pagination controls.

use serde::Serialize;

/// Standard envelope wrapping every response body.
#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub message: String,
    pub data: Option<T>,
}

impl<T> ApiResponse<T> {
    /// Successful envelope with a payload.
    pub fn ok(message: impl Into<String>, data: T) -> Self {
        Self {
            message: message.into(),
            data: Some(data),
        }
    }

    /// Failure envelope; `data` is null.
    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            data: None,
        }
    }
}

/// Envelope for paged listings, echoing the requested page cursor.
#[derive(Debug, Serialize)]
pub struct PagedResponse<T> {
    pub message: String,
    pub data: T,
    pub page: i64,
    pub limit: i64,
}

impl<T> PagedResponse<T> {
    pub fn new(message: impl Into<String>, data: T, page: i64, limit: i64) -> Self {
        Self {
            message: message.into(),
            data,
            page,
            limit,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ok_envelope() {
        let body = serde_json::to_value(ApiResponse::ok("fetched", vec![1, 2])).unwrap();
        assert_eq!(body["message"], "fetched");
        assert_eq!(body["data"][1], 2);
    }

    #[test]
    fn test_failure_envelope_has_null_data() {
        let body = serde_json::to_value(ApiResponse::<()>::failure("nope")).unwrap();
        assert!(body["data"].is_null());
    }

    #[test]
    fn test_paged_envelope() {
        let body = serde_json::to_value(PagedResponse::new("ok", vec!["a"], 2, 25)).unwrap();
        assert_eq!(body["page"], 2);
        assert_eq!(body["limit"], 25);
    }
}
