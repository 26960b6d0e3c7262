// =============================================================================
// RESPONSE ENVELOPE
// =============================================================================
// Every API call answers with one of two JSON shapes:
//
//   success: { "success": true,  "data": ..., "message": "Success",
//              "total"?: n, "page"?: n, "limit"?: n }
//   failure: { "success": false, "data": null, "message": "...", "code": "..." }
//
// The dashboard branches on `success` before reading `data`. In Rust the
// branch is the `Result` itself: `Ok(ApiResponse<T>)` serializes to the first
// shape and `Err(AppError)` (see error.rs) to the second.
// =============================================================================

use serde::Serialize;

use crate::error::AppError;

/// Message attached to every successful envelope
pub const SUCCESS_MESSAGE: &str = "Success";

/// Default page echoed by list endpoints when the caller sent none
pub const DEFAULT_PAGE: usize = 1;

/// Default page size echoed by list endpoints when the caller sent none
pub const DEFAULT_LIMIT: usize = 10;

/// Result type returned by every API function
pub type ApiResult<T> = Result<ApiResponse<T>, AppError>;

// -----------------------------------------------------------------------------
// SUCCESS SHAPE
// -----------------------------------------------------------------------------
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub data: T,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<usize>,
}

impl<T> ApiResponse<T> {
    /// Wrap a payload without a count
    pub fn wrap(data: T) -> Self {
        Self {
            success: true,
            data,
            message: SUCCESS_MESSAGE.to_string(),
            total: None,
            page: None,
            limit: None,
        }
    }

    /// Wrap a collection together with its match count
    pub fn with_total(data: T, total: usize) -> Self {
        Self {
            total: Some(total),
            ..Self::wrap(data)
        }
    }

    /// Echo the pagination the caller asked for, falling back to page 1 of 10
    /// (a zero counts as absent)
    pub fn paged(mut self, page: Option<usize>, limit: Option<usize>) -> Self {
        self.page = Some(page.filter(|&p| p > 0).unwrap_or(DEFAULT_PAGE));
        self.limit = Some(limit.filter(|&l| l > 0).unwrap_or(DEFAULT_LIMIT));
        self
    }
}

// -----------------------------------------------------------------------------
// FAILURE SHAPE
// -----------------------------------------------------------------------------
/// Body of a failed call. `data` is always serialized as `null`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ErrorResponse {
    pub success: bool,
    pub data: Option<()>,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
}

impl ErrorResponse {
    pub fn new(message: impl Into<String>, code: Option<String>) -> Self {
        Self {
            success: false,
            data: None,
            message: message.into(),
            code,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_success_envelope_shape() {
        let body = serde_json::to_value(ApiResponse::with_total(vec![1, 2, 3], 7)).unwrap();

        assert_eq!(body["success"], true);
        assert_eq!(body["message"], "Success");
        assert_eq!(body["total"], 7);
        assert!(body.get("page").is_none());
    }

    #[test]
    fn test_paged_defaults() {
        let response = ApiResponse::with_total(Vec::<u8>::new(), 0).paged(None, Some(25));

        assert_eq!(response.page, Some(1));
        assert_eq!(response.limit, Some(25));
    }

    #[test]
    fn test_error_envelope_has_null_data() {
        let body = serde_json::to_value(ErrorResponse::new(
            "Kho không tồn tại",
            Some("WAREHOUSE_NOT_FOUND".to_string()),
        ))
        .unwrap();

        assert_eq!(body["success"], false);
        assert!(body["data"].is_null());
        assert_eq!(body["code"], "WAREHOUSE_NOT_FOUND");
    }
}
