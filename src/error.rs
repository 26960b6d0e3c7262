// =============================================================================
// ERROR MODULE
// =============================================================================
// This module defines the service's error type and its HTTP response.
//
// LEARNING NOTES:
// - Rust doesn't have exceptions; failures travel as Result<T, E> values
// - thiserror derives Display for us from the #[error(...)] attributes
// - IntoResponse turns an AppError into the failure envelope (response.rs)
//
// The main failure is looking up a record by an id that the store doesn't
// hold. Each record kind has its own machine code and a Vietnamese message
// shown by the dashboard. A stock delta the ledger can't represent and a
// request axum couldn't parse get their own codes.
// =============================================================================

use std::fmt;

use axum::{
    extract::rejection::{JsonRejection, PathRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::response::ErrorResponse;

// -----------------------------------------------------------------------------
// RECORD KINDS
// -----------------------------------------------------------------------------
/// The record collections an id lookup can miss in
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Entity {
    User,
    Equipment,
    Material,
    Warehouse,
    Report,
    Notification,
}

impl Entity {
    /// Machine-readable code carried in the failure envelope
    pub fn code(&self) -> &'static str {
        match self {
            Entity::User => "USER_NOT_FOUND",
            Entity::Equipment => "EQUIPMENT_NOT_FOUND",
            Entity::Material => "MATERIAL_NOT_FOUND",
            Entity::Warehouse => "WAREHOUSE_NOT_FOUND",
            Entity::Report => "REPORT_NOT_FOUND",
            Entity::Notification => "NOTIFICATION_NOT_FOUND",
        }
    }

    /// User-facing message (Vietnamese, as displayed by the dashboard)
    pub fn not_found_message(&self) -> &'static str {
        match self {
            Entity::User => "Người dùng không tồn tại",
            Entity::Equipment => "Trang bị không tồn tại",
            Entity::Material => "Vật tư không tồn tại",
            Entity::Warehouse => "Kho không tồn tại",
            Entity::Report => "Báo cáo không tồn tại",
            Entity::Notification => "Thông báo không tồn tại",
        }
    }
}

impl fmt::Display for Entity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Entity::User => "user",
            Entity::Equipment => "equipment",
            Entity::Material => "material",
            Entity::Warehouse => "warehouse",
            Entity::Report => "report",
            Entity::Notification => "notification",
        };
        f.write_str(name)
    }
}

// =============================================================================
// CUSTOM ERROR TYPE
// =============================================================================
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AppError {
    /// No record with this id in the collection
    #[error("{entity} not found: {id}")]
    NotFound { entity: Entity, id: String },

    /// The stock delta would overflow the stock level or its value
    #[error("stock delta out of range for {id}")]
    StockOutOfRange { id: String },

    /// Path, query or body didn't parse
    #[error("Invalid request: {0}")]
    InvalidRequest(String),
}

impl AppError {
    pub fn not_found(entity: Entity, id: impl Into<String>) -> Self {
        AppError::NotFound {
            entity,
            id: id.into(),
        }
    }

    pub fn stock_out_of_range(id: impl Into<String>) -> Self {
        AppError::StockOutOfRange { id: id.into() }
    }

    pub fn code(&self) -> &'static str {
        match self {
            AppError::NotFound { entity, .. } => entity.code(),
            AppError::StockOutOfRange { .. } => "STOCK_OUT_OF_RANGE",
            AppError::InvalidRequest(_) => "INVALID_REQUEST",
        }
    }

    /// Render as the failure envelope
    pub fn to_response(&self) -> ErrorResponse {
        match self {
            AppError::NotFound { entity, .. } => {
                ErrorResponse::new(entity.not_found_message(), Some(entity.code().to_string()))
            }
            AppError::StockOutOfRange { .. } => ErrorResponse::new(
                "Số lượng tồn kho vượt quá giới hạn",
                Some(self.code().to_string()),
            ),
            AppError::InvalidRequest(detail) => ErrorResponse::new(
                format!("Yêu cầu không hợp lệ: {}", detail),
                Some(self.code().to_string()),
            ),
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            AppError::NotFound { .. } => StatusCode::NOT_FOUND,
            AppError::StockOutOfRange { .. } => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
        }
    }
}

// -----------------------------------------------------------------------------
// EXTRACTOR REJECTIONS
// -----------------------------------------------------------------------------
// Lets the handlers' extractors (handlers.rs) reject with the failure
// envelope instead of axum's plain-text body.
impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::InvalidRequest(rejection.body_text())
    }
}

impl From<PathRejection> for AppError {
    fn from(rejection: PathRejection) -> Self {
        AppError::InvalidRequest(rejection.body_text())
    }
}

impl From<QueryRejection> for AppError {
    fn from(rejection: QueryRejection) -> Self {
        AppError::InvalidRequest(rejection.body_text())
    }
}

// =============================================================================
// HTTP RESPONSE CONVERSION
// =============================================================================
// This pattern allows clean handler code like:
//   async fn handler() -> Result<Json<ApiResponse<T>>, AppError> { ... }
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        // A miss is a normal outcome for the dashboard, so warn rather than error
        tracing::warn!(
            error_code = self.code(),
            error = %self,
            "Request failed"
        );

        (self.status(), Json(self.to_response())).into_response()
    }
}

// =============================================================================
// RESULT TYPE ALIAS
// =============================================================================
pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_display() {
        let err = AppError::not_found(Entity::Material, "mt-999");
        assert_eq!(err.to_string(), "material not found: mt-999");
        assert_eq!(err.code(), "MATERIAL_NOT_FOUND");
    }

    #[test]
    fn test_every_entity_has_code_and_message() {
        let all = [
            Entity::User,
            Entity::Equipment,
            Entity::Material,
            Entity::Warehouse,
            Entity::Report,
            Entity::Notification,
        ];
        for entity in all {
            let body = AppError::not_found(entity, "x").to_response();
            assert!(!body.success);
            assert!(!body.message.is_empty());
            assert!(body.code.as_deref().is_some_and(|c| c.ends_with("_NOT_FOUND")));
        }
    }

    #[test]
    fn test_stock_and_request_errors_use_envelope() {
        let err = AppError::stock_out_of_range("mt-004");
        assert_eq!(err.status(), StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(err.to_response().code.as_deref(), Some("STOCK_OUT_OF_RANGE"));

        let err = AppError::InvalidRequest("missing field `quantity`".to_string());
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
        let body = err.to_response();
        assert!(!body.success);
        assert!(body.message.contains("quantity"));
        assert_eq!(body.code.as_deref(), Some("INVALID_REQUEST"));
    }

    #[test]
    fn test_into_response_status() {
        let response = AppError::not_found(Entity::User, "user-404").into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
