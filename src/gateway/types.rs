//! API response types, error codes and request/response DTOs

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::account::AccountError;

// ============================================================================
// Unified API Response Format
// ============================================================================

/// Unified API response wrapper
///
/// All API responses follow this structure:
/// - code: 0 = success, non-zero = error code
/// - msg: short message description
/// - data: actual data (success) or null (error)
#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    /// Response code: 0 for success, non-zero for errors
    pub code: i32,
    /// Response message
    pub msg: String,
    /// Response data (only present when code == 0)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

impl<T> ApiResponse<T> {
    /// Create success response
    pub fn success(data: T) -> Self {
        Self {
            code: 0,
            msg: "ok".to_string(),
            data: Some(data),
        }
    }

    /// Create error response
    pub fn error(code: i32, msg: impl Into<String>) -> ApiResponse<()> {
        ApiResponse {
            code,
            msg: msg.into(),
            data: None,
        }
    }
}

pub type ApiResult<T> = Result<Json<ApiResponse<T>>, ApiError>;

/// Wrap data in the success envelope.
pub fn ok<T>(data: T) -> ApiResult<T> {
    Ok(Json(ApiResponse::success(data)))
}

// ============================================================================
// Error Codes
// ============================================================================

/// Standard API error codes
pub mod error_codes {
    // Success
    pub const SUCCESS: i32 = 0;

    // Client errors (1xxx)
    pub const INVALID_PARAMETER: i32 = 1001;
    pub const INSUFFICIENT_BALANCE: i32 = 1002;
    pub const SAME_ACCOUNT_TRANSFER: i32 = 1003;

    // Identity errors (2xxx)
    pub const MISSING_PRINCIPAL: i32 = 2001;
    pub const INVALID_MEMBER: i32 = 2002;

    // Resource errors (4xxx)
    pub const ACCOUNT_NOT_FOUND: i32 = 4001;
    pub const MEMBER_NOT_FOUND: i32 = 4002;
    pub const ACCOUNT_BUSY: i32 = 4091;

    // Server errors (5xxx)
    pub const INTERNAL_ERROR: i32 = 5000;
    pub const SERVICE_UNAVAILABLE: i32 = 5001;
}

// ============================================================================
// ApiError
// ============================================================================

/// Error carrying an HTTP status plus the envelope error code.
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub code: i32,
    pub msg: String,
}

impl ApiError {
    pub fn new(status: StatusCode, code: i32, msg: impl Into<String>) -> Self {
        Self {
            status,
            code,
            msg: msg.into(),
        }
    }

    pub fn bad_request(msg: impl Into<String>) -> Self {
        Self::new(
            StatusCode::BAD_REQUEST,
            error_codes::INVALID_PARAMETER,
            msg,
        )
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        Self::new(
            StatusCode::INTERNAL_SERVER_ERROR,
            error_codes::INTERNAL_ERROR,
            msg,
        )
    }

    pub fn service_unavailable(msg: impl Into<String>) -> Self {
        Self::new(
            StatusCode::SERVICE_UNAVAILABLE,
            error_codes::SERVICE_UNAVAILABLE,
            msg,
        )
    }

    pub fn into_err<T>(self) -> ApiResult<T> {
        Err(self)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = Json(ApiResponse::<()>::error(self.code, self.msg));
        (self.status, body).into_response()
    }
}

impl From<AccountError> for ApiError {
    fn from(e: AccountError) -> Self {
        match e {
            AccountError::InvalidAmount => ApiError::bad_request(e.to_string()),
            AccountError::SameAccountTransfer => ApiError::new(
                StatusCode::BAD_REQUEST,
                error_codes::SAME_ACCOUNT_TRANSFER,
                e.to_string(),
            ),
            AccountError::InvalidMember => ApiError::new(
                StatusCode::FORBIDDEN,
                error_codes::INVALID_MEMBER,
                e.to_string(),
            ),
            AccountError::NotExistMember => ApiError::new(
                StatusCode::NOT_FOUND,
                error_codes::MEMBER_NOT_FOUND,
                e.to_string(),
            ),
            AccountError::AccountNotFound(_) => ApiError::new(
                StatusCode::NOT_FOUND,
                error_codes::ACCOUNT_NOT_FOUND,
                e.to_string(),
            ),
            AccountError::InsufficientFunds => ApiError::new(
                StatusCode::CONFLICT,
                error_codes::INSUFFICIENT_BALANCE,
                e.to_string(),
            ),
            // retryable: the caller may resubmit once the account is idle
            AccountError::LockTimeout | AccountError::VersionConflict => ApiError::new(
                StatusCode::CONFLICT,
                error_codes::ACCOUNT_BUSY,
                "Account is busy, please retry",
            ),
            AccountError::DataIntegrity(_) | AccountError::Database(_) => {
                tracing::error!(error = %e, "internal error in account operation");
                ApiError::internal("Internal error")
            }
        }
    }
}

// ============================================================================
// Request DTOs
// ============================================================================

/// Deposit/withdraw request body. The amount travels as a string and is
/// parsed with the strict money rules.
#[derive(Debug, Deserialize)]
pub struct MoneyRequest {
    pub amount: String,
}

/// Transfer request body.
#[derive(Debug, Deserialize)]
pub struct TransferRequest {
    pub to_account_number: String,
    pub amount: String,
}

// ============================================================================
// Response DTOs
// ============================================================================

#[derive(Debug, Serialize)]
pub struct MovementResponse {
    pub status: String,
}

impl MovementResponse {
    pub fn success() -> Self {
        Self {
            status: "SUCCESS".to_string(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct HistoryEntryResponse {
    pub history_type: crate::account::HistoryType,
    pub amount: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub from_account_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub to_account_number: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Serialize)]
pub struct HistoryResponse {
    pub balance: String,
    pub histories: Vec<HistoryEntryResponse>,
}

#[derive(Debug, Serialize)]
pub struct TargetResponse {
    pub name: String,
    pub email: String,
    pub account_number: String,
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub database: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_response_success_shape() {
        let resp = ApiResponse::success(MovementResponse::success());
        let json = serde_json::to_value(&resp).unwrap();
        assert_eq!(json["code"], 0);
        assert_eq!(json["msg"], "ok");
        assert_eq!(json["data"]["status"], "SUCCESS");
    }

    #[test]
    fn test_api_response_error_omits_data() {
        let resp = ApiResponse::<()>::error(error_codes::INSUFFICIENT_BALANCE, "Insufficient funds");
        let json = serde_json::to_value(&resp).unwrap();
        assert_eq!(json["code"], 1002);
        assert!(json.get("data").is_none());
    }

    #[test]
    fn test_money_request_deserializes_string_amount() {
        let req: MoneyRequest = serde_json::from_str(r#"{"amount":"30000"}"#).unwrap();
        assert_eq!(req.amount, "30000");
    }

    #[test]
    fn test_transfer_request_deserializes() {
        let req: TransferRequest =
            serde_json::from_str(r#"{"to_account_number":"123-456","amount":"70000"}"#).unwrap();
        assert_eq!(req.to_account_number, "123-456");
        assert_eq!(req.amount, "70000");
    }

    #[test]
    fn test_error_mapping_statuses() {
        let e: ApiError = AccountError::InsufficientFunds.into();
        assert_eq!(e.status, StatusCode::CONFLICT);
        assert_eq!(e.code, error_codes::INSUFFICIENT_BALANCE);

        let e: ApiError = AccountError::InvalidMember.into();
        assert_eq!(e.status, StatusCode::FORBIDDEN);

        let e: ApiError = AccountError::AccountNotFound("1".into()).into();
        assert_eq!(e.status, StatusCode::NOT_FOUND);

        let e: ApiError = AccountError::LockTimeout.into();
        assert_eq!(e.status, StatusCode::CONFLICT);
        assert_eq!(e.code, error_codes::ACCOUNT_BUSY);

        let e: ApiError = AccountError::SameAccountTransfer.into();
        assert_eq!(e.status, StatusCode::BAD_REQUEST);
        assert_eq!(e.code, error_codes::SAME_ACCOUNT_TRANSFER);
    }

    #[test]
    fn test_history_entry_serializes_type_screaming_case() {
        let entry = HistoryEntryResponse {
            history_type: crate::account::HistoryType::Withdraw,
            amount: "30000".to_string(),
            from_account_number: Some("111-111".to_string()),
            to_account_number: None,
            created_at: Utc::now(),
        };
        let json = serde_json::to_value(&entry).unwrap();
        assert_eq!(json["history_type"], "WITHDRAW");
        assert!(json.get("to_account_number").is_none());
    }
}
