//! HTTP handlers for the account API

use axum::{
    Json,
    extract::{Path, State},
    http::{HeaderMap, StatusCode},
};
use std::sync::Arc;

use super::state::AppState;
use super::types::{
    ApiError, ApiResult, HealthResponse, HistoryEntryResponse, HistoryResponse, MoneyRequest,
    MovementResponse, TargetResponse, TransferRequest, error_codes, ok,
};
use crate::account::{AccountNumber, TransferCommand};
use crate::money::{self, Money};

// ============================================================================
// Handlers
// ============================================================================

/// GET /api/v1/account/{account_number}/history
pub async fn get_history(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Path(raw_number): Path<String>,
) -> ApiResult<HistoryResponse> {
    let principal = extract_principal(&headers)?;
    let number = parse_account_number(&raw_number)?;

    let summary = state.app_service.get_history(&principal, &number).await?;

    let decimals = state.money_decimals;
    let histories = summary
        .entries
        .into_iter()
        .map(|entry| HistoryEntryResponse {
            history_type: entry.history_type,
            amount: money::format_amount(entry.amount, decimals),
            from_account_number: entry.from_account_number.map(|n| n.to_string()),
            to_account_number: entry.to_account_number.map(|n| n.to_string()),
            created_at: entry.created_at,
        })
        .collect();

    ok(HistoryResponse {
        balance: money::format_amount(summary.balance, decimals),
        histories,
    })
}

/// POST /api/v1/account/{account_number}/deposit
pub async fn deposit(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Path(raw_number): Path<String>,
    Json(req): Json<MoneyRequest>,
) -> ApiResult<MovementResponse> {
    let principal = extract_principal(&headers)?;
    let number = parse_account_number(&raw_number)?;
    let amount = parse_money(&state, &req.amount)?;

    state.app_service.deposit(&principal, &number, amount).await?;
    ok(MovementResponse::success())
}

/// POST /api/v1/account/{account_number}/withdraw
pub async fn withdraw(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Path(raw_number): Path<String>,
    Json(req): Json<MoneyRequest>,
) -> ApiResult<MovementResponse> {
    let principal = extract_principal(&headers)?;
    let number = parse_account_number(&raw_number)?;
    let amount = parse_money(&state, &req.amount)?;

    state
        .app_service
        .withdraw(&principal, &number, amount)
        .await?;
    ok(MovementResponse::success())
}

/// POST /api/v1/account/{account_number}/transfer
pub async fn transfer(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Path(raw_number): Path<String>,
    Json(req): Json<TransferRequest>,
) -> ApiResult<MovementResponse> {
    let principal = extract_principal(&headers)?;
    let number = parse_account_number(&raw_number)?;
    let to_account_number = parse_account_number(&req.to_account_number)?;
    let amount = parse_money(&state, &req.amount)?;

    let command = TransferCommand {
        to_account_number,
        amount,
    };
    state
        .app_service
        .transfer(&principal, &number, command)
        .await?;
    ok(MovementResponse::success())
}

/// GET /api/v1/account/{account_number}/targets
pub async fn get_targets(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Path(raw_number): Path<String>,
) -> ApiResult<Vec<TargetResponse>> {
    let principal = extract_principal(&headers)?;
    let number = parse_account_number(&raw_number)?;

    let targets = state.app_service.get_targets(&principal, &number).await?;
    ok(targets
        .into_iter()
        .map(|t| TargetResponse {
            name: t.name,
            email: t.email,
            account_number: t.account_number.to_string(),
        })
        .collect())
}

/// GET /api/v1/health
pub async fn health_check(State(state): State<Arc<AppState>>) -> ApiResult<HealthResponse> {
    let database = match state.db.health_check().await {
        Ok(()) => "up".to_string(),
        Err(e) => {
            tracing::warn!(error = %e, "database health check failed");
            return ApiError::service_unavailable("Database unavailable").into_err();
        }
    };
    ok(HealthResponse {
        status: "ok".to_string(),
        database,
    })
}

// ============================================================================
// Helper Functions
// ============================================================================

/// The request layer upstream authenticates the caller and forwards the
/// principal email. Absence is an identity error, not a bad request.
fn extract_principal(headers: &HeaderMap) -> Result<String, ApiError> {
    headers
        .get("X-Principal")
        .and_then(|v| v.to_str().ok())
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .ok_or_else(|| {
            ApiError::new(
                StatusCode::UNAUTHORIZED,
                error_codes::MISSING_PRINCIPAL,
                "Missing X-Principal header",
            )
        })
}

fn parse_account_number(raw: &str) -> Result<AccountNumber, ApiError> {
    AccountNumber::new(raw).map_err(ApiError::bad_request)
}

fn parse_money(state: &AppState, raw: &str) -> Result<Money, ApiError> {
    money::parse_amount(raw, state.money_decimals).map_err(|e| ApiError::bad_request(e.to_string()))
}
