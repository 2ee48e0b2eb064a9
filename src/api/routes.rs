//! API Routes
//!
//! HTTP endpoint definitions.

use axum::{
    extract::{Query, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::domain::{Account, DomainError, Event, EventRequest};
use crate::error::AppError;
use crate::handlers::{DepositHandler, TransferHandler, WithdrawHandler};
use crate::store::AccountStore;

// =========================================================================
// Request/Response types
// =========================================================================

#[derive(Debug, Deserialize)]
pub struct BalanceParams {
    #[serde(default)]
    pub account_id: Option<String>,
}

/// `/event` response. Deposit reports only the destination, withdraw only the
/// origin, transfer both.
#[derive(Debug, Serialize)]
pub struct EventResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub origin: Option<Account>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub destination: Option<Account>,
}

// =========================================================================
// Router
// =========================================================================

/// Create the API router.
///
/// Registering one verb per path gives the 405 for wrong methods for free.
pub fn create_router() -> Router<AccountStore> {
    Router::new()
        .route("/reset", post(reset))
        .route("/balance", get(balance))
        .route("/event", post(event))
}

// =========================================================================
// POST /reset
// =========================================================================

/// Delete every account document.
async fn reset(State(store): State<AccountStore>) -> &'static str {
    let removed = store.delete_all().await;
    tracing::info!(removed, "ledger reset");
    "OK"
}

// =========================================================================
// GET /balance?account_id=ID
// =========================================================================

/// Report an account balance as plain text.
async fn balance(
    State(store): State<AccountStore>,
    Query(params): Query<BalanceParams>,
) -> Result<String, AppError> {
    let account_id = params
        .account_id
        .ok_or(DomainError::MissingParam("account_id"))?;

    let balance = store
        .get(&account_id)
        .await
        .ok_or(DomainError::AccountMissing)?;

    Ok(balance.to_string())
}

// =========================================================================
// POST /event
// =========================================================================

/// Apply a deposit, withdraw, or transfer.
///
/// The body is taken as a raw `Value` first so a malformed body maps to 400
/// under our own error shape instead of the extractor's rejection.
async fn event(
    State(store): State<AccountStore>,
    Json(body): Json<Value>,
) -> Result<(StatusCode, Json<EventResponse>), AppError> {
    let request: EventRequest = serde_json::from_value(body)
        .map_err(|e| AppError::InvalidRequest(format!("malformed event body: {e}")))?;

    let response = match request.validate()? {
        Event::Deposit {
            destination,
            amount,
        } => {
            let account = DepositHandler::new(store).execute(destination, amount).await?;
            EventResponse {
                origin: None,
                destination: Some(account),
            }
        }
        Event::Withdraw { origin, amount } => {
            let account = WithdrawHandler::new(store).execute(origin, amount).await?;
            EventResponse {
                origin: Some(account),
                destination: None,
            }
        }
        Event::Transfer {
            origin,
            amount,
            destination,
        } => {
            let result = TransferHandler::new(store)
                .execute(origin, amount, destination)
                .await?;
            EventResponse {
                origin: Some(result.origin),
                destination: Some(result.destination),
            }
        }
    };

    Ok((StatusCode::CREATED, Json(response)))
}
