//! Transaction HTTP handlers.
//!
//! This module implements transaction-related API endpoints:
//! - POST /api/v1/transactions - Record a deposit/withdrawal on one account
//! - GET /api/v1/accounts/{id}/transactions - List an account's transactions

use crate::{
    app::AppState,
    error::AppError,
    models::transaction::{TransactionRecord, TransactionRequest},
};
use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use uuid::Uuid;

/// Record a transaction.
///
/// # Request Body
///
/// ```json
/// {
///   "account_id": "550e8400-...",
///   "transaction_type": "deposit",
///   "amount_cents": 100000,
///   "description": "Initial deposit"
/// }
/// ```
///
/// # Response
///
/// - **Success (201 Created)**: empty body
/// - **Error (404)**: Account doesn't exist
/// - **Error (400)**: Amount is not positive
pub async fn create_transaction(
    State(state): State<AppState>,
    Json(request): Json<TransactionRequest>,
) -> Result<StatusCode, AppError> {
    state.transactions.record_transaction(request).await?;

    Ok(StatusCode::CREATED)
}

/// List an account's transactions, oldest first.
///
/// Returns 404 when the account has no transactions.
pub async fn list_transactions(
    State(state): State<AppState>,
    Path(account_id): Path<Uuid>,
) -> Result<Json<Vec<TransactionRecord>>, AppError> {
    let transactions = state
        .transactions
        .list_transactions_for_account(account_id)
        .await?;

    Ok(Json(transactions))
}
