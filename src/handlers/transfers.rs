//! Transfer HTTP handlers.
//!
//! - POST /api/v1/transfers - Move money between accounts
//! - GET /api/v1/accounts/{id}/transfers/sent - Transfers debited from an account
//! - GET /api/v1/accounts/{id}/transfers/received - Transfers credited to an account

use crate::{
    app::AppState,
    error::AppError,
    models::transfer::{TransferRecord, TransferRequest},
};
use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use uuid::Uuid;

/// Transfer money between accounts.
///
/// # Atomicity
///
/// The entry and both balances are written in a single unit of work.
/// Either all of them are stored or none are.
///
/// # Validation
///
/// - Both accounts must exist
/// - Accounts must be different
/// - Source must have sufficient balance
/// - Amount must be positive
pub async fn create_transfer(
    State(state): State<AppState>,
    Json(request): Json<TransferRequest>,
) -> Result<StatusCode, AppError> {
    state.transfers.record_transfer(request).await?;

    Ok(StatusCode::CREATED)
}

pub async fn list_sent_transfers(
    State(state): State<AppState>,
    Path(account_id): Path<Uuid>,
) -> Result<Json<Vec<TransferRecord>>, AppError> {
    let transfers = state.transfers.list_sent_transfers(account_id).await?;
    Ok(Json(transfers))
}

pub async fn list_received_transfers(
    State(state): State<AppState>,
    Path(account_id): Path<Uuid>,
) -> Result<Json<Vec<TransferRecord>>, AppError> {
    let transfers = state.transfers.list_received_transfers(account_id).await?;
    Ok(Json(transfers))
}
