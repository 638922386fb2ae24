//! Account HTTP handlers.
//!
//! - GET /api/v1/accounts/{id} - Read an account's balance

use crate::{
    app::AppState,
    error::{AppError, EntityKind},
    models::account::AccountResponse,
    store::StoreError,
};
use axum::{
    Json,
    extract::{Path, State},
};
use uuid::Uuid;

/// Get a specific account by ID.
///
/// # Response
///
/// - **Success (200 OK)**: Returns account details
/// - **Error (404)**: Account not found
pub async fn get_account(
    State(state): State<AppState>,
    Path(account_id): Path<Uuid>,
) -> Result<Json<AccountResponse>, AppError> {
    let lookup_failure = |source: StoreError| {
        AppError::persistence(EntityKind::Account, "Error getting account", source)
    };

    let mut uow = state.ledger.begin().await.map_err(lookup_failure)?;
    let account = uow.find_account(account_id).await.map_err(lookup_failure)?;
    // Read-only: let the unit of work roll back on drop
    drop(uow);

    let account =
        account.ok_or_else(|| AppError::not_found(EntityKind::Account, "Account doesn't exist"))?;

    Ok(Json(account.into()))
}
