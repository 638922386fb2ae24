//! Transfer service - moves money between two accounts.
//!
//! # Atomicity Guarantees
//!
//! The transfer entry, the debit of the source and the credit of the target
//! are written through one unit of work. A failure at any point drops the
//! unit of work, so a transfer is never left debited-but-not-credited.

use super::rollback;
use crate::{
    error::{AppError, EntityKind},
    models::{
        account::Account,
        transfer::{TransferRecord, TransferRequest},
    },
    store::{Ledger, StoreError, UnitOfWork},
};
use std::sync::Arc;
use uuid::Uuid;

const ENTITY: EntityKind = EntityKind::Transfer;

/// Both sides of a validated transfer with their post-transfer balances.
struct Legs {
    source: Account,
    source_balance: i64,
    target: Account,
    target_balance: i64,
}

/// Applies transfers between accounts and answers history queries.
#[derive(Clone)]
pub struct TransferEngine {
    ledger: Arc<dyn Ledger>,
}

impl TransferEngine {
    pub fn new(ledger: Arc<dyn Ledger>) -> Self {
        Self { ledger }
    }

    /// Move `amount_cents` from the source account to the target account.
    ///
    /// # Errors
    ///
    /// Checked in this order, first failure wins:
    /// - `NotFound`: Source account doesn't exist, then target account doesn't exist
    /// - `InvalidOperation`: Source and target are the same account
    /// - `InsufficientFunds`: Source balance would go negative
    /// - `InvalidAmount`: Amount is zero or negative, or the target balance overflows
    /// - `Persistence`: Storage failed; nothing was written
    pub async fn record_transfer(&self, request: TransferRequest) -> Result<(), AppError> {
        let creation_failure = |source: StoreError| {
            AppError::persistence(ENTITY, "Error creating new transfer", source)
        };

        let mut uow = self.ledger.begin().await.map_err(creation_failure)?;

        let legs = match validate(uow.as_mut(), &request).await {
            Ok(legs) => legs,
            Err(err) => {
                tracing::warn!(
                    source_account_id = %request.source_account_id,
                    target_account_id = %request.target_account_id,
                    error = %err,
                    "transfer rejected"
                );
                rollback(uow).await;
                return Err(err);
            }
        };

        let record = TransferRecord::new(&request);
        apply(uow, &record, legs).await.map_err(|source| {
            tracing::error!(
                source_account_id = %request.source_account_id,
                target_account_id = %request.target_account_id,
                error = %source,
                "transfer aborted"
            );
            creation_failure(source)
        })?;

        tracing::info!(
            transfer_id = %record.id,
            source_account_id = %record.source_account_id,
            target_account_id = %record.target_account_id,
            amount_cents = record.amount_cents,
            "transfer recorded"
        );
        Ok(())
    }

    /// Transfers debited from an account, oldest first. Empty is `NotFound`.
    pub async fn list_sent_transfers(
        &self,
        account_id: Uuid,
    ) -> Result<Vec<TransferRecord>, AppError> {
        let lookup_failure = |source: StoreError| {
            AppError::persistence(ENTITY, "Error getting account's sent transfers", source)
        };

        let mut uow = self.ledger.begin().await.map_err(lookup_failure)?;
        let transfers = uow
            .find_transfers_by_source_account_id(account_id)
            .await
            .map_err(lookup_failure)?;
        rollback(uow).await;

        if transfers.is_empty() {
            return Err(AppError::not_found(ENTITY, "No transfers sent from this account"));
        }
        Ok(transfers)
    }

    /// Transfers credited to an account, oldest first. Empty is `NotFound`.
    pub async fn list_received_transfers(
        &self,
        account_id: Uuid,
    ) -> Result<Vec<TransferRecord>, AppError> {
        let lookup_failure = |source: StoreError| {
            AppError::persistence(ENTITY, "Error getting account's received transfers", source)
        };

        let mut uow = self.ledger.begin().await.map_err(lookup_failure)?;
        let transfers = uow
            .find_transfers_by_target_account_id(account_id)
            .await
            .map_err(lookup_failure)?;
        rollback(uow).await;

        if transfers.is_empty() {
            return Err(AppError::not_found(ENTITY, "No transfers received on this account"));
        }
        Ok(transfers)
    }
}

async fn validate(uow: &mut dyn UnitOfWork, request: &TransferRequest) -> Result<Legs, AppError> {
    let lookup_failure =
        |source: StoreError| AppError::persistence(ENTITY, "Error creating new transfer", source);

    let source = uow
        .find_account(request.source_account_id)
        .await
        .map_err(lookup_failure)?;
    let target = uow
        .find_account(request.target_account_id)
        .await
        .map_err(lookup_failure)?;

    let source = source.ok_or_else(|| AppError::not_found(ENTITY, "Source account doesn't exist"))?;
    let target = target.ok_or_else(|| AppError::not_found(ENTITY, "Target account doesn't exist"))?;

    if source.id == target.id {
        return Err(AppError::invalid_operation(
            ENTITY,
            "Source and target account are the same",
        ));
    }

    // Widened so that a negative amount cannot overflow the subtraction
    let remaining = i128::from(source.balance_cents) - i128::from(request.amount_cents);
    if remaining < 0 {
        return Err(AppError::insufficient_funds(
            ENTITY,
            "Source account balance is insufficient for this transfer",
        ));
    }

    if request.amount_cents <= 0 {
        return Err(AppError::invalid_amount(ENTITY, "Invalid transfer amount"));
    }

    // amount > 0 and remaining >= 0, so the debit fits in i64
    let source_balance = source.balance_cents - request.amount_cents;
    let target_balance = target
        .balance_cents
        .checked_add(request.amount_cents)
        .ok_or_else(|| {
            AppError::invalid_amount(ENTITY, "Transfer amount overflows the target balance")
        })?;

    Ok(Legs {
        source,
        source_balance,
        target,
        target_balance,
    })
}

async fn apply(
    mut uow: Box<dyn UnitOfWork>,
    record: &TransferRecord,
    legs: Legs,
) -> Result<(), StoreError> {
    let Legs {
        mut source,
        source_balance,
        mut target,
        target_balance,
    } = legs;

    uow.save_transfer(record).await?;

    source.set_balance(source_balance);
    uow.save_account(&source).await?;

    target.set_balance(target_balance);
    uow.save_account(&target).await?;

    uow.commit().await
}
