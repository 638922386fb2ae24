//! Transaction service - records single-account balance adjustments.
//!
//! # Process
//!
//! 1. Open a unit of work
//! 2. Validate the request against the locked account
//! 3. Persist the entry, then the new balance
//! 4. Commit (or roll back on any error)

use super::rollback;
use crate::{
    error::{AppError, EntityKind},
    models::{
        account::Account,
        transaction::{TransactionRecord, TransactionRequest},
    },
    store::{Ledger, StoreError, UnitOfWork},
};
use std::sync::Arc;
use uuid::Uuid;

const ENTITY: EntityKind = EntityKind::Transaction;

/// Applies transactions to accounts and answers history queries.
#[derive(Clone)]
pub struct TransactionEngine {
    ledger: Arc<dyn Ledger>,
}

impl TransactionEngine {
    pub fn new(ledger: Arc<dyn Ledger>) -> Self {
        Self { ledger }
    }

    /// Record a transaction and add its amount to the account balance.
    ///
    /// # Errors
    ///
    /// Checked in this order, first failure wins:
    /// - `NotFound`: Account doesn't exist
    /// - `InvalidAmount`: Amount is zero or negative, or the new balance overflows
    /// - `Persistence`: Storage failed; nothing was written
    pub async fn record_transaction(&self, request: TransactionRequest) -> Result<(), AppError> {
        let creation_failure = |source: StoreError| {
            AppError::persistence(ENTITY, "Error creating new transaction", source)
        };

        let mut uow = self.ledger.begin().await.map_err(creation_failure)?;

        let (account, new_balance) = match validate(uow.as_mut(), &request).await {
            Ok(validated) => validated,
            Err(err) => {
                tracing::warn!(account_id = %request.account_id, error = %err, "transaction rejected");
                rollback(uow).await;
                return Err(err);
            }
        };

        let record = TransactionRecord::new(&request);
        apply(uow, &record, account, new_balance).await.map_err(|source| {
            tracing::error!(account_id = %request.account_id, error = %source, "transaction aborted");
            creation_failure(source)
        })?;

        tracing::info!(
            transaction_id = %record.id,
            account_id = %record.account_id,
            amount_cents = record.amount_cents,
            "transaction recorded"
        );
        Ok(())
    }

    /// All transactions of an account, oldest first.
    ///
    /// An account with no transactions is reported as `NotFound` rather
    /// than as an empty list.
    pub async fn list_transactions_for_account(
        &self,
        account_id: Uuid,
    ) -> Result<Vec<TransactionRecord>, AppError> {
        let lookup_failure = |source: StoreError| {
            AppError::persistence(ENTITY, "Error getting account's transactions", source)
        };

        let mut uow = self.ledger.begin().await.map_err(lookup_failure)?;
        let transactions = uow
            .find_transactions_by_account_id(account_id)
            .await
            .map_err(lookup_failure)?;
        rollback(uow).await;

        if transactions.is_empty() {
            return Err(AppError::not_found(ENTITY, "No transactions on this account"));
        }
        Ok(transactions)
    }
}

/// Returns the locked account and its balance after the transaction is applied.
async fn validate(
    uow: &mut dyn UnitOfWork,
    request: &TransactionRequest,
) -> Result<(Account, i64), AppError> {
    let account = uow
        .find_account(request.account_id)
        .await
        .map_err(|source| AppError::persistence(ENTITY, "Error creating new transaction", source))?
        .ok_or_else(|| AppError::not_found(ENTITY, "Account doesn't exist"))?;

    if request.amount_cents <= 0 {
        return Err(AppError::invalid_amount(ENTITY, "Invalid transaction amount"));
    }

    let new_balance = account
        .balance_cents
        .checked_add(request.amount_cents)
        .ok_or_else(|| {
            AppError::invalid_amount(ENTITY, "Transaction amount overflows the account balance")
        })?;

    Ok((account, new_balance))
}

async fn apply(
    mut uow: Box<dyn UnitOfWork>,
    record: &TransactionRecord,
    mut account: Account,
    new_balance: i64,
) -> Result<(), StoreError> {
    uow.save_transaction(record).await?;

    account.set_balance(new_balance);
    uow.save_account(&account).await?;

    uow.commit().await
}
