//! Storage ports used by the engines.
//!
//! The engines never talk to a database directly. They open a [`UnitOfWork`]
//! from a [`Ledger`], read and write through it, and either commit it or let
//! it drop. Dropping a unit of work without committing discards every write
//! made through it.

pub mod memory;
pub mod postgres;

use crate::models::{account::Account, transaction::TransactionRecord, transfer::TransferRecord};
use async_trait::async_trait;
use uuid::Uuid;

/// Failure reported by a storage back end.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// Database operation failed (connection error, query error, constraint violation).
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// An account disappeared between being loaded and being saved.
    #[error("Account {0} no longer exists")]
    MissingAccount(Uuid),

    /// The back end cannot serve requests right now.
    #[error("Storage unavailable: {0}")]
    Unavailable(String),
}

/// Load and save account balances.
#[async_trait]
pub trait AccountStore: Send {
    async fn find_account(&mut self, id: Uuid) -> Result<Option<Account>, StoreError>;

    /// Persist the account's current balance. The account must already exist.
    async fn save_account(&mut self, account: &Account) -> Result<(), StoreError>;
}

/// Append-only persistence for transaction and transfer entries.
///
/// Every `find_*` method returns records in insertion order.
#[async_trait]
pub trait EntryStore: Send {
    async fn save_transaction(&mut self, record: &TransactionRecord) -> Result<(), StoreError>;

    async fn save_transfer(&mut self, record: &TransferRecord) -> Result<(), StoreError>;

    async fn find_transactions_by_account_id(
        &mut self,
        account_id: Uuid,
    ) -> Result<Vec<TransactionRecord>, StoreError>;

    async fn find_transfers_by_source_account_id(
        &mut self,
        account_id: Uuid,
    ) -> Result<Vec<TransferRecord>, StoreError>;

    async fn find_transfers_by_target_account_id(
        &mut self,
        account_id: Uuid,
    ) -> Result<Vec<TransferRecord>, StoreError>;
}

/// A single all-or-nothing boundary around account and entry writes.
///
/// Writes become visible to other units of work only after [`commit`]
/// succeeds. Dropping the unit of work has the same effect as [`rollback`].
///
/// [`commit`]: UnitOfWork::commit
/// [`rollback`]: UnitOfWork::rollback
#[async_trait]
pub trait UnitOfWork: AccountStore + EntryStore {
    async fn commit(self: Box<Self>) -> Result<(), StoreError>;

    async fn rollback(self: Box<Self>) -> Result<(), StoreError>;
}

/// A storage back end that hands out units of work.
#[async_trait]
pub trait Ledger: Send + Sync {
    async fn begin(&self) -> Result<Box<dyn UnitOfWork>, StoreError>;
}
