//! In-process ledger with the same unit-of-work semantics as the database.
//!
//! A unit of work holds the ledger's lock from `begin` until it is committed
//! or dropped, so units of work run one at a time. Writes are staged inside
//! the unit of work and only copied into the shared state on commit.

use super::{AccountStore, EntryStore, Ledger, StoreError, UnitOfWork};
use crate::models::{account::Account, transaction::TransactionRecord, transfer::TransferRecord};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::{Mutex, OwnedMutexGuard};
use uuid::Uuid;

#[derive(Debug, Default)]
struct LedgerState {
    accounts: HashMap<Uuid, Account>,
    transactions: Vec<TransactionRecord>,
    transfers: Vec<TransferRecord>,
}

/// A thread-safe in-memory ledger.
///
/// Cloning is cheap and every clone shares the same state. Ideal for tests
/// and for embedding the engines without a database.
#[derive(Debug, Default, Clone)]
pub struct InMemoryLedger {
    state: Arc<Mutex<LedgerState>>,
}

impl InMemoryLedger {
    /// Creates a new, empty ledger.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a ledger that already holds `accounts`.
    pub fn with_accounts(accounts: impl IntoIterator<Item = Account>) -> Self {
        let state = LedgerState {
            accounts: accounts.into_iter().map(|a| (a.id, a)).collect(),
            ..LedgerState::default()
        };
        Self {
            state: Arc::new(Mutex::new(state)),
        }
    }

    /// Committed view of one account.
    pub async fn account(&self, id: Uuid) -> Option<Account> {
        self.state.lock().await.accounts.get(&id).cloned()
    }

    /// Number of committed transaction entries across all accounts.
    pub async fn transaction_count(&self) -> usize {
        self.state.lock().await.transactions.len()
    }

    /// Number of committed transfer entries across all accounts.
    pub async fn transfer_count(&self) -> usize {
        self.state.lock().await.transfers.len()
    }
}

#[async_trait]
impl Ledger for InMemoryLedger {
    async fn begin(&self) -> Result<Box<dyn UnitOfWork>, StoreError> {
        let guard = self.state.clone().lock_owned().await;
        Ok(Box::new(InMemoryUnitOfWork {
            committed: guard,
            accounts: HashMap::new(),
            transactions: Vec::new(),
            transfers: Vec::new(),
        }))
    }
}

/// Staged writes on top of the locked committed state.
pub struct InMemoryUnitOfWork {
    committed: OwnedMutexGuard<LedgerState>,
    accounts: HashMap<Uuid, Account>,
    transactions: Vec<TransactionRecord>,
    transfers: Vec<TransferRecord>,
}

#[async_trait]
impl AccountStore for InMemoryUnitOfWork {
    async fn find_account(&mut self, id: Uuid) -> Result<Option<Account>, StoreError> {
        let account = self
            .accounts
            .get(&id)
            .or_else(|| self.committed.accounts.get(&id))
            .cloned();
        Ok(account)
    }

    async fn save_account(&mut self, account: &Account) -> Result<(), StoreError> {
        if !self.committed.accounts.contains_key(&account.id) {
            return Err(StoreError::MissingAccount(account.id));
        }
        self.accounts.insert(account.id, account.clone());
        Ok(())
    }
}

#[async_trait]
impl EntryStore for InMemoryUnitOfWork {
    async fn save_transaction(&mut self, record: &TransactionRecord) -> Result<(), StoreError> {
        self.transactions.push(record.clone());
        Ok(())
    }

    async fn save_transfer(&mut self, record: &TransferRecord) -> Result<(), StoreError> {
        self.transfers.push(record.clone());
        Ok(())
    }

    async fn find_transactions_by_account_id(
        &mut self,
        account_id: Uuid,
    ) -> Result<Vec<TransactionRecord>, StoreError> {
        Ok(self
            .committed
            .transactions
            .iter()
            .chain(&self.transactions)
            .filter(|r| r.account_id == account_id)
            .cloned()
            .collect())
    }

    async fn find_transfers_by_source_account_id(
        &mut self,
        account_id: Uuid,
    ) -> Result<Vec<TransferRecord>, StoreError> {
        Ok(self
            .committed
            .transfers
            .iter()
            .chain(&self.transfers)
            .filter(|r| r.source_account_id == account_id)
            .cloned()
            .collect())
    }

    async fn find_transfers_by_target_account_id(
        &mut self,
        account_id: Uuid,
    ) -> Result<Vec<TransferRecord>, StoreError> {
        Ok(self
            .committed
            .transfers
            .iter()
            .chain(&self.transfers)
            .filter(|r| r.target_account_id == account_id)
            .cloned()
            .collect())
    }
}

#[async_trait]
impl UnitOfWork for InMemoryUnitOfWork {
    async fn commit(self: Box<Self>) -> Result<(), StoreError> {
        let InMemoryUnitOfWork {
            mut committed,
            accounts,
            transactions,
            transfers,
        } = *self;

        committed.accounts.extend(accounts);
        committed.transactions.extend(transactions);
        committed.transfers.extend(transfers);
        Ok(())
    }

    async fn rollback(self: Box<Self>) -> Result<(), StoreError> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn deposit(account_id: Uuid, amount_cents: i64) -> TransactionRecord {
        TransactionRecord {
            id: Uuid::new_v4(),
            account_id,
            transaction_type: "deposit".to_string(),
            amount_cents,
            description: String::new(),
            created_at: chrono::Utc::now(),
        }
    }

    #[tokio::test]
    async fn test_commit_publishes_staged_writes() {
        let mut account = Account::new("checking", 100);
        let ledger = InMemoryLedger::with_accounts([account.clone()]);

        let mut uow = ledger.begin().await.unwrap();
        account.set_balance(250);
        uow.save_account(&account).await.unwrap();
        uow.save_transaction(&deposit(account.id, 150)).await.unwrap();
        uow.commit().await.unwrap();

        assert_eq!(ledger.account(account.id).await.unwrap().balance_cents, 250);
        assert_eq!(ledger.transaction_count().await, 1);
    }

    #[tokio::test]
    async fn test_dropped_unit_of_work_discards_writes() {
        let mut account = Account::new("checking", 100);
        let ledger = InMemoryLedger::with_accounts([account.clone()]);

        {
            let mut uow = ledger.begin().await.unwrap();
            account.set_balance(0);
            uow.save_account(&account).await.unwrap();
            uow.save_transaction(&deposit(account.id, 1)).await.unwrap();

            // Staged writes are visible inside the unit of work
            let seen = uow.find_account(account.id).await.unwrap().unwrap();
            assert_eq!(seen.balance_cents, 0);
        }

        assert_eq!(ledger.account(account.id).await.unwrap().balance_cents, 100);
        assert_eq!(ledger.transaction_count().await, 0);
    }

    #[tokio::test]
    async fn test_save_unknown_account_fails() {
        let ledger = InMemoryLedger::new();
        let mut uow = ledger.begin().await.unwrap();

        let stranger = Account::new("nobody", 0);
        let err = uow.save_account(&stranger).await.unwrap_err();
        assert!(matches!(err, StoreError::MissingAccount(id) if id == stranger.id));
    }

    #[tokio::test]
    async fn test_entries_keep_insertion_order() {
        let account = Account::new("checking", 0);
        let ledger = InMemoryLedger::with_accounts([account.clone()]);
        let other = Uuid::new_v4();

        let mut uow = ledger.begin().await.unwrap();
        let first = deposit(account.id, 1);
        let second = deposit(account.id, 2);
        uow.save_transaction(&first).await.unwrap();
        uow.save_transaction(&deposit(other, 3)).await.unwrap();
        uow.commit().await.unwrap();

        let mut uow = ledger.begin().await.unwrap();
        uow.save_transaction(&second).await.unwrap();
        let found = uow.find_transactions_by_account_id(account.id).await.unwrap();
        assert_eq!(found, vec![first, second]);
    }
}
