#![allow(dead_code)]

use async_trait::async_trait;
use bank_ledger_service::models::{
    account::Account, transaction::TransactionRecord, transfer::TransferRecord,
};
use bank_ledger_service::store::memory::InMemoryLedger;
use bank_ledger_service::store::{AccountStore, EntryStore, Ledger, StoreError, UnitOfWork};
use uuid::Uuid;

/// Where a `FaultyLedger` should fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Fault {
    /// Fail on the n-th `save_account` of a unit of work (1-based).
    SaveAccount(usize),
    SaveTransaction,
    SaveTransfer,
    Commit,
    Begin,
}

/// Wraps an `InMemoryLedger` and injects a storage failure.
#[derive(Clone)]
pub struct FaultyLedger {
    pub inner: InMemoryLedger,
    fault: Fault,
}

impl FaultyLedger {
    pub fn new(inner: InMemoryLedger, fault: Fault) -> Self {
        Self { inner, fault }
    }
}

fn injected(what: &str) -> StoreError {
    StoreError::Unavailable(format!("injected failure on {what}"))
}

#[async_trait]
impl Ledger for FaultyLedger {
    async fn begin(&self) -> Result<Box<dyn UnitOfWork>, StoreError> {
        if self.fault == Fault::Begin {
            return Err(injected("begin"));
        }
        Ok(Box::new(FaultyUnitOfWork {
            inner: self.inner.begin().await?,
            fault: self.fault,
            account_saves: 0,
        }))
    }
}

struct FaultyUnitOfWork {
    inner: Box<dyn UnitOfWork>,
    fault: Fault,
    account_saves: usize,
}

#[async_trait]
impl AccountStore for FaultyUnitOfWork {
    async fn find_account(&mut self, id: Uuid) -> Result<Option<Account>, StoreError> {
        self.inner.find_account(id).await
    }

    async fn save_account(&mut self, account: &Account) -> Result<(), StoreError> {
        self.account_saves += 1;
        if self.fault == Fault::SaveAccount(self.account_saves) {
            return Err(injected("save_account"));
        }
        self.inner.save_account(account).await
    }
}

#[async_trait]
impl EntryStore for FaultyUnitOfWork {
    async fn save_transaction(&mut self, record: &TransactionRecord) -> Result<(), StoreError> {
        if self.fault == Fault::SaveTransaction {
            return Err(injected("save_transaction"));
        }
        self.inner.save_transaction(record).await
    }

    async fn save_transfer(&mut self, record: &TransferRecord) -> Result<(), StoreError> {
        if self.fault == Fault::SaveTransfer {
            return Err(injected("save_transfer"));
        }
        self.inner.save_transfer(record).await
    }

    async fn find_transactions_by_account_id(
        &mut self,
        account_id: Uuid,
    ) -> Result<Vec<TransactionRecord>, StoreError> {
        self.inner.find_transactions_by_account_id(account_id).await
    }

    async fn find_transfers_by_source_account_id(
        &mut self,
        account_id: Uuid,
    ) -> Result<Vec<TransferRecord>, StoreError> {
        self.inner.find_transfers_by_source_account_id(account_id).await
    }

    async fn find_transfers_by_target_account_id(
        &mut self,
        account_id: Uuid,
    ) -> Result<Vec<TransferRecord>, StoreError> {
        self.inner.find_transfers_by_target_account_id(account_id).await
    }
}

#[async_trait]
impl UnitOfWork for FaultyUnitOfWork {
    async fn commit(self: Box<Self>) -> Result<(), StoreError> {
        if self.fault == Fault::Commit {
            return Err(injected("commit"));
        }
        self.inner.commit().await
    }

    async fn rollback(self: Box<Self>) -> Result<(), StoreError> {
        self.inner.rollback().await
    }
}

/// Two accounts with the given balances.
pub fn two_accounts(a_balance: i64, b_balance: i64) -> (InMemoryLedger, Uuid, Uuid) {
    let a = Account::new("alice", a_balance);
    let b = Account::new("bob", b_balance);
    let (a_id, b_id) = (a.id, b.id);
    (InMemoryLedger::with_accounts([a, b]), a_id, b_id)
}
