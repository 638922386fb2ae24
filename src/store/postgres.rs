//! PostgreSQL ledger backed by sqlx transactions.
//!
//! # Atomicity Guarantees
//!
//! Every unit of work is a PostgreSQL transaction. Accounts are loaded with
//! `FOR UPDATE`, so a concurrent request touching the same account waits
//! until this one commits or rolls back.

use super::{AccountStore, EntryStore, Ledger, StoreError, UnitOfWork};
use crate::{
    db::DbPool,
    models::{account::Account, transaction::TransactionRecord, transfer::TransferRecord},
};
use async_trait::async_trait;
use sqlx::Postgres;
use uuid::Uuid;

/// Ledger that opens one database transaction per unit of work.
#[derive(Debug, Clone)]
pub struct PgLedger {
    pool: DbPool,
}

impl PgLedger {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl Ledger for PgLedger {
    async fn begin(&self) -> Result<Box<dyn UnitOfWork>, StoreError> {
        let tx = self.pool.begin().await?;
        Ok(Box::new(PgUnitOfWork { tx }))
    }
}

/// A live PostgreSQL transaction.
///
/// sqlx rolls the transaction back when it is dropped without a commit.
pub struct PgUnitOfWork {
    tx: sqlx::Transaction<'static, Postgres>,
}

#[async_trait]
impl AccountStore for PgUnitOfWork {
    async fn find_account(&mut self, id: Uuid) -> Result<Option<Account>, StoreError> {
        // FOR UPDATE ensures no other transaction can modify this row until we finish
        let account = sqlx::query_as::<_, Account>(
            r#"
            SELECT id, account_name, balance_cents, updated_at
            FROM accounts
            WHERE id = $1
            FOR UPDATE
            "#,
        )
        .bind(id)
        .fetch_optional(&mut *self.tx)
        .await?;

        Ok(account)
    }

    async fn save_account(&mut self, account: &Account) -> Result<(), StoreError> {
        let updated_count = sqlx::query(
            r#"
            UPDATE accounts
            SET balance_cents = $1,
                updated_at = $2
            WHERE id = $3
            "#,
        )
        .bind(account.balance_cents)
        .bind(account.updated_at)
        .bind(account.id)
        .execute(&mut *self.tx)
        .await?
        .rows_affected();

        if updated_count == 0 {
            return Err(StoreError::MissingAccount(account.id));
        }

        Ok(())
    }
}

#[async_trait]
impl EntryStore for PgUnitOfWork {
    async fn save_transaction(&mut self, record: &TransactionRecord) -> Result<(), StoreError> {
        sqlx::query(
            r#"
            INSERT INTO transactions (
                id,
                account_id,
                transaction_type,
                amount_cents,
                description,
                created_at
            )
            VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(record.id)
        .bind(record.account_id)
        .bind(&record.transaction_type)
        .bind(record.amount_cents)
        .bind(&record.description)
        .bind(record.created_at)
        .execute(&mut *self.tx)
        .await?;

        Ok(())
    }

    async fn save_transfer(&mut self, record: &TransferRecord) -> Result<(), StoreError> {
        sqlx::query(
            r#"
            INSERT INTO transfers (
                id,
                source_account_id,
                target_account_id,
                amount_cents,
                created_at
            )
            VALUES ($1, $2, $3, $4, $5)
            "#,
        )
        .bind(record.id)
        .bind(record.source_account_id)
        .bind(record.target_account_id)
        .bind(record.amount_cents)
        .bind(record.created_at)
        .execute(&mut *self.tx)
        .await?;

        Ok(())
    }

    async fn find_transactions_by_account_id(
        &mut self,
        account_id: Uuid,
    ) -> Result<Vec<TransactionRecord>, StoreError> {
        let records = sqlx::query_as::<_, TransactionRecord>(
            r#"
            SELECT id, account_id, transaction_type, amount_cents, description, created_at
            FROM transactions
            WHERE account_id = $1
            ORDER BY seq
            "#,
        )
        .bind(account_id)
        .fetch_all(&mut *self.tx)
        .await?;

        Ok(records)
    }

    async fn find_transfers_by_source_account_id(
        &mut self,
        account_id: Uuid,
    ) -> Result<Vec<TransferRecord>, StoreError> {
        let records = sqlx::query_as::<_, TransferRecord>(
            r#"
            SELECT id, source_account_id, target_account_id, amount_cents, created_at
            FROM transfers
            WHERE source_account_id = $1
            ORDER BY seq
            "#,
        )
        .bind(account_id)
        .fetch_all(&mut *self.tx)
        .await?;

        Ok(records)
    }

    async fn find_transfers_by_target_account_id(
        &mut self,
        account_id: Uuid,
    ) -> Result<Vec<TransferRecord>, StoreError> {
        let records = sqlx::query_as::<_, TransferRecord>(
            r#"
            SELECT id, source_account_id, target_account_id, amount_cents, created_at
            FROM transfers
            WHERE target_account_id = $1
            ORDER BY seq
            "#,
        )
        .bind(account_id)
        .fetch_all(&mut *self.tx)
        .await?;

        Ok(records)
    }
}

#[async_trait]
impl UnitOfWork for PgUnitOfWork {
    async fn commit(self: Box<Self>) -> Result<(), StoreError> {
        self.tx.commit().await?;
        Ok(())
    }

    async fn rollback(self: Box<Self>) -> Result<(), StoreError> {
        self.tx.rollback().await?;
        Ok(())
    }
}
