//! Account data model and its API response type.
//!
//! Accounts are created and deleted by the account-management service. This
//! service only reads them and moves their balances.

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

/// Represents an account record from the database.
///
/// # Balance Storage
///
/// Balances are stored as `i64` cents to avoid floating-point precision issues.
///
/// For example:
/// - $10.50 is stored as 1050 cents
/// - $100.00 is stored as 10000 cents
#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow, Serialize)]
pub struct Account {
    /// Unique identifier for this account
    pub id: Uuid,

    /// Human-readable name for this account
    pub account_name: String,

    /// Current balance in cents (not dollars)
    ///
    /// Must be >= 0 (enforced by database CHECK constraint).
    pub balance_cents: i64,

    /// Timestamp of last balance update
    pub updated_at: DateTime<Utc>,
}

impl Account {
    /// Build an account with the given opening balance.
    ///
    /// Used by embedders and tests that seed an in-memory ledger.
    pub fn new(account_name: impl Into<String>, balance_cents: i64) -> Self {
        Self {
            id: Uuid::new_v4(),
            account_name: account_name.into(),
            balance_cents,
            updated_at: Utc::now(),
        }
    }

    /// Replace the balance and touch `updated_at`.
    pub fn set_balance(&mut self, balance_cents: i64) {
        self.balance_cents = balance_cents;
        self.updated_at = Utc::now();
    }
}

/// Response body for `GET /api/v1/accounts/{id}`.
///
/// # JSON Example
///
/// ```json
/// {
///   "id": "550e8400-e29b-41d4-a716-446655440000",
///   "account_name": "My Account",
///   "balance_cents": 100000,
///   "updated_at": "2025-12-20T10:00:00Z"
/// }
/// ```
#[derive(Debug, Serialize)]
pub struct AccountResponse {
    pub id: Uuid,
    pub account_name: String,
    pub balance_cents: i64,
    pub updated_at: DateTime<Utc>,
}

impl From<Account> for AccountResponse {
    fn from(account: Account) -> Self {
        Self {
            id: account.id,
            account_name: account.account_name,
            balance_cents: account.balance_cents,
            updated_at: account.updated_at,
        }
    }
}
