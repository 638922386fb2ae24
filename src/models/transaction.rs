//! Transaction data models and API request types.
//!
//! This module defines:
//! - `TransactionRecord`: immutable entry for a single-account balance adjustment
//! - `TransactionRequest`: request body for recording one

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Represents a transaction record from the database.
///
/// # Database Table
///
/// Maps to the `transactions` table. Each transaction:
/// - References exactly one owning account
/// - Stores amount in cents (never floats!)
/// - Is append-only: once persisted it is never updated
#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow, Serialize)]
pub struct TransactionRecord {
    /// Unique identifier for this transaction
    pub id: Uuid,

    /// Account whose balance this transaction adjusted
    pub account_id: Uuid,

    /// Category label supplied by the caller (e.g. "deposit", "withdrawal")
    pub transaction_type: String,

    /// Amount in cents
    ///
    /// Always positive (enforced by CHECK constraint)
    pub amount_cents: i64,

    /// Human-readable description
    pub description: String,

    /// When the transaction was recorded
    pub created_at: DateTime<Utc>,
}

impl TransactionRecord {
    /// Stamp a new record for `request` with a fresh id and the current time.
    pub fn new(request: &TransactionRequest) -> Self {
        Self {
            id: Uuid::new_v4(),
            account_id: request.account_id,
            transaction_type: request.transaction_type.clone(),
            amount_cents: request.amount_cents,
            description: request.description.clone(),
            created_at: Utc::now(),
        }
    }
}

/// Request to record a transaction against an account.
///
/// # JSON Example
///
/// ```json
/// {
///   "account_id": "550e8400-e29b-41d4-a716-446655440000",
///   "transaction_type": "deposit",
///   "amount_cents": 5000,
///   "description": "Cash deposit"
/// }
/// ```
///
/// # Validation
///
/// - Account must exist
/// - Amount must be positive
#[derive(Debug, Clone, Deserialize)]
pub struct TransactionRequest {
    pub account_id: Uuid,

    pub transaction_type: String,

    /// Amount to add in cents
    pub amount_cents: i64,

    #[serde(default)]
    pub description: String,
}
