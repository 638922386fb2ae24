//! Transfer data models and API request types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Represents a transfer record from the database.
///
/// Maps to the `transfers` table. Source and target are always different
/// accounts (enforced by CHECK constraint).
#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow, Serialize)]
pub struct TransferRecord {
    pub id: Uuid,

    /// Account that was debited
    pub source_account_id: Uuid,

    /// Account that was credited
    pub target_account_id: Uuid,

    /// Amount moved, in cents
    pub amount_cents: i64,

    pub created_at: DateTime<Utc>,
}

impl TransferRecord {
    pub fn new(request: &TransferRequest) -> Self {
        Self {
            id: Uuid::new_v4(),
            source_account_id: request.source_account_id,
            target_account_id: request.target_account_id,
            amount_cents: request.amount_cents,
            created_at: Utc::now(),
        }
    }
}

/// Request to transfer money between accounts.
///
/// # JSON Example
///
/// ```json
/// {
///   "source_account_id": "550e8400-e29b-41d4-a716-446655440000",
///   "target_account_id": "660e8400-e29b-41d4-a716-446655440001",
///   "amount_cents": 25000
/// }
/// ```
///
/// # Atomicity Guarantee
///
/// The entry, the debit and the credit are written in the same unit of work.
/// If the credit fails, the debit and the entry are rolled back.
#[derive(Debug, Clone, Deserialize)]
pub struct TransferRequest {
    /// Account to transfer from (will decrease)
    pub source_account_id: Uuid,

    /// Account to transfer to (will increase)
    pub target_account_id: Uuid,

    /// Amount to transfer in cents
    pub amount_cents: i64,
}
