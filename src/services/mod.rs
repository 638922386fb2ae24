//! Business logic services.
//!
//! Services contain the money-movement logic separated from HTTP handlers.
//! Each top-level call runs inside exactly one unit of work.

pub mod transaction_service;
pub mod transfer_service;

use crate::store::UnitOfWork;

/// Discard a unit of work that has nothing worth keeping.
///
/// A failed rollback is only logged; uncommitted writes are dropped by the
/// back end either way.
async fn rollback(uow: Box<dyn UnitOfWork>) {
    if let Err(err) = uow.rollback().await {
        tracing::warn!(error = %err, "rollback failed");
    }
}
