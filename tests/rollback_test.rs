mod common;

use bank_ledger_service::error::{AppError, EntityKind};
use bank_ledger_service::models::{transaction::TransactionRequest, transfer::TransferRequest};
use bank_ledger_service::services::{
    transaction_service::TransactionEngine, transfer_service::TransferEngine,
};
use common::{Fault, FaultyLedger, two_accounts};
use std::sync::Arc;

fn transfer(source: uuid::Uuid, target: uuid::Uuid, amount_cents: i64) -> TransferRequest {
    TransferRequest {
        source_account_id: source,
        target_account_id: target,
        amount_cents,
    }
}

#[tokio::test]
async fn test_failed_credit_rolls_back_debit_and_entry() {
    let (ledger, a, b) = two_accounts(100, 0);
    // First save is the debit of the source, second is the credit of the target
    let engine = TransferEngine::new(Arc::new(FaultyLedger::new(
        ledger.clone(),
        Fault::SaveAccount(2),
    )));

    let err = engine.record_transfer(transfer(a, b, 40)).await.unwrap_err();

    assert!(matches!(
        err,
        AppError::Persistence {
            entity: EntityKind::Transfer,
            ..
        }
    ));
    assert_eq!(err.to_string(), "Error creating new transfer");
    assert_eq!(ledger.account(a).await.unwrap().balance_cents, 100);
    assert_eq!(ledger.account(b).await.unwrap().balance_cents, 0);
    assert_eq!(ledger.transfer_count().await, 0);
}

#[tokio::test]
async fn test_every_transfer_fault_leaves_no_trace() {
    for fault in [
        Fault::Begin,
        Fault::SaveTransfer,
        Fault::SaveAccount(1),
        Fault::SaveAccount(2),
        Fault::Commit,
    ] {
        let (ledger, a, b) = two_accounts(100, 50);
        let engine = TransferEngine::new(Arc::new(FaultyLedger::new(ledger.clone(), fault)));

        let err = engine.record_transfer(transfer(a, b, 10)).await.unwrap_err();

        assert!(matches!(err, AppError::Persistence { .. }), "{fault:?}");
        assert_eq!(ledger.account(a).await.unwrap().balance_cents, 100, "{fault:?}");
        assert_eq!(ledger.account(b).await.unwrap().balance_cents, 50, "{fault:?}");
        assert_eq!(ledger.transfer_count().await, 0, "{fault:?}");
    }
}

#[tokio::test]
async fn test_failed_balance_save_rolls_back_transaction_entry() {
    let (ledger, a, _) = two_accounts(100, 0);
    let engine = TransactionEngine::new(Arc::new(FaultyLedger::new(
        ledger.clone(),
        Fault::SaveAccount(1),
    )));

    let err = engine
        .record_transaction(TransactionRequest {
            account_id: a,
            transaction_type: "deposit".to_string(),
            amount_cents: 25,
            description: "paycheck".to_string(),
        })
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        AppError::Persistence {
            entity: EntityKind::Transaction,
            ..
        }
    ));
    assert_eq!(err.to_string(), "Error creating new transaction");
    assert_eq!(ledger.account(a).await.unwrap().balance_cents, 100);
    assert_eq!(ledger.transaction_count().await, 0);
}

#[tokio::test]
async fn test_validation_error_wins_over_later_storage_fault() {
    let (ledger, a, b) = two_accounts(5, 0);
    let engine = TransferEngine::new(Arc::new(FaultyLedger::new(ledger.clone(), Fault::Commit)));

    let err = engine.record_transfer(transfer(a, b, 10)).await.unwrap_err();

    assert!(matches!(err, AppError::InsufficientFunds { .. }));
}

#[tokio::test]
async fn test_list_storage_failure_is_persistence_error() {
    let (ledger, a, _) = two_accounts(5, 0);
    let ledger = Arc::new(FaultyLedger::new(ledger, Fault::Begin));

    let err = TransactionEngine::new(ledger.clone())
        .list_transactions_for_account(a)
        .await
        .unwrap_err();
    assert_eq!(err.to_string(), "Error getting account's transactions");

    let err = TransferEngine::new(ledger.clone())
        .list_sent_transfers(a)
        .await
        .unwrap_err();
    assert_eq!(err.to_string(), "Error getting account's sent transfers");

    let err = TransferEngine::new(ledger)
        .list_received_transfers(a)
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Persistence { .. }));
    assert_eq!(err.to_string(), "Error getting account's received transfers");
}
