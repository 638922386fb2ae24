//! Router construction and shared handler state.

use crate::{
    handlers,
    services::{transaction_service::TransactionEngine, transfer_service::TransferEngine},
    store::Ledger,
};
use axum::{Router, routing::get, routing::post};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

/// State shared with every handler via `State` extraction.
#[derive(Clone)]
pub struct AppState {
    pub transactions: TransactionEngine,
    pub transfers: TransferEngine,
    pub ledger: Arc<dyn Ledger>,
}

impl AppState {
    pub fn new(ledger: Arc<dyn Ledger>) -> Self {
        Self {
            transactions: TransactionEngine::new(ledger.clone()),
            transfers: TransferEngine::new(ledger.clone()),
            ledger,
        }
    }
}

/// Build the HTTP router on top of `ledger`.
pub fn router(ledger: Arc<dyn Ledger>) -> Router {
    let api_routes = Router::new()
        // Account routes
        .route("/api/v1/accounts/{id}", get(handlers::accounts::get_account))
        .route(
            "/api/v1/accounts/{id}/transactions",
            get(handlers::transactions::list_transactions),
        )
        .route(
            "/api/v1/accounts/{id}/transfers/sent",
            get(handlers::transfers::list_sent_transfers),
        )
        .route(
            "/api/v1/accounts/{id}/transfers/received",
            get(handlers::transfers::list_received_transfers),
        )
        // Money movement routes
        .route(
            "/api/v1/transactions",
            post(handlers::transactions::create_transaction),
        )
        .route("/api/v1/transfers", post(handlers::transfers::create_transfer));

    Router::new()
        .route("/health", get(handlers::health::health_check))
        .merge(api_routes)
        .layer(TraceLayer::new_for_http())
        .with_state(AppState::new(ledger))
}
