//! Bank ledger service.
//!
//! Records single-account transactions and account-to-account transfers.
//! Every request runs inside one all-or-nothing unit of work: validation,
//! the audit entry and every balance change are committed together or not
//! at all.
//!
//! # Architecture
//!
//! - **Web Framework**: Axum (async HTTP server)
//! - **Database**: PostgreSQL with sqlx (async queries)
//! - **Engines**: `services::transaction_service` and `services::transfer_service`
//! - **Storage ports**: `store::Ledger` / `store::UnitOfWork`, with a
//!   PostgreSQL and an in-memory implementation

pub mod app;
pub mod config;
pub mod db;
pub mod error;
pub mod handlers;
pub mod models;
pub mod services;
pub mod store;
