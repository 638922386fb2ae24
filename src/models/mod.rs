//! Data models representing database entities.
//!
//! This module contains all data structures that map to database tables,
//! plus the request bodies that produce them.

/// Account model (balances only; accounts are managed elsewhere)
pub mod account;
/// Single-account transaction entries
pub mod transaction;
/// Two-account transfer entries
pub mod transfer;
