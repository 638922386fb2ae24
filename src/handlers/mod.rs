//! HTTP request handlers (route handlers).
//!
//! Each handler is an async function that:
//! 1. Receives HTTP request data (JSON body, URL params)
//! 2. Delegates to an engine in `services`
//! 3. Returns HTTP response (JSON, status code)

/// Account balance endpoint
pub mod accounts;
/// Liveness endpoint
pub mod health;
/// Single-account transaction endpoints
pub mod transactions;
/// Account-to-account transfer endpoints
pub mod transfers;
