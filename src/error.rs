//! Error types and HTTP error response handling.
//!
//! This module defines all application errors and how they are converted
//! into HTTP responses with appropriate status codes and JSON bodies.

use crate::store::StoreError;
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use serde_json::json;
use std::fmt;

/// The kind of entity an error is about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityKind {
    Account,
    Transaction,
    Transfer,
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            EntityKind::Account => "account",
            EntityKind::Transaction => "transaction",
            EntityKind::Transfer => "transfer",
        };
        f.write_str(name)
    }
}

/// Application-wide error type.
///
/// Every variant carries a human-readable message and the kind of entity the
/// failing operation deals in. Validation variants are returned before any
/// write happens; `Persistence` means the unit of work was aborted.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// Referenced account or requested record set does not exist.
    ///
    /// Returns HTTP 404 Not Found.
    #[error("{message}")]
    NotFound { entity: EntityKind, message: String },

    /// Amount is zero, negative, or would overflow a balance.
    ///
    /// Returns HTTP 400 Bad Request.
    #[error("{message}")]
    InvalidAmount { entity: EntityKind, message: String },

    /// Operation is not allowed, e.g. transferring to the same account.
    ///
    /// Returns HTTP 400 Bad Request.
    #[error("{message}")]
    InvalidOperation { entity: EntityKind, message: String },

    /// Debit would leave the account negative.
    ///
    /// Returns HTTP 422 Unprocessable Entity.
    #[error("{message}")]
    InsufficientFunds { entity: EntityKind, message: String },

    /// The storage back end failed; nothing from this call was kept.
    ///
    /// Returns HTTP 500 Internal Server Error.
    #[error("{message}")]
    Persistence {
        entity: EntityKind,
        message: String,
        #[source]
        source: StoreError,
    },
}

impl AppError {
    pub fn not_found(entity: EntityKind, message: impl Into<String>) -> Self {
        AppError::NotFound {
            entity,
            message: message.into(),
        }
    }

    pub fn invalid_amount(entity: EntityKind, message: impl Into<String>) -> Self {
        AppError::InvalidAmount {
            entity,
            message: message.into(),
        }
    }

    pub fn invalid_operation(entity: EntityKind, message: impl Into<String>) -> Self {
        AppError::InvalidOperation {
            entity,
            message: message.into(),
        }
    }

    pub fn insufficient_funds(entity: EntityKind, message: impl Into<String>) -> Self {
        AppError::InsufficientFunds {
            entity,
            message: message.into(),
        }
    }

    /// Wrap a storage failure with the operation's fallback message.
    pub fn persistence(entity: EntityKind, message: impl Into<String>, source: StoreError) -> Self {
        AppError::Persistence {
            entity,
            message: message.into(),
            source,
        }
    }

    pub fn entity(&self) -> EntityKind {
        match self {
            AppError::NotFound { entity, .. }
            | AppError::InvalidAmount { entity, .. }
            | AppError::InvalidOperation { entity, .. }
            | AppError::InsufficientFunds { entity, .. }
            | AppError::Persistence { entity, .. } => *entity,
        }
    }

    /// Stable machine-readable code used in error responses.
    pub fn code(&self) -> &'static str {
        match self {
            AppError::NotFound { .. } => "not_found",
            AppError::InvalidAmount { .. } => "invalid_amount",
            AppError::InvalidOperation { .. } => "invalid_operation",
            AppError::InsufficientFunds { .. } => "insufficient_funds",
            AppError::Persistence { .. } => "persistence_failure",
        }
    }
}

/// Convert AppError into an HTTP response.
///
/// # Response Format
///
/// All errors return JSON in this format:
/// ```json
/// {
///   "error": {
///     "code": "error_type",
///     "entity": "transfer",
///     "message": "Human-readable error message"
///   }
/// }
/// ```
///
/// # Status Code Mapping
///
/// - `NotFound` → 404 Not Found
/// - `InvalidAmount` / `InvalidOperation` → 400 Bad Request
/// - `InsufficientFunds` → 422 Unprocessable Entity
/// - `Persistence` → 500 Internal Server Error (storage details stay in the logs)
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match self {
            AppError::NotFound { .. } => StatusCode::NOT_FOUND,
            AppError::InvalidAmount { .. } | AppError::InvalidOperation { .. } => {
                StatusCode::BAD_REQUEST
            }
            AppError::InsufficientFunds { .. } => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::Persistence { ref source, .. } => {
                tracing::error!(error = %source, "storage failure");
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };

        let body = Json(json!({
            "error": {
                "code": self.code(),
                "entity": self.entity(),
                "message": self.to_string()
            }
        }));

        (status, body).into_response()
    }
}
