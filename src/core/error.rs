//! Typed error handling for invoice operations
//!
//! [`InvoiceError`] separates the three failure families callers care about:
//!
//! - client input errors (bad identifier, unparsable body, invalid fields)
//! - not-found errors (no active invoice with that id)
//! - store errors (the database operation itself failed)
//!
//! The HTTP exposure turns each variant into a status code and a single-key
//! `{"error": ...}` body. The gRPC exposure flattens them into one generic
//! status carrying the descriptive text.

use super::entity::EntityId;
use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use std::fmt;
use thiserror::Error;

/// Store operation that failed, used to pick the public error message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreOperation {
    List,
    Get,
    Create,
    Update,
    Delete,
}

impl fmt::Display for StoreOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let verb = match self {
            StoreOperation::List => "list",
            StoreOperation::Get => "get",
            StoreOperation::Create => "create",
            StoreOperation::Update => "update",
            StoreOperation::Delete => "delete",
        };
        f.write_str(verb)
    }
}

/// The error type for every invoice operation
#[derive(Debug, Error)]
pub enum InvoiceError {
    /// The identifier is not a positive integer
    #[error("invalid invoice id '{0}'")]
    InvalidId(String),

    /// The request body could not be decoded
    #[error("cannot parse request body: {0}")]
    InvalidBody(String),

    /// One or more fields violate the invoice constraints
    #[error("invalid invoice: {0}")]
    Validation(String),

    /// No active invoice has this id
    #[error("invoice with id '{id}' not found")]
    NotFound { id: EntityId },

    /// The underlying store failed
    #[error("failed to {operation} invoice: {message}")]
    Storage {
        operation: StoreOperation,
        message: String,
    },
}

impl InvoiceError {
    /// Wrap a store failure.
    pub fn storage(operation: StoreOperation, err: impl fmt::Display) -> Self {
        InvoiceError::Storage {
            operation,
            message: err.to_string(),
        }
    }

    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            InvoiceError::InvalidId(_) => StatusCode::BAD_REQUEST,
            InvoiceError::InvalidBody(_) => StatusCode::BAD_REQUEST,
            InvoiceError::Validation(_) => StatusCode::BAD_REQUEST,
            InvoiceError::NotFound { .. } => StatusCode::NOT_FOUND,
            InvoiceError::Storage { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Message exposed to HTTP clients.
    ///
    /// Store details stay server side; only the operation is named.
    pub fn public_message(&self) -> String {
        match self {
            InvoiceError::InvalidId(_) => "Invalid ID parameter".to_string(),
            InvoiceError::InvalidBody(_) => "Cannot parse JSON".to_string(),
            InvoiceError::Validation(detail) => format!("Invalid Invoice: {}", detail),
            InvoiceError::NotFound { .. } => "Invoice not found".to_string(),
            InvoiceError::Storage { operation, .. } => match operation {
                StoreOperation::List => "Could not fetch Invoices".to_string(),
                StoreOperation::Get => "Could not fetch Invoice".to_string(),
                StoreOperation::Create => "Could not create Invoice".to_string(),
                StoreOperation::Update => "Could not update Invoice".to_string(),
                StoreOperation::Delete => "Could not delete Invoice".to_string(),
            },
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, InvoiceError::NotFound { .. })
    }
}

impl IntoResponse for InvoiceError {
    fn into_response(self) -> Response {
        match &self {
            InvoiceError::Storage { .. } => tracing::error!(error = %self, "invoice store failure"),
            InvoiceError::NotFound { .. } => tracing::debug!(error = %self, "invoice not found"),
            _ => tracing::debug!(error = %self, "rejected invoice request"),
        }

        let status = self.status_code();
        let body = Json(json!({ "error": self.public_message() }));
        (status, body).into_response()
    }
}
