//! Unified error type for the Infobar backend.
//!
//! Business logic in [`crate::core`] returns these variants; the HTTP layer maps
//! them onto status codes in [`crate::api::error`].

use sea_orm::DbErr;
use thiserror::Error;

/// All errors that can occur while serving collaborators, products and orders.
#[derive(Debug, Error)]
pub enum Error {
    /// No collaborator with the given id
    #[error("Collaborator not found: {id}")]
    CollaboratorNotFound {
        /// Requested collaborator id
        id: i32,
    },

    /// No order with the given id (or its product is gone)
    #[error("Order not found: {id}")]
    OrderNotFound {
        /// Requested order id
        id: i32,
    },

    /// No product matching an id or barcode
    #[error("Product not found: {key}")]
    ProductNotFound {
        /// Id or barcode that was looked up
        key: String,
    },

    /// Finalizing found nothing to flip for this collaborator
    #[error("No pending orders found for collaborator {collaborator_id}")]
    NoPendingOrders {
        /// Collaborator whose orders were finalized
        collaborator_id: i32,
    },

    /// Bulk operation over collaborators found none
    #[error("No collaborators found")]
    NoCollaborators,

    /// Date range query matched no orders
    #[error("No orders found in the requested period for collaborator {collaborator_id}")]
    NoOrdersInPeriod {
        /// Collaborator the period was queried for
        collaborator_id: i32,
    },

    /// Credential/password pair did not match any collaborator
    #[error("Invalid credentials")]
    InvalidCredentials,

    /// Ids must be strictly positive
    #[error("Invalid id: {id}")]
    InvalidId {
        /// Offending id
        id: i32,
    },

    /// Path id and body id of a full replace differ
    #[error("Id mismatch: path id {path_id} does not match body id {body_id}")]
    IdMismatch {
        /// Id taken from the URL
        path_id: i32,
        /// Id taken from the request body
        body_id: i32,
    },

    /// Input failed a basic sanity check
    #[error("Validation error: {message}")]
    Validation {
        /// Human readable reason
        message: String,
    },

    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Database error: {0}")]
    Database(#[from] DbErr),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Whether this error is caused by the client rather than the server.
    #[must_use]
    pub const fn is_client_error(&self) -> bool {
        !matches!(self, Self::Config { .. } | Self::Database(_) | Self::Io(_))
    }
}

/// Convenience `Result` type
pub type Result<T> = std::result::Result<T, Error>;
