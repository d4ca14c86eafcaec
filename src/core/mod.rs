//! Core business logic - framework-agnostic collaborator, order, product and report operations.
//!
//! Every function takes the request's `DatabaseConnection` and returns
//! [`crate::errors::Result`]; mapping onto HTTP lives in [`crate::api`].

/// Collaborator management and credential lookup
pub mod collaborator;
/// Order placement, views and status transitions
pub mod order;
/// Product catalogue
pub mod product;
/// Aggregated pending-value reports
pub mod report;
