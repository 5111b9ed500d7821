// Error types for the store boundary.

use thiserror::Error;

/// Failure reading an external collaborator (session provider or user store).
///
/// The engine never surfaces these directly: any `StoreError` becomes a
/// `Denied(StoreFailure)` verdict at the decision boundary.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("store unavailable: {0}")]
    Unavailable(String),

    #[error("query failed: {0}")]
    Query(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}
