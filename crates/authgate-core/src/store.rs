// Store traits — the external reads the engine composes.
//
// Both collaborators are read-only from the engine's perspective. Callers
// own retry and timeout policy for the underlying reads; the engine just
// maps failures to a denial.

use async_trait::async_trait;

use crate::error::StoreError;
use crate::models::{Identity, User};

/// Result type for store operations.
pub type StoreResult<T> = std::result::Result<T, StoreError>;

/// Resolves an opaque session token into an identity.
///
/// Token issuance, OAuth flows, and refresh are the provider's business;
/// this boundary only answers "who is this, if anyone."
#[async_trait]
pub trait SessionResolver: Send + Sync {
    /// Returns the identity behind `token`, or `None` when there is no
    /// session (missing, expired, or unrecognized token).
    async fn resolve(&self, token: Option<&str>) -> StoreResult<Option<Identity>>;
}

/// Read access to the persisted user records.
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Look up a user by email (case-insensitive; stores persist lowercase).
    async fn find_by_email(&self, email: &str) -> StoreResult<Option<User>>;

    /// Look up a user by id.
    async fn find_by_id(&self, id: &str) -> StoreResult<Option<User>>;

    /// Total number of registered users, read at evaluation time.
    ///
    /// This count backs the first-user bootstrap rule and must never be
    /// cached. The count query is not transactional: two signups completing
    /// concurrently can both observe a count of 1 and both bootstrap as
    /// administrators. Stores that can claim the first slot atomically may
    /// pin the value they return here accordingly.
    async fn count_users(&self) -> StoreResult<u64>;
}
