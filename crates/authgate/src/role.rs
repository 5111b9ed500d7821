// Role derivation.
//
// Admin status is the union of four independent grants. Order does not
// matter; any one of them is sufficient.

use authgate_core::{AdminAllowlist, Role, User};

/// Derive whether `user` is an administrator.
///
/// Grants, any of which suffices:
/// - the persisted role is already `admin`
/// - first-user bootstrap: `total_user_count == 1`
/// - the user's email is on the allowlist
/// - the allowlist is empty, which opens admin to every authenticated user
///
/// `total_user_count` must be read at evaluation time, never cached. Two
/// signups racing past the count query can both bootstrap as admin; stores
/// that need a hard guarantee have to claim the first slot atomically.
pub fn derive_is_admin(user: &User, total_user_count: u64, allowlist: &AdminAllowlist) -> bool {
    if user.role == Role::Admin {
        return true;
    }
    if total_user_count == 1 {
        return true;
    }
    allowlist.is_empty() || allowlist.contains(&user.email)
}
