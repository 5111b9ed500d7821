// AccessEngine — the single entry point for authorization decisions.
//
// decide() is a pure pipeline over injected collaborators: mode gate, then
// session resolution, then user lookup, then derivation. Every early exit
// is a Denied verdict; the function itself never returns an error.

use std::sync::Arc;

use chrono::Utc;

use authgate_core::{
    DenyReason, DerivedUser, GateConfig, Mode, Plan, Role, SessionResolver, User, UserStore,
    Verdict,
};

use crate::role::derive_is_admin;
use crate::subscription::evaluate_subscription;

/// Fixed id of the synthetic demo identity.
pub const DEMO_USER_ID: &str = "demo-user";
/// Fixed email of the synthetic demo identity.
pub const DEMO_USER_EMAIL: &str = "demo@example.com";

/// One authorization evaluation's input.
#[derive(Debug, Clone, Default)]
pub struct AccessRequest {
    /// Opaque session token, if the caller presented one.
    pub session_token: Option<String>,
}

impl AccessRequest {
    pub fn new(session_token: Option<String>) -> Self {
        Self { session_token }
    }

    /// A request carrying a token.
    pub fn bearer(token: impl Into<String>) -> Self {
        Self {
            session_token: Some(token.into()),
        }
    }

    /// A request with no credentials at all.
    pub fn anonymous() -> Self {
        Self {
            session_token: None,
        }
    }
}

/// The decision engine.
///
/// Holds configuration loaded once at startup plus the two read-only
/// collaborators. Cheap to clone; share one per process.
#[derive(Clone)]
pub struct AccessEngine {
    config: GateConfig,
    sessions: Arc<dyn SessionResolver>,
    users: Arc<dyn UserStore>,
}

impl AccessEngine {
    pub fn new(
        config: GateConfig,
        sessions: Arc<dyn SessionResolver>,
        users: Arc<dyn UserStore>,
    ) -> Self {
        Self {
            config,
            sessions,
            users,
        }
    }

    pub fn config(&self) -> &GateConfig {
        &self.config
    }

    /// Evaluate one request under the given mode.
    ///
    /// Mode is an explicit parameter so the mode read happens exactly once
    /// per evaluation, at the call site; the decision cannot observe a mode
    /// flip halfway through.
    pub async fn decide(&self, request: &AccessRequest, mode: Mode) -> Verdict {
        // Demo mode bypasses every external read.
        if mode.is_demo() {
            tracing::debug!("demo mode: authorizing synthetic demo identity");
            return Verdict::Authorized(Self::demo_user());
        }

        let token = request.session_token.as_deref();
        let identity = match self.sessions.resolve(token).await {
            Ok(Some(identity)) => identity,
            Ok(None) => return Verdict::Denied(DenyReason::Unauthorized),
            Err(err) => {
                tracing::error!(error = %err, "session resolution failed");
                return Verdict::Denied(DenyReason::StoreFailure);
            }
        };

        let user = match self.users.find_by_email(&identity.email).await {
            Ok(Some(user)) => user,
            Ok(None) => {
                tracing::warn!(email = %identity.email, "session valid but no user record");
                return Verdict::Denied(DenyReason::UserNotFound);
            }
            Err(err) => {
                tracing::error!(error = %err, "user lookup failed");
                return Verdict::Denied(DenyReason::StoreFailure);
            }
        };

        let total_user_count = match self.users.count_users().await {
            Ok(count) => count,
            Err(err) => {
                tracing::error!(error = %err, "user count failed");
                return Verdict::Denied(DenyReason::StoreFailure);
            }
        };

        Verdict::Authorized(self.derive(user, total_user_count))
    }

    fn derive(&self, user: User, total_user_count: u64) -> DerivedUser {
        let is_first_user = total_user_count == 1;
        let is_admin = derive_is_admin(&user, total_user_count, &self.config.admin_allowlist);
        let summary = evaluate_subscription(&user, Utc::now());

        DerivedUser {
            user,
            is_first_user,
            is_admin,
            has_valid_subscription: summary.has_valid_subscription,
            active_subscription: summary.active_subscription,
        }
    }

    /// The synthetic identity every demo-mode evaluation authorizes as.
    ///
    /// Fully privileged so demo deployments can exercise admin and paid
    /// surfaces without a backend.
    pub fn demo_user() -> DerivedUser {
        let user = User::new(DEMO_USER_ID, DEMO_USER_EMAIL)
            .with_name("Demo User")
            .with_role(Role::Admin)
            .with_plan(Plan::Pro);
        DerivedUser {
            user,
            is_first_user: false,
            is_admin: true,
            has_valid_subscription: true,
            active_subscription: None,
        }
    }
}

impl std::fmt::Debug for AccessEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AccessEngine")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}
