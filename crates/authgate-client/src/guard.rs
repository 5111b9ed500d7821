// RouteGuard — turns an engine verdict into a UI-level decision.
//
// The guard never evaluates anything itself; it only interprets a verdict
// the engine already produced for this request.

use url::form_urlencoded;

use authgate::plan_satisfies;
use authgate_core::{DenyReason, DerivedUser, Plan, Verdict};

/// What a guarded route should do with the current visitor.
#[derive(Debug, Clone, PartialEq)]
pub enum GuardOutcome {
    /// Render the protected content for this user.
    Render(DerivedUser),
    /// Send the visitor to the login page, preserving where they came from.
    RedirectToLogin { to: String },
    /// Authenticated but not an administrator.
    InsufficientPrivilege,
    /// Authenticated but the user's plan does not meet the route's floor.
    InsufficientPlan { required: Plan },
    /// A backend read failed; show a retry state, not a login prompt.
    ServiceUnavailable,
}

/// Declarative protection for one route.
#[derive(Debug, Clone)]
pub struct RouteGuard {
    admin_only: bool,
    required_plan: Option<Plan>,
    login_path: String,
}

impl Default for RouteGuard {
    fn default() -> Self {
        Self::new()
    }
}

impl RouteGuard {
    /// A guard that only requires authentication.
    pub fn new() -> Self {
        Self {
            admin_only: false,
            required_plan: None,
            login_path: "/login".to_string(),
        }
    }

    /// Require the visitor to be an administrator.
    pub fn admin_only(mut self) -> Self {
        self.admin_only = true;
        self
    }

    /// Require at least `plan`.
    pub fn require_plan(mut self, plan: Plan) -> Self {
        self.required_plan = Some(plan);
        self
    }

    /// Override the login page path (default `/login`).
    pub fn login_path(mut self, path: impl Into<String>) -> Self {
        self.login_path = path.into();
        self
    }

    /// Interpret `verdict` for a visitor currently at `current_path`.
    ///
    /// Checks run in order: authentication, admin requirement, plan floor.
    /// The redirect target carries the current path so login can return the
    /// visitor to where they were.
    pub fn evaluate(&self, verdict: &Verdict, current_path: &str) -> GuardOutcome {
        let user = match verdict {
            Verdict::Authorized(user) => user,
            Verdict::Denied(DenyReason::StoreFailure) => return GuardOutcome::ServiceUnavailable,
            Verdict::Denied(_) => {
                let query: String = form_urlencoded::Serializer::new(String::new())
                    .append_pair("redirect", current_path)
                    .finish();
                return GuardOutcome::RedirectToLogin {
                    to: format!("{}?{}", self.login_path, query),
                };
            }
        };

        if self.admin_only && !user.is_admin {
            return GuardOutcome::InsufficientPrivilege;
        }

        if let Some(required) = self.required_plan {
            if !plan_satisfies(user.user.plan, required) {
                return GuardOutcome::InsufficientPlan { required };
            }
        }

        GuardOutcome::Render(user.clone())
    }
}
