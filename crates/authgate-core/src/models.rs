// Data model shared by the engine and its route-guard adapters.
//
// User and Subscription are read-only snapshots of externally persisted
// records; the engine never writes them back. Verdict is the engine's sole
// output type.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Identity resolved from an opaque session token.
///
/// Ephemeral — one per authenticated request, owned by the external auth
/// provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    pub id: String,
    pub email: String,
}

impl Identity {
    pub fn new(id: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            email: email.into().to_lowercase(),
        }
    }
}

/// Persisted user role.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    #[default]
    User,
    Admin,
}

/// Billing plan tiers, ordered `Free < Pro < Enterprise`.
///
/// The derived `Ord` follows declaration order and is what plan gating
/// compares against.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Plan {
    #[default]
    Free,
    Pro,
    Enterprise,
}

/// Account status of a persisted user.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserStatus {
    #[default]
    Active,
    Inactive,
}

/// Subscription statuses.
///
/// Only `Active` entries are eligible for validity evaluation; every other
/// status is ignored by the subscription evaluator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SubscriptionStatus {
    Active,
    Trial,
    PastDue,
    Canceled,
    Expired,
}

/// Subscription record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Subscription {
    pub id: String,
    pub plan: Plan,
    pub status: SubscriptionStatus,
    pub current_period_end: DateTime<Utc>,
}

/// Persisted user record.
///
/// Mutated only by external collaborators (signup, role assignment, billing
/// events); read-only here. Subscriptions arrive in arbitrary order — the
/// evaluator does its own selection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default)]
    pub role: Role,
    #[serde(default)]
    pub plan: Plan,
    #[serde(default)]
    pub status: UserStatus,
    #[serde(default)]
    pub subscriptions: Vec<Subscription>,
}

impl User {
    pub fn new(id: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            email: email.into().to_lowercase(),
            name: None,
            role: Role::default(),
            plan: Plan::default(),
            status: UserStatus::default(),
            subscriptions: Vec::new(),
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_role(mut self, role: Role) -> Self {
        self.role = role;
        self
    }

    pub fn with_plan(mut self, plan: Plan) -> Self {
        self.plan = plan;
        self
    }

    pub fn with_subscription(mut self, subscription: Subscription) -> Self {
        self.subscriptions.push(subscription);
        self
    }
}

/// A user enriched with the facts the engine derived for this evaluation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DerivedUser {
    #[serde(flatten)]
    pub user: User,
    pub is_first_user: bool,
    pub is_admin: bool,
    pub has_valid_subscription: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub active_subscription: Option<Subscription>,
}

/// Closed set of denial reasons.
///
/// `StoreFailure` distinguishes "backend unavailable" from "not logged in"
/// so callers can retry instead of forcing a re-login.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DenyReason {
    Unauthorized,
    UserNotFound,
    StoreFailure,
}

impl DenyReason {
    /// The wire code used in HTTP denial bodies.
    pub fn code(&self) -> &'static str {
        match self {
            Self::Unauthorized => "Unauthorized",
            Self::UserNotFound => "UserNotFound",
            Self::StoreFailure => "StoreFailure",
        }
    }
}

impl fmt::Display for DenyReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let msg = match self {
            Self::Unauthorized => "Unauthorized",
            Self::UserNotFound => "User not found",
            Self::StoreFailure => "Store failure",
        };
        write!(f, "{msg}")
    }
}

/// The engine's authorization decision for one evaluation.
///
/// The enum shape makes the core invariant structural: an authorized verdict
/// always carries a `DerivedUser`, a denied verdict never does.
#[derive(Debug, Clone, PartialEq)]
pub enum Verdict {
    Authorized(DerivedUser),
    Denied(DenyReason),
}

impl Verdict {
    pub fn is_authorized(&self) -> bool {
        matches!(self, Self::Authorized(_))
    }

    pub fn user(&self) -> Option<&DerivedUser> {
        match self {
            Self::Authorized(user) => Some(user),
            Self::Denied(_) => None,
        }
    }

    pub fn reason(&self) -> Option<DenyReason> {
        match self {
            Self::Authorized(_) => None,
            Self::Denied(reason) => Some(*reason),
        }
    }
}
