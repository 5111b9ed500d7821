#![doc = include_str!("../README.md")]

pub mod engine;
pub mod role;
pub mod subscription;

pub use engine::{AccessEngine, AccessRequest, DEMO_USER_EMAIL, DEMO_USER_ID};
pub use role::derive_is_admin;
pub use subscription::{evaluate_subscription, plan_satisfies, SubscriptionSummary};

// Re-export the core types callers need alongside the engine.
pub use authgate_core::{
    AdminAllowlist, DenyReason, DerivedUser, GateConfig, Identity, Mode, Plan, Role, Subscription,
    SubscriptionStatus, User, Verdict,
};
