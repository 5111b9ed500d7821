#![doc = include_str!("../README.md")]

pub mod config;
pub mod env;
pub mod error;
pub mod mode;
pub mod models;
pub mod store;

// Re-exports for convenience
pub use config::{AdminAllowlist, AdminFeatures, GateConfig};
pub use error::StoreError;
pub use mode::{Mode, ModeStore, ModeSwitch};
pub use models::{
    DenyReason, DerivedUser, Identity, Plan, Role, Subscription, SubscriptionStatus, User,
    UserStatus, Verdict,
};
pub use store::{SessionResolver, UserStore};
