// End-to-end engine tests against the in-memory adapters.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{Duration, Utc};

use authgate::{
    AccessEngine, AccessRequest, AdminAllowlist, DenyReason, GateConfig, Identity, Mode, Plan,
    Role, Subscription, SubscriptionStatus, User, DEMO_USER_EMAIL, DEMO_USER_ID,
};
use authgate_core::error::StoreError;
use authgate_core::store::StoreResult;
use authgate_core::{SessionResolver, UserStore};
use authgate_memory::{MemorySessionResolver, MemoryUserStore};

fn engine_with(
    config: GateConfig,
    sessions: MemorySessionResolver,
    users: MemoryUserStore,
) -> AccessEngine {
    AccessEngine::new(config, Arc::new(sessions), Arc::new(users))
}

async fn seeded(config: GateConfig, users: Vec<User>) -> (AccessEngine, Vec<String>) {
    let sessions = MemorySessionResolver::new();
    let mut tokens = Vec::new();
    for user in &users {
        tokens.push(
            sessions
                .issue(Identity::new(user.id.clone(), user.email.clone()))
                .await,
        );
    }
    let store = MemoryUserStore::with_users(users);
    (engine_with(config, sessions, store), tokens)
}

fn active_sub(id: &str, days_from_now: i64) -> Subscription {
    Subscription {
        id: id.into(),
        plan: Plan::Pro,
        status: SubscriptionStatus::Active,
        current_period_end: Utc::now() + Duration::days(days_from_now),
    }
}

#[tokio::test]
async fn test_no_session_is_unauthorized() {
    let (engine, _) = seeded(GateConfig::new(), vec![User::new("u1", "a@example.com")]).await;
    let verdict = engine.decide(&AccessRequest::anonymous(), Mode::Production).await;
    assert_eq!(verdict.reason(), Some(DenyReason::Unauthorized));
}

#[tokio::test]
async fn test_unknown_token_is_unauthorized() {
    let (engine, _) = seeded(GateConfig::new(), vec![User::new("u1", "a@example.com")]).await;
    let verdict = engine
        .decide(&AccessRequest::bearer("garbage"), Mode::Production)
        .await;
    assert_eq!(verdict.reason(), Some(DenyReason::Unauthorized));
}

#[tokio::test]
async fn test_first_user_bootstraps_as_admin() {
    let config = GateConfig::new().allowlist(AdminAllowlist::parse("someone-else@example.com"));
    let (engine, tokens) = seeded(config, vec![User::new("u1", "first@example.com")]).await;
    let verdict = engine
        .decide(&AccessRequest::bearer(tokens[0].clone()), Mode::Production)
        .await;
    let user = verdict.user().expect("authorized");
    assert!(user.is_first_user);
    assert!(user.is_admin);
}

#[tokio::test]
async fn test_second_user_with_empty_allowlist_is_admin_but_not_first() {
    let (engine, tokens) = seeded(
        GateConfig::new(),
        vec![
            User::new("u1", "first@example.com"),
            User::new("u2", "second@example.com"),
        ],
    )
    .await;
    let verdict = engine
        .decide(&AccessRequest::bearer(tokens[1].clone()), Mode::Production)
        .await;
    let user = verdict.user().expect("authorized");
    assert!(!user.is_first_user);
    assert!(user.is_admin);
}

#[tokio::test]
async fn test_allowlist_splits_admins_from_members() {
    let config = GateConfig::new().allowlist(AdminAllowlist::parse("listed@example.com"));
    let (engine, tokens) = seeded(
        config,
        vec![
            User::new("u1", "listed@example.com"),
            User::new("u2", "unlisted@example.com"),
        ],
    )
    .await;

    let listed = engine
        .decide(&AccessRequest::bearer(tokens[0].clone()), Mode::Production)
        .await;
    assert!(listed.user().expect("authorized").is_admin);

    let unlisted = engine
        .decide(&AccessRequest::bearer(tokens[1].clone()), Mode::Production)
        .await;
    let unlisted = unlisted.user().expect("authorized");
    assert!(!unlisted.is_admin);
}

#[tokio::test]
async fn test_persisted_admin_role_overrides_allowlist() {
    let config = GateConfig::new().allowlist(AdminAllowlist::parse("other@example.com"));
    let (engine, tokens) = seeded(
        config,
        vec![
            User::new("u1", "boss@example.com").with_role(Role::Admin),
            User::new("u2", "filler@example.com"),
        ],
    )
    .await;
    let verdict = engine
        .decide(&AccessRequest::bearer(tokens[0].clone()), Mode::Production)
        .await;
    assert!(verdict.user().expect("authorized").is_admin);
}

#[tokio::test]
async fn test_valid_subscription_reported() {
    let (engine, tokens) = seeded(
        GateConfig::new(),
        vec![
            User::new("u1", "a@example.com").with_subscription(active_sub("s1", 30)),
            User::new("u2", "b@example.com"),
        ],
    )
    .await;
    let verdict = engine
        .decide(&AccessRequest::bearer(tokens[0].clone()), Mode::Production)
        .await;
    let user = verdict.user().expect("authorized");
    assert!(user.has_valid_subscription);
    assert_eq!(user.active_subscription.as_ref().map(|s| s.id.as_str()), Some("s1"));
}

#[tokio::test]
async fn test_expired_subscription_is_reported_but_invalid() {
    let (engine, tokens) = seeded(
        GateConfig::new(),
        vec![
            User::new("u1", "a@example.com").with_subscription(active_sub("s1", -1)),
            User::new("u2", "b@example.com"),
        ],
    )
    .await;
    let verdict = engine
        .decide(&AccessRequest::bearer(tokens[0].clone()), Mode::Production)
        .await;
    let user = verdict.user().expect("authorized");
    assert!(!user.has_valid_subscription);
    assert!(user.active_subscription.is_some());
}

#[tokio::test]
async fn test_session_without_user_record_is_user_not_found() {
    let sessions = MemorySessionResolver::new();
    let token = sessions
        .issue(Identity::new("ghost", "ghost@example.com"))
        .await;
    let engine = engine_with(GateConfig::new(), sessions, MemoryUserStore::new());
    let verdict = engine
        .decide(&AccessRequest::bearer(token), Mode::Production)
        .await;
    assert_eq!(verdict.reason(), Some(DenyReason::UserNotFound));
}

#[tokio::test]
async fn test_demo_mode_authorizes_without_any_backend() {
    let engine = engine_with(
        GateConfig::new(),
        MemorySessionResolver::new(),
        MemoryUserStore::new(),
    );
    let verdict = engine.decide(&AccessRequest::anonymous(), Mode::Demo).await;
    let user = verdict.user().expect("authorized");
    assert_eq!(user.user.id, DEMO_USER_ID);
    assert_eq!(user.user.email, DEMO_USER_EMAIL);
    assert!(user.is_admin);
    assert!(user.has_valid_subscription);
}

// ── Store-failure paths ──

struct FailingSessions;

#[async_trait]
impl SessionResolver for FailingSessions {
    async fn resolve(&self, _token: Option<&str>) -> StoreResult<Option<Identity>> {
        Err(StoreError::Unavailable("session provider down".into()))
    }
}

struct FailingUsers;

#[async_trait]
impl UserStore for FailingUsers {
    async fn find_by_email(&self, _email: &str) -> StoreResult<Option<User>> {
        Err(StoreError::Query("users table missing".into()))
    }

    async fn find_by_id(&self, _id: &str) -> StoreResult<Option<User>> {
        Err(StoreError::Query("users table missing".into()))
    }

    async fn count_users(&self) -> StoreResult<u64> {
        Err(StoreError::Query("users table missing".into()))
    }
}

#[tokio::test]
async fn test_session_backend_failure_is_store_failure() {
    let engine = AccessEngine::new(
        GateConfig::new(),
        Arc::new(FailingSessions),
        Arc::new(MemoryUserStore::new()),
    );
    let verdict = engine
        .decide(&AccessRequest::bearer("tok"), Mode::Production)
        .await;
    assert_eq!(verdict.reason(), Some(DenyReason::StoreFailure));
}

#[tokio::test]
async fn test_user_store_failure_is_store_failure() {
    let sessions = MemorySessionResolver::new();
    let token = sessions.issue(Identity::new("u1", "a@example.com")).await;
    let engine = AccessEngine::new(GateConfig::new(), Arc::new(sessions), Arc::new(FailingUsers));
    let verdict = engine
        .decide(&AccessRequest::bearer(token), Mode::Production)
        .await;
    assert_eq!(verdict.reason(), Some(DenyReason::StoreFailure));
}

#[tokio::test]
async fn test_demo_mode_never_touches_failing_backends() {
    let engine = AccessEngine::new(
        GateConfig::new(),
        Arc::new(FailingSessions),
        Arc::new(FailingUsers),
    );
    let verdict = engine.decide(&AccessRequest::anonymous(), Mode::Demo).await;
    assert!(verdict.is_authorized());
}
