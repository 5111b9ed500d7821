// GateConfig — startup configuration for the access-decision engine.
//
// Loaded once at process start and passed by dependency injection; there is
// no lazily-populated module-level singleton, so tests can run with a
// different configuration per case.

use serde::{Deserialize, Serialize};

/// Externally configured list of administrator emails.
///
/// Parsed from a comma-separated string, trimmed and lowercased. An EMPTY
/// allowlist is semantically meaningful: it means every authenticated
/// production-mode user counts as an administrator.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AdminAllowlist(Vec<String>);

impl AdminAllowlist {
    /// Parse a comma-separated email list, e.g. `"a@x.com, B@y.com"`.
    pub fn parse(raw: &str) -> Self {
        let emails = raw
            .split(',')
            .map(|email| email.trim().to_lowercase())
            .filter(|email| !email.is_empty())
            .collect();
        Self(emails)
    }

    pub fn from_emails<I, S>(emails: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self(
            emails
                .into_iter()
                .map(|email| email.into().to_lowercase())
                .collect(),
        )
    }

    /// Case-insensitive membership test.
    pub fn contains(&self, email: &str) -> bool {
        let email = email.to_lowercase();
        self.0.iter().any(|entry| *entry == email)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }
}

/// Feature switches for the admin surfaces.
///
/// An explicit struct with named booleans rather than a loosely-typed
/// dictionary. Everything defaults to enabled.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AdminFeatures {
    pub analytics: bool,
    pub user_management: bool,
    pub content_management: bool,
    pub payments: bool,
    pub subscriptions: bool,
    pub ai_usage: bool,
    pub logs: bool,
    pub settings: bool,
}

impl Default for AdminFeatures {
    fn default() -> Self {
        Self {
            analytics: true,
            user_management: true,
            content_management: true,
            payments: true,
            subscriptions: true,
            ai_usage: true,
            logs: true,
            settings: true,
        }
    }
}

/// Top-level engine configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GateConfig {
    /// Whether the admin surfaces are enabled at all.
    ///
    /// @default true
    pub admin_enabled: bool,

    /// Administrator email allowlist (see `AdminAllowlist`).
    pub admin_allowlist: AdminAllowlist,

    /// Admin feature switches.
    pub features: AdminFeatures,
}

impl Default for GateConfig {
    fn default() -> Self {
        Self {
            admin_enabled: true,
            admin_allowlist: AdminAllowlist::default(),
            features: AdminFeatures::default(),
        }
    }
}

impl GateConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load configuration from environment variables.
    ///
    /// - `ADMIN_ENABLED`: `"false"` disables the admin surfaces (default on).
    /// - `ADMIN_EMAILS`: comma-separated allowlist (default empty).
    pub fn from_env() -> Self {
        let admin_enabled = std::env::var("ADMIN_ENABLED")
            .map(|v| v != "false")
            .unwrap_or(true);
        let admin_allowlist = std::env::var("ADMIN_EMAILS")
            .map(|v| AdminAllowlist::parse(&v))
            .unwrap_or_default();
        Self {
            admin_enabled,
            admin_allowlist,
            features: AdminFeatures::default(),
        }
    }

    pub fn allowlist(mut self, allowlist: AdminAllowlist) -> Self {
        self.admin_allowlist = allowlist;
        self
    }

    pub fn features(mut self, features: AdminFeatures) -> Self {
        self.features = features;
        self
    }
}
