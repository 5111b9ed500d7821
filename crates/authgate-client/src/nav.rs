// Admin navigation derived from the feature switches.

use serde::{Deserialize, Serialize};

use authgate_core::GateConfig;

/// Sections of the admin surface, one per feature switch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum AdminSection {
    Dashboard,
    Analytics,
    UserManagement,
    ContentManagement,
    Payments,
    Subscriptions,
    AiUsage,
    Logs,
    Settings,
}

impl AdminSection {
    /// Display label for navigation.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Dashboard => "Dashboard",
            Self::Analytics => "Analytics",
            Self::UserManagement => "Users",
            Self::ContentManagement => "Content",
            Self::Payments => "Payments",
            Self::Subscriptions => "Subscriptions",
            Self::AiUsage => "AI Usage",
            Self::Logs => "Logs",
            Self::Settings => "Settings",
        }
    }

    /// Path under the admin root.
    pub fn path(&self) -> &'static str {
        match self {
            Self::Dashboard => "/admin",
            Self::Analytics => "/admin/analytics",
            Self::UserManagement => "/admin/users",
            Self::ContentManagement => "/admin/content",
            Self::Payments => "/admin/payments",
            Self::Subscriptions => "/admin/subscriptions",
            Self::AiUsage => "/admin/ai-usage",
            Self::Logs => "/admin/logs",
            Self::Settings => "/admin/settings",
        }
    }
}

/// The admin sections enabled by `config`, in navigation order.
///
/// Returns an empty list when the admin surfaces are disabled entirely.
/// Dashboard is always present when they are enabled.
pub fn enabled_sections(config: &GateConfig) -> Vec<AdminSection> {
    if !config.admin_enabled {
        return Vec::new();
    }

    let features = &config.features;
    let mut sections = vec![AdminSection::Dashboard];

    if features.analytics {
        sections.push(AdminSection::Analytics);
    }
    if features.user_management {
        sections.push(AdminSection::UserManagement);
    }
    if features.content_management {
        sections.push(AdminSection::ContentManagement);
    }
    if features.payments {
        sections.push(AdminSection::Payments);
    }
    if features.subscriptions {
        sections.push(AdminSection::Subscriptions);
    }
    if features.ai_usage {
        sections.push(AdminSection::AiUsage);
    }
    if features.logs {
        sections.push(AdminSection::Logs);
    }
    if features.settings {
        sections.push(AdminSection::Settings);
    }

    sections
}
