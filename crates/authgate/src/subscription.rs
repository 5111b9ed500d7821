// Subscription evaluation and plan gating.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use authgate_core::{Plan, Subscription, SubscriptionStatus, User};

/// What the evaluator derived from a user's subscription records.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubscriptionSummary {
    /// True only when the selected subscription's period end is strictly in
    /// the future.
    pub has_valid_subscription: bool,
    /// The most recent `active`-status subscription, kept even when its
    /// period has lapsed so callers can show "expired on ..." instead of
    /// "never subscribed".
    pub active_subscription: Option<Subscription>,
}

/// Evaluate `user`'s subscriptions against `now`.
///
/// Only records with `active` status are considered. Among those, the one
/// with the latest `current_period_end` wins; equal timestamps break the tie
/// by id so the selection is deterministic regardless of input order.
pub fn evaluate_subscription(user: &User, now: DateTime<Utc>) -> SubscriptionSummary {
    let selected = user
        .subscriptions
        .iter()
        .filter(|sub| sub.status == SubscriptionStatus::Active)
        .max_by(|a, b| {
            a.current_period_end
                .cmp(&b.current_period_end)
                .then_with(|| a.id.cmp(&b.id))
        });

    SubscriptionSummary {
        has_valid_subscription: selected
            .map(|sub| sub.current_period_end > now)
            .unwrap_or(false),
        active_subscription: selected.cloned(),
    }
}

/// Plan gating: does `user_plan` meet `required`?
///
/// Tiers are totally ordered, `Free < Pro < Enterprise`; a higher tier
/// always satisfies a lower requirement.
pub fn plan_satisfies(user_plan: Plan, required: Plan) -> bool {
    user_plan >= required
}
