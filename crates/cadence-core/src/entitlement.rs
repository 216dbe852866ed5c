//! Entitlement resolution and per-resource quotas.
//!
//! Combines the guest access window with the remote subscription status
//! into a single access tier plus numeric limits. This is a read-only gate:
//! callers consult [`EntitlementState::check_limit`] before permitting an
//! add-mutation and reject it themselves; nothing here mutates anything.

use serde::{Deserialize, Serialize};

use crate::access::WindowStatus;

/// A quota-limited resource category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Resource {
    Habits,
    Tasks,
    Transactions,
}

/// Resolved access tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Tier {
    Base,
    Elevated,
}

/// Subscription facts supplied by the remote billing backend.
///
/// The core never fetches these itself; a [`SubscriptionProvider`] at the
/// outer layer supplies a snapshot.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubscriptionStatus {
    pub paid_active: bool,
    pub trial_active: bool,
    pub trial_days_left: u32,
}

/// Source of subscription status for the current account.
pub trait SubscriptionProvider {
    fn subscription_status(&self) -> SubscriptionStatus;
}

/// Base-tier caps, one independent value per resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceCaps {
    pub habits: u32,
    pub tasks: u32,
    pub transactions: u32,
}

impl ResourceCaps {
    pub fn cap_for(&self, resource: Resource) -> u32 {
        match resource {
            Resource::Habits => self.habits,
            Resource::Tasks => self.tasks,
            Resource::Transactions => self.transactions,
        }
    }
}

impl Default for ResourceCaps {
    fn default() -> Self {
        Self {
            habits: 3,
            tasks: 15,
            transactions: 30,
        }
    }
}

/// Inputs to entitlement resolution.
#[derive(Debug, Clone, Copy)]
pub struct EntitlementContext {
    pub signed_in: bool,
    pub subscription: SubscriptionStatus,
    pub guest_window: WindowStatus,
}

/// Resolved tier plus quota caps. Derived, never stored; recompute on
/// every query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntitlementState {
    pub tier: Tier,
    caps: ResourceCaps,
}

/// Result of a quota check for a single resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LimitCheck {
    pub current: u32,
    /// `None` means unbounded (elevated tier).
    pub max: Option<u32>,
    pub can_add: bool,
}

/// Resolve the access tier from the current context.
///
/// Policy, first match wins:
/// 1. signed in and (paid or in subscription trial) -> elevated;
/// 2. not signed in and the guest window is active -> elevated;
/// 3. otherwise -> base tier.
///
/// A signed-in account never inherits the guest window; signing in moves
/// ownership of the data away from it.
pub fn resolve_entitlement(ctx: &EntitlementContext, caps: ResourceCaps) -> EntitlementState {
    let elevated = if ctx.signed_in {
        ctx.subscription.paid_active || ctx.subscription.trial_active
    } else {
        ctx.guest_window.is_active
    };

    EntitlementState {
        tier: if elevated { Tier::Elevated } else { Tier::Base },
        caps,
    }
}

impl EntitlementState {
    pub fn has_elevated_access(&self) -> bool {
        self.tier == Tier::Elevated
    }

    /// Quota check for one resource at its current count.
    pub fn check_limit(&self, resource: Resource, current: u32) -> LimitCheck {
        match self.tier {
            Tier::Elevated => LimitCheck {
                current,
                max: None,
                can_add: true,
            },
            Tier::Base => {
                let max = self.caps.cap_for(resource);
                LimitCheck {
                    current,
                    max: Some(max),
                    can_add: current < max,
                }
            }
        }
    }
}
