//! Shared load/save helpers for command modules.
//!
//! Every command follows the same shape: open the database, decode the
//! relevant KV blob, apply a core operation, re-encode, print JSON.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use cadence_core::storage::{KEY_GUEST_WINDOW, KEY_SUBSCRIPTION};
use cadence_core::{
    resolve_entitlement, AccessWindow, Clock, Config, Database, EntitlementContext,
    EntitlementState, SubscriptionProvider, SubscriptionStatus, SystemClock,
};

/// Decode a JSON blob from the KV store, falling back to the default when
/// the key is absent or the blob does not decode.
pub fn load_blob<T: DeserializeOwned + Default>(
    db: &Database,
    key: &str,
) -> Result<T, Box<dyn std::error::Error>> {
    match db.kv_get(key)? {
        Some(raw) => Ok(serde_json::from_str(&raw).unwrap_or_default()),
        None => Ok(T::default()),
    }
}

/// Encode and store a JSON blob.
pub fn save_blob<T: Serialize>(
    db: &Database,
    key: &str,
    value: &T,
) -> Result<(), Box<dyn std::error::Error>> {
    db.kv_set(key, &serde_json::to_string(value)?)?;
    Ok(())
}

/// Locally cached account facts: the sign-in flag plus the last
/// subscription snapshot received from the billing backend.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct AccountSnapshot {
    pub signed_in: bool,
    pub subscription: SubscriptionStatus,
}

impl SubscriptionProvider for AccountSnapshot {
    fn subscription_status(&self) -> SubscriptionStatus {
        self.subscription
    }
}

/// Resolve the current entitlement from stored state and the wall clock.
pub fn current_entitlement(
    db: &Database,
    config: &Config,
) -> Result<EntitlementState, Box<dyn std::error::Error>> {
    let account: AccountSnapshot = load_blob(db, KEY_SUBSCRIPTION)?;
    let window: AccessWindow = db
        .kv_get(KEY_GUEST_WINDOW)?
        .and_then(|raw| serde_json::from_str(&raw).ok())
        .unwrap_or_else(|| AccessWindow::new(config.access.guest_window_ms()));

    let ctx = EntitlementContext {
        signed_in: account.signed_in,
        subscription: account.subscription_status(),
        guest_window: window.status(SystemClock.now()),
    };
    Ok(resolve_entitlement(&ctx, config.limits.caps()))
}
