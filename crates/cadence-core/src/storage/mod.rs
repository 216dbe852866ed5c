//! Persistence for tracker state.
//!
//! The core treats storage as a plain key-value interface: entity
//! collections, the guest window, and the notification guard are stored as
//! opaque serialized blobs under well-known keys. [`Database`] is the
//! SQLite-backed implementation; [`MemoryStore`] backs tests.

mod config;
pub mod database;

pub use config::{AccessConfig, Config, LimitsConfig, NotificationsConfig};
pub use database::Database;

use std::collections::HashMap;
use std::path::PathBuf;

use crate::error::StorageError;

/// KV key for the serialized habit collection.
pub const KEY_HABITS: &str = "habits";
/// KV key for the serialized task collection.
pub const KEY_TASKS: &str = "tasks";
/// KV key for the serialized planned-transaction collection.
pub const KEY_TRANSACTIONS: &str = "transactions";
/// KV key for the guest access window.
pub const KEY_GUEST_WINDOW: &str = "guest_window";
/// KV key for the overdue-summary notification guard.
pub const KEY_NOTIFICATION_GUARD: &str = "notification_guard";
/// KV key for the cached subscription-status snapshot.
pub const KEY_SUBSCRIPTION: &str = "subscription";

/// Minimal key-value persistence interface.
///
/// The engine decodes the blobs itself; implementations only move strings.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;
    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError>;
    fn remove(&mut self, key: &str) -> Result<(), StorageError>;
}

/// In-memory store for tests and ephemeral sessions.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), StorageError> {
        self.entries.remove(key);
        Ok(())
    }
}

/// Returns `~/.config/cadence[-dev]/` based on CADENCE_ENV.
///
/// Set CADENCE_ENV=dev to use the development data directory.
///
/// # Errors
/// Returns an error if the config directory cannot be created.
pub fn data_dir() -> Result<PathBuf, std::io::Error> {
    let base_dir = dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".config");

    let env = std::env::var("CADENCE_ENV").unwrap_or_else(|_| "production".to_string());

    let dir = if env == "dev" {
        base_dir.join("cadence-dev")
    } else {
        base_dir.join("cadence")
    };

    std::fs::create_dir_all(&dir)?;
    Ok(dir)
}
