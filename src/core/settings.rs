//! Persisted key-value settings storage.
//!
//! Settings are stored field by field under their camelCase names, so a partial
//! write only overwrites the keys it carries. Reads supply defaults for every key.

use async_trait::async_trait;
use serde_json::{Map, Value};
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{info, warn};

use super::models::{Settings, SettingsPatch};
use crate::errors::ClarifyError;

/// Storage keys, one per settings field.
pub const SETTINGS_KEYS: [&str; 4] = [
    "enableContextMenu",
    "defaultAction",
    "tone",
    "summaryLength",
];

#[async_trait]
pub trait SettingsStore: Send + Sync {
    /// Read the given keys; keys with no stored value resolve to the supplied default.
    async fn get(&self, defaults: Map<String, Value>) -> Result<Map<String, Value>, ClarifyError>;

    /// Overwrite the given keys. Keys not present are left untouched.
    async fn set(&self, values: Map<String, Value>) -> Result<(), ClarifyError>;
}

/// Process-wide store shared by every surface holding a clone.
#[derive(Debug, Clone, Default)]
pub struct MemorySettingsStore {
    items: Arc<RwLock<Map<String, Value>>>,
}

impl MemorySettingsStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Raw stored entries, without defaults applied.
    pub async fn snapshot(&self) -> Map<String, Value> {
        self.items.read().await.clone()
    }
}

#[async_trait]
impl SettingsStore for MemorySettingsStore {
    async fn get(&self, defaults: Map<String, Value>) -> Result<Map<String, Value>, ClarifyError> {
        let items = self.items.read().await;
        Ok(defaults
            .into_iter()
            .map(|(key, default)| {
                let value = items.get(&key).cloned().unwrap_or(default);
                (key, value)
            })
            .collect())
    }

    async fn set(&self, values: Map<String, Value>) -> Result<(), ClarifyError> {
        let mut items = self.items.write().await;
        for (key, value) in values {
            items.insert(key, value);
        }
        Ok(())
    }
}

fn to_map<T: serde::Serialize>(value: &T) -> Result<Map<String, Value>, ClarifyError> {
    match serde_json::to_value(value)? {
        Value::Object(map) => Ok(map),
        other => Err(ClarifyError::StorageError(format!(
            "expected an object, got {other}"
        ))),
    }
}

/// Resolve the current settings, falling back to defaults for anything missing.
///
/// A stored value that no longer deserializes is replaced by its default rather
/// than failing the read.
///
/// # Errors
///
/// Returns an error only if the underlying store fails.
pub async fn load_settings(store: &dyn SettingsStore) -> Result<Settings, ClarifyError> {
    let defaults = Settings::default();
    let default_map = to_map(&defaults)?;
    let merged = store.get(default_map.clone()).await?;

    match serde_json::from_value::<Settings>(Value::Object(merged.clone())) {
        Ok(settings) => Ok(settings),
        Err(e) => {
            warn!("Stored settings are invalid ({}), repairing field by field", e);
            let mut repaired = default_map;
            for (key, value) in merged {
                let mut candidate = repaired.clone();
                candidate.insert(key.clone(), value.clone());
                if serde_json::from_value::<Settings>(Value::Object(candidate)).is_ok() {
                    repaired.insert(key, value);
                }
            }
            Ok(serde_json::from_value(Value::Object(repaired)).unwrap_or(defaults))
        }
    }
}

/// Persist the fields carried by `patch`.
///
/// # Errors
///
/// Returns an error if the store rejects the write.
pub async fn save_settings(
    store: &dyn SettingsStore,
    patch: &SettingsPatch,
) -> Result<(), ClarifyError> {
    let values = to_map(patch)?;
    info!(keys = ?values.keys().collect::<Vec<_>>(), "Saving settings");
    store.set(values).await
}
