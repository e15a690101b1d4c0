use std::collections::HashMap;

use tracing::info;

use crate::api::ScanApi;
use crate::error::{DashboardError, DashboardResult};
use crate::models::Preset;

/// Presets fetched once at init and held for the session.
#[derive(Debug, Clone, Default)]
pub struct PresetStore {
    by_key: HashMap<String, Preset>,
    order: Vec<String>,
}

impl PresetStore {
    pub async fn load(api: &dyn ScanApi) -> DashboardResult<Self> {
        let presets = api.fetch_presets().await?;
        let store = Self::from_presets(presets);
        info!("Presets: {}", store.keys().collect::<Vec<_>>().join(", "));
        Ok(store)
    }

    /// Later duplicates of a key replace earlier ones but keep the first position.
    pub fn from_presets(presets: Vec<Preset>) -> Self {
        let mut store = Self::default();
        for p in presets {
            if !store.by_key.contains_key(&p.key) {
                store.order.push(p.key.clone());
            }
            store.by_key.insert(p.key.clone(), p);
        }
        store
    }

    pub fn get(&self, key: &str) -> DashboardResult<&Preset> {
        self.by_key
            .get(key)
            .ok_or_else(|| DashboardError::UnknownPreset(key.to_string()))
    }

    /// Presets in server order.
    pub fn iter(&self) -> impl Iterator<Item = &Preset> {
        self.order.iter().filter_map(|k| self.by_key.get(k))
    }

    /// Preset keys in server order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.order.iter().map(String::as_str)
    }
}
