use serde::{Deserialize, Serialize};

/// Named bundle of default scan parameters, as served by `/api/presets`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Preset {
    pub key: String,
    #[serde(default)]
    pub label: Option<String>,
    pub timeframe: String,
    pub bars: u32,
    pub max_pairs: u32,
    pub refresh_seconds: u64,
}

impl Preset {
    pub fn display_name(&self) -> &str {
        self.label.as_deref().unwrap_or(&self.key)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct PresetList {
    pub presets: Vec<Preset>,
}
