use serde::{Deserialize, Serialize};

pub const DEFAULT_API_URL: &str = "http://127.0.0.1:8000";
pub const FALLBACK_PRESET: &str = "swing";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    // Backend
    pub api_url: String,

    // Initial form state
    pub default_preset: Option<String>,
    pub default_exchange: String,

    // Behaviour
    pub auto_start: bool,

    // Logging
    pub log_level: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            default_preset: None,
            default_exchange: "binance".to_string(),
            auto_start: false,
            log_level: "info".to_string(),
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        let env = |key: &str, default: &str| -> String {
            std::env::var(key).unwrap_or_else(|_| default.to_string())
        };

        let defaults = Config::default();
        let preset = env("DEFAULT_PRESET", "").trim().to_string();

        Config {
            api_url: env("SCAN_API_URL", DEFAULT_API_URL)
                .trim()
                .trim_end_matches('/')
                .to_string(),
            default_preset: if preset.is_empty() { None } else { Some(preset) },
            default_exchange: env("DEFAULT_EXCHANGE", &defaults.default_exchange),
            auto_start: parse_flag(&env("AUTO_START", "false")),
            log_level: env("LOG_LEVEL", &defaults.log_level),
        }
    }

    pub fn presets_url(&self) -> String {
        format!("{}/api/presets", self.api_url)
    }

    pub fn scan_url(&self) -> String {
        format!("{}/api/scan", self.api_url)
    }
}

pub fn parse_flag(s: &str) -> bool {
    matches!(
        s.trim().to_lowercase().as_str(),
        "1" | "true" | "on" | "yes"
    )
}
