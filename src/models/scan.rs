use serde::{Deserialize, Serialize};

use crate::models::Regime;

/// Body of `POST /api/scan`. Built fresh for every cycle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScanRequest {
    pub exchange: String,
    pub preset: String,
    /// `None` lets the server fall back to the preset's timeframe.
    pub timeframe: Option<String>,
    pub bars: Option<u32>,
    pub max_pairs: u32,
    pub limit: u32,
    pub quality: bool,
    pub min_qv: f64,
    pub setups: bool,
    pub brief: bool,
    pub exclude_stables: bool,
    pub risk_usdt: f64,
    pub fee_buffer_pct: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RowResult {
    pub symbol: String,
    pub regime: Regime,
    pub atr_pct: f64,
    pub trend_strength: f64,
    pub action: String,
    #[serde(default)]
    pub note: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScanResponse {
    pub exchange: String,
    pub timeframe: String,
    pub bars: u32,
    /// Absent, null and zero all mean "keep the current interval".
    #[serde(default)]
    pub refresh_seconds: Option<u64>,
    #[serde(default)]
    pub rows: Vec<RowResult>,
    #[serde(default)]
    pub briefing: Option<String>,
}
