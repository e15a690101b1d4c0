use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::Mutex;

use crate::api::ScanApi;
use crate::error::{DashboardError, DashboardResult};
use crate::models::{Preset, RowResult, ScanRequest, ScanResponse, Status};
use crate::session::{RenderTarget, TableRow};

pub fn preset(key: &str, tf: &str, bars: u32, max_pairs: u32, refresh: u64) -> Preset {
    Preset {
        key: key.to_string(),
        label: None,
        timeframe: tf.to_string(),
        bars,
        max_pairs,
        refresh_seconds: refresh,
    }
}

pub fn row(
    symbol: &str,
    regime: &str,
    atr_pct: f64,
    trend_strength: f64,
    action: &str,
    note: Option<&str>,
) -> RowResult {
    RowResult {
        symbol: symbol.to_string(),
        regime: regime.into(),
        atr_pct,
        trend_strength,
        action: action.to_string(),
        note: note.map(str::to_string),
    }
}

/// A `binance` / `4h` / 200-bar response with the given rows.
pub fn response(rows: Vec<RowResult>) -> ScanResponse {
    ScanResponse {
        exchange: "binance".to_string(),
        timeframe: "4h".to_string(),
        bars: 200,
        refresh_seconds: Some(1800),
        rows,
        briefing: None,
    }
}

/// Scripted backend: scan results are handed out in push order.
pub struct MockApi {
    presets: Option<Vec<Preset>>,
    responses: Mutex<VecDeque<DashboardResult<ScanResponse>>>,
    requests: Mutex<Vec<ScanRequest>>,
}

impl MockApi {
    pub fn with_presets(presets: Vec<Preset>) -> Self {
        Self {
            presets: Some(presets),
            responses: Mutex::new(VecDeque::new()),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn failing_presets() -> Self {
        Self {
            presets: None,
            ..Self::with_presets(Vec::new())
        }
    }

    pub fn push_response(&self, r: DashboardResult<ScanResponse>) {
        self.responses.lock().unwrap().push_back(r);
    }

    pub fn requests(&self) -> Vec<ScanRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl ScanApi for MockApi {
    async fn fetch_presets(&self) -> DashboardResult<Vec<Preset>> {
        self.presets
            .clone()
            .ok_or_else(|| DashboardError::Transport("connection refused".to_string()))
    }

    async fn scan(&self, request: &ScanRequest) -> DashboardResult<ScanResponse> {
        self.requests.lock().unwrap().push(request.clone());
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(DashboardError::Transport("no scripted response".to_string())))
    }
}

#[derive(Debug, Default)]
pub struct RecordingTarget {
    pub rows: Vec<TableRow>,
    pub briefing: Option<String>,
    pub statuses: Vec<Status>,
    pub meta: String,
    pub toggle_label: String,
    pub listed: Vec<String>,
}

impl RenderTarget for RecordingTarget {
    fn set_rows(&mut self, rows: Vec<TableRow>) {
        self.rows = rows;
    }

    fn set_briefing(&mut self, briefing: Option<&str>) {
        self.briefing = briefing.map(str::to_string);
    }

    fn set_status(&mut self, status: &Status) {
        self.statuses.push(status.clone());
    }

    fn set_meta(&mut self, meta: &str) {
        self.meta = meta.to_string();
    }

    fn set_toggle_label(&mut self, label: &str) {
        self.toggle_label = label.to_string();
    }

    fn show_presets(&mut self, presets: &[Preset]) {
        self.listed = presets.iter().map(|p| p.key.clone()).collect();
    }
}
