#![allow(dead_code)]

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::Mutex;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;

use scan_dashboard::api::ScanApi;
use scan_dashboard::error::{DashboardError, DashboardResult};
use scan_dashboard::models::{Preset, RowResult, ScanRequest, ScanResponse, Status};
use scan_dashboard::session::{RenderTarget, TableRow};

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

/// The four presets the scanning service ships with, except swing uses 200 bars / 30 pairs.
pub fn standard_presets() -> Vec<Preset> {
    vec![
        preset("scalping", "5m", 240, 60, 300),
        preset("intraday", "15m", 240, 60, 600),
        preset("swing", "4h", 200, 30, 1800),
        preset("position", "1d", 365, 30, 3600),
    ]
}

pub fn row(symbol: &str, regime: &str, atr_pct: f64, trend_strength: f64, action: &str) -> RowResult {
    RowResult {
        symbol: symbol.to_string(),
        regime: regime.into(),
        atr_pct,
        trend_strength,
        action: action.to_string(),
        note: None,
    }
}

pub fn response(timeframe: &str, refresh_seconds: u64, rows: Vec<RowResult>) -> ScanResponse {
    ScanResponse {
        exchange: "binance".to_string(),
        timeframe: timeframe.to_string(),
        bars: 200,
        refresh_seconds: Some(refresh_seconds),
        rows,
        briefing: None,
    }
}

/// Scripted backend. Scan results are handed out in push order.
pub struct MockApi {
    presets: Option<Vec<Preset>>,
    responses: Mutex<VecDeque<DashboardResult<ScanResponse>>>,
    requests: Mutex<Vec<ScanRequest>>,
}

impl MockApi {
    pub fn new(presets: Vec<Preset>) -> Self {
        Self {
            presets: Some(presets),
            responses: Mutex::new(VecDeque::new()),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn unreachable() -> Self {
        Self {
            presets: None,
            ..Self::new(Vec::new())
        }
    }

    pub fn push(&self, r: DashboardResult<ScanResponse>) {
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
    pub renders: usize,
    pub briefing: Option<String>,
    pub statuses: Vec<Status>,
    pub meta: String,
    pub toggle_label: String,
}

impl RecordingTarget {
    pub fn last_status(&self) -> Option<&Status> {
        self.statuses.last()
    }
}

impl RenderTarget for RecordingTarget {
    fn set_rows(&mut self, rows: Vec<TableRow>) {
        self.rows = rows;
        self.renders += 1;
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
}

/// Serves exactly one HTTP request with the given status and JSON body,
/// returning the base URL and a handle yielding the raw request text.
pub async fn one_shot_server(
    status: u16,
    body: &'static str,
) -> (String, tokio::task::JoinHandle<String>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let handle = tokio::spawn(async move {
        let (mut sock, _) = listener.accept().await.unwrap();
        let mut buf = Vec::new();
        let mut chunk = [0u8; 4096];

        // read headers, then Content-Length bytes of body
        loop {
            let n = sock.read(&mut chunk).await.unwrap();
            if n == 0 {
                break;
            }
            buf.extend_from_slice(&chunk[..n]);
            let text = String::from_utf8_lossy(&buf).to_string();
            if let Some(end) = text.find("\r\n\r\n") {
                let content_length = text[..end]
                    .lines()
                    .find_map(|l| {
                        let (k, v) = l.split_once(':')?;
                        k.eq_ignore_ascii_case("content-length")
                            .then(|| v.trim().parse::<usize>().ok())
                            .flatten()
                    })
                    .unwrap_or(0);
                if buf.len() >= end + 4 + content_length {
                    break;
                }
            }
        }

        let reply = format!(
            "HTTP/1.1 {} X\r\ncontent-type: application/json\r\ncontent-length: {}\r\nconnection: close\r\n\r\n{}",
            status,
            body.len(),
            body
        );
        sock.write_all(reply.as_bytes()).await.unwrap();
        sock.shutdown().await.ok();
        String::from_utf8_lossy(&buf).to_string()
    });

    (format!("http://{}", addr), handle)
}
