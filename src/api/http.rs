use async_trait::async_trait;
use reqwest::Client;
use tracing::debug;

use crate::api::ScanApi;
use crate::config::Config;
use crate::error::{DashboardError, DashboardResult};
use crate::models::{Preset, PresetList, ScanRequest, ScanResponse};

/// `ScanApi` over HTTP. Uses the transport's default timeout.
#[derive(Clone)]
pub struct HttpScanApi {
    client: Client,
    presets_url: String,
    scan_url: String,
}

impl HttpScanApi {
    pub fn new(cfg: &Config) -> Self {
        Self {
            client: Client::new(),
            presets_url: cfg.presets_url(),
            scan_url: cfg.scan_url(),
        }
    }
}

#[async_trait]
impl ScanApi for HttpScanApi {
    async fn fetch_presets(&self) -> DashboardResult<Vec<Preset>> {
        let resp = self.client.get(&self.presets_url).send().await?;

        let status = resp.status();
        if !status.is_success() {
            return Err(DashboardError::Transport(format!(
                "presets endpoint returned {}",
                status
            )));
        }

        let body = resp.bytes().await?;
        let list: PresetList = serde_json::from_slice(&body)?;
        debug!("Loaded {} presets", list.presets.len());
        Ok(list.presets)
    }

    async fn scan(&self, request: &ScanRequest) -> DashboardResult<ScanResponse> {
        // reqwest's .json() sets content-type: application/json
        let resp = self
            .client
            .post(&self.scan_url)
            .json(request)
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            return Err(DashboardError::ScanRequest {
                status: status.as_u16(),
            });
        }

        let body = resp.bytes().await?;
        Ok(serde_json::from_slice(&body)?)
    }
}
