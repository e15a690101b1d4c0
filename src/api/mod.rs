pub mod http;

pub use http::HttpScanApi;

use async_trait::async_trait;

use crate::error::DashboardResult;
use crate::models::{Preset, ScanRequest, ScanResponse};

/// The two backend endpoints the dashboard talks to.
#[async_trait]
pub trait ScanApi: Send + Sync {
    /// `GET /api/presets`, in server order.
    async fn fetch_presets(&self) -> DashboardResult<Vec<Preset>>;

    /// `POST /api/scan`. One exchange, no retry.
    async fn scan(&self, request: &ScanRequest) -> DashboardResult<ScanResponse>;
}
