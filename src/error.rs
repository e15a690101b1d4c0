use thiserror::Error;

#[derive(Debug, Error)]
pub enum DashboardError {
    #[error("transport error: {0}")]
    Transport(String),

    #[error("scan request failed: HTTP {status}")]
    ScanRequest { status: u16 },

    #[error("unknown preset: {0}")]
    UnknownPreset(String),

    #[error("init failed: {0}")]
    Init(Box<DashboardError>),

    #[error("unknown field: {0}")]
    UnknownField(String),

    #[error("invalid command: {0}")]
    InvalidCommand(String),
}

impl DashboardError {
    /// Detail shown on the metadata line after a failed scan.
    pub fn request_detail(&self) -> String {
        match self {
            DashboardError::ScanRequest { status } => format!("Request failed: {}", status),
            DashboardError::Transport(msg) => format!("Request failed: {}", msg),
            other => format!("Request failed: {}", other),
        }
    }
}

impl From<reqwest::Error> for DashboardError {
    fn from(e: reqwest::Error) -> Self {
        DashboardError::Transport(e.to_string())
    }
}

impl From<serde_json::Error> for DashboardError {
    fn from(e: serde_json::Error) -> Self {
        DashboardError::Transport(format!("malformed JSON: {}", e))
    }
}

pub type DashboardResult<T> = Result<T, DashboardError>;
