use std::fmt;

/// What the status line currently says.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Status {
    Idle,
    Scanning,
    Updated,
    Auto(u64),
    Error(String),
    InitError(String),
}

impl Status {
    pub fn is_error(&self) -> bool {
        matches!(self, Status::Error(_) | Status::InitError(_))
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Status::Idle => write!(f, "Idle"),
            Status::Scanning => write!(f, "Scanning…"),
            Status::Updated => write!(f, "Updated"),
            Status::Auto(secs) => write!(f, "Auto ({}s)", secs),
            Status::Error(detail) => write!(f, "Error: {}", detail),
            Status::InitError(detail) => write!(f, "Init error: {}", detail),
        }
    }
}
