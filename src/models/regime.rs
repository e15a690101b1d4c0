use serde::{Deserialize, Serialize};
use std::fmt;

/// Server-classified market condition for a symbol. Labels the client does
/// not know about are carried through verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Regime {
    Trend,
    Range,
    Chaos,
    Other(String),
}

impl Regime {
    pub fn as_str(&self) -> &str {
        match self {
            Regime::Trend => "trend",
            Regime::Range => "range",
            Regime::Chaos => "chaos",
            Regime::Other(s) => s,
        }
    }
}

impl From<String> for Regime {
    fn from(s: String) -> Self {
        match s.as_str() {
            "trend" => Regime::Trend,
            "range" => Regime::Range,
            "chaos" => Regime::Chaos,
            _ => Regime::Other(s),
        }
    }
}

impl From<&str> for Regime {
    fn from(s: &str) -> Self {
        Regime::from(s.to_string())
    }
}

impl From<Regime> for String {
    fn from(r: Regime) -> Self {
        r.as_str().to_string()
    }
}

impl fmt::Display for Regime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
