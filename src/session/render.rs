use std::fmt;

use crate::models::{Preset, Regime, RowResult, ScanResponse, Status};

/// Styling tier for a result row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BadgeClass {
    Good,
    Bad,
    Warn,
    Muted,
}

impl BadgeClass {
    pub fn as_str(&self) -> &'static str {
        match self {
            BadgeClass::Good => "good",
            BadgeClass::Bad => "bad",
            BadgeClass::Warn => "warn",
            BadgeClass::Muted => "muted",
        }
    }
}

impl fmt::Display for BadgeClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// First match wins: an `A+` action beats any regime.
pub fn badge_class(action: &str, regime: &Regime) -> BadgeClass {
    if action.starts_with("A+") {
        BadgeClass::Good
    } else if *regime == Regime::Chaos {
        BadgeClass::Bad
    } else if *regime == Regime::Range {
        BadgeClass::Warn
    } else {
        BadgeClass::Muted
    }
}

/// One display-ready table row.
#[derive(Debug, Clone, PartialEq)]
pub struct TableRow {
    pub class: BadgeClass,
    pub symbol: String,
    pub regime: String,
    pub atr_pct: String,
    pub trend_strength: String,
    pub action: String,
    pub note: String,
}

impl From<&RowResult> for TableRow {
    fn from(r: &RowResult) -> Self {
        Self {
            class: badge_class(&r.action, &r.regime),
            symbol: r.symbol.clone(),
            regime: r.regime.to_string(),
            atr_pct: format!("{:.2}", r.atr_pct),
            trend_strength: format!("{:.3}", r.trend_strength),
            action: r.action.clone(),
            note: r.note.clone().unwrap_or_default(),
        }
    }
}

/// Whatever surface shows the dashboard. Each setter replaces prior content.
pub trait RenderTarget: Send {
    fn set_rows(&mut self, rows: Vec<TableRow>);
    /// `None` hides and clears the briefing panel.
    fn set_briefing(&mut self, briefing: Option<&str>);
    fn set_status(&mut self, status: &Status);
    fn set_meta(&mut self, meta: &str);
    fn set_toggle_label(&mut self, _label: &str) {}
    fn show_presets(&mut self, _presets: &[Preset]) {}
}

pub fn meta_line(response: &ScanResponse, refresh_seconds: u64, elapsed_ms: u128) -> String {
    format!(
        "Exchange: {} • TF: {} • Bars: {} • Refresh: {}s • {}ms",
        response.exchange, response.timeframe, response.bars, refresh_seconds, elapsed_ms
    )
}

/// Replaces the table with the response rows (server order) and decides the
/// briefing panel from scratch.
pub fn render(target: &mut dyn RenderTarget, response: &ScanResponse, briefing_enabled: bool) {
    let rows = response.rows.iter().map(TableRow::from).collect();
    target.set_rows(rows);

    let briefing = response
        .briefing
        .as_deref()
        .filter(|text| briefing_enabled && !text.is_empty());
    target.set_briefing(briefing);
}
