pub mod commands;

pub use commands::{is_help, parse_command, HELP};

use chrono::Local;
use std::io::Write;
use tabled::settings::Style;
use tabled::{Table, Tabled};
use tracing::warn;

use crate::models::{Preset, Status};
use crate::session::{BadgeClass, RenderTarget, TableRow};

#[derive(Tabled)]
struct DisplayRow<'a> {
    #[tabled(rename = "")]
    marker: &'static str,
    #[tabled(rename = "Symbol")]
    symbol: &'a str,
    #[tabled(rename = "Regime")]
    regime: &'a str,
    #[tabled(rename = "ATR%")]
    atr_pct: &'a str,
    #[tabled(rename = "Trend")]
    trend_strength: &'a str,
    #[tabled(rename = "Action")]
    action: &'a str,
    #[tabled(rename = "Note")]
    note: &'a str,
}

fn marker(class: BadgeClass) -> &'static str {
    match class {
        BadgeClass::Good => "++",
        BadgeClass::Bad => "!!",
        BadgeClass::Warn => "~",
        BadgeClass::Muted => "",
    }
}

/// Prints the dashboard to a line-oriented writer (stdout in the binary).
pub struct TerminalTarget<W: Write + Send> {
    out: W,
}

impl TerminalTarget<std::io::Stdout> {
    pub fn stdout() -> Self {
        Self::new(std::io::stdout())
    }
}

impl<W: Write + Send> TerminalTarget<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn emit(&mut self, text: &str) {
        if let Err(e) = writeln!(self.out, "{}", text).and_then(|_| self.out.flush()) {
            warn!("Terminal write failed: {}", e);
        }
    }
}

impl<W: Write + Send> RenderTarget for TerminalTarget<W> {
    fn set_rows(&mut self, rows: Vec<TableRow>) {
        if rows.is_empty() {
            self.emit("(no rows)");
            return;
        }
        let display: Vec<DisplayRow> = rows
            .iter()
            .map(|r| DisplayRow {
                marker: marker(r.class),
                symbol: &r.symbol,
                regime: &r.regime,
                atr_pct: &r.atr_pct,
                trend_strength: &r.trend_strength,
                action: &r.action,
                note: &r.note,
            })
            .collect();
        let table = Table::new(display).with(Style::rounded()).to_string();
        self.emit(&table);
    }

    fn set_briefing(&mut self, briefing: Option<&str>) {
        if let Some(text) = briefing {
            self.emit(&format!("── Briefing ──\n{}", text));
        }
    }

    fn set_status(&mut self, status: &Status) {
        let stamp = Local::now().format("%H:%M:%S");
        self.emit(&format!("[{}] {}", stamp, status));
    }

    fn set_meta(&mut self, meta: &str) {
        self.emit(meta);
    }

    fn set_toggle_label(&mut self, label: &str) {
        self.emit(&format!("(auto: type `auto` to {})", label.to_lowercase()));
    }

    fn show_presets(&mut self, presets: &[Preset]) {
        for p in presets {
            self.emit(&format!(
                "  {:<10} {:<24} tf={} bars={} max_pairs={} refresh={}s",
                p.key,
                p.display_name(),
                p.timeframe,
                p.bars,
                p.max_pairs,
                p.refresh_seconds
            ));
        }
    }
}
