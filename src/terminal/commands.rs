use crate::error::{DashboardError, DashboardResult};
use crate::session::SessionEvent;

pub const HELP: &str = "\
commands:
  run                     scan now
  auto                    start/stop auto refresh
  preset <key>            apply a preset
  presets                 list presets
  set <field> <value>     edit a field (exchange, timeframe, bars, max_pairs, limit,
                          min_qv, risk_usdt, fee_buffer_pct, quality, setups, brief,
                          exclude_stables)
  help                    this text
  quit                    exit";

pub fn is_help(line: &str) -> bool {
    matches!(line.trim(), "help" | "?")
}

/// One input line to a session event. Blank lines yield `None`.
pub fn parse_command(line: &str) -> DashboardResult<Option<SessionEvent>> {
    let mut parts = line.split_whitespace();
    let Some(cmd) = parts.next() else {
        return Ok(None);
    };

    let event = match cmd.to_lowercase().as_str() {
        "run" | "r" => SessionEvent::Run,
        "auto" | "toggle" => SessionEvent::ToggleAuto,
        "presets" => SessionEvent::ListPresets,
        "quit" | "exit" | "q" => SessionEvent::Quit,
        "preset" => match parts.next() {
            Some(key) => SessionEvent::SelectPreset(key.to_string()),
            None => return Err(DashboardError::InvalidCommand("preset <key>".into())),
        },
        "set" => {
            let name = parts
                .next()
                .ok_or_else(|| DashboardError::InvalidCommand("set <field> <value>".into()))?;
            // value may be empty, e.g. clearing the timeframe override
            let value = parts.collect::<Vec<_>>().join(" ");
            SessionEvent::SetField {
                name: name.to_string(),
                value,
            }
        }
        other => return Err(DashboardError::InvalidCommand(other.to_string())),
    };
    Ok(Some(event))
}
