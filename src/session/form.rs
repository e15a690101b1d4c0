use crate::config::{parse_flag, Config};
use crate::error::{DashboardError, DashboardResult};
use crate::models::{Preset, ScanRequest};

pub const DEFAULT_EXCHANGE: &str = "binance";
pub const DEFAULT_MAX_PAIRS: u32 = 50;
pub const DEFAULT_LIMIT: u32 = 20;
pub const DEFAULT_MIN_QV: f64 = 0.0;
pub const DEFAULT_RISK_USDT: f64 = 1.0;
pub const DEFAULT_FEE_BUFFER_PCT: f64 = 0.10;

/// Snapshot of the editable fields, kept as the raw text a user typed.
#[derive(Debug, Clone, PartialEq)]
pub struct FormState {
    pub exchange: String,
    pub preset: String,
    pub timeframe: String,
    pub bars: String,
    pub max_pairs: String,
    pub limit: String,
    pub min_qv: String,
    pub risk_usdt: String,
    pub fee_buffer_pct: String,

    pub quality: bool,
    pub setups: bool,
    pub brief: bool,
    pub exclude_stables: bool,
}

impl Default for FormState {
    fn default() -> Self {
        Self {
            exchange: DEFAULT_EXCHANGE.to_string(),
            preset: String::new(),
            timeframe: String::new(),
            bars: String::new(),
            max_pairs: String::new(),
            limit: DEFAULT_LIMIT.to_string(),
            min_qv: "5000000".to_string(),
            risk_usdt: "1".to_string(),
            fee_buffer_pct: "0.10".to_string(),
            quality: true,
            setups: true,
            brief: true,
            exclude_stables: true,
        }
    }
}

impl FormState {
    pub fn from_config(cfg: &Config) -> Self {
        Self {
            exchange: cfg.default_exchange.clone(),
            preset: cfg.default_preset.clone().unwrap_or_default(),
            ..Self::default()
        }
    }

    /// Overwrites the preset-controlled fields. Other fields keep user edits.
    pub fn apply_preset(&mut self, preset: &Preset) {
        self.preset = preset.key.clone();
        self.timeframe = preset.timeframe.clone();
        self.bars = preset.bars.to_string();
        self.max_pairs = preset.max_pairs.to_string();
    }

    /// Sets one field by name, as the terminal `set` command does.
    pub fn set_field(&mut self, name: &str, value: &str) -> DashboardResult<()> {
        let text = value.to_string();
        match name {
            "exchange" => self.exchange = text,
            "timeframe" => self.timeframe = text,
            "bars" => self.bars = text,
            "max_pairs" => self.max_pairs = text,
            "limit" => self.limit = text,
            "min_qv" => self.min_qv = text,
            "risk_usdt" => self.risk_usdt = text,
            "fee_buffer_pct" => self.fee_buffer_pct = text,
            "quality" => self.quality = parse_bool(name, value)?,
            "setups" => self.setups = parse_bool(name, value)?,
            "brief" => self.brief = parse_bool(name, value)?,
            "exclude_stables" => self.exclude_stables = parse_bool(name, value)?,
            _ => return Err(DashboardError::UnknownField(name.to_string())),
        }
        Ok(())
    }
}

fn parse_bool(name: &str, value: &str) -> DashboardResult<bool> {
    match value.trim().to_lowercase().as_str() {
        "0" | "false" | "off" | "no" => Ok(false),
        v if parse_flag(v) => Ok(true),
        _ => Err(DashboardError::InvalidCommand(format!(
            "{} expects on/off, got '{}'",
            name, value
        ))),
    }
}

/// Turns the current form into a request. Pure; defaults per field below.
pub fn build_payload(form: &FormState) -> ScanRequest {
    let exchange = form.exchange.trim();
    let timeframe = form.timeframe.trim();

    ScanRequest {
        exchange: if exchange.is_empty() {
            DEFAULT_EXCHANGE.to_string()
        } else {
            exchange.to_string()
        },
        preset: form.preset.clone(),
        timeframe: if timeframe.is_empty() {
            None
        } else {
            Some(timeframe.to_string())
        },
        bars: positive_int(&form.bars),
        max_pairs: positive_int(&form.max_pairs).unwrap_or(DEFAULT_MAX_PAIRS),
        limit: positive_int(&form.limit).unwrap_or(DEFAULT_LIMIT),
        quality: form.quality,
        min_qv: leading_float(&form.min_qv)
            .filter(|v| v.is_finite())
            .unwrap_or(DEFAULT_MIN_QV),
        setups: form.setups,
        brief: form.brief,
        exclude_stables: form.exclude_stables,
        risk_usdt: positive_float(&form.risk_usdt).unwrap_or(DEFAULT_RISK_USDT),
        fee_buffer_pct: positive_float(&form.fee_buffer_pct).unwrap_or(DEFAULT_FEE_BUFFER_PCT),
    }
}

fn positive_int(s: &str) -> Option<u32> {
    leading_int(s)
        .filter(|&v| v > 0)
        .and_then(|v| u32::try_from(v).ok())
}

fn positive_float(s: &str) -> Option<f64> {
    leading_float(s).filter(|v| v.is_finite() && *v > 0.0)
}

/// Number of ASCII digits starting at `start`.
fn scan_digits(bytes: &[u8], start: usize) -> usize {
    bytes[start..].iter().take_while(|b| b.is_ascii_digit()).count()
}

/// Integer from the longest numeric prefix, so `"30 pairs"` reads as 30.
fn leading_int(s: &str) -> Option<i64> {
    let t = s.trim();
    let bytes = t.as_bytes();
    let sign = usize::from(matches!(bytes.first(), Some(b'+') | Some(b'-')));
    let digits = scan_digits(bytes, sign);
    if digits == 0 {
        return None;
    }
    t[..sign + digits].parse().ok()
}

/// Decimal from the longest numeric prefix (`1.5usdt` reads as 1.5).
fn leading_float(s: &str) -> Option<f64> {
    let t = s.trim();
    let bytes = t.as_bytes();
    let mut end = usize::from(matches!(bytes.first(), Some(b'+') | Some(b'-')));

    let int_digits = scan_digits(bytes, end);
    end += int_digits;

    let mut frac_digits = 0;
    if bytes.get(end) == Some(&b'.') {
        frac_digits = scan_digits(bytes, end + 1);
        if frac_digits > 0 || int_digits > 0 {
            end += 1 + frac_digits;
        }
    }
    if int_digits == 0 && frac_digits == 0 {
        return None;
    }

    if matches!(bytes.get(end), Some(b'e') | Some(b'E')) {
        let mut exp = end + 1;
        if matches!(bytes.get(exp), Some(b'+') | Some(b'-')) {
            exp += 1;
        }
        let exp_digits = scan_digits(bytes, exp);
        if exp_digits > 0 {
            end = exp + exp_digits;
        }
    }

    t[..end].parse().ok()
}
