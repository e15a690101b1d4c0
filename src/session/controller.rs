use std::sync::Arc;
use std::time::Instant;

use tokio::sync::mpsc::{unbounded_channel, UnboundedReceiver, UnboundedSender};
use tracing::{debug, error, info, warn};

use crate::api::ScanApi;
use crate::config::FALLBACK_PRESET;
use crate::error::{DashboardError, DashboardResult};
use crate::models::{Preset, ScanRequest, ScanResponse, Status};
use crate::session::form::{build_payload, FormState};
use crate::session::presets::PresetStore;
use crate::session::render::{meta_line, render, RenderTarget};
use crate::session::scheduler::AutoRefreshScheduler;

/// Refresh interval before any preset or response has supplied one.
pub const DEFAULT_REFRESH_SECONDS: u64 = 1800;

#[derive(Debug, Clone, PartialEq)]
pub struct SessionState {
    pub active_preset: Option<Preset>,
    /// Last value seen from the active preset or a successful response.
    pub refresh_seconds: u64,
    pub status: Status,
}

impl Default for SessionState {
    fn default() -> Self {
        Self {
            active_preset: None,
            refresh_seconds: DEFAULT_REFRESH_SECONDS,
            status: Status::Idle,
        }
    }
}

/// Result of one network exchange, posted back onto the session queue.
#[derive(Debug)]
pub struct CycleOutcome {
    pub started: Instant,
    pub result: DashboardResult<ScanResponse>,
}

#[derive(Debug)]
pub enum SessionEvent {
    Run,
    /// Timer firing, tagged with the scheduler generation that sent it.
    Tick(u64),
    ToggleAuto,
    SelectPreset(String),
    SetField { name: String, value: String },
    ListPresets,
    Completed(CycleOutcome),
    Quit,
}

pub struct SessionController<R: RenderTarget> {
    api: Arc<dyn ScanApi>,
    target: R,
    presets: PresetStore,
    form: FormState,
    state: SessionState,
    scheduler: AutoRefreshScheduler,
    events: UnboundedSender<SessionEvent>,
}

impl<R: RenderTarget> SessionController<R> {
    /// The receiver is the session's single event queue; feed it to `run`.
    pub fn new(
        api: Arc<dyn ScanApi>,
        target: R,
        form: FormState,
    ) -> (Self, UnboundedReceiver<SessionEvent>) {
        let (events, rx) = unbounded_channel();
        let controller = Self {
            api,
            target,
            presets: PresetStore::default(),
            form,
            state: SessionState::default(),
            scheduler: AutoRefreshScheduler::new(events.clone()),
            events,
        };
        (controller, rx)
    }

    pub fn events(&self) -> UnboundedSender<SessionEvent> {
        self.events.clone()
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn form(&self) -> &FormState {
        &self.form
    }

    pub fn form_mut(&mut self) -> &mut FormState {
        &mut self.form
    }

    pub fn presets(&self) -> &PresetStore {
        &self.presets
    }

    pub fn target(&self) -> &R {
        &self.target
    }

    pub fn is_auto(&self) -> bool {
        self.scheduler.is_running()
    }

    pub fn scheduler_interval(&self) -> Option<u64> {
        self.scheduler.interval_secs()
    }

    fn set_status(&mut self, status: Status) {
        self.state.status = status;
        self.target.set_status(&self.state.status);
    }

    fn sync_status(&mut self) {
        self.target.set_status(&self.state.status);
    }

    /// Load presets, apply the selected (or `swing`) preset, run one scan.
    /// Auto refresh is left off.
    pub async fn init(&mut self) -> DashboardResult<()> {
        let loaded = PresetStore::load(self.api.as_ref()).await;
        match loaded {
            Ok(store) => self.presets = store,
            Err(e) => return Err(self.init_failed(e)),
        }

        let key = match self.form.preset.trim() {
            "" => FALLBACK_PRESET.to_string(),
            k => k.to_string(),
        };
        if let Err(e) = self.apply_preset(&key) {
            return Err(self.init_failed(e));
        }

        self.target.set_toggle_label("Start Auto");
        self.scan_cycle().await;
        Ok(())
    }

    fn init_failed(&mut self, e: DashboardError) -> DashboardError {
        error!("Init failed: {}", e);
        self.set_status(Status::InitError(e.to_string()));
        DashboardError::Init(Box::new(e))
    }

    fn apply_preset(&mut self, key: &str) -> DashboardResult<()> {
        let preset = self.presets.get(key)?.clone();
        self.form.apply_preset(&preset);
        self.state.refresh_seconds = preset.refresh_seconds;
        info!(
            "Preset {}: tf={} bars={} max_pairs={} refresh={}s",
            preset.key, preset.timeframe, preset.bars, preset.max_pairs, preset.refresh_seconds
        );
        self.state.active_preset = Some(preset);
        Ok(())
    }

    /// A running timer is restarted so the new interval applies at once.
    pub fn select_preset(&mut self, key: &str) {
        if let Err(e) = self.apply_preset(key) {
            warn!("{}", e);
            self.set_status(Status::Error(e.to_string()));
            return;
        }
        if self.scheduler.is_running() {
            self.scheduler.restart(&mut self.state);
            self.sync_status();
        }
    }

    pub fn start_auto(&mut self) {
        if self.scheduler.start(&mut self.state) {
            self.sync_status();
            self.target.set_toggle_label("Stop Auto");
        }
    }

    pub fn stop_auto(&mut self) {
        if self.scheduler.stop(&mut self.state) {
            self.sync_status();
            self.target.set_toggle_label("Start Auto");
        }
    }

    pub fn toggle_auto(&mut self) {
        if self.scheduler.is_running() {
            self.stop_auto();
        } else {
            self.start_auto();
        }
    }

    /// First half of a cycle: status and payload from the live form.
    pub fn begin_cycle(&mut self) -> ScanRequest {
        self.set_status(Status::Scanning);
        let request = build_payload(&self.form);
        debug!("Scan payload: {:?}", request);
        request
    }

    /// Second half of a cycle. A failure leaves the table and interval as they were.
    pub fn finish_cycle(&mut self, outcome: CycleOutcome) {
        let response = match outcome.result {
            Ok(r) => r,
            Err(e) => {
                warn!("Scan failed: {}", e);
                self.target.set_meta(&e.request_detail());
                self.set_status(Status::Error(e.to_string()));
                return;
            }
        };

        if let Some(secs) = response.refresh_seconds.filter(|&s| s > 0) {
            self.state.refresh_seconds = secs;
        }

        let elapsed_ms = outcome.started.elapsed().as_millis();
        let meta = meta_line(&response, self.state.refresh_seconds, elapsed_ms);
        self.target.set_meta(&meta);
        render(&mut self.target, &response, self.form.brief);

        info!("Scan updated: {} rows in {}ms", response.rows.len(), elapsed_ms);
        self.set_status(Status::Updated);
    }

    /// One full cycle, awaited in place.
    pub async fn scan_cycle(&mut self) {
        let started = Instant::now();
        let request = self.begin_cycle();
        let result = self.api.scan(&request).await;
        self.finish_cycle(CycleOutcome { started, result });
    }

    /// Starts a cycle whose response arrives later as `SessionEvent::Completed`.
    /// Overlapping cycles are not fenced; the last response to land wins.
    pub fn spawn_cycle(&mut self) {
        let started = Instant::now();
        let request = self.begin_cycle();
        let api = Arc::clone(&self.api);
        let events = self.events.clone();

        tokio::spawn(async move {
            let result = api.scan(&request).await;
            let _ = events.send(SessionEvent::Completed(CycleOutcome { started, result }));
        });
    }

    /// Applies one event. Returns false once the session should end.
    pub fn handle(&mut self, event: SessionEvent) -> bool {
        match event {
            SessionEvent::Run => self.spawn_cycle(),
            SessionEvent::Tick(generation) => {
                if self.scheduler.is_live(generation) {
                    self.spawn_cycle();
                } else {
                    debug!("Dropping stale tick from timer #{}", generation);
                }
            }
            SessionEvent::ToggleAuto => self.toggle_auto(),
            SessionEvent::SelectPreset(key) => self.select_preset(&key),
            SessionEvent::SetField { name, value } => {
                if let Err(e) = self.form.set_field(&name, &value) {
                    warn!("{}", e);
                    self.set_status(Status::Error(e.to_string()));
                }
            }
            SessionEvent::ListPresets => {
                let presets: Vec<Preset> = self.presets.iter().cloned().collect();
                self.target.show_presets(&presets);
            }
            SessionEvent::Completed(outcome) => self.finish_cycle(outcome),
            SessionEvent::Quit => return false,
        }
        true
    }

    /// Drains the event queue until `Quit`. The timer is stopped on the way out.
    pub async fn run(&mut self, rx: &mut UnboundedReceiver<SessionEvent>) {
        while let Some(event) = rx.recv().await {
            if !self.handle(event) {
                break;
            }
        }
        self.stop_auto();
        info!("Session closed");
    }
}
