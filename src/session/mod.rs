pub mod controller;
pub mod form;
pub mod presets;
pub mod render;
pub mod scheduler;

pub use controller::{CycleOutcome, SessionController, SessionEvent, SessionState};
pub use form::{build_payload, FormState};
pub use presets::PresetStore;
pub use render::{badge_class, meta_line, render, BadgeClass, RenderTarget, TableRow};
pub use scheduler::AutoRefreshScheduler;
