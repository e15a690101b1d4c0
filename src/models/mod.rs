pub mod preset;
pub mod regime;
pub mod scan;
pub mod status;

pub use preset::{Preset, PresetList};
pub use regime::Regime;
pub use scan::{RowResult, ScanRequest, ScanResponse};
pub use status::Status;
