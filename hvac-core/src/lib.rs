// hvac-core/src/lib.rs

pub mod extract;
pub mod poll;
pub mod reading;

// Re-export key types for easier use by the CLI crate
pub use extract::{truncate_chars, Extractor, HUMIDITY_LABEL, TEMP_LABEL};
pub use poll::{CycleOutcome, PageSource, Poller, Reporter};
pub use reading::leading_number;
