// hvac-common/src/lib.rs
pub mod config;
pub mod error;
pub mod model;

// Re-export key types
pub use config::Config;
pub use error::{HvacError, Result};
pub use model::{Extraction, FetchResult, FieldMatch, ResponseBody};
