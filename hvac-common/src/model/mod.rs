// hvac-common/src/model/mod.rs
pub mod body;
pub mod extraction;

pub use body::{FetchResult, ResponseBody};
pub use extraction::{Extraction, FieldMatch};
