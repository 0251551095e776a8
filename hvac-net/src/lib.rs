// hvac-net/src/lib.rs
pub mod http;
pub mod validation;

pub use http::Fetcher;
pub use hvac_common::{
    error::{HvacError, Result},
    model::{FetchResult, ResponseBody},
    Config,
};
pub use validation::validate_url;
