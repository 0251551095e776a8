use std::sync::Arc;

use thiserror::Error;

#[derive(Error, Debug, Clone)]
pub enum HvacError {
    #[error("I/O Error: {0}")]
    Io(#[from] Arc<std::io::Error>),

    #[error("HTTP Request Error: {0}")]
    Http(#[from] Arc<reqwest::Error>),

    #[error("Request timed out: {0}")]
    Timeout(String),

    #[error("Could not allocate {0} more bytes for the response body")]
    Allocation(usize),

    #[error("Configuration Error: {0}")]
    Config(String),

    #[error("Validation Error: {0}")]
    ValidationError(String),

    #[error("Transport initialization failed: {0}")]
    Startup(String),
}

impl From<std::io::Error> for HvacError {
    fn from(err: std::io::Error) -> Self {
        HvacError::Io(Arc::new(err))
    }
}

impl From<reqwest::Error> for HvacError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            HvacError::Timeout(err.to_string())
        } else {
            HvacError::Http(Arc::new(err))
        }
    }
}

pub type Result<T> = std::result::Result<T, HvacError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn io_errors_convert_and_clone() {
        let err: HvacError = std::io::Error::other("disk gone").into();
        let cloned = err.clone();
        assert!(matches!(cloned, HvacError::Io(_)));
        assert_eq!(err.to_string(), "I/O Error: disk gone");
    }
}
