// hvac-common/src/model/body.rs
use std::borrow::Cow;

use crate::error::{HvacError, Result};

/// What one fetch produces: the whole page, or the reason the exchange failed.
pub type FetchResult = Result<ResponseBody>;

/// The raw bytes of one fetched status page.
///
/// Built up chunk by chunk while the response streams in and owned by the
/// poll cycle that fetched it. `len()` is always the total of every chunk
/// appended so far.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResponseBody {
    bytes: Vec<u8>,
}

impl ResponseBody {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts with room for `capacity` bytes, e.g. from a `Content-Length` hint.
    pub fn with_capacity(capacity: usize) -> Result<Self> {
        let mut bytes = Vec::new();
        bytes
            .try_reserve(capacity)
            .map_err(|_| HvacError::Allocation(capacity))?;
        Ok(Self { bytes })
    }

    /// Appends a chunk, failing instead of aborting if the buffer cannot grow.
    pub fn append(&mut self, chunk: &[u8]) -> Result<()> {
        self.bytes
            .try_reserve(chunk.len())
            .map_err(|_| HvacError::Allocation(chunk.len()))?;
        self.bytes.extend_from_slice(chunk);
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Text view of the body. Invalid UTF-8 sequences become U+FFFD.
    pub fn text(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(&self.bytes)
    }
}

impl From<Vec<u8>> for ResponseBody {
    fn from(bytes: Vec<u8>) -> Self {
        Self { bytes }
    }
}

impl From<&str> for ResponseBody {
    fn from(text: &str) -> Self {
        Self {
            bytes: text.as_bytes().to_vec(),
        }
    }
}
