// hvac-net/src/validation.rs
use hvac_common::error::{HvacError, Result};
use url::Url;

/// Validates a device URL: it must parse, use `http` or `https`, and name a host.
pub fn validate_url(url_str: &str) -> Result<()> {
    let url = Url::parse(url_str).map_err(|e| {
        HvacError::ValidationError(format!("Failed to parse URL '{url_str}': {e}"))
    })?;
    match url.scheme() {
        "http" | "https" => {}
        other => {
            return Err(HvacError::ValidationError(format!(
                "Invalid URL scheme for '{url_str}': Must be http or https, but got '{other}'"
            )))
        }
    }
    if !url.host_str().is_some_and(|host| !host.is_empty()) {
        return Err(HvacError::ValidationError(format!(
            "URL '{url_str}' does not name a host"
        )));
    }
    tracing::trace!("URL validated: {}", url);
    Ok(())
}
