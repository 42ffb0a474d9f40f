//! Utility functions and helpers.

pub mod http;

use url::Url;

use crate::error::{AppError, Result};

/// Parse a base URL so that relative endpoint paths are appended to it
/// rather than replacing its last segment.
pub fn base_url(raw: &str) -> Result<Url> {
    let mut url = Url::parse(raw.trim())?;
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    Ok(url)
}

/// Resolve an endpoint path (`annonces/12`) against a base URL.
pub fn endpoint(base: &Url, path: &str) -> Result<Url> {
    Ok(base.join(path.trim_start_matches('/'))?)
}

/// Percent-encode a single path segment.
pub fn encode_segment(segment: &str) -> Result<String> {
    let mut scratch = Url::parse("http://localhost/")?;
    scratch
        .path_segments_mut()
        .map_err(|_| AppError::config("URL cannot carry path segments"))?
        .clear()
        .push(segment);
    Ok(scratch.path().trim_start_matches('/').to_string())
}
