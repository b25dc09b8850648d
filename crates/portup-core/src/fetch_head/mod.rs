//! HTTP HEAD / metadata probing.
//!
//! Uses the curl crate (libcurl) to fetch response headers only, following redirects,
//! and captures what change detection and filename resolution need.

mod parse;

pub(crate) use parse::{decode_header_line, parse_headers, status_code};

use anyhow::{Context, Result};

use crate::config::MetadataRecord;

/// Headers of a successful HEAD response (final response after redirects).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProbeResult {
    /// `Content-Disposition` value if present (filename source).
    pub content_disposition: Option<String>,
    /// `Content-Type` value if present (extension guess).
    pub content_type: Option<String>,
    /// Size in bytes, if `Content-Length` is present and numeric.
    pub content_length: Option<u64>,
    /// `ETag` with surrounding double quotes removed.
    pub etag: Option<String>,
    /// `Last-Modified` value as sent.
    pub last_modified: Option<String>,
}

impl ProbeResult {
    /// Fingerprint as seen by this probe. The content hash is never known without a download.
    pub fn fingerprint(&self) -> MetadataRecord {
        MetadataRecord {
            content_hash: None,
            etag: self.etag.clone(),
            last_modified: self.last_modified.clone(),
        }
    }

    /// `Content-Length` in KiB rounded to two decimals, for log output.
    pub fn size_kib(&self) -> Option<f64> {
        self.content_length
            .map(|n| (n as f64 / 1024.0 * 100.0).round() / 100.0)
    }
}

/// Performs a HEAD request and returns the parsed headers of the final response.
///
/// Follows redirects. Blocks for the duration of the request; no timeout beyond libcurl's
/// defaults is imposed.
pub fn probe(url: &str) -> Result<ProbeResult> {
    let mut headers: Vec<String> = Vec::new();

    let mut easy = curl::easy::Easy::new();
    easy.url(url).context("invalid URL")?;
    easy.nobody(true)?; // HEAD request
    easy.follow_location(true)?;

    {
        let mut transfer = easy.transfer();
        transfer.header_function(|data| {
            headers.push(decode_header_line(data).trim_end().to_string());
            true
        })?;
        transfer.perform().context("HEAD request failed")?;
    }

    let code = easy.response_code().context("no response code")?;
    if !(200..300).contains(&code) {
        anyhow::bail!("HEAD {} returned HTTP {}", url, code);
    }

    Ok(parse_headers(&headers))
}
