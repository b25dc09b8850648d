//! HTTP seam between the sync engine and the network.

use anyhow::Result;
use std::path::Path;

use crate::downloader;
use crate::fetch_head::{self, ProbeResult};

/// Metadata probe and full fetch, one blocking call each.
pub trait Transport {
    /// HEAD `url` (following redirects). Non-2xx responses are errors.
    fn probe(&mut self, url: &str) -> Result<ProbeResult>;

    /// GET `url` into `dest`, replacing whatever is there. Returns bytes written.
    fn fetch(&mut self, url: &str, dest: &Path) -> Result<u64>;
}

/// libcurl-backed transport used by the binary.
#[derive(Debug, Default, Clone, Copy)]
pub struct CurlTransport;

impl Transport for CurlTransport {
    fn probe(&mut self, url: &str) -> Result<ProbeResult> {
        fetch_head::probe(url)
    }

    fn fetch(&mut self, url: &str, dest: &Path) -> Result<u64> {
        downloader::fetch_to_path(url, dest)
    }
}
