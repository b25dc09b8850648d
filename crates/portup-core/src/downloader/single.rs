//! Single-stream HTTP GET into the destination file.
//!
//! The destination is only created (truncating any previous file) once a 2xx response
//! starts delivering its body, so an error page never replaces a good download. A transfer
//! that fails mid-body leaves the partial file behind.

use anyhow::{Context, Result};
use std::cell::{Cell, RefCell};
use std::fs::File;
use std::io::{self, Write};
use std::path::Path;

use crate::fetch_head::{decode_header_line, status_code};

/// Downloads `url` with a single GET, writing the body to `dest`.
/// Returns the number of bytes written.
pub fn fetch_to_path(url: &str, dest: &Path) -> Result<u64> {
    let status = Cell::new(0u32);
    let file: RefCell<Option<File>> = RefCell::new(None);
    let written = Cell::new(0u64);
    let write_error: RefCell<Option<io::Error>> = RefCell::new(None);

    let mut easy = curl::easy::Easy::new();
    easy.url(url).context("invalid URL")?;
    easy.follow_location(true)?;

    {
        let mut transfer = easy.transfer();
        transfer.header_function(|data| {
            if let Some(code) = status_code(decode_header_line(data).trim()) {
                status.set(code);
            }
            true
        })?;
        transfer.write_function(|data| {
            if !(200..300).contains(&status.get()) {
                // Body of a redirect or error response: drain it.
                return Ok(data.len());
            }
            match write_body(&file, dest, data) {
                Ok(()) => {
                    written.set(written.get() + data.len() as u64);
                    Ok(data.len())
                }
                Err(e) => {
                    tracing::warn!("write to {} failed: {}", dest.display(), e);
                    *write_error.borrow_mut() = Some(e);
                    Ok(0) // abort transfer
                }
            }
        })?;
        let performed = transfer.perform();
        if let Some(e) = write_error.borrow_mut().take() {
            return Err(e).with_context(|| format!("write {}", dest.display()));
        }
        performed.context("GET request failed")?;
    }

    let code = easy.response_code().context("no response code")?;
    if !(200..300).contains(&code) {
        anyhow::bail!("GET {} returned HTTP {}", url, code);
    }

    let mut file = file.into_inner();
    match file.as_mut() {
        Some(f) => f.flush().with_context(|| format!("flush {}", dest.display()))?,
        // Successful response with an empty body.
        None => {
            File::create(dest).with_context(|| format!("create {}", dest.display()))?;
        }
    }
    Ok(written.get())
}

fn write_body(file: &RefCell<Option<File>>, dest: &Path, data: &[u8]) -> io::Result<()> {
    let mut slot = file.borrow_mut();
    if slot.is_none() {
        *slot = Some(File::create(dest)?);
    }
    match slot.as_mut() {
        Some(f) => f.write_all(data),
        None => Ok(()),
    }
}
