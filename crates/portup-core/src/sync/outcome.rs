//! Per-resource results of a sync run.

use crate::config::ConfigError;
use crate::url_model::FilenameError;

/// Terminal state of a resource that did not fail.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// The entry has no URL.
    Skipped,
    /// Stored fingerprint matches the probe; nothing written.
    UpToDate { filename: String },
    /// File downloaded and its fingerprint persisted.
    Downloaded { filename: String, bytes: u64 },
}

/// Failure while syncing one resource.
///
/// Everything except [`SyncError::Config`] is recoverable: the resource is abandoned for
/// this run and the engine moves on to the next one.
#[derive(Debug, thiserror::Error)]
pub enum SyncError {
    #[error("probe {url} failed: {reason:#}")]
    ProbeFailed { url: String, reason: anyhow::Error },
    #[error("no usable filename for {url}: {source}")]
    FilenameUnresolved { url: String, source: FilenameError },
    #[error("download of {url} to {filename} failed: {reason:#}")]
    DownloadFailed {
        url: String,
        filename: String,
        reason: anyhow::Error,
    },
    #[error(transparent)]
    Config(#[from] ConfigError),
}

impl SyncError {
    /// Fatal errors abort the whole run; the rest only forfeit the current resource.
    pub fn is_fatal(&self) -> bool {
        matches!(self, SyncError::Config(_))
    }
}

/// Result of one configured resource, in config order.
#[derive(Debug)]
pub struct ResourceReport {
    pub index: usize,
    pub url: Option<String>,
    pub result: Result<Outcome, SyncError>,
}

/// Everything that happened in one run.
#[derive(Debug, Default)]
pub struct RunReport {
    pub resources: Vec<ResourceReport>,
}

impl RunReport {
    pub fn downloaded(&self) -> usize {
        self.count(|r| matches!(r, Ok(Outcome::Downloaded { .. })))
    }

    pub fn up_to_date(&self) -> usize {
        self.count(|r| matches!(r, Ok(Outcome::UpToDate { .. })))
    }

    pub fn skipped(&self) -> usize {
        self.count(|r| matches!(r, Ok(Outcome::Skipped)))
    }

    pub fn failed(&self) -> usize {
        self.count(|r| r.is_err())
    }

    fn count(&self, pred: impl Fn(&Result<Outcome, SyncError>) -> bool) -> usize {
        self.resources.iter().filter(|r| pred(&r.result)).count()
    }
}
