//! The sync engine: probe, resolve filename, detect change, fetch, persist.
//!
//! Resources are processed one at a time in config order. A resource's failure is logged
//! and the run continues; only config persistence failures abort it.

mod outcome;

pub use outcome::{Outcome, ResourceReport, RunReport, SyncError};

use std::path::{Component, Path, PathBuf};

use crate::change::has_changed;
use crate::config::{ConfigError, ConfigStore, Configuration};
use crate::paths::{self, WorkDirs};
use crate::transport::Transport;
use crate::url_model;

/// Owns the configuration for a run and applies the update protocol to each resource.
pub struct SyncEngine<T: Transport> {
    store: ConfigStore,
    config: Configuration,
    download_dir: PathBuf,
    transport: T,
}

impl<T: Transport> SyncEngine<T> {
    /// Fails if `dirs` has no download directory.
    pub fn new(
        store: ConfigStore,
        config: Configuration,
        dirs: &WorkDirs,
        transport: T,
    ) -> Result<Self, ConfigError> {
        let download_dir = dirs.download_dir()?.to_path_buf();
        Ok(Self {
            store,
            config,
            download_dir,
            transport,
        })
    }

    pub fn config(&self) -> &Configuration {
        &self.config
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Sync every configured resource in order.
    ///
    /// Returns `Err` only for a fatal error; per-resource failures are in the report.
    pub fn run(&mut self) -> Result<RunReport, SyncError> {
        let urls: Vec<Option<String>> = self
            .config
            .resources
            .iter()
            .map(|r| r.url.clone())
            .collect();

        let mut report = RunReport::default();
        for (index, url) in urls.into_iter().enumerate() {
            let result = match self.sync_resource(url.as_deref()) {
                Err(e) if e.is_fatal() => {
                    tracing::error!("aborting run at Programs[{}]: {}", index, e);
                    return Err(e);
                }
                other => other,
            };
            match &result {
                Err(e) => tracing::warn!("Programs[{}]: {}", index, e),
                Ok(Outcome::Skipped) => tracing::debug!("Programs[{}] has no url, skipped", index),
                Ok(Outcome::UpToDate { filename }) => tracing::info!("{} is up to date", filename),
                Ok(Outcome::Downloaded { filename, bytes }) => {
                    tracing::info!("{} downloaded ({} bytes)", filename, bytes)
                }
            }
            report.resources.push(ResourceReport { index, url, result });
        }

        tracing::info!(
            downloaded = report.downloaded(),
            up_to_date = report.up_to_date(),
            skipped = report.skipped(),
            failed = report.failed(),
            "sync finished"
        );
        Ok(report)
    }

    /// Apply the update protocol to a single resource URL.
    pub fn sync_resource(&mut self, url: Option<&str>) -> Result<Outcome, SyncError> {
        let Some(url) = url else {
            return Ok(Outcome::Skipped);
        };

        let probe = self
            .transport
            .probe(url)
            .map_err(|reason| SyncError::ProbeFailed {
                url: url.to_string(),
                reason,
            })?;

        let filename = url_model::resolve(
            url,
            probe.content_disposition.as_deref(),
            probe.content_type.as_deref(),
        )
        .map_err(|source| SyncError::FilenameUnresolved {
            url: url.to_string(),
            source,
        })?;
        let dest = self.download_dir.join(&filename);
        if escapes_dir(&filename) {
            tracing::warn!(
                "{} resolves outside the download folder {}",
                dest.display(),
                self.download_dir.display()
            );
        }

        tracing::debug!(
            url,
            content_disposition = ?probe.content_disposition,
            content_type = ?probe.content_type,
            content_length = ?probe.content_length,
            size_kib = ?probe.size_kib(),
            etag = ?probe.etag,
            last_modified = ?probe.last_modified,
            dest = %dest.display(),
            "probed {}",
            filename
        );

        let current = probe.fingerprint();
        if !has_changed(&current, self.config.metadata.get(&filename)) {
            return Ok(Outcome::UpToDate { filename });
        }

        tracing::info!("{} update available, downloading", filename);
        let download_failed = |reason: anyhow::Error| SyncError::DownloadFailed {
            url: url.to_string(),
            filename: filename.clone(),
            reason,
        };
        let bytes = self.transport.fetch(url, &dest).map_err(download_failed)?;
        if !dest.exists() {
            return Err(download_failed(anyhow::anyhow!(
                "{} missing after download",
                dest.display()
            )));
        }

        self.config.metadata.upsert(&filename, current);
        self.store.save(&self.config)?;
        Ok(Outcome::Downloaded { filename, bytes })
    }
}

/// True if joining `filename` onto a directory can land outside that directory.
fn escapes_dir(filename: &str) -> bool {
    Path::new(filename)
        .components()
        .any(|c| !matches!(c, Component::Normal(_) | Component::CurDir))
}

/// Load and validate the config behind `store`, create the working directories and sync
/// every resource with `transport`.
pub fn run<T: Transport>(store: ConfigStore, transport: T) -> Result<RunReport, SyncError> {
    let config = store.load_validated()?;
    let dirs = match config.primary_paths() {
        Some(set) => paths::ensure(set)?,
        None => return Err(ConfigError::MissingDownloadDir.into()),
    };
    let mut engine = SyncEngine::new(store, config, &dirs, transport)?;
    engine.run()
}
