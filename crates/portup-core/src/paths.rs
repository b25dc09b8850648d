//! Working directory resolution and creation.

use std::fs;
use std::path::{Path, PathBuf};

use crate::config::{ConfigError, PathSet};

/// Resolved working directories of the primary PathSet.
///
/// Only `download` is consumed by the sync engine; the others are created for the
/// extract/install/shortcut steps that run after it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkDirs {
    pub download: Option<PathBuf>,
    pub extract: Option<PathBuf>,
    pub install: Option<PathBuf>,
    pub link: Option<PathBuf>,
}

impl WorkDirs {
    pub fn from_path_set(set: &PathSet) -> Self {
        let to_path = |p: &Option<String>| p.as_deref().map(PathBuf::from);
        Self {
            download: to_path(&set.download_dir),
            extract: to_path(&set.extract_dir),
            install: to_path(&set.install_dir),
            link: to_path(&set.link_dir),
        }
    }

    /// Download directory, which a sync cannot run without.
    pub fn download_dir(&self) -> Result<&Path, ConfigError> {
        self.download
            .as_deref()
            .ok_or(ConfigError::MissingDownloadDir)
    }

    fn named(&self) -> [(&'static str, Option<&Path>); 4] {
        [
            ("dow_pth", self.download.as_deref()),
            ("ext_pth", self.extract.as_deref()),
            ("ins_pth", self.install.as_deref()),
            ("lnk_pth", self.link.as_deref()),
        ]
    }
}

/// Create the four directories of `set` if they do not exist yet.
///
/// Existing directories are fine. A `null` entry is skipped.
pub fn ensure(set: &PathSet) -> Result<WorkDirs, ConfigError> {
    let dirs = WorkDirs::from_path_set(set);
    for (name, dir) in dirs.named() {
        let Some(dir) = dir else {
            tracing::warn!("{} is null, not creating it", name);
            continue;
        };
        fs::create_dir_all(dir).map_err(|e| ConfigError::CreateDir {
            path: dir.to_path_buf(),
            source: e,
        })?;
        tracing::debug!("{}: {}", name, dir.display());
    }
    Ok(dirs)
}
