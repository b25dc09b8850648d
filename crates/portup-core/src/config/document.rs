//! Typed shape of `Config.json`.
//!
//! Field names on the wire (`Paths`, `Programs`, `Metadata`, `dow_pth`, `Hash`, `LMod`, ...)
//! are a persisted-state contract; existing config files must keep round-tripping.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::metadata::MetadataStore;

/// Name of the directory used for every path field that is missing from the document.
pub const DEFAULT_PROGRAMS_DIR: &str = "Programs";

/// Values used to back-fill missing fields. Derived once at startup and passed in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigDefaults {
    /// Directory shared by all four working directories when the document names none.
    pub work_dir: PathBuf,
}

impl ConfigDefaults {
    /// Defaults rooted at `base`: every working directory becomes `<base>/Programs`.
    pub fn rooted_at(base: &Path) -> Self {
        Self {
            work_dir: base.join(DEFAULT_PROGRAMS_DIR),
        }
    }

    pub fn work_dir_string(&self) -> String {
        self.work_dir.to_string_lossy().into_owned()
    }
}

/// The whole persisted document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Configuration {
    #[serde(rename = "Paths")]
    pub paths: Vec<PathSet>,
    #[serde(rename = "Programs")]
    pub resources: Vec<ResourceEntry>,
    #[serde(rename = "Metadata")]
    pub metadata: MetadataStore,
}

impl Configuration {
    /// The PathSet that drives a run. Later entries are kept on disk but never consulted.
    pub fn primary_paths(&self) -> Option<&PathSet> {
        self.paths.first()
    }
}

/// The four working directories. `None` means an explicit `null` in the document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PathSet {
    #[serde(rename = "dow_pth")]
    pub download_dir: Option<String>,
    #[serde(rename = "ext_pth")]
    pub extract_dir: Option<String>,
    #[serde(rename = "ins_pth")]
    pub install_dir: Option<String>,
    #[serde(rename = "lnk_pth")]
    pub link_dir: Option<String>,
}

impl PathSet {
    /// A PathSet with every directory pointing at the shared default working directory.
    pub fn with_defaults(defaults: &ConfigDefaults) -> Self {
        let dir = defaults.work_dir_string();
        Self {
            download_dir: Some(dir.clone()),
            extract_dir: Some(dir.clone()),
            install_dir: Some(dir.clone()),
            link_dir: Some(dir),
        }
    }
}

/// One configured program download.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceEntry {
    pub url: Option<String>,
}

impl ResourceEntry {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: Some(url.into()),
        }
    }
}

/// Fingerprint of a downloaded file as last seen on the server.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetadataRecord {
    /// Content hash. Never computed by the probe path; kept for compatibility.
    #[serde(rename = "Hash", default)]
    pub content_hash: Option<String>,
    #[serde(rename = "ETag", default)]
    pub etag: Option<String>,
    #[serde(rename = "LMod", default)]
    pub last_modified: Option<String>,
}
