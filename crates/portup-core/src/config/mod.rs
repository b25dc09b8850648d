//! Loading, validating and persisting `Config.json`.
//!
//! Every error produced here is fatal to a run: the caller logs it and exits non-zero.

mod document;
mod sanitize;

pub use document::{
    ConfigDefaults, Configuration, MetadataRecord, PathSet, ResourceEntry, DEFAULT_PROGRAMS_DIR,
};
pub use sanitize::sanitize_document;

use serde::Serialize;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// File name of the config document inside the working directory.
pub const CONFIG_FILE_NAME: &str = "Config.json";

/// Fatal configuration, schema or filesystem error.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("read config {}: {source}", .path.display())]
    Read { path: PathBuf, source: io::Error },
    #[error("write config {}: {source}", .path.display())]
    Write { path: PathBuf, source: io::Error },
    #[error("serialize config: {0}")]
    Serialize(#[source] serde_json::Error),
    #[error("config does not match schema: {0}")]
    Schema(#[source] serde_json::Error),
    #[error("invalid url {url:?} in Programs[{index}]: {source}")]
    InvalidUrl {
        index: usize,
        url: String,
        source: url::ParseError,
    },
    #[error("download directory is not configured (Paths[0].dow_pth is null)")]
    MissingDownloadDir,
    #[error("create folder {}: {source}", .path.display())]
    CreateDir { path: PathBuf, source: io::Error },
}

/// Owns the location of the config document and the defaults used to fill it.
#[derive(Debug, Clone)]
pub struct ConfigStore {
    path: PathBuf,
    defaults: ConfigDefaults,
}

impl ConfigStore {
    pub fn new(path: impl Into<PathBuf>, defaults: ConfigDefaults) -> Self {
        Self {
            path: path.into(),
            defaults,
        }
    }

    /// Store for `<base>/Config.json` with every working directory defaulting to `<base>/Programs`.
    pub fn in_dir(base: &Path) -> Self {
        Self::new(base.join(CONFIG_FILE_NAME), ConfigDefaults::rooted_at(base))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn defaults(&self) -> &ConfigDefaults {
        &self.defaults
    }

    /// Load the document, writing an empty one if it is missing or not valid JSON.
    ///
    /// Unknown properties are stripped and missing ones back-filled before typed decoding.
    pub fn load(&self) -> Result<Configuration, ConfigError> {
        let text = match fs::read_to_string(&self.path) {
            Ok(t) => t,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                tracing::info!("no config at {}, creating an empty one", self.path.display());
                return self.init_empty();
            }
            Err(e) => {
                return Err(ConfigError::Read {
                    path: self.path.clone(),
                    source: e,
                })
            }
        };

        let raw: serde_json::Value = match serde_json::from_str(&text) {
            Ok(v) => v,
            Err(e) => {
                tracing::warn!(
                    "config at {} is not valid JSON ({}), replacing it with an empty one",
                    self.path.display(),
                    e
                );
                return self.init_empty();
            }
        };

        let doc = sanitize_document(raw, &self.defaults);
        let cfg: Configuration = serde_json::from_value(doc).map_err(ConfigError::Schema)?;
        tracing::debug!(
            paths = cfg.paths.len(),
            programs = cfg.resources.len(),
            files = cfg.metadata.len(),
            "loaded config from {}",
            self.path.display()
        );
        Ok(cfg)
    }

    /// Write the document as indented JSON, replacing the previous file.
    ///
    /// The overwrite is not atomic; a crash mid-write can leave a truncated file.
    pub fn save(&self, cfg: &Configuration) -> Result<(), ConfigError> {
        let mut buf = Vec::new();
        let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
        let mut ser = serde_json::Serializer::with_formatter(&mut buf, formatter);
        cfg.serialize(&mut ser).map_err(ConfigError::Serialize)?;
        fs::write(&self.path, buf).map_err(|e| ConfigError::Write {
            path: self.path.clone(),
            source: e,
        })?;
        tracing::debug!("saved config to {}", self.path.display());
        Ok(())
    }

    /// Enforce the document invariants, synthesizing entries where lists are empty.
    ///
    /// Idempotent: validating an already validated value returns it unchanged.
    pub fn validate(&self, mut cfg: Configuration) -> Result<Configuration, ConfigError> {
        if cfg.paths.is_empty() {
            cfg.paths.push(PathSet::with_defaults(&self.defaults));
        }
        if cfg.resources.is_empty() {
            cfg.resources.push(ResourceEntry::default());
        }
        for (index, entry) in cfg.resources.iter().enumerate() {
            if let Some(raw) = entry.url.as_deref() {
                url::Url::parse(raw).map_err(|source| ConfigError::InvalidUrl {
                    index,
                    url: raw.to_string(),
                    source,
                })?;
            }
        }
        Ok(cfg)
    }

    /// Load, validate and persist: the file on disk always ends up in the validated shape.
    pub fn load_validated(&self) -> Result<Configuration, ConfigError> {
        let cfg = self.validate(self.load()?)?;
        self.save(&cfg)?;
        Ok(cfg)
    }

    fn init_empty(&self) -> Result<Configuration, ConfigError> {
        let cfg = Configuration::default();
        self.save(&cfg)?;
        Ok(cfg)
    }
}
