pub mod config;
pub mod logging;

pub mod change;
pub mod downloader;
pub mod fetch_head;
pub mod metadata;
pub mod paths;
pub mod sync;
pub mod transport;
pub mod url_model;

pub use config::{ConfigError, ConfigStore, Configuration};
pub use sync::{Outcome, RunReport, SyncEngine, SyncError};
pub use transport::{CurlTransport, Transport};
