use portup_core::logging;
use portup_core::{ConfigStore, CurlTransport};

/// Sync every program listed in `./Config.json`, downloading the ones that changed.
fn main() {
    // Initialize logging as early as possible.
    if let Err(err) = logging::init_logging() {
        logging::init_logging_stderr();
        tracing::warn!("file logging unavailable, using stderr: {:#}", err);
    }

    if let Err(err) = run() {
        tracing::error!("portup failed: {:#}", err);
        eprintln!("portup error: {:#}", err);
        std::process::exit(1);
    }
}

fn run() -> anyhow::Result<()> {
    let work_dir = std::env::current_dir()?;
    let store = ConfigStore::in_dir(&work_dir);
    tracing::info!("syncing programs from {}", store.path().display());

    let report = portup_core::sync::run(store, CurlTransport)?;
    println!(
        "{} downloaded, {} up to date, {} skipped, {} failed",
        report.downloaded(),
        report.up_to_date(),
        report.skipped(),
        report.failed()
    );
    Ok(())
}
