use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use btcsync::{PriceSource, SyncConfig, Synchronizer};
use btcsync_yahoo::YahooSource;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let root = std::env::var_os("BTCSYNC_DATA_DIR")
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("."));
    let config = SyncConfig::btc_defaults(&root);

    let source: Arc<dyn PriceSource> = Arc::new(YahooSource::new());
    let sync = match Synchronizer::builder()
        .with_source(source)
        .with_fetch_timeout(config.fetch_timeout)
        .build()
    {
        Ok(sync) => sync,
        Err(error) => {
            tracing::error!(%error, "failed to build synchronizer");
            return ExitCode::FAILURE;
        }
    };

    let report = sync.sync_all(&config).await;
    tracing::info!(
        series_ok = report.outcomes.len(),
        series_failed = report.failures.len(),
        rows_added = report.rows_added(),
        "run finished"
    );

    if report.is_success() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}
