use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Symbol fetched for the USD series.
pub const BTC_USD: &str = "BTC-USD";
/// Symbol fetched for the EUR series.
pub const BTC_EUR: &str = "BTC-EUR";

/// Default bound on a single source fetch.
pub const DEFAULT_FETCH_TIMEOUT: Duration = Duration::from_secs(30);

/// Pairing of one fetch symbol with its storage destination.
///
/// The two per-currency series are configuration data, not duplicated
/// logic: the synchronizer runs the same pipeline over each pair.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeriesConfig {
    /// Provider symbol, e.g. `BTC-USD`.
    pub symbol: String,
    /// Destination CSV path for this series.
    pub path: PathBuf,
}

/// Configuration for one synchronizer run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SyncConfig {
    /// Series to update, processed sequentially and independently.
    pub series: Vec<SeriesConfig>,
    /// Per-fetch network timeout.
    pub fetch_timeout: Duration,
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            series: Vec::new(),
            fetch_timeout: DEFAULT_FETCH_TIMEOUT,
        }
    }
}

impl SyncConfig {
    /// The stock configuration: BTC in USD and EUR, stored under `root`.
    pub fn btc_defaults(root: impl AsRef<Path>) -> Self {
        let root = root.as_ref();
        Self {
            series: vec![
                SeriesConfig {
                    symbol: BTC_USD.to_string(),
                    path: root.join("btc-history-usd.csv"),
                },
                SeriesConfig {
                    symbol: BTC_EUR.to_string(),
                    path: root.join("btc-history-eur.csv"),
                },
            ],
            fetch_timeout: DEFAULT_FETCH_TIMEOUT,
        }
    }
}
