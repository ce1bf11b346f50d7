use thiserror::Error;

/// Unified error type for the btcsync workspace.
///
/// This wraps storage corruption, filesystem failures, source-tagged fetch
/// failures, timeouts, and argument validation errors.
#[derive(Debug, Error)]
pub enum SyncError {
    /// A stored series exists but cannot be parsed (malformed timestamp,
    /// missing required column, bad price).
    #[error("storage corrupt: {what}")]
    StorageCorrupt {
        /// Description of the corrupt row or file, including its location.
        what: String,
    },

    /// Filesystem failure while reading or rewriting a series.
    #[error("storage i/o: {0}")]
    Io(#[from] std::io::Error),

    /// A price source returned an error for the current run.
    #[error("{source_name} failed: {msg}")]
    Source {
        /// Source name that failed.
        source_name: String,
        /// Human-readable error message.
        msg: String,
    },

    /// A price source call exceeded the configured fetch timeout.
    #[error("source timed out: {symbol} via {source_name}")]
    SourceTimeout {
        /// Source name that timed out.
        source_name: String,
        /// Symbol being fetched when the timeout fired.
        symbol: String,
    },

    /// Invalid input argument.
    #[error("invalid argument: {0}")]
    InvalidArg(String),
}

impl SyncError {
    /// Helper: build a `StorageCorrupt` error with a description of the bad data.
    pub fn storage_corrupt(what: impl Into<String>) -> Self {
        Self::StorageCorrupt { what: what.into() }
    }

    /// Helper: build a `Source` error with the source name and message.
    pub fn source(source_name: impl Into<String>, msg: impl Into<String>) -> Self {
        Self::Source {
            source_name: source_name.into(),
            msg: msg.into(),
        }
    }

    /// Helper: build a `SourceTimeout` error.
    pub fn source_timeout(source_name: impl Into<String>, symbol: impl Into<String>) -> Self {
        Self::SourceTimeout {
            source_name: source_name.into(),
            symbol: symbol.into(),
        }
    }

    /// Helper: build an `InvalidArg` error.
    pub fn invalid_arg(msg: impl Into<String>) -> Self {
        Self::InvalidArg(msg.into())
    }
}
