//! btcsync-core
//!
//! Core types, collaborator traits, and series utilities shared across the
//! btcsync workspace.
//!
//! - `types`: the `PricePoint` row and the `snapped_at` timestamp convention.
//! - `source`: the `PriceSource` trait implemented by market-data connectors.
//! - `store`: the `SeriesStore` trait and the on-disk `CsvStore`.
//! - `window`: fetch-window arithmetic for incremental syncs.
//! - `merge`: priority merge of price series with first-wins dedup.
#![warn(missing_docs)]

/// Unified error type for the btcsync workspace.
pub mod error;
/// Priority merge of price series.
pub mod merge;
/// The `PriceSource` collaborator trait.
pub mod source;
/// Series storage collaborators.
pub mod store;
pub mod types;
/// Fetch-window arithmetic.
pub mod window;

pub use error::SyncError;
pub use merge::merge_points;
pub use source::PriceSource;
pub use store::{CsvStore, SeriesStore};
pub use types::{PricePoint, format_snapped_at, parse_snapped_at};
pub use window::{EPOCH_FLOOR, FetchWindow};
