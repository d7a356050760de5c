//! Host status model for the handheld client.
//!
//! Status reports arrive as loosely structured `{...}` text. Each recognized
//! key is extracted on its own by [`parse_status`] into a [`TelemetryUpdate`],
//! and [`SnapshotStore::merge`] folds that partial update into the single
//! published [`TelemetrySnapshot`]. Keys a message does not carry are never
//! touched, so the snapshot always holds the best value known so far.

mod history;
mod literal;
mod parser;
mod snapshot;
mod store;
mod update;

pub use history::{POWER_HISTORY_LEN, PowerHistory};
pub use literal::{parse_float_prefix, parse_int_prefix, quoted_prefix};
pub use parser::{STATUS_SENTINEL, is_status, parse_status};
pub use snapshot::{BATTERY_STATUS_CAPACITY, TEXT_CAPACITY, TelemetrySnapshot};
pub use store::SnapshotStore;
pub use update::TelemetryUpdate;
