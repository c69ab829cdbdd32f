mod ring;
mod types;

pub use ring::{DEFAULT_CAPACITY, HistoryRing};
pub use types::{HistoryEntry, format_confidence};
