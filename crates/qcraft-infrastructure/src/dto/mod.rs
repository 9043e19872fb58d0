//! On-disk data transfer formats.

pub mod history;

pub use history::{HISTORY_FORMAT_VERSION, HistoryFile};
