//! Dataset loading and the embedded fallback collection.

pub mod fallback;
pub mod source;

pub use source::{DataSource, Dataset, RowError, SourceConfig, load, load_or_fallback};
