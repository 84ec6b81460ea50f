pub mod executor;
pub mod manifest;
pub mod options;

pub use executor::{execute, BatchMeta};
pub use manifest::{ColumnMapping, ImportManifest};
pub use options::{ImportOptions, ImportStrategy, RowError};
