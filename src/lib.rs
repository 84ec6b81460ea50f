//! unitgrid — spreadsheet ingestion and unit-inventory import engine.
//!
//! Takes messy real-world spreadsheets (CSV/XLSX/XLS), heuristically
//! locates the header row and the data region, classifies ad-hoc columns
//! onto a semi-structured unit record (fixed recognized attributes plus a
//! free-form attribute bag), and applies a replace/merge/append import
//! strategy against a tenant-scoped store, persisting a versioned import
//! manifest per run.
//!
//! The pipeline is `parse -> detect -> classify -> execute`; the first
//! three stages are pure, and `ImportService` wires them to storage.

pub mod classify;
pub mod detect;
pub mod errors;
pub mod grid;
pub mod import;
pub mod logger;
pub mod parser;
pub mod pipeline;
pub mod record;
pub mod source;
pub mod store;

pub use classify::display::{ColumnDisplay, ColumnType};
pub use errors::{ImportError, StoreError};
pub use import::{ImportManifest, ImportOptions, ImportStrategy, RowError};
pub use pipeline::ImportPreview;
pub use record::{FieldValue, UnitRecord, UnitStatus};
pub use source::SourceFile;
pub use store::{FileStore, MemoryStore, Scope, UnitStore};

use std::sync::Arc;

use import::executor::{self, BatchMeta};
use import::manifest::ColumnMapping;

/// Façade bundling the pipeline with a unit store and an optional blob
/// store for retaining original uploads.
pub struct ImportService {
    store: Arc<dyn UnitStore>,
    files: Option<Arc<dyn FileStore>>,
}

impl ImportService {
    #[must_use]
    pub fn new(store: Arc<dyn UnitStore>) -> Self {
        Self { store, files: None }
    }

    #[must_use]
    pub fn with_file_store(mut self, files: Arc<dyn FileStore>) -> Self {
        self.files = Some(files);
        self
    }

    /// Parse and classify a file without touching storage.
    ///
    /// # Errors
    /// Input errors only (`UnsupportedFormat`, `EmptyFile`, parse failures).
    pub fn preview(
        &self,
        file: &SourceFile,
        opts: &ImportOptions,
    ) -> Result<ImportPreview, ImportError> {
        pipeline::preview_source(file, opts)
    }

    /// Execute a confirmed preview against the store.
    ///
    /// # Errors
    /// `Execution` when the strategy fails as a whole, `Store` when the
    /// manifest write fails. Row-level merge/append failures end up in the
    /// returned manifest's `errors` list instead.
    pub fn import(
        &self,
        scope: &Scope,
        source_file: &str,
        preview: &ImportPreview,
        strategy: ImportStrategy,
        opts: &ImportOptions,
    ) -> Result<ImportManifest, ImportError> {
        let meta = BatchMeta {
            source_file: source_file.to_string(),
            stored_file_url: None,
            column_mapping: ColumnMapping {
                columns: preview.columns.clone(),
                display_config: preview.display_config.clone(),
            },
            total_rows: preview.total_rows,
            valid_rows: preview.valid_rows,
        };
        executor::execute(
            self.store.as_ref(),
            scope,
            preview.sample_data.clone(),
            strategy,
            meta,
            opts,
        )
    }

    /// One-shot: preview, retain the original upload when a file store is
    /// configured (failure is logged, never fatal), then execute.
    pub fn run(
        &self,
        scope: &Scope,
        file: &SourceFile,
        strategy: ImportStrategy,
        opts: &ImportOptions,
    ) -> Result<ImportManifest, ImportError> {
        let preview = self.preview(file, opts)?;
        let stored_file_url = self.upload_original(file);
        let meta = BatchMeta {
            source_file: file.name.clone(),
            stored_file_url,
            column_mapping: ColumnMapping {
                columns: preview.columns.clone(),
                display_config: preview.display_config.clone(),
            },
            total_rows: preview.total_rows,
            valid_rows: preview.valid_rows,
        };
        executor::execute(self.store.as_ref(), scope, preview.sample_data, strategy, meta, opts)
    }

    /// All manifests for a project, for import-history views.
    pub fn import_history(&self, scope: &Scope) -> Result<Vec<ImportManifest>, StoreError> {
        self.store.list_manifests(scope)
    }

    /// Current table schema for a project (active manifest, else derived
    /// from stored records).
    pub fn display_config(&self, scope: &Scope) -> Result<Vec<ColumnDisplay>, StoreError> {
        classify::display::for_project(self.store.as_ref(), scope)
    }

    #[must_use]
    pub fn store(&self) -> &dyn UnitStore {
        self.store.as_ref()
    }

    fn upload_original(&self, file: &SourceFile) -> Option<String> {
        let files = self.files.as_ref()?;
        match files.upload(&file.name, &file.bytes) {
            Ok(url) => Some(url),
            Err(e) => {
                log::warn!("original-file upload failed, continuing without it: {e}");
                None
            }
        }
    }
}
