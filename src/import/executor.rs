//! Import executor: apply one strategy transactionally against the
//! existing record set, then persist the versioned manifest.
//!
//! Replace is all-or-nothing at the store boundary. Merge and append are
//! per-record with a collect-and-continue policy: a failed row lands in
//! the manifest's error list and never aborts the batch.

use std::collections::HashSet;
use std::io::Write;

use chrono::Utc;

use super::manifest::{ColumnMapping, ImportManifest};
use super::options::{ImportOptions, ImportStrategy, RowError};
use crate::errors::{ImportError, StoreError};
use crate::record::UnitRecord;
use crate::store::{Scope, UnitStore};

/// Per-batch context carried into the manifest.
#[derive(Debug, Clone)]
pub struct BatchMeta {
    pub source_file: String,
    pub stored_file_url: Option<String>,
    pub column_mapping: ColumnMapping,
    pub total_rows: usize,
    pub valid_rows: usize,
}

/// Apply `strategy` to `records`, write the manifest, return it.
///
/// # Errors
/// `Execution` when the operation fails as a whole (replace failure, or
/// the pre-read for append); `Store` when the manifest write fails.
/// Row-level failures during merge/append are collected, not raised.
pub fn execute(
    store: &dyn UnitStore,
    scope: &Scope,
    records: Vec<UnitRecord>,
    strategy: ImportStrategy,
    meta: BatchMeta,
    opts: &ImportOptions,
) -> Result<ImportManifest, ImportError> {
    log::info!(
        "import: strategy={strategy}, project={}, rows={}",
        scope.project_id,
        records.len()
    );
    let mut errors: Vec<RowError> = Vec::new();
    let mut created = 0usize;
    let mut updated = 0usize;

    match strategy {
        ImportStrategy::Replace => {
            created = store.replace_units(scope, records).map_err(|e| {
                ImportError::Execution { strategy, completed: 0, source: e }
            })?;
        }
        ImportStrategy::Merge => {
            for (row, record) in records.into_iter().enumerate() {
                match merge_one(store, scope, record) {
                    Ok(MergeOutcome::Created) => created += 1,
                    Ok(MergeOutcome::Updated) => updated += 1,
                    Err((unit_number, e)) => {
                        log::warn!("merge row {row} ({unit_number}) failed: {e}");
                        errors.push(RowError { row, unit_number, message: e.to_string() });
                    }
                }
                log_progress(opts, row + 1, created + updated);
            }
        }
        ImportStrategy::Append => {
            let mut taken: HashSet<String> = store
                .list_units(scope)
                .map_err(|e| ImportError::Execution { strategy, completed: 0, source: e })?
                .into_iter()
                .map(|u| u.unit_number)
                .collect();
            for (row, mut record) in records.into_iter().enumerate() {
                let unit_number = disambiguate(&record.unit_number, &taken);
                record.unit_number = unit_number.clone();
                match store.insert_unit(scope, record) {
                    Ok(()) => {
                        taken.insert(unit_number);
                        created += 1;
                    }
                    Err(e) => {
                        log::warn!("append row {row} ({unit_number}) failed: {e}");
                        errors.push(RowError { row, unit_number, message: e.to_string() });
                    }
                }
                log_progress(opts, row + 1, created);
            }
        }
    }

    if let Some(path) = &opts.error_sidecar {
        if !errors.is_empty() {
            write_sidecar(path, &errors)?;
        }
    }

    let mut manifest =
        ImportManifest::new(scope, strategy, meta.source_file, meta.column_mapping);
    manifest.stored_file_url = meta.stored_file_url;
    manifest.total_rows = meta.total_rows;
    manifest.valid_rows = meta.valid_rows;
    manifest.created = created;
    manifest.updated = updated;
    manifest.errors = errors;
    let manifest = store.activate_manifest(scope, manifest)?;
    log::info!(
        "import done: v{} created={created}, updated={updated}, errors={}",
        manifest.version_number,
        manifest.errors.len()
    );
    Ok(manifest)
}

enum MergeOutcome {
    Created,
    Updated,
}

fn merge_one(
    store: &dyn UnitStore,
    scope: &Scope,
    incoming: UnitRecord,
) -> Result<MergeOutcome, (String, StoreError)> {
    let unit_number = incoming.unit_number.clone();
    let existing = store.find_unit(scope, &unit_number).map_err(|e| (unit_number.clone(), e))?;
    match existing {
        Some(current) => {
            let mut merged = incoming;
            merged.id = current.id;
            merged.created_at = current.created_at;
            merged.updated_at = Utc::now();
            store.update_unit(scope, merged).map_err(|e| (unit_number, e))?;
            Ok(MergeOutcome::Updated)
        }
        None => {
            store.insert_unit(scope, incoming).map_err(|e| (unit_number, e))?;
            Ok(MergeOutcome::Created)
        }
    }
}

/// Suffix `-1`, `-2`, ... until the number is unique within the project.
fn disambiguate(base: &str, taken: &HashSet<String>) -> String {
    if !taken.contains(base) {
        return base.to_string();
    }
    let mut n = 1;
    loop {
        let candidate = format!("{base}-{n}");
        if !taken.contains(&candidate) {
            return candidate;
        }
        n += 1;
    }
}

fn log_progress(opts: &ImportOptions, row: usize, written: usize) {
    if let Some(every) = opts.progress_every {
        if every > 0 && row % every == 0 {
            log::info!("imported {written} records ({row} rows seen)");
        }
    }
}

fn write_sidecar(path: &std::path::Path, errors: &[RowError]) -> Result<(), ImportError> {
    let mut file = std::fs::File::create(path)?;
    for err in errors {
        let line = serde_json::to_string(err)
            .unwrap_or_else(|_| format!("{{\"row\":{},\"message\":\"unserializable\"}}", err.row));
        writeln!(file, "{line}")?;
    }
    Ok(())
}
