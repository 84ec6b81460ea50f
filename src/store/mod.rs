//! Storage seams. The ingestion core talks to persistence through the
//! `UnitStore` trait only; every call carries an explicit tenant `Scope`
//! (no ambient session lookups). The shipped `MemoryStore` backs tests
//! and embedded use.

pub mod memory;

pub use memory::MemoryStore;

use serde::{Deserialize, Serialize};

use crate::errors::StoreError;
use crate::import::manifest::ImportManifest;
use crate::record::UnitRecord;

/// Tenant boundary: the organization owning the project, plus the project
/// itself. The core never crosses it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Scope {
    pub organization_id: String,
    pub project_id: String,
}

impl Scope {
    #[must_use]
    pub fn new(organization_id: impl Into<String>, project_id: impl Into<String>) -> Self {
        Self { organization_id: organization_id.into(), project_id: project_id.into() }
    }
}

/// Row-level persistence for unit records and import manifests.
///
/// Two operations are read-modify-write sequences and MUST be atomic in a
/// conforming implementation: `replace_units` (delete-all + insert-all)
/// and `activate_manifest` (deactivate previous + assign version +
/// insert). Concurrent imports against the same scope are otherwise
/// undefined.
pub trait UnitStore: Send + Sync {
    fn list_units(&self, scope: &Scope) -> Result<Vec<UnitRecord>, StoreError>;

    fn count_units(&self, scope: &Scope) -> Result<usize, StoreError>;

    fn find_unit(&self, scope: &Scope, unit_number: &str)
        -> Result<Option<UnitRecord>, StoreError>;

    fn insert_unit(&self, scope: &Scope, record: UnitRecord) -> Result<(), StoreError>;

    /// Update the record matching `record.unit_number`; `NotFound` when no
    /// such unit exists in scope.
    fn update_unit(&self, scope: &Scope, record: UnitRecord) -> Result<(), StoreError>;

    /// Atomically delete every unit in scope and insert `records`.
    /// Returns the number of records inserted.
    fn replace_units(&self, scope: &Scope, records: Vec<UnitRecord>) -> Result<usize, StoreError>;

    fn list_manifests(&self, scope: &Scope) -> Result<Vec<ImportManifest>, StoreError>;

    fn active_manifest(&self, scope: &Scope) -> Result<Option<ImportManifest>, StoreError>;

    /// Atomically deactivate the currently active manifest, assign the next
    /// `version_number`, and insert `manifest` as active. Returns the
    /// stored manifest.
    fn activate_manifest(
        &self,
        scope: &Scope,
        manifest: ImportManifest,
    ) -> Result<ImportManifest, StoreError>;
}

/// Blob storage for retaining original uploads. Failure of this interface
/// never blocks an import.
pub trait FileStore: Send + Sync {
    /// Upload and return a public URL.
    fn upload(&self, name: &str, bytes: &[u8]) -> Result<String, StoreError>;
}
