//! In-memory store. A `parking_lot::RwLock` over per-scope state gives
//! the atomicity the trait demands: `replace_units` and
//! `activate_manifest` hold the write lock across their whole sequence.

use std::collections::HashMap;

use parking_lot::RwLock;

use super::{Scope, UnitStore};
use crate::errors::StoreError;
use crate::import::manifest::ImportManifest;
use crate::record::UnitRecord;

#[derive(Default)]
struct ScopeState {
    units: Vec<UnitRecord>,
    manifests: Vec<ImportManifest>,
}

#[derive(Default)]
pub struct MemoryStore {
    inner: RwLock<HashMap<Scope, ScopeState>>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl UnitStore for MemoryStore {
    fn list_units(&self, scope: &Scope) -> Result<Vec<UnitRecord>, StoreError> {
        Ok(self.inner.read().get(scope).map(|s| s.units.clone()).unwrap_or_default())
    }

    fn count_units(&self, scope: &Scope) -> Result<usize, StoreError> {
        Ok(self.inner.read().get(scope).map_or(0, |s| s.units.len()))
    }

    fn find_unit(
        &self,
        scope: &Scope,
        unit_number: &str,
    ) -> Result<Option<UnitRecord>, StoreError> {
        Ok(self
            .inner
            .read()
            .get(scope)
            .and_then(|s| s.units.iter().find(|u| u.unit_number == unit_number).cloned()))
    }

    fn insert_unit(&self, scope: &Scope, record: UnitRecord) -> Result<(), StoreError> {
        let mut guard = self.inner.write();
        let state = guard.entry(scope.clone()).or_default();
        if state.units.iter().any(|u| u.unit_number == record.unit_number) {
            return Err(StoreError::Conflict(format!(
                "unit {} already exists in project {}",
                record.unit_number, scope.project_id
            )));
        }
        state.units.push(record);
        Ok(())
    }

    fn update_unit(&self, scope: &Scope, record: UnitRecord) -> Result<(), StoreError> {
        let mut guard = self.inner.write();
        let state = guard.entry(scope.clone()).or_default();
        match state.units.iter_mut().find(|u| u.unit_number == record.unit_number) {
            Some(slot) => {
                *slot = record;
                Ok(())
            }
            None => Err(StoreError::NotFound(record.unit_number)),
        }
    }

    fn replace_units(&self, scope: &Scope, records: Vec<UnitRecord>) -> Result<usize, StoreError> {
        let mut guard = self.inner.write();
        let state = guard.entry(scope.clone()).or_default();
        let n = records.len();
        state.units = records;
        Ok(n)
    }

    fn list_manifests(&self, scope: &Scope) -> Result<Vec<ImportManifest>, StoreError> {
        Ok(self.inner.read().get(scope).map(|s| s.manifests.clone()).unwrap_or_default())
    }

    fn active_manifest(&self, scope: &Scope) -> Result<Option<ImportManifest>, StoreError> {
        Ok(self
            .inner
            .read()
            .get(scope)
            .and_then(|s| s.manifests.iter().find(|m| m.is_active).cloned()))
    }

    fn activate_manifest(
        &self,
        scope: &Scope,
        mut manifest: ImportManifest,
    ) -> Result<ImportManifest, StoreError> {
        let mut guard = self.inner.write();
        let state = guard.entry(scope.clone()).or_default();
        for m in &mut state.manifests {
            m.is_active = false;
        }
        let next = state.manifests.iter().map(|m| m.version_number).max().unwrap_or(0) + 1;
        manifest.version_number = next;
        manifest.is_active = true;
        state.manifests.push(manifest.clone());
        Ok(manifest)
    }
}
