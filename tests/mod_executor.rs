use unitgrid::import::{self, BatchMeta, ColumnMapping, ImportOptions, ImportStrategy};
use unitgrid::{MemoryStore, Scope, StoreError, UnitRecord, UnitStore};

fn scope() -> Scope {
    Scope::new("org-1", "proj-1")
}

fn meta(n: usize) -> BatchMeta {
    BatchMeta {
        source_file: "units.csv".to_string(),
        stored_file_url: None,
        column_mapping: ColumnMapping { columns: vec![], display_config: vec![] },
        total_rows: n,
        valid_rows: n,
    }
}

fn records(names: &[&str]) -> Vec<UnitRecord> {
    names.iter().map(|n| UnitRecord::new(*n)).collect()
}

#[test]
fn replace_leaves_exactly_the_new_set() {
    let store = MemoryStore::new();
    for r in records(&["OLD-1", "OLD-2", "OLD-3"]) {
        store.insert_unit(&scope(), r).unwrap();
    }
    let batch = records(&["A-1", "A-2", "A-3", "A-4", "A-5"]);
    let manifest = import::execute(
        &store,
        &scope(),
        batch,
        ImportStrategy::Replace,
        meta(5),
        &ImportOptions::default(),
    )
    .unwrap();
    assert_eq!(manifest.created, 5);
    assert_eq!(store.count_units(&scope()).unwrap(), 5);
    assert!(store.find_unit(&scope(), "OLD-1").unwrap().is_none());
}

#[test]
fn replace_tolerates_an_empty_project() {
    let store = MemoryStore::new();
    let manifest = import::execute(
        &store,
        &scope(),
        records(&["A-1"]),
        ImportStrategy::Replace,
        meta(1),
        &ImportOptions::default(),
    )
    .unwrap();
    assert_eq!(manifest.created, 1);
    assert_eq!(store.count_units(&scope()).unwrap(), 1);
}

#[test]
fn merge_updates_matches_and_creates_the_rest() {
    let store = MemoryStore::new();
    for r in records(&["A-1", "A-2", "B-9"]) {
        store.insert_unit(&scope(), r).unwrap();
    }
    let mut batch = records(&["A-1", "A-2", "C-1", "C-2", "C-3"]);
    batch[0].price = Some(100_000.0);
    let manifest = import::execute(
        &store,
        &scope(),
        batch,
        ImportStrategy::Merge,
        meta(5),
        &ImportOptions::default(),
    )
    .unwrap();
    assert_eq!(manifest.updated, 2);
    assert_eq!(manifest.created, 3);
    assert!(manifest.errors.is_empty());
    assert_eq!(store.count_units(&scope()).unwrap(), 6);
    let a1 = store.find_unit(&scope(), "A-1").unwrap().unwrap();
    assert_eq!(a1.price, Some(100_000.0));
}

#[test]
fn merge_preserves_identity_of_updated_records() {
    let store = MemoryStore::new();
    let original = UnitRecord::new("A-1");
    let original_id = original.id;
    store.insert_unit(&scope(), original).unwrap();
    import::execute(
        &store,
        &scope(),
        records(&["A-1"]),
        ImportStrategy::Merge,
        meta(1),
        &ImportOptions::default(),
    )
    .unwrap();
    let stored = store.find_unit(&scope(), "A-1").unwrap().unwrap();
    assert_eq!(stored.id, original_id);
}

#[test]
fn append_disambiguates_collisions_deterministically() {
    let store = MemoryStore::new();
    store.insert_unit(&scope(), UnitRecord::new("A-101")).unwrap();
    // two incoming records with the same number as the stored one
    let manifest = import::execute(
        &store,
        &scope(),
        records(&["A-101", "A-101"]),
        ImportStrategy::Append,
        meta(2),
        &ImportOptions::default(),
    )
    .unwrap();
    assert_eq!(manifest.created, 2);
    let numbers: Vec<String> = store
        .list_units(&scope())
        .unwrap()
        .into_iter()
        .map(|u| u.unit_number)
        .collect();
    assert_eq!(numbers, vec!["A-101", "A-101-1", "A-101-2"]);
    for n in &numbers {
        assert!(store.find_unit(&scope(), n).unwrap().is_some());
    }
}

#[test]
fn manifest_versions_increase_with_one_active() {
    let store = MemoryStore::new();
    for i in 0..3 {
        import::execute(
            &store,
            &scope(),
            vec![UnitRecord::new(format!("R{i}-1"))],
            ImportStrategy::Append,
            meta(1),
            &ImportOptions::default(),
        )
        .unwrap();
    }
    let manifests = store.list_manifests(&scope()).unwrap();
    assert_eq!(manifests.len(), 3);
    let versions: Vec<u64> = manifests.iter().map(|m| m.version_number).collect();
    assert_eq!(versions, vec![1, 2, 3]);
    assert_eq!(manifests.iter().filter(|m| m.is_active).count(), 1);
    assert_eq!(store.active_manifest(&scope()).unwrap().unwrap().version_number, 3);
}

/// Store wrapper that fails inserts for one designated unit number.
struct FlakyStore {
    inner: MemoryStore,
    poison: String,
}

impl UnitStore for FlakyStore {
    fn list_units(&self, s: &Scope) -> Result<Vec<UnitRecord>, StoreError> {
        self.inner.list_units(s)
    }
    fn count_units(&self, s: &Scope) -> Result<usize, StoreError> {
        self.inner.count_units(s)
    }
    fn find_unit(&self, s: &Scope, n: &str) -> Result<Option<UnitRecord>, StoreError> {
        self.inner.find_unit(s, n)
    }
    fn insert_unit(&self, s: &Scope, r: UnitRecord) -> Result<(), StoreError> {
        if r.unit_number == self.poison {
            return Err(StoreError::Backend("write refused".into()));
        }
        self.inner.insert_unit(s, r)
    }
    fn update_unit(&self, s: &Scope, r: UnitRecord) -> Result<(), StoreError> {
        self.inner.update_unit(s, r)
    }
    fn replace_units(&self, s: &Scope, r: Vec<UnitRecord>) -> Result<usize, StoreError> {
        self.inner.replace_units(s, r)
    }
    fn list_manifests(&self, s: &Scope) -> Result<Vec<unitgrid::ImportManifest>, StoreError> {
        self.inner.list_manifests(s)
    }
    fn active_manifest(&self, s: &Scope) -> Result<Option<unitgrid::ImportManifest>, StoreError> {
        self.inner.active_manifest(s)
    }
    fn activate_manifest(
        &self,
        s: &Scope,
        m: unitgrid::ImportManifest,
    ) -> Result<unitgrid::ImportManifest, StoreError> {
        self.inner.activate_manifest(s, m)
    }
}

#[test]
fn merge_collects_row_errors_and_continues() {
    let store = FlakyStore { inner: MemoryStore::new(), poison: "B-2".to_string() };
    let manifest = import::execute(
        &store,
        &scope(),
        records(&["B-1", "B-2", "B-3"]),
        ImportStrategy::Merge,
        meta(3),
        &ImportOptions::default(),
    )
    .unwrap();
    assert_eq!(manifest.created, 2);
    assert_eq!(manifest.errors.len(), 1);
    assert_eq!(manifest.errors[0].row, 1);
    assert_eq!(manifest.errors[0].unit_number, "B-2");
    assert_eq!(store.count_units(&scope()).unwrap(), 2);
}

#[test]
fn row_errors_land_in_the_sidecar_file() {
    let dir = tempfile::tempdir().unwrap();
    let sidecar = dir.path().join("errors.ndjson");
    let store = FlakyStore { inner: MemoryStore::new(), poison: "B-2".to_string() };
    let opts = ImportOptions { error_sidecar: Some(sidecar.clone()), ..ImportOptions::default() };
    import::execute(
        &store,
        &scope(),
        records(&["B-1", "B-2"]),
        ImportStrategy::Append,
        meta(2),
        &opts,
    )
    .unwrap();
    let contents = std::fs::read_to_string(&sidecar).unwrap();
    assert!(contents.contains("B-2"));
    assert!(contents.contains("write refused"));
}
