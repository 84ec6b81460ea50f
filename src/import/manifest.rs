//! Versioned record of one import operation. Exactly one manifest per
//! project is active at a time; the UI re-renders tables from the
//! persisted column mapping without re-parsing the source file.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::options::{ImportStrategy, RowError};
use crate::classify::display::ColumnDisplay;
use crate::store::Scope;

/// Detected columns plus the derived display schema, persisted verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnMapping {
    pub columns: Vec<String>,
    pub display_config: Vec<ColumnDisplay>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImportManifest {
    pub id: Uuid,
    pub organization_id: String,
    pub project_id: String,
    pub strategy: ImportStrategy,
    pub source_file: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stored_file_url: Option<String>,
    pub column_mapping: ColumnMapping,
    pub total_rows: usize,
    pub valid_rows: usize,
    pub created: usize,
    pub updated: usize,
    pub errors: Vec<RowError>,
    /// Assigned by the store on activation, monotonic per project.
    pub version_number: u64,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

impl ImportManifest {
    /// A manifest awaiting activation; the store assigns `version_number`
    /// and flips `is_active`.
    #[must_use]
    pub fn new(
        scope: &Scope,
        strategy: ImportStrategy,
        source_file: impl Into<String>,
        column_mapping: ColumnMapping,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            organization_id: scope.organization_id.clone(),
            project_id: scope.project_id.clone(),
            strategy,
            source_file: source_file.into(),
            stored_file_url: None,
            column_mapping,
            total_rows: 0,
            valid_rows: 0,
            created: 0,
            updated: 0,
            errors: Vec::new(),
            version_number: 0,
            is_active: false,
            created_at: Utc::now(),
        }
    }
}
