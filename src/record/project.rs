use super::JsonRecord;
use crate::types::FileId;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Per-project metadata: the live identifier cursor and submit-time mtimes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectRecord {
    pub name: String,
    pub id: FileId,
    /// Workspace mtime (ns since epoch) each file had when last submitted.
    #[serde(default)]
    pub timestamps: BTreeMap<String, i64>,
}

impl ProjectRecord {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            id: FileId::default(),
            timestamps: BTreeMap::new(),
        }
    }
}

impl JsonRecord for ProjectRecord {}
