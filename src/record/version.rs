use super::JsonRecord;
use crate::types::FileId;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Per-tier metadata.
///
/// `include` maps a filename to the tier that physically holds its bytes.
/// A file physically present in the tier directory takes precedence over an
/// `include` entry of the same name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VersionRecord {
    #[serde(default)]
    pub description: Vec<String>,
    #[serde(default)]
    pub include: BTreeMap<String, FileId>,
}

impl VersionRecord {
    pub fn new(description: Vec<String>) -> Self {
        Self {
            description,
            include: BTreeMap::new(),
        }
    }

    /// Tag every physically present file with `owner`, the tier that holds it.
    pub fn reference_files<'a>(&mut self, files: impl IntoIterator<Item = &'a String>, owner: FileId) {
        for file in files {
            self.include.insert(file.clone(), owner);
        }
    }
}

impl JsonRecord for VersionRecord {}
