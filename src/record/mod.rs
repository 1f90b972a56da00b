//! Persisted records: project, version and workspace metadata.
//!
//! Each record lives in a `.mvc` JSON file inside the directory it describes.

mod project;
mod version;
mod workspace;

pub use project::ProjectRecord;
pub use version::VersionRecord;
pub use workspace::WorkspaceRecord;

use crate::error::{MvcError, Result};
use crate::layout::METADATA_FILE;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::path::{Path, PathBuf};

/// JSON persistence shared by every record kind.
pub trait JsonRecord: Serialize + DeserializeOwned {
    fn metadata_path(dir: &Path) -> PathBuf {
        dir.join(METADATA_FILE)
    }

    fn exists(dir: &Path) -> bool {
        Self::metadata_path(dir).is_file()
    }

    fn load(dir: &Path) -> Result<Self> {
        let path = Self::metadata_path(dir);
        let content = std::fs::read_to_string(&path).map_err(|e| MvcError::io(&path, e))?;
        serde_json::from_str(&content).map_err(|source| MvcError::Serialization { path, source })
    }

    fn save(&self, dir: &Path) -> Result<()> {
        let path = Self::metadata_path(dir);
        let content = serde_json::to_string_pretty(self).map_err(|source| {
            MvcError::Serialization {
                path: path.clone(),
                source,
            }
        })?;
        std::fs::write(&path, content).map_err(|e| MvcError::io(&path, e))
    }
}
