//! Storage layout: pure path rules mapping identifiers to tier directories.
//!
//! A project root looks like:
//! ```text
//! <base>/<project>/
//!   .mvc                 project record
//!   versions/
//!     latest/            stable tier
//!       .mvc             version record
//!     ver1/ ... verN/    release tiers
//!   temp/
//!     sub1/ ... subN/    dev tiers, purged by save
//! ```

use crate::types::{FileId, Tier};
use std::path::{Path, PathBuf};

/// Metadata file name used for project, version and workspace records.
pub const METADATA_FILE: &str = ".mvc";

/// Generated changelog file written into workspaces.
pub const CHANGELOG_FILE: &str = "changelog.md";

const TEMP_DIR: &str = "temp";
const VERSIONS_DIR: &str = "versions";
const STABLE_DIR: &str = "latest";

/// Names that directory listings never report as tracked files.
pub fn is_reserved(name: &str) -> bool {
    name == METADATA_FILE || name == CHANGELOG_FILE
}

pub fn submit_path(submit: u32) -> PathBuf {
    Path::new(TEMP_DIR).join(format!("sub{}", submit))
}

pub fn stable_path() -> PathBuf {
    Path::new(VERSIONS_DIR).join(STABLE_DIR)
}

pub fn release_path(release: u32) -> PathBuf {
    Path::new(VERSIONS_DIR).join(format!("ver{}", release))
}

pub fn tier_path(tier: Tier) -> PathBuf {
    match tier {
        Tier::Dev(n) => submit_path(n),
        Tier::Stable => stable_path(),
        Tier::Release(n) => release_path(n),
    }
}

/// Project-relative directory holding the tier addressed by `id`.
pub fn sub_path(id: &FileId) -> PathBuf {
    tier_path(id.tier())
}

/// Absolute paths for one project root.
#[derive(Debug, Clone)]
pub struct ProjectLayout {
    root: PathBuf,
}

impl ProjectLayout {
    pub fn new(base_path: &Path, project_name: &str) -> Self {
        Self {
            root: base_path.join(project_name),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn tier_dir(&self, id: &FileId) -> PathBuf {
        self.root.join(sub_path(id))
    }

    pub fn stable_dir(&self) -> PathBuf {
        self.root.join(stable_path())
    }

    pub fn release_dir(&self, release: u32) -> PathBuf {
        self.root.join(release_path(release))
    }

    pub fn submit_dir(&self, submit: u32) -> PathBuf {
        self.root.join(submit_path(submit))
    }

    pub fn temp_dir(&self) -> PathBuf {
        self.root.join(TEMP_DIR)
    }
}
