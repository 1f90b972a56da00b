//! Materialization plans.
//!
//! A `Recipe` is computed without touching the workspace and applied only
//! once the caller confirms it.

use crate::error::{MvcError, Result};
use crate::fsops;
use crate::layout::{ProjectLayout, CHANGELOG_FILE};
use crate::types::FileId;
use serde::Serialize;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// Back-reference to a file whose bytes live in another tier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileRef {
    pub owner: FileId,
    pub filename: String,
}

impl FileRef {
    pub fn new(owner: FileId, filename: impl Into<String>) -> Self {
        Self {
            owner,
            filename: filename.into(),
        }
    }

    /// Directory that physically holds the referenced bytes.
    pub fn source_dir(&self, layout: &ProjectLayout) -> PathBuf {
        layout.tier_dir(&self.owner)
    }

    pub fn source_path(&self, layout: &ProjectLayout) -> PathBuf {
        self.source_dir(layout).join(&self.filename)
    }
}

/// Which `include` entries a plan may follow.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IncludePolicy {
    /// Only entries owned by release-era tiers; used by `load`, which never
    /// reads from transient dev storage.
    ReleaseBacked,
    /// Any tier, including transient dev tiers; used by `review`.
    AnyTier,
}

impl IncludePolicy {
    pub fn admits(&self, owner: &FileId) -> bool {
        match self {
            IncludePolicy::ReleaseBacked => owner.release > 0 && owner.submit == 0,
            IncludePolicy::AnyTier => true,
        }
    }
}

/// Computed plan: files to copy in (with source directory) and files to drop.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Recipe {
    pub project_name: String,
    pub changelog: Vec<String>,
    pub files_to_add: BTreeMap<String, PathBuf>,
    pub files_to_remove: Vec<String>,
}

impl Recipe {
    pub fn is_empty(&self) -> bool {
        self.files_to_add.is_empty() && self.files_to_remove.is_empty()
    }
}

/// Resolve a tier's contents to `filename -> source directory`.
///
/// Admitted `include` entries resolve through their owner tier; a file
/// physically present in `tier_dir` always wins over an `include` entry.
pub fn resolve_sources(
    layout: &ProjectLayout,
    tier_dir: &Path,
    physical: &[String],
    include: &BTreeMap<String, FileId>,
    policy: IncludePolicy,
) -> BTreeMap<String, PathBuf> {
    let mut sources = BTreeMap::new();
    for (file, owner) in include {
        if !policy.admits(owner) {
            tracing::debug!("Skipping {} held by transient {}", file, owner);
            continue;
        }
        let file_ref = FileRef::new(*owner, file.clone());
        sources.insert(file.clone(), file_ref.source_dir(layout));
    }
    for file in physical {
        sources.insert(file.clone(), tier_dir.to_path_buf());
    }
    sources
}

/// Copy every planned file into `workspace` and drop the planned removals.
pub fn apply_files(recipe: &Recipe, workspace: &Path) -> Result<()> {
    for (file, source_dir) in &recipe.files_to_add {
        fsops::copy_preserving_mtime(&source_dir.join(file), &workspace.join(file))?;
    }
    for file in &recipe.files_to_remove {
        fsops::remove_file(&workspace.join(file))?;
    }
    Ok(())
}

/// Write the changelog lines into `dir/changelog.md`.
pub fn write_changelog(dir: &Path, lines: &[String]) -> Result<()> {
    let path = dir.join(CHANGELOG_FILE);
    let mut content = String::new();
    for line in lines {
        content.push_str(line);
        content.push('\n');
    }
    std::fs::write(&path, content).map_err(|e| MvcError::io(&path, e))
}
