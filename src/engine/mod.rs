//! Version-lineage engine.
//!
//! `Repository` is the per-invocation context: one base path holding every
//! project and one user path acting as the workspace. Promotion
//! (`submit`/`remove`/`save`/`release`) and materialization
//! (`load`/`review` and their finalizers) are implemented in submodules.

mod materialize;
mod promotion;

use crate::error::{MvcError, Result};
use crate::fsops;
use crate::history;
use crate::layout::{self, ProjectLayout};
use crate::record::{JsonRecord, ProjectRecord, VersionRecord, WorkspaceRecord};
use crate::types::{FileId, Tier};
use std::collections::{BTreeMap, BTreeSet};
use std::path::{Component, Path, PathBuf};

/// Execution context binding a repository base path and a workspace path.
#[derive(Debug, Clone)]
pub struct Repository {
    base_path: PathBuf,
    user_path: PathBuf,
}

impl Repository {
    /// Open the repository rooted at `base_path` for the workspace `user_path`.
    pub fn open(base_path: impl Into<PathBuf>, user_path: impl Into<PathBuf>) -> Result<Self> {
        let base_path = base_path.into();
        if !base_path.is_dir() {
            return Err(MvcError::InvalidBasePath(base_path));
        }
        Ok(Self {
            base_path,
            user_path: user_path.into(),
        })
    }

    pub fn base_path(&self) -> &Path {
        &self.base_path
    }

    pub fn user_path(&self) -> &Path {
        &self.user_path
    }

    /// Create a new project and bind the workspace to it.
    pub fn create(&self, name: &str) -> Result<ProjectRecord> {
        validate_project_name(name)?;
        let layout = ProjectLayout::new(&self.base_path, name);
        if layout.root().exists() {
            return Err(MvcError::ProjectAlreadyExists(name.to_string()));
        }
        fsops::create_dir_all(layout.root())?;

        let project = ProjectRecord::new(name);
        project.save(layout.root())?;

        let version = VersionRecord::new(vec![
            entry_header(&project.id),
            format!("{} was created", name),
            current_timestamp(),
        ]);
        let stable_dir = layout.tier_dir(&project.id);
        fsops::create_dir_all(&stable_dir)?;
        version.save(&stable_dir)?;

        WorkspaceRecord::new(name).save(&self.user_path)?;
        tracing::info!(project = name, "Created project");
        Ok(project)
    }

    /// Every project under the base path with its live identifier.
    pub fn list_projects(&self) -> Result<BTreeMap<String, FileId>> {
        let entries = std::fs::read_dir(&self.base_path)
            .map_err(|e| MvcError::io(&self.base_path, e))?;
        let mut projects = BTreeMap::new();
        for entry in entries {
            let entry = match entry {
                Ok(e) => e,
                Err(e) => {
                    tracing::warn!(
                        "Failed to read directory entry in {}: {}",
                        self.base_path.display(),
                        e
                    );
                    continue;
                }
            };
            let path = entry.path();
            if !path.is_dir() {
                continue;
            }
            if !ProjectRecord::exists(&path) {
                tracing::warn!("Skipping {}: no project record", path.display());
                continue;
            }
            match ProjectRecord::load(&path) {
                Ok(project) => {
                    projects.insert(project.name, project.id);
                }
                Err(e) => tracing::warn!("Skipping unreadable project {}: {}", path.display(), e),
            }
        }
        Ok(projects)
    }

    /// Description lines of the pending dev submits, newest first.
    pub fn status(&self) -> Result<Vec<String>> {
        let (project, layout) = self.bound_project()?;
        history::dev_history(&project.id, &mut |tier| load_tier(&layout, tier))
    }

    /// Files reachable from the live head: physical files plus `include` keys.
    pub fn contents(&self) -> Result<Vec<String>> {
        let (project, layout) = self.bound_project()?;
        let head_dir = layout.tier_dir(&project.id);
        let version = VersionRecord::load(&head_dir)?;
        let mut files: BTreeSet<String> = fsops::list_files(&head_dir)?.into_iter().collect();
        files.extend(version.include.into_keys());
        Ok(files.into_iter().collect())
    }

    /// Workspace files that are new or whose mtime differs from the last submit.
    pub fn changes(&self) -> Result<Vec<String>> {
        let (project, _) = self.bound_project()?;
        let mut changed = Vec::new();
        for file in fsops::list_files(&self.user_path)? {
            let mtime = fsops::mtime_nanos(&self.user_path.join(&file))?;
            match project.timestamps.get(&file) {
                Some(recorded) if *recorded == mtime => {}
                _ => changed.push(file),
            }
        }
        Ok(changed)
    }

    fn workspace(&self) -> Result<WorkspaceRecord> {
        if !WorkspaceRecord::exists(&self.user_path) {
            return Err(MvcError::NoWorkspace(self.user_path.clone()));
        }
        WorkspaceRecord::load(&self.user_path)
    }

    fn project(&self, name: &str) -> Result<(ProjectRecord, ProjectLayout)> {
        if validate_project_name(name).is_err() {
            return Err(MvcError::InvalidProject(name.to_string()));
        }
        let layout = ProjectLayout::new(&self.base_path, name);
        if !ProjectRecord::exists(layout.root()) {
            return Err(MvcError::InvalidProject(name.to_string()));
        }
        let project = ProjectRecord::load(layout.root()).map_err(|e| {
            tracing::warn!("Failed to load project {}: {}", name, e);
            MvcError::InvalidProject(name.to_string())
        })?;
        Ok((project, layout))
    }

    fn bound_project(&self) -> Result<(ProjectRecord, ProjectLayout)> {
        let workspace = self.workspace()?;
        self.project(&workspace.project)
    }
}

fn load_tier(layout: &ProjectLayout, tier: Tier) -> Result<VersionRecord> {
    VersionRecord::load(&layout.root().join(layout::tier_path(tier)))
}

/// A project name must be exactly one normal path component.
fn validate_project_name(name: &str) -> Result<()> {
    let mut components = Path::new(name).components();
    match (components.next(), components.next()) {
        (Some(Component::Normal(_)), None) if !name.is_empty() => Ok(()),
        _ => Err(MvcError::InvalidProjectName(name.to_string())),
    }
}

/// A tracked file name must be one normal path component that is not reserved.
fn validate_file_name(name: &str) -> Result<()> {
    let mut components = Path::new(name).components();
    match (components.next(), components.next()) {
        (Some(Component::Normal(_)), None)
            if !name.contains(std::path::is_separator) && !layout::is_reserved(name) =>
        {
            Ok(())
        }
        _ => Err(MvcError::InvalidFileName(name.to_string())),
    }
}

fn validate_file_names(files: &[String]) -> Result<()> {
    files.iter().try_for_each(|f| validate_file_name(f))
}

fn entry_header(id: &FileId) -> String {
    format!("## {}", id)
}

fn current_timestamp() -> String {
    chrono::Local::now().format("%d/%m/%Y %H:%M:%S").to_string()
}
