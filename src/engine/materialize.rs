//! Materialization: compute a `Recipe` for a version, then apply it.

use super::{load_tier, Repository};
use crate::error::{MvcError, Result};
use crate::fsops;
use crate::history;
use crate::layout::ProjectLayout;
use crate::record::{JsonRecord, VersionRecord, WorkspaceRecord};
use crate::recipe::{self, IncludePolicy, Recipe};
use crate::types::FileId;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

impl Repository {
    /// Plan loading `project_name` into the workspace.
    ///
    /// `release` selects a numbered release; `None` (or `Some(0)`) selects
    /// the saved head. Nothing is written until [`Repository::load_finalize`].
    pub fn load(&self, project_name: &str, release: Option<u32>) -> Result<Recipe> {
        let (project, layout) = self.project(project_name)?;
        let target = match release {
            Some(n) if n > 0 => FileId::release_head(n),
            _ => project.id.without_submits(),
        };
        let tier_dir = layout.tier_dir(&target);
        if !tier_dir.is_dir() {
            return Err(MvcError::InvalidVersion(format!("{} of {}", target, project.name)));
        }

        let files_to_add = plan_tier(&layout, &tier_dir, IncludePolicy::ReleaseBacked)?;
        let changelog = history::changelog(&target, |tier| load_tier(&layout, tier))?;
        tracing::debug!(project = %project.name, id = %target, files = files_to_add.len(), "Planned load");
        Ok(Recipe {
            project_name: project.name,
            changelog,
            files_to_add,
            files_to_remove: Vec::new(),
        })
    }

    /// Apply a load recipe and bind the workspace to its project.
    pub fn load_finalize(&self, recipe: &Recipe) -> Result<()> {
        recipe::apply_files(recipe, &self.user_path)?;
        recipe::write_changelog(&self.user_path, &recipe.changelog)?;
        WorkspaceRecord::new(recipe.project_name.clone()).save(&self.user_path)?;
        tracing::info!(project = %recipe.project_name, files = recipe.files_to_add.len(), "Loaded project");
        Ok(())
    }

    /// Plan materializing the newest dev tier of the bound project.
    pub fn review(&self) -> Result<Recipe> {
        let (project, layout) = self.bound_project()?;
        if project.id.submit == 0 {
            return Err(MvcError::NoSubmits);
        }
        let dev_dir = layout.tier_dir(&project.id);
        if !dev_dir.is_dir() {
            return Err(MvcError::InvalidVersion(format!("{} of {}", project.id, project.name)));
        }

        let files_to_add = plan_tier(&layout, &dev_dir, IncludePolicy::AnyTier)?;
        let changelog = history::changelog(&project.id, |tier| load_tier(&layout, tier))?;
        tracing::debug!(project = %project.name, id = %project.id, files = files_to_add.len(), "Planned review");
        Ok(Recipe {
            project_name: project.name,
            changelog,
            files_to_add,
            files_to_remove: Vec::new(),
        })
    }

    /// Apply a review recipe; the workspace binding is left unchanged.
    pub fn review_finalize(&self, recipe: &Recipe) -> Result<()> {
        recipe::apply_files(recipe, &self.user_path)?;
        recipe::write_changelog(&self.user_path, &recipe.changelog)?;
        tracing::info!(project = %recipe.project_name, files = recipe.files_to_add.len(), "Reviewed submits");
        Ok(())
    }
}

fn plan_tier(
    layout: &ProjectLayout,
    tier_dir: &Path,
    policy: IncludePolicy,
) -> Result<BTreeMap<String, PathBuf>> {
    let version = VersionRecord::load(tier_dir)?;
    let physical = fsops::list_files(tier_dir)?;
    Ok(recipe::resolve_sources(
        layout,
        tier_dir,
        &physical,
        &version.include,
        policy,
    ))
}
