//! Promotion: submit, remove, save and release transitions.

use super::{entry_header, load_tier, validate_file_names, Repository};
use crate::error::{MvcError, Result};
use crate::fsops;
use crate::history;
use crate::layout::ProjectLayout;
use crate::record::{JsonRecord, ProjectRecord, VersionRecord};
use crate::recipe::FileRef;
use crate::types::{FileId, Tier};
use std::collections::BTreeSet;
use std::path::Path;

impl Repository {
    /// Snapshot `files` from the workspace into a new dev tier.
    pub fn submit(&self, files: &[String], description: &str) -> Result<FileId> {
        let (mut project, layout) = self.bound_project()?;
        validate_file_names(files)?;
        if let Some(missing) = files.iter().find(|f| !self.user_path.join(f).is_file()) {
            return Err(MvcError::FileNotInWorkspace(missing.clone()));
        }

        let mut version = snapshot_head(&project, &layout)?;
        for file in files {
            version.include.remove(file);
        }

        project.id.submit += 1;
        let dev_dir = layout.tier_dir(&project.id);
        let timestamps = match self.fill_dev_tier(&dev_dir, files) {
            Ok(timestamps) => timestamps,
            Err(e) => {
                fsops::remove_tree(&dev_dir)?;
                return Err(e);
            }
        };
        project.timestamps.extend(timestamps);

        let mut lines = vec![
            entry_header(&project.id),
            description.to_string(),
            "### Submitted files:".to_string(),
        ];
        lines.extend(files.iter().map(|f| format!(" + {}", f)));
        version.description = lines;

        version.save(&dev_dir)?;
        project.save(layout.root())?;
        tracing::info!(project = %project.name, id = %project.id, files = files.len(), "Submitted files");
        Ok(project.id)
    }

    /// Record the removal of `files` as a new dev tier and delete them from the workspace.
    pub fn remove(&self, files: &[String], description: &str) -> Result<FileId> {
        let (mut project, layout) = self.bound_project()?;
        validate_file_names(files)?;

        let mut version = snapshot_head(&project, &layout)?;
        for file in files {
            version.include.remove(file);
            project.timestamps.remove(file);
            let path = self.user_path.join(file);
            if path.is_file() {
                fsops::remove_file(&path)?;
            } else {
                tracing::warn!("{} is not in the workspace, recording removal only", file);
            }
        }

        project.id.submit += 1;
        let dev_dir = layout.tier_dir(&project.id);
        fsops::remove_tree(&dev_dir)?;
        fsops::create_dir_all(&dev_dir)?;

        let mut lines = vec![
            entry_header(&project.id),
            description.to_string(),
            "### Removed files:".to_string(),
        ];
        lines.extend(files.iter().map(|f| format!(" - {}", f)));
        version.description = lines;

        version.save(&dev_dir)?;
        project.save(layout.root())?;
        tracing::info!(project = %project.name, id = %project.id, files = files.len(), "Removed files");
        Ok(project.id)
    }

    /// Copy `files` from the workspace into a fresh `dev_dir`, returning their mtimes.
    ///
    /// Leftovers from an earlier failed submit are cleared first.
    fn fill_dev_tier(&self, dev_dir: &Path, files: &[String]) -> Result<Vec<(String, i64)>> {
        fsops::remove_tree(dev_dir)?;
        fsops::create_dir_all(dev_dir)?;
        files
            .iter()
            .map(|file| {
                let src = self.user_path.join(file);
                fsops::copy_preserving_mtime(&src, &dev_dir.join(file))?;
                Ok((file.clone(), fsops::mtime_nanos(&src)?))
            })
            .collect()
    }

    /// Fold the pending dev tiers into the stable tier and purge `temp/`.
    pub fn save(&self, description: &str) -> Result<FileId> {
        let (mut project, layout) = self.bound_project()?;
        if project.id.submit == 0 {
            return Err(MvcError::NoSubmits);
        }
        let collected = project.id;

        let dev_dir = layout.tier_dir(&collected);
        let dev_version = VersionRecord::load(&dev_dir)?;
        let dev_files = fsops::list_files(&dev_dir)?;
        let stable_dir = layout.stable_dir();
        let mut stable_version = VersionRecord::load(&stable_dir)?;
        let stable_files = fsops::list_files(&stable_dir)?;

        let check_files: BTreeSet<&String> =
            dev_files.iter().chain(dev_version.include.keys()).collect();

        stable_version.include.retain(|file, owner| {
            let keep = check_files.contains(file);
            if !keep {
                tracing::debug!("Pruning {} (held by {}) from stable", file, owner);
            }
            keep
        });
        for file in stable_files.iter().filter(|f| !check_files.contains(f)) {
            fsops::remove_file(&stable_dir.join(file))?;
        }

        for file in &dev_files {
            fsops::copy_preserving_mtime(&dev_dir.join(file), &stable_dir.join(file))?;
            stable_version.include.remove(file);
        }
        for (file, owner) in &dev_version.include {
            match owner.tier() {
                Tier::Dev(_) => {
                    // temp/ is purged below, so bytes held by older submits move now
                    let file_ref = FileRef::new(*owner, file.clone());
                    fsops::copy_preserving_mtime(
                        &file_ref.source_path(&layout),
                        &stable_dir.join(file),
                    )?;
                    stable_version.include.remove(file);
                }
                Tier::Release(_) => {
                    stable_version.include.insert(file.clone(), *owner);
                }
                Tier::Stable => {}
            }
        }

        project.id.save += 1;
        project.id.submit = 0;

        let mut lines = vec![entry_header(&project.id), description.to_string()];
        lines.extend(history::dev_history(&collected, &mut |tier| {
            load_tier(&layout, tier)
        })?);
        lines.append(&mut stable_version.description);
        stable_version.description = lines;
        stable_version.save(&stable_dir)?;

        fsops::remove_tree(&layout.temp_dir())?;
        project.save(layout.root())?;
        tracing::info!(project = %project.name, id = %project.id, submits = collected.submit, "Saved stable version");
        Ok(project.id)
    }

    /// Freeze the stable tier as the next numbered release.
    pub fn release(&self, description: &str) -> Result<FileId> {
        let (mut project, layout) = self.bound_project()?;
        if project.id.submit > 0 {
            return Err(MvcError::UnsavedSubmits);
        }
        let head = project.id;

        let stable_dir = layout.stable_dir();
        let mut outgoing = VersionRecord::load(&stable_dir)?;
        let stable_files = fsops::list_files(&stable_dir)?;

        if head.save == 0 && head.release > 0 {
            // nothing saved since the previous release: carry it forward by reference
            let previous_dir = layout.release_dir(head.release);
            let previous = VersionRecord::load(&previous_dir)?;
            for (file, owner) in previous.include {
                outgoing.include.entry(file).or_insert(owner);
            }
            for file in fsops::list_files(&previous_dir)? {
                outgoing.include.entry(file).or_insert(head);
            }
        }

        project.id.release += 1;
        project.id.save = 0;
        outgoing.reference_files(&stable_files, project.id);

        let mut lines = vec![entry_header(&project.id), description.to_string()];
        lines.append(&mut outgoing.description);
        outgoing.description = lines;
        outgoing.save(&stable_dir)?;

        let release_dir = layout.release_dir(project.id.release);
        fsops::rename(&stable_dir, &release_dir)?;
        fsops::create_dir_all(&stable_dir)?;
        VersionRecord::default().save(&stable_dir)?;

        project.save(layout.root())?;
        tracing::info!(project = %project.name, id = %project.id, "Released version");
        Ok(project.id)
    }
}

/// Load the version at the live head and reference its physical files.
///
/// Each physical file is tagged with the project's current identifier, so
/// the next dev tier can still reach bytes it does not copy.
fn snapshot_head(project: &ProjectRecord, layout: &ProjectLayout) -> Result<VersionRecord> {
    let head_dir = layout.tier_dir(&project.id);
    if !head_dir.is_dir() {
        return Err(MvcError::InvalidVersion(format!(
            "{} of {} has no directory",
            project.id, project.name
        )));
    }
    let mut version = VersionRecord::load(&head_dir)?;
    let files = fsops::list_files(&head_dir)?;
    version.reference_files(&files, project.id);
    Ok(version)
}
