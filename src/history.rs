//! History assembly over version records.
//!
//! Pure transformations: callers supply a loader that resolves a tier to its
//! `VersionRecord`, so the walk can be tested without a filesystem.

use crate::error::Result;
use crate::record::VersionRecord;
use crate::types::{FileId, Tier};

pub const DEV_HEADING: &str = "# development version";
pub const STABLE_HEADING: &str = "# stable version";
pub const RELEASE_HEADING: &str = "# Release version";

/// Description lines of the pending dev tiers, newest submit first.
pub fn dev_history<F>(id: &FileId, load: &mut F) -> Result<Vec<String>>
where
    F: FnMut(Tier) -> Result<VersionRecord>,
{
    let mut lines = Vec::new();
    for submit in (1..=id.submit).rev() {
        lines.extend(load(Tier::Dev(submit))?.description);
    }
    Ok(lines)
}

/// Full changelog as seen from `id`: dev segment, stable segment, releases.
///
/// The stable segment is skipped for a release head (`save == 0`,
/// `release > 0`), whose stable tier holds nothing that belongs to it.
pub fn changelog<F>(id: &FileId, mut load: F) -> Result<Vec<String>>
where
    F: FnMut(Tier) -> Result<VersionRecord>,
{
    let mut md = Vec::new();
    if id.submit > 0 {
        md.push(DEV_HEADING.to_string());
        md.extend(dev_history(id, &mut load)?);
    }

    if id.save > 0 || id.release == 0 {
        if id.save > 0 {
            md.push(STABLE_HEADING.to_string());
        }
        md.extend(load(Tier::Stable)?.description);
    }

    if id.release > 0 {
        md.push(RELEASE_HEADING.to_string());
        for release in (1..=id.release).rev() {
            md.extend(load(Tier::Release(release))?.description);
        }
    }
    Ok(md)
}
