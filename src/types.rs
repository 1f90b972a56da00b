//! Core identifier types for the version-tracking engine.

use serde::{Deserialize, Serialize};
use std::fmt;

/// FileId: `(release, save, submit)` triple naming the tier a revision lives in.
///
/// Field order gives the derived `Ord` its lexicographic meaning: a later
/// release always sorts after any save or submit of an earlier one.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct FileId {
    pub release: u32,
    pub save: u32,
    pub submit: u32,
}

/// Tier: which directory class holds a revision's bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Tier {
    /// Work-in-progress snapshot `temp/sub<n>`
    Dev(u32),
    /// Stable snapshot `versions/latest`
    Stable,
    /// Immutable snapshot `versions/ver<n>`
    Release(u32),
}

impl FileId {
    pub fn new(release: u32, save: u32, submit: u32) -> Self {
        Self {
            release,
            save,
            submit,
        }
    }

    /// Identifier of release `n` with no stable or dev activity on top of it.
    pub fn release_head(release: u32) -> Self {
        Self::new(release, 0, 0)
    }

    /// Resolve which tier this identifier addresses.
    ///
    /// `submit` dominates, then `save`, then `release`; the all-zero
    /// identifier is the bootstrap stable tier.
    pub fn tier(&self) -> Tier {
        if self.submit > 0 {
            Tier::Dev(self.submit)
        } else if self.save > 0 {
            Tier::Stable
        } else if self.release > 0 {
            Tier::Release(self.release)
        } else {
            Tier::Stable
        }
    }

    /// The same identifier with pending dev submits dropped.
    pub fn without_submits(&self) -> Self {
        Self {
            submit: 0,
            ..*self
        }
    }
}

impl fmt::Display for FileId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "v{}.{}.{}", self.release, self.save, self.submit)
    }
}
