use super::JsonRecord;
use serde::{Deserialize, Serialize};

/// Binds a user directory to exactly one project.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkspaceRecord {
    pub project: String,
}

impl WorkspaceRecord {
    pub fn new(project: impl Into<String>) -> Self {
        Self {
            project: project.into(),
        }
    }
}

impl JsonRecord for WorkspaceRecord {}
