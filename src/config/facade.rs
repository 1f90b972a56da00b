//! ConfigLoader facade delegating to the merge service.

use super::merge::service::MergeService;
use super::MvcConfig;
use crate::error::Result;
use std::path::Path;

/// Configuration loader facade.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration from the global file and environment.
    pub fn load() -> Result<MvcConfig> {
        MergeService::load()
    }

    /// Load configuration from a specific file with environment overlay.
    pub fn load_from_file(path: &Path) -> Result<MvcConfig> {
        MergeService::load_from_file(path)
    }

    /// Render the effective configuration as TOML.
    pub fn render(config: &MvcConfig) -> Result<String> {
        toml::to_string_pretty(config).map_err(|e| {
            crate::error::MvcError::ConfigError(format!("Failed to serialize config: {}", e))
        })
    }
}
