//! Configuration: base path and logging, layered with the `config` crate.
//!
//! Precedence, lowest to highest: built-in defaults, global file
//! (`$XDG_CONFIG_HOME/minivc/config.toml`) or an explicit `--config` file,
//! `MINIVC_*` environment variables, then CLI overrides applied by the caller.

mod facade;
mod merge;
mod paths;
mod sources;

pub use facade::ConfigLoader;
pub use paths::xdg_root as xdg;

use crate::logging::LoggingConfig;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

pub(crate) const DEFAULT_BASE_PATH: &str = "mvc-files";

fn default_base_path() -> PathBuf {
    PathBuf::from(DEFAULT_BASE_PATH)
}

/// Effective configuration for one invocation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MvcConfig {
    /// Directory holding every project
    #[serde(default = "default_base_path")]
    pub base_path: PathBuf,

    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Default for MvcConfig {
    fn default() -> Self {
        Self {
            base_path: default_base_path(),
            logging: LoggingConfig::default(),
        }
    }
}
