//! MergeService: orchestrates sources and deserializes to MvcConfig.

use crate::config::sources::{environment, global_file};
use crate::config::MvcConfig;
use crate::error::Result;
use config::{File, FileFormat};
use std::path::Path;

use super::builder_with_defaults;

/// Merge service for config composition.
pub struct MergeService;

impl MergeService {
    /// Precedence: defaults (lowest) -> global file -> environment (highest).
    pub fn load() -> Result<MvcConfig> {
        let builder = builder_with_defaults()?;
        let builder = global_file::add_to_builder(builder)?;
        let builder = environment::add_to_builder(builder)?;

        let config = builder.build()?;
        Ok(config.try_deserialize()?)
    }

    /// The explicit file replaces the global file; environment still wins.
    pub fn load_from_file(path: &Path) -> Result<MvcConfig> {
        let builder = builder_with_defaults()?;
        let builder = builder.add_source(
            File::from(path.to_path_buf())
                .format(FileFormat::Toml)
                .required(true),
        );
        let builder = environment::add_to_builder(builder)?;

        let config = builder.build()?;
        Ok(config.try_deserialize()?)
    }
}
