pub mod service;

use super::DEFAULT_BASE_PATH;
use config::builder::DefaultState;
use config::{ConfigBuilder, ConfigError};

/// Builder seeded with the defaults every layer is merged over.
pub(crate) fn builder_with_defaults() -> Result<ConfigBuilder<DefaultState>, ConfigError> {
    config::Config::builder().set_default("base_path", DEFAULT_BASE_PATH)
}
