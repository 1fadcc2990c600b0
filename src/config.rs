//! Configuration System
//!
//! Settings for the `layertree` tool itself (not the trees it loads). Sources are
//! layered with the `config` crate, later sources overriding earlier ones:
//!
//! 1. built-in defaults
//! 2. `$XDG_CONFIG_HOME/layertree/config.toml` (or `~/.config/layertree/config.toml`)
//! 3. an explicit file passed on the command line
//! 4. `LAYERTREE__*` environment variables, e.g. `LAYERTREE__LOGGING__LEVEL=debug`

use crate::error::TreeError;
use crate::logging::LoggingConfig;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

mod merge;
mod sources;

pub use sources::global_file::global_config_path;

/// Root configuration structure
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LayertreeConfig {
    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,

    /// Files loaded as stacked layers before any given on the command line,
    /// lowest precedence first
    #[serde(default)]
    pub layers: Vec<PathBuf>,
}

impl LayertreeConfig {
    /// Validate the configuration
    pub fn validate(&self) -> Result<(), TreeError> {
        for layer in &self.layers {
            if layer.as_os_str().is_empty() {
                return Err(TreeError::Config("Layer path cannot be empty".to_string()));
            }
        }
        Ok(())
    }
}

/// Loads [`LayertreeConfig`] from every source
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load from defaults, the global file, `explicit` (if any) and the environment.
    pub fn load(explicit: Option<&Path>) -> Result<LayertreeConfig, TreeError> {
        let builder = merge::merge_policy::builder_with_defaults()?;
        let builder = sources::global_file::add_to_builder(builder)?;
        let builder = match explicit {
            Some(path) => sources::explicit_file::add_to_builder(builder, path)?,
            None => builder,
        };
        let builder = sources::environment::add_to_builder(builder);

        let config: LayertreeConfig = builder.build()?.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// Load from defaults and a single file, ignoring the global file and environment.
    pub fn load_from_file(path: &Path) -> Result<LayertreeConfig, TreeError> {
        let builder = merge::merge_policy::builder_with_defaults()?;
        let builder = sources::explicit_file::add_to_builder(builder, path)?;
        let config: LayertreeConfig = builder.build()?.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }
}
