//! Command handlers -- one module per subcommand

pub mod analyze;
pub mod config;
pub mod rules;

use std::path::Path;

use logwarden_core::config::LogwardenConfig;
use logwarden_core::error::{ConfigError, LogwardenError};
use tracing::debug;

use crate::cli::DEFAULT_CONFIG_PATH;
use crate::error::CliError;

/// Effective configuration plus a description of where it came from.
pub struct LoadedConfig {
    pub config: LogwardenConfig,
    pub source: String,
}

/// Load the configuration file at `path`.
///
/// A missing file is tolerated only at the default path; in that case the
/// built-in defaults plus environment overrides are used.
pub async fn load_config(path: &Path) -> Result<LoadedConfig, CliError> {
    match LogwardenConfig::load(path).await {
        Ok(config) => Ok(LoadedConfig {
            config,
            source: path.display().to_string(),
        }),
        Err(LogwardenError::Config(ConfigError::FileNotFound { .. }))
            if path == Path::new(DEFAULT_CONFIG_PATH) =>
        {
            debug!(path = %path.display(), "default config file not found, using defaults");
            Ok(LoadedConfig {
                config: LogwardenConfig::from_env()?,
                source: "(built-in defaults)".to_owned(),
            })
        }
        Err(e) => Err(e.into()),
    }
}
