//! # cxtree-config
//!
//! Layered configuration loading for cxtree using figment.
//!
//! Configuration sources (in priority order, highest wins):
//! 1. Environment variables (`CXTREE_*` prefix, `__` as separator)
//! 2. An explicit TOML file (`cxtree --config <file>`)
//! 3. Project-level `.cxtree/config.toml`
//! 4. User-level `~/.config/cxtree/config.toml`
//! 5. Built-in defaults
//!
//! # Environment Variable Mapping
//!
//! Figment maps `CXTREE_PARSE__MAX_DEPTH` -> `parse.max_depth`,
//! `CXTREE_OUTPUT__PRETTY` -> `output.pretty`, etc.
//!
//! # Usage
//!
//! ```no_run
//! use cxtree_config::CxtreeConfig;
//!
//! let config = CxtreeConfig::load_with_dotenv().expect("config");
//! println!("max depth: {}", config.parse.max_depth);
//! ```

mod diagnostics;
mod error;
mod output;
mod parse;

pub use diagnostics::DiagnosticsConfig;
pub use error::ConfigError;
pub use output::OutputConfig;
pub use parse::ParseConfig;

use std::path::{Path, PathBuf};

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct CxtreeConfig {
    #[serde(default)]
    pub parse: ParseConfig,
    #[serde(default)]
    pub output: OutputConfig,
    #[serde(default)]
    pub diagnostics: DiagnosticsConfig,
}

impl CxtreeConfig {
    /// Environment variable prefix.
    pub const ENV_PREFIX: &'static str = "CXTREE_";

    /// Project-local config file, relative to the working directory.
    pub const PROJECT_FILE: &'static str = ".cxtree/config.toml";

    /// Load configuration from all sources (TOML files + environment variables).
    ///
    /// Does NOT call `dotenvy`; use [`Self::load_with_dotenv`] for `.env` support.
    ///
    /// # Errors
    ///
    /// `Figment` when a source cannot be read or a value has the wrong type,
    /// `InvalidValue` when a value is out of range.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(None)
    }

    /// Like [`Self::load`], with `extra` layered above the project file.
    ///
    /// # Errors
    ///
    /// As [`Self::load`]; a missing `extra` file is an error.
    pub fn load_from(extra: Option<&Path>) -> Result<Self, ConfigError> {
        let mut figment = Self::figment();
        if let Some(path) = extra {
            if !path.exists() {
                return Err(ConfigError::InvalidValue {
                    field: "--config".into(),
                    reason: format!("{} does not exist", path.display()),
                });
            }
            // Re-apply the environment so it keeps the highest priority.
            figment = figment
                .merge(Toml::file(path))
                .merge(Env::prefixed(Self::ENV_PREFIX).split("__"));
        }
        let config: Self = figment.extract()?;
        config.parse.validate()?;
        Ok(config)
    }

    /// Load `.env` from the working directory, then [`Self::load_from`].
    ///
    /// # Errors
    ///
    /// As [`Self::load_from`].
    pub fn load_with_dotenv() -> Result<Self, ConfigError> {
        Self::load_with_dotenv_from(None)
    }

    /// # Errors
    ///
    /// As [`Self::load_from`].
    pub fn load_with_dotenv_from(extra: Option<&Path>) -> Result<Self, ConfigError> {
        let _ = dotenvy::dotenv();
        Self::load_from(extra)
    }

    /// Build the figment provider chain.
    ///
    /// Public so callers can inspect it or stack further providers.
    #[must_use]
    pub fn figment() -> Figment {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        if let Some(global_path) = Self::global_config_path() {
            if global_path.exists() {
                figment = figment.merge(Toml::file(global_path));
            }
        }

        let local_path = PathBuf::from(Self::PROJECT_FILE);
        if local_path.exists() {
            figment = figment.merge(Toml::file(local_path));
        }

        figment.merge(Env::prefixed(Self::ENV_PREFIX).split("__"))
    }

    /// Path to the user-global config file.
    #[must_use]
    pub fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("cxtree").join("config.toml"))
    }
}
