//! Preprocessor configuration.
//!
//! A [`PreprocessorConfig`] can be built in code or loaded from TOML:
//!
//! ```toml
//! system_include_dirs = ["/usr/share/effects", "vendor/include"]
//! missing_system_include_is_fatal = false
//! max_include_depth = 32
//!
//! [defines]
//! USE_LINEAR = "1"
//! TINT = "float4(1.0, 0.5, 0.5, 1.0)"
//! ```

use std::path::{Path, PathBuf};

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Default limit on `#include` nesting.
pub const DEFAULT_MAX_INCLUDE_DEPTH: usize = 64;

/// Settings for one preprocessing job.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PreprocessorConfig {
    /// Directories searched, in order, for `#include <...>`.
    #[serde(default)]
    pub system_include_dirs: Vec<PathBuf>,

    /// Whether an angle include that cannot be found aborts the run.
    #[serde(default)]
    pub missing_system_include_is_fatal: bool,

    /// Maximum `#include` nesting depth.
    #[serde(default = "default_max_include_depth")]
    pub max_include_depth: usize,

    /// Object-like macros installed before the root file is processed,
    /// as name -> body text. Installed in order.
    #[serde(default)]
    pub defines: IndexMap<String, String>,
}

fn default_max_include_depth() -> usize {
    DEFAULT_MAX_INCLUDE_DEPTH
}

impl Default for PreprocessorConfig {
    fn default() -> Self {
        Self {
            system_include_dirs: Vec::new(),
            missing_system_include_is_fatal: false,
            max_include_depth: DEFAULT_MAX_INCLUDE_DEPTH,
            defines: IndexMap::new(),
        }
    }
}

impl PreprocessorConfig {
    /// Creates the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a system include directory.
    pub fn with_system_include_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.system_include_dirs.push(dir.into());
        self
    }

    /// Adds an initial object-like define.
    pub fn with_define(mut self, name: impl Into<String>, body: impl Into<String>) -> Self {
        self.defines.insert(name.into(), body.into());
        self
    }

    /// Parses a configuration from TOML text.
    ///
    /// # Examples
    ///
    /// ```
    /// use cfl_pp::PreprocessorConfig;
    ///
    /// let config = PreprocessorConfig::from_toml_str(
    ///     "system_include_dirs = [\"inc\"]\n[defines]\nX = \"1\"\n",
    /// )
    /// .unwrap();
    /// assert_eq!(config.defines["X"], "1");
    /// assert_eq!(config.max_include_depth, 64);
    /// ```
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let config: PreprocessorConfig = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Loads a configuration file.
    pub fn load_from_path(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&text)
    }

    /// Renders the configuration as TOML.
    pub fn to_toml_string(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Checks that every define name is an identifier.
    pub fn validate(&self) -> Result<(), ConfigError> {
        match self.defines.keys().find(|name| !is_identifier(name)) {
            Some(name) => Err(ConfigError::InvalidDefineName(name.clone())),
            None => Ok(()),
        }
    }
}

/// Returns true if `name` lexes as a single name token.
pub(crate) fn is_identifier(name: &str) -> bool {
    let mut bytes = name.bytes();
    bytes.next().is_some_and(cfl_lex::chars::is_name_start)
        && bytes.all(cfl_lex::chars::is_name_continue)
}
