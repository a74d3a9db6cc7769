//! Error types for the preprocessor.
//!
//! Only conditions that abort a run are errors in the `Result` sense.
//! Everything recoverable is reported to the diagnostic sink and processing
//! continues.

use std::io;
use std::path::PathBuf;

use cfl_util::Location;
use thiserror::Error;

/// A condition that stops preprocessing.
#[derive(Error, Debug)]
pub enum PreprocessError {
    /// A quoted include could not be read.
    #[error("{location}: cannot open include file '{}': {source}", path.display())]
    IncludeNotFound {
        /// Path as resolved against the including file.
        path: PathBuf,
        /// Location of the `#include` directive.
        location: Location,
        /// The loader's error.
        #[source]
        source: io::Error,
    },

    /// An angle include was not found in any system directory and the
    /// configuration makes that fatal.
    #[error("{location}: system include <{path}> not found")]
    SystemIncludeNotFound {
        /// Path as written between the angle brackets.
        path: String,
        /// Location of the `#include` directive.
        location: Location,
    },

    /// The root input ended with conditional blocks still open.
    #[error("{file}: {open} conditional block(s) not closed at end of input")]
    UnterminatedConditional {
        /// Root file label.
        file: String,
        /// Number of frames left open.
        open: usize,
    },

    /// A name handed to [`define`](crate::Preprocessor::define) is not an
    /// identifier.
    #[error("invalid macro name '{0}'")]
    InvalidMacroName(String),
}

/// Result type alias using PreprocessError.
pub type Result<T> = std::result::Result<T, PreprocessError>;

/// Errors loading a [`PreprocessorConfig`](crate::PreprocessorConfig).
#[derive(Error, Debug)]
pub enum ConfigError {
    /// The config file could not be read.
    #[error("failed to read config file {}: {source}", path.display())]
    Io {
        /// The file that was requested.
        path: PathBuf,
        /// Underlying IO error.
        #[source]
        source: io::Error,
    },

    /// The TOML text is malformed or does not match the schema.
    #[error("invalid config: {0}")]
    Parse(#[from] toml::de::Error),

    /// The config could not be written out as TOML.
    #[error("failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),

    /// A `defines` key is not an identifier.
    #[error("invalid macro name '{0}' in defines")]
    InvalidDefineName(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_include_not_found_display() {
        let err = PreprocessError::IncludeNotFound {
            path: PathBuf::from("dir/inc.h"),
            location: Location::new("main.c", 3, 1),
            source: io::Error::new(io::ErrorKind::NotFound, "no such file"),
        };
        assert_eq!(
            err.to_string(),
            "main.c (3, 1): cannot open include file 'dir/inc.h': no such file"
        );
    }

    #[test]
    fn test_unterminated_conditional_display() {
        let err = PreprocessError::UnterminatedConditional {
            file: "main.c".to_string(),
            open: 2,
        };
        assert_eq!(
            err.to_string(),
            "main.c: 2 conditional block(s) not closed at end of input"
        );
    }

    #[test]
    fn test_config_error_display() {
        let err = ConfigError::InvalidDefineName("1abc".to_string());
        assert_eq!(err.to_string(), "invalid macro name '1abc' in defines");
    }
}
