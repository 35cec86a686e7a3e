//! Library error type
//!
//! Only conditions that abort a whole extraction pass are errors. A component
//! without a default export or without a props type is reported as `None` by
//! the props layer and never reaches this type.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    /// Reading or writing a file failed
    #[error("{message}: {}", path.display())]
    FileSystem {
        message: String,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The TypeScript grammar could not be loaded or produced no tree
    #[error("Parse error in {}: {message}", file.display())]
    Parse { file: PathBuf, message: String },

    /// Malformed `tsconfig.json` or `.propmap.toml`
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Directory traversal and other wrapped failures
    #[error(transparent)]
    External(#[from] anyhow::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Toml(#[from] toml::de::Error),

    /// Invalid ignore pattern
    #[error(transparent)]
    Pattern(#[from] glob::PatternError),
}

impl Error {
    pub fn file_system(
        message: impl Into<String>,
        path: impl Into<PathBuf>,
        source: std::io::Error,
    ) -> Self {
        Self::FileSystem {
            message: message.into(),
            path: path.into(),
            source,
        }
    }

    pub fn parse(file: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self::Parse {
            file: file.into(),
            message: message.into(),
        }
    }

    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration(message.into())
    }
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_system_names_path_and_keeps_source() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        let err = Error::file_system("Failed to read source file", "src/Button.tsx", io);
        assert!(std::error::Error::source(&err).is_some());
        assert_eq!(err.to_string(), "Failed to read source file: src/Button.tsx");
    }

    #[test]
    fn test_parse_message() {
        let err = Error::parse("a.tsx", "Failed to parse source code");
        assert_eq!(err.to_string(), "Parse error in a.tsx: Failed to parse source code");
    }

    #[test]
    fn test_configuration_message() {
        let err = Error::configuration("expected object");
        assert_eq!(err.to_string(), "Configuration error: expected object");
    }
}
