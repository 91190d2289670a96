//! Errors raised while reading or writing `config.ron`.

use std::path::PathBuf;

/// Why the config file could not be loaded or persisted.
///
/// File errors name the path so startup and hot-reload warnings say which
/// file failed.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("cannot read {}: {source}", path.display())]
    ReadError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("cannot write {}: {source}", path.display())]
    WriteError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The file exists but is not a valid config.
    #[error("invalid config in {}: {source}", path.display())]
    ParseError {
        path: PathBuf,
        #[source]
        source: ron::error::SpannedError,
    },

    #[error("cannot serialize config: {0}")]
    SerializeError(#[source] ron::Error),
}

impl ConfigError {
    /// The config file involved, if the error came from the filesystem or parser.
    pub fn path(&self) -> Option<&std::path::Path> {
        match self {
            Self::ReadError { path, .. }
            | Self::WriteError { path, .. }
            | Self::ParseError { path, .. } => Some(path),
            Self::SerializeError(_) => None,
        }
    }
}
