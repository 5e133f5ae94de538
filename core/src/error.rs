use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

pub type Result<T> = std::result::Result<T, IndexError>;

/// Failures surfaced by the artifact readers and writers.
#[derive(Debug, Error)]
pub enum IndexError {
    #[error("artifact not found: {}", .path.display())]
    NotFound { path: PathBuf },

    #[error("artifact {} is corrupt: {source}", .path.display())]
    Corrupt {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("I/O failure on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("unsupported language '{0}'")]
    UnsupportedLanguage(String),
}

impl IndexError {
    /// Classify an I/O error raised while touching `path`.
    pub(crate) fn from_io(path: &Path, source: io::Error) -> Self {
        if source.kind() == io::ErrorKind::NotFound {
            IndexError::NotFound { path: path.to_path_buf() }
        } else {
            IndexError::Io { path: path.to_path_buf(), source }
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, IndexError::NotFound { .. })
    }

    pub fn is_corrupt(&self) -> bool {
        matches!(self, IndexError::Corrupt { .. })
    }
}
