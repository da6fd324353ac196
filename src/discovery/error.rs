use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Errors produced while listing directories or transferring files
#[derive(Debug, Error)]
pub enum ScanError {
    /// I/O failure on a specific path
    #[error("I/O error on '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    /// A directory was required but the path is something else
    #[error("Not a directory: {}", path.display())]
    NotADirectory { path: PathBuf },
    /// A transfer batch failed after some entries were already processed
    #[error("Transfer stopped at '{}' after {completed} file(s): {source}", path.display())]
    PartialBatch {
        completed: usize,
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl ScanError {
    #[must_use]
    pub fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// The path the failure is attributed to
    #[must_use]
    pub fn path(&self) -> &std::path::Path {
        match self {
            Self::Io { path, .. } | Self::NotADirectory { path } | Self::PartialBatch { path, .. } => path,
        }
    }
}
