//! Typed lookup failures for /proc reads.
//!
//! Every variant carries the path that failed so the rendered message can be
//! shown verbatim in the NAME column of a synthetic error record.

use std::io;
use std::path::PathBuf;

/// A single failed lookup against the proc filesystem or a target file.
#[derive(Debug, thiserror::Error)]
pub enum LookupError {
    #[error("{} (readlink: {source})", .path.display())]
    ReadLink {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("{} (stat: {source})", .path.display())]
    Stat {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("{} (opendir: {source})", .path.display())]
    ListDir {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("{} (read: {source})", .path.display())]
    ReadFile {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("{} (malformed: {reason})", .path.display())]
    Malformed { path: PathBuf, reason: String },
}

impl LookupError {
    /// Path whose lookup failed.
    pub fn path(&self) -> &std::path::Path {
        match self {
            LookupError::ReadLink { path, .. }
            | LookupError::Stat { path, .. }
            | LookupError::ListDir { path, .. }
            | LookupError::ReadFile { path, .. }
            | LookupError::Malformed { path, .. } => path,
        }
    }

    /// Underlying I/O error kind, if the failure came from a syscall.
    pub fn io_kind(&self) -> Option<io::ErrorKind> {
        match self {
            LookupError::ReadLink { source, .. }
            | LookupError::Stat { source, .. }
            | LookupError::ListDir { source, .. }
            | LookupError::ReadFile { source, .. } => Some(source.kind()),
            LookupError::Malformed { .. } => None,
        }
    }
}
