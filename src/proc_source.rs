//! Access to process metadata, descriptor tables and file metadata.
//!
//! [`ProcSource`] is the boundary between the enumeration logic and the
//! operating system. [`FsProcSource`] reads a live proc filesystem; tests
//! substitute an in-memory implementation to inject failures.

use crate::error::LookupError;
use nix::unistd::{Uid, User};
use std::fmt;
use std::fs;
use std::os::unix::fs::MetadataExt;
use std::path::{Path, PathBuf};

/// Default mount point of the proc filesystem.
pub const DEFAULT_PROC_ROOT: &str = "/proc";

/// Symbolic link inside a process directory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProcLink {
    Cwd,
    Root,
    Exe,
    Fd(u32),
}

impl fmt::Display for ProcLink {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProcLink::Cwd => f.write_str("cwd"),
            ProcLink::Root => f.write_str("root"),
            ProcLink::Exe => f.write_str("exe"),
            ProcLink::Fd(n) => write!(f, "fd/{}", n),
        }
    }
}

/// Command name and real UID from `/proc/<pid>/status`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcStatus {
    pub command: String,
    pub uid: u32,
}

/// The subset of `stat(2)` the classifier needs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FileStat {
    pub size: u64,
    pub inode: u64,
    /// Device containing the file (`st_dev`).
    pub dev: u64,
    /// Device the file represents, for device special files (`st_rdev`).
    pub rdev: u64,
    /// Raw mode bits including the `S_IFMT` type field.
    pub mode: u32,
}

impl From<&fs::Metadata> for FileStat {
    fn from(meta: &fs::Metadata) -> Self {
        Self {
            size: meta.size(),
            inode: meta.ino(),
            dev: meta.dev(),
            rdev: meta.rdev(),
            mode: meta.mode(),
        }
    }
}

/// Source of raw process and file information.
pub trait ProcSource {
    /// Raw entry names of the process directory, unfiltered.
    fn list_pids(&self) -> Result<Vec<String>, LookupError>;

    fn read_status(&self, pid: u32) -> Result<ProcStatus, LookupError>;

    /// Open numbered descriptors, in directory listing order.
    fn list_fds(&self, pid: u32) -> Result<Vec<u32>, LookupError>;

    /// Raw link target. Paths are not required to be valid UTF-8.
    fn read_link(&self, pid: u32, link: ProcLink) -> Result<PathBuf, LookupError>;

    /// Metadata of an absolute path, following symlinks.
    fn stat(&self, path: &Path) -> Result<FileStat, LookupError>;

    /// Contents of the process's memory-mapping table. Invalid UTF-8 is
    /// replaced, so one odd pathname only affects its own line.
    fn read_maps(&self, pid: u32) -> Result<String, LookupError>;

    fn user_name(&self, uid: u32) -> Option<String>;
}

/// [`ProcSource`] backed by a proc filesystem mounted at `root`.
#[derive(Debug, Clone)]
pub struct FsProcSource {
    root: PathBuf,
}

impl FsProcSource {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn pid_path(&self, pid: u32) -> PathBuf {
        self.root.join(pid.to_string())
    }
}

impl Default for FsProcSource {
    fn default() -> Self {
        Self::new(DEFAULT_PROC_ROOT)
    }
}

impl ProcSource for FsProcSource {
    fn list_pids(&self) -> Result<Vec<String>, LookupError> {
        let entries = fs::read_dir(&self.root).map_err(|source| LookupError::ListDir {
            path: self.root.clone(),
            source,
        })?;
        Ok(entries
            .flatten()
            .filter_map(|entry| entry.file_name().to_str().map(str::to_string))
            .collect())
    }

    fn read_status(&self, pid: u32) -> Result<ProcStatus, LookupError> {
        let path = self.pid_path(pid).join("status");
        // The kernel copies the command name bytes verbatim
        let content = fs::read(&path).map_err(|source| LookupError::ReadFile {
            path: path.clone(),
            source,
        })?;
        parse_status(&String::from_utf8_lossy(&content)).ok_or_else(|| LookupError::Malformed {
            path,
            reason: "missing Name or Uid line".into(),
        })
    }

    fn list_fds(&self, pid: u32) -> Result<Vec<u32>, LookupError> {
        let path = self.pid_path(pid).join("fd");
        let entries = fs::read_dir(&path).map_err(|source| LookupError::ListDir {
            path: path.clone(),
            source,
        })?;
        Ok(entries
            .flatten()
            .filter_map(|entry| entry.file_name().to_str()?.parse().ok())
            .collect())
    }

    fn read_link(&self, pid: u32, link: ProcLink) -> Result<PathBuf, LookupError> {
        let path = self.pid_path(pid).join(link.to_string());
        fs::read_link(&path).map_err(|source| LookupError::ReadLink { path, source })
    }

    fn stat(&self, path: &Path) -> Result<FileStat, LookupError> {
        fs::metadata(path)
            .map(|meta| FileStat::from(&meta))
            .map_err(|source| LookupError::Stat {
                path: path.to_path_buf(),
                source,
            })
    }

    fn read_maps(&self, pid: u32) -> Result<String, LookupError> {
        let path = self.pid_path(pid).join("maps");
        let content = fs::read(&path).map_err(|source| LookupError::ReadFile { path, source })?;
        Ok(String::from_utf8_lossy(&content).into_owned())
    }

    fn user_name(&self, uid: u32) -> Option<String> {
        match User::from_uid(Uid::from_raw(uid)) {
            Ok(user) => user.map(|u| u.name),
            Err(e) => {
                tracing::debug!("Failed to look up user for uid {}: {}", uid, e);
                None
            }
        }
    }
}

/// Extracts the command name and real UID from status file contents.
pub fn parse_status(content: &str) -> Option<ProcStatus> {
    let mut command = None;
    let mut uid = None;

    for line in content.lines() {
        if let Some(v) = line.strip_prefix("Name:") {
            command = Some(v.trim().to_string());
        } else if let Some(v) = line.strip_prefix("Uid:") {
            uid = v.split_whitespace().next().and_then(|s| s.parse().ok());
        }

        if command.is_some() && uid.is_some() {
            break;
        }
    }

    Some(ProcStatus {
        command: command?,
        uid: uid?,
    })
}
