//! In-memory `ProcSource` for integration tests.
//!
//! Anything not registered behaves like a vanished process or file
//! (`NotFound`); links registered with `deny_link` fail with
//! `PermissionDenied`.

#![allow(dead_code)]

use herakles_lsof::{FileStat, LookupError, ProcLink, ProcSource, ProcStatus};
use std::collections::{HashMap, HashSet};
use std::io;
use std::path::{Path, PathBuf};

#[derive(Default)]
pub struct MockProcSource {
    pid_names: Option<Vec<String>>,
    statuses: HashMap<u32, ProcStatus>,
    users: HashMap<u32, String>,
    fds: HashMap<u32, Vec<u32>>,
    links: HashMap<(u32, ProcLink), PathBuf>,
    denied_links: HashSet<(u32, ProcLink)>,
    stats: HashMap<PathBuf, FileStat>,
    maps: HashMap<u32, String>,
}

fn proc_path(pid: u32, leaf: impl std::fmt::Display) -> PathBuf {
    PathBuf::from(format!("/proc/{}/{}", pid, leaf))
}

impl MockProcSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn pids(mut self, names: &[&str]) -> Self {
        self.pid_names = Some(names.iter().map(|s| s.to_string()).collect());
        self
    }

    pub fn process(mut self, pid: u32, command: &str, uid: u32) -> Self {
        self.statuses.insert(
            pid,
            ProcStatus {
                command: command.to_string(),
                uid,
            },
        );
        self
    }

    pub fn user(mut self, uid: u32, name: &str) -> Self {
        self.users.insert(uid, name.to_string());
        self
    }

    pub fn link(self, pid: u32, link: ProcLink, target: &str) -> Self {
        self.link_path(pid, link, Path::new(target))
    }

    /// Like `link`, for targets that are not valid UTF-8.
    pub fn link_path(mut self, pid: u32, link: ProcLink, target: &Path) -> Self {
        self.links.insert((pid, link), target.to_path_buf());
        self
    }

    pub fn deny_link(mut self, pid: u32, link: ProcLink) -> Self {
        self.denied_links.insert((pid, link));
        self
    }

    pub fn fds(mut self, pid: u32, fds: &[u32]) -> Self {
        self.fds.insert(pid, fds.to_vec());
        self
    }

    pub fn file(self, path: &str, stat: FileStat) -> Self {
        self.file_path(Path::new(path), stat)
    }

    pub fn file_path(mut self, path: &Path, stat: FileStat) -> Self {
        self.stats.insert(path.to_path_buf(), stat);
        self
    }

    pub fn maps(mut self, pid: u32, content: &str) -> Self {
        self.maps.insert(pid, content.to_string());
        self
    }

    /// A process whose cwd, root and exe all resolve to stat'able paths.
    pub fn basic_process(self, pid: u32, command: &str) -> Self {
        self.process(pid, command, 1000)
            .user(1000, "alice")
            .link(pid, ProcLink::Cwd, "/home/alice")
            .link(pid, ProcLink::Root, "/")
            .link(pid, ProcLink::Exe, "/usr/bin/app")
            .file("/home/alice", dir_stat(2_000, 4096))
            .file("/", dir_stat(2, 4096))
            .file("/usr/bin/app", regular_stat(3_000, 81_920))
    }
}

pub fn dev(major: u64, minor: u64) -> u64 {
    nix::sys::stat::makedev(major, minor)
}

pub fn regular_stat(inode: u64, size: u64) -> FileStat {
    FileStat {
        size,
        inode,
        dev: dev(8, 1),
        rdev: 0,
        mode: libc::S_IFREG | 0o644,
    }
}

pub fn dir_stat(inode: u64, size: u64) -> FileStat {
    FileStat {
        size,
        inode,
        dev: dev(8, 1),
        rdev: 0,
        mode: libc::S_IFDIR | 0o755,
    }
}

pub fn char_device_stat(inode: u64, major: u64, minor: u64) -> FileStat {
    FileStat {
        size: 0,
        inode,
        dev: dev(0, 5),
        rdev: dev(major, minor),
        mode: libc::S_IFCHR | 0o666,
    }
}

impl ProcSource for MockProcSource {
    fn list_pids(&self) -> Result<Vec<String>, LookupError> {
        self.pid_names.clone().ok_or_else(|| LookupError::ListDir {
            path: PathBuf::from("/proc"),
            source: io::Error::from(io::ErrorKind::PermissionDenied),
        })
    }

    fn read_status(&self, pid: u32) -> Result<ProcStatus, LookupError> {
        self.statuses
            .get(&pid)
            .cloned()
            .ok_or_else(|| LookupError::ReadFile {
                path: proc_path(pid, "status"),
                source: io::Error::from(io::ErrorKind::NotFound),
            })
    }

    fn list_fds(&self, pid: u32) -> Result<Vec<u32>, LookupError> {
        self.fds.get(&pid).cloned().ok_or_else(|| LookupError::ListDir {
            path: proc_path(pid, "fd"),
            source: io::Error::from(io::ErrorKind::NotFound),
        })
    }

    fn read_link(&self, pid: u32, link: ProcLink) -> Result<PathBuf, LookupError> {
        if self.denied_links.contains(&(pid, link)) {
            return Err(LookupError::ReadLink {
                path: proc_path(pid, link),
                source: io::Error::new(io::ErrorKind::PermissionDenied, "Permission denied"),
            });
        }
        self.links
            .get(&(pid, link))
            .cloned()
            .ok_or_else(|| LookupError::ReadLink {
                path: proc_path(pid, link),
                source: io::Error::from(io::ErrorKind::NotFound),
            })
    }

    fn stat(&self, path: &Path) -> Result<FileStat, LookupError> {
        self.stats.get(path).copied().ok_or_else(|| LookupError::Stat {
            path: path.to_path_buf(),
            source: io::Error::from(io::ErrorKind::NotFound),
        })
    }

    fn read_maps(&self, pid: u32) -> Result<String, LookupError> {
        self.maps.get(&pid).cloned().ok_or_else(|| LookupError::ReadFile {
            path: proc_path(pid, "maps"),
            source: io::Error::from(io::ErrorKind::NotFound),
        })
    }

    fn user_name(&self, uid: u32) -> Option<String> {
        self.users.get(&uid).cloned()
    }
}
