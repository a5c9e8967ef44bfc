//! Open-file records: one row of the output table.
//!
//! A [`FileRecord`] is built in one step from a process identity, a
//! descriptor slot and either a classified file or a lookup error. It is
//! never modified afterwards.

use crate::error::LookupError;
use serde::{Serialize, Serializer};
use std::fmt;

/// Kind of object a descriptor refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum FileCategory {
    Regular,
    Directory,
    CharacterDevice,
    Fifo,
    AnonymousInode,
    Socket,
    Unknown,
}

impl FileCategory {
    /// Short code used in the TYPE column.
    pub fn type_code(self) -> &'static str {
        match self {
            FileCategory::Regular => "REG",
            FileCategory::Directory => "DIR",
            FileCategory::CharacterDevice => "CHR",
            FileCategory::Fifo => "FIFO",
            FileCategory::AnonymousInode => "a_inode",
            FileCategory::Socket => "socket",
            FileCategory::Unknown => "unknown",
        }
    }
}

impl fmt::Display for FileCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.type_code())
    }
}

/// Descriptor slot: a numbered fd or one of the fixed placeholders.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Descriptor {
    Fd(u32),
    Cwd,
    Root,
    Exe,
    Mem,
    /// Placeholder for rows that carry a lookup error.
    NoFd,
}

impl fmt::Display for Descriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Descriptor::Fd(n) => write!(f, "{}", n),
            Descriptor::Cwd => f.write_str("cwd"),
            Descriptor::Root => f.write_str("root"),
            Descriptor::Exe => f.write_str("exe"),
            Descriptor::Mem => f.write_str("mem"),
            Descriptor::NoFd => f.write_str("nofd"),
        }
    }
}

impl Serialize for Descriptor {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Descriptor::Fd(n) => serializer.serialize_u32(*n),
            other => serializer.collect_str(other),
        }
    }
}

/// Command and owning user of a process, as seen when it was enumerated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessIdentity {
    pub pid: u32,
    pub command: Option<String>,
    pub user: Option<String>,
}

impl ProcessIdentity {
    /// Identity with command and user left unresolved.
    pub fn unresolved(pid: u32) -> Self {
        Self {
            pid,
            command: None,
            user: None,
        }
    }
}

/// Category-specific fields derived from one descriptor target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassifiedFile {
    pub category: FileCategory,
    pub device: String,
    pub size: String,
    pub inode: String,
    pub name: String,
}

/// One entry in the open-files table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileRecord {
    pub pid: u32,
    pub command: Option<String>,
    pub user: Option<String>,
    pub descriptor: Descriptor,
    pub category: FileCategory,
    pub device: String,
    pub size: String,
    pub inode: String,
    pub name: String,
}

impl FileRecord {
    pub fn new(identity: &ProcessIdentity, descriptor: Descriptor, file: ClassifiedFile) -> Self {
        Self {
            pid: identity.pid,
            command: identity.command.clone(),
            user: identity.user.clone(),
            descriptor,
            category: file.category,
            device: file.device,
            size: file.size,
            inode: file.inode,
            name: file.name,
        }
    }

    /// Synthetic row standing in for a failed lookup.
    ///
    /// The descriptor is forced to `nofd`, the category to `unknown`, and the
    /// error message (which embeds the failing path) becomes the name.
    pub fn from_error(identity: &ProcessIdentity, err: &LookupError) -> Self {
        Self::new(
            identity,
            Descriptor::NoFd,
            ClassifiedFile {
                category: FileCategory::Unknown,
                device: String::new(),
                size: String::new(),
                inode: String::new(),
                name: err.to_string(),
            },
        )
    }
}
