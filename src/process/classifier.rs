//! Descriptor classification.
//!
//! Turns the raw target of a descriptor link into a file category plus the
//! device, size, inode and name fields shown for that category. Targets are
//! either absolute paths (stat'ed) or kernel pseudo-objects of the form
//! `<kind>:<detail>`.

use crate::error::LookupError;
use crate::proc_source::{FileStat, ProcSource};
use crate::record::{ClassifiedFile, FileCategory};
use nix::sys::stat::{major, minor};
use std::path::Path;

/// Which device number of a stat'ed target goes into the DEVICE column.
///
/// Numbered descriptors report `st_rdev`; cwd/root/exe report `st_dev`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeviceNumber {
    /// `st_dev`: the device holding the file.
    File,
    /// `st_rdev`: the device a special file stands for.
    Raw,
}

impl DeviceNumber {
    fn select(self, stat: &FileStat) -> u64 {
        match self {
            DeviceNumber::File => stat.dev,
            DeviceNumber::Raw => stat.rdev,
        }
    }
}

/// Maps the `S_IFMT` bits of a mode to a category.
pub fn category_from_mode(mode: u32) -> FileCategory {
    match mode & libc::S_IFMT {
        libc::S_IFREG => FileCategory::Regular,
        libc::S_IFDIR => FileCategory::Directory,
        libc::S_IFCHR => FileCategory::CharacterDevice,
        libc::S_IFIFO => FileCategory::Fifo,
        _ => FileCategory::Unknown,
    }
}

/// Renders a device number as `"<major>,<minor>"`.
pub fn format_device(dev: u64) -> String {
    format!("{},{}", major(dev), minor(dev))
}

/// Classifies a raw descriptor target.
///
/// Absolute paths are stat'ed through `source` using the raw bytes of the
/// target; a failed stat is returned as an error for the caller to turn into
/// an error record. Only the NAME column is converted lossily.
pub fn classify<S: ProcSource + ?Sized>(
    source: &S,
    target: &Path,
    device: DeviceNumber,
) -> Result<ClassifiedFile, LookupError> {
    if target.is_absolute() {
        let stat = source.stat(target)?;
        return Ok(ClassifiedFile {
            category: category_from_mode(stat.mode),
            device: format_device(device.select(&stat)),
            size: stat.size.to_string(),
            inode: stat.inode.to_string(),
            name: target.to_string_lossy().into_owned(),
        });
    }
    // Pseudo-object kinds are ASCII, so lossy conversion keeps the prefix intact
    Ok(classify_pseudo(&target.to_string_lossy()))
}

/// Classifies a `<kind>:<detail>` target without touching the filesystem.
///
/// Unrecognised kinds come back as `unknown` with the raw target as name.
pub fn classify_pseudo(target: &str) -> ClassifiedFile {
    if let Some(detail) = target.strip_prefix("anon_inode:") {
        ClassifiedFile {
            category: FileCategory::AnonymousInode,
            device: String::new(),
            size: "0".into(),
            inode: String::new(),
            name: detail.to_string(),
        }
    } else if let Some(detail) = target.strip_prefix("socket:") {
        let detail = detail.strip_prefix('[').unwrap_or(detail);
        let detail = detail.strip_suffix(']').unwrap_or(detail);
        ClassifiedFile {
            category: FileCategory::Socket,
            device: detail.to_string(),
            size: "0".into(),
            inode: String::new(),
            name: String::new(),
        }
    } else if target.starts_with("pipe:") {
        ClassifiedFile {
            category: FileCategory::Fifo,
            device: String::new(),
            size: String::new(),
            inode: String::new(),
            name: "pipe".into(),
        }
    } else {
        ClassifiedFile {
            category: FileCategory::Unknown,
            device: String::new(),
            size: String::new(),
            inode: String::new(),
            name: target.to_string(),
        }
    }
}
