//! Per-process open-file enumeration.
//!
//! Produces, in order: cwd, root, exe, file-backed memory mappings, then the
//! numbered descriptors. Failures never escape; each one becomes a single
//! `nofd` record at the point where the row is emitted.

use crate::error::LookupError;
use crate::proc_source::{ProcLink, ProcSource};
use crate::process::classifier::{classify, DeviceNumber};
use crate::process::maps::{parse_maps, MapEntry};
use crate::record::{ClassifiedFile, Descriptor, FileCategory, FileRecord, ProcessIdentity};
use tracing::debug;

/// Resolves command and user for a pid, leaving either unresolved on failure.
pub fn resolve_identity<S: ProcSource + ?Sized>(source: &S, pid: u32) -> ProcessIdentity {
    match source.read_status(pid) {
        Ok(status) => {
            let user = source.user_name(status.uid);
            if user.is_none() {
                debug!("No user name for uid {} (pid {})", status.uid, pid);
            }
            ProcessIdentity {
                pid,
                command: Some(status.command),
                user,
            }
        }
        Err(e) => {
            debug!("Failed to read status for pid {}: {}", pid, e);
            ProcessIdentity::unresolved(pid)
        }
    }
}

/// Lists every open file of one process. Never fails.
///
/// Command and user are looked up once, before the first row, and that
/// snapshot is copied into every record of the process rather than being
/// re-read for each row.
pub fn enumerate_process<S: ProcSource + ?Sized>(source: &S, pid: u32) -> Vec<FileRecord> {
    let identity = resolve_identity(source, pid);
    let mut records = Vec::new();

    for (descriptor, link) in [
        (Descriptor::Cwd, ProcLink::Cwd),
        (Descriptor::Root, ProcLink::Root),
        (Descriptor::Exe, ProcLink::Exe),
    ] {
        records.push(link_record(
            source,
            &identity,
            descriptor,
            link,
            DeviceNumber::File,
        ));
    }

    records.extend(memory_mapped_files(source, &identity));

    match source.list_fds(pid) {
        Ok(fds) => {
            for fd in fds {
                records.push(link_record(
                    source,
                    &identity,
                    Descriptor::Fd(fd),
                    ProcLink::Fd(fd),
                    DeviceNumber::Raw,
                ));
            }
        }
        Err(e) => {
            debug!("Failed to list descriptors of pid {}: {}", pid, e);
            records.push(FileRecord::from_error(&identity, &e));
        }
    }

    records
}

/// Resolves one link and classifies its target.
fn resolve_link<S: ProcSource + ?Sized>(
    source: &S,
    pid: u32,
    link: ProcLink,
    device: DeviceNumber,
) -> Result<ClassifiedFile, LookupError> {
    let target = source.read_link(pid, link)?;
    classify(source, &target, device)
}

fn link_record<S: ProcSource + ?Sized>(
    source: &S,
    identity: &ProcessIdentity,
    descriptor: Descriptor,
    link: ProcLink,
    device: DeviceNumber,
) -> FileRecord {
    match resolve_link(source, identity.pid, link, device) {
        Ok(file) => FileRecord::new(identity, descriptor, file),
        Err(e) => {
            debug!("pid {} {}: {}", identity.pid, link, e);
            FileRecord::from_error(identity, &e)
        }
    }
}

/// Records for file-backed mappings.
///
/// Category is always `regular`; the mapped target is not stat'ed, so a
/// mapped device file is reported as regular too. Offset, device and inode
/// come straight from the maps line.
fn memory_mapped_files<S: ProcSource + ?Sized>(
    source: &S,
    identity: &ProcessIdentity,
) -> Vec<FileRecord> {
    let content = match source.read_maps(identity.pid) {
        Ok(c) => c,
        Err(e) => {
            debug!("Failed to read memory maps of pid {}: {}", identity.pid, e);
            return Vec::new();
        }
    };

    parse_maps(&content)
        .into_iter()
        .map(|entry| mapping_record(identity, entry))
        .collect()
}

fn mapping_record(identity: &ProcessIdentity, entry: MapEntry) -> FileRecord {
    FileRecord::new(
        identity,
        Descriptor::Mem,
        ClassifiedFile {
            category: FileCategory::Regular,
            device: entry.device,
            size: entry.offset.to_string(),
            inode: entry.inode.to_string(),
            name: entry.path,
        },
    )
}
