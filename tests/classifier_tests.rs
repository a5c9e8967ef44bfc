//! Integration tests for descriptor classification.
//!
//! These tests drive `classify` through an in-memory proc source so that
//! stat results (device numbers, sizes, inodes) are fully controlled.

mod common;

use common::{char_device_stat, dev, regular_stat, MockProcSource};
use herakles_lsof::{classify, DeviceNumber, FileCategory, FileStat, LookupError};
use std::ffi::OsStr;
use std::os::unix::ffi::OsStrExt;
use std::path::Path;

#[test]
fn test_regular_file_by_path() {
    let source = MockProcSource::new().file("/var/log/syslog", regular_stat(131_074, 52_311));

    let file = classify(&source, Path::new("/var/log/syslog"), DeviceNumber::File).expect("classify");

    assert_eq!(file.category, FileCategory::Regular);
    assert_eq!(file.device, "8,1");
    assert_eq!(file.size, "52311");
    assert_eq!(file.inode, "131074");
    assert_eq!(file.name, "/var/log/syslog");
}

#[test]
fn test_device_number_variants() {
    let source = MockProcSource::new().file("/dev/null", char_device_stat(4, 1, 3));

    // By number: the device the special file stands for
    let by_fd = classify(&source, Path::new("/dev/null"), DeviceNumber::Raw).expect("classify");
    assert_eq!(by_fd.category, FileCategory::CharacterDevice);
    assert_eq!(by_fd.device, "1,3");

    // As cwd/root/exe: the device holding the inode
    let by_path = classify(&source, Path::new("/dev/null"), DeviceNumber::File).expect("classify");
    assert_eq!(by_path.device, "0,5");
}

#[test]
fn test_regular_file_by_number_reports_raw_device() {
    let source = MockProcSource::new().file("/var/log/syslog", regular_stat(131_074, 52_311));

    let file = classify(&source, Path::new("/var/log/syslog"), DeviceNumber::Raw).expect("classify");
    assert_eq!(file.device, "0,0");
    assert_eq!(file.size, "52311");
}

#[test]
fn test_fifo_and_other_modes() {
    let fifo = FileStat {
        size: 0,
        inode: 77,
        dev: dev(0, 26),
        rdev: 0,
        mode: libc::S_IFIFO | 0o600,
    };
    let block = FileStat {
        size: 0,
        inode: 78,
        dev: dev(0, 5),
        rdev: dev(8, 0),
        mode: libc::S_IFBLK | 0o660,
    };
    let source = MockProcSource::new()
        .file("/run/initctl", fifo)
        .file("/dev/sda", block);

    let file = classify(&source, Path::new("/run/initctl"), DeviceNumber::Raw).expect("classify");
    assert_eq!(file.category, FileCategory::Fifo);
    assert_eq!(file.inode, "77");

    let file = classify(&source, Path::new("/dev/sda"), DeviceNumber::Raw).expect("classify");
    assert_eq!(file.category, FileCategory::Unknown);
    assert_eq!(file.device, "8,0");
}

#[test]
fn test_pseudo_targets() {
    let source = MockProcSource::new();

    let socket = classify(&source, Path::new("socket:[12345]"), DeviceNumber::Raw).expect("classify");
    assert_eq!(socket.category, FileCategory::Socket);
    assert_eq!(socket.device, "12345");
    assert_eq!(socket.size, "0");
    assert_eq!(socket.inode, "");
    assert_eq!(socket.name, "");

    let anon = classify(&source, Path::new("anon_inode:[eventfd]"), DeviceNumber::Raw).expect("classify");
    assert_eq!(anon.category, FileCategory::AnonymousInode);
    assert_eq!(anon.device, "");
    assert_eq!(anon.size, "0");
    assert_eq!(anon.name, "[eventfd]");

    let pipe = classify(&source, Path::new("pipe:[67890]"), DeviceNumber::Raw).expect("classify");
    assert_eq!(pipe.category, FileCategory::Fifo);
    assert_eq!(pipe.name, "pipe");
    assert_eq!(pipe.device, "");
    assert_eq!(pipe.size, "");
    assert_eq!(pipe.inode, "");
}

#[test]
fn test_unrecognised_target_is_kept_as_unknown() {
    let source = MockProcSource::new();
    let file = classify(&source, Path::new("mnt:[4026531841]"), DeviceNumber::Raw).expect("classify");
    assert_eq!(file.category, FileCategory::Unknown);
    assert_eq!(file.name, "mnt:[4026531841]");
}

#[test]
fn test_stat_failure_is_returned_not_raised() {
    let source = MockProcSource::new();

    let err = classify(&source, Path::new("/tmp/gone (deleted)"), DeviceNumber::Raw)
        .expect_err("missing file must fail");
    assert!(matches!(err, LookupError::Stat { .. }));
    assert!(err.to_string().contains("/tmp/gone (deleted)"));
}

#[test]
fn test_non_utf8_path_keeps_raw_bytes_for_stat() {
    let raw = Path::new(OsStr::from_bytes(b"/srv/data/caf\xe9.log"));
    let source = MockProcSource::new().file_path(raw, regular_stat(4_242, 17));

    let file = classify(&source, raw, DeviceNumber::File).expect("classify");

    assert_eq!(file.category, FileCategory::Regular);
    assert_eq!(file.size, "17");
    assert_eq!(file.inode, "4242");
    assert_eq!(file.name, "/srv/data/caf\u{FFFD}.log");
}
