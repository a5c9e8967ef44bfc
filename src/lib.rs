//! Herakles lsof Library
//!
//! This library enumerates open files across all running processes on Linux
//! by reading the proc filesystem, producing one [`FileRecord`] per open file:
//! the working directory, root directory and executable of every process, its
//! file-backed memory mappings, and each numbered file descriptor.
//!
//! # Features
//!
//! - **Descriptor Classification**: regular files, directories, character
//!   devices, FIFOs, anonymous inodes and sockets
//! - **Best-Effort Snapshots**: a failed lookup becomes an in-row diagnostic
//!   instead of aborting the scan
//! - **Pluggable Source**: all OS access goes through [`ProcSource`]
//!
//! # Usage
//!
//! ```no_run
//! use herakles_lsof::{output, scan_system, FsProcSource};
//!
//! let source = FsProcSource::default();
//! let records = scan_system(&source);
//!
//! let stdout = std::io::stdout();
//! output::write_table(&mut stdout.lock(), &records, true).unwrap();
//! ```

pub mod error;
pub mod output;
pub mod proc_source;
pub mod process;
pub mod record;

// Re-export main types for convenience
pub use error::LookupError;
pub use output::OutputFormat;
pub use proc_source::{FileStat, FsProcSource, ProcLink, ProcSource, ProcStatus, DEFAULT_PROC_ROOT};
pub use process::{classify, enumerate_process, scan_system, DeviceNumber};
pub use record::{ClassifiedFile, Descriptor, FileCategory, FileRecord, ProcessIdentity};
