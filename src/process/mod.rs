//! Open-file discovery for processes.
//!
//! This module provides:
//! - `classifier`: descriptor target classification
//! - `maps`: parsing of /proc/<pid>/maps
//! - `enumerator`: all open files of a single process
//! - `scanner`: process discovery and the system-wide scan

pub mod classifier;
pub mod enumerator;
pub mod maps;
pub mod scanner;

// Re-export commonly used types
pub use classifier::{category_from_mode, classify, classify_pseudo, format_device, DeviceNumber};
pub use enumerator::{enumerate_process, resolve_identity};
pub use maps::{parse_maps, parse_maps_line, MapEntry};
pub use scanner::{collect_pids, filter_pids, scan_system};
