//! System-wide scan: every process id, in listing order.
//!
//! Process ids come from the entries of the proc root; non-numeric entries
//! (`self`, `sys`, `meminfo`, ...) are dropped. Each remaining pid is handed
//! to the enumerator and the results are concatenated.

use crate::proc_source::ProcSource;
use crate::process::enumerator::enumerate_process;
use crate::record::FileRecord;
use tracing::{debug, info, warn};

/// Keeps the all-digit entries, parsed as pids, in their original order.
pub fn filter_pids<I, N>(names: I) -> Vec<u32>
where
    I: IntoIterator<Item = N>,
    N: AsRef<str>,
{
    names
        .into_iter()
        .filter_map(|name| {
            let name = name.as_ref();
            if name.is_empty() || !name.chars().all(|c| c.is_ascii_digit()) {
                return None;
            }
            name.parse().ok()
        })
        .collect()
}

/// Lists current process ids. An unreadable proc root yields no pids.
pub fn collect_pids<S: ProcSource + ?Sized>(source: &S) -> Vec<u32> {
    match source.list_pids() {
        Ok(names) => filter_pids(names),
        Err(e) => {
            warn!("Failed to list processes: {}", e);
            Vec::new()
        }
    }
}

/// Enumerates the open files of every process.
pub fn scan_system<S: ProcSource + ?Sized>(source: &S) -> Vec<FileRecord> {
    let pids = collect_pids(source);
    debug!("Scanning {} processes", pids.len());

    let mut records = Vec::new();
    for pid in &pids {
        records.extend(enumerate_process(source, *pid));
    }

    info!(
        "Scan complete: {} records from {} processes",
        records.len(),
        pids.len()
    );
    records
}
