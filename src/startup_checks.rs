//! Startup requirement validation for herakles-lsof.
//!
//! This module checks that the proc filesystem can be read before a scan.
//! Only an unreadable proc root is an error; missing privileges merely limit
//! how many descriptor tables are visible and are reported as warnings.

use nix::unistd::geteuid;
use std::fs;
use std::io::ErrorKind;
use std::path::Path;
use tracing::{debug, info, warn};

/// Outcome of probing the descriptor table of pid 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FdAccess {
    /// Other users' descriptor tables are readable.
    Full,
    /// Only our own processes' descriptor tables are readable.
    OwnProcessesOnly,
    /// Could not be determined (e.g. pid 1 not visible in this namespace).
    Unknown,
}

/// Validate all runtime requirements
///
/// Privileges are not checked here: an unprivileged scan is normal, and the
/// fd-table probe already warns when it matters.
pub fn validate_requirements(proc_root: &Path) -> Result<FdAccess, ValidationError> {
    debug!("Validating runtime requirements for {}", proc_root.display());

    check_proc_root(proc_root)?;
    let access = check_fd_access(proc_root);

    info!("Runtime requirements validated");
    Ok(access)
}

/// Check if running with sufficient privileges
pub fn check_user_privileges() -> bool {
    if geteuid().is_root() {
        debug!("Running as root (uid=0)");
        true
    } else {
        warn!("Not running as root - descriptors of other users' processes will show as errors");
        false
    }
}

/// Check that the proc root exists and can be listed
fn check_proc_root(proc_root: &Path) -> Result<(), ValidationError> {
    match fs::read_dir(proc_root) {
        Ok(_) => Ok(()),
        Err(e) if e.kind() == ErrorKind::NotFound => Err(ValidationError::ProcNotFound(
            proc_root.display().to_string(),
        )),
        Err(e) => Err(ValidationError::ProcUnreadable(format!(
            "{}: {}",
            proc_root.display(),
            e
        ))),
    }
}

/// Probe whether pid 1's descriptor table is readable
fn check_fd_access(proc_root: &Path) -> FdAccess {
    let fd_dir = proc_root.join("1").join("fd");
    match fs::read_dir(&fd_dir) {
        Ok(_) => FdAccess::Full,
        Err(e) if e.kind() == ErrorKind::PermissionDenied => {
            warn!("Cannot read {} - insufficient permissions", fd_dir.display());
            warn!("   Only descriptors of your own processes will be listed");
            warn!("   Solutions: run as root, or grant cap_dac_read_search,cap_sys_ptrace");
            FdAccess::OwnProcessesOnly
        }
        Err(e) => {
            debug!("Could not probe {}: {}", fd_dir.display(), e);
            FdAccess::Unknown
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ValidationError {
    #[error("proc filesystem not found at {0}")]
    ProcNotFound(String),

    #[error("proc filesystem not readable: {0}")]
    ProcUnreadable(String),
}
