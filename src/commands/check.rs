//! Check command implementation.
//!
//! Validates /proc access, privileges and configuration.

use herakles_lsof::{enumerate_process, process::collect_pids, Descriptor, FsProcSource};

use crate::config::{validate_effective_config, Config};
use crate::startup_checks::{check_user_privileges, validate_requirements, FdAccess};

/// Validates system requirements and configuration.
/// Returns `false` if any hard check failed.
pub fn command_check(config: &Config) -> anyhow::Result<bool> {
    println!("🔍 Herakles lsof - System Check");
    println!("================================");

    let mut all_ok = true;
    let proc_root = config.proc_root();

    println!("\n👤 Checking privileges...");
    if check_user_privileges() {
        println!("   ✅ Running as root");
    } else {
        println!("   ⚠️  Not running as root - other users' descriptors will show as errors");
    }

    println!("\n📁 Checking {} ...", proc_root.display());
    match validate_requirements(&proc_root) {
        Ok(access) => {
            println!("   ✅ proc filesystem accessible");
            match access {
                FdAccess::Full => println!("   ✅ Descriptor table of pid 1 readable"),
                FdAccess::OwnProcessesOnly => {
                    println!("   ⚠️  Descriptor table of pid 1 not readable (own processes only)")
                }
                FdAccess::Unknown => println!("   ⚠️  Could not probe descriptor table of pid 1"),
            }
        }
        Err(e) => {
            println!("   ❌ {}", e);
            all_ok = false;
        }
    }

    let source = FsProcSource::new(&proc_root);
    if all_ok {
        let pids = collect_pids(&source);
        if pids.is_empty() {
            println!("   ❌ No process entries found");
            all_ok = false;
        } else {
            println!("   ✅ Found {} process entries", pids.len());
        }

        // Our own process is always readable through the live /proc
        let own_pid = std::process::id();
        if pids.contains(&own_pid) {
            let records = enumerate_process(&source, own_pid);
            let errors = records
                .iter()
                .filter(|r| r.descriptor == Descriptor::NoFd)
                .count();
            println!(
                "   ✅ Own process (PID {}): {} records, {} lookup errors",
                own_pid,
                records.len(),
                errors
            );
        }
    }

    println!("\n⚙️  Checking configuration...");
    match validate_effective_config(config) {
        Ok(_) => println!("   ✅ Configuration is valid"),
        Err(e) => {
            println!("   ❌ Configuration invalid: {}", e);
            all_ok = false;
        }
    }

    println!("\n📋 Summary:");
    if all_ok {
        println!("   ✅ All checks passed - system is ready");
    } else {
        println!("   ❌ Some checks failed - please review warnings");
    }
    Ok(all_ok)
}
