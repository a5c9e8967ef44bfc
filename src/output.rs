//! Rendering of open-file records.
//!
//! The table layout mirrors lsof: fixed minimum column widths, COMMAND
//! left-justified, NAME unpadded as the last column.

use crate::record::FileRecord;
use serde::{Deserialize, Serialize};
use std::io::{self, Write};

/// Output format for scan results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Table,
    Json,
}

/// Formats one table row from already-rendered column values.
#[allow(clippy::too_many_arguments)]
fn format_row(
    command: &str,
    pid: &str,
    user: &str,
    fd: &str,
    file_type: &str,
    device: &str,
    size: &str,
    node: &str,
    name: &str,
) -> String {
    format!(
        "{:<21} {:>5} {:>10} {:>4} {:>9} {:>18} {:>9} {:>10} {}",
        command, pid, user, fd, file_type, device, size, node, name
    )
}

/// The fixed header row.
pub fn header_row() -> String {
    format_row(
        "COMMAND", "PID", "USER", "FD", "TYPE", "DEVICE", "SIZE/OFF", "NODE", "NAME",
    )
}

/// One table row. Unresolved command or user render as empty strings.
pub fn table_row(record: &FileRecord) -> String {
    format_row(
        record.command.as_deref().unwrap_or(""),
        &record.pid.to_string(),
        record.user.as_deref().unwrap_or(""),
        &record.descriptor.to_string(),
        record.category.type_code(),
        &record.device,
        &record.size,
        &record.inode,
        &record.name,
    )
}

/// Writes records as a text table.
pub fn write_table<W: Write>(out: &mut W, records: &[FileRecord], header: bool) -> io::Result<()> {
    if header {
        writeln!(out, "{}", header_row())?;
    }
    for record in records {
        writeln!(out, "{}", table_row(record))?;
    }
    out.flush()
}

/// Writes records as a pretty-printed JSON array.
pub fn write_json<W: Write>(out: &mut W, records: &[FileRecord]) -> io::Result<()> {
    serde_json::to_writer_pretty(&mut *out, records)?;
    writeln!(out)?;
    out.flush()
}

/// Writes records in the requested format.
pub fn write_records<W: Write>(
    out: &mut W,
    records: &[FileRecord],
    format: OutputFormat,
    header: bool,
) -> io::Result<()> {
    match format {
        OutputFormat::Table => write_table(out, records, header),
        OutputFormat::Json => write_json(out, records),
    }
}
