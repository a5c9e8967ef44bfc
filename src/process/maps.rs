//! File-backed memory mappings from `/proc/<pid>/maps`.
//!
//! Line format: `address perms offset dev inode pathname`, e.g.
//! `7f3a1c000000-7f3a1c021000 r--p 00002000 08:01 1835043    /usr/lib/libc.so.6`.
//! Only lines whose pathname is absolute produce an entry; `[heap]`,
//! `[stack]`, `[vdso]` and anonymous regions are skipped.

/// One file-backed mapping.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MapEntry {
    pub offset: u64,
    /// Device as `"<major>,<minor>"` in decimal.
    pub device: String,
    pub inode: u64,
    pub path: String,
}

/// Parses a single maps line. Returns `None` for non-file mappings and for
/// lines that do not have the expected shape.
pub fn parse_maps_line(line: &str) -> Option<MapEntry> {
    // The first five fields are single-space separated; the pathname column
    // is padded and may itself contain spaces.
    let mut fields = line.splitn(6, ' ');
    let _range = fields.next()?;
    let _perms = fields.next()?;
    let offset = fields.next()?;
    let dev = fields.next()?;
    let inode = fields.next()?;
    let path = fields.next()?.trim();

    if !path.starts_with('/') {
        return None;
    }

    let offset = u64::from_str_radix(offset, 16).ok()?;
    let (dev_major, dev_minor) = dev.split_once(':')?;
    let dev_major = u32::from_str_radix(dev_major, 16).ok()?;
    let dev_minor = u32::from_str_radix(dev_minor, 16).ok()?;
    let inode = inode.parse().ok()?;

    Some(MapEntry {
        offset,
        device: format!("{},{}", dev_major, dev_minor),
        inode,
        path: path.to_string(),
    })
}

/// Parses every file-backed mapping of a maps table, in table order.
pub fn parse_maps(content: &str) -> Vec<MapEntry> {
    content.lines().filter_map(parse_maps_line).collect()
}
