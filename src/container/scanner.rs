//! Local-file-header scan over a container buffer.
//!
//! This is the flat-stream enumeration strategy described in the module
//! docs: walk forward from offset 0 looking for header signatures instead of
//! trusting the central directory at the end of the archive.

use log::debug;

use crate::error::Result;

use super::reader::{read_str, read_u16_le, read_u32_le};
use super::structures::*;

/// Entry enumeration that reads local file headers only.
///
/// The archive's central directory is deliberately ignored: uploaded files
/// may be truncated before it, or carry a directory that disagrees with the
/// headers. Scanning is resilient instead of strict — a header that cannot
/// be parsed is skipped by advancing a single byte, so valid entries later
/// in the stream are still found.
///
/// ## Example
///
/// ```ignore
/// let entries = LocalHeaderScanner::default().scan(&data);
/// let body = entries.iter().find(|e| e.name == "word/document.xml");
/// ```
#[derive(Debug, Default, Clone, Copy)]
pub struct LocalHeaderScanner;

impl LocalHeaderScanner {
    /// Enumerate candidate entries in the buffer.
    ///
    /// Starting at offset 0, repeatedly read a 4-byte signature:
    ///
    /// - local-file-header signature: parse the header and the variable
    ///   name/extra fields, emit one [`ContainerEntry`], and jump the cursor
    ///   past the entry's payload
    /// - central-directory signature: stop, everything of interest has
    ///   already been found
    /// - anything else: advance one byte and retry, which tolerates leading
    ///   garbage and misalignment
    ///
    /// The cursor strictly increases every iteration, so the scan terminates
    /// on any finite buffer and returns a (possibly empty) entry list rather
    /// than an error.
    pub fn scan(&self, data: &[u8]) -> Vec<ContainerEntry> {
        let mut entries = Vec::new();
        let mut offset = 0usize;

        while offset + 4 <= data.len() {
            let Ok(signature) = read_u32_le(data, offset) else {
                break;
            };

            if signature == LOCAL_HEADER_SIGNATURE {
                match parse_local_header(data, offset) {
                    Ok(entry) => {
                        debug!(
                            "found entry {} ({} bytes, {})",
                            entry.name, entry.compressed_size, entry.compression_method
                        );
                        // Skip over the payload; never move backwards even
                        // if the header declares nonsense.
                        let next =
                            entry.data_offset as usize + entry.compressed_size as usize;
                        offset = next.max(offset + 1);
                        entries.push(entry);
                    }
                    Err(err) => {
                        debug!("skipping unparsable header at offset {offset}: {err}");
                        offset += 1;
                    }
                }
            } else if signature == CENTRAL_DIR_SIGNATURE {
                break;
            } else {
                offset += 1;
            }
        }

        entries
    }
}

/// Parse the fixed header fields and variable name/extra fields at `offset`.
///
/// Field layout (relative to the signature): version 4, flags 6, method 8,
/// mod time 10, mod date 12, crc32 14, compressed size 18, uncompressed
/// size 22, name length 26, extra length 28; name and extra field follow the
/// 30-byte fixed portion, in that order, with the payload after them.
fn parse_local_header(data: &[u8], offset: usize) -> Result<ContainerEntry> {
    let _version = read_u16_le(data, offset + 4)?;
    let _flags = read_u16_le(data, offset + 6)?;
    let method = read_u16_le(data, offset + 8)?;
    let last_mod_time = read_u16_le(data, offset + 10)?;
    let last_mod_date = read_u16_le(data, offset + 12)?;
    let checksum = read_u32_le(data, offset + 14)?;
    let compressed_size = read_u32_le(data, offset + 18)?;
    let uncompressed_size = read_u32_le(data, offset + 22)?;
    let name_len = read_u16_le(data, offset + 26)? as usize;
    let extra_len = read_u16_le(data, offset + 28)? as usize;

    let name_offset = offset + LOCAL_HEADER_SIZE;
    let name = read_str(data, name_offset, name_len)?;

    let data_offset = u32::try_from(name_offset + name_len + extra_len).map_err(|_| {
        crate::error::ExtractError::Structural(format!(
            "entry {name} starts beyond the addressable range"
        ))
    })?;

    Ok(ContainerEntry {
        name,
        compression_method: CompressionMethod::from_u16(method),
        compressed_size,
        uncompressed_size,
        data_offset,
        checksum,
        last_mod_time,
        last_mod_date,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::container::testutil::{central_dir_marker, local_entry};

    #[test]
    fn finds_a_stored_entry() {
        let data = local_entry("word/document.xml", 0, b"Hello World");

        let entries = LocalHeaderScanner::default().scan(&data);

        assert_eq!(entries.len(), 1);
        let entry = &entries[0];
        assert_eq!(entry.name, "word/document.xml");
        assert_eq!(entry.compression_method, CompressionMethod::Stored);
        assert_eq!(entry.compressed_size, 11);
        assert_eq!(entry.payload(&data).unwrap(), b"Hello World");
    }

    #[test]
    fn finds_consecutive_entries() {
        let mut data = local_entry("word/document.xml", 8, &[0xAB; 32]);
        data.extend_from_slice(&local_entry("word/styles.xml", 0, b"styles"));

        let entries = LocalHeaderScanner::default().scan(&data);

        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].name, "word/document.xml");
        assert_eq!(entries[1].name, "word/styles.xml");
    }

    #[test]
    fn terminates_on_a_buffer_with_no_signatures() {
        let entries = LocalHeaderScanner::default().scan(&vec![0xAA; 4096]);
        assert!(entries.is_empty());

        let entries = LocalHeaderScanner::default().scan(&[]);
        assert!(entries.is_empty());
    }

    #[test]
    fn tolerates_leading_garbage() {
        let mut data = vec![0x00, 0x13, 0x37, 0x50, 0x4B];
        data.extend_from_slice(&local_entry("word/document.xml", 0, b"payload"));

        let entries = LocalHeaderScanner::default().scan(&data);

        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].name, "word/document.xml");
    }

    #[test]
    fn stops_at_the_central_directory() {
        let mut data = local_entry("word/document.xml", 0, b"payload");
        data.extend_from_slice(&central_dir_marker());
        data.extend_from_slice(&local_entry("ignored.xml", 0, b"unreached"));

        let entries = LocalHeaderScanner::default().scan(&data);

        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].name, "word/document.xml");
    }

    #[test]
    fn skips_a_header_whose_name_runs_past_the_buffer() {
        let mut data = local_entry("a.txt", 0, b"x");
        // Corrupt the name length field (offset 26) to an impossible value.
        data[26] = 0xFF;
        data[27] = 0xFF;

        let entries = LocalHeaderScanner::default().scan(&data);
        assert!(entries.is_empty());
    }

    #[test]
    fn recovers_entries_after_a_corrupt_header() {
        let mut data = local_entry("a.txt", 0, b"x");
        data[26] = 0xFF;
        data[27] = 0xFF;
        data.extend_from_slice(&local_entry("word/document.xml", 0, b"payload"));

        let entries = LocalHeaderScanner::default().scan(&data);

        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].name, "word/document.xml");
    }
}
