//! Single-entry decoding: stored passthrough, real inflation, and the
//! heuristic recovery chain for compressed payloads that cannot be inflated.

use log::{debug, warn};
use regex::Regex;

use crate::container::{CompressionMethod, ContainerEntry};
use crate::error::{ExtractError, Result};
use crate::inflate::Inflate;

/// Minimum residue length for the printable-byte fallback to count as a
/// recovery rather than a failure.
pub const MIN_RECOVERED_LEN: usize = 50;

/// Text decoded from one entry, tagged with how trustworthy it is.
///
/// A `Decoded` value came from the payload itself (stored bytes or a real
/// inflate). A `Recovered` value came from a heuristic pass over compressed
/// bytes and is a best-effort approximation, not a correctness guarantee.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DecodeOutcome {
    Decoded(String),
    Recovered(String),
}

impl DecodeOutcome {
    pub fn text(&self) -> &str {
        match self {
            DecodeOutcome::Decoded(text) | DecodeOutcome::Recovered(text) => text,
        }
    }

    pub fn into_text(self) -> String {
        match self {
            DecodeOutcome::Decoded(text) | DecodeOutcome::Recovered(text) => text,
        }
    }

    pub fn is_exact(&self) -> bool {
        matches!(self, DecodeOutcome::Decoded(_))
    }

    /// Replace the text, keeping the fidelity tag.
    pub fn map_text(self, f: impl FnOnce(&str) -> String) -> Self {
        match self {
            DecodeOutcome::Decoded(text) => DecodeOutcome::Decoded(f(&text)),
            DecodeOutcome::Recovered(text) => DecodeOutcome::Recovered(f(&text)),
        }
    }
}

/// Decoder for one container entry at a time.
pub struct EntryDecompressor<I: Inflate> {
    inflater: I,
    run_pattern: Regex,
    fragment_pattern: Regex,
}

impl<I: Inflate> EntryDecompressor<I> {
    pub fn new(inflater: I) -> Self {
        Self {
            inflater,
            run_pattern: Regex::new(r"<w:t[^>]*>([^<]+)</w:t>").expect("static pattern"),
            fragment_pattern: Regex::new(r">([^<]{3,})<").expect("static pattern"),
        }
    }

    /// Decode the entry's logical text content out of the original buffer.
    ///
    /// - `Stored` payloads decode directly as UTF-8.
    /// - `Deflate` payloads go through the [`Inflate`] capability; when that
    ///   fails, the heuristic chain below takes over.
    /// - Any other declared method is an immediate error with no fallback.
    pub async fn decode(&self, entry: &ContainerEntry, data: &[u8]) -> Result<DecodeOutcome> {
        let payload = entry.payload(data)?;

        match entry.compression_method {
            CompressionMethod::Stored => Ok(DecodeOutcome::Decoded(
                String::from_utf8_lossy(payload).into_owned(),
            )),
            CompressionMethod::Deflate => self.inflate_or_recover(entry, payload).await,
            CompressionMethod::Unsupported(method) => Err(ExtractError::Decompression(format!(
                "unsupported compression method: {method}"
            ))),
        }
    }

    async fn inflate_or_recover(
        &self,
        entry: &ContainerEntry,
        payload: &[u8],
    ) -> Result<DecodeOutcome> {
        match self.inflater.inflate_raw(payload).await {
            Ok(inflated) => {
                debug!(
                    "inflated {} from {} to {} bytes",
                    entry.name,
                    payload.len(),
                    inflated.len()
                );
                Ok(DecodeOutcome::Decoded(
                    String::from_utf8_lossy(&inflated).into_owned(),
                ))
            }
            Err(err) => {
                warn!(
                    "inflate failed for {}: {err}; attempting heuristic recovery",
                    entry.name
                );
                self.recover_from_compressed(payload)
            }
        }
    }

    /// Best-effort text recovery from bytes that should have been inflated.
    ///
    /// Deflate output occasionally leaves literal stretches of the source
    /// markup readable in the compressed stream. Decode the compressed bytes
    /// permissively, scan for inline text runs and for readable fragments
    /// between angle brackets, and fall back to stripping non-printable
    /// bytes when neither pattern matches anything.
    fn recover_from_compressed(&self, payload: &[u8]) -> Result<DecodeOutcome> {
        let text = String::from_utf8_lossy(payload);

        let mut fragments: Vec<String> = Vec::new();
        for pattern in [&self.run_pattern, &self.fragment_pattern] {
            for caps in pattern.captures_iter(&text) {
                let fragment = caps[1].trim();
                if fragment.len() > 2 {
                    fragments.push(fragment.to_string());
                }
            }
        }

        if !fragments.is_empty() {
            debug!(
                "recovered {} readable fragments from compressed payload",
                fragments.len()
            );
            return Ok(DecodeOutcome::Recovered(fragments.join(" ")));
        }

        let residue = strip_binary(payload);
        if residue.len() > MIN_RECOVERED_LEN {
            debug!("recovered {} printable characters from payload", residue.len());
            return Ok(DecodeOutcome::Recovered(residue));
        }

        Err(ExtractError::Decompression(
            "could not recover readable text from compressed data".to_string(),
        ))
    }
}

/// Strip a buffer down to its printable-ASCII residue, whitespace collapsed.
pub fn strip_binary(data: &[u8]) -> String {
    let printable: String = data
        .iter()
        .map(|&byte| match byte {
            0x20..=0x7E => byte as char,
            _ => ' ',
        })
        .collect();
    printable.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::inflate::{DisabledInflater, Flate2Inflater};
    use flate2::Compression;
    use flate2::write::DeflateEncoder;
    use std::io::Write;

    fn entry(method: CompressionMethod, payload_len: usize) -> ContainerEntry {
        ContainerEntry {
            name: "word/document.xml".to_string(),
            compression_method: method,
            compressed_size: payload_len as u32,
            uncompressed_size: 0,
            data_offset: 0,
            checksum: 0,
            last_mod_time: 0,
            last_mod_date: 0,
        }
    }

    #[tokio::test]
    async fn stored_payload_round_trips() {
        let data = b"Hello World";
        let decompressor = EntryDecompressor::new(Flate2Inflater);

        let outcome = decompressor
            .decode(&entry(CompressionMethod::Stored, data.len()), data)
            .await
            .unwrap();

        assert_eq!(outcome, DecodeOutcome::Decoded("Hello World".to_string()));
    }

    #[tokio::test]
    async fn deflate_payload_inflates_to_the_original_markup() {
        let markup = "<w:document><w:body><w:p><w:r><w:t>Senior Rust Engineer</w:t></w:r></w:p></w:body></w:document>";
        let mut encoder = DeflateEncoder::new(Vec::new(), Compression::default());
        encoder.write_all(markup.as_bytes()).unwrap();
        let data = encoder.finish().unwrap();

        let decompressor = EntryDecompressor::new(Flate2Inflater);
        let outcome = decompressor
            .decode(&entry(CompressionMethod::Deflate, data.len()), &data)
            .await
            .unwrap();

        assert_eq!(outcome, DecodeOutcome::Decoded(markup.to_string()));
    }

    #[tokio::test]
    async fn unsupported_method_fails_without_fallback() {
        let data = b"<w:t>this text would be recoverable</w:t>";
        let decompressor = EntryDecompressor::new(Flate2Inflater);

        let err = decompressor
            .decode(&entry(CompressionMethod::Unsupported(99), data.len()), data)
            .await
            .unwrap_err();

        assert!(matches!(err, ExtractError::Decompression(_)));
        assert!(err.to_string().contains("unsupported compression method: 99"));
    }

    #[tokio::test]
    async fn missing_capability_recovers_inline_markup_runs() {
        let data = b"\x01\x02<w:t>Software Engineer</w:t>\x03<w:t xml:space=\"preserve\">Rust</w:t>";
        let decompressor = EntryDecompressor::new(DisabledInflater);

        let outcome = decompressor
            .decode(&entry(CompressionMethod::Deflate, data.len()), data)
            .await
            .unwrap();

        assert!(!outcome.is_exact());
        assert!(outcome.text().contains("Software Engineer"));
        assert!(outcome.text().contains("Rust"));
    }

    #[tokio::test]
    async fn missing_capability_and_unreadable_payload_is_an_error() {
        let data = [0x01u8, 0x02, 0x03, 0x04, 0x05, 0x06, 0x07, 0x08];
        let decompressor = EntryDecompressor::new(DisabledInflater);

        let err = decompressor
            .decode(&entry(CompressionMethod::Deflate, data.len()), &data)
            .await
            .unwrap_err();

        assert!(matches!(err, ExtractError::Decompression(_)));
    }

    #[tokio::test]
    async fn declared_size_past_buffer_is_a_structural_error() {
        let data = b"short";
        let decompressor = EntryDecompressor::new(Flate2Inflater);

        let err = decompressor
            .decode(&entry(CompressionMethod::Stored, 100), data)
            .await
            .unwrap_err();

        assert!(matches!(err, ExtractError::Structural(_)));
    }

    #[test]
    fn strip_binary_keeps_printable_residue_only() {
        let data = b"\x00\x01Jane Doe\x02\x03  Senior\tEngineer\x7F";
        assert_eq!(strip_binary(data), "Jane Doe Senior Engineer");
        assert_eq!(strip_binary(&[0x00, 0x01, 0x02]), "");
    }
}
