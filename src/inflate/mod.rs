//! Decompression capability for deflate-compressed entries.
//!
//! Whether real inflate support exists is a property of the runtime, not of
//! any one decode call, so it is modeled as a strategy selected at startup
//! and injected into the decoder. The decoder itself never asks "is a
//! decompression library loaded" — it calls the capability and falls back to
//! heuristic recovery when the call fails.

use async_trait::async_trait;
use flate2::read::DeflateDecoder;
use std::io::Read;

/// Capability for raw deflate (RFC 1951) decompression.
///
/// Container entries use raw deflate with no zlib/gzip framing. The single
/// async call is the decoder's only suspension point.
#[async_trait]
pub trait Inflate: Send + Sync {
    /// Inflate a raw deflate stream into its uncompressed bytes.
    async fn inflate_raw(&self, data: &[u8]) -> std::io::Result<Vec<u8>>;
}

/// Real inflation backed by flate2.
#[derive(Debug, Default, Clone, Copy)]
pub struct Flate2Inflater;

#[async_trait]
impl Inflate for Flate2Inflater {
    async fn inflate_raw(&self, data: &[u8]) -> std::io::Result<Vec<u8>> {
        let mut out = Vec::with_capacity(data.len().saturating_mul(3));
        DeflateDecoder::new(data).read_to_end(&mut out)?;
        Ok(out)
    }
}

/// Stand-in for a runtime with no decompression support.
///
/// Every call fails, which forces the decoder down its heuristic recovery
/// chain — the same degradation a caller gets when real inflation errors on
/// a corrupt stream.
#[derive(Debug, Default, Clone, Copy)]
pub struct DisabledInflater;

#[async_trait]
impl Inflate for DisabledInflater {
    async fn inflate_raw(&self, _data: &[u8]) -> std::io::Result<Vec<u8>> {
        Err(std::io::Error::new(
            std::io::ErrorKind::Unsupported,
            "deflate decompression capability is not available",
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use flate2::Compression;
    use flate2::write::DeflateEncoder;
    use std::io::Write;

    #[tokio::test]
    async fn flate2_inflater_round_trips_raw_deflate() {
        let mut encoder = DeflateEncoder::new(Vec::new(), Compression::default());
        encoder.write_all(b"resume body text").unwrap();
        let compressed = encoder.finish().unwrap();

        let inflated = Flate2Inflater.inflate_raw(&compressed).await.unwrap();
        assert_eq!(inflated, b"resume body text");
    }

    #[tokio::test]
    async fn flate2_inflater_rejects_garbage() {
        assert!(Flate2Inflater.inflate_raw(&[0xFF; 16]).await.is_err());
    }

    #[tokio::test]
    async fn disabled_inflater_always_fails() {
        assert!(DisabledInflater.inflate_raw(b"anything").await.is_err());
    }
}
