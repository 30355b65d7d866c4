//! The decode pipeline: scan the container, locate the document body,
//! decompress it, and extract its text.

use log::debug;

use crate::container::LocalHeaderScanner;
use crate::error::{ExtractError, Result};
use crate::extract::decompressor::{DecodeOutcome, EntryDecompressor};
use crate::extract::markup::MarkupTextExtractor;
use crate::inflate::{Flate2Inflater, Inflate};

/// Internal path of the document-body part inside the container.
pub const DOCUMENT_BODY_PATH: &str = "word/document.xml";

/// Minimum extracted length for a decode to count as meaningful content.
pub const MIN_BODY_TEXT_LEN: usize = 50;

/// Scanner → decompressor → markup extractor, with the quality gate at the
/// end.
///
/// The pipeline makes no retry attempts of its own: each stage fails fast
/// with a specific reason, and the caller decides whether to try a cruder
/// strategy over the whole buffer. Every invocation is independent and
/// stateless, so one pipeline value can decode any number of buffers,
/// concurrently if the caller wants.
pub struct ExtractionPipeline<I: Inflate> {
    scanner: LocalHeaderScanner,
    decompressor: EntryDecompressor<I>,
    markup: MarkupTextExtractor,
}

impl ExtractionPipeline<Flate2Inflater> {
    /// Pipeline with real inflation.
    pub fn new() -> Self {
        Self::with_inflater(Flate2Inflater)
    }
}

impl Default for ExtractionPipeline<Flate2Inflater> {
    fn default() -> Self {
        Self::new()
    }
}

impl<I: Inflate> ExtractionPipeline<I> {
    /// Pipeline with an explicit decompression capability.
    pub fn with_inflater(inflater: I) -> Self {
        Self {
            scanner: LocalHeaderScanner,
            decompressor: EntryDecompressor::new(inflater),
            markup: MarkupTextExtractor::new(),
        }
    }

    /// Decode the document-body text out of a word-processing container.
    ///
    /// Stages, in order:
    ///
    /// 1. scan the buffer for container entries
    /// 2. locate the document-body entry by name
    /// 3. decompress it (possibly via heuristic recovery)
    /// 4. extract the markup's text runs
    /// 5. reject results under [`MIN_BODY_TEXT_LEN`] characters
    ///
    /// The fidelity tag of the decompression stage survives to the result:
    /// text that passed through heuristic recovery stays `Recovered`.
    pub async fn extract(&self, data: &[u8]) -> Result<DecodeOutcome> {
        let entries = self.scanner.scan(data);
        debug!("container scan found {} entries", entries.len());

        let body = entries
            .iter()
            .find(|e| e.name == DOCUMENT_BODY_PATH || e.name.ends_with("document.xml"))
            .ok_or_else(|| {
                ExtractError::Structural("document body entry not found".to_string())
            })?;
        debug!(
            "document body entry: {} ({} bytes, {})",
            body.name, body.compressed_size, body.compression_method
        );

        let outcome = self.decompressor.decode(body, data).await?;

        let text = self.markup.extract(outcome.text())?;
        if text.len() < MIN_BODY_TEXT_LEN {
            return Err(ExtractError::ContentQuality(
                "no meaningful text content found".to_string(),
            ));
        }
        debug!("extracted {} characters of body text", text.len());

        Ok(outcome.map_text(move |_| text))
    }
}
