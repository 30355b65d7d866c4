//! Format routing for uploaded files.
//!
//! The dispatcher is the outer boundary of the decoder: it receives a raw
//! byte buffer plus a filename and/or declared media type, picks the parsing
//! path, and owns the last-resort fallback when the container pipeline
//! fails. Persistence of the extracted text is the caller's concern; nothing
//! here retains data past the call.

use log::{debug, info, warn};

use crate::error::{ExtractError, Result};
use crate::extract::{
    DecodeOutcome, ExtractionPipeline, MIN_RECOVERED_LEN, strip_binary,
};
use crate::inflate::{Flate2Inflater, Inflate};

/// Declared media type of WordprocessingML documents.
pub const WORDPROCESSING_MEDIA_TYPE: &str =
    "application/vnd.openxmlformats-officedocument.wordprocessingml.document";

/// Minimum printable residue for a legacy binary document to count as
/// readable.
pub const MIN_LEGACY_TEXT_LEN: usize = 20;

/// Filename and declared media type of an uploaded file.
///
/// Used only to pick the parsing path; the buffer itself is the source of
/// truth for everything else.
#[derive(Debug, Clone)]
pub struct SourceHint {
    file_name: String,
    media_type: Option<String>,
}

impl SourceHint {
    pub fn new(file_name: impl Into<String>) -> Self {
        Self {
            file_name: file_name.into(),
            media_type: None,
        }
    }

    pub fn with_media_type(mut self, media_type: impl Into<String>) -> Self {
        self.media_type = Some(media_type.into());
        self
    }

    pub fn file_name(&self) -> &str {
        &self.file_name
    }
}

/// Parsing path selected for an uploaded file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentKind {
    PlainText,
    WordProcessing,
    LegacyWord,
    Pdf,
    Unknown,
}

impl DocumentKind {
    /// Classify by declared media type first, filename extension second.
    pub fn detect(hint: &SourceHint) -> Self {
        let media_type = hint.media_type.as_deref().map(str::to_ascii_lowercase);
        let media_type = media_type.as_deref();
        let name = hint.file_name.to_ascii_lowercase();

        if media_type == Some("application/pdf") || name.ends_with(".pdf") {
            DocumentKind::Pdf
        } else if media_type == Some(WORDPROCESSING_MEDIA_TYPE) || name.ends_with(".docx") {
            DocumentKind::WordProcessing
        } else if name.ends_with(".doc") {
            DocumentKind::LegacyWord
        } else if media_type == Some("text/plain") || name.ends_with(".txt") {
            DocumentKind::PlainText
        } else {
            DocumentKind::Unknown
        }
    }
}

/// Routes an uploaded file to the right extraction path.
pub struct FormatDispatcher<I: Inflate> {
    pipeline: ExtractionPipeline<I>,
}

impl FormatDispatcher<Flate2Inflater> {
    /// Dispatcher with real inflation.
    pub fn new() -> Self {
        Self {
            pipeline: ExtractionPipeline::new(),
        }
    }
}

impl Default for FormatDispatcher<Flate2Inflater> {
    fn default() -> Self {
        Self::new()
    }
}

impl<I: Inflate> FormatDispatcher<I> {
    /// Dispatcher with an explicit decompression capability.
    pub fn with_inflater(inflater: I) -> Self {
        Self {
            pipeline: ExtractionPipeline::with_inflater(inflater),
        }
    }

    /// Extract whitespace-normalized text from a raw uploaded file.
    ///
    /// Routing:
    ///
    /// - plain text: passthrough, rejecting empty files
    /// - word-processing containers: the full decode pipeline, then the
    ///   whole-buffer printable heuristic as a last resort
    /// - legacy binary documents: the printable heuristic only
    /// - PDF: refused with a typed error, never parsed
    /// - anything else: treated as plain text, as the most forgiving guess
    pub async fn read_to_text(&self, data: &[u8], hint: &SourceHint) -> Result<DecodeOutcome> {
        let kind = DocumentKind::detect(hint);
        debug!("dispatching {} as {:?}", hint.file_name(), kind);

        match kind {
            DocumentKind::PlainText | DocumentKind::Unknown => plain_text(data),
            DocumentKind::WordProcessing => self.word_processing(data, hint).await,
            DocumentKind::LegacyWord => legacy_word(data),
            DocumentKind::Pdf => Err(ExtractError::FormatUnsupported(
                "PDF text extraction is not supported; export the PDF as a .docx document \
                 or copy its text into a .txt file"
                    .to_string(),
            )),
        }
    }

    async fn word_processing(&self, data: &[u8], hint: &SourceHint) -> Result<DecodeOutcome> {
        match self.pipeline.extract(data).await {
            Ok(outcome) => Ok(outcome.map_text(normalize_whitespace)),
            Err(err) => {
                warn!("container decode failed for {}: {err}", hint.file_name());

                // Last resort before surfacing the error: the printable
                // residue of the whole original buffer.
                let residue = strip_binary(data);
                if residue.len() > MIN_RECOVERED_LEN {
                    info!(
                        "recovered {} printable characters from {} after container \
                         decode failure",
                        residue.len(),
                        hint.file_name()
                    );
                    return Ok(DecodeOutcome::Recovered(normalize_whitespace(&residue)));
                }

                Err(err)
            }
        }
    }
}

fn plain_text(data: &[u8]) -> Result<DecodeOutcome> {
    let text = String::from_utf8_lossy(data);
    if text.trim().is_empty() {
        return Err(ExtractError::ContentQuality(
            "the file appears to be empty".to_string(),
        ));
    }
    Ok(DecodeOutcome::Decoded(normalize_whitespace(&text)))
}

fn legacy_word(data: &[u8]) -> Result<DecodeOutcome> {
    let residue = strip_binary(data);
    if residue.len() < MIN_LEGACY_TEXT_LEN {
        return Err(ExtractError::ContentQuality(
            "could not extract readable text from the legacy document; save it as a \
             .txt or .docx file"
                .to_string(),
        ));
    }
    Ok(DecodeOutcome::Recovered(normalize_whitespace(&residue)))
}

/// Normalize extracted text for downstream consumers: space and tab runs
/// collapse to a single space, three or more newlines collapse to a blank
/// line, and the result is trimmed.
pub fn normalize_whitespace(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut pending_newlines = 0usize;
    let mut pending_space = false;

    for c in text.chars() {
        match c {
            '\n' => pending_newlines += 1,
            '\r' => {}
            c if c.is_whitespace() => pending_space = true,
            c => {
                if pending_newlines > 0 {
                    if !out.is_empty() {
                        out.push('\n');
                        if pending_newlines > 1 {
                            out.push('\n');
                        }
                    }
                } else if pending_space && !out.is_empty() {
                    out.push(' ');
                }
                pending_newlines = 0;
                pending_space = false;
                out.push(c);
            }
        }
    }

    out
}
