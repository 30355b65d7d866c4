//! Document-body text extraction.
//!
//! Three layers, each feeding the next:
//!
//! - [`decompressor`]: turns one container entry into text, with a heuristic
//!   recovery chain when real decompression is unavailable or fails
//! - [`markup`]: pulls ordered text runs out of WordprocessingML markup
//! - [`orchestrator`]: sequences scanner → decompressor → extractor and
//!   applies the minimum-content quality gate
//!
//! Everything here is a pure transformation over the input buffer; nothing
//! is retained between calls, so concurrent decodes never interfere.

mod decompressor;
mod markup;
mod orchestrator;

pub use decompressor::{DecodeOutcome, EntryDecompressor, MIN_RECOVERED_LEN, strip_binary};
pub use markup::{MIN_STRIPPED_LEN, MarkupTextExtractor};
pub use orchestrator::{DOCUMENT_BODY_PATH, ExtractionPipeline, MIN_BODY_TEXT_LEN};
