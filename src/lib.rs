//! # cvtext
//!
//! Extract plain text from resume documents for downstream matching and
//! document-generation pipelines.
//!
//! The interesting part of this crate is a self-contained reader for the
//! ZIP-based container format underlying modern word-processing documents:
//! a manual local-file-header scanner, an entry decompressor handling both
//! stored and deflate-compressed entries, a WordprocessingML text-run
//! extractor, and a cascading fallback chain that degrades gracefully when
//! any stage fails. No platform document-parsing library is assumed; real
//! decompression is an injected capability, and when it is unavailable or
//! fails, heuristic recovery scrapes whatever readable text the raw bytes
//! still contain.
//!
//! ## Features
//!
//! - Decode DOCX-style containers without trusting the central directory
//! - Plain-text passthrough and legacy binary recovery via the same
//!   dispatcher
//! - Results tagged by fidelity: exact decodes vs. heuristic recoveries
//! - Actionable, typed errors for every failure class
//!
//! ## Example
//!
//! ```no_run
//! use cvtext::{FormatDispatcher, SourceHint};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let data = tokio::fs::read("resume.docx").await?;
//!
//!     let dispatcher = FormatDispatcher::new();
//!     let outcome = dispatcher
//!         .read_to_text(&data, &SourceHint::new("resume.docx"))
//!         .await?;
//!
//!     println!("{}", outcome.text());
//!     Ok(())
//! }
//! ```

pub mod cli;
pub mod container;
pub mod dispatch;
pub mod error;
pub mod extract;
pub mod inflate;

pub use cli::Cli;
pub use container::{CompressionMethod, ContainerEntry, LocalHeaderScanner};
pub use dispatch::{DocumentKind, FormatDispatcher, SourceHint, normalize_whitespace};
pub use error::{ExtractError, Result};
pub use extract::{DecodeOutcome, ExtractionPipeline, MarkupTextExtractor};
pub use inflate::{DisabledInflater, Flate2Inflater, Inflate};
