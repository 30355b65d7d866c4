//! Text-run extraction from WordprocessingML markup.

use log::debug;
use regex::Regex;

use crate::error::{ExtractError, Result};

/// Minimum length for the strip-all-tags fallback to count as extracted
/// text rather than noise.
pub const MIN_STRIPPED_LEN: usize = 100;

/// Pulls the visible text out of document-body markup, in document order.
///
/// WordprocessingML wraps every piece of visible text in a `w:t` run. The
/// extractor captures each run's inner content, decodes the XML entities
/// the format escapes, and joins the runs with single spaces. Markup with
/// no recognizable runs gets one indiscriminate strip-all-tags pass before
/// being rejected.
pub struct MarkupTextExtractor {
    run_pattern: Regex,
    tag_pattern: Regex,
}

impl Default for MarkupTextExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl MarkupTextExtractor {
    pub fn new() -> Self {
        Self {
            run_pattern: Regex::new(r"<w:t[^>]*>([^<]*)</w:t>").expect("static pattern"),
            tag_pattern: Regex::new(r"<[^>]*>").expect("static pattern"),
        }
    }

    /// Concatenated visible text of every text run, whitespace collapsed.
    pub fn extract(&self, markup: &str) -> Result<String> {
        let mut runs: Vec<String> = Vec::new();
        for caps in self.run_pattern.captures_iter(markup) {
            let run = &caps[1];
            if !run.trim().is_empty() {
                runs.push(decode_entities(run));
            }
        }

        if !runs.is_empty() {
            debug!("found {} text runs in markup", runs.len());
            return Ok(collapse_whitespace(&runs.join(" ")));
        }

        // No runs at all. Strip every tag indiscriminately and keep the
        // result only if enough text survives to be plausible content.
        debug!("no text runs found, stripping tags indiscriminately");
        let stripped = collapse_whitespace(&self.tag_pattern.replace_all(markup, " "));
        if stripped.len() > MIN_STRIPPED_LEN {
            return Ok(stripped);
        }

        Err(ExtractError::ContentQuality(
            "no text content found in document markup".to_string(),
        ))
    }
}

/// Decode the XML entities WordprocessingML escapes in run content.
fn decode_entities(text: &str) -> String {
    text.replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&amp;", "&")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
}

fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}
