//! Error types for resume text extraction.
//!
//! Every failure the decoder can produce falls into one of four classes, so
//! callers can decide whether to try another strategy or surface the message
//! to the user.

/// Result type alias for extraction operations.
pub type Result<T> = std::result::Result<T, ExtractError>;

/// Error classes produced by the container decoder and format dispatcher.
#[derive(Debug, thiserror::Error)]
pub enum ExtractError {
    /// The container has no parsable entries, the document-body entry is
    /// absent, or an entry's declared sizes run past the buffer.
    #[error("invalid document container: {0}")]
    Structural(String),

    /// The declared compression method is unsupported, or decompression and
    /// every heuristic fallback failed.
    #[error("decompression failed: {0}")]
    Decompression(String),

    /// Parsing succeeded mechanically but produced no meaningful text.
    #[error("no usable text: {0}")]
    ContentQuality(String),

    /// The declared format has no decoder at all.
    #[error("unsupported format: {0}")]
    FormatUnsupported(String),
}

impl ExtractError {
    /// Concrete remediation the user can act on, suitable for appending to
    /// the final error message.
    pub fn remediation(&self) -> &'static str {
        match self {
            ExtractError::Structural(_) | ExtractError::Decompression(_) => {
                "convert the document to plain text (.txt) and upload it again"
            }
            ExtractError::ContentQuality(_) => {
                "make sure the document contains readable text, or save it as a .txt file"
            }
            ExtractError::FormatUnsupported(_) => {
                "export the file as a .docx document or copy its text into a .txt file"
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_carry_the_reason() {
        let err = ExtractError::Decompression("unsupported compression method: 99".to_string());
        assert!(err.to_string().contains("unsupported compression method: 99"));
    }

    #[test]
    fn every_class_has_a_remediation() {
        let errors = [
            ExtractError::Structural(String::new()),
            ExtractError::Decompression(String::new()),
            ExtractError::ContentQuality(String::new()),
            ExtractError::FormatUnsupported(String::new()),
        ];
        for err in errors {
            assert!(!err.remediation().is_empty());
        }
    }
}
