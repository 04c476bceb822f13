//! Document Text Extractor — turns an uploaded file into plain text.
//!
//! Dispatch is by file extension only. PDF text extraction is delegated to `pdf-extract`;
//! Word documents are not supported.

use std::path::Path;

use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error, PartialEq)]
pub enum DocumentError {
    #[error("Unsupported file format '{0}'. Upload a PDF, TXT or MD file")]
    UnsupportedFormat(String),

    #[error("PDF extraction failed: {0}")]
    Pdf(String),

    #[error("File is not valid UTF-8 text: {0}")]
    InvalidText(#[from] std::str::Utf8Error),
}

/// Extracts the text layer of a document. Implementations are synchronous and may be
/// CPU-heavy; async callers should run them on a blocking thread.
pub trait DocumentTextExtractor: Send + Sync {
    fn extract_text(&self, file_name: &str, bytes: &[u8]) -> Result<String, DocumentError>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentKind {
    Pdf,
    PlainText,
}

impl DocumentKind {
    pub fn from_file_name(file_name: &str) -> Result<Self, DocumentError> {
        let extension = Path::new(file_name)
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase)
            .unwrap_or_default();

        match extension.as_str() {
            "pdf" => Ok(DocumentKind::Pdf),
            "txt" | "md" => Ok(DocumentKind::PlainText),
            "" => Err(DocumentError::UnsupportedFormat(file_name.to_string())),
            other => Err(DocumentError::UnsupportedFormat(other.to_string())),
        }
    }
}

/// Default extractor: picks a strategy from the file extension.
#[derive(Debug, Default, Clone, Copy)]
pub struct FileTypeExtractor;

impl DocumentTextExtractor for FileTypeExtractor {
    fn extract_text(&self, file_name: &str, bytes: &[u8]) -> Result<String, DocumentError> {
        let kind = DocumentKind::from_file_name(file_name)?;
        debug!("Extracting text from {file_name} ({kind:?}, {} bytes)", bytes.len());

        match kind {
            DocumentKind::Pdf => pdf_extract::extract_text_from_mem(bytes)
                .map_err(|e| DocumentError::Pdf(e.to_string())),
            DocumentKind::PlainText => {
                let text = std::str::from_utf8(bytes)?;
                Ok(text.trim_start_matches('\u{feff}').to_string())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_from_extension() {
        assert_eq!(DocumentKind::from_file_name("cv.PDF"), Ok(DocumentKind::Pdf));
        assert_eq!(DocumentKind::from_file_name("notes.md"), Ok(DocumentKind::PlainText));
        assert_eq!(
            DocumentKind::from_file_name("resume.docx"),
            Err(DocumentError::UnsupportedFormat("docx".into()))
        );
        assert_eq!(
            DocumentKind::from_file_name("resume"),
            Err(DocumentError::UnsupportedFormat("resume".into()))
        );
    }

    #[test]
    fn test_plain_text_is_decoded() {
        let text = FileTypeExtractor
            .extract_text("resume.txt", "\u{feff}Skills: Rust".as_bytes())
            .unwrap();
        assert_eq!(text, "Skills: Rust");
    }

    #[test]
    fn test_invalid_utf8_is_rejected() {
        let result = FileTypeExtractor.extract_text("resume.txt", &[0xff, 0xfe, 0x00]);
        assert!(matches!(result, Err(DocumentError::InvalidText(_))));
    }

    #[test]
    fn test_garbage_pdf_is_an_extraction_error() {
        let result = FileTypeExtractor.extract_text("resume.pdf", b"not a pdf");
        assert!(matches!(result, Err(DocumentError::Pdf(_))));
    }

    #[test]
    fn test_doc_is_unsupported() {
        let result = FileTypeExtractor.extract_text("resume.doc", b"binary");
        assert_eq!(result, Err(DocumentError::UnsupportedFormat("doc".into())));
    }
}
