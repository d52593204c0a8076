//! Resume text extraction, dispatched by file extension.
//!
//! Every path produces a single plain-text `String`. Parsing is synchronous;
//! async callers go through [`extract_text`], which runs on the blocking pool.

pub mod pdf;
pub mod plain;
pub mod word;

use std::path::Path;
use std::string::FromUtf8Error;

use bytes::Bytes;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ExtractionError {
    #[error("PDF parse error: {0}")]
    Pdf(String),

    #[error("Word document parse error: {0}")]
    Word(String),

    #[error("Invalid UTF-8 text: {0}")]
    Utf8(#[from] FromUtf8Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Extraction task failed: {0}")]
    Join(String),
}

/// Supported resume formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentKind {
    Pdf,
    Doc,
    Docx,
    Text,
}

impl DocumentKind {
    /// Infers the kind from the file extension, ignoring case.
    /// Names without an extension are unsupported.
    pub fn from_file_name(file_name: &str) -> Option<Self> {
        let extension = Path::new(file_name)
            .extension()
            .and_then(|v| v.to_str())
            .map(|v| v.to_ascii_lowercase())?;

        match extension.as_str() {
            "pdf" => Some(Self::Pdf),
            "doc" => Some(Self::Doc),
            "docx" => Some(Self::Docx),
            "txt" => Some(Self::Text),
            _ => None,
        }
    }

    pub fn suffix(&self) -> &'static str {
        match self {
            Self::Pdf => ".pdf",
            Self::Doc => ".doc",
            Self::Docx => ".docx",
            Self::Text => ".txt",
        }
    }
}

pub fn extract_text_blocking(kind: DocumentKind, data: &[u8]) -> Result<String, ExtractionError> {
    match kind {
        DocumentKind::Pdf => pdf::extract_pdf_text(data),
        DocumentKind::Doc | DocumentKind::Docx => word::extract_word_text(data, kind.suffix()),
        DocumentKind::Text => plain::decode_text(data.to_vec()),
    }
}

/// Runs extraction on the blocking pool. A panic inside a parser surfaces as
/// [`ExtractionError::Join`] instead of tearing down the request task.
pub async fn extract_text(kind: DocumentKind, data: Bytes) -> Result<String, ExtractionError> {
    tokio::task::spawn_blocking(move || extract_text_blocking(kind, &data))
        .await
        .map_err(|e| ExtractionError::Join(e.to_string()))?
}
