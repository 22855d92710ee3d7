//! Error types for the PDF reader MCP server.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while validating a request or converting a PDF.
#[derive(Debug, Error)]
pub enum PdfReaderError {
    /// The resolved path does not exist.
    #[error("PDF file not found: {}", .0.display())]
    PathNotFound(PathBuf),

    /// The path exists but is a directory or other non-regular entry.
    #[error("Path is not a file: {}", .0.display())]
    NotAFile(PathBuf),

    /// The path does not carry a `.pdf` extension.
    #[error("File is not a PDF: {}", .0.display())]
    NotAPdf(PathBuf),

    /// The page specification could not be parsed.
    #[error("Invalid page format: {0}. Valid formats: '4', '2-6', '1,3,5'")]
    InvalidPageSpec(String),

    /// A selected page does not exist in the document.
    #[error("Page {page} is out of range (document has {total} pages)")]
    PageOutOfRange { page: i32, total: i32 },

    /// Document requires a password to open.
    #[error("Password required for this document")]
    PasswordRequired,

    /// The provided password is incorrect.
    #[error("Invalid password")]
    InvalidPassword,

    /// Writing the rendered Markdown failed.
    #[error("Failed to write Markdown file: {}: {source}", .path.display())]
    WriteFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// IO error.
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// MuPDF library error.
    #[error("MuPDF error: {0}")]
    MupdfError(#[from] mupdf::Error),

    /// Internal error (unexpected state).
    #[error("Internal error: {0}")]
    Internal(String),
}

impl PdfReaderError {
    /// Create an internal error with a message.
    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }

    /// Whether the error was raised while the converter was processing the document.
    pub fn is_conversion_failure(&self) -> bool {
        matches!(
            self,
            Self::PageOutOfRange { .. }
                | Self::PasswordRequired
                | Self::InvalidPassword
                | Self::MupdfError(_)
                | Self::IoError(_)
                | Self::Internal(_)
        )
    }

    /// The text handed back to the calling agent in place of Markdown.
    pub fn to_tool_message(&self) -> String {
        if self.is_conversion_failure() {
            format!("Error during PDF conversion: {}", self)
        } else {
            format!("Error: {}", self)
        }
    }
}

/// Result type for PDF reader operations.
pub type Result<T> = std::result::Result<T, PdfReaderError>;
