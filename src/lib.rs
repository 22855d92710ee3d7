//! PDF reader MCP server library.
//!
//! This library provides an MCP server that renders PDF documents, or a
//! selection of their pages, as Markdown using MuPDF.

pub mod error;
pub mod markdown;
pub mod pages;
pub mod server;
pub mod tools;

pub use error::{PdfReaderError, Result};
pub use markdown::MarkdownOptions;
pub use pages::{parse_page_spec, PageSelection};
pub use server::PdfReaderServer;
