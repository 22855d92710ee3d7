//! MCP tool implementations for PDF to Markdown conversion.

pub mod convert;
pub mod source;

// Re-export common types
pub use convert::*;
