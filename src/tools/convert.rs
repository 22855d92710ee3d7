//! PDF to Markdown tools.
//!
//! Both tools fold every failure into a textual outcome so the calling agent
//! always gets something it can read.

use std::path::PathBuf;

use schemars::JsonSchema;
use serde::Deserialize;

use crate::error::{PdfReaderError, Result};
use crate::markdown::{self, MarkdownOptions};
use crate::pages::parse_page_spec;
use crate::tools::source;

/// Text returned by a tool, tagged with whether it reports an error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ToolOutcome {
    /// Markdown or a confirmation message.
    Success(String),
    /// An `"Error: ..."` or `"Error during PDF conversion: ..."` message.
    Failure(String),
}

impl ToolOutcome {
    /// The text handed to the caller.
    pub fn text(&self) -> &str {
        match self {
            Self::Success(text) | Self::Failure(text) => text,
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self, Self::Failure(_))
    }

    pub fn into_text(self) -> String {
        match self {
            Self::Success(text) | Self::Failure(text) => text,
        }
    }
}

impl From<Result<String>> for ToolOutcome {
    fn from(result: Result<String>) -> Self {
        match result {
            Ok(text) => Self::Success(text),
            Err(e) => Self::Failure(e.to_tool_message()),
        }
    }
}

// ============== Convert PDF to Markdown ==============

/// Parameters for converting a PDF to Markdown.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct ConvertPdfParams {
    /// Path to the PDF file (e.g. "/Users/username/documents/sample.pdf").
    /// Relative paths are resolved against the server's working directory.
    pub pdf_path: String,
    /// Pages to convert (1-based). Empty or omitted: all pages.
    /// "4": page 4 only. "2-6": pages 2 to 6. "1,3,5": pages 1, 3 and 5.
    #[serde(default)]
    pub pages: Option<String>,
    /// Password for encrypted documents (optional).
    #[serde(default)]
    pub password: Option<String>,
}

/// Convert a PDF file (or some of its pages) to Markdown.
pub fn convert_pdf_to_markdown(options: &MarkdownOptions, params: ConvertPdfParams) -> ToolOutcome {
    let result = render(
        options,
        &params.pdf_path,
        params.pages.as_deref(),
        params.password.as_deref(),
    )
    .map(|(path, markdown)| {
        tracing::info!(path = %path.display(), bytes = markdown.len(), "Converted PDF to Markdown");
        markdown
    });

    if let Err(e) = &result {
        tracing::warn!(error = %e, pdf_path = %params.pdf_path, "convert_pdf_to_markdown failed");
    }
    result.into()
}

// ============== Save PDF as Markdown ==============

/// Parameters for converting a PDF and saving the Markdown to a file.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct SavePdfParams {
    /// Path to the PDF file.
    pub pdf_path: String,
    /// Where to write the Markdown. Defaults to the PDF path with a `.md` extension.
    #[serde(default)]
    pub output_path: Option<String>,
    /// Pages to convert, same format as for convert_pdf_to_markdown.
    #[serde(default)]
    pub pages: Option<String>,
    /// Password for encrypted documents (optional).
    #[serde(default)]
    pub password: Option<String>,
}

/// Convert a PDF to Markdown and write the result next to it, or to `output_path`.
pub fn save_pdf_as_markdown(options: &MarkdownOptions, params: SavePdfParams) -> ToolOutcome {
    let result = save(options, &params);
    if let Err(e) = &result {
        tracing::warn!(error = %e, pdf_path = %params.pdf_path, "save_pdf_as_markdown failed");
    }
    result.into()
}

fn save(options: &MarkdownOptions, params: &SavePdfParams) -> Result<String> {
    let (pdf_path, markdown) = render(
        options,
        &params.pdf_path,
        params.pages.as_deref(),
        params.password.as_deref(),
    )?;

    let output = match params.output_path.as_deref() {
        Some(raw) if !raw.trim().is_empty() => source::resolve_path(raw)?,
        _ => pdf_path.with_extension("md"),
    };

    std::fs::write(&output, &markdown).map_err(|source| PdfReaderError::WriteFailed {
        path: output.clone(),
        source,
    })?;

    tracing::info!(output = %output.display(), bytes = markdown.len(), "Saved Markdown");
    Ok(format!(
        "Saved Markdown to {} ({} bytes)",
        output.display(),
        markdown.len()
    ))
}

/// Validate the path, parse the page spec, and render. Returns the resolved path too.
fn render(
    options: &MarkdownOptions,
    pdf_path: &str,
    pages: Option<&str>,
    password: Option<&str>,
) -> Result<(PathBuf, String)> {
    let path = source::validate_pdf_path(pdf_path)?;
    let selection = parse_page_spec(pages)?;
    tracing::debug!(path = %path.display(), ?selection, "Parsed page selection");

    let doc = source::open_document(&path, password)?;
    let markdown = markdown::render_document(&doc, &selection, options)?;
    Ok((path, markdown))
}
