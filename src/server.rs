//! MCP server implementation with tool routing.

use rmcp::model::{
    CallToolRequestParams, CallToolResult, Content, Implementation, InitializeResult, JsonObject,
    ListToolsResult, PaginatedRequestParams, ServerCapabilities, Tool,
};
use rmcp::service::RequestContext;
use rmcp::{ErrorData as McpError, ServerHandler};
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::borrow::Cow;
use std::sync::Arc;

use crate::markdown::MarkdownOptions;
use crate::tools::{self, ToolOutcome};

/// PDF reader MCP server.
///
/// Stateless: every tool call opens, renders and drops its own document.
pub struct PdfReaderServer {
    /// Rendering options shared by every call.
    options: Arc<MarkdownOptions>,
}

impl PdfReaderServer {
    /// Create a server with default rendering options.
    pub fn new() -> Self {
        Self::with_options(MarkdownOptions::default())
    }

    /// Create a server with custom rendering options.
    pub fn with_options(options: MarkdownOptions) -> Self {
        Self {
            options: Arc::new(options),
        }
    }

    fn make_tool(name: &str, description: &str, schema: Value) -> Tool {
        Tool {
            name: Cow::Owned(name.to_string()),
            title: None,
            description: Some(Cow::Owned(description.to_string())),
            input_schema: Arc::new(serde_json::from_value(schema).unwrap_or_default()),
            output_schema: None,
            annotations: None,
            icons: None,
            meta: None,
        }
    }

    /// Tools advertised by this server.
    pub fn tools() -> Vec<Tool> {
        vec![
            Self::make_tool(
                "convert_pdf_to_markdown",
                "Convert a PDF file to Markdown text so it can be read. \
                 pages: omit or leave empty for all pages, \"4\" for page 4 only, \
                 \"2-6\" for pages 2 to 6, \"1,3,5\" for pages 1, 3 and 5. \
                 Errors are returned as text starting with \"Error\".",
                serde_json::to_value(schemars::schema_for!(tools::ConvertPdfParams))
                    .unwrap_or_default(),
            ),
            Self::make_tool(
                "save_pdf_as_markdown",
                "Convert a PDF file to Markdown and save it to a file. \
                 Writes next to the PDF with a .md extension unless output_path is given. \
                 Accepts the same pages format as convert_pdf_to_markdown.",
                serde_json::to_value(schemars::schema_for!(tools::SavePdfParams))
                    .unwrap_or_default(),
            ),
        ]
    }

    /// Route a tool call by name.
    ///
    /// Malformed arguments and unknown tools are protocol errors; everything
    /// that goes wrong with the document itself comes back as error text.
    pub async fn dispatch(&self, name: &str, args: JsonObject) -> Result<CallToolResult, McpError> {
        let options = Arc::clone(&self.options);

        let outcome = match name {
            "convert_pdf_to_markdown" => {
                let params: tools::ConvertPdfParams = parse_params(args)?;
                run_blocking(move || tools::convert_pdf_to_markdown(&options, params)).await
            }
            "save_pdf_as_markdown" => {
                let params: tools::SavePdfParams = parse_params(args)?;
                run_blocking(move || tools::save_pdf_as_markdown(&options, params)).await
            }
            _ => return Err(McpError::invalid_params(format!("Unknown tool: {}", name), None)),
        };

        Ok(match outcome {
            ToolOutcome::Success(text) => CallToolResult::success(vec![Content::text(text)]),
            ToolOutcome::Failure(text) => CallToolResult::error(vec![Content::text(text)]),
        })
    }
}

impl Default for PdfReaderServer {
    fn default() -> Self {
        Self::new()
    }
}

fn parse_params<T: DeserializeOwned>(args: JsonObject) -> Result<T, McpError> {
    serde_json::from_value(Value::Object(args))
        .map_err(|e| McpError::invalid_params(e.to_string(), None))
}

/// Run MuPDF work on the blocking pool. MuPDF handles never leave the closure.
async fn run_blocking<F>(f: F) -> ToolOutcome
where
    F: FnOnce() -> ToolOutcome + Send + 'static,
{
    match tokio::task::spawn_blocking(f).await {
        Ok(outcome) => outcome,
        Err(e) => {
            tracing::warn!(error = %e, "conversion task failed");
            ToolOutcome::Failure(format!("Error during PDF conversion: {}", e))
        }
    }
}

impl ServerHandler for PdfReaderServer {
    fn get_info(&self) -> InitializeResult {
        InitializeResult {
            protocol_version: Default::default(),
            server_info: Implementation {
                name: "pdf-reader".to_string(),
                title: Some("PDF Reader MCP Server".to_string()),
                version: env!("CARGO_PKG_VERSION").to_string(),
                icons: None,
                website_url: None,
            },
            instructions: Some(
                "Converts PDF files to Markdown so their content can be read and analysed. \
                 Use convert_pdf_to_markdown to get the text back directly, or \
                 save_pdf_as_markdown to write it to a .md file. \
                 Page numbers are 1-based: \"4\", \"2-6\" or \"1,3,5\"; omit pages for the whole document."
                    .to_string(),
            ),
            capabilities: ServerCapabilities::builder().enable_tools().build(),
        }
    }

    fn list_tools(
        &self,
        _request: Option<PaginatedRequestParams>,
        _context: RequestContext<rmcp::service::RoleServer>,
    ) -> impl std::future::Future<Output = Result<ListToolsResult, McpError>> + Send + '_
    {
        async move {
            Ok(ListToolsResult {
                tools: Self::tools(),
                next_cursor: None,
                meta: None,
            })
        }
    }

    fn call_tool(
        &self,
        request: CallToolRequestParams,
        _context: RequestContext<rmcp::service::RoleServer>,
    ) -> impl std::future::Future<Output = Result<CallToolResult, McpError>> + Send + '_ {
        let name = request.name.clone();
        let args = request.arguments.clone().unwrap_or_default();

        async move { self.dispatch(&name, args).await }
    }
}
