//! MCP server exposing the notebook as `think`, `get_thoughts` and `clear_thoughts`.

mod types;

pub use types::*;

use rmcp::{
    handler::server::{tool::ToolRouter, wrapper::Parameters},
    model::{CallToolResult, Content, ServerInfo},
    tool, tool_handler, tool_router, ErrorData as McpError, ServerHandler, ServiceExt,
};

use crate::models::render_transcript;
use crate::notebook::{Notebook, NotebookError};

pub const CLEARED_MESSAGE: &str = "Thoughts cleared.";

#[derive(Clone)]
pub struct ThinkServer {
    notebook: Notebook,
    tool_router: ToolRouter<Self>,
}

impl ThinkServer {
    pub fn new(notebook: Notebook) -> Self {
        Self {
            notebook,
            tool_router: Self::tool_router(),
        }
    }

    /// Wrap a notebook outcome as a tool result.
    ///
    /// Notebook failures become `isError` results carrying the error text.
    pub fn tool_result(outcome: Result<String, NotebookError>) -> CallToolResult {
        match outcome {
            Ok(text) => CallToolResult::success(vec![Content::text(text)]),
            Err(e) => CallToolResult::error(vec![Content::text(e.to_string())]),
        }
    }

    // ============================================================
    // Tool logic, shared by the router and tests
    // ============================================================

    pub fn record_thought(&self, thought: &str) -> Result<String, NotebookError> {
        let ack = self.notebook.append(thought)?;
        Ok(ack.to_string())
    }

    pub fn thoughts_transcript(&self) -> Result<String, NotebookError> {
        let entries = self.notebook.list_all()?;
        Ok(render_transcript(&entries))
    }

    pub fn clear_notebook(&self) -> String {
        self.notebook.clear_all();
        CLEARED_MESSAGE.to_string()
    }
}

#[tool_router]
impl ThinkServer {
    #[tool(
        description = "Use this tool to think about something.\nIt will not obtain new information or change anything, but just append the thought to the log.\nUse it when complex reasoning or cache memory is needed."
    )]
    async fn think(&self, params: Parameters<ThinkRequest>) -> Result<CallToolResult, McpError> {
        let req = params.0;
        let outcome = self.record_thought(&req.thought);

        if outcome.is_ok() {
            tracing::debug!("recorded thought");
        }

        Ok(Self::tool_result(outcome))
    }

    #[tool(
        description = "Retrieve all thoughts recorded in the current session. This tool helps review the thinking process that has occurred so far."
    )]
    async fn get_thoughts(&self) -> Result<CallToolResult, McpError> {
        Ok(Self::tool_result(self.thoughts_transcript()))
    }

    #[tool(
        description = "Clear all recorded thoughts from the current session. Use this to start fresh if the thinking process needs to be reset."
    )]
    async fn clear_thoughts(&self) -> Result<CallToolResult, McpError> {
        let text = self.clear_notebook();

        tracing::debug!("cleared thoughts");

        Ok(CallToolResult::success(vec![Content::text(text)]))
    }
}

#[tool_handler]
impl ServerHandler for ThinkServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            server_info: rmcp::model::Implementation {
                name: "think-tool".into(),
                version: env!("CARGO_PKG_VERSION").into(),
                title: None,
                icons: None,
                website_url: None,
            },
            capabilities: rmcp::model::ServerCapabilities::builder()
                .enable_tools()
                .build(),
            instructions: Some(
                r#"think-tool is a scratchpad for recording reasoning steps.

- think: append a thought to the log. Nothing else changes.
- get_thoughts: review every thought recorded so far, oldest first.
- clear_thoughts: start over with an empty log.

Thoughts are kept in memory only and vanish when the server exits."#
                    .into(),
            ),
            ..Default::default()
        }
    }
}

pub async fn run_stdio_server(notebook: Notebook) -> anyhow::Result<()> {
    use tokio::io::{stdin, stdout};

    tracing::info!("starting mcp stdio server");

    let service = ThinkServer::new(notebook);
    let server = service.serve((stdin(), stdout())).await?;

    let quit_reason = server.waiting().await?;
    tracing::info!("MCP server stopped: {:?}", quit_reason);

    Ok(())
}
