//! MCP server over stdio

use std::sync::Arc;

use log::info;
use rmcp::model::{
    CallToolRequestParam, CallToolResult, Implementation, ListToolsResult, PaginatedRequestParam,
    ProtocolVersion, ServerCapabilities, ServerInfo,
};
use rmcp::service::RequestContext;
use rmcp::transport::stdio;
use rmcp::{ErrorData as McpError, RoleServer, ServerHandler, serve_server};

use crate::error::{Error, Result};
use crate::tools::ToolRegistry;

const SERVER_INSTRUCTIONS: &str = "Query Aikido Security findings. \
Use search_repository_by_name or list_repositories to find a repo_id, then \
get_issues or get_open_issue_groups to list findings. List results are \
condensed; fetch full records with get_issue_details or get_issue_group_details.";

/// MCP service exposing the Aikido tools
#[derive(Clone)]
pub struct AikidoMcpServer {
    registry: Arc<ToolRegistry>,
}

impl AikidoMcpServer {
    pub fn new(registry: ToolRegistry) -> Self {
        Self {
            registry: Arc::new(registry),
        }
    }
}

impl ServerHandler for AikidoMcpServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: ProtocolVersion::default(),
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation {
                name: env!("CARGO_PKG_NAME").into(),
                version: env!("CARGO_PKG_VERSION").into(),
                title: None,
                website_url: None,
                icons: None,
            },
            instructions: Some(SERVER_INSTRUCTIONS.into()),
        }
    }

    async fn list_tools(
        &self,
        _request: Option<PaginatedRequestParam>,
        _context: RequestContext<RoleServer>,
    ) -> std::result::Result<ListToolsResult, McpError> {
        Ok(ListToolsResult {
            tools: self.registry.list_tools(),
            next_cursor: None,
        })
    }

    async fn call_tool(
        &self,
        request: CallToolRequestParam,
        _context: RequestContext<RoleServer>,
    ) -> std::result::Result<CallToolResult, McpError> {
        Ok(self.registry.dispatch(&request.name, request.arguments).await)
    }
}

/// Serve until the peer closes stdin.
pub async fn serve_stdio(server: AikidoMcpServer) -> Result<()> {
    let (stdin, stdout) = stdio();
    let running = serve_server(server, (stdin, stdout))
        .await
        .map_err(|e| Error::Transport(e.to_string()))?;
    info!("Aikido MCP server ready on stdio");

    let reason = running
        .waiting()
        .await
        .map_err(|e| Error::Transport(e.to_string()))?;
    info!("MCP session closed: {:?}", reason);
    Ok(())
}
