//! Tool registry for MCP operations
//!
//! Holds the static catalog of tools advertised over `tools/list` and routes
//! `tools/call` invocations to [`ToolHandlers`]. Every outcome, including
//! unknown tools and handler failures, becomes a [`CallToolResult`].

use std::sync::Arc;

use log::{debug, warn};
use rmcp::model::{CallToolResult, Content, JsonObject, Tool};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::{Value, json};

use super::args::{
    DEFAULT_GROUP_PAGE_SIZE, DEFAULT_ISSUE_PAGE_SIZE, DEFAULT_REPOSITORY_PAGE_SIZE,
};
use super::handlers::ToolHandlers;
use crate::client::models::{IssueType, Severity};
use crate::error::{Result, ToolError};

/// The tools this server exposes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToolKind {
    ListRepositories,
    GetIssues,
    GetIssueDetails,
    GetOpenIssueGroups,
    GetIssueGroupDetails,
    SearchRepositoryByName,
}

impl ToolKind {
    pub const ALL: [ToolKind; 6] = [
        ToolKind::ListRepositories,
        ToolKind::GetIssues,
        ToolKind::GetIssueDetails,
        ToolKind::GetOpenIssueGroups,
        ToolKind::GetIssueGroupDetails,
        ToolKind::SearchRepositoryByName,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            ToolKind::ListRepositories => "list_repositories",
            ToolKind::GetIssues => "get_issues",
            ToolKind::GetIssueDetails => "get_issue_details",
            ToolKind::GetOpenIssueGroups => "get_open_issue_groups",
            ToolKind::GetIssueGroupDetails => "get_issue_group_details",
            ToolKind::SearchRepositoryByName => "search_repository_by_name",
        }
    }

    pub fn from_name(name: &str) -> Option<ToolKind> {
        Self::ALL.into_iter().find(|kind| kind.name() == name)
    }

    pub fn description(&self) -> &'static str {
        match self {
            ToolKind::ListRepositories => {
                "List code repositories connected to Aikido. Returns repository ids, names and provider details."
            }
            ToolKind::GetIssues => {
                "List security issues, optionally filtered by repository, severity and issue type. \
                 Returns condensed summaries; use get_issue_details for the full record."
            }
            ToolKind::GetIssueDetails => {
                "Get the full details of a single issue, including remediation guidance and related CVEs."
            }
            ToolKind::GetOpenIssueGroups => {
                "List open issue groups (deduplicated vulnerabilities), optionally filtered by repository and severity. \
                 Returns condensed summaries; use get_issue_group_details for the full record."
            }
            ToolKind::GetIssueGroupDetails => {
                "Get the full details of a single issue group, including all locations and remediation guidance."
            }
            ToolKind::SearchRepositoryByName => {
                "Find repositories whose name or external id contains the given text (case-insensitive). \
                 Use the returned id as repo_id for the other tools."
            }
        }
    }

    /// JSON Schema for the tool's `arguments` object
    pub fn schema(&self) -> Value {
        let severity = json!({
            "type": "array",
            "description": "Only include these severities",
            "items": {
                "type": "string",
                "enum": Severity::ALL.iter().map(Severity::as_str).collect::<Vec<_>>()
            }
        });
        let repo_id = json!({
            "type": ["integer", "string"],
            "description": "Code repository id (see list_repositories or search_repository_by_name)"
        });
        let page = json!({
            "type": "integer",
            "minimum": 0,
            "default": 0,
            "description": "Page number, starting at 0"
        });
        let per_page = |default: usize| {
            json!({
                "type": "integer",
                "minimum": 1,
                "default": default,
                "description": "Number of results per page"
            })
        };

        match self {
            ToolKind::ListRepositories => json!({
                "type": "object",
                "properties": {
                    "page": page,
                    "per_page": per_page(DEFAULT_REPOSITORY_PAGE_SIZE)
                }
            }),
            ToolKind::GetIssues => json!({
                "type": "object",
                "properties": {
                    "repo_id": repo_id,
                    "severity": severity,
                    "issue_type": {
                        "type": "array",
                        "description": "Only include these issue types",
                        "items": {
                            "type": "string",
                            "enum": IssueType::ALL.iter().map(IssueType::as_str).collect::<Vec<_>>()
                        }
                    },
                    "page": page,
                    "per_page": per_page(DEFAULT_ISSUE_PAGE_SIZE)
                }
            }),
            ToolKind::GetIssueDetails => json!({
                "type": "object",
                "properties": {
                    "issue_id": {
                        "type": ["integer", "string"],
                        "description": "Issue id"
                    }
                },
                "required": ["issue_id"]
            }),
            ToolKind::GetOpenIssueGroups => json!({
                "type": "object",
                "properties": {
                    "repo_id": repo_id,
                    "severity": severity,
                    "page": page,
                    "per_page": per_page(DEFAULT_GROUP_PAGE_SIZE)
                }
            }),
            ToolKind::GetIssueGroupDetails => json!({
                "type": "object",
                "properties": {
                    "group_id": {
                        "type": ["integer", "string"],
                        "description": "Issue group id"
                    }
                },
                "required": ["group_id"]
            }),
            ToolKind::SearchRepositoryByName => json!({
                "type": "object",
                "properties": {
                    "name": {
                        "type": "string",
                        "description": "Text to look for in repository names and external ids"
                    }
                },
                "required": ["name"]
            }),
        }
    }

    fn to_tool(self) -> Tool {
        let schema = match self.schema() {
            Value::Object(map) => map,
            _ => JsonObject::new(),
        };
        Tool::new(self.name(), self.description(), Arc::new(schema))
    }
}

/// Catalog and dispatcher for the MCP tools
#[derive(Clone)]
pub struct ToolRegistry {
    handlers: ToolHandlers,
}

impl ToolRegistry {
    pub fn new(handlers: ToolHandlers) -> Self {
        Self { handlers }
    }

    /// Get all tools for the `tools/list` response
    pub fn list_tools(&self) -> Vec<Tool> {
        ToolKind::ALL.into_iter().map(ToolKind::to_tool).collect()
    }

    /// Run a tool and wrap the outcome.
    ///
    /// Failures are reported as error-flagged results, never as protocol errors.
    pub async fn dispatch(&self, name: &str, arguments: Option<JsonObject>) -> CallToolResult {
        debug!("Calling tool {}", name);

        match self.invoke(name, arguments.unwrap_or_default()).await {
            Ok(text) => CallToolResult::success(vec![Content::text(text)]),
            Err(err) => {
                warn!("Tool {} failed: {}", name, err);
                CallToolResult::error(vec![Content::text(format!("Error: {}", err))])
            }
        }
    }

    async fn invoke(&self, name: &str, arguments: JsonObject) -> Result<String> {
        let kind = ToolKind::from_name(name)
            .ok_or_else(|| ToolError::UnknownTool(name.to_string()))?;
        let handlers = &self.handlers;

        match kind {
            ToolKind::ListRepositories => {
                render(&handlers.list_repositories(parse_arguments(kind, arguments)?).await?)
            }
            ToolKind::GetIssues => {
                render(&handlers.get_issues(parse_arguments(kind, arguments)?).await?)
            }
            ToolKind::GetIssueDetails => {
                render(&handlers.get_issue_details(parse_arguments(kind, arguments)?).await?)
            }
            ToolKind::GetOpenIssueGroups => {
                render(&handlers.get_open_issue_groups(parse_arguments(kind, arguments)?).await?)
            }
            ToolKind::GetIssueGroupDetails => {
                render(&handlers.get_issue_group_details(parse_arguments(kind, arguments)?).await?)
            }
            ToolKind::SearchRepositoryByName => {
                render(&handlers.search_repository_by_name(parse_arguments(kind, arguments)?).await?)
            }
        }
    }
}

/// Parse tool arguments from a JSON map into a typed struct
fn parse_arguments<T: DeserializeOwned>(kind: ToolKind, arguments: JsonObject) -> Result<T> {
    serde_json::from_value(Value::Object(arguments)).map_err(|e| {
        ToolError::InvalidArguments {
            tool: kind.name().to_string(),
            message: e.to_string(),
        }
        .into()
    })
}

fn render<T: Serialize>(value: &T) -> Result<String> {
    Ok(serde_json::to_string_pretty(value)?)
}
