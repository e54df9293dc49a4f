//! Issue summary model

use serde::Serialize;

use crate::client::models::{Issue, ResourceId};

/// Title used when an issue has neither a rule nor a CVE
const UNKNOWN_TITLE: &str = "Unknown";

/// Compact issue for list output.
///
/// Remediation text and related CVEs are dropped; `get_issue_details` has them.
#[derive(Debug, Clone, Serialize)]
pub struct IssueSummary {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<ResourceId>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub group_id: Option<ResourceId>,

    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub issue_type: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub severity: Option<String>,

    /// Rule name, else CVE id, else "Unknown"
    pub title: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub package: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub file: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub line: Option<i64>,

    /// Repository name
    #[serde(skip_serializing_if = "Option::is_none")]
    pub repo: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}

impl From<&Issue> for IssueSummary {
    fn from(issue: &Issue) -> Self {
        let title = non_empty(&issue.rule)
            .or_else(|| non_empty(&issue.cve_id))
            .unwrap_or(UNKNOWN_TITLE)
            .to_string();

        Self {
            id: issue.id.clone(),
            group_id: issue.group_id.clone(),
            issue_type: issue.issue_type.clone(),
            severity: issue.severity.clone(),
            title,
            package: issue.affected_package.clone(),
            file: issue.affected_file.clone(),
            line: issue.start_line,
            repo: issue.code_repo_name.clone(),
            language: issue.programming_language.clone(),
        }
    }
}
