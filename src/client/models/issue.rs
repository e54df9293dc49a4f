//! Issue models and the fixed severity / issue type vocabularies

use serde::{Deserialize, Serialize};

use super::common::{ResourceId, lenient};

/// Issue severity accepted by the API filters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Critical,
    High,
    Medium,
    Low,
}

impl Severity {
    pub const ALL: [Severity; 4] = [
        Severity::Critical,
        Severity::High,
        Severity::Medium,
        Severity::Low,
    ];

    /// Wire name used in query parameters
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Critical => "critical",
            Severity::High => "high",
            Severity::Medium => "medium",
            Severity::Low => "low",
        }
    }
}

/// Issue category accepted by the API filters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IssueType {
    OpenSource,
    LeakedSecret,
    Sast,
    Iac,
    Container,
    Cloud,
    Dast,
}

impl IssueType {
    pub const ALL: [IssueType; 7] = [
        IssueType::OpenSource,
        IssueType::LeakedSecret,
        IssueType::Sast,
        IssueType::Iac,
        IssueType::Container,
        IssueType::Cloud,
        IssueType::Dast,
    ];

    /// Wire name used in query parameters
    pub fn as_str(&self) -> &'static str {
        match self {
            IssueType::OpenSource => "open_source",
            IssueType::LeakedSecret => "leaked_secret",
            IssueType::Sast => "sast",
            IssueType::Iac => "iac",
            IssueType::Container => "container",
            IssueType::Cloud => "cloud",
            IssueType::Dast => "dast",
        }
    }
}

/// A single finding as returned by the issues endpoints.
///
/// Severity and type are kept as strings here: the API is the source of truth
/// and may report values outside the filter vocabulary.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Issue {
    #[serde(
        default,
        deserialize_with = "lenient::resource_id",
        skip_serializing_if = "Option::is_none"
    )]
    pub id: Option<ResourceId>,

    /// Issue group this finding belongs to
    #[serde(
        default,
        deserialize_with = "lenient::resource_id",
        skip_serializing_if = "Option::is_none"
    )]
    pub group_id: Option<ResourceId>,

    /// Issue category (open_source, sast, ...)
    #[serde(
        rename = "type",
        default,
        deserialize_with = "lenient::string",
        skip_serializing_if = "Option::is_none"
    )]
    pub issue_type: Option<String>,

    /// Severity label (critical, high, medium, low)
    #[serde(default, deserialize_with = "lenient::string", skip_serializing_if = "Option::is_none")]
    pub severity: Option<String>,

    /// Rule that produced the finding
    #[serde(default, deserialize_with = "lenient::string", skip_serializing_if = "Option::is_none")]
    pub rule: Option<String>,

    /// Primary CVE, for dependency findings
    #[serde(default, deserialize_with = "lenient::string", skip_serializing_if = "Option::is_none")]
    pub cve_id: Option<String>,

    #[serde(default, deserialize_with = "lenient::string", skip_serializing_if = "Option::is_none")]
    pub affected_package: Option<String>,

    #[serde(default, deserialize_with = "lenient::string", skip_serializing_if = "Option::is_none")]
    pub affected_file: Option<String>,

    #[serde(
        default,
        deserialize_with = "lenient::integer",
        skip_serializing_if = "Option::is_none"
    )]
    pub start_line: Option<i64>,

    #[serde(
        default,
        deserialize_with = "lenient::integer",
        skip_serializing_if = "Option::is_none"
    )]
    pub end_line: Option<i64>,

    #[serde(
        default,
        deserialize_with = "lenient::resource_id",
        skip_serializing_if = "Option::is_none"
    )]
    pub code_repo_id: Option<ResourceId>,

    #[serde(default, deserialize_with = "lenient::string", skip_serializing_if = "Option::is_none")]
    pub code_repo_name: Option<String>,

    #[serde(default, deserialize_with = "lenient::string", skip_serializing_if = "Option::is_none")]
    pub programming_language: Option<String>,

    #[serde(default, deserialize_with = "lenient::string", skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,

    /// Remediation guidance
    #[serde(default, deserialize_with = "lenient::string", skip_serializing_if = "Option::is_none")]
    pub how_to_fix: Option<String>,

    #[serde(default, deserialize_with = "lenient::list", skip_serializing_if = "Vec::is_empty")]
    pub related_cve_ids: Vec<String>,

    /// Remaining fields, passed through untouched
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}
