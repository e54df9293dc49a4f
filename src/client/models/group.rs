//! Issue group models

use serde::{Deserialize, Serialize};

use super::common::{ResourceId, lenient};

/// Deduplicated cluster of issues sharing one underlying vulnerability
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IssueGroup {
    #[serde(
        default,
        deserialize_with = "lenient::resource_id",
        skip_serializing_if = "Option::is_none"
    )]
    pub id: Option<ResourceId>,

    #[serde(
        rename = "type",
        default,
        deserialize_with = "lenient::string",
        skip_serializing_if = "Option::is_none"
    )]
    pub group_type: Option<String>,

    #[serde(default, deserialize_with = "lenient::string", skip_serializing_if = "Option::is_none")]
    pub severity: Option<String>,

    #[serde(default, deserialize_with = "lenient::string", skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    #[serde(default, deserialize_with = "lenient::string", skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Where the vulnerability shows up (repositories, containers, clouds)
    #[serde(default, deserialize_with = "lenient::list", skip_serializing_if = "Vec::is_empty")]
    pub locations: Vec<IssueLocation>,

    /// Estimated fix time
    #[serde(
        default,
        deserialize_with = "lenient::integer",
        skip_serializing_if = "Option::is_none"
    )]
    pub time_to_fix_minutes: Option<i64>,

    /// Remediation guidance (markdown)
    #[serde(default, deserialize_with = "lenient::string", skip_serializing_if = "Option::is_none")]
    pub how_to_fix: Option<String>,

    #[serde(default, deserialize_with = "lenient::list", skip_serializing_if = "Vec::is_empty")]
    pub related_cve_ids: Vec<String>,

    /// Remaining fields, passed through untouched
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

/// Location of an issue group
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IssueLocation {
    #[serde(
        default,
        deserialize_with = "lenient::resource_id",
        skip_serializing_if = "Option::is_none"
    )]
    pub id: Option<ResourceId>,

    #[serde(default, deserialize_with = "lenient::string", skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}
