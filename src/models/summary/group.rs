//! Issue group summary model

use serde::Serialize;

use super::common::truncate_chars;
use crate::client::models::{IssueGroup, ResourceId};

/// Maximum number of location names and CVEs listed
const MAX_LIST_ITEMS: usize = 5;

/// Maximum characters of remediation guidance kept
const MAX_HOW_TO_FIX_CHARS: usize = 200;

/// Compact issue group for list output
#[derive(Debug, Clone, Serialize)]
pub struct IssueGroupSummary {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<ResourceId>,

    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub group_type: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub severity: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Total number of locations, including those not listed
    pub location_count: usize,

    /// Names of the first five locations
    pub locations: Vec<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub fix_time_minutes: Option<i64>,

    /// First 200 characters of the guidance
    #[serde(skip_serializing_if = "Option::is_none")]
    pub how_to_fix: Option<String>,

    /// First five related CVEs
    pub cves: Vec<String>,
}

impl From<&IssueGroup> for IssueGroupSummary {
    fn from(group: &IssueGroup) -> Self {
        Self {
            id: group.id.clone(),
            group_type: group.group_type.clone(),
            severity: group.severity.clone(),
            title: group.title.clone(),
            description: group.description.clone(),
            location_count: group.locations.len(),
            locations: group
                .locations
                .iter()
                .take(MAX_LIST_ITEMS)
                .filter_map(|l| l.name.clone())
                .collect(),
            fix_time_minutes: group.time_to_fix_minutes,
            how_to_fix: group
                .how_to_fix
                .as_deref()
                .map(|text| truncate_chars(text, MAX_HOW_TO_FIX_CHARS)),
            cves: group
                .related_cve_ids
                .iter()
                .take(MAX_LIST_ITEMS)
                .cloned()
                .collect(),
        }
    }
}
