//! Tool argument types
//!
//! Deserialized from the `arguments` object of a tool invocation. Optional
//! values tolerate both a missing key and an explicit `null`.

use serde::Deserialize;

use crate::client::models::{IssueType, ResourceId, Severity};
use crate::client::PaginationParams;

/// Default page size for `list_repositories`
pub const DEFAULT_REPOSITORY_PAGE_SIZE: usize = 100;

/// Default page size for `get_issues`
pub const DEFAULT_ISSUE_PAGE_SIZE: usize = 50;

/// Default page size for `get_open_issue_groups`
pub const DEFAULT_GROUP_PAGE_SIZE: usize = 20;

fn pagination(page: Option<usize>, per_page: Option<usize>, default_size: usize) -> PaginationParams {
    PaginationParams::new()
        .page(page.unwrap_or(0))
        .per_page(per_page.unwrap_or(default_size))
}

/// Arguments for `list_repositories`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListRepositoriesArgs {
    pub page: Option<usize>,
    pub per_page: Option<usize>,
}

impl ListRepositoriesArgs {
    pub fn pagination(&self) -> PaginationParams {
        pagination(self.page, self.per_page, DEFAULT_REPOSITORY_PAGE_SIZE)
    }
}

/// Arguments for `get_issues`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct GetIssuesArgs {
    pub repo_id: Option<ResourceId>,
    pub severity: Option<Vec<Severity>>,
    pub issue_type: Option<Vec<IssueType>>,
    pub page: Option<usize>,
    pub per_page: Option<usize>,
}

impl GetIssuesArgs {
    pub fn pagination(&self) -> PaginationParams {
        pagination(self.page, self.per_page, DEFAULT_ISSUE_PAGE_SIZE)
    }
}

/// Arguments for `get_issue_details`
#[derive(Debug, Clone, Deserialize)]
pub struct GetIssueDetailsArgs {
    pub issue_id: ResourceId,
}

/// Arguments for `get_open_issue_groups`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct GetOpenIssueGroupsArgs {
    pub repo_id: Option<ResourceId>,
    pub severity: Option<Vec<Severity>>,
    pub page: Option<usize>,
    pub per_page: Option<usize>,
}

impl GetOpenIssueGroupsArgs {
    pub fn pagination(&self) -> PaginationParams {
        pagination(self.page, self.per_page, DEFAULT_GROUP_PAGE_SIZE)
    }
}

/// Arguments for `get_issue_group_details`
#[derive(Debug, Clone, Deserialize)]
pub struct GetIssueGroupDetailsArgs {
    pub group_id: ResourceId,
}

/// Arguments for `search_repository_by_name`
#[derive(Debug, Clone, Deserialize)]
pub struct SearchRepositoryArgs {
    pub name: String,
}
