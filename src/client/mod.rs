//! Aikido API client

use async_trait::async_trait;

use crate::error::Result;

pub mod aikido;
pub mod auth;
#[cfg(test)]
pub mod mock;
pub mod models;
pub mod pagination;

pub use aikido::AikidoClient;
#[cfg(test)]
pub use mock::MockAikidoClient;
pub use models::{Issue, IssueGroup, Listing, Repository, ResourceId};
pub use pagination::{
    IssueFilterParams, IssueGroupFilterParams, PaginationParams, REPOSITORY_PAGE_SIZE,
};

/// Aikido public API operations used by the tools
#[async_trait]
pub trait AikidoApi: Send + Sync {
    /// List connected code repositories (`GET /public/v1/repositories/code`)
    async fn list_repositories(&self, pagination: &PaginationParams) -> Result<Listing<Repository>>;

    /// Export issues with filters (`GET /public/v1/issues/export`)
    async fn export_issues(&self, filters: &IssueFilterParams) -> Result<Listing<Issue>>;

    /// Fetch one issue in full (`GET /public/v1/issues/{id}`)
    async fn get_issue(&self, issue_id: &ResourceId) -> Result<Issue>;

    /// List open issue groups with filters (`GET /public/v1/open-issue-groups`)
    async fn list_open_issue_groups(
        &self,
        filters: &IssueGroupFilterParams,
    ) -> Result<Listing<IssueGroup>>;

    /// Fetch one issue group in full (`GET /public/v1/issues/groups/{id}`)
    async fn get_issue_group(&self, group_id: &ResourceId) -> Result<IssueGroup>;
}
