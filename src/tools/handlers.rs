//! Tool handler implementations
//!
//! Each handler turns validated arguments into API parameters, calls the API,
//! and condenses list responses into summary shapes.

use std::sync::Arc;

use log::{debug, warn};
use serde::Serialize;

use super::args::{
    GetIssueDetailsArgs, GetIssueGroupDetailsArgs, GetIssuesArgs, GetOpenIssueGroupsArgs,
    ListRepositoriesArgs, SearchRepositoryArgs,
};
use crate::client::{
    AikidoApi, Issue, IssueFilterParams, IssueGroup, IssueGroupFilterParams, Listing,
    PaginationParams, REPOSITORY_PAGE_SIZE, Repository,
};
use crate::error::{Result, ToolError};
use crate::models::{IssueGroupSummary, IssueSummary};

/// Pointer appended to condensed issue lists
pub const ISSUES_HINT: &str =
    "Summaries omit remediation and CVE details. Use get_issue_details with an issue id for the full record.";

/// Pointer appended to condensed issue group lists
pub const ISSUE_GROUPS_HINT: &str =
    "Guidance is truncated. Use get_issue_group_details with a group id for the full record.";

/// Upper bound on repository pages read by one search
pub const MAX_REPOSITORY_PAGES: usize = 1000;

/// Output of a condensing handler.
///
/// `PassThrough` carries a response that was not an array, unchanged.
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum Condensed<T> {
    Summary(T),
    PassThrough(serde_json::Value),
}

/// Condensed `get_issues` output
#[derive(Debug, Clone, Serialize)]
pub struct IssueList {
    pub total: usize,
    pub issues: Vec<IssueSummary>,
    pub hint: &'static str,
}

/// Condensed `get_open_issue_groups` output
#[derive(Debug, Clone, Serialize)]
pub struct IssueGroupList {
    pub total: usize,
    pub issue_groups: Vec<IssueGroupSummary>,
    pub hint: &'static str,
}

/// `search_repository_by_name` output
#[derive(Debug, Clone, Serialize)]
pub struct RepositorySearch {
    pub total: usize,
    pub repositories: Vec<Repository>,
}

/// Business logic behind the MCP tools
#[derive(Clone)]
pub struct ToolHandlers {
    api: Arc<dyn AikidoApi>,
    max_repository_pages: usize,
}

impl ToolHandlers {
    pub fn new(api: Arc<dyn AikidoApi>) -> Self {
        Self {
            api,
            max_repository_pages: MAX_REPOSITORY_PAGES,
        }
    }

    /// Override the page limit of `search_repository_by_name`.
    pub fn with_max_repository_pages(mut self, max_pages: usize) -> Self {
        self.max_repository_pages = max_pages.max(1);
        self
    }

    pub async fn list_repositories(&self, args: ListRepositoriesArgs) -> Result<Listing<Repository>> {
        let pagination = args.pagination();
        debug!(
            "Listing repositories (page={}, per_page={})",
            pagination.page, pagination.per_page
        );
        self.api.list_repositories(&pagination).await
    }

    pub async fn get_issues(&self, args: GetIssuesArgs) -> Result<Condensed<IssueList>> {
        let filters = IssueFilterParams::new(args.pagination())
            .repo_id(args.repo_id)
            .severities(args.severity.unwrap_or_default())
            .issue_types(args.issue_type.unwrap_or_default());

        match self.api.export_issues(&filters).await? {
            Listing::Items(issues) => {
                debug!("Fetched {} issues", issues.len());
                let issues: Vec<IssueSummary> = issues.iter().map(IssueSummary::from).collect();
                Ok(Condensed::Summary(IssueList {
                    total: issues.len(),
                    issues,
                    hint: ISSUES_HINT,
                }))
            }
            Listing::Other(value) => {
                debug!("Issue export returned a non-array body; passing it through");
                Ok(Condensed::PassThrough(value))
            }
        }
    }

    pub async fn get_issue_details(&self, args: GetIssueDetailsArgs) -> Result<Issue> {
        debug!("Fetching issue {}", args.issue_id);
        self.api.get_issue(&args.issue_id).await
    }

    pub async fn get_open_issue_groups(
        &self,
        args: GetOpenIssueGroupsArgs,
    ) -> Result<Condensed<IssueGroupList>> {
        let filters = IssueGroupFilterParams::new(args.pagination())
            .repo_id(args.repo_id)
            .severities(args.severity.unwrap_or_default());

        match self.api.list_open_issue_groups(&filters).await? {
            Listing::Items(groups) => {
                debug!("Fetched {} open issue groups", groups.len());
                let issue_groups: Vec<IssueGroupSummary> =
                    groups.iter().map(IssueGroupSummary::from).collect();
                Ok(Condensed::Summary(IssueGroupList {
                    total: issue_groups.len(),
                    issue_groups,
                    hint: ISSUE_GROUPS_HINT,
                }))
            }
            Listing::Other(value) => {
                debug!("Open issue groups returned a non-array body; passing it through");
                Ok(Condensed::PassThrough(value))
            }
        }
    }

    pub async fn get_issue_group_details(&self, args: GetIssueGroupDetailsArgs) -> Result<IssueGroup> {
        debug!("Fetching issue group {}", args.group_id);
        self.api.get_issue_group(&args.group_id).await
    }

    /// Walk every repository page, then filter by name or external id.
    ///
    /// The walk ends on a short, empty or non-array page, or after
    /// `max_repository_pages` pages.
    pub async fn search_repository_by_name(
        &self,
        args: SearchRepositoryArgs,
    ) -> Result<RepositorySearch> {
        if args.name.is_empty() {
            return Err(ToolError::InvalidArguments {
                tool: "search_repository_by_name".to_string(),
                message: "name must not be empty".to_string(),
            }
            .into());
        }
        let needle = args.name.to_lowercase();

        let mut repositories = Vec::new();
        let mut pages = 0;
        loop {
            if pages == self.max_repository_pages {
                warn!(
                    "Stopped repository search after {} full pages; results may be incomplete",
                    pages
                );
                break;
            }

            let pagination = PaginationParams::new()
                .page(pages)
                .per_page(REPOSITORY_PAGE_SIZE);
            pages += 1;

            let batch = match self.api.list_repositories(&pagination).await? {
                Listing::Items(batch) => batch,
                Listing::Other(_) => {
                    warn!("Repository page {} was not an array; ending search", pagination.page);
                    break;
                }
            };

            let fetched = batch.len();
            repositories.extend(batch);
            if fetched < REPOSITORY_PAGE_SIZE {
                break;
            }
        }

        debug!(
            "Scanned {} repositories across {} pages for '{}'",
            repositories.len(),
            pages,
            needle
        );

        let matches: Vec<Repository> = repositories
            .into_iter()
            .filter(|repo| repo.matches(&needle))
            .collect();

        Ok(RepositorySearch {
            total: matches.len(),
            repositories: matches,
        })
    }
}
