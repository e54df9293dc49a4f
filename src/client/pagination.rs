//! Pagination and filter parameters for API requests
//!
//! Builds the query strings of the list endpoints. Multi-value filters are
//! emitted as repeated keys (`filter_severities=critical&filter_severities=high`).

use super::models::{IssueType, ResourceId, Severity};

/// Page size used when walking every repository.
/// A page shorter than this marks the end of the data.
pub const REPOSITORY_PAGE_SIZE: usize = 100;

/// Pagination parameters for API requests.
///
/// # Example
/// ```ignore
/// let params = PaginationParams::new().page(2).per_page(50);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaginationParams {
    /// Page number (0-indexed)
    pub page: usize,
    /// Number of items per page
    pub per_page: usize,
}

impl Default for PaginationParams {
    fn default() -> Self {
        Self {
            page: 0,
            per_page: REPOSITORY_PAGE_SIZE,
        }
    }
}

impl PaginationParams {
    /// Create new pagination params with defaults (page 0, 100 per page).
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the page number.
    pub fn page(mut self, page: usize) -> Self {
        self.page = page;
        self
    }

    /// Set the page size.
    pub fn per_page(mut self, per_page: usize) -> Self {
        self.per_page = per_page;
        self
    }

    /// Convert to query string parameters.
    pub fn to_query_params(&self) -> Vec<(&'static str, String)> {
        vec![
            ("page", self.page.to_string()),
            ("per_page", self.per_page.to_string()),
        ]
    }
}

/// Filters for `GET /public/v1/issues/export`.
#[derive(Debug, Clone, Default)]
pub struct IssueFilterParams {
    pub pagination: PaginationParams,
    /// Restrict to one code repository
    pub repo_id: Option<ResourceId>,
    pub severities: Vec<Severity>,
    pub issue_types: Vec<IssueType>,
}

impl IssueFilterParams {
    pub fn new(pagination: PaginationParams) -> Self {
        Self {
            pagination,
            ..Default::default()
        }
    }

    pub fn repo_id(mut self, repo_id: Option<ResourceId>) -> Self {
        self.repo_id = repo_id;
        self
    }

    pub fn severities(mut self, severities: Vec<Severity>) -> Self {
        self.severities = severities;
        self
    }

    pub fn issue_types(mut self, issue_types: Vec<IssueType>) -> Self {
        self.issue_types = issue_types;
        self
    }

    /// Convert to query string parameters.
    ///
    /// Uses Aikido API parameter names:
    /// - `filter_code_repo_id`: single repository id
    /// - `filter_severities`: repeated once per severity
    /// - `filter_issue_type`: repeated once per issue type
    pub fn to_query_params(&self) -> Vec<(&'static str, String)> {
        let mut params = self.pagination.to_query_params();

        if let Some(ref repo_id) = self.repo_id {
            params.push(("filter_code_repo_id", repo_id.to_string()));
        }

        for severity in &self.severities {
            params.push(("filter_severities", severity.as_str().to_string()));
        }

        for issue_type in &self.issue_types {
            params.push(("filter_issue_type", issue_type.as_str().to_string()));
        }

        params
    }
}

/// Filters for `GET /public/v1/open-issue-groups`.
#[derive(Debug, Clone, Default)]
pub struct IssueGroupFilterParams {
    pub pagination: PaginationParams,
    pub repo_id: Option<ResourceId>,
    pub severities: Vec<Severity>,
}

impl IssueGroupFilterParams {
    pub fn new(pagination: PaginationParams) -> Self {
        Self {
            pagination,
            ..Default::default()
        }
    }

    pub fn repo_id(mut self, repo_id: Option<ResourceId>) -> Self {
        self.repo_id = repo_id;
        self
    }

    pub fn severities(mut self, severities: Vec<Severity>) -> Self {
        self.severities = severities;
        self
    }

    /// Convert to query string parameters.
    pub fn to_query_params(&self) -> Vec<(&'static str, String)> {
        let mut params = self.pagination.to_query_params();

        if let Some(ref repo_id) = self.repo_id {
            params.push(("filter_code_repo_id", repo_id.to_string()));
        }

        for severity in &self.severities {
            params.push(("filter_severities", severity.as_str().to_string()));
        }

        params
    }
}
