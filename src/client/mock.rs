//! Mock Aikido API client for testing
//!
//! Provides a mock implementation of [`AikidoApi`] for unit testing the tool
//! handlers without making real API calls.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;

use super::models::{Issue, IssueGroup, Listing, Repository, ResourceId};
use super::pagination::{IssueFilterParams, IssueGroupFilterParams, PaginationParams};
use super::AikidoApi;
use crate::error::{ApiError, Result};

/// Mock API client for testing.
///
/// Configure expected responses via builder methods, then use in tests.
///
/// # Example
/// ```ignore
/// let mock = MockAikidoClient::new()
///     .with_repository_pages(vec![vec![repo("api")]])
///     .await;
///
/// let page = mock.list_repositories(&PaginationParams::new()).await?;
/// ```
#[derive(Default)]
pub struct MockAikidoClient {
    /// Repository pages by page index
    repository_pages: Arc<Mutex<Vec<Listing<Repository>>>>,
    /// Response for export_issues
    issues: Arc<Mutex<Option<Listing<Issue>>>>,
    /// Response for list_open_issue_groups
    issue_groups: Arc<Mutex<Option<Listing<IssueGroup>>>>,
    /// Issues by id for get_issue
    issue_details: Arc<Mutex<HashMap<String, Issue>>>,
    /// Issue groups by id for get_issue_group
    group_details: Arc<Mutex<HashMap<String, IssueGroup>>>,
    /// Error to return (if any) - consumed on first use
    error: Arc<Mutex<Option<ApiError>>>,
    /// Track number of calls for verification
    call_count: Arc<Mutex<CallCounts>>,
    /// Captured requests for test assertions
    captured_requests: Arc<Mutex<Vec<CapturedRequest>>>,
}

/// Tracks API call counts for test verification
#[derive(Default, Debug, Clone)]
pub struct CallCounts {
    pub list_repositories: usize,
    pub export_issues: usize,
    pub get_issue: usize,
    pub list_open_issue_groups: usize,
    pub get_issue_group: usize,
}

impl CallCounts {
    /// Get total number of API calls made.
    pub fn total(&self) -> usize {
        self.list_repositories
            + self.export_issues
            + self.get_issue
            + self.list_open_issue_groups
            + self.get_issue_group
    }
}

/// A captured API request for test assertions.
#[derive(Debug, Clone)]
pub struct CapturedRequest {
    /// The API method called (e.g., "export_issues")
    pub method: String,
    /// Query parameters that would have been sent
    pub query: Vec<(&'static str, String)>,
}

impl MockAikidoClient {
    /// Create a new mock client with default (empty) responses.
    pub fn new() -> Self {
        Self::default()
    }

    /// Configure repository array pages. Page N returns pages[N]; later pages are empty.
    pub async fn with_repository_pages(self, pages: Vec<Vec<Repository>>) -> Self {
        *self.repository_pages.lock().await = pages.into_iter().map(Listing::Items).collect();
        self
    }

    /// Configure raw repository listings, including non-array responses.
    pub async fn with_repository_listings(self, pages: Vec<Listing<Repository>>) -> Self {
        *self.repository_pages.lock().await = pages;
        self
    }

    /// Configure the response of export_issues.
    pub async fn with_issues(self, issues: Listing<Issue>) -> Self {
        *self.issues.lock().await = Some(issues);
        self
    }

    /// Configure the response of list_open_issue_groups.
    pub async fn with_issue_groups(self, groups: Listing<IssueGroup>) -> Self {
        *self.issue_groups.lock().await = Some(groups);
        self
    }

    /// Configure an issue returned by get_issue.
    pub async fn with_issue_detail(self, id: &str, issue: Issue) -> Self {
        self.issue_details.lock().await.insert(id.to_string(), issue);
        self
    }

    /// Configure an issue group returned by get_issue_group.
    pub async fn with_group_detail(self, id: &str, group: IssueGroup) -> Self {
        self.group_details.lock().await.insert(id.to_string(), group);
        self
    }

    /// Configure an error to return on the next API call.
    /// The error is consumed after one use.
    pub async fn with_error(self, error: ApiError) -> Self {
        *self.error.lock().await = Some(error);
        self
    }

    /// Get the call counts for verification in tests.
    pub async fn call_counts(&self) -> CallCounts {
        self.call_count.lock().await.clone()
    }

    /// Get all captured requests for test assertions.
    pub async fn captured_requests(&self) -> Vec<CapturedRequest> {
        self.captured_requests.lock().await.clone()
    }

    /// Check if there's a pending error and consume it.
    async fn check_error(&self) -> Result<()> {
        let mut error = self.error.lock().await;
        if let Some(e) = error.take() {
            return Err(e.into());
        }
        Ok(())
    }

    /// Record a captured request for test assertions.
    async fn capture_request(&self, method: &str, query: Vec<(&'static str, String)>) {
        self.captured_requests.lock().await.push(CapturedRequest {
            method: method.to_string(),
            query,
        });
    }

    fn not_found(kind: &str, id: &ResourceId) -> ApiError {
        ApiError::Request {
            status: 404,
            body: format!(r#"{{"error":"{} {} not found"}}"#, kind, id),
        }
    }
}

#[async_trait]
impl AikidoApi for MockAikidoClient {
    async fn list_repositories(&self, pagination: &PaginationParams) -> Result<Listing<Repository>> {
        self.capture_request("list_repositories", pagination.to_query_params())
            .await;
        self.check_error().await?;

        self.call_count.lock().await.list_repositories += 1;

        let pages = self.repository_pages.lock().await;
        Ok(pages
            .get(pagination.page)
            .cloned()
            .unwrap_or_else(|| Listing::Items(Vec::new())))
    }

    async fn export_issues(&self, filters: &IssueFilterParams) -> Result<Listing<Issue>> {
        self.capture_request("export_issues", filters.to_query_params())
            .await;
        self.check_error().await?;

        self.call_count.lock().await.export_issues += 1;

        Ok(self
            .issues
            .lock()
            .await
            .clone()
            .unwrap_or_else(|| Listing::Items(Vec::new())))
    }

    async fn get_issue(&self, issue_id: &ResourceId) -> Result<Issue> {
        self.capture_request("get_issue", Vec::new()).await;
        self.check_error().await?;

        self.call_count.lock().await.get_issue += 1;

        self.issue_details
            .lock()
            .await
            .get(&issue_id.to_string())
            .cloned()
            .ok_or_else(|| Self::not_found("issue", issue_id).into())
    }

    async fn list_open_issue_groups(
        &self,
        filters: &IssueGroupFilterParams,
    ) -> Result<Listing<IssueGroup>> {
        self.capture_request("list_open_issue_groups", filters.to_query_params())
            .await;
        self.check_error().await?;

        self.call_count.lock().await.list_open_issue_groups += 1;

        Ok(self
            .issue_groups
            .lock()
            .await
            .clone()
            .unwrap_or_else(|| Listing::Items(Vec::new())))
    }

    async fn get_issue_group(&self, group_id: &ResourceId) -> Result<IssueGroup> {
        self.capture_request("get_issue_group", Vec::new()).await;
        self.check_error().await?;

        self.call_count.lock().await.get_issue_group += 1;

        self.group_details
            .lock()
            .await
            .get(&group_id.to_string())
            .cloned()
            .ok_or_else(|| Self::not_found("issue group", group_id).into())
    }
}
