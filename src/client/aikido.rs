//! Aikido API client implementation

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use log::debug;
use reqwest::header::{ACCEPT, AUTHORIZATION, HeaderMap, HeaderName, HeaderValue};
use reqwest::{Client as HttpClient, Method};
use serde::de::DeserializeOwned;

use super::auth::{HttpTokenExchange, TokenManager};
use super::models::{Issue, IssueGroup, Listing, Repository, ResourceId};
use super::pagination::{IssueFilterParams, IssueGroupFilterParams, PaginationParams};
use super::AikidoApi;
use crate::config::Config;
use crate::error::{ApiError, Result};

/// Whole-request timeout
const REQUEST_TIMEOUT_SECS: u64 = 30;

/// Per-request options for [`AikidoClient::request`]
#[derive(Debug, Clone)]
pub struct RequestOptions {
    pub method: Method,
    pub query: Vec<(&'static str, String)>,
    /// Extra headers. An `Authorization` entry here is ignored.
    pub headers: HeaderMap,
}

impl Default for RequestOptions {
    fn default() -> Self {
        Self {
            method: Method::GET,
            query: Vec::new(),
            headers: HeaderMap::new(),
        }
    }
}

impl RequestOptions {
    /// A GET that asks for JSON
    pub fn get() -> Self {
        Self::default().header(ACCEPT, HeaderValue::from_static("application/json"))
    }

    pub fn query(mut self, query: Vec<(&'static str, String)>) -> Self {
        self.query = query;
        self
    }

    pub fn header(mut self, name: HeaderName, value: HeaderValue) -> Self {
        self.headers.insert(name, value);
        self
    }
}

/// Aikido API client
pub struct AikidoClient {
    http: HttpClient,
    base_url: String,
    tokens: TokenManager,
}

impl AikidoClient {
    /// Create a client for the configured region and credentials
    pub fn new(config: &Config) -> Result<Self> {
        let http = HttpClient::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()
            .map_err(|e| ApiError::Network(e.to_string()))?;

        let exchange = HttpTokenExchange::new(http.clone(), config.base_url.clone());
        let tokens = TokenManager::new(config.credentials.clone(), Arc::new(exchange));

        Ok(Self::with_token_manager(http, &config.base_url, tokens))
    }

    /// Create a client around an existing token manager
    pub fn with_token_manager(http: HttpClient, base_url: &str, tokens: TokenManager) -> Self {
        Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            tokens,
        }
    }

    /// Make an authenticated API request and decode the JSON body.
    pub async fn request<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        options: RequestOptions,
    ) -> Result<T> {
        let token = self.tokens.access_token().await?;

        let RequestOptions {
            method,
            query,
            mut headers,
        } = options;
        headers.remove(AUTHORIZATION);

        let url = format!("{}{}", self.base_url, endpoint);
        debug!("{} {} {:?}", method, url, query);

        let mut builder = self.http.request(method, &url).headers(headers);
        if !query.is_empty() {
            builder = builder.query(&query);
        }

        let response = builder
            .bearer_auth(&token)
            .send()
            .await
            .map_err(ApiError::from)?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| ApiError::InvalidResponse(format!("Failed to read response: {}", e)))?;

        if !status.is_success() {
            debug!("{} returned {}", endpoint, status);
            return Err(ApiError::Request {
                status: status.as_u16(),
                body,
            }
            .into());
        }

        let data = serde_json::from_str::<T>(&body).map_err(|e| {
            ApiError::InvalidResponse(format!("Failed to parse response from {}: {}", endpoint, e))
        })?;
        Ok(data)
    }
}

#[async_trait]
impl AikidoApi for AikidoClient {
    async fn list_repositories(&self, pagination: &PaginationParams) -> Result<Listing<Repository>> {
        self.request(
            "/public/v1/repositories/code",
            RequestOptions::get().query(pagination.to_query_params()),
        )
        .await
    }

    async fn export_issues(&self, filters: &IssueFilterParams) -> Result<Listing<Issue>> {
        self.request(
            "/public/v1/issues/export",
            RequestOptions::get().query(filters.to_query_params()),
        )
        .await
    }

    async fn get_issue(&self, issue_id: &ResourceId) -> Result<Issue> {
        let segment = issue_id
            .path_segment()
            .ok_or_else(|| ApiError::InvalidId(issue_id.to_string()))?;
        let path = format!("/public/v1/issues/{}", segment);
        self.request(&path, RequestOptions::get()).await
    }

    async fn list_open_issue_groups(
        &self,
        filters: &IssueGroupFilterParams,
    ) -> Result<Listing<IssueGroup>> {
        self.request(
            "/public/v1/open-issue-groups",
            RequestOptions::get().query(filters.to_query_params()),
        )
        .await
    }

    async fn get_issue_group(&self, group_id: &ResourceId) -> Result<IssueGroup> {
        let segment = group_id
            .path_segment()
            .ok_or_else(|| ApiError::InvalidId(group_id.to_string()))?;
        let path = format!("/public/v1/issues/groups/{}", segment);
        self.request(&path, RequestOptions::get()).await
    }
}
