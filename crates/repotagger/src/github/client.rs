//! GitHub API client for starred repositories and single-repository metadata.

use std::sync::Arc;
use std::time::Duration;

use serde::de::DeserializeOwned;

use crate::http::{HttpRequest, HttpResponse, HttpTransport, ReqwestTransport};
use crate::model::Repo;
use crate::suggest::{RepoStats, suggest};

use super::error::{GitHubError, Result};
use super::pagination::last_page;
use super::types::{ACCEPT_HEADER, DEFAULT_API_URL, DEFAULT_PAGE_FETCH_CONCURRENCY, USER_AGENT};

/// GitHub API client.
///
/// Cheap to clone: every clone shares one transport, and therefore one
/// connection pool. Build it once at startup and hand clones around.
#[derive(Clone)]
pub struct GitHubClient {
    transport: Arc<dyn HttpTransport>,
    api_url: String,
    page_concurrency: usize,
}

impl GitHubClient {
    /// Create a client for `api_url` backed by a pooled reqwest transport.
    ///
    /// # Errors
    /// Returns `GitHubError::Http` if the underlying HTTP client cannot be built.
    pub fn new(api_url: &str, timeout: Duration) -> Result<Self> {
        let transport = ReqwestTransport::with_timeout(timeout)?;
        Ok(Self::with_transport(Arc::new(transport), api_url))
    }

    /// Create a client for the public GitHub API.
    pub fn github(timeout: Duration) -> Result<Self> {
        Self::new(DEFAULT_API_URL, timeout)
    }

    /// Create a client over an arbitrary transport.
    pub fn with_transport(transport: Arc<dyn HttpTransport>, api_url: &str) -> Self {
        Self {
            transport,
            api_url: api_url.trim_end_matches('/').to_string(),
            page_concurrency: DEFAULT_PAGE_FETCH_CONCURRENCY,
        }
    }

    /// Set the maximum number of page fetches in flight at once (minimum 1).
    #[must_use]
    pub fn with_page_concurrency(mut self, concurrency: usize) -> Self {
        self.page_concurrency = concurrency.max(1);
        self
    }

    pub fn api_url(&self) -> &str {
        &self.api_url
    }

    pub fn page_concurrency(&self) -> usize {
        self.page_concurrency
    }

    /// URL of one page of `user`'s starred collection.
    pub fn starred_page_url(&self, user: &str, page: u32) -> String {
        format!("{}/users/{}/starred?page={}", self.api_url, user, page)
    }

    /// Issue one GET with the API headers and return the raw response.
    pub async fn request_page(&self, url: &str) -> Result<HttpResponse> {
        let request = HttpRequest::get(url)
            .header("Accept", ACCEPT_HEADER)
            .header("User-Agent", USER_AGENT);
        Ok(self.transport.get(request).await?)
    }

    /// Fetch one page and decode it into repositories.
    ///
    /// Any non-2xx status is an error here, 404 included; only the caller
    /// fetching page 1 gives 404 a meaning of its own.
    pub async fn fetch_page(&self, url: &str) -> Result<Vec<Repo>> {
        let response = self.request_page(url).await?;
        ensure_success(&response, url)?;
        decode(&response.body)
    }

    /// Fetch every starred repository of `user`.
    ///
    /// # Errors
    /// `GitHubError::NotFound` if the user does not exist; any other failure
    /// on page 1 is returned as is. Failures on later pages are absorbed.
    pub async fn get_repositories(&self, user: &str) -> Result<Vec<Repo>> {
        let repos = self
            .get_paginated(|page| self.starred_page_url(user, page))
            .await?;
        tracing::info!(user, count = repos.len(), "Fetched starred repositories");
        Ok(repos)
    }

    /// Fetch a whole paginated collection given a page-number URL builder.
    pub async fn get_paginated<F>(&self, page_url: F) -> Result<Vec<Repo>>
    where
        F: Fn(u32) -> String + Send + Sync,
    {
        let first_url = page_url(1);
        let first = self.request_page(&first_url).await?;

        if first.status == 404 {
            return Err(GitHubError::not_found(first_url));
        }
        ensure_success(&first, &first_url)?;

        let pages = last_page(&first.headers);
        let mut set = if pages > 1 {
            self.collect_pages(&page_url, pages).await
        } else {
            Default::default()
        };

        set.merge_page(decode(&first.body)?);
        Ok(set.into_repos())
    }

    /// Fetch `owner/name` fresh from the API and derive suggested tags.
    pub async fn suggest_tags(&self, full_name: &str) -> Result<Vec<String>> {
        let url = format!("{}/repos/{}", self.api_url, full_name);
        let response = self.request_page(&url).await?;
        if response.status == 404 {
            return Err(GitHubError::not_found(url));
        }
        ensure_success(&response, &url)?;

        let stats: RepoStats = decode(&response.body)?;
        Ok(suggest(&stats))
    }
}

fn ensure_success(response: &HttpResponse, url: &str) -> Result<()> {
    if response.is_success() {
        Ok(())
    } else {
        Err(GitHubError::Status {
            status: response.status,
            url: url.to_string(),
        })
    }
}

fn decode<T: DeserializeOwned>(body: &[u8]) -> Result<T> {
    serde_json::from_slice(body).map_err(GitHubError::Json)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http::MockTransport;

    const API: &str = "https://api.test";

    fn repo_json(id: i64) -> serde_json::Value {
        serde_json::json!({
            "id": id,
            "name": format!("repo-{id}"),
            "description": format!("Repository {id}"),
            "html_url": format!("https://github.test/owner/repo-{id}"),
            "language": "Go"
        })
    }

    fn link_last(page: u32) -> String {
        format!(
            "<{API}/user/1/starred?page=2>; rel=\"next\", <{API}/user/1/starred?page={page}>; rel=\"last\""
        )
    }

    fn client(transport: &MockTransport) -> GitHubClient {
        GitHubClient::with_transport(Arc::new(transport.clone()), API)
    }

    fn sorted_ids(repos: &[Repo]) -> Vec<i64> {
        let mut ids: Vec<i64> = repos.iter().map(|r| r.id).collect();
        ids.sort_unstable();
        ids
    }

    #[test]
    fn starred_page_url_format() {
        let c = GitHubClient::with_transport(Arc::new(MockTransport::new()), "https://api.test/");
        assert_eq!(
            c.starred_page_url("octocat", 3),
            "https://api.test/users/octocat/starred?page=3"
        );
        assert_eq!(c.page_concurrency(), DEFAULT_PAGE_FETCH_CONCURRENCY);
        assert_eq!(c.with_page_concurrency(0).page_concurrency(), 1);
    }

    #[test]
    fn test_github_client_is_clone() {
        fn assert_clone<T: Clone + Send + Sync + 'static>() {}
        assert_clone::<GitHubClient>();
    }

    #[tokio::test]
    async fn request_page_sends_api_headers() {
        let transport = MockTransport::new();
        let url = format!("{API}/users/octocat/starred?page=1");
        transport.push_json(url.as_str(), vec![], &serde_json::json!([]));

        client(&transport).request_page(&url).await.expect("response");

        let requests = transport.requests();
        assert_eq!(requests.len(), 1);
        let headers = &requests[0].headers;
        assert!(headers.contains(&("Accept".to_string(), ACCEPT_HEADER.to_string())));
        assert!(headers.contains(&("User-Agent".to_string(), USER_AGENT.to_string())));
    }

    #[tokio::test]
    async fn single_page_without_link_header() {
        let transport = MockTransport::new();
        transport.push_json(
            format!("{API}/users/octocat/starred?page=1"),
            vec![],
            &serde_json::json!([repo_json(1), repo_json(2)]),
        );

        let repos = client(&transport)
            .get_repositories("octocat")
            .await
            .expect("repos");

        assert_eq!(sorted_ids(&repos), vec![1, 2]);
        assert_eq!(transport.requests().len(), 1);
    }

    #[tokio::test]
    async fn multi_page_merges_page_one_with_surviving_pages() {
        let transport = MockTransport::new();
        let url = |page: u32| format!("{API}/users/octocat/starred?page={page}");
        let link = link_last(4);
        transport.push_json(url(1), vec![("Link", link.as_str())], &serde_json::json!([repo_json(1)]));
        transport.push_json(url(2), vec![], &serde_json::json!([repo_json(2), repo_json(3)]));
        transport.push_status(url(3), 502);
        transport.push_json(url(4), vec![], &serde_json::json!([repo_json(4)]));

        let repos = client(&transport)
            .get_repositories("octocat")
            .await
            .expect("partial failure is absorbed");

        assert_eq!(sorted_ids(&repos), vec![1, 2, 3, 4]);
        assert_eq!(transport.requests().len(), 4);
    }

    #[tokio::test]
    async fn not_found_user_is_distinct_error() {
        let transport = MockTransport::new();
        transport.push_status(format!("{API}/users/ghost/starred?page=1"), 404);

        let err = client(&transport)
            .get_repositories("ghost")
            .await
            .expect_err("should be not found");

        assert!(err.is_not_found(), "unexpected error: {err:?}");
    }

    #[tokio::test]
    async fn malformed_first_page_is_fatal() {
        let transport = MockTransport::new();
        transport.push_response(
            format!("{API}/users/octocat/starred?page=1"),
            HttpResponse {
                status: 200,
                headers: Vec::new(),
                body: b"<html>".to_vec(),
            },
        );

        let err = client(&transport)
            .get_repositories("octocat")
            .await
            .expect_err("decode should fail");

        assert!(matches!(err, GitHubError::Json(_)), "unexpected error: {err:?}");
    }

    #[tokio::test]
    async fn malformed_first_page_is_fatal_even_with_good_later_pages() {
        let transport = MockTransport::new();
        let url = |page: u32| format!("{API}/users/octocat/starred?page={page}");
        let link = link_last(2);
        transport.push_response(
            url(1),
            HttpResponse {
                status: 200,
                headers: vec![("Link".to_string(), link)],
                body: b"{}".to_vec(),
            },
        );
        transport.push_json(url(2), vec![], &serde_json::json!([repo_json(2)]));

        let err = client(&transport)
            .get_repositories("octocat")
            .await
            .expect_err("decode should fail");
        assert!(matches!(err, GitHubError::Json(_)));
    }

    #[tokio::test]
    async fn server_error_on_first_page_is_status_error() {
        let transport = MockTransport::new();
        transport.push_status(format!("{API}/users/octocat/starred?page=1"), 500);

        let err = client(&transport)
            .get_repositories("octocat")
            .await
            .expect_err("should fail");

        assert!(matches!(err, GitHubError::Status { status: 500, .. }));
    }

    #[tokio::test]
    async fn transport_failure_on_first_page_is_http_error() {
        let transport = MockTransport::new();

        let err = client(&transport)
            .get_repositories("octocat")
            .await
            .expect_err("should fail");

        assert!(matches!(err, GitHubError::Http(_)));
    }

    #[tokio::test]
    async fn fetch_page_rejects_not_found() {
        let transport = MockTransport::new();
        let url = format!("{API}/users/octocat/starred?page=9");
        transport.push_status(url.as_str(), 404);

        let err = client(&transport).fetch_page(&url).await.expect_err("404");
        assert!(matches!(err, GitHubError::Status { status: 404, .. }));
    }

    #[tokio::test]
    async fn suggest_tags_uses_repository_metadata() {
        let transport = MockTransport::new();
        transport.push_json(
            format!("{API}/repos/octocat/hello-world"),
            vec![],
            &serde_json::json!({
                "stargazers_count": 1000,
                "owner": { "type": "User" },
                "license": { "key": "mit" }
            }),
        );

        let tags = client(&transport)
            .suggest_tags("octocat/hello-world")
            .await
            .expect("suggestions");

        assert_eq!(tags, vec!["not-popular", "User-owner", "mit"]);
    }

    #[tokio::test]
    async fn suggest_tags_not_found() {
        let transport = MockTransport::new();
        transport.push_status(format!("{API}/repos/octocat/gone"), 404);

        let err = client(&transport)
            .suggest_tags("octocat/gone")
            .await
            .expect_err("404");
        assert!(err.is_not_found());
    }
}
