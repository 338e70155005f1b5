//! Page-count discovery and the bounded concurrent page collector.
//!
//! Page 1 of a collection carries a `Link` header whose `rel="last"` entry
//! names the final page. Pages `2..=last` are then fetched concurrently,
//! at most `page_concurrency` at a time, and folded into a [`PageSet`] by a
//! single aggregator task as they complete.

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::{Semaphore, mpsc};

use crate::http::{HttpHeaders, header_get};
use crate::model::Repo;

use super::client::GitHubClient;
use super::error::Result;

/// Parse a `Link` header and return the page number of its `rel="last"` entry.
///
/// GitHub Link headers look like:
/// `<https://api.github.com/user/1/starred?page=2>; rel="next", <...?page=34>; rel="last"`
pub fn parse_link_header(link_header: &str) -> Option<u32> {
    link_header.split(',').find_map(|part| {
        let mut url = None;
        let mut rel = None;

        for segment in part.split(';') {
            let segment = segment.trim();
            if let Some(inner) = segment
                .strip_prefix('<')
                .and_then(|s| s.strip_suffix('>'))
            {
                url = Some(inner);
            } else if let Some(rel_value) = segment.strip_prefix("rel=") {
                rel = Some(rel_value.trim_matches('"'));
            }
        }

        match (url, rel) {
            (Some(url), Some("last")) => extract_page_from_url(url),
            _ => None,
        }
    })
}

/// Extract the `page` query parameter from a URL.
fn extract_page_from_url(url: &str) -> Option<u32> {
    let (_, query) = url.split_once('?')?;
    query
        .split('&')
        .find_map(|param| param.strip_prefix("page="))
        .and_then(|value| value.parse().ok())
}

/// Highest page number advertised by a response, or `0` if unknown.
///
/// A missing or unparsable header is not an error: callers treat `0` and
/// `1` alike, as a single-page collection.
pub fn last_page(headers: &HttpHeaders) -> u32 {
    header_get(headers, "link")
        .and_then(parse_link_header)
        .unwrap_or(0)
}

/// Order-independent union of fetched pages, keyed by repository id.
#[derive(Debug, Default)]
pub struct PageSet {
    repos: HashMap<i64, Repo>,
    pages_fetched: usize,
    pages_failed: usize,
}

impl PageSet {
    /// Fold one successfully decoded page into the set.
    pub fn merge_page(&mut self, page: Vec<Repo>) {
        self.pages_fetched += 1;
        for repo in page {
            self.repos.entry(repo.id).or_insert(repo);
        }
    }

    /// Count a page that contributed nothing.
    pub fn record_failure(&mut self) {
        self.pages_failed += 1;
    }

    pub fn len(&self) -> usize {
        self.repos.len()
    }

    pub fn is_empty(&self) -> bool {
        self.repos.is_empty()
    }

    pub fn pages_fetched(&self) -> usize {
        self.pages_fetched
    }

    pub fn pages_failed(&self) -> usize {
        self.pages_failed
    }

    /// Consume the set. Order is unspecified.
    pub fn into_repos(self) -> Vec<Repo> {
        self.repos.into_values().collect()
    }
}

/// One completed page attempt, as seen by the aggregator.
struct PageOutcome {
    page: u32,
    result: Result<Vec<Repo>>,
}

impl GitHubClient {
    /// Fetch pages `2..=last_page` concurrently and return their union.
    ///
    /// Failed pages are logged and skipped; this never fails as a whole.
    /// Returns once all `last_page - 1` attempts have completed. There is no
    /// deadline of its own: a hung request stalls the call until the
    /// transport gives up on it.
    pub async fn collect_pages<F>(&self, page_url: F, last_page: u32) -> PageSet
    where
        F: Fn(u32) -> String + Send + Sync,
    {
        if last_page < 2 {
            return PageSet::default();
        }

        let expected = (last_page - 1) as usize;
        let concurrency = self.page_concurrency();
        let (tx, mut rx) = mpsc::channel::<PageOutcome>(concurrency);

        // Sole owner of the aggregate: completions are folded in arrival order.
        let aggregator = tokio::spawn(async move {
            let mut set = PageSet::default();
            for _ in 0..expected {
                let Some(outcome) = rx.recv().await else {
                    break;
                };
                match outcome.result {
                    Ok(repos) => {
                        tracing::debug!(page = outcome.page, count = repos.len(), "Fetched page");
                        set.merge_page(repos);
                    }
                    Err(e) => {
                        tracing::warn!(page = outcome.page, error = %e, "Skipping failed page");
                        set.record_failure();
                    }
                }
            }
            set
        });

        let gate = Arc::new(Semaphore::new(concurrency));
        for page in 2..=last_page {
            let Ok(permit) = Arc::clone(&gate).acquire_owned().await else {
                break;
            };
            let client = self.clone();
            let url = page_url(page);
            let task_tx = tx.clone();

            tokio::spawn(async move {
                let result = client.fetch_page(&url).await;
                drop(permit);
                // Only fails if the aggregator is gone, in which case nobody
                // is waiting for this page anymore.
                let _ = task_tx.send(PageOutcome { page, result }).await;
            });
        }
        drop(tx);

        match aggregator.await {
            Ok(set) => {
                tracing::debug!(
                    pages_fetched = set.pages_fetched(),
                    pages_failed = set.pages_failed(),
                    repos = set.len(),
                    "Collected pages"
                );
                set
            }
            Err(e) => {
                tracing::error!(error = %e, "Page aggregator task failed");
                PageSet::default()
            }
        }
    }
}
