//! Constants shared by the GitHub client and its collector.

/// Public GitHub REST API root.
pub const DEFAULT_API_URL: &str = "https://api.github.com";

/// Default cap on concurrent page fetches for one collection.
pub const DEFAULT_PAGE_FETCH_CONCURRENCY: usize = 100;

/// Media type requested for every API call.
pub const ACCEPT_HEADER: &str = "application/vnd.github.v3+json";

/// GitHub rejects requests without a user agent.
pub const USER_AGENT: &str = "repotagger";
