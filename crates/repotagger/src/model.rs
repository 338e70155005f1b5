//! The starred-repository record shared by the fetcher, the store and the
//! HTTP front end.

use serde::{Deserialize, Serialize};

use crate::tags::normalize_tags;

/// A starred repository and the tags attached to it locally.
///
/// The `id` is the one assigned by the code host; it is never generated here.
/// Values handed out by the store are detached copies.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Repo {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub html_url: String,
    #[serde(default)]
    pub language: Option<String>,
    /// Normalized tags in first-occurrence order.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
}

impl Repo {
    /// Replace the tag set with the normalized form of `raw`.
    ///
    /// Previous tags are discarded entirely.
    pub fn set_tags<I, S>(&mut self, raw: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.tags = normalize_tags(raw);
    }

    /// `owner/name` derived from the path of the canonical web URL.
    ///
    /// Returns `None` when the URL does not parse or its path is not exactly
    /// two segments.
    #[must_use]
    pub fn full_name(&self) -> Option<String> {
        let url = url::Url::parse(&self.html_url).ok()?;
        let mut segments = url.path_segments()?.filter(|s| !s.is_empty());
        let owner = segments.next()?;
        let name = segments.next()?;
        if segments.next().is_some() {
            return None;
        }
        Some(format!("{owner}/{name}"))
    }
}
