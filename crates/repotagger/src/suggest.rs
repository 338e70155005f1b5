//! Heuristic tag suggestions from a repository's public metadata.

use serde::Deserialize;

/// Stars above which a repository is `very-popular`.
pub const VERY_POPULAR_STARS: u64 = 10_000;

/// Stars above which a repository is `popular`.
pub const POPULAR_STARS: u64 = 1_000;

/// The slice of a single-repository API response the heuristic looks at.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct RepoStats {
    #[serde(rename = "stargazers_count", default)]
    pub stars: u64,
    #[serde(default)]
    pub owner: OwnerInfo,
    #[serde(default)]
    pub license: Option<LicenseInfo>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct OwnerInfo {
    /// `User` or `Organization` on GitHub.
    #[serde(rename = "type", default)]
    pub kind: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct LicenseInfo {
    #[serde(default)]
    pub key: Option<String>,
}

/// Suggest tags for a repository.
///
/// The popularity tier always comes first, then `<owner-type>-owner`, then
/// the license key. Nothing is deduplicated against existing tags.
pub fn suggest(stats: &RepoStats) -> Vec<String> {
    let popularity = if stats.stars > VERY_POPULAR_STARS {
        "very-popular"
    } else if stats.stars > POPULAR_STARS {
        "popular"
    } else {
        "not-popular"
    };

    let mut suggestions = vec![popularity.to_string()];

    if !stats.owner.kind.is_empty() {
        suggestions.push(format!("{}-owner", stats.owner.kind));
    }

    if let Some(key) = stats
        .license
        .as_ref()
        .and_then(|l| l.key.as_deref())
        .filter(|k| !k.is_empty())
    {
        suggestions.push(key.to_string());
    }

    suggestions
}
