//! Tag normalization.

use std::collections::HashSet;

/// Normalize a list of raw tag strings.
///
/// Each input is trimmed; empty results and repeats (case-sensitive) are
/// dropped, and survivors keep the order of their first occurrence.
pub fn normalize_tags<I, S>(raw: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut seen = HashSet::new();
    let mut tags = Vec::new();
    for tag in raw {
        let tag = tag.as_ref().trim();
        if tag.is_empty() || !seen.insert(tag.to_string()) {
            continue;
        }
        tags.push(tag.to_string());
    }
    tags
}

/// Split a comma-separated tag list and normalize it.
pub fn parse_tag_list(list: &str) -> Vec<String> {
    normalize_tags(list.split(','))
}
