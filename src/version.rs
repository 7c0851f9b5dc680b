//! # Version Tags
//!
//! Helpers that turn the raw tag list of the working copy into what callers
//! are shown.
//!
//! - [`with_sentinels`] unions the raw tags with the configured minimum
//!   version and edge branch. Every tag report goes through it.
//! - [`supported_tags`] narrows a tag set down to the versions a build can
//!   actually be requested for: the edge branch, then every semantic-version
//!   tag at or above the minimum, newest first.
//! - [`latest_release`] picks the newest semantic-version tag.
//!
//! Tags are parsed with the `semver` crate after stripping an optional
//! leading `v`, so `v8.1.0` and `8.1.0` both parse while `v8.1` does not.

use semver::Version;
use std::collections::BTreeSet;

/// Parse a tag string into a semantic version
pub fn parse_semver_tag(tag: &str) -> Option<Version> {
    // Common tag formats: v1.0.0, 1.0.0
    let version_str = tag.strip_prefix('v').unwrap_or(tag);
    Version::parse(version_str).ok()
}

/// Raw tags plus the two sentinels, deduplicated.
pub fn with_sentinels<I, S>(raw_tags: I, min_version: &str, edge_branch: &str) -> BTreeSet<String>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let mut tags: BTreeSet<String> = raw_tags.into_iter().map(Into::into).collect();
    tags.insert(min_version.to_string());
    tags.insert(edge_branch.to_string());
    tags
}

/// Filters `tags` down to the versions offered to callers.
///
/// The edge branch always comes first, followed by semver tags `>=
/// min_version` in descending order. When `min_version` is not itself a
/// semantic version there is no lower bound. Anything else is dropped.
pub fn supported_tags<'a, I>(tags: I, min_version: &str, edge_branch: &str) -> Vec<String>
where
    I: IntoIterator<Item = &'a String>,
{
    let floor = parse_semver_tag(min_version);

    let mut releases: Vec<(Version, &String)> = tags
        .into_iter()
        .filter(|tag| tag.as_str() != edge_branch)
        .filter_map(|tag| parse_semver_tag(tag).map(|version| (version, tag)))
        .filter(|(version, _)| floor.as_ref().is_none_or(|floor| version >= floor))
        .collect();

    // Newest first; ties (v1.0.0 vs 1.0.0) fall back to the tag text
    releases.sort_by(|(a, a_tag), (b, b_tag)| b.cmp(a).then_with(|| a_tag.cmp(b_tag)));

    std::iter::once(edge_branch.to_string())
        .chain(releases.into_iter().map(|(_, tag)| tag.clone()))
        .collect()
}

/// The newest tag that parses as a semantic version, if any.
pub fn latest_release<'a, I>(tags: I) -> Option<&'a String>
where
    I: IntoIterator<Item = &'a String>,
{
    tags.into_iter()
        .filter_map(|tag| parse_semver_tag(tag).map(|version| (version, tag)))
        .max_by(|(a, _), (b, _)| a.cmp(b))
        .map(|(_, tag)| tag)
}
