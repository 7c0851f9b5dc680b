//! Default values for mirror configuration.
//!
//! This module provides centralized default values used by the configuration
//! loader and the `git` implementation, ensuring consistency and avoiding
//! duplication.

use std::path::PathBuf;

/// Branch tracked as the "edge" (latest development) version.
pub const DEFAULT_EDGE_BRANCH: &str = "development";

/// Name of the remote the mirror is cloned from.
pub const DEFAULT_REMOTE: &str = "origin";

/// Returns the default location of the local working copy.
///
/// Uses the platform-appropriate cache directory:
/// - Linux: `~/.cache/source-mirror/repo` (XDG Base Directory)
/// - macOS: `~/Library/Caches/source-mirror/repo`
/// - Windows: `{FOLDERID_LocalAppData}\source-mirror\repo`
///
/// Falls back to `.source-mirror/repo` in the current directory if the
/// platform cache directory cannot be determined.
pub fn default_repo_path() -> PathBuf {
    dirs::cache_dir()
        .unwrap_or_else(|| PathBuf::from(".source-mirror"))
        .join("source-mirror")
        .join("repo")
}

/// Serde helper for the `edge_branch` field.
pub(crate) fn default_edge_branch() -> String {
    DEFAULT_EDGE_BRANCH.to_string()
}
