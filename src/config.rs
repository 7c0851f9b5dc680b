//! # Mirror Configuration
//!
//! This module defines `MirrorConfig`, the immutable set of inputs every
//! mirror operation works from: where the upstream lives, where the local
//! working copy goes, and the two sentinel identifiers that are always
//! reported as available versions.
//!
//! ## Parsing
//!
//! A configuration can be built in code with [`MirrorConfig::new`] or read
//! from YAML with [`parse`] / [`load`]:
//!
//! ```yaml
//! origin_url: https://github.com/example/firmware.git
//! min_version: v8.1.0
//! # optional
//! repo_path: /srv/firmware/repo
//! edge_branch: development
//! ```
//!
//! Both YAML entry points validate the result before returning it.

use crate::defaults::{default_edge_branch, default_repo_path};
use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Static configuration for a repository mirror
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MirrorConfig {
    /// URL (or local path) of the upstream repository to clone.
    pub origin_url: String,
    /// Location of the local working copy.
    #[serde(default = "default_repo_path")]
    pub repo_path: PathBuf,
    /// Oldest version offered to callers. Always reported as a tag.
    pub min_version: String,
    /// Branch representing the latest development line. Always reported as
    /// a tag.
    #[serde(default = "default_edge_branch")]
    pub edge_branch: String,
}

impl MirrorConfig {
    pub fn new(
        origin_url: impl Into<String>,
        repo_path: impl Into<PathBuf>,
        min_version: impl Into<String>,
        edge_branch: impl Into<String>,
    ) -> Self {
        Self {
            origin_url: origin_url.into(),
            repo_path: repo_path.into(),
            min_version: min_version.into(),
            edge_branch: edge_branch.into(),
        }
    }

    /// Checks that every field is usable.
    ///
    /// `origin_url` values containing `://` must parse as URLs. scp-like
    /// remotes (`git@host:owner/repo.git`) and plain filesystem paths are
    /// accepted as they are, since `git` understands both.
    pub fn validate(&self) -> Result<()> {
        if self.origin_url.trim().is_empty() {
            return Err(Error::ConfigParse {
                message: "origin_url must not be empty".to_string(),
                hint: Some("Set 'origin_url:' to the upstream repository".to_string()),
            });
        }

        if self.origin_url.contains("://") {
            if let Err(e) = url::Url::parse(&self.origin_url) {
                return Err(Error::ConfigParse {
                    message: format!("invalid origin_url '{}': {}", self.origin_url, e),
                    hint: Some(
                        "Use a full URL such as https://host/owner/repo.git".to_string(),
                    ),
                });
            }
        }

        if self.repo_path.as_os_str().is_empty() {
            return Err(Error::ConfigParse {
                message: "repo_path must not be empty".to_string(),
                hint: Some("Remove 'repo_path:' to use the default location".to_string()),
            });
        }

        if self.min_version.trim().is_empty() {
            return Err(Error::ConfigParse {
                message: "min_version must not be empty".to_string(),
                hint: Some("Set 'min_version:' to the oldest supported tag".to_string()),
            });
        }

        if self.edge_branch.trim().is_empty() {
            return Err(Error::ConfigParse {
                message: "edge_branch must not be empty".to_string(),
                hint: Some("Remove 'edge_branch:' to use 'development'".to_string()),
            });
        }

        Ok(())
    }
}

/// Parse and validate a YAML mirror configuration.
pub fn parse(yaml_content: &str) -> Result<MirrorConfig> {
    let config: MirrorConfig = serde_yaml::from_str(yaml_content)?;
    config.validate()?;
    Ok(config)
}

/// Read, parse and validate a YAML configuration file.
pub fn load(path: &Path) -> Result<MirrorConfig> {
    let content = std::fs::read_to_string(path)?;
    parse(&content)
}
