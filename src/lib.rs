//! # Source Mirror Library
//!
//! This library keeps a local mirror of a single upstream source repository
//! for a downstream build process (for example a firmware compile service).
//! It makes sure a valid clone exists, keeps it up to date, switches it to a
//! requested branch or tag, and reports which versions are available.
//!
//! ## Quick Example
//!
//! ```
//! use source_mirror::config;
//!
//! let yaml = r#"
//! origin_url: https://github.com/example/firmware.git
//! repo_path: /srv/firmware/repo
//! min_version: v8.1.0
//! "#;
//! let config = config::parse(yaml).unwrap();
//! assert_eq!(config.edge_branch, "development");
//!
//! // Every reported tag set contains both sentinels
//! let tags = source_mirror::version::with_sentinels(
//!     vec!["v8.1.0", "v9.0.0"],
//!     &config.min_version,
//!     &config.edge_branch,
//! );
//! assert!(tags.contains("development"));
//! assert_eq!(tags.len(), 3);
//! ```
//!
//! ## Core Concepts
//!
//! - **Configuration (`config`, `defaults`)**: the immutable origin URL, local
//!   path, minimum version and edge branch.
//! - **Capabilities (`git`, `filesystem`)**: traits for the version-control
//!   and filesystem primitives, with implementations backed by the system
//!   `git` binary and `std::fs`.
//! - **Mirror (`repository`)**: `RepositoryMirror`, which decides between
//!   clone, pull and repair, runs the reset → clean → checkout sequence, and
//!   reports tags.
//! - **Versions (`version`)**: sentinel handling and semver-aware filtering of
//!   the tag list.
//!
//! Nothing in this crate installs a logger. Operations log through the `log`
//! facade; binaries decide where the records go.

pub mod config;
pub mod defaults;
pub mod error;
pub mod filesystem;
pub mod git;
pub mod repository;
pub mod version;

pub use config::MirrorConfig;
pub use error::{Error, Result};
pub use repository::RepositoryMirror;

#[cfg(test)]
mod version_proptest;
