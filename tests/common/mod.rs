//! Shared test utilities for integration tests.
//!
//! This module builds throwaway upstream repositories with the system `git`
//! binary so the mirror can be exercised end to end without network access.
//!
//! ## Usage
//!
//! ```rust,ignore
//! mod common;
//! use common::prelude::*;
//!
//! let fixture = MirrorFixture::new();
//! let mirror = fixture.mirror();
//! ```

use assert_fs::prelude::*;
use source_mirror::{MirrorConfig, RepositoryMirror};
use std::env;
use std::path::{Path, PathBuf};
use std::process::Command;

/// Re-export commonly used test dependencies for convenience.
pub mod prelude {
    pub use assert_fs::prelude::*;
    pub use predicates::prelude::*;

    #[allow(unused_imports)]
    pub use super::should_skip_git_tests;
    pub use super::{git, MirrorFixture, EDGE_BRANCH, MIN_VERSION};
}

pub const MIN_VERSION: &str = "v1.0.0";
pub const EDGE_BRANCH: &str = "development";

/// Check if tests that need a `git` binary should be skipped.
///
/// Returns `true` if the `SKIP_GIT_TESTS` environment variable is set.
#[allow(dead_code)]
pub fn should_skip_git_tests() -> bool {
    env::var("SKIP_GIT_TESTS").is_ok()
}

/// Run git in `dir`, panicking with its stderr on failure.
pub fn git(dir: &Path, args: &[&str]) -> String {
    let output = Command::new("git")
        .arg("-C")
        .arg(dir)
        .args([
            "-c",
            "user.name=Mirror Tests",
            "-c",
            "user.email=mirror-tests@example.com",
            "-c",
            "init.defaultBranch=main",
            "-c",
            "commit.gpgsign=false",
            "-c",
            "tag.gpgsign=false",
        ])
        .args(args)
        .output()
        .expect("Failed to run git");
    assert!(
        output.status.success(),
        "git {:?} failed: {}",
        args,
        String::from_utf8_lossy(&output.stderr)
    );
    String::from_utf8_lossy(&output.stdout).into_owned()
}

/// A temporary directory holding an upstream repository and room for a
/// mirror.
///
/// The upstream has a `main` branch tagged `v1.0.0` and `v1.1.0`, and a
/// `development` branch one commit ahead of `main`.
pub struct MirrorFixture {
    temp_dir: assert_fs::TempDir,
}

impl MirrorFixture {
    pub fn new() -> Self {
        let temp_dir = assert_fs::TempDir::new().expect("Failed to create temp directory");
        let upstream = temp_dir.child("upstream");
        upstream.create_dir_all().expect("Failed to create upstream");

        git(upstream.path(), &["init"]);
        upstream
            .child("firmware.c")
            .write_str("int version = 1;\n")
            .unwrap();
        git(upstream.path(), &["add", "."]);
        git(upstream.path(), &["commit", "-m", "Initial release"]);
        git(upstream.path(), &["tag", MIN_VERSION]);

        upstream
            .child("firmware.c")
            .write_str("int version = 11;\n")
            .unwrap();
        git(upstream.path(), &["commit", "-am", "Point release"]);
        git(upstream.path(), &["tag", "v1.1.0"]);

        git(upstream.path(), &["checkout", "-b", EDGE_BRANCH]);
        upstream
            .child("firmware.c")
            .write_str("int version = 12;\n")
            .unwrap();
        git(upstream.path(), &["commit", "-am", "Work in progress"]);
        git(upstream.path(), &["checkout", "main"]);

        Self { temp_dir }
    }

    pub fn upstream_path(&self) -> PathBuf {
        self.temp_dir.child("upstream").path().to_path_buf()
    }

    pub fn repo_path(&self) -> PathBuf {
        self.temp_dir.child("mirror").child("repo").path().to_path_buf()
    }

    pub fn config(&self) -> MirrorConfig {
        MirrorConfig::new(
            self.upstream_path().to_string_lossy(),
            self.repo_path(),
            MIN_VERSION,
            EDGE_BRANCH,
        )
    }

    pub fn mirror(&self) -> RepositoryMirror {
        RepositoryMirror::new(self.config())
    }

    /// Add a commit and tag on the upstream `main` branch.
    pub fn release(&self, tag: &str) {
        let upstream = self.temp_dir.child("upstream");
        upstream
            .child("CHANGELOG.md")
            .write_str(&format!("# {}\n", tag))
            .unwrap();
        git(upstream.path(), &["add", "."]);
        git(upstream.path(), &["commit", "-m", tag]);
        git(upstream.path(), &["tag", tag]);
    }

    /// Get a child path in the temp directory.
    #[allow(dead_code)]
    pub fn child(&self, path: &str) -> assert_fs::fixture::ChildPath {
        self.temp_dir.child(path)
    }
}

impl Default for MirrorFixture {
    fn default() -> Self {
        Self::new()
    }
}
