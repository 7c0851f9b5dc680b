//! # Repository Mirror
//!
//! This module provides the `RepositoryMirror`, which keeps one local working
//! copy of an upstream repository in a usable state. It decides between
//! cloning, pulling and repairing, switches the working copy to a requested
//! branch or tag, and reports which versions are available.
//!
//! ## Design
//!
//! The mirror logic is separated from the concrete version-control and
//! filesystem work through two traits:
//!
//! - **`GitOperations`**: clone, pull, tag and branch listing, reset, clean
//!   and checkout, bound to the working copy.
//!
//! - **`FileSystemOperations`**: existence checks and recursive removal.
//!
//! `RepositoryMirror::new` wires in `SystemGit` and `DefaultFileSystem`. Tests
//! and embedders can pass their own implementations through
//! `RepositoryMirror::with_operations`.
//!
//! ## Invariant
//!
//! After any successful call the repository path is either absent or a valid
//! working copy. `is_available` enforces this by deleting a directory that
//! exists but is not a repository.
//!
//! ## Concurrency
//!
//! Every operation is a blocking, strictly sequential chain of steps. Nothing
//! is locked; callers that share one repository path must serialize their
//! calls themselves.

use crate::config::MirrorConfig;
use crate::error::{Error, Result};
use crate::filesystem::{DefaultFileSystem, FileSystemOperations};
use crate::git::{GitOperations, ResetMode, SystemGit};
use crate::version;
use log::{debug, info, warn};
use std::collections::BTreeSet;
use std::path::Path;

/// The entry point for managing the local mirror.
pub struct RepositoryMirror {
    config: MirrorConfig,
    git_ops: Box<dyn GitOperations>,
    fs_ops: Box<dyn FileSystemOperations>,
}

impl RepositoryMirror {
    /// Creates a mirror that drives the system `git` binary in
    /// `config.repo_path`.
    pub fn new(config: MirrorConfig) -> Self {
        let git_ops = Box::new(SystemGit::new(config.repo_path.clone()));
        Self {
            config,
            git_ops,
            fs_ops: Box::new(DefaultFileSystem),
        }
    }

    /// Creates a mirror with custom `GitOperations` and
    /// `FileSystemOperations` implementations.
    ///
    /// `git_ops` must already be bound to `config.repo_path`.
    pub fn with_operations(
        config: MirrorConfig,
        git_ops: Box<dyn GitOperations>,
        fs_ops: Box<dyn FileSystemOperations>,
    ) -> Self {
        Self {
            config,
            git_ops,
            fs_ops,
        }
    }

    pub fn config(&self) -> &MirrorConfig {
        &self.config
    }

    pub fn repo_path(&self) -> &Path {
        &self.config.repo_path
    }

    /// Reports whether a valid working copy exists at the repository path.
    ///
    /// A directory that exists but is not a repository is deleted so the
    /// next clone can succeed; the call then returns `false`. Fails with
    /// `Error::RepairFailure` when that deletion fails. When git cannot tell
    /// whether the directory is a repository its error is returned and
    /// nothing is removed.
    pub fn is_available(&self) -> Result<bool> {
        let path = self.repo_path();

        if let Err(e) = self.fs_ops.stat(path) {
            debug!("No working copy at {}: {}", path.display(), e);
            return Ok(false);
        }

        if self.git_ops.check_is_repo()? {
            debug!("Working copy at {} is available", path.display());
            return Ok(true);
        }

        warn!(
            "{} exists but is not a git repository, removing it",
            path.display()
        );
        self.fs_ops
            .remove(path)
            .map_err(|e| Error::RepairFailure {
                path: path.to_path_buf(),
                source: Box::new(e),
            })?;

        Ok(false)
    }

    /// Lists the tags of the working copy, always including the configured
    /// minimum version and edge branch.
    pub fn get_tags(&self) -> Result<BTreeSet<String>> {
        let path = self.repo_path();

        let available = self.is_available().map_err(|e| Error::Unavailable {
            path: path.to_path_buf(),
            reason: "availability check failed".to_string(),
            source: Some(Box::new(e)),
        })?;
        if !available {
            return Err(Error::Unavailable {
                path: path.to_path_buf(),
                reason: "no repository at this location".to_string(),
                source: None,
            });
        }

        let raw_tags = self.git_ops.tags().map_err(|e| Error::Unavailable {
            path: path.to_path_buf(),
            reason: "listing tags failed".to_string(),
            source: Some(Box::new(e)),
        })?;
        debug!("Found {} tags in {}", raw_tags.len(), path.display());

        Ok(version::with_sentinels(
            raw_tags,
            &self.config.min_version,
            &self.config.edge_branch,
        ))
    }

    /// Clones the origin if there is no working copy yet, then returns the
    /// tags. A failed clone is reported, never retried.
    pub fn ensure_cloned(&self) -> Result<BTreeSet<String>> {
        if !self.is_available()? {
            let path = self.repo_path();
            info!(
                "Cloning {} into {}",
                self.config.origin_url,
                path.display()
            );
            self.git_ops
                .clone_repo(&self.config.origin_url, path)
                .map_err(|e| Error::CloneFailure {
                    url: self.config.origin_url.clone(),
                    path: path.to_path_buf(),
                    source: Box::new(e),
                })?;
        }

        self.get_tags()
    }

    /// Pulls the latest changes, cloning instead when there is no working
    /// copy, then returns the tags.
    pub fn sync_repo(&self) -> Result<BTreeSet<String>> {
        if !self.is_available()? {
            return self.ensure_cloned();
        }

        let path = self.repo_path();
        info!("Pulling latest changes in {}", path.display());
        self.git_ops.pull().map_err(|e| Error::SyncFailure {
            path: path.to_path_buf(),
            source: Box::new(e),
        })?;

        self.get_tags()
    }

    /// Brings the working copy to a clean state and checks out `reference`.
    ///
    /// Runs reset, clean, local branch listing and a single checkout, in that
    /// order; the first failure ends the call. A reference that is not yet a
    /// local branch is checked out as a new branch tracking the remote one.
    /// Returns `reference` unchanged.
    pub fn switch_to(&self, reference: &str) -> Result<String> {
        let path = self.repo_path();

        self.git_ops
            .reset(ResetMode::Hard)
            .map_err(|e| Error::ResetFailure {
                path: path.to_path_buf(),
                source: Box::new(e),
            })?;

        self.git_ops.clean().map_err(|e| Error::CleanFailure {
            path: path.to_path_buf(),
            source: Box::new(e),
        })?;

        let local_branches = self
            .git_ops
            .branch_local()
            .map_err(|e| Error::BranchListFailure {
                path: path.to_path_buf(),
                source: Box::new(e),
            })?;

        let checkout = if local_branches.contains(reference) {
            debug!("Checking out local branch {}", reference);
            self.git_ops.checkout(reference)
        } else {
            debug!("Creating local branch {} from the remote", reference);
            self.git_ops.checkout_branch(reference, reference)
        };
        checkout.map_err(|e| Error::CheckoutFailure {
            reference: reference.to_string(),
            source: Box::new(e),
        })?;

        info!("Switched {} to {}", path.display(), reference);
        Ok(reference.to_string())
    }

    /// The versions a build may be requested for: the edge branch first, then
    /// every release tag at or above the minimum version, newest first.
    pub fn supported_tags(&self) -> Result<Vec<String>> {
        let tags = self.get_tags()?;
        Ok(version::supported_tags(
            &tags,
            &self.config.min_version,
            &self.config.edge_branch,
        ))
    }

    /// The newest release tag in the working copy, if any.
    pub fn latest_release(&self) -> Result<Option<String>> {
        let tags = self.get_tags()?;
        Ok(version::latest_release(&tags).cloned())
    }
}
