//! # Error Handling
//!
//! This module defines the centralized error type for the mirror. It uses the
//! `thiserror` library to build a single `Error` enum whose variants map one to
//! one onto the failure points of the mirror operations.
//!
//! ## Key Components
//!
//! - **`Error`**: The enum of every failure the crate can return. Variants
//!   fall into three groups:
//!   - operation failures (`RepairFailure`, `Unavailable`, `CloneFailure`,
//!     `SyncFailure`, `ResetFailure`, `CleanFailure`, `BranchListFailure`,
//!     `CheckoutFailure`), each wrapping the capability error that caused it;
//!   - capability failures (`GitCommand`, `NotFound`, `Io`) raised by the
//!     `git` and `filesystem` implementations;
//!   - configuration failures (`ConfigParse`, `Yaml`).
//!
//! - **`Result<T>`**: A type alias for `std::result::Result<T, Error>`.
//!
//! The operation messages ("unable to clone", "switching to branch", ...) are
//! matched by existing callers, so they must stay stable.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for mirror operations
#[derive(Error, Debug)]
pub enum Error {
    /// The repository directory exists, is not a working copy, and could not
    /// be deleted.
    #[error("Cannot remove directory {}: {source}", path.display())]
    RepairFailure {
        path: PathBuf,
        #[source]
        source: Box<Error>,
    },

    /// Tags could not be listed, either because there is no working copy or
    /// because the listing itself failed.
    #[error("unable to get tags from {}: {reason}", path.display())]
    Unavailable {
        path: PathBuf,
        reason: String,
        #[source]
        source: Option<Box<Error>>,
    },

    /// Cloning the origin into the repository path failed.
    #[error("unable to clone {url} into {}: {source}", path.display())]
    CloneFailure {
        url: String,
        path: PathBuf,
        #[source]
        source: Box<Error>,
    },

    /// Pulling the latest changes failed.
    #[error("unable to pull in {}: {source}", path.display())]
    SyncFailure {
        path: PathBuf,
        #[source]
        source: Box<Error>,
    },

    /// Hard reset of the working copy failed.
    #[error("unable to reset {}: {source}", path.display())]
    ResetFailure {
        path: PathBuf,
        #[source]
        source: Box<Error>,
    },

    /// Removing untracked files failed.
    #[error("unable to clean {}: {source}", path.display())]
    CleanFailure {
        path: PathBuf,
        #[source]
        source: Box<Error>,
    },

    #[error("cannot get the list of local branches in {}: {source}", path.display())]
    BranchListFailure {
        path: PathBuf,
        #[source]
        source: Box<Error>,
    },

    /// Checking out `reference` failed. Raised for both the new tracking
    /// branch and the existing local branch paths.
    #[error("switching to branch {reference}: {source}")]
    CheckoutFailure {
        reference: String,
        #[source]
        source: Box<Error>,
    },

    /// A `git` invocation could not be spawned or exited unsuccessfully.
    #[error("Git command failed in {}: {command} - {stderr}", path.display())]
    GitCommand {
        command: String,
        path: PathBuf,
        stderr: String,
    },

    /// The path does not exist.
    #[error("Path not found: {}", path.display())]
    NotFound { path: PathBuf },

    /// The mirror configuration is invalid.
    ///
    /// Carries an optional hint about how to fix it.
    #[error("Configuration parsing error: {message}{}", hint.as_ref().map(|h| format!("\n  hint: {}", h)).unwrap_or_default())]
    ConfigParse {
        message: String,
        /// Optional hint for how to fix the configuration issue
        hint: Option<String>,
    },

    /// An I/O error, wrapped from `std::io::Error`.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A YAML parsing error, wrapped from `serde_yaml::Error`.
    #[error("YAML parsing error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

/// A convenient type alias for `Result<T, Error>`.
pub type Result<T> = std::result::Result<T, Error>;
