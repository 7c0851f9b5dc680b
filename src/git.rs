//! # Version-Control Capability
//!
//! `GitOperations` is the seam between the mirror logic and whatever performs
//! the actual version-control work. Every method is bound to a single working
//! copy; only `clone_repo` takes its destination explicitly because the
//! working copy does not exist yet when it runs.
//!
//! `SystemGit` is the production implementation. It shells out to the system
//! `git` binary, which automatically handles:
//! - SSH keys from ~/.ssh/
//! - Git credential helpers
//! - Personal access tokens
//! - Any authentication configured in ~/.gitconfig

use std::collections::BTreeSet;
use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};

use crate::defaults::DEFAULT_REMOTE;
use crate::error::{Error, Result};
use log::debug;

/// How far `reset` rewinds the working copy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResetMode {
    /// Discards both staged and unstaged modifications.
    Hard,
}

impl ResetMode {
    pub fn as_flag(self) -> &'static str {
        match self {
            ResetMode::Hard => "--hard",
        }
    }
}

/// Trait for git operations - allows mocking in tests
pub trait GitOperations: Send + Sync {
    /// Whether the working copy path is the root of a valid repository.
    ///
    /// `Ok(false)` means git ran and the path is not a repository of its own.
    /// An error means the question could not be answered, e.g. git is
    /// missing or refused to inspect the directory.
    fn check_is_repo(&self) -> Result<bool>;

    /// Lists every tag known to the working copy.
    fn tags(&self) -> Result<Vec<String>>;

    /// Clones `origin_url` into `dest_path`.
    fn clone_repo(&self, origin_url: &str, dest_path: &Path) -> Result<()>;

    /// Fetches and merges upstream changes into the current branch.
    fn pull(&self) -> Result<()>;

    fn reset(&self, mode: ResetMode) -> Result<()>;

    /// Removes untracked files and directories.
    fn clean(&self) -> Result<()>;

    /// Names of the branches that exist locally.
    fn branch_local(&self) -> Result<BTreeSet<String>>;

    /// Creates local branch `new_local_name` from `remote_ref` and checks it
    /// out, tracking the remote branch when there is one.
    fn checkout_branch(&self, new_local_name: &str, remote_ref: &str) -> Result<()>;

    /// Checks out an existing local branch.
    fn checkout(&self, existing_local_name: &str) -> Result<()>;
}

/// `GitOperations` backed by the system `git` command.
#[derive(Debug, Clone)]
pub struct SystemGit {
    work_dir: PathBuf,
    program: OsString,
}

impl SystemGit {
    pub fn new(work_dir: impl Into<PathBuf>) -> Self {
        Self {
            work_dir: work_dir.into(),
            program: OsString::from("git"),
        }
    }

    #[cfg(test)]
    pub(crate) fn with_program(mut self, program: impl Into<OsString>) -> Self {
        self.program = program.into();
        self
    }

    pub fn work_dir(&self) -> &Path {
        &self.work_dir
    }

    /// Runs `git -C <work_dir> <args>` and returns its stdout.
    fn run<S: AsRef<str>>(&self, args: &[S]) -> Result<String> {
        let description = args
            .iter()
            .map(AsRef::as_ref)
            .collect::<Vec<_>>()
            .join(" ");
        debug!("git {} (in {})", description, self.work_dir.display());

        let mut command = Command::new(&self.program);
        command
            .arg("-C")
            .arg(&self.work_dir)
            .args(args.iter().map(AsRef::as_ref));
        let output = execute(command, &description, &self.work_dir)?;
        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }

    fn has_remote_branch(&self, name: &str) -> bool {
        let tracking_ref = format!("refs/remotes/{}/{}", DEFAULT_REMOTE, name);
        self.run(&["rev-parse", "--verify", "--quiet", &tracking_ref])
            .is_ok()
    }
}

/// Spawns `command` and turns a spawn error or a non-zero exit into
/// `Error::GitCommand`.
fn execute(mut command: Command, description: &str, path: &Path) -> Result<Output> {
    // Never block on an interactive credential prompt.
    command.env("GIT_TERMINAL_PROMPT", "0");

    let output = command.output().map_err(|e| Error::GitCommand {
        command: description.to_string(),
        path: path.to_path_buf(),
        stderr: e.to_string(),
    })?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(Error::GitCommand {
            command: description.to_string(),
            path: path.to_path_buf(),
            stderr: describe_failure(stderr.trim()),
        });
    }

    Ok(output)
}

/// Adds a pointer at the usual culprits when git reports an auth failure.
fn describe_failure(stderr: &str) -> String {
    if stderr.contains("Authentication failed")
        || stderr.contains("Permission denied")
        || stderr.contains("Could not read from remote repository")
        || stderr.contains("terminal prompts disabled")
    {
        format!(
            "Authentication failed. Make sure you have access to the repository.\n\
            For private repos, ensure you have:\n\
            - SSH key added to ssh-agent\n\
            - Git credentials configured\n\
            - Personal access token set up\n\
            Error: {}",
            stderr
        )
    } else {
        stderr.to_string()
    }
}

/// Whether git's stderr says the directory is not inside any repository.
fn is_not_a_repository(stderr: &str) -> bool {
    stderr.contains("not a git repository")
}

/// Splits git's one-name-per-line output, dropping blank lines.
pub fn parse_ref_list(stdout: &str) -> Vec<String> {
    stdout
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}

impl GitOperations for SystemGit {
    fn check_is_repo(&self) -> Result<bool> {
        // git cannot even change into a file or a missing path.
        if !self.work_dir.is_dir() {
            return Ok(false);
        }

        let stdout = match self.run(&["rev-parse", "--show-toplevel"]) {
            Ok(stdout) => stdout,
            Err(Error::GitCommand { stderr, .. }) if is_not_a_repository(&stderr) => {
                return Ok(false)
            }
            Err(e) => return Err(e),
        };

        // A plain directory nested inside another working copy resolves to
        // the outer repository's root; only our own root counts.
        let toplevel = fs::canonicalize(stdout.trim())?;
        let work_dir = fs::canonicalize(&self.work_dir)?;
        Ok(toplevel == work_dir)
    }

    fn tags(&self) -> Result<Vec<String>> {
        let stdout = self.run(&["tag", "--list"])?;
        Ok(parse_ref_list(&stdout))
    }

    fn clone_repo(&self, origin_url: &str, dest_path: &Path) -> Result<()> {
        // Create parent directory if it doesn't exist
        if let Some(parent) = dest_path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let mut command = Command::new(&self.program);
        command.args(["clone", "--", origin_url]).arg(dest_path);
        execute(command, &format!("clone {}", origin_url), dest_path)?;
        Ok(())
    }

    fn pull(&self) -> Result<()> {
        self.run(&["pull"])?;
        Ok(())
    }

    fn reset(&self, mode: ResetMode) -> Result<()> {
        self.run(&["reset", mode.as_flag()])?;
        Ok(())
    }

    fn clean(&self) -> Result<()> {
        self.run(&["clean", "-f", "-d"])?;
        Ok(())
    }

    fn branch_local(&self) -> Result<BTreeSet<String>> {
        // Unlike `git branch`, never lists a "(HEAD detached at ...)" entry.
        let stdout = self.run(&["for-each-ref", "--format=%(refname:short)", "refs/heads/"])?;
        Ok(parse_ref_list(&stdout).into_iter().collect())
    }

    fn checkout_branch(&self, new_local_name: &str, remote_ref: &str) -> Result<()> {
        self.run(&checkout_branch_args(
            new_local_name,
            remote_ref,
            self.has_remote_branch(remote_ref),
        ))?;
        Ok(())
    }

    fn checkout(&self, existing_local_name: &str) -> Result<()> {
        self.run(&checkout_args(existing_local_name))?;
        Ok(())
    }
}

/// Arguments creating `new_local_name` from `remote_ref`. Caller-supplied
/// names follow `--end-of-options` so a leading `-` is never an option.
fn checkout_branch_args(new_local_name: &str, remote_ref: &str, tracked: bool) -> Vec<String> {
    let mut args: Vec<String> = vec!["checkout".into()];
    if tracked {
        args.push("--track".into());
    }
    args.push("-b".into());
    args.push(new_local_name.into());
    args.push("--end-of-options".into());
    if tracked {
        args.push(format!("{}/{}", DEFAULT_REMOTE, remote_ref));
    } else {
        // Not a remote branch, so most likely a tag.
        args.push(remote_ref.into());
    }
    args
}

fn checkout_args(existing_local_name: &str) -> Vec<String> {
    vec![
        "checkout".into(),
        "--end-of-options".into(),
        existing_local_name.into(),
        "--".into(),
    ]
}
