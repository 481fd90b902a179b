//! Git operations for provisioning
//!
//! Handles:
//! - Cloning a fresh remote into a scratch directory
//! - Local commit identity
//! - Stage, commit, and push of the generated page
//!
//! Every call goes through a [`CommandRunner`](crate::runner::CommandRunner),
//! so the token overlay rides along even though git reads its credentials
//! from the clone URL.

mod operations;

pub use operations::GitCli;

use std::path::Path;

use crate::runner::CommandOutcome;

/// Message of the single commit pushed to each new repository.
pub const INITIAL_COMMIT_MESSAGE: &str = "Initial commit: Add index.html for GitHub Pages";

/// The git subcommands provisioning uses.
pub trait GitClient {
    fn clone_repo(&self, url: &str, target: &Path) -> CommandOutcome;
    fn set_user_name(&self, repo: &Path, name: &str) -> CommandOutcome;
    fn set_user_email(&self, repo: &Path, email: &str) -> CommandOutcome;
    fn add_all(&self, repo: &Path) -> CommandOutcome;
    fn commit(&self, repo: &Path, message: &str) -> CommandOutcome;
    /// Push `branch` to `origin`.
    fn push(&self, repo: &Path, branch: &str) -> CommandOutcome;
}

impl<G: GitClient + ?Sized> GitClient for &G {
    fn clone_repo(&self, url: &str, target: &Path) -> CommandOutcome {
        (**self).clone_repo(url, target)
    }

    fn set_user_name(&self, repo: &Path, name: &str) -> CommandOutcome {
        (**self).set_user_name(repo, name)
    }

    fn set_user_email(&self, repo: &Path, email: &str) -> CommandOutcome {
        (**self).set_user_email(repo, email)
    }

    fn add_all(&self, repo: &Path) -> CommandOutcome {
        (**self).add_all(repo)
    }

    fn commit(&self, repo: &Path, message: &str) -> CommandOutcome {
        (**self).commit(repo, message)
    }

    fn push(&self, repo: &Path, branch: &str) -> CommandOutcome {
        (**self).push(repo, branch)
    }
}
