//! Low-level git operations

use std::path::Path;

use super::GitClient;
use crate::config::Credential;
use crate::runner::{CommandOutcome, CommandRunner, EnvOverlay, Invocation};

const GIT: &str = "git";

/// [`GitClient`] backed by the `git` executable.
pub struct GitCli<R> {
    runner: R,
    overlay: EnvOverlay,
}

impl<R: CommandRunner> GitCli<R> {
    pub fn new(runner: R, credential: &Credential) -> Self {
        Self {
            runner,
            overlay: EnvOverlay::with_credential(credential),
        }
    }

    fn git<I, S>(&self, args: I) -> Invocation
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Invocation::new(GIT, args, self.overlay.clone())
    }

    fn git_in<I, S>(&self, repo: &Path, args: I) -> CommandOutcome
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.runner.run(&self.git(args).current_dir(repo))
    }
}

impl<R: CommandRunner> GitClient for GitCli<R> {
    fn clone_repo(&self, url: &str, target: &Path) -> CommandOutcome {
        let target = target.to_string_lossy();
        self.runner.run(&self.git(["clone", url, &*target]))
    }

    fn set_user_name(&self, repo: &Path, name: &str) -> CommandOutcome {
        self.git_in(repo, ["config", "user.name", name])
    }

    fn set_user_email(&self, repo: &Path, email: &str) -> CommandOutcome {
        self.git_in(repo, ["config", "user.email", email])
    }

    fn add_all(&self, repo: &Path) -> CommandOutcome {
        self.git_in(repo, ["add", "."])
    }

    fn commit(&self, repo: &Path, message: &str) -> CommandOutcome {
        self.git_in(repo, ["commit", "-m", message])
    }

    fn push(&self, repo: &Path, branch: &str) -> CommandOutcome {
        self.git_in(repo, ["push", "origin", branch])
    }
}
