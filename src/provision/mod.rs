//! Repository provisioning
//!
//! "Do X": Take one repository from nothing to a published Pages site.
//!
//! The sequence is linear and stops at the first failing step:
//!
//! ```text
//! create ─▶ workspace ─▶ clone ─▶ write index.html ─▶ user.name ─▶ user.email
//!        ─▶ add ─▶ commit ─▶ push ─▶ (workspace released) ─▶ enable pages
//! ```
//!
//! Nothing is rolled back. A repository created in step one stays on the
//! forge if a later step fails, and a pushed commit stays pushed. The scratch
//! workspace is always removed before the Pages call, whatever happened.

mod internal;

use std::fmt;

use crate::config::Config;
use crate::forge::ForgeWriter;
use crate::git::GitClient;

/// A repository this run intends to create.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepoDescriptor {
    pub name: String,
    pub owner: String,
}

impl RepoDescriptor {
    /// Descriptor for the repository at zero-based `index`.
    pub fn for_index(config: &Config, index: usize) -> Self {
        Self {
            name: config.repo_name(index),
            owner: config.owner().to_string(),
        }
    }

    pub fn full_name(&self) -> String {
        format!("{}/{}", self.owner, self.name)
    }
}

/// Provisioning steps, in execution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Step {
    CreateRepo,
    PrepareWorkspace,
    Clone,
    WriteContent,
    SetUserName,
    SetUserEmail,
    Stage,
    Commit,
    Push,
    EnablePages,
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Step::CreateRepo => "create repository",
            Step::PrepareWorkspace => "prepare workspace",
            Step::Clone => "clone",
            Step::WriteContent => "write index.html",
            Step::SetUserName => "configure user.name",
            Step::SetUserEmail => "configure user.email",
            Step::Stage => "stage changes",
            Step::Commit => "commit",
            Step::Push => "push",
            Step::EnablePages => "enable GitHub Pages",
        };
        f.write_str(label)
    }
}

/// How one repository's attempt ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProvisionOutcome {
    Published { url: String },
    Failed { step: Step },
}

impl ProvisionOutcome {
    pub fn is_published(&self) -> bool {
        matches!(self, Self::Published { .. })
    }
}

/// Runs the provisioning sequence against a forge and a git client.
pub struct Provisioner<'a, F, G> {
    config: &'a Config,
    forge: F,
    git: G,
}

impl<'a, F: ForgeWriter, G: GitClient> Provisioner<'a, F, G> {
    pub fn new(config: &'a Config, forge: F, git: G) -> Self {
        Self { config, forge, git }
    }

    /// Provision one repository. Failures are logged and returned, never raised.
    pub fn provision(&self, repo: &RepoDescriptor) -> ProvisionOutcome {
        internal::provision(self.config, &self.forge, &self.git, repo)
    }
}
