//! Run coordination
//!
//! "Do X": Validate settings, then provision each repository in turn.
//!
//! One repository failing never stops the run. Missing settings stop it
//! before any command is issued.

use tracing::{error, info};

use crate::config::{Config, ConfigError, Settings};
use crate::forge::{ForgeWriter, GitHubWriter};
use crate::git::{GitCli, GitClient};
use crate::provision::{ProvisionOutcome, Provisioner, RepoDescriptor};
use crate::runner::CommandRunner;

const SEPARATOR: &str = "--------------------------------------------------";

/// Every attempt of a run, in index order.
#[derive(Debug, Clone, Default)]
pub struct RunSummary {
    pub outcomes: Vec<(RepoDescriptor, ProvisionOutcome)>,
}

impl RunSummary {
    pub fn published(&self) -> usize {
        self.outcomes.iter().filter(|(_, o)| o.is_published()).count()
    }

    pub fn urls(&self) -> impl Iterator<Item = &str> {
        self.outcomes.iter().filter_map(|(_, outcome)| match outcome {
            ProvisionOutcome::Published { url } => Some(url.as_str()),
            ProvisionOutcome::Failed { .. } => None,
        })
    }
}

/// Validate `settings` and provision every repository through `runner`.
///
/// On missing settings the fatal block is logged once and no command runs.
pub fn run<R: CommandRunner>(settings: Settings, runner: R) -> Result<RunSummary, ConfigError> {
    let config = match settings.validate() {
        Ok(config) => config,
        Err(e) => {
            error!("\n{}", e.fatal_block());
            return Err(e);
        }
    };

    let forge = GitHubWriter::new(&runner, config.credential());
    let git = GitCli::new(&runner, config.credential());
    Ok(run_with(&config, forge, git))
}

/// Provision `config.repo_count()` repositories with the given clients.
pub fn run_with<F: ForgeWriter, G: GitClient>(config: &Config, forge: F, git: G) -> RunSummary {
    info!("Starting GitHub CLI automation for user: {}", config.owner());
    info!("Creating and setting up {} repositories...", config.repo_count());
    info!("{}", SEPARATOR);

    let provisioner = Provisioner::new(config, forge, git);
    let mut summary = RunSummary::default();

    for index in 0..config.repo_count() {
        let repo = RepoDescriptor::for_index(config, index);
        info!("--- Starting process for {} (Index: {}) ---", repo.name, index);
        let outcome = provisioner.provision(&repo);
        info!("{}", SEPARATOR);
        summary.outcomes.push((repo, outcome));
    }

    info!("Automation complete.");
    info!(
        "{}/{} repositories published",
        summary.published(),
        summary.outcomes.len()
    );
    summary
}
