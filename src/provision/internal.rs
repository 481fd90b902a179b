//! Internal implementation for provisioning

use std::fs;
use std::path::Path;

use tempfile::TempDir;
use tracing::{error, info, warn};

use super::{ProvisionOutcome, RepoDescriptor, Step};
use crate::config::Config;
use crate::forge::{authenticated_clone_url, pages_url, ForgeWriter, PAGES_BRANCH};
use crate::git::{GitClient, INITIAL_COMMIT_MESSAGE};
use crate::page::{render_index_html, INDEX_FILE};
use crate::runner::CommandOutcome;

const WORKSPACE_PREFIX: &str = "pagesmith-";

pub(super) fn provision<F, G>(
    config: &Config,
    forge: &F,
    git: &G,
    repo: &RepoDescriptor,
) -> ProvisionOutcome
where
    F: ForgeWriter,
    G: GitClient,
{
    match run_steps(config, forge, git, repo) {
        Ok(url) => {
            info!("4. Success! Deployment URL: {}", url);
            info!("--- Process finished for {} ---", repo.name);
            ProvisionOutcome::Published { url }
        }
        Err(step) => {
            report_failure(repo, step);
            ProvisionOutcome::Failed { step }
        }
    }
}

fn run_steps<F, G>(config: &Config, forge: &F, git: &G, repo: &RepoDescriptor) -> Result<String, Step>
where
    F: ForgeWriter,
    G: GitClient,
{
    info!("1. Creating remote repository: {}...", repo.name);
    check(forge.create_repo(&repo.owner, &repo.name), Step::CreateRepo)?;

    push_initial_commit(config, git, repo)?;

    info!("3. Enabling GitHub Pages on '{}' branch...", PAGES_BRANCH);
    check(forge.enable_pages(&repo.owner, &repo.name), Step::EnablePages)?;

    Ok(pages_url(&repo.owner, &repo.name))
}

/// Clone, write, commit, and push inside a scratch directory.
///
/// The directory is removed when this returns, on every path.
fn push_initial_commit<G: GitClient>(
    config: &Config,
    git: &G,
    repo: &RepoDescriptor,
) -> Result<(), Step> {
    let workspace = tempfile::Builder::new()
        .prefix(WORKSPACE_PREFIX)
        .tempdir()
        .map_err(|e| {
            error!("    Could not create a temporary workspace: {}", e);
            Step::PrepareWorkspace
        })?;

    let result = in_workspace(config, git, repo, workspace.path());
    release(workspace);
    result
}

fn in_workspace<G: GitClient>(
    config: &Config,
    git: &G,
    repo: &RepoDescriptor,
    workspace: &Path,
) -> Result<(), Step> {
    let repo_dir = workspace.join(&repo.name);
    let url = authenticated_clone_url(&repo.owner, &repo.name, config.credential());

    info!("2a. Cloning repository into isolated temporary directory...");
    check(git.clone_repo(&url, &repo_dir), Step::Clone)?;

    info!("2b. Generating and writing {}...", INDEX_FILE);
    let html = render_index_html(&repo.name, &repo.owner);
    fs::write(repo_dir.join(INDEX_FILE), html).map_err(|e| {
        error!("    Could not write {}: {}", INDEX_FILE, e);
        Step::WriteContent
    })?;

    info!("2c. Committing and pushing {}...", INDEX_FILE);
    let identity = config.identity();
    check(git.set_user_name(&repo_dir, &identity.name), Step::SetUserName)?;
    check(git.set_user_email(&repo_dir, &identity.email), Step::SetUserEmail)?;
    check(git.add_all(&repo_dir), Step::Stage)?;
    check(git.commit(&repo_dir, INITIAL_COMMIT_MESSAGE), Step::Commit)?;
    check(git.push(&repo_dir, PAGES_BRANCH), Step::Push)
}

fn check(outcome: CommandOutcome, step: Step) -> Result<(), Step> {
    if outcome.is_success() {
        Ok(())
    } else {
        Err(step)
    }
}

fn release(workspace: TempDir) {
    let path = workspace.path().to_path_buf();
    if let Err(e) = workspace.close() {
        warn!("    Could not remove workspace {}: {}", path.display(), e);
    }
}

fn report_failure(repo: &RepoDescriptor, step: Step) {
    let name = &repo.name;
    match step {
        Step::CreateRepo => error!("--- FAILURE: Failed to create repository {}. ---", name),
        Step::Clone => error!("--- FAILURE: Failed to clone {}. ---", name),
        Step::Push => error!(
            "--- FAILURE: Failed to push to {}. This is usually due to an invalid token or permissions. ---",
            name
        ),
        Step::EnablePages => {
            error!("--- FAILURE: Failed to enable GitHub Pages for {}. ---", name)
        }
        other => error!("--- FAILURE: Step '{}' failed for {}. ---", other, name),
    }
    if step > Step::CreateRepo {
        warn!(
            "    {} was left on the forge as-is; nothing is rolled back.",
            repo.full_name()
        );
    }
}
