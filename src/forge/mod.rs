//! Forge operations for repository provisioning.
//!
//! "Do X": Create repositories and switch on GitHub Pages.
//!
//! The forge is reached only through its CLI (`gh`). [`ForgeWriter`] names
//! the two calls provisioning needs so a test double can stand in for it.
//!
//! # Example
//!
//! ```ignore
//! use pagesmith::forge::{ForgeWriter, GitHubWriter};
//!
//! let forge = GitHubWriter::new(SystemRunner, config.credential());
//! if forge.create_repo("alice", "repo_0").is_success() {
//!     forge.enable_pages("alice", "repo_0");
//! }
//! ```

pub mod writer;

pub use writer::GitHubWriter;

use crate::config::Credential;
use crate::runner::CommandOutcome;

/// Host the clone URL and Pages site are derived from.
pub const GITHUB_HOST: &str = "github.com";

/// Branch Pages is served from and the initial commit is pushed to.
pub const PAGES_BRANCH: &str = "main";

/// Write operations on a forge platform.
pub trait ForgeWriter {
    /// Create a public repository without cloning it locally.
    fn create_repo(&self, owner: &str, name: &str) -> CommandOutcome;

    /// Enable Pages for the repository, served from the root of [`PAGES_BRANCH`].
    fn enable_pages(&self, owner: &str, name: &str) -> CommandOutcome;
}

impl<F: ForgeWriter + ?Sized> ForgeWriter for &F {
    fn create_repo(&self, owner: &str, name: &str) -> CommandOutcome {
        (**self).create_repo(owner, name)
    }

    fn enable_pages(&self, owner: &str, name: &str) -> CommandOutcome {
        (**self).enable_pages(owner, name)
    }
}

/// HTTPS clone URL with the token as the basic-auth user segment.
///
/// Pushes from the clone reuse this URL through `origin`.
pub fn authenticated_clone_url(owner: &str, name: &str, credential: &Credential) -> String {
    format!(
        "https://oauth2:{}@{}/{}/{}.git",
        credential.expose(),
        GITHUB_HOST,
        owner,
        name
    )
}

/// Public address of the Pages site. Not checked for reachability.
pub fn pages_url(owner: &str, name: &str) -> String {
    format!("https://{}.github.io/{}", owner, name)
}
