use std::fmt;
use std::num::NonZeroUsize;
use std::path::{Path, PathBuf};

use thiserror::Error;

/// Environment variable holding the repository owner.
pub const OWNER_ENV: &str = "GITHUB_USERNAME";
/// Environment variable holding the access token.
pub const TOKEN_ENV: &str = "GITHUB_TOKEN";
/// Variable the token is exported under for every spawned command.
pub const CREDENTIAL_OVERLAY_VAR: &str = "GH_TOKEN";

pub const DEFAULT_REPO_COUNT: usize = 2;
pub const DEFAULT_PREFIX: &str = "repo";
pub const DEFAULT_GIT_NAME: &str = "GitHub Automation Script";
pub const DEFAULT_GIT_EMAIL: &str = "automation@example.com";

/// Shortest token whose bare occurrences are masked in logs.
pub const MIN_BARE_REDACT_LEN: usize = 6;

/// Load `.env` from the working directory or one of its parents.
///
/// Variables already set in the process environment are left alone.
/// Returns the file that was loaded, if any.
pub fn load_dotenv() -> Option<PathBuf> {
    dotenvy::dotenv().ok()
}

/// Load a specific env file. Existing variables are not overridden.
pub fn load_env_file(path: &Path) -> bool {
    dotenvy::from_path(path).is_ok()
}

/// Access token. Never rendered by `Debug` or `Display`.
#[derive(Clone, PartialEq, Eq)]
pub struct Credential(String);

impl Credential {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    /// The raw token, for building environments and clone URLs.
    pub fn expose(&self) -> &str {
        &self.0
    }

    /// Hide the token in `text`.
    ///
    /// The `oauth2:<token>@` clone URL segment is always masked. Bare
    /// occurrences are masked only for tokens of at least
    /// [`MIN_BARE_REDACT_LEN`] chars, so a tiny token cannot garble unrelated text.
    pub fn redact(&self, text: &str) -> String {
        if self.0.is_empty() {
            return text.to_string();
        }
        let masked = text.replace(&format!("oauth2:{}@", self.0), "oauth2:***@");
        if self.0.chars().count() < MIN_BARE_REDACT_LEN {
            return masked;
        }
        masked.replace(&self.0, "***")
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Credential(***)")
    }
}

impl fmt::Display for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("***")
    }
}

/// Local commit identity configured in each clone.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommitIdentity {
    pub name: String,
    pub email: String,
}

impl Default for CommitIdentity {
    fn default() -> Self {
        Self {
            name: DEFAULT_GIT_NAME.to_string(),
            email: DEFAULT_GIT_EMAIL.to_string(),
        }
    }
}

/// Unvalidated settings, as collected from flags, environment, and `.env`.
#[derive(Debug, Clone)]
pub struct Settings {
    pub owner: Option<String>,
    pub token: Option<Credential>,
    pub repo_count: NonZeroUsize,
    pub prefix: String,
    pub identity: CommitIdentity,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            owner: None,
            token: None,
            repo_count: NonZeroUsize::new(DEFAULT_REPO_COUNT).unwrap_or(NonZeroUsize::MIN),
            prefix: DEFAULT_PREFIX.to_string(),
            identity: CommitIdentity::default(),
        }
    }
}

impl Settings {
    /// Check the required values and freeze the result.
    ///
    /// Owner is checked before the token; the first missing value wins.
    /// Blank values count as missing.
    pub fn validate(self) -> Result<Config, ConfigError> {
        let owner = self
            .owner
            .filter(|o| !o.trim().is_empty())
            .ok_or(ConfigError::MissingOwner)?;
        let credential = self
            .token
            .filter(|t| !t.expose().trim().is_empty())
            .ok_or(ConfigError::MissingToken)?;

        Ok(Config {
            owner,
            credential,
            repo_count: self.repo_count,
            prefix: self.prefix,
            identity: self.identity,
        })
    }
}

/// Validated run configuration. Immutable once built.
#[derive(Debug, Clone)]
pub struct Config {
    owner: String,
    credential: Credential,
    repo_count: NonZeroUsize,
    prefix: String,
    identity: CommitIdentity,
}

impl Config {
    pub fn owner(&self) -> &str {
        &self.owner
    }

    pub fn credential(&self) -> &Credential {
        &self.credential
    }

    pub fn repo_count(&self) -> usize {
        self.repo_count.get()
    }

    pub fn identity(&self) -> &CommitIdentity {
        &self.identity
    }

    /// Repository name for a zero-based index: `<prefix>_<index>`.
    pub fn repo_name(&self, index: usize) -> String {
        format!("{}_{}", self.prefix, index)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("GITHUB_USERNAME not found")]
    MissingOwner,
    #[error("GITHUB_TOKEN not found")]
    MissingToken,
}

const FATAL_RULE: &str = "!!!!!!!!!!!!!!!!!!!!!!!!!!!!!!!!!!!!!!!!!!!!!!!!!!!!!!!!!!!!";

impl ConfigError {
    /// The delimited block shown when the run refuses to start.
    pub fn fatal_block(&self) -> String {
        let body = match self {
            Self::MissingOwner => format!(
                "FATAL ERROR: {OWNER_ENV} not found. Set it in the .env file, the environment, or pass --owner."
            ),
            Self::MissingToken => format!(
                "FATAL ERROR: {TOKEN_ENV} not found. Set it in the .env file, the environment, or pass --token.\n             \
                 This token is required to create repositories."
            ),
        };
        format!("{FATAL_RULE}\n{body}\n{FATAL_RULE}")
    }
}
