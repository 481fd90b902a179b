use std::num::NonZeroUsize;
use std::process::ExitCode;

use anyhow::Result;
use clap::Parser;
use tracing::debug;

use pagesmith::config::{
    self, CommitIdentity, Credential, Settings, DEFAULT_GIT_EMAIL, DEFAULT_GIT_NAME, DEFAULT_PREFIX,
};
use pagesmith::{coordinator, logging, preflight, SystemRunner};

#[derive(Parser)]
#[command(
    author,
    version = env!("CARGO_PKG_VERSION"),
    about = "Create GitHub repositories, push a generated index.html, and enable GitHub Pages",
    long_about = None
)]
struct Cli {
    /// Account that will own the repositories
    #[arg(long, env = "GITHUB_USERNAME")]
    owner: Option<String>,

    /// Token used for `gh` (as GH_TOKEN) and for the authenticated clone URL
    #[arg(long, env = "GITHUB_TOKEN", hide_env_values = true)]
    token: Option<String>,

    /// Number of repositories to create
    #[arg(short = 'n', long, env = "REPO_COUNT", default_value = "2")]
    count: NonZeroUsize,

    /// Repository name prefix; names are <prefix>_<index>
    #[arg(long, env = "REPO_PREFIX", default_value = DEFAULT_PREFIX)]
    prefix: String,

    /// Commit author name configured in each clone
    #[arg(long, default_value = DEFAULT_GIT_NAME)]
    git_name: String,

    /// Commit author email configured in each clone
    #[arg(long, default_value = DEFAULT_GIT_EMAIL)]
    git_email: String,

    /// Verbosity level (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

impl Cli {
    fn into_settings(self) -> Settings {
        Settings {
            owner: self.owner,
            token: self.token.map(Credential::new),
            repo_count: self.count,
            prefix: self.prefix,
            identity: CommitIdentity {
                name: self.git_name,
                email: self.git_email,
            },
        }
    }
}

fn main() -> Result<ExitCode> {
    // .env values become visible to the clap env fallbacks
    let env_file = config::load_dotenv();
    let cli = Cli::parse();
    logging::init(cli.verbose)?;

    if let Some(path) = env_file {
        debug!("Loaded settings from {}", path.display());
    }

    preflight::check_tools(&preflight::REQUIRED_TOOLS);

    match coordinator::run(cli.into_settings(), SystemRunner) {
        Ok(_) => Ok(ExitCode::SUCCESS),
        // The fatal block has already been logged
        Err(_) => Ok(ExitCode::from(2)),
    }
}
