pub mod config;
pub mod coordinator;
pub mod forge;
pub mod git;
pub mod logging;
pub mod page;
pub mod preflight;
pub mod provision;
pub mod runner;

// Re-export commonly used types
pub use config::{Config, ConfigError, Credential, Settings};
pub use coordinator::{run, RunSummary};
pub use provision::{ProvisionOutcome, RepoDescriptor, Step};
pub use runner::{CommandOutcome, CommandRunner, Invocation, SystemRunner};
