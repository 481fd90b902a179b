//! Preflight checks - warn about tools missing from PATH before the run.
//!
//! Advisory only. Each command still reports its own missing executable.

use std::path::PathBuf;

use tracing::{debug, warn};

/// Executables the run shells out to.
pub const REQUIRED_TOOLS: [&str; 2] = ["git", "gh"];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MissingTool {
    pub name: String,
}

/// Look up each tool on PATH, logging a warning for every one that is absent.
pub fn check_tools(names: &[&str]) -> Vec<MissingTool> {
    names
        .iter()
        .filter_map(|name| match locate(name) {
            Some(path) => {
                debug!("Found {} at {}", name, path.display());
                None
            }
            None => {
                warn!(
                    "'{}' was not found on PATH; commands that need it will fail.",
                    name
                );
                Some(MissingTool {
                    name: name.to_string(),
                })
            }
        })
        .collect()
}

fn locate(name: &str) -> Option<PathBuf> {
    which::which(name).ok()
}
