//! GitHub implementation of [`ForgeWriter`] over the `gh` CLI.

use serde::Serialize;

use super::{ForgeWriter, PAGES_BRANCH};
use crate::config::Credential;
use crate::runner::{CommandOutcome, CommandRunner, EnvOverlay, Invocation};

const GH: &str = "gh";

/// Body of `POST repos/{owner}/{repo}/pages`.
#[derive(Debug, Serialize)]
struct PagesRequest<'a> {
    source: PagesSource<'a>,
}

#[derive(Debug, Serialize)]
struct PagesSource<'a> {
    branch: &'a str,
    path: &'a str,
}

/// Pages request body serving `branch` from the repository root.
pub fn pages_payload(branch: &str) -> String {
    let request = PagesRequest {
        source: PagesSource { branch, path: "/" },
    };
    // Two borrowed strs; serialization cannot fail
    serde_json::to_string(&request).unwrap_or_default()
}

/// Uses `gh` for every call. Authentication comes from `GH_TOKEN` in the overlay.
pub struct GitHubWriter<R> {
    runner: R,
    overlay: EnvOverlay,
}

impl<R: CommandRunner> GitHubWriter<R> {
    pub fn new(runner: R, credential: &Credential) -> Self {
        Self {
            runner,
            overlay: EnvOverlay::with_credential(credential),
        }
    }

    fn gh<I, S>(&self, args: I) -> Invocation
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Invocation::new(GH, args, self.overlay.clone())
    }
}

impl<R: CommandRunner> ForgeWriter for GitHubWriter<R> {
    fn create_repo(&self, owner: &str, name: &str) -> CommandOutcome {
        let full_name = format!("{}/{}", owner, name);
        self.runner.run(&self.gh([
            "repo",
            "create",
            full_name.as_str(),
            "--public",
            "--clone=false",
        ]))
    }

    fn enable_pages(&self, owner: &str, name: &str) -> CommandOutcome {
        let endpoint = format!("repos/{}/{}/pages", owner, name);
        let invocation = self
            .gh(["api", "--method", "POST", endpoint.as_str(), "--input", "-"])
            .stdin(pages_payload(PAGES_BRANCH));
        self.runner.run(&invocation)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    #[derive(Default)]
    struct Capture {
        seen: RefCell<Vec<Invocation>>,
    }

    impl CommandRunner for Capture {
        fn run(&self, invocation: &Invocation) -> CommandOutcome {
            self.seen.borrow_mut().push(invocation.clone());
            CommandOutcome::Success {
                output: String::new(),
            }
        }
    }

    #[test]
    fn test_pages_payload_shape() {
        let value: serde_json::Value = serde_json::from_str(&pages_payload("main")).unwrap();
        assert_eq!(
            value,
            serde_json::json!({"source": {"branch": "main", "path": "/"}})
        );
    }

    #[test]
    fn test_create_repo_args() {
        let capture = Capture::default();
        let writer = GitHubWriter::new(&capture, &Credential::new("tok123"));
        assert!(writer.create_repo("alice", "repo_0").is_success());

        let seen = capture.seen.borrow();
        assert_eq!(
            seen[0].command_line(),
            "gh repo create alice/repo_0 --public --clone=false"
        );
        assert_eq!(seen[0].overlay().get("GH_TOKEN"), Some("tok123"));
        assert!(seen[0].stdin_payload().is_none());
    }

    #[test]
    fn test_enable_pages_sends_payload_on_stdin() {
        let capture = Capture::default();
        let writer = GitHubWriter::new(&capture, &Credential::new("tok123"));
        writer.enable_pages("alice", "repo_0");

        let seen = capture.seen.borrow();
        assert_eq!(
            seen[0].command_line(),
            "gh api --method POST repos/alice/repo_0/pages --input -"
        );
        assert_eq!(
            seen[0].stdin_payload(),
            Some(pages_payload("main").as_bytes())
        );
    }
}
