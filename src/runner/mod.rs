//! External command execution
//!
//! "Do X": Run one external tool to completion and classify what happened.
//!
//! Every invocation carries an [`EnvOverlay`] that is layered over the
//! inherited environment. The overlay is also what redacts the credential out
//! of anything that reaches the log.
//!
//! # Example
//!
//! ```ignore
//! use pagesmith::runner::{CommandRunner, EnvOverlay, Invocation, SystemRunner};
//!
//! let overlay = EnvOverlay::with_credential(&credential);
//! let outcome = SystemRunner.run(&Invocation::new("gh", ["auth", "status"], overlay));
//! if !outcome.is_success() {
//!     // already logged
//! }
//! ```

mod internal;

use std::path::{Path, PathBuf};

use tracing::{debug, error, info};

use crate::config::{Credential, CREDENTIAL_OVERLAY_VAR};

pub use internal::SystemRunner;

/// Variables added on top of the inherited environment.
#[derive(Debug, Clone, Default)]
pub struct EnvOverlay {
    vars: Vec<(String, Credential)>,
}

impl EnvOverlay {
    /// Overlay that exports nothing.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Overlay exporting the credential as `GH_TOKEN`.
    pub fn with_credential(credential: &Credential) -> Self {
        Self {
            vars: vec![(CREDENTIAL_OVERLAY_VAR.to_string(), credential.clone())],
        }
    }

    pub fn vars(&self) -> impl Iterator<Item = (&str, &str)> {
        self.vars.iter().map(|(k, v)| (k.as_str(), v.expose()))
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.vars().find(|(k, _)| *k == name).map(|(_, v)| v)
    }

    /// Strip every overlaid secret out of `text`.
    pub fn redact(&self, text: &str) -> String {
        self.vars
            .iter()
            .fold(text.to_string(), |acc, (_, secret)| secret.redact(&acc))
    }
}

/// One external call: program, arguments, and where/how to run it.
#[derive(Debug, Clone)]
pub struct Invocation {
    program: String,
    args: Vec<String>,
    cwd: Option<PathBuf>,
    stdin: Option<Vec<u8>>,
    overlay: EnvOverlay,
}

impl Invocation {
    pub fn new<I, S>(program: &str, args: I, overlay: EnvOverlay) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            program: program.to_string(),
            args: args.into_iter().map(Into::into).collect(),
            cwd: None,
            stdin: None,
            overlay,
        }
    }

    pub fn current_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.cwd = Some(dir.into());
        self
    }

    /// Bytes written to the child's standard input before it is waited on.
    pub fn stdin(mut self, payload: impl Into<Vec<u8>>) -> Self {
        self.stdin = Some(payload.into());
        self
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    pub fn args(&self) -> &[String] {
        &self.args
    }

    pub fn cwd(&self) -> Option<&Path> {
        self.cwd.as_deref()
    }

    pub fn stdin_payload(&self) -> Option<&[u8]> {
        self.stdin.as_deref()
    }

    pub fn overlay(&self) -> &EnvOverlay {
        &self.overlay
    }

    /// Program and arguments joined by spaces, with secrets redacted.
    pub fn command_line(&self) -> String {
        let raw = std::iter::once(self.program.as_str())
            .chain(self.args.iter().map(String::as_str))
            .collect::<Vec<_>>()
            .join(" ");
        self.overlay.redact(&raw)
    }
}

/// How an external call ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandOutcome {
    /// Zero exit status. `output` is stdout followed by stderr.
    Success { output: String },
    /// Non-zero exit status, or killed by a signal (`code` is `None`).
    Failed { code: Option<i32>, stderr: String },
    /// The program itself could not be found.
    NotFound,
    /// Spawning or talking to the child failed for another reason.
    Io { message: String },
}

impl CommandOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success { .. })
    }
}

/// Runs external commands. Implementations must block until the child exits.
pub trait CommandRunner {
    fn run(&self, invocation: &Invocation) -> CommandOutcome;
}

impl<R: CommandRunner + ?Sized> CommandRunner for &R {
    fn run(&self, invocation: &Invocation) -> CommandOutcome {
        (**self).run(invocation)
    }
}

/// Whether stderr says the shell could not find `gh`.
pub fn gh_missing(stderr: &str) -> bool {
    stderr.contains("gh: not found") || stderr.contains("gh: command not found")
}

/// Join stdout and stderr and collapse every whitespace run to one space.
pub fn collapse_output(stdout: &str, stderr: &str) -> String {
    format!("{stdout}{stderr}")
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

/// First log line for a failed command: exit code and command line.
pub fn failure_summary(code: Option<i32>, command_line: &str) -> String {
    match code {
        Some(code) => format!("Command failed with exit code {code}: {command_line}"),
        None => format!("Command terminated by signal: {command_line}"),
    }
}

/// Log an outcome the way every runner reports it.
pub fn log_outcome(invocation: &Invocation, outcome: &CommandOutcome) {
    let overlay = invocation.overlay();
    match outcome {
        CommandOutcome::Success { output } => {
            info!("    Command successful.");
            if !output.is_empty() {
                info!("    {}", overlay.redact(output));
            }
        }
        CommandOutcome::Failed { code, stderr } => {
            error!("    {}", failure_summary(*code, &invocation.command_line()));
            error!("    stderr: {}", overlay.redact(stderr.trim()));
            if gh_missing(stderr) {
                error!("FATAL ERROR: GitHub CLI ('gh') is not installed or not in your PATH.");
            }
        }
        CommandOutcome::NotFound => {
            error!(
                "FATAL ERROR: Command executable '{}' not found. Is it installed and on your PATH?",
                invocation.program()
            );
        }
        CommandOutcome::Io { message } => {
            error!(
                "    Failed to run {}: {}",
                invocation.command_line(),
                overlay.redact(message)
            );
        }
    }
    debug!(success = outcome.is_success(), "    finished {}", invocation.command_line());
}
