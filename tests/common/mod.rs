//! Recording command runner and log capture shared by the integration tests.

#![allow(dead_code)]

use std::cell::RefCell;
use std::fs;
use std::io::{self, Write};
use std::num::NonZeroUsize;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use pagesmith::config::{Credential, Settings};
use pagesmith::runner::log_outcome;
use pagesmith::{CommandOutcome, CommandRunner, Invocation};

/// Records every invocation and succeeds unless told otherwise.
///
/// Outcomes are logged through `log_outcome`, exactly as the system runner
/// reports them. A successful `git clone` creates its target directory, the way the real
/// command would, so the page can be written into it.
pub struct RecordingRunner {
    calls: RefCell<Vec<Invocation>>,
    fail_prefix: Option<String>,
    fail_stderr: String,
    clone_creates_dir: bool,
}

impl RecordingRunner {
    pub fn succeeding() -> Self {
        Self {
            calls: RefCell::new(Vec::new()),
            fail_prefix: None,
            fail_stderr: "simulated failure".to_string(),
            clone_creates_dir: true,
        }
    }

    /// Fail every call whose redacted command line starts with `prefix`.
    pub fn failing_on(prefix: &str) -> Self {
        Self {
            fail_prefix: Some(prefix.to_string()),
            ..Self::succeeding()
        }
    }

    pub fn with_stderr(mut self, stderr: &str) -> Self {
        self.fail_stderr = stderr.to_string();
        self
    }

    /// Clone "succeeds" but leaves no directory behind.
    pub fn without_clone_dir(mut self) -> Self {
        self.clone_creates_dir = false;
        self
    }

    pub fn calls(&self) -> Vec<Invocation> {
        self.calls.borrow().clone()
    }

    pub fn command_lines(&self) -> Vec<String> {
        self.calls.borrow().iter().map(Invocation::command_line).collect()
    }

    /// Target directories of every `git clone` seen so far.
    pub fn clone_targets(&self) -> Vec<PathBuf> {
        self.calls
            .borrow()
            .iter()
            .filter(|inv| inv.program() == "git" && inv.args().first().map(String::as_str) == Some("clone"))
            .map(|inv| PathBuf::from(&inv.args()[2]))
            .collect()
    }
}

impl CommandRunner for RecordingRunner {
    fn run(&self, invocation: &Invocation) -> CommandOutcome {
        let outcome = self.respond(invocation);
        log_outcome(invocation, &outcome);
        outcome
    }
}

impl RecordingRunner {
    fn respond(&self, invocation: &Invocation) -> CommandOutcome {
        self.calls.borrow_mut().push(invocation.clone());

        if let Some(prefix) = &self.fail_prefix {
            if invocation.command_line().starts_with(prefix.as_str()) {
                return CommandOutcome::Failed {
                    code: Some(1),
                    stderr: self.fail_stderr.clone(),
                };
            }
        }

        let is_clone =
            invocation.program() == "git" && invocation.args().first().map(String::as_str) == Some("clone");
        if is_clone && self.clone_creates_dir {
            if let Some(target) = invocation.args().get(2) {
                fs::create_dir_all(target).expect("create clone target");
            }
        }

        CommandOutcome::Success {
            output: String::new(),
        }
    }
}

pub fn settings(owner: Option<&str>, token: Option<&str>, count: usize) -> Settings {
    Settings {
        owner: owner.map(str::to_string),
        token: token.map(Credential::new),
        repo_count: NonZeroUsize::new(count).expect("count > 0"),
        ..Settings::default()
    }
}

#[derive(Clone, Default)]
struct LogBuffer(Arc<Mutex<Vec<u8>>>);

impl Write for LogBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Run `f` with a plain-text subscriber installed and return what it logged.
pub fn capture_logs<T>(f: impl FnOnce() -> T) -> (T, String) {
    let buffer = LogBuffer::default();
    let writer = buffer.clone();
    let subscriber = tracing_subscriber::fmt()
        .with_writer(move || writer.clone())
        .with_ansi(false)
        .without_time()
        .with_target(false)
        .with_max_level(tracing::Level::DEBUG)
        .finish();
    let result = tracing::subscriber::with_default(subscriber, f);
    let bytes = buffer.0.lock().unwrap().clone();
    (result, String::from_utf8(bytes).expect("utf-8 log output"))
}
