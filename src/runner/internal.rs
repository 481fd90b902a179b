//! Process spawning for the system runner

use std::io::{self, Write};
use std::process::{ChildStdin, Command, Output, Stdio};
use std::thread;

use super::{collapse_output, log_outcome, CommandOutcome, CommandRunner, Invocation};

/// Runs invocations as real child processes.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemRunner;

impl CommandRunner for SystemRunner {
    fn run(&self, invocation: &Invocation) -> CommandOutcome {
        let outcome = match execute(invocation) {
            Ok(output) => classify(output),
            Err(e) if e.kind() == io::ErrorKind::NotFound => CommandOutcome::NotFound,
            Err(e) => CommandOutcome::Io {
                message: e.to_string(),
            },
        };
        log_outcome(invocation, &outcome);
        outcome
    }
}

fn execute(invocation: &Invocation) -> io::Result<Output> {
    let mut cmd = Command::new(invocation.program());
    cmd.args(invocation.args());

    if let Some(dir) = invocation.cwd() {
        cmd.current_dir(dir);
    }

    // Inherited environment stays; overlay wins on conflicts
    for (name, value) in invocation.overlay().vars() {
        cmd.env(name, value);
    }

    cmd.stdout(Stdio::piped());
    cmd.stderr(Stdio::piped());
    cmd.stdin(if invocation.stdin_payload().is_some() {
        Stdio::piped()
    } else {
        Stdio::null()
    });

    let mut child = cmd.spawn()?;
    let stdin = child.stdin.take();

    // stdin is fed from its own thread while stdout/stderr drain, so a child
    // that fills its output pipe before reading input cannot stall either side
    thread::scope(|scope| {
        let writer = stdin
            .zip(invocation.stdin_payload())
            .map(|(pipe, payload)| scope.spawn(move || feed_stdin(pipe, payload)));

        let output = child.wait_with_output()?;
        if let Some(writer) = writer {
            writer
                .join()
                .map_err(|_| io::Error::new(io::ErrorKind::Other, "stdin writer panicked"))??;
        }
        Ok(output)
    })
}

/// Write the payload, then drop the pipe so the child sees EOF.
fn feed_stdin(mut pipe: ChildStdin, payload: &[u8]) -> io::Result<()> {
    match pipe.write_all(payload) {
        // A child that exits without reading is still classified by its status
        Err(e) if e.kind() == io::ErrorKind::BrokenPipe => Ok(()),
        result => result,
    }
}

fn classify(output: Output) -> CommandOutcome {
    let stdout = String::from_utf8_lossy(&output.stdout);
    let stderr = String::from_utf8_lossy(&output.stderr);

    if output.status.success() {
        CommandOutcome::Success {
            output: collapse_output(&stdout, &stderr),
        }
    } else {
        CommandOutcome::Failed {
            code: output.status.code(),
            stderr: stderr.into_owned(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Credential;
    use crate::runner::EnvOverlay;

    #[test]
    fn test_missing_program_is_not_found() {
        let inv = Invocation::new(
            "pagesmith-no-such-program-on-path",
            ["--version"],
            EnvOverlay::empty(),
        );
        assert_eq!(SystemRunner.run(&inv), CommandOutcome::NotFound);
    }

    #[cfg(unix)]
    #[test]
    fn test_success_collapses_both_streams() {
        let inv = Invocation::new(
            "sh",
            ["-c", "echo one; echo two >&2"],
            EnvOverlay::empty(),
        );
        assert_eq!(
            SystemRunner.run(&inv),
            CommandOutcome::Success {
                output: "one two".to_string()
            }
        );
    }

    #[cfg(unix)]
    #[test]
    fn test_nonzero_exit_keeps_code_and_stderr() {
        let inv = Invocation::new("sh", ["-c", "echo boom >&2; exit 3"], EnvOverlay::empty());
        match SystemRunner.run(&inv) {
            CommandOutcome::Failed { code, stderr } => {
                assert_eq!(code, Some(3));
                assert_eq!(stderr.trim(), "boom");
            }
            other => panic!("expected failure, got {:?}", other),
        }
    }

    #[cfg(unix)]
    #[test]
    fn test_overlay_reaches_child_environment() {
        let overlay = EnvOverlay::with_credential(&Credential::new("tok123"));
        let inv = Invocation::new("sh", ["-c", "printf %s \"$GH_TOKEN\""], overlay);
        assert_eq!(
            SystemRunner.run(&inv),
            CommandOutcome::Success {
                output: "tok123".to_string()
            }
        );
    }

    #[cfg(unix)]
    #[test]
    fn test_stdin_payload_is_delivered() {
        let inv = Invocation::new("cat", Vec::<String>::new(), EnvOverlay::empty())
            .stdin(r#"{"source": {"branch": "main", "path": "/"}}"#);
        assert_eq!(
            SystemRunner.run(&inv),
            CommandOutcome::Success {
                output: r#"{"source": {"branch": "main", "path": "/"}}"#.to_string()
            }
        );
    }

    #[cfg(unix)]
    #[test]
    fn test_large_output_before_reading_stdin() {
        // 256 KiB of stdout before the child touches stdin overflows any pipe buffer
        let inv = Invocation::new(
            "sh",
            ["-c", "head -c 262144 /dev/zero | tr '\\0' 'a'; cat >/dev/null; echo done >&2"],
            EnvOverlay::empty(),
        )
        .stdin(vec![b'x'; 262_144]);
        match SystemRunner.run(&inv) {
            CommandOutcome::Success { output } => {
                assert_eq!(output.len(), 262_144 + " done".len());
                assert!(output.ends_with(" done"));
            }
            other => panic!("expected success, got {:?}", other),
        }
    }

    #[cfg(unix)]
    #[test]
    fn test_working_directory_is_applied() {
        let dir = tempfile::TempDir::new().unwrap();
        let inv = Invocation::new("sh", ["-c", "ls"], EnvOverlay::empty()).current_dir(dir.path());
        std::fs::write(dir.path().join("marker.txt"), "x").unwrap();
        assert_eq!(
            SystemRunner.run(&inv),
            CommandOutcome::Success {
                output: "marker.txt".to_string()
            }
        );
    }
}
