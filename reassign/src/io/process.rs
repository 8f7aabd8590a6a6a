//! Run the page CLI with a timeout and bounded output capture.

use std::io::Read;
use std::path::Path;
use std::process::{Command, ExitStatus, Stdio};
use std::thread;
use std::time::Duration;

use anyhow::{Context, Result, anyhow};
use tracing::{debug, error, instrument, warn};
use wait_timeout::ChildExt;

/// Captured child process output.
#[derive(Debug)]
pub struct CommandOutput {
    pub status: ExitStatus,
    pub stdout: Vec<u8>,
    pub stderr: Vec<u8>,
    pub stdout_truncated: usize,
    pub stderr_truncated: usize,
    pub timed_out: bool,
}

impl CommandOutput {
    /// Fail unless the command exited zero within its timeout with untruncated stdout.
    pub fn ensure_success(&self, label: &str) -> Result<()> {
        if self.timed_out {
            return Err(anyhow!("{label} timed out"));
        }
        if !self.status.success() {
            let stderr = String::from_utf8_lossy(&self.stderr);
            return Err(anyhow!(
                "{label} failed with status {:?}: {}",
                self.status.code(),
                stderr.trim()
            ));
        }
        if self.stdout_truncated > 0 {
            return Err(anyhow!(
                "{label} stdout exceeded limit by {} bytes",
                self.stdout_truncated
            ));
        }
        Ok(())
    }
}

/// Run `program args..` in `workdir`, capturing stdout/stderr without risking pipe deadlocks.
///
/// Output is read concurrently while the child runs. `output_limit_bytes` bounds what is kept
/// in memory; the remainder is drained and counted as truncated.
#[instrument(skip_all, fields(program = %program, timeout_secs = timeout.as_secs()))]
pub fn run_command_with_timeout(
    program: &str,
    args: &[String],
    workdir: &Path,
    timeout: Duration,
    output_limit_bytes: usize,
) -> Result<CommandOutput> {
    let mut cmd = Command::new(program);
    cmd.args(args)
        .current_dir(workdir)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped());

    debug!(?args, "spawning child process");
    let mut child = match cmd.spawn() {
        Ok(c) => c,
        Err(e) => {
            error!(err = %e, program, "failed to spawn command");
            return Err(e).with_context(|| format!("spawn {program}"));
        }
    };

    let stdout = child
        .stdout
        .take()
        .ok_or_else(|| anyhow!("stdout was not piped"))?;
    let stderr = child
        .stderr
        .take()
        .ok_or_else(|| anyhow!("stderr was not piped"))?;

    let stdout_handle = thread::spawn(move || read_stream_limited(stdout, output_limit_bytes));
    let stderr_handle = thread::spawn(move || read_stream_limited(stderr, output_limit_bytes));

    let mut timed_out = false;
    let status = match child.wait_timeout(timeout).context("wait for command")? {
        Some(status) => status,
        None => {
            warn!(
                timeout_secs = timeout.as_secs(),
                "command timed out, killing"
            );
            timed_out = true;
            child.kill().context("kill command")?;
            child.wait().context("wait command after kill")?
        }
    };

    let (stdout, stdout_truncated) = join_output(stdout_handle).context("join stdout")?;
    let (stderr, stderr_truncated) = join_output(stderr_handle).context("join stderr")?;

    if stdout_truncated > 0 || stderr_truncated > 0 {
        warn!(stdout_truncated, stderr_truncated, "output truncated");
    }

    debug!(exit_code = ?status.code(), timed_out, "command finished");
    Ok(CommandOutput {
        status,
        stdout,
        stderr,
        stdout_truncated,
        stderr_truncated,
        timed_out,
    })
}

fn join_output(handle: thread::JoinHandle<Result<(Vec<u8>, usize)>>) -> Result<(Vec<u8>, usize)> {
    match handle.join() {
        Ok(result) => result,
        Err(_) => Err(anyhow!("output reader thread panicked")),
    }
}

fn read_stream_limited<R: Read>(mut reader: R, limit: usize) -> Result<(Vec<u8>, usize)> {
    let mut buf = Vec::new();
    let mut truncated = 0usize;
    let mut chunk = [0u8; 8192];

    loop {
        let n = reader.read(&mut chunk).context("read output")?;
        if n == 0 {
            break;
        }
        let remaining = limit.saturating_sub(buf.len());
        if remaining > 0 {
            let keep = n.min(remaining);
            buf.extend_from_slice(&chunk[..keep]);
            truncated += n.saturating_sub(keep);
        } else {
            truncated += n;
        }
    }

    Ok((buf, truncated))
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;

    fn sh(script: &str) -> Vec<String> {
        vec!["-c".to_string(), script.to_string()]
    }

    #[test]
    fn captures_stdout_in_workdir() {
        let temp = tempfile::tempdir().expect("tempdir");
        std::fs::write(temp.path().join("marker.txt"), "here").expect("write");

        let output = run_command_with_timeout(
            "sh",
            &sh("cat marker.txt"),
            temp.path(),
            Duration::from_secs(10),
            1000,
        )
        .expect("run");

        output.ensure_success("cat").expect("success");
        assert_eq!(output.stdout, b"here");
    }

    #[test]
    fn non_zero_exit_reports_stderr() {
        let temp = tempfile::tempdir().expect("tempdir");
        let output = run_command_with_timeout(
            "sh",
            &sh("echo boom >&2; exit 3"),
            temp.path(),
            Duration::from_secs(10),
            1000,
        )
        .expect("run");

        let err = output.ensure_success("page fetch").unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("Some(3)"));
        assert!(msg.contains("boom"));
    }

    #[test]
    fn truncated_stdout_is_a_failure() {
        let temp = tempfile::tempdir().expect("tempdir");
        let output = run_command_with_timeout(
            "sh",
            &sh("printf 0123456789"),
            temp.path(),
            Duration::from_secs(10),
            4,
        )
        .expect("run");

        assert_eq!(output.stdout, b"0123");
        assert_eq!(output.stdout_truncated, 6);
        assert!(output.ensure_success("page fetch").is_err());
    }

    #[test]
    fn timeout_kills_child() {
        let temp = tempfile::tempdir().expect("tempdir");
        let output = run_command_with_timeout(
            "sh",
            &sh("exec sleep 5"),
            temp.path(),
            Duration::from_millis(200),
            1000,
        )
        .expect("run");

        assert!(output.timed_out);
        let err = output.ensure_success("sleep").unwrap_err();
        assert!(err.to_string().contains("timed out"));
    }

    #[test]
    fn missing_program_fails_to_spawn() {
        let temp = tempfile::tempdir().expect("tempdir");
        let err = run_command_with_timeout(
            "definitely-not-a-real-program-xyz",
            &[],
            temp.path(),
            Duration::from_secs(1),
            1000,
        )
        .unwrap_err();
        assert!(err.to_string().contains("spawn"));
    }
}
