use std::path::PathBuf;
use std::process::Stdio;
use std::string::FromUtf8Error;

use compio::process::Command;
use snafu::{ResultExt, Snafu};
use tracing::{debug, info};

const GIT: &str = "git";
/// Keeps non-ASCII paths unquoted so they sort and split like any other.
const UNQUOTED_PATHS: [&str; 2] = ["-c", "core.quotepath=off"];

/// Produces the two listings for a commit by asking the `git` binary.
#[derive(Debug, Clone)]
pub struct GitSource {
    root: PathBuf,
}

impl GitSource {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Every file in the commit's tree, in git path order.
    pub async fn tracked_files(&self, commit: &str) -> Result<Vec<String>, GitError> {
        self.run(&["ls-tree", "-r", "--name-only", commit]).await
    }

    /// `<status>\t<path>` for every file the commit changed. `--root` makes an
    /// initial commit list its files as added instead of printing nothing.
    pub async fn changed_files(&self, commit: &str) -> Result<Vec<String>, GitError> {
        self.run(&[
            "diff-tree",
            "--no-commit-id",
            "--name-status",
            "-r",
            "--root",
            commit,
        ])
        .await
    }

    async fn run(&self, args: &[&str]) -> Result<Vec<String>, GitError> {
        let command_line = format!("{} {}", GIT, args.join(" "));
        let mut cmd = self.create_command(args);

        debug!("Running '{}' in {}", command_line, self.root.display());
        let child = cmd.spawn().context(SpawnSnafu {
            command: command_line.clone(),
        })?;
        let output = child.wait_with_output().await.context(WaitSnafu {
            command: command_line.clone(),
        })?;

        if !output.status.success() {
            return UnsuccessfulExecutionSnafu {
                command: command_line,
                status: output.status.code().unwrap_or(-1),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            }
            .fail();
        }

        let stdout = String::from_utf8(output.stdout).context(EncodingSnafu {
            command: command_line.clone(),
        })?;
        let lines = stdout.lines().map(str::to_string).collect::<Vec<_>>();
        info!("'{}' listed {} paths", command_line, lines.len());
        Ok(lines)
    }

    /// Creates and configures the command with piped output
    fn create_command(&self, args: &[&str]) -> Command {
        let mut cmd = Command::new(GIT);
        cmd.args(UNQUOTED_PATHS);
        cmd.args(args);
        cmd.current_dir(&self.root);
        let _ = cmd.stdin(Stdio::null());
        let _ = cmd.stdout(Stdio::piped());
        let _ = cmd.stderr(Stdio::piped());
        cmd
    }
}

#[derive(Debug, Snafu)]
pub enum GitError {
    #[snafu(display("Failed to spawn '{}'", command))]
    SpawnError {
        command: String,
        source: std::io::Error,
    },
    #[snafu(display("Failed to wait for '{}'", command))]
    WaitError {
        command: String,
        source: std::io::Error,
    },
    #[snafu(display("'{}' failed with exit code {}: {}", command, status, stderr))]
    UnsuccessfulExecution {
        command: String,
        status: i32,
        stderr: String,
    },
    #[snafu(display("'{}' printed output that is not valid UTF-8", command))]
    EncodingError {
        command: String,
        source: FromUtf8Error,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unsuccessful_execution_reports_command_and_stderr() {
        let error = GitError::UnsuccessfulExecution {
            command: "git ls-tree -r --name-only nope".into(),
            status: 128,
            stderr: "fatal: Not a valid object name nope".into(),
        };

        let message = error.to_string();

        assert!(message.contains("git ls-tree -r --name-only nope"));
        assert!(message.contains("128"));
        assert!(message.contains("Not a valid object name"));
    }

    #[test]
    fn spawn_error_names_the_command() {
        let error = GitError::SpawnError {
            command: "git diff-tree".into(),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "no git"),
        };

        assert!(error.to_string().contains("git diff-tree"));
    }
}
