//! External process execution
//!
//! Two modes are offered: captured output for scaffolding generators, which
//! run as detached background tasks, and inherited terminal I/O for
//! dependency installers, which the caller awaits before moving on.
//! Neither mode retries or times out.

use crate::error::GenerateError;
use async_trait::async_trait;
use colored::Colorize;
use std::path::PathBuf;
use std::process::Stdio;
use std::sync::Arc;
use tokio::process::Command as TokioCommand;
use tokio::task::JoinHandle;

/// A program, its arguments and the directory it runs in
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExternalCommand {
    pub program: String,
    pub args: Vec<String>,
    pub cwd: PathBuf,
}

impl ExternalCommand {
    /// Build a command from a configured argv prefix plus extra arguments
    pub fn from_argv<I, S>(argv: &[String], extra: I, cwd: impl Into<PathBuf>) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let (program, leading) = match argv.split_first() {
            Some((program, rest)) => (program.clone(), rest.to_vec()),
            None => (String::new(), Vec::new()),
        };

        let mut args = leading;
        args.extend(extra.into_iter().map(Into::into));

        Self {
            program,
            args,
            cwd: cwd.into(),
        }
    }

    /// The command as the user would type it
    pub fn command_line(&self) -> String {
        std::iter::once(self.program.as_str())
            .chain(self.args.iter().map(String::as_str))
            .collect::<Vec<_>>()
            .join(" ")
    }

    fn to_tokio(&self) -> TokioCommand {
        // npm, npx and friends are .cmd shims on Windows
        let mut cmd = if cfg!(target_os = "windows") {
            let mut cmd = TokioCommand::new("cmd");
            cmd.arg("/C").arg(&self.program);
            cmd
        } else {
            TokioCommand::new(&self.program)
        };
        cmd.args(&self.args).current_dir(&self.cwd);
        cmd
    }

    fn spawn_error(&self, source: std::io::Error) -> GenerateError {
        GenerateError::Spawn {
            command: self.command_line(),
            source,
        }
    }
}

/// Captured result of a finished process
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandOutput {
    pub code: Option<i32>,
    pub stdout: String,
    pub stderr: String,
}

impl CommandOutput {
    pub fn success(&self) -> bool {
        self.code == Some(0)
    }

    /// Diagnostics printed by a command that still succeeded
    pub fn warnings(&self) -> Option<&str> {
        let stderr = self.stderr.trim();
        if self.success() && !stderr.is_empty() {
            Some(stderr)
        } else {
            None
        }
    }

    /// Turn a non-zero exit into a process error
    pub fn into_result(self, command: &ExternalCommand) -> Result<Self, GenerateError> {
        if self.success() {
            Ok(self)
        } else {
            Err(GenerateError::ExitStatus {
                command: command.command_line(),
                code: self.code,
                stderr: self.stderr,
            })
        }
    }
}

/// Seam over child-process execution
#[async_trait]
pub trait ProcessRunner: Send + Sync {
    /// Run to completion with stdout and stderr captured. Only a spawn
    /// failure is an error here; the exit code is reported in the output.
    async fn capture(&self, command: &ExternalCommand) -> Result<CommandOutput, GenerateError>;

    /// Run with the terminal's stdin, stdout and stderr. Spawn failure and
    /// non-zero exit are both errors.
    async fn run_inherited(&self, command: &ExternalCommand) -> Result<(), GenerateError>;
}

/// Runs commands as real child processes via tokio
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemRunner;

impl SystemRunner {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl ProcessRunner for SystemRunner {
    async fn capture(&self, command: &ExternalCommand) -> Result<CommandOutput, GenerateError> {
        print_running(command);

        let output = command
            .to_tokio()
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .output()
            .await
            .map_err(|e| command.spawn_error(e))?;

        Ok(CommandOutput {
            code: output.status.code(),
            stdout: String::from_utf8_lossy(&output.stdout).to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).to_string(),
        })
    }

    async fn run_inherited(&self, command: &ExternalCommand) -> Result<(), GenerateError> {
        print_running(command);

        let status = command
            .to_tokio()
            .stdin(Stdio::inherit())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .status()
            .await
            .map_err(|e| command.spawn_error(e))?;

        println!();
        if status.success() {
            Ok(())
        } else {
            Err(GenerateError::ExitStatus {
                command: command.command_line(),
                code: status.code(),
                stderr: String::new(),
            })
        }
    }
}

fn print_running(command: &ExternalCommand) {
    println!();
    println!(
        "{} {} {}",
        "Running:".dimmed(),
        command.command_line().yellow(),
        format!("(in {})", command.cwd.display()).dimmed()
    );
    println!();
}

/// Start a captured command in the background and hand its outcome to
/// `on_complete` when the process exits.
///
/// The returned handle is never needed for correctness; it only lets the
/// binary wait for outstanding work before the runtime shuts down.
pub fn spawn_detached<F, T>(
    runner: Arc<dyn ProcessRunner>,
    command: ExternalCommand,
    on_complete: F,
) -> JoinHandle<T>
where
    F: FnOnce(Result<CommandOutput, GenerateError>) -> T + Send + 'static,
    T: Send + 'static,
{
    tokio::spawn(async move {
        let result = runner
            .capture(&command)
            .await
            .and_then(|output| output.into_result(&command));
        on_complete(result)
    })
}
