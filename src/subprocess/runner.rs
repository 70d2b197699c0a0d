use std::time::Duration;

use async_trait::async_trait;

use super::error::ProcessError;

#[derive(Debug, Clone)]
pub struct ProcessCommand {
    pub program: String,
    pub args: Vec<String>,
}

#[derive(Debug, Clone)]
pub struct ProcessOutput {
    pub status: ExitStatus,
    pub stdout: String,
    pub stderr: String,
    pub duration: Duration,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExitStatus {
    Success,
    Error(i32),
    Signal(i32),
}

impl ExitStatus {
    pub fn success(&self) -> bool {
        matches!(self, ExitStatus::Success)
    }

    pub fn code(&self) -> Option<i32> {
        match self {
            ExitStatus::Success => Some(0),
            ExitStatus::Error(code) => Some(*code),
            ExitStatus::Signal(_) => None,
        }
    }
}

#[async_trait]
pub trait ProcessRunner: Send + Sync {
    /// Runs the command to completion, capturing stdout and stderr.
    async fn run(&self, command: ProcessCommand) -> Result<ProcessOutput, ProcessError>;
}

pub struct TokioProcessRunner;

impl TokioProcessRunner {
    fn convert_exit_status(status: std::process::ExitStatus) -> ExitStatus {
        if status.success() {
            return ExitStatus::Success;
        }
        #[cfg(unix)]
        {
            use std::os::unix::process::ExitStatusExt;
            if let Some(signal) = status.signal() {
                return ExitStatus::Signal(signal);
            }
        }
        ExitStatus::Error(status.code().unwrap_or(-1))
    }

    fn map_spawn_error(err: std::io::Error, program: &str) -> ProcessError {
        if err.kind() == std::io::ErrorKind::NotFound {
            ProcessError::CommandNotFound(program.to_string())
        } else {
            ProcessError::Io(err)
        }
    }
}

#[async_trait]
impl ProcessRunner for TokioProcessRunner {
    async fn run(&self, command: ProcessCommand) -> Result<ProcessOutput, ProcessError> {
        let start = std::time::Instant::now();
        tracing::debug!(
            "executing subprocess: {} {}",
            command.program,
            command.args.join(" ")
        );

        let mut cmd = tokio::process::Command::new(&command.program);
        cmd.args(&command.args)
            .stdin(std::process::Stdio::null())
            .stdout(std::process::Stdio::piped())
            .stderr(std::process::Stdio::piped());

        let child = cmd
            .spawn()
            .map_err(|e| Self::map_spawn_error(e, &command.program))?;
        let output = child.wait_with_output().await?;

        let result = ProcessOutput {
            status: Self::convert_exit_status(output.status),
            stdout: String::from_utf8(output.stdout)?,
            stderr: String::from_utf8(output.stderr)?,
            duration: start.elapsed(),
        };
        tracing::debug!(
            "subprocess {} finished: {:?} in {:?}",
            command.program,
            result.status,
            result.duration
        );
        Ok(result)
    }
}
