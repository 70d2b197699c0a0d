//! Subprocess abstraction used by the fork driver: a runner trait with a
//! production Tokio implementation and a mock for tests.

pub mod builder;
pub mod error;
pub mod mock;
pub mod runner;

pub use builder::ProcessCommandBuilder;
pub use error::ProcessError;
pub use mock::{MockCommandConfig, MockProcessRunner};
pub use runner::{ExitStatus, ProcessCommand, ProcessOutput, ProcessRunner, TokioProcessRunner};

use std::sync::Arc;

#[derive(Clone)]
pub struct SubprocessManager {
    runner: Arc<dyn ProcessRunner>,
}

impl SubprocessManager {
    pub fn new(runner: Arc<dyn ProcessRunner>) -> Self {
        Self { runner }
    }

    pub fn production() -> Self {
        Self::new(Arc::new(TokioProcessRunner))
    }

    #[cfg(test)]
    pub fn mock() -> (Self, MockProcessRunner) {
        let mock = MockProcessRunner::new();
        let runner = Arc::new(mock.clone()) as Arc<dyn ProcessRunner>;
        (Self::new(runner), mock)
    }

    pub fn runner(&self) -> Arc<dyn ProcessRunner> {
        Arc::clone(&self.runner)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn production_runner_captures_stdout() {
        let runner = TokioProcessRunner;
        let command = ProcessCommandBuilder::new("echo").arg("hello world").build();

        let output = runner.run(command).await.unwrap();
        assert!(output.status.success());
        assert_eq!(output.stdout.trim(), "hello world");
        assert!(output.stderr.is_empty());
    }

    #[tokio::test]
    async fn production_runner_reports_exit_code() {
        let runner = TokioProcessRunner;
        let command = ProcessCommandBuilder::new("false").build();

        let output = runner.run(command).await.unwrap();
        assert!(!output.status.success());
        assert_eq!(output.status.code(), Some(1));
    }

    #[tokio::test]
    async fn production_runner_command_not_found() {
        let runner = TokioProcessRunner;
        let command = ProcessCommandBuilder::new("nonexistent-command-12345").build();

        let result = runner.run(command).await;
        assert!(matches!(
            result.unwrap_err(),
            ProcessError::CommandNotFound(_)
        ));
    }

    #[tokio::test]
    async fn mock_runner_matches_on_args() {
        let mut mock = MockProcessRunner::new();
        mock.expect_command("tally")
            .with_args(|args| args == ["worker", "a.txt"])
            .returns_stdout("       1\tfoo\n")
            .finish();

        let output = mock
            .run(
                ProcessCommandBuilder::new("tally")
                    .args(["worker", "a.txt"])
                    .build(),
            )
            .await
            .unwrap();
        assert_eq!(output.stdout, "       1\tfoo\n");
        assert!(mock
            .run(ProcessCommandBuilder::new("tally").arg("other").build())
            .await
            .is_err());
        assert_eq!(mock.call_history().len(), 2);
    }
}
