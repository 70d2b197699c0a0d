//! Process-isolated driver: the coordinator half.
//!
//! One worker process per input, each re-invoking this executable with the
//! hidden `worker` subcommand; the child's stdout is the merge transport.
//! Workers run concurrently and each transport is drained to end-of-stream,
//! which is the only completion signal. The fold is commutative per word,
//! so drain order across workers does not matter.

use std::path::PathBuf;
use std::sync::Arc;

use futures::future::join_all;
use tracing::{debug, error};

use crate::error::{Result, TallyError};
use crate::protocol::decode_into;
use crate::store::WordStore;
use crate::subprocess::{ProcessCommandBuilder, ProcessRunner, SubprocessManager};

/// Runs one worker process per input and merges their transports into one
/// store. A worker exiting non-zero, or failing to spawn, is a run-level
/// failure: the remaining partitions are still drained, then the run fails
/// naming every bad partition. Workers are never cancelled or timed out.
pub async fn run(inputs: &[PathBuf], subprocess: &SubprocessManager) -> Result<WordStore> {
    let worker_program = std::env::current_exe()?.to_string_lossy().into_owned();
    run_with_program(inputs, subprocess.runner(), &worker_program).await
}

async fn run_with_program(
    inputs: &[PathBuf],
    runner: Arc<dyn ProcessRunner>,
    worker_program: &str,
) -> Result<WordStore> {
    let workers = inputs.iter().map(|path| {
        let command = ProcessCommandBuilder::new(worker_program)
            .arg("worker")
            .arg(&path.to_string_lossy())
            .build();
        let runner = Arc::clone(&runner);
        async move { (path, runner.run(command).await) }
    });

    let mut store = WordStore::new();
    let mut failures = Vec::new();
    for (path, result) in join_all(workers).await {
        match result {
            Ok(output) if output.status.success() => {
                let stats = decode_into(&mut store, output.stdout.as_bytes())?;
                debug!(
                    "merged {} records from {} ({} malformed)",
                    stats.records,
                    path.display(),
                    stats.malformed
                );
            }
            Ok(output) => {
                error!(
                    "worker for {} exited with {:?}: {}",
                    path.display(),
                    output.status,
                    output.stderr.trim()
                );
                failures.push(format!(
                    "{}: worker exited with {:?}: {}",
                    path.display(),
                    output.status,
                    output.stderr.trim()
                ));
            }
            Err(err) => {
                error!("worker for {} could not run: {}", path.display(), err);
                failures.push(format!("{}: {}", path.display(), err));
            }
        }
    }

    if !failures.is_empty() {
        return Err(TallyError::IncompleteRun {
            failed: failures.len(),
            total: inputs.len(),
            details: failures.join("; "),
        });
    }
    Ok(store)
}
