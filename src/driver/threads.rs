//! Thread-shared driver: one worker thread per input, all folding into a
//! single lock-guarded store.

use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use std::thread;

use tracing::{debug, error};

use crate::error::{Result, TallyError};
use crate::store::{SharedWordStore, WordStore};
use crate::tokenize::for_each_word;

/// Spawns one thread per input against one [`SharedWordStore`], joins them
/// all, then reclaims the store. Reclaiming requires ownership of the
/// store, so a read before the joins is unrepresentable. An unopenable
/// input fails the run after the remaining partitions have finished.
pub fn run(inputs: &[PathBuf]) -> Result<WordStore> {
    let store = SharedWordStore::new();
    let mut failures = Vec::new();

    thread::scope(|scope| {
        let handles: Vec<_> = inputs
            .iter()
            .map(|path| {
                let store = &store;
                scope.spawn(move || count_into(path, store))
            })
            .collect();

        for (path, handle) in inputs.iter().zip(handles) {
            match handle.join() {
                Ok(Ok(())) => {}
                Ok(Err(err)) => {
                    error!("worker thread for {} failed: {}", path.display(), err);
                    failures.push(format!("{}: {}", path.display(), err));
                }
                Err(panic) => std::panic::resume_unwind(panic),
            }
        }
    });

    if !failures.is_empty() {
        return Err(TallyError::IncompleteRun {
            failed: failures.len(),
            total: inputs.len(),
            details: failures.join("; "),
        });
    }
    Ok(store.into_inner())
}

fn count_into(path: &Path, store: &SharedWordStore) -> Result<()> {
    debug!("thread worker counting {}", path.display());
    let file = File::open(path).map_err(|source| TallyError::InputUnavailable {
        path: path.to_path_buf(),
        source,
    })?;
    // Each increment takes the store lock; the file reads happen outside it.
    for_each_word(BufReader::new(file), |word| {
        store.increment(word, 1);
    })?;
    Ok(())
}
