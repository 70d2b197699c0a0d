//! Sequential driver: one store, one pass, no concurrency.

use std::fs::File;
use std::io::{self, BufReader};
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::{Result, TallyError};
use crate::store::WordStore;
use crate::tokenize::for_each_word;

/// Counts every input in order in the calling thread. With no named
/// inputs, counts stdin instead. An unopenable input fails immediately.
pub fn run(inputs: &[PathBuf]) -> Result<WordStore> {
    let mut store = WordStore::new();
    if inputs.is_empty() {
        debug!("sequential driver reading stdin");
        for_each_word(io::stdin().lock(), |word| {
            store.increment(word, 1);
        })?;
        return Ok(store);
    }
    for path in inputs {
        count_file(path, &mut store)?;
    }
    Ok(store)
}

fn count_file(path: &Path, store: &mut WordStore) -> Result<()> {
    debug!("counting words in {}", path.display());
    let file = File::open(path).map_err(|source| TallyError::InputUnavailable {
        path: path.to_path_buf(),
        source,
    })?;
    for_each_word(BufReader::new(file), |word| {
        store.increment(word, 1);
    })?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::TempDir;

    fn write_input(dir: &TempDir, name: &str, text: &str) -> PathBuf {
        let path = dir.path().join(name);
        let mut file = File::create(&path).unwrap();
        file.write_all(text.as_bytes()).unwrap();
        path
    }

    #[test]
    fn counts_across_multiple_inputs() {
        let dir = TempDir::new().unwrap();
        let a = write_input(&dir, "a.txt", "the cat sat");
        let b = write_input(&dir, "b.txt", "the dog sat");

        let store = run(&[a, b]).unwrap();
        assert_eq!(store.lookup("the"), Some(2));
        assert_eq!(store.lookup("sat"), Some(2));
        assert_eq!(store.lookup("cat"), Some(1));
        assert_eq!(store.lookup("dog"), Some(1));
        assert_eq!(store.len(), 4);
    }

    #[test]
    fn missing_input_is_fatal() {
        let dir = TempDir::new().unwrap();
        let missing = dir.path().join("absent.txt");
        let err = run(&[missing.clone()]).unwrap_err();
        match err {
            TallyError::InputUnavailable { path, .. } => assert_eq!(path, missing),
            other => panic!("unexpected error: {other}"),
        }
    }
}
