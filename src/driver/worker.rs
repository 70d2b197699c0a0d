//! Fork-mode worker: the child half of the process-isolated driver.

use std::fs::File;
use std::io::{BufReader, Write};
use std::path::Path;

use crate::error::{Result, TallyError};
use crate::protocol::write_records;
use crate::sort::{by_count_desc, sort_records};
use crate::store::WordStore;
use crate::tokenize::for_each_word;

/// Counts one input into a private store and encodes it onto the transport
/// (stdout when invoked as a child). Records are sorted before transmission
/// so the transport doubles as a readable result listing; the coordinator's
/// fold does not depend on wire order. Failing to open the input is fatal
/// to this worker and surfaces to the coordinator as a non-zero exit.
pub fn run<W: Write>(path: &Path, out: &mut W) -> Result<()> {
    let file = File::open(path).map_err(|source| TallyError::InputUnavailable {
        path: path.to_path_buf(),
        source,
    })?;

    let mut store = WordStore::new();
    for_each_word(BufReader::new(file), |word| {
        store.increment(word, 1);
    })?;

    let mut records: Vec<_> = store.into_records().collect();
    sort_records(&mut records, by_count_desc);
    write_records(out, &records)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write as _;
    use tempfile::TempDir;

    #[test]
    fn emits_sorted_wire_lines_for_one_input() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("input.txt");
        File::create(&path)
            .unwrap()
            .write_all(b"the cat sat the")
            .unwrap();

        let mut out = Vec::new();
        run(&path, &mut out).unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "       2\tthe\n       1\tcat\n       1\tsat\n"
        );
    }

    #[test]
    fn missing_input_is_fatal_to_the_worker() {
        let dir = TempDir::new().unwrap();
        let mut out = Vec::new();
        let err = run(&dir.path().join("absent.txt"), &mut out).unwrap_err();
        assert!(matches!(err, TallyError::InputUnavailable { .. }));
        assert!(out.is_empty());
    }
}
