//! Orchestration strategies wiring the tokenizer, stores, sort stage, and
//! merge protocol into a complete run. All three drivers implement the same
//! contract: given the same inputs they produce the same multiset of
//! (word, count) pairs, differing only in execution discipline.

pub mod process;
pub mod sequential;
pub mod threads;
pub mod worker;

use std::io::Write;

use crate::error::Result;
use crate::protocol::write_records;
use crate::sort::{by_count_desc, sort_records};
use crate::store::WordStore;

/// Final sort + emit stage. Runs once, single-threaded, strictly after all
/// contributing concurrency has quiesced (consuming the store enforces it).
pub fn emit<W: Write>(store: WordStore, out: &mut W) -> Result<()> {
    let mut records: Vec<_> = store.into_records().collect();
    sort_records(&mut records, by_count_desc);
    write_records(out, &records)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn emit_writes_sorted_wire_lines() {
        let mut store = WordStore::new();
        for word in ["the", "cat", "sat", "the", "dog", "sat"] {
            store.increment(word, 1);
        }
        let mut out = Vec::new();
        emit(store, &mut out).unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "       2\tsat\n       2\tthe\n       1\tcat\n       1\tdog\n"
        );
    }
}
